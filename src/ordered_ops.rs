/// Merges two sequences that are both sorted in strictly increasing order of
/// `key`, appending the result to `output` in the same order.
///
/// Elements whose keys appear in only one sequence are moved as they are.
/// Elements with equal keys are fused with `combine`, which may cancel both
/// of them by returning `None`. Runs in O(n + m).
pub fn merge<T, K: Ord>(
    a_iter: impl IntoIterator<Item = T>,
    b_iter: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
    combine: impl Fn(T, T) -> Option<T>,
    output: &mut Vec<T>,
) {
    let mut a_iter = a_iter.into_iter().peekable();
    let mut b_iter = b_iter.into_iter().peekable();

    loop {
        let order = match (a_iter.peek(), b_iter.peek()) {
            (Some(a), Some(b)) => key(a).cmp(&key(b)),
            (Some(_), None) => {
                output.extend(a_iter);
                return;
            }
            (None, _) => {
                output.extend(b_iter);
                return;
            }
        };

        // The peeks above guarantee both `next()` calls below yield.
        match order {
            std::cmp::Ordering::Less => output.extend(a_iter.next()),
            std::cmp::Ordering::Greater => output.extend(b_iter.next()),
            std::cmp::Ordering::Equal => {
                if let (Some(a), Some(b)) = (a_iter.next(), b_iter.next()) {
                    output.extend(combine(a, b));
                }
            }
        }
    }
}
