pub mod degree;
pub mod print;
pub mod substitution;

use super::ordered_ops;
use num_traits::{One, Pow, Zero};

/// Integer type of the coefficients. All arithmetic on it wraps around.
pub type Coefficient = i64;

/// Exponent of the variable of a monomial. Unlike coefficients, exponents
/// never wrap around.
pub type Exponent = u64;

/// Degree of a polynomial. The zero polynomial has degree -1.
///
/// Wide enough to hold the sum of the exponents of every nested variable.
pub type Degree = i128;

/// Sum of two exponents, as needed when multiplying monomials.
///
/// # Panics
///
/// If the result does not fit in an [`Exponent`]. Such a polynomial is not
/// representable, like one that does not fit in memory.
fn add_exponents(a: Exponent, b: Exponent) -> Exponent {
    match a.checked_add(b) {
        Some(sum) => sum,
        None => panic!("exponent overflow: {} + {}", a, b),
    }
}

/// `base^exponent` with wrapping multiplication, by repeated squaring.
pub(crate) fn wrapping_pow(mut base: Coefficient, mut exponent: Exponent) -> Coefficient {
    let mut acc: Coefficient = 1;
    while exponent > 0 {
        if exponent & 1 == 1 {
            acc = acc.wrapping_mul(base);
        }
        exponent >>= 1;
        base = base.wrapping_mul(base);
    }
    acc
}

/// A term `p * x_i^n`, where the coefficient `p` is itself a polynomial over
/// the variables `x_{i+1}, x_{i+2}, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monomial {
    coefficient: Polynomial,
    exponent: Exponent,
}

impl Monomial {
    pub fn new(coefficient: Polynomial, exponent: Exponent) -> Self {
        Self {
            coefficient,
            exponent,
        }
    }

    pub fn get_coefficient(&self) -> &Polynomial {
        &self.coefficient
    }

    pub fn get_exponent(&self) -> Exponent {
        self.exponent
    }

    fn is_recursively_zero(&self) -> bool {
        self.coefficient.is_recursively_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    Coefficient(Coefficient),
    // Never empty. Exponents are strictly increasing, no coefficient is zero,
    // and it is never a single constant at exponent 0, which must be stored
    // as a Coefficient instead.
    Expansion(Vec<Monomial>),
}

/// Sparse polynomial with integer coefficients in the variables
/// `x_0, x_1, ...`, stored recursively: the outermost level is a polynomial
/// in `x_0` whose coefficients are polynomials in `x_1`, and so on.
///
/// Every value is kept in canonical form, so two polynomials are
/// mathematically equal if and only if they compare equal with `==`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    repr: Repr,
}

impl Polynomial {
    pub fn from_coefficient(value: Coefficient) -> Self {
        Self {
            repr: Repr::Coefficient(value),
        }
    }

    /// The variable `x_index`, as a polynomial.
    pub fn new_variable(index: usize) -> Self {
        let mut var = Self::from_monomials(vec![Monomial::new(Self::one(), 1)]);
        for _ in 0..index {
            var = Self {
                repr: Repr::Expansion(vec![Monomial::new(var, 0)]),
            };
        }
        var
    }

    /// Builds a polynomial out of an arbitrary list of monomials, taking
    /// ownership of them.
    ///
    /// Monomials with the same exponent are summed, the ones whose
    /// coefficient vanishes are dropped, and a result that is constant
    /// collapses into a plain coefficient.
    pub fn from_monomials(mut monomials: Vec<Monomial>) -> Self {
        monomials.sort_unstable_by_key(|m| m.exponent);

        let mut merged: Vec<Monomial> = Vec::with_capacity(monomials.len());
        for mono in monomials {
            match merged.last_mut() {
                Some(last) if last.exponent == mono.exponent => {
                    let acc = std::mem::take(&mut last.coefficient);
                    last.coefficient = acc + mono.coefficient;
                }
                _ => merged.push(mono),
            }
        }
        merged.retain(|m| !m.is_recursively_zero());

        Self::collapse(merged)
    }

    /// Wraps monomials already sorted by strictly increasing exponent and
    /// with non-zero coefficients, collapsing them to a coefficient if they
    /// represent a constant.
    fn collapse(monomials: Vec<Monomial>) -> Self {
        let constant = match monomials.as_slice() {
            [] => Some(0),
            [only] if only.exponent == 0 => only.coefficient.recursive_coefficient(),
            _ => None,
        };

        match constant {
            Some(value) => Self::from_coefficient(value),
            None => Self {
                repr: Repr::Expansion(monomials),
            },
        }
    }

    /// Shallow test: is this stored as a plain coefficient?
    pub fn is_coefficient(&self) -> bool {
        matches!(self.repr, Repr::Coefficient(_))
    }

    pub fn as_coefficient(&self) -> Option<Coefficient> {
        match self.repr {
            Repr::Coefficient(value) => Some(value),
            Repr::Expansion(_) => None,
        }
    }

    /// The monomials of the outermost variable, in increasing order of
    /// exponent. Empty for a coefficient.
    pub fn get_monomials(&self) -> &[Monomial] {
        match &self.repr {
            Repr::Coefficient(_) => &[],
            Repr::Expansion(monomials) => monomials,
        }
    }

    /// Deep test of whether the value is zero, independently of how it is
    /// represented.
    pub fn is_recursively_zero(&self) -> bool {
        match &self.repr {
            Repr::Coefficient(value) => *value == 0,
            Repr::Expansion(monomials) => monomials.iter().all(Monomial::is_recursively_zero),
        }
    }

    /// Deep test of whether the value is a constant, independently of how it
    /// is represented.
    pub fn is_recursively_coefficient(&self) -> bool {
        self.recursive_coefficient().is_some()
    }

    /// If the value is a constant, returns it.
    pub fn recursive_coefficient(&self) -> Option<Coefficient> {
        match &self.repr {
            Repr::Coefficient(value) => Some(*value),
            Repr::Expansion(monomials) => {
                let mut non_zero = monomials.iter().filter(|m| !m.is_recursively_zero());
                match (non_zero.next(), non_zero.next()) {
                    (None, _) => Some(0),
                    (Some(m), None) if m.exponent == 0 => m.coefficient.recursive_coefficient(),
                    _ => None,
                }
            }
        }
    }

    /// Multiplies every coefficient by `factor`.
    pub fn scale(&self, factor: Coefficient) -> Self {
        match &self.repr {
            Repr::Coefficient(value) => Self::from_coefficient(value.wrapping_mul(factor)),
            Repr::Expansion(_) if factor == 0 => Self::zero(),
            Repr::Expansion(monomials) => {
                // Exponents are untouched, so the order is preserved, but
                // wrapping multiplication may still zero out coefficients.
                let scaled = monomials
                    .iter()
                    .map(|m| Monomial::new(m.coefficient.scale(factor), m.exponent))
                    .filter(|m| !m.is_recursively_zero())
                    .collect();
                Self::collapse(scaled)
            }
        }
    }

    fn sum_monomials(a: Vec<Monomial>, b: Vec<Monomial>) -> Self {
        let mut merged = Vec::with_capacity(a.len() + b.len());
        ordered_ops::merge(
            a,
            b,
            |m| m.exponent,
            |x, y| {
                let sum = Monomial::new(x.coefficient + y.coefficient, x.exponent);
                if sum.is_recursively_zero() {
                    None
                } else {
                    Some(sum)
                }
            },
            &mut merged,
        );
        Self::collapse(merged)
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl Zero for Polynomial {
    fn zero() -> Self {
        Self::from_coefficient(0)
    }

    /// Shallow: relies on the canonical form.
    fn is_zero(&self) -> bool {
        matches!(self.repr, Repr::Coefficient(0))
    }
}

impl One for Polynomial {
    fn one() -> Self {
        Self::from_coefficient(1)
    }
}

impl std::ops::Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Self::Output {
        match (self.repr, rhs.repr) {
            (Repr::Coefficient(a), Repr::Coefficient(b)) => {
                Self::from_coefficient(a.wrapping_add(b))
            }
            (Repr::Expansion(a), Repr::Expansion(b)) => Self::sum_monomials(a, b),
            (Repr::Coefficient(c), Repr::Expansion(e))
            | (Repr::Expansion(e), Repr::Coefficient(c)) => {
                if c == 0 {
                    Self {
                        repr: Repr::Expansion(e),
                    }
                } else {
                    let constant = vec![Monomial::new(Self::from_coefficient(c), 0)];
                    Self::sum_monomials(constant, e)
                }
            }
        }
    }
}

impl std::ops::Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Self::Output {
        self.clone() + rhs.clone()
    }
}

impl std::ops::Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        match self.repr {
            Repr::Coefficient(value) => Self::from_coefficient(value.wrapping_neg()),
            Repr::Expansion(mut monomials) => {
                for mono in monomials.iter_mut() {
                    let tmp = std::mem::take(&mut mono.coefficient);
                    mono.coefficient = -tmp;
                }
                Self {
                    repr: Repr::Expansion(monomials),
                }
            }
        }
    }
}

impl std::ops::Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl std::ops::Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Self::Output {
        self + (-rhs)
    }
}

impl std::ops::Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Self::Output {
        self.clone() - rhs.clone()
    }
}

impl std::ops::Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Self::Output {
        match (&self.repr, &rhs.repr) {
            (Repr::Coefficient(a), Repr::Coefficient(b)) => {
                Polynomial::from_coefficient(a.wrapping_mul(*b))
            }
            (Repr::Coefficient(c), Repr::Expansion(_)) => rhs.scale(*c),
            (Repr::Expansion(_), Repr::Coefficient(c)) => self.scale(*c),
            (Repr::Expansion(a), Repr::Expansion(b)) => {
                let mut products = Vec::with_capacity(a.len() * b.len());
                for x in a {
                    for y in b {
                        products.push(Monomial::new(
                            &x.coefficient * &y.coefficient,
                            add_exponents(x.exponent, y.exponent),
                        ));
                    }
                }
                Polynomial::from_monomials(products)
            }
        }
    }
}

impl std::ops::Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Self::Output {
        &self * &rhs
    }
}

impl std::ops::Mul<Coefficient> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Coefficient) -> Self::Output {
        self.scale(rhs)
    }
}

impl Pow<Exponent> for &Polynomial {
    type Output = Polynomial;

    /// Exponentiation by recursive halving.
    fn pow(self, exponent: Exponent) -> Polynomial {
        if let Repr::Coefficient(value) = self.repr {
            return Polynomial::from_coefficient(wrapping_pow(value, exponent));
        }
        if exponent == 0 {
            return Polynomial::one();
        }

        let half = self.pow(exponent / 2);
        let square = &half * &half;
        if exponent % 2 == 1 {
            &square * self
        } else {
            square
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    pub fn c(value: Coefficient) -> Polynomial {
        Polynomial::from_coefficient(value)
    }

    pub fn mono(coefficient: Polynomial, exponent: Exponent) -> Monomial {
        Monomial::new(coefficient, exponent)
    }

    pub fn poly(monomials: Vec<Monomial>) -> Polynomial {
        Polynomial::from_monomials(monomials)
    }

    /// Random canonical polynomial with at most `depth` nested variables.
    pub fn random_poly(rng: &mut StdRng, depth: u32) -> Polynomial {
        if depth == 0 || rng.gen_ratio(1, 4) {
            return c(rng.gen_range(-5..=5));
        }
        let count = rng.gen_range(0..=4);
        let monomials = (0..count)
            .map(|_| mono(random_poly(rng, depth - 1), rng.gen_range(0..=4)))
            .collect();
        poly(monomials)
    }

    /// Checks the canonical form invariants all the way down.
    pub fn assert_canonical(p: &Polynomial) {
        if let Repr::Expansion(monomials) = &p.repr {
            assert!(!monomials.is_empty());
            for pair in monomials.windows(2) {
                assert!(pair[0].exponent < pair[1].exponent, "{:?}", p);
            }
            for m in monomials {
                assert!(!m.coefficient.is_recursively_zero(), "{:?}", p);
                assert_canonical(&m.coefficient);
            }
            if let [only] = monomials.as_slice() {
                assert!(
                    only.exponent != 0 || !only.coefficient.is_coefficient(),
                    "{:?}",
                    p
                );
            }
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn merges_and_drops_monomials() {
        // 2x^2 + 3 + (-2)x^2 + x + 0x^7
        let p = poly(vec![
            mono(c(2), 2),
            mono(c(3), 0),
            mono(c(-2), 2),
            mono(c(1), 1),
            mono(c(0), 7),
        ]);

        assert_canonical(&p);
        assert_eq!(p.get_monomials().len(), 2);
        assert_eq!(p.get_monomials()[0].get_exponent(), 0);
        assert_eq!(p.get_monomials()[0].get_coefficient(), &c(3));
        assert_eq!(p.get_monomials()[1].get_exponent(), 1);
        assert_eq!(p.get_monomials()[1].get_coefficient(), &c(1));
    }

    #[test]
    fn collapses_to_coefficient() {
        assert_eq!(poly(vec![]), c(0));
        assert_eq!(poly(vec![mono(c(5), 0)]), c(5));
        assert_eq!(poly(vec![mono(c(5), 3), mono(c(-5), 3)]), c(0));
        assert_eq!(
            poly(vec![mono(c(4), 0), mono(c(1), 2), mono(c(-1), 2)]),
            c(4)
        );

        // A constant nested below a variable of degree 0 is still a constant.
        let nested = poly(vec![mono(poly(vec![mono(c(7), 0)]), 0)]);
        assert!(nested.is_coefficient());
        assert_eq!(nested, c(7));
    }

    #[test]
    fn nested_variable_does_not_collapse() {
        let y = Polynomial::new_variable(1);
        assert!(!y.is_coefficient());
        assert_canonical(&y);
        assert_eq!(y.get_monomials().len(), 1);
        assert_eq!(y.get_monomials()[0].get_exponent(), 0);
        assert_eq!(
            y.get_monomials()[0].get_coefficient(),
            &Polynomial::new_variable(0)
        );
    }

    #[test]
    fn recursive_predicates_see_through_representation() {
        // Non canonical values, as they may appear mid-merge.
        let dead = Polynomial {
            repr: Repr::Expansion(vec![mono(c(0), 1), mono(c(0), 3)]),
        };
        assert!(!dead.is_zero());
        assert!(dead.is_recursively_zero());
        assert_eq!(dead.recursive_coefficient(), Some(0));

        let hidden_constant = Polynomial {
            repr: Repr::Expansion(vec![
                mono(
                    Polynomial {
                        repr: Repr::Expansion(vec![mono(c(9), 0)]),
                    },
                    0,
                ),
                mono(dead.clone(), 4),
            ]),
        };
        assert!(!hidden_constant.is_coefficient());
        assert!(hidden_constant.is_recursively_coefficient());
        assert_eq!(hidden_constant.recursive_coefficient(), Some(9));
        assert!(!hidden_constant.is_recursively_zero());

        let x = Polynomial::new_variable(0);
        assert!(!x.is_recursively_coefficient());
        assert!(!x.is_recursively_zero());
    }

    #[test]
    fn canonicalization_is_order_independent() {
        let mut rng = rng();
        for _ in 0..200 {
            let mut monomials: Vec<Monomial> = (0..rng.gen_range(0..8))
                .map(|_| mono(random_poly(&mut rng, 2), rng.gen_range(0..4)))
                .collect();
            let a = poly(monomials.clone());
            monomials.shuffle(&mut rng);
            let b = poly(monomials);

            assert_canonical(&a);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn coefficient_arithmetic_wraps() {
        assert_eq!(c(i64::MAX) + c(1), c(i64::MIN));
        assert_eq!(&c(i64::MAX) * &c(2), c(-2));
        assert_eq!(-c(i64::MIN), c(i64::MIN));

        // x * 2^62 * 4 wraps to zero and must vanish completely.
        let x = Polynomial::new_variable(0);
        let big = &x * (1i64 << 62);
        assert_eq!(&big * 4i64, c(0));
    }

    #[test]
    fn addition_of_mixed_variants() {
        let x = Polynomial::new_variable(0);
        let p = c(3) + x.clone();
        let q = x.clone() + c(3);

        assert_eq!(p, q);
        assert_eq!(p.get_monomials().len(), 2);
        assert_eq!(&p - &x, c(3));
        assert_eq!(p.clone() + c(0), p);
        assert_eq!(p.clone() + c(-3), x);
    }

    #[test]
    fn additive_identity_and_inverse() {
        let mut rng = rng();
        for _ in 0..200 {
            let p = random_poly(&mut rng, 3);
            assert_eq!(&p + &Polynomial::zero(), p);
            let sum = &p + &(-&p);
            assert!(sum.is_recursively_zero());
            assert!(sum.is_zero());
            assert_eq!(&p - &p, Polynomial::zero());
        }
    }

    #[test]
    fn ring_laws() {
        let mut rng = rng();
        for _ in 0..150 {
            let p = random_poly(&mut rng, 3);
            let q = random_poly(&mut rng, 3);
            let r = random_poly(&mut rng, 3);

            let pq = &p + &q;
            assert_canonical(&pq);
            assert_eq!(pq, &q + &p);
            assert_eq!(&pq + &r, &p + &(&q + &r));

            let prod = &p * &q;
            assert_canonical(&prod);
            assert_eq!(prod, &q * &p);
            assert_eq!(&prod * &r, &p * &(&q * &r));

            assert_eq!(&p * &(&q + &r), &(&p * &q) + &(&p * &r));
            assert_eq!(&p * &Polynomial::one(), p);
            assert_eq!(&p * &Polynomial::zero(), Polynomial::zero());
        }
    }

    #[test]
    fn product_cancellation() {
        let x = Polynomial::new_variable(0);
        let y = Polynomial::new_variable(1);

        // (x + 1)(x - 1) = x^2 - 1
        let p = &(x.clone() + c(1)) * &(x.clone() - c(1));
        assert_eq!(p, poly(vec![mono(c(-1), 0), mono(c(1), 2)]));

        // (x - y)(x^2 + xy + y^2) = x^3 - y^3
        let a = &x - &y;
        let b = &(&x * &x) + &(&(&x * &y) + &(&y * &y));
        assert_eq!(&a * &b, &x.pow(3) - &y.pow(3));
    }

    #[test]
    fn negation_keeps_shape() {
        let mut rng = rng();
        for _ in 0..100 {
            let p = random_poly(&mut rng, 3);
            let n = -&p;
            assert_canonical(&n);
            assert_eq!(n.get_monomials().len(), p.get_monomials().len());
            assert_eq!(-n, p);
        }
    }

    #[test]
    fn power_by_halving() {
        let x = Polynomial::new_variable(0);
        let x47 = x.pow(47);
        assert_eq!(x47, poly(vec![mono(c(1), 47)]));

        // (x + 1)^5 has binomial coefficients.
        let p = (&(x.clone() + c(1))).pow(5);
        let coefs: Vec<_> = p
            .get_monomials()
            .iter()
            .map(|m| m.get_coefficient().as_coefficient().unwrap())
            .collect();
        assert_eq!(coefs, vec![1, 5, 10, 10, 5, 1]);

        assert_eq!((&c(3)).pow(4), c(81));
        assert_eq!((&c(0)).pow(0), c(1));
        assert_eq!((&Polynomial::zero()).pow(3), c(0));
        assert_eq!(x.pow(0), c(1));
    }

    #[test]
    fn exponents_grow_past_32_bits() {
        let x = Polynomial::new_variable(0);
        let top = poly(vec![mono(c(1), 2147483647)]);

        let p = &(&top * &top) * &(&x * &x);
        assert!(!p.is_coefficient());
        assert_eq!(p, poly(vec![mono(c(1), 1 << 32)]));
        assert_eq!(p.degree(), 1 << 32);
        assert_eq!(p.to_string(), "(1,4294967296)");

        let y = Polynomial::new_variable(1);
        let q = &(&p * &y.pow(u64::MAX)) * &p;
        assert_eq!(q.degree(), Degree::from(u64::MAX) + (1 << 33));
    }

    #[test]
    #[should_panic(expected = "exponent overflow")]
    fn exponent_overflow_panics() {
        let x = Polynomial::new_variable(0);
        let _ = &x.pow(u64::MAX) * &x;
    }

    #[test]
    fn coefficient_power_wraps() {
        assert_eq!(wrapping_pow(3, 0), 1);
        assert_eq!(wrapping_pow(-2, 63), i64::MIN);
        assert_eq!(wrapping_pow(2, 64), 0);
        assert_eq!(wrapping_pow(-1, u64::MAX), -1);
        assert_eq!(wrapping_pow(7, 5), 7i64.pow(5));
        assert_eq!(wrapping_pow(3, 41), 3i64.wrapping_pow(41));
    }

    #[test]
    fn clone_is_independent() {
        let mut rng = rng();
        let p = random_poly(&mut rng, 3) + Polynomial::new_variable(2);
        let mut copy = p.clone();
        assert_eq!(copy, p);

        copy = copy + c(1);
        assert_ne!(copy, p);
        assert_eq!(&copy - &c(1), p);
    }
}
