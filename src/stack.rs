use crate::polynomial::Polynomial;

/// Default initial capacity of a [`Stack`].
pub const STARTING_CAPACITY: usize = 32;

/// LIFO stack of owned polynomials.
///
/// Pushing moves the polynomial into the stack and popping moves it back out.
/// Storage grows geometrically, so pushes are amortized O(1).
#[derive(Debug, Clone)]
pub struct Stack {
    items: Vec<Polynomial>,
}

impl Stack {
    pub fn new() -> Self {
        Self::with_capacity(STARTING_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, p: Polynomial) {
        self.items.push(p);
    }

    pub fn pop(&mut self) -> Option<Polynomial> {
        self.items.pop()
    }

    /// Borrows the top of the stack, which stays owned by the stack.
    pub fn peek(&self) -> Option<&Polynomial> {
        self.items.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut Polynomial> {
        self.items.last_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
