//! Textual form of polynomials, the same one accepted as literal input.
//!
//! A coefficient prints as its integer value, and an expansion prints as
//! `(p_1,e_1)+(p_2,e_2)+...` with each coefficient `p_i` printed recursively.

use std::fmt::{Display, Formatter, Result};

use itertools::Itertools;

use super::{Monomial, Polynomial, Repr};

impl Display for Monomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({},{})", self.coefficient, self.exponent)
    }
}

impl Display for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.repr {
            Repr::Coefficient(value) => Display::fmt(value, f),
            Repr::Expansion(monomials) => write!(f, "{}", monomials.iter().format("+")),
        }
    }
}
