use num_traits::{Pow, Zero};

use super::{wrapping_pow, Coefficient, Polynomial, Repr};

impl Polynomial {
    /// Evaluates the polynomial at `x_0 = x`. The remaining variables are
    /// renumbered, `x_1` becoming `x_0` and so on.
    ///
    /// A coefficient does not depend on `x_0` and is returned unchanged.
    pub fn at(&self, x: Coefficient) -> Polynomial {
        match &self.repr {
            Repr::Coefficient(_) => self.clone(),
            Repr::Expansion(monomials) => monomials
                .iter()
                .map(|m| m.coefficient.scale(wrapping_pow(x, m.exponent)))
                .fold(Polynomial::zero(), |acc, term| acc + term),
        }
    }

    /// Substitutes `substitutes[i]` for the variable `x_i`. Variables with no
    /// given substitute are replaced by zero.
    pub fn compose(&self, substitutes: &[Polynomial]) -> Polynomial {
        self.compose_from(substitutes, 0)
    }

    fn compose_from(&self, substitutes: &[Polynomial], var_index: usize) -> Polynomial {
        match &self.repr {
            Repr::Coefficient(_) => self.clone(),
            Repr::Expansion(monomials) => {
                let zero = Polynomial::zero();
                let substitute = substitutes.get(var_index).unwrap_or(&zero);

                monomials
                    .iter()
                    .map(|m| {
                        let inner = m.coefficient.compose_from(substitutes, var_index + 1);
                        &substitute.pow(m.exponent) * &inner
                    })
                    .fold(Polynomial::zero(), |acc, term| acc + term)
            }
        }
    }
}
