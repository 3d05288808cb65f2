use super::{Degree, Polynomial, Repr};

impl Polynomial {
    /// Total degree, counting the exponents of every nested variable.
    /// Returns -1 for the zero polynomial.
    pub fn degree(&self) -> Degree {
        match &self.repr {
            Repr::Coefficient(0) => -1,
            Repr::Coefficient(_) => 0,
            Repr::Expansion(monomials) => monomials
                .iter()
                .map(|m| Degree::from(m.exponent) + m.coefficient.degree())
                .max()
                .unwrap_or(-1),
        }
    }

    /// Degree with respect to the variable `x_var_index` alone. Returns -1
    /// for the zero polynomial.
    pub fn degree_by(&self, var_index: usize) -> Degree {
        match &self.repr {
            Repr::Coefficient(0) => -1,
            Repr::Coefficient(_) => 0,
            Repr::Expansion(monomials) => {
                if var_index == 0 {
                    // Sorted by exponent, so the last one is the highest.
                    monomials
                        .last()
                        .map_or(-1, |m| Degree::from(m.exponent))
                } else {
                    monomials
                        .iter()
                        .map(|m| m.coefficient.degree_by(var_index - 1))
                        .max()
                        .unwrap_or(-1)
                }
            }
        }
    }
}
