use std::fmt::Display;

use crate::polynomial::Coefficient;

/// A calculator instruction, with its already validated parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Zero,
    IsCoeff,
    IsZero,
    Clone,
    Add,
    Mul,
    Neg,
    Sub,
    IsEq,
    Deg,
    DegBy(usize),
    At(Coefficient),
    Compose(usize),
    Print,
    Pop,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zero => "ZERO",
            Self::IsCoeff => "IS_COEFF",
            Self::IsZero => "IS_ZERO",
            Self::Clone => "CLONE",
            Self::Add => "ADD",
            Self::Mul => "MUL",
            Self::Neg => "NEG",
            Self::Sub => "SUB",
            Self::IsEq => "IS_EQ",
            Self::Deg => "DEG",
            Self::DegBy(_) => "DEG_BY",
            Self::At(_) => "AT",
            Self::Compose(_) => "COMPOSE",
            Self::Print => "PRINT",
            Self::Pop => "POP",
        }
    }

    /// How many polynomials must be on the stack for the command to run.
    pub fn arity(&self) -> usize {
        match self {
            Self::Zero => 0,
            Self::Add | Self::Mul | Self::Sub | Self::IsEq => 2,
            Self::Compose(k) => k.saturating_add(1),
            Self::IsCoeff
            | Self::IsZero
            | Self::Clone
            | Self::Neg
            | Self::Deg
            | Self::DegBy(_)
            | Self::At(_)
            | Self::Print
            | Self::Pop => 1,
        }
    }

    /// Commands answering yes or no.
    pub fn is_query(&self) -> bool {
        matches!(self, Self::IsCoeff | Self::IsZero | Self::IsEq)
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegBy(idx) => write!(f, "{} {}", self.name(), idx),
            Self::At(x) => write!(f, "{} {}", self.name(), x),
            Self::Compose(k) => write!(f, "{} {}", self.name(), k),
            _ => f.write_str(self.name()),
        }
    }
}
