//! Reverse Polish notation calculator over the polynomial stack.

use std::io::{self, BufRead, Write};

use num_traits::Zero;
use tracing::{debug, trace};

use crate::{
    command::Command,
    error::{ExecError, LineError},
    parser::{self, Line},
    polynomial::Polynomial,
    stack::Stack,
};

/// Counters of a whole [`Calculator::run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub errors: usize,
}

#[derive(Debug, Default)]
pub struct Calculator {
    stack: Stack,
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            stack: Stack::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: Stack::with_capacity(capacity),
        }
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn push(&mut self, p: Polynomial) {
        self.stack.push(p);
        trace!(depth = self.stack.len(), "pushed");
    }

    /// Executes one command, writing its printed results, if any, to `out`.
    ///
    /// If the stack does not hold enough polynomials it is left untouched and
    /// `StackUnderflow` is returned. Yes/no queries still answer `0` then.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<(), ExecError> {
        if self.stack.len() < command.arity() {
            if command.is_query() {
                write_bool(out, false)?;
            }
            return Err(ExecError::StackUnderflow);
        }

        debug!(%command, depth = self.stack.len(), "executing");
        match command {
            Command::Zero => self.push(Polynomial::zero()),
            Command::IsCoeff => write_bool(out, self.top()?.is_coefficient())?,
            Command::IsZero => write_bool(out, self.top()?.is_zero())?,
            Command::Clone => {
                let copy = self.top()?.clone();
                self.push(copy);
            }
            Command::Add => self.binary(|p, q| p + q)?,
            Command::Mul => self.binary(|p, q| p * q)?,
            Command::Sub => self.binary(|p, q| p - q)?,
            Command::Neg => self.unary(|p| -p)?,
            Command::IsEq => {
                let p = self.pop()?;
                let equal = Some(&p) == self.stack.peek();
                self.push(p);
                write_bool(out, equal)?;
            }
            Command::Deg => writeln!(out, "{}", self.top()?.degree())?,
            Command::DegBy(var_index) => writeln!(out, "{}", self.top()?.degree_by(var_index))?,
            Command::At(x) => self.unary(|p| p.at(x))?,
            Command::Compose(k) => {
                let p = self.pop()?;
                let mut substitutes = (0..k).map(|_| self.pop()).collect::<Result<Vec<_>, _>>()?;
                // Popped from q[k-1] down to q[0].
                substitutes.reverse();
                self.push(p.compose(&substitutes));
            }
            Command::Print => writeln!(out, "{}", self.top()?)?,
            Command::Pop => {
                self.pop()?;
            }
        }

        Ok(())
    }

    /// Processes every line of `input`, writing results to `out` and one
    /// `ERROR <line> <message>` diagnostic to `err` for each failed line.
    ///
    /// Only I/O failures stop the processing.
    pub fn run(
        &mut self,
        input: impl BufRead,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for (idx, bytes) in input.split(b'\n').enumerate() {
            let bytes = bytes?;
            let line = String::from_utf8_lossy(&bytes);
            let line_number = idx + 1;
            summary.lines = line_number;

            let outcome = match parser::parse_line(&line) {
                Ok(Line::Ignored) => Ok(()),
                Ok(Line::Polynomial(p)) => {
                    self.push(p);
                    Ok(())
                }
                Ok(Line::Command(command)) => match self.execute(command, out) {
                    Ok(()) => Ok(()),
                    Err(ExecError::StackUnderflow) => Err(LineError::StackUnderflow),
                    Err(ExecError::Io(why)) => return Err(why),
                },
                Err(why) => Err(LineError::from(why)),
            };

            if let Err(why) = outcome {
                debug!(line = line_number, error = %why, "line rejected");
                summary.errors += 1;
                writeln!(err, "ERROR {} {}", line_number, why)?;
            }
        }

        Ok(summary)
    }

    fn top(&self) -> Result<&Polynomial, ExecError> {
        self.stack.peek().ok_or(ExecError::StackUnderflow)
    }

    fn pop(&mut self) -> Result<Polynomial, ExecError> {
        let p = self.stack.pop().ok_or(ExecError::StackUnderflow)?;
        trace!(depth = self.stack.len(), "popped");
        Ok(p)
    }

    /// Replaces the top `p` with `op(p)`.
    fn unary(&mut self, op: impl FnOnce(Polynomial) -> Polynomial) -> Result<(), ExecError> {
        let top = self.stack.peek_mut().ok_or(ExecError::StackUnderflow)?;
        *top = op(std::mem::take(top));
        Ok(())
    }

    /// Pops `p` (the top) and then `q`, and pushes `op(p, q)`.
    fn binary(
        &mut self,
        op: impl FnOnce(Polynomial, Polynomial) -> Polynomial,
    ) -> Result<(), ExecError> {
        let p = self.pop()?;
        let q = self.pop()?;
        self.push(op(p, q));
        Ok(())
    }
}

fn write_bool(out: &mut impl Write, value: bool) -> io::Result<()> {
    writeln!(out, "{}", u8::from(value))
}
