use thiserror::Error;

/// Why an input line could not be turned into a polynomial or a command.
///
/// The messages are the ones printed in the `ERROR <line> <message>`
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("WRONG POLY")]
    WrongPoly,
    #[error("WRONG COMMAND")]
    WrongCommand,
    #[error("DEG BY WRONG VARIABLE")]
    DegByWrongVariable,
    #[error("AT WRONG VALUE")]
    AtWrongValue,
    #[error("COMPOSE WRONG PARAMETER")]
    ComposeWrongParameter,
}

/// Failure while executing a command on the stack.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("STACK UNDERFLOW")]
    StackUnderflow,
    /// Writing a result failed. Not recoverable.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can go wrong with a single input line and is reported
/// with its line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("STACK UNDERFLOW")]
    StackUnderflow,
}
