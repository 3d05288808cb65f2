pub mod calculator;
pub mod command;
pub mod error;
pub mod parser;
pub mod polynomial;
pub mod stack;

mod ordered_ops;
