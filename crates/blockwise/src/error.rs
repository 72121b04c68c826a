//! Error types for block parsing and schedule evaluation.

use thiserror::Error;

/// Everything that can go wrong while parsing a block or evaluating its
/// schedule. All variants are terminal for the operation in progress; no
/// partial block or partial verdict is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("Field is missing a colon to separate the key and value in line {0}")]
    MissingColon(usize),

    #[error("Value cannot be empty in line {0}")]
    EmptyValue(usize),

    #[error("Multi-line field was not closed")]
    UnterminatedField,

    #[error("Invalid key: '{0}'")]
    InvalidKey(String),

    #[error("Invalid schedule action: '{0}'")]
    InvalidAction(String),

    #[error("Missing required field: '{0}'")]
    MissingRequiredField(&'static str),

    #[error("Variable '{0}' is undefined")]
    UndefinedVariable(String),

    #[error("Failed resolving date expression '{0}'")]
    UnresolvableDate(String),
}

pub type Result<T> = std::result::Result<T, BlockError>;
