//! Error types for code generation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeGenError {
    #[error("Undefined symbol: '{0}'")]
    UndefinedSymbol(String),

    #[error("'{op}' requires {expected} arguments, found {found}")]
    ArityMismatch {
        op: String,
        expected: usize,
        found: usize,
    },

    #[error("Function '{name}' has too many parameters: {count} (maximum is 6)")]
    TooManyParameters { name: String, count: usize },

    #[error("Nested function definitions are not supported")]
    NestedFunctionDefinition,

    #[error("Strings are not implemented yet")]
    StringNotImplemented,

    #[error("'if' is not fully implemented")]
    IfNotImplemented,

    #[error("Invalid 'define' syntax")]
    InvalidDefineSyntax,

    #[error("Cannot compile an empty list")]
    EmptyList,

    #[error("List head must be a symbol")]
    NonSymbolHead,

    #[error("'{0}' is not callable")]
    NotCallable(String),

    #[error("Cannot compile parse-error node: {0}")]
    Unparsable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
