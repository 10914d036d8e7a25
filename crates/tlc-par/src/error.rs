use thiserror::Error;
use tlc_lex::TokenKind;
use tlc_util::Span;

/// The parser never attempts recovery: the first problem it meets is fatal.
/// The driver renders this and exits with a non-zero status.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Parsing Error at {span} - {message} (Current Token: '{lexeme}', Type: {kind})")]
    Fatal {
        span: Span,
        message: String,
        lexeme: String,
        kind: TokenKind,
    },
}

pub type Result<T> = std::result::Result<T, ParseError>;
