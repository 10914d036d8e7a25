//! Lexical analysis for the surface language.
//!
//! A [`Lexer`] wraps a [`cursor::Cursor`] and yields one [`Token`] per call
//! to [`Lexer::next_token`] until the source is exhausted, at which point it
//! yields `EOF` forever. Malformed input never panics: it produces an
//! `ERROR` token carrying a diagnostic message and the lexer keeps going.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
