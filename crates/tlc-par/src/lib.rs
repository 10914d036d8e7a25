//! Recursive-descent parser producing the surface-language AST.

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{Atom, Expr, ExprKind, ExprVector};
pub use error::ParseError;
pub use parser::Parser;
