//! Lexical-scope symbol table: open-addressed symbol maps stacked into
//! scopes, with stack-offset assignment for locals and label sanitisation
//! for globals and user functions.

pub mod scope;
pub mod symbol_info;
pub mod symbol_map;

pub use scope::SymbolTable;
pub use symbol_info::{sanitize_label, SymbolInfo};
pub use symbol_map::SymbolMap;
