//! Code generator: walks the AST, drives the symbol table across scope
//! entries and exits, and emits System-V AMD64 NASM text into the five
//! section buffers defined by [`sections::GlobalDataSections`].

pub mod compiler;
pub mod error;
pub mod sections;

pub use compiler::{compile_program, Compiler};
pub use error::{CodeGenError, Result};
pub use sections::GlobalDataSections;
