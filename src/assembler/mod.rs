//! The Assembler module is in charge of taking a
//! DCPU-16 assembly file and producing a flat memory image.
//!
//! It does this by implementing a per-line tokenizer and a
//! non-lookahead recursive descent parser that drives a code
//! generator. Forward label references are written as placeholder
//! words and patched once every line has been seen.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod issue;
pub mod lexer;
pub mod parser;

pub use parser::{compile, compile_with_listing, Compilation};
