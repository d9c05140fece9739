//! Parser for bracketed prompt templates

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::{parse_placeholder, placeholder_name, scan};
