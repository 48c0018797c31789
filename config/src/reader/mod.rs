//! Reader for the relaxed JSON dialect of MARLEY configuration files.

pub mod lexer;
pub mod parser;

pub use parser::parse_str;
