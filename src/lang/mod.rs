/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the tinyc language.
The compiler only ever sees the [`ast::Node`] tree produced here.

*/

pub type Column = std::ops::Range<usize>;

#[macro_use]
mod error;
mod lex;
mod parse;

pub mod ast;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use parse::parse;

/// Lex and parse a whole program into its `Main` node.
pub fn parse_str(source: &str) -> Result<ast::Node, Error> {
    let tokens = lex(source);
    parse(&tokens)
}
