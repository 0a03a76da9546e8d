//! The syntax layer: tokens, the streaming tokenizer, the parser, and the
//! line-node trees it produces.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod tokens;

use crate::diagnostics::ParseErrorMessage;
use ast::Program;
use lexer::TokenStream;
use parser::Parser;

/// Parses a whole source text into a [`Program`], collecting grammar errors
/// along the way.
pub fn parse_source(source: &str, file_index: usize) -> (Program, Vec<ParseErrorMessage>) {
    let tokens = TokenStream::new(source);
    let mut parser = Parser::new(tokens, file_index, false);
    let program = parser.parse_program();
    (program, parser.into_errors())
}
