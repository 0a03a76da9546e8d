//! Front end for the Klive-style Z80 assembly dialect: a character input
//! stream, a streaming multi-phase tokenizer with bounded lookahead, and a
//! recursive-descent parser with per-line error recovery.

pub mod diagnostics;
pub mod input;
pub mod strings;
pub mod syntax;

pub use syntax::parse_source;
