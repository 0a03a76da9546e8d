//! Parser diagnostics.
//!
//! The library never prints: grammar errors are collected as
//! [`ParseErrorMessage`] records, and the CLI decides how to render them.
//! Each record carries the stable error code, the already-formatted message
//! text, and the position of the offending token.

use compact_str::CompactString;

/// The catalog of grammar error codes.
///
/// Lexical anomalies never produce one of these; they surface as `Unknown`
/// tokens and only fail when the grammar rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Z0001: fallback for any unsatisfied token expectation.
    UnexpectedToken,
    /// Z0003
    CommaExpected,
    /// Z0004
    LParExpected,
    /// Z0005
    RParExpected,
    /// Z0006
    RDBracExpected,
    /// Z0007
    AssignExpected,
    /// Z0008
    ToExpected,
    /// Z0101
    RegAExpected,
    /// Z0102
    RegBExpected,
    /// Z0103
    RegDeExpected,
    /// Z0104
    RegDExpected,
    /// Z0105
    RegEExpected,
    /// Z0106
    Reg16Expected,
    /// Z0107
    IdentifierExpected,
    /// Z0108
    StringLiteralExpected,
    /// Z0109
    Reg16IndirectionExpected,
    /// Z0110
    ByteEmittingPragmaExpected,
    /// Z0111
    ExpressionExpected,
    /// Z0112
    InvalidParseTimeFunctionArgument,
    /// Z1002
    UnrecognizedLine,
    /// Z1005
    InvalidNumericLiteral,
    /// Z1009
    MacroTimeFunctionOutsideMacro,
    /// Z1016
    OperandExpected,
}

impl ErrorCode {
    pub fn code(self) -> &'static str {
        match self {
            Self::UnexpectedToken => "Z0001",
            Self::CommaExpected => "Z0003",
            Self::LParExpected => "Z0004",
            Self::RParExpected => "Z0005",
            Self::RDBracExpected => "Z0006",
            Self::AssignExpected => "Z0007",
            Self::ToExpected => "Z0008",
            Self::RegAExpected => "Z0101",
            Self::RegBExpected => "Z0102",
            Self::RegDeExpected => "Z0103",
            Self::RegDExpected => "Z0104",
            Self::RegEExpected => "Z0105",
            Self::Reg16Expected => "Z0106",
            Self::IdentifierExpected => "Z0107",
            Self::StringLiteralExpected => "Z0108",
            Self::Reg16IndirectionExpected => "Z0109",
            Self::ByteEmittingPragmaExpected => "Z0110",
            Self::ExpressionExpected => "Z0111",
            Self::InvalidParseTimeFunctionArgument => "Z0112",
            Self::UnrecognizedLine => "Z1002",
            Self::InvalidNumericLiteral => "Z1005",
            Self::MacroTimeFunctionOutsideMacro => "Z1009",
            Self::OperandExpected => "Z1016",
        }
    }

    /// The message template; `{0}` is substituted with the first argument.
    pub fn template(self) -> &'static str {
        match self {
            Self::UnexpectedToken => "Unexpected token: '{0}'",
            Self::CommaExpected => "A comma expected",
            Self::LParExpected => "'(' expected",
            Self::RParExpected => "')' expected",
            Self::RDBracExpected => "'}}' expected",
            Self::AssignExpected => "'=' expected",
            Self::ToExpected => "'to' expected",
            Self::RegAExpected => "'a' expected",
            Self::RegBExpected => "'b' expected",
            Self::RegDeExpected => "'de' expected",
            Self::RegDExpected => "'d' expected",
            Self::RegEExpected => "'e' expected",
            Self::Reg16Expected => "A 16-bit register expected",
            Self::IdentifierExpected => "An identifier expected",
            Self::StringLiteralExpected => "A string literal expected",
            Self::Reg16IndirectionExpected => "'bc', 'de', 'hl', 'ix', or 'iy' expected",
            Self::ByteEmittingPragmaExpected => "A byte-emitting pragma expected",
            Self::ExpressionExpected => "An expression expected",
            Self::InvalidParseTimeFunctionArgument => {
                "Invalid argument of a parse-time function"
            }
            Self::UnrecognizedLine => "Cannot parse an assembly line: '{0}'",
            Self::InvalidNumericLiteral => "Cannot parse a numeric literal",
            Self::MacroTimeFunctionOutsideMacro => {
                "A macro-time function can only be used within a macro declaration"
            }
            Self::OperandExpected => "An operand expected",
        }
    }

    /// Renders the message with `{0}` placeholders substituted.
    pub fn format(self, args: &[&str]) -> String {
        let mut text = self.template().to_string();
        for (i, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{i}}}"), arg);
        }
        text
    }
}

/// One recorded grammar error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseErrorMessage {
    pub code: ErrorCode,
    /// The formatted message text.
    pub text: String,
    /// 1-based line of the offending token.
    pub line: usize,
    /// 0-based column of the offending token.
    pub column: usize,
    /// 0-based character offset of the offending token.
    pub position: usize,
}

/// Aborts parsing of the current line.
///
/// Raised after an error record has been pushed; the program driver catches
/// it and resynchronizes at the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, displaydoc::Display)]
#[displaydoc("assembly line parsing aborted")]
pub struct ParserError;

impl std::error::Error for ParserError {}

/// An error raised by the CLI layer.
#[derive(Debug, displaydoc::Display)]
pub enum CliError {
    /// cannot read {path}: {source}
    Input {
        path: CompactString,
        source: std::io::Error,
    },
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_placeholders() {
        assert_eq!(
            ErrorCode::UnexpectedToken.format(&["xyz"]),
            "Unexpected token: 'xyz'"
        );
        assert_eq!(ErrorCode::CommaExpected.format(&[]), "A comma expected");
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorCode::UnrecognizedLine.code(), "Z1002");
        assert_eq!(ErrorCode::OperandExpected.code(), "Z1016");
        assert_eq!(ErrorCode::InvalidNumericLiteral.code(), "Z1005");
    }
}
