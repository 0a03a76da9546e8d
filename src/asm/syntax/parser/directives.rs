//! Preprocessor-style directive parsing.

use compact_str::CompactString;

use crate::diagnostics::ErrorCode;
use crate::syntax::ast::{IdentifierNode, LineBody};
use crate::syntax::tokens::TokenKind;

use super::{ParsePoint, ParseResult, Parser};

impl Parser {
    /// directive
    ///   : "#ifdef" | "#ifndef" | "#define" | "#undef" | "#ifmod" | "#ifnmod"
    ///   | "#endif" | "#else" | "#if" | "#include" | "#line"
    ///   ;
    pub(crate) fn parse_directive(&mut self, point: &ParsePoint) -> ParseResult<Option<LineBody>> {
        let body = match point.start.kind {
            TokenKind::IfDefDir => {
                let identifier = self.directive_identifier()?;
                LineBody::IfDefDirective { identifier }
            }
            TokenKind::IfNDefDir => {
                let identifier = self.directive_identifier()?;
                LineBody::IfNDefDirective { identifier }
            }
            TokenKind::DefineDir => {
                let identifier = self.directive_identifier()?;
                LineBody::DefineDirective { identifier }
            }
            TokenKind::UndefDir => {
                let identifier = self.directive_identifier()?;
                LineBody::UndefDirective { identifier }
            }
            TokenKind::IfModDir => {
                let identifier = self.directive_identifier()?;
                LineBody::IfModDirective { identifier }
            }
            TokenKind::IfNModDir => {
                let identifier = self.directive_identifier()?;
                LineBody::IfNModDirective { identifier }
            }
            TokenKind::EndIfDir => {
                self.tokens.get(false);
                LineBody::EndIfDirective
            }
            TokenKind::ElseDir => {
                self.tokens.get(false);
                LineBody::ElseDirective
            }
            TokenKind::IfDir => {
                self.tokens.get(false);
                LineBody::IfDirective {
                    condition: self.get_expression()?,
                }
            }
            TokenKind::IncludeDir => {
                self.tokens.get(false);
                let Some(token) = self.skip_token(TokenKind::StringLiteral) else {
                    return Err(self.report_error_here(ErrorCode::StringLiteralExpected, &[]));
                };
                LineBody::IncludeDirective {
                    filename: self.string_literal_value(&token.text),
                }
            }
            TokenKind::LineDir => {
                self.tokens.get(false);
                let line_number = self.get_expression()?;
                let next = self.tokens.peek(false);
                let filename = match next.kind {
                    TokenKind::StringLiteral => {
                        self.tokens.get(false);
                        Some(self.string_literal_value(&next.text))
                    }
                    TokenKind::NewLine | TokenKind::Eof => None,
                    _ => {
                        return Err(self.report_error_here(ErrorCode::StringLiteralExpected, &[]))
                    }
                };
                LineBody::LineDirective {
                    line_number,
                    filename,
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(body))
    }

    fn directive_identifier(&mut self) -> ParseResult<IdentifierNode> {
        self.tokens.get(false);
        self.get_identifier()
    }

    /// The converted value of a string literal token, quotes stripped.
    pub(crate) fn string_literal_value(&self, text: &str) -> CompactString {
        let mut chars = text.chars();
        chars.next();
        chars.next_back();
        crate::strings::convert_spectrum_string(chars.as_str()).into()
    }
}
