//! Pragma parsing.

use compact_str::CompactString;

use crate::diagnostics::ErrorCode;
use crate::syntax::ast::{ExpressionKind, LineBody};
use crate::syntax::tokens::TokenKind;

use super::{ParsePoint, ParseResult, Parser};

impl Parser {
    /// pragma
    ///   : orgPragma | bankPragma | xorgPragma | entPragma | xentPragma
    ///   | dispPragma | equPragma | varPragma | defbPragma | defwPragma
    ///   | defmPragma | defnPragma | defhPragma | defcPragma | defgPragma
    ///   | defgxPragma | skipPragma | externPragma | defsPragma
    ///   | fillbPragma | fillwPragma | modelPragma | alignPragma
    ///   | tracePragma | rndSeedPragma | errorPragma | incBinPragma
    ///   | compareBinPragma | injectOptPragma | onSuccessPragma
    ///   ;
    pub(crate) fn parse_pragma(&mut self, point: &ParsePoint) -> ParseResult<Option<LineBody>> {
        let start = &point.start;
        // The pragma keyword itself.
        self.tokens.get(false);
        let body = match start.kind {
            TokenKind::OrgPragma => LineBody::OrgPragma {
                address: self.get_expression()?,
            },
            TokenKind::BankPragma => {
                let bank_id = self.get_expression()?;
                let offset = self.get_optional_comma_expression()?;
                let mut noexport = false;
                let next = self.tokens.peek(false);
                if next.kind == TokenKind::Identifier && next.text.to_lowercase() == "noexport" {
                    self.tokens.get(false);
                    noexport = true;
                }
                LineBody::BankPragma {
                    bank_id,
                    offset,
                    noexport,
                }
            }
            TokenKind::XorgPragma => LineBody::XorgPragma {
                address: self.get_expression()?,
            },
            TokenKind::EntPragma => LineBody::EntPragma {
                address: self.get_expression()?,
            },
            TokenKind::XentPragma => LineBody::XentPragma {
                address: self.get_expression()?,
            },
            TokenKind::EquPragma => LineBody::EquPragma {
                value: self.get_expression()?,
            },
            // "=" and ".var" spell the same pragma.
            TokenKind::VarPragma | TokenKind::Assign => LineBody::VarPragma {
                value: self.get_expression()?,
            },
            TokenKind::DispPragma => LineBody::DispPragma {
                offset: self.get_expression()?,
            },
            TokenKind::DefbPragma => LineBody::DefBPragma {
                values: self.get_expression_list(true)?,
            },
            TokenKind::DefwPragma => LineBody::DefWPragma {
                values: self.get_expression_list(true)?,
            },
            TokenKind::DefmPragma => LineBody::DefMPragma {
                value: self.get_expression()?,
            },
            TokenKind::DefnPragma => LineBody::DefNPragma {
                value: self.get_expression()?,
            },
            TokenKind::DefhPragma => LineBody::DefHPragma {
                value: self.get_expression()?,
            },
            TokenKind::DefgxPragma => LineBody::DefGxPragma {
                pattern: self.get_expression()?,
            },
            TokenKind::DefgPragma => {
                // The token carries the whole rest of the line; the pattern
                // is everything after the first space or tab.
                let text = start.text.as_str();
                let fspace = text.find(' ').or_else(|| text.find('\t'));
                let pattern = match fspace {
                    Some(at) if at + 1 < text.len() => CompactString::from(&text[at + 1..]),
                    _ => CompactString::new(""),
                };
                LineBody::DefGPragma { pattern }
            }
            TokenKind::DefcPragma => LineBody::DefCPragma {
                value: self.get_expression()?,
            },
            TokenKind::SkipPragma => LineBody::SkipPragma {
                skip: self.get_expression()?,
                fill: self.get_optional_comma_expression()?,
            },
            TokenKind::ExternPragma => LineBody::ExternPragma,
            TokenKind::DefsPragma => LineBody::DefSPragma {
                count: self.get_expression()?,
                fill: self.get_optional_comma_expression()?,
            },
            TokenKind::FillbPragma => LineBody::FillbPragma {
                count: self.get_expression()?,
                fill: self.get_comma_expression()?,
            },
            TokenKind::FillwPragma => LineBody::FillwPragma {
                count: self.get_expression()?,
                fill: self.get_comma_expression()?,
            },
            TokenKind::ModelPragma => {
                let next = self.tokens.peek(false);
                if !matches!(next.kind, TokenKind::Identifier | TokenKind::Next) {
                    return Err(self.report_error_here(ErrorCode::IdentifierExpected, &[]));
                }
                self.tokens.get(false);
                LineBody::ModelPragma {
                    model_id: next.text,
                }
            }
            TokenKind::AlignPragma => LineBody::AlignPragma {
                align_expr: self.get_optional_expression()?,
            },
            TokenKind::TracePragma => LineBody::TracePragma {
                is_hex: false,
                values: self.get_expression_list(true)?,
            },
            TokenKind::TraceHexPragma => LineBody::TracePragma {
                is_hex: true,
                values: self.get_expression_list(true)?,
            },
            TokenKind::RndSeedPragma => LineBody::RndSeedPragma {
                seed_expr: self.get_optional_expression()?,
            },
            TokenKind::ErrorPragma => LineBody::ErrorPragma {
                message: self.get_expression()?,
            },
            TokenKind::IncludeBinPragma => {
                let filename = self.get_expression()?;
                let offset = self.get_optional_comma_expression()?;
                let length = if offset.is_some() {
                    self.get_optional_comma_expression()?
                } else {
                    None
                };
                LineBody::IncBinPragma {
                    filename,
                    offset,
                    length,
                }
            }
            TokenKind::CompareBinPragma => {
                let filename = self.get_expression()?;
                let offset = self.get_optional_comma_expression()?;
                let length = if offset.is_some() {
                    self.get_optional_comma_expression()?
                } else {
                    None
                };
                LineBody::CompareBinPragma {
                    filename,
                    offset,
                    length,
                }
            }
            TokenKind::InjectOptPragma => LineBody::InjectOptPragma {
                identifiers: self.get_identifier_node_list(true)?,
            },
            TokenKind::OnSuccessPragma => {
                let expr = self.get_expression()?;
                let ExpressionKind::StringLiteral { value } = expr.kind else {
                    return Err(self.report_error_here(ErrorCode::StringLiteralExpected, &[]));
                };
                LineBody::OnSuccessPragma { command: value }
            }
            _ => return Ok(None),
        };
        Ok(Some(body))
    }
}
