//! Instruction operand parsing.

use crate::diagnostics::ErrorCode;
use crate::syntax::ast::{Operand, OperandType};
use crate::syntax::tokens::TokenKind;

use super::{ParseResult, Parser};

impl Parser {
    /// operand
    ///   : register
    ///   | "lreg" "(" reg16 ")"
    ///   | "hreg" "(" reg16 ")"
    ///   | "(" reg16 ")"
    ///   | "(" reg16idx ( ("+" | "-") expr )? ")"
    ///   | "(" "c" ")"
    ///   | "(" expr ")"
    ///   | condition
    ///   | expr
    ///   ;
    pub(crate) fn parse_operand(&mut self) -> ParseResult<Option<Operand>> {
        let point = self.parse_point();
        let start = &point.start;
        let traits = &point.traits;

        if traits.reg {
            self.tokens.get(false);
            let operand_type = if traits.reg8 {
                OperandType::Reg8
            } else if traits.reg8_spec {
                OperandType::Reg8Spec
            } else if traits.reg8_idx {
                OperandType::Reg8Idx
            } else if traits.reg16 {
                OperandType::Reg16
            } else if traits.reg16_idx {
                OperandType::Reg16Idx
            } else if traits.reg16_spec {
                OperandType::Reg16Spec
            } else {
                OperandType::NoneArg
            };
            return Ok(Some(Operand {
                operand_type,
                register: Some(start.text.to_lowercase().into()),
                offset_sign: None,
                expr: None,
            }));
        }

        if start.kind == TokenKind::LReg {
            return self.parse_half_register_operand(false).map(Some);
        }
        if start.kind == TokenKind::HReg {
            return self.parse_half_register_operand(true).map(Some);
        }

        if start.kind == TokenKind::NoneArg {
            self.tokens.get(false);
            return Ok(Some(Operand::none_arg()));
        }

        if start.kind == TokenKind::LPar {
            let ahead = self.tokens.ahead(1, false);
            let ahead_traits = ahead.kind.traits();
            if ahead.kind == TokenKind::C {
                self.tokens.get(false);
                self.tokens.get(false);
                self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
                return Ok(Some(Operand {
                    operand_type: OperandType::CPort,
                    register: None,
                    offset_sign: None,
                    expr: None,
                }));
            }
            if ahead_traits.reg16 {
                self.tokens.get(false);
                self.tokens.get(false);
                self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
                return Ok(Some(Operand {
                    operand_type: OperandType::RegIndirect,
                    register: Some(ahead.text.to_lowercase().into()),
                    offset_sign: None,
                    expr: None,
                }));
            }
            if ahead_traits.reg16_idx {
                self.tokens.get(false);
                self.tokens.get(false);
                let register = ahead.text.to_lowercase();
                let sign = self.tokens.peek(false);
                let offset_sign = matches!(sign.kind, TokenKind::Plus | TokenKind::Minus)
                    .then(|| sign.text.clone());
                let mut expr = None;
                if offset_sign.is_some() {
                    self.tokens.get(false);
                    expr = Some(self.get_expression()?);
                }
                self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
                return Ok(Some(Operand {
                    operand_type: OperandType::IndexedIndirect,
                    register: Some(register.into()),
                    offset_sign,
                    expr,
                }));
            }
            if ahead_traits.expression_start {
                self.tokens.get(false);
                let expr = self.get_expression()?;
                self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
                return Ok(Some(Operand {
                    operand_type: OperandType::MemIndirect,
                    register: None,
                    offset_sign: None,
                    expr: Some(expr),
                }));
            }
        }

        if traits.condition {
            self.tokens.get(false);
            return Ok(Some(Operand {
                operand_type: OperandType::Condition,
                // Condition names keep their spelling.
                register: Some(start.text.clone()),
                offset_sign: None,
                expr: None,
            }));
        }

        if traits.expression_start {
            let expr = self.get_expression()?;
            return Ok(Some(Operand {
                operand_type: OperandType::Expression,
                register: None,
                offset_sign: None,
                expr: Some(expr),
            }));
        }

        Ok(None)
    }

    /// `lreg(...)` and `hreg(...)` project a 16-bit register to one of its
    /// 8-bit halves.
    fn parse_half_register_operand(&mut self, high: bool) -> ParseResult<Operand> {
        self.tokens.get(false);
        self.expect_token(TokenKind::LPar, ErrorCode::LParExpected)?;
        let reg = self.tokens.peek(false);
        if reg.kind == TokenKind::LDBrac {
            // A macro parameter placeholder is collected, but yields no
            // concrete register yet.
            self.parse_macro_param_expression()?;
            self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
            return Ok(Operand::none_arg());
        }
        let (register, operand_type) = match reg.text.as_str() {
            "bc" | "de" | "hl" => {
                let half = if high {
                    &reg.text.as_str()[0..1]
                } else {
                    &reg.text.as_str()[1..2]
                };
                (half.into(), OperandType::Reg8)
            }
            "ix" => {
                let half = if high { "xh" } else { "xl" };
                (half.into(), OperandType::Reg8Idx)
            }
            "iy" => {
                let half = if high { "yh" } else { "yl" };
                (half.into(), OperandType::Reg8Idx)
            }
            _ => return Err(self.report_error_here(ErrorCode::Reg16IndirectionExpected, &[])),
        };
        self.tokens.get(false);
        self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
        Ok(Operand {
            operand_type,
            register: Some(register),
            offset_sign: None,
            expr: None,
        })
    }

    /// A mandatory operand.
    pub(crate) fn get_operand(&mut self) -> ParseResult<Operand> {
        match self.parse_operand()? {
            Some(operand) => Ok(operand),
            None => Err(self.report_error_here(ErrorCode::OperandExpected, &[])),
        }
    }
}
