//! Z80 instruction parsing.

use crate::diagnostics::ErrorCode;
use crate::syntax::ast::{LineBody, Operand};
use crate::syntax::tokens::TokenKind;

use super::{ParsePoint, ParseResult, Parser};

impl Parser {
    /// instruction
    ///   : simpleInstruction
    ///   | compoundInstruction
    ///   ;
    pub(crate) fn parse_instruction(
        &mut self,
        point: &ParsePoint,
    ) -> ParseResult<Option<LineBody>> {
        if point.traits.simple {
            self.tokens.get(false);
            return Ok(Some(LineBody::SimpleZ80Instruction {
                mnemonic: point.start.text.to_uppercase().into(),
            }));
        }
        self.parse_compound_instruction(point)
    }

    fn parse_compound_instruction(
        &mut self,
        point: &ParsePoint,
    ) -> ParseResult<Option<LineBody>> {
        // The mnemonic token itself.
        self.tokens.get(false);
        let body = match point.start.kind {
            TokenKind::Ld => {
                let (operand1, operand2) = self.two_operands()?;
                LineBody::LdInstruction { operand1, operand2 }
            }
            TokenKind::Inc => LineBody::IncInstruction {
                operand: self.get_operand()?,
            },
            TokenKind::Dec => LineBody::DecInstruction {
                operand: self.get_operand()?,
            },
            TokenKind::Ex => {
                let (operand1, operand2) = self.two_operands()?;
                LineBody::ExInstruction { operand1, operand2 }
            }
            TokenKind::Add => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::AddInstruction { operand1, operand2 }
            }
            TokenKind::Adc => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::AdcInstruction { operand1, operand2 }
            }
            TokenKind::Sub => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::SubInstruction { operand1, operand2 }
            }
            TokenKind::Sbc => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::SbcInstruction { operand1, operand2 }
            }
            TokenKind::And => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::AndInstruction { operand1, operand2 }
            }
            TokenKind::Xor => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::XorInstruction { operand1, operand2 }
            }
            TokenKind::Or => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::OrInstruction { operand1, operand2 }
            }
            TokenKind::Cp => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::CpInstruction { operand1, operand2 }
            }
            TokenKind::Djnz => LineBody::DjnzInstruction {
                target: self.get_operand()?,
            },
            TokenKind::Jr => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::JrInstruction { operand1, operand2 }
            }
            TokenKind::Jp => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::JpInstruction { operand1, operand2 }
            }
            TokenKind::Call => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::CallInstruction { operand1, operand2 }
            }
            TokenKind::Ret => LineBody::RetInstruction {
                condition: self.parse_operand()?,
            },
            TokenKind::Rst => LineBody::RstInstruction {
                target: self.get_operand()?,
            },
            TokenKind::Push => LineBody::PushInstruction {
                operand: self.get_operand()?,
            },
            TokenKind::Pop => LineBody::PopInstruction {
                operand: self.get_operand()?,
            },
            TokenKind::In => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::InInstruction { operand1, operand2 }
            }
            TokenKind::Out => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::OutInstruction { operand1, operand2 }
            }
            TokenKind::Im => LineBody::ImInstruction {
                mode: self.get_operand()?,
            },
            TokenKind::Rlc => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::RlcInstruction { operand1, operand2 }
            }
            TokenKind::Rrc => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::RrcInstruction { operand1, operand2 }
            }
            TokenKind::Rl => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::RlInstruction { operand1, operand2 }
            }
            TokenKind::Rr => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::RrInstruction { operand1, operand2 }
            }
            TokenKind::Sla => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::SlaInstruction { operand1, operand2 }
            }
            TokenKind::Sra => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::SraInstruction { operand1, operand2 }
            }
            TokenKind::Sll => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::SllInstruction { operand1, operand2 }
            }
            TokenKind::Srl => {
                let (operand1, operand2) = self.one_or_two_operands()?;
                LineBody::SrlInstruction { operand1, operand2 }
            }
            TokenKind::Bit => {
                let (operand1, operand2) = self.two_operands()?;
                LineBody::BitInstruction { operand1, operand2 }
            }
            TokenKind::Res => {
                let (operand1, operand2, operand3) = self.two_or_three_operands()?;
                LineBody::ResInstruction {
                    operand1,
                    operand2,
                    operand3,
                }
            }
            TokenKind::Set => {
                let (operand1, operand2, operand3) = self.two_or_three_operands()?;
                LineBody::SetInstruction {
                    operand1,
                    operand2,
                    operand3,
                }
            }
            TokenKind::Mul => {
                // Only "mul d,e" exists.
                self.expect_token(TokenKind::D, ErrorCode::RegDExpected)?;
                self.expect_token(TokenKind::Comma, ErrorCode::CommaExpected)?;
                self.expect_token(TokenKind::E, ErrorCode::RegEExpected)?;
                LineBody::SimpleZ80Instruction {
                    mnemonic: "mul".into(),
                }
            }
            TokenKind::Mirror => {
                self.expect_token(TokenKind::A, ErrorCode::RegAExpected)?;
                LineBody::SimpleZ80Instruction {
                    mnemonic: "mirror".into(),
                }
            }
            TokenKind::NextReg => {
                let (operand1, operand2) = self.two_operands()?;
                LineBody::NextRegInstruction { operand1, operand2 }
            }
            TokenKind::Test => LineBody::TestInstruction {
                expr: self.get_expression()?,
            },
            TokenKind::Bsla => self.expect_de_and_b("bsla")?,
            TokenKind::Bsra => self.expect_de_and_b("bsra")?,
            TokenKind::Bsrl => self.expect_de_and_b("bsrl")?,
            TokenKind::Bsrf => self.expect_de_and_b("bsrf")?,
            TokenKind::Brlc => self.expect_de_and_b("brlc")?,
            _ => return Ok(None),
        };
        Ok(Some(body))
    }

    fn two_operands(&mut self) -> ParseResult<(Operand, Operand)> {
        let operand1 = self.get_operand()?;
        self.expect_token(TokenKind::Comma, ErrorCode::CommaExpected)?;
        let operand2 = self.get_operand()?;
        Ok((operand1, operand2))
    }

    fn one_or_two_operands(&mut self) -> ParseResult<(Operand, Option<Operand>)> {
        let operand1 = self.get_operand()?;
        let mut operand2 = None;
        if self.skip_token(TokenKind::Comma).is_some() {
            operand2 = Some(self.get_operand()?);
        }
        Ok((operand1, operand2))
    }

    fn two_or_three_operands(&mut self) -> ParseResult<(Operand, Operand, Option<Operand>)> {
        let operand1 = self.get_operand()?;
        self.expect_token(TokenKind::Comma, ErrorCode::CommaExpected)?;
        let operand2 = self.get_operand()?;
        let mut operand3 = None;
        if self.skip_token(TokenKind::Comma).is_some() {
            operand3 = Some(self.get_operand()?);
        }
        Ok((operand1, operand2, operand3))
    }

    /// The Next barrel shifts all take the fixed "de,b" operand pair.
    fn expect_de_and_b(&mut self, mnemonic: &str) -> ParseResult<LineBody> {
        self.expect_token(TokenKind::DE, ErrorCode::RegDeExpected)?;
        self.expect_token(TokenKind::Comma, ErrorCode::CommaExpected)?;
        self.expect_token(TokenKind::B, ErrorCode::RegBExpected)?;
        Ok(LineBody::SimpleZ80Instruction {
            mnemonic: mnemonic.into(),
        })
    }
}
