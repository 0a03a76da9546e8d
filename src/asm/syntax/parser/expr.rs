//! Expression parsing.
//!
//! A classic precedence ladder: conditional, then binary operators from `|`
//! down to the `<?`/`>?` min-max pair, then primaries. Numeric literal
//! values are materialized here, so a malformed literal surfaces as a
//! grammar error on its own line.

use crate::diagnostics::ErrorCode;
use crate::syntax::ast::{Expression, ExpressionKind, OperandType};
use crate::syntax::tokens::TokenKind;

use super::{ParsePoint, ParseResult, Parser};

impl Parser {
    /// expr
    ///   : conditionalExpr
    ///   ;
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Option<Expression>> {
        let point = self.parse_point();
        if point.traits.expression_start {
            return self.parse_cond_expr();
        }
        Ok(None)
    }

    /// condExpr
    ///   : orExpr ( "?" expr ":" expr )?
    ///   ;
    fn parse_cond_expr(&mut self) -> ParseResult<Option<Expression>> {
        let start_token = self.tokens.peek(false);
        let Some(cond) = self.parse_or_expr()? else {
            return Ok(None);
        };
        if self.skip_token(TokenKind::QuestionMark).is_none() {
            return Ok(Some(cond));
        }
        let true_expr = self.get_expression()?;
        self.expect_token(TokenKind::Colon, ErrorCode::UnexpectedToken)?;
        let false_expr = self.get_expression()?;
        Ok(Some(self.create_expression(
            ExpressionKind::ConditionalExpression {
                condition: Box::new(cond),
                consequent: Box::new(true_expr),
                alternate: Box::new(false_expr),
            },
            &start_token,
        )))
    }

    fn parse_or_expr(&mut self) -> ParseResult<Option<Expression>> {
        self.parse_binary_chain(&[TokenKind::VerticalBar], Self::parse_xor_expr)
    }

    fn parse_xor_expr(&mut self) -> ParseResult<Option<Expression>> {
        self.parse_binary_chain(&[TokenKind::UpArrow], Self::parse_and_expr)
    }

    fn parse_and_expr(&mut self) -> ParseResult<Option<Expression>> {
        self.parse_binary_chain(&[TokenKind::Ampersand], Self::parse_equ_expr)
    }

    fn parse_equ_expr(&mut self) -> ParseResult<Option<Expression>> {
        self.parse_binary_chain(
            &[
                TokenKind::Equal,
                TokenKind::CiEqual,
                TokenKind::NotEqual,
                TokenKind::CiNotEqual,
            ],
            Self::parse_rel_expr,
        )
    }

    fn parse_rel_expr(&mut self) -> ParseResult<Option<Expression>> {
        self.parse_binary_chain(
            &[
                TokenKind::LessThan,
                TokenKind::LessThanOrEqual,
                TokenKind::GreaterThan,
                TokenKind::GreaterThanOrEqual,
            ],
            Self::parse_shift_expr,
        )
    }

    fn parse_shift_expr(&mut self) -> ParseResult<Option<Expression>> {
        self.parse_binary_chain(
            &[TokenKind::LeftShift, TokenKind::RightShift],
            Self::parse_add_expr,
        )
    }

    fn parse_add_expr(&mut self) -> ParseResult<Option<Expression>> {
        self.parse_binary_chain(&[TokenKind::Plus, TokenKind::Minus], Self::parse_mult_expr)
    }

    fn parse_mult_expr(&mut self) -> ParseResult<Option<Expression>> {
        self.parse_binary_chain(
            &[
                TokenKind::Multiplication,
                TokenKind::Divide,
                TokenKind::Modulo,
            ],
            Self::parse_min_max_expr,
        )
    }

    fn parse_min_max_expr(&mut self) -> ParseResult<Option<Expression>> {
        self.parse_binary_chain(
            &[TokenKind::MinOp, TokenKind::MaxOp],
            Self::parse_primary_expr,
        )
    }

    /// A left-associative chain of binary operators on one precedence level.
    fn parse_binary_chain(
        &mut self,
        ops: &[TokenKind],
        next_level: fn(&mut Parser) -> ParseResult<Option<Expression>>,
    ) -> ParseResult<Option<Expression>> {
        let Some(mut left) = next_level(self)? else {
            return Ok(None);
        };
        while let Some(op) = self.skip_tokens(ops) {
            let start_token = self.tokens.peek(false);
            let Some(right) = next_level(self)? else {
                return Err(self.report_error_here(ErrorCode::ExpressionExpected, &[]));
            };
            left = self.create_expression(
                ExpressionKind::BinaryExpression {
                    operator: op.text.clone(),
                    left: Box::new(left),
                    right: Box::new(right),
                },
                &start_token,
            );
        }
        Ok(Some(left))
    }

    /// primaryExpr
    ///   : builtInFuncInvocation
    ///   | funcInvocation
    ///   | literal
    ///   | symbol
    ///   | unaryExpression
    ///   | macroParam
    ///   ;
    fn parse_primary_expr(&mut self) -> ParseResult<Option<Expression>> {
        let point = self.parse_point();
        let start = &point.start;

        if start.kind == TokenKind::Multiplication {
            // "*" doubles as the current address when no operand follows.
            let ahead = self.tokens.ahead(1, false);
            if ahead.kind == TokenKind::Eof || !ahead.kind.traits().expression_start {
                self.tokens.get(false);
                return Ok(Some(
                    self.create_expression(ExpressionKind::CurrentAddressLiteral, start),
                ));
            }
        }

        if point.traits.parse_time_function {
            return self.parse_parse_time_function_invocation(&point).map(Some);
        }

        if point.traits.macro_time_function {
            let invocation = self.parse_macro_time_func_invocation(&point)?;
            if !self.macro_emit_phase {
                // Outside a macro body, the only legal argument is a macro
                // parameter placeholder.
                if let ExpressionKind::MacroTimeFunctionInvocation {
                    operand: Some(operand),
                    ..
                } = &invocation.kind
                {
                    let is_placeholder = operand.operand_type == OperandType::Expression
                        && matches!(
                            operand.expr.as_ref().map(|e| &e.kind),
                            Some(ExpressionKind::MacroParameter { .. })
                        );
                    if !is_placeholder {
                        return Err(self.report_error(
                            ErrorCode::MacroTimeFunctionOutsideMacro,
                            start,
                            &[],
                        ));
                    }
                }
            }
            return Ok(Some(invocation));
        }

        if point.traits.literal {
            return self.parse_literal(&point);
        }

        match start.kind {
            TokenKind::LPar => self.parse_par_expr(),
            TokenKind::LSBrac => self.parse_brack_expr(),
            TokenKind::Identifier => {
                if self.tokens.ahead(1, false).kind == TokenKind::LPar {
                    self.parse_function_invocation().map(Some)
                } else {
                    self.parse_symbol(&point).map(Some)
                }
            }
            TokenKind::DoubleColon => self.parse_symbol(&point).map(Some),
            TokenKind::Plus | TokenKind::Minus | TokenKind::BinaryNot | TokenKind::Exclamation => {
                self.parse_unary_expr(&point).map(Some)
            }
            TokenKind::LDBrac => self.parse_macro_param_expression().map(Some),
            _ => Ok(None),
        }
    }

    /// parExpr
    ///   : "(" expr ")"
    ///   ;
    fn parse_par_expr(&mut self) -> ParseResult<Option<Expression>> {
        if self.skip_token(TokenKind::LPar).is_none() {
            return Ok(None);
        }
        let Some(expr) = self.parse_expr()? else {
            return Ok(None);
        };
        self.expect_token(TokenKind::RPar, ErrorCode::UnexpectedToken)?;
        Ok(Some(expr))
    }

    /// brackExpr
    ///   : "[" expr "]"
    ///   ;
    fn parse_brack_expr(&mut self) -> ParseResult<Option<Expression>> {
        if self.skip_token(TokenKind::LSBrac).is_none() {
            return Ok(None);
        }
        let Some(expr) = self.parse_expr()? else {
            return Ok(None);
        };
        self.expect_token(TokenKind::RSBrac, ErrorCode::UnexpectedToken)?;
        Ok(Some(expr))
    }

    /// macroTimeFuncInvocation
    ///   : macroTimeFunction "(" operand? ")"
    ///   ;
    fn parse_macro_time_func_invocation(
        &mut self,
        point: &ParsePoint,
    ) -> ParseResult<Expression> {
        let start = &point.start;
        self.tokens.get(false);
        self.expect_token(TokenKind::LPar, ErrorCode::LParExpected)?;
        let operand = self.parse_operand()?;
        self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
        Ok(self.create_expression(
            ExpressionKind::MacroTimeFunctionInvocation {
                function_name: start.text.to_lowercase().into(),
                operand: operand.map(Box::new),
            },
            start,
        ))
    }

    /// `textof`/`ltextof` evaluate at parse time to the spelling of their
    /// argument, which must be a mnemonic, register, condition, or register
    /// indirection.
    fn parse_parse_time_function_invocation(
        &mut self,
        point: &ParsePoint,
    ) -> ParseResult<Expression> {
        let start = &point.start;
        let lowercase = start.kind == TokenKind::LTextOf;
        self.tokens.get(false);
        self.expect_token(TokenKind::LPar, ErrorCode::LParExpected)?;
        let arg_token = self.tokens.peek(false);
        let traits = arg_token.kind.traits();

        if traits.instruction || traits.reg || traits.condition {
            self.tokens.get(false);
            self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
            let value = if lowercase {
                arg_token.text.to_lowercase()
            } else {
                arg_token.text.to_uppercase()
            };
            return Ok(self.create_expression(
                ExpressionKind::StringLiteral {
                    value: value.into(),
                },
                start,
            ));
        }

        if arg_token.kind == TokenKind::LPar {
            self.tokens.get(false);
            let reg16 = self.tokens.peek(false);
            if !reg16.kind.traits().reg16 {
                return Err(self.report_error_here(ErrorCode::Reg16Expected, &[]));
            }
            self.tokens.get(false);
            self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
            self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
            let inner = if lowercase {
                reg16.text.to_lowercase()
            } else {
                reg16.text.to_uppercase()
            };
            return Ok(self.create_expression(
                ExpressionKind::StringLiteral {
                    value: format!("({inner})").into(),
                },
                start,
            ));
        }

        if !self.macro_emit_phase && arg_token.kind == TokenKind::LDBrac {
            let macro_param = self.parse_macro_param_expression()?;
            self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
            return Ok(macro_param);
        }

        Err(self.report_error_here(ErrorCode::InvalidParseTimeFunctionArgument, &[]))
    }

    /// functionInvocation
    ///   : Identifier "(" expression? ("," expression)* ")"
    ///   ;
    fn parse_function_invocation(&mut self) -> ParseResult<Expression> {
        let start_token = self.tokens.peek(false);
        let function_name = self.get_identifier()?;
        self.expect_token(TokenKind::LPar, ErrorCode::LParExpected)?;
        let args = self.get_expression_list(false)?;
        self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
        Ok(self.create_expression(
            ExpressionKind::FunctionInvocation {
                function_name,
                args,
            },
            &start_token,
        ))
    }

    /// symbol
    ///   : "::"? Identifier
    ///   ;
    pub(crate) fn parse_symbol(&mut self, point: &ParsePoint) -> ParseResult<Expression> {
        let start_token = point.start.clone();
        let mut starts_from_global = false;
        let mut current = point.start.kind;
        if self.skip_token(TokenKind::DoubleColon).is_some() {
            starts_from_global = true;
            current = self.tokens.peek(false).kind;
        }
        if current == TokenKind::Identifier {
            let identifier = self.get_identifier()?;
            return Ok(self.create_expression(
                ExpressionKind::Symbol {
                    starts_from_global,
                    identifier,
                },
                &start_token,
            ));
        }
        Err(self.report_error_here(ErrorCode::IdentifierExpected, &[]))
    }

    /// unaryExpr
    ///   : ( "+" | "-" | "~" | "!" ) expr
    ///   ;
    fn parse_unary_expr(&mut self, point: &ParsePoint) -> ParseResult<Expression> {
        let operator = point.start.text.clone();
        self.tokens.get(false);
        let operand = self.get_expression()?;
        Ok(self.create_expression(
            ExpressionKind::UnaryExpression {
                operator,
                operand: Box::new(operand),
            },
            &point.start,
        ))
    }

    /// literal
    ///   : binaryLiteral | octalLiteral | decimalLiteral | hexadecimalLiteral
    ///   | realLiteral | charLiteral | stringLiteral | booleanLiteral
    ///   | currentAddressLiteral | currentCounterLiteral
    ///   ;
    fn parse_literal(&mut self, point: &ParsePoint) -> ParseResult<Option<Expression>> {
        let start = &point.start;
        let kind = match start.kind {
            TokenKind::BinaryLiteral => self.parse_binary_literal(&start.text)?,
            TokenKind::OctalLiteral => self.parse_octal_literal(&start.text)?,
            TokenKind::DecimalLiteral => self.parse_decimal_literal(&start.text)?,
            TokenKind::HexadecimalLiteral => self.parse_hexadecimal_literal(&start.text)?,
            TokenKind::RealLiteral => self.parse_real_literal(&start.text)?,
            TokenKind::CharLiteral => {
                let value = self.string_literal_value(&start.text);
                ExpressionKind::IntegerLiteral {
                    value: value.chars().next().map_or(0, |ch| ch as u32) as i64,
                }
            }
            TokenKind::StringLiteral => ExpressionKind::StringLiteral {
                value: self.string_literal_value(&start.text),
            },
            TokenKind::True => ExpressionKind::BooleanLiteral { value: true },
            TokenKind::False => ExpressionKind::BooleanLiteral { value: false },
            TokenKind::CurAddress | TokenKind::Dot | TokenKind::Multiplication => {
                ExpressionKind::CurrentAddressLiteral
            }
            TokenKind::CurCnt => ExpressionKind::CurrentCounterLiteral,
            _ => return Ok(None),
        };
        self.tokens.get(false);
        Ok(Some(self.create_expression(kind, start)))
    }

    /// binaryLiteral
    ///   : "%" ("_" | "0" | "1")+
    ///   | ("0" | "1") ("_" | "0" | "1")* ("b" | "B")
    ///   ;
    fn parse_binary_literal(&mut self, text: &str) -> ParseResult<ExpressionKind> {
        let digits = text
            .strip_prefix('%')
            .or_else(|| text.strip_suffix('b'))
            .unwrap_or(text)
            .replace('_', "");
        self.integer_literal(&digits, 2)
    }

    /// octalLiteral
    ///   : ("0".."7")+ ("q" | "Q" | "o" | "O")
    ///   ;
    fn parse_octal_literal(&mut self, text: &str) -> ParseResult<ExpressionKind> {
        let digits = &text[..text.len() - 1];
        self.integer_literal(digits, 8)
    }

    fn parse_decimal_literal(&mut self, text: &str) -> ParseResult<ExpressionKind> {
        self.integer_literal(text, 10)
    }

    /// hexadecimalLiteral
    ///   : ("#" | "$" | "0x") hexDigit{1-5}
    ///   | digit hexDigit{0-4} ("h" | "H")
    ///   ;
    fn parse_hexadecimal_literal(&mut self, text: &str) -> ParseResult<ExpressionKind> {
        let trimmed = if let Some(rest) = text.strip_prefix(['#', '$']) {
            rest
        } else if let Some(rest) = text.strip_suffix(['h', 'H']) {
            rest
        } else {
            text
        };
        let trimmed = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        self.integer_literal(trimmed, 16)
    }

    fn parse_real_literal(&mut self, text: &str) -> ParseResult<ExpressionKind> {
        match text.parse::<f64>() {
            Ok(value) => Ok(ExpressionKind::RealLiteral { value }),
            Err(_) => Err(self.report_error_here(ErrorCode::InvalidNumericLiteral, &[])),
        }
    }

    /// Parses the longest valid digit prefix of `text` in the given radix.
    fn integer_literal(&mut self, text: &str, radix: u32) -> ParseResult<ExpressionKind> {
        let digits: String = text.chars().take_while(|ch| ch.is_digit(radix)).collect();
        match i64::from_str_radix(&digits, radix) {
            Ok(value) => Ok(ExpressionKind::IntegerLiteral { value }),
            Err(_) => Err(self.report_error_here(ErrorCode::InvalidNumericLiteral, &[])),
        }
    }
}
