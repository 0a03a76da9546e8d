//! Statement parsing.
//!
//! Statements arrive two ways: through dedicated statement tokens (`.macro`,
//! `.loop`, ...) handled here, and through contextual identifiers (`loop`,
//! `endw`, ...) dispatched directly from the line-body parser.

use crate::diagnostics::ErrorCode;
use crate::syntax::ast::LineBody;
use crate::syntax::tokens::TokenKind;

use super::{ParsePoint, ParseResult, Parser};

impl Parser {
    pub(crate) fn parse_statement(&mut self, point: &ParsePoint) -> ParseResult<Option<LineBody>> {
        // The statement keyword itself.
        self.tokens.get(false);
        let body = match point.start.kind {
            TokenKind::Macro => self.parse_macro_statement()?,
            TokenKind::Endm => LineBody::MacroEndStatement,
            TokenKind::Loop => self.parse_loop_statement()?,
            TokenKind::Endl => LineBody::LoopEndStatement,
            TokenKind::While => self.parse_while_statement()?,
            TokenKind::Endw => LineBody::WhileEndStatement,
            TokenKind::Repeat => LineBody::RepeatStatement,
            TokenKind::Until => self.parse_until_statement()?,
            TokenKind::Proc => LineBody::ProcStatement,
            TokenKind::Endp => LineBody::ProcEndStatement,
            TokenKind::If => self.parse_if_statement()?,
            TokenKind::IfUsed => self.parse_if_used_statement(false)?,
            TokenKind::IfNUsed => self.parse_if_used_statement(true)?,
            TokenKind::Else => LineBody::ElseStatement,
            TokenKind::Endif => LineBody::EndIfStatement,
            TokenKind::Elif => self.parse_else_if_statement()?,
            TokenKind::Break => LineBody::BreakStatement,
            TokenKind::Continue => LineBody::ContinueStatement,
            TokenKind::Module => self.parse_module_statement()?,
            TokenKind::EndModule => LineBody::ModuleEndStatement,
            TokenKind::Struct => LineBody::StructStatement,
            TokenKind::Ends => LineBody::StructEndStatement,
            TokenKind::For => self.parse_for_statement()?,
            TokenKind::Next => LineBody::NextStatement,
            _ => return Ok(None),
        };
        Ok(Some(body))
    }

    /// macroStatement
    ///   : ".macro" "(" Identifier? ( "," Identifier)* ")"
    ///   ;
    fn parse_macro_statement(&mut self) -> ParseResult<LineBody> {
        self.expect_token(TokenKind::LPar, ErrorCode::LParExpected)?;
        let parameters = self.get_identifier_node_list(false)?;
        self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
        Ok(LineBody::MacroStatement { parameters })
    }

    /// loopStatement
    ///   : ".loop" expression
    ///   ;
    pub(crate) fn parse_loop_statement(&mut self) -> ParseResult<LineBody> {
        Ok(LineBody::LoopStatement {
            expr: self.get_expression()?,
        })
    }

    /// whileStatement
    ///   : ".while" expression
    ///   ;
    pub(crate) fn parse_while_statement(&mut self) -> ParseResult<LineBody> {
        Ok(LineBody::WhileStatement {
            expr: self.get_expression()?,
        })
    }

    /// untilStatement
    ///   : ".until" expression
    ///   ;
    pub(crate) fn parse_until_statement(&mut self) -> ParseResult<LineBody> {
        Ok(LineBody::UntilStatement {
            expr: self.get_expression()?,
        })
    }

    /// ifStatement
    ///   : ".if" expression
    ///   ;
    fn parse_if_statement(&mut self) -> ParseResult<LineBody> {
        Ok(LineBody::IfStatement {
            expr: self.get_expression()?,
        })
    }

    /// ifUsedStatement
    ///   : (".ifused" | ".ifnused") symbol
    ///   ;
    fn parse_if_used_statement(&mut self, negated: bool) -> ParseResult<LineBody> {
        let point = self.parse_point();
        let symbol = self.parse_symbol(&point)?;
        Ok(if negated {
            LineBody::IfNUsedStatement { symbol }
        } else {
            LineBody::IfUsedStatement { symbol }
        })
    }

    /// elseIfStatement
    ///   : ".elseif" expression
    ///   ;
    pub(crate) fn parse_else_if_statement(&mut self) -> ParseResult<LineBody> {
        Ok(LineBody::ElseIfStatement {
            expr: self.get_expression()?,
        })
    }

    /// moduleStatement
    ///   : ".module" Identifier?
    ///   ;
    fn parse_module_statement(&mut self) -> ParseResult<LineBody> {
        let mut identifier = None;
        if self.tokens.peek(false).kind == TokenKind::Identifier {
            identifier = Some(self.get_identifier()?);
        }
        Ok(LineBody::ModuleStatement { identifier })
    }

    /// forStatement
    ///   : ".for" Identifier "=" expression ".to" expression
    ///     ( ".step" expression )?
    ///   ;
    fn parse_for_statement(&mut self) -> ParseResult<LineBody> {
        let identifier = self.get_identifier()?;
        self.expect_token(TokenKind::Assign, ErrorCode::AssignExpected)?;
        let start_expr = self.get_expression()?;
        self.expect_token(TokenKind::To, ErrorCode::ToExpected)?;
        let to_expr = self.get_expression()?;
        let mut step_expr = None;
        if self.tokens.peek(false).kind == TokenKind::Step {
            self.tokens.get(false);
            step_expr = Some(self.get_expression()?);
        }
        Ok(LineBody::ForStatement {
            identifier,
            start_expr,
            to_expr,
            step_expr,
        })
    }
}
