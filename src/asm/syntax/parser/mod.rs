//! Recursive-descent parser over the token stream.
//!
//! Each grammar error is recorded as a [`ParseErrorMessage`] and aborts the
//! current line via [`ParserError`]; the program loop then resynchronizes at
//! the next line, so one bad line yields exactly one diagnostic.

mod directives;
mod expr;
mod instructions;
mod operands;
mod pragmas;
mod statements;

use compact_str::CompactString;

use crate::diagnostics::{ErrorCode, ParseErrorMessage, ParserError};
use crate::syntax::ast::{
    AssemblyLine, Expression, ExpressionKind, IdentifierNode, LineBody, Operand, Program,
};
use crate::syntax::lexer::TokenStream;
use crate::syntax::tokens::{Token, TokenKind, TokenTraits};

pub type ParseResult<T> = Result<T, ParserError>;

/// The next unconsumed token together with its traits.
pub(crate) struct ParsePoint {
    pub start: Token,
    pub traits: TokenTraits,
}

pub struct Parser {
    tokens: TokenStream,
    file_index: usize,
    /// During macro emission, macro-time functions may take any operand.
    macro_emit_phase: bool,
    errors: Vec<ParseErrorMessage>,
    macro_params_collected: Vec<Expression>,
}

impl Parser {
    pub fn new(tokens: TokenStream, file_index: usize, macro_emit_phase: bool) -> Self {
        Self {
            tokens,
            file_index,
            macro_emit_phase,
            errors: Vec::new(),
            macro_params_collected: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[ParseErrorMessage] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ParseErrorMessage> {
        self.errors
    }

    /// program
    ///   : (assemblyLine? NewLine*)* EOF
    ///   ;
    pub fn parse_program(&mut self) -> Program {
        let mut assembly_lines = Vec::new();
        self.tokens.reset_comment();
        loop {
            let token = self.tokens.peek(true);
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::EolComment | TokenKind::NewLine => {
                    // An empty line still yields a node when a comment was
                    // seen on it.
                    let end_token = self.tokens.get(true);
                    if let Some(comment) = self.tokens.last_comment() {
                        assembly_lines.push(AssemblyLine {
                            body: LineBody::CommentOnlyLine,
                            label: None,
                            file_index: self.file_index,
                            line: token.location.start_line,
                            start_position: end_token.location.start_position,
                            start_column: end_token.location.start_column,
                            end_position: end_token.location.end_position,
                            end_column: end_token.location.end_column,
                            comment: Some(CompactString::from(comment)),
                            macro_params: Vec::new(),
                        });
                    }
                    self.tokens.reset_comment();
                    continue;
                }
                kind if kind.is_whitespace() => {
                    self.tokens.get(true);
                    continue;
                }
                _ => {}
            }

            match self.parse_assembly_line() {
                Ok(line) => {
                    assembly_lines.push(line);
                    if self
                        .expect_token_or_eof(TokenKind::NewLine, ErrorCode::UnexpectedToken)
                        .is_err()
                    {
                        self.recover_from_parse_error();
                    }
                }
                Err(_) => self.recover_from_parse_error(),
            }
            self.tokens.reset_comment();
        }
        Program { assembly_lines }
    }

    /// Skips to the end of the current line after a reported error.
    fn recover_from_parse_error(&mut self) {
        loop {
            let token = self.tokens.get(false);
            if matches!(token.kind, TokenKind::NewLine | TokenKind::Eof) {
                return;
            }
        }
    }

    /// assemblyLine
    ///   : label? lineBody?
    ///   | directive
    ///   ;
    fn parse_assembly_line(&mut self) -> ParseResult<AssemblyLine> {
        let start = self.tokens.peek(false);
        let mut label = None;

        if start.kind == TokenKind::Identifier {
            let ahead = self.tokens.ahead(1, false);
            if !is_keyword_like_id(&start.text)
                || ahead.kind == TokenKind::Colon
                || starts_line_body(&ahead)
            {
                label = self.parse_label()?;
            }
        }

        let main_token = self.tokens.peek(false);
        let mut macro_params = Vec::new();
        let body = if matches!(main_token.kind, TokenKind::NewLine | TokenKind::Eof) {
            Some(LineBody::LabelOnlyLine)
        } else if starts_line_body(&main_token) || main_token.kind == TokenKind::Identifier {
            self.macro_params_collected.clear();
            let body = self.parse_line_body()?;
            macro_params = std::mem::take(&mut self.macro_params_collected);
            body
        } else {
            let point = self.parse_point();
            self.parse_directive(&point)?
        };

        let Some(body) = body else {
            return Err(self.report_error(
                ErrorCode::UnrecognizedLine,
                &main_token,
                &[&main_token.text],
            ));
        };

        // The line's span ends where the next unconsumed token begins.
        let next_token = self.tokens.peek(false);
        Ok(AssemblyLine {
            body,
            label,
            file_index: self.file_index,
            line: start.location.start_line,
            start_position: start.location.start_position,
            start_column: start.location.start_column,
            end_position: next_token.location.start_position,
            end_column: next_token.location.start_column,
            comment: self.tokens.last_comment().map(CompactString::from),
            macro_params,
        })
    }

    /// label
    ///   : Identifier ":"?
    ///   ;
    fn parse_label(&mut self) -> ParseResult<Option<IdentifierNode>> {
        if self.tokens.peek(false).kind != TokenKind::Identifier {
            return Ok(None);
        }
        if self.tokens.ahead(1, false).kind == TokenKind::LPar {
            // Identifier "(" opens a macro or function invocation instead.
            return Ok(None);
        }
        let identifier = self.get_identifier()?;
        self.skip_token(TokenKind::Colon);
        Ok(Some(identifier))
    }

    /// lineBody
    ///   : pragma
    ///   | instruction
    ///   | macroParam
    ///   | statement
    ///   | macroOrStructInvocation
    ///   | fieldAssignment
    ///   ;
    fn parse_line_body(&mut self) -> ParseResult<Option<LineBody>> {
        let point = self.parse_point();
        if matches!(point.start.kind, TokenKind::NewLine | TokenKind::Eof) {
            return Ok(None);
        }
        if point.traits.pragma {
            return self.parse_pragma(&point);
        }
        if point.traits.instruction {
            return self.parse_instruction(&point);
        }
        if point.start.kind == TokenKind::LDBrac {
            return self.parse_macro_param().map(Some);
        }
        if point.traits.statement {
            return self.parse_statement(&point);
        }
        if point.start.kind == TokenKind::Identifier {
            let text = point.start.text.to_lowercase();
            let body = match text.as_str() {
                "loop" => {
                    self.tokens.get(false);
                    return self.parse_loop_statement().map(Some);
                }
                "while" => {
                    self.tokens.get(false);
                    return self.parse_while_statement().map(Some);
                }
                "until" => {
                    self.tokens.get(false);
                    return self.parse_until_statement().map(Some);
                }
                "elif" => {
                    self.tokens.get(false);
                    return self.parse_else_if_statement().map(Some);
                }
                "endl" | "lend" => Some(LineBody::LoopEndStatement),
                "endw" | "wend" => Some(LineBody::WhileEndStatement),
                "repeat" => Some(LineBody::RepeatStatement),
                "proc" => Some(LineBody::ProcStatement),
                "endp" | "pend" => Some(LineBody::ProcEndStatement),
                "endm" | "mend" => Some(LineBody::MacroEndStatement),
                "else" => Some(LineBody::ElseStatement),
                "endif" => Some(LineBody::EndIfStatement),
                "break" => Some(LineBody::BreakStatement),
                "continue" => Some(LineBody::ContinueStatement),
                "ends" => Some(LineBody::StructEndStatement),
                "next" => Some(LineBody::NextStatement),
                _ => None,
            };
            if let Some(body) = body {
                self.tokens.get(false);
                return Ok(Some(body));
            }
            return self.parse_macro_or_struct_invocation().map(Some);
        }
        if point.start.kind == TokenKind::GoesTo {
            return self.parse_field_assignment();
        }
        Err(self.report_error(
            ErrorCode::UnrecognizedLine,
            &point.start,
            &[&point.start.text],
        ))
    }

    /// macroOrStructInvocation
    ///   : Identifier "(" macroArgument ("," macroArgument)* ")"
    ///   ;
    fn parse_macro_or_struct_invocation(&mut self) -> ParseResult<LineBody> {
        let identifier = self.get_identifier()?;
        self.expect_token(TokenKind::LPar, ErrorCode::LParExpected)?;
        let mut operands = Vec::new();
        if self.tokens.peek(false).kind != TokenKind::RPar {
            let operand = self.parse_operand()?.unwrap_or_else(Operand::none_arg);
            operands.push(operand);
            while self.skip_token(TokenKind::Comma).is_some() {
                let operand = self.parse_operand()?.unwrap_or_else(Operand::none_arg);
                operands.push(operand);
            }
        }
        self.expect_token(TokenKind::RPar, ErrorCode::RParExpected)?;
        Ok(LineBody::MacroOrStructInvocation {
            identifier,
            operands,
        })
    }

    /// fieldAssignment
    ///   : "->" byteEmPragma
    ///   ;
    fn parse_field_assignment(&mut self) -> ParseResult<Option<LineBody>> {
        self.tokens.get(false);
        let point = self.parse_point();
        match point.start.kind {
            TokenKind::DefbPragma
            | TokenKind::DefwPragma
            | TokenKind::DefcPragma
            | TokenKind::DefmPragma
            | TokenKind::DefnPragma
            | TokenKind::DefhPragma
            | TokenKind::DefsPragma
            | TokenKind::FillbPragma
            | TokenKind::FillwPragma
            | TokenKind::DefgPragma
            | TokenKind::DefgxPragma => {
                let Some(assignment) = self.parse_pragma(&point)? else {
                    return Ok(None);
                };
                Ok(Some(LineBody::FieldAssignment {
                    assignment: Box::new(assignment),
                }))
            }
            _ => Err(self.report_error_here(ErrorCode::ByteEmittingPragmaExpected, &[])),
        }
    }

    /// macroParam
    ///   : "{{" Identifier "}}"
    ///   ;
    ///
    /// The node is both returned and collected, so a line can later be
    /// checked for containing placeholders anywhere in its body.
    fn parse_macro_param(&mut self) -> ParseResult<LineBody> {
        let param = self.parse_macro_param_expression()?;
        Ok(LineBody::MacroParameter(param))
    }

    fn parse_macro_param_expression(&mut self) -> ParseResult<Expression> {
        let param_token = self.tokens.get(false);
        let identifier = self.get_identifier()?;
        self.expect_token(TokenKind::RDBrac, ErrorCode::RDBracExpected)?;
        let macro_param =
            self.create_expression(ExpressionKind::MacroParameter { identifier }, &param_token);
        self.macro_params_collected.push(macro_param.clone());
        Ok(macro_param)
    }

    // ------------------------------------------------------------------------
    // Shared helpers

    fn parse_point(&mut self) -> ParsePoint {
        let start = self.tokens.peek(false);
        let traits = start.kind.traits();
        ParsePoint { start, traits }
    }

    /// Records a grammar error at `token` and aborts the current line.
    fn report_error(&mut self, code: ErrorCode, token: &Token, args: &[&str]) -> ParserError {
        self.errors.push(ParseErrorMessage {
            code,
            text: code.format(args),
            line: token.location.start_line,
            column: token.location.start_column,
            position: token.location.start_position,
        });
        ParserError
    }

    /// Records a grammar error at the next unconsumed token.
    fn report_error_here(&mut self, code: ErrorCode, args: &[&str]) -> ParserError {
        let token = self.tokens.peek(false);
        self.report_error(code, &token, args)
    }

    /// Consumes the next token if it has the expected kind.
    fn expect_token(&mut self, kind: TokenKind, code: ErrorCode) -> ParseResult<()> {
        let next = self.tokens.peek(false);
        if next.kind == kind {
            self.tokens.get(false);
            return Ok(());
        }
        Err(self.report_error(code, &next, &[&next.text]))
    }

    /// Like [`Self::expect_token`], but the end of input also satisfies the
    /// expectation.
    fn expect_token_or_eof(&mut self, kind: TokenKind, code: ErrorCode) -> ParseResult<()> {
        let next = self.tokens.peek(false);
        if next.kind == kind || next.kind == TokenKind::Eof {
            self.tokens.get(false);
            return Ok(());
        }
        Err(self.report_error(code, &next, &[&next.text]))
    }

    /// Consumes and returns the next token if it has the given kind.
    fn skip_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.tokens.peek(false).kind == kind {
            return Some(self.tokens.get(false));
        }
        None
    }

    /// Consumes and returns the next token if its kind is one of `kinds`.
    fn skip_tokens(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        let next = self.tokens.peek(false);
        if kinds.contains(&next.kind) {
            self.tokens.get(false);
            return Some(next);
        }
        None
    }

    fn get_identifier(&mut self) -> ParseResult<IdentifierNode> {
        let id_token = self.tokens.get(false);
        if id_token.kind != TokenKind::Identifier {
            return Err(self.report_error_here(ErrorCode::IdentifierExpected, &[]));
        }
        Ok(identifier_node(&id_token))
    }

    /// A mandatory expression.
    fn get_expression(&mut self) -> ParseResult<Expression> {
        match self.parse_expr()? {
            Some(expr) => Ok(expr),
            None => Err(self.report_error_here(ErrorCode::ExpressionExpected, &[])),
        }
    }

    /// An expression that may be absent.
    fn get_optional_expression(&mut self) -> ParseResult<Option<Expression>> {
        self.parse_expr()
    }

    /// A mandatory comma followed by a mandatory expression.
    fn get_comma_expression(&mut self) -> ParseResult<Expression> {
        if self.skip_token(TokenKind::Comma).is_none() {
            return Err(self.report_error_here(ErrorCode::CommaExpected, &[]));
        }
        self.get_expression()
    }

    /// An optional comma-introduced expression; once the comma is there, the
    /// expression itself is mandatory.
    fn get_optional_comma_expression(&mut self) -> ParseResult<Option<Expression>> {
        if self.skip_token(TokenKind::Comma).is_none() {
            return Ok(None);
        }
        self.get_expression().map(Some)
    }

    fn get_expression_list(&mut self, at_least_one: bool) -> ParseResult<Vec<Expression>> {
        let mut expressions = Vec::new();
        if at_least_one {
            expressions.push(self.get_expression()?);
        } else if let Some(first) = self.get_optional_expression()? {
            expressions.push(first);
        }
        while self.skip_token(TokenKind::Comma).is_some() {
            expressions.push(self.get_expression()?);
        }
        Ok(expressions)
    }

    fn get_identifier_node_list(&mut self, needs_one: bool) -> ParseResult<Vec<IdentifierNode>> {
        let mut identifiers = Vec::new();
        if self.tokens.peek(false).kind == TokenKind::Identifier {
            identifiers.push(self.get_identifier()?);
            while self.skip_token(TokenKind::Comma).is_some() {
                identifiers.push(self.get_identifier()?);
            }
        } else if needs_one {
            return Err(self.report_error_here(ErrorCode::IdentifierExpected, &[]));
        }
        Ok(identifiers)
    }

    /// Builds an expression node spanning from `start_token` to the start of
    /// the next unconsumed token.
    fn create_expression(&mut self, kind: ExpressionKind, start_token: &Token) -> Expression {
        let end_token = self.tokens.peek(false);
        let start_position = start_token.location.start_position;
        let end_position = end_token.location.start_position;
        Expression {
            kind,
            line: start_token.location.start_line,
            start_position,
            start_column: start_token.location.start_column,
            end_position,
            end_column: end_token.location.start_column,
            source_text: self
                .tokens
                .get_source_span(start_position, end_position)
                .into(),
        }
    }
}

fn identifier_node(token: &Token) -> IdentifierNode {
    IdentifierNode {
        name: token.text.clone(),
        line: token.location.start_line,
        start_position: token.location.start_position,
        end_position: token.location.end_position,
        start_column: token.location.start_column,
        end_column: token.location.end_column,
    }
}

/// True if `token` can start a line body after a label.
fn starts_line_body(token: &Token) -> bool {
    let traits = token.kind.traits();
    traits.instruction
        || traits.pragma
        || traits.statement
        || token.kind == TokenKind::GoesTo
        || token.kind == TokenKind::LDBrac
}

/// Identifiers that act as contextual keywords and so cannot label a line on
/// their own. Only the all-lowercase and all-uppercase spellings count.
fn is_keyword_like_id(text: &str) -> bool {
    matches!(
        text,
        "continue"
            | "CONTINUE"
            | "break"
            | "BREAK"
            | "endm"
            | "ENDM"
            | "mend"
            | "MEND"
            | "endl"
            | "ENDL"
            | "lend"
            | "LEND"
            | "proc"
            | "PROC"
            | "endp"
            | "ENDP"
            | "pend"
            | "PEND"
            | "repeat"
            | "REPEAT"
            | "endw"
            | "ENDW"
            | "wend"
            | "WEND"
            | "ends"
            | "ENDS"
            | "else"
            | "ELSE"
            | "elif"
            | "ELIF"
            | "endif"
            | "ENDIF"
            | "while"
            | "WHILE"
            | "until"
            | "UNTIL"
            | "loop"
            | "LOOP"
            | "next"
            | "NEXT"
    )
}
