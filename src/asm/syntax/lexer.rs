//! The tokenizer.
//!
//! Tokens are produced by a multi-phase state machine ([`TokenStream::fetch`]):
//! every call starts in the `Start` phase, walks phase transitions character by
//! character, and returns exactly one token. The character that terminates a
//! token is not consumed; it is kept in a one-character prefetch slot
//! (together with its position and column) and becomes the first character of
//! the next token. A token's `end_position` therefore never covers the
//! prefetched terminator, and adjacent tokens tile the input exactly when
//! whitespace tokens are requested too.
//!
//! On top of `fetch` sits a lookahead buffer of at most [`MAX_LOOKAHEAD`]
//! tokens. `Eof` is synthesized on demand and never enters the buffer.
//! Whenever an end-of-line comment is fetched, its text is recorded in
//! `last_comment`, even when whitespace-class tokens are being filtered out;
//! the parser attaches it to the line node being completed.
//!
//! Word-like tokens resolve through the keyword table; anything lexically
//! anomalous becomes an `Unknown` token and is left for the grammar to
//! reject.

use std::collections::VecDeque;

use compact_str::CompactString;

use crate::input::InputStream;

use super::tokens::{SourceLocation, Token, TokenKind};

/// Upper bound of `ahead`; looking further is a caller bug.
pub const MAX_LOOKAHEAD: usize = 16;

#[derive(Debug)]
pub struct TokenStream {
    input: InputStream,
    buffer: VecDeque<Token>,
    prefetched: Option<char>,
    prefetched_position: Option<usize>,
    prefetched_column: Option<usize>,
    last_comment: Option<CompactString>,
}

/// States of the token-scanning machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    InWhiteSpace,
    InEolComment,
    InPotentialComment,
    InlineCommentBody,
    InlineCommentTail,
    PotentialNewLine,
    Colon,
    Assign,
    Equal,
    Minus,
    Exclamation,
    NotEqual,
    AngleLeft,
    AngleRight,
    LBracket,
    RBracket,
    Dot,
    IdTail,
    DirectiveOrHexLiteral,
    Dollar,
    NoneArgTail,
    DefgTail,
    ModuloOrBinary,
    BinLiteral,
    LitBodhr,
    LitBodhr2,
    LitOdhr,
    LitDhr,
    LitHr,
    LitHr2,
    LitH,
    LitHx1,
    LitHx2,
    LitRfrac,
    LitRfrac2,
    LitRexp,
    LitRexps,
    LitRexp2,
    Char,
    CharBackSlash,
    CharHexa1,
    CharHexa2,
    CharTail,
    String,
    StringBackSlash,
    StringHexa1,
    StringHexa2,
}

/// Token under construction during one `fetch` call.
struct Scan {
    text: String,
    kind: TokenKind,
    use_resolver: bool,
    start_position: usize,
    start_line: usize,
    start_column: usize,
    last_end_position: usize,
    last_end_column: usize,
}

impl TokenStream {
    pub fn new(source: &str) -> Self {
        Self {
            input: InputStream::new(source),
            buffer: VecDeque::new(),
            prefetched: None,
            prefetched_position: None,
            prefetched_column: None,
            last_comment: None,
        }
    }

    /// The source text between two character positions.
    pub fn get_source_span(&self, start: usize, end: usize) -> String {
        self.input.get_source_span(start, end)
    }

    /// The text of the last end-of-line comment fetched, if any.
    pub fn last_comment(&self) -> Option<&str> {
        self.last_comment.as_deref()
    }

    pub fn reset_comment(&mut self) {
        self.last_comment = None;
    }

    /// The next token, without advancing.
    pub fn peek(&mut self, ws: bool) -> Token {
        self.ahead(0, ws)
    }

    /// The token `n` positions ahead, without advancing.
    ///
    /// With `ws` set, whitespace-class tokens are visible; otherwise they
    /// are skipped (their comments still update `last_comment`).
    pub fn ahead(&mut self, n: usize, ws: bool) -> Token {
        assert!(
            n <= MAX_LOOKAHEAD,
            "cannot look ahead more than {MAX_LOOKAHEAD} tokens"
        );

        while self.buffer.len() <= n {
            let token = self.fetch_noting_comment();
            if token.kind == TokenKind::Eof {
                return token;
            }
            if ws || !token.kind.is_whitespace() {
                self.buffer.push_back(token);
            }
        }
        self.buffer[n].clone()
    }

    /// Consumes and returns the next token.
    pub fn get(&mut self, ws: bool) -> Token {
        if let Some(token) = self.buffer.pop_front() {
            return token;
        }
        loop {
            let token = self.fetch_noting_comment();
            if token.kind == TokenKind::Eof || ws || !token.kind.is_whitespace() {
                return token;
            }
        }
    }

    fn fetch_noting_comment(&mut self) -> Token {
        let token = self.fetch();
        if token.kind == TokenKind::EolComment {
            self.last_comment = Some(token.text.clone());
        }
        token
    }

    /// Peeks the next character, consuming it from the input into the
    /// prefetch slot.
    fn fetch_next_char(&mut self) -> Option<char> {
        if self.prefetched.is_none() {
            self.prefetched_position = Some(self.input.position());
            self.prefetched_column = Some(self.input.column());
            self.prefetched = self.input.get();
        }
        self.prefetched
    }

    /// Moves the prefetched character into the token text.
    fn append_char(&mut self, scan: &mut Scan) {
        if let Some(ch) = self.prefetched.take() {
            scan.text.push(ch);
        }
        self.prefetched_position = None;
        self.prefetched_column = None;
        scan.last_end_position = self.input.position();
        scan.last_end_column = self.input.column();
    }

    fn make_token(&self, scan: Scan) -> Token {
        let kind = if scan.use_resolver {
            TokenKind::resolve_keyword(&scan.text).unwrap_or_else(|| {
                let first = scan.text.chars().next();
                let last = scan.text.chars().next_back();
                if first.is_some_and(is_id_start) && last != Some('\'') {
                    TokenKind::Identifier
                } else {
                    TokenKind::Unknown
                }
            })
        } else {
            scan.kind
        };
        Token {
            kind,
            text: scan.text.into(),
            location: SourceLocation {
                start_position: scan.start_position,
                end_position: scan.last_end_position,
                start_line: scan.start_line,
                end_line: self.input.line(),
                start_column: scan.start_column,
                end_column: scan.last_end_column,
            },
        }
    }

    /// Appends the pending character, then finishes the token as `kind`.
    fn complete_token(&mut self, mut scan: Scan, kind: TokenKind) -> Token {
        self.append_char(&mut scan);
        scan.kind = kind;
        self.make_token(scan)
    }

    /// Scans the next token out of the input.
    fn fetch(&mut self) -> Token {
        let mut scan = Scan {
            text: String::new(),
            kind: TokenKind::Eof,
            use_resolver: false,
            start_position: self.prefetched_position.unwrap_or(self.input.position()),
            start_line: self.input.line(),
            start_column: self.prefetched_column.unwrap_or(self.input.column()),
            last_end_position: self.input.position(),
            last_end_column: self.input.column(),
        };
        let mut phase = Phase::Start;

        loop {
            let Some(ch) = self.fetch_next_char() else {
                return self.make_token(scan);
            };
            if scan.kind == TokenKind::Eof {
                scan.kind = TokenKind::Unknown;
            }

            match phase {
                Phase::Start => match ch {
                    ' ' | '\t' => {
                        phase = Phase::InWhiteSpace;
                        scan.kind = TokenKind::Ws;
                    }
                    ';' => {
                        phase = Phase::InEolComment;
                        scan.kind = TokenKind::EolComment;
                    }
                    '/' => {
                        phase = Phase::InPotentialComment;
                        scan.kind = TokenKind::Divide;
                    }
                    '\n' => return self.complete_token(scan, TokenKind::NewLine),
                    '\r' => {
                        phase = Phase::PotentialNewLine;
                        scan.kind = TokenKind::NewLine;
                    }
                    ':' => {
                        phase = Phase::Colon;
                        scan.kind = TokenKind::Colon;
                    }
                    ',' => return self.complete_token(scan, TokenKind::Comma),
                    '=' => {
                        phase = Phase::Assign;
                        scan.kind = TokenKind::Assign;
                    }
                    '(' => return self.complete_token(scan, TokenKind::LPar),
                    ')' => return self.complete_token(scan, TokenKind::RPar),
                    '[' => return self.complete_token(scan, TokenKind::LSBrac),
                    ']' => return self.complete_token(scan, TokenKind::RSBrac),
                    '?' => return self.complete_token(scan, TokenKind::QuestionMark),
                    '+' => return self.complete_token(scan, TokenKind::Plus),
                    '-' => {
                        phase = Phase::Minus;
                        scan.kind = TokenKind::Minus;
                    }
                    '|' => return self.complete_token(scan, TokenKind::VerticalBar),
                    '^' => return self.complete_token(scan, TokenKind::UpArrow),
                    '&' => return self.complete_token(scan, TokenKind::Ampersand),
                    '!' => {
                        phase = Phase::Exclamation;
                        scan.kind = TokenKind::Exclamation;
                    }
                    '<' => {
                        phase = Phase::AngleLeft;
                        scan.kind = TokenKind::LessThan;
                    }
                    '>' => {
                        phase = Phase::AngleRight;
                        scan.kind = TokenKind::GreaterThan;
                    }
                    '*' => return self.complete_token(scan, TokenKind::Multiplication),
                    '%' => {
                        phase = Phase::ModuloOrBinary;
                        scan.kind = TokenKind::Modulo;
                    }
                    '~' => return self.complete_token(scan, TokenKind::BinaryNot),
                    '{' => phase = Phase::LBracket,
                    '}' => phase = Phase::RBracket,
                    '.' => {
                        phase = Phase::Dot;
                        scan.kind = TokenKind::Dot;
                    }
                    '#' => phase = Phase::DirectiveOrHexLiteral,
                    '$' => {
                        phase = Phase::Dollar;
                        scan.kind = TokenKind::CurAddress;
                    }
                    '0' => {
                        phase = Phase::LitBodhr;
                        scan.kind = TokenKind::DecimalLiteral;
                    }
                    '1' => {
                        phase = Phase::LitBodhr2;
                        scan.kind = TokenKind::DecimalLiteral;
                    }
                    '2'..='7' => {
                        phase = Phase::LitOdhr;
                        scan.kind = TokenKind::DecimalLiteral;
                    }
                    '8' | '9' => {
                        phase = Phase::LitDhr;
                        scan.kind = TokenKind::DecimalLiteral;
                    }
                    '\'' => phase = Phase::Char,
                    '"' => phase = Phase::String,
                    _ => {
                        if is_id_start(ch) {
                            scan.use_resolver = true;
                            phase = Phase::IdTail;
                        }
                    }
                },

                Phase::InWhiteSpace => {
                    if ch != ' ' && ch != '\t' {
                        return self.make_token(scan);
                    }
                }

                Phase::InEolComment => {
                    if ch == '\r' || ch == '\n' {
                        return self.make_token(scan);
                    }
                }

                Phase::InPotentialComment => match ch {
                    '/' => {
                        phase = Phase::InEolComment;
                        scan.kind = TokenKind::EolComment;
                    }
                    '*' => {
                        phase = Phase::InlineCommentBody;
                        scan.kind = TokenKind::Unknown;
                    }
                    _ => return self.make_token(scan),
                },

                Phase::InlineCommentBody => {
                    if ch == '*' {
                        phase = Phase::InlineCommentTail;
                    } else if ch == '\r' || ch == '\n' {
                        // An inline comment cannot span lines.
                        return self.make_token(scan);
                    }
                }

                Phase::InlineCommentTail => {
                    if ch == '/' {
                        return self.complete_token(scan, TokenKind::InlineComment);
                    }
                }

                Phase::PotentialNewLine => {
                    if ch == '\n' {
                        return self.complete_token(scan, TokenKind::NewLine);
                    }
                    return self.make_token(scan);
                }

                Phase::Colon => {
                    if ch == ':' {
                        return self.complete_token(scan, TokenKind::DoubleColon);
                    } else if ch == '=' {
                        return self.complete_token(scan, TokenKind::VarPragma);
                    }
                    return self.make_token(scan);
                }

                Phase::Assign => {
                    if ch != '=' {
                        return self.make_token(scan);
                    }
                    phase = Phase::Equal;
                    scan.kind = TokenKind::Equal;
                }

                Phase::Equal => {
                    if ch == '=' {
                        return self.complete_token(scan, TokenKind::CiEqual);
                    }
                    return self.make_token(scan);
                }

                Phase::Minus => {
                    if ch == '>' {
                        return self.complete_token(scan, TokenKind::GoesTo);
                    }
                    return self.make_token(scan);
                }

                Phase::Exclamation => {
                    if ch != '=' {
                        return self.make_token(scan);
                    }
                    phase = Phase::NotEqual;
                    scan.kind = TokenKind::NotEqual;
                }

                Phase::NotEqual => {
                    if ch == '=' {
                        return self.complete_token(scan, TokenKind::CiNotEqual);
                    }
                    return self.make_token(scan);
                }

                Phase::AngleLeft => match ch {
                    '=' => return self.complete_token(scan, TokenKind::LessThanOrEqual),
                    '<' => return self.complete_token(scan, TokenKind::LeftShift),
                    '?' => return self.complete_token(scan, TokenKind::MinOp),
                    _ => return self.make_token(scan),
                },

                Phase::AngleRight => match ch {
                    '=' => return self.complete_token(scan, TokenKind::GreaterThanOrEqual),
                    '>' => return self.complete_token(scan, TokenKind::RightShift),
                    '?' => return self.complete_token(scan, TokenKind::MaxOp),
                    _ => return self.make_token(scan),
                },

                Phase::LBracket => {
                    if ch == '{' {
                        return self.complete_token(scan, TokenKind::LDBrac);
                    }
                    return self.make_token(scan);
                }

                Phase::RBracket => {
                    if ch == '}' {
                        return self.complete_token(scan, TokenKind::RDBrac);
                    }
                    return self.make_token(scan);
                }

                Phase::Dot => {
                    if is_id_start(ch) {
                        phase = Phase::IdTail;
                    } else if ch.is_ascii_digit() {
                        phase = Phase::LitRfrac2;
                        scan.kind = TokenKind::RealLiteral;
                    } else {
                        return self.make_token(scan);
                    }
                }

                Phase::IdTail => {
                    scan.use_resolver = true;
                    if ch == '\'' {
                        return self.complete_token(scan, TokenKind::Identifier);
                    } else if !is_id_continuation(ch) {
                        // DEFG consumes the rest of the line as its pattern.
                        if matches!(
                            scan.text.as_str(),
                            "defg" | "DEFG" | "dg" | "DG" | ".defg" | ".DEFG" | ".dg" | ".DG"
                        ) {
                            phase = Phase::DefgTail;
                            scan.use_resolver = false;
                            scan.kind = TokenKind::DefgPragma;
                        } else {
                            return self.make_token(scan);
                        }
                    }
                }

                Phase::DirectiveOrHexLiteral => {
                    if ch.is_ascii_alphanumeric() {
                        if self.input.peek().is_some() {
                            self.append_char(&mut scan);
                            continue;
                        }
                        self.append_char(&mut scan);
                    }
                    if scan.text.len() <= 5
                        && scan.text.chars().skip(1).all(|c| c.is_ascii_hexdigit())
                    {
                        scan.kind = TokenKind::HexadecimalLiteral;
                    } else {
                        scan.use_resolver = true;
                    }
                    return self.make_token(scan);
                }

                Phase::Dollar => {
                    if ch == '<' {
                        phase = Phase::NoneArgTail;
                    } else {
                        if ch.is_ascii_alphanumeric() {
                            if self.input.peek().is_some() {
                                self.append_char(&mut scan);
                                continue;
                            }
                            self.append_char(&mut scan);
                        }
                        if (2..=5).contains(&scan.text.len())
                            && scan.text.chars().skip(1).all(|c| c.is_ascii_hexdigit())
                        {
                            scan.kind = TokenKind::HexadecimalLiteral;
                        } else {
                            scan.use_resolver = true;
                        }
                        return self.make_token(scan);
                    }
                }

                Phase::NoneArgTail => {
                    if ch == '$' {
                        scan.use_resolver = false;
                        let kind = if scan.text == "$<none>" {
                            TokenKind::NoneArg
                        } else {
                            TokenKind::Unknown
                        };
                        return self.complete_token(scan, kind);
                    }
                }

                Phase::DefgTail => {
                    if ch == '\r' || ch == '\n' {
                        return self.make_token(scan);
                    }
                }

                Phase::ModuloOrBinary => {
                    if !is_binary_digit(ch) {
                        return self.make_token(scan);
                    }
                    phase = Phase::BinLiteral;
                    scan.kind = TokenKind::BinaryLiteral;
                }

                Phase::BinLiteral => {
                    if !is_binary_digit(ch) {
                        return self.make_token(scan);
                    }
                }

                Phase::LitBodhr => {
                    if ch == 'x' || ch == 'X' {
                        phase = Phase::LitHx1;
                        scan.kind = TokenKind::Unknown;
                    } else if is_hexa_suffix(ch) {
                        return self.complete_token(scan, TokenKind::HexadecimalLiteral);
                    } else if is_octal_suffix(ch) {
                        return self.complete_token(scan, TokenKind::OctalLiteral);
                    } else if is_binary_suffix(ch, self.input.peek()) {
                        return self.complete_token(scan, TokenKind::BinaryLiteral);
                    } else if ch == '.' {
                        phase = Phase::LitRfrac;
                        scan.kind = TokenKind::Unknown;
                    } else if ch == '0' || ch == '1' {
                        phase = Phase::LitBodhr2;
                    } else if ('2'..='7').contains(&ch) {
                        phase = Phase::LitOdhr;
                    } else if ch == '8' || ch == '9' {
                        phase = Phase::LitDhr;
                    } else if ch == 'e' || ch == 'E' {
                        phase = Phase::LitHr;
                        scan.kind = TokenKind::Unknown;
                    } else if ch.is_ascii_hexdigit() {
                        phase = Phase::LitH;
                        scan.kind = TokenKind::Unknown;
                    } else {
                        return self.make_token(scan);
                    }
                }

                Phase::LitHx1 => {
                    if ch.is_ascii_hexdigit() {
                        phase = Phase::LitHx2;
                        scan.kind = TokenKind::HexadecimalLiteral;
                    } else {
                        return self.make_token(scan);
                    }
                }

                Phase::LitHx2 => {
                    if !ch.is_ascii_hexdigit() {
                        return self.make_token(scan);
                    }
                }

                Phase::LitBodhr2 => {
                    if is_hexa_suffix(ch) {
                        return self.complete_token(scan, TokenKind::HexadecimalLiteral);
                    } else if is_octal_suffix(ch) {
                        return self.complete_token(scan, TokenKind::OctalLiteral);
                    } else if is_binary_suffix(ch, self.input.peek()) {
                        return self.complete_token(scan, TokenKind::BinaryLiteral);
                    } else if ch == '.' {
                        phase = Phase::LitRfrac;
                        scan.kind = TokenKind::Unknown;
                    } else if ch == '0' || ch == '1' {
                        // Still binary, octal, decimal, or hexadecimal.
                    } else if ('2'..='7').contains(&ch) {
                        phase = Phase::LitOdhr;
                    } else if ch == '8' || ch == '9' {
                        phase = Phase::LitDhr;
                    } else if ch == 'e' || ch == 'E' {
                        phase = Phase::LitHr;
                        scan.kind = TokenKind::Unknown;
                    } else if ch.is_ascii_hexdigit() {
                        phase = Phase::LitH;
                        scan.kind = TokenKind::Unknown;
                    } else {
                        return self.make_token(scan);
                    }
                }

                Phase::LitOdhr => {
                    if is_hexa_suffix(ch) {
                        return self.complete_token(scan, TokenKind::HexadecimalLiteral);
                    } else if is_octal_suffix(ch) {
                        return self.complete_token(scan, TokenKind::OctalLiteral);
                    } else if ch == '.' {
                        phase = Phase::LitRfrac;
                        scan.kind = TokenKind::Unknown;
                    } else if ('0'..='7').contains(&ch) {
                        // Still octal, decimal, or hexadecimal.
                    } else if ch == '8' || ch == '9' {
                        phase = Phase::LitDhr;
                    } else if ch == 'e' || ch == 'E' {
                        phase = Phase::LitHr;
                        scan.kind = TokenKind::Unknown;
                    } else if ch.is_ascii_hexdigit() {
                        phase = Phase::LitH;
                        scan.kind = TokenKind::Unknown;
                    } else {
                        return self.make_token(scan);
                    }
                }

                Phase::LitDhr => {
                    if is_hexa_suffix(ch) {
                        return self.complete_token(scan, TokenKind::HexadecimalLiteral);
                    } else if ch == '.' {
                        phase = Phase::LitRfrac;
                        scan.kind = TokenKind::Unknown;
                    } else if ch.is_ascii_digit() {
                        // Still decimal or hexadecimal.
                    } else if ch == 'e' || ch == 'E' {
                        phase = Phase::LitHr;
                        scan.kind = TokenKind::Unknown;
                    } else if ch.is_ascii_hexdigit() {
                        phase = Phase::LitH;
                        scan.kind = TokenKind::Unknown;
                    } else {
                        return self.make_token(scan);
                    }
                }

                Phase::LitHr => {
                    if is_hexa_suffix(ch) {
                        return self.complete_token(scan, TokenKind::HexadecimalLiteral);
                    } else if ch.is_ascii_digit() {
                        phase = Phase::LitHr2;
                        scan.kind = TokenKind::RealLiteral;
                    } else if ch.is_ascii_hexdigit() {
                        phase = Phase::LitH;
                        scan.kind = TokenKind::Unknown;
                    } else if ch == '+' || ch == '-' {
                        phase = Phase::LitRexps;
                        scan.kind = TokenKind::Unknown;
                    } else {
                        return self.make_token(scan);
                    }
                }

                Phase::LitHr2 => {
                    if is_hexa_suffix(ch) {
                        return self.complete_token(scan, TokenKind::HexadecimalLiteral);
                    } else if ch.is_ascii_digit() {
                        // Still an exponent or a hex digit run.
                    } else if ch.is_ascii_hexdigit() {
                        phase = Phase::LitH;
                        scan.kind = TokenKind::Unknown;
                    } else {
                        return self.make_token(scan);
                    }
                }

                Phase::LitH => {
                    if is_hexa_suffix(ch) {
                        return self.complete_token(scan, TokenKind::HexadecimalLiteral);
                    } else if !ch.is_ascii_hexdigit() {
                        return self.make_token(scan);
                    }
                }

                Phase::LitRfrac => {
                    if !ch.is_ascii_digit() {
                        return self.complete_token(scan, TokenKind::Unknown);
                    }
                    phase = Phase::LitRfrac2;
                    scan.kind = TokenKind::RealLiteral;
                }

                Phase::LitRfrac2 => {
                    if ch == 'e' || ch == 'E' {
                        phase = Phase::LitRexp;
                    } else if !ch.is_ascii_digit() {
                        return self.make_token(scan);
                    }
                }

                Phase::LitRexp => {
                    if ch == '+' || ch == '-' {
                        scan.kind = TokenKind::Unknown;
                        phase = Phase::LitRexps;
                    } else if ch.is_ascii_digit() {
                        phase = Phase::LitRexp2;
                    } else {
                        return self.make_token(scan);
                    }
                }

                Phase::LitRexps => {
                    if !ch.is_ascii_digit() {
                        return self.make_token(scan);
                    }
                    phase = Phase::LitRexp2;
                    scan.kind = TokenKind::RealLiteral;
                }

                Phase::LitRexp2 => {
                    if !ch.is_ascii_digit() {
                        return self.make_token(scan);
                    }
                }

                Phase::Char => {
                    if is_restricted_in_string(ch) {
                        return self.complete_token(scan, TokenKind::Unknown);
                    } else if ch == '\\' {
                        phase = Phase::CharBackSlash;
                        scan.kind = TokenKind::Unknown;
                    } else {
                        phase = Phase::CharTail;
                    }
                }

                Phase::CharTail => {
                    let kind = if ch == '\'' {
                        TokenKind::CharLiteral
                    } else {
                        TokenKind::Unknown
                    };
                    return self.complete_token(scan, kind);
                }

                Phase::CharBackSlash => {
                    phase = if ch == 'x' {
                        Phase::CharHexa1
                    } else {
                        Phase::CharTail
                    };
                }

                Phase::CharHexa1 => {
                    if ch.is_ascii_hexdigit() {
                        phase = Phase::CharHexa2;
                    } else {
                        return self.complete_token(scan, TokenKind::Unknown);
                    }
                }

                Phase::CharHexa2 => {
                    if ch.is_ascii_hexdigit() {
                        phase = Phase::CharTail;
                    } else {
                        return self.complete_token(scan, TokenKind::Unknown);
                    }
                }

                Phase::String => {
                    if ch == '"' {
                        return self.complete_token(scan, TokenKind::StringLiteral);
                    } else if is_restricted_in_string(ch) {
                        return self.complete_token(scan, TokenKind::Unknown);
                    } else if ch == '\\' {
                        phase = Phase::StringBackSlash;
                        scan.kind = TokenKind::Unknown;
                    }
                }

                Phase::StringBackSlash => {
                    phase = if ch == 'x' {
                        Phase::StringHexa1
                    } else {
                        Phase::String
                    };
                }

                Phase::StringHexa1 => {
                    if ch.is_ascii_hexdigit() {
                        phase = Phase::StringHexa2;
                    } else {
                        return self.complete_token(scan, TokenKind::Unknown);
                    }
                }

                Phase::StringHexa2 => {
                    if ch.is_ascii_hexdigit() {
                        phase = Phase::String;
                    } else {
                        return self.complete_token(scan, TokenKind::Unknown);
                    }
                }
            }

            self.append_char(&mut scan);
        }
    }
}

fn is_id_start(ch: char) -> bool {
    matches!(ch, '.' | '_' | '@' | '`') || ch.is_ascii_alphabetic()
}

fn is_id_continuation(ch: char) -> bool {
    matches!(ch, '_' | '@' | '!' | '?' | '#' | '.') || ch.is_ascii_alphanumeric()
}

fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1' | '_')
}

fn is_hexa_suffix(ch: char) -> bool {
    ch == 'h' || ch == 'H'
}

fn is_octal_suffix(ch: char) -> bool {
    matches!(ch, 'o' | 'O' | 'q' | 'Q')
}

/// `b`/`B` closes a binary literal only when it cannot be a hex digit run.
fn is_binary_suffix(ch: char, next: Option<char>) -> bool {
    (ch == 'b' || ch == 'B')
        && next.map_or(true, |ra| !ra.is_ascii_hexdigit() && ra != 'h' && ra != 'H')
}

fn is_restricted_in_string(ch: char) -> bool {
    matches!(ch, '\r' | '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str, ws: bool) -> Vec<TokenKind> {
        let mut stream = TokenStream::new(source);
        let mut result = vec![];
        loop {
            let token = stream.get(ws);
            if token.kind == TokenKind::Eof {
                return result;
            }
            result.push(token.kind);
        }
    }

    fn single(source: &str) -> Token {
        let mut stream = TokenStream::new(source);
        stream.get(false)
    }

    #[test]
    fn tokens_tile_the_input_with_whitespace() {
        let source = "ld a,b ; set up\n";
        let mut stream = TokenStream::new(source);
        let mut expected_start = 0;
        loop {
            let token = stream.get(true);
            if token.kind == TokenKind::Eof {
                break;
            }
            assert_eq!(token.location.start_position, expected_start, "{token:?}");
            assert_eq!(
                stream.get_source_span(
                    token.location.start_position,
                    token.location.end_position
                ),
                token.text
            );
            expected_start = token.location.end_position;
        }
        assert_eq!(expected_start, source.len());
    }

    #[test]
    fn terminator_stays_out_of_the_token() {
        let mut stream = TokenStream::new("nop ld");
        let nop = stream.get(false);
        assert_eq!(nop.kind, TokenKind::Nop);
        assert_eq!(nop.location.start_position, 0);
        assert_eq!(nop.location.end_position, 3);
        let ld = stream.get(false);
        assert_eq!(ld.kind, TokenKind::Ld);
        assert_eq!(ld.location.start_position, 4);
        assert_eq!(ld.location.end_position, 6);
    }

    #[test]
    fn keywords_are_dual_case_only() {
        assert_eq!(single("halt").kind, TokenKind::Halt);
        assert_eq!(single("HALT").kind, TokenKind::Halt);
        assert_eq!(single("Halt").kind, TokenKind::Identifier);
    }

    #[test]
    fn operators() {
        assert_eq!(
            kinds(":: := = == === ! != !== < <= << <? > >= >> >? -> {{ }}", false),
            vec![
                TokenKind::DoubleColon,
                TokenKind::VarPragma,
                TokenKind::Assign,
                TokenKind::Equal,
                TokenKind::CiEqual,
                TokenKind::Exclamation,
                TokenKind::NotEqual,
                TokenKind::CiNotEqual,
                TokenKind::LessThan,
                TokenKind::LessThanOrEqual,
                TokenKind::LeftShift,
                TokenKind::MinOp,
                TokenKind::GreaterThan,
                TokenKind::GreaterThanOrEqual,
                TokenKind::RightShift,
                TokenKind::MaxOp,
                TokenKind::GoesTo,
                TokenKind::LDBrac,
                TokenKind::RDBrac,
            ]
        );
    }

    #[test]
    fn numeric_literals() {
        assert_eq!(single("%1111_0000").kind, TokenKind::BinaryLiteral);
        assert_eq!(single("1010b").kind, TokenKind::BinaryLiteral);
        assert_eq!(single("765432q").kind, TokenKind::OctalLiteral);
        assert_eq!(single("12345").kind, TokenKind::DecimalLiteral);
        assert_eq!(single("12ach").kind, TokenKind::HexadecimalLiteral);
        assert_eq!(single("0x12ac").kind, TokenKind::HexadecimalLiteral);
        assert_eq!(single("#ae").kind, TokenKind::HexadecimalLiteral);
        assert_eq!(single("$ae").kind, TokenKind::HexadecimalLiteral);
        assert_eq!(single("3.14").kind, TokenKind::RealLiteral);
        assert_eq!(single(".25").kind, TokenKind::RealLiteral);
        assert_eq!(single("1e3").kind, TokenKind::RealLiteral);
        assert_eq!(single(".1e+0").kind, TokenKind::RealLiteral);
        assert_eq!(single("1e+").kind, TokenKind::Unknown);
    }

    #[test]
    fn binary_suffix_needs_a_non_hex_follower() {
        // "0b1" keeps scanning as a hex digit run, not as "0" + binary suffix.
        let mut stream = TokenStream::new("10b 10bc");
        assert_eq!(stream.get(false).kind, TokenKind::BinaryLiteral);
        let second = stream.get(false);
        assert_eq!(second.kind, TokenKind::Unknown);
        assert_eq!(second.text, "10bc");
    }

    #[test]
    fn dollar_and_hash_forms() {
        assert_eq!(single("$").kind, TokenKind::CurAddress);
        assert_eq!(single("$cnt").kind, TokenKind::CurCnt);
        assert_eq!(single("$CNT").kind, TokenKind::CurCnt);
        assert_eq!(single("$<none>$").kind, TokenKind::NoneArg);
        assert_eq!(single("#ifdef").kind, TokenKind::IfDefDir);
    }

    #[test]
    fn af_prime_and_trailing_quote() {
        let mut stream = TokenStream::new("ex af,af'");
        assert_eq!(stream.get(false).kind, TokenKind::Ex);
        assert_eq!(stream.get(false).kind, TokenKind::AF);
        assert_eq!(stream.get(false).kind, TokenKind::Comma);
        let af_alt = stream.get(false);
        assert_eq!(af_alt.kind, TokenKind::AF_);
        assert_eq!(af_alt.text, "af'");

        assert_eq!(single("foo'").kind, TokenKind::Unknown);
    }

    #[test]
    fn char_and_string_literals() {
        assert_eq!(single("'a'").kind, TokenKind::CharLiteral);
        assert_eq!(single(r"'\x40'").kind, TokenKind::CharLiteral);
        assert_eq!(single("'ab'").kind, TokenKind::Unknown);
        let s = single(r#""hi \i there""#);
        assert_eq!(s.kind, TokenKind::StringLiteral);
        assert_eq!(s.text, r#""hi \i there""#);
        assert_eq!(single("\"broken\nstring\"").kind, TokenKind::Unknown);
    }

    #[test]
    fn defg_takes_the_rest_of_the_line() {
        let mut stream = TokenStream::new("defg ..OO..OO\nnop");
        let defg = stream.get(false);
        assert_eq!(defg.kind, TokenKind::DefgPragma);
        assert_eq!(defg.text, "defg ..OO..OO");
        assert_eq!(stream.get(false).kind, TokenKind::NewLine);
        assert_eq!(stream.get(false).kind, TokenKind::Nop);
    }

    #[test]
    fn comments() {
        assert_eq!(
            kinds("1 // trailing\n", false),
            vec![TokenKind::DecimalLiteral, TokenKind::NewLine]
        );
        assert_eq!(
            kinds("1 /* inline */ 2", false),
            vec![TokenKind::DecimalLiteral, TokenKind::DecimalLiteral]
        );
        let mut stream = TokenStream::new("nop ; the comment\n");
        assert_eq!(stream.get(false).kind, TokenKind::Nop);
        assert_eq!(stream.get(false).kind, TokenKind::NewLine);
        assert_eq!(stream.last_comment(), Some("; the comment"));
        stream.reset_comment();
        assert_eq!(stream.last_comment(), None);
    }

    #[test]
    fn lookahead_is_stable() {
        let mut stream = TokenStream::new("ld a , b");
        assert_eq!(stream.ahead(0, false).kind, TokenKind::Ld);
        assert_eq!(stream.ahead(3, false).kind, TokenKind::B);
        assert_eq!(stream.get(false).kind, TokenKind::Ld);
        assert_eq!(stream.peek(false).kind, TokenKind::A);
    }

    #[test]
    fn eof_is_synthesized() {
        let mut stream = TokenStream::new("nop");
        assert_eq!(stream.ahead(5, false).kind, TokenKind::Eof);
        assert_eq!(stream.get(false).kind, TokenKind::Nop);
        assert_eq!(stream.get(false).kind, TokenKind::Eof);
        assert_eq!(stream.get(false).kind, TokenKind::Eof);
    }

    #[test]
    fn crlf_is_one_newline() {
        assert_eq!(
            kinds("nop\r\nnop", false),
            vec![TokenKind::Nop, TokenKind::NewLine, TokenKind::Nop]
        );
    }
}
