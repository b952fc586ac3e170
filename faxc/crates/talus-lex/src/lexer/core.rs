//! Core lexer: condition machine and token dispatch.
//!
//! `Lexer` holds a persistent [`Condition`] alongside the byte cursor.
//! `STRING`, `SINGLE_LINE_COMMENT` and `MULTI_LINE_COMMENT` are always fully
//! resolved within the `next_token()` call that enters them — no token
//! boundary ever falls mid-string or mid-comment, so the field never
//! actually holds those variants once `next_token()` returns. `USE_LIB` and
//! `UNIT_PATH` are different: they genuinely persist across calls,
//! interleaved with ordinary `WHITESPACE`/`NEWLINE` tokens, which is why
//! `condition` lives on the struct rather than being call-local state.

use talus_util::{Handler, Level, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// The active sublexer. See `spec.md` §4.1's condition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Code,
    String,
    SingleLineComment,
    MultiLineComment,
    UseLib,
    UnitPath,
}

pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
    condition: Condition,
    pub(crate) token_start: usize,
    token_start_line: u32,
    token_start_column: u32,
    /// Set when a `use` keyword token was just emitted; consumed by the
    /// whitespace/newline token that follows it, which triggers the
    /// `CODE` → `USE_LIB` transition.
    pending_use_lib: bool,
    /// Same shape as `pending_use_lib` but for `import ... UNIT_PATH`.
    pending_import_path: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            condition: Condition::Code,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
            pending_use_lib: false,
            pending_import_path: false,
        }
    }

    /// Current sublexer condition. Exposed mainly for tests.
    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub(crate) fn set_condition(&mut self, condition: Condition) {
        self.condition = condition;
    }

    /// Returns the next token, advancing the lexer. Idempotently returns
    /// `TokenKind::End` once the source is exhausted.
    pub fn next_token(&mut self) -> Token {
        match self.condition {
            Condition::Code => self.next_token_code(),
            Condition::UseLib => self.next_token_use_lib(),
            Condition::UnitPath => self.next_token_unit_path(),
            Condition::String | Condition::SingleLineComment | Condition::MultiLineComment => {
                // Never observed across a next_token() boundary; defensive only.
                self.condition = Condition::Code;
                self.next_token_code()
            }
        }
    }

    fn next_token_code(&mut self) -> Token {
        loop {
            self.begin_token();

            if self.cursor.is_at_end() {
                return self.emit(TokenKind::End);
            }

            let c = self.cursor.current_char();
            match c {
                ' ' | '\t' => return self.lex_whitespace(),
                '\r' | '\n' => return self.lex_newline(),
                '"' => return self.lex_string(),
                '\'' => return self.lex_char(),
                '/' if self.cursor.peek_char(1) == '/' => match self.lex_single_line_comment() {
                    Some(newline) => return newline,
                    None => continue,
                },
                '/' if self.cursor.peek_char(1) == '*' => {
                    self.lex_multi_line_comment();
                    continue;
                }
                c if crate::unicode::is_ascii_ident_start(c) => return self.lex_identifier(),
                c if c.is_ascii_digit() => return self.lex_number(),
                _ => match self.lex_operator_or_structural() {
                    Some(tok) => return tok,
                    None => continue,
                },
            }
        }
    }

    fn next_token_use_lib(&mut self) -> Token {
        self.begin_token();
        if self.cursor.is_at_end() {
            self.condition = Condition::Code;
            return self.emit(TokenKind::End);
        }
        while crate::unicode::is_ascii_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let token = self.emit(TokenKind::UseLib);
        self.condition =
            if self.cursor.current_char() == '/' { Condition::UnitPath } else { Condition::Code };
        token
    }

    fn next_token_unit_path(&mut self) -> Token {
        self.begin_token();
        if self.cursor.is_at_end() {
            self.condition = Condition::Code;
            return self.emit(TokenKind::End);
        }
        loop {
            let c = self.cursor.current_char();
            if c.is_ascii_alphanumeric() || c == '_' || c == '/' {
                self.cursor.advance();
            } else {
                break;
            }
        }
        self.condition = Condition::Code;
        self.emit(TokenKind::UnitPath)
    }

    fn lex_whitespace(&mut self) -> Token {
        while matches!(self.cursor.current_char(), ' ' | '\t') {
            self.cursor.advance();
        }
        self.settle_pending_transition();
        self.emit(TokenKind::Whitespace)
    }

    fn lex_newline(&mut self) -> Token {
        if self.cursor.current_char() == '\r' && self.cursor.peek_char(1) == '\n' {
            self.cursor.advance();
        }
        self.cursor.advance();
        self.settle_pending_transition();
        self.emit(TokenKind::Newline)
    }

    fn settle_pending_transition(&mut self) {
        if self.pending_use_lib {
            self.pending_use_lib = false;
            self.condition = Condition::UseLib;
        } else if self.pending_import_path {
            self.pending_import_path = false;
            self.condition = Condition::UnitPath;
        }
    }

    pub(crate) fn note_keyword(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::KwUse => self.pending_use_lib = true,
            TokenKind::KwImport => self.pending_import_path = true,
            _ => {}
        }
    }

    fn begin_token(&mut self) {
        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();
    }

    pub(crate) fn emit(&mut self, kind: TokenKind) -> Token {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        Token::new(kind, self.token_start_line, self.token_start_column, span)
    }

    pub(crate) fn report_error(&mut self, message: impl Into<String>) {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        self.handler.report_in_source(self.cursor.source(), span, Level::Error, message);
    }

    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::End {
            None
        } else {
            Some(token)
        }
    }
}
