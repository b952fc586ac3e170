//! Comment scanning for the `SINGLE_LINE_COMMENT` and `MULTI_LINE_COMMENT`
//! conditions.
//!
//! Neither condition ever contributes a token of its own: a single-line
//! comment's contents are discarded and its terminating newline is emitted
//! as an ordinary `NEWLINE` token (per `spec.md` §4.1's transition table); a
//! block comment's contents are discarded entirely and lexing falls through
//! to whatever follows `*/`. There is no nested-comment tracking — the
//! grammar's condition table models a single `*/`-terminated level.

use crate::lexer::core::Condition;
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Consumes `// ...` up to (not including) a terminating newline, then
    /// consumes that newline and returns it as a `NEWLINE` token. Returns
    /// `None` if the comment runs to end of input with no newline, in which
    /// case the caller re-dispatches and immediately sees `End`.
    pub fn lex_single_line_comment(&mut self) -> Option<Token> {
        self.set_condition(Condition::SingleLineComment);
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }

        let result = if self.cursor.is_at_end() {
            None
        } else {
            self.token_start = self.cursor.position();
            let line = self.cursor.line();
            let column = self.cursor.column();
            self.cursor.advance();
            Some(Token::new(
                TokenKind::Newline,
                line,
                column,
                talus_util::Span::new(self.token_start, self.cursor.position(), line, column),
            ))
        };

        self.set_condition(Condition::Code);
        result
    }

    /// Consumes `/* ... */`. Reports `multi_line_comm_end_error` if input
    /// ends before a closing `*/` is found.
    pub fn lex_multi_line_comment(&mut self) {
        self.set_condition(Condition::MultiLineComment);
        self.cursor.advance();
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated block comment");
                break;
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                break;
            }
            self.cursor.advance();
        }

        self.set_condition(Condition::Code);
    }
}
