//! Operator and structural token lexing, longest-match first.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Recognizes one symbolic operator or structural token starting at the
    /// cursor. Returns `None` after reporting `unknown_error` and advancing
    /// past the offending byte, letting the caller re-enter `CODE` and try
    /// again at the next position.
    pub fn lex_operator_or_structural(&mut self) -> Option<Token> {
        let c = self.cursor.current_char();
        let kind = match c {
            '+' => self.two_char('=', TokenKind::PlusEq, TokenKind::Plus),
            '-' => {
                if self.cursor.peek_char(1) == '>' {
                    self.cursor.advance();
                    self.cursor.advance();
                    TokenKind::Arrow
                } else {
                    self.two_char('=', TokenKind::MinusEq, TokenKind::Minus)
                }
            }
            '*' => self.two_char('=', TokenKind::StarEq, TokenKind::Star),
            '/' => self.two_char('=', TokenKind::SlashEq, TokenKind::Slash),
            '%' => self.two_char('=', TokenKind::PercentEq, TokenKind::Percent),
            '!' => self.two_char('=', TokenKind::BangEq, TokenKind::Bang),
            '=' => self.two_char('=', TokenKind::EqEq, TokenKind::Eq),
            '<' => self.two_char('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => self.two_char('=', TokenKind::GtEq, TokenKind::Gt),
            '|' => {
                if self.cursor.peek_char(1) == '|' {
                    self.cursor.advance();
                    self.cursor.advance();
                    TokenKind::PipePipe
                } else {
                    self.two_char('=', TokenKind::PipeEq, TokenKind::Pipe)
                }
            }
            '&' => {
                if self.cursor.peek_char(1) == '&' {
                    self.cursor.advance();
                    self.cursor.advance();
                    TokenKind::AmpAmp
                } else {
                    self.two_char('=', TokenKind::AmpEq, TokenKind::Amp)
                }
            }
            '^' => self.two_char('=', TokenKind::CaretEq, TokenKind::Caret),
            '~' => {
                self.cursor.advance();
                TokenKind::Tilde
            }
            ':' => {
                if self.cursor.peek_char(1) == ':' {
                    self.cursor.advance();
                    self.cursor.advance();
                    TokenKind::ColonColon
                } else {
                    self.two_char('=', TokenKind::ColonEq, TokenKind::Colon)
                }
            }
            '.' => {
                if self.cursor.peek_char(1) == '.' && self.cursor.peek_char(2) == '.' {
                    self.cursor.advance();
                    self.cursor.advance();
                    self.cursor.advance();
                    TokenKind::Ellipsis
                } else {
                    self.cursor.advance();
                    TokenKind::Dot
                }
            }
            ';' => self.one_char(TokenKind::Semicolon),
            ',' => self.one_char(TokenKind::Comma),
            '(' => self.one_char(TokenKind::LParen),
            ')' => self.one_char(TokenKind::RParen),
            '[' => self.one_char(TokenKind::LBracket),
            ']' => self.one_char(TokenKind::RBracket),
            '{' => self.one_char(TokenKind::LBrace),
            '}' => self.one_char(TokenKind::RBrace),
            other => {
                self.cursor.advance();
                self.report_error(format!("unexpected character '{}'", other));
                return None;
            }
        };
        Some(self.emit(kind))
    }

    fn one_char(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    fn two_char(&mut self, second: char, if_present: TokenKind, otherwise: TokenKind) -> TokenKind {
        self.cursor.advance();
        if self.cursor.current_char() == second {
            self.cursor.advance();
            if_present
        } else {
            otherwise
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talus_util::Handler;

    fn lex_op(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.next_token()
    }

    #[test]
    fn single_char_operators() {
        assert_eq!(lex_op("+").kind, TokenKind::Plus);
        assert_eq!(lex_op("~").kind, TokenKind::Tilde);
        assert_eq!(lex_op(";").kind, TokenKind::Semicolon);
    }

    #[test]
    fn two_char_operators_take_priority() {
        assert_eq!(lex_op("==").kind, TokenKind::EqEq);
        assert_eq!(lex_op("!=").kind, TokenKind::BangEq);
        assert_eq!(lex_op("&&").kind, TokenKind::AmpAmp);
        assert_eq!(lex_op("||").kind, TokenKind::PipePipe);
        assert_eq!(lex_op("->").kind, TokenKind::Arrow);
        assert_eq!(lex_op("::").kind, TokenKind::ColonColon);
        assert_eq!(lex_op(":=").kind, TokenKind::ColonEq);
    }

    #[test]
    fn ellipsis_needs_three_dots() {
        assert_eq!(lex_op("...").kind, TokenKind::Ellipsis);
        assert_eq!(lex_op("..").kind, TokenKind::Dot);
    }

    #[test]
    fn unknown_character_reports_error_and_skips() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("`+", &handler);
        let token = lexer.next_token();
        assert!(handler.has_errors());
        assert_eq!(token.kind, TokenKind::Plus);
    }
}
