//! String and character literal lexing, and escape recognition.
//!
//! Escape decoding into an actual value is a parser/semantic concern; the
//! lexer only needs to recognize escape *shapes* well enough to know how
//! many source characters they consume, so it doesn't mistake an escaped
//! quote for the literal's terminator.

use crate::lexer::core::Condition;
use crate::token::{Token, TokenKind};
use crate::unicode::is_digit_in_base;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `"..."` — opening quote already current when called.
    pub fn lex_string(&mut self) -> Token {
        self.set_condition(Condition::String);
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated string literal");
                break;
            }
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\n' => {
                    self.report_error("unescaped newline in string literal");
                    break;
                }
                '\\' => {
                    self.cursor.advance();
                    if self.cursor.is_at_end() {
                        self.report_error("unterminated string literal");
                        break;
                    }
                    self.scan_escape();
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }

        self.set_condition(Condition::Code);
        self.emit(TokenKind::StringLit)
    }

    /// `'...'` — same scanning rule as a string; whether the body holds
    /// exactly one logical character is a semantic check made while
    /// building the AST literal node, not while lexing.
    pub fn lex_char(&mut self) -> Token {
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated char literal");
                break;
            }
            match self.cursor.current_char() {
                '\'' => {
                    self.cursor.advance();
                    break;
                }
                '\n' => {
                    self.report_error("unescaped newline in char literal");
                    break;
                }
                '\\' => {
                    self.cursor.advance();
                    if self.cursor.is_at_end() {
                        self.report_error("unterminated char literal");
                        break;
                    }
                    self.scan_escape();
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }

        self.emit(TokenKind::CharLit)
    }

    /// Consumes the body of an escape sequence (the cursor sits just past
    /// the backslash). Recognized shapes: the single-char escapes, `\xHH`
    /// (exactly two hex digits) and `\NNN`/`\NN`/`\N` (1-3 octal digits, a
    /// leading `0` is claimed by the `\0` single-char escape instead).
    /// Anything else is an unrecognized escape: exactly the one character
    /// following the backslash is consumed, verbatim.
    fn scan_escape(&mut self) {
        match self.cursor.current_char() {
            '\'' | '"' | '0' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' => {
                self.cursor.advance();
            }
            'x' => {
                self.cursor.advance();
                for _ in 0..2 {
                    if is_digit_in_base(self.cursor.current_char(), 16) {
                        self.cursor.advance();
                    } else {
                        break;
                    }
                }
            }
            '1'..='7' => {
                let mut consumed = 0;
                while consumed < 3 && is_digit_in_base(self.cursor.current_char(), 8) {
                    self.cursor.advance();
                    consumed += 1;
                }
            }
            _ => {
                if !self.cursor.is_at_end() {
                    self.cursor.advance();
                }
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use talus_util::Handler;

    fn lex_one(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.next_token()
    }

    #[test]
    fn simple_string() {
        let token = lex_one(r#""hello""#);
        assert_eq!(token.kind, TokenKind::StringLit);
        assert_eq!(token.span.len(), r#""hello""#.len());
    }

    #[test]
    fn string_with_escaped_quote_does_not_terminate_early() {
        let token = lex_one(r#""a\"b""#);
        assert_eq!(token.kind, TokenKind::StringLit);
        assert_eq!(token.span.len(), r#""a\"b""#.len());
    }

    #[test]
    fn string_with_hex_escape() {
        let token = lex_one(r#""\x41""#);
        assert_eq!(token.span.len(), r#""\x41""#.len());
    }

    #[test]
    fn string_with_octal_escape() {
        let token = lex_one(r#""\101""#);
        assert_eq!(token.span.len(), r#""\101""#.len());
    }

    #[test]
    fn unrecognized_escape_consumes_exactly_one_char() {
        let token = lex_one(r#""\q""#);
        assert_eq!(token.span.len(), r#""\q""#.len());
    }

    #[test]
    fn unterminated_string_reports_error() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("\"abc", &handler);
        lexer.next_token();
        assert!(handler.has_errors());
    }

    #[test]
    fn newline_inside_string_reports_error() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("\"abc\ndef\"", &handler);
        lexer.next_token();
        assert!(handler.has_errors());
    }

    #[test]
    fn char_literal() {
        let token = lex_one("'a'");
        assert_eq!(token.kind, TokenKind::CharLit);
        assert_eq!(token.span.len(), 3);
    }
}
