//! Numeric literal lexing: base prefixes, digit separators, suffixes.
//!
//! The lexer only recognizes the literal's *shape* — where it starts, where
//! it ends, and whether it's an `IntLit` or a `FloatLit`. Decoding the digits
//! into a value (base detection, suffix-driven width, overflow checking) is
//! `spec.md` §4.3 territory and happens downstream, against the token span.

use crate::token::{Token, TokenKind};
use crate::unicode::is_digit_in_base;
use crate::Lexer;

const INT_SUFFIXES: &[&str] = &["s8", "s16", "s32", "s64", "u8", "u16", "u32", "u64"];
const FLOAT_SUFFIXES: &[&str] = &["f16", "f32", "f64"];

impl<'a> Lexer<'a> {
    pub fn lex_number(&mut self) -> Token {
        let base = self.detect_base();
        self.consume_digit_run(base);

        let mut is_float = false;
        if base == 10
            && self.cursor.current_char() == '.'
            && self.cursor.peek_char(1).is_ascii_digit()
        {
            is_float = true;
            self.cursor.advance();
            self.consume_digit_run(10);
        }

        if is_float {
            self.consume_suffix(FLOAT_SUFFIXES);
            self.emit(TokenKind::FloatLit)
        } else {
            self.consume_suffix(INT_SUFFIXES);
            self.emit(TokenKind::IntLit)
        }
    }

    /// Peeks a `0x`/`0X`/`0o`/`0O`/`0b`/`0B` prefix and consumes it,
    /// returning the detected base. Bare `0` and any other leading digit
    /// default to base 10.
    fn detect_base(&mut self) -> u32 {
        if self.cursor.current_char() != '0' {
            return 10;
        }
        let base = match self.cursor.peek_char(1) {
            'x' | 'X' => 16,
            'o' | 'O' => 8,
            'b' | 'B' => 2,
            _ => 10,
        };
        if base != 10 {
            self.cursor.advance();
            self.cursor.advance();
        }
        base
    }

    fn consume_digit_run(&mut self, base: u32) {
        loop {
            let c = self.cursor.current_char();
            if is_digit_in_base(c, base) || c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }
    }

    fn consume_suffix(&mut self, suffixes: &[&str]) {
        let rest = self.cursor.remaining();
        for suffix in suffixes {
            if rest.starts_with(suffix) {
                self.cursor.advance_bytes(suffix.len());
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talus_util::Handler;

    fn lex_num(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.next_token()
    }

    #[test]
    fn bare_zero_is_decimal() {
        let token = lex_num("0");
        assert_eq!(token.kind, TokenKind::IntLit);
        assert_eq!(token.span.len(), 1);
    }

    #[test]
    fn hex_prefix() {
        let token = lex_num("0xFF_u8");
        assert_eq!(token.kind, TokenKind::IntLit);
        assert_eq!(token.span.len(), "0xFF_u8".len());
    }

    #[test]
    fn float_with_suffix() {
        let token = lex_num("3.14f32");
        assert_eq!(token.kind, TokenKind::FloatLit);
        assert_eq!(token.span.len(), "3.14f32".len());
    }

    #[test]
    fn integer_with_separators() {
        let token = lex_num("1_000_000s64");
        assert_eq!(token.kind, TokenKind::IntLit);
        assert_eq!(token.span.len(), "1_000_000s64".len());
    }

    #[test]
    fn dot_not_followed_by_digit_is_not_consumed() {
        let token = lex_num("5.foo");
        assert_eq!(token.kind, TokenKind::IntLit);
        assert_eq!(token.span.len(), 1);
    }
}
