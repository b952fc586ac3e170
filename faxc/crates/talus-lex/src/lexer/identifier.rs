//! Identifier and keyword lexing.

use crate::token::{keyword_from_ident, Token, TokenKind};
use crate::unicode::is_ascii_ident_continue;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier, overridden to a keyword or literal-word token
    /// kind (`true`/`false`/`null`, `shl`/`shr`/`sar`/`sal`, and the rest of
    /// the reserved word list) when the text matches one.
    pub fn lex_identifier(&mut self) -> Token {
        while is_ascii_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(self.token_start);
        let kind = keyword_from_ident(text).unwrap_or(TokenKind::Ident);
        self.note_keyword(kind);
        self.emit(kind)
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
    fn plain_identifier() {
        assert_eq!(lex_one("foo_bar1").kind, TokenKind::Ident);
    }

    #[test]
    fn keyword_struct() {
        assert_eq!(lex_one("struct").kind, TokenKind::KwStruct);
    }

    #[test]
    fn keyword_shift_word() {
        assert_eq!(lex_one("shl").kind, TokenKind::Shl);
    }

    #[test]
    fn literal_words() {
        assert_eq!(lex_one("true").kind, TokenKind::BoolLit);
        assert_eq!(lex_one("false").kind, TokenKind::BoolLit);
        assert_eq!(lex_one("null").kind, TokenKind::NullLit);
    }

    #[test]
    fn use_keyword_then_whitespace_enters_use_lib_condition() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("use core", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::KwUse);
        assert_eq!(lexer.next_token().kind, TokenKind::Whitespace);
        assert_eq!(lexer.condition(), crate::Condition::UseLib);
        assert_eq!(lexer.next_token().kind, TokenKind::UseLib);
        assert_eq!(lexer.condition(), crate::Condition::Code);
    }
}
