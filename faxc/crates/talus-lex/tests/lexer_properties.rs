//! Lexer round-trip and whitespace-law properties.
//!
//! These are the "Laws" and "Quantified invariants" in `spec.md` §8 that
//! apply at the lexer level: whitespace idempotence, and that concatenating
//! the source text every emitted token's span covers reconstructs the input.

use proptest::prelude::*;
use talus_util::Handler;

use talus_lex::{Lexer, TokenKind};

fn lex_all(source: &str) -> Vec<(TokenKind, String)> {
    let handler = Handler::new();
    let mut lexer = Lexer::new(source, &handler);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::End {
            break;
        }
        let text = source[token.span.start..token.span.end].to_string();
        tokens.push((token.kind, text));
    }
    tokens
}

proptest! {
    #[test]
    fn relexing_concatenated_token_text_reproduces_the_input(
        source in "[a-zA-Z0-9_ \n]{0,64}"
    ) {
        let tokens = lex_all(&source);
        let reconstructed: String = tokens.iter().map(|(_, text)| text.as_str()).collect();
        prop_assert_eq!(reconstructed, source);
    }

    #[test]
    fn lexer_never_emits_two_adjacent_whitespace_tokens(
        source in "[a-zA-Z0-9_ \t\n]{0,64}"
    ) {
        let tokens = lex_all(&source);
        for pair in tokens.windows(2) {
            let adjacent_whitespace =
                pair[0].0 == TokenKind::Whitespace && pair[1].0 == TokenKind::Whitespace;
            prop_assert!(!adjacent_whitespace);
        }
    }

    #[test]
    fn end_of_input_is_always_idempotent(source in "[a-zA-Z0-9_ \n]{0,32}") {
        let handler = Handler::new();
        let mut lexer = Lexer::new(&source, &handler);
        loop {
            if lexer.next_token().kind == TokenKind::End {
                break;
            }
        }
        prop_assert_eq!(lexer.next_token().kind, TokenKind::End);
        prop_assert_eq!(lexer.next_token().kind, TokenKind::End);
    }
}
