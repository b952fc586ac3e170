//! End-to-end lexing scenarios that don't fit neatly under one lexer
//! submodule — whole-buffer behavior rather than one-token-at-a-time
//! scanning.

#[cfg(test)]
mod tests {
    use talus_util::Handler;

    use crate::token::TokenKind;
    use crate::Lexer;

    fn lex_all(source: &str) -> Vec<TokenKind> {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, &handler);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::End {
                break;
            }
            kinds.push(token.kind);
        }
        kinds
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert!(lex_all("").is_empty());
    }

    #[test]
    fn end_is_idempotent() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::End);
        assert_eq!(lexer.next_token().kind, TokenKind::End);
        assert_eq!(lexer.next_token().kind, TokenKind::End);
    }

    #[test]
    fn whitespace_runs_collapse_to_one_token() {
        let kinds = lex_all("a    b");
        assert_eq!(kinds, vec![
            TokenKind::Ident,
            TokenKind::Whitespace,
            TokenKind::Ident,
        ]);
    }

    #[test]
    fn use_with_unit_path() {
        let kinds = lex_all("use core/io");
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwUse,
                TokenKind::Whitespace,
                TokenKind::UseLib,
                TokenKind::UnitPath,
            ]
        );
    }

    #[test]
    fn use_without_unit_path_returns_to_code() {
        let kinds = lex_all("use core\nx");
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwUse,
                TokenKind::Whitespace,
                TokenKind::UseLib,
                TokenKind::Newline,
                TokenKind::Ident,
            ]
        );
    }

    #[test]
    fn import_reads_a_unit_path() {
        let kinds = lex_all("import mymod");
        assert_eq!(
            kinds,
            vec![TokenKind::KwImport, TokenKind::Whitespace, TokenKind::UnitPath]
        );
    }

    #[test]
    fn hello_use_import_scenario() {
        let kinds = lex_all("use core/io\nimport mymod\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwUse,
                TokenKind::Whitespace,
                TokenKind::UseLib,
                TokenKind::UnitPath,
                TokenKind::Newline,
                TokenKind::KwImport,
                TokenKind::Whitespace,
                TokenKind::UnitPath,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn line_comment_between_tokens_leaves_only_its_newline() {
        let kinds = lex_all("a // trailing comment\nb");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Whitespace,
                TokenKind::Newline,
                TokenKind::Ident,
            ]
        );
    }

    #[test]
    fn block_comment_between_tokens_disappears() {
        let kinds = lex_all("a/* block */b");
        assert_eq!(kinds, vec![TokenKind::Ident, TokenKind::Ident]);
    }

    #[test]
    fn long_identifier() {
        let name = "a".repeat(10_000);
        let kinds = lex_all(&name);
        assert_eq!(kinds, vec![TokenKind::Ident]);
    }

    #[test]
    fn struct_declaration_scenario_tokenizes() {
        let kinds = lex_all("Pair : struct <A, B> { first : A; second : B }");
        assert!(kinds.contains(&TokenKind::KwStruct));
        assert!(kinds.contains(&TokenKind::Lt));
        assert!(kinds.contains(&TokenKind::Gt));
        assert!(kinds.contains(&TokenKind::LBrace));
        assert!(kinds.contains(&TokenKind::RBrace));
    }

    #[test]
    fn function_with_body_scenario_tokenizes() {
        let kinds = lex_all("f : func (x : int32, y : int32) -> int32 { return x + y }");
        assert!(kinds.contains(&TokenKind::KwFunc));
        assert!(kinds.contains(&TokenKind::Arrow));
        assert!(kinds.contains(&TokenKind::KwReturn));
        assert!(kinds.contains(&TokenKind::Plus));
    }
}
