//! Token model: `TokenKind`, `Token`, and token concatenation.
//!
//! Tokens carry no payload beyond their `span` — identifiers, string bodies
//! and numeric text are all recovered by slicing the source buffer through
//! `span`, then interned or parsed lazily by whatever consumes the token
//! stream. This keeps the lexer itself allocation-free per token.

use talus_util::Span;

/// Every distinct shape of lexical token the source language produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural
    Whitespace,
    Newline,
    Semicolon,
    Comma,
    Colon,
    ColonColon,
    Ellipsis,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Dot,
    Arrow,

    // Keywords
    KwMatch,
    KwCase,
    KwIs,
    KwAlias,
    KwFrom,
    KwStruct,
    KwVariant,
    KwIf,
    KwElse,
    KwWhile,
    KwFor,
    KwBreak,
    KwContinue,
    KwFunc,
    KwOperator,
    KwDefer,
    KwUsing,
    KwNamespace,
    KwReturn,
    KwInline,
    KwExtern,
    KwStatic,
    KwUse,
    KwImport,
    KwVersion,
    KwUnary,
    KwBinary,
    KwSizeof,
    KwAs,
    /// `Func` — the function *type* keyword, distinct from the `func` item keyword.
    KwFuncType,
    /// `Closure` — the closure *type* keyword.
    KwClosureType,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    BangEq,
    EqEq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Pipe,
    PipePipe,
    AmpAmp,
    Amp,
    Tilde,
    Eq,
    Caret,
    /// `shr` — logical right shift.
    Shr,
    /// `shl` — logical left shift.
    Shl,
    /// `sar` — arithmetic right shift.
    Sar,
    /// `sal` — arithmetic left shift.
    Sal,
    AmpEq,
    CaretEq,
    PipeEq,
    ColonEq,

    // Literals
    StringLit,
    IntLit,
    FloatLit,
    CharLit,
    BoolLit,
    NullLit,

    /// `[A-Za-z_][A-Za-z0-9_]*`, after keyword/literal-word overrides.
    Ident,

    /// Library name following `use`, read while the lexer is in the
    /// `USE_LIB` condition.
    UseLib,
    /// Unit path following a `UseLib` token or `import`, read while the
    /// lexer is in the `UNIT_PATH` condition.
    UnitPath,

    /// Sentinel terminating the stream. `next_token()` returns this
    /// idempotently once the source is exhausted.
    End,
}

/// A single lexical token: its kind plus where it sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub column: u32,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32, column: u32, span: Span) -> Self {
        Self { kind, line, column, span }
    }

    /// Combines this token with `other`, producing a token whose span covers
    /// both — the parser's primary tool for building an AST node's source
    /// range out of the tokens it consumed. Kind and position are inherited
    /// from `self`; only the span widens.
    pub fn concat(&self, other: &Token) -> Token {
        Token { kind: self.kind, line: self.line, column: self.column, span: self.span.merge(other.span) }
    }

    /// Combines a contiguous range of tokens, first to last, the same way
    /// [`Token::concat`] combines a pair. Panics on an empty slice — callers
    /// always have at least the production's own leading token.
    pub fn concat_range(tokens: &[Token]) -> Token {
        let first = tokens.first().expect("concat_range: empty token range");
        let last = tokens.last().expect("concat_range: empty token range");
        first.concat(last)
    }

    pub fn is_whitespace_like(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Newline)
    }
}

/// Maps reserved words to their keyword token kind. Identifiers that match
/// none of these fall through to `TokenKind::Ident`.
///
/// `true`/`false`/`null` are not in the source language's keyword list
/// (`spec.md` §3) but tokenize directly to their literal kind rather than
/// `Ident`, the same way every `case`/`is` style keyword does — there is no
/// separate "boolean keyword" versus "boolean literal" distinction to make.
pub fn keyword_from_ident(ident: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match ident {
        "match" => KwMatch,
        "case" => KwCase,
        "is" => KwIs,
        "alias" => KwAlias,
        "from" => KwFrom,
        "struct" => KwStruct,
        "variant" => KwVariant,
        "if" => KwIf,
        "else" => KwElse,
        "while" => KwWhile,
        "for" => KwFor,
        "break" => KwBreak,
        "continue" => KwContinue,
        "func" => KwFunc,
        "operator" => KwOperator,
        "defer" => KwDefer,
        "using" => KwUsing,
        "namespace" => KwNamespace,
        "return" => KwReturn,
        "inline" => KwInline,
        "extern" => KwExtern,
        "static" => KwStatic,
        "use" => KwUse,
        "import" => KwImport,
        "version" => KwVersion,
        "unary" => KwUnary,
        "binary" => KwBinary,
        "sizeof" => KwSizeof,
        "as" => KwAs,
        "Func" => KwFuncType,
        "Closure" => KwClosureType,
        "shr" => Shr,
        "shl" => Shl,
        "sar" => Sar,
        "sal" => Sal,
        "true" | "false" => BoolLit,
        "null" => NullLit,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, start: usize, end: usize) -> Token {
        Token::new(kind, 1, (start + 1) as u32, Span::new(start, end, 1, (start + 1) as u32))
    }

    #[test]
    fn keyword_lookup_finds_reserved_words() {
        assert_eq!(keyword_from_ident("struct"), Some(TokenKind::KwStruct));
        assert_eq!(keyword_from_ident("shl"), Some(TokenKind::Shl));
        assert_eq!(keyword_from_ident("true"), Some(TokenKind::BoolLit));
        assert_eq!(keyword_from_ident("not_a_keyword"), None);
    }

    #[test]
    fn concat_widens_span_to_cover_both_tokens() {
        let a = tok(TokenKind::KwIf, 0, 2);
        let b = tok(TokenKind::LParen, 3, 4);
        let combined = a.concat(&b);
        assert_eq!(combined.span.start, 0);
        assert_eq!(combined.span.end, 4);
        assert_eq!(combined.kind, TokenKind::KwIf);
    }

    #[test]
    fn concat_range_spans_first_to_last() {
        let tokens = [tok(TokenKind::KwIf, 0, 2), tok(TokenKind::LParen, 3, 4), tok(TokenKind::RParen, 5, 6)];
        let combined = Token::concat_range(&tokens);
        assert_eq!(combined.span.start, 0);
        assert_eq!(combined.span.end, 6);
    }
}
