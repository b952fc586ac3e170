//! talus-par - handwritten recursive-descent parser.
//!
//! Turns the flat [`Token`] stream [`talus_lex::Lexer`] produces into the
//! arena-indexed [`ast::Ast`]. Every production follows the same discipline:
//! take a [`Checkpoint`] before speculating, and either commit to what was
//! parsed or [`Parser::reset`] the cursor back to it. Once a production has
//! consumed its defining keyword (e.g. the `struct` in a struct
//! declaration), it is "committed" — a further mismatch is reported as a
//! diagnostic through [`Handler`] rather than silently backtracked, but the
//! cursor still rewinds and the production still reports
//! [`ParseResult::NoMatch`] to its caller, since the surrounding `unit`
//! production must be able to skip the malformed text and keep parsing.
//!
//! ```
//! use talus_util::Handler;
//! use talus_par::{lex_all, Parser};
//!
//! let source = "x : int32 = 1";
//! let handler = Handler::new();
//! let tokens = lex_all(source, &handler);
//! let mut parser = Parser::new(tokens, source, &handler);
//! let ast = parser.parse_unit();
//! assert!(!handler.has_errors());
//! let unit = match &ast.decls[ast.unit.unwrap()].kind {
//!     talus_par::ast::DeclKind::Unit(unit) => unit,
//!     _ => unreachable!(),
//! };
//! assert_eq!(unit.decls.len(), 1);
//! ```

pub mod ast;
pub mod decls;
pub mod dumper;
pub mod exprs;
pub mod stmts;
pub mod types;

use talus_lex::{Lexer, Token, TokenKind};
use talus_util::{Handler, Level, Span, Symbol};

use ast::Ast;

/// Runs `source` through the lexer to completion and returns its tokens,
/// including a trailing [`TokenKind::End`] — the form [`Parser::new`]
/// expects.
pub fn lex_all(source: &str, handler: &Handler) -> Vec<Token> {
    let mut lexer = Lexer::new(source, handler);
    let mut tokens: Vec<Token> = lexer.by_ref().collect();
    tokens.push(lexer.next_token());
    tokens
}

/// A saved cursor position, produced by [`Parser::mark`] and consumed by
/// [`Parser::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// The three-valued result every speculative production returns.
///
/// Plain `Option<T>` cannot distinguish "this alternative didn't apply, try
/// the next one" from "this alternative started, committed to its keyword,
/// then hit malformed input" — the caller needs to keep trying alternatives
/// in the first case and stop in the second.
#[derive(Debug)]
pub enum ParseResult<T> {
    Matched(T),
    NoMatch,
    CommittedError,
}

impl<T> ParseResult<T> {
    pub fn is_matched(&self) -> bool {
        matches!(self, ParseResult::Matched(_))
    }

    pub fn matched(self) -> Option<T> {
        match self {
            ParseResult::Matched(value) => Some(value),
            _ => None,
        }
    }
}

/// Internal invariant violations — not user-facing source diagnostics,
/// which always go through [`Handler`] instead. Reaching one of these means
/// the parser itself is broken.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("parser cursor ran past the end of the token stream")]
    CursorOverrun,
}

pub struct Parser<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    position: usize,
    handler: &'a Handler,
    ast: Ast,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, source: &'a str, handler: &'a Handler) -> Self {
        Self { tokens, source, position: 0, handler, ast: Ast::new() }
    }

    /// Construct directly from a token stream that already ends in
    /// [`TokenKind::End`]; used by tests that build their own token lists.
    pub fn from_tokens(tokens: Vec<Token>, source: &'a str, handler: &'a Handler) -> Self {
        Self::new(tokens, source, handler)
    }

    pub fn handler(&self) -> &'a Handler {
        self.handler
    }

    fn token_at(&self, position: usize) -> Token {
        self.tokens.get(position).copied().unwrap_or_else(|| {
            self.tokens.last().copied().expect("token stream must contain at least an End token")
        })
    }

    pub fn current_token(&self) -> Token {
        self.token_at(self.position)
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    pub fn current_span(&self) -> Span {
        self.current_token().span
    }

    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.token_at(self.position + offset).kind
    }

    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::End
    }

    /// Text a token's span covers in the original source.
    pub fn text_of(&self, token: Token) -> &'a str {
        &self.source[token.span.start..token.span.end]
    }

    /// Interns the current token's source text.
    pub fn current_symbol(&self) -> Symbol {
        Symbol::intern(self.text_of(self.current_token()))
    }

    pub fn advance(&mut self) -> Token {
        let token = self.current_token();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    /// The token just consumed by the last [`Parser::advance`] — used to
    /// build a node's span by concatenating its first and last token.
    pub fn tokens_last_consumed(&self) -> Token {
        self.token_at(self.position.saturating_sub(1))
    }

    /// Takes a snapshot of the cursor to [`Parser::reset`] back to.
    pub fn mark(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    pub fn reset(&mut self, checkpoint: Checkpoint) {
        tracing::trace!(from = self.position, to = checkpoint.0, "rewind");
        self.position = checkpoint.0;
    }

    /// Consumes `kind` if it's current, returning whether it matched.
    pub fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.current_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes `kind`, emitting a diagnostic through `handler` if it isn't
    /// current. Used once a production has already committed.
    pub fn expect(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.match_token(kind) {
            true
        } else {
            self.error(format!("expected {what}"));
            false
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        let span = self.current_span();
        tracing::debug!(?span, "parse error");
        self.handler.report_in_source(self.source, span, Level::Error, message);
    }

    // -- whitespace -------------------------------------------------------

    fn skip_while(&mut self, newline: bool) -> bool {
        let mut any = false;
        loop {
            match self.current_kind() {
                TokenKind::Whitespace => {
                    self.advance();
                    any = true;
                }
                TokenKind::Newline if newline => {
                    self.advance();
                    any = true;
                }
                _ => break,
            }
        }
        any
    }

    /// `ws` — zero or more whitespace/newline tokens.
    pub fn optional_whitespace_newline(&mut self) {
        self.skip_while(true);
    }

    /// Zero or more whitespace tokens, stopping at a newline.
    pub fn optional_whitespace(&mut self) {
        self.skip_while(false);
    }

    /// One or more whitespace/newline tokens.
    pub fn mandatory_whitespace_newline(&mut self) -> bool {
        if self.skip_while(true) {
            true
        } else {
            self.error("expected whitespace");
            false
        }
    }

    /// `mws` — one or more whitespace tokens, stopping at (and not
    /// requiring) a newline.
    pub fn mandatory_whitespace(&mut self) -> bool {
        if self.skip_while(false) {
            true
        } else {
            self.error("expected whitespace");
            false
        }
    }

    /// Same token-skipping as [`Parser::mandatory_whitespace`], without the
    /// diagnostic. Used where an `mws`-prefixed continuation is itself
    /// optional (a trailing `else`, a postfix `as`/`is`, a `break` label) —
    /// its absence just means the continuation isn't there, not an error.
    pub fn try_mandatory_whitespace(&mut self) -> bool {
        self.skip_while(false)
    }

    /// `(whitespace|newline|semicolon)+` between statements.
    pub fn statement_separator(&mut self) -> bool {
        let mut any = false;
        loop {
            match self.current_kind() {
                TokenKind::Whitespace | TokenKind::Newline | TokenKind::Semicolon => {
                    self.advance();
                    any = true;
                }
                _ => break,
            }
        }
        any
    }

    /// Non-destructive lookahead used to disambiguate `IDENT ws ":" ws
    /// <keyword>` declarations from a plain variable declaration, without
    /// consuming anything: save, peek past `IDENT ws ":" ws`, check whether
    /// `keyword` is there, then always rewind.
    pub fn decl_of(&mut self, keyword: TokenKind) -> bool {
        let checkpoint = self.mark();
        let found = self.match_token(TokenKind::Ident) && {
            self.optional_whitespace_newline();
            self.match_token(TokenKind::Colon) && {
                self.optional_whitespace_newline();
                self.current_kind() == keyword
            }
        };
        self.reset(checkpoint);
        found
    }

    // -- arena allocation ---------------------------------------------

    pub fn alloc_decl(&mut self, token: Token, parent: Option<ast::NodeId>, kind: ast::DeclKind) -> ast::DeclId {
        self.ast.decls.push(ast::DeclNode { token, parent, kind })
    }

    pub fn alloc_stmt(&mut self, token: Token, parent: Option<ast::NodeId>, kind: ast::StmtKind) -> ast::StmtId {
        self.ast.stmts.push(ast::StmtNode { token, parent, kind })
    }

    pub fn alloc_expr(&mut self, token: Token, parent: Option<ast::NodeId>, kind: ast::ExprKind) -> ast::ExprId {
        self.ast.exprs.push(ast::ExprNode { token, parent, kind, computed_type: None })
    }

    pub fn alloc_type(&mut self, token: Token, parent: Option<ast::NodeId>, kind: ast::TypeKind) -> ast::TypeId {
        self.ast.types.push(ast::TypeNode { token, parent, kind })
    }

    // -- top-level grammar ----------------------------------------------

    /// `unit ← (use|import|ws)* (declaration|ws)* END`
    pub fn parse_unit(mut self) -> Ast {
        let start = self.current_token();
        let mut uses = Vec::new();
        let mut imports = Vec::new();

        loop {
            self.optional_whitespace_newline();
            if self.match_token(TokenKind::KwUse) {
                if let Some(id) = self.parse_use() {
                    uses.push(id);
                }
            } else if self.match_token(TokenKind::KwImport) {
                if let Some(id) = self.parse_import() {
                    imports.push(id);
                }
            } else {
                break;
            }
        }

        let mut decls = Vec::new();
        loop {
            self.optional_whitespace_newline();
            if self.is_at_end() {
                break;
            }
            match self.parse_declaration(None) {
                ParseResult::Matched(id) => decls.push(id),
                ParseResult::NoMatch | ParseResult::CommittedError => {
                    if !self.is_at_end() {
                        self.error("expected a declaration");
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        let unit = ast::UnitDecl { path: Symbol::intern(""), source: self.source.to_string(), uses, imports, decls };
        let id = self.alloc_decl(start, None, ast::DeclKind::Unit(unit));
        self.ast.unit = Some(id);
        self.ast
    }

    fn parse_use(&mut self) -> Option<ast::DeclId> {
        let start = self.tokens_last_consumed();
        if !self.mandatory_whitespace() {
            return None;
        }
        if self.current_kind() != TokenKind::UseLib {
            self.error("expected a library name after 'use'");
            return None;
        }
        let library = self.current_symbol();
        self.advance();
        let path = if self.current_kind() == TokenKind::UnitPath {
            let sym = self.current_symbol();
            self.advance();
            Some(sym)
        } else {
            None
        };
        Some(self.alloc_decl(start, None, ast::DeclKind::Use(ast::UseDecl { library, path })))
    }

    fn parse_import(&mut self) -> Option<ast::DeclId> {
        let start = self.tokens_last_consumed();
        if !self.mandatory_whitespace() {
            return None;
        }
        if self.current_kind() != TokenKind::UnitPath {
            self.error("expected a unit path after 'import'");
            return None;
        }
        let path = self.current_symbol();
        self.advance();
        Some(self.alloc_decl(start, None, ast::DeclKind::Import(ast::ImportDecl { path })))
    }
}
