//! Statement parsing — scopes, control flow, and the statements that wrap a
//! nested declaration or a bare expression.
//!
//! `statement ← match | defer | return | using | break | continue | for |
//! while | declaration | scope | variable_decl | if | expression`. That try
//! order matters: `match`/`defer`/etc. all start with a reserved word so
//! they can be matched directly, while `declaration` and `variable_decl`
//! share a prefix with a bare `expression` and so are tried ahead of it.

use talus_lex::TokenKind;

use crate::ast::{ForInit, ForStmt, MatchCase, MatchStmt, NodeId, StmtId, StmtKind};
use crate::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// `scope ← "{" ws (statement stmt_sep)* ws "}"`. A trailing expression
    /// statement needs no separator before the closing brace — it's the
    /// scope's value if the surrounding construct is used as an expression.
    pub fn parse_scope(&mut self, parent: Option<NodeId>) -> ParseResult<StmtId> {
        let start = self.current_token();
        if !self.match_token(TokenKind::LBrace) {
            return ParseResult::NoMatch;
        }

        let placeholder = self.alloc_stmt(start, parent, StmtKind::Scope(Vec::new()));
        let own_parent = Some(NodeId::Stmt(placeholder));

        let mut stmts = Vec::new();
        loop {
            self.optional_whitespace_newline();
            if self.match_token(TokenKind::RBrace) || self.is_at_end() {
                break;
            }
            match self.parse_statement(own_parent) {
                ParseResult::Matched(id) => stmts.push(id),
                ParseResult::NoMatch | ParseResult::CommittedError => {
                    self.error("expected a statement");
                    self.advance();
                    continue;
                }
            }
            self.optional_whitespace_newline();
            if self.current_kind() != TokenKind::RBrace && !self.is_at_end() {
                self.statement_separator();
            }
        }

        self.ast.stmts[placeholder].kind = StmtKind::Scope(stmts);
        ParseResult::Matched(placeholder)
    }

    pub fn parse_statement(&mut self, parent: Option<NodeId>) -> ParseResult<StmtId> {
        match self.current_kind() {
            TokenKind::KwMatch => self.parse_match(parent),
            TokenKind::KwDefer => self.parse_defer(parent),
            TokenKind::KwReturn => self.parse_return(parent),
            TokenKind::KwUsing => self.parse_using(parent),
            TokenKind::KwBreak => self.parse_break(parent),
            TokenKind::KwContinue => self.parse_continue(parent),
            TokenKind::LBrace => self.parse_scope(parent),
            _ => {
                if self.is_labelled(TokenKind::KwFor) {
                    return self.parse_for(parent);
                }
                if self.is_labelled(TokenKind::KwWhile) {
                    return self.parse_while(parent);
                }
                if self.current_kind() == TokenKind::KwFor {
                    return self.parse_for(parent);
                }
                if self.current_kind() == TokenKind::KwWhile {
                    return self.parse_while(parent);
                }
                if self.current_kind() == TokenKind::KwIf {
                    return self.parse_if(parent);
                }
                match self.parse_declaration(parent) {
                    ParseResult::Matched(id) => {
                        let token = self.ast.decls[id].token;
                        return ParseResult::Matched(self.alloc_stmt(token, parent, StmtKind::Decl(id)));
                    }
                    ParseResult::CommittedError => return ParseResult::CommittedError,
                    ParseResult::NoMatch => {}
                }
                match self.parse_expression(parent) {
                    ParseResult::Matched(id) => {
                        let token = self.ast.exprs[id].token;
                        ParseResult::Matched(self.alloc_stmt(token, parent, StmtKind::Expr(id)))
                    }
                    other => other_to_stmt(other),
                }
            }
        }
    }

    /// Peeks past an optional `IDENT ws ":" ws` label to see if `keyword`
    /// follows, without consuming anything.
    fn is_labelled(&mut self, keyword: TokenKind) -> bool {
        if self.current_kind() != TokenKind::Ident {
            return false;
        }
        let checkpoint = self.mark();
        self.advance();
        self.optional_whitespace_newline();
        let found = self.match_token(TokenKind::Colon) && {
            self.optional_whitespace_newline();
            self.current_kind() == keyword
        };
        self.reset(checkpoint);
        found
    }

    fn parse_label(&mut self) -> Option<talus_util::Symbol> {
        if !self.is_labelled(TokenKind::KwFor) && !self.is_labelled(TokenKind::KwWhile) {
            return None;
        }
        let name = self.current_symbol();
        self.advance();
        self.optional_whitespace_newline();
        self.advance(); // ':'
        self.optional_whitespace_newline();
        Some(name)
    }

    /// `"if" ws "(" ws expression ws ")" ws statement (ws "else" ws statement)?`
    fn parse_if(&mut self, parent: Option<NodeId>) -> ParseResult<StmtId> {
        let start = self.current_token();
        self.advance();
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::LParen, "'(' after 'if'") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();
        let cond = match self.parse_expression(parent) {
            ParseResult::Matched(id) => id,
            _ => {
                self.error("expected a condition expression");
                return ParseResult::CommittedError;
            }
        };
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::RParen, "')' to close 'if' condition") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();

        let placeholder = self.alloc_stmt(start, parent, StmtKind::If(cond, StmtId(0), None));
        let own_parent = Some(NodeId::Stmt(placeholder));

        let then_branch = match self.parse_statement(own_parent) {
            ParseResult::Matched(id) => id,
            _ => {
                self.error("expected a statement for the 'if' body");
                return ParseResult::CommittedError;
            }
        };

        let else_branch = {
            let checkpoint = self.mark();
            if self.try_mandatory_whitespace() && self.match_token(TokenKind::KwElse) {
                self.optional_whitespace_newline();
                match self.parse_statement(own_parent) {
                    ParseResult::Matched(id) => Some(id),
                    _ => {
                        self.error("expected a statement for the 'else' body");
                        None
                    }
                }
            } else {
                self.reset(checkpoint);
                None
            }
        };

        self.ast.stmts[placeholder].kind = StmtKind::If(cond, then_branch, else_branch);
        ParseResult::Matched(placeholder)
    }

    /// `(IDENT ws ":" ws)? "while" ws "(" ws expression ws ")" ws statement`
    fn parse_while(&mut self, parent: Option<NodeId>) -> ParseResult<StmtId> {
        let start = self.current_token();
        let label = self.parse_label();
        self.advance(); // 'while'
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::LParen, "'(' after 'while'") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();
        let cond = match self.parse_expression(parent) {
            ParseResult::Matched(id) => id,
            _ => {
                self.error("expected a condition expression");
                return ParseResult::CommittedError;
            }
        };
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::RParen, "')' to close 'while' condition") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();

        let placeholder = self.alloc_stmt(start, parent, StmtKind::While(label, cond, StmtId(0)));
        let own_parent = Some(NodeId::Stmt(placeholder));
        let body = match self.parse_statement(own_parent) {
            ParseResult::Matched(id) => id,
            _ => {
                self.error("expected a statement for the 'while' body");
                return ParseResult::CommittedError;
            }
        };

        self.ast.stmts[placeholder].kind = StmtKind::While(label, cond, body);
        ParseResult::Matched(placeholder)
    }

    /// `(IDENT ws ":" ws)? "for" ws "(" ws for_init ("," ws for_init)* ws ";"
    /// ws expression? ws ";" ws expression? ws ")" ws statement`, where
    /// `for_init ← variable_decl | expression`.
    fn parse_for(&mut self, parent: Option<NodeId>) -> ParseResult<StmtId> {
        let start = self.current_token();
        let label = self.parse_label();
        self.advance(); // 'for'
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::LParen, "'(' after 'for'") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();

        let placeholder = self.alloc_stmt(
            start,
            parent,
            StmtKind::For(ForStmt { label, init: Vec::new(), cond: None, update: None, body: StmtId(0) }),
        );
        let own_parent = Some(NodeId::Stmt(placeholder));

        let mut init = Vec::new();
        if self.current_kind() != TokenKind::Semicolon {
            loop {
                match self.parse_variable_decl(own_parent) {
                    ParseResult::Matched(id) => init.push(ForInit::Decl(id)),
                    ParseResult::NoMatch => match self.parse_expression(own_parent) {
                        ParseResult::Matched(id) => init.push(ForInit::Expr(id)),
                        _ => {
                            self.error("expected a loop initializer");
                            return ParseResult::CommittedError;
                        }
                    },
                    ParseResult::CommittedError => return ParseResult::CommittedError,
                }
                self.optional_whitespace_newline();
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
                self.optional_whitespace_newline();
            }
        }
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::Semicolon, "';' after loop initializers") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();

        let cond = if self.current_kind() != TokenKind::Semicolon {
            self.parse_expression(own_parent).matched()
        } else {
            None
        };
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::Semicolon, "';' after loop condition") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();

        let update = if self.current_kind() != TokenKind::RParen {
            self.parse_expression(own_parent).matched()
        } else {
            None
        };
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::RParen, "')' to close 'for' header") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();

        let body = match self.parse_statement(own_parent) {
            ParseResult::Matched(id) => id,
            _ => {
                self.error("expected a statement for the 'for' body");
                return ParseResult::CommittedError;
            }
        };

        self.ast.stmts[placeholder].kind = StmtKind::For(ForStmt { label, init, cond, update, body });
        ParseResult::Matched(placeholder)
    }

    /// `"return" (ws expression)?`
    fn parse_return(&mut self, parent: Option<NodeId>) -> ParseResult<StmtId> {
        let start = self.current_token();
        self.advance();
        let checkpoint = self.mark();
        self.optional_whitespace_newline();
        let value = match self.parse_expression(parent) {
            ParseResult::Matched(id) => Some(id),
            _ => {
                self.reset(checkpoint);
                None
            }
        };
        ParseResult::Matched(self.alloc_stmt(start, parent, StmtKind::Return(value)))
    }

    /// `"using" mws dotted_name (ws scope)?`
    fn parse_using(&mut self, parent: Option<NodeId>) -> ParseResult<StmtId> {
        let start = self.current_token();
        self.advance();
        if !self.mandatory_whitespace() {
            return ParseResult::CommittedError;
        }
        let Some(path) = self.parse_dotted_name() else {
            self.error("expected a path after 'using'");
            return ParseResult::CommittedError;
        };
        let checkpoint = self.mark();
        self.optional_whitespace_newline();
        let scope = if self.current_kind() == TokenKind::LBrace {
            self.parse_scope(parent).matched()
        } else {
            self.reset(checkpoint);
            None
        };
        ParseResult::Matched(self.alloc_stmt(start, parent, StmtKind::Using(path, scope)))
    }

    /// `"defer" ws scope`
    fn parse_defer(&mut self, parent: Option<NodeId>) -> ParseResult<StmtId> {
        let start = self.current_token();
        self.advance();
        self.optional_whitespace_newline();
        let placeholder = self.alloc_stmt(start, parent, StmtKind::Defer(StmtId(0)));
        let own_parent = Some(NodeId::Stmt(placeholder));
        let inner = match self.parse_scope(own_parent) {
            ParseResult::Matched(id) => id,
            _ => {
                self.error("expected a scope after 'defer'");
                return ParseResult::CommittedError;
            }
        };
        self.ast.stmts[placeholder].kind = StmtKind::Defer(inner);
        ParseResult::Matched(placeholder)
    }

    /// `"match" ws "(" ws expression ws ")" ws "{" ws (case)* (ws "else" ws
    /// scope)? ws "}"`.
    fn parse_match(&mut self, parent: Option<NodeId>) -> ParseResult<StmtId> {
        let start = self.current_token();
        self.advance();
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::LParen, "'(' after 'match'") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();
        let scrutinee = match self.parse_expression(parent) {
            ParseResult::Matched(id) => id,
            _ => {
                self.error("expected an expression to match on");
                return ParseResult::CommittedError;
            }
        };
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::RParen, "')' after match scrutinee") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::LBrace, "'{' to open match body") {
            return ParseResult::CommittedError;
        }

        let placeholder =
            self.alloc_stmt(start, parent, StmtKind::Match(MatchStmt { scrutinee, cases: Vec::new(), else_scope: None }));
        let own_parent = Some(NodeId::Stmt(placeholder));

        let mut cases = Vec::new();
        let mut else_scope = None;
        loop {
            self.optional_whitespace_newline();
            if self.match_token(TokenKind::KwElse) {
                self.optional_whitespace_newline();
                else_scope = self.parse_scope(own_parent).matched();
                if else_scope.is_none() {
                    self.error("expected a scope after 'else'");
                }
                break;
            }
            if self.current_kind() != TokenKind::KwCase {
                break;
            }
            match self.parse_match_case(own_parent) {
                Some(case) => cases.push(case),
                None => {
                    self.error("malformed match case");
                    self.advance();
                }
            }
        }
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::RBrace, "'}' to close match body") {
            return ParseResult::CommittedError;
        }

        self.ast.stmts[placeholder].kind = StmtKind::Match(MatchStmt { scrutinee, cases, else_scope });
        ParseResult::Matched(placeholder)
    }

    /// `"case" mws "is" mws IDENT (ws "(" ws (expression (ws "," ws
    /// expression)*)? ws ")")? ws scope` or `"case" mws expression ws scope`.
    fn parse_match_case(&mut self, parent: Option<NodeId>) -> Option<MatchCase> {
        self.advance(); // 'case'
        if !self.mandatory_whitespace() {
            return None;
        }

        let is_form = {
            let checkpoint = self.mark();
            if self.match_token(TokenKind::KwIs) {
                true
            } else {
                self.reset(checkpoint);
                false
            }
        };

        if is_form {
            if !self.mandatory_whitespace() {
                return None;
            }
            if self.current_kind() != TokenKind::Ident {
                self.error("expected a tag name after 'is'");
                return None;
            }
            let tag = self.current_symbol();
            self.advance();
            if self.current_kind() == TokenKind::ColonColon {
                self.error("'is' tags must be unqualified, not namespaced");
            }
            let mut bindings = Vec::new();
            let checkpoint = self.mark();
            self.optional_whitespace_newline();
            if self.match_token(TokenKind::LParen) {
                self.optional_whitespace_newline();
                if self.current_kind() != TokenKind::RParen {
                    loop {
                        match self.parse_expression(parent) {
                            ParseResult::Matched(id) => bindings.push(id),
                            _ => break,
                        }
                        self.optional_whitespace_newline();
                        if !self.match_token(TokenKind::Comma) {
                            break;
                        }
                        self.optional_whitespace_newline();
                    }
                }
                self.optional_whitespace_newline();
                self.expect(TokenKind::RParen, "')' to close 'is' bindings");
            } else {
                self.reset(checkpoint);
            }
            self.optional_whitespace_newline();
            let scope = self.parse_scope(parent).matched()?;
            Some(MatchCase::Is(tag, bindings, scope))
        } else {
            let value = self.parse_expression(parent).matched()?;
            self.optional_whitespace_newline();
            let scope = self.parse_scope(parent).matched()?;
            Some(MatchCase::Simple(value, scope))
        }
    }

    fn parse_break(&mut self, parent: Option<NodeId>) -> ParseResult<StmtId> {
        let start = self.current_token();
        self.advance();
        let label = self.try_parse_trailing_label();
        ParseResult::Matched(self.alloc_stmt(start, parent, StmtKind::Break(label)))
    }

    fn parse_continue(&mut self, parent: Option<NodeId>) -> ParseResult<StmtId> {
        let start = self.current_token();
        self.advance();
        let label = self.try_parse_trailing_label();
        ParseResult::Matched(self.alloc_stmt(start, parent, StmtKind::Continue(label)))
    }

    /// `(mws IDENT)?` trailing label on `break`/`continue`.
    fn try_parse_trailing_label(&mut self) -> Option<talus_util::Symbol> {
        let checkpoint = self.mark();
        if self.try_mandatory_whitespace() && self.current_kind() == TokenKind::Ident {
            let name = self.current_symbol();
            self.advance();
            Some(name)
        } else {
            self.reset(checkpoint);
            None
        }
    }
}

fn other_to_stmt(result: ParseResult<crate::ast::ExprId>) -> ParseResult<StmtId> {
    match result {
        ParseResult::Matched(_) => unreachable!("handled above"),
        ParseResult::NoMatch => ParseResult::NoMatch,
        ParseResult::CommittedError => ParseResult::CommittedError,
    }
}

#[cfg(test)]
mod tests {
    fn parse_fn_body(source: &str) -> (crate::ast::Ast, talus_util::Handler) {
        let wrapped = format!("f : func () {{ {source} }}");
        let handler = talus_util::Handler::new();
        let tokens = crate::lex_all(&wrapped, &handler);
        let parser = crate::Parser::new(tokens, &wrapped, &handler);
        (parser.parse_unit(), handler)
    }

    fn body_stmts<'a>(ast: &'a crate::ast::Ast) -> &'a [crate::ast::StmtId] {
        let crate::ast::DeclKind::Unit(unit) = &ast.decls[ast.unit.unwrap()].kind else { unreachable!() };
        let crate::ast::DeclKind::Function(f) = &ast.decls[unit.decls[0]].kind else { unreachable!() };
        let crate::ast::StmtKind::Scope(stmts) = &ast.stmts[f.body.unwrap()].kind else { unreachable!() };
        stmts
    }

    #[test]
    fn if_else_chain() {
        let (ast, handler) = parse_fn_body("if (1) { return 1 } else { return 2 }");
        assert!(!handler.has_errors());
        let stmts = body_stmts(&ast);
        assert_eq!(stmts.len(), 1);
        let crate::ast::StmtKind::If(_, _, else_branch) = &ast.stmts[stmts[0]].kind else { panic!("expected if") };
        assert!(else_branch.is_some());
    }

    #[test]
    fn c_style_for_loop() {
        let (ast, handler) = parse_fn_body("for (i : int32 = 0; i < 10; i = i + 1) { }");
        assert!(!handler.has_errors());
        let stmts = body_stmts(&ast);
        let crate::ast::StmtKind::For(f) = &ast.stmts[stmts[0]].kind else { panic!("expected for") };
        assert_eq!(f.init.len(), 1);
        assert!(f.cond.is_some());
        assert!(f.update.is_some());
    }

    #[test]
    fn labelled_while_with_break() {
        let (ast, handler) = parse_fn_body("outer : while (1) { break outer }");
        assert!(!handler.has_errors());
        let stmts = body_stmts(&ast);
        let crate::ast::StmtKind::While(label, ..) = &ast.stmts[stmts[0]].kind else { panic!("expected while") };
        assert_eq!(label.unwrap().as_str(), "outer");
    }

    #[test]
    fn match_with_is_case_and_else() {
        let (ast, handler) = parse_fn_body("match (x) { case is Some(v) { return v } else { return 0 } }");
        assert!(!handler.has_errors());
        let stmts = body_stmts(&ast);
        let crate::ast::StmtKind::Match(m) = &ast.stmts[stmts[0]].kind else { panic!("expected match") };
        assert_eq!(m.cases.len(), 1);
        assert!(m.else_scope.is_some());
    }

    #[test]
    fn namespaced_is_tag_is_rejected() {
        let (_, handler) = parse_fn_body("match (x) { case is core::Some(v) { return v } }");
        assert!(handler.has_errors());
    }
}
