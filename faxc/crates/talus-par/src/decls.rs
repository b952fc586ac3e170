//! Declaration parsing — namespace, struct, alias, variant, function, and
//! variable declarations.
//!
//! `declaration ← namespace | type_decl | func_decl | variable_decl`, where
//! `type_decl ← struct_decl | variant_decl | alias_decl`. Struct, variant,
//! alias and function declarations all share the `IDENT ws ":" ws` prefix,
//! so [`Parser::decl_of`] peeks past it to see which keyword follows before
//! committing to one alternative over another.

use talus_lex::TokenKind;

use crate::ast::{
    AliasDecl, DeclId, DeclKind, FunctionDecl, FunctionParam, NamespaceDecl, NodeId, StructDecl, TemplateDecl,
    VariableDecl, VariantDecl, VariantMember,
};
use crate::{ParseResult, Parser};

impl<'a> Parser<'a> {
    pub fn parse_declaration(&mut self, parent: Option<NodeId>) -> ParseResult<DeclId> {
        if self.current_kind() == TokenKind::KwNamespace {
            return self.parse_namespace(parent);
        }
        if self.decl_of(TokenKind::KwStruct) {
            return self.parse_struct_decl(parent);
        }
        if self.decl_of(TokenKind::KwVariant) {
            return self.parse_variant_decl(parent);
        }
        if self.decl_of(TokenKind::KwAlias) {
            return self.parse_alias_decl(parent);
        }
        if self.decl_of_any(&[TokenKind::KwExtern, TokenKind::KwInline, TokenKind::KwFunc]) {
            return self.parse_function_decl(parent);
        }
        if self.current_kind() == TokenKind::Ident {
            return self.parse_variable_decl(parent);
        }
        ParseResult::NoMatch
    }

    fn decl_of_any(&mut self, keywords: &[TokenKind]) -> bool {
        keywords.iter().any(|kind| self.decl_of(*kind))
    }

    /// `"namespace" mws dotted_name ws "{" ws (declaration | ws)* "}"`.
    fn parse_namespace(&mut self, parent: Option<NodeId>) -> ParseResult<DeclId> {
        let start = self.current_token();
        self.advance();
        if !self.mandatory_whitespace() {
            return ParseResult::CommittedError;
        }
        let Some(name) = self.parse_dotted_name() else {
            self.error("expected a namespace name");
            return ParseResult::CommittedError;
        };
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::LBrace, "'{' to open namespace body") {
            return ParseResult::CommittedError;
        }

        let placeholder = self.alloc_decl(start, parent, DeclKind::Namespace(NamespaceDecl { name: name.clone(), decls: Vec::new() }));
        let own_parent = Some(NodeId::Decl(placeholder));

        let mut decls = Vec::new();
        loop {
            self.optional_whitespace_newline();
            if self.match_token(TokenKind::RBrace) || self.is_at_end() {
                break;
            }
            match self.parse_declaration(own_parent) {
                ParseResult::Matched(id) => decls.push(id),
                _ => {
                    self.error("expected a declaration inside namespace body");
                    self.advance();
                }
            }
        }

        self.ast.decls[placeholder].kind = DeclKind::Namespace(NamespaceDecl { name, decls });
        ParseResult::Matched(placeholder)
    }

    /// `IDENT ws ":" ws "struct" ws template_params? ws "{" ws
    /// ((type_decl | field_var_decl) stmt_sep)* ws "}"`.
    fn parse_struct_decl(&mut self, parent: Option<NodeId>) -> ParseResult<DeclId> {
        let start = self.current_token();
        let name = self.current_symbol();
        self.advance();
        self.optional_whitespace_newline();
        self.advance(); // ':'
        self.optional_whitespace_newline();
        self.advance(); // 'struct'
        self.optional_whitespace_newline();

        let placeholder = self.alloc_decl(
            start,
            parent,
            DeclKind::Struct(StructDecl { name, templates: Vec::new(), fields: Vec::new(), nested: Vec::new() }),
        );
        let own_parent = Some(NodeId::Decl(placeholder));

        let templates = if self.current_kind() == TokenKind::Lt { self.parse_template_params(own_parent) } else { Vec::new() };
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::LBrace, "'{' to open struct body") {
            return ParseResult::CommittedError;
        }

        let mut fields = Vec::new();
        let mut nested = Vec::new();
        loop {
            self.optional_whitespace_newline();
            if self.match_token(TokenKind::RBrace) || self.is_at_end() {
                break;
            }
            if self.decl_of_any(&[TokenKind::KwStruct, TokenKind::KwVariant, TokenKind::KwAlias]) {
                match self.parse_declaration(own_parent) {
                    ParseResult::Matched(id) => nested.push(id),
                    _ => {
                        self.error("expected a nested type declaration");
                        self.advance();
                        continue;
                    }
                }
            } else {
                match self.parse_field_var_decl(own_parent) {
                    Some(id) => fields.push(id),
                    None => {
                        self.error("expected a field declaration");
                        self.advance();
                        continue;
                    }
                }
            }
            self.optional_whitespace_newline();
            if self.current_kind() != TokenKind::RBrace {
                self.statement_separator();
            }
        }

        self.ast.decls[placeholder].kind = DeclKind::Struct(StructDecl { name, templates, fields, nested });
        ParseResult::Matched(placeholder)
    }

    /// `IDENT ws ":" ws type`, no modifiers, no initializer.
    fn parse_field_var_decl(&mut self, parent: Option<NodeId>) -> Option<DeclId> {
        if self.current_kind() != TokenKind::Ident {
            return None;
        }
        let start = self.current_token();
        let name = self.current_symbol();
        self.advance();
        self.optional_whitespace_newline();
        if !self.expect(TokenKind::Colon, "':' in field declaration") {
            return None;
        }
        self.optional_whitespace_newline();
        let ty = match self.parse_type(parent) {
            ParseResult::Matched(ty) => ty,
            _ => {
                self.error("expected a field type");
                return None;
            }
        };
        let token = start.concat(&self.tokens_last_consumed());
        Some(self.alloc_decl(
            token,
            parent,
            DeclKind::Variable(VariableDecl { name, ty: Some(ty), init: None, is_extern: false, is_static: false }),
        ))
    }

    /// `IDENT ws ":" ws "alias" ws template_params? mws "from" mws type`.
    fn parse_alias_decl(&mut self, parent: Option<NodeId>) -> ParseResult<DeclId> {
        let start = self.current_token();
        let name = self.current_symbol();
        self.advance();
        self.optional_whitespace_newline();
        self.advance(); // ':'
        self.optional_whitespace_newline();
        self.advance(); // 'alias'
        self.optional_whitespace_newline();

        let placeholder =
            self.alloc_decl(start, parent, DeclKind::Alias(AliasDecl { name, templates: Vec::new(), source_type: crate::ast::TypeId(0) }));
        let own_parent = Some(NodeId::Decl(placeholder));

        let templates = if self.current_kind() == TokenKind::Lt { self.parse_template_params(own_parent) } else { Vec::new() };

        if !self.mandatory_whitespace() {
            return ParseResult::CommittedError;
        }
        if !self.expect(TokenKind::KwFrom, "'from' in alias declaration") {
            return ParseResult::CommittedError;
        }
        if !self.mandatory_whitespace() {
            return ParseResult::CommittedError;
        }
        let source_type = match self.parse_type(own_parent) {
            ParseResult::Matched(ty) => ty,
            _ => {
                self.error("expected a source type");
                return ParseResult::CommittedError;
            }
        };

        self.ast.decls[placeholder].kind = DeclKind::Alias(AliasDecl { name, templates, source_type });
        ParseResult::Matched(placeholder)
    }

    /// `IDENT ws ":" ws "variant" ws template_params? (mws "from" mws
    /// base_type)? ws "{" ws ((type_decl | variant_member stmt_sep)*) "}"`.
    fn parse_variant_decl(&mut self, parent: Option<NodeId>) -> ParseResult<DeclId> {
        let start = self.current_token();
        let name = self.current_symbol();
        self.advance();
        self.optional_whitespace_newline();
        self.advance(); // ':'
        self.optional_whitespace_newline();
        self.advance(); // 'variant'
        self.optional_whitespace_newline();

        let placeholder = self.alloc_decl(
            start,
            parent,
            DeclKind::Variant(VariantDecl { name, templates: Vec::new(), base_type: None, members: Vec::new(), nested: Vec::new() }),
        );
        let own_parent = Some(NodeId::Decl(placeholder));

        let templates = if self.current_kind() == TokenKind::Lt { self.parse_template_params(own_parent) } else { Vec::new() };

        let base_type = {
            let checkpoint = self.mark();
            self.optional_whitespace_newline();
            if self.match_token(TokenKind::KwFrom) {
                if !self.mandatory_whitespace() {
                    None
                } else {
                    match self.parse_type(own_parent) {
                        ParseResult::Matched(ty) => Some(ty),
                        _ => {
                            self.reset(checkpoint);
                            None
                        }
                    }
                }
            } else {
                self.reset(checkpoint);
                None
            }
        };

        self.optional_whitespace_newline();
        if !self.expect(TokenKind::LBrace, "'{' to open variant body") {
            return ParseResult::CommittedError;
        }

        let mut members = Vec::new();
        let mut nested = Vec::new();
        let mut next_tag: i64 = 0;
        loop {
            self.optional_whitespace_newline();
            if self.match_token(TokenKind::RBrace) || self.is_at_end() {
                break;
            }
            if self.decl_of_any(&[TokenKind::KwStruct, TokenKind::KwVariant, TokenKind::KwAlias]) {
                match self.parse_declaration(own_parent) {
                    ParseResult::Matched(id) => nested.push(id),
                    _ => {
                        self.error("expected a nested type declaration");
                        self.advance();
                        continue;
                    }
                }
            } else if self.current_kind() == TokenKind::Ident {
                let member_name = self.current_symbol();
                self.advance();
                let payload = if self.current_kind() == TokenKind::LParen {
                    self.parse_type(own_parent).matched()
                } else {
                    let checkpoint = self.mark();
                    self.optional_whitespace_newline();
                    if self.current_kind() == TokenKind::LParen {
                        self.parse_type(own_parent).matched()
                    } else {
                        self.reset(checkpoint);
                        None
                    }
                };
                let tag = {
                    let checkpoint = self.mark();
                    self.optional_whitespace_newline();
                    if self.match_token(TokenKind::Eq) {
                        self.optional_whitespace_newline();
                        if self.current_kind() == TokenKind::IntLit {
                            let text = self.text_of(self.current_token());
                            self.advance();
                            parse_int_literal_text(text).unwrap_or_else(|| {
                                self.error("variant tag must be an integer literal");
                                next_tag
                            })
                        } else {
                            self.error("variant tag must be an integer literal");
                            self.reset(checkpoint);
                            next_tag
                        }
                    } else {
                        self.reset(checkpoint);
                        next_tag
                    }
                };
                next_tag = tag + 1;
                members.push(VariantMember { name: member_name, payload, tag });
            } else {
                self.error("expected a variant member");
                self.advance();
                continue;
            }
            self.optional_whitespace_newline();
            if self.current_kind() != TokenKind::RBrace {
                self.statement_separator();
            }
        }

        self.ast.decls[placeholder].kind = DeclKind::Variant(VariantDecl { name, templates, base_type, members, nested });
        ParseResult::Matched(placeholder)
    }

    /// `"extern" mws "func" ws template_params? ws arglist_optional_names ws
    /// ("->" ws type)?` or `"inline"? ws "func" ws template_params? ws
    /// arglist_mandatory_names ws ("->" ws type)? ws scope`.
    fn parse_function_decl(&mut self, parent: Option<NodeId>) -> ParseResult<DeclId> {
        let entry = self.mark();
        let start = self.current_token();
        let name = self.current_symbol();
        self.advance();
        self.optional_whitespace_newline();
        self.advance(); // ':'
        self.optional_whitespace_newline();

        let is_extern = self.match_token(TokenKind::KwExtern);
        let is_inline = !is_extern && self.match_token(TokenKind::KwInline);

        if is_extern {
            if !self.mandatory_whitespace() {
                return ParseResult::CommittedError;
            }
        } else {
            self.optional_whitespace_newline();
        }
        if !self.expect(TokenKind::KwFunc, "'func'") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();

        let placeholder = self.alloc_decl(
            start,
            parent,
            DeclKind::Function(FunctionDecl {
                name,
                is_extern,
                is_inline,
                templates: Vec::new(),
                params: Vec::new(),
                return_type: None,
                body: None,
            }),
        );
        let own_parent = Some(NodeId::Decl(placeholder));

        let templates = if self.current_kind() == TokenKind::Lt { self.parse_template_params(own_parent) } else { Vec::new() };
        if is_extern && !templates.is_empty() {
            self.error("extern functions cannot define templates");
            self.reset(entry);
            return ParseResult::NoMatch;
        }

        self.optional_whitespace_newline();
        if !self.expect(TokenKind::LParen, "'(' to open parameter list") {
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();
        let mut params = Vec::new();
        if self.current_kind() != TokenKind::RParen {
            loop {
                match self.parse_function_param(own_parent, !is_extern) {
                    Some(param) => params.push(param),
                    None => break,
                }
                self.optional_whitespace_newline();
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
                self.optional_whitespace_newline();
            }
        }
        self.optional_whitespace_newline();
        self.expect(TokenKind::RParen, "')' to close parameter list");

        self.optional_whitespace_newline();
        let return_type = if self.match_token(TokenKind::Arrow) {
            self.optional_whitespace_newline();
            self.parse_type(own_parent).matched()
        } else {
            None
        };

        let body = if is_extern {
            let checkpoint = self.mark();
            self.optional_whitespace_newline();
            if self.current_kind() == TokenKind::LBrace {
                self.error("extern functions cannot define a body");
                self.reset(entry);
                return ParseResult::NoMatch;
            }
            self.reset(checkpoint);
            None
        } else {
            self.optional_whitespace_newline();
            match self.parse_scope(own_parent) {
                ParseResult::Matched(id) => Some(id),
                _ => {
                    self.error("expected a function body");
                    None
                }
            }
        };

        self.ast.decls[placeholder].kind =
            DeclKind::Function(FunctionDecl { name, is_extern, is_inline, templates, params, return_type, body });
        ParseResult::Matched(placeholder)
    }

    fn parse_function_param(&mut self, parent: Option<NodeId>, mandatory_name: bool) -> Option<FunctionParam> {
        if self.current_kind() == TokenKind::Ident {
            let checkpoint = self.mark();
            let name = self.current_symbol();
            self.advance();
            self.optional_whitespace_newline();
            if self.match_token(TokenKind::Colon) {
                self.optional_whitespace_newline();
                if let ParseResult::Matched(ty) = self.parse_type(parent) {
                    return Some(FunctionParam { name: Some(name), ty });
                }
            }
            self.reset(checkpoint);
        }
        if mandatory_name {
            self.error("expected a parameter name");
            None
        } else {
            self.parse_type(parent).matched().map(|ty| FunctionParam { name: None, ty })
        }
    }

    /// Typed form: `IDENT ws ":" (mws ("extern"|"static"))* ws type (ws "="
    /// ws expression)?`. Inferred form: `IDENT ws ":=" (mws "static")* ws
    /// expression`.
    pub fn parse_variable_decl(&mut self, parent: Option<NodeId>) -> ParseResult<DeclId> {
        let checkpoint = self.mark();
        if self.current_kind() != TokenKind::Ident {
            return ParseResult::NoMatch;
        }
        let start = self.current_token();
        let name = self.current_symbol();
        self.advance();
        self.optional_whitespace_newline();

        if self.match_token(TokenKind::ColonEq) {
            let mut is_static = false;
            loop {
                let save = self.mark();
                if !self.try_mandatory_whitespace() {
                    self.reset(save);
                    break;
                }
                if self.match_token(TokenKind::KwStatic) {
                    is_static = true;
                    continue;
                }
                self.reset(save);
                break;
            }
            self.optional_whitespace_newline();
            let init = match self.parse_expression(parent) {
                ParseResult::Matched(id) => id,
                _ => {
                    self.error("expected an initializer expression");
                    return ParseResult::CommittedError;
                }
            };
            let token = start.concat(&self.tokens_last_consumed());
            return ParseResult::Matched(self.alloc_decl(
                token,
                parent,
                DeclKind::Variable(VariableDecl { name, ty: None, init: Some(init), is_extern: false, is_static }),
            ));
        }

        if !self.match_token(TokenKind::Colon) {
            self.reset(checkpoint);
            return ParseResult::NoMatch;
        }

        let mut is_extern = false;
        let mut is_static = false;
        loop {
            let save = self.mark();
            if !self.try_mandatory_whitespace() {
                self.reset(save);
                break;
            }
            if self.match_token(TokenKind::KwExtern) {
                is_extern = true;
                continue;
            }
            if self.match_token(TokenKind::KwStatic) {
                is_static = true;
                continue;
            }
            self.reset(save);
            break;
        }
        self.optional_whitespace_newline();
        let ty = match self.parse_type(parent) {
            ParseResult::Matched(ty) => ty,
            _ => {
                self.error("expected a type");
                return ParseResult::CommittedError;
            }
        };

        let mut init = None;
        let save = self.mark();
        self.optional_whitespace_newline();
        if self.match_token(TokenKind::Eq) {
            self.optional_whitespace_newline();
            match self.parse_expression(parent) {
                ParseResult::Matched(id) => init = Some(id),
                _ => {
                    self.error("expected an initializer expression after '='");
                    return ParseResult::CommittedError;
                }
            }
        } else {
            self.reset(save);
        }

        if is_extern && init.is_some() {
            self.error("extern variables cannot have an initializer");
        }

        let token = start.concat(&self.tokens_last_consumed());
        ParseResult::Matched(self.alloc_decl(token, parent, DeclKind::Variable(VariableDecl { name, ty: Some(ty), init, is_extern, is_static })))
    }
}

/// Strips `_` separators and parses a plain non-negative decimal integer
/// literal's text. Variant tags are always base-10 (`INT_LITERAL` without a
/// base prefix in this position per the grammar) and never carry a type
/// suffix.
fn parse_int_literal_text(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    cleaned.parse::<i64>().ok()
}
