//! Type parsing — base, pointer, array, function, closure, and tuple types.
//!
//! `type ← (base_type | func_type | closure_type | tuple_type) ( "*" | "[" ws "]" )*`
//! The postfix `*`/`[]` suffixes are right-associative on the type to their
//! left, so `T*[]` parses as "array of pointer to T", not "pointer to array".

use talus_lex::TokenKind;

use crate::ast::{BaseType, FunctionTypeShape, NodeId, Path, TypeId, TypeKind};
use crate::{ParseResult, Parser};

impl<'a> Parser<'a> {
    pub fn parse_type(&mut self, parent: Option<NodeId>) -> ParseResult<TypeId> {
        let checkpoint = self.mark();
        let start = self.current_token();

        let kind = match self.current_kind() {
            TokenKind::Ident => match self.parse_base_type(parent) {
                Some(kind) => kind,
                None => {
                    self.reset(checkpoint);
                    return ParseResult::NoMatch;
                }
            },
            TokenKind::KwFuncType => {
                self.advance();
                TypeKind::Function(self.parse_common_params_and_return(parent))
            }
            TokenKind::KwClosureType => {
                self.advance();
                TypeKind::Closure(self.parse_common_params_and_return(parent))
            }
            TokenKind::LParen => {
                self.advance();
                self.optional_whitespace_newline();
                let mut elems = Vec::new();
                if self.current_kind() != TokenKind::RParen {
                    loop {
                        match self.parse_type(parent) {
                            ParseResult::Matched(id) => elems.push(id),
                            _ => {
                                self.reset(checkpoint);
                                return ParseResult::NoMatch;
                            }
                        }
                        self.optional_whitespace_newline();
                        if !self.match_token(TokenKind::Comma) {
                            break;
                        }
                        self.optional_whitespace_newline();
                    }
                }
                self.optional_whitespace_newline();
                if !self.expect(TokenKind::RParen, "')' to close tuple type") {
                    return ParseResult::CommittedError;
                }
                TypeKind::Tuple(elems)
            }
            _ => {
                self.reset(checkpoint);
                return ParseResult::NoMatch;
            }
        };

        let base_token = start.concat(&self.tokens_last_consumed());
        let mut id = self.alloc_type(base_token, parent, kind);

        loop {
            if self.match_token(TokenKind::Star) {
                let token = base_token.concat(&self.tokens_last_consumed());
                id = self.alloc_type(token, parent, TypeKind::Pointer(id));
            } else if self.current_kind() == TokenKind::LBracket && self.peek_kind(1) == TokenKind::RBracket {
                self.advance();
                self.advance();
                let token = base_token.concat(&self.tokens_last_consumed());
                id = self.alloc_type(token, parent, TypeKind::Array(id));
            } else {
                break;
            }
        }

        ParseResult::Matched(id)
    }

    fn parse_base_type(&mut self, parent: Option<NodeId>) -> Option<TypeKind> {
        let name = self.parse_dotted_name()?;
        let args = self.try_template_type_args(parent);
        Some(TypeKind::Base(BaseType { name, args }))
    }

    /// `dotted_name ← IDENT ("::" IDENT)*`. No surrounding whitespace is
    /// allowed between segments.
    pub fn parse_dotted_name(&mut self) -> Option<Path> {
        if self.current_kind() != TokenKind::Ident {
            return None;
        }
        let mut segments = vec![self.current_symbol()];
        self.advance();
        while self.current_kind() == TokenKind::ColonColon {
            self.advance();
            if self.current_kind() != TokenKind::Ident {
                self.error("expected an identifier after '::'");
                return Some(Path { segments });
            }
            segments.push(self.current_symbol());
            self.advance();
        }
        Some(Path { segments })
    }

    /// `template_args ← "<" ws type (ws "," ws type)* ws ">"`, tried behind
    /// a full checkpoint since a lone `<` disambiguates against the
    /// relational operator at expression level — if this doesn't fully
    /// resolve, the cursor rewinds to before the optional leading `ws`.
    pub fn try_template_type_args(&mut self, parent: Option<NodeId>) -> Vec<TypeId> {
        let checkpoint = self.mark();
        self.optional_whitespace_newline();
        if !self.match_token(TokenKind::Lt) {
            self.reset(checkpoint);
            return Vec::new();
        }
        self.optional_whitespace_newline();
        let mut args = Vec::new();
        loop {
            match self.parse_type(parent) {
                ParseResult::Matched(id) => args.push(id),
                _ => {
                    self.reset(checkpoint);
                    return Vec::new();
                }
            }
            self.optional_whitespace_newline();
            if !self.match_token(TokenKind::Comma) {
                break;
            }
            self.optional_whitespace_newline();
        }
        self.optional_whitespace_newline();
        if !self.match_token(TokenKind::Gt) {
            self.reset(checkpoint);
            return Vec::new();
        }
        args
    }

    /// `common_params_and_return ← ws ("(" ws (type (ws "," ws type)*)? ws ")")? ws ("->" ws type)?`
    fn parse_common_params_and_return(&mut self, parent: Option<NodeId>) -> FunctionTypeShape {
        self.optional_whitespace_newline();
        let mut params = Vec::new();
        if self.match_token(TokenKind::LParen) {
            self.optional_whitespace_newline();
            if self.current_kind() != TokenKind::RParen {
                loop {
                    match self.parse_type(parent) {
                        ParseResult::Matched(id) => params.push(id),
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
            self.expect(TokenKind::RParen, "')' to close parameter type list");
        }
        self.optional_whitespace_newline();
        let return_type = if self.match_token(TokenKind::Arrow) {
            self.optional_whitespace_newline();
            self.parse_type(parent).matched()
        } else {
            None
        };
        FunctionTypeShape { params, return_type }
    }

    /// `template_params ← "<" ws IDENT (ws "," ws IDENT)* ws ">"`.
    pub fn parse_template_params(&mut self, parent: Option<NodeId>) -> Vec<crate::ast::DeclId> {
        if !self.match_token(TokenKind::Lt) {
            return Vec::new();
        }
        let mut params = Vec::new();
        self.optional_whitespace_newline();
        loop {
            if self.current_kind() != TokenKind::Ident {
                self.error("expected a template parameter name");
                break;
            }
            let token = self.current_token();
            let name = self.current_symbol();
            self.advance();
            params.push(self.alloc_decl(token, parent, crate::ast::DeclKind::Template(crate::ast::TemplateDecl { name })));
            self.optional_whitespace_newline();
            if !self.match_token(TokenKind::Comma) {
                break;
            }
            self.optional_whitespace_newline();
        }
        self.optional_whitespace_newline();
        self.expect(TokenKind::Gt, "'>' to close template parameter list");
        params
    }
}
