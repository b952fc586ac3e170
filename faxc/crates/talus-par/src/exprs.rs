//! Expression parsing — a 16-level precedence cascade, one function per
//! level, from `assignment` (lowest) down to `atom` (highest). Every level
//! but `assignment` and `if_expr` is left-associative and built the same
//! way: parse one operand at the next-higher level, then loop consuming
//! `(ws OP ws operand)*` at this level.

use talus_lex::TokenKind;

use crate::ast::{AssOp, BinOp, CallArg, ExprId, FloatSuffix, NodeId, NumericSuffix, SizeofOperand, UnOp};
use crate::{ParseResult, Parser};

impl<'a> Parser<'a> {
    pub fn parse_expression(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        self.parse_assignment(parent)
    }

    /// `if_expr ( ws AssOp ws if_expr )?`, right-associative.
    fn parse_assignment(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        let start = self.current_token();
        let left = match self.parse_if_expr(parent) {
            ParseResult::Matched(id) => id,
            other => return other,
        };

        let checkpoint = self.mark();
        self.optional_whitespace_newline();
        let op = match self.current_kind() {
            TokenKind::Eq => Some(AssOp::Assign),
            TokenKind::PlusEq => Some(AssOp::AddAssign),
            TokenKind::MinusEq => Some(AssOp::SubAssign),
            TokenKind::StarEq => Some(AssOp::MulAssign),
            TokenKind::SlashEq => Some(AssOp::DivAssign),
            TokenKind::PercentEq => Some(AssOp::RemAssign),
            TokenKind::AmpEq => Some(AssOp::AndAssign),
            TokenKind::CaretEq => Some(AssOp::XorAssign),
            TokenKind::PipeEq => Some(AssOp::OrAssign),
            _ => None,
        };
        let Some(op) = op else {
            self.reset(checkpoint);
            return ParseResult::Matched(left);
        };
        self.advance();
        self.optional_whitespace_newline();
        let right = match self.parse_assignment(parent) {
            ParseResult::Matched(id) => id,
            _ => {
                self.error("expected an expression after assignment operator");
                return ParseResult::CommittedError;
            }
        };
        let token = start.concat(&self.tokens_last_consumed());
        ParseResult::Matched(self.alloc_expr(token, parent, crate::ast::ExprKind::Assignment(op, left, right)))
    }

    /// `"if" ws "(" ws expression ws ")" ws branch mws "else" ws branch`,
    /// where `branch` is a `{ ... }` scope or a bare expression. Falls
    /// through to `logical_or` when no `if` is present.
    fn parse_if_expr(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        if self.current_kind() != TokenKind::KwIf {
            return self.parse_logical_or(parent);
        }
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

        let then_branch = match self.parse_if_expr_branch(parent) {
            ParseResult::Matched(id) => id,
            _ => {
                self.error("expected a branch for the 'if' expression");
                return ParseResult::CommittedError;
            }
        };

        if !self.try_mandatory_whitespace() || !self.match_token(TokenKind::KwElse) {
            self.error("expected 'else' in an 'if' expression");
            return ParseResult::CommittedError;
        }
        self.optional_whitespace_newline();
        let else_branch = match self.parse_if_expr_branch(parent) {
            ParseResult::Matched(id) => id,
            _ => {
                self.error("expected a branch for the 'else' expression");
                return ParseResult::CommittedError;
            }
        };

        let token = start.concat(&self.tokens_last_consumed());
        ParseResult::Matched(self.alloc_expr(token, parent, crate::ast::ExprKind::IfExpr(cond, then_branch, else_branch)))
    }

    fn parse_if_expr_branch(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        if self.current_kind() == TokenKind::LBrace {
            match self.parse_scope(parent) {
                ParseResult::Matched(scope) => {
                    let token = self.ast.stmts[scope].token;
                    ParseResult::Matched(self.alloc_expr(token, parent, crate::ast::ExprKind::Block(scope)))
                }
                ParseResult::NoMatch => ParseResult::NoMatch,
                ParseResult::CommittedError => ParseResult::CommittedError,
            }
        } else {
            self.parse_assignment(parent)
        }
    }

    fn parse_logical_or(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        self.parse_left_assoc_binop(parent, Self::parse_logical_and, &[(TokenKind::PipePipe, BinOp::LogOr)])
    }

    fn parse_logical_and(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        self.parse_left_assoc_binop(parent, Self::parse_bit_or, &[(TokenKind::AmpAmp, BinOp::LogAnd)])
    }

    fn parse_bit_or(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        self.parse_left_assoc_binop(parent, Self::parse_bit_xor, &[(TokenKind::Pipe, BinOp::BitOr)])
    }

    fn parse_bit_xor(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        self.parse_left_assoc_binop(parent, Self::parse_bit_and, &[(TokenKind::Caret, BinOp::BitXor)])
    }

    fn parse_bit_and(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        self.parse_left_assoc_binop(parent, Self::parse_equality, &[(TokenKind::Amp, BinOp::BitAnd)])
    }

    fn parse_equality(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        self.parse_left_assoc_binop(
            parent,
            Self::parse_relational,
            &[(TokenKind::EqEq, BinOp::Eq), (TokenKind::BangEq, BinOp::Ne)],
        )
    }

    fn parse_relational(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        self.parse_left_assoc_binop(
            parent,
            Self::parse_shift,
            &[
                (TokenKind::LtEq, BinOp::Le),
                (TokenKind::GtEq, BinOp::Ge),
                (TokenKind::Lt, BinOp::Lt),
                (TokenKind::Gt, BinOp::Gt),
            ],
        )
    }

    fn parse_shift(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        self.parse_left_assoc_binop(
            parent,
            Self::parse_additive,
            &[
                (TokenKind::Shl, BinOp::ShLogLeft),
                (TokenKind::Shr, BinOp::ShLogRight),
                (TokenKind::Sal, BinOp::ShArLeft),
                (TokenKind::Sar, BinOp::ShArRight),
            ],
        )
    }

    fn parse_additive(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        self.parse_left_assoc_binop(parent, Self::parse_multiplicative, &[(TokenKind::Plus, BinOp::Add), (TokenKind::Minus, BinOp::Sub)])
    }

    fn parse_multiplicative(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        self.parse_left_assoc_binop(
            parent,
            Self::parse_cast_is,
            &[(TokenKind::Star, BinOp::Mul), (TokenKind::Slash, BinOp::Div), (TokenKind::Percent, BinOp::Rem)],
        )
    }

    /// Shared left-associative cascade: parse one `next` operand, then loop
    /// `(ws OP ws next)*`, left-folding into `BinaryOp` nodes.
    fn parse_left_assoc_binop(
        &mut self,
        parent: Option<NodeId>,
        next: fn(&mut Self, Option<NodeId>) -> ParseResult<ExprId>,
        ops: &[(TokenKind, BinOp)],
    ) -> ParseResult<ExprId> {
        let start = self.current_token();
        let mut left = match next(self, parent) {
            ParseResult::Matched(id) => id,
            other => return other,
        };
        loop {
            let checkpoint = self.mark();
            self.optional_whitespace_newline();
            let matched_op = ops.iter().find(|(kind, _)| self.current_kind() == *kind).map(|(_, op)| *op);
            let Some(op) = matched_op else {
                self.reset(checkpoint);
                break;
            };
            self.advance();
            self.optional_whitespace_newline();
            let right = match next(self, parent) {
                ParseResult::Matched(id) => id,
                _ => {
                    self.error("expected an operand");
                    return ParseResult::CommittedError;
                }
            };
            let token = start.concat(&self.tokens_last_consumed());
            left = self.alloc_expr(token, parent, crate::ast::ExprKind::BinaryOp(op, left, right));
        }
        ParseResult::Matched(left)
    }

    /// `multiplicative (mws "as" mws type | mws "is" mws IDENT (ws "("
    /// expr_list ")")?)*`
    fn parse_cast_is(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        let start = self.current_token();
        let mut operand = match self.parse_prefix(parent) {
            ParseResult::Matched(id) => id,
            other => return other,
        };
        loop {
            let checkpoint = self.mark();
            if !self.try_mandatory_whitespace() {
                self.reset(checkpoint);
                break;
            }
            if self.match_token(TokenKind::KwAs) {
                if !self.mandatory_whitespace() {
                    return ParseResult::CommittedError;
                }
                let ty = match self.parse_type(parent) {
                    ParseResult::Matched(id) => id,
                    _ => {
                        self.error("expected a type after 'as'");
                        return ParseResult::CommittedError;
                    }
                };
                let token = start.concat(&self.tokens_last_consumed());
                operand = self.alloc_expr(token, parent, crate::ast::ExprKind::Cast(operand, ty));
            } else if self.match_token(TokenKind::KwIs) {
                if !self.mandatory_whitespace() {
                    return ParseResult::CommittedError;
                }
                if self.current_kind() != TokenKind::Ident {
                    self.error("expected a tag name after 'is'");
                    return ParseResult::CommittedError;
                }
                let tag = self.current_symbol();
                self.advance();
                if self.current_kind() == TokenKind::ColonColon {
                    self.error("'is' tags must be unqualified, not namespaced");
                }
                let mut bindings = Vec::new();
                let args_checkpoint = self.mark();
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
                    self.reset(args_checkpoint);
                }
                let token = start.concat(&self.tokens_last_consumed());
                operand = self.alloc_expr(token, parent, crate::ast::ExprKind::IsExpr(operand, tag, bindings));
            } else {
                self.reset(checkpoint);
                break;
            }
        }
        ParseResult::Matched(operand)
    }

    /// Right-assoc `(+|-|!|~|*|&)* (postfix | sizeof_expr)`.
    fn parse_prefix(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        let start = self.current_token();
        let op = match self.current_kind() {
            TokenKind::Plus => Some(UnOp::Plus),
            TokenKind::Minus => Some(UnOp::Neg),
            TokenKind::Bang => Some(UnOp::Not),
            TokenKind::Tilde => Some(UnOp::BitNot),
            TokenKind::Star => Some(UnOp::Deref),
            TokenKind::Amp => Some(UnOp::AddrOf),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = match self.parse_prefix(parent) {
                ParseResult::Matched(id) => id,
                _ => {
                    self.error("expected an operand after prefix operator");
                    return ParseResult::CommittedError;
                }
            };
            if op == UnOp::Neg {
                if let crate::ast::ExprKind::Int(_, suffix) = self.ast.exprs[operand].kind {
                    if is_unsigned(suffix) {
                        self.error("unary '-' cannot apply to an unsigned integer literal");
                    }
                }
            }
            let token = start.concat(&self.tokens_last_consumed());
            return ParseResult::Matched(self.alloc_expr(token, parent, crate::ast::ExprKind::UnaryOp(op, operand)));
        }
        if self.current_kind() == TokenKind::KwSizeof {
            self.advance();
            self.optional_whitespace_newline();
            if !self.expect(TokenKind::LParen, "'(' after 'sizeof'") {
                return ParseResult::CommittedError;
            }
            self.optional_whitespace_newline();
            let type_checkpoint = self.mark();
            let operand = match self.parse_type(parent) {
                ParseResult::Matched(id) => SizeofOperand::Type(id),
                _ => {
                    self.reset(type_checkpoint);
                    match self.parse_expression(parent) {
                        ParseResult::Matched(id) => SizeofOperand::Expr(id),
                        _ => {
                            self.error("expected a type or expression inside 'sizeof'");
                            return ParseResult::CommittedError;
                        }
                    }
                }
            };
            self.optional_whitespace_newline();
            if !self.expect(TokenKind::RParen, "')' to close 'sizeof'") {
                return ParseResult::CommittedError;
            }
            let token = start.concat(&self.tokens_last_consumed());
            return ParseResult::Matched(self.alloc_expr(token, parent, crate::ast::ExprKind::Sizeof(operand)));
        }
        self.parse_postfix(parent)
    }

    /// Left-assoc chain of `[expr]`, `(args)`, `.IDENT` on an `atom`.
    fn parse_postfix(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        let start = self.current_token();
        let mut operand = match self.parse_atom(parent) {
            ParseResult::Matched(id) => id,
            other => return other,
        };
        loop {
            if self.match_token(TokenKind::LBracket) {
                self.optional_whitespace_newline();
                let index = match self.parse_expression(parent) {
                    ParseResult::Matched(id) => id,
                    _ => {
                        self.error("expected an index expression");
                        return ParseResult::CommittedError;
                    }
                };
                self.optional_whitespace_newline();
                if !self.expect(TokenKind::RBracket, "']' to close index expression") {
                    return ParseResult::CommittedError;
                }
                let token = start.concat(&self.tokens_last_consumed());
                operand = self.alloc_expr(token, parent, crate::ast::ExprKind::ArrayIndex(operand, index));
            } else if self.match_token(TokenKind::LParen) {
                self.optional_whitespace_newline();
                let mut args = Vec::new();
                if self.current_kind() != TokenKind::RParen {
                    loop {
                        match self.parse_call_arg(parent) {
                            Ok(arg) => args.push(arg),
                            Err(other) => return other,
                        }
                        self.optional_whitespace_newline();
                        if !self.match_token(TokenKind::Comma) {
                            break;
                        }
                        self.optional_whitespace_newline();
                    }
                }
                self.optional_whitespace_newline();
                if !self.expect(TokenKind::RParen, "')' to close call arguments") {
                    return ParseResult::CommittedError;
                }
                let token = start.concat(&self.tokens_last_consumed());
                operand = self.alloc_expr(token, parent, crate::ast::ExprKind::Call(operand, args));
            } else if self.match_token(TokenKind::Dot) {
                if self.current_kind() != TokenKind::Ident {
                    self.error("expected an identifier after '.'");
                    return ParseResult::CommittedError;
                }
                let field = self.current_symbol();
                self.advance();
                let token = start.concat(&self.tokens_last_consumed());
                operand = self.alloc_expr(token, parent, crate::ast::ExprKind::FieldAccess(operand, field));
            } else {
                break;
            }
        }
        ParseResult::Matched(operand)
    }

    /// `IDENT ":" ws expression` (named) or a bare `expression`
    /// (positional). `Err` carries the non-matched/errored `ParseResult` so
    /// the caller can propagate it without re-wrapping.
    fn parse_call_arg(&mut self, parent: Option<NodeId>) -> Result<CallArg, ParseResult<ExprId>> {
        if self.current_kind() == TokenKind::Ident {
            let checkpoint = self.mark();
            let name = self.current_symbol();
            self.advance();
            if self.match_token(TokenKind::Colon) {
                self.optional_whitespace_newline();
                return match self.parse_expression(parent) {
                    ParseResult::Matched(id) => Ok(CallArg::Named(name, id)),
                    other => Err(other),
                };
            }
            self.reset(checkpoint);
        }
        match self.parse_expression(parent) {
            ParseResult::Matched(id) => Ok(CallArg::Positional(id)),
            other => Err(other),
        }
    }

    /// `literal | dotted_name (ws template_args)? | "(" ws expression ws ")"`
    fn parse_atom(&mut self, parent: Option<NodeId>) -> ParseResult<ExprId> {
        let start = self.current_token();
        match self.current_kind() {
            TokenKind::IntLit => {
                let (value, suffix) = self.parse_int_literal_token();
                ParseResult::Matched(self.alloc_expr(start, parent, crate::ast::ExprKind::Int(value, suffix)))
            }
            TokenKind::FloatLit => {
                let (value, suffix) = self.parse_float_literal_token();
                ParseResult::Matched(self.alloc_expr(start, parent, crate::ast::ExprKind::Float(value, suffix)))
            }
            TokenKind::CharLit => {
                let text = self.text_of(start);
                let value = self.unescape_char_literal(text);
                self.advance();
                ParseResult::Matched(self.alloc_expr(start, parent, crate::ast::ExprKind::Char(value)))
            }
            TokenKind::StringLit => {
                let text = self.text_of(start);
                let unescaped = unescape(strip_quotes(text));
                self.advance();
                let sym = talus_util::Symbol::intern(&unescaped);
                ParseResult::Matched(self.alloc_expr(start, parent, crate::ast::ExprKind::String(sym)))
            }
            TokenKind::BoolLit => {
                let text = self.text_of(start);
                let value = text == "true";
                self.advance();
                ParseResult::Matched(self.alloc_expr(start, parent, crate::ast::ExprKind::Bool(value)))
            }
            TokenKind::NullLit => {
                self.advance();
                ParseResult::Matched(self.alloc_expr(start, parent, crate::ast::ExprKind::Null))
            }
            TokenKind::LParen => {
                self.advance();
                self.optional_whitespace_newline();
                let inner = match self.parse_expression(parent) {
                    ParseResult::Matched(id) => id,
                    _ => {
                        self.error("expected an expression inside parentheses");
                        return ParseResult::CommittedError;
                    }
                };
                self.optional_whitespace_newline();
                if !self.expect(TokenKind::RParen, "')' to close parenthesized expression") {
                    return ParseResult::CommittedError;
                }
                ParseResult::Matched(inner)
            }
            TokenKind::Ident => {
                let path = self.parse_dotted_name().expect("current token is Ident");
                let args = self.try_template_type_args(parent);
                let token = start.concat(&self.tokens_last_consumed());
                ParseResult::Matched(self.alloc_expr(token, parent, crate::ast::ExprKind::VarAccess(path, args)))
            }
            _ => ParseResult::NoMatch,
        }
    }

    fn parse_int_literal_token(&mut self) -> (i64, NumericSuffix) {
        let token = self.current_token();
        let text = self.text_of(token);
        self.advance();
        parse_int_literal_text(text).unwrap_or_else(|| {
            self.error("malformed integer literal");
            (0, NumericSuffix::default())
        })
    }

    fn parse_float_literal_token(&mut self) -> (f64, FloatSuffix) {
        let token = self.current_token();
        let text = self.text_of(token);
        self.advance();
        let (digits, suffix) = split_suffix(text, &[("f16", FloatSuffix::F16), ("f32", FloatSuffix::F32), ("f64", FloatSuffix::F64)]);
        let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
        match cleaned.parse::<f64>() {
            Ok(value) => (value, suffix.unwrap_or(FloatSuffix::F64)),
            Err(_) => {
                self.error("malformed float literal");
                (0.0, FloatSuffix::F64)
            }
        }
    }

    fn unescape_char_literal(&self, text: &str) -> char {
        let inner = strip_quotes(text);
        let unescaped = unescape(inner);
        let mut chars = unescaped.chars();
        let first = chars.next();
        let rest_is_empty = chars.next().is_none();
        match first {
            Some(c) if rest_is_empty => c,
            Some(_) => {
                self.error("character literal must contain exactly one character");
                '\0'
            }
            None => {
                self.error("character literal must not be empty");
                '\0'
            }
        }
    }
}

fn strip_quotes(text: &str) -> &str {
    text.get(1..text.len().saturating_sub(1)).unwrap_or("")
}

/// Decodes the escape sequences from §4.1: `\' \" \0 \b \f \n \r \t \v`,
/// `\xHH` (exactly two hex digits), and `\OOO` (one to three octal digits).
/// An unrecognized escape is preserved verbatim, backslash included.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('\'') => {
                out.push('\'');
                chars.next();
            }
            Some('"') => {
                out.push('"');
                chars.next();
            }
            Some('0') if !matches!(chars.clone().nth(1), Some(d) if d.is_digit(8)) => {
                out.push('\0');
                chars.next();
            }
            Some('b') => {
                out.push('\u{8}');
                chars.next();
            }
            Some('f') => {
                out.push('\u{c}');
                chars.next();
            }
            Some('n') => {
                out.push('\n');
                chars.next();
            }
            Some('r') => {
                out.push('\r');
                chars.next();
            }
            Some('t') => {
                out.push('\t');
                chars.next();
            }
            Some('v') => {
                out.push('\u{b}');
                chars.next();
            }
            Some('x') => {
                chars.next();
                let hex: String = chars.by_ref().take(2).collect();
                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => out.push(byte as char),
                    Err(_) => {
                        out.push('\\');
                        out.push('x');
                        out.push_str(&hex);
                    }
                }
            }
            Some(d) if d.is_digit(8) => {
                let octal: String = chars.clone().take_while(|c| c.is_digit(8)).take(3).collect();
                for _ in 0..octal.len() {
                    chars.next();
                }
                match u32::from_str_radix(&octal, 8).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push_str(&octal);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
                chars.next();
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Strips a known textual suffix (tried longest-first) from `text`,
/// returning the remaining digits and the matched suffix, if any.
fn split_suffix<T: Copy>(text: &str, suffixes: &[(&str, T)]) -> (String, Option<T>) {
    for (name, value) in suffixes {
        if let Some(digits) = text.strip_suffix(name) {
            return (digits.to_string(), Some(*value));
        }
    }
    (text.to_string(), None)
}

/// Integer literal per §4.3: optional base prefix (`0x`/`0o`/`0b`, else
/// decimal), digits with `_` separators, optional suffix
/// `s8|s16|s32|s64|u8|u16|u32|u64`. The lexer never includes a sign in an
/// `IntLit` token — `-` is a separate `Minus` token folded in as
/// [`crate::ast::UnOp::Neg`] by [`Parser::parse_prefix`], which is also
/// where a negated unsigned literal is rejected.
fn parse_int_literal_text(text: &str) -> Option<(i64, NumericSuffix)> {
    let (digits, suffix) = split_suffix(
        text,
        &[
            ("s8", NumericSuffix::I8),
            ("s16", NumericSuffix::I16),
            ("s32", NumericSuffix::I32),
            ("s64", NumericSuffix::I64),
            ("u8", NumericSuffix::U8),
            ("u16", NumericSuffix::U16),
            ("u32", NumericSuffix::U32),
            ("u64", NumericSuffix::U64),
        ],
    );
    let digits = digits.trim();

    let (radix, body) = if let Some(rest) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, rest)
    } else if let Some(rest) = digits.strip_prefix("0o").or_else(|| digits.strip_prefix("0O")) {
        (8, rest)
    } else if let Some(rest) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, rest)
    } else {
        (10, digits)
    };
    let cleaned: String = body.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    let magnitude = u64::from_str_radix(&cleaned, radix).ok()? as i128;

    let suffix = suffix.unwrap_or_default();
    if !fits_in_width(magnitude, suffix) {
        return None;
    }
    Some((magnitude as i64, suffix))
}

fn is_unsigned(suffix: NumericSuffix) -> bool {
    matches!(suffix, NumericSuffix::U8 | NumericSuffix::U16 | NumericSuffix::U32 | NumericSuffix::U64)
}

fn fits_in_width(value: i128, suffix: NumericSuffix) -> bool {
    let (min, max): (i128, i128) = match suffix {
        NumericSuffix::I8 => (i8::MIN as i128, i8::MAX as i128),
        NumericSuffix::I16 => (i16::MIN as i128, i16::MAX as i128),
        NumericSuffix::I32 => (i32::MIN as i128, i32::MAX as i128),
        NumericSuffix::I64 => (i64::MIN as i128, i64::MAX as i128),
        NumericSuffix::U8 => (0, u8::MAX as i128),
        NumericSuffix::U16 => (0, u16::MAX as i128),
        NumericSuffix::U32 => (0, u32::MAX as i128),
        NumericSuffix::U64 => (0, u64::MAX as i128),
    };
    value >= min && value <= max
}

#[cfg(test)]
mod tests {
    fn parse_expr(source: &str) -> (crate::ast::Ast, crate::ast::ExprId, talus_util::Handler) {
        let wrapped = format!("f : func () {{ x := {source} }}");
        let handler = talus_util::Handler::new();
        let tokens = crate::lex_all(&wrapped, &handler);
        let parser = crate::Parser::new(tokens, &wrapped, &handler);
        let ast = parser.parse_unit();
        let crate::ast::DeclKind::Unit(unit) = &ast.decls[ast.unit.unwrap()].kind else { unreachable!() };
        let crate::ast::DeclKind::Function(f) = &ast.decls[unit.decls[0]].kind else { unreachable!() };
        let crate::ast::StmtKind::Scope(stmts) = &ast.stmts[f.body.unwrap()].kind else { unreachable!() };
        let crate::ast::StmtKind::Decl(decl) = &ast.stmts[stmts[0]].kind else { unreachable!() };
        let crate::ast::DeclKind::Variable(v) = &ast.decls[*decl].kind else { unreachable!() };
        let init = v.init.unwrap();
        (ast, init, handler)
    }

    #[test]
    fn precedence_multiplicative_over_additive() {
        let (ast, id, handler) = parse_expr("1 + 2 * 3");
        assert!(!handler.has_errors());
        let crate::ast::ExprKind::BinaryOp(op, _, rhs) = &ast.exprs[id].kind else { panic!("expected binop") };
        assert_eq!(*op, crate::ast::BinOp::Add);
        assert!(matches!(ast.exprs[*rhs].kind, crate::ast::ExprKind::BinaryOp(crate::ast::BinOp::Mul, ..)));
    }

    #[test]
    fn right_associative_assignment_chain() {
        let (ast, id, handler) = parse_expr("a = b = 1");
        assert!(!handler.has_errors());
        let crate::ast::ExprKind::Assignment(_, _, rhs) = &ast.exprs[id].kind else { panic!("expected assignment") };
        assert!(matches!(ast.exprs[*rhs].kind, crate::ast::ExprKind::Assignment(..)));
    }

    #[test]
    fn template_args_disambiguate_from_relational() {
        let (ast, id, handler) = parse_expr("a < b");
        assert!(!handler.has_errors());
        assert!(matches!(ast.exprs[id].kind, crate::ast::ExprKind::BinaryOp(crate::ast::BinOp::Lt, ..)));
    }

    #[test]
    fn call_with_mixed_named_and_positional_args() {
        let (ast, id, handler) = parse_expr("f(1, y: 2)");
        assert!(!handler.has_errors());
        let crate::ast::ExprKind::Call(_, args) = &ast.exprs[id].kind else { panic!("expected call") };
        assert_eq!(args.len(), 2);
        assert!(matches!(args[0], crate::ast::CallArg::Positional(_)));
        assert!(matches!(args[1], crate::ast::CallArg::Named(..)));
    }

    #[test]
    fn integer_suffix_selects_width() {
        let (ast, id, handler) = parse_expr("200u8");
        assert!(!handler.has_errors());
        let crate::ast::ExprKind::Int(value, suffix) = &ast.exprs[id].kind else { panic!("expected int") };
        assert_eq!(*value, 200);
        assert_eq!(*suffix, crate::ast::NumericSuffix::U8);
    }

    #[test]
    fn integer_overflow_in_target_width_is_an_error() {
        let (_, _, handler) = parse_expr("1000s8");
        assert!(handler.has_errors());
    }

    #[test]
    fn negative_unsigned_literal_is_rejected() {
        let (_, _, handler) = parse_expr("-1u32");
        assert!(handler.has_errors());
    }

    #[test]
    fn string_escape_decoding() {
        let (ast, id, handler) = parse_expr(r#""a\nb""#);
        assert!(!handler.has_errors());
        let crate::ast::ExprKind::String(sym) = &ast.exprs[id].kind else { panic!("expected string") };
        assert_eq!(sym.as_str(), "a\nb");
    }

    #[test]
    fn sizeof_type_vs_expression() {
        let (ast, id, handler) = parse_expr("sizeof(int32)");
        assert!(!handler.has_errors());
        let crate::ast::ExprKind::Sizeof(operand) = &ast.exprs[id].kind else { panic!("expected sizeof") };
        assert!(matches!(operand, crate::ast::SizeofOperand::Type(_)));
    }
}
