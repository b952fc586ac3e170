//! DOT-format AST dumper — illustrative of the tree's shape, not part of
//! the core lex/parse pipeline. Every node becomes a uniquely numbered
//! vertex; edges are labeled with the child's structural role.

use std::fmt::Write;

use crate::ast::{Ast, CallArg, DeclId, DeclKind, ExprId, ExprKind, MatchCase, StmtId, StmtKind, TypeId, TypeKind};

/// Renders `ast` as a `digraph { ... }` body suitable for Graphviz.
pub fn dump_dot(ast: &Ast) -> String {
    let mut out = String::new();
    out.push_str("digraph unit {\n");
    out.push_str("  node [shape=box, fontname=\"monospace\"];\n");
    let mut dumper = Dumper { ast, out: &mut out, next_id: 0 };
    if let Some(unit) = ast.unit {
        dumper.decl(unit);
    }
    drop(dumper);
    out.push_str("}\n");
    out
}

struct Dumper<'a> {
    ast: &'a Ast,
    out: &'a mut String,
    next_id: usize,
}

impl<'a> Dumper<'a> {
    fn vertex(&mut self, label: &str) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        let escaped = label.replace('"', "\\\"");
        writeln!(self.out, "  n{id} [label=\"{escaped}\"];").unwrap();
        id
    }

    fn edge(&mut self, from: usize, to: usize, role: &str) {
        writeln!(self.out, "  n{from} -> n{to} [label=\"{role}\"];").unwrap();
    }

    fn decl(&mut self, id: DeclId) -> usize {
        let node = &self.ast.decls[id];
        let vertex = match &node.kind {
            DeclKind::Unit(unit) => {
                let v = self.vertex("Unit");
                for &u in &unit.uses {
                    let c = self.decl(u);
                    self.edge(v, c, "use");
                }
                for &i in &unit.imports {
                    let c = self.decl(i);
                    self.edge(v, c, "import");
                }
                for &d in &unit.decls {
                    let c = self.decl(d);
                    self.edge(v, c, "decl");
                }
                v
            }
            DeclKind::Use(u) => self.vertex(&format!("Use({})", u.library.as_str())),
            DeclKind::Import(i) => self.vertex(&format!("Import({})", i.path.as_str())),
            DeclKind::Namespace(ns) => {
                let name = ns.name.segments.iter().map(|s| s.as_str()).collect::<Vec<_>>().join("::");
                let v = self.vertex(&format!("Namespace({name})"));
                for &d in &ns.decls {
                    let c = self.decl(d);
                    self.edge(v, c, "decl");
                }
                v
            }
            DeclKind::Template(t) => self.vertex(&format!("Template({})", t.name.as_str())),
            DeclKind::Variable(var) => {
                let v = self.vertex(&format!("Variable({}, extern={}, static={})", var.name.as_str(), var.is_extern, var.is_static));
                if let Some(ty) = var.ty {
                    let c = self.ty(ty);
                    self.edge(v, c, "type");
                }
                if let Some(init) = var.init {
                    let c = self.expr(init);
                    self.edge(v, c, "init_expr");
                }
                v
            }
            DeclKind::Struct(s) => {
                let v = self.vertex(&format!("Struct({})", s.name.as_str()));
                for &f in &s.fields {
                    let c = self.decl(f);
                    self.edge(v, c, "field");
                }
                for &n in &s.nested {
                    let c = self.decl(n);
                    self.edge(v, c, "nested");
                }
                v
            }
            DeclKind::Alias(a) => {
                let v = self.vertex(&format!("Alias({})", a.name.as_str()));
                let c = self.ty(a.source_type);
                self.edge(v, c, "source_type");
                v
            }
            DeclKind::Variant(variant) => {
                let v = self.vertex(&format!("Variant({})", variant.name.as_str()));
                if let Some(base) = variant.base_type {
                    let c = self.ty(base);
                    self.edge(v, c, "base_type");
                }
                for member in &variant.members {
                    let m = self.vertex(&format!("{}={}", member.name.as_str(), member.tag));
                    self.edge(v, m, "member");
                    if let Some(payload) = member.payload {
                        let c = self.ty(payload);
                        self.edge(m, c, "payload");
                    }
                }
                for &n in &variant.nested {
                    let c = self.decl(n);
                    self.edge(v, c, "nested");
                }
                v
            }
            DeclKind::Function(f) => {
                let v = self.vertex(&format!("Function({}, extern={}, inline={})", f.name.as_str(), f.is_extern, f.is_inline));
                for param in &f.params {
                    let label = param.name.map(|n| n.as_str().to_string()).unwrap_or_else(|| "<anon>".to_string());
                    let p = self.vertex(&format!("Param({label})"));
                    self.edge(v, p, "param");
                    let c = self.ty(param.ty);
                    self.edge(p, c, "type");
                }
                if let Some(ret) = f.return_type {
                    let c = self.ty(ret);
                    self.edge(v, c, "return_type");
                }
                if let Some(body) = f.body {
                    let c = self.stmt(body);
                    self.edge(v, c, "body");
                }
                v
            }
        };
        vertex
    }

    fn ty(&mut self, id: TypeId) -> usize {
        let node = &self.ast.types[id];
        match &node.kind {
            TypeKind::Base(base) => {
                let name = base.name.segments.iter().map(|s| s.as_str()).collect::<Vec<_>>().join("::");
                let v = self.vertex(&format!("Type({name})"));
                for &arg in &base.args {
                    let c = self.ty(arg);
                    self.edge(v, c, "arg");
                }
                v
            }
            TypeKind::Pointer(inner) => {
                let v = self.vertex("Pointer");
                let c = self.ty(*inner);
                self.edge(v, c, "pointee");
                v
            }
            TypeKind::Array(inner) => {
                let v = self.vertex("Array");
                let c = self.ty(*inner);
                self.edge(v, c, "element");
                v
            }
            TypeKind::Function(shape) | TypeKind::Closure(shape) => {
                let label = if matches!(node.kind, TypeKind::Function(_)) { "Func" } else { "Closure" };
                let v = self.vertex(label);
                for &p in &shape.params {
                    let c = self.ty(p);
                    self.edge(v, c, "param");
                }
                if let Some(ret) = shape.return_type {
                    let c = self.ty(ret);
                    self.edge(v, c, "return_type");
                }
                v
            }
            TypeKind::Tuple(elems) => {
                let v = self.vertex("Tuple");
                for &e in elems {
                    let c = self.ty(e);
                    self.edge(v, c, "elem");
                }
                v
            }
        }
    }

    fn stmt(&mut self, id: StmtId) -> usize {
        let node = &self.ast.stmts[id];
        match node.kind.clone() {
            StmtKind::Scope(stmts) => {
                let v = self.vertex("Scope");
                for s in stmts {
                    let c = self.stmt(s);
                    self.edge(v, c, "stmt");
                }
                v
            }
            StmtKind::If(cond, then_branch, else_branch) => {
                let v = self.vertex("If");
                let c = self.expr(cond);
                self.edge(v, c, "cond");
                let c = self.stmt(then_branch);
                self.edge(v, c, "then");
                if let Some(e) = else_branch {
                    let c = self.stmt(e);
                    self.edge(v, c, "else");
                }
                v
            }
            StmtKind::While(label, cond, body) => {
                let label = label.map(|s| s.as_str().to_string()).unwrap_or_default();
                let v = self.vertex(&format!("While({label})"));
                let c = self.expr(cond);
                self.edge(v, c, "cond");
                let c = self.stmt(body);
                self.edge(v, c, "body");
                v
            }
            StmtKind::For(f) => {
                let label = f.label.map(|s| s.as_str().to_string()).unwrap_or_default();
                let v = self.vertex(&format!("For({label})"));
                for init in &f.init {
                    let c = match init {
                        crate::ast::ForInit::Decl(d) => self.decl(*d),
                        crate::ast::ForInit::Expr(e) => self.expr(*e),
                    };
                    self.edge(v, c, "init");
                }
                if let Some(cond) = f.cond {
                    let c = self.expr(cond);
                    self.edge(v, c, "cond");
                }
                if let Some(update) = f.update {
                    let c = self.expr(update);
                    self.edge(v, c, "update");
                }
                let c = self.stmt(f.body);
                self.edge(v, c, "body");
                v
            }
            StmtKind::Return(value) => {
                let v = self.vertex("Return");
                if let Some(value) = value {
                    let c = self.expr(value);
                    self.edge(v, c, "value");
                }
                v
            }
            StmtKind::Using(path, scope) => {
                let name = path.segments.iter().map(|s| s.as_str()).collect::<Vec<_>>().join("::");
                let v = self.vertex(&format!("Using({name})"));
                if let Some(scope) = scope {
                    let c = self.stmt(scope);
                    self.edge(v, c, "scope");
                }
                v
            }
            StmtKind::Defer(inner) => {
                let v = self.vertex("Defer");
                let c = self.stmt(inner);
                self.edge(v, c, "scope");
                v
            }
            StmtKind::Match(m) => {
                let v = self.vertex("Match");
                let c = self.expr(m.scrutinee);
                self.edge(v, c, "scrutinee");
                for case in &m.cases {
                    match case {
                        MatchCase::Simple(value, scope) => {
                            let case_v = self.vertex("case");
                            self.edge(v, case_v, "case");
                            let c = self.expr(*value);
                            self.edge(case_v, c, "value");
                            let c = self.stmt(*scope);
                            self.edge(case_v, c, "scope");
                        }
                        MatchCase::Is(tag, bindings, scope) => {
                            let case_v = self.vertex(&format!("case is {}", tag.as_str()));
                            self.edge(v, case_v, "case");
                            for binding in bindings {
                                let c = self.expr(*binding);
                                self.edge(case_v, c, "binding");
                            }
                            let c = self.stmt(*scope);
                            self.edge(case_v, c, "scope");
                        }
                    }
                }
                if let Some(else_scope) = m.else_scope {
                    let c = self.stmt(else_scope);
                    self.edge(v, c, "else");
                }
                v
            }
            StmtKind::Break(label) => self.vertex(&format!("Break({})", label.map(|s| s.as_str().to_string()).unwrap_or_default())),
            StmtKind::Continue(label) => self.vertex(&format!("Continue({})", label.map(|s| s.as_str().to_string()).unwrap_or_default())),
            StmtKind::Decl(decl) => {
                let v = self.vertex("DeclStmt");
                let c = self.decl(decl);
                self.edge(v, c, "decl");
                v
            }
            StmtKind::Expr(expr) => {
                let v = self.vertex("ExprStmt");
                let c = self.expr(expr);
                self.edge(v, c, "expr");
                v
            }
        }
    }

    fn expr(&mut self, id: ExprId) -> usize {
        let node = &self.ast.exprs[id];
        match node.kind.clone() {
            ExprKind::VarAccess(path, args) => {
                let name = path.segments.iter().map(|s| s.as_str()).collect::<Vec<_>>().join("::");
                let v = self.vertex(&format!("VarAccess({name})"));
                for arg in args {
                    let c = self.ty(arg);
                    self.edge(v, c, "template_arg");
                }
                v
            }
            ExprKind::FieldAccess(base, field) => {
                let v = self.vertex(&format!(".{}", field.as_str()));
                let c = self.expr(base);
                self.edge(v, c, "base");
                v
            }
            ExprKind::ArrayIndex(base, index) => {
                let v = self.vertex("Index");
                let c = self.expr(base);
                self.edge(v, c, "base");
                let c = self.expr(index);
                self.edge(v, c, "index");
                v
            }
            ExprKind::Call(callee, args) => {
                let v = self.vertex("Call");
                let c = self.expr(callee);
                self.edge(v, c, "callee");
                for arg in args {
                    match arg {
                        CallArg::Positional(e) => {
                            let c = self.expr(e);
                            self.edge(v, c, "arg");
                        }
                        CallArg::Named(name, e) => {
                            let c = self.expr(e);
                            self.edge(v, c, &format!("arg:{}", name.as_str()));
                        }
                    }
                }
                v
            }
            ExprKind::Sizeof(operand) => {
                let v = self.vertex("Sizeof");
                let c = match operand {
                    crate::ast::SizeofOperand::Expr(e) => self.expr(e),
                    crate::ast::SizeofOperand::Type(t) => self.ty(t),
                };
                self.edge(v, c, "operand");
                v
            }
            ExprKind::UnaryOp(op, operand) => {
                let v = self.vertex(&format!("{op:?}"));
                let c = self.expr(operand);
                self.edge(v, c, "operand");
                v
            }
            ExprKind::Cast(operand, ty) => {
                let v = self.vertex("Cast");
                let c = self.expr(operand);
                self.edge(v, c, "operand");
                let c = self.ty(ty);
                self.edge(v, c, "type");
                v
            }
            ExprKind::IsExpr(operand, tag, bindings) => {
                let v = self.vertex(&format!("Is({})", tag.as_str()));
                let c = self.expr(operand);
                self.edge(v, c, "operand");
                for binding in bindings {
                    let c = self.expr(binding);
                    self.edge(v, c, "binding");
                }
                v
            }
            ExprKind::BinaryOp(op, lhs, rhs) => {
                let v = self.vertex(&format!("{op:?}"));
                let c = self.expr(lhs);
                self.edge(v, c, "lhs");
                let c = self.expr(rhs);
                self.edge(v, c, "rhs");
                v
            }
            ExprKind::IfExpr(cond, then_branch, else_branch) => {
                let v = self.vertex("IfExpr");
                let c = self.expr(cond);
                self.edge(v, c, "cond");
                let c = self.expr(then_branch);
                self.edge(v, c, "then");
                let c = self.expr(else_branch);
                self.edge(v, c, "else");
                v
            }
            ExprKind::Assignment(op, target, value) => {
                let v = self.vertex(&format!("{op:?}"));
                let c = self.expr(target);
                self.edge(v, c, "target");
                let c = self.expr(value);
                self.edge(v, c, "value");
                v
            }
            ExprKind::Block(scope) => {
                let v = self.vertex("Block");
                let c = self.stmt(scope);
                self.edge(v, c, "scope");
                v
            }
            ExprKind::Int(value, suffix) => self.vertex(&format!("Int({value}, {suffix:?})")),
            ExprKind::Float(value, suffix) => self.vertex(&format!("Float({value}, {suffix:?})")),
            ExprKind::Char(c) => self.vertex(&format!("Char({c:?})")),
            ExprKind::String(s) => self.vertex(&format!("String({:?})", s.as_str())),
            ExprKind::Bool(b) => self.vertex(&format!("Bool({b})")),
            ExprKind::Null => self.vertex("Null"),
        }
    }
}
