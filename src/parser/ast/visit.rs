//! Exhaustive child enumeration over the AST.

use super::*;
use crate::base::Span;

/// A borrowed reference to any AST node
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Module(&'a Module),
    Import(&'a Import),
    ImportItem(&'a ImportItem),
    Export(&'a Export),
    Decl(&'a Decl),
    ProcHeading(&'a ProcHeading),
    Param(&'a Param),
    MethodHeading(&'a MethodHeading),
    MethodImpl(&'a MethodImpl),
    TypeSpec(&'a TypeSpec),
    ArrayIndex(&'a ArrayIndex),
    FieldDecl(&'a FieldDecl),
    ObjectSection(&'a ObjectSection),
    Stmt(&'a Stmt),
    CondBranch(&'a CondBranch),
    CaseArm(&'a CaseArm),
    MethodCall(&'a MethodCall),
    Expr(&'a Expr),
    Ident(&'a Ident),
    QualIdent(&'a QualIdent),
}

impl<'a> NodeRef<'a> {
    pub fn span(&self) -> Span {
        match *self {
            Self::Module(n) => n.span,
            Self::Import(n) => n.span(),
            Self::ImportItem(n) => n.span,
            Self::Export(n) => n.span,
            Self::Decl(n) => n.span(),
            Self::ProcHeading(n) => n.span,
            Self::Param(n) => n.span,
            Self::MethodHeading(n) => n.span,
            Self::MethodImpl(n) => n.span,
            Self::TypeSpec(n) => n.span(),
            Self::ArrayIndex(n) => n.span(),
            Self::FieldDecl(n) => n.span,
            Self::ObjectSection(n) => n.span,
            Self::Stmt(n) => n.span(),
            Self::CondBranch(n) => n.span,
            Self::CaseArm(n) => n.span,
            Self::MethodCall(n) => n.span,
            Self::Expr(n) => n.span(),
            Self::Ident(n) => n.span,
            Self::QualIdent(n) => n.span,
        }
    }

    /// Direct children, in source order
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        match *self {
            Self::Module(m) => {
                out.push(Self::Ident(&m.name));
                out.extend(m.imports.iter().map(Self::Import));
                out.extend(m.exports.iter().map(Self::Export));
                out.extend(m.decls.iter().map(Self::Decl));
                if let Some(body) = &m.body {
                    out.extend(body.iter().map(Self::Stmt));
                }
            }
            Self::Import(import) => match import {
                Import::From { module, items, .. } => {
                    out.push(Self::Ident(module));
                    out.extend(items.iter().map(Self::ImportItem));
                }
                Import::Modules { modules, .. } => out.extend(modules.iter().map(Self::Ident)),
            },
            Self::ImportItem(item) => {
                out.push(Self::Ident(&item.name));
                out.extend(item.alias.iter().map(Self::Ident));
            }
            Self::Export(export) => out.extend(export.names.iter().map(Self::Ident)),
            Self::Decl(decl) => match decl {
                Decl::Type(d) => {
                    out.push(Self::Ident(&d.name));
                    out.push(Self::TypeSpec(&d.spec));
                }
                Decl::Const(d) => {
                    out.push(Self::Ident(&d.name));
                    out.extend(d.ty.iter().map(Self::TypeSpec));
                    out.push(Self::Expr(&d.value));
                }
                Decl::Var(d) => {
                    out.extend(d.names.iter().map(Self::Ident));
                    out.push(Self::TypeSpec(&d.ty));
                    out.extend(d.init.iter().map(Self::Expr));
                }
                Decl::Procedure(d) => {
                    out.push(Self::ProcHeading(&d.heading));
                    out.extend(d.locals.iter().map(Self::Decl));
                    out.extend(d.body.iter().map(Self::Stmt));
                }
                Decl::ObjectImpl(d) => {
                    out.push(Self::Ident(&d.name));
                    out.extend(d.methods.iter().map(Self::MethodImpl));
                }
            },
            Self::ProcHeading(h) => {
                out.push(Self::Ident(&h.name));
                out.extend(h.params.iter().map(Self::Param));
                out.extend(h.return_type.iter().map(Self::TypeSpec));
            }
            Self::Param(p) => {
                out.extend(p.names.iter().map(Self::Ident));
                out.push(Self::TypeSpec(&p.ty));
            }
            Self::MethodHeading(h) => {
                out.push(Self::Ident(&h.name));
                out.extend(h.params.iter().map(Self::Param));
                out.extend(h.return_type.iter().map(Self::TypeSpec));
            }
            Self::MethodImpl(m) => {
                out.push(Self::MethodHeading(&m.heading));
                out.extend(m.locals.iter().map(Self::Decl));
                out.extend(m.body.iter().map(Self::Stmt));
            }
            Self::TypeSpec(spec) => match spec {
                TypeSpec::Named(name) => out.push(Self::QualIdent(name)),
                TypeSpec::Array { indices, element, .. } => {
                    out.extend(indices.iter().map(Self::ArrayIndex));
                    out.push(Self::TypeSpec(element));
                }
                TypeSpec::Record { fields, .. } => out.extend(fields.iter().map(Self::FieldDecl)),
                TypeSpec::Pointer { target, .. } => out.push(Self::TypeSpec(target)),
                TypeSpec::Set { element, .. } => out.push(Self::TypeSpec(element)),
                TypeSpec::Enum { values, .. } => out.extend(values.iter().map(Self::Ident)),
                TypeSpec::Subrange { low, high, .. } => {
                    out.push(Self::Expr(low));
                    out.push(Self::Expr(high));
                }
                TypeSpec::Procedure {
                    params,
                    return_type,
                    ..
                } => {
                    out.extend(params.iter().map(Self::Param));
                    out.extend(return_type.iter().map(|t| Self::TypeSpec(t)));
                }
                TypeSpec::Object(object) => {
                    out.extend(object.bases.iter().map(Self::QualIdent));
                    out.extend(object.sections.iter().map(Self::ObjectSection));
                }
            },
            Self::ArrayIndex(index) => match index {
                ArrayIndex::Range { low, high, .. } => {
                    out.push(Self::Expr(low));
                    out.push(Self::Expr(high));
                }
                ArrayIndex::Type(name) => out.push(Self::QualIdent(name)),
            },
            Self::FieldDecl(f) => {
                out.extend(f.names.iter().map(Self::Ident));
                out.push(Self::TypeSpec(&f.ty));
            }
            Self::ObjectSection(section) => {
                for member in &section.members {
                    out.push(match member {
                        ObjectMember::Field(field) => Self::FieldDecl(field),
                        ObjectMember::Method(method) => Self::MethodHeading(method),
                    });
                }
            }
            Self::Stmt(stmt) => stmt_children(stmt, &mut out),
            Self::CondBranch(b) => {
                out.push(Self::Expr(&b.cond));
                out.extend(b.body.iter().map(Self::Stmt));
            }
            Self::CaseArm(arm) => {
                out.extend(arm.labels.iter().map(Self::Expr));
                out.extend(arm.body.iter().map(Self::Stmt));
            }
            Self::MethodCall(call) => {
                out.push(Self::Expr(&call.target));
                out.push(Self::Ident(&call.method));
                out.extend(call.args.iter().map(Self::Expr));
            }
            Self::Expr(expr) => expr_children(expr, &mut out),
            Self::Ident(_) => {}
            Self::QualIdent(q) => {
                out.extend(q.module.iter().map(Self::Ident));
                out.push(Self::Ident(&q.name));
            }
        }
        out
    }

    /// This node and all its descendants, pre-order
    pub fn descendants(self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            let mut children = node.children();
            children.reverse();
            stack.extend(children);
            out.push(node);
        }
        out
    }
}

fn stmt_children<'a>(stmt: &'a Stmt, out: &mut Vec<NodeRef<'a>>) {
    use NodeRef as N;
    match stmt {
        Stmt::Assign { target, value, .. } => {
            out.push(N::Expr(target));
            out.push(N::Expr(value));
        }
        Stmt::Call { call, .. } => out.push(N::Expr(call)),
        Stmt::If {
            branches,
            else_body,
            ..
        } => {
            out.extend(branches.iter().map(N::CondBranch));
            if let Some(body) = else_body {
                out.extend(body.iter().map(N::Stmt));
            }
        }
        Stmt::While { cond, body, .. } => {
            out.push(N::Expr(cond));
            out.extend(body.iter().map(N::Stmt));
        }
        Stmt::For {
            var,
            from,
            to,
            step,
            body,
            ..
        } => {
            out.push(N::Ident(var));
            out.push(N::Expr(from));
            out.push(N::Expr(to));
            out.extend(step.iter().map(N::Expr));
            out.extend(body.iter().map(N::Stmt));
        }
        Stmt::ForEach {
            var,
            iterable,
            body,
            ..
        } => {
            out.push(N::Ident(var));
            out.push(N::Expr(iterable));
            out.extend(body.iter().map(N::Stmt));
        }
        Stmt::Repeat { body, cond, .. } => {
            out.extend(body.iter().map(N::Stmt));
            out.push(N::Expr(cond));
        }
        Stmt::Loop { body, .. } => out.extend(body.iter().map(N::Stmt)),
        Stmt::Case {
            selector,
            arms,
            otherwise,
            ..
        } => {
            out.push(N::Expr(selector));
            out.extend(arms.iter().map(N::CaseArm));
            if let Some(body) = otherwise {
                out.extend(body.iter().map(N::Stmt));
            }
        }
        Stmt::Return { value, .. } => out.extend(value.iter().map(N::Expr)),
        Stmt::Exit { .. } | Stmt::Terminate { .. } => {}
        Stmt::New { target, .. } | Stmt::Dispose { target, .. } => out.push(N::Expr(target)),
        Stmt::Ask { call, .. } => out.push(N::MethodCall(call)),
        Stmt::Tell { call, delay, .. } => {
            out.push(N::MethodCall(call));
            out.extend(delay.iter().map(N::Expr));
        }
        Stmt::Wait {
            kind,
            body,
            interrupt,
            ..
        } => {
            match kind {
                WaitKind::For(call) => out.push(N::MethodCall(call)),
                WaitKind::Duration(expr) => out.push(N::Expr(expr)),
            }
            out.extend(body.iter().map(N::Stmt));
            if let Some(body) = interrupt {
                out.extend(body.iter().map(N::Stmt));
            }
        }
        Stmt::Inherited { method, args, .. } => {
            out.push(N::Ident(method));
            out.extend(args.iter().map(N::Expr));
        }
        Stmt::With { subject, body, .. } => {
            out.push(N::Expr(subject));
            out.extend(body.iter().map(N::Stmt));
        }
    }
}

fn expr_children<'a>(expr: &'a Expr, out: &mut Vec<NodeRef<'a>>) {
    use NodeRef as N;
    match expr {
        Expr::Name(ident) => out.push(N::Ident(ident)),
        Expr::Integer { .. }
        | Expr::Real { .. }
        | Expr::Str { .. }
        | Expr::Char { .. }
        | Expr::Bool { .. }
        | Expr::Nil { .. }
        | Expr::SelfRef { .. }
        | Expr::Missing { .. } => {}
        Expr::Unary { operand, .. } => out.push(N::Expr(operand)),
        Expr::Binary { lhs, rhs, .. } => {
            out.push(N::Expr(lhs));
            out.push(N::Expr(rhs));
        }
        Expr::Call { callee, args, .. } => {
            out.push(N::Expr(callee));
            out.extend(args.iter().map(N::Expr));
        }
        Expr::Index { base, indices, .. } => {
            out.push(N::Expr(base));
            out.extend(indices.iter().map(N::Expr));
        }
        Expr::Field { base, field, .. } => {
            out.push(N::Expr(base));
            out.push(N::Ident(field));
        }
        Expr::Deref { base, .. } => out.push(N::Expr(base)),
        Expr::Set { elements, .. } => out.extend(elements.iter().map(N::Expr)),
        Expr::Range { low, high, .. } => {
            out.push(N::Expr(low));
            out.push(N::Expr(high));
        }
        Expr::Ask(call) => out.push(N::MethodCall(call)),
        Expr::Inherited { method, args, .. } => {
            out.push(N::Ident(method));
            out.extend(args.iter().map(N::Expr));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Position;
    use smol_str::SmolStr;

    fn span(start: usize, end: usize) -> Span {
        Span::new(Position::new(1, start + 1, start), Position::new(1, end + 1, end))
    }

    #[test]
    fn test_children_of_binary_expression() {
        let expr = Expr::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(Expr::Name(Ident::new(SmolStr::new("a"), span(0, 1)))),
            rhs: Box::new(Expr::Integer {
                value: 1,
                span: span(4, 5),
            }),
            span: span(0, 5),
        };
        let node = NodeRef::Expr(&expr);
        assert_eq!(node.children().len(), 2);
        // Expr, lhs Expr, Ident, rhs Expr
        assert_eq!(node.descendants().len(), 4);
    }
}
