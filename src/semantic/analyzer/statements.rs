use super::context::{AnalysisContext, Binding};
use crate::base::Span;
use crate::parser::{Expr, Ident, MethodCall, ParamMode, Stmt, WaitKind};
use crate::semantic::diagnostics::codes;
use crate::semantic::symbol_table::SymbolKind;
use crate::semantic::types::Type;

impl AnalysisContext<'_> {
    pub(super) fn check_block(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.check_stmt(stmt);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign { target, value, .. } => {
                // The value is read before the target is written: `x := x + 1`
                let value_ty = self.check_expr(value);
                let target_ty = self.check_target(target);
                if !self.assignable(&target_ty, &value_ty) {
                    self.diagnostics.error(
                        codes::TYPE_MISMATCH,
                        value.span(),
                        format!("cannot assign a {} value to a {} target", value_ty, target_ty),
                    );
                }
            }
            Stmt::Call { call, .. } => {
                self.check_expr(call);
            }
            Stmt::If {
                branches,
                else_body,
                ..
            } => {
                for branch in branches {
                    self.check_condition(&branch.cond);
                    self.check_block(&branch.body);
                }
                if let Some(body) = else_body {
                    self.check_block(body);
                }
            }
            Stmt::While { cond, body, .. } => {
                self.check_condition(cond);
                self.check_block(body);
            }
            Stmt::Repeat { body, cond, .. } => {
                self.check_block(body);
                self.check_condition(cond);
            }
            Stmt::For {
                var,
                from,
                to,
                step,
                body,
                ..
            } => {
                self.check_expr(from);
                self.check_expr(to);
                if let Some(step) = step {
                    self.check_expr(step);
                }
                self.write_name(var);
                self.check_block(body);
            }
            Stmt::ForEach {
                var,
                iterable,
                body,
                ..
            } => {
                self.check_expr(iterable);
                self.write_name(var);
                self.check_block(body);
            }
            Stmt::Loop { body, .. } => self.check_block(body),
            Stmt::Case {
                selector,
                arms,
                otherwise,
                ..
            } => {
                self.check_expr(selector);
                for arm in arms {
                    for label in &arm.labels {
                        self.check_expr(label);
                    }
                    self.check_block(&arm.body);
                }
                if let Some(body) = otherwise {
                    self.check_block(body);
                }
            }
            Stmt::Return { value, span } => self.check_return(value.as_ref(), *span),
            Stmt::Exit { .. } | Stmt::Terminate { .. } => {}
            Stmt::New { target, .. } => {
                self.check_target(target);
            }
            Stmt::Dispose { target, .. } => {
                self.check_expr(target);
            }
            Stmt::Ask { call, .. } => {
                self.check_method_call(call);
            }
            Stmt::Tell { call, delay, .. } => {
                self.check_method_call(call);
                if let Some(delay) = delay {
                    self.check_numeric(delay, "TELL delay");
                }
            }
            Stmt::Wait {
                kind,
                body,
                interrupt,
                ..
            } => {
                match kind {
                    WaitKind::For(call) => {
                        self.check_method_call(call);
                    }
                    WaitKind::Duration(duration) => self.check_numeric(duration, "WAIT DURATION"),
                }
                self.check_block(body);
                if let Some(interrupt) = interrupt {
                    self.check_block(interrupt);
                }
            }
            Stmt::Inherited { method, args, .. } => {
                self.check_inherited(method, args);
            }
            Stmt::With { subject, body, .. } => {
                self.check_expr(subject);
                // Fields of the subject are visible unqualified; they are not tracked
                self.with_depth += 1;
                self.check_block(body);
                self.with_depth -= 1;
            }
        }
    }

    /// Check the left side of an assignment and return its declared type
    pub(super) fn check_target(&mut self, target: &Expr) -> Type {
        if !target.is_designator() {
            self.diagnostics.error(
                codes::INVALID_ASSIGNMENT,
                target.span(),
                "left side of an assignment must be a variable, field or element",
            );
            self.check_expr(target);
            return Type::Unknown;
        }
        match target {
            Expr::Name(ident) => self.write_name(ident),
            _ => {
                // Writing into part of an OUT parameter counts as assigning it
                if let Some(id) = target
                    .root_name()
                    .and_then(|root| self.table.lookup_id(&root.name))
                {
                    self.mark_assigned(id);
                }
                self.check_expr(target)
            }
        }
    }

    /// Resolve a name being assigned to and check that it is assignable
    pub(super) fn write_name(&mut self, ident: &Ident) -> Type {
        let Some(binding) = self.resolve_name(ident) else {
            return Type::Unknown;
        };
        match &binding {
            Binding::Local(id) => {
                let id = *id;
                self.table.record_reference(id, ident.span);
                let symbol = self.table.symbol(id);
                let (kind, mode) = (symbol.kind, symbol.param_mode);
                if kind == SymbolKind::Parameter && mode == Some(ParamMode::In) {
                    self.diagnostics.error(
                        codes::ASSIGN_TO_IN_PARAMETER,
                        ident.span,
                        format!("cannot assign to IN parameter '{}'", ident.name),
                    );
                } else if !kind.is_assignable() {
                    self.diagnostics.error(
                        codes::INVALID_ASSIGNMENT,
                        ident.span,
                        format!("cannot assign to {} '{}'", kind.display(), ident.name),
                    );
                }
                self.mark_assigned(id);
            }
            Binding::External(symbol) => {
                if !symbol.kind.is_assignable() {
                    self.diagnostics.error(
                        codes::INVALID_ASSIGNMENT,
                        ident.span,
                        format!("cannot assign to {} '{}'", symbol.kind.display(), ident.name),
                    );
                }
            }
            Binding::Builtin => {
                self.diagnostics.error(
                    codes::INVALID_ASSIGNMENT,
                    ident.span,
                    format!("cannot assign to builtin '{}'", ident.name),
                );
            }
        }
        self.value_type(&binding)
    }

    fn check_condition(&mut self, cond: &Expr) {
        let ty = self.check_expr(cond);
        let ty = self.normalize(ty);
        if !matches!(ty, Type::Boolean | Type::Unknown | Type::Named { .. }) {
            self.diagnostics.error(
                codes::TYPE_MISMATCH,
                cond.span(),
                format!("condition must be BOOLEAN, found {}", ty),
            );
        }
    }

    fn check_numeric(&mut self, expr: &Expr, what: &str) {
        let ty = self.check_expr(expr);
        let ty = self.normalize(ty);
        if !ty.is_numeric() && !matches!(ty, Type::Unknown | Type::Named { .. }) {
            self.diagnostics.error(
                codes::TYPE_MISMATCH,
                expr.span(),
                format!("{} must be numeric, found {}", what, ty),
            );
        }
    }

    fn check_return(&mut self, value: Option<&Expr>, span: Span) {
        let Some(value) = value else {
            return;
        };
        let value_ty = self.check_expr(value);
        let Some(routine) = self.routines.last() else {
            return;
        };
        match routine.result.clone() {
            Some(expected) => {
                if !self.assignable(&expected, &value_ty) {
                    self.diagnostics.error(
                        codes::TYPE_MISMATCH,
                        value.span(),
                        format!("RETURN value is {} but the result type is {}", value_ty, expected),
                    );
                }
            }
            None => self.diagnostics.error(
                codes::TYPE_MISMATCH,
                span,
                "RETURN with a value in a routine that has no result type",
            ),
        }
    }

    /// `obj [TO] Method(args)` of ASK, TELL and WAIT FOR
    pub(super) fn check_method_call(&mut self, call: &MethodCall) -> Type {
        let target = self.check_expr(&call.target);
        let method = self.member_type(target, &call.method);
        match method {
            Type::Procedure(signature) => {
                self.check_args(&call.args, Some(&signature), call.span);
                signature.result.unwrap_or(Type::Void)
            }
            _ => {
                self.check_args(&call.args, None, call.span);
                Type::Unknown
            }
        }
    }

    /// `INHERITED Method(args)`: the method must exist on a base type
    pub(super) fn check_inherited(&mut self, method: &Ident, args: &[Expr]) -> Type {
        let context = self
            .objects
            .last()
            .filter(|o| o.chain_resolved)
            .and_then(|o| o.object.clone());
        let base = match &context {
            Some(object) => {
                let base = self.base_method(object, &method.name);
                if base.is_none() {
                    self.diagnostics.error(
                        codes::UNDEFINED_REFERENCE,
                        method.span,
                        format!(
                            "no base type of '{}' declares a method '{}'",
                            object.name, method.name
                        ),
                    );
                }
                base
            }
            None => None,
        };
        match base.map(|b| b.ty) {
            Some(Type::Procedure(signature)) => {
                self.check_args(args, Some(&signature), method.span);
                signature.result.unwrap_or(Type::Void)
            }
            _ => {
                self.check_args(args, None, method.span);
                Type::Unknown
            }
        }
    }
}
