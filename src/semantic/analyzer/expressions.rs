//! Expression checking: name resolution, declared types, call arguments

use super::context::{AnalysisContext, Binding, Lookup, param_mode};
use crate::base::Span;
use crate::base::constants::{BUILTIN_PROCEDURES, BUILTIN_TYPES};
use crate::parser::{BinaryOp, Expr, Ident, ParamMode, UnaryOp};
use crate::semantic::diagnostics::codes;
use crate::semantic::symbol_table::{ScopeId, ScopeKind, SymbolKind};
use crate::semantic::types::{Signature, Type};

impl AnalysisContext<'_> {
    /// Resolve names in `expr`, record their uses and return its type
    pub(super) fn check_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Name(ident) => match self.resolve_name(ident) {
                Some(binding) => {
                    if let Binding::Local(id) = binding {
                        self.note_read(id, ident.span);
                    }
                    self.value_type(&binding)
                }
                None => Type::Unknown,
            },
            Expr::Integer { .. } => Type::Integer,
            Expr::Real { .. } => Type::Real,
            Expr::Str { .. } => Type::String,
            Expr::Char { .. } => Type::Char,
            Expr::Bool { .. } => Type::Boolean,
            Expr::Nil { .. } => Type::Nil,
            Expr::SelfRef { .. } => match self.objects.last().and_then(|o| o.object.as_ref()) {
                Some(object) => Type::Named {
                    module: object.origin.clone(),
                    name: object.name.clone(),
                },
                None => Type::Unknown,
            },
            Expr::Unary { op, operand, .. } => {
                let ty = self.check_expr(operand);
                match op {
                    UnaryOp::Not => Type::Boolean,
                    UnaryOp::Neg | UnaryOp::Plus => ty,
                }
            }
            Expr::Binary { op, lhs, rhs, .. } => {
                let lhs = self.check_expr(lhs);
                let rhs = self.check_expr(rhs);
                self.binary_type(*op, lhs, rhs)
            }
            Expr::Call { callee, args, span } => self.check_call(callee, args, *span),
            Expr::Index { base, indices, .. } => {
                let base = self.check_expr(base);
                for index in indices {
                    self.check_expr(index);
                }
                match self.normalize(base) {
                    Type::Array { element, .. } => *element,
                    Type::String => Type::Char,
                    _ => Type::Unknown,
                }
            }
            Expr::Field { base, field, .. } => {
                if let Expr::Name(module) = base.as_ref() {
                    if let Some(ty) = self.check_module_member(module, field) {
                        return ty;
                    }
                }
                let base = self.check_expr(base);
                self.member_type(base, field)
            }
            Expr::Deref { base, .. } => match self.check_expr(base) {
                Type::Pointer(target) => *target,
                _ => Type::Unknown,
            },
            Expr::Set { elements, .. } => {
                let mut element = Type::Unknown;
                for (index, item) in elements.iter().enumerate() {
                    let ty = self.check_expr(item);
                    if index == 0 {
                        element = ty;
                    }
                }
                Type::Set(Box::new(element))
            }
            Expr::Range { low, high, .. } => {
                let low = self.check_expr(low);
                self.check_expr(high);
                low
            }
            Expr::Ask(call) => self.check_method_call(call),
            Expr::Inherited { method, args, .. } => self.check_inherited(method, args),
            Expr::Missing { .. } => Type::Unknown,
        }
    }

    fn binary_type(&mut self, op: BinaryOp, lhs: Type, rhs: Type) -> Type {
        if op.is_comparison() || op.is_logical() {
            return Type::Boolean;
        }
        let lhs = self.normalize(lhs);
        let rhs = self.normalize(rhs);
        match op {
            BinaryOp::IntDiv | BinaryOp::Mod => Type::Integer,
            BinaryOp::Div if lhs.is_numeric() && rhs.is_numeric() => Type::Real,
            _ if lhs.is_integer() && rhs.is_integer() => Type::Integer,
            _ if lhs.is_numeric() && rhs.is_numeric() => Type::Real,
            BinaryOp::Add
                if matches!(lhs, Type::String | Type::Char)
                    && matches!(rhs, Type::String | Type::Char) =>
            {
                Type::String
            }
            _ => match lhs {
                Type::Set(_) => lhs,
                _ => Type::Unknown,
            },
        }
    }

    fn check_call(&mut self, callee: &Expr, args: &[Expr], span: Span) -> Type {
        if let Expr::Name(ident) = callee {
            if self.is_builtin(ident) {
                return self.check_builtin_call(ident, args, span);
            }
        }
        match self.check_expr(callee) {
            Type::Procedure(signature) => {
                self.check_args(args, Some(&signature), span);
                signature.result.unwrap_or(Type::Void)
            }
            _ => {
                self.check_args(args, None, span);
                Type::Unknown
            }
        }
    }

    fn is_builtin(&self, ident: &Ident) -> bool {
        let name = ident.name.as_str();
        (BUILTIN_PROCEDURES.contains(&name) || BUILTIN_TYPES.contains(&name))
            && self.table.lookup_id(name).is_none()
    }

    /// Builtins take any arguments; `INC`/`DEC` write their first one
    fn check_builtin_call(&mut self, ident: &Ident, args: &[Expr], span: Span) -> Type {
        let name = ident.name.as_str();
        let mut first = Type::Unknown;
        for (index, arg) in args.iter().enumerate() {
            let ty = if index == 0 && matches!(name, "INC" | "DEC") {
                if arg.is_designator() {
                    self.check_target(arg)
                } else {
                    self.non_assignable_argument(arg, index, ParamMode::InOut);
                    Type::Unknown
                }
            } else {
                self.check_expr(arg)
            };
            if index == 0 {
                first = ty;
            }
        }
        tracing::trace!("builtin call '{}' at {}", name, span.start);
        match name {
            "FLOAT" | "REAL" | "STRTOREAL" | "SimTime" => Type::Real,
            "TRUNC" | "ROUND" | "ORD" | "STRLEN" | "POSITION" | "STRTOINT" | "INTEGER" => {
                Type::Integer
            }
            "CHR" | "CHAR" => Type::Char,
            "ODD" => Type::Boolean,
            "INTTOSTR" | "REALTOSTR" | "SUBSTR" | "UPPER" | "LOWER" => Type::String,
            "ABS" | "MIN" | "MAX" => first,
            _ => Type::Unknown,
        }
    }

    /// Check arguments against the parameter modes and types of `signature`
    pub(super) fn check_args(&mut self, args: &[Expr], signature: Option<&Signature>, span: Span) {
        if let Some(signature) = signature {
            if signature.params.len() != args.len() {
                self.diagnostics.error(
                    codes::TYPE_MISMATCH,
                    span,
                    format!(
                        "expected {} argument(s), found {}",
                        signature.params.len(),
                        args.len()
                    ),
                );
            }
        }
        for (index, arg) in args.iter().enumerate() {
            match param_mode(signature, index) {
                Some(mode) if mode.needs_designator() && !arg.is_designator() => {
                    self.non_assignable_argument(arg, index, mode);
                }
                Some(ParamMode::Out | ParamMode::InOut) => {
                    self.check_target(arg);
                }
                _ => {
                    let ty = self.check_expr(arg);
                    let expected = signature
                        .and_then(|s| s.params.get(index))
                        .map(|p| p.ty.clone());
                    if let Some(expected) = expected {
                        if !self.assignable(&expected, &ty) {
                            self.diagnostics.error(
                                codes::TYPE_MISMATCH,
                                arg.span(),
                                format!(
                                    "argument {} is {} but the parameter is {}",
                                    index + 1,
                                    ty,
                                    expected
                                ),
                            );
                        }
                    }
                }
            }
        }
    }

    fn non_assignable_argument(&mut self, arg: &Expr, index: usize, mode: ParamMode) {
        self.diagnostics.error(
            codes::NON_ASSIGNABLE_ARGUMENT,
            arg.span(),
            format!(
                "argument {} is passed to an {} parameter and must be a variable",
                index + 1,
                mode.as_str()
            ),
        );
        self.check_expr(arg);
    }

    // ============================================================
    // Names
    // ============================================================

    /// Resolve an identifier used in a statement or expression.
    ///
    /// Reports an undefined name unless the context makes it unknowable.
    /// Nothing is recorded; callers record the use as a read or a write.
    pub(super) fn resolve_name(&mut self, ident: &Ident) -> Option<Binding> {
        let mut scope = Some(self.table.current_scope());
        while let Some(id) = scope {
            if let Some(&symbol) = self.table.scope(id).symbols.get(ident.name.as_str()) {
                return Some(Binding::Local(symbol));
            }
            if let Some(binding) = self.object_member_at(id, ident) {
                return Some(binding);
            }
            scope = self.table.parent(id);
        }

        let name = ident.name.as_str();
        if BUILTIN_PROCEDURES.contains(&name) || BUILTIN_TYPES.contains(&name) {
            return Some(Binding::Builtin);
        }
        match self.external_lookup(name) {
            Lookup::Found(binding) => Some(binding),
            Lookup::Unknowable => None,
            Lookup::Missing => {
                if !name.is_empty() && !self.suppress_unknown() {
                    self.diagnostics.error(
                        codes::UNDEFINED_REFERENCE,
                        ident.span,
                        format!("undefined identifier '{}'", name),
                    );
                }
                None
            }
        }
    }

    /// Members of the object whose implementation scope is `scope`
    fn object_member_at(&mut self, scope: ScopeId, ident: &Ident) -> Option<Binding> {
        if self.table.scope(scope).kind != ScopeKind::Object {
            return None;
        }
        let object = self
            .objects
            .iter()
            .rev()
            .find(|o| o.scope == scope)
            .and_then(|o| o.object.clone())?;
        let member = self.find_member(&object, &ident.name)?;
        Some(self.member_binding(&member, ident.span))
    }

    /// `M.x` where `M` is an imported module
    fn check_module_member(&mut self, module: &Ident, member: &Ident) -> Option<Type> {
        let id = self.table.lookup_id(&module.name)?;
        if self.table.symbol(id).kind != SymbolKind::Module {
            return None;
        }
        self.table.record_reference(id, module.span);
        let scope = self.table.current_scope();
        match self.lookup_qualified(Some(&module.name), &member.name, scope) {
            Lookup::Found(binding) => Some(self.value_type(&binding)),
            Lookup::Unknowable => Some(Type::Unknown),
            Lookup::Missing => {
                self.diagnostics.error(
                    codes::UNDEFINED_REFERENCE,
                    member.span,
                    format!("module '{}' has no '{}'", module.name, member.name),
                );
                Some(Type::Unknown)
            }
        }
    }

    /// Type of `field` on a value of type `base`, recording the member use
    pub(super) fn member_type(&mut self, base: Type, field: &Ident) -> Type {
        let base = match self.normalize(base) {
            Type::Pointer(target) => self.normalize(*target),
            other => other,
        };
        match base {
            Type::Record { fields } => fields.get(field.name.as_str()).cloned().unwrap_or_default(),
            Type::Named { module, name } => {
                if let Some(object) = self.find_object(module.as_deref(), &name) {
                    return match self.find_member(&object, &field.name) {
                        Some(member) => {
                            let binding = self.member_binding(&member, field.span);
                            if let Binding::Local(id) = binding {
                                self.table.record_reference(id, field.span);
                            }
                            member.ty
                        }
                        None => {
                            if self.chain_resolved(&object) && self.with_depth == 0 {
                                self.diagnostics.error(
                                    codes::UNDEFINED_REFERENCE,
                                    field.span,
                                    format!("object type '{}' has no member '{}'", name, field.name),
                                );
                            }
                            Type::Unknown
                        }
                    };
                }
                match self.resolve_named(module.as_deref(), &name) {
                    Some(Type::Record { fields }) => {
                        fields.get(field.name.as_str()).cloned().unwrap_or_default()
                    }
                    _ => Type::Unknown,
                }
            }
            _ => Type::Unknown,
        }
    }
}
