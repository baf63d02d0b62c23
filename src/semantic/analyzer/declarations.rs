//! Declaration registration and type-spec conversion

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::context::{AnalysisContext, Binding, Lookup, ObjectDecl, PendingType};
use crate::parser::{
    ArrayIndex, ConstDecl, Decl, FieldDecl, Ident, ObjectMember, ObjectType, Param, ProcDecl,
    QualIdent, SectionKind, TypeDecl, TypeSpec, VarDecl,
};
use crate::semantic::diagnostics::codes;
use crate::semantic::symbol_table::{ScopeKind, Symbol, SymbolKind, Visibility};
use crate::semantic::types::{MethodInfo, ObjectInfo, ParamType, Signature, Type};

impl AnalysisContext<'_> {
    /// Define every declaration of a block in the current scope, in source order
    pub(super) fn register_decls(&mut self, decls: &[Decl]) {
        for decl in decls {
            match decl {
                Decl::Type(decl) => self.register_type(decl),
                Decl::Const(decl) => self.register_const(decl),
                Decl::Var(decl) => self.register_var(decl),
                Decl::Procedure(decl) => self.register_procedure(decl),
                Decl::ObjectImpl(_) => {}
            }
        }
    }

    fn register_type(&mut self, decl: &TypeDecl) {
        let symbol = Symbol::new(decl.name.name.clone(), SymbolKind::Type, decl.name.span);
        let id = self.define_symbol(symbol);
        let ty = self.type_of_spec(&decl.spec, Some(&decl.name));
        if let Some(id) = id {
            self.table.symbol_mut(id).ty = ty;
        }
    }

    fn register_const(&mut self, decl: &ConstDecl) {
        let value = self.check_expr(&decl.value);
        let ty = match &decl.ty {
            Some(spec) => {
                let declared = self.type_of_spec(spec, None);
                if !self.assignable(&declared, &value) {
                    self.diagnostics.error(
                        codes::TYPE_MISMATCH,
                        decl.value.span(),
                        format!(
                            "constant '{}' is declared {} but its value is {}",
                            decl.name.name, declared, value
                        ),
                    );
                }
                declared
            }
            None => value,
        };
        let symbol = Symbol::new(decl.name.name.clone(), SymbolKind::Const, decl.name.span)
            .with_type(ty);
        self.define_symbol(symbol);
    }

    fn register_var(&mut self, decl: &VarDecl) {
        let ty = self.type_of_spec(&decl.ty, None);
        if let Some(init) = &decl.init {
            let value = self.check_expr(init);
            if !self.assignable(&ty, &value) {
                self.diagnostics.error(
                    codes::TYPE_MISMATCH,
                    init.span(),
                    format!("cannot initialize a {} variable with a {} value", ty, value),
                );
            }
        }
        for name in &decl.names {
            let symbol =
                Symbol::new(name.name.clone(), SymbolKind::Var, name.span).with_type(ty.clone());
            self.define_symbol(symbol);
        }
    }

    fn register_procedure(&mut self, decl: &ProcDecl) {
        let heading = &decl.heading;
        let signature = self.signature_of(&heading.params, heading.return_type.as_ref());
        self.signatures
            .insert(heading.span.start.offset, signature.clone());
        let mut symbol = Symbol::new(heading.name.name.clone(), SymbolKind::Procedure, heading.name.span)
            .with_type(Type::Procedure(Box::new(signature)));
        symbol.is_forward = decl.is_forward;
        self.define_symbol(symbol);
    }

    // ============================================================
    // Type specs
    // ============================================================

    /// Convert a type spec, registering member scopes and deferring name checks.
    /// `owner` names the type being declared, for object and record members.
    pub(super) fn type_of_spec(&mut self, spec: &TypeSpec, owner: Option<&Ident>) -> Type {
        match spec {
            TypeSpec::Named(name) => self.type_of_name(name),
            TypeSpec::Array {
                indices, element, ..
            } => {
                for index in indices {
                    match index {
                        ArrayIndex::Range { low, high, .. } => {
                            self.check_expr(low);
                            self.check_expr(high);
                        }
                        ArrayIndex::Type(name) => {
                            self.type_of_name(name);
                        }
                    }
                }
                Type::Array {
                    dimensions: indices.len().max(1),
                    element: Box::new(self.type_of_spec(element, None)),
                }
            }
            TypeSpec::Record { fields, span } => {
                self.table.enter_scope(ScopeKind::Record, *span);
                let fields = self.register_fields(fields, owner, SectionKind::Public);
                self.table.exit_scope();
                Type::Record { fields }
            }
            TypeSpec::Pointer { target, .. } => Type::Pointer(Box::new(self.type_of_spec(target, None))),
            TypeSpec::Set { element, .. } => Type::Set(Box::new(self.type_of_spec(element, None))),
            TypeSpec::Enum { values, .. } => {
                for value in values {
                    let ty = owner.map_or(Type::Unknown, |o| Type::named(o.name.clone()));
                    let symbol =
                        Symbol::new(value.name.clone(), SymbolKind::Const, value.span).with_type(ty);
                    self.define_symbol(symbol);
                }
                Type::Enum {
                    values: values.iter().map(|v| v.name.clone()).collect(),
                }
            }
            TypeSpec::Subrange { low, high, .. } => {
                let base = self.check_expr(low);
                self.check_expr(high);
                Type::Subrange(Box::new(base))
            }
            TypeSpec::Procedure {
                params,
                return_type,
                ..
            } => Type::Procedure(Box::new(
                self.signature_of(params, return_type.as_deref()),
            )),
            TypeSpec::Object(object) => self.register_object(object, owner),
        }
    }

    /// A builtin scalar, or a named reference checked at the end of the pass
    fn type_of_name(&mut self, name: &QualIdent) -> Type {
        let module = name.module.as_ref().map(|m| m.name.clone());
        if module.is_none() {
            if let Some(builtin) = Type::builtin(&name.name.name) {
                return builtin;
            }
        }
        self.pending_types.push(PendingType {
            module: module.clone(),
            name: name.name.name.clone(),
            span: name.name.span,
            scope: self.table.current_scope(),
        });
        Type::Named {
            module,
            name: name.name.name.clone(),
        }
    }

    pub(super) fn signature_of(&mut self, params: &[Param], result: Option<&TypeSpec>) -> Signature {
        let mut signature = Signature::default();
        for param in params {
            let ty = self.type_of_spec(&param.ty, None);
            for _ in &param.names {
                signature.params.push(ParamType {
                    mode: param.mode,
                    ty: ty.clone(),
                });
            }
        }
        signature.result = result.map(|spec| self.type_of_spec(spec, None));
        signature
    }

    fn register_fields(
        &mut self,
        fields: &[FieldDecl],
        owner: Option<&Ident>,
        section: SectionKind,
    ) -> IndexMap<SmolStr, Type> {
        let mut types = IndexMap::new();
        for field in fields {
            let ty = self.type_of_spec(&field.ty, None);
            for name in &field.names {
                let mut symbol = Symbol::new(name.name.clone(), SymbolKind::Field, name.span)
                    .with_type(ty.clone());
                symbol.owner = owner.map(|o| o.name.clone());
                symbol.visibility = visibility(section);
                symbol.is_class = section == SectionKind::Class;
                if self.define_symbol(symbol).is_some() {
                    types.insert(name.name.clone(), ty.clone());
                }
            }
        }
        types
    }

    /// Members go into a scope of their own; bases stay names until needed
    fn register_object(&mut self, object: &ObjectType, owner: Option<&Ident>) -> Type {
        let bases = object.bases.iter().map(|b| self.type_of_name(b)).collect();
        let scope = self.table.enter_scope(ScopeKind::Object, object.span);
        let mut info = ObjectInfo {
            bases,
            ..ObjectInfo::default()
        };

        for section in &object.sections {
            for member in &section.members {
                match member {
                    ObjectMember::Field(field) => {
                        let fields =
                            self.register_fields(std::slice::from_ref(field), owner, section.kind);
                        info.fields.extend(fields);
                    }
                    ObjectMember::Method(heading) => {
                        let signature =
                            self.signature_of(&heading.params, heading.return_type.as_ref());
                        let is_override = section.kind == SectionKind::Override;
                        let mut symbol =
                            Symbol::new(heading.name.name.clone(), SymbolKind::Method, heading.name.span)
                                .with_type(Type::Procedure(Box::new(signature.clone())));
                        symbol.owner = owner.map(|o| o.name.clone());
                        symbol.dispatch = Some(heading.dispatch);
                        symbol.is_override = is_override;
                        symbol.visibility = visibility(section.kind);
                        symbol.is_class = section.kind == SectionKind::Class;
                        if self.define_symbol(symbol).is_some() {
                            info.methods.insert(
                                heading.name.name.clone(),
                                MethodInfo {
                                    dispatch: heading.dispatch,
                                    signature,
                                    is_override,
                                },
                            );
                        }
                    }
                }
            }
        }
        self.table.exit_scope();

        if let Some(symbol) = owner.and_then(|o| self.table.lookup_id(&o.name)) {
            self.object_decls.push(ObjectDecl {
                name: self.table.symbol(symbol).name.clone(),
                symbol,
                scope,
            });
        }
        Type::Object(Box::new(info))
    }

    /// Report type names that resolve nowhere or name something else
    pub(super) fn validate_pending_types(&mut self) {
        for pending in std::mem::take(&mut self.pending_types) {
            match self.lookup_qualified(pending.module.as_deref(), &pending.name, pending.scope) {
                Lookup::Found(binding) => {
                    if self.is_placeholder(&binding) {
                        continue;
                    }
                    let kind = self.binding_symbol(&binding).map(|s| s.kind);
                    match kind {
                        Some(SymbolKind::Type) | None => {
                            if let Binding::Local(id) = binding {
                                self.table
                                    .record_reference_in(pending.scope, id, pending.span);
                            }
                        }
                        Some(kind) => self.diagnostics.error(
                            codes::NOT_A_TYPE,
                            pending.span,
                            format!("'{}' is a {}, not a type", pending.name, kind.display()),
                        ),
                    }
                }
                Lookup::Unknowable => {}
                Lookup::Missing => {
                    let name = match &pending.module {
                        Some(module) => format!("{}.{}", module, pending.name),
                        None => pending.name.to_string(),
                    };
                    self.diagnostics.error(
                        codes::UNKNOWN_TYPE,
                        pending.span,
                        format!("unknown type '{}'", name),
                    );
                }
            }
        }
    }
}

fn visibility(section: SectionKind) -> Visibility {
    match section {
        SectionKind::Private => Visibility::Private,
        _ => Visibility::Public,
    }
}
