//! State of one analysis pass and the lookups every phase shares

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::{AnalysisResult, ModuleResolver};
use crate::base::Span;
use crate::parser::{Module, ModuleKind, ParamMode};
use crate::semantic::diagnostics::{DiagnosticCollector, codes};
use crate::semantic::symbol_table::{
    DefineError, ScopeId, Symbol, SymbolId, SymbolKind, SymbolTable,
};
use crate::semantic::types::{MethodInfo, ObjectInfo, ParamType, Signature, Type};

/// What a name resolved to
#[derive(Debug, Clone)]
pub(super) enum Binding {
    /// A symbol of the table being built
    Local(SymbolId),
    /// A copy of another module's symbol, its types qualified by that module
    External(Box<Symbol>),
    /// A builtin procedure or type name
    Builtin,
}

/// Result of a lookup that may leave the current module
#[derive(Debug)]
pub(super) enum Lookup {
    Found(Binding),
    /// Not found, but an unresolved module could have declared it
    Unknowable,
    Missing,
}

/// A type name whose check is deferred to the end of the pass
#[derive(Debug)]
pub(super) struct PendingType {
    pub module: Option<SmolStr>,
    pub name: SmolStr,
    pub span: Span,
    pub scope: ScopeId,
}

/// An object type declared in this module
#[derive(Debug, Clone)]
pub(super) struct ObjectDecl {
    pub name: SmolStr,
    pub symbol: SymbolId,
    /// Scope holding the member symbols
    pub scope: ScopeId,
}

/// An object type found by name, here or in another module
#[derive(Debug, Clone)]
pub(super) struct ResolvedObject {
    pub name: SmolStr,
    pub info: ObjectInfo,
    /// Module the type was declared in; `None` for this module
    pub origin: Option<SmolStr>,
}

impl ResolvedObject {
    pub(super) fn key(&self) -> SmolStr {
        match &self.origin {
            Some(origin) => SmolStr::from(format!("{}.{}", origin, self.name)),
            None => self.name.clone(),
        }
    }
}

/// The object implementation whose methods are being analyzed
#[derive(Debug)]
pub(super) struct ObjectContext {
    pub scope: ScopeId,
    pub object: Option<ResolvedObject>,
    /// Every base type in the inheritance chain was found
    pub chain_resolved: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub(super) struct OutState {
    pub assigned: bool,
    pub warned: bool,
}

/// A procedure or method body being analyzed
#[derive(Debug, Default)]
pub(super) struct RoutineContext {
    pub result: Option<Type>,
    pub out_params: FxHashMap<SymbolId, OutState>,
}

pub(super) struct AnalysisContext<'r> {
    resolver: Option<&'r dyn ModuleResolver>,
    pub(super) module_name: SmolStr,
    pub(super) module_kind: ModuleKind,
    pub(super) table: SymbolTable,
    pub(super) diagnostics: DiagnosticCollector,
    /// Resolver answers, so each module name is asked for once
    modules: FxHashMap<SmolStr, Option<Arc<SymbolTable>>>,
    /// Modules brought in whole with `IMPORT M`
    pub(super) whole_imports: Vec<SmolStr>,
    /// Imported modules already reported as unresolvable
    pub(super) unresolved_imports: FxHashSet<SmolStr>,
    /// Imported names whose module or declaration could not be found
    pub(super) placeholders: FxHashSet<SymbolId>,
    pub(super) pending_types: Vec<PendingType>,
    pub(super) object_decls: Vec<ObjectDecl>,
    /// Procedure signatures keyed by heading offset, computed once at registration
    pub(super) signatures: FxHashMap<usize, Signature>,
    pub(super) objects: Vec<ObjectContext>,
    pub(super) routines: Vec<RoutineContext>,
    pub(super) with_depth: usize,
}

impl<'r> AnalysisContext<'r> {
    pub(super) fn new(module: &Module, resolver: Option<&'r dyn ModuleResolver>) -> Self {
        Self {
            resolver,
            module_name: module.name.name.clone(),
            module_kind: module.kind,
            table: SymbolTable::new(module.name.name.clone(), module.span),
            diagnostics: DiagnosticCollector::new(),
            modules: FxHashMap::default(),
            whole_imports: Vec::new(),
            unresolved_imports: FxHashSet::default(),
            placeholders: FxHashSet::default(),
            pending_types: Vec::new(),
            object_decls: Vec::new(),
            signatures: FxHashMap::default(),
            objects: Vec::new(),
            routines: Vec::new(),
            with_depth: 0,
        }
    }

    pub(super) fn finish(self) -> AnalysisResult {
        let mut diagnostics = self.diagnostics.into_diagnostics();
        diagnostics.sort_by_key(|d| d.span.start.offset);
        AnalysisResult {
            symbols: self.table,
            diagnostics,
        }
    }

    pub(super) fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    /// Define in the current scope, reporting a duplicate
    pub(super) fn define_symbol(&mut self, symbol: Symbol) -> Option<SymbolId> {
        let (name, span) = (symbol.name.clone(), symbol.span);
        match self.table.define(symbol) {
            Ok(id) => Some(id),
            Err(DefineError::Duplicate { existing_span, .. }) => {
                self.diagnostics
                    .duplicate_definition(&name, span, existing_span);
                None
            }
        }
    }

    // ============================================================
    // Other modules
    // ============================================================

    /// Table of module `name`, asking the resolver on first use only
    pub(super) fn module_table(&mut self, name: &str) -> Option<Arc<SymbolTable>> {
        if let Some(cached) = self.modules.get(name) {
            return cached.clone();
        }
        let table = self.resolver.and_then(|r| r.resolve_module(name));
        tracing::trace!(
            "module '{}' asked for '{}': {}",
            self.module_name,
            name,
            if table.is_some() { "resolved" } else { "unresolved" }
        );
        self.modules.insert(SmolStr::from(name), table.clone());
        table
    }

    /// The definition module paired with an implementation module
    pub(super) fn definition_table(&mut self) -> Option<Arc<SymbolTable>> {
        if self.module_kind != ModuleKind::Implementation {
            return None;
        }
        let name = self.module_name.clone();
        self.module_table(&name)
    }

    /// Whether an unqualified unknown name may still be declared elsewhere.
    ///
    /// True for an implementation module whose definition module is missing,
    /// and for whole-module imports when there is no resolver to ask. A
    /// resolver that cannot find an imported module only hides qualified
    /// `M.x` uses and names listed in `FROM M IMPORT`.
    pub(super) fn has_unresolved_source(&mut self) -> bool {
        if self.module_kind == ModuleKind::Implementation && self.definition_table().is_none() {
            return true;
        }
        !self.has_resolver() && !self.whole_imports.is_empty()
    }

    /// Unknown names are not reported in the current context
    pub(super) fn suppress_unknown(&mut self) -> bool {
        self.with_depth > 0
            || self.objects.last().is_some_and(|o| !o.chain_resolved)
            || self.has_unresolved_source()
    }

    /// Look `name` up in the definition module and the whole-module imports
    pub(super) fn external_lookup(&mut self, name: &str) -> Lookup {
        if let Some(table) = self.definition_table() {
            if let Some(id) = table.lookup_from(ScopeId::ROOT, name) {
                let module = self.module_name.clone();
                return Lookup::Found(external_binding(&table, id, &module));
            }
        }
        for module in self.whole_imports.clone() {
            if let Some(table) = self.module_table(&module) {
                if let Some(id) = table.lookup_from(ScopeId::ROOT, name) {
                    return Lookup::Found(external_binding(&table, id, &module));
                }
            }
        }
        if self.has_unresolved_source() {
            Lookup::Unknowable
        } else {
            Lookup::Missing
        }
    }

    /// Resolve `name`, or `module.name`, starting at `scope`
    pub(super) fn lookup_qualified(
        &mut self,
        module: Option<&str>,
        name: &str,
        scope: ScopeId,
    ) -> Lookup {
        match module {
            None => match self.table.lookup_from(scope, name) {
                Some(id) => Lookup::Found(Binding::Local(id)),
                None => self.external_lookup(name),
            },
            Some(module) if module == self.module_name.as_str() => {
                if let Some(id) = self.table.lookup_from(ScopeId::ROOT, name) {
                    return Lookup::Found(Binding::Local(id));
                }
                if self.module_kind != ModuleKind::Implementation {
                    return Lookup::Missing;
                }
                match self.definition_table() {
                    Some(table) => match table.lookup_from(ScopeId::ROOT, name) {
                        Some(id) => Lookup::Found(external_binding(&table, id, &self.module_name)),
                        None => Lookup::Missing,
                    },
                    None => Lookup::Unknowable,
                }
            }
            Some(module) => match self.module_table(module) {
                Some(table) => match table.lookup_from(ScopeId::ROOT, name) {
                    Some(id) => Lookup::Found(external_binding(&table, id, module)),
                    None => Lookup::Missing,
                },
                None => Lookup::Unknowable,
            },
        }
    }

    // ============================================================
    // Bindings
    // ============================================================

    pub(super) fn binding_symbol<'b>(&'b self, binding: &'b Binding) -> Option<&'b Symbol> {
        match binding {
            Binding::Local(id) => Some(self.table.symbol(*id)),
            Binding::External(symbol) => Some(symbol),
            Binding::Builtin => None,
        }
    }

    /// Type of the value a binding denotes; types and modules have none
    pub(super) fn value_type(&self, binding: &Binding) -> Type {
        match self.binding_symbol(binding) {
            Some(symbol) if !matches!(symbol.kind, SymbolKind::Type | SymbolKind::Module) => {
                symbol.ty.clone()
            }
            _ => Type::Unknown,
        }
    }

    pub(super) fn is_placeholder(&self, binding: &Binding) -> bool {
        matches!(binding, Binding::Local(id) if self.placeholders.contains(id))
    }

    // ============================================================
    // Types
    // ============================================================

    /// Follow a named type to its declaration; builtin names win over declarations
    pub(super) fn resolve_named(&mut self, module: Option<&str>, name: &str) -> Option<Type> {
        if module.is_none() {
            if let Some(builtin) = Type::builtin(name) {
                return Some(builtin);
            }
        }
        let scope = self.table.current_scope();
        let mut current = match self.lookup_qualified(module, name, scope) {
            Lookup::Found(binding) => match self.binding_symbol(&binding) {
                Some(symbol) if symbol.kind == SymbolKind::Type => symbol.ty.clone(),
                _ => return None,
            },
            _ => return None,
        };
        // Aliases of aliases, bounded so a cyclic alias cannot loop
        for _ in 0..8 {
            let Type::Named { module, name } = &current else {
                return Some(current);
            };
            let (module, name) = (module.clone(), name.clone());
            if module.is_none() {
                if let Some(builtin) = Type::builtin(&name) {
                    return Some(builtin);
                }
            }
            match self.lookup_qualified(module.as_deref(), &name, scope) {
                Lookup::Found(binding) => match self.binding_symbol(&binding) {
                    Some(symbol) if symbol.kind == SymbolKind::Type => current = symbol.ty.clone(),
                    _ => return None,
                },
                _ => return None,
            }
        }
        None
    }

    /// Replace named scalar aliases by what they name; object and record names stay nominal
    pub(super) fn normalize(&mut self, ty: Type) -> Type {
        let Type::Named { module, name } = &ty else {
            return ty;
        };
        let (module, name) = (module.clone(), name.clone());
        match self.resolve_named(module.as_deref(), &name) {
            Some(Type::Object(_) | Type::Record { .. }) | None => ty,
            Some(resolved) => resolved,
        }
    }

    /// Whether a value of type `source` may be stored where `target` is expected
    pub(super) fn assignable(&mut self, target: &Type, source: &Type) -> bool {
        let target = self.normalize(target.clone());
        let source = self.normalize(source.clone());
        target.accepts(&source)
    }

    // ============================================================
    // Routines
    // ============================================================

    /// Record a read of a local symbol, warning on an unassigned OUT parameter
    pub(super) fn note_read(&mut self, id: SymbolId, span: Span) {
        self.table.record_reference(id, span);
        let Some(routine) = self.routines.last_mut() else {
            return;
        };
        let Some(state) = routine.out_params.get_mut(&id) else {
            return;
        };
        if state.assigned || state.warned {
            return;
        }
        state.warned = true;
        let name = self.table.symbol(id).name.clone();
        self.diagnostics.warning(
            codes::OUT_READ_BEFORE_ASSIGN,
            span,
            format!("OUT parameter '{}' is read before it is assigned", name),
        );
    }

    pub(super) fn mark_assigned(&mut self, id: SymbolId) {
        if let Some(state) = self
            .routines
            .last_mut()
            .and_then(|routine| routine.out_params.get_mut(&id))
        {
            state.assigned = true;
        }
    }
}

/// Copy of `id` out of another module's table
pub(super) fn external_symbol(table: &SymbolTable, id: SymbolId, module: &SmolStr) -> Symbol {
    let source = table.symbol(id);
    let mut symbol = source.clone();
    symbol.ty = qualify(source.ty.clone(), module);
    symbol.origin = Some(source.origin.clone().unwrap_or_else(|| module.clone()));
    symbol.is_forward = false;
    symbol
}

fn external_binding(table: &SymbolTable, id: SymbolId, module: &str) -> Binding {
    Binding::External(Box::new(external_symbol(table, id, &SmolStr::from(module))))
}

/// Qualify unqualified type names with the module they were declared in
pub(super) fn qualify(ty: Type, module: &SmolStr) -> Type {
    match ty {
        Type::Named { module: None, name } => Type::Named {
            module: Some(module.clone()),
            name,
        },
        Type::Array {
            dimensions,
            element,
        } => Type::Array {
            dimensions,
            element: Box::new(qualify(*element, module)),
        },
        Type::Record { fields } => Type::Record {
            fields: fields
                .into_iter()
                .map(|(name, ty)| (name, qualify(ty, module)))
                .collect(),
        },
        Type::Object(info) => Type::Object(Box::new(ObjectInfo {
            bases: info.bases.into_iter().map(|b| qualify(b, module)).collect(),
            fields: info
                .fields
                .into_iter()
                .map(|(name, ty)| (name, qualify(ty, module)))
                .collect(),
            methods: info
                .methods
                .into_iter()
                .map(|(name, method)| {
                    (
                        name,
                        MethodInfo {
                            signature: qualify_signature(method.signature, module),
                            ..method
                        },
                    )
                })
                .collect(),
        })),
        Type::Pointer(target) => Type::Pointer(Box::new(qualify(*target, module))),
        Type::Set(element) => Type::Set(Box::new(qualify(*element, module))),
        Type::Subrange(base) => Type::Subrange(Box::new(qualify(*base, module))),
        Type::Procedure(signature) => {
            Type::Procedure(Box::new(qualify_signature(*signature, module)))
        }
        other => other,
    }
}

fn qualify_signature(signature: Signature, module: &SmolStr) -> Signature {
    Signature {
        params: signature
            .params
            .into_iter()
            .map(|p| ParamType {
                mode: p.mode,
                ty: qualify(p.ty, module),
            })
            .collect(),
        result: signature.result.map(|r| qualify(r, module)),
    }
}

/// Parameter modes and types agree; named types compare by name only
pub(super) fn signatures_match(a: &Signature, b: &Signature) -> bool {
    fn same(a: &Type, b: &Type) -> bool {
        match (a, b) {
            (Type::Named { name: x, .. }, Type::Named { name: y, .. }) => x == y,
            (Type::Pointer(x), Type::Pointer(y))
            | (Type::Set(x), Type::Set(y))
            | (Type::Subrange(x), Type::Subrange(y)) => same(x, y),
            (
                Type::Array {
                    dimensions: d1,
                    element: x,
                },
                Type::Array {
                    dimensions: d2,
                    element: y,
                },
            ) => d1 == d2 && same(x, y),
            _ => a == b,
        }
    }

    a.params.len() == b.params.len()
        && a.params
            .iter()
            .zip(&b.params)
            .all(|(x, y)| x.mode == y.mode && same(&x.ty, &y.ty))
        && match (&a.result, &b.result) {
            (Some(x), Some(y)) => same(x, y),
            (None, None) => true,
            _ => false,
        }
}

/// Mode of parameter `index`, when the callee's signature is known
pub(super) fn param_mode(signature: Option<&Signature>, index: usize) -> Option<ParamMode> {
    signature.and_then(|s| s.params.get(index)).map(|p| p.mode)
}
