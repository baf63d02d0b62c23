//! Object types: member lookup through the inheritance chain and override rules.
//!
//! Base types are stored by name and only resolved here, on demand, so an
//! object may name a base declared later in the file or in another module.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::context::{
    AnalysisContext, Binding, Lookup, ObjectDecl, ResolvedObject, signatures_match,
};
use crate::base::Span;
use crate::semantic::diagnostics::{Diagnostic, codes};
use crate::semantic::symbol_table::{Symbol, SymbolId, SymbolKind};
use crate::semantic::types::{MethodInfo, Type};

/// A field or method found on an object or one of its bases
#[derive(Debug, Clone)]
pub(super) struct Member {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub ty: Type,
    /// Object type that declares the member
    pub owner: SmolStr,
    pub origin: Option<SmolStr>,
    pub method: Option<MethodInfo>,
}

impl AnalysisContext<'_> {
    /// Find an object type by (possibly qualified) name
    pub(super) fn find_object(&mut self, module: Option<&str>, name: &str) -> Option<ResolvedObject> {
        match self.resolve_named(module, name)? {
            Type::Object(info) => {
                let origin = self.object_origin(module, name);
                Some(ResolvedObject {
                    name: SmolStr::from(name),
                    info: *info,
                    origin,
                })
            }
            _ => None,
        }
    }

    /// Module an object name was declared in, `None` when it is this one
    fn object_origin(&mut self, module: Option<&str>, name: &str) -> Option<SmolStr> {
        if let Some(module) = module {
            if module != self.module_name.as_str() {
                return Some(SmolStr::from(module));
            }
        }
        let scope = self.table.current_scope();
        match self.lookup_qualified(module, name, scope) {
            Lookup::Found(Binding::Local(id)) => self.table.symbol(id).origin.clone(),
            Lookup::Found(Binding::External(symbol)) => symbol.origin.clone(),
            _ => None,
        }
    }

    fn base_objects(&mut self, object: &ResolvedObject) -> Vec<Option<ResolvedObject>> {
        object
            .info
            .bases
            .iter()
            .map(|base| match base {
                Type::Named { module, name } => (module.clone(), name.clone()),
                _ => (None, SmolStr::default()),
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|(module, name)| self.find_object(module.as_deref(), &name))
            .collect()
    }

    /// Look `name` up on `object`, then on its bases depth-first in declaration order
    pub(super) fn find_member(&mut self, object: &ResolvedObject, name: &str) -> Option<Member> {
        self.find_member_in(object, name, &mut FxHashSet::default())
    }

    fn find_member_in(
        &mut self,
        object: &ResolvedObject,
        name: &str,
        visited: &mut FxHashSet<SmolStr>,
    ) -> Option<Member> {
        if !visited.insert(object.key()) {
            return None;
        }
        if let Some(ty) = object.info.fields.get(name) {
            return Some(Member {
                name: SmolStr::from(name),
                kind: SymbolKind::Field,
                ty: ty.clone(),
                owner: object.name.clone(),
                origin: object.origin.clone(),
                method: None,
            });
        }
        if let Some(method) = object.info.methods.get(name) {
            return Some(Member {
                name: SmolStr::from(name),
                kind: SymbolKind::Method,
                ty: Type::Procedure(Box::new(method.signature.clone())),
                owner: object.name.clone(),
                origin: object.origin.clone(),
                method: Some(method.clone()),
            });
        }
        self.find_in_bases(object, name, visited)
    }

    fn find_in_bases(
        &mut self,
        object: &ResolvedObject,
        name: &str,
        visited: &mut FxHashSet<SmolStr>,
    ) -> Option<Member> {
        for base in self.base_objects(object).into_iter().flatten() {
            if let Some(member) = self.find_member_in(&base, name, visited) {
                return Some(member);
            }
        }
        None
    }

    /// A method with this name declared by some base of `object`
    pub(super) fn base_method(&mut self, object: &ResolvedObject, name: &str) -> Option<Member> {
        let mut visited = FxHashSet::default();
        visited.insert(object.key());
        self.find_in_bases(object, name, &mut visited)
            .filter(|member| member.kind == SymbolKind::Method)
    }

    /// Every base in the inheritance chain can be found
    pub(super) fn chain_resolved(&mut self, object: &ResolvedObject) -> bool {
        let mut visited = FxHashSet::default();
        self.chain_resolved_in(object, &mut visited)
    }

    fn chain_resolved_in(&mut self, object: &ResolvedObject, visited: &mut FxHashSet<SmolStr>) -> bool {
        if !visited.insert(object.key()) {
            return true;
        }
        self.base_objects(object).into_iter().all(|base| match base {
            Some(base) => self.chain_resolved_in(&base, visited),
            None => false,
        })
    }

    /// Whether `target` is reachable from the bases of `object`
    fn inherits_from(&mut self, object: &ResolvedObject, target: &SmolStr) -> bool {
        let mut visited = FxHashSet::default();
        let mut stack: Vec<ResolvedObject> = self.base_objects(object).into_iter().flatten().collect();
        while let Some(base) = stack.pop() {
            if base.key() == *target {
                return true;
            }
            if visited.insert(base.key()) {
                stack.extend(self.base_objects(&base).into_iter().flatten());
            }
        }
        false
    }

    /// Symbol of a member of an object type declared in this module
    pub(super) fn member_symbol(&self, owner: &str, name: &str) -> Option<SymbolId> {
        self.object_decls
            .iter()
            .find(|decl| decl.name.as_str() == owner)
            .and_then(|decl| self.table.scope(decl.scope).symbols.get(name).copied())
    }

    /// A member found on an object, as a binding usable in expressions
    pub(super) fn member_binding(&self, member: &Member, use_span: Span) -> Binding {
        if member.origin.is_none() {
            if let Some(id) = self.member_symbol(&member.owner, &member.name) {
                return Binding::Local(id);
            }
        }
        let mut symbol = Symbol::new(member.name.clone(), member.kind, use_span)
            .with_type(member.ty.clone())
            .with_owner(member.owner.clone());
        symbol.origin = member.origin.clone();
        symbol.dispatch = member.method.as_ref().map(|m| m.dispatch);
        Binding::External(Box::new(symbol))
    }

    // ============================================================
    // Override validation
    // ============================================================

    /// Inheritance cycles and OVERRIDE rules for every object type declared here
    pub(super) fn check_object_types(&mut self) {
        for decl in self.object_decls.clone() {
            self.check_object_type(&decl);
        }
    }

    fn check_object_type(&mut self, decl: &ObjectDecl) {
        let symbol = self.table.symbol(decl.symbol);
        let Type::Object(info) = &symbol.ty else {
            return;
        };
        let span = symbol.span;
        let object = ResolvedObject {
            name: decl.name.clone(),
            info: (**info).clone(),
            origin: None,
        };

        if self.inherits_from(&object, &object.key()) {
            self.diagnostics.error(
                codes::CIRCULAR_INHERITANCE,
                span,
                format!("object type '{}' inherits from itself", decl.name),
            );
            return;
        }

        let resolved = self.chain_resolved(&object);
        for (name, method) in &object.info.methods {
            let method_span = self
                .table
                .scope(decl.scope)
                .symbols
                .get(name.as_str())
                .map_or(span, |&id| self.table.symbol(id).span);
            let Some(base) = self.base_method(&object, name) else {
                if method.is_override && resolved {
                    self.diagnostics.error(
                        codes::INVALID_OVERRIDE,
                        method_span,
                        format!(
                            "OVERRIDE method '{}' of '{}' has no base method to override",
                            name, decl.name
                        ),
                    );
                }
                continue;
            };
            let Some(base_info) = &base.method else {
                continue;
            };

            if !method.is_override {
                self.diagnostics.warning(
                    codes::HIDES_BASE_METHOD,
                    method_span,
                    format!(
                        "method '{}' hides the method inherited from '{}'; declare it in an OVERRIDE section",
                        name, base.owner
                    ),
                );
            } else if !signatures_match(&method.signature, &base_info.signature) {
                let mut diagnostic = Diagnostic::error(
                    codes::OVERRIDE_MISMATCH,
                    method_span,
                    format!(
                        "OVERRIDE method '{}' has signature {} but '{}' declares {}",
                        name,
                        method.signature.describe(),
                        base.owner,
                        base_info.signature.describe()
                    ),
                );
                if base.origin.is_none() {
                    if let Some(id) = self.member_symbol(&base.owner, name) {
                        diagnostic = diagnostic
                            .with_related("base method declared here", self.table.symbol(id).span);
                    }
                }
                self.diagnostics.add(diagnostic);
            }
        }
    }
}
