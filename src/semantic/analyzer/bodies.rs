//! Procedure, method and object implementation bodies

use super::context::{AnalysisContext, ObjectContext, OutState, RoutineContext};
use crate::parser::{Decl, MethodImpl, Module, ObjectImpl, Param, ParamMode, ProcDecl, Stmt};
use crate::semantic::diagnostics::{Diagnostic, codes};
use crate::semantic::symbol_table::{ScopeKind, Symbol, SymbolKind};
use crate::semantic::types::Signature;

impl AnalysisContext<'_> {
    /// Analyze the bodies of a block's procedures and object implementations
    pub(super) fn analyze_bodies(&mut self, decls: &[Decl]) {
        for decl in decls {
            match decl {
                Decl::Procedure(decl) if !decl.is_forward => self.analyze_procedure(decl),
                Decl::ObjectImpl(decl) => self.analyze_object_impl(decl),
                _ => {}
            }
        }
    }

    fn analyze_procedure(&mut self, decl: &ProcDecl) {
        tracing::trace!("analyzing procedure '{}'", decl.heading.name.name);
        let signature = self
            .signatures
            .get(&decl.heading.span.start.offset)
            .cloned()
            .unwrap_or_default();
        self.table.enter_scope(ScopeKind::Procedure, decl.span);
        self.analyze_routine(&decl.heading.params, &signature, &decl.locals, &decl.body);
        self.table.exit_scope();
    }

    fn analyze_object_impl(&mut self, object_impl: &ObjectImpl) {
        let name = &object_impl.name;
        tracing::trace!("analyzing object implementation '{}'", name.name);

        let object = self.find_object(None, &name.name);
        if object.is_none() && !self.suppress_unknown() {
            self.diagnostics.error(
                codes::UNKNOWN_OBJECT,
                name.span,
                format!("implementation of unknown object type '{}'", name.name),
            );
        }
        if let Some(id) = self
            .table
            .lookup_id(&name.name)
            .filter(|&id| self.table.symbol(id).kind == SymbolKind::Type)
        {
            self.table.record_reference(id, name.span);
        }
        let chain_resolved = match &object {
            Some(object) => self.chain_resolved(object),
            None => false,
        };

        let scope = self.table.enter_scope(ScopeKind::Object, object_impl.span);
        self.objects.push(ObjectContext {
            scope,
            object,
            chain_resolved,
        });
        for method in &object_impl.methods {
            self.analyze_method(method);
        }
        self.objects.pop();
        self.table.exit_scope();
    }

    fn analyze_method(&mut self, method: &MethodImpl) {
        let heading = &method.heading;
        let object = self.objects.last().and_then(|o| o.object.clone());
        if let Some(object) = &object {
            if object.info.methods.contains_key(heading.name.name.as_str()) {
                if object.origin.is_none() {
                    if let Some(id) = self.member_symbol(&object.name, &heading.name.name) {
                        self.table.record_reference(id, heading.name.span);
                    }
                }
            } else {
                self.diagnostics.error(
                    codes::UNDECLARED_METHOD,
                    heading.name.span,
                    format!(
                        "method '{}' is not declared by object type '{}'",
                        heading.name.name, object.name
                    ),
                );
            }
        }

        let signature = self.signature_of(&heading.params, heading.return_type.as_ref());
        self.table.enter_scope(ScopeKind::Method, method.span);
        self.analyze_routine(&heading.params, &signature, &method.locals, &method.body);
        self.table.exit_scope();
    }

    /// Parameters, locals, nested bodies and statements of a routine whose scope is current
    fn analyze_routine(
        &mut self,
        params: &[Param],
        signature: &Signature,
        locals: &[Decl],
        body: &[Stmt],
    ) {
        let mut routine = RoutineContext {
            result: signature.result.clone(),
            ..RoutineContext::default()
        };
        let mut index = 0;
        for param in params {
            for name in &param.names {
                let ty = signature
                    .params
                    .get(index)
                    .map(|p| p.ty.clone())
                    .unwrap_or_default();
                index += 1;
                let symbol = Symbol::new(name.name.clone(), SymbolKind::Parameter, name.span)
                    .with_type(ty)
                    .with_param_mode(param.mode);
                if let Some(id) = self.define_symbol(symbol) {
                    if param.mode == ParamMode::Out {
                        routine.out_params.insert(id, OutState::default());
                    }
                }
            }
        }

        self.routines.push(routine);
        self.register_decls(locals);
        self.analyze_bodies(locals);
        self.check_block(body);
        let routine = self.routines.pop().unwrap_or_default();
        self.report_unused(&routine);
    }

    /// Unused locals and parameters of the current scope, and OUT parameters never assigned
    fn report_unused(&mut self, routine: &RoutineContext) {
        let scope = self.table.current_scope();
        let mut warnings = Vec::new();
        for (id, symbol) in self.table.symbols_in(scope) {
            if !matches!(symbol.kind, SymbolKind::Var | SymbolKind::Parameter) {
                continue;
            }
            if let Some(state) = routine.out_params.get(&id) {
                if !state.assigned {
                    warnings.push(Diagnostic::warning(
                        codes::OUT_NEVER_ASSIGNED,
                        symbol.span,
                        format!("OUT parameter '{}' is never assigned", symbol.name),
                    ));
                    continue;
                }
            }
            if self.table.reference_count(id) == 0 {
                warnings.push(Diagnostic::warning(
                    codes::UNUSED_SYMBOL,
                    symbol.span,
                    format!("unused {} '{}'", symbol.kind.display(), symbol.name),
                ));
            }
        }
        for warning in warnings {
            self.diagnostics.add(warning);
        }
    }

    /// Exported names must be declared at module level
    pub(super) fn check_exports(&mut self, module: &Module) {
        for export in &module.exports {
            for name in &export.names {
                match self.table.lookup_from(self.table.root(), &name.name) {
                    Some(id) => self.table.record_reference(id, name.span),
                    None => self.diagnostics.error(
                        codes::UNDEFINED_REFERENCE,
                        name.span,
                        format!("exported name '{}' is not declared", name.name),
                    ),
                }
            }
        }
    }
}
