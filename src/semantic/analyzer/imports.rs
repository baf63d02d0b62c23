use std::sync::Arc;

use super::context::{AnalysisContext, external_symbol};
use crate::parser::{Ident, Import, ImportItem, Module};
use crate::semantic::diagnostics::codes;
use crate::semantic::symbol_table::{ScopeId, Symbol, SymbolKind, SymbolTable};
use crate::semantic::types::Type;

impl AnalysisContext<'_> {
    pub(super) fn define_module_symbol(&mut self, module: &Module) {
        let symbol = Symbol::new(module.name.name.clone(), SymbolKind::Module, module.name.span);
        self.define_symbol(symbol);
    }

    pub(super) fn register_imports(&mut self, module: &Module) {
        for import in &module.imports {
            match import {
                Import::From { module, items, .. } => self.import_from(module, items),
                Import::Modules { modules, .. } => {
                    for module in modules {
                        self.import_module(module);
                    }
                }
            }
        }
    }

    /// The table for an imported module; `None` for a self-import, which is skipped
    fn import_source(&mut self, source: &Ident) -> Option<Option<Arc<SymbolTable>>> {
        if source.name == self.module_name {
            self.diagnostics.warning(
                codes::SELF_IMPORT,
                source.span,
                format!("module '{}' imports itself", source.name),
            );
            return None;
        }
        let table = self.module_table(&source.name);
        if table.is_none()
            && self.has_resolver()
            && self.unresolved_imports.insert(source.name.clone())
        {
            self.diagnostics.warning(
                codes::UNRESOLVED_IMPORT,
                source.span,
                format!("cannot resolve module '{}'", source.name),
            );
        }
        Some(table)
    }

    /// `IMPORT M`: qualified access through a module symbol
    fn import_module(&mut self, module: &Ident) {
        if self.import_source(module).is_none() || self.whole_imports.contains(&module.name) {
            return;
        }
        self.whole_imports.push(module.name.clone());
        let symbol = Symbol::new(module.name.clone(), SymbolKind::Module, module.span)
            .with_origin(module.name.clone());
        self.define_symbol(symbol);
    }

    /// `FROM M IMPORT a, b AS c, ALL T`: copies of the named symbols
    fn import_from(&mut self, source: &Ident, items: &[ImportItem]) {
        let Some(table) = self.import_source(source) else {
            return;
        };
        for item in items {
            let found = table
                .as_ref()
                .and_then(|t| t.lookup_from(ScopeId::ROOT, &item.name.name).map(|id| (t, id)));
            let Some((table, id)) = found else {
                if table.is_some() {
                    self.diagnostics.warning(
                        codes::UNRESOLVED_IMPORT,
                        item.name.span,
                        format!("module '{}' has no '{}'", source.name, item.name.name),
                    );
                }
                self.define_placeholder(item.local_name(), source);
                continue;
            };

            let local = item.local_name();
            let mut symbol = external_symbol(table, id, &source.name);
            symbol.name = local.name.clone();
            symbol.span = local.span;
            let values = match (&symbol.ty, item.all) {
                (Type::Enum { values }, true) => values.clone(),
                _ => Vec::new(),
            };
            self.define_symbol(symbol);

            for value in values {
                match table.lookup_from(ScopeId::ROOT, &value) {
                    Some(value_id) => {
                        let mut constant = external_symbol(table, value_id, &source.name);
                        constant.span = item.name.span;
                        self.define_symbol(constant);
                    }
                    None => {
                        let constant = Symbol::new(value, SymbolKind::Const, item.name.span)
                            .with_type(Type::Named {
                                module: Some(source.name.clone()),
                                name: item.name.name.clone(),
                            })
                            .with_origin(source.name.clone());
                        self.define_symbol(constant);
                    }
                }
            }
        }
    }

    /// Stand-in for an import that could not be found, so its uses do not cascade
    fn define_placeholder(&mut self, name: &Ident, source: &Ident) {
        let symbol =
            Symbol::new(name.name.clone(), SymbolKind::Var, name.span).with_origin(source.name.clone());
        if let Some(id) = self.define_symbol(symbol) {
            self.placeholders.insert(id);
        }
    }
}
