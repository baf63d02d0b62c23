use super::{Decl, Ident, Stmt};
use crate::base::Span;

/// Which flavor of module a file declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// `DEFINITION MODULE`: exported interface
    Definition,
    /// `IMPLEMENTATION MODULE`: body of a definition module of the same name
    Implementation,
    /// `MAIN MODULE`: program entry
    Main,
    /// Bare `MODULE`
    Plain,
}

impl ModuleKind {
    /// Whether other modules can import this one by name
    pub fn is_importable(self) -> bool {
        !matches!(self, Self::Implementation)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Definition => "DEFINITION",
            Self::Implementation => "IMPLEMENTATION",
            Self::Main => "MAIN",
            Self::Plain => "MODULE",
        }
    }
}

/// Root of the AST for one source file
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub kind: ModuleKind,
    pub name: Ident,
    pub imports: Vec<Import>,
    pub exports: Vec<Export>,
    pub decls: Vec<Decl>,
    /// Statements of the module's `BEGIN` block, if it has one
    pub body: Option<Vec<Stmt>>,
    pub span: Span,
}

impl Module {
    /// Names of every module this one imports, in source order
    pub fn imported_modules(&self) -> impl Iterator<Item = &Ident> {
        self.imports.iter().flat_map(|import| import.modules())
    }
}

/// An import clause
#[derive(Debug, Clone, PartialEq)]
pub enum Import {
    /// `FROM Queues IMPORT Queue, Item AS QItem, ALL Color;`
    From {
        module: Ident,
        items: Vec<ImportItem>,
        span: Span,
    },
    /// `IMPORT Queues, Stats;`
    Modules { modules: Vec<Ident>, span: Span },
}

impl Import {
    pub fn span(&self) -> Span {
        match self {
            Self::From { span, .. } | Self::Modules { span, .. } => *span,
        }
    }

    pub fn modules(&self) -> std::slice::Iter<'_, Ident> {
        match self {
            Self::From { module, .. } => std::slice::from_ref(module).iter(),
            Self::Modules { modules, .. } => modules.iter(),
        }
    }
}

/// One name of a `FROM ... IMPORT` list
#[derive(Debug, Clone, PartialEq)]
pub struct ImportItem {
    pub name: Ident,
    pub alias: Option<Ident>,
    /// `ALL T`: also import the enumeration constants of `T`
    pub all: bool,
    pub span: Span,
}

impl ImportItem {
    /// Name the item is visible under in the importing module
    pub fn local_name(&self) -> &Ident {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

/// `EXPORT a, b;`
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub names: Vec<Ident>,
    pub span: Span,
}
