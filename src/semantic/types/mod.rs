//! Declared types as seen by the analyzer
//!
//! Named references stay symbolic (`Type::Named`) and are resolved on demand
//! against a symbol table, so recursive and forward-declared types need no
//! fixpoint.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::parser::{DispatchKind, ParamMode};

/// A semantic type
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Type {
    Integer,
    Real,
    Boolean,
    Char,
    String,
    LongInt,
    LongReal,
    Cardinal,
    AnyObj,
    AnyRec,
    /// Reference to a declared type, optionally qualified by its module
    Named {
        module: Option<SmolStr>,
        name: SmolStr,
    },
    Array {
        dimensions: usize,
        element: Box<Type>,
    },
    Record {
        fields: IndexMap<SmolStr, Type>,
    },
    Object(Box<ObjectInfo>),
    Pointer(Box<Type>),
    Set(Box<Type>),
    Subrange(Box<Type>),
    Enum {
        values: Vec<SmolStr>,
    },
    Procedure(Box<Signature>),
    /// Type of `NIL` and its typed variants
    Nil,
    Void,
    #[default]
    Unknown,
}

/// Parameter list and result of a procedure or method
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub params: Vec<ParamType>,
    pub result: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamType {
    pub mode: ParamMode,
    pub ty: Type,
}

/// Object member tables; base types are kept by name and resolved lazily
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectInfo {
    pub bases: Vec<Type>,
    pub fields: IndexMap<SmolStr, Type>,
    pub methods: IndexMap<SmolStr, MethodInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
    pub dispatch: DispatchKind,
    pub signature: Signature,
    pub is_override: bool,
}

impl Type {
    /// Builtin scalar for an exact-case name
    pub fn builtin(name: &str) -> Option<Type> {
        let ty = match name {
            "INTEGER" => Type::Integer,
            "REAL" => Type::Real,
            "BOOLEAN" => Type::Boolean,
            "CHAR" => Type::Char,
            "STRING" => Type::String,
            "LONGINT" => Type::LongInt,
            "LONGREAL" => Type::LongReal,
            "CARDINAL" => Type::Cardinal,
            "ANYOBJ" => Type::AnyObj,
            "ANYREC" => Type::AnyRec,
            _ => return None,
        };
        Some(ty)
    }

    pub fn named(name: impl Into<SmolStr>) -> Type {
        Type::Named {
            module: None,
            name: name.into(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }

    pub fn is_integer(&self) -> bool {
        match self {
            Type::Integer | Type::LongInt | Type::Cardinal => true,
            Type::Subrange(base) => base.is_integer(),
            _ => false,
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Type::Real | Type::LongReal)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_real()
    }

    /// Types whose values are references and accept `NIL`
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Type::Pointer(_)
                | Type::Object(_)
                | Type::AnyObj
                | Type::AnyRec
                | Type::Record { .. }
                | Type::Array { .. }
                | Type::Procedure(_)
                | Type::Named { .. }
                | Type::Nil
        )
    }

    /// Whether a value of type `source` may be stored in a location of this type.
    ///
    /// Unknown on either side is accepted. Named types compare by name, so the
    /// check is structural only for anonymous types. `INTEGER` widens to `REAL`.
    pub fn accepts(&self, source: &Type) -> bool {
        if self.is_unknown() || source.is_unknown() || self == source {
            return true;
        }
        match (self, source) {
            (target, Type::Nil) => target.is_reference(),
            (target, source) if target.is_integer() && source.is_integer() => true,
            (target, source) if target.is_real() && source.is_numeric() => true,
            (Type::Subrange(base), source) => base.accepts(source),
            (Type::String, Type::Char) => true,
            (Type::Char, Type::String) => false,
            // Named references are only resolved by the analyzer; stay permissive here
            (Type::Named { .. }, _) | (_, Type::Named { .. }) => true,
            (Type::AnyObj, Type::Object(_)) => true,
            (Type::AnyRec, Type::Record { .. }) => true,
            (Type::Set(a), Type::Set(b)) => a.accepts(b),
            (Type::Pointer(a), Type::Pointer(b)) => a.accepts(b),
            _ => false,
        }
    }

    /// Name of the referenced type, if this is a named reference
    pub fn as_named(&self) -> Option<(&Option<SmolStr>, &SmolStr)> {
        match self {
            Type::Named { module, name } => Some((module, name)),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Integer => write!(f, "INTEGER"),
            Type::Real => write!(f, "REAL"),
            Type::Boolean => write!(f, "BOOLEAN"),
            Type::Char => write!(f, "CHAR"),
            Type::String => write!(f, "STRING"),
            Type::LongInt => write!(f, "LONGINT"),
            Type::LongReal => write!(f, "LONGREAL"),
            Type::Cardinal => write!(f, "CARDINAL"),
            Type::AnyObj => write!(f, "ANYOBJ"),
            Type::AnyRec => write!(f, "ANYREC"),
            Type::Named {
                module: Some(module),
                name,
            } => write!(f, "{}.{}", module, name),
            Type::Named { module: None, name } => write!(f, "{}", name),
            Type::Array { element, .. } => write!(f, "ARRAY OF {}", element),
            Type::Record { .. } => write!(f, "RECORD"),
            Type::Object(_) => write!(f, "OBJECT"),
            Type::Pointer(target) => write!(f, "POINTER TO {}", target),
            Type::Set(element) => write!(f, "SET OF {}", element),
            Type::Subrange(base) => write!(f, "subrange of {}", base),
            Type::Enum { values } => write!(f, "({})", values.join(", ")),
            Type::Procedure(_) => write!(f, "PROCEDURE"),
            Type::Nil => write!(f, "NIL"),
            Type::Void => write!(f, "no value"),
            Type::Unknown => write!(f, "unknown"),
        }
    }
}

impl Signature {
    /// Same parameter count, modes and types, and same result type
    pub fn matches(&self, other: &Signature) -> bool {
        self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.mode == b.mode && a.ty == b.ty)
            && self.result == other.result
    }

    /// `(IN INTEGER, OUT REAL) : BOOLEAN`
    pub fn describe(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.mode.as_str(), p.ty))
            .collect();
        match &self.result {
            Some(result) => format!("({}) : {}", params.join(", "), result),
            None => format!("({})", params.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Type::Real, Type::Integer, true)]
    #[case(Type::Integer, Type::Real, false)]
    #[case(Type::LongInt, Type::Cardinal, true)]
    #[case(Type::Boolean, Type::Integer, false)]
    #[case(Type::String, Type::Char, true)]
    #[case(Type::Pointer(Box::new(Type::Integer)), Type::Nil, true)]
    #[case(Type::Integer, Type::Nil, false)]
    #[case(Type::Boolean, Type::Unknown, true)]
    #[case(Type::Subrange(Box::new(Type::Integer)), Type::Integer, true)]
    #[case(Type::named("Queue"), Type::Integer, true)]
    fn test_accepts(#[case] target: Type, #[case] source: Type, #[case] expected: bool) {
        assert_eq!(target.accepts(&source), expected);
    }

    #[test]
    fn test_builtin_names_are_case_sensitive() {
        assert_eq!(Type::builtin("INTEGER"), Some(Type::Integer));
        assert_eq!(Type::builtin("Integer"), None);
    }

    #[test]
    fn test_signature_matching() {
        let sig = |mode| Signature {
            params: vec![ParamType {
                mode,
                ty: Type::Integer,
            }],
            result: None,
        };
        assert!(sig(ParamMode::In).matches(&sig(ParamMode::In)));
        assert!(!sig(ParamMode::In).matches(&sig(ParamMode::Out)));
        assert_eq!(sig(ParamMode::Out).describe(), "(OUT INTEGER)");
    }
}
