use super::{analyze_source, analyze_with, codes, count};
use crate::semantic::diagnostics::codes::*;
use crate::semantic::symbol_table::{SymbolKind, Visibility};

const VEHICLES: &str = "MODULE Sim;
TYPE
  Vehicle = OBJECT
    speed : REAL;
    ASK METHOD Accelerate(IN delta : REAL);
    ASK METHOD Speed() : REAL;
  END OBJECT;
  Truck = OBJECT(Vehicle)
    load : INTEGER;
  OVERRIDE
    ASK METHOD Accelerate(IN delta : REAL);
  END OBJECT;
OBJECT Vehicle;
  ASK METHOD Accelerate(IN delta : REAL);
  BEGIN
    speed := speed + delta;
  END METHOD;
  ASK METHOD Speed() : REAL;
  BEGIN
    RETURN speed;
  END METHOD;
END OBJECT;
OBJECT Truck;
  ASK METHOD Accelerate(IN delta : REAL);
  BEGIN
    INHERITED Accelerate(delta / FLOAT(load + 1));
  END METHOD;
END OBJECT;
VAR t : Truck;
    v : REAL;
BEGIN
  NEW(t);
  ASK t TO Accelerate(2.0);
  v := ASK t Speed();
END MODULE.";

#[test]
fn test_object_hierarchy_without_problems() {
    let result = analyze_source(VEHICLES);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_members_live_in_the_object_scope() {
    let result = analyze_source(VEHICLES);
    let table = &result.symbols;
    let speed = table
        .all_symbols()
        .find(|(_, s)| s.name == "speed")
        .map(|(_, s)| s)
        .unwrap();
    assert_eq!(speed.kind, SymbolKind::Field);
    assert_eq!(speed.owner.as_deref(), Some("Vehicle"));
    assert!(table.lookup_from(table.root(), "speed").is_none());

    let overrides: Vec<_> = table
        .all_symbols()
        .filter(|(_, s)| s.kind == SymbolKind::Method && s.name == "Accelerate")
        .map(|(_, s)| (s.owner.clone().unwrap_or_default(), s.is_override))
        .collect();
    assert_eq!(
        overrides,
        vec![("Vehicle".into(), false), ("Truck".into(), true)]
    );
}

#[test]
fn test_inherited_members_resolve_in_methods() {
    let result = analyze_source(VEHICLES);
    let table = &result.symbols;
    let (speed, _) = table
        .all_symbols()
        .find(|(_, s)| s.name == "speed")
        .unwrap();
    // Read and written in Vehicle.Accelerate, read in Vehicle.Speed
    assert_eq!(table.reference_count(speed), 3);
}

#[test]
fn test_override_without_base_method() {
    let result = analyze_source(
        "MODULE M;
TYPE Base = OBJECT
  ASK METHOD Run;
END OBJECT;
Child = OBJECT(Base)
OVERRIDE
  ASK METHOD Stop;
END OBJECT;
END MODULE.",
    );
    assert_eq!(codes(&result), vec![INVALID_OVERRIDE]);
    assert!(result.diagnostics[0].message.contains("Stop"));
}

#[test]
fn test_override_signature_mismatch_points_at_base() {
    let result = analyze_source(
        "MODULE M;
TYPE Base = OBJECT
  ASK METHOD Run(IN steps : INTEGER);
END OBJECT;
Child = OBJECT(Base)
OVERRIDE
  ASK METHOD Run(IN steps : REAL);
END OBJECT;
END MODULE.",
    );
    assert_eq!(codes(&result), vec![OVERRIDE_MISMATCH]);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.span.start.line, 7);
    assert_eq!(diagnostic.related.len(), 1);
    assert_eq!(diagnostic.related[0].span.start.line, 3);
}

#[test]
fn test_hiding_a_base_method_is_a_warning() {
    let result = analyze_source(
        "MODULE M;
TYPE Base = OBJECT
  TELL METHOD Run;
END OBJECT;
Child = OBJECT(Base)
  TELL METHOD Run;
END OBJECT;
END MODULE.",
    );
    assert_eq!(codes(&result), vec![HIDES_BASE_METHOD]);
    assert!(!result.has_errors());
}

#[test]
fn test_override_through_two_levels() {
    let result = analyze_source(
        "MODULE M;
TYPE A = OBJECT
  ASK METHOD Describe() : STRING;
END OBJECT;
B = OBJECT(A)
  x : INTEGER;
END OBJECT;
C = OBJECT(B)
OVERRIDE
  ASK METHOD Describe() : STRING;
END OBJECT;
END MODULE.",
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_inheritance_cycle() {
    let result = analyze_source(
        "MODULE M;
TYPE A = OBJECT(B)
END OBJECT;
B = OBJECT(A)
END OBJECT;
END MODULE.",
    );
    assert_eq!(count(&result, CIRCULAR_INHERITANCE), 2);
}

#[test]
fn test_method_not_declared_by_object() {
    let result = analyze_source(
        "MODULE M;
TYPE Base = OBJECT
  ASK METHOD Run;
END OBJECT;
OBJECT Base;
  ASK METHOD Run;
  BEGIN
  END METHOD;
  ASK METHOD Walk;
  BEGIN
  END METHOD;
END OBJECT;
END MODULE.",
    );
    assert_eq!(codes(&result), vec![UNDECLARED_METHOD]);
    assert!(result.diagnostics[0].message.contains("Walk"));
}

#[test]
fn test_implementation_of_unknown_object() {
    let result = analyze_source(
        "MODULE M;
OBJECT Ghost;
  ASK METHOD Haunt;
  BEGIN
    level := level + 1;
  END METHOD;
END OBJECT;
END MODULE.",
    );
    assert_eq!(codes(&result), vec![UNKNOWN_OBJECT]);
}

#[test]
fn test_missing_member_on_resolved_object() {
    let result = analyze_source(
        "MODULE M;
TYPE Base = OBJECT
  ASK METHOD Run;
END OBJECT;
VAR b : Base;
BEGIN
  ASK b TO Fly;
END MODULE.",
    );
    assert_eq!(codes(&result), vec![UNDEFINED_REFERENCE]);
    assert!(result.diagnostics[0].message.contains("Fly"));
}

#[test]
fn test_unresolved_base_suppresses_unknown_names() {
    let result = analyze_source(
        "MODULE M;
FROM Library IMPORT Base;
TYPE Child = OBJECT(Base)
OVERRIDE
  ASK METHOD Run;
END OBJECT;
OBJECT Child;
  ASK METHOD Run;
  BEGIN
    count := count + 1;
  END METHOD;
END OBJECT;
END MODULE.",
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_override_of_imported_base() {
    let result = analyze_with(
        "MODULE Fleet;
FROM Vehicles IMPORT Vehicle;
TYPE Bus = OBJECT(Vehicle)
OVERRIDE
  ASK METHOD Accelerate(IN delta : INTEGER);
  ASK METHOD Turn;
END OBJECT;
END MODULE.",
        &["DEFINITION MODULE Vehicles;
TYPE Vehicle = OBJECT
  speed : REAL;
  ASK METHOD Accelerate(IN delta : REAL);
  ASK METHOD Turn;
END OBJECT;
END MODULE."],
    );
    assert_eq!(codes(&result), vec![OVERRIDE_MISMATCH]);
    assert!(result.diagnostics[0].related.is_empty());
}

#[test]
fn test_private_and_class_sections() {
    let result = analyze_source(
        "MODULE M;
TYPE Counter = OBJECT
  value : INTEGER;
PRIVATE
  hidden : INTEGER;
CLASS
  instances : INTEGER;
END OBJECT;
END MODULE.",
    );
    let table = &result.symbols;
    let find = |name: &str| {
        table
            .all_symbols()
            .find(|(_, s)| s.name == name)
            .map(|(_, s)| s.clone())
            .unwrap()
    };
    assert_eq!(find("value").visibility, Visibility::Public);
    assert_eq!(find("hidden").visibility, Visibility::Private);
    assert!(find("instances").is_class);
    assert!(!find("value").is_class);
}
