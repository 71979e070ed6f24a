#![allow(clippy::unwrap_used)]

use efs_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::*;
use crate::ExpressionSlot;

type Bound = (String, Option<ElementId>, Location);

/// Designators of a compiled expression in parse order.
fn designators(model: &Model, slot: ExpressionSlot) -> Vec<Bound> {
    let tree = model.expression(slot).unwrap().tree().unwrap();
    tree.arena
        .iter()
        .filter_map(|(_, expr)| {
            expr.as_designator()
                .map(|d| (d.name.clone(), expr.reference, d.location))
        })
        .collect()
}

fn codes(model: &Model, id: ElementId) -> Vec<ErrorCode> {
    model.element(id).messages().iter().map(|d| d.code).collect()
}

/// `N1 { S1 { E1: Boolean, F(): Boolean }, S2 { E2: S1 } }`
struct Sample {
    model: Model,
    n1: ElementId,
    s1: ElementId,
    e1: ElementId,
    f: ElementId,
    e2: ElementId,
}

fn sample(body: &str) -> Sample {
    let mut model = Model::new();
    let n1 = model.add_namespace(model.root(), "N1").unwrap();
    let s1 = model.add_structure(n1, "S1").unwrap();
    let e1 = model.add_structure_element(s1, "E1", "Boolean").unwrap();
    let f = model.add_function(s1, "F", "Boolean", body).unwrap();
    let s2 = model.add_structure(n1, "S2").unwrap();
    let e2 = model.add_structure_element(s2, "E2", "S1").unwrap();
    Sample {
        model,
        n1,
        s1,
        e1,
        f,
        e2,
    }
}

#[test]
fn test_type_reference_binds_to_model_element() {
    let mut s = sample("True");
    assert_eq!(s.model.compile(), 0);
    assert_eq!(
        designators(&s.model, (s.e2, 0)),
        vec![("S1".to_string(), Some(s.s1), Location::Model)]
    );
    assert_eq!(s.model.type_of(s.e2), Some(s.s1));
}

#[test]
fn test_structure_members_are_instance_and_this_is_self() {
    let mut s = sample("E1 AND THIS.E1");
    assert_eq!(s.model.compile(), 0);
    assert_eq!(
        designators(&s.model, (s.f, 1)),
        vec![
            ("E1".to_string(), Some(s.e1), Location::Instance),
            ("THIS".to_string(), Some(s.s1), Location::This),
            ("E1".to_string(), Some(s.e1), Location::Instance),
        ]
    );
    let tree = s.model.expression((s.f, 1)).unwrap().tree().unwrap();
    assert!(tree.references(s.e1));
}

#[test]
fn test_model_path_deref_carries_reference() {
    let mut s = sample("True");
    let rule = s.model.add_rule(s.n1, "R", "N1.S1 == S1", &[]).unwrap();
    assert_eq!(s.model.compile(), 0);

    let tree = s.model.expression((rule, 0)).unwrap().tree().unwrap();
    let derefs: Vec<Option<ElementId>> = tree
        .arena
        .iter()
        .filter(|(_, expr)| matches!(expr.kind, ExprKind::Deref(_)))
        .map(|(_, expr)| expr.reference)
        .collect();
    assert_eq!(derefs, vec![Some(s.s1)]);
}

#[test]
fn test_member_through_typed_variable_is_instance() {
    let mut s = sample("True");
    s.model.add_variable(s.n1, "W", "S1", None).unwrap();
    let rule = s.model.add_rule(s.n1, "R", "W.E1", &[]).unwrap();
    assert_eq!(s.model.compile(), 0);

    let w = s.model.find("N1.W").unwrap();
    assert_eq!(
        designators(&s.model, (rule, 0)),
        vec![
            ("W".to_string(), Some(w), Location::Model),
            ("E1".to_string(), Some(s.e1), Location::Instance),
        ]
    );
    let tree = s.model.expression((rule, 0)).unwrap().tree().unwrap();
    assert_eq!(tree.root_expr().reference, None);
}

#[test]
fn test_parameters_and_quantifier_variables_are_stack() {
    let mut s = sample("True");
    let g = s
        .model
        .add_function(s.n1, "G", "Boolean", "FORALL x IN S1 | x == p")
        .unwrap();
    let p = s.model.add_parameter(g, "p", "Integer").unwrap();
    assert_eq!(s.model.compile(), 0);

    assert_eq!(
        designators(&s.model, (g, 1)),
        vec![
            ("S1".to_string(), Some(s.s1), Location::Model),
            ("x".to_string(), None, Location::Stack),
            ("p".to_string(), Some(p), Location::Stack),
        ]
    );
}

#[test]
fn test_named_call_argument_binds_to_parameter() {
    let mut s = sample("True");
    let g = s.model.add_function(s.n1, "G", "Boolean", "True").unwrap();
    let p = s.model.add_parameter(g, "p", "Integer").unwrap();
    let rule = s.model.add_rule(s.n1, "R", "G(p => 1)", &[]).unwrap();
    assert_eq!(s.model.compile(), 0);

    assert_eq!(
        designators(&s.model, (rule, 0)),
        vec![
            ("G".to_string(), Some(g), Location::Model),
            ("p".to_string(), Some(p), Location::Stack),
        ]
    );
}

#[test]
fn test_unknown_names_are_reported() {
    let mut s = sample("Missing");
    let g = s.model.add_function(s.n1, "G", "Boolean", "True").unwrap();
    let unknown_member = s.model.add_rule(s.n1, "R1", "N1.Nope", &[]).unwrap();
    let unknown_parameter = s.model.add_rule(s.n1, "R2", "G(q => 1)", &[]).unwrap();

    assert_eq!(s.model.compile(), 3);
    assert_eq!(codes(&s.model, s.f), vec![ErrorCode::E2001]);
    assert_eq!(codes(&s.model, unknown_member), vec![ErrorCode::E2002]);
    assert_eq!(codes(&s.model, unknown_parameter), vec![ErrorCode::E2003]);
    assert!(codes(&s.model, g).is_empty());
}

#[test]
fn test_this_outside_structure_is_unknown() {
    let mut s = sample("True");
    let rule = s.model.add_rule(s.n1, "R", "THIS.E1", &[]).unwrap();
    assert_eq!(s.model.compile(), 1);
    assert_eq!(codes(&s.model, rule), vec![ErrorCode::E2001]);
}

#[test]
fn test_recompile_replaces_previous_diagnostics() {
    let mut s = sample("Missing");
    assert_eq!(s.model.compile(), 1);
    assert_eq!(s.model.compile(), 1);
    assert_eq!(codes(&s.model, s.f).len(), 1);
}
