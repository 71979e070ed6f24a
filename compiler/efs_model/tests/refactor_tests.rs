//! End-to-end rename and move over small models.

#![allow(clippy::unwrap_used)]

use efs_ir::ElementId;
use efs_model::{Model, ModelError, RefactorReport};
use pretty_assertions::assert_eq;

fn text(model: &Model, element: ElementId, slot: usize) -> &str {
    model.expression((element, slot)).unwrap().text()
}

/// `N1 { S1 { E1: Boolean, F(): Boolean }, S2 { E2: S1 }, W: S1 }, N2 { R }`
struct Sample {
    model: Model,
    n1: ElementId,
    n2: ElementId,
    s1: ElementId,
    e1: ElementId,
    f: ElementId,
    s2: ElementId,
    e2: ElementId,
    w: ElementId,
    r: ElementId,
}

fn sample() -> Sample {
    let mut model = Model::new();
    let root = model.root();
    let n1 = model.add_namespace(root, "N1").unwrap();
    let s1 = model.add_structure(n1, "S1").unwrap();
    let e1 = model.add_structure_element(s1, "E1", "Boolean").unwrap();
    let f = model
        .add_function(s1, "F", "Boolean", "THIS.E1 AND E1")
        .unwrap();
    let s2 = model.add_structure(n1, "S2").unwrap();
    let e2 = model.add_structure_element(s2, "E2", "S1").unwrap();
    let w = model.add_variable(n1, "W", "S1", None).unwrap();
    let n2 = model.add_namespace(root, "N2").unwrap();
    let r = model
        .add_rule(n2, "R", "N1.W.E1 == N1.S1.E1", &["N1.W <- N1.W"])
        .unwrap();
    Sample {
        model,
        n1,
        n2,
        s1,
        e1,
        f,
        s2,
        e2,
        w,
        r,
    }
}

#[test]
fn rename_structure_updates_type_references() {
    let mut s = sample();
    assert_eq!(s.model.compile(), 0);

    let report = s.model.rename(s.s1, "NewS1").unwrap();

    assert_eq!(text(&s.model, s.e2, 0), "NewS1");
    assert_eq!(text(&s.model, s.w, 0), "NewS1");
    assert_eq!(text(&s.model, s.r, 0), "N1.W.E1 == N1.NewS1.E1");
    assert_eq!(
        report,
        RefactorReport {
            committed: 3,
            rejected: 0,
            unchanged: 1
        }
    );
    assert_eq!(s.model.error_count(), 0);
    assert_eq!(s.model.type_of(s.e2), Some(s.s1));
}

#[test]
fn rename_structure_element_updates_members_only() {
    let mut s = sample();
    s.model.compile();

    s.model.rename(s.e1, "NewE1").unwrap();

    assert_eq!(text(&s.model, s.f, 1), "THIS.NewE1 AND NewE1");
    assert_eq!(text(&s.model, s.r, 0), "N1.W.NewE1 == N1.S1.NewE1");
    assert_eq!(text(&s.model, s.r, 1), "N1.W <- N1.W");
    assert_eq!(s.model.error_count(), 0);
}

#[test]
fn rename_namespace_updates_qualified_paths() {
    let mut s = sample();
    s.model.compile();

    s.model.rename(s.n1, "Core").unwrap();

    assert_eq!(text(&s.model, s.r, 0), "Core.W.E1 == Core.S1.E1");
    assert_eq!(text(&s.model, s.r, 1), "Core.W <- Core.W");
    assert_eq!(text(&s.model, s.e2, 0), "S1");
    assert_eq!(s.model.error_count(), 0);
}

#[test]
fn rename_refusals_leave_model_untouched() {
    let mut s = sample();
    s.model.compile();
    let boolean = s.model.find("Boolean").unwrap();

    assert!(matches!(
        s.model.rename(s.s1, "S2"),
        Err(ModelError::DuplicateName { .. })
    ));
    assert!(matches!(
        s.model.rename(s.s1, "not valid"),
        Err(ModelError::InvalidName { .. })
    ));
    assert!(matches!(
        s.model.rename(boolean, "Bool"),
        Err(ModelError::Predefined(_))
    ));
    assert_eq!(s.model.name(s.s1), "S1");
    assert_eq!(text(&s.model, s.e2, 0), "S1");
}

#[test]
fn rename_skips_expressions_that_do_not_parse() {
    let mut s = sample();
    let broken = s.model.add_rule(s.n1, "Broken", "S1 +", &[]).unwrap();
    assert_eq!(s.model.compile(), 1);

    let report = s.model.rename(s.s1, "NewS1").unwrap();

    assert_eq!(text(&s.model, broken, 0), "S1 +");
    assert_eq!(report.committed, 3);
    assert_eq!(s.model.error_count(), 1);
}

#[test]
fn move_structure_requalifies_moved_expressions() {
    let mut s = sample();
    s.model.compile();

    let report = s.model.move_to(s.s2, s.n2).unwrap();

    assert_eq!(s.model.full_name(s.e2), "N2.S2.E2");
    assert_eq!(text(&s.model, s.e2, 0), "N1.S1");
    assert_eq!(report.committed, 1);
    assert_eq!(s.model.error_count(), 0);
    assert_eq!(s.model.type_of(s.e2), Some(s.s1));
}

#[test]
fn move_structure_renames_outside_users() {
    let mut s = sample();
    s.model.compile();

    s.model.move_to(s.s1, s.n2).unwrap();

    assert_eq!(s.model.full_name(s.s1), "N2.S1");
    assert_eq!(text(&s.model, s.e2, 0), "N2.S1");
    assert_eq!(text(&s.model, s.w, 0), "N2.S1");
    assert_eq!(text(&s.model, s.r, 0), "N1.W.E1 == S1.E1");
    assert_eq!(text(&s.model, s.f, 1), "THIS.E1 AND E1");
    assert_eq!(s.model.error_count(), 0);
}

#[test]
fn move_requalifies_against_the_owner_scopes() {
    // `N2 { S1 }, N1 { S2 { E2: N2.S1, S1: Boolean } }`: inside S2 the bare
    // name `S1` means the member, not the structure.
    let mut model = Model::new();
    let root = model.root();
    let n2 = model.add_namespace(root, "N2").unwrap();
    let s1 = model.add_structure(n2, "S1").unwrap();
    let n1 = model.add_namespace(root, "N1").unwrap();
    let s2 = model.add_structure(n1, "S2").unwrap();
    let e2 = model.add_structure_element(s2, "E2", "N2.S1").unwrap();
    model.add_structure_element(s2, "S1", "Boolean").unwrap();
    assert_eq!(model.compile(), 0);

    let report = model.move_to(s2, n2).unwrap();

    assert_eq!(model.full_name(e2), "N2.S2.E2");
    assert_eq!(text(&model, e2, 0), "N2.S1");
    assert_eq!(report.committed, 0);
    assert_eq!(model.error_count(), 0);
    assert_eq!(model.type_of(e2), Some(s1));
}

#[test]
fn move_keeps_calls_to_sibling_members_short() {
    let mut model = Model::new();
    let root = model.root();
    let n1 = model.add_namespace(root, "N1").unwrap();
    let s1 = model.add_structure(n1, "S1").unwrap();
    model.add_function(s1, "G", "Boolean", "True").unwrap();
    let f = model.add_function(s1, "F", "Boolean", "G()").unwrap();
    let n2 = model.add_namespace(root, "N2").unwrap();
    assert_eq!(model.compile(), 0);

    model.move_to(s1, n2).unwrap();

    assert_eq!(model.full_name(f), "N2.S1.F");
    assert_eq!(text(&model, f, 1), "G()");
    assert_eq!(model.error_count(), 0);
}

#[test]
fn move_into_own_subtree_is_refused() {
    let mut s = sample();
    s.model.compile();
    let inner = s.model.add_namespace(s.n1, "Inner").unwrap();

    assert!(matches!(
        s.model.move_to(s.n1, inner),
        Err(ModelError::MoveIntoSelf { .. })
    ));
    assert!(matches!(
        s.model.move_to(s.e1, s.n2),
        Err(ModelError::InvalidParent { .. })
    ));
    assert_eq!(s.model.full_name(s.s1), "N1.S1");
}

#[test]
fn saved_model_loads_with_refactored_texts() {
    let mut s = sample();
    s.model.compile();
    s.model.rename(s.s1, "NewS1").unwrap();

    let path = std::env::temp_dir().join(format!("efs_model_{}.json", std::process::id()));
    s.model.save(&path).unwrap();
    let mut loaded = Model::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.compile(), 0);
    let e2 = loaded.find("N1.S2.E2").unwrap();
    assert_eq!(text(&loaded, e2, 0), "NewS1");
    assert_eq!(loaded.to_document(), s.model.to_document());
}
