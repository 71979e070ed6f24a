#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::ModelError;

const SAMPLE: &str = r#"{
  "children": [
    { "kind": "namespace", "name": "N1", "children": [
      { "kind": "structure", "name": "S1", "children": [
        { "kind": "structure_element", "name": "E1", "type_ref": "Boolean" }
      ] },
      { "kind": "structure", "name": "S2", "children": [
        { "kind": "structure_element", "name": "E2", "type_ref": "S1" }
      ] },
      { "kind": "range", "name": "Percent", "precision": "double",
        "min_value": "0.0", "max_value": "100.0" },
      { "kind": "enum", "name": "Color", "values": ["Red", "Green"] },
      { "kind": "function", "name": "F", "return_type": "Boolean", "body": "p > 1",
        "parameters": [ { "name": "p", "type_ref": "Integer" } ] },
      { "kind": "rule", "name": "R", "condition": "F(p => 2)", "actions": ["V <- 1"] },
      { "kind": "variable", "name": "V", "type_ref": "Integer", "default_value": "0" }
    ] }
  ]
}"#;

#[test]
fn test_load_builds_model() {
    let mut model = Model::from_document(&Document::from_json(SAMPLE).unwrap()).unwrap();
    assert_eq!(model.check(), 0);

    let e2 = model.find("N1.S2.E2").unwrap();
    assert_eq!(model.type_of(e2), model.find("N1.S1"));
    assert!(model.find("N1.Color.Green").is_some());
    assert!(model.find("N1.F.p").is_some());
}

#[test]
fn test_document_survives_model() {
    let document = Document::from_json(SAMPLE).unwrap();
    let model = Model::from_document(&document).unwrap();
    assert_eq!(model.to_document(), document);

    let json = document.to_json().unwrap();
    assert_eq!(Document::from_json(&json).unwrap(), document);
}

#[test]
fn test_model_errors_surface() {
    let json = r#"{ "children": [
        { "kind": "namespace", "name": "N1" },
        { "kind": "namespace", "name": "N1" }
    ] }"#;
    let err = Model::from_document(&Document::from_json(json).unwrap()).unwrap_err();
    assert!(matches!(err, ModelError::DuplicateName { .. }));
}

#[test]
fn test_malformed_json_is_a_document_error() {
    let err = Document::from_json(r#"{ "children": [ { "kind": "galaxy" } ] }"#).unwrap_err();
    assert!(matches!(err, DocumentError::Json(_)));
}
