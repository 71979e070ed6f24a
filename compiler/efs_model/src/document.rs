//! JSON model documents.
//!
//! ```json
//! { "children": [
//!     { "kind": "namespace", "name": "N1", "children": [
//!         { "kind": "structure", "name": "S1", "children": [
//!             { "kind": "structure_element", "name": "E1", "type_ref": "Boolean" }
//!         ] }
//!     ] }
//! ] }
//! ```

use std::path::Path;

use efs_ir::ElementId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DocumentError, ElementKind, Model, ModelResult, Precision, RangeDef};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub children: Vec<NodeDoc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDoc {
    pub name: String,
    pub type_ref: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDoc {
    Namespace {
        name: String,
        #[serde(default)]
        children: Vec<NodeDoc>,
    },
    Structure {
        name: String,
        #[serde(default)]
        children: Vec<NodeDoc>,
    },
    StructureElement {
        name: String,
        type_ref: String,
    },
    Variable {
        name: String,
        type_ref: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Range {
        name: String,
        precision: Precision,
        min_value: String,
        max_value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Enum {
        name: String,
        #[serde(default)]
        values: Vec<String>,
    },
    Function {
        name: String,
        return_type: String,
        body: String,
        #[serde(default)]
        parameters: Vec<ParameterDoc>,
    },
    Rule {
        name: String,
        condition: String,
        #[serde(default)]
        actions: Vec<String>,
    },
}

impl Document {
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Model {
    pub fn from_document(document: &Document) -> ModelResult<Model> {
        let mut model = Model::new();
        let root = model.root();
        for node in &document.children {
            model.add_node(root, node)?;
        }
        Ok(model)
    }

    fn add_node(&mut self, parent: ElementId, node: &NodeDoc) -> ModelResult<()> {
        match node {
            NodeDoc::Namespace { name, children } | NodeDoc::Structure { name, children } => {
                let id = if matches!(node, NodeDoc::Namespace { .. }) {
                    self.add_namespace(parent, name)?
                } else {
                    self.add_structure(parent, name)?
                };
                for child in children {
                    self.add_node(id, child)?;
                }
            }
            NodeDoc::StructureElement { name, type_ref } => {
                self.add_structure_element(parent, name, type_ref)?;
            }
            NodeDoc::Variable {
                name,
                type_ref,
                default_value,
            } => {
                self.add_variable(parent, name, type_ref, default_value.as_deref())?;
            }
            NodeDoc::Range {
                name,
                precision,
                min_value,
                max_value,
                default_value,
            } => {
                let range = RangeDef {
                    precision: *precision,
                    min_value: min_value.clone(),
                    max_value: max_value.clone(),
                    default_value: default_value.clone(),
                };
                self.add_range(parent, name, range)?;
            }
            NodeDoc::Enum { name, values } => {
                let values: Vec<&str> = values.iter().map(String::as_str).collect();
                self.add_enum(parent, name, &values)?;
            }
            NodeDoc::Function {
                name,
                return_type,
                body,
                parameters,
            } => {
                let id = self.add_function(parent, name, return_type, body)?;
                for parameter in parameters {
                    self.add_parameter(id, &parameter.name, &parameter.type_ref)?;
                }
            }
            NodeDoc::Rule {
                name,
                condition,
                actions,
            } => {
                let actions: Vec<&str> = actions.iter().map(String::as_str).collect();
                self.add_rule(parent, name, condition, &actions)?;
            }
        }
        Ok(())
    }

    /// Document for the current state; predefined types are left out.
    pub fn to_document(&self) -> Document {
        Document {
            children: self.child_nodes(self.root()),
        }
    }

    fn child_nodes(&self, parent: ElementId) -> Vec<NodeDoc> {
        self.children(parent)
            .iter()
            .filter_map(|&child| self.node(child))
            .collect()
    }

    fn node(&self, id: ElementId) -> Option<NodeDoc> {
        let name = self.name(id).to_string();
        let text = |expression: &crate::Expression| expression.text().to_string();
        let node = match self.kind(id) {
            ElementKind::Namespace => NodeDoc::Namespace {
                name,
                children: self.child_nodes(id),
            },
            ElementKind::Structure => NodeDoc::Structure {
                name,
                children: self.child_nodes(id),
            },
            ElementKind::StructureElement { type_ref } => NodeDoc::StructureElement {
                name,
                type_ref: text(type_ref),
            },
            ElementKind::Variable {
                type_ref,
                default_value,
            } => NodeDoc::Variable {
                name,
                type_ref: text(type_ref),
                default_value: default_value.as_ref().map(text),
            },
            ElementKind::Range(range) => NodeDoc::Range {
                name,
                precision: range.precision,
                min_value: range.min_value.clone(),
                max_value: range.max_value.clone(),
                default_value: range.default_value.clone(),
            },
            ElementKind::Enum => NodeDoc::Enum {
                name,
                values: self
                    .children(id)
                    .iter()
                    .map(|&value| self.name(value).to_string())
                    .collect(),
            },
            ElementKind::Function { return_type, body } => NodeDoc::Function {
                name,
                return_type: text(return_type),
                body: text(body),
                parameters: self
                    .children(id)
                    .iter()
                    .filter_map(|&p| match self.kind(p) {
                        ElementKind::Parameter { type_ref } => Some(ParameterDoc {
                            name: self.name(p).to_string(),
                            type_ref: text(type_ref),
                        }),
                        _ => None,
                    })
                    .collect(),
            },
            ElementKind::Rule { condition, actions } => NodeDoc::Rule {
                name,
                condition: text(condition),
                actions: actions.iter().map(text).collect(),
            },
            ElementKind::Dictionary
            | ElementKind::EnumValue
            | ElementKind::Parameter { .. }
            | ElementKind::Predefined => return None,
        };
        Some(node)
    }

    pub fn load(path: &Path) -> Result<Model, DocumentError> {
        let text = std::fs::read_to_string(path)?;
        let model = Model::from_document(&Document::from_json(&text)?)?;
        debug!(path = %path.display(), elements = model.len(), "loaded model");
        Ok(model)
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_document().to_json()?)?;
        debug!(path = %path.display(), "saved model");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
