//! Model elements.

use efs_diagnostic::Diagnostic;
use efs_ir::ElementId;
use serde::{Deserialize, Serialize};

use crate::Expression;

/// Numeric precision of a range type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    Integer,
    Double,
}

/// A numeric range type. Bounds are kept as written.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RangeDef {
    pub precision: Precision,
    pub min_value: String,
    pub max_value: String,
    pub default_value: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ElementKind {
    /// Root of a model.
    Dictionary,
    Namespace,
    Structure,
    StructureElement {
        type_ref: Expression,
    },
    Variable {
        type_ref: Expression,
        default_value: Option<Expression>,
    },
    Range(RangeDef),
    Enum,
    EnumValue,
    Function {
        return_type: Expression,
        body: Expression,
    },
    Parameter {
        type_ref: Expression,
    },
    Rule {
        condition: Expression,
        actions: Vec<Expression>,
    },
    /// Built-in type such as `Boolean`.
    Predefined,
}

impl ElementKind {
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Dictionary => "dictionary",
            ElementKind::Namespace => "namespace",
            ElementKind::Structure => "structure",
            ElementKind::StructureElement { .. } => "structure element",
            ElementKind::Variable { .. } => "variable",
            ElementKind::Range(_) => "range",
            ElementKind::Enum => "enum",
            ElementKind::EnumValue => "enum value",
            ElementKind::Function { .. } => "function",
            ElementKind::Parameter { .. } => "parameter",
            ElementKind::Rule { .. } => "rule",
            ElementKind::Predefined => "predefined type",
        }
    }

    pub fn can_contain(&self, child: &ElementKind) -> bool {
        match self {
            ElementKind::Dictionary | ElementKind::Namespace => matches!(
                child,
                ElementKind::Namespace
                    | ElementKind::Structure
                    | ElementKind::Variable { .. }
                    | ElementKind::Range(_)
                    | ElementKind::Enum
                    | ElementKind::Function { .. }
                    | ElementKind::Rule { .. }
            ),
            ElementKind::Structure => matches!(
                child,
                ElementKind::StructureElement { .. }
                    | ElementKind::Function { .. }
                    | ElementKind::Rule { .. }
            ),
            ElementKind::Enum => matches!(child, ElementKind::EnumValue),
            ElementKind::Function { .. } => matches!(child, ElementKind::Parameter { .. }),
            _ => false,
        }
    }

    /// Expressions owned by this element: type references first, then
    /// values, then statements.
    pub fn expressions(&self) -> Vec<&Expression> {
        match self {
            ElementKind::StructureElement { type_ref } | ElementKind::Parameter { type_ref } => {
                vec![type_ref]
            }
            ElementKind::Variable {
                type_ref,
                default_value,
            } => std::iter::once(type_ref)
                .chain(default_value.as_ref())
                .collect(),
            ElementKind::Function { return_type, body } => vec![return_type, body],
            ElementKind::Rule { condition, actions } => {
                std::iter::once(condition).chain(actions.iter()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Mutable access to the expression at position `slot` of
    /// [`expressions`](Self::expressions).
    pub fn expression_mut(&mut self, slot: usize) -> Option<&mut Expression> {
        match self {
            ElementKind::StructureElement { type_ref } | ElementKind::Parameter { type_ref } => {
                (slot == 0).then_some(type_ref)
            }
            ElementKind::Variable {
                type_ref,
                default_value,
            } => match slot {
                0 => Some(type_ref),
                1 => default_value.as_mut(),
                _ => None,
            },
            ElementKind::Function { return_type, body } => match slot {
                0 => Some(return_type),
                1 => Some(body),
                _ => None,
            },
            ElementKind::Rule { condition, actions } => match slot {
                0 => Some(condition),
                _ => actions.get_mut(slot - 1),
            },
            _ => None,
        }
    }
}

/// A node of the model graph.
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) kind: ElementKind,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) predefined: bool,
    pub(crate) messages: Vec<Diagnostic>,
}

impl Element {
    pub(crate) fn new(
        name: impl Into<String>,
        kind: ElementKind,
        parent: Option<ElementId>,
    ) -> Self {
        Element {
            name: name.into(),
            kind,
            parent,
            children: Vec::new(),
            predefined: false,
            messages: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn is_predefined(&self) -> bool {
        self.predefined
    }

    /// Diagnostics attached by the last compile and by refactorings.
    pub fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }
}
