//! Shared fixtures: hand-bound trees and a fake model.
#![allow(clippy::unwrap_used)]

use rustc_hash::FxHashMap;

use efs_ir::{ElementId, ExprId, ExprKind, ExprTree, Location};
use efs_parse::ExpressionKind;

use crate::{Expressionable, ModelNames};

pub(crate) fn id(raw: u32) -> ElementId {
    ElementId::new(raw)
}

/// Parse `text` and bind designators by name.
///
/// A dereference takes the reference of its last argument when that
/// argument is a model path segment.
pub(crate) fn bound(text: &str, bindings: &[(&str, u32, Location)]) -> ExprTree {
    let mut tree = efs_parse::parse_expression(text).unwrap();
    let ids: Vec<ExprId> = tree.arena.iter().map(|(id, _)| id).collect();

    for &expr_id in &ids {
        let ExprKind::Designator(designator) = &tree.arena.get_expr(expr_id).kind else {
            continue;
        };
        if let Some(&(_, raw, location)) =
            bindings.iter().find(|(name, ..)| *name == designator.name)
        {
            tree.arena.bind(expr_id, Some(id(raw)), location);
        }
    }

    for &expr_id in &ids {
        let ExprKind::Deref(args) = tree.arena.get_expr(expr_id).kind else {
            continue;
        };
        let last = tree.arena.get_expr_list(args).last().copied();
        let reference = last
            .map(|last| tree.arena.get_expr(last))
            .filter(|last| {
                last.as_designator()
                    .is_some_and(|d| d.location == Location::Model)
            })
            .and_then(|last| last.reference);
        tree.arena.get_expr_mut(expr_id).reference = reference;
    }
    tree
}

#[derive(Default)]
pub(crate) struct FakeNames {
    pub names: FxHashMap<ElementId, String>,
    pub members: Vec<ElementId>,
    pub predefined: Vec<ElementId>,
}

impl FakeNames {
    pub fn with(mut self, raw: u32, name: &str) -> Self {
        self.names.insert(id(raw), name.to_string());
        self
    }
}

impl ModelNames for FakeNames {
    fn reference_name(&self, element: ElementId, _context: ElementId) -> String {
        self.names.get(&element).cloned().unwrap_or_default()
    }

    fn is_structure_element(&self, element: ElementId) -> bool {
        self.members.contains(&element)
    }

    fn is_predefined(&self, element: ElementId) -> bool {
        self.predefined.contains(&element)
    }
}

/// A value expression that validates candidates with the real parser.
pub(crate) struct FakeExpression {
    pub text: String,
    pub tree: Option<ExprTree>,
    pub accept: bool,
}

impl FakeExpression {
    pub fn new(text: &str, tree: Option<ExprTree>) -> Self {
        FakeExpression {
            text: text.to_string(),
            tree,
            accept: true,
        }
    }
}

impl Expressionable for FakeExpression {
    fn expression_text(&self) -> &str {
        &self.text
    }

    fn set_expression_text(&mut self, text: String) {
        self.text = text;
        self.tree = None;
    }

    fn tree(&self) -> Option<&ExprTree> {
        self.tree.as_ref()
    }

    fn check_valid_expression(&self, candidate: &str) -> bool {
        self.accept && efs_parse::is_valid(ExpressionKind::Value, candidate)
    }
}
