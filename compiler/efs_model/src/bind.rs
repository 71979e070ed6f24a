//! Name resolution for expression trees.
//!
//! Fills in `reference` and `Location` on every designator, dereference
//! and call of a parsed tree, working from the element that owns the
//! expression outwards. Nothing is resolved by position in the text, so a
//! bound tree stays valid for the refactoring passes until the text is
//! edited.

use efs_diagnostic::{unknown_identifier, unknown_member, Diagnostic, ErrorCode};
use efs_ir::{
    CallArgRange, Designator, ElementId, ExprId, ExprKind, ExprRange, ExprTree, Location, Span,
};
use tracing::trace;

use crate::{ElementKind, Model};

/// Bind `tree`, owned by `owner`, returning the problems found.
pub(crate) fn bind_tree(
    model: &Model,
    owner: ElementId,
    tree: &mut ExprTree,
) -> Vec<Diagnostic> {
    let mut binder = Binder {
        model,
        owner,
        variables: Vec::new(),
        diagnostics: Vec::new(),
    };
    let root = tree.root;
    binder.bind_expr(tree, root);
    binder.diagnostics
}

struct Binder<'m> {
    model: &'m Model,
    owner: ElementId,
    /// Quantifier variables in scope, innermost last.
    variables: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Binder<'_> {
    /// Bind the subtree at `id` and return the element it denotes.
    fn bind_expr(&mut self, tree: &mut ExprTree, id: ExprId) -> Option<ElementId> {
        if !id.is_valid() {
            return None;
        }
        match tree.arena.get_expr(id).kind.clone() {
            ExprKind::Designator(designator) => {
                let span = tree.arena.get_expr(id).span;
                let (reference, location) = self.resolve_first(&designator, span);
                tree.arena.bind(id, reference, location);
                reference
            }
            ExprKind::Deref(args) => {
                let reference = self.bind_chain(tree, args);
                tree.arena.get_expr_mut(id).reference = reference;
                reference
            }
            ExprKind::Call { func, args } => {
                let function = self.bind_expr(tree, func);
                self.bind_call_args(tree, function, args);
                None
            }
            ExprKind::Binary { left, right, .. } => {
                self.bind_expr(tree, left);
                self.bind_expr(tree, right);
                None
            }
            ExprKind::Unary { operand, .. } => {
                self.bind_expr(tree, operand);
                None
            }
            ExprKind::Quantifier {
                variable,
                collection,
                condition,
                ..
            } => {
                self.bind_expr(tree, collection);
                self.variables.push(variable);
                self.bind_expr(tree, condition);
                self.variables.pop();
                None
            }
            ExprKind::Assign { target, value } => {
                self.bind_expr(tree, target);
                self.bind_expr(tree, value);
                None
            }
            ExprKind::Literal(_) | ExprKind::Error => None,
        }
    }

    /// `a.b.c`: the chain denotes a model element only when every step is
    /// a model path; a member reached through an instance is a value.
    fn bind_chain(&mut self, tree: &mut ExprTree, args: ExprRange) -> Option<ElementId> {
        let ids = tree.arena.get_expr_list(args).to_vec();
        let mut current: Option<(ElementId, Location)> = None;

        // A segment without a reference (unresolved, or a quantifier
        // variable, which carries no type) ends the chain.
        for (index, &arg) in ids.iter().enumerate() {
            if !arg.is_valid() {
                continue;
            }
            let expr = tree.arena.get_expr(arg);
            let span = expr.span;
            let Some(designator) = expr.as_designator().cloned() else {
                self.bind_expr(tree, arg);
                return None;
            };

            let resolved = if index == 0 {
                self.resolve_first(&designator, span)
            } else {
                match current {
                    Some((scope, _)) => self.resolve_member(scope, &designator, span),
                    None => return None,
                }
            };
            let (reference, location) = resolved;
            tree.arena.bind(arg, reference, location);
            current = Some((reference?, location));
        }

        match current {
            Some((element, Location::Model)) => Some(element),
            _ => None,
        }
    }

    fn bind_call_args(
        &mut self,
        tree: &mut ExprTree,
        function: Option<ElementId>,
        args: CallArgRange,
    ) {
        let args = tree.arena.get_call_args(args).to_vec();
        for arg in args {
            if let Some(name) = arg.name {
                self.bind_parameter_name(tree, function, name);
            }
            self.bind_expr(tree, arg.value);
        }
    }

    fn bind_parameter_name(
        &mut self,
        tree: &mut ExprTree,
        function: Option<ElementId>,
        name: ExprId,
    ) {
        let Some(function) = function else {
            return;
        };
        if !matches!(self.model.kind(function), ElementKind::Function { .. }) {
            return;
        }
        let expr = tree.arena.get_expr(name);
        let Some(designator) = expr.as_designator() else {
            return;
        };
        let parameter = self
            .model
            .child_by_name(function, &designator.name)
            .filter(|&p| matches!(self.model.kind(p), ElementKind::Parameter { .. }));
        match parameter {
            Some(parameter) => tree.arena.bind(name, Some(parameter), Location::Stack),
            None => {
                let diagnostic = Diagnostic::error(ErrorCode::E2003)
                    .with_message(format!(
                        "`{}` has no parameter `{}`",
                        self.model.full_name(function),
                        designator.name
                    ))
                    .with_label(expr.span, "unknown parameter");
                self.diagnostics.push(diagnostic);
            }
        }
    }

    /// First segment of a chain, or a lone designator.
    fn resolve_first(
        &mut self,
        designator: &Designator,
        span: Span,
    ) -> (Option<ElementId>, Location) {
        if designator.is_keyword() {
            return match self.model.enclosing_structure(self.owner) {
                Some(structure) => (Some(structure), Location::This),
                None => {
                    self.diagnostics.push(unknown_identifier(span, &designator.name));
                    (None, Location::Unresolved)
                }
            };
        }

        if self.variables.iter().rev().any(|v| *v == designator.name) {
            return (None, Location::Stack);
        }

        let found = self
            .model
            .scope_chain(self.owner)
            .find_map(|scope| self.model.child_by_name(scope, &designator.name));
        match found {
            Some(element) => {
                let location = match self.model.kind(element) {
                    ElementKind::StructureElement { .. } => Location::Instance,
                    ElementKind::Parameter { .. } => Location::Stack,
                    _ => Location::Model,
                };
                trace!(name = %designator.name, ?element, ?location, "resolved");
                (Some(element), location)
            }
            None => {
                self.diagnostics.push(unknown_identifier(span, &designator.name));
                (None, Location::Unresolved)
            }
        }
    }

    /// Segment after a `.`, looked up in the element the chain reached.
    fn resolve_member(
        &mut self,
        scope: ElementId,
        designator: &Designator,
        span: Span,
    ) -> (Option<ElementId>, Location) {
        let (container, location) = match self.model.kind(scope) {
            ElementKind::Dictionary | ElementKind::Namespace | ElementKind::Enum => {
                (Some(scope), Location::Model)
            }
            ElementKind::Structure => (Some(scope), Location::Instance),
            ElementKind::StructureElement { .. }
            | ElementKind::Variable { .. }
            | ElementKind::Parameter { .. } => (
                self.model
                    .type_of(scope)
                    .filter(|&ty| matches!(self.model.kind(ty), ElementKind::Structure)),
                Location::Instance,
            ),
            _ => (None, Location::Unresolved),
        };

        let member = container.and_then(|c| self.model.child_by_name(c, &designator.name));
        match member {
            Some(member) => (Some(member), location),
            None => {
                self.diagnostics.push(unknown_member(
                    span,
                    &self.model.full_name(scope),
                    &designator.name,
                ));
                (None, Location::Unresolved)
            }
        }
    }
}

#[cfg(test)]
mod tests;
