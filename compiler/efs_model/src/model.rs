//! The model graph.
//!
//! Elements live in one `Vec` and refer to each other by [`ElementId`].
//! Expressions refer to elements the same way, so renaming or moving an
//! element never invalidates a reference, only the text that spells it.

use efs_diagnostic::Diagnostic;
use efs_ir::ElementId;
use efs_lexer::TokenKind;
use efs_parse::ExpressionKind;
use tracing::debug;

use crate::{Element, ElementKind, Expression, ModelError, ModelResult, RangeDef};

/// Types every model starts with.
pub const PREDEFINED_TYPES: [&str; 4] = ["Boolean", "Integer", "Double", "String"];

/// Position of one expression: owning element and slot within it.
pub type ExpressionSlot = (ElementId, usize);

#[derive(Clone, Debug)]
pub struct Model {
    elements: Vec<Element>,
    root: ElementId,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// An empty dictionary holding only the predefined types.
    pub fn new() -> Self {
        let root = ElementId::new(0);
        let mut model = Model {
            elements: vec![Element::new("", ElementKind::Dictionary, None)],
            root,
        };
        for name in PREDEFINED_TYPES {
            let id = model.push(root, Element::new(name, ElementKind::Predefined, Some(root)));
            model.element_mut(id).predefined = true;
        }
        model
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Get an element by id.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this model.
    #[inline]
    #[track_caller]
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    #[inline]
    #[track_caller]
    pub(crate) fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.index()]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All element ids, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len()).map(|i| ElementId::new(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    pub fn name(&self, id: ElementId) -> &str {
        &self.element(id).name
    }

    pub fn kind(&self, id: ElementId) -> &ElementKind {
        &self.element(id).kind
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.element(id).children
    }

    /// Strict ancestors of `id`, innermost first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.element(id).parent, |&parent| self.element(parent).parent)
    }

    /// `id` followed by its ancestors.
    pub fn scope_chain(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::once(id).chain(self.ancestors(id))
    }

    /// Check if `ancestor` strictly encloses `id`.
    pub fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Closest structure enclosing (or equal to) `id`.
    pub fn enclosing_structure(&self, id: ElementId) -> Option<ElementId> {
        self.scope_chain(id)
            .find(|&scope| matches!(self.kind(scope), ElementKind::Structure))
    }

    pub fn child_by_name(&self, parent: ElementId, name: &str) -> Option<ElementId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.name(child) == name)
    }

    /// Dotted name from the root, e.g. `N1.S1.E1`. Predefined types are
    /// named by their bare name.
    pub fn full_name(&self, id: ElementId) -> String {
        let mut segments: Vec<&str> = self
            .scope_chain(id)
            .take_while(|&scope| scope != self.root)
            .map(|scope| self.name(scope))
            .collect();
        segments.reverse();
        segments.join(".")
    }

    /// Look up an element by its full name.
    pub fn find(&self, full_name: &str) -> Option<ElementId> {
        full_name
            .split('.')
            .try_fold(self.root, |scope, segment| self.child_by_name(scope, segment))
    }

    /// Type element a typed element (variable, structure element,
    /// parameter) was bound to by the last compile.
    pub fn type_of(&self, id: ElementId) -> Option<ElementId> {
        let type_ref = match self.kind(id) {
            ElementKind::StructureElement { type_ref }
            | ElementKind::Parameter { type_ref }
            | ElementKind::Variable { type_ref, .. } => type_ref,
            _ => return None,
        };
        type_ref.tree().and_then(|tree| tree.root_expr().reference)
    }

    /// Every expression slot, type references first.
    pub fn expression_slots(&self) -> Vec<ExpressionSlot> {
        let mut slots: Vec<(ExpressionKind, ExpressionSlot)> = self
            .ids()
            .flat_map(|id| {
                self.kind(id)
                    .expressions()
                    .into_iter()
                    .enumerate()
                    .map(move |(slot, expression)| (expression.kind(), (id, slot)))
            })
            .collect();
        slots.sort_by_key(|(kind, _)| *kind != ExpressionKind::Type);
        slots.into_iter().map(|(_, slot)| slot).collect()
    }

    pub fn expression(&self, (id, slot): ExpressionSlot) -> Option<&Expression> {
        self.kind(id).expressions().get(slot).copied()
    }

    pub(crate) fn expression_mut(
        &mut self,
        (id, slot): ExpressionSlot,
    ) -> Option<&mut Expression> {
        self.element_mut(id).kind.expression_mut(slot)
    }

    /// Detach an expression so it can be edited while the model is
    /// borrowed; pair with [`restore_expression`](Self::restore_expression).
    pub(crate) fn take_expression(&mut self, slot: ExpressionSlot) -> Option<Expression> {
        self.expression_mut(slot).map(std::mem::take)
    }

    pub(crate) fn restore_expression(
        &mut self,
        slot: ExpressionSlot,
        expression: Expression,
        messages: Vec<Diagnostic>,
    ) {
        if let Some(place) = self.expression_mut(slot) {
            *place = expression;
        }
        self.element_mut(slot.0).messages.extend(messages);
    }

    /// Sum of error diagnostics over all elements.
    pub fn error_count(&self) -> usize {
        self.elements.iter().map(Element::error_count).sum()
    }

    /// Elements carrying at least one diagnostic, with their diagnostics.
    pub fn diagnostics(&self) -> impl Iterator<Item = (ElementId, &[Diagnostic])> + '_ {
        self.ids()
            .map(|id| (id, self.element(id).messages()))
            .filter(|(_, messages)| !messages.is_empty())
    }

    // === Building ===

    /// Add an element under `parent`.
    pub fn add(
        &mut self,
        parent: ElementId,
        name: &str,
        kind: ElementKind,
    ) -> ModelResult<ElementId> {
        validate_name(name)?;
        self.check_placement(parent, name, &kind, None)?;
        debug!(parent = %self.full_name(parent), name, kind = kind.label(), "add element");
        Ok(self.push(parent, Element::new(name, kind, Some(parent))))
    }

    pub fn add_namespace(&mut self, parent: ElementId, name: &str) -> ModelResult<ElementId> {
        self.add(parent, name, ElementKind::Namespace)
    }

    pub fn add_structure(&mut self, parent: ElementId, name: &str) -> ModelResult<ElementId> {
        self.add(parent, name, ElementKind::Structure)
    }

    pub fn add_structure_element(
        &mut self,
        structure: ElementId,
        name: &str,
        type_ref: &str,
    ) -> ModelResult<ElementId> {
        let kind = ElementKind::StructureElement {
            type_ref: Expression::type_ref(type_ref),
        };
        self.add(structure, name, kind)
    }

    pub fn add_variable(
        &mut self,
        parent: ElementId,
        name: &str,
        type_ref: &str,
        default_value: Option<&str>,
    ) -> ModelResult<ElementId> {
        let kind = ElementKind::Variable {
            type_ref: Expression::type_ref(type_ref),
            default_value: default_value.map(Expression::value),
        };
        self.add(parent, name, kind)
    }

    pub fn add_range(
        &mut self,
        parent: ElementId,
        name: &str,
        range: RangeDef,
    ) -> ModelResult<ElementId> {
        self.add(parent, name, ElementKind::Range(range))
    }

    pub fn add_enum(
        &mut self,
        parent: ElementId,
        name: &str,
        values: &[&str],
    ) -> ModelResult<ElementId> {
        let id = self.add(parent, name, ElementKind::Enum)?;
        for value in values {
            self.add(id, value, ElementKind::EnumValue)?;
        }
        Ok(id)
    }

    pub fn add_function(
        &mut self,
        parent: ElementId,
        name: &str,
        return_type: &str,
        body: &str,
    ) -> ModelResult<ElementId> {
        let kind = ElementKind::Function {
            return_type: Expression::type_ref(return_type),
            body: Expression::value(body),
        };
        self.add(parent, name, kind)
    }

    pub fn add_parameter(
        &mut self,
        function: ElementId,
        name: &str,
        type_ref: &str,
    ) -> ModelResult<ElementId> {
        let kind = ElementKind::Parameter {
            type_ref: Expression::type_ref(type_ref),
        };
        self.add(function, name, kind)
    }

    pub fn add_rule(
        &mut self,
        parent: ElementId,
        name: &str,
        condition: &str,
        actions: &[&str],
    ) -> ModelResult<ElementId> {
        let kind = ElementKind::Rule {
            condition: Expression::value(condition),
            actions: actions.iter().copied().map(Expression::statement).collect(),
        };
        self.add(parent, name, kind)
    }

    // === Structural edits (used by the refactoring drivers) ===

    pub(crate) fn set_name(&mut self, id: ElementId, name: &str) {
        self.element_mut(id).name = name.to_string();
    }

    pub(crate) fn reparent(&mut self, id: ElementId, new_parent: ElementId) {
        if let Some(old_parent) = self.element(id).parent {
            self.element_mut(old_parent).children.retain(|&child| child != id);
        }
        self.element_mut(new_parent).children.push(id);
        self.element_mut(id).parent = Some(new_parent);
    }

    /// Check that an element named `name` of `kind` may live in `parent`.
    /// `moving` is the element being renamed or moved, which may keep its
    /// own name.
    pub(crate) fn check_placement(
        &self,
        parent: ElementId,
        name: &str,
        kind: &ElementKind,
        moving: Option<ElementId>,
    ) -> ModelResult<()> {
        let parent_kind = self.kind(parent);
        if !parent_kind.can_contain(kind) {
            return Err(ModelError::InvalidParent {
                parent: parent_kind.label(),
                child: kind.label(),
            });
        }
        match self.child_by_name(parent, name) {
            Some(existing) if Some(existing) != moving => Err(ModelError::DuplicateName {
                parent: self.full_name(parent),
                name: name.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn push(&mut self, parent: ElementId, element: Element) -> ElementId {
        let id = ElementId::new(u32::try_from(self.elements.len()).unwrap_or(u32::MAX));
        self.elements.push(element);
        self.element_mut(parent).children.push(id);
        id
    }
}

/// An element name must lex as exactly one identifier.
pub(crate) fn validate_name(name: &str) -> ModelResult<()> {
    let tokens = efs_lexer::lex(name);
    let mut kinds = tokens.kinds();
    match (kinds.next(), kinds.next()) {
        (Some(TokenKind::Ident(ident)), Some(TokenKind::Eof)) if ident == name => Ok(()),
        _ => Err(ModelError::InvalidName {
            name: name.to_string(),
        }),
    }
}
