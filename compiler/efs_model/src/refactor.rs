//! Rename and move, with the dependent expression texts rewritten.

use efs_ir::ElementId;
use efs_refactor::{
    apply, ModelNames, RefactorOutcome, RefactorStrategy, RenameByIdentity, Requalify,
};
use rustc_hash::FxHashSet;
use tracing::{debug, info, instrument};

use crate::model::{validate_name, ExpressionSlot};
use crate::{Model, ModelError, ModelResult};

/// What happened to the dependent expressions of one rename or move.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RefactorReport {
    pub committed: usize,
    pub rejected: usize,
    pub unchanged: usize,
}

impl RefactorReport {
    fn record(&mut self, outcome: &RefactorOutcome) {
        match outcome {
            RefactorOutcome::Unchanged => self.unchanged += 1,
            RefactorOutcome::Committed { .. } => self.committed += 1,
            RefactorOutcome::Rejected(_) => self.rejected += 1,
        }
    }
}

impl Model {
    /// Expressions whose bound tree refers to `element`.
    pub fn users_of(&self, element: ElementId) -> Vec<ExpressionSlot> {
        self.expression_slots()
            .into_iter()
            .filter(|&slot| {
                self.expression(slot)
                    .and_then(|expression| expression.tree())
                    .is_some_and(|tree| tree.references(element))
            })
            .collect()
    }

    /// Rename `element` and update every expression that refers to it.
    ///
    /// Each dependent expression is rewritten on its own; one that fails
    /// to validate keeps its text and gets a diagnostic, the others are
    /// still committed.
    #[instrument(level = "debug", skip(self), fields(element = %self.full_name(element)))]
    pub fn rename(&mut self, element: ElementId, new_name: &str) -> ModelResult<RefactorReport> {
        self.check_editable(element)?;
        validate_name(new_name)?;
        if let Some(parent) = self.element(element).parent() {
            self.check_placement(parent, new_name, self.kind(element), Some(element))?;
        }

        self.clear_refactor_diagnostics();
        self.compile();
        let users = self.users_of(element);
        self.set_name(element, new_name);

        let mut report = RefactorReport::default();
        for slot in users {
            let replacement = self.reference_name(element, slot.0);
            let outcome = self.refactor_slot(slot, &RenameByIdentity::new(element, replacement));
            report.record(&outcome);
        }

        self.compile();
        info!(?report, new_name, "renamed");
        Ok(report)
    }

    /// Move `element` under `new_parent`.
    ///
    /// Expressions inside the moved subtree are requalified for their new
    /// namespace; expressions elsewhere that refer to the moved element
    /// get its new name.
    #[instrument(level = "debug", skip(self), fields(element = %self.full_name(element)))]
    pub fn move_to(
        &mut self,
        element: ElementId,
        new_parent: ElementId,
    ) -> ModelResult<RefactorReport> {
        self.check_editable(element)?;
        if new_parent == element || self.is_ancestor(element, new_parent) {
            return Err(ModelError::MoveIntoSelf {
                element: self.full_name(element),
            });
        }
        self.check_placement(
            new_parent,
            self.name(element),
            self.kind(element),
            Some(element),
        )?;

        self.clear_refactor_diagnostics();
        self.compile();
        let subtree: FxHashSet<ElementId> = self
            .ids()
            .filter(|&id| id == element || self.is_ancestor(element, id))
            .collect();
        let (inside, outside): (Vec<ExpressionSlot>, Vec<ExpressionSlot>) = self
            .expression_slots()
            .into_iter()
            .partition(|slot| subtree.contains(&slot.0));
        let users: FxHashSet<ExpressionSlot> = self.users_of(element).into_iter().collect();
        let outside: Vec<ExpressionSlot> = outside
            .into_iter()
            .filter(|slot| users.contains(slot))
            .collect();

        self.reparent(element, new_parent);

        let mut report = RefactorReport::default();
        for slot in inside {
            let outcome = self.requalify_slot(slot);
            report.record(&outcome);
        }
        for slot in outside {
            let replacement = self.reference_name(element, slot.0);
            let outcome = self.refactor_slot(slot, &RenameByIdentity::new(element, replacement));
            report.record(&outcome);
        }

        self.compile();
        info!(?report, new_parent = %self.full_name(new_parent), "moved");
        Ok(report)
    }

    /// Drop what the previous rename or move reported, which
    /// [`compile`](Self::compile) keeps.
    fn clear_refactor_diagnostics(&mut self) {
        for id in self.ids().collect::<Vec<_>>() {
            self.element_mut(id)
                .messages
                .retain(|d| !d.code.is_refactor_error());
        }
    }

    fn check_editable(&self, element: ElementId) -> ModelResult<()> {
        if self.element(element).is_predefined() || element == self.root() {
            return Err(ModelError::Predefined(self.name(element).to_string()));
        }
        Ok(())
    }

    /// Run one strategy over one expression and record the outcome on its
    /// element.
    fn refactor_slot<S: RefactorStrategy>(
        &mut self,
        slot: ExpressionSlot,
        strategy: &S,
    ) -> RefactorOutcome {
        let Some(mut expression) = self.take_expression(slot) else {
            return RefactorOutcome::Unchanged;
        };
        let mut messages = Vec::new();
        let outcome = apply(strategy, &mut expression, &mut messages);
        debug!(owner = %self.full_name(slot.0), ?outcome, "expression refactored");
        self.restore_expression(slot, expression, messages);
        outcome
    }

    /// Like [`refactor_slot`](Self::refactor_slot) with a [`Requalify`]
    /// from the owning element, which borrows the model for its names.
    fn requalify_slot(&mut self, slot: ExpressionSlot) -> RefactorOutcome {
        let Some(mut expression) = self.take_expression(slot) else {
            return RefactorOutcome::Unchanged;
        };
        let mut messages = Vec::new();
        let strategy = Requalify::new(slot.0, &*self);
        let outcome = apply(&strategy, &mut expression, &mut messages);
        debug!(owner = %self.full_name(slot.0), ?outcome, "expression requalified");
        self.restore_expression(slot, expression, messages);
        outcome
    }
}
