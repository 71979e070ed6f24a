//! Parse and bind every expression of a model.

use efs_diagnostic::Diagnostic;
use tracing::{debug, instrument};

use crate::bind::bind_tree;
use crate::range::check_range;
use crate::{ElementKind, Model};

impl Model {
    /// Parse and bind every expression, replacing the diagnostics of the
    /// previous compile. Refactoring diagnostics are kept.
    ///
    /// Type references are bound before anything else so member lookups
    /// through typed elements can see their types.
    ///
    /// Returns the number of errors.
    #[instrument(level = "debug", skip_all)]
    pub fn compile(&mut self) -> usize {
        for id in self.ids().collect::<Vec<_>>() {
            self.element_mut(id)
                .messages
                .retain(|d| d.code.is_refactor_error());
        }

        for slot in self.expression_slots() {
            let Some(mut expression) = self.take_expression(slot) else {
                continue;
            };
            let messages: Vec<Diagnostic> = match expression.parse() {
                Err(err) => vec![err.into_diagnostic()],
                Ok(()) => match expression.tree_mut() {
                    Some(tree) => bind_tree(self, slot.0, tree),
                    None => Vec::new(),
                },
            };
            self.restore_expression(slot, expression, messages);
        }

        let errors = self.error_count();
        debug!(errors, "compiled");
        errors
    }

    /// Compile, then run the checks that need no expression: range bounds.
    ///
    /// Returns the number of errors.
    #[instrument(level = "debug", skip_all)]
    pub fn check(&mut self) -> usize {
        self.compile();
        for id in self.ids().collect::<Vec<_>>() {
            let element = self.element(id);
            if let ElementKind::Range(range) = element.kind() {
                let messages = check_range(element.name(), range);
                self.element_mut(id).messages.extend(messages);
            }
        }
        self.error_count()
    }
}
