//! Rename by relocation: requalify every model reference after a move.

use efs_ir::visitor::walk_deref;
use efs_ir::{Designator, ElementId, Expr, ExprArena, ExprRange, ExprTree, Span, Visitor};
use tracing::trace;

use crate::patch::{PatchError, TextPatcher};
use crate::{ModelNames, RefactorStrategy};

/// Rewrites each reference to a model element with the name that element
/// has as seen from `context`, the element owning the expression.
///
/// Unlike [`RenameByIdentity`](crate::RenameByIdentity) the replacement is
/// computed per reference, so one pass fixes every reference of an
/// expression whose owner moved.
pub struct Requalify<'n, N: ModelNames + ?Sized> {
    context: ElementId,
    names: &'n N,
}

impl<'n, N: ModelNames + ?Sized> Requalify<'n, N> {
    pub fn new(context: ElementId, names: &'n N) -> Self {
        Requalify { context, names }
    }
}

impl<N: ModelNames + ?Sized> RefactorStrategy for Requalify<'_, N> {
    fn run(&self, text: &str, tree: Option<&ExprTree>) -> Result<String, PatchError> {
        let mut walker = RelocationWalker {
            context: self.context,
            names: self.names,
            patcher: TextPatcher::new(text),
            error: None,
        };
        if let Some(tree) = tree {
            walker.visit_tree(tree);
        }
        match walker.error {
            Some(err) => Err(err),
            None => Ok(walker.patcher.into_text()),
        }
    }
}

struct RelocationWalker<'n, N: ModelNames + ?Sized> {
    context: ElementId,
    names: &'n N,
    patcher: TextPatcher,
    error: Option<PatchError>,
}

impl<N: ModelNames + ?Sized> RelocationWalker<'_, N> {
    fn patch(&mut self, element: ElementId, span: Span) {
        if self.error.is_some() {
            return;
        }
        let name = self.names.reference_name(element, self.context);
        match self.patcher.replace(&name, span) {
            Ok(changed) => trace!(%span, name, changed, "requalified"),
            Err(err) => self.error = Some(err),
        }
    }

    /// Standalone model element a deref argument resolves to, if any.
    fn qualifiable(&self, arg: &Expr) -> Option<ElementId> {
        if arg.as_designator().is_some_and(Designator::is_keyword) {
            return None;
        }
        arg.reference
            .filter(|&element| !self.names.is_structure_element(element))
    }
}

impl<'ast, N: ModelNames + ?Sized> Visitor<'ast> for RelocationWalker<'_, N> {
    fn visit_deref(&mut self, expr: &'ast Expr, args: ExprRange, arena: &'ast ExprArena) {
        if let Some(element) = expr.reference {
            if !self.names.is_structure_element(element) {
                self.patch(element, expr.span);
                return;
            }
        }

        let matched = arena
            .get_expr_list(args)
            .iter()
            .filter(|id| id.is_valid())
            .map(|&id| arena.get_expr(id))
            .find_map(|arg| self.qualifiable(arg).map(|element| (element, arg.span)));
        match matched {
            Some((element, arg_span)) => self.patch(element, expr.span.up_to(arg_span.end)),
            None => walk_deref(self, args, arena),
        }
    }

    fn visit_designator(
        &mut self,
        expr: &'ast Expr,
        designator: &'ast Designator,
        _arena: &'ast ExprArena,
    ) {
        let Some(element) = expr.reference else {
            return;
        };
        if !designator.is_keyword() && !self.names.is_predefined(element) {
            self.patch(element, expr.span);
        }
    }
}
