//! Rename by identity: rewrite every occurrence of one element.

use efs_ir::visitor::walk_deref;
use efs_ir::{
    Designator, ElementId, Expr, ExprArena, ExprRange, ExprTree, Location, Span, Visitor,
};
use tracing::trace;

use crate::patch::{PatchError, TextPatcher};
use crate::RefactorStrategy;

/// Replaces each reference to `target` with a fixed text.
#[derive(Clone, Debug)]
pub struct RenameByIdentity {
    target: ElementId,
    replacement: String,
}

impl RenameByIdentity {
    pub fn new(target: ElementId, replacement: impl Into<String>) -> Self {
        RenameByIdentity {
            target,
            replacement: replacement.into(),
        }
    }
}

impl RefactorStrategy for RenameByIdentity {
    fn run(&self, text: &str, tree: Option<&ExprTree>) -> Result<String, PatchError> {
        let mut walker = IdentityWalker {
            target: self.target,
            replacement: &self.replacement,
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

struct IdentityWalker<'r> {
    target: ElementId,
    replacement: &'r str,
    patcher: TextPatcher,
    error: Option<PatchError>,
}

impl IdentityWalker<'_> {
    fn patch(&mut self, span: Span) {
        if self.error.is_some() {
            return;
        }
        match self.patcher.replace(self.replacement, span) {
            Ok(changed) => trace!(%span, changed, "identity patch"),
            Err(err) => self.error = Some(err),
        }
    }

    /// Arguments whose own text can be swapped for a qualified name.
    ///
    /// Absent slots, `THIS` and members reached through an instance are
    /// left to the designator handler.
    fn is_qualifiable(arg: &Expr) -> bool {
        match arg.as_designator() {
            Some(designator) => !matches!(designator.location, Location::This | Location::Instance),
            None => true,
        }
    }
}

impl<'ast> Visitor<'ast> for IdentityWalker<'_> {
    fn visit_deref(&mut self, expr: &'ast Expr, args: ExprRange, arena: &'ast ExprArena) {
        if expr.reference == Some(self.target) {
            self.patch(expr.span);
            return;
        }

        let matched = arena
            .get_expr_list(args)
            .iter()
            .filter(|id| id.is_valid())
            .map(|&id| arena.get_expr(id))
            .filter(|arg| Self::is_qualifiable(arg))
            .find(|arg| arg.reference == Some(self.target));
        match matched {
            Some(arg) => self.patch(expr.span.up_to(arg.span.end)),
            None => walk_deref(self, args, arena),
        }
    }

    fn visit_designator(
        &mut self,
        expr: &'ast Expr,
        designator: &'ast Designator,
        _arena: &'ast ExprArena,
    ) {
        if expr.reference == Some(self.target) && !designator.is_self_reference() {
            self.patch(expr.span);
        }
    }
}
