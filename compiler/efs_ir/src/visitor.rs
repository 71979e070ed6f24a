//! Interpretation Tree Visitor
//!
//! Dispatches on node kind and walks children in document order.
//!
//! # Design
//!
//! Default `visit_*` implementations call the matching `walk_*` function,
//! so an implementor only overrides the node kinds it cares about. An
//! override that does not call back into `walk_*` stops the descent at that
//! node, which is how a refactoring pass avoids patching a span twice.
//!
//! The tree is never mutated by a visitor; visitors mutate their own state.
//!
//! # Example
//!
//! ```text
//! struct CollectNames(Vec<String>);
//!
//! impl<'ast> Visitor<'ast> for CollectNames {
//!     fn visit_designator(&mut self, _: &'ast Expr, d: &'ast Designator, _: &'ast ExprArena) {
//!         self.0.push(d.name.clone());
//!     }
//! }
//! ```

use crate::ast::{CallArg, Designator, Expr, ExprKind};
use crate::{ExprArena, ExprId, ExprRange, ExprTree};

/// Interpretation tree visitor.
pub trait Visitor<'ast> {
    /// Visit a whole tree, starting at its root.
    fn visit_tree(&mut self, tree: &'ast ExprTree) {
        self.visit_expr_id(tree.root, &tree.arena);
    }

    /// Visit an expression by ID. Invalid ids (absent arguments) are skipped.
    fn visit_expr_id(&mut self, id: ExprId, arena: &'ast ExprArena) {
        if id.is_valid() {
            self.visit_expr(arena.get_expr(id), arena);
        }
    }

    /// Visit an expression; the default dispatches on its kind.
    fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast ExprArena) {
        walk_expr(self, expr, arena);
    }

    /// Visit a single identifier occurrence. Designators have no children.
    fn visit_designator(
        &mut self,
        expr: &'ast Expr,
        designator: &'ast Designator,
        arena: &'ast ExprArena,
    ) {
        let _ = (expr, designator, arena);
    }

    /// Visit a dereference chain.
    fn visit_deref(&mut self, expr: &'ast Expr, args: ExprRange, arena: &'ast ExprArena) {
        let _ = expr;
        walk_deref(self, args, arena);
    }

    /// Visit a call argument (parameter name first, then value).
    fn visit_call_arg(&mut self, arg: &'ast CallArg, arena: &'ast ExprArena) {
        if let Some(name) = arg.name {
            self.visit_expr_id(name, arena);
        }
        self.visit_expr_id(arg.value, arena);
    }
}

/// Dispatch on the node kind.
///
/// Children are visited depth-first, left to right, so spans are reached
/// in increasing start order.
pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    expr: &'ast Expr,
    arena: &'ast ExprArena,
) {
    match &expr.kind {
        ExprKind::Designator(designator) => visitor.visit_designator(expr, designator, arena),
        ExprKind::Deref(args) => visitor.visit_deref(expr, *args, arena),
        ExprKind::Call { func, args } => {
            visitor.visit_expr_id(*func, arena);
            for arg in arena.get_call_args(*args) {
                visitor.visit_call_arg(arg, arena);
            }
        }
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr_id(*left, arena);
            visitor.visit_expr_id(*right, arena);
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr_id(*operand, arena),
        ExprKind::Quantifier {
            collection,
            condition,
            ..
        } => {
            visitor.visit_expr_id(*collection, arena);
            visitor.visit_expr_id(*condition, arena);
        }
        ExprKind::Assign { target, value } => {
            visitor.visit_expr_id(*target, arena);
            visitor.visit_expr_id(*value, arena);
        }
        ExprKind::Literal(_) | ExprKind::Error => {}
    }
}

/// Walk each present argument of a dereference, in order.
pub fn walk_deref<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    args: ExprRange,
    arena: &'ast ExprArena,
) {
    for &arg in arena.get_expr_list(args) {
        visitor.visit_expr_id(arg, arena);
    }
}
