//! Arena storage for interpretation trees.

use std::fmt;

use crate::ast::{CallArg, Expr, ExprKind};
use crate::{CallArgRange, ElementId, ExprId, ExprRange, Location, Span};

#[allow(
    clippy::cast_possible_truncation,
    reason = "expression texts are far below u32::MAX nodes"
)]
#[inline]
fn index_u32(len: usize) -> u32 {
    len as u32
}

/// Contiguous storage for the nodes of one expression.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    /// Flattened dereference argument lists.
    expr_lists: Vec<ExprId>,
    call_args: Vec<CallArg>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate expression, return ID.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(index_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    #[track_caller]
    pub fn get_expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Iterate over all nodes with their ids, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (ExprId, &Expr)> {
        self.exprs
            .iter()
            .enumerate()
            .map(|(i, expr)| (ExprId::new(index_u32(i)), expr))
    }

    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = index_u32(self.expr_lists.len());
        self.expr_lists.extend(exprs);
        let len = u16::try_from(index_u32(self.expr_lists.len()) - start).unwrap_or(u16::MAX);
        ExprRange::new(start, len)
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    pub fn alloc_call_args(&mut self, args: impl IntoIterator<Item = CallArg>) -> CallArgRange {
        let start = index_u32(self.call_args.len());
        self.call_args.extend(args);
        let len = u16::try_from(index_u32(self.call_args.len()) - start).unwrap_or(u16::MAX);
        CallArgRange::new(start, len)
    }

    #[inline]
    pub fn get_call_args(&self, range: CallArgRange) -> &[CallArg] {
        let start = range.start as usize;
        &self.call_args[start..start + range.len()]
    }

    /// Record the binding of a node.
    pub fn bind(&mut self, id: ExprId, reference: Option<ElementId>, location: Location) {
        let expr = self.get_expr_mut(id);
        expr.reference = reference;
        if let ExprKind::Designator(designator) = &mut expr.kind {
            designator.location = location;
        }
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("exprs", &self.exprs.len())
            .field("expr_lists", &self.expr_lists.len())
            .field("call_args", &self.call_args.len())
            .finish()
    }
}

/// A parsed expression: its arena and root node.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ExprTree {
    pub arena: ExprArena,
    pub root: ExprId,
}

impl ExprTree {
    pub fn new(arena: ExprArena, root: ExprId) -> Self {
        ExprTree { arena, root }
    }

    pub fn root_expr(&self) -> &Expr {
        self.arena.get_expr(self.root)
    }

    pub fn span(&self) -> Span {
        self.root_expr().span
    }

    /// Check whether any node of the tree resolves to `element`.
    pub fn references(&self, element: ElementId) -> bool {
        self.arena
            .iter()
            .any(|(_, expr)| expr.reference == Some(element))
    }
}
