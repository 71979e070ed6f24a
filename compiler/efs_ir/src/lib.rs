//! EFS IR - Interpretation Tree Types
//!
//! Core data structures shared by the EFS expression tooling:
//! - Spans for byte offsets into expression text
//! - `ElementId` handles to model elements
//! - Interpretation tree nodes in a flat `ExprArena`
//! - The `Visitor` traversal dispatcher
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//! - **References are handles**: a bound node stores an `ElementId`, never a
//!   pointer into the model graph

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod ids;
mod span;
pub mod visitor;

pub use arena::{ExprArena, ExprTree};
pub use ast::{
    BinaryOp, CallArg, Designator, Expr, ExprKind, Literal, Location, QuantifierKind, UnaryOp,
};
pub use ids::{CallArgRange, ElementId, ExprId, ExprRange};
pub use span::{Span, SpanError};
pub use visitor::Visitor;
