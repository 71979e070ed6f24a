//! EFS models: elements, their expressions, and the refactorings that keep
//! expression texts in step with the model.
//!
//! A [`Model`] is a tree of named elements under a root dictionary.
//! Elements such as structure elements, variables, functions and rules own
//! [`Expression`] texts. [`Model::compile`] parses and binds every text, so
//! each name in an expression knows which element it denotes; the
//! refactoring drivers ([`Model::rename`], [`Model::move_to`]) use those
//! bindings to rewrite the texts after the model changes.

mod bind;
mod compile;
mod document;
mod element;
mod error;
mod expression;
mod model;
mod names;
mod range;
mod refactor;

pub use document::{Document, NodeDoc, ParameterDoc};
pub use element::{Element, ElementKind, Precision, RangeDef};
pub use error::{DocumentError, ModelError, ModelResult};
pub use expression::Expression;
pub use model::{ExpressionSlot, Model, PREDEFINED_TYPES};
pub use range::check_range;
pub use refactor::RefactorReport;

pub use efs_ir::ElementId;
pub use efs_parse::ExpressionKind;
