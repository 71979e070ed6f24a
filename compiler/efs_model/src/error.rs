//! Errors for model edits and document I/O.
//!
//! Problems *inside* expressions are [`Diagnostic`](efs_diagnostic::Diagnostic)s
//! attached to elements; these types are for requests the model refuses.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("`{name}` is not a valid identifier")]
    InvalidName { name: String },

    #[error("`{parent}` already contains an element named `{name}`")]
    DuplicateName { parent: String, name: String },

    #[error("a {child} cannot be placed in a {parent}")]
    InvalidParent {
        parent: &'static str,
        child: &'static str,
    },

    #[error("cannot move `{element}` into itself or one of its children")]
    MoveIntoSelf { element: String },

    #[error("predefined element `{0}` cannot be changed")]
    Predefined(String),

    #[error("no element named `{0}`")]
    NotFound(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Loading or saving a model document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}
