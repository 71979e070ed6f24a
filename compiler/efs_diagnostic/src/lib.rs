//! Diagnostics for EFS models.
//!
//! Every problem found while parsing, binding, range checking or
//! refactoring an expression becomes a [`Diagnostic`] with:
//! - an error code for searchability
//! - a message (what went wrong)
//! - labels on the expression text (where it went wrong)
//!
//! Diagnostics are attached to the model element that owns the expression
//! through a [`DiagnosticSink`].

mod diagnostic;
mod error_code;
mod sink;

pub use diagnostic::{
    refactoring_aborted, unknown_identifier, unknown_member, Diagnostic, Label, Severity,
};
pub use error_code::ErrorCode;
pub use sink::DiagnosticSink;
