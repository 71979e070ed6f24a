//! Textual refactoring of bound EFS expressions.
//!
//! When a model element is renamed or moved, every expression that refers
//! to it has to be rewritten. Expressions are not regenerated from their
//! trees: the original text is patched in place at the spans the parser
//! recorded, so formatting and everything not touched by the rename stays
//! as the user wrote it.
//!
//! - [`TextPatcher`]: working text plus a running offset delta
//! - [`RenameByIdentity`]: replace each reference to one element
//! - [`Requalify`]: recompute every model reference from the owner after a move
//! - [`apply`]: run a strategy, validate, then commit or roll back

mod apply;
mod identity;
mod names;
mod patch;
mod relocate;

pub use apply::{apply, Expressionable, RefactorOutcome, RefactorStrategy};
pub use identity::RenameByIdentity;
pub use names::ModelNames;
pub use patch::{PatchError, TextPatcher};
pub use relocate::Requalify;

#[cfg(test)]
mod test_helpers;
