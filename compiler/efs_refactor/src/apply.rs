//! Commit or roll back a refactoring of one expression.

use efs_diagnostic::{refactoring_aborted, Diagnostic, DiagnosticSink, ErrorCode};
use efs_ir::ExprTree;
use tracing::{debug, warn};

use crate::patch::PatchError;

/// Something whose behaviour is defined by an expression text.
pub trait Expressionable {
    fn expression_text(&self) -> &str;

    fn set_expression_text(&mut self, text: String);

    /// Bound tree for the current text, if it parsed.
    fn tree(&self) -> Option<&ExprTree>;

    /// Attempt a parse of `candidate` and discard the result.
    fn check_valid_expression(&self, candidate: &str) -> bool;
}

/// A way of rewriting an expression text from its bound tree.
pub trait RefactorStrategy {
    /// Produce the rewritten text. `text` itself is never modified.
    fn run(&self, text: &str, tree: Option<&ExprTree>) -> Result<String, PatchError>;
}

/// What [`apply`] did to an expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RefactorOutcome {
    /// Nothing to rewrite.
    Unchanged,
    Committed { old: String, new: String },
    /// The candidate text was refused; the original text is kept.
    Rejected(Diagnostic),
}

impl RefactorOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, RefactorOutcome::Committed { .. })
    }
}

/// Run `strategy` over `expressionable` and commit the result if it is
/// still a valid expression.
///
/// On rejection the text is left untouched and exactly one diagnostic is
/// added to `sink`.
pub fn apply<S, E, D>(strategy: &S, expressionable: &mut E, sink: &mut D) -> RefactorOutcome
where
    S: RefactorStrategy + ?Sized,
    E: Expressionable + ?Sized,
    D: DiagnosticSink + ?Sized,
{
    let Some(tree) = expressionable.tree() else {
        return RefactorOutcome::Unchanged;
    };
    let original = expressionable.expression_text();

    let candidate = match strategy.run(original, Some(tree)) {
        Ok(candidate) => candidate,
        Err(err) => {
            return reject(
                original.to_string(),
                ErrorCode::E3002,
                &err.to_string(),
                sink,
            )
        }
    };
    if candidate == original {
        return RefactorOutcome::Unchanged;
    }

    if !expressionable.check_valid_expression(&candidate) {
        let note = format!("rewritten text `{candidate}` is not a valid expression");
        return reject(original.to_string(), ErrorCode::E3001, &note, sink);
    }

    let old = original.to_string();
    debug!(old = %old, new = %candidate, "refactoring committed");
    expressionable.set_expression_text(candidate.clone());
    RefactorOutcome::Committed {
        old,
        new: candidate,
    }
}

#[cold]
fn reject<D: DiagnosticSink + ?Sized>(
    original: String,
    code: ErrorCode,
    note: &str,
    sink: &mut D,
) -> RefactorOutcome {
    warn!(expression = %original, code = %code, note, "refactoring aborted");
    let diagnostic = refactoring_aborted(code, &original).with_note(note);
    sink.add_error(diagnostic.clone());
    RefactorOutcome::Rejected(diagnostic)
}
