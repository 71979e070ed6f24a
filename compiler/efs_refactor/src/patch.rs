//! Offset-tracked text patching.
//!
//! A [`TextPatcher`] owns a working copy of an expression text and maps
//! spans of the *original* text onto it with a single running delta. This
//! only works when patches arrive in document order without overlapping,
//! so the patcher checks that and refuses anything else.

use std::fmt;

use efs_ir::Span;
use tracing::trace;

/// A patch the running delta cannot place.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PatchError {
    /// The span starts before the end of the previously patched span.
    OutOfOrder { span: Span, previous_end: u32 },
    /// The span does not map onto the working text, or splits a character.
    OutOfBounds { span: Span, len: usize },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::OutOfOrder { span, previous_end } => write!(
                f,
                "patch at {span} starts before the previous patch end {previous_end}"
            ),
            PatchError::OutOfBounds { span, len } => {
                write!(f, "patch at {span} is outside the text ({len} bytes)")
            }
        }
    }
}

impl std::error::Error for PatchError {}

/// Working text plus the net length change of the patches applied so far.
#[derive(Clone, Debug, Default)]
pub struct TextPatcher {
    text: String,
    delta: i64,
    /// End of the last patched span, in original coordinates.
    last_end: u32,
}

impl TextPatcher {
    pub fn new(text: impl Into<String>) -> Self {
        TextPatcher {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn delta(&self) -> i64 {
        self.delta
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Replace the original-text region `span` with `new_text`.
    ///
    /// Returns `Ok(false)` when the region already reads `new_text`; text
    /// and delta are then left alone.
    pub fn replace(&mut self, new_text: &str, span: Span) -> Result<bool, PatchError> {
        if span.start < self.last_end {
            return Err(PatchError::OutOfOrder {
                span,
                previous_end: self.last_end,
            });
        }

        let range = self.working_range(span)?;
        self.last_end = span.end;
        if self.text[range.clone()] == *new_text {
            return Ok(false);
        }

        let old_len = range.len();
        self.text.replace_range(range, new_text);
        self.delta += len_i64(new_text.len()) - len_i64(old_len);
        trace!(%span, new_text, delta = self.delta, "patched");
        Ok(true)
    }

    fn working_range(&self, span: Span) -> Result<std::ops::Range<usize>, PatchError> {
        let out_of_bounds = PatchError::OutOfBounds {
            span,
            len: self.text.len(),
        };
        let shift = |offset: u32| usize::try_from(i64::from(offset) + self.delta).ok();
        let (Some(start), Some(end)) = (shift(span.start), shift(span.end)) else {
            return Err(out_of_bounds);
        };
        if start > end || self.text.get(start..end).is_none() {
            return Err(out_of_bounds);
        }
        Ok(start..end)
    }
}

fn len_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests;
