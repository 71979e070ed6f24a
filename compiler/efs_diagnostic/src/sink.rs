//! Destinations for diagnostics.

use crate::Diagnostic;

/// Something diagnostics can be attached to, usually a model element.
pub trait DiagnosticSink {
    fn add_error(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn add_error(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.add_error(Diagnostic::error(ErrorCode::E3001).with_message("boom"));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].message, "boom");
    }
}
