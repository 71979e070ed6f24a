//! Parse error types.

use std::fmt;

use efs_diagnostic::{Diagnostic, ErrorCode};
use efs_ir::Span;
use efs_lexer::Token;

/// A syntax error in an expression text.
///
/// Parsing stops at the first error: expressions are short and the only
/// consumers are "is this text valid" checks and error reporting on a
/// model element.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// Related location, e.g. the opening delimiter of an unclosed one.
    pub related: Option<(Span, String)>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            related: None,
        }
    }

    #[must_use]
    pub fn with_related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related = Some((span, message.into()));
        self
    }

    /// Error for a token the grammar cannot accept here.
    ///
    /// Lexer error tokens are reported with their own codes.
    #[cold]
    pub fn unexpected(token: &Token, expected: &str) -> Self {
        match token.kind {
            efs_lexer::TokenKind::Error => {
                ParseError::new(ErrorCode::E0001, "invalid character", token.span)
            }
            efs_lexer::TokenKind::UnterminatedString => ParseError::new(
                ErrorCode::E0002,
                "unterminated string literal",
                token.span,
            ),
            efs_lexer::TokenKind::LargeInt(_) => ParseError::new(
                ErrorCode::E0003,
                format!("integer literal `{token}` is too large"),
                token.span,
            ),
            _ => ParseError::new(
                ErrorCode::E1001,
                format!("unexpected token: expected {expected}, found `{token}`"),
                token.span,
            ),
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code)
            .with_message(self.message)
            .with_label(self.span, "here");
        match self.related {
            Some((span, message)) => diagnostic.with_secondary_label(span, message),
            None => diagnostic,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} at {}", self.code, self.message, self.span)
    }
}

impl std::error::Error for ParseError {}
