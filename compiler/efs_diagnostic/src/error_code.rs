use std::fmt;

/// Error codes for all model diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Binding errors
/// - E3xxx: Refactoring errors
/// - E4xxx: Range checks
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Invalid character in expression text
    E0001,
    /// Unterminated string literal
    E0002,
    /// Integer literal out of the 64-bit range
    E0003,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,

    // Binding Errors (E2xxx)
    /// Unknown identifier
    E2001,
    /// Unknown member of a namespace, structure or enum
    E2002,
    /// Unknown parameter in a named call argument
    E2003,

    // Refactoring Errors (E3xxx)
    /// Rewritten expression failed validation
    E3001,
    /// Rewritten expression could not be patched
    E3002,

    // Range Errors (E4xxx)
    /// Range bound is not a number
    E4001,
    /// Integer range bound has a decimal part
    E4002,
    /// Double range bound has no decimal part
    E4003,
    /// Range minimum exceeds maximum
    E4004,
    /// Range default lies outside its bounds
    E4005,
}

impl ErrorCode {
    /// Check if this error was produced by a refactoring.
    pub fn is_refactor_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            // Binding
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            // Refactoring
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            // Ranges
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
        assert_eq!(ErrorCode::E3001.as_str(), "E3001");
    }

    #[test]
    fn test_error_code_phases() {
        assert!(ErrorCode::E3002.is_refactor_error());
        assert!(!ErrorCode::E4001.is_refactor_error());
    }
}
