//! Diagnostic codes for categorizing lexical, syntax, and internal errors.
//!
//! This module provides the [`DiagnosticCode`] type for uniquely identifying
//! diagnostic messages, enabling users to look up documentation and suppress
//! specific warnings.
//!
//! # Examples
//!
//! ```
//! use prismc_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E_LEXER_INVALID_IDENTIFIER;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.as_str(), "E1001");
//! ```

/// A unique code identifying a diagnostic message
///
/// Diagnostic codes follow the format `{prefix}{number}` where:
/// - `prefix` is typically "E" for errors or "W" for warnings
/// - `number` is a 4-digit number (padded with zeros)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix (e.g., "E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // LEXICAL ERRORS (E1xxx)
    // =========================================================================

    /// E1001: Invalid identifier (bad continuation character in an IDENTIFIER run)
    pub const E_LEXER_INVALID_IDENTIFIER: Self = Self::new("E", 1001);
    /// E1002: Invalid integer literal (trailing letter/underscore after digits)
    pub const E_LEXER_INVALID_INTEGER: Self = Self::new("E", 1002);
    /// E1003: Invalid float literal
    pub const E_LEXER_INVALID_FLOAT: Self = Self::new("E", 1003);
    /// E1004: Invalid character literal (wrong length between quotes)
    pub const E_LEXER_INVALID_CHAR_LITERAL: Self = Self::new("E", 1004);
    /// E1005: Unterminated string literal (closing quote missing on the line)
    pub const E_LEXER_UNTERMINATED_STRING: Self = Self::new("E", 1005);
    /// E1006: Unterminated block comment (no closing `/~` before end of input)
    pub const E_LEXER_UNTERMINATED_BLOCK_COMMENT: Self = Self::new("E", 1006);
    /// E1007: Unknown operator/character (does not start any recognized token)
    pub const E_LEXER_UNKNOWN_OPERATOR: Self = Self::new("E", 1007);

    // =========================================================================
    // SYNTAX ERRORS (E2xxx)
    // =========================================================================

    /// E2001: Unexpected token (kind or value mismatch against grammar)
    pub const E_PARSER_UNEXPECTED_TOKEN: Self = Self::new("E", 2001);
    /// E2002: Expected token not found
    pub const E_PARSER_EXPECTED_TOKEN: Self = Self::new("E", 2002);
    /// E2003: Unexpected end of input
    pub const E_PARSER_UNEXPECTED_EOF: Self = Self::new("E", 2003);
    /// E2004: Missing statement terminator `;`
    pub const E_PARSER_MISSING_SEMICOLON: Self = Self::new("E", 2004);
    /// E2005: Mismatched brackets
    pub const E_PARSER_MISMATCHED_BRACKET: Self = Self::new("E", 2005);

    // =========================================================================
    // INTERNAL ERRORS (E9xxx) - terminate the run, exit code 2
    // =========================================================================

    /// E9001: Loop-safety counter tripped (no progress across N iterations)
    pub const E_INTERNAL_LOOP_SAFETY: Self = Self::new("E", 9001);
    /// E9002: Cursor failed to advance after a production reported success
    pub const E_INTERNAL_CURSOR_STALL: Self = Self::new("E", 9002);

    // =========================================================================
    // WARNINGS (W0xxx)
    // =========================================================================

    /// W0001: Noise word encountered (preserved in the stream, ignored by the parser)
    pub const W_NOISE_WORD: Self = Self::new("W", 1);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub const E_LEXER_INVALID_IDENTIFIER: DiagnosticCode = DiagnosticCode::E_LEXER_INVALID_IDENTIFIER;
pub const E_LEXER_INVALID_INTEGER: DiagnosticCode = DiagnosticCode::E_LEXER_INVALID_INTEGER;
pub const E_LEXER_INVALID_FLOAT: DiagnosticCode = DiagnosticCode::E_LEXER_INVALID_FLOAT;
pub const E_LEXER_INVALID_CHAR_LITERAL: DiagnosticCode = DiagnosticCode::E_LEXER_INVALID_CHAR_LITERAL;
pub const E_LEXER_UNTERMINATED_STRING: DiagnosticCode = DiagnosticCode::E_LEXER_UNTERMINATED_STRING;
pub const E_LEXER_UNTERMINATED_BLOCK_COMMENT: DiagnosticCode =
    DiagnosticCode::E_LEXER_UNTERMINATED_BLOCK_COMMENT;
pub const E_LEXER_UNKNOWN_OPERATOR: DiagnosticCode = DiagnosticCode::E_LEXER_UNKNOWN_OPERATOR;
pub const E_PARSER_UNEXPECTED_TOKEN: DiagnosticCode = DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN;
pub const E_PARSER_EXPECTED_TOKEN: DiagnosticCode = DiagnosticCode::E_PARSER_EXPECTED_TOKEN;
pub const E_PARSER_UNEXPECTED_EOF: DiagnosticCode = DiagnosticCode::E_PARSER_UNEXPECTED_EOF;
pub const E_PARSER_MISSING_SEMICOLON: DiagnosticCode = DiagnosticCode::E_PARSER_MISSING_SEMICOLON;
pub const E_PARSER_MISMATCHED_BRACKET: DiagnosticCode = DiagnosticCode::E_PARSER_MISMATCHED_BRACKET;
pub const E_INTERNAL_LOOP_SAFETY: DiagnosticCode = DiagnosticCode::E_INTERNAL_LOOP_SAFETY;
pub const E_INTERNAL_CURSOR_STALL: DiagnosticCode = DiagnosticCode::E_INTERNAL_CURSOR_STALL;
pub const W_NOISE_WORD: DiagnosticCode = DiagnosticCode::W_NOISE_WORD;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_prefix_plus_four_digits() {
        assert_eq!(DiagnosticCode::E_LEXER_INVALID_IDENTIFIER.as_str(), "E1001");
        assert_eq!(DiagnosticCode::W_NOISE_WORD.as_str(), "W0001");
    }

    #[test]
    fn display_matches_as_str() {
        let code = DiagnosticCode::E_PARSER_MISSING_SEMICOLON;
        assert_eq!(format!("{}", code), code.as_str());
    }

    #[test]
    fn codes_with_same_fields_are_equal() {
        assert_eq!(
            DiagnosticCode::new("E", 1001),
            DiagnosticCode::E_LEXER_INVALID_IDENTIFIER
        );
    }
}
