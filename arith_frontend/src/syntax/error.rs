//! Syntax errors with error code mapping
//!
//! Every variant carries the byte offset it was detected at; the parser
//! stops at the first one.

use crate::logging::{codes, Code};
use crate::tokens::TokenKind;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error(
        "Unexpected token: expected {}, found {found} at offset {offset}",
        describe_expected(.expected)
    )]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: TokenKind,
        offset: usize,
    },

    #[error("Invalid numeric literal '{lexeme}' at offset {offset}")]
    InvalidLiteral { lexeme: String, offset: usize },

    #[error("Trailing input: unexpected {found} after complete expression at offset {offset}")]
    TrailingInput { found: TokenKind, offset: usize },

    #[error("Nesting too deep: depth {depth} exceeds limit {max_depth} at offset {offset}")]
    NestingTooDeep {
        depth: usize,
        max_depth: usize,
        offset: usize,
    },
}

/// "NUM", "NUM or LPAREN", "NUM, PLUS or LPAREN"
pub fn describe_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(|kind| kind.to_string()).collect();
            format!("{} or {}", init.join(", "), last)
        }
    }
}

impl SyntaxError {
    pub fn unexpected_token(expected: &[TokenKind], found: TokenKind, offset: usize) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_vec(),
            found,
            offset,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::InvalidLiteral { .. } => codes::syntax::INVALID_LITERAL,
            Self::TrailingInput { .. } => codes::syntax::TRAILING_INPUT,
            Self::NestingTooDeep { .. } => codes::syntax::NESTING_TOO_DEEP,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedToken { offset, .. }
            | Self::InvalidLiteral { offset, .. }
            | Self::TrailingInput { offset, .. }
            | Self::NestingTooDeep { offset, .. } => *offset,
        }
    }

    /// Kind of the offending token, when one is involved
    pub fn found(&self) -> Option<TokenKind> {
        match self {
            Self::UnexpectedToken { found, .. } | Self::TrailingInput { found, .. } => Some(*found),
            Self::InvalidLiteral { .. } => Some(TokenKind::Num),
            Self::NestingTooDeep { .. } => None,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }

    /// Error text followed by the recommended action
    pub fn enhanced_message(&self) -> String {
        match self {
            Self::UnexpectedToken {
                expected, found, ..
            } => format!(
                "Expected {} but found {}. {}",
                describe_expected(expected),
                found,
                self.recommended_action()
            ),
            _ => format!("{} ({})", self, self.recommended_action()),
        }
    }
}
