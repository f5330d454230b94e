//! Union of lexical and syntax failures

use crate::lexical::LexerError;
use crate::logging::Code;
use crate::syntax::SyntaxError;
use crate::utils::SourceMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrontendError {
    #[error("Lexical error: {0}")]
    Lexical(#[from] LexerError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

impl FrontendError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Lexical(error) => error.error_code(),
            Self::Syntax(error) => error.error_code(),
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Lexical(error) => error.offset(),
            Self::Syntax(error) => Some(error.offset()),
        }
    }

    /// Diagnostic with the offending line and a caret under the offset.
    ///
    /// Errors without a location render as a single `error:` line.
    pub fn render(&self, source: &str) -> String {
        let message = format!("[{}] {}", self.error_code(), self);
        let map = SourceMap::new(source);

        match self.offset() {
            Some(offset) => {
                let span = map.span_at(offset, 1);
                map.format_error(&span, &message)
            }
            None => format!("error: {}\n", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;

    #[test]
    fn test_conversions_and_codes() {
        let lexical: FrontendError = LexerError::NoViableToken {
            offset: 1,
            scan_start: 0,
        }
        .into();
        assert_eq!(lexical.error_code().as_str(), "E020");
        assert_eq!(lexical.offset(), Some(1));

        let syntax: FrontendError = SyntaxError::TrailingInput {
            found: TokenKind::Num,
            offset: 4,
        }
        .into();
        assert_eq!(syntax.error_code().as_str(), "E052");
        assert_eq!(syntax.offset(), Some(4));
    }

    #[test]
    fn test_render_points_at_offset() {
        let error: FrontendError = LexerError::NoViableToken {
            offset: 1,
            scan_start: 0,
        }
        .into();
        let rendered = error.render("5.");

        assert!(rendered.starts_with("error: [E020] Lexical error: No viable token at offset 1\n"));
        assert!(rendered.contains("  --> 1:2\n"));
        assert!(rendered.contains("1 | 5.\n"));
        assert!(rendered.ends_with("  |  ^\n"));
    }

    #[test]
    fn test_render_at_end_of_input() {
        let error: FrontendError =
            SyntaxError::unexpected_token(&[TokenKind::RParen], TokenKind::Eof, 8).into();
        let rendered = error.render("(1.0+2.0");
        assert!(rendered.contains("  --> 1:9\n"));
        assert!(rendered.ends_with("|         ^\n"));
    }

    #[test]
    fn test_render_without_location() {
        let error: FrontendError = LexerError::SourceTooLarge { size: 10 }.into();
        let rendered = error.render("");
        assert!(rendered.starts_with("error: [E022] Lexical error: Source too large"));
        assert!(!rendered.contains("-->"));
        assert_eq!(rendered.lines().count(), 1);
    }
}
