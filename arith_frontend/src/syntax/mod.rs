//! Syntax analysis module: TokenStream to AST
//!
//! [`ExprParser`] implements the grammar; [`parse_tokens`] wraps it with
//! the depth limit from the runtime preferences and success logging.

mod error;
mod parser;

pub use error::{describe_expected, SyntaxError, SyntaxResult};
pub use parser::ExprParser;

use crate::config::runtime::SyntaxPreferences;
use crate::grammar::ast::Expr;
use crate::logging::codes;
use crate::tokens::TokenStream;
use crate::{log_debug, log_success};

/// Parser using the compile-time depth limit
pub fn create_parser(tokens: TokenStream) -> ExprParser {
    ExprParser::new(tokens)
}

/// Parse a complete expression from `tokens`.
///
/// Failures are logged where they are raised, so only success is logged here.
pub fn parse_tokens(tokens: TokenStream, preferences: &SyntaxPreferences) -> SyntaxResult<Expr> {
    log_debug!("Starting syntax analysis", "tokens" => tokens.len());

    let mut parser = ExprParser::with_max_depth(tokens, preferences.effective_max_depth());
    let expr = parser.parse()?;

    log_success!(codes::success::AST_CONSTRUCTION_COMPLETE,
        "Syntax analysis completed successfully",
        "nodes" => expr.node_count(),
        "depth" => expr.depth(),
        "max_nesting" => parser.deepest()
    );
    if preferences.log_ast {
        log_debug!("Parsed expression", "ast" => expr);
    }

    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{TokenKind, TokenStreamBuilder};

    fn preferences(max_parse_depth: usize) -> SyntaxPreferences {
        SyntaxPreferences {
            max_parse_depth,
            log_ast: true,
        }
    }

    #[test]
    fn test_parse_tokens() {
        let tokens = TokenStreamBuilder::new()
            .push_all(&[
                (TokenKind::Num, "1.0"),
                (TokenKind::Plus, "+"),
                (TokenKind::Num, "2.0"),
            ])
            .build();
        let expr = parse_tokens(tokens, &preferences(64)).unwrap();
        assert_eq!(expr.evaluate(), 3.0);
    }

    #[test]
    fn test_parse_tokens_honours_lowered_depth() {
        let tokens = TokenStreamBuilder::new()
            .push_all(&[
                (TokenKind::LParen, "("),
                (TokenKind::LParen, "("),
                (TokenKind::Num, "1.0"),
                (TokenKind::RParen, ")"),
                (TokenKind::RParen, ")"),
            ])
            .build();
        let error = parse_tokens(tokens, &preferences(1)).unwrap_err();
        assert_eq!(error.error_code(), codes::syntax::NESTING_TOO_DEEP);
    }

    #[test]
    fn test_create_parser_uses_compile_time_limit() {
        let parser = create_parser(TokenStreamBuilder::new().build());
        assert_eq!(
            parser.max_depth(),
            crate::config::compile_time::syntax::MAX_PARSE_DEPTH
        );
    }
}
