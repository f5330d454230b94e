//! Composition root: source text in, AST out
//!
//! [`Frontend`] binds the standard lexicon to the expression parser. It
//! holds no per-call state, so one instance can be shared across threads.

mod error;

pub use error::FrontendError;

use crate::config::runtime::{LexicalPreferences, RuntimeConfig, SyntaxPreferences};
use crate::grammar::ast::Expr;
use crate::grammar::lexicon;
use crate::lexical::{LexicalAnalyzer, LexicalMetrics};
use crate::logging::codes;
use crate::syntax;
use crate::tokens::TokenStream;
use crate::{log_debug, log_success};
use std::sync::OnceLock;

/// Result of a successful parse with its lexical statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    pub expr: Expr,
    pub metrics: LexicalMetrics,
    /// Significant tokens, EOF excluded
    pub token_count: usize,
}

#[derive(Debug, Clone)]
pub struct Frontend {
    lexer: LexicalAnalyzer,
    syntax: SyntaxPreferences,
    debug: bool,
}

impl Frontend {
    pub fn new() -> Result<Self, FrontendError> {
        Self::with_config(&RuntimeConfig::default())
    }

    pub fn with_config(config: &RuntimeConfig) -> Result<Self, FrontendError> {
        let lexer = lexicon::create_lexer(config.lexical.clone())?;
        Ok(Self {
            lexer,
            syntax: config.syntax.clone(),
            debug: false,
        })
    }

    /// Debug mode logs every token and the finished AST at debug level
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        if debug {
            self.lexer.set_preferences(LexicalPreferences {
                log_tokens: true,
                ..self.lexer.preferences().clone()
            });
            self.syntax.log_ast = true;
        }
        self
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn max_parse_depth(&self) -> usize {
        self.syntax.effective_max_depth()
    }

    pub fn lexer(&self) -> &LexicalAnalyzer {
        &self.lexer
    }

    pub fn tokenize(&self, source: &str) -> Result<TokenStream, FrontendError> {
        Ok(self.lexer.tokenize(source)?)
    }

    pub fn parse(&self, source: &str) -> Result<Expr, FrontendError> {
        self.parse_with_report(source).map(|report| report.expr)
    }

    pub fn parse_with_report(&self, source: &str) -> Result<ParseReport, FrontendError> {
        log_debug!("Parsing source", "bytes" => source.len());

        let (tokens, metrics) = self.lexer.tokenize_with_metrics(source)?;
        let token_count = tokens.len() - 1;
        if self.debug {
            log_debug!("Token stream", "tokens" => tokens.diagnostic());
        }

        let expr = syntax::parse_tokens(tokens, &self.syntax)?;

        log_success!(codes::success::FRONTEND_PARSE_COMPLETE, "Parse completed",
            "tokens" => token_count,
            "nodes" => expr.node_count()
        );

        Ok(ParseReport {
            expr,
            metrics,
            token_count,
        })
    }
}

static SHARED_FRONTEND: OnceLock<Result<Frontend, FrontendError>> = OnceLock::new();

/// Process-wide frontend built from default configuration on first use
pub fn shared() -> Result<&'static Frontend, FrontendError> {
    SHARED_FRONTEND
        .get_or_init(Frontend::new)
        .as_ref()
        .map_err(Clone::clone)
}

/// Parse `source` with the shared frontend
pub fn parse(source: &str) -> Result<Expr, FrontendError> {
    shared()?.parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::LexerError;
    use crate::syntax::SyntaxError;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    fn frontend() -> Frontend {
        Frontend::new().unwrap()
    }

    #[test]
    fn test_parse_and_evaluate() {
        let frontend = frontend();
        assert_eq!(frontend.parse("8.0-3.0-1.0").unwrap().evaluate(), 6.0);
        assert_eq!(frontend.parse("2.0+3.0*4.0").unwrap().evaluate(), 14.0);
        assert_eq!(frontend.parse("(2.0+3.0)*4.0").unwrap().evaluate(), 20.0);
    }

    #[test]
    fn test_errors_propagate_with_kind() {
        let frontend = frontend();
        assert_matches!(
            frontend.parse("5."),
            Err(FrontendError::Lexical(LexerError::NoViableToken { offset: 1, .. }))
        );
        assert_matches!(
            frontend.parse("1.0 2.0"),
            Err(FrontendError::Syntax(SyntaxError::TrailingInput {
                found: TokenKind::Num,
                offset: 4
            }))
        );
    }

    #[test]
    fn test_parse_with_report() {
        let report = frontend().parse_with_report(" 1.5 * (2.0) ").unwrap();
        assert_eq!(report.token_count, 5);
        assert_eq!(report.metrics.significant_tokens, 5);
        assert_eq!(report.metrics.whitespace_tokens, 4);
        assert_eq!(report.expr.evaluate(), 3.0);
    }

    #[test]
    fn test_with_config_lowers_depth() {
        let mut config = RuntimeConfig::default();
        config.syntax.max_parse_depth = 4;
        let frontend = Frontend::with_config(&config).unwrap();

        assert_eq!(frontend.max_parse_depth(), 4);
        assert!(frontend.parse("1.0+2.0*3.0-4.0").is_ok());
        assert!(frontend.parse("((((1.0))))").is_ok());
        assert_matches!(
            frontend.parse("(((((1.0)))))"),
            Err(FrontendError::Syntax(SyntaxError::NestingTooDeep { max_depth: 4, .. }))
        );
    }

    #[test]
    fn test_with_debug() {
        let frontend = frontend().with_debug(true);
        assert!(frontend.is_debug());
        assert!(frontend.lexer().preferences().log_tokens);
        assert_eq!(frontend.parse("1.0").unwrap(), Expr::literal(1.0));
    }

    #[test]
    fn test_tokenize() {
        let tokens = frontend().tokenize("12.5").unwrap();
        assert_eq!(tokens.kinds(), vec![TokenKind::Num, TokenKind::Eof]);
    }

    #[test]
    fn test_shared_parse() {
        assert_eq!(parse("1.0/4.0").unwrap().evaluate(), 0.25);
        assert!(std::ptr::eq(shared().unwrap(), shared().unwrap()));
    }
}
