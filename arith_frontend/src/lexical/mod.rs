//! Lexical analysis module
//!
//! Turns source text into a [`TokenStream`] by running one automaton per
//! token kind over the input (see [`LexicalAnalyzer`]). The concrete
//! automata for the expression language live in `grammar::lexicon`.

mod analyzer;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};

use crate::config::runtime::LexicalPreferences;
use crate::tokens::TokenStream;

/// Analyzer with no automata registered
pub fn create_analyzer() -> LexicalAnalyzer {
    LexicalAnalyzer::new()
}

pub fn create_analyzer_with_preferences(preferences: LexicalPreferences) -> LexicalAnalyzer {
    LexicalAnalyzer::with_preferences(preferences)
}

/// Tokenize with the standard expression-language automata
pub fn tokenize(source: &str) -> Result<TokenStream, LexerError> {
    crate::grammar::lexicon::create_lexer(LexicalPreferences::default())?.tokenize(source)
}
