//! Maximal-munch lexical analyzer driven by per-kind automata
//!
//! Every registered automaton is advanced in lockstep from the current
//! offset. The longest accepted prefix wins; equal lengths go to the kind
//! declared first in [`TokenKind`]. A scan step that accepts nothing of
//! nonzero length is a hard error, so every emitted token consumes input.

use crate::automaton::{Automaton, AutomatonError, StateId};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{SpannedToken, Token, TokenKind, TokenStream};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success};
use std::collections::BTreeMap;

/// Lexical analysis errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("No viable token at offset {offset}")]
    NoViableToken {
        /// Last character any automaton consumed before the scan failed
        offset: usize,
        /// Where the failed scan step began
        scan_start: usize,
    },

    #[error("Source too large: {size} bytes (max {})", MAX_SOURCE_SIZE)]
    SourceTooLarge { size: usize },

    #[error("Too many tokens: {count} (max {}) at offset {offset}", MAX_TOKEN_COUNT)]
    TooManyTokens { count: usize, offset: usize },

    #[error("Token kind {kind} already has an automaton")]
    DuplicateTokenKind { kind: TokenKind },

    #[error("Token kind {kind} is reserved for the end-of-input sentinel")]
    ReservedTokenKind { kind: TokenKind },

    #[error("Invalid automaton for {kind}: {source}")]
    InvalidAutomaton {
        kind: TokenKind,
        source: AutomatonError,
    },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::NoViableToken { .. } => codes::lexical::NO_VIABLE_TOKEN,
            LexerError::SourceTooLarge { .. } => codes::lexical::SOURCE_TOO_LARGE,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::DuplicateTokenKind { .. } => codes::automaton::DUPLICATE_TOKEN_KIND,
            LexerError::ReservedTokenKind { .. } => codes::automaton::RESERVED_TOKEN_KIND,
            LexerError::InvalidAutomaton { source, .. } => source.error_code(),
        }
    }

    /// Source offset the error points at, when it concerns a location
    pub fn offset(&self) -> Option<usize> {
        match self {
            LexerError::NoViableToken { offset, .. } | LexerError::TooManyTokens { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }
}

/// Per-call lexical metrics
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LexicalMetrics {
    pub source_bytes: usize,
    /// Every token matched, whitespace included
    pub total_tokens: usize,
    /// Tokens handed to the parser, EOF excluded
    pub significant_tokens: usize,
    pub whitespace_tokens: usize,
    pub longest_lexeme: usize,
    /// Only filled when detailed metrics are enabled
    pub tokens_by_kind: BTreeMap<TokenKind, usize>,
}

impl LexicalMetrics {
    fn new(source_bytes: usize) -> Self {
        Self {
            source_bytes,
            ..Self::default()
        }
    }

    fn record_token(&mut self, kind: TokenKind, length: usize, preferences: &LexicalPreferences) {
        self.total_tokens += 1;
        self.longest_lexeme = self.longest_lexeme.max(length);

        if kind.is_trivia() {
            self.whitespace_tokens += 1;
        } else {
            self.significant_tokens += 1;
        }

        if preferences.collect_detailed_metrics {
            *self.tokens_by_kind.entry(kind).or_insert(0) += 1;
        }
    }
}

/// Lexer built from (kind, automaton) pairs.
///
/// Tokenizing borrows the analyzer immutably; one instance can serve many
/// threads at once.
#[derive(Debug, Clone)]
pub struct LexicalAnalyzer {
    automata: Vec<(TokenKind, Automaton)>,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            automata: Vec::new(),
            preferences,
        }
    }

    /// Register the recogniser for one token kind
    pub fn add_automaton(
        &mut self,
        kind: TokenKind,
        automaton: Automaton,
    ) -> Result<(), LexerError> {
        let result = if kind == TokenKind::Eof {
            Err(LexerError::ReservedTokenKind { kind })
        } else if self.automata.iter().any(|(existing, _)| *existing == kind) {
            Err(LexerError::DuplicateTokenKind { kind })
        } else {
            automaton
                .validate()
                .map(|_| ())
                .map_err(|source| LexerError::InvalidAutomaton { kind, source })
        };

        if let Err(error) = &result {
            log_error!(error.error_code(), "Automaton registration rejected",
                "kind" => kind,
                "error" => error
            );
            return result;
        }

        self.automata.push((kind, automaton));
        Ok(())
    }

    pub fn automaton_count(&self) -> usize {
        self.automata.len()
    }

    pub fn registered_kinds(&self) -> Vec<TokenKind> {
        self.automata.iter().map(|(kind, _)| *kind).collect()
    }

    pub fn automaton(&self, kind: TokenKind) -> Option<&Automaton> {
        self.automata
            .iter()
            .find(|(existing, _)| *existing == kind)
            .map(|(_, automaton)| automaton)
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }

    /// Tokenize `source` into a whitespace-free stream ending in EOF
    pub fn tokenize(&self, source: &str) -> Result<TokenStream, LexerError> {
        self.tokenize_with_metrics(source).map(|(stream, _)| stream)
    }

    pub fn tokenize_with_metrics(
        &self,
        source: &str,
    ) -> Result<(TokenStream, LexicalMetrics), LexerError> {
        if source.len() > MAX_SOURCE_SIZE {
            let error = LexerError::SourceTooLarge { size: source.len() };
            log_error!(error.error_code(), "Source exceeds maximum size",
                "size" => source.len(),
                "max_size" => MAX_SOURCE_SIZE
            );
            return Err(error);
        }

        let mut metrics = LexicalMetrics::new(source.len());
        let mut tokens: Vec<SpannedToken> = Vec::new();
        let mut position = Position::start();

        while position.offset < source.len() {
            let start = position.offset;
            let (kind, end) = self.scan_token(source, start).map_err(|error| {
                log_error!(error.error_code(), "No token matches input",
                    span = Span::empty_at(position),
                    "offset" => error.offset().unwrap_or(start),
                    "scan_start" => start
                );
                error
            })?;

            let lexeme = &source[start..end];
            let end_position = position.advance_str(lexeme);
            metrics.record_token(kind, lexeme.len(), &self.preferences);

            if metrics.total_tokens > MAX_TOKEN_COUNT {
                let error = LexerError::TooManyTokens {
                    count: metrics.total_tokens,
                    offset: start,
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    "count" => metrics.total_tokens,
                    "max_tokens" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }

            if !kind.is_trivia() {
                if self.preferences.log_tokens {
                    log_debug!("Token matched",
                        "kind" => kind,
                        "lexeme" => lexeme,
                        "offset" => start
                    );
                }
                tokens.push(SpannedToken::new(
                    Token::new(kind, lexeme),
                    Span::new(position, end_position),
                ));
            }

            position = end_position;
        }

        tokens.push(SpannedToken::new(Token::eof(), Span::empty_at(position)));
        let stream = TokenStream::new(tokens);

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed successfully",
            "tokens" => metrics.significant_tokens,
            "whitespace_tokens" => metrics.whitespace_tokens,
            "bytes" => metrics.source_bytes
        );

        Ok((stream, metrics))
    }

    /// One maximal-munch scan step starting at byte offset `start`.
    /// Returns the winning kind and the end offset of its lexeme.
    fn scan_token(&self, source: &str, start: usize) -> Result<(TokenKind, usize), LexerError> {
        let mut live: Vec<(TokenKind, &Automaton, StateId)> = self
            .automata
            .iter()
            .filter_map(|(kind, automaton)| {
                automaton
                    .start_state()
                    .map(|state| (*kind, automaton, state))
            })
            .collect();

        let mut best: Option<(TokenKind, usize)> = None;
        let mut last_consumed: Option<usize> = None;

        for (relative, ch) in source[start..].char_indices() {
            let offset = start + relative;
            let end = offset + ch.len_utf8();

            live.retain_mut(|(_, automaton, state)| match automaton.step(*state, ch) {
                Some(next) => {
                    *state = next;
                    true
                }
                None => false,
            });

            if live.is_empty() {
                break;
            }
            last_consumed = Some(offset);

            // Candidates at this length are all longer than any earlier one
            for (kind, automaton, state) in &live {
                if !automaton.is_accepting(*state) {
                    continue;
                }
                best = match best {
                    Some((best_kind, best_end)) if best_end == end && best_kind <= *kind => {
                        Some((best_kind, best_end))
                    }
                    _ => Some((*kind, end)),
                };
            }
        }

        best.ok_or(LexerError::NoViableToken {
            offset: last_consumed.unwrap_or(start),
            scan_start: start,
        })
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
