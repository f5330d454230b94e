//! Token stream consumed by the parser
//!
//! A stream always ends in exactly one EOF token, so lookahead never runs off
//! the end: peeking past the sentinel keeps returning it.

use crate::{
    tokens::token::{Token, TokenKind},
    utils::{Position, Span, Spanned},
};

/// A token with span information
pub type SpannedToken = Spanned<Token>;

#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    /// Significant tokens followed by the EOF sentinel
    tokens: Vec<SpannedToken>,
    /// Index of the current token; never past the sentinel
    position: usize,
}

impl TokenStream {
    /// Build a stream from lexer output. Trivia tokens are dropped, anything
    /// after the first EOF is ignored, and a sentinel is appended if missing.
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let mut significant: Vec<SpannedToken> = Vec::with_capacity(tokens.len() + 1);
        let mut end = Position::start();

        for token in tokens {
            end = token.span.end;
            if token.value.kind.is_trivia() {
                continue;
            }
            let is_eof = token.value.kind == TokenKind::Eof;
            significant.push(token);
            if is_eof {
                break;
            }
        }

        let has_eof = significant
            .last()
            .map(|t| t.value.kind == TokenKind::Eof)
            .unwrap_or(false);
        if !has_eof {
            significant.push(SpannedToken::new(Token::eof(), Span::empty_at(end)));
        }

        Self {
            tokens: significant,
            position: 0,
        }
    }

    fn eof_index(&self) -> usize {
        self.tokens.len() - 1
    }

    /// Token `offset` places ahead of the current one (clamped to EOF)
    pub fn peek_token(&self, offset: usize) -> &SpannedToken {
        let index = self.position.saturating_add(offset).min(self.eof_index());
        &self.tokens[index]
    }

    /// Whether the token `offset` places ahead has the given kind
    pub fn peek(&self, kind: TokenKind, offset: usize) -> bool {
        self.peek_token(offset).value.kind == kind
    }

    pub fn current(&self) -> &SpannedToken {
        self.peek_token(0)
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current().value.kind
    }

    /// Byte offset where the current token starts
    pub fn current_offset(&self) -> usize {
        self.current().span.start.offset
    }

    /// Return the current token and move past it. The EOF sentinel is never
    /// moved past.
    pub fn advance(&mut self) -> SpannedToken {
        let token = self.current().clone();
        if self.position < self.eof_index() {
            self.position += 1;
        }
        token
    }

    /// Return the current token and advance if it has the expected kind
    pub fn consume(&mut self, expected: TokenKind) -> Result<SpannedToken, TokenStreamError> {
        let current = self.current();
        if current.value.kind == expected {
            Ok(self.advance())
        } else {
            Err(TokenStreamError::UnexpectedToken {
                expected,
                found: current.value.kind,
                span: current.span,
            })
        }
    }

    /// True when only the EOF sentinel remains
    pub fn is_at_end(&self) -> bool {
        self.position == self.eof_index()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Token count including the EOF sentinel
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A stream is empty when it holds nothing but the sentinel
    pub fn is_empty(&self) -> bool {
        self.tokens.len() == 1
    }

    /// Unconsumed tokens, not counting the sentinel
    pub fn remaining_count(&self) -> usize {
        self.eof_index() - self.position
    }

    pub fn tokens(&self) -> &[SpannedToken] {
        &self.tokens
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.value.kind).collect()
    }

    /// Human readable dump, one token per line
    pub fn diagnostic(&self) -> String {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let marker = if i == self.position { ">" } else { " " };
                format!(
                    "{} {:>4} {:<8} {}",
                    marker, t.span.start.offset, t.value.kind, t.value.lexeme
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenStreamError {
    #[error("Expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },
}

/// Builds token streams by hand, computing spans from the token text
#[derive(Debug)]
pub struct TokenStreamBuilder {
    tokens: Vec<SpannedToken>,
    current_position: Position,
}

impl TokenStreamBuilder {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            current_position: Position::start(),
        }
    }

    pub fn push(mut self, kind: TokenKind, text: &str) -> Self {
        let start = self.current_position;
        let end = start.advance_str(text);
        self.tokens
            .push(SpannedToken::new(Token::new(kind, text), Span::new(start, end)));
        self.current_position = end;
        self
    }

    pub fn push_all(mut self, tokens: &[(TokenKind, &str)]) -> Self {
        for (kind, text) in tokens {
            self = self.push(*kind, text);
        }
        self
    }

    pub fn build(self) -> TokenStream {
        TokenStream::new(self.tokens)
    }
}

impl Default for TokenStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn sample() -> TokenStream {
        TokenStreamBuilder::new()
            .push_all(&[(Num, "1.0"), (WhiteSpace, " "), (Plus, "+"), (Num, "2.0")])
            .build()
    }

    #[test]
    fn test_sentinel_appended_and_trivia_dropped() {
        let stream = sample();
        assert_eq!(stream.kinds(), vec![Num, Plus, Num, Eof]);
        assert_eq!(stream.len(), 4);
        assert_eq!(stream.remaining_count(), 3);

        let eof = stream.peek_token(3);
        assert!(eof.span.is_empty());
        assert_eq!(eof.span.start.offset, 8);
    }

    #[test]
    fn test_empty_stream() {
        let stream = TokenStreamBuilder::new().build();
        assert!(stream.is_empty());
        assert!(stream.is_at_end());
        assert_eq!(stream.kinds(), vec![Eof]);
    }

    #[test]
    fn test_peek_is_clamped_to_eof() {
        let stream = sample();
        assert!(stream.peek(Num, 0));
        assert!(stream.peek(Plus, 1));
        assert!(stream.peek(Eof, 3));
        assert!(stream.peek(Eof, 100));
    }

    #[test]
    fn test_consume() {
        let mut stream = sample();

        let first = stream.consume(Num).unwrap();
        assert_eq!(first.value.lexeme, "1.0");
        assert_eq!(stream.current_offset(), 4);

        let err = stream.consume(Num).unwrap_err();
        assert_eq!(
            err,
            TokenStreamError::UnexpectedToken {
                expected: Num,
                found: Plus,
                span: stream.current().span,
            }
        );
        // Failed consume does not move
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let mut stream = sample();
        for _ in 0..10 {
            stream.advance();
        }
        assert!(stream.is_at_end());
        assert_eq!(stream.current_kind(), Eof);
        assert_eq!(stream.remaining_count(), 0);
    }

    #[test]
    fn test_tokens_after_eof_are_ignored() {
        let stream = TokenStreamBuilder::new()
            .push_all(&[(Num, "1.0"), (Eof, ""), (Num, "2.0")])
            .build();
        assert_eq!(stream.kinds(), vec![Num, Eof]);
    }

    #[test]
    fn test_diagnostic_marks_position() {
        let mut stream = sample();
        stream.advance();
        let dump = stream.diagnostic();
        assert!(dump.lines().nth(1).unwrap().starts_with('>'));
    }
}
