//! Token kinds and tokens

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical categories of the expression language.
///
/// Declaration order is significant: when two kinds match the same longest
/// lexeme the lexer picks the one declared first, which is also the smaller
/// value under the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Num,
    Plus,
    Minus,
    Times,
    Div,
    #[serde(rename = "LPAREN")]
    LParen,
    #[serde(rename = "RPAREN")]
    RParen,
    WhiteSpace,
    Eof,
}

impl TokenKind {
    /// Every kind, in declaration order
    pub const ALL: [TokenKind; 9] = [
        TokenKind::Num,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Times,
        TokenKind::Div,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::WhiteSpace,
        TokenKind::Eof,
    ];

    /// Vocabulary name, as used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Num => "NUM",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Div => "DIV",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::WhiteSpace => "WHITE_SPACE",
            TokenKind::Eof => "EOF",
        }
    }

    /// Position in the declaration order
    pub fn declaration_index(&self) -> usize {
        *self as usize
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Times | TokenKind::Div
        )
    }

    /// Kinds the lexer recognises but never hands to the parser
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::WhiteSpace)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexeme tagged with its kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "")
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("EOF"),
            _ => write!(f, "{}({:?})", self.kind, self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order() {
        for pair in TokenKind::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].declaration_index() + 1, pair[1].declaration_index());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::WhiteSpace.to_string(), "WHITE_SPACE");
        assert_eq!(Token::new(TokenKind::Num, "1.5").to_string(), "NUM(\"1.5\")");
        assert_eq!(Token::eof().to_string(), "EOF");
    }

    #[test]
    fn test_serde_names_match_vocabulary() {
        for kind in TokenKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_classification() {
        assert!(TokenKind::Div.is_operator());
        assert!(!TokenKind::LParen.is_operator());
        assert!(TokenKind::WhiteSpace.is_trivia());
        assert!(!TokenKind::Eof.is_trivia());
    }
}
