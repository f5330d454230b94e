//! Token vocabulary shared by the lexer and the parser
//!
//! - [`TokenKind`]: the closed, ordered set of lexical categories
//! - [`Token`]: a kind plus the lexeme it matched
//! - [`TokenStream`]: whitespace-free token sequence ending in an EOF sentinel

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenKind};
pub use token_stream::{SpannedToken, TokenStream, TokenStreamBuilder, TokenStreamError};
