//! Front end for a small floating-point arithmetic language.
//!
//! Source text is tokenized by a set of per-kind automata run in lockstep
//! (maximal munch), then parsed by a recursive-descent parser into an
//! [`Expr`] tree.
//!
//! ```no_run
//! let expr = arith_frontend::parse("(2.0+3.0)*4.0").unwrap();
//! assert_eq!(expr.evaluate(), 20.0);
//! ```

// Internal modules
pub mod automaton;
pub mod config;
pub mod frontend;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use config::{ConfigError, RuntimeConfig};
pub use frontend::{parse, Frontend, FrontendError, ParseReport};
pub use grammar::{BinaryOp, Expr};
pub use lexical::{LexerError, LexicalAnalyzer, LexicalMetrics};
pub use syntax::{ExprParser, SyntaxError};
pub use tokens::{Token, TokenKind, TokenStream};
