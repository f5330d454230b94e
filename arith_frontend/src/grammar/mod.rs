//! Grammar of the arithmetic expression language
//!
//! `lexicon` holds the token automata, `ast` the tree the parser builds.

pub mod ast;
pub mod lexicon;

pub use ast::{BinaryOp, Expr};
pub use lexicon::{create_lexer, standard_automata};
