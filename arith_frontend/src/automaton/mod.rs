//! Deterministic finite automata over character input
//!
//! Each lexical category of the language is recognised by its own small
//! [`Automaton`]. Automata are assembled state by state, validated as they
//! are built, and are immutable once handed to the lexer.

mod dfa;
mod error;

pub use dfa::{Automaton, State, StateId, Transition};
pub use error::{AutomatonError, AutomatonResult};
