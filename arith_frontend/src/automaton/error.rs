use super::dfa::StateId;
use crate::logging::{codes, Code};

pub type AutomatonResult<T> = Result<T, AutomatonError>;

/// Automaton construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("State {id} is already registered")]
    DuplicateState { id: StateId },

    #[error("State {attempted} cannot be a start state: state {existing} already is")]
    MultipleStartStates {
        existing: StateId,
        attempted: StateId,
    },

    #[error("State {id} is not registered")]
    UnknownState { id: StateId },

    #[error(
        "Transition {from} --{symbol:?}--> {attempted} conflicts with existing target {existing}"
    )]
    NonDeterministicTransition {
        from: StateId,
        symbol: char,
        existing: StateId,
        attempted: StateId,
    },

    #[error("Automaton has no start state")]
    MissingStartState,
}

impl AutomatonError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::DuplicateState { .. } => codes::automaton::DUPLICATE_STATE,
            Self::MultipleStartStates { .. } => codes::automaton::MULTIPLE_START_STATES,
            Self::UnknownState { .. } => codes::automaton::UNKNOWN_STATE,
            Self::NonDeterministicTransition { .. } => {
                codes::automaton::NON_DETERMINISTIC_TRANSITION
            }
            Self::MissingStartState => codes::automaton::MISSING_START_STATE,
        }
    }
}
