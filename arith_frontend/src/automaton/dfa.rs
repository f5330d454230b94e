use super::error::{AutomatonError, AutomatonResult};
use std::collections::{BTreeMap, HashMap};

/// State identifier, unique within one automaton
pub type StateId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub id: StateId,
    pub is_start: bool,
    pub is_accepting: bool,
}

/// A single deterministic edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub symbol: char,
    pub to: StateId,
}

/// A deterministic finite automaton with one start state.
///
/// Construction is incremental: every [`add_state`](Self::add_state) and
/// [`add_transition`](Self::add_transition) call checks the determinism and
/// single-start invariants, so a fully built automaton is always valid except
/// for possibly lacking a start state (see [`validate`](Self::validate)).
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    states: BTreeMap<StateId, State>,
    transitions: HashMap<(StateId, char), StateId>,
    start: Option<StateId>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state.
    pub fn add_state(
        &mut self,
        id: StateId,
        is_start: bool,
        is_accepting: bool,
    ) -> AutomatonResult<()> {
        if self.states.contains_key(&id) {
            return Err(AutomatonError::DuplicateState { id });
        }

        if is_start {
            if let Some(existing) = self.start {
                return Err(AutomatonError::MultipleStartStates {
                    existing,
                    attempted: id,
                });
            }
            self.start = Some(id);
        }

        self.states.insert(
            id,
            State {
                id,
                is_start,
                is_accepting,
            },
        );
        Ok(())
    }

    /// Register a deterministic edge. Re-adding an identical edge is a no-op.
    pub fn add_transition(
        &mut self,
        from: StateId,
        symbol: char,
        to: StateId,
    ) -> AutomatonResult<()> {
        for id in [from, to] {
            if !self.states.contains_key(&id) {
                return Err(AutomatonError::UnknownState { id });
            }
        }

        match self.transitions.get(&(from, symbol)) {
            Some(&existing) if existing != to => Err(AutomatonError::NonDeterministicTransition {
                from,
                symbol,
                existing,
                attempted: to,
            }),
            Some(_) => Ok(()),
            None => {
                self.transitions.insert((from, symbol), to);
                Ok(())
            }
        }
    }

    /// Register the same edge for every symbol in `symbols`
    pub fn add_transitions<I>(
        &mut self,
        from: StateId,
        symbols: I,
        to: StateId,
    ) -> AutomatonResult<()>
    where
        I: IntoIterator<Item = char>,
    {
        for symbol in symbols {
            self.add_transition(from, symbol, to)?;
        }
        Ok(())
    }

    /// Next state after consuming `symbol`, or `None` when the automaton dies
    pub fn step(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.transitions.get(&(state, symbol)).copied()
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.states
            .get(&state)
            .map(|s| s.is_accepting)
            .unwrap_or(false)
    }

    pub fn start_state(&self) -> Option<StateId> {
        self.start
    }

    /// Start state, or `MissingStartState` if none was registered
    pub fn validate(&self) -> AutomatonResult<StateId> {
        self.start.ok_or(AutomatonError::MissingStartState)
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.transitions
            .iter()
            .map(|(&(from, symbol), &to)| Transition { from, symbol, to })
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Run the automaton over a whole string; true if it ends in an accepting state
    pub fn accepts(&self, input: &str) -> bool {
        let Some(mut state) = self.start else {
            return false;
        };
        for ch in input.chars() {
            match self.step(state, ch) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accepting(state)
    }
}
