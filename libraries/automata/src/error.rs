use thiserror::Error;

use crate::Direction;
use crate::State;

/// Errors raised by automata operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AutomataError {
    #[error("state {state} is out of bounds for an automaton with {num_of_states} states")]
    StateOutOfBounds { state: State, num_of_states: usize },

    #[error("{operation} is only defined on {expected:?} closed sets")]
    DirectionMismatch {
        operation: &'static str,
        expected: Direction,
    },

    #[error("operation {0} is not implemented")]
    Unimplemented(&'static str),
}

pub type Result<T> = std::result::Result<T, AutomataError>;
