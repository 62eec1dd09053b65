//! Session bootstrap errors
//!
//! The simulation itself cannot fail; only starting a session can.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The start screen handed over an empty (or whitespace-only) name
    EmptyPlayerName,
    /// A tuning value the simulation cannot run with
    InvalidTuning(&'static str),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyPlayerName => write!(f, "player name must not be empty"),
            SessionError::InvalidTuning(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for SessionError {}
