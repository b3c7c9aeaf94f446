//! Simulation error types
//!
//! The simulation has no I/O failure surface; these cover configuration
//! mistakes and UI actions that are not valid in the current phase.

use std::fmt;

use crate::sim::state::{Action, GamePhase};

/// Top-level error enum for the simulation core
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Level number outside the static level table (1-based)
    LevelOutOfRange {
        /// The rejected level number
        level: u8,
    },

    /// A UI action was requested in a phase that has no such transition
    InvalidTransition {
        /// Phase the session was in
        phase: GamePhase,
        /// The rejected action
        action: Action,
    },

    /// A settings value is unusable
    InvalidSettings {
        /// Name of the field (for logging)
        field: &'static str,
        /// Human-readable description of the problem
        reason: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::LevelOutOfRange { level } => write!(
                f,
                "level {} is outside the level table (1..={})",
                level,
                crate::sim::level::LEVEL_COUNT
            ),
            SimError::InvalidTransition { phase, action } => {
                write!(f, "action {:?} is not valid while {:?}", action, phase)
            }
            SimError::InvalidSettings { field, reason } => {
                write!(f, "invalid setting '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimError::LevelOutOfRange { level: 9 };
        assert_eq!(err.to_string(), "level 9 is outside the level table (1..=5)");

        let err = SimError::InvalidTransition {
            phase: GamePhase::Idle,
            action: Action::Resume,
        };
        assert_eq!(err.to_string(), "action Resume is not valid while Idle");
    }
}
