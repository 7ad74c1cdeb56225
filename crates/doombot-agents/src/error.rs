//! Error types for the doombot-agents crate.
//!
//! Player mutations that require a living player fail with
//! [`PlayerError::PlayerDead`] instead of silently doing nothing.

/// Errors that can occur during player state operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// The player is dead and can no longer be changed.
    #[error("player {name} is dead (health {health})")]
    PlayerDead {
        /// The player's name.
        name: String,
        /// The player's (negative) health.
        health: i32,
    },

    /// An arithmetic overflow occurred while updating player state.
    #[error("arithmetic overflow in player computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
