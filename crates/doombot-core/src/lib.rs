//! Decision and execution engine for the Doombot simulation.
//!
//! This crate answers "can this player kill that monster?" without side
//! effects, applies kills when the answer is yes, and drives the bot's
//! repeated passes through the rooms until every room is cleared or no
//! further progress is possible.
//!
//! # Modules
//!
//! - [`bot`] -- [`GameBot`]: rooms, players, and a single pass.
//! - [`config`] -- YAML scenario loading and bot construction.
//! - [`error`] -- Error types for feasibility and execution.
//! - [`execution`] -- [`kill_monster`]: applying a kill and its chain.
//! - [`feasibility`] -- [`can_kill`] and [`evaluate_kill`]: side-effect-free
//!   simulation of a kill.
//! - [`runner`] -- The pass loop, [`GameReport`], and pass callbacks.

pub mod bot;
pub mod config;
pub mod error;
pub mod execution;
pub mod feasibility;
pub mod runner;

// Re-export primary types at crate root.
pub use bot::{GameBot, PassSummary, RewardGrant};
pub use config::{ConfigError, MonsterConfig, PlayerConfig, RoomConfig, ScenarioConfig};
pub use error::{CoreError, TargetError};
pub use execution::{KillRecord, KillReport, kill_monster};
pub use feasibility::{InfeasibleReason, KillFeasibility, can_kill, evaluate_kill};
pub use runner::{
    GameOutcome, GameReport, NoOpCallback, PassCallback, PlayerStanding, log_game_end, run_game,
};
