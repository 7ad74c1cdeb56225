//! Player state, ammunition, and rewards for the Doombot simulation.
//!
//! This crate holds everything about the players the bot sends into rooms.
//! It sits between `doombot-world` (what players fight) and `doombot-core`
//! (which decides who fights what).
//!
//! # Modules
//!
//! - [`ammo`] -- Per-weapon [`AmmoStock`] with the unlimited-weapon sentinel
//! - [`error`] -- Error types for player operations ([`PlayerError`])
//! - [`ordering`] -- Canonical player ranking ([`compare_players`])
//! - [`player`] -- [`Player`]: health, weapons, ammunition
//! - [`rewards`] -- Applying a room's completion rewards to a player

pub mod ammo;
pub mod error;
pub mod ordering;
pub mod player;
pub mod rewards;

// Re-export primary types at crate root for convenience.
pub use ammo::{AmmoStock, UNLIMITED_ROUNDS};
pub use error::PlayerError;
pub use ordering::{compare_players, rank_key, sort_players};
pub use player::{Player, WEAPON_STIPEND_ROUNDS};
pub use rewards::{RewardReceipt, collect_rewards};
