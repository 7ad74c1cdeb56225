//! Monsters, rooms, and protector chains for the Doombot simulation.
//!
//! This crate models what players fight: monster instances with live/dead
//! state, rooms that own a fixed set of monsters plus a completion reward,
//! and the protector relationships that force kills to happen in order.
//!
//! # Modules
//!
//! - [`error`] -- Error types for monster and room operations.
//! - [`monster`] -- [`Monster`]: one instance of a monster type.
//! - [`ordering`] -- Canonical kill order ([`compare_monsters`],
//!   [`canonical_order`]).
//! - [`protectors`] -- Transitive protector-chain resolution.
//! - [`rewards`] -- [`Rewards`] granted on room completion.
//! - [`room`] -- [`Room`]: membership, live/dead sets, danger, exposure.

pub mod error;
pub mod monster;
pub mod ordering;
pub mod protectors;
pub mod rewards;
pub mod room;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use monster::Monster;
pub use ordering::{canonical_order, compare_monsters};
pub use protectors::protectors_of;
pub use rewards::Rewards;
pub use room::{Room, TargetStatus};
