//! Shared type definitions for the Doombot simulation.
//!
//! This crate is the leaf of the workspace: the weapon tier table, the
//! monster-type catalog and the typed identifiers every other crate uses.
//!
//! # Modules
//!
//! - [`ids`] -- Sequential typed identifiers for monsters and rooms
//! - [`enums`] -- [`Weapon`] and [`MonsterType`], declared in tier order
//! - [`catalog`] -- Per-type static facts ([`MonsterProfile`]) and the
//!   overridable [`MonsterCatalog`]

pub mod catalog;
pub mod enums;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use catalog::{MonsterCatalog, MonsterProfile};
pub use enums::{MonsterType, Weapon};
pub use ids::{IdAllocator, MonsterId, RoomId};
