//! Error types for the doombot-core crate.
//!
//! A feasibility check answering "no" is not an error. Errors here mean a
//! caller asked about something that cannot be a target, or a lower layer
//! refused a mutation.

use doombot_agents::PlayerError;
use doombot_types::{MonsterId, RoomId, Weapon};
use doombot_world::WorldError;

/// A kill was requested against something that is not a live member of
/// the room.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// The monster is already dead.
    #[error("{monster} in {room} is already dead")]
    MonsterDead {
        /// The requested target.
        monster: MonsterId,
        /// The room it was looked up in.
        room: RoomId,
    },

    /// The monster is not in the room.
    #[error("{monster} is not in {room}")]
    MonsterNotInRoom {
        /// The requested target.
        monster: MonsterId,
        /// The room it was looked up in.
        room: RoomId,
    },
}

/// Errors that can occur while checking or executing kills.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The requested target is invalid.
    #[error("invalid target: {0}")]
    Target(#[from] TargetError),

    /// A room or monster operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A player operation failed.
    #[error("player error: {source}")]
    Player {
        /// The underlying player error.
        #[from]
        source: PlayerError,
    },

    /// The player owns nothing strong enough for the monster.
    #[error("{player} owns no weapon of tier {required} or better for {monster}")]
    NoUsableWeapon {
        /// The player's name.
        player: String,
        /// The monster being killed.
        monster: MonsterId,
        /// The monster's required weapon.
        required: Weapon,
    },

    /// Two rooms share an ID.
    #[error("duplicate room {0}")]
    DuplicateRoom(RoomId),

    /// Two players share a name.
    #[error("duplicate player {0:?}")]
    DuplicatePlayer(String),

    /// An arithmetic overflow occurred while applying a kill.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
