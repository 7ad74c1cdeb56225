//! Error types for the `doombot-world` crate.
//!
//! All fallible monster and room operations return [`WorldError`].

use doombot_types::{MonsterId, RoomId, Weapon};

/// Errors that can occur during monster and room operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The monster is not a member of the room.
    #[error("{monster} is not in {room}")]
    MonsterNotInRoom {
        /// The monster that was looked up.
        monster: MonsterId,
        /// The room that was searched.
        room: RoomId,
    },

    /// Two monsters with the same ID were placed in one room.
    #[error("{monster} appears more than once in {room}")]
    DuplicateMonster {
        /// The repeated monster ID.
        monster: MonsterId,
        /// The room being built.
        room: RoomId,
    },

    /// The monster is already dead.
    #[error("{0} is already dead")]
    MonsterAlreadyDead(MonsterId),

    /// The weapon is below the tier the monster requires.
    #[error("{weapon} cannot hurt {monster}: requires {required} or better")]
    WeaponTooWeak {
        /// The monster being attacked.
        monster: MonsterId,
        /// The weapon used.
        weapon: Weapon,
        /// The weakest weapon that would work.
        required: Weapon,
    },

    /// An attack fired no rounds.
    #[error("attack on {0} must fire at least one round")]
    ZeroRounds(MonsterId),

    /// The room's protector relationships form a cycle.
    #[error("protector cycle in {room} through {monster}")]
    ProtectorCycle {
        /// The room being built.
        room: RoomId,
        /// A monster on the cycle.
        monster: MonsterId,
    },
}

impl WorldError {
    /// Whether this error reports an operation on something already dead,
    /// as opposed to a malformed argument.
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::MonsterAlreadyDead(_))
    }
}
