//! Type-safe identifier wrappers.
//!
//! Every monster and room carries a strongly-typed ID so the two can never
//! be mixed up at compile time. IDs are plain sequential integers handed out
//! at setup time; the simulation is deterministic, so identity keys must be
//! too. The numeric value doubles as the final tie-breaker of the canonical
//! monster order (lower ID sorts first).

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u32` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an identifier from its raw value.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the inner `u32` value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a monster instance.
    MonsterId, "monster"
}

define_id! {
    /// Unique identifier for a room.
    RoomId, "room"
}

/// Hands out sequential identifiers during scenario setup.
///
/// One allocator per game keeps monster IDs unique across every room, which
/// the canonical ordering relies on.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next_monster: u32,
    next_room: u32,
}

impl IdAllocator {
    /// Create an allocator starting at zero for both kinds of ID.
    pub const fn new() -> Self {
        Self {
            next_monster: 0,
            next_room: 0,
        }
    }

    /// Allocate the next monster ID.
    pub const fn monster(&mut self) -> MonsterId {
        let id = MonsterId(self.next_monster);
        self.next_monster = self.next_monster.saturating_add(1);
        id
    }

    /// Allocate the next room ID.
    pub const fn room(&mut self) -> RoomId {
        let id = RoomId(self.next_room);
        self.next_room = self.next_room.saturating_add(1);
        id
    }
}
