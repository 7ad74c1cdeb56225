//! Completion rewards handed to the player who clears a room.

use std::collections::{BTreeMap, BTreeSet};

use doombot_types::Weapon;
use serde::{Deserialize, Serialize};

/// Everything the player who kills a room's last monster receives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    /// Weapons granted on completion.
    #[serde(default)]
    pub weapons: BTreeSet<Weapon>,
    /// Extra rounds granted per weapon, whether or not the player owns it.
    #[serde(default)]
    pub ammo: BTreeMap<Weapon, u32>,
    /// Health delta applied on completion. May be negative.
    #[serde(default)]
    pub health: i32,
}

impl Rewards {
    /// An empty reward bundle.
    pub const fn none() -> Self {
        Self {
            weapons: BTreeSet::new(),
            ammo: BTreeMap::new(),
            health: 0,
        }
    }

    /// Add a weapon to the bundle.
    #[must_use]
    pub fn weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.insert(weapon);
        self
    }

    /// Add rounds for a weapon to the bundle.
    #[must_use]
    pub fn ammo(mut self, weapon: Weapon, rounds: u32) -> Self {
        let entry = self.ammo.entry(weapon).or_insert(0);
        *entry = entry.saturating_add(rounds);
        self
    }

    /// Set the health delta.
    #[must_use]
    pub const fn health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    /// Whether the bundle grants nothing at all.
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.ammo.is_empty() && self.health == 0
    }
}
