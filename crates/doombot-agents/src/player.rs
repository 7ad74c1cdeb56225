//! Player state: health, owned weapons, and ammunition.
//!
//! A player is dead once health drops strictly below zero; zero health is
//! still alive. Every mutation except ammunition deltas requires a living
//! player.

use std::collections::BTreeSet;

use doombot_types::Weapon;
use serde::Serialize;

use crate::ammo::AmmoStock;
use crate::error::PlayerError;

/// Rounds granted alongside a weapon the first time a player acquires it.
pub const WEAPON_STIPEND_ROUNDS: u32 = 5;

/// A player the bot can send into rooms.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    name: String,
    health: i32,
    weapons: BTreeSet<Weapon>,
    ammo: AmmoStock,
}

impl Player {
    /// Create a player carrying only the unlimited weapon.
    pub fn new(name: impl Into<String>, health: i32) -> Self {
        let weapons = Weapon::ALL
            .into_iter()
            .filter(|w| w.has_unlimited_ammo())
            .collect();
        Self {
            name: name.into(),
            health,
            weapons,
            ammo: AmmoStock::new(),
        }
    }

    /// The player's name, which is also their identity key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current health. Negative means dead.
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Whether health has dropped below zero.
    pub const fn is_dead(&self) -> bool {
        self.health < 0
    }

    /// Owned weapons, lowest tier first.
    pub const fn weapons(&self) -> &BTreeSet<Weapon> {
        &self.weapons
    }

    /// Whether the player owns `weapon`.
    pub fn has_weapon(&self, weapon: Weapon) -> bool {
        self.weapons.contains(&weapon)
    }

    /// The full ammunition stock.
    pub const fn ammo(&self) -> &AmmoStock {
        &self.ammo
    }

    /// Rounds held for `weapon`.
    pub fn rounds_for(&self, weapon: Weapon) -> u32 {
        self.ammo.rounds(weapon)
    }

    /// Highest-tier owned weapon.
    pub fn top_weapon(&self) -> Weapon {
        self.weapons.last().copied().unwrap_or(Weapon::Fist)
    }

    /// The lowest-tier owned weapon that meets `required`, if any.
    pub fn cheapest_weapon_for(&self, required: Weapon) -> Option<Weapon> {
        self.weapons.range(required..).next().copied()
    }

    /// Apply a signed change to the rounds for `weapon`, floored at zero.
    ///
    /// Works on dead players too; the unlimited weapon never changes.
    pub fn change_ammunition(&mut self, weapon: Weapon, delta: i64) -> u32 {
        self.ammo.change(weapon, delta)
    }

    /// Add rounds for `weapon`, owned or not. Returns the new total.
    ///
    /// # Errors
    ///
    /// - [`PlayerError::PlayerDead`] if the player is dead.
    /// - [`PlayerError::ArithmeticOverflow`] if the total overflows.
    pub fn add_ammunition(&mut self, weapon: Weapon, rounds: u32) -> Result<u32, PlayerError> {
        self.ensure_alive()?;
        self.ammo.add(weapon, rounds)
    }

    /// Give the player `weapon`. A first acquisition also grants
    /// [`WEAPON_STIPEND_ROUNDS`] rounds for it.
    ///
    /// Returns `false` (and changes nothing) if the weapon was already owned.
    ///
    /// # Errors
    ///
    /// - [`PlayerError::PlayerDead`] if the player is dead.
    /// - [`PlayerError::ArithmeticOverflow`] if the stipend overflows.
    pub fn add_weapon(&mut self, weapon: Weapon) -> Result<bool, PlayerError> {
        self.ensure_alive()?;
        if self.weapons.contains(&weapon) {
            return Ok(false);
        }
        self.ammo.add(weapon, WEAPON_STIPEND_ROUNDS)?;
        self.weapons.insert(weapon);
        Ok(true)
    }

    /// Change health by `amount`, returning the new value. Health is not
    /// clamped: dropping below zero kills the player.
    ///
    /// # Errors
    ///
    /// - [`PlayerError::PlayerDead`] if the player is already dead.
    /// - [`PlayerError::ArithmeticOverflow`] if health overflows `i32`.
    pub fn change_health(&mut self, amount: i32) -> Result<i32, PlayerError> {
        self.ensure_alive()?;
        self.health = self
            .health
            .checked_add(amount)
            .ok_or_else(|| PlayerError::ArithmeticOverflow {
                context: format!("health {} changed by {amount}", self.health),
            })?;
        Ok(self.health)
    }

    fn ensure_alive(&self) -> Result<(), PlayerError> {
        if self.is_dead() {
            return Err(PlayerError::PlayerDead {
                name: self.name.clone(),
                health: self.health,
            });
        }
        Ok(())
    }
}
