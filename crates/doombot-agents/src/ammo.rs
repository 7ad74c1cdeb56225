//! Per-weapon ammunition stock.
//!
//! A player can hold rounds for a weapon without owning the weapon itself.
//! The unlimited weapon ([`Weapon::has_unlimited_ammo`]) is handled here
//! once: it always reports [`UNLIMITED_ROUNDS`] and no change ever touches
//! it, so callers never special-case it.

use std::collections::BTreeMap;

use doombot_types::Weapon;
use serde::Serialize;

use crate::error::PlayerError;

/// Rounds reported for a weapon that never runs out.
pub const UNLIMITED_ROUNDS: u32 = u32::MAX;

/// Rounds held per weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AmmoStock {
    rounds: BTreeMap<Weapon, u32>,
}

impl Default for AmmoStock {
    fn default() -> Self {
        Self::new()
    }
}

impl AmmoStock {
    /// An empty stock: zero rounds for every limited weapon.
    pub fn new() -> Self {
        let rounds = Weapon::ALL
            .into_iter()
            .filter(|w| !w.has_unlimited_ammo())
            .map(|w| (w, 0))
            .collect();
        Self { rounds }
    }

    /// Rounds held for `weapon`.
    pub fn rounds(&self, weapon: Weapon) -> u32 {
        if weapon.has_unlimited_ammo() {
            return UNLIMITED_ROUNDS;
        }
        self.rounds.get(&weapon).copied().unwrap_or(0)
    }

    /// Whether the stock covers spending `needed` rounds of `weapon` in total.
    pub fn covers(&self, weapon: Weapon, needed: u64) -> bool {
        weapon.has_unlimited_ammo() || needed <= u64::from(self.rounds(weapon))
    }

    /// Add `amount` rounds for `weapon`, returning the new total.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::ArithmeticOverflow`] if the total would not
    /// fit in a `u32`.
    pub fn add(&mut self, weapon: Weapon, amount: u32) -> Result<u32, PlayerError> {
        if weapon.has_unlimited_ammo() {
            return Ok(UNLIMITED_ROUNDS);
        }
        let entry = self.rounds.entry(weapon).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| PlayerError::ArithmeticOverflow {
                context: format!("adding {amount} rounds of {weapon}"),
            })?;
        Ok(*entry)
    }

    /// Apply a signed change to the rounds for `weapon`, returning the new
    /// total. The result is floored at zero.
    pub fn change(&mut self, weapon: Weapon, delta: i64) -> u32 {
        if weapon.has_unlimited_ammo() {
            return UNLIMITED_ROUNDS;
        }
        let entry = self.rounds.entry(weapon).or_insert(0);
        let updated = i64::from(*entry).saturating_add(delta).max(0);
        *entry = u32::try_from(updated).unwrap_or(u32::MAX);
        *entry
    }

    /// Limited weapons and their rounds, lowest tier first.
    pub fn iter(&self) -> impl Iterator<Item = (Weapon, u32)> + '_ {
        self.rounds.iter().map(|(w, r)| (*w, *r))
    }
}
