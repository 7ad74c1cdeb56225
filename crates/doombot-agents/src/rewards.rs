//! Collecting a room's completion rewards.
//!
//! Order matters: the health delta lands first, so a negative health reward
//! that kills the player makes the weapon and ammunition grants fail.

use std::collections::BTreeMap;

use doombot_types::Weapon;
use doombot_world::Rewards;
use serde::Serialize;
use tracing::debug;

use crate::error::PlayerError;
use crate::player::Player;

/// What a player actually received from a reward bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewardReceipt {
    /// Player health after the health delta.
    pub health_after: i32,
    /// Weapons that were new to the player (each came with a stipend).
    pub weapons_granted: Vec<Weapon>,
    /// Ammunition totals after the ammunition grants, per rewarded weapon.
    pub ammo_after: BTreeMap<Weapon, u32>,
}

/// Apply `rewards` to `player`: health delta, then weapons, then ammunition.
///
/// # Errors
///
/// Returns [`PlayerError::PlayerDead`] if the player is dead before the
/// grant or is killed by a negative health reward part-way through.
pub fn collect_rewards(player: &mut Player, rewards: &Rewards) -> Result<RewardReceipt, PlayerError> {
    let health_after = player.change_health(rewards.health)?;

    let mut weapons_granted = Vec::new();
    for &weapon in &rewards.weapons {
        if player.add_weapon(weapon)? {
            weapons_granted.push(weapon);
        }
    }

    let mut ammo_after = BTreeMap::new();
    for (&weapon, &rounds) in &rewards.ammo {
        let total = player.add_ammunition(weapon, rounds)?;
        ammo_after.insert(weapon, total);
    }

    debug!(
        player = player.name(),
        health = health_after,
        weapons = ?weapons_granted,
        "Rewards collected"
    );

    Ok(RewardReceipt {
        health_after,
        weapons_granted,
        ammo_after,
    })
}
