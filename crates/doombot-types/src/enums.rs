//! Enumeration types for the Doombot simulation.
//!
//! Both enums are declared in ascending power order, so the derived `Ord`
//! is the tier order the engine relies on.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Weapons
// ---------------------------------------------------------------------------

/// A kind of weapon a player can carry.
///
/// Variants are ordered by power tier: a weapon can hurt every monster whose
/// required weapon is at or below its own tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weapon {
    /// Bare hands. Always owned, never runs out of ammunition.
    Fist,
    /// Melee weapon with fuel-based rounds.
    Chainsaw,
    /// Basic ranged weapon.
    Pistol,
    /// Heavy ranged weapon.
    Shotgun,
}

impl Weapon {
    /// Every weapon, lowest tier first.
    pub const ALL: [Self; 4] = [Self::Fist, Self::Chainsaw, Self::Pistol, Self::Shotgun];

    /// Position of this weapon in the power order (0 = weakest).
    pub const fn tier(self) -> u32 {
        match self {
            Self::Fist => 0,
            Self::Chainsaw => 1,
            Self::Pistol => 2,
            Self::Shotgun => 3,
        }
    }

    /// Whether this weapon is at least as powerful as `required`.
    pub const fn satisfies(self, required: Self) -> bool {
        self.tier() >= required.tier()
    }

    /// Whether this weapon is the unlimited-ammunition sentinel.
    pub const fn has_unlimited_ammo(self) -> bool {
        matches!(self, Self::Fist)
    }
}

impl core::fmt::Display for Weapon {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fist => write!(f, "fist"),
            Self::Chainsaw => write!(f, "chainsaw"),
            Self::Pistol => write!(f, "pistol"),
            Self::Shotgun => write!(f, "shotgun"),
        }
    }
}

// ---------------------------------------------------------------------------
// Monster types
// ---------------------------------------------------------------------------

/// A kind of monster.
///
/// Declaration order is the type tier: it feeds the room danger level
/// (`tier + 1` per live monster) and the tier step of the canonical
/// monster ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterType {
    /// Fireball-throwing grunt.
    Imp,
    /// Charging melee brute.
    Demon,
    /// Near-invisible demon.
    Spectre,
    /// Flying burning skull.
    LostSoul,
    /// Floating one-eyed caster.
    Cacodemon,
    /// Lesser baron.
    HellKnight,
    /// Heavy boss-class demon.
    BaronOfHell,
}

impl MonsterType {
    /// Every monster type, lowest tier first.
    pub const ALL: [Self; 7] = [
        Self::Imp,
        Self::Demon,
        Self::Spectre,
        Self::LostSoul,
        Self::Cacodemon,
        Self::HellKnight,
        Self::BaronOfHell,
    ];

    /// Position of this type in the catalog order (0 = weakest).
    pub const fn tier(self) -> u32 {
        match self {
            Self::Imp => 0,
            Self::Demon => 1,
            Self::Spectre => 2,
            Self::LostSoul => 3,
            Self::Cacodemon => 4,
            Self::HellKnight => 5,
            Self::BaronOfHell => 6,
        }
    }

    /// Contribution of one live monster of this type to a room's danger level.
    pub const fn danger(self) -> u32 {
        self.tier().saturating_add(1)
    }
}

impl core::fmt::Display for MonsterType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Imp => write!(f, "imp"),
            Self::Demon => write!(f, "demon"),
            Self::Spectre => write!(f, "spectre"),
            Self::LostSoul => write!(f, "lost_soul"),
            Self::Cacodemon => write!(f, "cacodemon"),
            Self::HellKnight => write!(f, "hell_knight"),
            Self::BaronOfHell => write!(f, "baron_of_hell"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn weapon_order_matches_tier() {
        for pair in Weapon::ALL.windows(2) {
            if let [low, high] = pair {
                assert!(low < high);
                assert!(low.tier() < high.tier());
            }
        }
    }

    #[test]
    fn satisfies_is_at_least_as_powerful() {
        assert!(Weapon::Shotgun.satisfies(Weapon::Pistol));
        assert!(Weapon::Pistol.satisfies(Weapon::Pistol));
        assert!(!Weapon::Chainsaw.satisfies(Weapon::Pistol));
        assert!(Weapon::Fist.satisfies(Weapon::Fist));
    }

    #[test]
    fn only_fist_is_unlimited() {
        let unlimited: Vec<Weapon> = Weapon::ALL
            .into_iter()
            .filter(|w| w.has_unlimited_ammo())
            .collect();
        assert_eq!(unlimited, vec![Weapon::Fist]);
    }

    #[test]
    fn monster_danger_is_tier_plus_one() {
        assert_eq!(MonsterType::Imp.danger(), 1);
        assert_eq!(MonsterType::BaronOfHell.danger(), 7);
        for (index, kind) in MonsterType::ALL.iter().enumerate() {
            assert_eq!(usize::try_from(kind.tier()).ok(), Some(index));
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&MonsterType::BaronOfHell).unwrap();
        assert_eq!(json, "\"baron_of_hell\"");
        let weapon: Weapon = serde_json::from_str("\"shotgun\"").unwrap_or(Weapon::Fist);
        assert_eq!(weapon, Weapon::Shotgun);
    }
}
