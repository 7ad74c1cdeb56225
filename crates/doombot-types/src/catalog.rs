//! Static monster-type catalog.
//!
//! Each [`MonsterType`] has a [`MonsterProfile`] describing what it takes to
//! kill one and what standing next to one costs. The built-in table is
//! returned by [`MonsterType::default_profile`]; a [`MonsterCatalog`] layers
//! per-scenario overrides on top of it. Nothing here changes during play.

use std::collections::BTreeMap;
use std::num::NonZeroU16;

use serde::{Deserialize, Serialize};

use crate::enums::{MonsterType, Weapon};

/// Static facts about one monster type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterProfile {
    /// Weakest weapon that can hurt this type.
    pub required_weapon: Weapon,
    /// Rounds of the chosen weapon needed to kill one instance.
    pub ammo_to_kill: NonZeroU16,
    /// Health a player loses from each live instance at every kill event
    /// in the same room.
    pub exposure_damage: u16,
    /// Type that protects instances of this type unless overridden.
    #[serde(default)]
    pub default_protector: Option<MonsterType>,
}

impl MonsterProfile {
    /// Build a profile.
    ///
    /// Returns `None` if `ammo_to_kill` is zero: such a monster could never
    /// be shot dead.
    pub const fn new(
        required_weapon: Weapon,
        ammo_to_kill: u16,
        exposure_damage: u16,
        default_protector: Option<MonsterType>,
    ) -> Option<Self> {
        match NonZeroU16::new(ammo_to_kill) {
            Some(ammo_to_kill) => Some(Self::builtin(
                required_weapon,
                ammo_to_kill,
                exposure_damage,
                default_protector,
            )),
            None => None,
        }
    }

    const fn builtin(
        required_weapon: Weapon,
        ammo_to_kill: NonZeroU16,
        exposure_damage: u16,
        default_protector: Option<MonsterType>,
    ) -> Self {
        Self {
            required_weapon,
            ammo_to_kill,
            exposure_damage,
            default_protector,
        }
    }
}

// Round counts of the built-in table.
const ONE: NonZeroU16 = NonZeroU16::MIN;
const TWO: NonZeroU16 = ONE.saturating_add(1);
const THREE: NonZeroU16 = ONE.saturating_add(2);
const FOUR: NonZeroU16 = ONE.saturating_add(3);
const SIX: NonZeroU16 = ONE.saturating_add(5);

impl MonsterType {
    /// The built-in profile for this type.
    pub const fn default_profile(self) -> MonsterProfile {
        match self {
            Self::Imp => MonsterProfile::builtin(Weapon::Fist, ONE, 1, None),
            Self::Demon => MonsterProfile::builtin(Weapon::Fist, THREE, 1, None),
            Self::Spectre => MonsterProfile::builtin(Weapon::Chainsaw, TWO, 2, Some(Self::Demon)),
            Self::LostSoul => MonsterProfile::builtin(Weapon::Pistol, ONE, 1, None),
            Self::Cacodemon => {
                MonsterProfile::builtin(Weapon::Pistol, FOUR, 2, Some(Self::LostSoul))
            }
            Self::HellKnight => {
                MonsterProfile::builtin(Weapon::Shotgun, THREE, 3, Some(Self::Cacodemon))
            }
            Self::BaronOfHell => {
                MonsterProfile::builtin(Weapon::Shotgun, SIX, 4, Some(Self::HellKnight))
            }
        }
    }
}

/// Read-only lookup from monster type to profile.
///
/// Types without an override resolve to their built-in profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonsterCatalog {
    overrides: BTreeMap<MonsterType, MonsterProfile>,
}

impl MonsterCatalog {
    /// Catalog holding only the built-in profiles.
    pub const fn new() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    /// Replace the profile for `kind`, returning the catalog for chaining.
    #[must_use]
    pub fn with_profile(mut self, kind: MonsterType, profile: MonsterProfile) -> Self {
        self.overrides.insert(kind, profile);
        self
    }

    /// Profile for `kind`.
    pub fn profile(&self, kind: MonsterType) -> MonsterProfile {
        self.overrides
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_profile())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_uses_builtin_profiles() {
        let catalog = MonsterCatalog::new();
        for kind in MonsterType::ALL {
            assert_eq!(catalog.profile(kind), kind.default_profile());
        }
    }

    #[test]
    fn override_replaces_only_its_type() {
        let custom = MonsterProfile::new(Weapon::Shotgun, 9, 9, None).unwrap();
        let catalog = MonsterCatalog::new().with_profile(MonsterType::Imp, custom);
        assert_eq!(catalog.profile(MonsterType::Imp), custom);
        assert_eq!(catalog.profile(MonsterType::Imp).ammo_to_kill.get(), 9);
        assert_eq!(
            catalog.profile(MonsterType::Demon),
            MonsterType::Demon.default_profile()
        );
    }

    #[test]
    fn builtin_protectors_point_to_lower_tiers() {
        for kind in MonsterType::ALL {
            if let Some(protector) = kind.default_profile().default_protector {
                assert!(protector.tier() < kind.tier(), "{kind} protected by {protector}");
            }
        }
    }

    #[test]
    fn catalog_parses_from_json_map() {
        let json = r#"{"imp": {"required_weapon": "pistol", "ammo_to_kill": 2, "exposure_damage": 1}}"#;
        let catalog: MonsterCatalog = serde_json::from_str(json).unwrap();
        let imp = catalog.profile(MonsterType::Imp);
        assert_eq!(imp.required_weapon, Weapon::Pistol);
        assert_eq!(imp.default_protector, None);
    }

    #[test]
    fn builtin_round_counts() {
        let rounds: Vec<u16> = MonsterType::ALL
            .iter()
            .map(|kind| kind.default_profile().ammo_to_kill.get())
            .collect();
        assert_eq!(rounds, vec![1, 3, 2, 1, 4, 3, 6]);
    }

    #[test]
    fn zero_round_profile_is_unrepresentable() {
        assert_eq!(MonsterProfile::new(Weapon::Fist, 0, 1, None), None);
        let json = r#"{"imp": {"required_weapon": "fist", "ammo_to_kill": 0, "exposure_damage": 1}}"#;
        assert!(serde_json::from_str::<MonsterCatalog>(json).is_err());
    }
}
