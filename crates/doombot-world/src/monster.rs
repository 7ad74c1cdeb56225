//! A single monster instance.
//!
//! A [`Monster`] copies its type's [`MonsterProfile`] out of the catalog at
//! construction, so the rest of the engine never needs the catalog again.
//! Its effective protector is the type default unless the scenario
//! overrides it for this instance.

use doombot_types::{MonsterCatalog, MonsterId, MonsterProfile, MonsterType, Weapon};
use serde::Serialize;

use crate::error::WorldError;

/// One monster living (or lying dead) in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Monster {
    id: MonsterId,
    kind: MonsterType,
    profile: MonsterProfile,
    protector: Option<MonsterType>,
    remaining_rounds: u32,
    dead: bool,
}

impl Monster {
    /// Create a monster protected by its type's default protector.
    pub fn new(id: MonsterId, kind: MonsterType, catalog: &MonsterCatalog) -> Self {
        let profile = catalog.profile(kind);
        Self::from_profile(id, kind, profile, profile.default_protector)
    }

    /// Create a monster with a custom protector (or explicitly none),
    /// ignoring its type's default.
    pub fn with_protector(
        id: MonsterId,
        kind: MonsterType,
        protector: Option<MonsterType>,
        catalog: &MonsterCatalog,
    ) -> Self {
        Self::from_profile(id, kind, catalog.profile(kind), protector)
    }

    fn from_profile(
        id: MonsterId,
        kind: MonsterType,
        profile: MonsterProfile,
        protector: Option<MonsterType>,
    ) -> Self {
        Self {
            id,
            kind,
            profile,
            protector,
            remaining_rounds: u32::from(profile.ammo_to_kill.get()),
            dead: false,
        }
    }

    /// Identity key of this instance.
    pub const fn id(&self) -> MonsterId {
        self.id
    }

    /// The monster's type.
    pub const fn kind(&self) -> MonsterType {
        self.kind
    }

    /// Static facts for this monster's type.
    pub const fn profile(&self) -> &MonsterProfile {
        &self.profile
    }

    /// Type that must be cleared from the room before this monster.
    pub const fn protector(&self) -> Option<MonsterType> {
        self.protector
    }

    /// Whether `self` is protected by monsters of `other`'s type.
    pub fn is_protected_by(&self, other: &Self) -> bool {
        self.protector == Some(other.kind)
    }

    /// Weakest weapon that can hurt this monster.
    pub const fn required_weapon(&self) -> Weapon {
        self.profile.required_weapon
    }

    /// Rounds a full kill costs.
    pub fn ammo_to_kill(&self) -> u32 {
        u32::from(self.profile.ammo_to_kill.get())
    }

    /// Health lost per kill event while this monster is alive in the room.
    pub fn exposure_damage(&self) -> u32 {
        u32::from(self.profile.exposure_damage)
    }

    /// Rounds still needed to finish this monster off.
    pub const fn remaining_rounds(&self) -> u32 {
        self.remaining_rounds
    }

    /// Whether the monster is dead.
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    /// Fire `rounds` of `weapon` at this monster.
    ///
    /// Returns whether the monster is dead after the attack.
    ///
    /// # Errors
    ///
    /// - [`WorldError::WeaponTooWeak`] if `weapon` is below the required tier.
    /// - [`WorldError::ZeroRounds`] if `rounds` is zero.
    /// - [`WorldError::MonsterAlreadyDead`] if the monster is already dead.
    pub fn attack(&mut self, weapon: Weapon, rounds: u32) -> Result<bool, WorldError> {
        self.check_attack(weapon, rounds)?;
        self.remaining_rounds = self.remaining_rounds.saturating_sub(rounds);
        if self.remaining_rounds == 0 {
            self.dead = true;
        }
        Ok(self.dead)
    }

    /// Check that [`Monster::attack`] would accept `weapon` and `rounds`,
    /// without firing.
    ///
    /// # Errors
    ///
    /// The same errors as [`Monster::attack`].
    pub fn check_attack(&self, weapon: Weapon, rounds: u32) -> Result<(), WorldError> {
        if !weapon.satisfies(self.profile.required_weapon) {
            return Err(WorldError::WeaponTooWeak {
                monster: self.id,
                weapon,
                required: self.profile.required_weapon,
            });
        }
        if rounds == 0 {
            return Err(WorldError::ZeroRounds(self.id));
        }
        if self.dead {
            return Err(WorldError::MonsterAlreadyDead(self.id));
        }
        Ok(())
    }

    pub(crate) const fn mark_dead(&mut self) {
        self.remaining_rounds = 0;
        self.dead = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imp() -> Monster {
        Monster::new(MonsterId(1), MonsterType::Imp, &MonsterCatalog::new())
    }

    fn cacodemon() -> Monster {
        Monster::new(MonsterId(2), MonsterType::Cacodemon, &MonsterCatalog::new())
    }

    #[test]
    fn new_monster_uses_type_defaults() {
        let caco = cacodemon();
        assert_eq!(caco.protector(), Some(MonsterType::LostSoul));
        assert_eq!(caco.remaining_rounds(), 4);
        assert_eq!(caco.required_weapon(), Weapon::Pistol);
        assert!(!caco.is_dead());
    }

    #[test]
    fn custom_protector_overrides_default() {
        let catalog = MonsterCatalog::new();
        let guarded = Monster::with_protector(
            MonsterId(3),
            MonsterType::Imp,
            Some(MonsterType::Demon),
            &catalog,
        );
        assert_eq!(guarded.protector(), Some(MonsterType::Demon));
        assert_eq!(guarded.remaining_rounds(), 1);

        let unguarded =
            Monster::with_protector(MonsterId(4), MonsterType::Cacodemon, None, &catalog);
        assert_eq!(unguarded.protector(), None);
    }

    #[test]
    fn partial_attack_leaves_monster_alive() {
        let mut caco = cacodemon();
        assert_eq!(caco.attack(Weapon::Pistol, 3), Ok(false));
        assert_eq!(caco.remaining_rounds(), 1);
        assert_eq!(caco.attack(Weapon::Shotgun, 5), Ok(true));
        assert_eq!(caco.remaining_rounds(), 0);
        assert!(caco.is_dead());
    }

    #[test]
    fn weak_weapon_is_rejected() {
        let mut caco = cacodemon();
        assert!(matches!(
            caco.check_attack(Weapon::Chainsaw, 4),
            Err(WorldError::WeaponTooWeak { .. })
        ));
        let err = caco.attack(Weapon::Chainsaw, 4);
        assert!(matches!(err, Err(WorldError::WeaponTooWeak { required: Weapon::Pistol, .. })));
        assert!(!caco.is_dead());
        assert_eq!(caco.remaining_rounds(), 4);
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let mut monster = imp();
        assert_eq!(monster.attack(Weapon::Fist, 0), Err(WorldError::ZeroRounds(MonsterId(1))));
    }

    #[test]
    fn attacking_dead_monster_is_invalid_state() {
        let mut monster = imp();
        assert_eq!(monster.attack(Weapon::Fist, 1), Ok(true));
        let err = monster.attack(Weapon::Fist, 1);
        assert_eq!(err, Err(WorldError::MonsterAlreadyDead(MonsterId(1))));
        assert!(err.is_err_and(|e| e.is_invalid_state()));
    }

    #[test]
    fn protection_follows_types() {
        let caco = cacodemon();
        let soul = Monster::new(MonsterId(9), MonsterType::LostSoul, &MonsterCatalog::new());
        assert!(caco.is_protected_by(&soul));
        assert!(!soul.is_protected_by(&caco));
    }
}
