//! Kill execution.
//!
//! Applies a kill for real: the live protector chain dies first in
//! canonical order, then the target. Every kill event costs the player the
//! exposure of all monsters alive at that moment, spends the cheapest
//! adequate weapon's rounds, and records the death in the room.
//!
//! Callers are expected to check [`crate::feasibility::can_kill`] first.
//! Execution does not re-check affordability: a player driven below zero
//! health partway through is refused further kills by
//! [`Player::change_health`].

use doombot_agents::Player;
use doombot_types::{MonsterId, MonsterType, Weapon};
use doombot_world::{Room, TargetStatus};
use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, TargetError};

/// One applied kill event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KillRecord {
    /// The monster that died.
    pub monster: MonsterId,
    /// Its type.
    pub kind: MonsterType,
    /// The player who killed it.
    pub player: String,
    /// Weapon used.
    pub weapon: Weapon,
    /// Rounds fired.
    pub rounds: u32,
    /// Health lost to exposure for this kill.
    pub exposure: u32,
    /// The player's health after the kill.
    pub health_after: i32,
}

/// Everything a single [`kill_monster`] call did, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KillReport {
    /// Kills in the order they happened, target last.
    pub kills: Vec<KillRecord>,
}

impl KillReport {
    /// Total health lost across all kills.
    pub fn health_lost(&self) -> u64 {
        self.kills
            .iter()
            .fold(0_u64, |acc, k| acc.saturating_add(u64::from(k.exposure)))
    }

    /// Total rounds fired from `weapon`.
    pub fn rounds_fired(&self, weapon: Weapon) -> u64 {
        self.kills
            .iter()
            .filter(|k| k.weapon == weapon)
            .fold(0_u64, |acc, k| acc.saturating_add(u64::from(k.rounds)))
    }
}

/// Kill `monster` in `room`, after its live protectors.
///
/// # Errors
///
/// - [`CoreError::Target`] if `monster` is not a live member of `room`.
/// - [`CoreError::NoUsableWeapon`] if the player cannot hurt a monster on
///   the chain.
/// - [`CoreError::Player`] if the player dies partway and is asked to
///   continue.
///
/// Kills applied before an error stay applied. The failing kill itself
/// changes nothing: the weapon and attack are checked before exposure is
/// taken.
pub fn kill_monster(
    player: &mut Player,
    room: &mut Room,
    monster: MonsterId,
) -> Result<KillReport, CoreError> {
    match room.target_status(monster) {
        TargetStatus::Live => {}
        TargetStatus::Dead => {
            return Err(TargetError::MonsterDead {
                monster,
                room: room.id(),
            }
            .into());
        }
        TargetStatus::Absent => {
            return Err(TargetError::MonsterNotInRoom {
                monster,
                room: room.id(),
            }
            .into());
        }
    }

    let mut report = KillReport::default();
    execute(player, room, monster, &mut report)?;
    Ok(report)
}

fn execute(
    player: &mut Player,
    room: &mut Room,
    monster: MonsterId,
    report: &mut KillReport,
) -> Result<(), CoreError> {
    let (kind, required, rounds, protected) = {
        let target = room.monster(monster).ok_or(TargetError::MonsterNotInRoom {
            monster,
            room: room.id(),
        })?;
        (
            target.kind(),
            target.required_weapon(),
            target.ammo_to_kill(),
            target.protector().is_some(),
        )
    };

    if protected {
        let chain = room.in_canonical_order(&room.protectors_of(monster));
        for protector in chain {
            if room.target_status(protector) == TargetStatus::Live {
                execute(player, room, protector, report)?;
            }
        }
    }

    let weapon = player
        .cheapest_weapon_for(required)
        .ok_or_else(|| CoreError::NoUsableWeapon {
            player: player.name().to_owned(),
            monster,
            required,
        })?;
    room.check_attack(monster, weapon, rounds)?;

    let exposure = room.total_exposure();
    let damage = i32::try_from(exposure)
        .ok()
        .and_then(i32::checked_neg)
        .ok_or_else(|| CoreError::ArithmeticOverflow {
            context: format!("exposure {exposure} in {}", room.id()),
        })?;
    player.change_health(damage)?;
    room.attack(monster, weapon, rounds)?;
    player.change_ammunition(weapon, i64::from(rounds).saturating_neg());
    room.monster_killed(monster)?;

    debug!(
        player = player.name(),
        %monster,
        %kind,
        %weapon,
        rounds,
        exposure,
        health = player.health(),
        "Kill applied"
    );
    report.kills.push(KillRecord {
        monster,
        kind,
        player: player.name().to_owned(),
        weapon,
        rounds,
        exposure,
        health_after: player.health(),
    });
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use doombot_types::{MonsterCatalog, MonsterProfile, RoomId};
    use doombot_world::{Monster, Rewards};

    use super::*;

    fn room(monsters: Vec<Monster>) -> Room {
        Room::new(RoomId(1), "hangar", monsters, Rewards::none())
            .unwrap()
    }

    fn armed(health: i32, loadout: &[(Weapon, u32)]) -> Player {
        let mut player = Player::new("ranger", health);
        for &(weapon, rounds) in loadout {
            let _ = player.add_weapon(weapon);
            let _ = player.change_ammunition(weapon, i64::from(rounds) - 5);
        }
        player
    }

    #[test]
    fn protector_dies_first_and_exposure_is_recomputed() {
        let catalog = MonsterCatalog::new()
            .with_profile(
                MonsterType::Imp,
                MonsterProfile::new(Weapon::Chainsaw, 2, 1, None).unwrap(),
            )
            .with_profile(
                MonsterType::Demon,
                MonsterProfile::new(Weapon::Pistol, 3, 2, Some(MonsterType::Imp)).unwrap(),
            );
        let mut r = room(vec![
            Monster::new(MonsterId(1), MonsterType::Imp, &catalog),
            Monster::new(MonsterId(2), MonsterType::Demon, &catalog),
        ]);
        let mut player = armed(10, &[(Weapon::Chainsaw, 5), (Weapon::Pistol, 5)]);

        let report = kill_monster(&mut player, &mut r, MonsterId(2))
            .unwrap();

        let order: Vec<MonsterId> = report.kills.iter().map(|k| k.monster).collect();
        assert_eq!(order, vec![MonsterId(1), MonsterId(2)]);
        assert_eq!(report.health_lost(), 5);
        assert_eq!(report.rounds_fired(Weapon::Chainsaw), 2);
        assert_eq!(report.rounds_fired(Weapon::Pistol), 3);
        assert_eq!(player.health(), 5);
        assert_eq!(player.rounds_for(Weapon::Chainsaw), 3);
        assert_eq!(player.rounds_for(Weapon::Pistol), 2);
        assert!(r.is_completed());
        assert_eq!(r.danger_level(), 0);
    }

    #[test]
    fn cheapest_adequate_weapon_is_used() {
        let catalog = MonsterCatalog::new();
        let mut r = room(vec![Monster::new(MonsterId(1), MonsterType::Imp, &catalog)]);
        let mut player = armed(10, &[(Weapon::Shotgun, 5)]);

        let report = kill_monster(&mut player, &mut r, MonsterId(1))
            .unwrap();
        assert_eq!(report.kills.first().map(|k| k.weapon), Some(Weapon::Fist));
        assert_eq!(player.rounds_for(Weapon::Shotgun), 5);
    }

    #[test]
    fn already_dead_protectors_are_skipped() {
        let catalog = MonsterCatalog::new();
        let mut r = room(vec![
            Monster::new(MonsterId(1), MonsterType::Cacodemon, &catalog),
            Monster::new(MonsterId(2), MonsterType::LostSoul, &catalog),
            Monster::new(MonsterId(3), MonsterType::LostSoul, &catalog),
        ]);
        let _ = r.monster_killed(MonsterId(2));
        let mut player = armed(50, &[(Weapon::Pistol, 10)]);

        let report = kill_monster(&mut player, &mut r, MonsterId(1))
            .unwrap();
        let order: Vec<MonsterId> = report.kills.iter().map(|k| k.monster).collect();
        assert_eq!(order, vec![MonsterId(3), MonsterId(1)]);
        assert_eq!(player.rounds_for(Weapon::Pistol), 5);
    }

    #[test]
    fn missing_weapon_is_an_error() {
        let catalog = MonsterCatalog::new();
        let mut r = room(vec![Monster::new(MonsterId(1), MonsterType::LostSoul, &catalog)]);
        let mut player = Player::new("ranger", 50);

        let result = kill_monster(&mut player, &mut r, MonsterId(1));
        assert!(matches!(result, Err(CoreError::NoUsableWeapon { .. })));
        assert_eq!(r.target_status(MonsterId(1)), TargetStatus::Live);
        assert_eq!(player.health(), 50);
    }

    #[test]
    fn failed_target_keeps_protector_kills_only() {
        let catalog = MonsterCatalog::new();
        let mut r = room(vec![
            Monster::new(MonsterId(1), MonsterType::Spectre, &catalog),
            Monster::new(MonsterId(2), MonsterType::Demon, &catalog),
        ]);
        let mut player = Player::new("ranger", 50);

        let result = kill_monster(&mut player, &mut r, MonsterId(1));
        assert!(matches!(
            result,
            Err(CoreError::NoUsableWeapon {
                required: Weapon::Chainsaw,
                ..
            })
        ));
        // The demon died for 3 exposure; the spectre cost nothing.
        assert_eq!(r.target_status(MonsterId(2)), TargetStatus::Dead);
        assert_eq!(r.target_status(MonsterId(1)), TargetStatus::Live);
        assert_eq!(player.health(), 47);
        assert_eq!(r.monster(MonsterId(1)).map(Monster::remaining_rounds), Some(2));
    }

    #[test]
    fn dead_target_is_rejected() {
        let catalog = MonsterCatalog::new();
        let mut r = room(vec![Monster::new(MonsterId(1), MonsterType::Imp, &catalog)]);
        let mut player = Player::new("ranger", 50);
        let _ = kill_monster(&mut player, &mut r, MonsterId(1));

        assert_eq!(
            kill_monster(&mut player, &mut r, MonsterId(1)),
            Err(CoreError::Target(TargetError::MonsterDead {
                monster: MonsterId(1),
                room: RoomId(1),
            }))
        );
        assert_eq!(player.health(), 49);
    }
}
