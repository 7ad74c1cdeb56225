//! Kill feasibility.
//!
//! Decides, without touching any state, whether a player can kill a target
//! monster together with every live protector standing in its way.
//!
//! The simulation walks the protector chain depth-first in canonical order.
//! Each simulated kill charges its rounds to a per-weapon ledger and costs
//! the exposure of every live monster not yet counted as killed. The first
//! monster the player cannot afford, cannot hurt, or cannot survive ends
//! the check with [`KillFeasibility::Infeasible`].

use std::collections::{BTreeMap, BTreeSet};

use doombot_agents::Player;
use doombot_types::{MonsterId, Weapon};
use doombot_world::{Room, TargetStatus};
use serde::Serialize;
use tracing::trace;

use crate::error::{CoreError, TargetError};

/// Why a kill was judged infeasible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InfeasibleReason {
    /// Entering the fight would kill the player outright.
    EntryFatal {
        /// The player's health.
        health: i32,
        /// Exposure of the first kill event in the room.
        exposure: u32,
    },
    /// A monster on the chain is not alive in the room.
    TargetGone,
    /// The player owns nothing strong enough for a monster on the chain.
    NoUsableWeapon {
        /// The monster's required weapon.
        required: Weapon,
    },
    /// The chain needs more rounds of one weapon than the player holds.
    OutOfAmmo {
        /// The weapon that ran dry.
        weapon: Weapon,
        /// Cumulative rounds the chain needs from it so far.
        needed: u64,
        /// Rounds the player holds.
        available: u32,
    },
    /// Health would run out partway through the chain.
    TooMuchExposure {
        /// Simulated health before this kill.
        health: i64,
        /// Exposure this kill would cost.
        exposure: u32,
    },
}

/// Outcome of a feasibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum KillFeasibility {
    /// The player can kill the target and its protectors.
    Feasible {
        /// Rounds the whole chain costs, per weapon.
        ammo: BTreeMap<Weapon, u64>,
        /// Health the whole chain costs.
        health_cost: i64,
        /// Kill order, target last.
        chain: Vec<MonsterId>,
    },
    /// The player cannot.
    Infeasible {
        /// The monster the check stopped at.
        blocker: MonsterId,
        /// What stopped it.
        reason: InfeasibleReason,
    },
}

impl KillFeasibility {
    /// Whether the verdict is [`KillFeasibility::Feasible`].
    pub const fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible { .. })
    }
}

/// Whether `player` can kill `monster` in `room`, with the full cost or the
/// first obstacle.
///
/// Neither the player nor the room is modified. Health is tracked in a
/// local counter for the duration of the check.
///
/// # Errors
///
/// Returns [`CoreError::Target`] if `monster` is not a live member of
/// `room`.
pub fn evaluate_kill(
    player: &Player,
    monster: MonsterId,
    room: &Room,
) -> Result<KillFeasibility, CoreError> {
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

    let exposure = room.total_exposure();
    if i64::from(player.health()) <= i64::from(exposure) {
        return Ok(KillFeasibility::Infeasible {
            blocker: monster,
            reason: InfeasibleReason::EntryFatal {
                health: player.health(),
                exposure,
            },
        });
    }

    let mut sim = Simulation::new(player, room);
    let verdict = match sim.resolve(monster) {
        Ok(()) => KillFeasibility::Feasible {
            health_cost: i64::from(player.health()).saturating_sub(sim.health),
            ammo: sim.ammo_spent,
            chain: sim.order,
        },
        Err(Blocked { blocker, reason }) => KillFeasibility::Infeasible { blocker, reason },
    };
    trace!(
        player = player.name(),
        %monster,
        room = %room.id(),
        feasible = verdict.is_feasible(),
        "Kill evaluated"
    );
    Ok(verdict)
}

/// Whether `player` can kill `monster` in `room`.
///
/// # Errors
///
/// Same as [`evaluate_kill`].
pub fn can_kill(player: &Player, monster: MonsterId, room: &Room) -> Result<bool, CoreError> {
    evaluate_kill(player, monster, room).map(|verdict| verdict.is_feasible())
}

struct Blocked {
    blocker: MonsterId,
    reason: InfeasibleReason,
}

enum Step {
    Pending,
    AlreadyResolved,
    Gone,
}

struct Simulation<'a> {
    player: &'a Player,
    room: &'a Room,
    ammo_spent: BTreeMap<Weapon, u64>,
    resolved: BTreeSet<MonsterId>,
    order: Vec<MonsterId>,
    health: i64,
}

impl<'a> Simulation<'a> {
    fn new(player: &'a Player, room: &'a Room) -> Self {
        Self {
            player,
            room,
            ammo_spent: BTreeMap::new(),
            resolved: BTreeSet::new(),
            order: Vec::new(),
            health: i64::from(player.health()),
        }
    }

    fn step(&self, id: MonsterId) -> Step {
        if self.room.target_status(id) != TargetStatus::Live {
            Step::Gone
        } else if self.resolved.contains(&id) {
            Step::AlreadyResolved
        } else {
            Step::Pending
        }
    }

    fn resolve(&mut self, id: MonsterId) -> Result<(), Blocked> {
        let room = self.room;
        let player = self.player;

        match self.step(id) {
            Step::Gone => {
                return Err(Blocked {
                    blocker: id,
                    reason: InfeasibleReason::TargetGone,
                });
            }
            Step::AlreadyResolved => return Ok(()),
            Step::Pending => {}
        }
        let Some(monster) = room.monster(id) else {
            return Err(Blocked {
                blocker: id,
                reason: InfeasibleReason::TargetGone,
            });
        };

        let required = monster.required_weapon();
        let weapon = player.cheapest_weapon_for(required).ok_or(Blocked {
            blocker: id,
            reason: InfeasibleReason::NoUsableWeapon { required },
        })?;

        if monster.protector().is_some() {
            let mut pending = room.protectors_of(id);
            pending.retain(|p| !self.resolved.contains(p));
            for protector in room.in_canonical_order(&pending) {
                self.resolve(protector)?;
            }
        }

        let spent = self.ammo_spent.entry(weapon).or_insert(0);
        *spent = spent.saturating_add(u64::from(monster.ammo_to_kill()));
        let needed = *spent;
        if !player.ammo().covers(weapon, needed) {
            return Err(Blocked {
                blocker: id,
                reason: InfeasibleReason::OutOfAmmo {
                    weapon,
                    needed,
                    available: player.rounds_for(weapon),
                },
            });
        }

        let exposure = room.exposure_excluding(&self.resolved);
        if self.health < i64::from(exposure) {
            return Err(Blocked {
                blocker: id,
                reason: InfeasibleReason::TooMuchExposure {
                    health: self.health,
                    exposure,
                },
            });
        }
        self.health = self.health.saturating_sub(i64::from(exposure));
        self.resolved.insert(id);
        self.order.push(id);
        Ok(())
    }
}
