//! Rooms: a fixed set of monsters plus the reward for clearing them.
//!
//! Membership never changes after construction. The live and dead sets
//! partition the membership and move in one direction only, through
//! [`Room::monster_killed`], which also lowers the danger level by the
//! victim's `tier + 1`. A room is completed once nothing is left alive.

use std::collections::{BTreeMap, BTreeSet};

use doombot_types::{MonsterId, RoomId, Weapon};
use serde::Serialize;
use tracing::debug;

use crate::error::WorldError;
use crate::monster::Monster;
use crate::ordering::canonical_order;
use crate::protectors;
use crate::rewards::Rewards;

/// Where a monster stands relative to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetStatus {
    /// In the room and alive: a valid target.
    Live,
    /// In the room but already dead: nothing left to do.
    Dead,
    /// Not a member of the room.
    Absent,
}

/// A room and its monsters.
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    id: RoomId,
    name: String,
    monsters: BTreeMap<MonsterId, Monster>,
    live: BTreeSet<MonsterId>,
    dead: BTreeSet<MonsterId>,
    danger_level: u32,
    rewards: Rewards,
}

impl Room {
    /// Build a room from its monsters and completion rewards.
    ///
    /// # Errors
    ///
    /// - [`WorldError::DuplicateMonster`] if two monsters share an ID.
    /// - [`WorldError::ProtectorCycle`] if the protector relationships
    ///   between the room's monsters loop back on themselves.
    pub fn new(
        id: RoomId,
        name: impl Into<String>,
        monsters: Vec<Monster>,
        rewards: Rewards,
    ) -> Result<Self, WorldError> {
        let mut by_id = BTreeMap::new();
        let mut live = BTreeSet::new();
        let mut dead = BTreeSet::new();
        let mut danger_level: u32 = 0;

        for monster in monsters {
            let monster_id = monster.id();
            if by_id.contains_key(&monster_id) {
                return Err(WorldError::DuplicateMonster {
                    monster: monster_id,
                    room: id,
                });
            }
            if monster.is_dead() {
                dead.insert(monster_id);
            } else {
                danger_level = danger_level.saturating_add(monster.kind().danger());
                live.insert(monster_id);
            }
            by_id.insert(monster_id, monster);
        }

        if let Some(monster) = protectors::find_cycle(by_id.values()) {
            return Err(WorldError::ProtectorCycle { room: id, monster });
        }

        Ok(Self {
            id,
            name: name.into(),
            monsters: by_id,
            live,
            dead,
            danger_level,
            rewards,
        })
    }

    /// The room's ID.
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// The room's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reward for the player who completes the room.
    pub const fn rewards(&self) -> &Rewards {
        &self.rewards
    }

    /// Sum of `tier + 1` over the live monsters.
    pub const fn danger_level(&self) -> u32 {
        self.danger_level
    }

    /// Whether every monster in the room is dead.
    pub fn is_completed(&self) -> bool {
        self.live.is_empty()
    }

    /// Look up a member monster.
    pub fn monster(&self, monster: MonsterId) -> Option<&Monster> {
        self.monsters.get(&monster)
    }

    /// Classify `monster` as a live target, a corpse, or a stranger.
    pub fn target_status(&self, monster: MonsterId) -> TargetStatus {
        if self.live.contains(&monster) {
            TargetStatus::Live
        } else if self.dead.contains(&monster) {
            TargetStatus::Dead
        } else {
            TargetStatus::Absent
        }
    }

    /// Every member monster, by ID.
    pub fn monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.values()
    }

    /// IDs of the live monsters.
    pub const fn live_ids(&self) -> &BTreeSet<MonsterId> {
        &self.live
    }

    /// Live monsters, by ID.
    pub fn live_monsters(&self) -> impl Iterator<Item = &Monster> {
        self.live.iter().filter_map(|id| self.monsters.get(id))
    }

    /// Dead monsters, by ID.
    pub fn dead_monsters(&self) -> impl Iterator<Item = &Monster> {
        self.dead.iter().filter_map(|id| self.monsters.get(id))
    }

    /// Live monster IDs in canonical (kill) order.
    pub fn live_in_canonical_order(&self) -> Vec<MonsterId> {
        canonical_order(self.live_monsters())
            .into_iter()
            .map(Monster::id)
            .collect()
    }

    /// Arrange member IDs in canonical order. Unknown IDs are dropped.
    pub fn in_canonical_order(&self, ids: &BTreeSet<MonsterId>) -> Vec<MonsterId> {
        canonical_order(ids.iter().filter_map(|id| self.monsters.get(id)))
            .into_iter()
            .map(Monster::id)
            .collect()
    }

    /// Health a player loses from one kill event in this room right now:
    /// the exposure damage of every live monster.
    pub fn total_exposure(&self) -> u32 {
        self.live_monsters()
            .fold(0_u32, |acc, m| acc.saturating_add(m.exposure_damage()))
    }

    /// Exposure from live monsters not in `excluded`.
    pub fn exposure_excluding(&self, excluded: &BTreeSet<MonsterId>) -> u32 {
        self.live_monsters()
            .filter(|m| !excluded.contains(&m.id()))
            .fold(0_u32, |acc, m| acc.saturating_add(m.exposure_damage()))
    }

    /// Transitive set of live protectors of `monster` (see
    /// [`protectors::protectors_of`]).
    pub fn protectors_of(&self, monster: MonsterId) -> BTreeSet<MonsterId> {
        protectors::protectors_of(self, monster)
    }

    /// Fire `rounds` of `weapon` at a member monster.
    ///
    /// Only the monster changes; call [`Room::monster_killed`] to record a
    /// kill in the room.
    ///
    /// # Errors
    ///
    /// [`WorldError::MonsterNotInRoom`] for a non-member, otherwise whatever
    /// [`Monster::attack`] reports.
    pub fn attack(
        &mut self,
        monster: MonsterId,
        weapon: Weapon,
        rounds: u32,
    ) -> Result<bool, WorldError> {
        let room = self.id;
        self.monsters
            .get_mut(&monster)
            .ok_or(WorldError::MonsterNotInRoom { monster, room })?
            .attack(weapon, rounds)
    }

    /// Check that [`Room::attack`] would accept this attack, without firing.
    ///
    /// # Errors
    ///
    /// The same errors as [`Room::attack`].
    pub fn check_attack(
        &self,
        monster: MonsterId,
        weapon: Weapon,
        rounds: u32,
    ) -> Result<(), WorldError> {
        self.monsters
            .get(&monster)
            .ok_or(WorldError::MonsterNotInRoom {
                monster,
                room: self.id,
            })?
            .check_attack(weapon, rounds)
    }

    /// Record that `monster` died: move it from live to dead and lower the
    /// danger level by its `tier + 1`.
    ///
    /// # Errors
    ///
    /// - [`WorldError::MonsterNotInRoom`] for a non-member.
    /// - [`WorldError::MonsterAlreadyDead`] if the kill was already recorded.
    pub fn monster_killed(&mut self, monster: MonsterId) -> Result<(), WorldError> {
        let room = self.id;
        let entry = self
            .monsters
            .get_mut(&monster)
            .ok_or(WorldError::MonsterNotInRoom { monster, room })?;
        if !self.live.remove(&monster) {
            return Err(WorldError::MonsterAlreadyDead(monster));
        }
        entry.mark_dead();
        self.dead.insert(monster);
        self.danger_level = self.danger_level.saturating_sub(entry.kind().danger());

        debug!(
            room = %self.id,
            %monster,
            kind = %entry.kind(),
            danger = self.danger_level,
            live = self.live.len(),
            "Monster killed"
        );
        Ok(())
    }
}
