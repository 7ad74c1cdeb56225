//! The game bot: rooms, players, and one pass through the rooms.
//!
//! A pass visits every incomplete room from least to most dangerous. In
//! each room it walks the live monsters in canonical order, and for each
//! one offers the kill to the live players weakest first. The first player
//! who can kill the monster (protectors included) does so. Whoever kills a
//! room's last monster collects its rewards.
//!
//! A pass never fails. Rejected probes are logged at `debug`, execution
//! and reward failures at `warn`, and the pass moves on.

use std::collections::BTreeSet;

use doombot_agents::{Player, RewardReceipt, collect_rewards, compare_players, sort_players};
use doombot_types::{MonsterId, RoomId, Weapon};
use doombot_world::{Room, TargetStatus};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::execution::{self, KillRecord};
use crate::feasibility::{self, KillFeasibility};

/// Rewards handed out when a room was completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardGrant {
    /// The completed room.
    pub room: RoomId,
    /// The player who completed it.
    pub player: String,
    /// What the player received.
    pub receipt: RewardReceipt,
}

/// Summary of a single pass through the rooms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    /// The pass number, starting at 1.
    pub pass: u32,
    /// Rooms completed during this pass, in completion order.
    pub rooms_completed: Vec<RoomId>,
    /// Every kill applied during this pass, in order.
    pub kills: Vec<KillRecord>,
    /// Completion rewards successfully collected.
    pub rewards: Vec<RewardGrant>,
    /// Incomplete rooms at the end of the pass.
    pub rooms_left: usize,
    /// Live players at the end of the pass.
    pub players_alive: usize,
}

/// The bot that sends players through rooms.
#[derive(Debug, Clone)]
pub struct GameBot {
    rooms: Vec<Room>,
    players: Vec<Player>,
    completed: BTreeSet<RoomId>,
    passes: u32,
}

impl GameBot {
    /// Create a bot over `rooms` and `players`.
    ///
    /// Rooms with no live monsters count as completed from the start.
    ///
    /// # Errors
    ///
    /// - [`CoreError::DuplicateRoom`] if two rooms share an ID.
    /// - [`CoreError::DuplicatePlayer`] if two players share a name.
    pub fn new(rooms: Vec<Room>, players: Vec<Player>) -> Result<Self, CoreError> {
        let mut room_ids = BTreeSet::new();
        for room in &rooms {
            if !room_ids.insert(room.id()) {
                return Err(CoreError::DuplicateRoom(room.id()));
            }
        }
        let mut names = BTreeSet::new();
        for player in &players {
            if !names.insert(player.name()) {
                return Err(CoreError::DuplicatePlayer(player.name().to_owned()));
            }
        }

        let completed = rooms
            .iter()
            .filter(|r| r.is_completed())
            .map(Room::id)
            .collect();
        Ok(Self {
            rooms,
            players,
            completed,
            passes: 0,
        })
    }

    /// Every room, least dangerous first, ties by ID.
    pub fn all_rooms(&self) -> Vec<&Room> {
        let mut rooms: Vec<&Room> = self.rooms.iter().collect();
        rooms.sort_by_key(|r| (r.danger_level(), r.id()));
        rooms
    }

    /// Look up a room by ID.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id() == id)
    }

    /// Completed rooms, least dangerous first, ties by ID.
    pub fn completed_rooms(&self) -> Vec<&Room> {
        self.all_rooms()
            .into_iter()
            .filter(|r| self.completed.contains(&r.id()))
            .collect()
    }

    /// IDs of the completed rooms.
    pub const fn completed_room_ids(&self) -> &BTreeSet<RoomId> {
        &self.completed
    }

    /// Number of rooms not yet completed.
    pub fn rooms_left(&self) -> usize {
        self.rooms.len().saturating_sub(self.completed.len())
    }

    /// Every player in roster order, dead or alive.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by name.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    /// Live players, weakest first.
    pub fn live_players(&self) -> Vec<&Player> {
        let mut live: Vec<&Player> = self.players.iter().filter(|p| !p.is_dead()).collect();
        sort_players(&mut live);
        live
    }

    /// Live players who own `weapon` and hold exactly `rounds` for it,
    /// weakest first.
    pub fn live_players_with_weapon_and_ammo(
        &self,
        weapon: Weapon,
        rounds: u32,
    ) -> Vec<&Player> {
        self.live_players()
            .into_iter()
            .filter(|p| p.has_weapon(weapon) && p.rounds_for(weapon) == rounds)
            .collect()
    }

    /// Number of passes run so far.
    pub const fn passes(&self) -> u32 {
        self.passes
    }

    /// Run one pass through every incomplete room.
    pub fn pass_through_rooms(&mut self) -> PassSummary {
        self.passes = self.passes.saturating_add(1);
        let mut summary = PassSummary {
            pass: self.passes,
            ..PassSummary::default()
        };

        let pending = self.pending_rooms();
        info!(
            pass = summary.pass,
            rooms = pending.len(),
            players = self.live_players().len(),
            "Pass started"
        );

        for room_index in pending {
            let Some(room) = self.rooms.get(room_index) else {
                continue;
            };
            for monster in room.live_in_canonical_order() {
                let room_done = self
                    .rooms
                    .get(room_index)
                    .is_none_or(Room::is_completed);
                if room_done {
                    break;
                }
                self.attempt_monster(room_index, monster, &mut summary);
            }
        }

        summary.rooms_left = self.rooms_left();
        summary.players_alive = self.live_players().len();
        info!(
            pass = summary.pass,
            kills = summary.kills.len(),
            completed = summary.rooms_completed.len(),
            rooms_left = summary.rooms_left,
            players_alive = summary.players_alive,
            "Pass finished"
        );
        summary
    }

    /// Indices of the incomplete rooms, least dangerous first.
    fn pending_rooms(&self) -> Vec<usize> {
        let mut pending: Vec<(usize, &Room)> = self
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| !self.completed.contains(&r.id()))
            .collect();
        pending.sort_by_key(|(_, r)| (r.danger_level(), r.id()));
        pending.into_iter().map(|(index, _)| index).collect()
    }

    /// Indices of the live players, weakest first.
    fn attack_order(&self) -> Vec<usize> {
        let mut live: Vec<(usize, &Player)> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_dead())
            .collect();
        live.sort_by(|a, b| compare_players(a.1, b.1));
        live.into_iter().map(|(index, _)| index).collect()
    }

    /// Offer `monster` to each live player until one kills it.
    fn attempt_monster(&mut self, room_index: usize, monster: MonsterId, summary: &mut PassSummary) {
        let pass = summary.pass;
        for player_index in self.attack_order() {
            let (Some(player), Some(room)) =
                (self.players.get(player_index), self.rooms.get(room_index))
            else {
                return;
            };
            if room.target_status(monster) != TargetStatus::Live {
                return;
            }
            if player.is_dead() {
                continue;
            }

            match feasibility::evaluate_kill(player, monster, room) {
                Ok(KillFeasibility::Feasible { .. }) => {}
                Ok(KillFeasibility::Infeasible { blocker, reason }) => {
                    debug!(
                        pass,
                        player = player.name(),
                        %monster,
                        %blocker,
                        ?reason,
                        "Kill infeasible"
                    );
                    continue;
                }
                Err(err) => {
                    debug!(pass, %monster, %err, "Target skipped");
                    return;
                }
            }

            let (Some(player), Some(room)) =
                (self.players.get_mut(player_index), self.rooms.get_mut(room_index))
            else {
                return;
            };
            match execution::kill_monster(player, room, monster) {
                Ok(report) => summary.kills.extend(report.kills),
                Err(err) => {
                    warn!(pass, player = player.name(), %monster, %err, "Kill execution failed");
                    continue;
                }
            }

            if room.is_completed() {
                let room_id = room.id();
                self.completed.insert(room_id);
                summary.rooms_completed.push(room_id);
                info!(
                    pass,
                    room = %room_id,
                    name = room.name(),
                    player = player.name(),
                    "Room completed"
                );
                match collect_rewards(player, room.rewards()) {
                    Ok(receipt) => summary.rewards.push(RewardGrant {
                        room: room_id,
                        player: player.name().to_owned(),
                        receipt,
                    }),
                    Err(err) => {
                        warn!(pass, room = %room_id, player = player.name(), %err, "Reward collection failed");
                    }
                }
            }
            return;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use doombot_types::{MonsterCatalog, MonsterType};
    use doombot_world::{Monster, Rewards};

    use super::*;

    fn room(id: u32, monsters: &[(u32, MonsterType)], rewards: Rewards) -> Room {
        let catalog = MonsterCatalog::new();
        let monsters = monsters
            .iter()
            .map(|&(mid, kind)| Monster::new(MonsterId(mid), kind, &catalog))
            .collect();
        Room::new(RoomId(id), format!("room-{id}"), monsters, rewards)
            .unwrap()
    }

    fn bot(rooms: Vec<Room>, players: Vec<Player>) -> GameBot {
        GameBot::new(rooms, players).unwrap()
    }

    #[test]
    fn duplicates_are_rejected() {
        let rooms = vec![
            room(1, &[(1, MonsterType::Imp)], Rewards::none()),
            room(1, &[(2, MonsterType::Imp)], Rewards::none()),
        ];
        assert_eq!(
            GameBot::new(rooms, Vec::new()).map(|_| ()),
            Err(CoreError::DuplicateRoom(RoomId(1)))
        );

        let players = vec![Player::new("ranger", 10), Player::new("ranger", 20)];
        assert_eq!(
            GameBot::new(Vec::new(), players).map(|_| ()),
            Err(CoreError::DuplicatePlayer("ranger".to_owned()))
        );
    }

    #[test]
    fn empty_room_starts_completed() {
        let b = bot(vec![room(1, &[], Rewards::none())], Vec::new());
        assert_eq!(b.rooms_left(), 0);
        assert_eq!(b.completed_rooms().len(), 1);
    }

    #[test]
    fn rooms_are_listed_by_danger_then_id() {
        let b = bot(
            vec![
                room(1, &[(1, MonsterType::BaronOfHell)], Rewards::none()),
                room(2, &[(2, MonsterType::Imp)], Rewards::none()),
                room(3, &[(3, MonsterType::Imp)], Rewards::none()),
            ],
            Vec::new(),
        );
        let ids: Vec<RoomId> = b.all_rooms().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![RoomId(2), RoomId(3), RoomId(1)]);
    }

    #[test]
    fn weakest_capable_player_takes_the_kill() {
        let mut strong = Player::new("veteran", 100);
        let _ = strong.add_weapon(Weapon::Shotgun);
        let weak = Player::new("rookie", 100);
        let mut b = bot(
            vec![room(1, &[(1, MonsterType::Imp)], Rewards::none())],
            vec![strong, weak],
        );

        let summary = b.pass_through_rooms();
        assert_eq!(summary.kills.len(), 1);
        assert_eq!(summary.kills.first().map(|k| k.player.as_str()), Some("rookie"));
        assert_eq!(summary.rooms_completed, vec![RoomId(1)]);
        assert_eq!(b.player("rookie").map(Player::health), Some(99));
        assert_eq!(b.player("veteran").map(Player::health), Some(100));
    }

    #[test]
    fn stronger_player_steps_in_when_weaker_cannot() {
        let mut gunner = Player::new("gunner", 100);
        let _ = gunner.add_weapon(Weapon::Pistol);
        let brawler = Player::new("brawler", 100);
        let mut b = bot(
            vec![room(1, &[(1, MonsterType::LostSoul)], Rewards::none())],
            vec![gunner, brawler],
        );

        let summary = b.pass_through_rooms();
        assert_eq!(summary.kills.first().map(|k| k.player.as_str()), Some("gunner"));
        assert_eq!(b.player("gunner").map(|p| p.rounds_for(Weapon::Pistol)), Some(4));
    }

    #[test]
    fn finisher_collects_rewards() {
        let rewards = Rewards::none()
            .weapon(Weapon::Pistol)
            .ammo(Weapon::Pistol, 3)
            .health(7);
        let mut b = bot(
            vec![room(1, &[(1, MonsterType::Imp)], rewards)],
            vec![Player::new("ranger", 10)],
        );

        let summary = b.pass_through_rooms();
        assert_eq!(summary.rewards.len(), 1);
        let ranger = b.player("ranger");
        assert_eq!(ranger.map(Player::health), Some(16));
        assert_eq!(ranger.map(|p| p.rounds_for(Weapon::Pistol)), Some(8));
        assert_eq!(
            b.live_players_with_weapon_and_ammo(Weapon::Pistol, 8).len(),
            1
        );
        assert!(
            b.live_players_with_weapon_and_ammo(Weapon::Pistol, 5)
                .is_empty()
        );
    }

    #[test]
    fn lethal_reward_is_logged_not_fatal_to_the_pass() {
        let mut b = bot(
            vec![
                room(
                    1,
                    &[(1, MonsterType::Imp)],
                    Rewards::none().health(-20).weapon(Weapon::Pistol),
                ),
                room(2, &[(2, MonsterType::Demon)], Rewards::none()),
            ],
            vec![Player::new("ranger", 10)],
        );

        let summary = b.pass_through_rooms();
        assert_eq!(summary.rooms_completed, vec![RoomId(1)]);
        assert!(summary.rewards.is_empty());
        assert_eq!(summary.players_alive, 0);
        assert_eq!(summary.rooms_left, 1);
    }

    #[test]
    fn rooms_completed_in_a_pass_are_not_revisited() {
        let mut b = bot(
            vec![room(1, &[(1, MonsterType::Imp)], Rewards::none())],
            vec![Player::new("ranger", 10)],
        );
        let first = b.pass_through_rooms();
        let second = b.pass_through_rooms();
        assert_eq!(first.kills.len(), 1);
        assert!(second.kills.is_empty());
        assert_eq!(b.passes(), 2);
        assert_eq!(b.player("ranger").map(Player::health), Some(9));
    }
}
