//! Game loop: repeated passes until every room is done or progress stops.
//!
//! [`run_game`] always runs at least one pass. After each pass it stops if
//! no incomplete rooms remain, or if the pass failed to lower the number of
//! incomplete rooms. Passes are independent of one another apart from the
//! state they leave behind, so a pass that completes nothing proves the
//! next one would not either.

use std::collections::BTreeMap;

use doombot_agents::Player;
use doombot_types::{RoomId, Weapon};
use serde::Serialize;
use tracing::{info, warn};

use crate::bot::{GameBot, PassSummary};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// Every room was completed.
    Cleared,
    /// A pass completed no further rooms.
    Stuck,
}

/// A player's state at the end of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStanding {
    /// The player's name.
    pub name: String,
    /// Final health.
    pub health: i32,
    /// Whether the player survived.
    pub alive: bool,
    /// Owned weapons, lowest tier first.
    pub weapons: Vec<Weapon>,
    /// Rounds held per limited weapon.
    pub ammo: BTreeMap<Weapon, u32>,
}

impl From<&Player> for PlayerStanding {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name().to_owned(),
            health: player.health(),
            alive: !player.is_dead(),
            weapons: player.weapons().iter().copied().collect(),
            ammo: player.ammo().iter().collect(),
        }
    }
}

/// Result of a full game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    /// How the game ended.
    pub outcome: GameOutcome,
    /// Total passes run.
    pub passes: u32,
    /// One summary per pass, in order.
    pub summaries: Vec<PassSummary>,
    /// Completed rooms, least dangerous first.
    pub completed_rooms: Vec<RoomId>,
    /// Rooms still holding live monsters, least dangerous first.
    pub incomplete_rooms: Vec<RoomId>,
    /// Every player in roster order.
    pub players: Vec<PlayerStanding>,
}

impl GameReport {
    /// Whether every room was completed.
    pub fn is_cleared(&self) -> bool {
        self.outcome == GameOutcome::Cleared
    }
}

/// Callback invoked after each pass completes.
pub trait PassCallback {
    /// Called after a pass completes.
    fn on_pass(&mut self, summary: &PassSummary, bot: &GameBot);
}

/// A no-op pass callback.
pub struct NoOpCallback;

impl PassCallback for NoOpCallback {
    fn on_pass(&mut self, _summary: &PassSummary, _bot: &GameBot) {}
}

/// Run passes until the game is cleared or stuck.
pub fn run_game(bot: &mut GameBot, callback: &mut dyn PassCallback) -> GameReport {
    let mut remaining = bot.rooms_left();
    let mut summaries = Vec::new();

    info!(
        rooms = bot.all_rooms().len(),
        players = bot.players().len(),
        remaining,
        "Game starting"
    );

    let outcome = loop {
        let before = remaining;
        let summary = bot.pass_through_rooms();
        remaining = summary.rooms_left;
        callback.on_pass(&summary, bot);
        let pass = summary.pass;
        summaries.push(summary);

        if remaining == 0 {
            info!(pass, "All rooms completed");
            break GameOutcome::Cleared;
        }
        if remaining >= before {
            info!(pass, remaining, "No room completed, giving up");
            break GameOutcome::Stuck;
        }
    };

    let (completed_rooms, incomplete_rooms): (Vec<RoomId>, Vec<RoomId>) = bot
        .all_rooms()
        .into_iter()
        .map(|r| r.id())
        .partition(|id| bot.completed_room_ids().contains(id));

    GameReport {
        outcome,
        passes: bot.passes(),
        summaries,
        completed_rooms,
        incomplete_rooms,
        players: bot.players().iter().map(PlayerStanding::from).collect(),
    }
}

/// Log the end of a game.
pub fn log_game_end(report: &GameReport) {
    info!(
        outcome = ?report.outcome,
        passes = report.passes,
        completed = report.completed_rooms.len(),
        incomplete = report.incomplete_rooms.len(),
        survivors = report.players.iter().filter(|p| p.alive).count(),
        "Game ended"
    );
    if !report.is_cleared() {
        warn!(rooms = ?report.incomplete_rooms, "Rooms left incomplete");
    }
}

impl GameBot {
    /// Play until cleared or stuck, with no per-pass callback.
    pub fn run(&mut self) -> GameReport {
        run_game(self, &mut NoOpCallback)
    }

    /// Play until cleared or stuck. Returns whether every room was
    /// completed.
    pub fn play(&mut self) -> bool {
        self.run().is_cleared()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use doombot_types::{MonsterCatalog, MonsterId, MonsterType};
    use doombot_world::{Monster, Room, Rewards};

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

    struct Recorder(Vec<u32>);

    impl PassCallback for Recorder {
        fn on_pass(&mut self, summary: &PassSummary, _bot: &GameBot) {
            self.0.push(summary.pass);
        }
    }

    #[test]
    fn no_rooms_still_runs_one_pass() {
        let mut bot = GameBot::new(Vec::new(), Vec::new())
            .unwrap();
        let report = bot.run();
        assert_eq!(report.outcome, GameOutcome::Cleared);
        assert_eq!(report.passes, 1);
    }

    #[test]
    fn no_players_is_stuck_after_one_pass() {
        let mut bot = GameBot::new(
            vec![room(1, &[(1, MonsterType::Imp)], Rewards::none())],
            Vec::new(),
        )
        .unwrap();
        let mut recorder = Recorder(Vec::new());
        let report = run_game(&mut bot, &mut recorder);
        assert_eq!(report.outcome, GameOutcome::Stuck);
        assert_eq!(recorder.0, vec![1]);
        assert_eq!(report.incomplete_rooms, vec![RoomId(1)]);
    }

    #[test]
    fn reward_unlocks_a_room_on_a_later_pass() {
        // The lost soul needs a pistol, which only the imp room hands out.
        // Five imps outweigh one lost soul, so the locked room is visited
        // first and has to wait for the second pass.
        let imps: Vec<(u32, MonsterType)> = (1..=5).map(|id| (id, MonsterType::Imp)).collect();
        let mut bot = GameBot::new(
            vec![
                room(1, &imps, Rewards::none().weapon(Weapon::Pistol)),
                room(2, &[(6, MonsterType::LostSoul)], Rewards::none()),
            ],
            vec![Player::new("ranger", 100)],
        )
        .unwrap();

        let mut recorder = Recorder(Vec::new());
        let report = run_game(&mut bot, &mut recorder);
        assert_eq!(report.outcome, GameOutcome::Cleared);
        assert_eq!(recorder.0, vec![1, 2]);
        assert_eq!(
            report.summaries.first().map(|s| s.rooms_completed.clone()),
            Some(vec![RoomId(1)])
        );
        assert_eq!(
            report.summaries.get(1).map(|s| s.rooms_completed.clone()),
            Some(vec![RoomId(2)])
        );
    }

    #[test]
    fn play_reports_clearance() {
        let mut bot = GameBot::new(
            vec![room(1, &[(1, MonsterType::Imp)], Rewards::none())],
            vec![Player::new("ranger", 10)],
        )
        .unwrap();
        assert!(bot.play());
        assert_eq!(bot.completed_room_ids().len(), 1);
    }

    #[test]
    fn standings_cover_every_player() {
        let mut bot = GameBot::new(
            vec![room(1, &[(1, MonsterType::Imp)], Rewards::none())],
            vec![Player::new("ranger", 10), Player::new("ghost", -1)],
        )
        .unwrap();
        let report = bot.run();
        let alive: Vec<(&str, bool)> = report
            .players
            .iter()
            .map(|p| (p.name.as_str(), p.alive))
            .collect();
        assert_eq!(alive, vec![("ranger", true), ("ghost", false)]);
    }
}
