//! Canonical player ordering.
//!
//! Players are ranked weakest first so the bot spends its least valuable
//! player on each attempt: by top weapon, then rounds held for that weapon,
//! then health. Players equal on all three share a rank, and callers keep
//! their roster order among them.

use std::cmp::Ordering;

use doombot_types::Weapon;

use crate::player::Player;

/// Ranking key: (top weapon, rounds for it, health).
pub fn rank_key(player: &Player) -> (Weapon, u32, i32) {
    let top = player.top_weapon();
    (top, player.rounds_for(top), player.health())
}

/// Compare two players by [`rank_key`]. `Greater` means stronger.
pub fn compare_players(a: &Player, b: &Player) -> Ordering {
    rank_key(a).cmp(&rank_key(b))
}

/// Sort players weakest first. Ties keep their existing relative order.
pub fn sort_players(players: &mut [&Player]) {
    players.sort_by(|a, b| compare_players(a, b));
}
