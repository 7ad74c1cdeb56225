//! Canonical monster ordering.
//!
//! Iteration over monsters always follows the order in which they have to
//! die: a protector comes before every monster it protects. Between
//! unrelated monsters the lower type tier goes first, then the lower ID.
//!
//! [`compare_monsters`] is the pairwise rule. It is not transitive across
//! mixed protector/tier comparisons, so sequences are produced by
//! [`canonical_order`], a protector-first topological sort that agrees with
//! the pairwise rule on every directly related pair.

use std::cmp::Ordering;

use crate::monster::Monster;

/// Pairwise canonical comparison of two monsters.
///
/// 1. Same instance: `Equal`.
/// 2. `a` is protected by `b`'s type: `Greater` (`a` after `b`).
/// 3. `b` is protected by `a`'s type: `Less`.
/// 4. Lower type tier first.
/// 5. Lower ID first.
pub fn compare_monsters(a: &Monster, b: &Monster) -> Ordering {
    if a.id() == b.id() {
        return Ordering::Equal;
    }
    if a.is_protected_by(b) {
        return Ordering::Greater;
    }
    if b.is_protected_by(a) {
        return Ordering::Less;
    }
    a.kind()
        .tier()
        .cmp(&b.kind().tier())
        .then_with(|| a.id().cmp(&b.id()))
}

/// Tier-then-ID key used to break ties between unrelated monsters.
fn tie_key(monster: &Monster) -> (u32, doombot_types::MonsterId) {
    (monster.kind().tier(), monster.id())
}

/// Arrange `monsters` so every protector precedes what it protects.
///
/// At each step the next monster is the lowest tier-then-ID monster that
/// is not waiting on a protector still in the remaining set. If only
/// blocked monsters remain (a protector cycle), the lowest tier-then-ID
/// monster is taken anyway so the sort always finishes.
pub fn canonical_order<'a, I>(monsters: I) -> Vec<&'a Monster>
where
    I: IntoIterator<Item = &'a Monster>,
{
    let mut remaining: Vec<&Monster> = monsters.into_iter().collect();
    remaining.sort_by_key(|m| tie_key(m));
    remaining.dedup_by_key(|m| m.id());

    let mut ordered = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let ready = remaining.iter().position(|candidate| {
            !remaining
                .iter()
                .any(|other| other.id() != candidate.id() && candidate.is_protected_by(other))
        });
        // `remaining` is sorted by tie key, so position 0 is the fallback.
        let next = ready.unwrap_or(0);
        ordered.push(remaining.remove(next));
    }
    ordered
}
