//! Protector-chain resolution.
//!
//! A monster whose protector is type `T` cannot be killed while any monster
//! of type `T` is alive in the same room, and those protectors may have
//! protectors of their own. Chains are scoped to one room and only live
//! monsters count.

use std::collections::BTreeSet;

use doombot_types::MonsterId;

use crate::monster::Monster;
use crate::room::Room;

/// Every live monster in `room` that must die before `target` can: the live
/// monsters of `target`'s protector type, their live protectors, and so on.
///
/// `target` itself is never included. Unknown targets and unprotected
/// monsters have an empty chain. The walk uses a visited set, so it ends
/// even if the room's relationships were to loop.
pub fn protectors_of(room: &Room, target: MonsterId) -> BTreeSet<MonsterId> {
    let mut found = BTreeSet::new();
    let Some(start) = room.monster(target) else {
        return found;
    };

    let mut worklist = vec![start];
    while let Some(current) = worklist.pop() {
        let Some(protector) = current.protector() else {
            continue;
        };
        for candidate in room.live_monsters() {
            if candidate.kind() == protector
                && candidate.id() != target
                && found.insert(candidate.id())
            {
                worklist.push(candidate);
            }
        }
    }
    found
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    InProgress,
    Done,
}

/// Find a monster that sits on a protector cycle, if any.
///
/// Edges run from each monster to every other monster of its protector
/// type. Returns the first monster found to close a loop.
pub(crate) fn find_cycle<'a, I>(monsters: I) -> Option<MonsterId>
where
    I: IntoIterator<Item = &'a Monster>,
{
    let monsters: Vec<&Monster> = monsters.into_iter().collect();
    let guards: Vec<Vec<usize>> = monsters
        .iter()
        .map(|m| {
            monsters
                .iter()
                .enumerate()
                .filter(|(_, other)| other.id() != m.id() && m.is_protected_by(other))
                .map(|(index, _)| index)
                .collect()
        })
        .collect();

    let mut visit = vec![Visit::Unseen; monsters.len()];
    for root in 0..monsters.len() {
        if visit.get(root) != Some(&Visit::Unseen) {
            continue;
        }
        set_visit(&mut visit, root, Visit::InProgress);
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(&(node, cursor)) = stack.last() {
            let next = guards.get(node).and_then(|g| g.get(cursor)).copied();
            let Some(child) = next else {
                set_visit(&mut visit, node, Visit::Done);
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 = cursor.saturating_add(1);
            }
            match visit.get(child) {
                Some(Visit::InProgress) => return monsters.get(child).map(|m| m.id()),
                Some(Visit::Unseen) => {
                    set_visit(&mut visit, child, Visit::InProgress);
                    stack.push((child, 0));
                }
                _ => {}
            }
        }
    }
    None
}

fn set_visit(visit: &mut [Visit], index: usize, state: Visit) {
    if let Some(slot) = visit.get_mut(index) {
        *slot = state;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use doombot_types::{MonsterCatalog, MonsterType, RoomId};

    use super::*;
    use crate::rewards::Rewards;

    fn monster(id: u32, kind: MonsterType) -> Monster {
        Monster::new(MonsterId(id), kind, &MonsterCatalog::new())
    }

    fn guarded(id: u32, kind: MonsterType, protector: Option<MonsterType>) -> Monster {
        Monster::with_protector(MonsterId(id), kind, protector, &MonsterCatalog::new())
    }

    fn room(monsters: Vec<Monster>) -> Room {
        Room::new(RoomId(1), "pit", monsters, Rewards::none())
            .unwrap()
    }

    fn set(ids: &[u32]) -> BTreeSet<MonsterId> {
        ids.iter().copied().map(MonsterId).collect()
    }

    #[test]
    fn unprotected_monster_has_empty_chain() {
        let r = room(vec![monster(1, MonsterType::Imp), monster(2, MonsterType::Demon)]);
        assert!(protectors_of(&r, MonsterId(1)).is_empty());
    }

    #[test]
    fn direct_protectors_of_every_instance_are_found() {
        let r = room(vec![
            monster(1, MonsterType::Cacodemon),
            monster(2, MonsterType::LostSoul),
            monster(3, MonsterType::LostSoul),
            monster(4, MonsterType::Imp),
        ]);
        assert_eq!(protectors_of(&r, MonsterId(1)), set(&[2, 3]));
    }

    #[test]
    fn chain_is_transitive() {
        let r = room(vec![
            monster(1, MonsterType::BaronOfHell),
            monster(2, MonsterType::HellKnight),
            monster(3, MonsterType::Cacodemon),
            monster(4, MonsterType::LostSoul),
        ]);
        assert_eq!(protectors_of(&r, MonsterId(1)), set(&[2, 3, 4]));
        assert_eq!(protectors_of(&r, MonsterId(3)), set(&[4]));
    }

    #[test]
    fn dead_protectors_are_ignored() {
        let mut r = room(vec![
            monster(1, MonsterType::BaronOfHell),
            monster(2, MonsterType::HellKnight),
            monster(3, MonsterType::Cacodemon),
        ]);
        let _ = r.monster_killed(MonsterId(2));
        // The knight is dead, so the chain stops there.
        assert!(protectors_of(&r, MonsterId(1)).is_empty());
    }

    #[test]
    fn chain_excludes_target_of_same_type() {
        let r = room(vec![
            guarded(1, MonsterType::Imp, Some(MonsterType::Imp)),
            monster(2, MonsterType::Imp),
        ]);
        assert_eq!(protectors_of(&r, MonsterId(1)), set(&[2]));
    }

    #[test]
    fn unknown_target_has_empty_chain() {
        let r = room(vec![monster(1, MonsterType::Imp)]);
        assert!(protectors_of(&r, MonsterId(42)).is_empty());
    }

    #[test]
    fn cycle_detection() {
        let acyclic = [monster(1, MonsterType::Cacodemon), monster(2, MonsterType::LostSoul)];
        assert_eq!(find_cycle(acyclic.iter()), None);

        let self_guard = [guarded(1, MonsterType::Imp, Some(MonsterType::Imp))];
        assert_eq!(find_cycle(self_guard.iter()), None);

        let looped = [
            guarded(1, MonsterType::Imp, Some(MonsterType::Spectre)),
            guarded(2, MonsterType::Spectre, Some(MonsterType::Demon)),
            guarded(3, MonsterType::Demon, Some(MonsterType::Imp)),
        ];
        assert!(find_cycle(looped.iter()).is_some());

        let twins = [
            guarded(1, MonsterType::Imp, Some(MonsterType::Imp)),
            guarded(2, MonsterType::Imp, Some(MonsterType::Imp)),
        ];
        assert!(find_cycle(twins.iter()).is_some());
    }
}
