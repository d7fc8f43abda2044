//! Master selection by level.

use std::cmp::Reverse;

use crate::training::roster::Roster;
use crate::training::types::{CharacterSnapshot, Master};

pub const FALLBACK_MASTER_NAME: &str = "Scarecrow";
pub const FALLBACK_MASTER_WEAPON: &str = "Straw raven";

/// Pick the strongest master whose level does not exceed `target_level`.
///
/// Among several masters at that level the first in roster order wins. When
/// nobody qualifies a scarecrow mirroring the character's own stats stands in.
/// The result is always an owned copy, never the roster entry itself.
pub fn select_master(roster: &Roster, target_level: u32, snapshot: &CharacterSnapshot) -> Master {
    roster
        .iter()
        .filter(|m| m.level <= target_level)
        .min_by_key(|m| Reverse(m.level))
        .cloned()
        .unwrap_or_else(|| fallback_master(snapshot))
}

/// The scarecrow stand-in used when no roster entry qualifies.
pub fn fallback_master(snapshot: &CharacterSnapshot) -> Master {
    Master::new(
        FALLBACK_MASTER_NAME,
        FALLBACK_MASTER_WEAPON,
        snapshot.level,
        snapshot.attack,
        snapshot.defense,
        snapshot.max_health,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> CharacterSnapshot {
        CharacterSnapshot {
            level: 1,
            attack: 3,
            defense: 2,
            max_health: 20,
        }
    }

    fn roster(levels: &[u32]) -> Roster {
        Roster::new(
            levels
                .iter()
                .map(|l| Master::new(&format!("Master{}", l), "Stick", *l, *l, *l, l * 10))
                .collect(),
        )
    }

    #[test]
    fn picks_highest_level_not_above_target() {
        let m = select_master(&roster(&[5, 10]), 7, &snapshot());
        assert_eq!(m.level, 5);
        let m = select_master(&roster(&[10, 3, 7, 5]), 7, &snapshot());
        assert_eq!(m.level, 7);
    }

    #[test]
    fn exact_level_match_is_selected() {
        let m = select_master(&roster(&[5, 10]), 10, &snapshot());
        assert_eq!(m.name, "Master10");
    }

    #[test]
    fn ties_resolve_to_first_in_roster_order() {
        let roster = Roster::new(vec![
            Master::new("First", "Axe", 4, 1, 1, 10),
            Master::new("Second", "Bow", 4, 1, 1, 10),
        ]);
        assert_eq!(select_master(&roster, 9, &snapshot()).name, "First");
    }

    #[test]
    fn empty_roster_yields_scarecrow_with_character_stats() {
        let m = select_master(&Roster::default(), 1, &snapshot());
        assert_eq!(
            m,
            Master {
                name: "Scarecrow".to_string(),
                weapon: "Straw raven".to_string(),
                level: 1,
                attack: 3,
                defense: 2,
                max_health: 20,
                health: 20,
            }
        );
    }

    #[test]
    fn no_qualifying_master_yields_scarecrow() {
        let m = select_master(&roster(&[5, 10]), 2, &snapshot());
        assert_eq!(m.name, FALLBACK_MASTER_NAME);
        assert_eq!(m.max_health, 20);
    }

    #[test]
    fn mutating_selection_leaves_roster_untouched() {
        let roster = roster(&[5]);
        let mut m = select_master(&roster, 5, &snapshot());
        m.health = 0;
        m.name.push_str(" (wounded)");
        let stored = roster.iter().next().unwrap();
        assert_eq!(stored.health, 50);
        assert_eq!(stored.name, "Master5");
    }
}
