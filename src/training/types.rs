//! Core records of the training module: masters, the character as the
//! yard sees it, the daily challenge flag and experience figures.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a scene node in the host's scene graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SceneId(pub Uuid);

impl SceneId {
    pub fn new() -> Self {
        SceneId(Uuid::new_v4())
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NPC opponent template. Combat instances are owned clones, so damage dealt
/// during a fight never reaches the roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Master {
    pub name: String,
    pub weapon: String,
    pub level: u32,
    pub attack: u32,
    pub defense: u32,
    pub max_health: u32,
    pub health: u32,
}

impl Master {
    pub fn new(name: &str, weapon: &str, level: u32, attack: u32, defense: u32, max_health: u32) -> Self {
        Self {
            name: name.to_string(),
            weapon: weapon.to_string(),
            level,
            attack,
            defense,
            max_health,
            health: max_health,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }
}

/// Combat stats of a character at selection time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSnapshot {
    pub level: u32,
    pub attack: u32,
    pub defense: u32,
    pub max_health: u32,
}

/// Per-character daily cooldown gate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeState {
    pub seen_master_today: bool,
}

impl ChallengeState {
    pub fn fresh() -> Self {
        Self::default()
    }

    pub fn seen() -> Self {
        Self {
            seen_master_today: true,
        }
    }
}

/// The acting character as handed over by the host engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    #[serde(default)]
    pub challenge: ChallengeState,
}

impl Character {
    /// A fresh level 1 character with full health.
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            level: 1,
            health: 10,
            max_health: 10,
            attack: 1,
            defense: 1,
            challenge: ChallengeState::fresh(),
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }

    pub fn with_stats(mut self, attack: u32, defense: u32, max_health: u32) -> Self {
        self.attack = attack;
        self.defense = defense;
        self.max_health = max_health;
        self.health = self.health.min(max_health);
        self
    }

    pub fn with_challenge(mut self, challenge: ChallengeState) -> Self {
        self.challenge = challenge;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn snapshot(&self) -> CharacterSnapshot {
        CharacterSnapshot {
            level: self.level,
            attack: self.attack,
            defense: self.defense,
            max_health: self.max_health,
        }
    }
}

/// Experience figures supplied by the experience accounting collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experience {
    pub current: u64,
    pub required: u64,
}

impl Experience {
    pub fn new(current: u64, required: u64) -> Self {
        Self { current, required }
    }

    pub fn is_sufficient(&self) -> bool {
        self.current >= self.required
    }

    pub fn shortfall(&self) -> u64 {
        self.required.saturating_sub(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_starts_at_full_health() {
        let m = Master::new("Mieraband", "Small Dagger", 1, 2, 2, 12);
        assert_eq!(m.health, 12);
        assert_eq!(m.display_name(), "Mieraband");
    }

    #[test]
    fn character_with_zero_health_is_dead() {
        let c = Character::new("Violet").with_health(0);
        assert!(!c.is_alive());
        assert!(Character::new("Violet").is_alive());
    }

    #[test]
    fn experience_shortfall_saturates() {
        assert_eq!(Experience::new(0, 100).shortfall(), 100);
        assert_eq!(Experience::new(150, 100).shortfall(), 0);
        assert!(Experience::new(100, 100).is_sufficient());
        assert!(!Experience::new(99, 100).is_sufficient());
    }

    #[test]
    fn master_serializes_with_camel_case_keys() {
        let m = Master::new("Fie", "Short Sword", 2, 4, 4, 22);
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"maxHealth\":22"));
    }
}
