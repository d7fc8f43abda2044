//! Interfaces to the host engine.
//!
//! The training module never simulates combat, computes experience curves or
//! stores scene graphs itself. It talks to the engine through these traits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::training::errors::TrainingError;
use crate::training::types::{Character, Experience, Master, SceneId};

/// A named group of connections on a scene (e.g. "Back", "The Yard").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionGroup {
    pub id: String,
    pub title: String,
}

impl ConnectionGroup {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
        }
    }
}

/// Everything needed to create a scene node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SceneScaffold {
    pub template: String,
    pub title: String,
    pub description: String,
    pub groups: Vec<ConnectionGroup>,
}

/// One side of a scene connection, optionally attached to a connection group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneEndpoint {
    pub scene: SceneId,
    pub group: Option<String>,
}

impl SceneEndpoint {
    pub fn scene(scene: SceneId) -> Self {
        Self { scene, group: None }
    }

    pub fn group(scene: SceneId, group: &str) -> Self {
        Self {
            scene,
            group: Some(group.to_string()),
        }
    }
}

/// A destination reachable from a scene, as seen from that scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneExit {
    pub destination: SceneId,
    pub destination_title: String,
    /// `None` places the exit in the default action group.
    pub group: Option<ConnectionGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleHandle {
    pub id: Uuid,
    pub context: String,
}

pub trait ExperienceLedger {
    /// Experience needed before the character can beat its current master.
    fn required_experience(&self, character: &Character) -> u64;

    fn current_experience(&self, character: &Character) -> u64;

    fn level_up(&mut self, character: &mut Character);

    fn experience(&self, character: &Character) -> Experience {
        Experience::new(
            self.current_experience(character),
            self.required_experience(character),
        )
    }
}

pub trait CombatSimulator {
    /// Start a battle against a detached master. The outcome arrives later as
    /// a battle-over event carrying the same `context`.
    fn start_battle(
        &mut self,
        character: &Character,
        opponent: Master,
        scene: SceneId,
        context: &str,
    ) -> Result<BattleHandle, TrainingError>;
}

pub trait SceneGraph {
    fn scenes_with_template(&self, template: &str) -> Vec<SceneId>;

    fn has_connection_group(&self, scene: SceneId, group: &str) -> bool;

    fn create_scene(&mut self, scaffold: SceneScaffold) -> SceneId;

    /// Connect two scenes in both directions.
    fn connect(&mut self, from: SceneEndpoint, to: SceneEndpoint) -> Result<(), TrainingError>;

    /// Remove a scene together with its connections.
    fn remove_scene(&mut self, scene: SceneId) -> Result<(), TrainingError>;

    /// Keep the scene but stop routing its events to the training module.
    fn clear_template(&mut self, scene: SceneId) -> Result<(), TrainingError>;

    fn exits(&self, scene: SceneId) -> Result<Vec<SceneExit>, TrainingError>;
}

/// Everything the training module needs from the engine in one bound.
pub trait TrainingHost: ExperienceLedger + CombatSimulator + SceneGraph {}

impl<T: ExperienceLedger + CombatSimulator + SceneGraph> TrainingHost for T {}
