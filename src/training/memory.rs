//! In-memory host used by the CLI and the test suite.
//!
//! Battles are recorded, not fought: whoever drives the host decides the
//! winner and feeds a battle-over event back into the module.

use log::debug;
use std::collections::HashMap;
use uuid::Uuid;

use crate::training::errors::TrainingError;
use crate::training::host::{
    BattleHandle, CombatSimulator, ExperienceLedger, SceneEndpoint, SceneExit, SceneGraph,
    SceneScaffold,
};
use crate::training::types::{Character, Master, SceneId};

/// Experience needed to face the master of each level (index 0 is level 1).
pub const EXPERIENCE_TABLE: [u64; 15] = [
    100, 400, 1002, 1912, 3140, 4707, 6641, 8985, 11795, 15143, 19121, 23840, 29437, 36071, 43930,
];

#[derive(Debug, Clone)]
pub struct MemoryScene {
    pub scaffold: SceneScaffold,
    /// `None` once the template has been cleared.
    pub template: Option<String>,
}

#[derive(Debug, Clone)]
struct Connection {
    from: SceneEndpoint,
    to: SceneEndpoint,
}

/// A battle handed to [`MemoryHost`] and waiting for an outcome.
#[derive(Debug, Clone)]
pub struct BattleRequest {
    pub handle: BattleHandle,
    pub character: Uuid,
    pub opponent: Master,
    pub scene: SceneId,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    scenes: HashMap<SceneId, MemoryScene>,
    order: Vec<SceneId>,
    connections: Vec<Connection>,
    experience: HashMap<Uuid, u64>,
    battles: Vec<BattleRequest>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self, id: SceneId) -> Option<&MemoryScene> {
        self.scenes.get(&id)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn set_experience(&mut self, character: &Character, amount: u64) {
        self.experience.insert(character.id, amount);
    }

    pub fn battles(&self) -> &[BattleRequest] {
        &self.battles
    }

    pub fn last_battle(&self) -> Option<&BattleRequest> {
        self.battles.last()
    }

    fn title_of(&self, scene: SceneId) -> Result<String, TrainingError> {
        self.scenes
            .get(&scene)
            .map(|s| s.scaffold.title.clone())
            .ok_or(TrainingError::UnknownScene(scene))
    }

    fn ensure_exists(&self, scene: SceneId) -> Result<(), TrainingError> {
        if self.scenes.contains_key(&scene) {
            Ok(())
        } else {
            Err(TrainingError::UnknownScene(scene))
        }
    }

    fn exit_for(&self, from: &SceneEndpoint, to: SceneId) -> Result<SceneExit, TrainingError> {
        let group = match &from.group {
            Some(group_id) => self.scenes.get(&from.scene).and_then(|s| {
                s.scaffold
                    .groups
                    .iter()
                    .find(|g| &g.id == group_id)
                    .cloned()
            }),
            None => None,
        };
        Ok(SceneExit {
            destination: to,
            destination_title: self.title_of(to)?,
            group,
        })
    }
}

impl ExperienceLedger for MemoryHost {
    fn required_experience(&self, character: &Character) -> u64 {
        let idx = character.level.saturating_sub(1) as usize;
        EXPERIENCE_TABLE
            .get(idx)
            .copied()
            .unwrap_or(EXPERIENCE_TABLE[EXPERIENCE_TABLE.len() - 1])
    }

    fn current_experience(&self, character: &Character) -> u64 {
        self.experience.get(&character.id).copied().unwrap_or(0)
    }

    fn level_up(&mut self, character: &mut Character) {
        character.level += 1;
        character.attack += 1;
        character.defense += 1;
        character.max_health += 10;
        character.health = character.max_health;
        debug!("{} reached level {}", character.name, character.level);
    }
}

impl CombatSimulator for MemoryHost {
    fn start_battle(
        &mut self,
        character: &Character,
        opponent: Master,
        scene: SceneId,
        context: &str,
    ) -> Result<BattleHandle, TrainingError> {
        self.ensure_exists(scene)?;
        let handle = BattleHandle {
            id: Uuid::new_v4(),
            context: context.to_string(),
        };
        self.battles.push(BattleRequest {
            handle: handle.clone(),
            character: character.id,
            opponent,
            scene,
        });
        Ok(handle)
    }
}

impl SceneGraph for MemoryHost {
    fn scenes_with_template(&self, template: &str) -> Vec<SceneId> {
        self.order
            .iter()
            .filter(|id| {
                self.scenes
                    .get(*id)
                    .and_then(|s| s.template.as_deref())
                    .map_or(false, |t| t == template)
            })
            .copied()
            .collect()
    }

    fn has_connection_group(&self, scene: SceneId, group: &str) -> bool {
        self.scenes
            .get(&scene)
            .map_or(false, |s| s.scaffold.groups.iter().any(|g| g.id == group))
    }

    fn create_scene(&mut self, scaffold: SceneScaffold) -> SceneId {
        let id = SceneId::new();
        let template = Some(scaffold.template.clone());
        self.scenes.insert(id, MemoryScene { scaffold, template });
        self.order.push(id);
        id
    }

    fn connect(&mut self, from: SceneEndpoint, to: SceneEndpoint) -> Result<(), TrainingError> {
        self.ensure_exists(from.scene)?;
        self.ensure_exists(to.scene)?;
        self.connections.push(Connection { from, to });
        Ok(())
    }

    fn remove_scene(&mut self, scene: SceneId) -> Result<(), TrainingError> {
        if self.scenes.remove(&scene).is_none() {
            return Err(TrainingError::UnknownScene(scene));
        }
        self.order.retain(|id| *id != scene);
        self.connections
            .retain(|c| c.from.scene != scene && c.to.scene != scene);
        Ok(())
    }

    fn clear_template(&mut self, scene: SceneId) -> Result<(), TrainingError> {
        let entry = self
            .scenes
            .get_mut(&scene)
            .ok_or(TrainingError::UnknownScene(scene))?;
        entry.template = None;
        Ok(())
    }

    fn exits(&self, scene: SceneId) -> Result<Vec<SceneExit>, TrainingError> {
        self.ensure_exists(scene)?;
        let mut exits = Vec::new();
        for conn in &self.connections {
            if conn.from.scene == scene {
                exits.push(self.exit_for(&conn.from, conn.to.scene)?);
            } else if conn.to.scene == scene {
                exits.push(self.exit_for(&conn.to, conn.from.scene)?);
            }
        }
        Ok(exits)
    }
}
