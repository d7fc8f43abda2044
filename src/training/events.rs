//! Engine hooks the training module listens to.
//!
//! The engine dispatches on hook-name strings with a loosely typed JSON
//! payload. [`TrainingEvent::from_hook`] turns that into a closed enum so the
//! module can match exhaustively.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::training::errors::TrainingError;
use crate::training::narrative::{YardAction, YARD_TEMPLATE};
use crate::training::types::{Master, SceneId};

/// Core navigation hook; the scene template is appended.
pub const NAVIGATE_HOOK_PREFIX: &str = "h/lotgd/core/navigate-to/";
/// Published by the fight module when a battle ends.
pub const BATTLE_OVER_HOOK: &str = "h/lotgd/module-fight/battle-over";
/// Published by the new-day module after a character's day rolls over.
pub const AFTER_NEW_DAY_HOOK: &str = "h/lotgd/module-new-day/after";

/// A participant of a finished battle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Combatant {
    Character { id: Uuid, name: String },
    Master(Master),
}

impl Combatant {
    pub fn display_name(&self) -> &str {
        match self {
            Combatant::Character { name, .. } => name,
            Combatant::Master(master) => master.display_name(),
        }
    }

    pub fn is_character(&self, id: Uuid) -> bool {
        matches!(self, Combatant::Character { id: cid, .. } if *cid == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingEvent {
    NavigateToYard {
        scene: SceneId,
        action: Option<YardAction>,
    },
    BattleOver {
        context: String,
        /// Scene the battle was started from.
        scene: SceneId,
        winner: Combatant,
        loser: Combatant,
    },
    AfterNewDay,
}

#[derive(Deserialize)]
struct NavigatePayload {
    scene: SceneId,
    #[serde(default)]
    parameters: NavigateParameters,
}

#[derive(Deserialize, Default)]
struct NavigateParameters {
    #[serde(default)]
    action: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BattleOverPayload {
    battle_identifier: String,
    referrer_scene_id: SceneId,
    winner: Combatant,
    loser: Combatant,
}

impl TrainingEvent {
    /// Map an engine hook to a training event. Hooks the module does not care
    /// about yield `Ok(None)`; a known hook with a broken payload is an error.
    pub fn from_hook(name: &str, payload: &Value) -> Result<Option<Self>, TrainingError> {
        if let Some(template) = name.strip_prefix(NAVIGATE_HOOK_PREFIX) {
            if template != YARD_TEMPLATE {
                return Ok(None);
            }
            let data = NavigatePayload::deserialize(payload)?;
            // Unknown actions fall through to the main yard.
            let action = data
                .parameters
                .action
                .as_deref()
                .and_then(YardAction::from_param);
            return Ok(Some(TrainingEvent::NavigateToYard {
                scene: data.scene,
                action,
            }));
        }

        match name {
            BATTLE_OVER_HOOK => {
                let data = BattleOverPayload::deserialize(payload)?;
                Ok(Some(TrainingEvent::BattleOver {
                    context: data.battle_identifier,
                    scene: data.referrer_scene_id,
                    winner: data.winner,
                    loser: data.loser,
                }))
            }
            AFTER_NEW_DAY_HOOK => Ok(Some(TrainingEvent::AfterNewDay)),
            _ => Ok(None),
        }
    }
}
