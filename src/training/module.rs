//! The training module as the engine sees it: install, uninstall and event
//! handling on top of the policy, selector and narrative layers.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{Config, SceneConfig};
use crate::logutil::flatten_for_log;
use crate::training::errors::TrainingError;
use crate::training::events::{Combatant, TrainingEvent};
use crate::training::host::{SceneEndpoint, SceneGraph, TrainingHost};
use crate::training::narrative::{
    self, YardAction, YardView, BACK_GROUP_ID, YARD_TEMPLATE,
};
use crate::training::policy::{BattleResult, ChallengePolicy, ChallengeVerdict, YardOutcome};
use crate::training::roster::Roster;
use crate::training::types::{Character, SceneId};

/// Context tag attached to battles started from the yard.
pub const BATTLE_CONTEXT: &str = "training-ground/battle";

/// Yards created by [`TrainingModule::install`]; the host persists this and
/// hands it back on uninstall.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallRecord {
    pub yards: Vec<SceneId>,
}

pub struct TrainingModule {
    roster: Roster,
    policy: ChallengePolicy,
}

impl TrainingModule {
    pub fn new(roster: Roster, policy: ChallengePolicy) -> Self {
        Self { roster, policy }
    }

    /// Load the configured roster and policy.
    pub fn from_config(config: &Config) -> Result<Self, TrainingError> {
        let roster = Roster::from_config(&config.training)?;
        info!("training roster ready with {} masters", roster.len());
        Ok(Self::new(
            roster,
            ChallengePolicy::new(config.training.graduation_level),
        ))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn policy(&self) -> &ChallengePolicy {
        &self.policy
    }

    /// Attach a yard to every village scene.
    pub fn install<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        scene: &SceneConfig,
    ) -> Result<InstallRecord, TrainingError> {
        let mut record = InstallRecord::default();
        for village in graph.scenes_with_template(&scene.village_template) {
            let yard = graph.create_scene(narrative::yard_scaffold());
            let village_end = if graph.has_connection_group(village, &scene.village_group) {
                SceneEndpoint::group(village, &scene.village_group)
            } else {
                SceneEndpoint::scene(village)
            };
            graph.connect(village_end, SceneEndpoint::group(yard, BACK_GROUP_ID))?;
            debug!("created yard {} next to village {}", yard, village);
            record.yards.push(yard);
        }
        info!("installed {} training yards", record.yards.len());
        Ok(record)
    }

    /// Remove generated yards. Yards the module did not create keep existing
    /// but lose the yard template.
    pub fn uninstall<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        record: &InstallRecord,
    ) -> Result<(), TrainingError> {
        for yard in graph.scenes_with_template(YARD_TEMPLATE) {
            if record.yards.contains(&yard) {
                graph.remove_scene(yard)?;
            } else {
                graph.clear_template(yard)?;
            }
        }
        info!("uninstalled training yards");
        Ok(())
    }

    /// Dispatch one engine event. Events that do not produce a view (new day,
    /// foreign battles) return `Ok(None)`.
    pub fn handle_event<H: TrainingHost + ?Sized>(
        &self,
        host: &mut H,
        character: &mut Character,
        event: TrainingEvent,
    ) -> Result<Option<YardView>, TrainingError> {
        let view = match event {
            TrainingEvent::NavigateToYard { scene, action: None } => {
                Some(self.main_yard(host, character, scene)?)
            }
            TrainingEvent::NavigateToYard {
                scene,
                action: Some(action),
            } => Some(self.yard_action(host, character, scene, action)?),
            TrainingEvent::BattleOver {
                context,
                scene,
                winner,
                loser,
            } => {
                if context != BATTLE_CONTEXT {
                    return Ok(None);
                }
                Some(self.battle_over(host, character, scene, winner, loser)?)
            }
            TrainingEvent::AfterNewDay => {
                character.challenge = self.policy.new_day(character.challenge);
                debug!("{} may challenge a master again", character.name);
                None
            }
        };
        if let Some(v) = &view {
            debug!("yard view '{}': {}", v.title, flatten_for_log(&v.description()));
        }
        Ok(view)
    }

    fn main_yard<H: TrainingHost + ?Sized>(
        &self,
        host: &mut H,
        character: &Character,
        scene: SceneId,
    ) -> Result<YardView, TrainingError> {
        let outcome = self.policy.evaluate(character, &self.roster);
        let exits = host.exits(scene)?;
        Ok(narrative::main_yard(&outcome, scene, &exits))
    }

    fn yard_action<H: TrainingHost + ?Sized>(
        &self,
        host: &mut H,
        character: &mut Character,
        scene: SceneId,
        action: YardAction,
    ) -> Result<YardView, TrainingError> {
        let master = match self.policy.evaluate(character, &self.roster) {
            YardOutcome::Available(master) => master,
            outcome => {
                warn!(
                    "{} tried to {} outside of an open yard ({:?})",
                    character.name,
                    action.param(),
                    outcome
                );
                let exits = host.exits(scene)?;
                return Ok(narrative::main_yard(&outcome, scene, &exits));
            }
        };
        let experience = host.experience(character);

        match action {
            YardAction::Question => {
                let verdict = self.policy.question(experience);
                let exits = host.exits(scene)?;
                Ok(narrative::question_view(&master, verdict, scene, &exits))
            }
            YardAction::Challenge => {
                let (state, verdict) = self.policy.challenge(character.challenge, master, experience);
                character.challenge = state;
                if let ChallengeVerdict::Fight(opponent) = &verdict {
                    let handle =
                        host.start_battle(character, opponent.clone(), scene, BATTLE_CONTEXT)?;
                    info!(
                        "{} challenged {} (battle {})",
                        character.name,
                        opponent.display_name(),
                        handle.id
                    );
                }
                let exits = host.exits(scene)?;
                Ok(narrative::challenge_view(&verdict, &exits))
            }
        }
    }

    fn battle_over<H: TrainingHost + ?Sized>(
        &self,
        host: &mut H,
        character: &mut Character,
        scene: SceneId,
        winner: Combatant,
        loser: Combatant,
    ) -> Result<YardView, TrainingError> {
        let result = if winner.is_character(character.id) {
            BattleResult::CharacterWon {
                defeated: loser.display_name().to_string(),
            }
        } else {
            BattleResult::CharacterLost {
                winner: winner.display_name().to_string(),
            }
        };
        // Resolve the scene first so a failed lookup leaves the character untouched.
        let exits = host.exits(scene)?;
        let (state, verdict) = self.policy.on_battle_over(character.challenge, result);
        character.challenge = state;
        if verdict.grants_level_up() {
            host.level_up(character);
            info!("{} beat their master, now level {}", character.name, character.level);
        }
        Ok(narrative::battle_over_view(&verdict, scene, &exits))
    }
}
