//! Canned yard texts and the view model handed back to the engine.

use serde::{Deserialize, Serialize};

use crate::training::host::{ConnectionGroup, SceneExit, SceneScaffold};
use crate::training::policy::{BattleVerdict, ChallengeVerdict, QuestionVerdict, YardOutcome};
use crate::training::types::{Master, SceneId};

pub const YARD_TEMPLATE: &str = "training-ground/yard";
pub const YARD_TITLE: &str = "Bluspring's Warrior Training";
pub const YARD_DESCRIPTION: &str = "You stroll into the battle grounds. Younger warriors huddle together and point as you pass by. You know this place well. Bluspring hails you, and you grasp her hand firmly. There is nothing left for you here but memories. You remain a moment longer, and look at the warriors in training before you turn to return to the village.";

pub const TRAINYARD_GROUP_ID: &str = "training-ground/yard/trainyard";
pub const TRAINYARD_GROUP_TITLE: &str = "The Yard";
pub const BACK_GROUP_ID: &str = "training-ground/yard/back";
pub const BACK_GROUP_TITLE: &str = "Back";
pub const DEFAULT_GROUP_ID: &str = "default";

pub const QUESTION_ACTION_TITLE: &str = "Question Master";
pub const CHALLENGE_ACTION_TITLE: &str = "Challenge Master";

const CONFLICT_INTRO: &str = "The sound of conflict surrounds you. The clang of weapons in grisly battle inspires your warrior heart.";
const DECEASED_TEXT: &str = "You are dead. How are you going to challenge your master if you cannot even survive killing enemies? Come back tomorrow.";
const ALREADY_CHALLENGED_TEXT: &str = "You already challenged your master today. Is one embarrassment per day not enough?";
const FIGHT_TITLE: &str = "A fight against your master!";
const FIGHT_TAUNT: &str = "Your master quickly spins around you and taunts you to attack first, being sure that you'll never be victorious.";

/// Sub-actions offered in the yard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum YardAction {
    Question,
    Challenge,
}

impl YardAction {
    pub fn param(&self) -> &'static str {
        match self {
            YardAction::Question => "question",
            YardAction::Challenge => "challenge",
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "question" => Some(YardAction::Question),
            "challenge" => Some(YardAction::Challenge),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            YardAction::Question => QUESTION_ACTION_TITLE,
            YardAction::Challenge => CHALLENGE_ACTION_TITLE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionTarget {
    Yard { scene: SceneId, action: YardAction },
    Scene { scene: SceneId },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewAction {
    pub title: String,
    pub target: ActionTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionGroup {
    pub id: String,
    pub title: String,
    pub actions: Vec<ViewAction>,
}

/// What the player sees after an event: title, paragraphs and action groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct YardView {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub action_groups: Vec<ActionGroup>,
}

impl YardView {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn description(&self) -> String {
        self.paragraphs.join("\n\n")
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.paragraphs.push(text.into());
    }

    /// Append to an existing group or create it at the end.
    pub fn add_action(&mut self, group: &ConnectionGroup, action: ViewAction) {
        match self.action_groups.iter_mut().find(|g| g.id == group.id) {
            Some(existing) => existing.actions.push(action),
            None => self.action_groups.push(ActionGroup {
                id: group.id.clone(),
                title: group.title.clone(),
                actions: vec![action],
            }),
        }
    }

    pub fn add_exits(&mut self, exits: &[SceneExit]) {
        let default_group = ConnectionGroup::new(DEFAULT_GROUP_ID, "");
        for exit in exits {
            let group = exit.group.as_ref().unwrap_or(&default_group);
            self.add_action(
                group,
                ViewAction {
                    title: exit.destination_title.clone(),
                    target: ActionTarget::Scene {
                        scene: exit.destination,
                    },
                },
            );
        }
    }

    pub fn add_yard_actions(&mut self, yard: SceneId) {
        let group = ConnectionGroup::new(TRAINYARD_GROUP_ID, TRAINYARD_GROUP_TITLE);
        for action in [YardAction::Question, YardAction::Challenge] {
            self.add_action(
                &group,
                ViewAction {
                    title: action.title().to_string(),
                    target: ActionTarget::Yard {
                        scene: yard,
                        action,
                    },
                },
            );
        }
    }

    /// Look up an action by title, optionally restricted to a group title.
    pub fn find_action(&self, title: &str, group_title: Option<&str>) -> Option<&ViewAction> {
        self.action_groups
            .iter()
            .filter(|g| group_title.map_or(true, |t| g.title == t))
            .flat_map(|g| g.actions.iter())
            .find(|a| a.title == title)
    }

    pub fn has_action(&self, title: &str, group_title: Option<&str>) -> bool {
        self.find_action(title, group_title).is_some()
    }

    /// Find an action leading to `scene`, as the "Back" link to the village.
    pub fn find_scene_action(&self, scene: SceneId) -> Option<&ViewAction> {
        self.action_groups
            .iter()
            .flat_map(|g| g.actions.iter())
            .find(|a| matches!(a.target, ActionTarget::Scene { scene: s } if s == scene))
    }
}

/// Scaffold for one generated yard scene.
pub fn yard_scaffold() -> SceneScaffold {
    SceneScaffold {
        template: YARD_TEMPLATE.to_string(),
        title: YARD_TITLE.to_string(),
        description: YARD_DESCRIPTION.to_string(),
        groups: vec![
            ConnectionGroup::new(TRAINYARD_GROUP_ID, TRAINYARD_GROUP_TITLE),
            ConnectionGroup::new(BACK_GROUP_ID, BACK_GROUP_TITLE),
        ],
    }
}

pub fn main_yard(outcome: &YardOutcome, yard: SceneId, exits: &[SceneExit]) -> YardView {
    let mut view = YardView::new(YARD_TITLE);
    match outcome {
        YardOutcome::Deceased => view.add_paragraph(DECEASED_TEXT),
        YardOutcome::Graduated => view.add_paragraph(YARD_DESCRIPTION),
        YardOutcome::AlreadyChallengedToday => {
            view.add_paragraph(CONFLICT_INTRO);
            view.add_paragraph(ALREADY_CHALLENGED_TEXT);
        }
        YardOutcome::Available(master) => {
            view.add_paragraph(CONFLICT_INTRO);
            view.add_paragraph(format!(
                "{} stands ready to evaluate you.",
                master.display_name()
            ));
        }
    }
    view.add_exits(exits);
    if matches!(outcome, YardOutcome::Available(_)) {
        view.add_yard_actions(yard);
    }
    view
}

pub fn question_view(
    master: &Master,
    verdict: QuestionVerdict,
    yard: SceneId,
    exits: &[SceneExit],
) -> YardView {
    let name = master.display_name();
    let mut view = YardView::new(YARD_TITLE);
    view.add_paragraph(format!(
        "You approach {} timidly and inquire as to your standing in the class.",
        name
    ));
    match verdict {
        QuestionVerdict::Ready => view.add_paragraph(format!(
            "{} says, \"Gee, your muscles are getting bigger than mine...\"",
            name
        )),
        QuestionVerdict::Shortfall(needed) => view.add_paragraph(format!(
            "{} states that you will need {} more experience before you are ready to challenge him in battle.",
            name, needed
        )),
    }
    view.add_exits(exits);
    view.add_yard_actions(yard);
    view
}

/// The combat engine owns the actions while a fight is running, so a `Fight`
/// view carries text only.
pub fn challenge_view(verdict: &ChallengeVerdict, exits: &[SceneExit]) -> YardView {
    let mut view = YardView::new(FIGHT_TITLE);
    match verdict {
        ChallengeVerdict::Disarmed(master) => {
            view.add_paragraph(disarmed_text(master.display_name()));
            view.add_exits(exits);
        }
        ChallengeVerdict::Fight(_) => view.add_paragraph(FIGHT_TAUNT),
    }
    view
}

fn disarmed_text(name: &str) -> String {
    format!(
        "You ready your weapon and approach your master, {name}. A small crowd of onlookers has gathered, and you briefly notice the smiles on their faces, but you feel confident. You bow before {name}, and execute a perfect spin-attack, only to realize that you are holding NOTHING! {name} stands before you holding your weapon. Meekly you retrieve your weapon, and slink out of the training grounds to the sound of boisterous guffaws.",
        name = name
    )
}

pub fn battle_over_view(verdict: &BattleVerdict, yard: SceneId, exits: &[SceneExit]) -> YardView {
    match verdict {
        BattleVerdict::Victory { defeated } => {
            let mut view = YardView::new("You won!");
            view.add_paragraph(format!("You defeated {}. You gain a level!", defeated));
            view.add_exits(exits);
            view.add_yard_actions(yard);
            view
        }
        BattleVerdict::Defeat { by } => {
            let mut view = YardView::new("You lost!");
            view.add_paragraph(format!(
                "You have been defeated by {}. They stand over your dead body, laughing..",
                by
            ));
            view.add_exits(exits);
            view
        }
    }
}
