//! Training Ground: a yard next to every village where characters question
//! or challenge a level-matched master, once per in-game day, and gain a
//! level by winning.
//!
//! Combat, experience curves and the scene graph belong to the host engine
//! and are reached through the traits in [`host`].

pub mod errors;
pub mod events;
pub mod host;
pub mod memory;
pub mod module;
pub mod narrative;
pub mod policy;
pub mod roster;
pub mod selector;
pub mod types;

pub use errors::TrainingError;
pub use events::{Combatant, TrainingEvent};
pub use host::{
    BattleHandle, CombatSimulator, ConnectionGroup, ExperienceLedger, SceneEndpoint, SceneExit,
    SceneGraph, SceneScaffold, TrainingHost,
};
pub use memory::MemoryHost;
pub use module::{InstallRecord, TrainingModule, BATTLE_CONTEXT};
pub use narrative::{ActionTarget, YardAction, YardView};
pub use policy::{
    BattleResult, BattleVerdict, ChallengePolicy, ChallengeVerdict, QuestionVerdict, YardOutcome,
    DEFAULT_GRADUATION_LEVEL,
};
pub use roster::Roster;
pub use selector::{fallback_master, select_master};
pub use types::*;
