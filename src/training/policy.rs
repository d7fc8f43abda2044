//! Challenge eligibility rules for the training yard.
//!
//! Every operation takes the character's [`ChallengeState`] by value and hands
//! back the updated state, so the caller decides where the flag is stored.

use crate::training::roster::Roster;
use crate::training::selector::select_master;
use crate::training::types::{ChallengeState, Character, Experience, Master};

/// Characters at or above this level have outgrown the yard.
pub const DEFAULT_GRADUATION_LEVEL: u32 = 15;

/// What a character finds when entering the yard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YardOutcome {
    Deceased,
    Graduated,
    AlreadyChallengedToday,
    Available(Master),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionVerdict {
    Ready,
    /// Experience still missing before a challenge can succeed.
    Shortfall(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeVerdict {
    /// Not enough experience: the master disarms the character, no fight.
    Disarmed(Master),
    /// Hand the master over to the combat simulator.
    Fight(Master),
}

/// Result of a finished training battle as seen from the character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleResult {
    CharacterWon { defeated: String },
    CharacterLost { winner: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleVerdict {
    /// The character earns a level-up and may challenge again today.
    Victory { defeated: String },
    Defeat { by: String },
}

impl BattleVerdict {
    pub fn grants_level_up(&self) -> bool {
        matches!(self, BattleVerdict::Victory { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengePolicy {
    graduation_level: u32,
}

impl Default for ChallengePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_GRADUATION_LEVEL)
    }
}

impl ChallengePolicy {
    pub fn new(graduation_level: u32) -> Self {
        Self { graduation_level }
    }

    pub fn graduation_level(&self) -> u32 {
        self.graduation_level
    }

    /// Gates are checked in order: dead, graduated, daily cooldown.
    pub fn evaluate(&self, character: &Character, roster: &Roster) -> YardOutcome {
        if !character.is_alive() {
            YardOutcome::Deceased
        } else if character.level >= self.graduation_level {
            YardOutcome::Graduated
        } else if character.challenge.seen_master_today {
            YardOutcome::AlreadyChallengedToday
        } else {
            YardOutcome::Available(select_master(roster, character.level, &character.snapshot()))
        }
    }

    pub fn question(&self, experience: Experience) -> QuestionVerdict {
        if experience.is_sufficient() {
            QuestionVerdict::Ready
        } else {
            QuestionVerdict::Shortfall(experience.shortfall())
        }
    }

    /// Spends the daily attempt whatever the verdict.
    pub fn challenge(
        &self,
        mut state: ChallengeState,
        master: Master,
        experience: Experience,
    ) -> (ChallengeState, ChallengeVerdict) {
        let verdict = if experience.is_sufficient() {
            ChallengeVerdict::Fight(master)
        } else {
            ChallengeVerdict::Disarmed(master)
        };
        state.seen_master_today = true;
        (state, verdict)
    }

    /// A win frees the daily attempt again; a loss keeps it spent.
    pub fn on_battle_over(
        &self,
        mut state: ChallengeState,
        result: BattleResult,
    ) -> (ChallengeState, BattleVerdict) {
        match result {
            BattleResult::CharacterWon { defeated } => {
                state.seen_master_today = false;
                (state, BattleVerdict::Victory { defeated })
            }
            BattleResult::CharacterLost { winner } => (state, BattleVerdict::Defeat { by: winner }),
        }
    }

    pub fn new_day(&self, mut state: ChallengeState) -> ChallengeState {
        state.seen_master_today = false;
        state
    }
}
