//! # Training Ground - a master-challenge module for text role-playing games
//!
//! Training Ground adds a yard next to every village of a host game engine.
//! There a character can question the master matching their level about
//! their progress, or challenge that master to a fight once per in-game day.
//! Beating the master grants a level and another attempt the same day.
//!
//! ## Features
//!
//! - **Level-matched masters**: the strongest roster master not above the
//!   character's level; a scarecrow with the character's own stats otherwise.
//! - **Daily cooldown**: one challenge per in-game day, refreshed by a win.
//! - **Data-driven roster**: a tab-separated master table, bundled or configured.
//! - **Engine agnostic**: combat, experience and scene storage are reached
//!   through traits; an in-memory host ships for tooling and tests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use training_ground::config::Config;
//! use training_ground::training::{Character, MemoryHost, TrainingEvent, TrainingModule};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("training.toml").await?;
//!     let module = TrainingModule::from_config(&config)?;
//!
//!     let mut host = MemoryHost::new();
//!     let record = module.install(&mut host, &config.scene)?;
//!     let mut hero = Character::new("Violet");
//!     let event = TrainingEvent::NavigateToYard { scene: record.yards[0], action: None };
//!     if let Some(view) = module.handle_event(&mut host, &mut hero, event)? {
//!         println!("{}\n{}", view.title, view.description());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`training`] - roster, master selection, challenge policy, narrative and
//!   the engine-facing module
//! - [`config`] - TOML configuration
//! - [`logutil`] - log formatting helpers

pub mod config;
pub mod logutil;
pub mod training;
