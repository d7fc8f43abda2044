//! Binary entrypoint for the Training Ground CLI.
//!
//! Commands:
//! - `init` - write a starter config file
//! - `roster` - list the configured masters
//! - `select --level <n>` - show which master a character of that level faces
//! - `visit [--action question|challenge] [--outcome win|lose]` - walk a
//!   character through the yard on an in-memory host and print every view
//!
//! See the library crate docs for module-level details: `training_ground::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use training_ground::config::Config;
use training_ground::training::{
    select_master, ActionTarget, Character, ChallengeState, Combatant, ConnectionGroup, MemoryHost, Roster,
    SceneGraph, SceneScaffold, TrainingEvent, TrainingModule, YardAction, YardView, BATTLE_CONTEXT,
};

#[derive(Parser)]
#[command(name = "training-ground")]
#[command(about = "Challenge your master in the Training Ground")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "training.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// List the masters of the configured roster
    Roster,
    /// Show the master a character of the given level would face
    Select {
        #[arg(short, long)]
        level: u32,
        #[arg(long, default_value_t = 1)]
        attack: u32,
        #[arg(long, default_value_t = 1)]
        defense: u32,
        #[arg(long, default_value_t = 10)]
        max_health: u32,
    },
    /// Visit the yard with a throwaway character
    Visit {
        #[arg(long, default_value = "Violet")]
        name: String,
        #[arg(short, long, default_value_t = 1)]
        level: u32,
        #[arg(long, default_value_t = 10)]
        health: u32,
        #[arg(long, default_value_t = 0)]
        experience: u64,
        /// The character already challenged a master today
        #[arg(long)]
        seen: bool,
        /// Start a new in-game day before entering the yard
        #[arg(long)]
        new_day: bool,
        #[arg(short, long, value_enum)]
        action: Option<VisitAction>,
        /// How a started battle ends
        #[arg(short, long, value_enum)]
        outcome: Option<BattleOutcome>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VisitAction {
    Question,
    Challenge,
}

#[derive(Clone, Copy, ValueEnum)]
enum BattleOutcome {
    Win,
    Lose,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Init => {
            Config::create_default(&cli.config).await?;
            println!("Wrote default configuration to {}", cli.config);
        }
        Commands::Roster => {
            let config = resolve_config(pre_config, &cli.config).await?;
            let roster = Roster::from_config(&config.training)?;
            println!("{:<28} {:<24} {:>5} {:>4} {:>4} {:>5}", "Master", "Weapon", "Level", "Atk", "Def", "HP");
            for m in roster.iter() {
                println!(
                    "{:<28} {:<24} {:>5} {:>4} {:>4} {:>5}",
                    m.name, m.weapon, m.level, m.attack, m.defense, m.max_health
                );
            }
        }
        Commands::Select {
            level,
            attack,
            defense,
            max_health,
        } => {
            let config = resolve_config(pre_config, &cli.config).await?;
            let roster = Roster::from_config(&config.training)?;
            let snapshot = Character::new("candidate")
                .with_level(level)
                .with_stats(attack, defense, max_health)
                .snapshot();
            let master = select_master(&roster, level, &snapshot);
            println!(
                "Level {} faces {} wielding {} (level {}, atk {}, def {}, hp {})",
                level, master.name, master.weapon, master.level, master.attack, master.defense, master.max_health
            );
        }
        Commands::Visit {
            name,
            level,
            health,
            experience,
            seen,
            new_day,
            action,
            outcome,
        } => {
            let config = resolve_config(pre_config, &cli.config).await?;
            let module = TrainingModule::from_config(&config)?;
            let mut host = MemoryHost::new();
            host.create_scene(SceneScaffold {
                template: config.scene.village_template.clone(),
                title: "Village".to_string(),
                description: "The village square bustles with activity.".to_string(),
                groups: vec![ConnectionGroup::new(
                    &config.scene.village_group,
                    "Outside",
                )],
            });
            let record = module.install(&mut host, &config.scene)?;
            let yard = *record
                .yards
                .first()
                .ok_or_else(|| anyhow!("no yard was installed"))?;

            let challenge = if seen {
                ChallengeState::seen()
            } else {
                ChallengeState::fresh()
            };
            let mut hero = visiting_character(&name, level, health, challenge);
            host.set_experience(&hero, experience);

            if new_day {
                module.handle_event(&mut host, &mut hero, TrainingEvent::AfterNewDay)?;
            }

            let entry = TrainingEvent::NavigateToYard { scene: yard, action: None };
            let view = module.handle_event(&mut host, &mut hero, entry)?;
            if let Some(v) = &view {
                print_view(v);
            }

            if let Some(action) = action {
                let yard_action = match action {
                    VisitAction::Question => YardAction::Question,
                    VisitAction::Challenge => YardAction::Challenge,
                };
                let offered = view.as_ref().map_or(false, |v| {
                    v.action_groups.iter().flat_map(|g| g.actions.iter()).any(|a| {
                        matches!(a.target, ActionTarget::Yard { action: offered_action, .. } if offered_action == yard_action)
                    })
                });
                if !offered {
                    warn!("{} is not offered in the yard right now", yard_action.title());
                }
                let event = TrainingEvent::NavigateToYard {
                    scene: yard,
                    action: Some(yard_action),
                };
                if let Some(v) = module.handle_event(&mut host, &mut hero, event)? {
                    print_view(&v);
                }
            }

            if let (Some(outcome), Some(battle)) = (outcome, host.last_battle().cloned()) {
                let hero_side = Combatant::Character {
                    id: hero.id,
                    name: hero.name.clone(),
                };
                let master_side = Combatant::Master(battle.opponent);
                let (winner, loser) = match outcome {
                    BattleOutcome::Win => (hero_side, master_side),
                    BattleOutcome::Lose => (master_side, hero_side),
                };
                let event = TrainingEvent::BattleOver {
                    context: BATTLE_CONTEXT.to_string(),
                    scene: battle.scene,
                    winner,
                    loser,
                };
                if let Some(v) = module.handle_event(&mut host, &mut hero, event)? {
                    print_view(&v);
                }
            } else if outcome.is_some() {
                warn!("no battle was started, ignoring --outcome");
            }

            info!(
                "{} leaves the yard at level {} (seen master today: {})",
                hero.name, hero.level, hero.challenge.seen_master_today
            );
        }
    }

    Ok(())
}

/// Stats scale with level the way the in-memory host levels characters up.
fn visiting_character(name: &str, level: u32, health: u32, challenge: ChallengeState) -> Character {
    let mut hero = Character::new(name)
        .with_level(level)
        .with_stats(level, level, level.saturating_mul(10))
        .with_challenge(challenge);
    hero.health = health.min(hero.max_health);
    hero
}

async fn resolve_config(pre_config: Option<Config>, path: &str) -> Result<Config> {
    match pre_config {
        Some(config) => Ok(config),
        None => Config::load_or_default(path).await,
    }
}

fn print_view(view: &YardView) {
    println!("== {} ==", view.title);
    for paragraph in &view.paragraphs {
        println!("{}\n", paragraph);
    }
    for group in &view.action_groups {
        let titles: Vec<&str> = group.actions.iter().map(|a| a.title.as_str()).collect();
        let label = if group.title.is_empty() { "-" } else { group.title.as_str() };
        println!("[{}] {}", label, titles.join(" | "));
    }
    println!();
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides config
    let base_level = match (verbosity, config) {
        (0, Some(cfg)) => cfg.logging.level_filter(),
        (0, None) => log::LevelFilter::Info,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    match log_file {
        Some(f) => {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            // Echo to the console only when someone is watching
            let is_tty = atty::is(atty::Stream::Stderr);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        None => {
            builder.format(|fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
            });
        }
    }
    let _ = builder.try_init();
}
