//! Master roster loading.
//!
//! The roster is a tab-separated table with one header line followed by one
//! master per row: `name, weapon, level, attack, defense, maxHealth`. A default
//! roster is compiled into the crate; sysops can point the config at their own
//! file instead. Malformed rows fail the whole load.

use log::debug;
use std::fs;
use std::path::Path;

use crate::config::TrainingConfig;
use crate::training::errors::TrainingError;
use crate::training::types::Master;

const BUNDLED_ROSTER: &str = include_str!("../../data/masters.tsv");
const FIELD_COUNT: usize = 6;

/// Ordered, read-only collection of master templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    masters: Vec<Master>,
}

impl Roster {
    pub fn new(masters: Vec<Master>) -> Self {
        Self { masters }
    }

    /// The roster shipped with the crate (levels 1 through 14).
    pub fn bundled() -> Result<Self, TrainingError> {
        Self::from_tsv(BUNDLED_ROSTER)
    }

    /// Load a roster from a TSV file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TrainingError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let roster = Self::from_tsv(&contents)?;
        debug!("loaded {} masters from {}", roster.len(), path.display());
        Ok(roster)
    }

    /// Use the configured roster file, falling back to the bundled roster.
    pub fn from_config(config: &TrainingConfig) -> Result<Self, TrainingError> {
        match &config.roster_file {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    /// Parse TSV text. The first line is the header and is skipped.
    pub fn from_tsv(text: &str) -> Result<Self, TrainingError> {
        let mut masters = Vec::new();
        for (idx, raw) in text.lines().enumerate().skip(1) {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            masters.push(parse_row(idx + 1, line)?);
        }
        Ok(Self { masters })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Master> {
        self.masters.iter()
    }

    pub fn len(&self) -> usize {
        self.masters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masters.is_empty()
    }
}

fn parse_row(line: usize, row: &str) -> Result<Master, TrainingError> {
    let fields: Vec<&str> = row.split('\t').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(TrainingError::RosterFormat {
            line,
            reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        });
    }
    if fields[0].is_empty() {
        return Err(TrainingError::RosterFormat {
            line,
            reason: "master name is empty".to_string(),
        });
    }

    let stat = |pos: usize, label: &str| -> Result<u32, TrainingError> {
        fields[pos]
            .parse::<u32>()
            .map_err(|e| TrainingError::RosterFormat {
                line,
                reason: format!("{} '{}' is not a non-negative integer: {}", label, fields[pos], e),
            })
    };

    Ok(Master::new(
        fields[0],
        fields[1],
        stat(2, "level")?,
        stat(3, "attack")?,
        stat(4, "defense")?,
        stat(5, "maxHealth")?,
    ))
}
