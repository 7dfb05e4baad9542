//! Saved competition state
//!
//! Two JSON documents in one directory: the current tournament and the
//! initial team roster. An empty slot is represented by a missing file.

use petanque_core::{Team, Tournament};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::competition::Competition;

/// File holding the current competition state
pub const TOURNAMENT_FILE: &str = "tournament.json";

/// File holding the initial team roster
pub const ROSTER_FILE: &str = "roster.json";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Directory-backed store for the two state slots
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Load both slots. `None` when no tournament has been saved.
    pub fn load(&self) -> Result<Option<Competition>, StateError> {
        let Some(tournament) = self.load_tournament()? else {
            return Ok(None);
        };
        let roster = self.load_roster()?;
        Ok(Some(Competition::new(tournament, roster)))
    }

    pub fn load_tournament(&self) -> Result<Option<Tournament>, StateError> {
        read_slot(&self.slot(TOURNAMENT_FILE))
    }

    pub fn load_roster(&self) -> Result<Vec<Team>, StateError> {
        Ok(read_slot(&self.slot(ROSTER_FILE))?.unwrap_or_default())
    }

    pub fn save(&self, competition: &Competition) -> Result<(), StateError> {
        self.save_tournament(Some(&competition.tournament))?;
        self.save_roster(&competition.roster)?;
        info!(dir = %self.dir.display(), "state saved");
        Ok(())
    }

    /// Write the tournament slot, or remove it for `None`.
    pub fn save_tournament(&self, tournament: Option<&Tournament>) -> Result<(), StateError> {
        let path = self.slot(TOURNAMENT_FILE);
        match tournament {
            Some(tournament) => write_slot(&path, tournament),
            None => remove_slot(&path),
        }
    }

    /// Write the roster slot. An empty roster removes it.
    pub fn save_roster(&self, roster: &[Team]) -> Result<(), StateError> {
        let path = self.slot(ROSTER_FILE);
        if roster.is_empty() {
            remove_slot(&path)
        } else {
            write_slot(&path, roster)
        }
    }

    /// Remove both slots.
    pub fn clear(&self) -> Result<(), StateError> {
        remove_slot(&self.slot(TOURNAMENT_FILE))?;
        remove_slot(&self.slot(ROSTER_FILE))?;
        info!(dir = %self.dir.display(), "state cleared");
        Ok(())
    }
}

fn read_slot<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, StateError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StateError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| StateError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn write_slot<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StateError> {
    let json = serde_json::to_string_pretty(value)?;
    let io_err = |source| StateError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, json).map_err(io_err)?;
    debug!(path = %path.display(), "slot written");
    Ok(())
}

fn remove_slot(path: &Path) -> Result<(), StateError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StateError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
