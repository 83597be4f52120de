//! Input scripts for headless runs.
//!
//! A script is a JSON array of `{ "frame": N, "command": { .. } }` entries.
//! Each command is queued just before frame N runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use starfield_core::commands::FlightCommand;

/// One scripted command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedCommand {
    /// Zero-based frame index to queue the command before.
    pub frame: u64,
    pub command: FlightCommand,
}

/// Script loading errors.
#[derive(thiserror::Error, Debug)]
pub enum ScriptError {
    #[error("could not read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A frame-ordered command script.
#[derive(Debug, Default)]
pub struct Script {
    entries: Vec<ScriptedCommand>,
    cursor: usize,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        let entries: Vec<ScriptedCommand> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Entries for the same frame keep their file order.
    pub fn new(mut entries: Vec<ScriptedCommand>) -> Self {
        entries.sort_by_key(|e| e.frame);
        Self { entries, cursor: 0 }
    }

    /// Commands due at or before `frame` that have not been handed out yet.
    pub fn due(&mut self, frame: u64) -> Vec<FlightCommand> {
        let mut due = Vec::new();
        while let Some(entry) = self.entries.get(self.cursor) {
            if entry.frame > frame {
                break;
            }
            due.push(entry.command.clone());
            self.cursor += 1;
        }
        due
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
