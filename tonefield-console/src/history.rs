//! # Hit Point History
//!
//! Keeps confirmed hit points in a single pretty-printed JSON file so they can
//! be reviewed in later sessions. Records are only ever appended or deleted.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tonefield_core::record::HitPointRecord;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitHistory {
    pub records: Vec<HitPointRecord>,
}

impl HitHistory {
    /// Loads the history from `path`. A missing file is an empty history.
    pub fn load(path: &Path) -> Result<Self> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no history file yet");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("opening history {}", path.display()));
            }
        };
        let mut data = String::new();
        file.read_to_string(&mut data)
            .with_context(|| format!("reading history {}", path.display()))?;
        let history: HitHistory = serde_json::from_str(&data)
            .with_context(|| format!("parsing history {}", path.display()))?;
        Ok(history)
    }

    /// Writes the whole history to `path`, replacing its contents.
    ///
    /// The data goes to a sibling `.tmp` file first and is renamed over `path`,
    /// so a failed write leaves the previous history intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        let mut file =
            File::create(&tmp).with_context(|| format!("creating history {}", tmp.display()))?;
        file.write_all(json_string.as_bytes())
            .and_then(|()| file.flush())
            .with_context(|| format!("writing history {}", tmp.display()))?;
        drop(file);
        fs::rename(&tmp, path)
            .with_context(|| format!("replacing history {}", path.display()))?;
        Ok(())
    }

    pub fn insert(&mut self, record: HitPointRecord) {
        self.records.push(record);
    }

    /// Newest records first, at most `limit` of them.
    pub fn recent(&self, limit: usize) -> Vec<&HitPointRecord> {
        let mut sorted: Vec<&HitPointRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted.truncate(limit);
        sorted
    }

    /// Removes a record by id, returning it if it existed.
    pub fn delete(&mut self, id: Uuid) -> Option<HitPointRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
