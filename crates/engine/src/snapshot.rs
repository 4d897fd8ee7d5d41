//! Save and restore a run's encounter state as JSON.

use std::fs;
use std::path::Path;

use mystery_encounters_domain::EncounterSession;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted form of a run: the session plus the wave it was saved on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub version: u32,
    pub wave: u32,
    pub session: EncounterSession,
}

impl SessionSnapshot {
    pub fn new(wave: u32, session: EncounterSession) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            wave,
            session,
        }
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a snapshot.
    ///
    /// # Errors
    ///
    /// `EngineError::SnapshotVersion` for snapshots from another version,
    /// `EngineError::Serialization` for malformed JSON or invalid auras.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let snapshot: SessionSnapshot = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(EngineError::SnapshotVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        fs::write(path, self.to_json()?)?;
        tracing::debug!(path = %path.display(), wave = self.wave, "Saved session snapshot");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let snapshot = Self::from_json(&fs::read_to_string(path)?)?;
        tracing::debug!(path = %path.display(), wave = snapshot.wave, "Loaded session snapshot");
        Ok(snapshot)
    }
}
