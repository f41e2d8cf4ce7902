//! Durable key→string persistence for per-group palette order.
//!
//! Storage is an injected capability so the surface never touches browser
//! or filesystem mechanics directly: [`MemoryStore`] backs tests and
//! ephemeral sessions, [`JsonFileStore`] backs desktop hosts.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::warn;

/// Durable key→string persistence. Absent keys are normal on first run.
pub trait OrderStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryStore
// ────────────────────────────────────────────────────────────────────────────

/// In-memory store; contents die with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry, e.g. to simulate a previous session in tests.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl OrderStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// JsonFileStore
// ────────────────────────────────────────────────────────────────────────────

/// File-backed store: one JSON object of key→string entries, rewritten on
/// every mutation. Write failures are logged and the in-memory state stays
/// authoritative for the rest of the session.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: Utf8PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing entries. A missing file is
    /// an empty store; an unreadable or malformed file is an error.
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read order store {}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Malformed order store {}", path))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    fn persist(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("Failed to write order store {}", self.path))?;
        Ok(())
    }
}

impl OrderStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        if let Err(err) = self.persist() {
            warn!(%key, error = %err, "order store write failed");
        }
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            if let Err(err) = self.persist() {
                warn!(%key, error = %err, "order store write failed");
            }
        }
    }
}
