//! Persisted boolean flags (e.g. whether the first-run hint was shown)

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Key set once the onboarding hint has played to completion
pub const TUTORIAL_SHOWN_KEY: &str = "tutorialShown";

/// Get/set capability for presence flags
pub trait FlagStore {
    fn is_set(&self, key: &str) -> crate::Result<bool>;
    fn set(&mut self, key: &str) -> crate::Result<()>;
    fn clear(&mut self, key: &str) -> crate::Result<()>;
}

/// In-memory store, used by tests and when no data dir is available
#[derive(Debug, Clone, Default)]
pub struct MemoryFlagStore {
    flags: HashSet<String>,
    writes: usize,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl FlagStore for MemoryFlagStore {
    fn is_set(&self, key: &str) -> crate::Result<bool> {
        Ok(self.flags.contains(key))
    }

    fn set(&mut self, key: &str) -> crate::Result<()> {
        self.flags.insert(key.to_string());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> crate::Result<()> {
        self.flags.remove(key);
        Ok(())
    }
}

/// Flags stored as a JSON object in a single file
#[derive(Debug, Clone)]
pub struct JsonFlagStore {
    path: PathBuf,
}

impl JsonFlagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> crate::Result<BTreeMap<String, bool>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, flags: &BTreeMap<String, bool>) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(flags)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl FlagStore for JsonFlagStore {
    fn is_set(&self, key: &str) -> crate::Result<bool> {
        Ok(self.read()?.get(key).copied().unwrap_or(false))
    }

    fn set(&mut self, key: &str) -> crate::Result<()> {
        let mut flags = self.read()?;
        flags.insert(key.to_string(), true);
        self.write(&flags)
    }

    fn clear(&mut self, key: &str) -> crate::Result<()> {
        let mut flags = self.read()?;
        if flags.remove(key).is_some() {
            self.write(&flags)?;
        }
        Ok(())
    }
}
