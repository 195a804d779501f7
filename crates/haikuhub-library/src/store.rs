//! In-memory haiku store, loaded once at startup.

use std::path::Path;

use rand::RngExt;
use tracing::info;

use haikuhub_core::error::AppError;
use haikuhub_core::result::AppResult;

use crate::model::Haiku;

/// Immutable collection of haikus.
#[derive(Debug, Clone)]
pub struct HaikuStore {
    haikus: Vec<Haiku>,
}

impl HaikuStore {
    /// Loads the collection from a JSON file containing an array of haiku
    /// records.
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::storage(format!(
                "failed to read haiku data file '{}': {e}",
                path.display()
            ))
        })?;

        let haikus: Vec<Haiku> = serde_json::from_str(&raw)?;
        info!(count = haikus.len(), path = %path.display(), "Haiku collection loaded");

        Ok(Self { haikus })
    }

    /// Builds a store from an in-memory collection (used by tests and
    /// embedded setups).
    pub fn from_haikus(haikus: Vec<Haiku>) -> Self {
        Self { haikus }
    }

    /// All haikus in file order.
    pub fn list(&self) -> &[Haiku] {
        &self.haikus
    }

    /// Haiku at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Haiku> {
        self.haikus.get(index)
    }

    /// Number of haikus.
    pub fn len(&self) -> usize {
        self.haikus.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.haikus.is_empty()
    }

    /// Uniformly random haiku with its index; `None` when empty.
    pub fn random(&self) -> Option<(usize, &Haiku)> {
        if self.haikus.is_empty() {
            return None;
        }
        let index = rand::rng().random_range(0..self.haikus.len());
        Some((index, &self.haikus[index]))
    }
}
