use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context, Result};

use super::loader::load_file;
use super::model::AirQualityDataset;

// ---------------------------------------------------------------------------
// Read-through dataset cache
// ---------------------------------------------------------------------------

struct CacheEntry {
    modified: Option<SystemTime>,
    dataset: Arc<AirQualityDataset>,
}

/// Memoizes parsed datasets per file.
///
/// An entry stays valid while the file's modification time is unchanged, so
/// re-opening or reloading an untouched file never reparses it.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on a miss or when the
    /// file changed on disk since it was cached.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<AirQualityDataset>> {
        let key = path
            .canonicalize()
            .with_context(|| format!("resolving {}", path.display()))?;
        let modified = std::fs::metadata(&key).and_then(|m| m.modified()).ok();

        if let Some(entry) = self.entries.get(&key) {
            if entry.modified.is_some() && entry.modified == modified {
                log::debug!("Dataset cache hit for {}", key.display());
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        let dataset = Arc::new(load_file(&key)?);
        self.entries.insert(
            key,
            CacheEntry {
                modified,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop the cached entry for `path`, forcing the next access to reparse.
    pub fn invalidate(&mut self, path: &Path) {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.entries.remove(&key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
