//! Memoization of loaded tables by source path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::LoadResult;
use crate::types::DataSet;

use super::loader::{load, LoadOptions};

/// Loaded tables keyed by the path they were read from.
///
/// A table is read once per distinct path and handed out as a shared [`Arc`] until the
/// entry is invalidated. Failed loads are not cached. There is no eviction; callers clear
/// entries when the underlying file changes.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, Arc<DataSet>>,
    version: u64,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it on first use.
    pub fn get_or_load(
        &mut self,
        path: impl AsRef<Path>,
        options: &LoadOptions,
    ) -> LoadResult<Arc<DataSet>> {
        let path = path.as_ref();
        if let Some(table) = self.entries.get(path) {
            tracing::debug!(path = %path.display(), "table cache hit");
            return Ok(Arc::clone(table));
        }

        tracing::debug!(path = %path.display(), "table cache miss");
        let table = Arc::new(load(path, options)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Cached table for `path`, if any, without loading.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Arc<DataSet>> {
        self.entries.get(path.as_ref()).cloned()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    /// Drop the entry for `path`. Returns `true` if one existed.
    pub fn invalidate(&mut self, path: impl AsRef<Path>) -> bool {
        let removed = self.entries.remove(path.as_ref()).is_some();
        if removed {
            self.version += 1;
        }
        removed
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.version += 1;
    }

    /// Incremented on every invalidation or clear.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::TableCache;
    use crate::error::LoadError;
    use crate::ingestion::LoadOptions;

    #[test]
    fn failed_loads_are_not_cached() {
        let mut cache = TableCache::new();
        let err = cache
            .get_or_load("definitely/not/here.csv.gz", &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidating_unknown_path_keeps_version() {
        let mut cache = TableCache::new();
        assert!(!cache.invalidate("unknown.csv"));
        assert_eq!(cache.version(), 0);
        cache.clear();
        assert_eq!(cache.version(), 1);
    }
}
