//! Explicit `criteria → filter → sample` driver.
//!
//! Presentation layers call [`CallPipeline::select`] whenever their filter state changes;
//! the table itself is read once per path through the pipeline's [`TableCache`].

use std::path::Path;
use std::sync::Arc;

use crate::error::LoadResult;
use crate::ingestion::{LoadOptions, TableCache};
use crate::processing::{filter_calls, sample, FilterCriteria};
use crate::types::DataSet;

/// Advisory shown when no call matches the current filters.
pub const NO_DATA_NOTICE: &str = "No data found for the selected filters.";

/// Result of applying [`FilterCriteria`] to a loaded table.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Every matching row, in source order.
    pub filtered: DataSet,
    /// At most `criteria.sample_size` rows of `filtered`, for scatter plots.
    pub sample: DataSet,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Non-fatal "no data" advisory for empty selections.
    pub fn notice(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_DATA_NOTICE)
    }
}

/// Filter `table` by `criteria` and draw the bounded sample.
pub fn select(table: &DataSet, criteria: &FilterCriteria) -> Selection {
    let filtered = filter_calls(table, criteria);
    let sample = sample(&filtered, criteria.sample_size, criteria.seed);
    Selection { filtered, sample }
}

/// Load options plus a table cache; the unit a dashboard session holds on to.
#[derive(Debug, Default)]
pub struct CallPipeline {
    options: LoadOptions,
    cache: TableCache,
}

impl CallPipeline {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            cache: TableCache::new(),
        }
    }

    /// Use an existing cache, e.g. one shared with another pipeline configuration.
    pub fn with_cache(options: LoadOptions, cache: TableCache) -> Self {
        Self { options, cache }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut TableCache {
        &mut self.cache
    }

    /// Cached table for `path`, loading it on first use.
    pub fn load(&mut self, path: impl AsRef<Path>) -> LoadResult<Arc<DataSet>> {
        self.cache.get_or_load(path, &self.options)
    }

    /// Load (or reuse) the table at `path` and apply `criteria`.
    pub fn select(
        &mut self,
        path: impl AsRef<Path>,
        criteria: &FilterCriteria,
    ) -> LoadResult<Selection> {
        let table = self.load(path)?;
        let selection = select(&table, criteria);
        if let Some(notice) = selection.notice() {
            tracing::info!(notice, "empty selection");
        }
        Ok(selection)
    }
}
