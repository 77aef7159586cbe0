//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! filters together using the builder pattern. A record is visible when
//! every filter in the pipeline matches it.

use crate::config::FilterConfig;
use crate::filters::{AdultContentFilter, DomesticOriginFilter, GenreSelectionFilter, UnratedFilter};
use crate::traits::Filter;
use catalog::Record;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AdultContentFilter)
///     .add_filter(UnratedFilter);
///
/// let visible = pipeline.apply(records, &config);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The catalog's visibility predicate: adult content, unrated,
    /// domestic origin and genre selection.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(AdultContentFilter)
            .add_filter(UnratedFilter)
            .add_filter(DomesticOriginFilter)
            .add_filter(GenreSelectionFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Whether a single record passes every filter.
    pub fn is_visible(&self, record: &Record, config: &FilterConfig) -> bool {
        self.filters.iter().all(|f| f.matches(record, config))
    }

    /// Apply all filters in sequence to owned records.
    ///
    /// Survivors keep their relative order. Each step logs its input and
    /// output counts at debug level.
    pub fn apply(&self, records: Vec<Record>, config: &FilterConfig) -> Vec<Record> {
        let mut current = records;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, config);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// Borrowing variant of `apply`: references to the visible records, in
    /// input order, evaluated in a single pass.
    pub fn visible<'a>(&self, records: &'a [Record], config: &FilterConfig) -> Vec<&'a Record> {
        let visible: Vec<&Record> = records
            .iter()
            .filter(|record| self.is_visible(record, config))
            .collect();
        tracing::debug!("{} of {} records visible", visible.len(), records.len());
        visible
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible subset of `records` under `config`, using the standard pipeline.
///
/// Stable, total and pure: the input is left untouched.
pub fn filter(records: &[Record], config: &FilterConfig) -> Vec<Record> {
    FilterPipeline::standard().apply(records.to_vec(), config)
}
