//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable
//! predicates to be applied to a season's records.

use crate::config::FilterConfig;
use catalog::Record;

/// One clause of the visibility predicate.
///
/// Filters are total: a record with missing or odd optional fields still
/// gets a yes/no answer, never an error.
///
/// ## Design Note
/// - `Send + Sync` allows a pipeline to be shared behind an `Arc`
/// - `apply` takes ownership of the Vec and returns the survivors in
///   their original order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `record` passes this clause under `config`
    fn matches(&self, record: &Record, config: &FilterConfig) -> bool;

    /// Keep the records passing this clause, preserving order.
    fn apply(&self, records: Vec<Record>, config: &FilterConfig) -> Vec<Record> {
        records
            .into_iter()
            .filter(|record| self.matches(record, config))
            .collect()
    }
}
