//! Filter to hide entries that have no score yet.

use crate::config::FilterConfig;
use crate::traits::Filter;
use catalog::Record;

/// Removes unrated records while `hide_unrated` is on.
pub struct UnratedFilter;

impl Filter for UnratedFilter {
    fn name(&self) -> &str {
        "UnratedFilter"
    }

    fn matches(&self, record: &Record, config: &FilterConfig) -> bool {
        !config.hide_unrated || record.is_rated()
    }
}
