//! Filter to hide adult entries unless the user opted in.

use crate::config::FilterConfig;
use crate::traits::Filter;
use catalog::Record;

/// Removes records flagged as adult content while
/// `include_adult_content` is off.
pub struct AdultContentFilter;

impl Filter for AdultContentFilter {
    fn name(&self) -> &str {
        "AdultContentFilter"
    }

    fn matches(&self, record: &Record, config: &FilterConfig) -> bool {
        config.include_adult_content || !record.is_adult_content
    }
}
