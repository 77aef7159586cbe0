//! Filter to keep domestic productions only.
//!
//! Only an explicit "not domestic" excludes a record. Records whose origin
//! is unknown are kept, the same as domestic ones.

use crate::config::FilterConfig;
use crate::traits::Filter;
use catalog::Record;

/// Removes records explicitly marked as foreign while `domestic_only` is on.
pub struct DomesticOriginFilter;

impl Filter for DomesticOriginFilter {
    fn name(&self) -> &str {
        "DomesticOriginFilter"
    }

    fn matches(&self, record: &Record, config: &FilterConfig) -> bool {
        !config.domestic_only || record.is_domestic_origin != Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{record, titles};

    #[test]
    fn test_domestic_origin_filter() {
        let records = vec![
            Record { is_domestic_origin: Some(true), ..record("Domestic") },
            Record { is_domestic_origin: Some(false), ..record("Foreign") },
            record("Unknown"),
        ];

        let config = FilterConfig::new().with_domestic_only(true);
        let filtered = DomesticOriginFilter.apply(records.clone(), &config);
        assert_eq!(titles(&filtered), vec!["Domestic", "Unknown"]);

        let filtered = DomesticOriginFilter.apply(records, &FilterConfig::new());
        assert_eq!(filtered.len(), 3);
    }
}
