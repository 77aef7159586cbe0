//! Default values for a freshly opened season view.
//!
//! Entries of a season that just started collect scores slowly, so during
//! its first month most of them are unrated and hiding them would empty
//! the view. Once that month has passed, a missing score is itself a
//! signal and unrated entries are hidden by default.

use crate::config::FilterConfig;
use catalog::SeasonKey;
use chrono::{Datelike, NaiveDate};

/// Initial value of the "hide unrated" toggle for `target`, as seen on
/// `today`.
///
/// | target relative to today              | result                     |
/// |---------------------------------------|----------------------------|
/// | later year                            | `false`                    |
/// | earlier year                          | `true`                     |
/// | same year, season not started         | `false`                    |
/// | same year, current season             | `true` after first month   |
/// | same year, season already over        | `true`                     |
pub fn resolve_hide_unrated_default(target: SeasonKey, today: NaiveDate) -> bool {
    if target.year > today.year() {
        return false;
    }
    if target.year < today.year() {
        return true;
    }

    let start_month = target.season.start_month();
    let current_month = today.month();
    if current_month < start_month {
        return false;
    }
    if target.season.contains_month(current_month) {
        return current_month > start_month;
    }
    true
}

/// Toggle state for a newly opened season: adult content hidden,
/// domestic productions only, no genre restriction, and the hide-unrated
/// default from `resolve_hide_unrated_default`.
pub fn default_config(target: SeasonKey, today: NaiveDate) -> FilterConfig {
    FilterConfig::new()
        .with_include_adult_content(false)
        .with_domestic_only(true)
        .with_hide_unrated(resolve_hide_unrated_default(target, today))
}
