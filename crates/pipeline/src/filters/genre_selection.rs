//! Filter to keep records matching the selected genres.
//!
//! Matching is exact and case-sensitive. With an empty selection every
//! record passes, whatever the combinator.

use crate::config::{FilterConfig, GenreCombinator};
use crate::traits::Filter;
use catalog::Record;

/// Keeps records whose genres satisfy the selection.
///
/// ## Algorithm
/// - `Any`: the record has at least one selected genre
/// - `All`: every selected genre appears on the record
///
/// A record without genres fails any non-empty selection.
pub struct GenreSelectionFilter;

impl Filter for GenreSelectionFilter {
    fn name(&self) -> &str {
        "GenreSelectionFilter"
    }

    fn matches(&self, record: &Record, config: &FilterConfig) -> bool {
        let selected = &config.selected_genres;
        if selected.is_empty() {
            return true;
        }
        match config.genre_combinator {
            GenreCombinator::Any => selected.iter().any(|genre| record.has_genre(genre)),
            GenreCombinator::All => selected.iter().all(|genre| record.has_genre(genre)),
        }
    }
}
