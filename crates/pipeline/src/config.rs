//! User-controlled filter settings.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How a multi-genre selection is matched against a record's genres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenreCombinator {
    /// The record has at least one selected genre
    #[default]
    Any,
    /// The record has every selected genre
    All,
}

impl fmt::Display for GenreCombinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreCombinator::Any => f.write_str("any"),
            GenreCombinator::All => f.write_str("all"),
        }
    }
}

impl FromStr for GenreCombinator {
    type Err = String;

    /// Accepts `any`/`or` and `all`/`and`, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" | "or" => Ok(GenreCombinator::Any),
            "all" | "and" => Ok(GenreCombinator::All),
            _ => Err(format!("unknown genre mode '{s}', expected 'any' or 'all'")),
        }
    }
}

/// The toggles of a season view.
///
/// Owned by the caller and passed into the pipeline on every call; the
/// pipeline never keeps a copy. `Default` is the fully permissive
/// configuration: every record is visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterConfig {
    pub include_adult_content: bool,
    pub hide_unrated: bool,
    pub domestic_only: bool,
    /// Empty means no genre restriction
    pub selected_genres: BTreeSet<String>,
    pub genre_combinator: GenreCombinator,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_adult_content(mut self, include: bool) -> Self {
        self.include_adult_content = include;
        self
    }

    pub fn with_hide_unrated(mut self, hide: bool) -> Self {
        self.hide_unrated = hide;
        self
    }

    pub fn with_domestic_only(mut self, domestic_only: bool) -> Self {
        self.domestic_only = domestic_only;
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_combinator(mut self, combinator: GenreCombinator) -> Self {
        self.genre_combinator = combinator;
        self
    }

    /// Flip one genre in or out of the selection; returns whether it is
    /// selected afterwards.
    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        if self.selected_genres.remove(genre) {
            false
        } else {
            self.selected_genres.insert(genre.to_string());
            true
        }
    }

    /// Add a genre to the selection; selecting it twice keeps it selected
    pub fn select_genre(&mut self, genre: &str) {
        self.selected_genres.insert(genre.to_string());
    }

    pub fn clear_genres(&mut self) {
        self.selected_genres.clear();
    }
}
