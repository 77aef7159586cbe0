//! # Season View
//!
//! One opened season: its records, the genres offered for filtering and
//! the toggle state. The view owns its `FilterConfig`; every toggle
//! mutates it in place and the caller re-reads `visible()` afterwards.

use std::sync::Arc;

use catalog::{Record, SeasonKey, available_genres};
use chrono::NaiveDate;
use pipeline::{FilterConfig, FilterPipeline, GenreCombinator, default_config};
use tracing::debug;

pub struct SeasonView {
    key: SeasonKey,
    records: Vec<Record>,
    genres: Vec<String>,
    config: FilterConfig,
    pipeline: Arc<FilterPipeline>,
}

impl SeasonView {
    /// Open a view on `records`, with toggles defaulted for `today`
    pub fn new(
        key: SeasonKey,
        records: Vec<Record>,
        today: NaiveDate,
        pipeline: Arc<FilterPipeline>,
    ) -> Self {
        let config = default_config(key, today);
        debug!(
            "Opened {} with {} records (hide unrated: {})",
            key,
            records.len(),
            config.hide_unrated
        );
        Self {
            key,
            genres: available_genres(&records),
            records,
            config,
            pipeline,
        }
    }

    pub fn key(&self) -> SeasonKey {
        self.key
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Genres offered as filters, sorted
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn set_include_adult(&mut self, include: bool) {
        self.config.include_adult_content = include;
    }

    pub fn set_hide_unrated(&mut self, hide: bool) {
        self.config.hide_unrated = hide;
    }

    pub fn set_domestic_only(&mut self, domestic_only: bool) {
        self.config.domestic_only = domestic_only;
    }

    pub fn set_combinator(&mut self, combinator: GenreCombinator) {
        self.config.genre_combinator = combinator;
    }

    /// Select or deselect a genre; returns whether it is now selected
    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        if !self.genres.iter().any(|g| g == genre) {
            debug!("Genre '{}' does not occur in {}", genre, self.key);
        }
        self.config.toggle_genre(genre)
    }

    pub fn select_genre(&mut self, genre: &str) {
        if !self.genres.iter().any(|g| g == genre) {
            debug!("Genre '{}' does not occur in {}", genre, self.key);
        }
        self.config.select_genre(genre);
    }

    /// Back to "All": no genre restriction
    pub fn clear_genres(&mut self) {
        self.config.clear_genres();
    }

    /// Records passing the current toggles, in catalog order
    pub fn visible(&self) -> Vec<&Record> {
        self.pipeline.visible(&self.records, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Season;

    fn record(title: &str, genres: &[&str], rating: Option<f64>) -> Record {
        Record {
            title: title.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            rating,
            ..Default::default()
        }
    }

    fn open(today: NaiveDate) -> SeasonView {
        let records = vec![
            record("Rated action", &["Action"], Some(7.1)),
            record("Unrated comedy", &["Comedy"], None),
            record("Rated action comedy", &["Action", "Comedy"], Some(8.2)),
            Record { is_adult_content: true, ..record("Adult", &["Hentai"], Some(5.0)) },
        ];
        SeasonView::new(
            SeasonKey::new(2025, Season::Summer),
            records,
            today,
            Arc::new(FilterPipeline::standard()),
        )
    }

    fn titles(view: &SeasonView) -> Vec<&str> {
        view.visible().into_iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_defaults_during_first_month() {
        let view = open(NaiveDate::from_ymd_opt(2025, 7, 12).unwrap());
        assert!(!view.config().hide_unrated);
        assert_eq!(view.genres(), ["Action", "Comedy"]);
        assert_eq!(
            titles(&view),
            vec!["Rated action", "Unrated comedy", "Rated action comedy"]
        );
    }

    #[test]
    fn test_defaults_after_first_month() {
        let view = open(NaiveDate::from_ymd_opt(2025, 8, 3).unwrap());
        assert!(view.config().hide_unrated);
        assert_eq!(titles(&view), vec!["Rated action", "Rated action comedy"]);
    }

    #[test]
    fn test_toggles_update_visible() {
        let mut view = open(NaiveDate::from_ymd_opt(2025, 7, 12).unwrap());

        view.set_include_adult(true);
        assert_eq!(view.visible().len(), 4);

        assert!(view.toggle_genre("Action"));
        assert!(view.toggle_genre("Comedy"));
        assert_eq!(view.visible().len(), 3);

        view.set_combinator(GenreCombinator::All);
        assert_eq!(titles(&view), vec!["Rated action comedy"]);

        view.clear_genres();
        view.set_hide_unrated(true);
        assert_eq!(view.visible().len(), 3);
        assert_eq!(view.records().len(), 4);
    }

    #[test]
    fn test_select_genre_twice_keeps_it_selected() {
        let mut view = open(NaiveDate::from_ymd_opt(2025, 7, 12).unwrap());

        view.select_genre("Action");
        view.select_genre("Action");

        assert_eq!(view.config().selected_genres.len(), 1);
        assert_eq!(titles(&view), vec!["Rated action", "Rated action comedy"]);
    }
}
