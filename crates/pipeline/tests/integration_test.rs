//! Integration tests for the pipeline.
//!
//! These tests check the properties every visibility computation must
//! hold across a realistic season and a spread of toggle combinations.

use catalog::{Record, Season, SeasonKey};
use chrono::NaiveDate;
use pipeline::{FilterConfig, FilterPipeline, GenreCombinator, default_config, filter};

fn entry(
    title: &str,
    genres: &[&str],
    rating: Option<f64>,
    adult: bool,
    domestic: Option<bool>,
) -> Record {
    Record {
        title: title.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        rating,
        is_adult_content: adult,
        is_domestic_origin: domestic,
        ..Default::default()
    }
}

fn create_test_season() -> Vec<Record> {
    vec![
        entry("Frontier Blades", &["Action", "Fantasy"], Some(7.8), false, Some(true)),
        entry("Club Days", &["Comedy", "School"], Some(6.9), false, Some(true)),
        entry("After Hours", &["Romance"], Some(6.1), true, Some(true)),
        entry("Star Relay", &["Action", "Comedy", "Drama"], None, false, None),
        entry("Overseas Pilot", &["Action", "Sci-Fi"], Some(7.2), false, Some(false)),
        entry("Quiet Shorts", &[], None, false, Some(true)),
        entry("Night Shift", &["Comedy"], None, true, Some(false)),
    ]
}

fn all_configs() -> Vec<FilterConfig> {
    let selections: [&[&str]; 4] = [&[], &["Action"], &["Action", "Comedy"], &["Drama", "Romance"]];
    let mut configs = Vec::new();
    for include_adult in [false, true] {
        for hide_unrated in [false, true] {
            for domestic_only in [false, true] {
                for selection in selections {
                    for combinator in [GenreCombinator::Any, GenreCombinator::All] {
                        configs.push(
                            FilterConfig::new()
                                .with_include_adult_content(include_adult)
                                .with_hide_unrated(hide_unrated)
                                .with_domestic_only(domestic_only)
                                .with_genres(selection.iter().copied())
                                .with_combinator(combinator),
                        );
                    }
                }
            }
        }
    }
    configs
}

fn is_subsequence(sub: &[Record], full: &[Record]) -> bool {
    let mut remaining = full.iter();
    sub.iter().all(|wanted| remaining.any(|r| r == wanted))
}

#[test]
fn test_output_is_ordered_subsequence() {
    let season = create_test_season();
    for config in all_configs() {
        let visible = filter(&season, &config);
        assert!(is_subsequence(&visible, &season), "order broken for {:?}", config);
    }
}

#[test]
fn test_filter_is_idempotent() {
    let season = create_test_season();
    for config in all_configs() {
        let once = filter(&season, &config);
        let twice = filter(&once, &config);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_exclusionary_toggles_are_monotonic() {
    let season = create_test_season();
    for config in all_configs() {
        let base = filter(&season, &config).len();

        let mut stricter = config.clone();
        stricter.include_adult_content = false;
        assert!(filter(&season, &stricter).len() <= base);

        let mut stricter = config.clone();
        stricter.hide_unrated = true;
        assert!(filter(&season, &stricter).len() <= base);

        let mut stricter = config.clone();
        stricter.domestic_only = true;
        assert!(filter(&season, &stricter).len() <= base);
    }
}

#[test]
fn test_empty_genre_selection_never_excludes() {
    let season = create_test_season();
    let permissive = FilterConfig::new().with_include_adult_content(true);

    for combinator in [GenreCombinator::Any, GenreCombinator::All] {
        let config = permissive.clone().with_combinator(combinator);
        assert_eq!(filter(&season, &config).len(), season.len());
    }
}

#[test]
fn test_any_versus_all() {
    let records = vec![
        entry("Action only", &["Action"], Some(7.0), false, None),
        entry("Action comedy drama", &["Action", "Comedy", "Drama"], Some(7.0), false, None),
    ];
    let any = FilterConfig::new().with_genres(["Action", "Comedy"]);
    let all = any.clone().with_combinator(GenreCombinator::All);

    assert_eq!(filter(&records, &any).len(), 2);
    let visible = filter(&records, &all);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Action comedy drama");
}

#[test]
fn test_unrated_exclusion() {
    let records = vec![entry("Pending", &["Drama"], None, false, None)];

    let hide = FilterConfig::new().with_hide_unrated(true);
    assert!(filter(&records, &hide).is_empty());

    let show = FilterConfig::new().with_hide_unrated(false);
    assert_eq!(filter(&records, &show).len(), 1);
}

#[test]
fn test_opened_season_view() {
    let season = create_test_season();
    let key = SeasonKey::new(2025, Season::Spring);
    let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();

    let config = default_config(key, today);
    let pipeline = FilterPipeline::standard();
    let titles: Vec<&str> = pipeline
        .visible(&season, &config)
        .into_iter()
        .map(|r| r.title.as_str())
        .collect();

    // Past the first month: unrated hidden, adult hidden, foreign hidden
    assert_eq!(titles, vec!["Frontier Blades", "Club Days"]);
}
