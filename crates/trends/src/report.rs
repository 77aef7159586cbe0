//! Building the rating trend report.
//!
//! ## Algorithm
//! 1. Read the manifest to find every available season
//! 2. Load all season files in parallel; unreadable seasons are skipped
//! 3. Average each season's rated entries
//! 4. Sort chronologically and compute overall, lowest and highest averages

use crate::average::SeasonAverage;
use anyhow::{Context, Result};
use catalog::{CatalogStore, SeasonKey, TrendReport};
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

/// Margin added around the data range on the chart's y axis
const CHART_MARGIN: f64 = 0.3;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Assemble a report from season averages, in any order.
///
/// Returns `None` when there is no season to report on.
pub fn build_report(mut seasons: Vec<SeasonAverage>) -> Option<TrendReport> {
    if seasons.is_empty() {
        return None;
    }
    seasons.sort_by_key(|s| s.key);

    let ratings: Vec<f64> = seasons.iter().map(|s| s.avg_rating).collect();
    let overall = ratings.iter().sum::<f64>() / ratings.len() as f64;
    let min = ratings.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(TrendReport {
        labels: seasons.iter().map(|s| s.key.label()).collect(),
        dates: seasons.iter().map(|s| s.key.start_date()).collect(),
        ratings: ratings.iter().copied().map(round2).collect(),
        counts: seasons.iter().map(|s| s.rated_count).collect(),
        overall_average: round2(overall),
        min_rating: round2(min),
        max_rating: round2(max),
    })
}

/// Build the trend report from every season listed in the manifest
#[instrument(skip(store), fields(data_dir = %store.data_dir().display()))]
pub fn build_trend(store: &CatalogStore) -> Result<Option<TrendReport>> {
    let manifest = store
        .load_manifest()
        .context("Failed to load manifest for trend")?;
    let keys: Vec<SeasonKey> = manifest.entries.iter().map(|e| e.key()).collect();
    debug!("Building trend over {} seasons", keys.len());

    let loaded: Vec<_> = store
        .load_seasons(&keys)
        .into_iter()
        .filter_map(|(key, result)| match result {
            Ok(records) => Some((key, records)),
            Err(e) => {
                warn!("Skipping {}: {}", key, e);
                None
            }
        })
        .collect();

    let averages: Vec<SeasonAverage> = loaded
        .par_iter()
        .filter_map(|(key, records)| SeasonAverage::from_records(*key, records))
        .collect();

    for avg in &averages {
        debug!(
            "{}: {:.2} (from {} rated entries)",
            avg.key, avg.avg_rating, avg.rated_count
        );
    }

    let report = build_report(averages);
    match &report {
        Some(report) => info!(
            "Trend covers {} seasons, overall average {:.2}",
            report.ratings.len(),
            report.overall_average
        ),
        None => warn!("No rated seasons, no trend to report"),
    }
    Ok(report)
}

/// Y-axis range of the trend chart, widened to whole numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub min: f64,
    pub max: f64,
}

impl ChartBounds {
    pub fn for_report(report: &TrendReport) -> Self {
        Self {
            min: (report.min_rating - CHART_MARGIN).floor(),
            max: (report.max_rating + CHART_MARGIN).ceil(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Manifest, ManifestEntry, Record, Season};

    fn average(year: i32, season: Season, avg_rating: f64, rated_count: usize) -> SeasonAverage {
        SeasonAverage {
            key: SeasonKey::new(year, season),
            avg_rating,
            rated_count,
            total_count: rated_count,
        }
    }

    #[test]
    fn test_report_is_chronological() {
        let report = build_report(vec![
            average(2024, Season::Fall, 7.0, 10),
            average(2023, Season::Winter, 6.5, 8),
            average(2024, Season::Spring, 7.5, 12),
        ])
        .unwrap();

        assert_eq!(report.labels, vec!["Winter 2023", "Spring 2024", "Fall 2024"]);
        assert_eq!(report.dates, vec!["2023-01-01", "2024-04-01", "2024-10-01"]);
        assert_eq!(report.ratings, vec![6.5, 7.5, 7.0]);
        assert_eq!(report.counts, vec![8, 12, 10]);
        assert_eq!(report.overall_average, 7.0);
        assert_eq!(report.min_rating, 6.5);
        assert_eq!(report.max_rating, 7.5);
    }

    #[test]
    fn test_ratings_are_rounded() {
        let report = build_report(vec![average(2022, Season::Summer, 6.666666, 3)]).unwrap();
        assert_eq!(report.ratings, vec![6.67]);
        assert_eq!(report.overall_average, 6.67);
    }

    #[test]
    fn test_empty_report() {
        assert!(build_report(Vec::new()).is_none());
    }

    #[test]
    fn test_chart_bounds() {
        let report = build_report(vec![
            average(2020, Season::Winter, 6.2, 1),
            average(2020, Season::Spring, 7.8, 1),
        ])
        .unwrap();
        let bounds = ChartBounds::for_report(&report);
        assert_eq!(bounds.min, 5.0);
        assert_eq!(bounds.max, 9.0);
    }

    #[test]
    fn test_build_trend_skips_missing_seasons() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path());

        let spring = SeasonKey::new(2025, Season::Spring);
        let rated = |score: f64| Record { rating: Some(score), ..Default::default() };
        store.write_season(spring, &[rated(8.0), rated(7.0), Record::default()]).unwrap();
        store
            .write_manifest(&Manifest::new(vec![
                ManifestEntry { year: 2025, season: Season::Summer, count: 3 },
                ManifestEntry { year: 2025, season: Season::Spring, count: 3 },
            ]))
            .unwrap();

        let report = build_trend(&store).unwrap().unwrap();
        assert_eq!(report.labels, vec!["Spring 2025"]);
        assert_eq!(report.ratings, vec![7.5]);
        assert_eq!(report.counts, vec![2]);
    }

    #[test]
    fn test_build_trend_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        assert!(build_trend(&CatalogStore::new(dir.path())).is_err());
    }
}
