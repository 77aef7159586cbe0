//! Per-season average rating.

use catalog::{Record, SeasonKey};

/// Average score of one season's rated entries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonAverage {
    pub key: SeasonKey,
    pub avg_rating: f64,
    /// Entries that contributed to the average
    pub rated_count: usize,
    pub total_count: usize,
}

impl SeasonAverage {
    /// `None` when no record of the season is rated
    pub fn from_records(key: SeasonKey, records: &[Record]) -> Option<Self> {
        let ratings: Vec<f64> = records.iter().filter_map(|r| r.rating).collect();
        if ratings.is_empty() {
            return None;
        }
        let total: f64 = ratings.iter().sum();
        Some(Self {
            key,
            avg_rating: total / ratings.len() as f64,
            rated_count: ratings.len(),
            total_count: records.len(),
        })
    }
}
