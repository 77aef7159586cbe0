//! Core domain types for the seasonal catalog.
//!
//! This module defines the data structures shared by every other crate:
//! - `Season` and `SeasonKey` identify one quarterly snapshot
//! - `Record` is one catalog entry as stored in a season file
//! - `Manifest` lists which seasons exist and how many entries each holds
//! - `TrendReport` is the precomputed rating history shown on the home page

use crate::error::CatalogError;
use crate::parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Seasons
// =============================================================================

/// The four broadcast seasons of a year.
///
/// Variant order is chronological, so the derived `Ord` sorts
/// winter before fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// All seasons in calendar order
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Canonical first month of the season (1-indexed)
    pub fn start_month(self) -> u32 {
        match self {
            Season::Winter => 1,
            Season::Spring => 4,
            Season::Summer => 7,
            Season::Fall => 10,
        }
    }

    /// Whether `month` (1-12) falls within this season.
    ///
    /// A season spans its start month through start + 2.
    pub fn contains_month(self, month: u32) -> bool {
        let start = self.start_month();
        month >= start && month <= start + 2
    }

    /// The season a given month belongs to, if the month is valid
    pub fn containing(month: u32) -> Option<Season> {
        Season::ALL.into_iter().find(|s| s.contains_month(month))
    }

    /// Lowercase name used in file paths and season keys
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }

    /// Capitalized name for display
    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Season::Winter => "❄️",
            Season::Spring => "🌸",
            Season::Summer => "☀️",
            Season::Fall => "🍂",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = CatalogError;

    /// Season names are matched case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" => Ok(Season::Fall),
            _ => Err(CatalogError::UnknownSeason(s.to_string())),
        }
    }
}

/// Identifies one quarterly catalog snapshot, e.g. spring 2025.
///
/// Ordering is chronological: by year, then by season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeasonKey {
    pub year: i32,
    pub season: Season,
}

impl SeasonKey {
    pub fn new(year: i32, season: Season) -> Self {
        Self { year, season }
    }

    /// First day of the season as `YYYY-MM-DD`
    pub fn start_date(&self) -> String {
        format!("{:04}-{:02}-01", self.year, self.season.start_month())
    }

    /// Display label, e.g. "Spring 2025"
    pub fn label(&self) -> String {
        format!("{} {}", self.season.label(), self.year)
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.season)
    }
}

impl FromStr for SeasonKey {
    type Err = CatalogError;

    /// Parses the `"<year>-<season>"` form, e.g. `"2025-spring"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, season) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| CatalogError::InvalidSeasonKey(s.to_string()))?;
        let year = year
            .parse()
            .map_err(|_| CatalogError::InvalidSeasonKey(s.to_string()))?;
        Ok(Self {
            year,
            season: season.parse()?,
        })
    }
}

// =============================================================================
// Records
// =============================================================================

/// One catalog entry as stored in a season file.
///
/// Only `genres`, `is_adult_content`, `is_domestic_origin` and `rating` are
/// inspected by the filter; everything else is carried for display. Every
/// field decodes leniently, a wrong type degrades to the field's default
/// instead of failing the whole season file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "mal_id", default, deserialize_with = "parser::or_default")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub title_japanese: Option<String>,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub title_english: Option<String>,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub synopsis: Option<String>,

    /// Score; `None` means the entry is unrated
    #[serde(rename = "score", default, deserialize_with = "parser::score")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub scored_by: Option<u64>,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub rank: Option<u64>,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub popularity: Option<u64>,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub members: Option<u64>,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub episodes: Option<u32>,

    /// Genre tags in source order
    #[serde(default, deserialize_with = "parser::string_list")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "parser::string_list")]
    pub themes: Vec<String>,
    #[serde(default, deserialize_with = "parser::string_list")]
    pub demographics: Vec<String>,
    #[serde(default, deserialize_with = "parser::string_list")]
    pub studios: Vec<String>,
    /// Source material; older files store a single string
    #[serde(default, deserialize_with = "parser::string_list")]
    pub source: Vec<String>,

    #[serde(default, deserialize_with = "parser::or_default")]
    pub aired_from: Option<String>,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "parser::or_default")]
    pub url: Option<String>,

    #[serde(rename = "is_hentai", default, deserialize_with = "parser::flag")]
    pub is_adult_content: bool,
    /// `None` when the origin is unknown
    #[serde(rename = "is_japanese", default, deserialize_with = "parser::optional_flag")]
    pub is_domestic_origin: Option<bool>,
}

impl Record {
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }

    /// Exact, case-sensitive genre membership
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

// =============================================================================
// Manifest
// =============================================================================

/// One available season and its entry count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub year: i32,
    pub season: Season,
    pub count: usize,
}

impl ManifestEntry {
    pub fn key(&self) -> SeasonKey {
        SeasonKey::new(self.year, self.season)
    }
}

/// Index of available seasons, stored as a bare JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped per year: years newest first, seasons winter to fall
    pub fn by_year(&self) -> Vec<(i32, Vec<ManifestEntry>)> {
        let mut groups: BTreeMap<i32, Vec<ManifestEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.year).or_default().push(*entry);
        }
        groups
            .into_iter()
            .rev()
            .map(|(year, mut seasons)| {
                seasons.sort_by_key(|e| e.season);
                (year, seasons)
            })
            .collect()
    }

    /// Insert or replace the entry for `entry`'s season, keeping the
    /// manifest sorted newest season first.
    pub fn upsert(&mut self, entry: ManifestEntry) {
        self.entries
            .retain(|e| !(e.year == entry.year && e.season == entry.season));
        self.entries.push(entry);
        self.entries
            .sort_by(|a, b| b.key().cmp(&a.key()));
    }
}

// =============================================================================
// Rating trend
// =============================================================================

/// Per-season rating history, as consumed by the trend chart.
///
/// All vectors are parallel and sorted chronologically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// e.g. "Spring 2025"
    pub labels: Vec<String>,
    /// Season start dates as `YYYY-MM-DD`
    pub dates: Vec<String>,
    pub ratings: Vec<f64>,
    /// Number of rated entries behind each average
    pub counts: Vec<usize>,
    pub overall_average: f64,
    pub min_rating: f64,
    pub max_rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_months() {
        assert_eq!(Season::Winter.start_month(), 1);
        assert_eq!(Season::Fall.start_month(), 10);
        assert!(Season::Spring.contains_month(6));
        assert!(!Season::Spring.contains_month(7));
        assert_eq!(Season::containing(9), Some(Season::Summer));
        assert_eq!(Season::containing(13), None);
    }

    #[test]
    fn test_parse_season_key() {
        let key: SeasonKey = "2025-spring".parse().unwrap();
        assert_eq!(key, SeasonKey::new(2025, Season::Spring));

        let key: SeasonKey = "2024-FALL".parse().unwrap();
        assert_eq!(key.season, Season::Fall);
        assert_eq!(key.to_string(), "2024-fall");
        assert_eq!(key.start_date(), "2024-10-01");

        assert!("2025".parse::<SeasonKey>().is_err());
        assert!("spring-2025".parse::<SeasonKey>().is_err());
        assert!("2025-autumn".parse::<SeasonKey>().is_err());
    }

    #[test]
    fn test_season_key_ordering() {
        let mut keys = vec![
            SeasonKey::new(2025, Season::Winter),
            SeasonKey::new(2024, Season::Fall),
            SeasonKey::new(2025, Season::Spring),
        ];
        keys.sort();
        assert_eq!(keys[0], SeasonKey::new(2024, Season::Fall));
        assert_eq!(keys[2], SeasonKey::new(2025, Season::Spring));
    }

    #[test]
    fn test_manifest_by_year() {
        let manifest = Manifest::new(vec![
            ManifestEntry { year: 2024, season: Season::Fall, count: 3 },
            ManifestEntry { year: 2025, season: Season::Spring, count: 5 },
            ManifestEntry { year: 2024, season: Season::Winter, count: 7 },
        ]);

        let groups = manifest.by_year();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 2025);
        assert_eq!(groups[1].0, 2024);
        assert_eq!(groups[1].1[0].season, Season::Winter);
        assert_eq!(groups[1].1[1].season, Season::Fall);
    }

    #[test]
    fn test_manifest_upsert_replaces_and_sorts() {
        let mut manifest = Manifest::new(vec![
            ManifestEntry { year: 2024, season: Season::Summer, count: 10 },
            ManifestEntry { year: 2023, season: Season::Fall, count: 4 },
        ]);

        manifest.upsert(ManifestEntry { year: 2024, season: Season::Summer, count: 12 });
        manifest.upsert(ManifestEntry { year: 2025, season: Season::Winter, count: 1 });

        assert_eq!(manifest.entries.len(), 3);
        assert_eq!(manifest.entries[0].key(), SeasonKey::new(2025, Season::Winter));
        assert_eq!(manifest.entries[1].count, 12);
        assert_eq!(manifest.entries[2].key(), SeasonKey::new(2023, Season::Fall));
    }
}
