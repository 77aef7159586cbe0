//! Decoding of the catalog's JSON documents.
//!
//! Three documents live in a data directory:
//! - `manifest.json`: array of `{year, season, count}`
//! - `<year>/<season>.json`: array of records
//! - `rating-trend.json`: the precomputed trend report
//!
//! The top level of each document must be well formed. Inside a record,
//! a field with an unexpected shape degrades to its most permissive value:
//! a score that is not a positive number counts as unrated, a non-boolean
//! origin is unknown, a non-boolean adult flag is false, and non-string
//! genre entries are skipped.

use crate::error::{CatalogError, Result};
use crate::types::{Manifest, Record, TrendReport};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Genre tag never offered as a genre filter; the adult toggle covers it
pub const ADULT_GENRE_TAG: &str = "Hentai";

/// Decode a season file into its records
pub fn parse_season(bytes: &[u8], file: &str) -> Result<Vec<Record>> {
    decode(bytes, file)
}

pub fn parse_manifest(bytes: &[u8], file: &str) -> Result<Manifest> {
    decode(bytes, file)
}

pub fn parse_trend(bytes: &[u8], file: &str) -> Result<TrendReport> {
    decode(bytes, file)
}

/// Pretty-printed JSON with non-ASCII text kept as is
pub fn encode_pretty<T: Serialize + ?Sized>(value: &T, file: &str) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|e| CatalogError::Encode {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(bytes: &[u8], file: &str) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| CatalogError::MalformedJson {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

/// Sorted, de-duplicated genres of a season, for the genre filter list.
///
/// Empty tags and the adult tag are skipped.
pub fn available_genres(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.genres.iter())
        .filter(|g| !g.is_empty() && g.as_str() != ADULT_GENRE_TAG)
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// =============================================================================
// Lenient field decoders
// =============================================================================

/// Decode `T`, falling back to `T::default()` when the value has the wrong shape
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Scores of zero are how the upstream source marks "no score yet"
pub(crate) fn score<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|s| s.is_finite() && *s != 0.0))
}

pub(crate) fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(false))
}

pub(crate) fn optional_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}

/// Accepts an array (non-string items dropped) or a single string
pub(crate) fn string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}
