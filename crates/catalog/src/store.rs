//! Reading and writing a catalog data directory.
//!
//! Layout:
//! ```text
//! <data_dir>/manifest.json
//! <data_dir>/rating-trend.json
//! <data_dir>/<year>/<season>.json
//! ```

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::{Manifest, Record, SeasonKey, TrendReport};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const TREND_FILE: &str = "rating-trend.json";

/// Handle on a catalog data directory
#[derive(Debug, Clone)]
pub struct CatalogStore {
    data_dir: PathBuf,
}

impl CatalogStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn season_path(&self, key: SeasonKey) -> PathBuf {
        self.data_dir
            .join(key.year.to_string())
            .join(format!("{}.json", key.season))
    }

    pub fn load_manifest(&self) -> Result<Manifest> {
        let path = self.data_dir.join(MANIFEST_FILE);
        let bytes = read(&path)?;
        let manifest = parser::parse_manifest(&bytes, MANIFEST_FILE)?;
        debug!("Loaded manifest with {} seasons", manifest.entries.len());
        Ok(manifest)
    }

    /// Like `load_manifest`, but a missing manifest is an empty one
    pub fn load_manifest_or_default(&self) -> Result<Manifest> {
        match self.load_manifest() {
            Err(CatalogError::FileNotFound { .. }) => Ok(Manifest::default()),
            other => other,
        }
    }

    pub fn load_season(&self, key: SeasonKey) -> Result<Vec<Record>> {
        let path = self.season_path(key);
        let bytes = read(&path)?;
        let records = parser::parse_season(&bytes, &path.display().to_string())?;
        info!("Loaded {} records for {}", records.len(), key);
        Ok(records)
    }

    /// Load several seasons in parallel.
    ///
    /// Results come back in the order of `keys`; each season succeeds or
    /// fails on its own.
    pub fn load_seasons(&self, keys: &[SeasonKey]) -> Vec<(SeasonKey, Result<Vec<Record>>)> {
        keys.par_iter()
            .map(|&key| (key, self.load_season(key)))
            .collect()
    }

    /// The precomputed trend, `None` when the file does not exist
    pub fn load_trend(&self) -> Result<Option<TrendReport>> {
        let path = self.data_dir.join(TREND_FILE);
        match read(&path) {
            Ok(bytes) => parser::parse_trend(&bytes, TREND_FILE).map(Some),
            Err(CatalogError::FileNotFound { .. }) => {
                debug!("No trend file at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn write_season(&self, key: SeasonKey, records: &[Record]) -> Result<PathBuf> {
        let path = self.season_path(key);
        let bytes = parser::encode_pretty(records, &path.display().to_string())?;
        write(&path, &bytes)?;
        info!("Saved {} records to {}", records.len(), path.display());
        Ok(path)
    }

    pub fn write_manifest(&self, manifest: &Manifest) -> Result<()> {
        let bytes = parser::encode_pretty(manifest, MANIFEST_FILE)?;
        write(&self.data_dir.join(MANIFEST_FILE), &bytes)
    }

    pub fn write_trend(&self, report: &TrendReport) -> Result<PathBuf> {
        let path = self.data_dir.join(TREND_FILE);
        let bytes = parser::encode_pretty(report, TREND_FILE)?;
        write(&path, &bytes)?;
        Ok(path)
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| CatalogError::io(path, e))
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| CatalogError::io(path, e))
}
