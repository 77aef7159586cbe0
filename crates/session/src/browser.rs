//! # Browser
//!
//! Entry point for a front end. Coordinates loading from the catalog
//! store:
//! 1. Home page: manifest and trend report, loaded concurrently
//! 2. Season page: one season file, parsed off the async workers, wrapped
//!    in a `SeasonView` with defaulted toggles
//!
//! File parsing is blocking work, so it runs under `spawn_blocking`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use catalog::{CatalogStore, Manifest, SeasonKey, TrendReport};
use chrono::NaiveDate;
use pipeline::FilterPipeline;
use tokio::task;
use tracing::{info, warn};
use trends::{ChartBounds, DEFAULT_WINDOW, moving_average};

use crate::season_view::SeasonView;

/// Everything the home page shows
#[derive(Debug, Clone)]
pub struct HomePage {
    pub manifest: Manifest,
    /// `None` hides the trend section
    pub trend: Option<TrendReport>,
}

impl HomePage {
    /// Yearly moving average aligned with `trend.ratings`
    pub fn moving_average(&self) -> Option<Vec<Option<f64>>> {
        self.trend
            .as_ref()
            .map(|t| moving_average(&t.ratings, DEFAULT_WINDOW))
    }

    pub fn chart_bounds(&self) -> Option<ChartBounds> {
        self.trend.as_ref().map(ChartBounds::for_report)
    }
}

#[derive(Clone)]
pub struct Browser {
    store: CatalogStore,
    pipeline: Arc<FilterPipeline>,
}

impl Browser {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: CatalogStore::new(data_dir),
            pipeline: Arc::new(FilterPipeline::standard()),
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Load the home page.
    ///
    /// The manifest is required. A trend file that is missing or cannot be
    /// read only hides the trend section.
    pub async fn home(&self) -> Result<HomePage> {
        let manifest_store = self.store.clone();
        let trend_store = self.store.clone();

        let (manifest, trend) = tokio::join!(
            task::spawn_blocking(move || manifest_store.load_manifest()),
            task::spawn_blocking(move || trend_store.load_trend()),
        );

        let manifest = manifest
            .context("Manifest loading task failed")?
            .context("Failed to load data. Please try again later.")?;

        let trend = match trend {
            Ok(Ok(trend)) => trend,
            Ok(Err(e)) => {
                warn!("Rating trend not available: {}", e);
                None
            }
            Err(e) => {
                warn!("Rating trend task failed: {}", e);
                None
            }
        };

        info!(
            "Home page: {} seasons, trend {}",
            manifest.entries.len(),
            if trend.is_some() { "available" } else { "hidden" }
        );
        Ok(HomePage { manifest, trend })
    }

    /// Load a season and open a view on it with toggles defaulted for `today`
    pub async fn open_season(&self, key: SeasonKey, today: NaiveDate) -> Result<SeasonView> {
        let start = Instant::now();
        let store = self.store.clone();

        let records = task::spawn_blocking(move || store.load_season(key))
            .await
            .context("Season loading task failed")?
            .with_context(|| format!("Failed to load anime data for {}", key.label()))?;

        info!("Loaded {} in {:?}", key, start.elapsed());
        Ok(SeasonView::new(key, records, today, self.pipeline.clone()))
    }
}
