//! # Trends Crate
//!
//! Rating history across seasons, as shown on the home page chart.
//!
//! ## Components
//!
//! ### Season averages
//! Mean score of the rated entries of one season. Unrated entries are
//! left out; a season with no rated entry has no average.
//!
//! ### Trend report
//! Season averages in chronological order with overall statistics, stored
//! as `rating-trend.json` next to the manifest.
//!
//! ### Moving average
//! Trailing window over the per-season averages (4 seasons = one year).
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogStore;
//! use trends::{build_trend, moving_average, DEFAULT_WINDOW};
//!
//! let store = CatalogStore::new("data");
//! if let Some(report) = build_trend(&store)? {
//!     let smoothed = moving_average(&report.ratings, DEFAULT_WINDOW);
//!     store.write_trend(&report)?;
//! }
//! ```

pub mod average;
pub mod moving_average;
pub mod report;

pub use average::SeasonAverage;
pub use moving_average::{DEFAULT_WINDOW, moving_average};
pub use report::{ChartBounds, build_report, build_trend};
