//! # Catalog Crate
//!
//! This crate owns the on-disk catalog of seasonal anime entries.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Season, SeasonKey, Record, Manifest, TrendReport)
//! - **parser**: Lenient JSON decoding of season files, manifest and trend
//! - **store**: Reading and writing a catalog data directory
//! - **ingest**: Mapping Bangumi subjects into catalog records
//! - **error**: Error types for catalog I/O
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogStore, SeasonKey};
//!
//! let store = CatalogStore::new("data");
//! let manifest = store.load_manifest()?;
//! let records = store.load_season("2025-spring".parse::<SeasonKey>()?)?;
//!
//! println!("{} seasons, {} entries this spring", manifest.entries.len(), records.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod store;
pub mod ingest;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use parser::available_genres;
pub use store::CatalogStore;
pub use types::{
    Manifest,
    ManifestEntry,
    Record,
    Season,
    SeasonKey,
    TrendReport,
};
