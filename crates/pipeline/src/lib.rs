//! Filtering and default policy for season views.
//!
//! This crate provides:
//! - Filter trait and the four clause implementations
//! - FilterPipeline for composing filters
//! - FilterConfig, the caller-owned toggle state
//! - The default policy for the "hide unrated" toggle
//!
//! ## Architecture
//! Everything here is pure. The caller owns the records and the
//! configuration, passes both in on every call and gets back the visible
//! records in their original order.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, policy};
//!
//! let mut config = policy::default_config(key, today);
//! config.toggle_genre("Action");
//!
//! let pipeline = FilterPipeline::standard();
//! let visible = pipeline.visible(&records, &config);
//! ```

pub mod config;
pub mod filters;
pub mod filter_pipeline;
pub mod policy;
pub mod traits;

// Re-export main types
pub use config::{FilterConfig, GenreCombinator};
pub use filter_pipeline::{FilterPipeline, filter};
pub use policy::{default_config, resolve_hide_unrated_default};
pub use traits::Filter;
