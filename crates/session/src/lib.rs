//! Session crate for the season tracker.
//!
//! This crate holds the state a front end needs between user actions:
//! the home page data and the open season view with its toggles.

pub mod browser;
pub mod season_view;

pub use browser::{Browser, HomePage};
pub use season_view::SeasonView;
