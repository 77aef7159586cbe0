//! Filter implementations for the catalog pipeline.
//!
//! Each module is one clause of the visibility predicate; the clauses
//! are ANDed by the FilterPipeline.

pub mod adult_content;
pub mod domestic_origin;
pub mod genre_selection;
pub mod unrated;

// Re-export for convenience
pub use adult_content::AdultContentFilter;
pub use domestic_origin::DomesticOriginFilter;
pub use genre_selection::GenreSelectionFilter;
pub use unrated::UnratedFilter;
