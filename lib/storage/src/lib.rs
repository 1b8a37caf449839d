//! Startup loader for the GenreScope datasets.
//!
//! Reads the projection, metadata and scores tables (tab separated) and the
//! top-words JSON into a [`genrescope_core::DataStore`]. Loading happens once;
//! nothing here writes back.

pub mod loader;
pub mod tsv;

pub use loader::{load, load_metadata, load_projection, load_scores, load_top_words};
pub use tsv::{TsvRow, TsvTable};
