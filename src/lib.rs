//! # GenreScope
//!
//! Dashboard service for a genre-classification analysis of 9,089 American
//! novels published between 1880 and 2000.
//!
//! GenreScope loads four static datasets once at startup and serves the
//! dashboard widgets over HTTP:
//!
//! - **Projection** - a 2D scatter plot of every book, colored by genre
//! - **Author search** - the books of a selected author
//! - **Genre confidence** - a bar chart of one book's twelve genre scores
//! - **Top words** - the most positive and negative words of a genre
//!
//! ## Quick Start
//!
//! ```bash
//! genrescope --data-dir ./data --http-port 8050
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use genrescope::prelude::*;
//!
//! let store = genrescope::load(&DataFiles::in_dir("./data")).unwrap();
//! let mut session = Session::new(&store).unwrap();
//!
//! session.select_author(&store, Some("Twain, Mark")).unwrap();
//! let chart = genrescope::view::confidence_chart(&store, BookId(10889)).unwrap();
//! assert_eq!(chart.bars.len(), Genre::COUNT);
//! ```
//!
//! ## Crate Structure
//!
//! - `genrescope-core` - Typed records, the read-only store, view functions and session bindings
//! - `genrescope-storage` - TSV/JSON loader
//! - `genrescope-api` - REST API with per-client sessions

// Re-export core types
pub use genrescope_core::{
    view, AuthorBook, Binding, BookId, ConfidenceChart, DataFiles, DataStore, Error, Genre,
    LoadError, MetadataRecord, ProjectionRecord, Refresh, Result, ScatterPlot, ScoreRecord,
    Session, SessionSnapshot, TopWords, Widget, WordRow,
};

// Re-export the loader
pub use genrescope_storage::load;

// Re-export API
pub use genrescope_api::{AppState, RestApi, SessionLimits};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BookId, DataFiles, DataStore, Error, Genre, LoadError, Refresh, Result, Session,
        RestApi,
    };
}
