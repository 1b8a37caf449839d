//! # GenreScope Core
//!
//! Core library for the GenreScope dashboard.
//!
//! This crate provides the data model and the reactive binding layer:
//!
//! - [`DataStore`] - The four read-only analysis tables
//! - [`view`] - Pure functions deriving render-ready widgets from the store
//! - [`Binding`] - A selection cell bound 1:1 to the widget it drives
//! - [`Session`] - One client's author, book and genre selections
//!
//! ## Example
//!
//! ```rust
//! use genrescope_core::{BookId, DataStore, Genre, MetadataRecord, ScoreRecord, Session};
//!
//! let metadata = vec![MetadataRecord::new(
//!     BookId(10889),
//!     "The Big Sleep".to_string(),
//!     "Chandler, Raymond".to_string(),
//!     "1939".to_string(),
//!     "Detective and Mystery",
//! )];
//! let scores = vec![ScoreRecord::from_log_odds(BookId(10889), [0.0; Genre::COUNT])];
//! let store = DataStore::new(Vec::new(), metadata, scores, Vec::new()).unwrap();
//!
//! let books = genrescope_core::view::author_books(&store, "Chandler, Raymond");
//! assert_eq!(books.len(), 1);
//!
//! // No top words were loaded, so the default genre cannot be rendered
//! assert!(Session::new(&store).is_err());
//! ```

pub mod binder;
pub mod config;
pub mod error;
pub mod genre;
pub mod record;
pub mod session;
pub mod store;
pub mod view;

pub use binder::{Binding, Refresh, Widget};
pub use config::{DataFiles, DEFAULT_AUTHOR, DEFAULT_BOOK_ID, DEFAULT_GENRE, DEFAULT_MAX_WORD_ROWS};
pub use error::{Error, LoadError, Result};
pub use genre::Genre;
pub use record::{
    BookId, MetadataRecord, ProjectionRecord, ScoreRecord, TopWords, WordCoefficient, WordListPair,
};
pub use session::{Session, SessionSnapshot};
pub use store::DataStore;
pub use view::{
    AuthorBook, ConfidenceBar, ConfidenceChart, ReferenceLine, ScatterPlot, ScatterPoint,
    ScatterSeries, SelectOption, WordRow,
};
