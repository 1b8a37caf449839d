//! REST surface of the GenreScope dashboard.
//!
//! Stateless routes render widgets for an explicit key; `/sessions` routes
//! hold per-client selection state and return the widget a selection drives.

pub mod error;
pub mod rest;
pub mod sessions;

pub use error::ApiError;
pub use rest::{routes, AppState, RestApi};
pub use sessions::{SessionLimits, SessionRegistry};
