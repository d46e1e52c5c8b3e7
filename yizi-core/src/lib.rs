//! yizi-core - lookup model for the 每日一字 calligraphy video index
//!
//! This crate provides:
//! - `CharacterRecord`, the row type of the remote character table
//! - the compiled-in table of the 214 Kangxi radicals
//! - `SearchController`, the state machine behind every front-end
//! - the `CharacterStore` trait that remote clients implement

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod query;
pub mod radicals;

pub use config::StoreConfig;
pub use controller::{PendingQuery, SearchController, SearchMode, SearchState, SearchView};
pub use error::{ConfigError, QueryError, GENERIC_QUERY_FAILURE};
pub use model::CharacterRecord;
pub use query::{CharacterQuery, CharacterStore, RESULT_LIMIT};
pub use radicals::RadicalEntry;
