//! Hierarchical token select engine
//!
//! Selection state for a multi-select input backed by a lazily loaded tree:
//! checked and indeterminate id sets, select-all, search ranking, and the
//! coordination of child fetches against an external item source.

pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod loader;
pub mod model;
pub mod search;
pub mod selection;
pub mod source;
pub mod tree;

pub use config::TokenSelectConfig;
pub use controller::*;
pub use error::Error;
pub use model::*;
