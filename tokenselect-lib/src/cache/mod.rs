//! Memoization of descendant id sets
//!
//! Selection events call `collect_all_ids` on the same subtrees over and
//! over. [`IdsCache`] remembers the result per node. It is owned by a
//! [`TreeStore`](crate::tree::TreeStore) and cleared whenever that store
//! installs a new snapshot, so its lifetime is bounded by one tree
//! generation.

mod config;
mod ids;

pub use config::*;
pub use ids::*;
