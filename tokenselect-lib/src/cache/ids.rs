//! In-memory ids cache using DashMap

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;

use super::CacheConfig;
use crate::model::Node;
use crate::tree::collect_all_ids;

/// A cached descendant id set together with the node it was computed from.
///
/// Holding the node keeps its allocation alive, so the pointer used as the
/// key cannot be reused by another node while the entry exists.
#[derive(Debug, Clone)]
pub struct CachedIds {
    pub node: Node,
    pub ids: Arc<HashSet<String>>,
}

/// Cache of `collect_all_ids` results keyed by node identity.
///
/// Two structurally equal nodes from different snapshots are different keys.
#[derive(Debug, Default)]
pub struct IdsCache {
    store: DashMap<usize, CachedIds>,
    config: CacheConfig,
}

impl IdsCache {
    /// Creates a new empty cache with default settings.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a new empty cache with the given settings.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            store: DashMap::new(),
            config,
        }
    }

    /// Returns the cached ids for exactly this node, if present.
    pub fn get(&self, node: &Node) -> Option<Arc<HashSet<String>>> {
        let entry = self.store.get(&key(node))?;
        Arc::ptr_eq(&entry.node, node).then(|| entry.ids.clone())
    }

    /// Returns the ids of `node` and its loaded descendants, computing and
    /// caching them on a miss.
    pub fn get_or_collect(&self, node: &Node) -> Arc<HashSet<String>> {
        if !self.config.enabled {
            return Arc::new(collect_all_ids(node));
        }
        if let Some(ids) = self.get(node) {
            return ids;
        }

        let ids = Arc::new(collect_all_ids(node));
        if let Some(max) = self.config.max_entries {
            if self.store.len() >= max {
                log::debug!("ids cache reached {} entries, clearing", max);
                self.store.clear();
            }
        }
        self.store.insert(
            key(node),
            CachedIds {
                node: node.clone(),
                ids: ids.clone(),
            },
        );
        ids
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Returns the number of cached subtrees.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

fn key(node: &Node) -> usize {
    Arc::as_ptr(node) as usize
}
