//! Snapshot holder for the item tree.

use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::CacheConfig;
use crate::cache::IdsCache;
use crate::model::Node;
use crate::model::TreeNode;

use super::find_by_id;
use super::find_by_label;

/// Owns the current tree snapshot and the ids cache for it.
///
/// Every installed snapshot bumps the generation and empties the cache.
/// Snapshots themselves are immutable; [`roots`](Self::roots) hands out the
/// current one and later merges never affect a slice already handed out
/// through [`snapshot`](Self::snapshot).
#[derive(Debug, Default)]
pub struct TreeStore {
    roots: Arc<[Node]>,
    generation: u64,
    cache: IdsCache,
}

impl TreeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given cache settings.
    pub fn with_cache_config(config: CacheConfig) -> Self {
        Self {
            roots: Arc::from(Vec::new()),
            generation: 0,
            cache: IdsCache::with_config(config),
        }
    }

    /// Create a store holding the given roots.
    pub fn from_nodes(roots: Vec<TreeNode>) -> Self {
        let mut store = Self::new();
        store.replace(roots.into_iter().map(Arc::new).collect());
        store
    }

    /// The current roots.
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// A cheap handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<[Node]> {
        self.roots.clone()
    }

    /// Number of snapshots installed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The ids cache of the current generation.
    pub fn cache(&self) -> &IdsCache {
        &self.cache
    }

    /// Install a new snapshot wholesale.
    pub fn replace(&mut self, roots: Vec<Node>) {
        self.install(Arc::from(roots));
    }

    /// Merge fetched children under the node with the given id.
    ///
    /// Returns `false` and keeps the current snapshot when the id is not in
    /// the tree.
    pub fn merge_children(&mut self, id: &str, children: Vec<Node>) -> bool {
        if self.find_by_id(id).is_none() {
            log::debug!("merge target {} not in tree, ignoring {} children", id, children.len());
            return false;
        }
        let merged = super::merge_children(&self.roots, id, children);
        self.install(Arc::from(merged));
        true
    }

    /// Depth-first lookup by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        find_by_id(&self.roots, id)
    }

    /// Depth-first lookup by label.
    pub fn find_by_label(&self, label: &str) -> Option<&Node> {
        find_by_label(&self.roots, label)
    }

    /// The node's own id plus every loaded descendant id, memoized per node.
    pub fn collect_all_ids(&self, node: &Node) -> Arc<HashSet<String>> {
        self.cache.get_or_collect(node)
    }

    /// Every id currently in the tree.
    pub fn all_ids(&self) -> HashSet<String> {
        let mut ids = HashSet::new();
        for root in self.roots.iter() {
            ids.extend(self.collect_all_ids(root).iter().cloned());
        }
        ids
    }

    /// Returns `true` if no roots are loaded.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    fn install(&mut self, roots: Arc<[Node]>) {
        self.roots = roots;
        self.generation += 1;
        self.cache.clear();
        log::trace!(
            "installed tree generation {} with {} roots",
            self.generation,
            self.roots.len()
        );
    }
}
