//! Cache configuration

/// Configuration for the descendant ids cache.
///
/// # Example
///
/// ```
/// use tokenselect_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default().with_max_entries(512);
/// assert_eq!(config.max_entries, Some(512));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Whether results are memoized at all.
    ///
    /// Default: true
    pub enabled: bool,

    /// Upper bound on cached subtrees within one generation. When the bound
    /// is hit the cache is emptied before inserting.
    ///
    /// Default: None (bounded only by the tree generation)
    pub max_entries: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: None,
        }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry bound.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// Creates a config with memoization turned off.
    pub fn no_cache() -> Self {
        Self {
            enabled: false,
            max_entries: None,
        }
    }
}
