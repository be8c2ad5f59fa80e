//! Controller configuration

use std::time::Duration;

use crate::cache::CacheConfig;

/// Default number of fetches allowed in flight at once.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Configuration for a [`TokenSelect`](crate::TokenSelect) controller.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tokenselect_lib::TokenSelectConfig;
///
/// let config = TokenSelectConfig::default()
///     .with_min_query_len(2)
///     .with_fetch_timeout(Duration::from_secs(5));
/// assert_eq!(config.min_query_len, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSelectConfig {
    /// A search is only issued when the input is longer than this many chars.
    ///
    /// Default: 3
    pub min_query_len: usize,

    /// Maximum fetches in flight through one loader.
    ///
    /// Default: 8
    pub max_concurrent_fetches: usize,

    /// Give up on a fetch after this long.
    ///
    /// Default: None (wait for the source)
    pub fetch_timeout: Option<Duration>,

    /// Settings for the descendant ids cache.
    pub cache: CacheConfig,
}

impl Default for TokenSelectConfig {
    fn default() -> Self {
        Self {
            min_query_len: 3,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            fetch_timeout: None,
            cache: CacheConfig::default(),
        }
    }
}

impl TokenSelectConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search threshold.
    pub fn with_min_query_len(mut self, len: usize) -> Self {
        self.min_query_len = len;
        self
    }

    /// Sets the concurrency cap.
    pub fn with_max_concurrent_fetches(mut self, max: usize) -> Self {
        self.max_concurrent_fetches = max;
        self
    }

    /// Sets the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Sets the cache configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}
