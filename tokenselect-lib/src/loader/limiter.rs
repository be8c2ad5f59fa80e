//! Concurrency limiting for simultaneous fetches.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::sync::SemaphorePermit;

use crate::error::LoadError;

/// Limits the number of fetches in flight.
///
/// Wraps a `tokio::sync::Semaphore`. Expanding many nodes at once queues
/// the extra fetches instead of flooding the source.
///
/// # Example
///
/// ```
/// use tokenselect_lib::loader::ConcurrencyLimiter;
///
/// let limiter = ConcurrencyLimiter::new(4);
/// assert_eq!(limiter.limit(), 4);
/// assert_eq!(limiter.available(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyLimiter {
    /// Creates a new limiter. A limit of 0 is raised to 1.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Acquires a permit, waiting if necessary.
    ///
    /// The permit is released when dropped.
    pub async fn acquire(&self) -> Result<SemaphorePermit<'_>, LoadError> {
        self.semaphore.acquire().await.map_err(|_| LoadError::Closed)
    }

    /// Stops handing out permits; pending and future acquires fail.
    pub fn close(&self) {
        self.semaphore.close();
    }

    /// Returns the configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of available permits.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_CONCURRENT_FETCHES)
    }
}
