//! Lazy-load coordination
//!
//! Fetches run outside the controller: the controller issues a ticket, the
//! host awaits [`LazyLoader`] with it (possibly alongside other fetches),
//! and hands the result back to the controller. Each ticket carries a
//! generation. Only the newest ticket for a node, and only the newest
//! search, may apply; anything older comes back as [`Outcome::Stale`] and
//! is dropped.

mod limiter;
mod tracker;

pub use limiter::*;
pub use tracker::*;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::config::TokenSelectConfig;
use crate::error::LoadError;
use crate::error::SourceError;
use crate::model::Item;
use crate::model::ItemTree;
use crate::source::ItemSource;

/// Whether a completed fetch was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The result was merged into the current state.
    Applied,
    /// A newer request or tree replacement superseded this one.
    Stale,
}

/// Children fetched for a [`LoadTicket`].
#[derive(Debug, Clone)]
pub struct Loaded {
    pub ticket: LoadTicket,
    pub result: Result<Vec<Item>, LoadError>,
}

/// Results fetched for a [`SearchTicket`].
#[derive(Debug, Clone)]
pub struct Searched {
    pub ticket: SearchTicket,
    pub result: Result<Vec<ItemTree>, LoadError>,
}

/// Runs fetches against an item source with a concurrency cap and an
/// optional timeout.
///
/// Cheap to clone; clones share the source and the limiter.
pub struct LazyLoader<S: ?Sized> {
    source: Arc<S>,
    limiter: ConcurrencyLimiter,
    timeout: Option<Duration>,
}

impl<S: ?Sized> Clone for LazyLoader<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            limiter: self.limiter.clone(),
            timeout: self.timeout,
        }
    }
}

impl<S: ItemSource + ?Sized> LazyLoader<S> {
    /// Creates a loader for the given source.
    pub fn new(source: Arc<S>, config: &TokenSelectConfig) -> Self {
        Self {
            source,
            limiter: ConcurrencyLimiter::new(config.max_concurrent_fetches),
            timeout: config.fetch_timeout,
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// The concurrency limiter shared by all clones.
    pub fn limiter(&self) -> &ConcurrencyLimiter {
        &self.limiter
    }

    /// Fetches the top-level items.
    pub async fn fetch_roots(&self) -> Result<Vec<Item>, LoadError> {
        self.run(self.source.fetch_children(None)).await
    }

    /// Fetches the children a ticket was issued for.
    pub async fn fetch_children(&self, ticket: LoadTicket) -> Loaded {
        log::debug!("fetching children of {} (gen {})", ticket.id, ticket.generation);
        let result = self.run(self.source.fetch_children(Some(&ticket.id))).await;
        Loaded { ticket, result }
    }

    /// Fetches several tickets concurrently, bounded by the limiter.
    ///
    /// Results come back in ticket order.
    pub async fn fetch_many(&self, tickets: Vec<LoadTicket>) -> Vec<Loaded> {
        join_all(tickets.into_iter().map(|t| self.fetch_children(t))).await
    }

    /// Runs the search a ticket was issued for.
    pub async fn search(&self, ticket: SearchTicket) -> Searched {
        log::debug!("searching {:?} (gen {})", ticket.query, ticket.generation);
        let result = self.run(self.source.search_items(&ticket.query)).await;
        Searched { ticket, result }
    }

    async fn run<T>(
        &self,
        request: impl Future<Output = Result<T, SourceError>>,
    ) -> Result<T, LoadError> {
        let _permit = self.limiter.acquire().await?;

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| LoadError::Timeout(limit))?,
            None => request.await,
        };

        result.map_err(|err| {
            log::warn!("item source failed: {}", err);
            LoadError::from(err)
        })
    }
}
