//! Page load state.
//!
//! A page shows one focal record. Each load is stamped with a generation number, and a
//! result is applied only while its generation is still the newest. A slow response for
//! a record the user has already navigated away from is dropped instead of overwriting
//! the newer page.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::errors::GatewayError;

/// What a page currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<V> {
    Loading,
    Loaded(V),
    NotFound,
    Error(GatewayError),
}

impl<V> PageState<V> {
    /// Map a loader outcome: a missing record is distinct from a failed fetch.
    pub fn from_outcome(outcome: Result<Option<V>, GatewayError>) -> Self {
        match outcome {
            Ok(Some(view)) => PageState::Loaded(view),
            Ok(None) => PageState::NotFound,
            Err(e) => PageState::Error(e),
        }
    }
}

/// Proof that a load was started, used to settle it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    id: String,
}

#[derive(Debug)]
struct Inner<V> {
    generation: u64,
    state: PageState<V>,
}

/// Load state of one page.
#[derive(Debug)]
pub struct PageController<V> {
    inner: Arc<RwLock<Inner<V>>>,
}

impl<V> Clone for PageController<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for PageController<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PageController<V> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                generation: 0,
                state: PageState::Loading,
            })),
        }
    }

    /// Start loading `id`. Any load still in flight becomes stale.
    pub async fn begin(&self, id: &str) -> LoadTicket {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        inner.state = PageState::Loading;
        LoadTicket {
            generation: inner.generation,
            id: id.to_string(),
        }
    }

    /// Apply the outcome of the load `ticket` started. Returns `false` if a newer load
    /// has begun since, in which case the outcome is discarded.
    pub async fn settle(&self, ticket: LoadTicket, outcome: Result<Option<V>, GatewayError>) -> bool {
        let mut inner = self.inner.write().await;
        if ticket.generation != inner.generation {
            tracing::debug!(
                "Discarding stale load of {} (generation {}, current {})",
                ticket.id,
                ticket.generation,
                inner.generation
            );
            return false;
        }
        inner.state = PageState::from_outcome(outcome);
        true
    }

    /// Begin, run `loader` for `id`, and settle.
    pub async fn load<F, Fut>(&self, id: &str, loader: F) -> bool
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Option<V>, GatewayError>>,
    {
        let ticket = self.begin(id).await;
        let outcome = loader(ticket.id.clone()).await;
        self.settle(ticket, outcome).await
    }
}

impl<V: Clone> PageController<V> {
    pub async fn state(&self) -> PageState<V> {
        self.inner.read().await.state.clone()
    }
}
