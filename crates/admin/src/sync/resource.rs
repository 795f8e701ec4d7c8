//! Generic read-through resource with sticky fallback.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use super::domain::DomainData;
use crate::api::ApiError;
use crate::config::DataMode;
use crate::session::SessionManager;

/// What a view should render for a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// A fetch is in flight; show a skeleton.
    Loading,
    /// The last fetch failed. `stale` is `true` when the data underneath came
    /// from an earlier successful fetch rather than the placeholder.
    Failed { message: String, stale: bool },
    Ready,
}

/// Point-in-time copy of a resource's `{data, loading, error}`.
#[derive(Debug, Clone)]
pub struct ResourceSnapshot<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<ApiError>,
    /// When `data` last came from the backend; `None` while it is the
    /// placeholder.
    pub last_updated: Option<DateTime<Utc>>,
}

impl<T: DomainData> ResourceSnapshot<T> {
    #[must_use]
    pub fn view(&self) -> ViewState {
        if self.loading {
            return ViewState::Loading;
        }
        match &self.error {
            Some(error) => ViewState::Failed {
                message: failure_message::<T>(error),
                stale: self.last_updated.is_some(),
            },
            None => ViewState::Ready,
        }
    }
}

fn failure_message<T: DomainData>(error: &ApiError) -> String {
    match error {
        ApiError::Network(_) => error.user_message(),
        _ => format!("Failed to load {}: {}", T::DOMAIN.label(), error.user_message()),
    }
}

struct ResourceState<T> {
    payload: T,
    loading: bool,
    error: Option<ApiError>,
    last_updated: Option<DateTime<Utc>>,
    /// Incremented when a fetch starts; only the latest fetch may settle.
    generation: u64,
    query: Vec<(String, String)>,
}

impl<T: Clone> ResourceState<T> {
    fn snapshot(&self) -> ResourceSnapshot<T> {
        ResourceSnapshot {
            data: self.payload.clone(),
            loading: self.loading,
            error: self.error.clone(),
            last_updated: self.last_updated,
        }
    }
}

/// Data for one domain, fetched through the session's authorized client.
///
/// `data` always holds a well-formed value: the placeholder until the first
/// successful fetch, the latest good response afterwards. Failed fetches set
/// `error` and leave `data` alone.
///
/// Cheap to clone; clones share state.
pub struct DataResource<T> {
    inner: Arc<ResourceInner<T>>,
}

struct ResourceInner<T> {
    session: SessionManager,
    mode: DataMode,
    state: RwLock<ResourceState<T>>,
}

impl<T> Clone for DataResource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: DomainData> std::fmt::Debug for DataResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("DataResource")
            .field("domain", &T::DOMAIN)
            .field("mode", &self.inner.mode)
            .field("loading", &state.loading)
            .field("error", &state.error)
            .finish_non_exhaustive()
    }
}

impl<T: DomainData> DataResource<T> {
    /// Create a resource holding the domain placeholder.
    #[must_use]
    pub fn new(session: SessionManager, mode: DataMode) -> Self {
        Self {
            inner: Arc::new(ResourceInner {
                session,
                mode,
                state: RwLock::new(ResourceState {
                    payload: T::placeholder(),
                    loading: false,
                    error: None,
                    last_updated: None,
                    generation: 0,
                    query: Vec::new(),
                }),
            }),
        }
    }

    #[must_use]
    pub fn mode(&self) -> DataMode {
        self.inner.mode
    }

    #[must_use]
    pub fn snapshot(&self) -> ResourceSnapshot<T> {
        self.inner.state.read().snapshot()
    }

    /// Current data.
    #[must_use]
    pub fn data(&self) -> T {
        self.inner.state.read().payload.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.state.read().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<ApiError> {
        self.inner.state.read().error.clone()
    }

    /// Set the query string sent with every subsequent fetch.
    pub fn set_query(&self, query: Vec<(String, String)>) {
        self.inner.state.write().query = query;
    }

    /// Edit the local copy in place, e.g. for an optimistic update.
    pub fn update_local<R>(&self, edit: impl FnOnce(&mut T) -> R) -> R {
        edit(&mut self.inner.state.write().payload)
    }

    /// Fetch the domain data again.
    ///
    /// In mock mode the placeholder is served without a request. In live mode
    /// the previous data stays visible until the new result arrives; a
    /// failure is recorded in `error` and never replaces the data. If another
    /// refresh starts before this one settles, this one's result is dropped.
    #[instrument(skip(self), fields(domain = %T::DOMAIN))]
    pub async fn refresh(&self) -> ResourceSnapshot<T> {
        if !self.inner.mode.is_live() {
            let mut state = self.inner.state.write();
            state.generation += 1;
            state.payload = T::placeholder();
            state.loading = false;
            state.error = None;
            debug!("Mock mode, serving placeholder");
            return state.snapshot();
        }

        let (generation, query) = {
            let mut state = self.inner.state.write();
            state.generation += 1;
            state.loading = true;
            (state.generation, state.query.clone())
        };

        let mut in_flight = InFlight {
            state: &self.inner.state,
            generation,
            armed: true,
        };
        let result = self.inner.session.client().get::<T>(T::PATH, &query).await;
        in_flight.armed = false;

        let mut state = self.inner.state.write();
        if state.generation != generation {
            debug!(generation, latest = state.generation, "Discarding stale response");
            return state.snapshot();
        }

        state.loading = false;
        match result {
            Ok(payload) => {
                state.payload = payload;
                state.error = None;
                state.last_updated = Some(Utc::now());
                debug!("Refreshed");
            }
            Err(e) => {
                warn!(error = %e, "Fetch failed, keeping previous data");
                state.error = Some(e);
            }
        }
        state.snapshot()
    }
}

/// Clears `loading` if a fetch is dropped before it settles, e.g. when the
/// caller's future is cancelled.
struct InFlight<'a, T> {
    state: &'a RwLock<ResourceState<T>>,
    generation: u64,
    armed: bool,
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.write();
        if state.generation == self.generation {
            state.loading = false;
            debug!(generation = self.generation, "Fetch cancelled before it settled");
        }
    }
}
