//! Async driver binding the coordinator to a fetcher.
//!
//! [`RouteSession`] is the presentation boundary: the UI calls
//! [`RouteSession::submit`] and reads the phase, summary and validation error
//! back. Each accepted submission spawns one fetch task on the current tokio
//! runtime; when the fetch settles the task hands the result to the
//! coordinator, which drops it if a newer submission has been made since.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::coordinator::{ApplyOutcome, Coordinator, RequestPhase};
use crate::fetch::RouteFetcher;
use crate::query::{RawFields, ValidationError};
use crate::render::RenderPipeline;
use crate::route::RouteSummary;
use crate::surface::MapSurface;

/// What happened to a submission.
#[derive(Debug)]
pub enum Submission {
    /// Validation failed; nothing was sent.
    Rejected(ValidationError),
    /// A fetch task is running. Awaiting the handle is optional.
    Started(JoinHandle<ApplyOutcome>),
}

/// Shared handle to one coordinator and its fetcher.
pub struct RouteSession<F, S: MapSurface> {
    fetcher: Arc<F>,
    coordinator: Arc<Mutex<Coordinator<S>>>,
}

impl<F, S: MapSurface> Clone for RouteSession<F, S> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}

impl<F, S> RouteSession<F, S>
where
    F: RouteFetcher,
    S: MapSurface + Send + 'static,
    S::Marker: Send,
{
    pub fn new(fetcher: F, pipeline: RenderPipeline<S>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            coordinator: Arc::new(Mutex::new(Coordinator::new(pipeline))),
        }
    }

    /// Validate `fields` and, if they pass, start fetching a route.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn submit(&self, fields: &RawFields) -> Submission {
        let ticket = match lock(&self.coordinator).submit(fields) {
            Ok(ticket) => ticket,
            Err(err) => return Submission::Rejected(err),
        };

        let (seq, query) = ticket.into_parts();
        let fetcher = Arc::clone(&self.fetcher);
        let coordinator = Arc::clone(&self.coordinator);
        Submission::Started(tokio::spawn(async move {
            let result = fetcher.fetch(query).await;
            let outcome = lock(&coordinator).apply(seq, result);
            outcome
        }))
    }

    pub fn phase(&self) -> RequestPhase {
        lock(&self.coordinator).phase().clone()
    }

    pub fn summary(&self) -> Option<RouteSummary> {
        lock(&self.coordinator).summary()
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        lock(&self.coordinator).validation_error().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestPhase> {
        lock(&self.coordinator).subscribe()
    }

    /// Forward the map surface's ready signal.
    pub fn surface_ready(&self) {
        lock(&self.coordinator).surface_ready();
    }

    /// Run `f` against the coordinator under its lock.
    pub fn with_coordinator<R>(&self, f: impl FnOnce(&Coordinator<S>) -> R) -> R {
        let guard = lock(&self.coordinator);
        f(&*guard)
    }

    /// Tear down the map view. Results still in flight are applied to the
    /// phase but no longer drawn.
    pub fn shutdown(&self) {
        lock(&self.coordinator).teardown();
    }
}

fn lock<S: MapSurface>(coordinator: &Mutex<Coordinator<S>>) -> MutexGuard<'_, Coordinator<S>> {
    coordinator.lock().unwrap_or_else(PoisonError::into_inner)
}
