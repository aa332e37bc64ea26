//! Request lifecycle state machine.
//!
//! The coordinator owns the current [`RequestPhase`] and the render pipeline.
//! It is synchronous: [`Coordinator::submit`] issues a ticket for the fetcher
//! and [`Coordinator::apply`] folds a result back in. A result is applied only
//! when its ticket is the latest one issued; anything older was superseded and
//! is dropped without touching the phase or the map.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::query::{validate, Query, RawFields, ValidationError};
use crate::render::RenderPipeline;
use crate::route::{Route, RouteResult, RouteSummary};
use crate::surface::MapSurface;

/// Lifecycle of the most recent route request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPhase {
    Idle,
    Loading,
    Succeeded(Arc<Route>),
    Empty,
    Failed(String),
}

impl RequestPhase {
    pub fn label(&self) -> &'static str {
        match self {
            RequestPhase::Idle => "idle",
            RequestPhase::Loading => "loading",
            RequestPhase::Succeeded(_) => "succeeded",
            RequestPhase::Empty => "empty",
            RequestPhase::Failed(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestPhase::Loading)
    }

    /// Whether the request has settled (succeeded, empty or failed).
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            RequestPhase::Succeeded(_) | RequestPhase::Empty | RequestPhase::Failed(_)
        )
    }
}

/// Monotonic sequence number of a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    fn next(self) -> Self {
        RequestSeq(self.0 + 1)
    }
}

impl fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A validated query paired with the sequence number it was issued under.
#[derive(Debug)]
pub struct RequestTicket {
    seq: RequestSeq,
    query: Query,
}

impl RequestTicket {
    pub fn seq(&self) -> RequestSeq {
        self.seq
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn into_parts(self) -> (RequestSeq, Query) {
        (self.seq, self.query)
    }
}

/// Whether a result reached the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer submission was issued first; the result was dropped.
    Superseded,
}

/// Single source of truth for the route request lifecycle.
pub struct Coordinator<S: MapSurface> {
    phase: RequestPhase,
    latest: RequestSeq,
    validation_error: Option<ValidationError>,
    route: Option<Arc<Route>>,
    pipeline: RenderPipeline<S>,
    phase_tx: watch::Sender<RequestPhase>,
}

impl<S: MapSurface> Coordinator<S> {
    pub fn new(pipeline: RenderPipeline<S>) -> Self {
        let (phase_tx, _) = watch::channel(RequestPhase::Idle);
        Self {
            phase: RequestPhase::Idle,
            latest: RequestSeq::default(),
            validation_error: None,
            route: None,
            pipeline,
            phase_tx,
        }
    }

    pub fn phase(&self) -> &RequestPhase {
        &self.phase
    }

    /// The inline error from the last rejected submission, if the form has
    /// not been submitted successfully since.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    /// The route currently on the map, if any.
    pub fn current_route(&self) -> Option<&Arc<Route>> {
        self.route.as_ref()
    }

    pub fn summary(&self) -> Option<RouteSummary> {
        self.route.as_ref().map(|route| route.summary())
    }

    pub fn latest_seq(&self) -> RequestSeq {
        self.latest
    }

    pub fn pipeline(&self) -> &RenderPipeline<S> {
        &self.pipeline
    }

    /// Receiver that observes every phase change.
    pub fn subscribe(&self) -> watch::Receiver<RequestPhase> {
        self.phase_tx.subscribe()
    }

    /// Validate `fields` and, if they pass, start a new request.
    ///
    /// A rejected submission leaves the phase alone and never reaches the
    /// fetcher. An accepted one moves to `Loading` and supersedes whatever
    /// request was still in flight.
    pub fn submit(&mut self, fields: &RawFields) -> Result<RequestTicket, ValidationError> {
        let query = match validate(fields) {
            Ok(query) => query,
            Err(err) => {
                info!(kind = err.kind(), field = err.field(), "submission rejected");
                self.validation_error = Some(err.clone());
                return Err(err);
            }
        };

        if self.phase.is_loading() {
            debug!(superseded = %self.latest, "superseding in-flight request");
        }
        self.latest = self.latest.next();
        self.validation_error = None;
        self.transition(RequestPhase::Loading);
        info!(
            seq = %self.latest,
            start = %query.start(),
            end = %query.end(),
            max_fuel = %query.max_fuel(),
            "route request submitted"
        );

        Ok(RequestTicket {
            seq: self.latest,
            query,
        })
    }

    /// Fold the result of request `seq` into the state machine.
    pub fn apply(&mut self, seq: RequestSeq, result: RouteResult) -> ApplyOutcome {
        if seq != self.latest || !self.phase.is_loading() {
            debug!(
                %seq,
                latest = %self.latest,
                result = result.label(),
                "dropping superseded route result"
            );
            return ApplyOutcome::Superseded;
        }

        match result {
            RouteResult::Found(route) => {
                let route = Arc::new(route);
                self.pipeline.render(&route);
                self.route = Some(Arc::clone(&route));
                info!(%seq, ports = route.ports().len(), "route succeeded");
                self.transition(RequestPhase::Succeeded(route));
            }
            RouteResult::NotFound => {
                self.pipeline.clear();
                self.route = None;
                info!(%seq, "no route within fuel range");
                self.transition(RequestPhase::Empty);
            }
            RouteResult::TransportError { message } => {
                warn!(%seq, error = %message, "route request failed");
                self.transition(RequestPhase::Failed(message));
            }
        }
        ApplyOutcome::Applied
    }

    /// Forward the map surface's ready signal to the render pipeline.
    pub fn surface_ready(&mut self) {
        self.pipeline.surface_ready();
    }

    /// Release the map and everything drawn on it.
    pub fn teardown(&mut self) {
        self.pipeline.teardown();
    }

    fn transition(&mut self, phase: RequestPhase) {
        debug!(from = self.phase.label(), to = phase.label(), "phase change");
        self.phase = phase.clone();
        self.phase_tx.send_replace(phase);
    }
}
