//! Ship route planner client library.
//!
//! This crate turns form input into fuel-constrained route requests, fetches
//! routes from the routing service, and draws them on a map surface. Front
//! ends should go through [`RouteSession`] rather than wiring the validator,
//! fetcher and render pipeline together themselves.
//!

#![deny(warnings)]

pub mod config;
pub mod coordinator;
pub mod error;
pub mod fetch;
pub mod geo;
pub mod query;
pub mod render;
pub mod route;
pub mod scene;
pub mod session;
pub mod surface;
pub mod wire;

pub use config::{ClientConfig, MapConfig};
pub use coordinator::{ApplyOutcome, Coordinator, RequestPhase, RequestSeq, RequestTicket};
pub use error::{Error, Result};
pub use fetch::{check_endpoints, interpret_response, HttpRouteFetcher, RouteFetcher};
pub use geo::{LngLat, LngLatBounds};
pub use query::{validate, Distance, PortId, Query, RawFields, ValidationError};
pub use render::{MarkerPalette, RenderOutcome, RenderPipeline, RenderStyle};
pub use route::{Port, Route, RouteCoordinate, RouteResult, RouteSummary};
pub use scene::{InitialView, Scene, SceneSurface};
pub use session::{RouteSession, Submission};
pub use surface::{CameraFit, MapSurface, MapView, MarkerRole, MarkerSpec, Popup, RouteLine};
