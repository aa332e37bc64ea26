//! Route model returned by the fetcher and consumed by the render pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::LngLat;
use crate::query::PortId;

/// A named stop on a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: PortId,
    pub name: String,
    pub coordinates: LngLat,
}

/// One vertex of the route polyline, in traversal order.
///
/// Denser than the port list: the polyline follows the sea lane between
/// stops, so it does not line up one-to-one with [`Port`]s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteCoordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl RouteCoordinate {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Line-geometry point, longitude first.
    pub const fn to_lng_lat(self) -> LngLat {
        LngLat::new(self.longitude, self.latitude)
    }
}

/// A route the service found for a query.
///
/// The port list is never empty; [`Route::new`] enforces it so the render
/// pipeline can always place start and end markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    ports: Vec<Port>,
    path: Vec<RouteCoordinate>,
    stop_count: usize,
    total_distance: Option<f64>,
}

impl Route {
    /// Build a route from its ports and polyline.
    pub fn new(ports: Vec<Port>, path: Vec<RouteCoordinate>) -> Result<Self> {
        if ports.is_empty() {
            return Err(Error::EmptyRoute);
        }
        let stop_count = ports.len();
        Ok(Self {
            ports,
            path,
            stop_count,
            total_distance: None,
        })
    }

    /// Override the number of stops reported in the summary.
    ///
    /// The service reports the stop sequence separately from the resolved
    /// port details; when both are present the summary counts the former.
    pub fn with_stop_count(mut self, stop_count: usize) -> Self {
        self.stop_count = stop_count;
        self
    }

    pub fn with_total_distance(mut self, total_distance: f64) -> Self {
        self.total_distance = Some(total_distance);
        self
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn path(&self) -> &[RouteCoordinate] {
        &self.path
    }

    pub fn total_distance(&self) -> Option<f64> {
        self.total_distance
    }

    pub fn start(&self) -> &Port {
        &self.ports[0]
    }

    pub fn end(&self) -> &Port {
        &self.ports[self.ports.len() - 1]
    }

    /// Whether the route begins at `start` and ends at `end`.
    pub fn connects(&self, start: PortId, end: PortId) -> bool {
        self.start().id == start && self.end().id == end
    }

    /// Every coordinate the camera must keep in view: ports then polyline.
    pub fn framing_points(&self) -> impl Iterator<Item = LngLat> + '_ {
        self.ports
            .iter()
            .map(|port| port.coordinates)
            .chain(self.path.iter().map(|coord| coord.to_lng_lat()))
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            total_ports: self.stop_count,
            start: self.start().name.clone(),
            end: self.end().name.clone(),
            total_distance: self.total_distance,
        }
    }
}

/// Figures shown next to the map once a route is found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub total_ports: usize,
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
}

/// Outcome of one route request.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteResult {
    /// The service found a route within the fuel range.
    Found(Route),
    /// The query was valid but no route satisfies the fuel constraint.
    NotFound,
    /// The request failed in transport, status, or payload decoding.
    TransportError { message: String },
}

impl RouteResult {
    pub fn transport_error(message: impl Into<String>) -> Self {
        RouteResult::TransportError {
            message: message.into(),
        }
    }

    /// The failure message, for transport errors only.
    pub fn transport_message(&self) -> Option<&str> {
        match self {
            RouteResult::TransportError { message } => Some(message),
            RouteResult::Found(_) | RouteResult::NotFound => None,
        }
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            RouteResult::Found(_) => "found",
            RouteResult::NotFound => "not_found",
            RouteResult::TransportError { .. } => "transport_error",
        }
    }
}
