//! Route fetching.
//!
//! [`RouteFetcher`] is the seam between the coordinator and the routing
//! service. [`HttpRouteFetcher`] is the production implementation: it POSTs
//! the query as JSON and folds status, transport and decoding failures into
//! [`RouteResult::TransportError`].

use std::future::Future;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::route::RouteResult;
use crate::wire::{ErrorResponse, RouteResponse};

/// Source of route results for validated queries.
///
/// Implementations never fail outright: every failure mode is folded into
/// [`RouteResult::TransportError`] so callers only match on one type.
pub trait RouteFetcher: Send + Sync + 'static {
    fn fetch(&self, query: Query) -> impl Future<Output = RouteResult> + Send;
}

/// Fetcher that POSTs queries to the routing service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRouteFetcher {
    client: Client,
    endpoint: String,
}

impl HttpRouteFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(user_agent())
            .build()
            .map_err(Error::Http)?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, query: &Query) -> Result<RouteResult> {
        debug!(endpoint = %self.endpoint, "sending route request");
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        interpret_response(status, &body)
    }
}

impl RouteFetcher for HttpRouteFetcher {
    async fn fetch(&self, query: Query) -> RouteResult {
        info!(
            start = %query.start(),
            end = %query.end(),
            max_fuel = %query.max_fuel(),
            "requesting route"
        );
        match self.request(&query).await {
            Ok(result) => {
                check_endpoints(&query, &result);
                result
            }
            Err(err) => {
                error!(error = %err, endpoint = %self.endpoint, "route request failed");
                RouteResult::transport_error(err.to_string())
            }
        }
    }
}

/// Map an HTTP status and body onto a [`RouteResult`].
///
/// Non-success statuses become [`Error::HttpStatus`]; a body that does not
/// decode, or that claims success without a usable route, becomes a
/// malformed-response error.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<RouteResult> {
    if !status.is_success() {
        if let Ok(detail) = serde_json::from_slice::<ErrorResponse>(body) {
            warn!(status = status.as_u16(), detail = %detail.error, "routing service error");
        }
        return Err(Error::HttpStatus {
            status: status.as_u16(),
        });
    }

    let response: RouteResponse = serde_json::from_slice(body)?;
    if !response.success {
        info!(
            detail = response.message.as_deref().unwrap_or(""),
            "no route within fuel range"
        );
        return Ok(RouteResult::NotFound);
    }

    let route = response.into_route()?;
    info!(ports = route.ports().len(), "route found");
    Ok(RouteResult::Found(route))
}

/// Log a found route whose first or last port is not the one requested.
///
/// The service may drop ports it cannot resolve, so the route is still
/// returned; it is only flagged.
pub fn check_endpoints(query: &Query, result: &RouteResult) -> bool {
    let RouteResult::Found(route) = result else {
        return true;
    };
    let connects = route.connects(query.start(), query.end());
    if !connects {
        warn!(
            requested_start = %query.start(),
            requested_end = %query.end(),
            route_start = %route.start().id,
            route_end = %route.end().id,
            "route endpoints do not match the query"
        );
    }
    connects
}

fn user_agent() -> String {
    format!("shiproute-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}
