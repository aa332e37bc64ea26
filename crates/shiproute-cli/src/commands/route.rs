//! `route` command: request one route and report what was drawn.

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use tracing::debug;

use shiproute_lib::{
    ClientConfig, HttpRouteFetcher, MapView, RawFields, RenderPipeline, RequestPhase,
    RouteSession, SceneSurface, Submission,
};

use crate::output::RouteReport;

/// Form fields of a route request.
///
/// Values are taken verbatim and validated by the library, so a malformed
/// value produces the same inline message the form would show.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    /// Starting port ID.
    #[arg(long, allow_hyphen_values = true)]
    pub start: String,
    /// Destination port ID.
    #[arg(long, allow_hyphen_values = true)]
    pub end: String,
    /// Maximum distance the ship can travel between refuels.
    #[arg(long = "max-fuel", allow_hyphen_values = true)]
    pub max_fuel: String,
}

impl RouteCommandArgs {
    pub fn to_fields(&self) -> RawFields {
        RawFields::route(&*self.start, &*self.end, &*self.max_fuel)
    }
}

/// Submit the request, wait for it to settle, and tear the map down.
///
/// Returns the report for a found or empty route. Rejected input and failed
/// requests are errors carrying the message the form would show.
pub async fn handle_route(args: &RouteCommandArgs, config: &ClientConfig) -> Result<RouteReport> {
    let fetcher = HttpRouteFetcher::new(config).context("failed to build the HTTP client")?;
    debug!(endpoint = fetcher.endpoint(), map = ?config.map, "creating headless map");

    let surface = SceneSurface::with_map_config(&config.map);
    let pipeline = RenderPipeline::new(MapView::create(surface.clone()), config.style.clone());
    let session = RouteSession::new(fetcher, pipeline);

    let handle = match session.submit(&args.to_fields()) {
        Submission::Started(handle) => handle,
        Submission::Rejected(err) => bail!(err),
    };
    handle.await.context("route request task failed")?;

    let report = match session.phase() {
        RequestPhase::Succeeded(route) => Ok(RouteReport::found(route.summary(), surface.snapshot())),
        RequestPhase::Empty => Ok(RouteReport::empty()),
        RequestPhase::Failed(message) => Err(anyhow!(message)),
        phase @ (RequestPhase::Idle | RequestPhase::Loading) => {
            Err(anyhow!("route request did not settle (phase: {})", phase.label()))
        }
    };
    session.shutdown();
    report
}
