//! Report formatting.
//!
//! A [`RouteReport`] is what one `route` invocation settles into: the route
//! summary and the drawn map scene on success, or the no-route message.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use shiproute_lib::{RouteSummary, Scene};

use crate::terminal::{format_distance, tag_label, ColorPalette};

/// Message shown when no route satisfies the fuel constraint.
pub const NO_ROUTE_MESSAGE: &str = "No valid route found with the given fuel constraint.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary and scene.
    #[default]
    Text,
    /// The report as one JSON document.
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RouteReport {
    Succeeded { summary: RouteSummary, scene: Scene },
    Empty { message: &'static str },
}

impl RouteReport {
    pub fn found(summary: RouteSummary, scene: Scene) -> Self {
        RouteReport::Succeeded { summary, scene }
    }

    pub fn empty() -> Self {
        RouteReport::Empty {
            message: NO_ROUTE_MESSAGE,
        }
    }

    pub fn render(&self, format: OutputFormat, palette: &ColorPalette) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(render_text(self, palette)),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }
}

/// Text view of a report.
pub fn render_text(report: &RouteReport, palette: &ColorPalette) -> String {
    let (summary, scene) = match report {
        RouteReport::Succeeded { summary, scene } => (summary, scene),
        RouteReport::Empty { message } => return format!("{message}\n"),
    };
    let ColorPalette {
        reset,
        white_bold,
        gray,
        cyan,
        ..
    } = *palette;

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "Route: {white_bold}{}{reset} -> {white_bold}{}{reset}",
        summary.start, summary.end
    );
    let _ = writeln!(out, "  total ports: {}", summary.total_ports);
    if let Some(distance) = summary.total_distance {
        let _ = writeln!(out, "  total distance: {cyan}{}{reset}", format_distance(distance));
    }

    let _ = writeln!(out, "Markers:");
    for marker in scene.markers() {
        let [lng, lat] = marker.position.to_array();
        let _ = writeln!(
            out,
            "  {tag}{label}{reset} {white_bold}{title}{reset} {gray}({body}) at {lng:.4}, {lat:.4}{reset}",
            tag = palette.tag(marker.role),
            label = tag_label(marker.role),
            title = marker.popup.title,
            body = marker.popup.body,
        );
    }

    if let Some(line) = &scene.route_line {
        let _ = writeln!(
            out,
            "Route line: {} points, {} width {}",
            line.coordinates.len(),
            line.style.color,
            line.style.width
        );
    }
    if let Some(camera) = &scene.camera {
        let sw = camera.bounds.south_west;
        let ne = camera.bounds.north_east;
        let _ = writeln!(
            out,
            "{gray}Camera: [{:.4}, {:.4}] to [{:.4}, {:.4}], padding {}{reset}",
            sw.lng, sw.lat, ne.lng, ne.lat, camera.padding
        );
    }
    out
}
