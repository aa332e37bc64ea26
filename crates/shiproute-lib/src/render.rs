//! Route render pipeline.
//!
//! Turns a found [`Route`] into marker, line and camera operations on the
//! owned [`MapView`]. Every draw starts by removing what the previous draw
//! created, so repeated renders replace the route instead of layering on top
//! of it. Routes that arrive before the surface has loaded are held in a
//! readiness gate and drawn once the surface reports ready.

use std::time::Duration;

use tracing::debug;

use crate::geo::LngLatBounds;
use crate::route::Route;
use crate::surface::{
    CameraFit, LineCap, LineJoin, LineStyle, MapSurface, MapView, MarkerRole, MarkerSpec, Popup,
    RouteLine,
};

/// Marker colours by role.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPalette {
    pub start: String,
    pub waypoint: String,
    pub end: String,
}

impl MarkerPalette {
    pub fn color(&self, role: MarkerRole) -> &str {
        match role {
            MarkerRole::Start => &self.start,
            MarkerRole::Waypoint => &self.waypoint,
            MarkerRole::End => &self.end,
        }
    }
}

impl Default for MarkerPalette {
    fn default() -> Self {
        Self {
            start: "#00ff00".to_string(),
            waypoint: "#ffbb00".to_string(),
            end: "#ff0000".to_string(),
        }
    }
}

/// Visual constants applied on every draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub markers: MarkerPalette,
    pub popup_offset: u32,
    /// Shared id of the route source and its line layer.
    pub line_id: String,
    pub line: LineStyle,
    pub camera_padding: u32,
    pub camera_duration: Duration,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            markers: MarkerPalette::default(),
            popup_offset: 25,
            line_id: "route".to_string(),
            line: LineStyle {
                color: "#007cbf".to_string(),
                width: 3.0,
                dash: vec![2.0, 1.0],
                join: LineJoin::Round,
                cap: LineCap::Round,
            },
            camera_padding: 50,
            camera_duration: Duration::from_millis(1000),
        }
    }
}

/// What a call to [`RenderPipeline::render`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The route is on the surface.
    Drawn,
    /// The surface is still loading; the route will be drawn when it is ready.
    Deferred,
    /// The view has been torn down; nothing was drawn.
    Detached,
}

#[derive(Debug)]
enum ReadinessGate {
    NotReady { pending: Option<Route> },
    Ready,
}

/// Draws routes onto one owned map view.
pub struct RenderPipeline<S: MapSurface> {
    view: MapView<S>,
    gate: ReadinessGate,
    markers: Vec<S::Marker>,
    line_drawn: bool,
    style: RenderStyle,
}

impl<S: MapSurface> RenderPipeline<S> {
    pub fn new(view: MapView<S>, style: RenderStyle) -> Self {
        let gate = if view.is_ready() {
            ReadinessGate::Ready
        } else {
            ReadinessGate::NotReady { pending: None }
        };
        Self {
            view,
            gate,
            markers: Vec::new(),
            line_drawn: false,
            style,
        }
    }

    pub fn view(&self) -> &MapView<S> {
        &self.view
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.gate, ReadinessGate::Ready)
    }

    /// Whether a route is waiting for the surface to load.
    pub fn has_pending(&self) -> bool {
        matches!(self.gate, ReadinessGate::NotReady { pending: Some(_) })
    }

    /// Number of markers this pipeline currently has on the surface.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Replace whatever is drawn with `route`.
    pub fn render(&mut self, route: &Route) -> RenderOutcome {
        if !self.view.is_live() {
            debug!("render skipped, view torn down");
            return RenderOutcome::Detached;
        }
        if let ReadinessGate::NotReady { pending } = &mut self.gate {
            if !self.view.is_ready() {
                debug!(ports = route.ports().len(), "surface loading, deferring render");
                *pending = Some(route.clone());
                return RenderOutcome::Deferred;
            }
            // Loaded without the signal being forwarded. `route` supersedes
            // whatever was pending.
            debug!("surface already loaded, opening readiness gate");
            self.gate = ReadinessGate::Ready;
        }
        self.draw(route);
        RenderOutcome::Drawn
    }

    /// Handle the surface's ready signal.
    ///
    /// Opens the gate and draws the pending route, if any. Later signals are
    /// no-ops, so a pending route is drawn exactly once.
    pub fn surface_ready(&mut self) -> RenderOutcome {
        let previous = std::mem::replace(&mut self.gate, ReadinessGate::Ready);
        match previous {
            ReadinessGate::NotReady {
                pending: Some(route),
            } => {
                debug!("surface ready, drawing deferred route");
                self.draw(&route);
                RenderOutcome::Drawn
            }
            ReadinessGate::NotReady { pending: None } | ReadinessGate::Ready => {
                RenderOutcome::Deferred
            }
        }
    }

    /// Remove the drawn route, or drop the pending one.
    pub fn clear(&mut self) {
        if let ReadinessGate::NotReady { pending } = &mut self.gate {
            *pending = None;
        }
        self.erase();
    }

    /// Release every map resource, then the map itself.
    pub fn teardown(&mut self) {
        self.clear();
        self.view.destroy();
        debug!("map view torn down");
    }

    fn draw(&mut self, route: &Route) {
        debug_assert!(!route.ports().is_empty(), "found route without ports");
        self.erase();
        let Some(surface) = self.view.surface_mut() else {
            return;
        };

        let len = route.ports().len();
        for (index, port) in route.ports().iter().enumerate() {
            let role = MarkerRole::for_position(index, len);
            let spec = MarkerSpec {
                role,
                position: port.coordinates,
                color: self.style.markers.color(role).to_string(),
                popup: Popup {
                    title: port.name.clone(),
                    body: format!("Port ID: {}", port.id),
                    offset: self.style.popup_offset,
                },
            };
            self.markers.push(surface.add_marker(&spec));
        }

        let line = RouteLine {
            id: self.style.line_id.clone(),
            coordinates: route.path().iter().map(|c| c.to_lng_lat()).collect(),
            style: self.style.line.clone(),
        };
        surface.set_route_line(&line);
        self.line_drawn = true;

        if let Some(bounds) = LngLatBounds::from_points(route.framing_points()) {
            surface.fit_bounds(&CameraFit {
                bounds,
                padding: self.style.camera_padding,
                duration_ms: duration_millis(self.style.camera_duration),
            });
        }

        debug!(
            markers = self.markers.len(),
            line_points = line.coordinates.len(),
            "route drawn"
        );
    }

    fn erase(&mut self) {
        let Some(surface) = self.view.surface_mut() else {
            self.markers.clear();
            self.line_drawn = false;
            return;
        };
        for marker in self.markers.drain(..) {
            surface.remove_marker(marker);
        }
        if self.line_drawn {
            surface.clear_route_line();
            self.line_drawn = false;
        }
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::LngLat;
    use crate::query::PortId;
    use crate::route::{Port, RouteCoordinate};
    use crate::scene::SceneSurface;

    fn route() -> Route {
        Route::new(
            vec![
                Port {
                    id: PortId(2),
                    name: "Singapore".to_string(),
                    coordinates: LngLat::new(103.8, 1.3),
                },
                Port {
                    id: PortId(24),
                    name: "Rotterdam".to_string(),
                    coordinates: LngLat::new(4.4, 51.9),
                },
            ],
            vec![
                RouteCoordinate::new(103.8, 1.3),
                RouteCoordinate::new(4.4, 51.9),
            ],
        )
        .expect("route")
    }

    #[test]
    fn default_style_matches_the_map_design() {
        let style = RenderStyle::default();
        assert_eq!(style.markers.color(MarkerRole::Start), "#00ff00");
        assert_eq!(style.markers.color(MarkerRole::Waypoint), "#ffbb00");
        assert_eq!(style.markers.color(MarkerRole::End), "#ff0000");
        assert_eq!(style.line_id, "route");
        assert_eq!(style.camera_padding, 50);
        assert_eq!(style.camera_duration, Duration::from_millis(1000));
    }

    #[test]
    fn popup_carries_name_and_id() {
        let surface = SceneSurface::new();
        let mut pipeline =
            RenderPipeline::new(MapView::create(surface.clone()), RenderStyle::default());
        pipeline.render(&route());

        let scene = surface.snapshot();
        let popups: Vec<_> = scene.markers().map(|m| m.popup.clone()).collect();
        assert_eq!(popups[0].title, "Singapore");
        assert_eq!(popups[0].body, "Port ID: 2");
        assert_eq!(popups[1].body, "Port ID: 24");
        assert!(popups.iter().all(|p| p.offset == 25));
    }

    #[test]
    fn camera_fit_uses_style_padding_and_duration() {
        let surface = SceneSurface::new();
        let mut pipeline =
            RenderPipeline::new(MapView::create(surface.clone()), RenderStyle::default());
        pipeline.render(&route());

        let camera = surface.snapshot().camera.expect("camera framed");
        assert_eq!(camera.padding, 50);
        assert_eq!(camera.duration_ms, 1000);
        assert_eq!(camera.bounds.south_west, LngLat::new(4.4, 1.3));
        assert_eq!(camera.bounds.north_east, LngLat::new(103.8, 51.9));
    }

    #[test]
    fn render_after_teardown_is_detached() {
        let surface = SceneSurface::new();
        let mut pipeline =
            RenderPipeline::new(MapView::create(surface.clone()), RenderStyle::default());
        pipeline.teardown();
        assert_eq!(pipeline.render(&route()), RenderOutcome::Detached);
        assert_eq!(surface.snapshot().marker_count(), 0);
    }
}
