//! Map surface capability and the owned view handle.
//!
//! The mapping engine itself (tiles, projection, input) is outside this crate.
//! [`MapSurface`] names the handful of drawing operations the render pipeline
//! needs, and [`MapView`] owns one live surface from creation to teardown.

use serde::{Deserialize, Serialize};

use crate::geo::{LngLat, LngLatBounds};

/// Position-derived role of a port marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerRole {
    Start,
    Waypoint,
    End,
}

impl MarkerRole {
    /// Role of the marker at `index` in a route of `len` ports.
    ///
    /// The last position is checked first, so a one-port route is an `End`.
    pub fn for_position(index: usize, len: usize) -> Self {
        if index + 1 == len {
            MarkerRole::End
        } else if index == 0 {
            MarkerRole::Start
        } else {
            MarkerRole::Waypoint
        }
    }
}

/// Popup attached to a marker. Surfaces show it on interaction only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub title: String,
    pub body: String,
    /// Pixel offset between the marker tip and the popup.
    pub offset: u32,
}

/// A marker the pipeline asks the surface to place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub role: MarkerRole,
    pub position: LngLat,
    pub color: String,
    pub popup: Popup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Round,
    Miter,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Round,
    Butt,
    Square,
}

/// Paint and layout of the route line layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    pub dash: Vec<f64>,
    pub join: LineJoin,
    pub cap: LineCap,
}

/// Route polyline: one source and one line layer sharing `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLine {
    pub id: String,
    pub coordinates: Vec<LngLat>,
    pub style: LineStyle,
}

/// Camera move that frames `bounds`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraFit {
    pub bounds: LngLatBounds,
    pub padding: u32,
    pub duration_ms: u64,
}

/// Drawing operations the render pipeline relies on.
///
/// Every marker the surface places is identified by the handle returned from
/// [`MapSurface::add_marker`]; the caller owns that handle and gives it back to
/// remove exactly that marker.
pub trait MapSurface {
    type Marker;

    /// Whether the surface has finished loading and accepts drawing calls.
    fn is_ready(&self) -> bool;

    fn add_marker(&mut self, marker: &MarkerSpec) -> Self::Marker;

    fn remove_marker(&mut self, marker: Self::Marker);

    /// Replace the route source and line layer.
    fn set_route_line(&mut self, line: &RouteLine);

    /// Remove the route source and line layer if present.
    fn clear_route_line(&mut self);

    fn fit_bounds(&mut self, camera: &CameraFit);

    /// Release the surface. No drawing call follows.
    fn destroy(&mut self);
}

/// Owned handle to the live map.
///
/// The surface is destroyed exactly once: by [`MapView::destroy`] or, failing
/// that, when the view is dropped.
#[derive(Debug)]
pub struct MapView<S: MapSurface> {
    surface: Option<S>,
}

impl<S: MapSurface> MapView<S> {
    pub fn create(surface: S) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    /// `true` until the view is destroyed.
    pub fn is_live(&self) -> bool {
        self.surface.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.surface.as_ref().is_some_and(|surface| surface.is_ready())
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub(crate) fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn destroy(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.destroy();
        }
    }
}

impl<S: MapSurface> Drop for MapView<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}
