//! Headless map surface.
//!
//! [`SceneSurface`] keeps the drawn scene in memory instead of handing it to a
//! mapping engine. The terminal front end prints it, and tests inspect it.
//! Clones share the same scene, so a caller can keep one clone for reading
//! while the render pipeline owns the other.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::trace;

use crate::config::MapConfig;
use crate::geo::LngLat;
use crate::surface::{CameraFit, MapSurface, MarkerSpec, RouteLine};

/// Handle to a marker placed on a [`SceneSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SceneMarkerId(u64);

/// One drawing call received by the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    AddMarker { id: SceneMarkerId },
    RemoveMarker { id: SceneMarkerId },
    SetRouteLine { points: usize },
    ClearRouteLine,
    FitBounds,
    Destroy,
}

/// View the surface was created with. The access token is not kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitialView {
    pub style_url: String,
    pub center: LngLat,
    pub zoom: f64,
}

impl From<&MapConfig> for InitialView {
    fn from(config: &MapConfig) -> Self {
        Self {
            style_url: config.style_url.clone(),
            center: config.center,
            zoom: config.zoom,
        }
    }
}

/// Everything currently drawn, plus the call history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_view: Option<InitialView>,
    pub ready: bool,
    pub destroyed: bool,
    #[serde(serialize_with = "markers_in_order")]
    markers: BTreeMap<SceneMarkerId, MarkerSpec>,
    pub route_line: Option<RouteLine>,
    pub camera: Option<CameraFit>,
    #[serde(skip)]
    pub ops: Vec<SurfaceOp>,
    #[serde(skip)]
    next_marker: u64,
}

impl Scene {
    /// Live markers in placement order.
    pub fn markers(&self) -> impl Iterator<Item = &MarkerSpec> + '_ {
        self.markers.values()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Number of camera moves so far; one per completed draw.
    pub fn camera_moves(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::FitBounds))
            .count()
    }
}

fn markers_in_order<S>(
    markers: &BTreeMap<SceneMarkerId, MarkerSpec>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(markers.values())
}

/// In-memory [`MapSurface`].
#[derive(Debug, Clone, Default)]
pub struct SceneSurface {
    scene: Arc<Mutex<Scene>>,
}

impl SceneSurface {
    /// A surface that is ready immediately.
    pub fn new() -> Self {
        let surface = Self::default();
        surface.lock().ready = true;
        surface
    }

    /// A ready surface opened on the view described by `config`.
    pub fn with_map_config(config: &MapConfig) -> Self {
        let surface = Self::new();
        surface.lock().initial_view = Some(InitialView::from(config));
        surface
    }

    /// A surface that is still loading until [`SceneSurface::mark_loaded`].
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn mark_loaded(&self) {
        self.lock().ready = true;
    }

    /// Copy of the current scene.
    pub fn snapshot(&self) -> Scene {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Scene> {
        self.scene.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MapSurface for SceneSurface {
    type Marker = SceneMarkerId;

    fn is_ready(&self) -> bool {
        self.lock().ready
    }

    fn add_marker(&mut self, marker: &MarkerSpec) -> SceneMarkerId {
        let mut scene = self.lock();
        let id = SceneMarkerId(scene.next_marker);
        scene.next_marker += 1;
        scene.markers.insert(id, marker.clone());
        scene.ops.push(SurfaceOp::AddMarker { id });
        trace!(?id, role = ?marker.role, "marker added");
        id
    }

    fn remove_marker(&mut self, marker: SceneMarkerId) {
        let mut scene = self.lock();
        scene.markers.remove(&marker);
        scene.ops.push(SurfaceOp::RemoveMarker { id: marker });
    }

    fn set_route_line(&mut self, line: &RouteLine) {
        let mut scene = self.lock();
        scene.route_line = Some(line.clone());
        scene.ops.push(SurfaceOp::SetRouteLine {
            points: line.coordinates.len(),
        });
    }

    fn clear_route_line(&mut self) {
        let mut scene = self.lock();
        scene.route_line = None;
        scene.ops.push(SurfaceOp::ClearRouteLine);
    }

    fn fit_bounds(&mut self, camera: &CameraFit) {
        let mut scene = self.lock();
        scene.camera = Some(*camera);
        scene.ops.push(SurfaceOp::FitBounds);
    }

    fn destroy(&mut self) {
        let mut scene = self.lock();
        scene.markers.clear();
        scene.route_line = None;
        scene.destroyed = true;
        scene.ready = false;
        scene.ops.push(SurfaceOp::Destroy);
    }
}
