#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use shiproute_lib::{
    LngLat, MapView, Port, PortId, Query, RenderPipeline, RenderStyle, Route, RouteCoordinate,
    RouteFetcher, RouteResult, SceneSurface,
};

pub fn port(id: u64, name: &str, lng: f64, lat: f64) -> Port {
    Port {
        id: PortId(id),
        name: name.to_string(),
        coordinates: LngLat::new(lng, lat),
    }
}

/// Singapore to Rotterdam, no intermediate stops.
pub fn two_port_route() -> Route {
    Route::new(
        vec![
            port(2, "Singapore", 103.8198, 1.3521),
            port(24, "Rotterdam", 4.47917, 51.9225),
        ],
        vec![
            RouteCoordinate::new(103.8198, 1.3521),
            RouteCoordinate::new(79.8612, 6.9271),
            RouteCoordinate::new(43.1456, 11.5721),
            RouteCoordinate::new(32.3019, 31.2653),
            RouteCoordinate::new(4.47917, 51.9225),
        ],
    )
    .expect("two-port route")
}

/// Shanghai to Los Angeles via Busan.
pub fn three_port_route() -> Route {
    Route::new(
        vec![
            port(7, "Shanghai", 121.4737, 31.2304),
            port(11, "Busan", 129.0756, 35.1796),
            port(31, "Los Angeles", -118.2437, 34.0522),
        ],
        vec![
            RouteCoordinate::new(121.4737, 31.2304),
            RouteCoordinate::new(129.0756, 35.1796),
            RouteCoordinate::new(-150.0, 40.0),
            RouteCoordinate::new(-118.2437, 34.0522),
        ],
    )
    .expect("three-port route")
}

pub fn pipeline(surface: &SceneSurface) -> RenderPipeline<SceneSurface> {
    RenderPipeline::new(MapView::create(surface.clone()), RenderStyle::default())
}

/// Fetcher whose results are released by the test, one per call, in call order.
pub struct ScriptedFetcher {
    pending: Mutex<VecDeque<oneshot::Receiver<RouteResult>>>,
    queries: Arc<Mutex<Vec<(PortId, PortId, u64)>>>,
}

impl ScriptedFetcher {
    pub fn new(calls: usize) -> (Self, Vec<oneshot::Sender<RouteResult>>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..calls).map(|_| oneshot::channel()).unzip();
        let fetcher = Self {
            pending: Mutex::new(receivers),
            queries: Arc::new(Mutex::new(Vec::new())),
        };
        (fetcher, senders)
    }

    /// Shared log of the queries received, as `(start, end, max_fuel)`.
    pub fn queries(&self) -> Arc<Mutex<Vec<(PortId, PortId, u64)>>> {
        Arc::clone(&self.queries)
    }
}

impl RouteFetcher for ScriptedFetcher {
    async fn fetch(&self, query: Query) -> RouteResult {
        self.queries
            .lock()
            .unwrap()
            .push((query.start(), query.end(), query.max_fuel().0));
        let next = self.pending.lock().unwrap().pop_front();
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| RouteResult::transport_error("script dropped")),
            None => RouteResult::transport_error("no scripted result left"),
        }
    }
}

/// Fetcher that answers every call with the same result.
pub struct FixedFetcher {
    result: RouteResult,
    calls: Arc<AtomicUsize>,
}

impl FixedFetcher {
    pub fn new(result: RouteResult) -> Self {
        Self {
            result,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter that stays readable after the fetcher moves into a session.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl RouteFetcher for FixedFetcher {
    async fn fetch(&self, _query: Query) -> RouteResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
