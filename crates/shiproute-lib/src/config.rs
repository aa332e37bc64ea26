//! Client configuration.
//!
//! Defaults reproduce the stock deployment: the routing service on
//! `localhost:5000` and a world map centred on Singapore. The only value read
//! from the environment is the map access credential.

use std::fmt;
use std::time::Duration;

use crate::geo::LngLat;
use crate::render::RenderStyle;

/// Default routing endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/route";
/// Environment variable holding the map surface access credential.
pub const MAP_TOKEN_ENV: &str = "SHIPROUTE_MAP_TOKEN";

const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/light-v11";
const DEFAULT_CENTER: LngLat = LngLat::new(103.8198, 1.3521);
const DEFAULT_ZOOM: f64 = 2.0;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings handed to a map surface when it is created.
#[derive(Clone, PartialEq)]
pub struct MapConfig {
    /// Access credential for the map engine. Opaque to this crate.
    pub access_token: Option<String>,
    pub style_url: String,
    pub center: LngLat,
    pub zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            style_url: DEFAULT_STYLE_URL.to_string(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl fmt::Debug for MapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("style_url", &self.style_url)
            .field("center", &self.center)
            .field("zoom", &self.zoom)
            .finish()
    }
}

/// Everything the client needs to request and draw routes.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
    pub map: MapConfig,
    pub style: RenderStyle,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            map: MapConfig::default(),
            style: RenderStyle::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults plus the map credential from `SHIPROUTE_MAP_TOKEN`.
    pub fn from_env() -> Self {
        let access_token = std::env::var(MAP_TOKEN_ENV)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        Self::default().with_access_token(access_token)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.map.access_token = token;
        self
    }
}
