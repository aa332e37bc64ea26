//! Wire format of the routing service.
//!
//! Field names here are owned by the service. In particular the polyline
//! longitude key is spelled `Longtitude` on the wire and must be read exactly
//! that way.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::LngLat;
use crate::query::PortId;
use crate::route::{Port, Route, RouteCoordinate};

/// Response body of `POST /api/route`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_distance: Option<f64>,
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub ports: Option<Vec<PortDto>>,
    #[serde(default)]
    pub route_coordinates: Option<Vec<RouteCoordinateDto>>,
}

/// Port entry of a route response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortDto {
    pub id: PortId,
    pub name: String,
    pub coordinates: LngLat,
}

/// Polyline entry of a route response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RouteCoordinateDto {
    #[serde(rename = "Longtitude")]
    pub longitude: f64,
    pub latitude: f64,
}

/// Error body the service returns alongside a 5xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<PortDto> for Port {
    fn from(value: PortDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            coordinates: value.coordinates,
        }
    }
}

impl From<RouteCoordinateDto> for RouteCoordinate {
    fn from(value: RouteCoordinateDto) -> Self {
        RouteCoordinate::new(value.longitude, value.latitude)
    }
}

impl RouteResponse {
    /// Convert a successful response into a [`Route`].
    ///
    /// Both `ports` and `route_coordinates` must be present; an empty port
    /// list is rejected by [`Route::new`].
    pub fn into_route(self) -> Result<Route> {
        let ports = self
            .ports
            .ok_or_else(|| Error::malformed("missing field `ports`"))?;
        let coords = self
            .route_coordinates
            .ok_or_else(|| Error::malformed("missing field `route_coordinates`"))?;

        let mut route = Route::new(
            ports.into_iter().map(Port::from).collect(),
            coords.into_iter().map(RouteCoordinate::from).collect(),
        )?;
        if let Some(path) = self.path {
            route = route.with_stop_count(path.len());
        }
        if let Some(total) = self.total_distance {
            route = route.with_total_distance(total);
        }
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misspelled_longitude_key_is_read() {
        let coord: RouteCoordinateDto =
            serde_json::from_str(r#"{"Longtitude": 103.8, "latitude": 1.3}"#).expect("decode");
        let point = RouteCoordinate::from(coord).to_lng_lat().to_array();
        assert_eq!(point, [103.8, 1.3]);
    }

    #[test]
    fn correctly_spelled_longitude_is_not_accepted() {
        let result =
            serde_json::from_str::<RouteCoordinateDto>(r#"{"longitude": 103.8, "latitude": 1.3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn full_response_converts_to_route() {
        let body = serde_json::json!({
            "success": true,
            "total_distance": 15800,
            "path": [2, 24],
            "ports": [
                { "id": 2, "name": "Singapore", "coordinates": [103.8198, 1.3521] },
                { "id": 24, "name": "Rotterdam", "coordinates": [4.47917, 51.9225] }
            ],
            "route_coordinates": [
                { "latitude": 1.3521, "Longtitude": 103.8198 },
                { "latitude": 51.9225, "Longtitude": 4.47917 }
            ]
        });
        let response: RouteResponse = serde_json::from_value(body).expect("decode");
        let route = response.into_route().expect("route");

        assert_eq!(route.ports().len(), 2);
        assert_eq!(route.start().id, PortId(2));
        assert_eq!(route.end().name, "Rotterdam");
        assert_eq!(route.path()[0], RouteCoordinate::new(103.8198, 1.3521));
        assert_eq!(route.total_distance(), Some(15800.0));
        assert_eq!(route.summary().total_ports, 2);
    }

    #[test]
    fn path_length_drives_stop_count() {
        let body = serde_json::json!({
            "success": true,
            "path": [1, 5, 9],
            "ports": [
                { "id": 1, "name": "A", "coordinates": [0.0, 0.0] },
                { "id": 9, "name": "C", "coordinates": [1.0, 1.0] }
            ],
            "route_coordinates": []
        });
        let response: RouteResponse = serde_json::from_value(body).expect("decode");
        assert_eq!(response.into_route().expect("route").summary().total_ports, 3);
    }

    #[test]
    fn missing_route_coordinates_is_malformed() {
        let body = serde_json::json!({
            "success": true,
            "ports": [{ "id": 1, "name": "A", "coordinates": [0.0, 0.0] }]
        });
        let response: RouteResponse = serde_json::from_value(body).expect("decode");
        let err = response.into_route().expect_err("malformed");
        assert!(err.to_string().contains("route_coordinates"));
    }

    #[test]
    fn empty_ports_is_rejected() {
        let body = serde_json::json!({
            "success": true,
            "ports": [],
            "route_coordinates": []
        });
        let response: RouteResponse = serde_json::from_value(body).expect("decode");
        assert!(matches!(response.into_route(), Err(Error::EmptyRoute)));
    }
}
