//! Geographic primitives shared by the route model and the map surface.
//!
//! Everything here uses the map engine's convention: longitude first, then
//! latitude.

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair in degrees.
///
/// Serializes as a two-element array `[lng, lat]`, the layout both the routing
/// service (for port coordinates) and line geometry use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Position as `[longitude, latitude]`.
    pub const fn to_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(value: LngLat) -> Self {
        value.to_array()
    }
}

/// Axis-aligned bounding box in longitude/latitude space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLatBounds {
    pub south_west: LngLat,
    pub north_east: LngLat,
}

impl LngLatBounds {
    /// Bounds covering a single point.
    pub const fn from_point(point: LngLat) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Smallest bounds containing every point, or `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LngLat>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |mut bounds, point| {
            bounds.extend(point);
            bounds
        }))
    }

    /// Grow the bounds to include `point`.
    pub fn extend(&mut self, point: LngLat) {
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
    }

    pub fn contains(&self, point: LngLat) -> bool {
        (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
            && (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
    }

    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.south_west.lng + self.north_east.lng) / 2.0,
            (self.south_west.lat + self.north_east.lat) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lng_lat_round_trips_as_array() {
        let point: LngLat = serde_json::from_str("[103.8, 1.3]").expect("decode");
        assert_eq!(point, LngLat::new(103.8, 1.3));
        assert_eq!(serde_json::to_string(&point).expect("encode"), "[103.8,1.3]");
    }

    #[test]
    fn bounds_grow_to_cover_all_points() {
        let bounds = LngLatBounds::from_points([
            LngLat::new(103.8, 1.3),
            LngLat::new(-0.1, 51.5),
            LngLat::new(4.4, 51.9),
        ])
        .expect("points present");

        assert_eq!(bounds.south_west, LngLat::new(-0.1, 1.3));
        assert_eq!(bounds.north_east, LngLat::new(103.8, 51.9));
        assert!(bounds.contains(LngLat::new(50.0, 20.0)));
        assert!(!bounds.contains(LngLat::new(120.0, 20.0)));
    }

    #[test]
    fn empty_point_set_has_no_bounds() {
        assert!(LngLatBounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn single_point_bounds_are_degenerate() {
        let point = LngLat::new(10.0, 20.0);
        let bounds = LngLatBounds::from_points([point]).expect("one point");
        assert_eq!(bounds.center(), point);
    }
}
