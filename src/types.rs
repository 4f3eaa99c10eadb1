use std::fmt;
use std::str::FromStr;

use geojson::{Geometry, Value};
use serde_derive::{Deserialize, Serialize};

use crate::error::GeoError;
use crate::util::split_pair;
use crate::great_circle_distance;

/// Represent some map coordinate, in decimal degrees.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Coordinate {
        Coordinate { lat, lng }
    }

    /// Great-circle distance to another coordinate.
    pub fn distance_to(&self, other: &Coordinate, unit: DistanceUnit) -> f64 {
        great_circle_distance(self.lat, self.lng, other.lat, other.lng, unit)
    }
}

impl FromStr for Coordinate {
    type Err = GeoError;

    /// Parse a `"lat,lng"` pair with the same lenient rules as `parse_box`.
    fn from_str(s: &str) -> Result<Coordinate, GeoError> {
        let (lat, lng) = split_pair(s)
            .ok_or_else(|| GeoError::InvalidInput(format!("not a lat,lng pair: [{}]", s)))?;
        Ok(Coordinate { lat, lng })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Unit of a great-circle distance.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Meters,
}

/// Four degree values bounding a box on the map.
///
/// The order of the latitude pair depends on how the box was made: `parse_box` yields
/// `lat1 > lat2` (lat1 is the northern edge) while `compute_square_boundary` yields
/// `lat1 <= lat2`. Use `north`, `south`, `east` and `west` when the origin is unknown.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat1: f64,
    pub lat2: f64,
    pub lng1: f64,
    pub lng2: f64,
}

impl BoundingBox {
    pub fn north(&self) -> f64 {
        f64::max(self.lat1, self.lat2)
    }
    pub fn south(&self) -> f64 {
        f64::min(self.lat1, self.lat2)
    }
    pub fn east(&self) -> f64 {
        f64::max(self.lng1, self.lng2)
    }
    pub fn west(&self) -> f64 {
        f64::min(self.lng1, self.lng2)
    }
    pub fn range_lat(&self) -> f64 {
        self.north() - self.south()
    }
    pub fn range_lng(&self) -> f64 {
        self.east() - self.west()
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            lat: (self.north() + self.south()) / 2.0,
            lng: (self.east() + self.west()) / 2.0,
        }
    }

    /// True if the coordinate lies inside the box or on one of its edges.
    pub fn contains(&self, c: &Coordinate) -> bool {
        self.south() <= c.lat && c.lat <= self.north() && self.west() <= c.lng &&
        c.lng <= self.east()
    }

    /// Length in kilometers of the box diagonal, from the south-west to the north-east corner.
    pub fn diagonal_km(&self) -> f64 {
        great_circle_distance(self.south(),
                              self.west(),
                              self.north(),
                              self.east(),
                              DistanceUnit::Kilometers)
    }

    /// GeoJSON polygon tracing the box counter-clockwise from the south-west corner.
    pub fn to_geojson(&self) -> Geometry {
        let (n, s, e, w) = (self.north(), self.south(), self.east(), self.west());
        let ring = vec![vec![w, s], vec![e, s], vec![e, n], vec![w, n], vec![w, s]];
        let mut geometry = Geometry::new(Value::Polygon(vec![ring]));
        geometry.bbox = Some(vec![w, s, e, n]);
        geometry
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{},{}] [{},{}]", self.lat1, self.lng1, self.lat2, self.lng2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EARTH_RADIUS_KM;

    fn sample() -> BoundingBox {
        BoundingBox {
            lat1: 56.0,
            lat2: 55.0,
            lng1: 10.0,
            lng2: 11.0,
        }
    }

    #[test]
    fn edges_ignore_latitude_order() {
        let b = sample();
        let flipped = BoundingBox {
            lat1: b.lat2,
            lat2: b.lat1,
            ..b
        };
        assert_eq!(b.north(), flipped.north());
        assert_eq!(b.south(), flipped.south());
        assert_eq!(b.range_lat(), 1.0);
        assert_eq!(b.range_lng(), 1.0);
        assert_eq!(b.center(), Coordinate::new(55.5, 10.5));
    }

    #[test]
    fn contains_includes_edges() {
        let b = sample();
        assert!(b.contains(&Coordinate::new(55.5, 10.5)));
        assert!(b.contains(&Coordinate::new(56.0, 11.0)));
        assert!(!b.contains(&Coordinate::new(54.9, 10.5)));
        assert!(!b.contains(&Coordinate::new(55.5, 11.1)));
    }

    #[test]
    fn geojson_ring_is_closed() {
        let g = sample().to_geojson();
        assert_eq!(g.bbox, Some(vec![10.0, 55.0, 11.0, 56.0]));
        match g.value {
            Value::Polygon(ref rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 5);
                assert_eq!(rings[0].first(), rings[0].last());
            }
            _ => panic!("expected polygon"),
        }
    }

    #[test]
    fn diagonal_is_bounded() {
        let d = sample().diagonal_km();
        assert!(d > 100.0 && d < EARTH_RADIUS_KM * std::f64::consts::PI);
    }

    #[test]
    fn coordinate_from_str() {
        let c: Coordinate = "55.5,12,2".parse().unwrap();
        assert_eq!(c, Coordinate::new(55.5, 12.0));
        assert!("5512".parse::<Coordinate>().is_err());
        assert!(",12".parse::<Coordinate>().is_err());
        assert_eq!(c.to_string(), "55.5,12");
    }

    #[test]
    fn unit_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DistanceUnit::Meters).unwrap(), "\"meters\"");
        assert_eq!(DistanceUnit::default(), DistanceUnit::Kilometers);
    }
}
