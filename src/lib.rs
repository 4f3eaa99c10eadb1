//! Bounding boxes and great-circle distances on latitude/longitude pairs.
//!
//! The three core operations are free functions: [`parse_box`] validates a box given as two
//! `"lat,lng"` strings, [`compute_square_boundary`] builds a box around a center point, and
//! [`great_circle_distance`] measures the haversine distance between two points.

use std::f64::consts::PI;

mod error;
mod types;
pub mod util;

pub use error::GeoError;
pub use types::*;
use util::split_pair;

/// Mean radius of the earth in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6372.797;

/// Pi divided by 180 degrees, as a fixed literal. Distances are computed with this value rather
/// than `f64::to_radians` so results stay identical to existing fixtures.
pub const DEGREES_TO_RADIANS: f64 = 0.017453293;

pub const METERS_PER_KM: f64 = 1000.0;

/// Parse the bounds of the box spanned by a top-left and a bottom-right coordinate, each given
/// as `"lat,lng"`. Fields after the second are ignored and non-numeric fields read as 0.
///
/// A missing argument should be passed as the empty string. Fails with
/// `GeoError::InvalidInput` if either argument has no comma (a comma in first position does
/// not count), or if the bottom-right coordinate is not strictly south-east of the top-left.
///
/// The returned box has `lat1 > lat2` and `lng1 < lng2`.
pub fn parse_box(top_left: &str, bottom_right: &str) -> Result<BoundingBox, GeoError> {
    let pairs = (split_pair(top_left), split_pair(bottom_right));
    let ((lat1, lng1), (lat2, lng2)) = match pairs {
        (Some(a), Some(b)) => (a, b),
        _ => {
            log::debug!("rejecting box [{}] [{}]: malformed", top_left, bottom_right);
            return Err(GeoError::InvalidInput("Required arguments missing or malformed"
                .to_string()));
        }
    };

    if lng1 >= lng2 || lat1 <= lat2 {
        log::debug!("rejecting box [{}] [{}]: not south-east", top_left, bottom_right);
        return Err(GeoError::InvalidInput(format!("Arguments do not define a box ([{}] [{}]), \
                                                   bottom-right must be south-east of the \
                                                   top-left coordinate",
                                                  top_left,
                                                  bottom_right)));
    }

    Ok(BoundingBox {
        lat1,
        lat2,
        lng1,
        lng2,
    })
}

/// Calculate the bounding box reaching `angular_half_diagonal` out from the center point.
///
/// The longitude span is widened by the meridian convergence at both latitude edges. The
/// returned box has `lat1 <= lat2` and `lng1 <= lng2`. Centers close to a pole blow up the
/// longitude span, since the cosine of the edge latitude approaches zero.
pub fn compute_square_boundary(angular_half_diagonal: f64, lat: f64, lng: f64) -> BoundingBox {
    let (lat1, lat2) = lat_boundary(angular_half_diagonal, lat);
    let (lng1, lng2) = lng_boundary(lat, lng, lat1, lat2);
    let b = BoundingBox {
        lat1,
        lat2,
        lng1,
        lng2,
    };
    log::trace!("boundary {} around {},{}: {}", angular_half_diagonal, lat, lng, b);
    b
}

fn lat_boundary(dist: f64, lat: f64) -> (f64, f64) {
    let d = (dist / EARTH_RADIUS_KM * 2.0 * PI) * 360.0;
    let (lat1, lat2) = (lat - d, lat + d);
    if lat1 > lat2 { (lat2, lat1) } else { (lat1, lat2) }
}

fn lng_boundary(lat: f64, lng: f64, lat1: f64, lat2: f64) -> (f64, f64) {
    let d = lat - lat1;
    let d1 = d / lat1.to_radians().cos();
    let d2 = d / lat2.to_radians().cos();

    let lng1 = f64::min(lng - d1, lng - d2);
    let lng2 = f64::max(lng + d1, lng + d2);
    if lng1 > lng2 { (lng2, lng1) } else { (lng1, lng2) }
}

/// Calculate the haversine distance between two points of latitude and longitude, in
/// kilometers or meters.
pub fn great_circle_distance(lat1: f64,
                             lng1: f64,
                             lat2: f64,
                             lng2: f64,
                             unit: DistanceUnit)
                             -> f64 {
    let lat1 = lat1 * DEGREES_TO_RADIANS;
    let lng1 = lng1 * DEGREES_TO_RADIANS;
    let lat2 = lat2 * DEGREES_TO_RADIANS;
    let lng2 = lng2 * DEGREES_TO_RADIANS;

    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;

    let a = (dlat / 2.0).sin() * (dlat / 2.0).sin() +
            lat1.cos() * lat2.cos() * (dlng / 2.0).sin() * (dlng / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    let km = EARTH_RADIUS_KM * c;
    match unit {
        DistanceUnit::Kilometers => km,
        DistanceUnit::Meters => km * METERS_PER_KM,
    }
}
