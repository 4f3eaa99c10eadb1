use std::io::Read;

use geojson::{GeoJson, Value};
use rayon::prelude::*;

use crate::error::GeoError;
use crate::types::{BoundingBox, Coordinate, DistanceUnit};

/// Read a number of degrees from user input the lenient way.
///
/// Surrounding whitespace is ignored and the longest leading decimal number is used, so
/// `"12abc"` reads as 12. Input with no numeric prefix reads as 0.
pub fn coerce_degrees(s: &str) -> f64 {
    let s = s.trim();
    let b = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if end < b.len() && (b[end] == b'+' || b[end] == b'-') {
        end += 1;
    }
    let int_end = digits_from(end);
    let mut mantissa = int_end - end;
    end = int_end;
    if end < b.len() && b[end] == b'.' {
        let frac_end = digits_from(end + 1);
        mantissa += frac_end - (end + 1);
        if mantissa > 0 {
            end = frac_end;
        }
    }
    if mantissa == 0 {
        return 0.0;
    }
    if end < b.len() && (b[end] == b'e' || b[end] == b'E') {
        let mut exp = end + 1;
        if exp < b.len() && (b[exp] == b'+' || b[exp] == b'-') {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Split `"lat,lng[,...]"` into its first two fields. Returns `None` when there is no comma,
/// or when the first comma is the very first character.
pub(crate) fn split_pair(s: &str) -> Option<(f64, f64)> {
    match s.find(',') {
        None | Some(0) => None,
        Some(_) => {
            let mut fields = s.split(',');
            let lat = fields.next().map_or(0.0, coerce_degrees);
            let lng = fields.next().map_or(0.0, coerce_degrees);
            Some((lat, lng))
        }
    }
}

// GeoJSON positions are [lng, lat].
fn position(pos: &[f64]) -> Option<Coordinate> {
    if pos.len() < 2 {
        return None;
    }
    Some(Coordinate {
        lat: pos[1],
        lng: pos[0],
    })
}

fn collect_positions(value: &Value, out: &mut Vec<Coordinate>) {
    match *value {
        Value::Point(ref pos) => out.extend(position(pos)),
        Value::MultiPoint(ref positions) |
        Value::LineString(ref positions) => {
            out.extend(positions.iter().filter_map(|p| position(p)))
        }
        Value::GeometryCollection(ref geometries) => {
            for g in geometries {
                collect_positions(&g.value, out);
            }
        }
        _ => (),
    }
}

/// Return every point, multipoint and linestring position found in a GeoJSON document.
/// If bounds given, only return coordinates within bounds.
pub fn points_from_json<R: Read>(reader: R,
                                 bounds: Option<BoundingBox>)
                                 -> Result<Vec<Coordinate>, GeoError> {
    let json: GeoJson = serde_json::from_reader(reader)?;
    let mut points = Vec::with_capacity(256);
    match json {
        GeoJson::FeatureCollection(ref collection) => {
            for feature in &collection.features {
                if let Some(ref geometry) = feature.geometry {
                    collect_positions(&geometry.value, &mut points);
                }
            }
        }
        GeoJson::Feature(ref feature) => {
            if let Some(ref geometry) = feature.geometry {
                collect_positions(&geometry.value, &mut points);
            }
        }
        GeoJson::Geometry(ref geometry) => collect_positions(&geometry.value, &mut points),
    }
    if let Some(b) = bounds {
        points.retain(|c| b.contains(c));
    }
    log::debug!("read {} points from GeoJSON", points.len());
    Ok(points)
}

/// Find the points no further than `radius` from `center`.
///
/// Distances are computed in parallel. The result holds `(index, distance)` pairs, nearest
/// first, ties broken by index.
pub fn within_radius(points: &[Coordinate],
                     center: Coordinate,
                     radius: f64,
                     unit: DistanceUnit)
                     -> Vec<(usize, f64)> {
    let mut hits: Vec<(usize, f64)> = points.par_iter()
        .enumerate()
        .map(|(i, p)| (i, center.distance_to(p, unit)))
        .filter(|&(_, d)| d <= radius)
        .collect();
    hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    hits
}
