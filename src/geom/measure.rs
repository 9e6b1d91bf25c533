use std::f64::consts::PI;

use geo::{Area, LineString, MultiPolygon};

/// Planar area of a multipolygon, holes excluded.
pub fn area(shape: &MultiPolygon<f64>) -> f64 { shape.unsigned_area() }

/// Total boundary length of a multipolygon, including hole rings.
pub fn perimeter(shape: &MultiPolygon<f64>) -> f64 {
    shape.iter()
        .map(|polygon| {
            ring_length(polygon.exterior())
                + polygon.interiors().iter().map(ring_length).sum::<f64>()
        })
        .sum()
}

fn ring_length(ring: &LineString<f64>) -> f64 {
    ring.lines().map(|line| line.dx().hypot(line.dy())).sum()
}

/// Polsby–Popper compactness: `4π·area / perimeter²`.
/// Degenerate shapes (zero or non-finite perimeter) score 0.
pub fn polsby_popper(area: f64, perimeter: f64) -> f64 {
    if perimeter == 0.0 || !perimeter.is_finite() { return 0.0 }
    4.0 * PI * area / (perimeter * perimeter)
}

/// Perimeter divided by area; infinite when the area is 0.
pub fn perimeter_area_ratio(area: f64, perimeter: f64) -> f64 {
    if area == 0.0 { return f64::INFINITY }
    perimeter / area
}
