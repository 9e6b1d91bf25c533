use geo::MultiPolygon;

/// The smallest indivisible area of a plan (e.g. a census block).
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Globally unique identifier, such as a block GEOID.
    pub id: String,
    pub geometry: MultiPolygon<f64>,
    pub population: u64,
}

impl Unit {
    pub fn new(id: impl Into<String>, geometry: impl Into<MultiPolygon<f64>>, population: u64) -> Self {
        Self { id: id.into(), geometry: geometry.into(), population }
    }
}
