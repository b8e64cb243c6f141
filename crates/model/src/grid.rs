use serde::{Deserialize, Serialize};

/// Geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// One cell of the threat/importance grid.
///
/// The cell set is wholesale-replaced on every grid fetch; after a successful
/// fetch the grid is exactly the server's snapshot. Ids are stable across
/// refetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub id: String,
    pub coordinate: Coordinate,
    pub threat_level: f64,
    pub importance_level: f64,
    pub building_density: f64,
    pub is_in_israel: bool,
}
