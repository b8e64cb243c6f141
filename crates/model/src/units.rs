use serde::{Deserialize, Serialize};

use crate::grid::Coordinate;

/// A placeable defense unit (dome) with a map position.
///
/// The unit collection is wholesale-replaced on placement and reset actions,
/// never individually mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub coordinate: Coordinate,
}

impl Unit {
    pub fn new(id: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            coordinate,
        }
    }
}
