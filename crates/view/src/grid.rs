use foundation::bounds::LatLngBounds;
use model::{Coordinate, GridCell};

use crate::symbology::{Rgb, ViewMode, fill_color};

/// Half the side of a rendered grid cell, in degrees.
pub const CELL_HALF_EXTENT_DEG: f64 = 0.0125;

/// One drawable grid rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct CellShape {
    pub id: String,
    pub bounds: LatLngBounds,
    pub fill: Rgb,
    pub threat_level: f64,
    pub importance_level: f64,
    pub building_density: f64,
}

impl CellShape {
    /// Hover readout, two decimals per scalar.
    pub fn tooltip(&self) -> Vec<String> {
        vec![
            format!("Threat: {:.2}", self.threat_level),
            format!("Importance: {:.2}", self.importance_level),
            format!("Building Density: {:.2}", self.building_density),
        ]
    }
}

/// Projects grid cells into colored rectangles and resolves cell clicks.
///
/// Purely derived from orchestrator state: a click yields a cell-id intent
/// for the orchestrator, never a local mutation.
#[derive(Debug, Default)]
pub struct GridRenderer {
    mode: ViewMode,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn shapes(&self, cells: &[GridCell]) -> Vec<CellShape> {
        cells
            .iter()
            .map(|cell| {
                let value = match self.mode {
                    ViewMode::Threat => cell.threat_level,
                    ViewMode::Importance => cell.importance_level,
                };
                CellShape {
                    id: cell.id.clone(),
                    bounds: LatLngBounds::around(
                        cell.coordinate.lat,
                        cell.coordinate.lng,
                        CELL_HALF_EXTENT_DEG,
                    ),
                    fill: fill_color(value, self.mode),
                    threat_level: cell.threat_level,
                    importance_level: cell.importance_level,
                    building_density: cell.building_density,
                }
            })
            .collect()
    }

    /// The clicked cell's id, if the point lands inside one.
    ///
    /// Overlapping cells resolve deterministically to the lowest id.
    pub fn pick<'a>(&self, cells: &'a [GridCell], at: Coordinate) -> Option<&'a str> {
        if !at.is_finite() {
            return None;
        }
        cells
            .iter()
            .filter(|cell| {
                LatLngBounds::around(
                    cell.coordinate.lat,
                    cell.coordinate.lng,
                    CELL_HALF_EXTENT_DEG,
                )
                .contains(at.lat, at.lng)
            })
            .map(|cell| cell.id.as_str())
            .min()
    }
}
