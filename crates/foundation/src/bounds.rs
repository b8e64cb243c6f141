/// Axis-aligned bounds in geographic degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatLngBounds {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl LatLngBounds {
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
        }
    }

    /// A square of the given half-extent centered on `(lat, lng)`.
    pub fn around(lat: f64, lng: f64, half_extent: f64) -> Self {
        Self {
            min_lat: lat - half_extent,
            min_lng: lng - half_extent,
            max_lat: lat + half_extent,
            max_lng: lng + half_extent,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Closed containment on both axes.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}
