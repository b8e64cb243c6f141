/// A slippy-map tile address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId {
    pub zoom: u32,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    pub fn new(zoom: u32, x: u32, y: u32) -> Self {
        Self { zoom, x, y }
    }

    /// The tile containing `(lat, lng)` at `zoom` (Web Mercator).
    pub fn containing(lat: f64, lng: f64, zoom: u32) -> Self {
        let n = (1u64 << zoom) as f64;
        let x = ((lng + 180.0) / 360.0 * n).floor();
        let lat_rad = lat.to_radians();
        let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0
            * n)
            .floor();

        let max = (n - 1.0).max(0.0);
        Self {
            zoom,
            x: x.clamp(0.0, max) as u32,
            y: y.clamp(0.0, max) as u32,
        }
    }
}

/// Tile URL template with `{s}`/`{z}`/`{x}`/`{y}` placeholders.
///
/// Expansion of the same tile always yields the same URL: the subdomain
/// rotates by `(x + y) % subdomains.len()`, so the URL is a stable cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    template: String,
    subdomains: Vec<String>,
}

impl UrlTemplate {
    pub fn new(template: impl Into<String>, subdomains: &[&str]) -> Self {
        Self {
            template: template.into(),
            subdomains: subdomains.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The standard OpenStreetMap raster tile source.
    pub fn osm() -> Self {
        Self::new(
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            &["a", "b", "c"],
        )
    }

    pub fn expand(&self, tile: TileId) -> String {
        let mut url = self
            .template
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string());
        if url.contains("{s}") && !self.subdomains.is_empty() {
            let idx = (tile.x as usize + tile.y as usize) % self.subdomains.len();
            url = url.replace("{s}", &self.subdomains[idx]);
        }
        url
    }
}
