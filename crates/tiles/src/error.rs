#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    /// The layer was torn down; no further loads are issued.
    LayerClosed,
    /// Network failure fetching the tile. Scoped to this tile only.
    Fetch(String),
    /// The tile bytes (or a cached entry) are not a decodable image.
    Decode(String),
}

impl std::fmt::Display for TileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileError::LayerClosed => write!(f, "tile layer is closed"),
            TileError::Fetch(msg) => write!(f, "tile fetch failed: {msg}"),
            TileError::Decode(msg) => write!(f, "tile decode failed: {msg}"),
        }
    }
}

impl std::error::Error for TileError {}
