use base64::Engine as _;

use crate::error::TileError;

/// Decoded tile image: a recognized format plus its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileImage {
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl TileImage {
    /// Decodes raw fetched bytes, rejecting anything that is not a known
    /// raster image format.
    pub fn decode(bytes: Vec<u8>) -> Result<Self, TileError> {
        let mime = sniff_mime(&bytes)
            .ok_or_else(|| TileError::Decode("unrecognized image format".to_string()))?;
        Ok(Self { mime, bytes })
    }

    /// Re-encodes the image as a base64 `data:` URI for persistence.
    pub fn to_data_uri(&self) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime, payload)
    }

    /// Parses a persisted cache entry back into an image.
    pub fn from_data_uri(uri: &str) -> Result<Self, TileError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| TileError::Decode("missing data: scheme".to_string()))?;
        let (_mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| TileError::Decode("missing base64 marker".to_string()))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| TileError::Decode(e.to_string()))?;
        // Re-sniff rather than trusting the stored mime string.
        Self::decode(bytes)
    }
}

/// Magic-number sniffing for the formats tile servers actually emit.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some("image/png");
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    None
}
