use super::Polygon;
use serde::{Deserialize, Serialize};

/// One barcode-like region found in an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Region boundary in image coordinates
    pub polygon: Polygon,
    /// Raw decoded bytes
    pub payload: Vec<u8>,
}

impl Detection {
    /// Create a detection from a boundary and its decoded bytes
    pub fn new(polygon: impl Into<Polygon>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            polygon: polygon.into(),
            payload: payload.into(),
        }
    }

    /// Area enclosed by the boundary
    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    /// Payload as UTF-8 text
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.payload)
    }
}
