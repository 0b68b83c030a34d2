//! idrec - read the product identifier off a shipping label
//!
//! A label photo often shows several barcodes. The scanner reports each one as
//! a closed polygon plus its decoded bytes; this crate keeps the one covering
//! the largest area and hands back its payload.
//!
//! ```
//! use idrec::{Detection, select_largest};
//!
//! let detections = [
//!     Detection::new([(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)], "SMALL"),
//!     Detection::new([(0.0, 0.0), (0.0, 3.0), (3.0, 3.0), (3.0, 0.0)], "BIG"),
//! ];
//! assert_eq!(select_largest(&detections), Ok(Some(&b"BIG"[..])));
//! assert_eq!(select_largest(&[]), Ok(None));
//! ```
//!
//! Around that core sit the pieces a label-reading service needs: a QR
//! scanner, parsing of vision-model replies and a per-user scan ledger.

#![warn(missing_docs)]

/// Selector configuration and environment overrides
pub mod config;
/// Barcode detectors (QR via `rqrr`, fixed lists)
pub mod detector;
/// Error types
pub mod error;
/// Per-user table of scanned ids
pub mod ledger;
/// Core data structures (Point, Polygon, Detection)
pub mod models;
/// Vision-model reply parsing
pub mod reply;
/// Largest-area selection
pub mod selector;
/// Image loading and batch scanning helpers
pub mod tools;

pub use config::{DegeneratePolicy, SelectorConfig};
pub use detector::{BarcodeDetector, FixedDetections, QrScanner};
pub use error::SelectError;
pub use ledger::{ScanLedger, ScanRecord};
pub use models::{Detection, Point, Polygon};
pub use reply::{FieldReply, ReplyError, ResponseCode, parse_reply};
pub use selector::{Selector, compute_area, largest_index, payload_text, select_largest};

use image::GrayImage;

/// Detect barcodes in `image` and return the largest one's payload as text.
///
/// `Ok(None)` means nothing was detected.
pub fn read_largest<D: BarcodeDetector + ?Sized>(
    detector: &D,
    image: &GrayImage,
) -> Result<Option<String>, SelectError> {
    let detections = detector.detect(image);
    Selector::default().select_text(&detections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_largest_blank_image() {
        let image = GrayImage::from_pixel(32, 32, image::Luma([255u8]));
        assert_eq!(read_largest(&QrScanner::new(), &image), Ok(None));
    }

    #[test]
    fn test_read_largest_fixed() {
        let detector = FixedDetections(vec![
            Detection::new([(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)], "TRI"),
            Detection::new([(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)], "SQ"),
        ]);
        let image = GrayImage::new(1, 1);
        assert_eq!(read_largest(&detector, &image), Ok(Some("TRI".to_string())));
    }
}
