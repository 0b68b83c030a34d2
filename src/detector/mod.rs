//! Barcode detectors feeding the selector
//!
//! A detector turns a raster image into an ordered list of [`Detection`]s. The
//! selector never looks at pixels; everything image-specific lives here.

use crate::models::Detection;
use image::GrayImage;

/// QR grid detection backed by `rqrr`
pub mod qr;

pub use qr::QrScanner;

/// Source of barcode detections for one image
pub trait BarcodeDetector {
    /// Every region found in `image`, in detector order
    fn detect(&self, image: &GrayImage) -> Vec<Detection>;
}

/// Detector that replays a fixed list, regardless of the image.
///
/// Useful when detections were computed elsewhere and only selection is needed.
#[derive(Debug, Clone, Default)]
pub struct FixedDetections(pub Vec<Detection>);

impl BarcodeDetector for FixedDetections {
    fn detect(&self, _image: &GrayImage) -> Vec<Detection> {
        self.0.clone()
    }
}

