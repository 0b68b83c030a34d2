use super::BarcodeDetector;
use crate::models::{Detection, Point, Polygon};
use image::GrayImage;
use rqrr::PreparedImage;
use tracing::debug;

/// QR code scanner.
///
/// Each decoded grid becomes one detection whose polygon is the grid's four
/// corner points. Grids that are found but fail to decode are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrScanner;

impl QrScanner {
    /// Create a scanner
    pub fn new() -> Self {
        Self
    }
}

impl BarcodeDetector for QrScanner {
    fn detect(&self, image: &GrayImage) -> Vec<Detection> {
        let mut prepared = PreparedImage::prepare(image.clone());
        let grids = prepared.detect_grids();
        debug!(grids = grids.len(), "qr grids located");

        let mut detections = Vec::with_capacity(grids.len());
        for (i, grid) in grids.iter().enumerate() {
            let mut payload = Vec::new();
            match grid.decode_to(&mut payload) {
                Ok(meta) => {
                    debug!(grid = i, version = meta.version.0, bytes = payload.len(), "qr grid decoded");
                    let corners: Vec<Point> = grid.bounds.iter().map(Point::from).collect();
                    detections.push(Detection::new(Polygon::new(corners), payload));
                }
                Err(err) => {
                    debug!(grid = i, error = %err, "qr grid failed to decode");
                }
            }
        }

        detections
    }
}
