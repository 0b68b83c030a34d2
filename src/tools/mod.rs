//! Helpers shared by the CLI and benches: image loading, dataset walking,
//! batch scanning.

use crate::config::max_dim;
use crate::detector::BarcodeDetector;
use crate::error::SelectError;
use crate::models::Point;
use crate::selector::{Selector, payload_text};
use image::{GenericImageView, GrayImage};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Failures while turning a file into a selection
#[derive(Debug, Error)]
pub enum ToolError {
    /// Image could not be opened or decoded
    #[error("failed to load image {path}: {source}")]
    Image {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: image::ImageError,
    },
    /// Text file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// Selection over the detections failed
    #[error(transparent)]
    Select(#[from] SelectError),
}

/// Load an image as 8-bit grayscale, downscaled when `IDREC_MAX_DIM` asks for it.
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<GrayImage, ToolError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| ToolError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(limit) = max_dim() {
        let (w, h) = img.dimensions();
        if w.max(h) > limit {
            debug!(width = w, height = h, limit, "downscaling image");
            let resized = img.resize(limit, limit, image::imageops::FilterType::Triangle);
            return Ok(resized.to_luma8());
        }
    }
    Ok(img.to_luma8())
}

/// Result of scanning one image
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Image scanned
    pub path: PathBuf,
    /// Number of detections found
    pub detections: usize,
    /// Area of the winning polygon
    pub area: Option<f64>,
    /// Winning payload as text
    pub payload: Option<String>,
}

/// Detect and select on an already-loaded image
pub fn scan_image<D: BarcodeDetector + ?Sized>(
    detector: &D,
    selector: &Selector,
    path: &Path,
    image: &GrayImage,
) -> Result<ScanReport, ToolError> {
    let detections = detector.detect(image);
    let winner = selector.largest_index(&detections)?;
    let payload = winner
        .map(|index| payload_text(&detections, index))
        .transpose()?;
    Ok(ScanReport {
        path: path.to_path_buf(),
        detections: detections.len(),
        area: winner.map(|i| detections[i].area()),
        payload,
    })
}

/// Load and scan one image file
pub fn scan_file<D: BarcodeDetector + ?Sized>(
    detector: &D,
    selector: &Selector,
    path: &Path,
) -> Result<ScanReport, ToolError> {
    let image = load_gray(path)?;
    scan_image(detector, selector, path, &image)
}

/// Scan many files in parallel. Results keep the input order.
pub fn scan_paths<D>(
    detector: &D,
    selector: &Selector,
    paths: &[PathBuf],
) -> Vec<Result<ScanReport, ToolError>>
where
    D: BarcodeDetector + Sync + ?Sized,
{
    paths
        .par_iter()
        .map(|path| {
            let report = scan_file(detector, selector, path);
            if let Err(err) = &report {
                warn!(path = %path.display(), error = %err, "scan failed");
            }
            report
        })
        .collect()
}

/// Read whitespace-separated `x y` pairs, skipping blank and `#` lines.
///
/// Tokens that are not finite numbers are ignored, as is an unpaired trailing value.
pub fn read_points(path: &Path) -> Result<Vec<Point>, ToolError> {
    let content = fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_points(&content))
}

/// Parse point text in the format accepted by [`read_points`]
pub fn parse_points(content: &str) -> Vec<Point> {
    let mut vals = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        for tok in line.split_whitespace() {
            match tok.parse::<f64>() {
                Ok(v) if v.is_finite() => vals.push(v),
                _ => {}
            }
        }
    }
    vals.chunks_exact(2)
        .map(|chunk| Point::new(chunk[0], chunk[1]))
        .collect()
}

/// Default dataset root from environment variables.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("IDREC_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("images"))
}

/// Image paths under `root`, sorted, optionally truncated to `limit`
pub fn dataset_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "bmp") {
                    images.push(path);
                }
            }
        }
    }

    images
}
