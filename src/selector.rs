//! Largest-area barcode selection
//!
//! When a label carries several codes, the one covering the most pixels is
//! taken as the product identifier. Areas come from the shoelace formula and
//! exact ties go to the earliest detection.

use crate::config::{DegeneratePolicy, SelectorConfig};
use crate::error::SelectError;
use crate::models::{Detection, Polygon};

/// Area enclosed by `polygon`. Never negative; 0 for fewer than three vertices.
pub fn compute_area(polygon: &Polygon) -> f64 {
    polygon.area()
}

/// Payload of the detection with the largest area, using the default policy.
///
/// Returns `Ok(None)` for an empty input.
pub fn select_largest(detections: &[Detection]) -> Result<Option<&[u8]>, SelectError> {
    Selector::default().select(detections)
}

/// Index of the detection with the largest area, using the default policy
pub fn largest_index(detections: &[Detection]) -> Result<Option<usize>, SelectError> {
    Selector::default().largest_index(detections)
}

/// Payload of `detections[index]` decoded as UTF-8
pub fn payload_text(detections: &[Detection], index: usize) -> Result<String, SelectError> {
    detections[index]
        .text()
        .map(str::to_owned)
        .map_err(|source| SelectError::Decode { index, source })
}

/// Largest-area selector with an explicit degenerate-polygon policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Selector {
    config: SelectorConfig,
}

impl Selector {
    /// Create a selector from a configuration
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Create a selector using `IDREC_DEGENERATE_POLICY` when set
    pub fn from_env() -> Self {
        Self::new(SelectorConfig::from_env())
    }

    /// Configuration in use
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Index of the detection with the strictly largest area.
    ///
    /// Scans in input order and only replaces the current best on a strictly
    /// greater area, so the first of several equal maxima wins.
    pub fn largest_index(&self, detections: &[Detection]) -> Result<Option<usize>, SelectError> {
        let mut best: Option<(usize, f64)> = None;

        for (index, detection) in detections.iter().enumerate() {
            let area = self.score(index, &detection.polygon)?;
            let replaces = match best {
                Some((_, best_area)) => area > best_area,
                None => true,
            };
            if replaces {
                best = Some((index, area));
            }
        }

        Ok(best.map(|(index, _)| index))
    }

    /// Payload of the detection with the largest area
    pub fn select<'a>(&self, detections: &'a [Detection]) -> Result<Option<&'a [u8]>, SelectError> {
        Ok(self
            .largest_index(detections)?
            .map(|index| detections[index].payload.as_slice()))
    }

    /// Payload of the largest detection decoded as UTF-8
    pub fn select_text(&self, detections: &[Detection]) -> Result<Option<String>, SelectError> {
        let Some(index) = self.largest_index(detections)? else {
            return Ok(None);
        };
        payload_text(detections, index).map(Some)
    }

    fn score(&self, index: usize, polygon: &Polygon) -> Result<f64, SelectError> {
        if polygon.is_well_formed() {
            let area = polygon.area();
            if !area.is_finite() {
                return Err(SelectError::NonFiniteArea { index });
            }
            return Ok(area);
        }
        match self.config.degenerate {
            DegeneratePolicy::Reject => Err(SelectError::MalformedPolygon {
                index,
                vertices: polygon.len(),
            }),
            DegeneratePolicy::ZeroArea => Ok(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64, payload: &str) -> Detection {
        Detection::new(
            [(0.0, 0.0), (0.0, side), (side, side), (side, 0.0)],
            payload,
        )
    }

    #[test]
    fn test_empty_input_selects_nothing() {
        assert_eq!(select_largest(&[]), Ok(None));
        assert_eq!(largest_index(&[]), Ok(None));
    }

    #[test]
    fn test_single_detection() {
        let dets = [square(2.0, "A1B-C123")];
        assert_eq!(select_largest(&dets), Ok(Some(&b"A1B-C123"[..])));
    }

    #[test]
    fn test_picks_largest_regardless_of_position() {
        let dets = [square(2.0, "SMALL"), square(3.0, "BIG"), square(1.0, "TINY")];
        assert_eq!(largest_index(&dets), Ok(Some(1)));

        let dets = [square(3.0, "BIG"), square(2.0, "SMALL")];
        assert_eq!(select_largest(&dets), Ok(Some(&b"BIG"[..])));
    }

    #[test]
    fn test_tie_goes_to_first() {
        // Payload ordering must not influence the winner.
        let dets = [square(2.0, "ZZZ"), square(2.0, "AAA")];
        assert_eq!(select_largest(&dets), Ok(Some(&b"ZZZ"[..])));

        let shifted = Detection::new([(10.0, 10.0), (12.0, 10.0), (12.0, 12.0), (10.0, 12.0)], "AAA");
        let dets = [square(1.0, "x"), square(2.0, "first"), shifted];
        assert_eq!(select_largest(&dets), Ok(Some(&b"first"[..])));
    }

    #[test]
    fn test_malformed_polygon_rejected_by_default() {
        let line = Detection::new([(0.0, 0.0), (5.0, 5.0)], "LINE");
        let dets = [square(2.0, "OK"), line];
        assert_eq!(
            select_largest(&dets),
            Err(SelectError::MalformedPolygon { index: 1, vertices: 2 })
        );
    }

    #[test]
    fn test_zero_area_policy_lets_valid_detection_win() {
        let selector = Selector::new(SelectorConfig {
            degenerate: DegeneratePolicy::ZeroArea,
        });
        let empty = Detection::new(Polygon::default(), "EMPTY");
        let dets = [empty.clone(), square(1.0, "OK")];
        assert_eq!(selector.select(&dets), Ok(Some(&b"OK"[..])));

        // Alone, the degenerate detection still wins under this policy.
        assert_eq!(selector.select(&[empty]), Ok(Some(&b"EMPTY"[..])));
    }

    #[test]
    fn test_zero_area_valid_polygon_is_not_malformed() {
        let collinear = Detection::new([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)], "FLAT");
        assert_eq!(select_largest(&[collinear]), Ok(Some(&b"FLAT"[..])));
    }

    #[test]
    fn test_select_text() {
        let selector = Selector::default();
        let dets = [square(2.0, "SMALL"), square(3.0, "BIG")];
        assert_eq!(selector.select_text(&dets), Ok(Some("BIG".to_string())));
        assert_eq!(selector.select_text(&[]), Ok(None));

        let bad = Detection::new([(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)], vec![0xc3u8, 0x28]);
        let err = selector.select_text(&[square(1.0, "ok"), bad]).unwrap_err();
        assert!(matches!(err, SelectError::Decode { index: 1, .. }));
    }

    #[test]
    fn test_non_finite_area_is_rejected() {
        let nan = Detection::new([(f64::NAN, 0.0), (0.0, 1.0), (1.0, 1.0)], "NAN");
        let dets = [square(3.0, "BIG"), nan];
        assert_eq!(largest_index(&dets), Err(SelectError::NonFiniteArea { index: 1 }));

        let huge = square(1e200, "HUGE");
        assert!(compute_area(&huge.polygon).is_infinite());
        assert_eq!(
            select_largest(&[square(1.0, "ok"), huge]),
            Err(SelectError::NonFiniteArea { index: 1 })
        );
    }

    #[test]
    fn test_later_equal_area_never_replaces_winner() {
        let dets = [square(3.0, "BIG"), square(1.0, "a"), square(3.0, "TWIN"), square(2.0, "b")];
        assert_eq!(largest_index(&dets), Ok(Some(0)));
    }

    #[test]
    fn test_payload_text() {
        let dets = [square(1.0, "ok"), Detection::new(Polygon::default(), vec![0xffu8])];
        assert_eq!(payload_text(&dets, 0), Ok("ok".to_string()));
        assert!(matches!(payload_text(&dets, 1), Err(SelectError::Decode { index: 1, .. })));
    }

    #[test]
    fn test_triangle_area() {
        let tri = Polygon::from([(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        assert!((compute_area(&tri) - 6.0).abs() < 1e-9);
    }
}
