//! Conversion between screen pixels and physical print units.
//!
//! The editor keeps two coordinate systems: the persisted layout uses
//! millimeters in PDF page space (origin bottom-left), while live canvas
//! objects use pixels at the current render scale (origin top-left).
//! [`PageMetrics`] is the bridge between the two.
//!
//! A PDF page is measured in points (1/72 inch) multiplied by the page's
//! `UserUnit` (1 for almost every document in the wild). `scale` is the
//! number of screen pixels per PDF-space unit, chosen by the host when it
//! renders the background page into the canvas.

use crate::error::LayoutError;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// PDF points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Conversion parameters for one rendered background page.
///
/// Constructed once the host has decoded the PDF page and decided on a
/// render scale. Construction validates the parameters, so holding a
/// `PageMetrics` is proof that conversions are well-defined — there is no
/// way to divide by a zero scale later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    scale: f64,
    user_unit: f64,
}

impl PageMetrics {
    /// Create metrics from a render scale (screen pixels per PDF-space unit)
    /// and the page's `UserUnit`.
    ///
    /// Both values must be finite and strictly positive. A scale of zero
    /// means no background has been rendered yet; document operations are
    /// not valid in that state.
    pub fn new(scale: f64, user_unit: f64) -> Result<Self, LayoutError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(LayoutError::InvalidPageMetrics(format!(
                "scale must be finite and positive, got {}",
                scale
            )));
        }
        if !user_unit.is_finite() || user_unit <= 0.0 {
            return Err(LayoutError::InvalidPageMetrics(format!(
                "user unit must be finite and positive, got {}",
                user_unit
            )));
        }
        Ok(Self { scale, user_unit })
    }

    /// Metrics with the default `UserUnit` of 1.
    pub fn with_scale(scale: f64) -> Result<Self, LayoutError> {
        Self::new(scale, 1.0)
    }

    /// Screen pixels per PDF-space unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The page's `UserUnit` (point-to-device-unit ratio).
    pub fn user_unit(&self) -> f64 {
        self.user_unit
    }

    /// Convert screen pixels to millimeters.
    pub fn px_to_mm(&self, v: f64) -> f64 {
        v / self.scale / POINTS_PER_INCH * self.user_unit * MM_PER_INCH
    }

    /// Convert millimeters to screen pixels.
    pub fn mm_to_px(&self, v: f64) -> f64 {
        v * self.scale * POINTS_PER_INCH / self.user_unit / MM_PER_INCH
    }

    /// Convert screen pixels to points.
    pub fn px_to_pt(&self, v: f64) -> f64 {
        v / self.scale * self.user_unit
    }

    /// Convert points to screen pixels.
    pub fn pt_to_px(&self, v: f64) -> f64 {
        v * self.scale / self.user_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn mm_round_trip() {
        let m = PageMetrics::new(1.5, 1.0).unwrap();
        for v in [0.0, 0.37, 10.0, 50.0, 297.0, 841.89] {
            assert!((m.px_to_mm(m.mm_to_px(v)) - v).abs() < TOLERANCE);
            assert!((m.mm_to_px(m.px_to_mm(v)) - v).abs() < TOLERANCE);
        }
    }

    #[test]
    fn pt_round_trip() {
        let m = PageMetrics::new(2.25, 1.0).unwrap();
        for v in [0.0, 8.5, 13.0, 72.0] {
            assert!((m.px_to_pt(m.pt_to_px(v)) - v).abs() < TOLERANCE);
            assert!((m.pt_to_px(m.px_to_pt(v)) - v).abs() < TOLERANCE);
        }
    }

    #[test]
    fn known_values() {
        // At scale 1 and user unit 1, one inch of pixels is 72 px = 25.4 mm.
        let m = PageMetrics::with_scale(1.0).unwrap();
        assert!((m.px_to_mm(72.0) - 25.4).abs() < TOLERANCE);
        assert!((m.mm_to_px(25.4) - 72.0).abs() < TOLERANCE);
        assert!((m.px_to_pt(72.0) - 72.0).abs() < TOLERANCE);
    }

    #[test]
    fn user_unit_scales_physical_size() {
        // UserUnit 2 doubles the physical size of each PDF-space unit.
        let m1 = PageMetrics::new(1.0, 1.0).unwrap();
        let m2 = PageMetrics::new(1.0, 2.0).unwrap();
        assert!((m2.px_to_mm(10.0) - 2.0 * m1.px_to_mm(10.0)).abs() < TOLERANCE);
    }

    #[test]
    fn rejects_unusable_metrics() {
        assert!(PageMetrics::new(0.0, 1.0).is_err());
        assert!(PageMetrics::new(-1.0, 1.0).is_err());
        assert!(PageMetrics::new(f64::NAN, 1.0).is_err());
        assert!(PageMetrics::new(f64::INFINITY, 1.0).is_err());
        assert!(PageMetrics::new(1.0, 0.0).is_err());
        assert!(PageMetrics::new(1.0, -2.0).is_err());
    }
}
