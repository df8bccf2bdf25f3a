use tracing::warn;

use super::PlateError;

pub const DEFAULT_WIDTH_MM: f64 = 100.0;
pub const DEFAULT_LENGTH_MM: f64 = 100.0;
pub const DEFAULT_THICKNESS_MM: f64 = 10.0;

/// Plate dimensions in millimetres, all non-negative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateSpec {
    pub width_mm: f64,
    pub length_mm: f64,
    pub thickness_mm: f64,
}

impl Default for PlateSpec {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_WIDTH_MM,
            length_mm: DEFAULT_LENGTH_MM,
            thickness_mm: DEFAULT_THICKNESS_MM,
        }
    }
}

impl PlateSpec {
    /// Build a spec from raw input, clamping negative values to zero
    ///
    /// Non-finite values are rejected since no clamp makes sense for them.
    pub fn clamped(width_mm: f64, length_mm: f64, thickness_mm: f64) -> Result<Self, PlateError> {
        Ok(Self {
            width_mm: clamp_dimension("width", width_mm)?,
            length_mm: clamp_dimension("length", length_mm)?,
            thickness_mm: clamp_dimension("thickness", thickness_mm)?,
        })
    }
}

fn clamp_dimension(field: &'static str, value: f64) -> Result<f64, PlateError> {
    if !value.is_finite() {
        return Err(PlateError::NonFinite { field, value });
    }
    if value < 0.0 {
        warn!(field, value, "negative dimension clamped to 0");
        return Ok(0.0);
    }
    // -0.0 passes the check above; normalize it so outputs never print "-0"
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_form_defaults() {
        let spec = PlateSpec::default();
        assert_eq!(spec.width_mm, 100.0);
        assert_eq!(spec.length_mm, 100.0);
        assert_eq!(spec.thickness_mm, 10.0);
    }

    #[test]
    fn test_negative_clamped_to_zero() {
        let spec = PlateSpec::clamped(-5.0, 20.0, -0.1).unwrap();
        assert_eq!(spec.width_mm, 0.0);
        assert_eq!(spec.length_mm, 20.0);
        assert_eq!(spec.thickness_mm, 0.0);
    }

    #[test]
    fn test_negative_zero_normalized() {
        let spec = PlateSpec::clamped(-0.0, 1.0, 1.0).unwrap();
        assert!(spec.width_mm.is_sign_positive());
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = PlateSpec::clamped(10.0, f64::NAN, 1.0).unwrap_err();
        assert!(matches!(err, PlateError::NonFinite { field: "length", .. }));

        assert!(PlateSpec::clamped(f64::INFINITY, 1.0, 1.0).is_err());
    }
}
