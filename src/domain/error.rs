use thiserror::Error;

use super::SteelGrade;

/// Errors raised while turning user input into a plate
#[derive(Debug, Error)]
pub enum PlateError {
    #[error("unknown steel grade '{0}' (expected one of: {names})", names = SteelGrade::names())]
    UnknownGrade(String),

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("DXF serialization failed: {0}")]
    Dxf(String),
}
