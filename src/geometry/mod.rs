pub mod plate;
pub mod weight;

pub use plate::{PLATE_FACES, PlateGeometry};
pub use weight::{WeightResult, calculate_volume, calculate_weight};
