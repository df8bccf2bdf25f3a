pub mod error;
pub mod grade;
pub mod plate;

pub use error::PlateError;
pub use grade::SteelGrade;
pub use plate::PlateSpec;
