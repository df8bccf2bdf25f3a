pub mod builder;
pub mod stl;
pub mod validation;

pub use builder::{Triangle, triangles_from_geometry};
pub use stl::{estimate_stl_size, write_stl, write_stl_ascii, write_stl_ascii_to, write_stl_to};
pub use validation::{ValidationResult, validate_mesh};
