pub mod drawing;

pub use drawing::{outline_drawing, write_dxf, write_dxf_to};
