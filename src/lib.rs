//! plate3d - steel plate weight calculator with STL mesh and DXF outline export

pub mod config;
pub mod domain;
pub mod geometry;
pub mod mesh;
pub mod outline;
pub mod preview;
pub mod session;
