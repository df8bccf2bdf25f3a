use anyhow::{Context, Result};
use dxf::entities::{Entity, EntityType, Line};
use dxf::enums::AcadVersion;
use dxf::{Drawing, Point};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::domain::PlateError;
use crate::geometry::PlateGeometry;

/// Build the top-down outline of the plate as a DXF drawing
///
/// The outline is four LINE entities walking the bottom corners
/// 0 -> 1 -> 2 -> 3 -> 0, flattened to z = 0.
pub fn outline_drawing(geometry: &PlateGeometry) -> Drawing {
    let mut drawing = Drawing::new();
    drawing.header.version = AcadVersion::R2010;

    let corners = geometry.bottom_outline();
    for i in 0..corners.len() {
        let [x1, y1] = corners[i];
        let [x2, y2] = corners[(i + 1) % corners.len()];
        let line = Line::new(Point::new(x1, y1, 0.0), Point::new(x2, y2, 0.0));
        drawing.add_entity(Entity::new(EntityType::Line(line)));
    }

    drawing
}

/// Write the plate outline to `path`, replacing any existing file
pub fn write_dxf(path: &Path, geometry: &PlateGeometry) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create DXF file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write_dxf_to(&mut writer, geometry)
        .with_context(|| format!("Failed to write DXF file: {}", path.display()))?;
    debug!(path = %path.display(), "DXF outline written");

    Ok(())
}

/// Serialize the plate outline to any writer and flush it
pub fn write_dxf_to<W: Write>(writer: &mut W, geometry: &PlateGeometry) -> Result<()> {
    outline_drawing(geometry)
        .save(writer)
        .map_err(|e| PlateError::Dxf(e.to_string()))?;
    writer.flush()?;
    Ok(())
}
