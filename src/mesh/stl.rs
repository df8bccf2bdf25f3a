use super::Triangle;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Binary STL header; must not start with "solid" or readers take it for ASCII
const STL_HEADER: &[u8; 80] =
    b"plate3d - steel plate mesh                                                      ";

/// Write triangles to a binary STL file
///
/// Binary STL format:
/// - 80 byte header
/// - 4 byte u32 triangle count (little endian)
/// - For each triangle:
///   - 3 x f32 normal (12 bytes)
///   - 3 x 3 x f32 vertices (36 bytes)
///   - 2 byte attribute (usually 0)
///
/// An existing file at `path` is truncated.
pub fn write_stl(path: &Path, triangles: &[Triangle]) -> Result<()> {
    let mut writer = create_output(path)?;
    write_stl_to(&mut writer, triangles)
        .with_context(|| format!("Failed to write STL file: {}", path.display()))?;
    debug!(path = %path.display(), triangles = triangles.len(), "binary STL written");
    Ok(())
}

/// Write a binary STL stream to any writer and flush it
pub fn write_stl_to<W: Write>(writer: &mut W, triangles: &[Triangle]) -> io::Result<()> {
    writer.write_all(STL_HEADER)?;

    // Triangle count (u32, little endian)
    let count = triangles.len() as u32;
    writer.write_all(&count.to_le_bytes())?;

    for tri in triangles {
        for &n in &tri.normal {
            writer.write_all(&n.to_le_bytes())?;
        }

        for vertex in &tri.vertices {
            for &coord in vertex {
                writer.write_all(&coord.to_le_bytes())?;
            }
        }

        // Attribute byte count (2 bytes, usually 0)
        writer.write_all(&[0u8, 0u8])?;
    }

    writer.flush()
}

/// Write triangles to an ASCII STL file named `solid_name`
pub fn write_stl_ascii(path: &Path, solid_name: &str, triangles: &[Triangle]) -> Result<()> {
    let mut writer = create_output(path)?;
    write_stl_ascii_to(&mut writer, solid_name, triangles)
        .with_context(|| format!("Failed to write STL file: {}", path.display()))?;
    debug!(path = %path.display(), triangles = triangles.len(), "ASCII STL written");
    Ok(())
}

/// Write an ASCII STL stream to any writer and flush it
pub fn write_stl_ascii_to<W: Write>(
    writer: &mut W,
    solid_name: &str,
    triangles: &[Triangle],
) -> io::Result<()> {
    writeln!(writer, "solid {}", solid_name)?;
    for tri in triangles {
        let [nx, ny, nz] = tri.normal;
        writeln!(writer, "  facet normal {:e} {:e} {:e}", nx, ny, nz)?;
        writeln!(writer, "    outer loop")?;
        for [x, y, z] in tri.vertices {
            writeln!(writer, "      vertex {:e} {:e} {:e}", x, y, z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {}", solid_name)?;

    writer.flush()
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create STL file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Get the file size of a binary STL with the given number of triangles
pub fn estimate_stl_size(triangle_count: usize) -> usize {
    // 80 (header) + 4 (count) + triangles * (12 normal + 36 vertices + 2 attribute)
    80 + 4 + triangle_count * 50
}
