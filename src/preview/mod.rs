//! Renderable surface description for on-screen preview
//!
//! The preview is plain data in the shape of a Plotly `mesh3d` trace:
//! parallel x/y/z coordinate arrays plus i/j/k index arrays, one entry per
//! triangle. Drawing it is left to whatever consumes the JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use std::path::Path;
use tracing::debug;

use crate::geometry::PlateGeometry;
use crate::mesh::{Triangle, triangles_from_geometry};

pub const DEFAULT_COLOR: &str = "lightblue";
pub const DEFAULT_OPACITY: f64 = 1.0;
const FIGURE_SIZE_PX: u32 = 700;

/// Triangulated surface ready for a 3D renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewSurface {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<usize>,
    pub j: Vec<usize>,
    pub k: Vec<usize>,
    pub opacity: f64,
    pub color: String,
}

impl PreviewSurface {
    /// Flatten triangles into a per-triangle vertex stream
    ///
    /// Every triangle contributes its own three vertices, so triangle `n`
    /// is `(3n, 3n + 1, 3n + 2)`. Shared corners are repeated.
    pub fn from_triangles(triangles: &[Triangle], opacity: f64) -> Self {
        let count = triangles.len() * 3;
        let mut surface = Self::empty(count, triangles.len(), opacity);

        for (n, tri) in triangles.iter().enumerate() {
            for [x, y, z] in tri.vertices {
                surface.x.push(x as f64);
                surface.y.push(y as f64);
                surface.z.push(z as f64);
            }
            surface.i.push(3 * n);
            surface.j.push(3 * n + 1);
            surface.k.push(3 * n + 2);
        }

        surface
    }

    /// Flattened preview of a plate
    pub fn from_geometry(geometry: &PlateGeometry, opacity: f64) -> Self {
        Self::from_triangles(&triangles_from_geometry(geometry), opacity)
    }

    /// Preview over the plate's 8 shared corners, indexed by the face table
    pub fn indexed(geometry: &PlateGeometry, opacity: f64) -> Self {
        let mut surface =
            Self::empty(geometry.vertices.len(), geometry.faces.len(), opacity);

        for [x, y, z] in geometry.vertices {
            surface.x.push(x);
            surface.y.push(y);
            surface.z.push(z);
        }
        for [a, b, c] in geometry.faces {
            surface.i.push(a);
            surface.j.push(b);
            surface.k.push(c);
        }

        surface
    }

    fn empty(vertices: usize, triangles: usize, opacity: f64) -> Self {
        Self {
            x: Vec::with_capacity(vertices),
            y: Vec::with_capacity(vertices),
            z: Vec::with_capacity(vertices),
            i: Vec::with_capacity(triangles),
            j: Vec::with_capacity(triangles),
            k: Vec::with_capacity(triangles),
            opacity: clamp_opacity(opacity),
            color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.x.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.i.len()
    }

    /// Plotly figure document: one `mesh3d` trace and a bare scene
    ///
    /// Axes are hidden and `aspectmode: data` keeps the plate's proportions.
    pub fn to_plotly_json(&self) -> Value {
        json!({
            "data": [{
                "type": "mesh3d",
                "x": self.x,
                "y": self.y,
                "z": self.z,
                "i": self.i,
                "j": self.j,
                "k": self.k,
                "color": self.color,
                "opacity": self.opacity,
            }],
            "layout": {
                "scene": {
                    "xaxis": { "visible": false },
                    "yaxis": { "visible": false },
                    "zaxis": { "visible": false },
                    "aspectmode": "data",
                },
                "width": FIGURE_SIZE_PX,
                "height": FIGURE_SIZE_PX,
                "margin": { "r": 0, "l": 0, "b": 0, "t": 0 },
            }
        })
    }
}

fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        DEFAULT_OPACITY
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

/// Write the Plotly figure for `surface` as pretty-printed JSON
pub fn write_preview(path: &Path, surface: &PreviewSurface) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let contents = serde_json::to_string_pretty(&surface.to_plotly_json())
        .context("Failed to serialize preview")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write preview file: {}", path.display()))?;
    debug!(
        path = %path.display(),
        vertices = surface.vertex_count(),
        "preview written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_flattened_layout() {
        let geometry = PlateGeometry::new(100.0, 100.0, 10.0);
        let surface = PreviewSurface::from_geometry(&geometry, 0.5);

        assert_eq!(surface.vertex_count(), 36);
        assert_eq!(surface.triangle_count(), 12);
        for n in 0..12 {
            assert_eq!(surface.i[n], 3 * n);
            assert_eq!(surface.j[n], 3 * n + 1);
            assert_eq!(surface.k[n], 3 * n + 2);
        }
        assert_eq!(surface.opacity, 0.5);
        assert_eq!(surface.color, "lightblue");
    }

    #[test]
    fn test_flattened_matches_face_vertices() {
        let geometry = PlateGeometry::new(50.0, 20.0, 5.0);
        let surface = PreviewSurface::from_geometry(&geometry, 1.0);

        for (n, triangle) in geometry.triangles().enumerate() {
            let corners = [surface.i[n], surface.j[n], surface.k[n]];
            for (corner, expected) in corners.into_iter().zip(triangle) {
                assert_eq!(
                    [surface.x[corner], surface.y[corner], surface.z[corner]],
                    expected
                );
            }
        }
    }

    #[test]
    fn test_indexed_uses_shared_corners() {
        let geometry = PlateGeometry::new(50.0, 20.0, 5.0);
        let surface = PreviewSurface::indexed(&geometry, 1.0);

        assert_eq!(surface.vertex_count(), 8);
        assert_eq!(surface.triangle_count(), 12);
        assert_eq!((surface.i[0], surface.j[0], surface.k[0]), (0, 3, 1));
        assert_eq!(surface.z[6], 5.0);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let geometry = PlateGeometry::new(1.0, 1.0, 1.0);
        assert_eq!(PreviewSurface::from_geometry(&geometry, 1.7).opacity, 1.0);
        assert_eq!(PreviewSurface::from_geometry(&geometry, -0.2).opacity, 0.0);
        assert_eq!(
            PreviewSurface::from_geometry(&geometry, f64::NAN).opacity,
            DEFAULT_OPACITY
        );
    }

    #[test]
    fn test_plotly_document_shape() {
        let surface =
            PreviewSurface::from_geometry(&PlateGeometry::new(2.0, 3.0, 4.0), 0.3).with_color("gray");
        let doc = surface.to_plotly_json();

        let trace = &doc["data"][0];
        assert_eq!(trace["type"], "mesh3d");
        assert_eq!(trace["x"].as_array().unwrap().len(), 36);
        assert_eq!(trace["color"], "gray");
        assert_eq!(trace["opacity"], 0.3);
        assert_eq!(doc["layout"]["scene"]["aspectmode"], "data");
        assert_eq!(doc["layout"]["scene"]["xaxis"]["visible"], false);
        assert_eq!(doc["layout"]["width"], 700);
    }

    #[test]
    fn test_write_preview() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preview.json");
        let surface = PreviewSurface::from_geometry(&PlateGeometry::new(2.0, 3.0, 4.0), 1.0);

        write_preview(&path, &surface).unwrap();

        let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, surface.to_plotly_json());
    }
}
