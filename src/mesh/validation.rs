//! Mesh inspection before export
//!
//! The plate mesh is always exported as built, so this module only reports:
//! - Degenerate triangles (zero area, e.g. the side walls of a 0 mm plate)
//! - NaN/Inf coordinates
//! - Non-degenerate triangles whose normal is not unit length

use super::Triangle;

/// Result of mesh validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Total number of triangles validated
    pub total: usize,
    /// Number of degenerate triangles (zero or near-zero area)
    pub degenerate: usize,
    /// Number of triangles with invalid coordinates (NaN/Inf)
    pub invalid_coords: usize,
    /// Number of non-degenerate triangles with a bad normal
    pub invalid_normal: usize,
    /// Warning messages for issues found
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Check if the mesh can be written without producing garbage
    pub fn is_valid(&self) -> bool {
        self.invalid_coords == 0
    }

    /// Check if the mesh has any issues at all
    pub fn has_issues(&self) -> bool {
        self.degenerate > 0 || self.invalid_coords > 0 || self.invalid_normal > 0
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if !self.has_issues() {
            format!("Mesh valid: {} triangles, no issues", self.total)
        } else {
            format!(
                "Mesh issues: {} total, {} degenerate, {} invalid coords, {} bad normals",
                self.total, self.degenerate, self.invalid_coords, self.invalid_normal
            )
        }
    }
}

/// Minimum area threshold for non-degenerate triangles (in square mm)
const MIN_TRIANGLE_AREA: f32 = 1e-10;

/// Validate a mesh and return a detailed report
pub fn validate_mesh(triangles: &[Triangle]) -> ValidationResult {
    let mut result = ValidationResult {
        total: triangles.len(),
        ..Default::default()
    };

    for (i, tri) in triangles.iter().enumerate() {
        if has_invalid_coords(tri) {
            result.invalid_coords += 1;
            result
                .warnings
                .push(format!("Triangle {} has NaN/Inf coordinates", i));
            continue;
        }

        if is_degenerate(tri) {
            result.degenerate += 1;
        } else if !is_normal_valid(&tri.normal) {
            result.invalid_normal += 1;
        }
    }

    if result.degenerate > 0 {
        result.warnings.push(format!(
            "{} degenerate triangles (zero area, exported with zero normal)",
            result.degenerate
        ));
    }
    if result.invalid_normal > 0 {
        result.warnings.push(format!(
            "{} triangles have a normal that is not unit length",
            result.invalid_normal
        ));
    }

    result
}

/// Check if a triangle has any invalid (NaN/Inf) coordinates
fn has_invalid_coords(tri: &Triangle) -> bool {
    tri.vertices
        .iter()
        .flatten()
        .chain(tri.normal.iter())
        .any(|coord| !coord.is_finite())
}

/// Check if a triangle is degenerate (zero or near-zero area)
fn is_degenerate(tri: &Triangle) -> bool {
    triangle_area(&tri.vertices) < MIN_TRIANGLE_AREA
}

/// Calculate the area of a triangle from its vertices
fn triangle_area(vertices: &[[f32; 3]; 3]) -> f32 {
    let [v0, v1, v2] = *vertices;

    let edge_a = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let edge_b = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

    let cx = edge_a[1] * edge_b[2] - edge_a[2] * edge_b[1];
    let cy = edge_a[2] * edge_b[0] - edge_a[0] * edge_b[2];
    let cz = edge_a[0] * edge_b[1] - edge_a[1] * edge_b[0];

    0.5 * (cx * cx + cy * cy + cz * cz).sqrt()
}

/// Check if a normal vector is unit length
fn is_normal_valid(normal: &[f32; 3]) -> bool {
    let len_sq = normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2];
    len_sq.is_finite() && (0.99..=1.01).contains(&len_sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PlateGeometry;
    use crate::mesh::triangles_from_geometry;

    #[test]
    fn test_valid_triangle() {
        let tri = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);

        assert!(!has_invalid_coords(&tri));
        assert!(!is_degenerate(&tri));
        assert!(is_normal_valid(&tri.normal));
    }

    #[test]
    fn test_degenerate_triangle_coincident() {
        let tri = Triangle::new([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 1.0, 0.0]);

        assert!(is_degenerate(&tri));
    }

    #[test]
    fn test_invalid_coords_nan() {
        let tri = Triangle {
            vertices: [[f32::NAN, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normal: [0.0, 0.0, 1.0],
        };

        assert!(has_invalid_coords(&tri));
        let report = validate_mesh(&[tri]);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_bad_normal_reported() {
        let tri = Triangle {
            vertices: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normal: [0.0, 0.0, 3.0],
        };

        let report = validate_mesh(&[tri]);
        assert_eq!(report.invalid_normal, 1);
        assert!(report.has_issues());
    }

    #[test]
    fn test_solid_plate_is_clean() {
        let triangles = triangles_from_geometry(&PlateGeometry::new(100.0, 50.0, 3.0));
        let report = validate_mesh(&triangles);

        assert_eq!(report.total, 12);
        assert!(!report.has_issues(), "{}", report.summary());
    }

    #[test]
    fn test_flat_plate_reports_but_stays_valid() {
        let triangles = triangles_from_geometry(&PlateGeometry::new(100.0, 50.0, 0.0));
        let report = validate_mesh(&triangles);

        assert_eq!(report.degenerate, 8);
        assert_eq!(report.invalid_normal, 0);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_triangle_area() {
        let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let area = triangle_area(&vertices);
        assert!((area - 0.5).abs() < 0.001);
    }
}
