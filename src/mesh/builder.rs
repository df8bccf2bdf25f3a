use crate::geometry::PlateGeometry;

/// A triangle for STL output
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Three vertices: [[x, y, z], [x, y, z], [x, y, z]]
    pub vertices: [[f32; 3]; 3],
    /// Unit normal [nx, ny, nz], or all zeros for a degenerate triangle
    pub normal: [f32; 3],
}

impl Triangle {
    /// Create a new triangle and calculate its normal
    pub fn new(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> Self {
        let normal = calculate_normal(v0, v1, v2);
        Self {
            vertices: [v0, v1, v2],
            normal,
        }
    }

    /// Create a triangle from double-precision vertices
    pub fn from_f64(vertices: [[f64; 3]; 3]) -> Self {
        let [v0, v1, v2] = vertices.map(|v| v.map(|c| c as f32));
        Self::new(v0, v1, v2)
    }

    /// True when the triangle has no area and therefore no normal
    pub fn is_degenerate(&self) -> bool {
        self.normal == [0.0, 0.0, 0.0]
    }
}

/// Calculate the normal vector for a triangle using the cross product
///
/// Degenerate triangles get a zero normal; STL readers accept it and
/// recompute from the winding.
fn calculate_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    // Edge vectors
    let u = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let v = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

    // Cross product
    let nx = u[1] * v[2] - u[2] * v[1];
    let ny = u[2] * v[0] - u[0] * v[2];
    let nz = u[0] * v[1] - u[1] * v[0];

    // Normalize
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len > 1e-10 {
        [nx / len, ny / len, nz / len]
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// Expand the plate's indexed faces into 12 standalone triangles
///
/// Triangles come out in face order and each keeps its face's vertex order.
pub fn triangles_from_geometry(geometry: &PlateGeometry) -> Vec<Triangle> {
    geometry.triangles().map(Triangle::from_f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_normal() {
        // A triangle in the XY plane should have a Z-pointing normal
        let tri = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);

        // Normal should point in +Z direction
        assert!((tri.normal[0]).abs() < 0.001);
        assert!((tri.normal[1]).abs() < 0.001);
        assert!((tri.normal[2] - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let tri = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert_eq!(tri.normal, [0.0, 0.0, 0.0]);
        assert!(tri.is_degenerate());
    }

    #[test]
    fn test_triangles_follow_face_order() {
        let geometry = PlateGeometry::new(100.0, 100.0, 10.0);
        let triangles = triangles_from_geometry(&geometry);
        assert_eq!(triangles.len(), 12);

        // First face is [0, 3, 1] on the bottom
        assert_eq!(
            triangles[0].vertices,
            [[0.0, 0.0, 0.0], [0.0, 100.0, 0.0], [100.0, 0.0, 0.0]]
        );
        assert_eq!(triangles[0].normal, [0.0, 0.0, -1.0]);
        // Third face is [4, 5, 7] on the top
        assert_eq!(triangles[2].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_zero_thickness_sides_are_degenerate() {
        let geometry = PlateGeometry::new(10.0, 10.0, 0.0);
        let triangles = triangles_from_geometry(&geometry);
        let degenerate = triangles.iter().filter(|t| t.is_degenerate()).count();
        // Bottom and top survive; all eight side triangles collapse
        assert_eq!(degenerate, 8);
    }
}
