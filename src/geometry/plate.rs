use crate::domain::PlateSpec;

/// Triangle table for the box, two triangles per rectangular face
///
/// Each pair shares one diagonal of its rectangle. Winding is
/// counter-clockwise seen from outside, so normals point outward.
pub const PLATE_FACES: [[usize; 3]; 12] = [
    // Bottom (z = 0)
    [0, 3, 1],
    [1, 3, 2],
    // Top (z = t)
    [4, 5, 7],
    [5, 6, 7],
    // Side y = 0
    [0, 1, 4],
    [1, 5, 4],
    // Side x = w
    [1, 2, 5],
    [2, 6, 5],
    // Side y = l
    [2, 3, 6],
    [3, 7, 6],
    // Side x = 0
    [3, 0, 7],
    [0, 4, 7],
];

/// Rectangular plate as 8 corner vertices and 12 triangles
///
/// Vertices 0-3 form the bottom face at z = 0 and 4-7 the top face at
/// z = thickness, both walked counter-clockwise from the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateGeometry {
    pub vertices: [[f64; 3]; 8],
    pub faces: [[usize; 3]; 12],
}

impl PlateGeometry {
    /// Build the box for the given dimensions in mm
    ///
    /// Zero dimensions are accepted and give a degenerate box. Callers are
    /// expected to have clamped negatives already (see [`PlateSpec::clamped`]).
    pub fn new(width: f64, length: f64, thickness: f64) -> Self {
        let (w, l, t) = (width, length, thickness);
        Self {
            vertices: [
                [0.0, 0.0, 0.0],
                [w, 0.0, 0.0],
                [w, l, 0.0],
                [0.0, l, 0.0],
                [0.0, 0.0, t],
                [w, 0.0, t],
                [w, l, t],
                [0.0, l, t],
            ],
            faces: PLATE_FACES,
        }
    }

    pub fn from_spec(spec: &PlateSpec) -> Self {
        Self::new(spec.width_mm, spec.length_mm, spec.thickness_mm)
    }

    pub fn width(&self) -> f64 {
        self.vertices[6][0]
    }

    pub fn length(&self) -> f64 {
        self.vertices[6][1]
    }

    pub fn thickness(&self) -> f64 {
        self.vertices[6][2]
    }

    /// Volume of the bounding box in mm³
    pub fn bounding_volume(&self) -> f64 {
        self.width() * self.length() * self.thickness()
    }

    /// Vertices of face `n` in the face's winding order
    pub fn triangle(&self, n: usize) -> [[f64; 3]; 3] {
        let [a, b, c] = self.faces[n];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// Iterate over all 12 triangles in face order
    pub fn triangles(&self) -> impl Iterator<Item = [[f64; 3]; 3]> + '_ {
        (0..self.faces.len()).map(|n| self.triangle(n))
    }

    /// Bottom face corners projected onto XY, in vertex order 0..4
    pub fn bottom_outline(&self) -> [[f64; 2]; 4] {
        let mut outline = [[0.0; 2]; 4];
        for (corner, vertex) in outline.iter_mut().zip(&self.vertices[..4]) {
            *corner = [vertex[0], vertex[1]];
        }
        outline
    }
}
