//! Indexed triangle mesh.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, Triangle};

/// An indexed triangle mesh.
///
/// Vertices are bare positions in millimeters; faces reference vertices by
/// `u32` index with counter-clockwise winding when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::IndexedMesh;
/// use nalgebra::Point3;
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexedMesh {
    /// Vertex positions in millimeters.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array,
    /// counter-clockwise when viewed from outside.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Triangle at `face_index`, or `None` if out of bounds.
    #[must_use]
    pub fn triangle(&self, face_index: usize) -> Option<Triangle> {
        self.faces.get(face_index).map(|&[i0, i1, i2]| Triangle {
            v0: self.vertices[i0 as usize],
            v1: self.vertices[i1 as usize],
            v2: self.vertices[i2 as usize],
        })
    }

    /// Iterate over all faces as concrete triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|&[i0, i1, i2]| Triangle {
            v0: self.vertices[i0 as usize],
            v1: self.vertices[i1 as usize],
            v2: self.vertices[i2 as usize],
        })
    }

    /// Translate the mesh by the given vector.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }

    /// Scale the mesh uniformly around the origin.
    ///
    /// Every vertex coordinate is multiplied by `factor` in place; the
    /// coordinate frame is unchanged (no re-centering), so the mesh also
    /// moves toward or away from the origin. Face topology is untouched.
    pub fn scale(&mut self, factor: f64) {
        for vertex in &mut self.vertices {
            vertex.coords *= factor;
        }
    }

    /// Compute the signed volume of the mesh.
    ///
    /// Sum of signed tetrahedra volumes formed by each face and the
    /// origin (divergence theorem). Positive for a closed mesh with
    /// outward CCW winding; negative for an inside-out mesh; meaningless
    /// for an open mesh.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;

        for &[i0, i1, i2] in &self.faces {
            let v0 = &self.vertices[i0 as usize];
            let v1 = &self.vertices[i1 as usize];
            let v2 = &self.vertices[i2 as usize];

            let cross = v1.coords.cross(&v2.coords);
            volume += v0.coords.dot(&cross);
        }

        volume / 6.0
    }

    /// Absolute volume of the mesh.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Whether the mesh appears inside-out (negative signed volume).
    #[inline]
    #[must_use]
    pub fn is_inside_out(&self) -> bool {
        self.signed_volume() < 0.0
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }

    /// Flip all face normals by reversing winding order.
    pub fn flip_normals(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
    }

    /// Axis-aligned bounding box over all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }
}

/// Create a unit cube mesh from (0,0,0) to (1,1,1) with outward CCW faces.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(8, 12);

    mesh.vertices.push(Point3::new(0.0, 0.0, 0.0)); // 0
    mesh.vertices.push(Point3::new(1.0, 0.0, 0.0)); // 1
    mesh.vertices.push(Point3::new(1.0, 1.0, 0.0)); // 2
    mesh.vertices.push(Point3::new(0.0, 1.0, 0.0)); // 3
    mesh.vertices.push(Point3::new(0.0, 0.0, 1.0)); // 4
    mesh.vertices.push(Point3::new(1.0, 0.0, 1.0)); // 5
    mesh.vertices.push(Point3::new(1.0, 1.0, 1.0)); // 6
    mesh.vertices.push(Point3::new(0.0, 1.0, 1.0)); // 7

    // Two triangles per face, CCW viewed from outside.
    mesh.faces.push([0, 2, 1]); // bottom
    mesh.faces.push([0, 3, 2]);
    mesh.faces.push([4, 5, 6]); // top
    mesh.faces.push([4, 6, 7]);
    mesh.faces.push([0, 1, 5]); // front
    mesh.faces.push([0, 5, 4]);
    mesh.faces.push([3, 7, 6]); // back
    mesh.faces.push([3, 6, 2]);
    mesh.faces.push([0, 4, 7]); // left
    mesh.faces.push([0, 7, 3]);
    mesh.faces.push([1, 2, 6]); // right
    mesh.faces.push([1, 6, 5]);

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_mesh() {
        let mesh = IndexedMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn unit_cube_volume() {
        let cube = unit_cube();
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn unit_cube_surface_area() {
        let cube = unit_cube();
        assert_relative_eq!(cube.surface_area(), 6.0, epsilon = 1e-10);
    }

    #[test]
    fn flipped_cube_is_inside_out() {
        let mut cube = unit_cube();
        assert!(!cube.is_inside_out());
        cube.flip_normals();
        assert!(cube.is_inside_out());
        assert_relative_eq!(cube.signed_volume(), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn scale_multiplies_every_coordinate() {
        let mut cube = unit_cube();
        let before = cube.vertices.clone();
        cube.scale(0.125);

        for (scaled, original) in cube.vertices.iter().zip(before.iter()) {
            assert_relative_eq!(scaled.x, original.x * 0.125);
            assert_relative_eq!(scaled.y, original.y * 0.125);
            assert_relative_eq!(scaled.z, original.z * 0.125);
        }
        assert_eq!(cube.face_count(), 12);
        assert_relative_eq!(cube.signed_volume(), 0.125f64.powi(3), epsilon = 1e-12);
    }

    #[test]
    fn scale_is_not_centered() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Point3::new(2.0, 0.0, 0.0));
        mesh.scale(2.0);
        assert_relative_eq!(mesh.vertices[0].x, 4.0);
    }

    #[test]
    fn translate_moves_vertices() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Point3::new(1.0, 2.0, 3.0));
        mesh.translate(Vector3::new(-1.0, -2.0, -3.0));
        assert_relative_eq!(mesh.vertices[0].coords.norm(), 0.0);
    }

    #[test]
    fn cube_bounds() {
        let cube = unit_cube();
        let bounds = cube.bounds();
        assert_relative_eq!(bounds.min.x, 0.0);
        assert_relative_eq!(bounds.max.z, 1.0);
    }
}
