//! Normalization passes over indexed meshes.

use std::collections::{HashMap, HashSet};

use mesh_types::IndexedMesh;
use nalgebra::Point3;
use tracing::debug;

/// Configuration for [`normalize_mesh`].
///
/// Thresholds are in mesh units (millimeters).
#[derive(Debug, Clone)]
pub struct NormalizeParams {
    /// Distance below which two vertices are merged. Default: `1e-9`.
    ///
    /// Extraction already reuses lattice-edge vertices, so this only has
    /// to catch exact duplicates; it is deliberately tight.
    pub weld_epsilon: f64,

    /// Faces with area at or below this are dropped. Default: `1e-12`.
    pub degenerate_area_threshold: f64,

    /// Whether to flip winding when the closed mesh is inside-out.
    /// Default: `true`.
    pub orient_outward: bool,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            weld_epsilon: 1e-9,
            degenerate_area_threshold: 1e-12,
            orient_outward: true,
        }
    }
}

/// What [`normalize_mesh`] changed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeSummary {
    /// Vertices merged by welding.
    pub vertices_welded: usize,
    /// Zero-area faces removed.
    pub degenerate_faces_removed: usize,
    /// Unreferenced vertices removed.
    pub unreferenced_vertices_removed: usize,
    /// Whether winding was flipped to point normals outward.
    pub flipped_winding: bool,
}

impl NormalizeSummary {
    /// Whether any pass changed the mesh.
    #[must_use]
    pub const fn had_changes(&self) -> bool {
        self.vertices_welded > 0
            || self.degenerate_faces_removed > 0
            || self.unreferenced_vertices_removed > 0
            || self.flipped_winding
    }
}

/// Merge vertices closer than `epsilon`, remapping faces.
///
/// Uses a spatial hash with a 3x3x3 neighborhood probe; merges are
/// resolved transitively to the lowest surviving index. Faces collapsed
/// by welding (two equal indices) are removed. Returns the number of
/// vertices merged away.
///
/// # Example
///
/// ```
/// use mesh_types::IndexedMesh;
/// use mesh_repair::weld_vertices;
/// use nalgebra::Point3;
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0)); // exact duplicate of 1
/// mesh.faces.push([0, 1, 2]);
/// mesh.faces.push([0, 3, 2]);
///
/// assert_eq!(weld_vertices(&mut mesh, 1e-9), 1);
/// ```
pub fn weld_vertices(mesh: &mut IndexedMesh, epsilon: f64) -> usize {
    if mesh.vertices.is_empty() {
        return 0;
    }

    let cell_size = epsilon.max(f64::MIN_POSITIVE) * 2.0;
    #[allow(clippy::cast_possible_truncation)]
    let cell_of = |p: &Point3<f64>| -> (i64, i64, i64) {
        let x = (p.x / cell_size).floor() as i64;
        let y = (p.y / cell_size).floor() as i64;
        let z = (p.z / cell_size).floor() as i64;
        (x, y, z)
    };

    let mut spatial: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        spatial.entry(cell_of(vertex)).or_default().push(idx as u32);
    }

    #[allow(clippy::cast_possible_truncation)]
    let mut remap: Vec<u32> = (0..mesh.vertices.len() as u32).collect();
    let mut merged = 0usize;

    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let idx = idx as u32;
        if remap[idx as usize] != idx {
            continue;
        }

        let cell = cell_of(vertex);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(candidates) = spatial.get(&(cell.0 + dx, cell.1 + dy, cell.2 + dz))
                    else {
                        continue;
                    };
                    for &other in candidates {
                        if other <= idx || remap[other as usize] != other {
                            continue;
                        }
                        let dist = (vertex - mesh.vertices[other as usize]).norm();
                        if dist <= epsilon {
                            remap[other as usize] = idx;
                            merged += 1;
                        }
                    }
                }
            }
        }
    }

    if merged == 0 {
        return 0;
    }

    // Resolve transitive merges.
    for i in 0..remap.len() {
        let mut target = remap[i];
        while remap[target as usize] != target {
            target = remap[target as usize];
        }
        remap[i] = target;
    }

    for face in &mut mesh.faces {
        for idx in face.iter_mut() {
            *idx = remap[*idx as usize];
        }
    }
    mesh.faces
        .retain(|&[a, b, c]| a != b && b != c && a != c);

    merged
}

/// Remove faces with area at or below `area_threshold`.
///
/// Returns the number of faces removed.
pub fn remove_degenerate_triangles(mesh: &mut IndexedMesh, area_threshold: f64) -> usize {
    let before = mesh.faces.len();
    let vertices = std::mem::take(&mut mesh.vertices);

    mesh.faces.retain(|&[a, b, c]| {
        let tri = mesh_types::Triangle::new(
            vertices[a as usize],
            vertices[b as usize],
            vertices[c as usize],
        );
        !tri.is_degenerate(area_threshold)
    });

    mesh.vertices = vertices;
    before - mesh.faces.len()
}

/// Remove vertices no face references and compact the vertex array.
///
/// Returns the number of vertices removed.
pub fn remove_unreferenced_vertices(mesh: &mut IndexedMesh) -> usize {
    let original = mesh.vertices.len();

    let mut referenced: HashSet<u32> = HashSet::new();
    for face in &mesh.faces {
        referenced.extend(face.iter().copied());
    }
    if referenced.len() == original {
        return 0;
    }

    let mut remap: HashMap<u32, u32> = HashMap::with_capacity(referenced.len());
    let mut compacted = Vec::with_capacity(referenced.len());
    for (old, vertex) in mesh.vertices.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let old = old as u32;
        if referenced.contains(&old) {
            #[allow(clippy::cast_possible_truncation)]
            let new = compacted.len() as u32;
            remap.insert(old, new);
            compacted.push(*vertex);
        }
    }

    for face in &mut mesh.faces {
        for idx in face.iter_mut() {
            if let Some(&new) = remap.get(idx) {
                *idx = new;
            }
        }
    }

    let removed = original - compacted.len();
    mesh.vertices = compacted;
    removed
}

/// Flip winding if the closed mesh has negative signed volume.
///
/// Returns `true` if the mesh was flipped. Open meshes have a meaningless
/// signed volume; callers should only rely on this for closed surfaces.
pub fn orient_outward(mesh: &mut IndexedMesh) -> bool {
    if mesh.is_empty() {
        return false;
    }
    if mesh.signed_volume() < 0.0 {
        mesh.flip_normals();
        return true;
    }
    false
}

/// Run the full normalization sequence: weld, degenerate removal, vertex
/// compaction, outward orientation.
///
/// This is the deterministic restatement of the "construct a processed
/// mesh object" step: deduplication and winding consistency repair, with
/// every change reported in the returned summary instead of happening
/// silently.
pub fn normalize_mesh(mesh: &mut IndexedMesh, params: &NormalizeParams) -> NormalizeSummary {
    let mut summary = NormalizeSummary {
        vertices_welded: weld_vertices(mesh, params.weld_epsilon),
        ..Default::default()
    };
    summary.degenerate_faces_removed =
        remove_degenerate_triangles(mesh, params.degenerate_area_threshold);
    summary.unreferenced_vertices_removed = remove_unreferenced_vertices(mesh);
    if params.orient_outward {
        summary.flipped_winding = orient_outward(mesh);
    }

    if summary.had_changes() {
        debug!(?summary, "normalized mesh");
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::unit_cube;

    #[test]
    fn weld_merges_exact_duplicates() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
        mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([2, 3, 0]);

        let merged = weld_vertices(&mut mesh, 1e-9);
        assert_eq!(merged, 1);
        assert_eq!(mesh.faces[1], [2, 1, 0]);
    }

    #[test]
    fn weld_leaves_distinct_vertices_alone() {
        let mut cube = unit_cube();
        assert_eq!(weld_vertices(&mut cube, 1e-9), 0);
        assert_eq!(cube.vertex_count(), 8);
    }

    #[test]
    fn weld_drops_collapsed_faces() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
        mesh.faces.push([0, 1, 2]);

        weld_vertices(&mut mesh, 1e-9);
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn degenerate_faces_are_removed() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(2.0, 0.0, 0.0)); // collinear
        mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([0, 1, 3]);

        assert_eq!(remove_degenerate_triangles(&mut mesh, 1e-12), 1);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn unreferenced_vertices_are_compacted() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(9.0, 9.0, 9.0)); // orphan
        mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
        mesh.faces.push([0, 2, 3]);

        assert_eq!(remove_unreferenced_vertices(&mut mesh), 1);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces[0], [0, 1, 2]);
    }

    #[test]
    fn orient_outward_flips_inside_out_mesh() {
        let mut cube = unit_cube();
        cube.flip_normals();
        assert!(cube.signed_volume() < 0.0);

        assert!(orient_outward(&mut cube));
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-10);
        assert!(!orient_outward(&mut cube));
    }

    #[test]
    fn normalize_is_identity_on_clean_mesh() {
        let mut cube = unit_cube();
        let summary = normalize_mesh(&mut cube, &NormalizeParams::default());
        assert!(!summary.had_changes());
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 12);
    }

    #[test]
    fn normalize_reports_all_changes() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
        mesh.vertices.push(Point3::new(0.0, 1.0, 0.0)); // duplicate
        mesh.vertices.push(Point3::new(5.0, 5.0, 5.0)); // orphan
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([0, 1, 3]); // collapses onto face 0 after weld

        let summary = normalize_mesh(&mut mesh, &NormalizeParams::default());
        assert_eq!(summary.vertices_welded, 1);
        assert_eq!(summary.unreferenced_vertices_removed, 2);
        assert!(summary.had_changes());
    }
}
