//! Marching-cubes surface extraction.

use std::collections::HashMap;

use mesh_types::{IndexedMesh, Point3, Triangle};
use tracing::debug;
use volume_types::{VoxelMask, VoxelSpacing};

use crate::error::{ExtractError, ExtractResult};
use crate::tables::{CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, TRI_TABLE};

/// Isovalue for a binary occupancy field: the midpoint between 0 and 1.
const ISO: f64 = 0.5;

/// Extract the isosurface of a binary mask as a triangle mesh.
///
/// The mask is sampled at voxel centers; vertex positions are interpolated
/// along grid edges (landing on edge midpoints for a 0/1 field) and scaled
/// into millimeters by `spacing`. Vertices shared between neighboring cells
/// are emitted once. Triangles are wound counter-clockwise seen from
/// outside the masked region, so the resulting closed surface has positive
/// signed volume.
///
/// # Errors
///
/// - [`ExtractError::GridTooSmall`] if any mask dimension is below 2
/// - [`ExtractError::NoSurface`] if the mask is all false or all true;
///   an empty mesh is never returned
///
/// # Example
///
/// ```
/// use volume_types::{VoxelMask, VoxelSpacing};
/// use mesh_extract::extract_surface;
///
/// let mut mask = VoxelMask::new((4, 4, 4));
/// mask.set(1, 1, 1, true);
///
/// let mesh = extract_surface(&mask, VoxelSpacing::isotropic(1.0)).unwrap();
/// assert_eq!(mesh.vertex_count(), 6);
/// assert_eq!(mesh.face_count(), 8);
/// ```
pub fn extract_surface(mask: &VoxelMask, spacing: VoxelSpacing) -> ExtractResult<IndexedMesh> {
    let dims = mask.dims();
    let (nx, ny, nz) = dims;
    if nx < 2 || ny < 2 || nz < 2 {
        return Err(ExtractError::GridTooSmall { dims });
    }

    let true_count = mask.count_true();
    let total = mask.len();
    if true_count == 0 || true_count == total {
        return Err(ExtractError::NoSurface { true_count, total });
    }

    let mut mesh = IndexedMesh::new();
    // One vertex per crossed lattice edge, keyed by its endpoint pair.
    let mut edge_vertices: HashMap<(u64, u64), u32> = HashMap::new();

    let lattice_id = |x: usize, y: usize, z: usize| -> u64 {
        (x as u64) + (y as u64) * (nx as u64) + (z as u64) * (nx as u64) * (ny as u64)
    };

    for z in 0..nz - 1 {
        for y in 0..ny - 1 {
            for x in 0..nx - 1 {
                // Bit set = corner below the isovalue (outside the mask).
                let mut cube_index = 0usize;
                for (i, &(dx, dy, dz)) in CORNER_OFFSETS.iter().enumerate() {
                    if mask.get(x + dx, y + dy, z + dz) != Some(true) {
                        cube_index |= 1 << i;
                    }
                }

                let crossed = EDGE_TABLE[cube_index];
                if crossed == 0 {
                    continue;
                }

                let mut edge_index = [0u32; 12];
                for (e, &(ca, cb)) in EDGE_CORNERS.iter().enumerate() {
                    if crossed & (1 << e) == 0 {
                        continue;
                    }

                    let (ax, ay, az) = CORNER_OFFSETS[ca];
                    let (bx, by, bz) = CORNER_OFFSETS[cb];
                    let (ax, ay, az) = (x + ax, y + ay, z + az);
                    let (bx, by, bz) = (x + bx, y + by, z + bz);

                    let ida = lattice_id(ax, ay, az);
                    let idb = lattice_id(bx, by, bz);
                    let key = if ida < idb { (ida, idb) } else { (idb, ida) };

                    let next = u32::try_from(mesh.vertices.len()).unwrap_or(u32::MAX);
                    edge_index[e] = *edge_vertices.entry(key).or_insert_with(|| {
                        let va = f64::from(u8::from(mask.get(ax, ay, az) == Some(true)));
                        let vb = f64::from(u8::from(mask.get(bx, by, bz) == Some(true)));
                        // t is 0.5 for a binary field; kept general on purpose.
                        let t = (ISO - va) / (vb - va);

                        #[allow(clippy::cast_precision_loss)]
                        let position = Point3::new(
                            (ax as f64 + t * (bx as f64 - ax as f64)) * spacing.x,
                            (ay as f64 + t * (by as f64 - ay as f64)) * spacing.y,
                            (az as f64 + t * (bz as f64 - az as f64)) * spacing.z,
                        );
                        mesh.vertices.push(position);
                        next
                    });
                }

                let row = &TRI_TABLE[cube_index];
                let mut t = 0;
                while t + 2 < row.len() && row[t] >= 0 {
                    #[allow(clippy::cast_sign_loss)]
                    let face = [
                        edge_index[row[t] as usize],
                        edge_index[row[t + 1] as usize],
                        edge_index[row[t + 2] as usize],
                    ];
                    t += 3;

                    let tri = Triangle::new(
                        mesh.vertices[face[0] as usize],
                        mesh.vertices[face[1] as usize],
                        mesh.vertices[face[2] as usize],
                    );
                    // Degenerate triangles are disallowed.
                    if face[0] == face[1]
                        || face[1] == face[2]
                        || face[0] == face[2]
                        || tri.is_degenerate(0.0)
                    {
                        continue;
                    }

                    mesh.faces.push(face);
                }
            }
        }
    }

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "extracted isosurface"
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn single_voxel_mask() -> VoxelMask {
        let mut mask = VoxelMask::new((4, 4, 4));
        mask.set(1, 1, 1, true);
        mask
    }

    /// Every directed edge must be matched by its reverse exactly once.
    fn assert_watertight(mesh: &IndexedMesh) {
        let mut directed: HashMap<(u32, u32), i32> = HashMap::new();
        for &[a, b, c] in &mesh.faces {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *directed.entry((u.min(v), u.max(v))).or_insert(0) +=
                    if u < v { 1 } else { -1 };
                assert_ne!(u, v, "degenerate edge");
            }
        }
        let mut undirected: HashMap<(u32, u32), usize> = HashMap::new();
        for &[a, b, c] in &mesh.faces {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *undirected.entry((u.min(v), u.max(v))).or_insert(0) += 1;
            }
        }
        for (&edge, &count) in &undirected {
            assert_eq!(count, 2, "edge {edge:?} not shared by exactly two faces");
        }
        for (&edge, &balance) in &directed {
            assert_eq!(balance, 0, "edge {edge:?} wound inconsistently");
        }
    }

    #[test]
    fn all_false_mask_is_rejected() {
        let mask = VoxelMask::new((4, 4, 4));
        let result = extract_surface(&mask, VoxelSpacing::isotropic(1.0));
        assert!(matches!(
            result,
            Err(ExtractError::NoSurface {
                true_count: 0,
                total: 64
            })
        ));
    }

    #[test]
    fn all_true_mask_is_rejected() {
        let mask = VoxelMask::from_vec((3, 3, 3), vec![true; 27]);
        let Some(mask) = mask else {
            panic!("bad fixture");
        };
        let result = extract_surface(&mask, VoxelSpacing::isotropic(1.0));
        assert!(matches!(result, Err(ExtractError::NoSurface { .. })));
    }

    #[test]
    fn thin_grid_is_rejected() {
        let mask = VoxelMask::new((1, 4, 4));
        let result = extract_surface(&mask, VoxelSpacing::isotropic(1.0));
        assert!(matches!(result, Err(ExtractError::GridTooSmall { .. })));
    }

    #[test]
    fn single_voxel_gives_closed_octahedron() {
        let mesh = extract_surface(&single_voxel_mask(), VoxelSpacing::isotropic(1.0));
        let Ok(mesh) = mesh else {
            panic!("extraction failed");
        };

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 8);
        assert_watertight(&mesh);

        // Octahedron with semi-axes 0.5: volume 4/3 * 0.5^3 = 1/6.
        assert_relative_eq!(mesh.signed_volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn vertices_respect_anisotropic_spacing() {
        let spacing = VoxelSpacing::new(1.0, 2.0, 3.0);
        let mesh = extract_surface(&single_voxel_mask(), spacing);
        let Ok(mesh) = mesh else {
            panic!("extraction failed");
        };

        // Surface encloses voxel (1,1,1): centered at (1*sx, 1*sy, 1*sz).
        let bounds = mesh.bounds();
        let center = bounds.center();
        assert_relative_eq!(center.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(center.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(center.z, 3.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.extent().x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.extent().y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(bounds.extent().z, 3.0, epsilon = 1e-12);

        // Octahedron volume scales with the voxel volume.
        assert_relative_eq!(mesh.signed_volume(), 6.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn block_surface_is_closed_and_outward() {
        let mut mask = VoxelMask::new((5, 5, 5));
        for z in 1..3 {
            for y in 1..3 {
                for x in 1..3 {
                    mask.set(x, y, z, true);
                }
            }
        }

        let mesh = extract_surface(&mask, VoxelSpacing::isotropic(1.0));
        let Ok(mesh) = mesh else {
            panic!("extraction failed");
        };

        assert_watertight(&mesh);
        assert!(mesh.signed_volume() > 0.0, "surface wound inward");

        // Closed genus-0 surface: V - E + F = 2.
        let edge_count: usize = {
            let mut edges = std::collections::HashSet::new();
            for &[a, b, c] in &mesh.faces {
                for (u, v) in [(a, b), (b, c), (c, a)] {
                    edges.insert((u.min(v), u.max(v)));
                }
            }
            edges.len()
        };
        let euler = mesh.vertex_count() as i64 - edge_count as i64 + mesh.face_count() as i64;
        assert_eq!(euler, 2);
    }

    #[test]
    fn shared_edge_vertices_are_reused() {
        // Two face-adjacent voxels: the shared boundary must not duplicate
        // vertices between cells.
        let mut mask = VoxelMask::new((5, 4, 4));
        mask.set(1, 1, 1, true);
        mask.set(2, 1, 1, true);

        let mesh = extract_surface(&mask, VoxelSpacing::isotropic(1.0));
        let Ok(mesh) = mesh else {
            panic!("extraction failed");
        };
        assert_watertight(&mesh);

        // No two vertices may coincide.
        for (i, a) in mesh.vertices.iter().enumerate() {
            for b in mesh.vertices.iter().skip(i + 1) {
                assert!((a - b).norm() > 1e-9, "duplicate vertex at {a:?}");
            }
        }
    }

    #[test]
    fn mask_touching_the_border_still_extracts() {
        // A voxel on the boundary produces an open surface (clipped at the
        // volume edge) but must not error.
        let mut mask = VoxelMask::new((3, 3, 3));
        mask.set(0, 0, 0, true);

        let mesh = extract_surface(&mask, VoxelSpacing::isotropic(1.0));
        assert!(mesh.is_ok_and(|m| !m.is_empty()));
    }
}
