//! Humphrey (HC) smoothing.
//!
//! # Algorithm
//!
//! Each iteration is a Laplacian step followed by a correction step:
//!
//! 1. `b[i]` = centroid of the neighbors of vertex `i`
//! 2. `d[i] = b[i] - (alpha * original[i] + (1 - alpha) * previous[i])`
//! 3. `new[i] = b[i] - (beta * d[i] + (1 - beta) * mean of d over neighbors)`
//!
//! `alpha` blends the pull-back target between the original mesh and the
//! previous iterate; `beta` blends the correction between a vertex's own
//! drift and its neighborhood's. The correction cancels most of the
//! volume loss a pure Laplacian pass causes.
//!
//! # Reference
//!
//! Vollmer, Mencl, Müller (1999). "Improved Laplacian Smoothing of Noisy
//! Surface Meshes", Computer Graphics Forum 18(3).

use std::collections::{HashMap, HashSet};

use mesh_types::IndexedMesh;
use nalgebra::Vector3;

/// Parameters for Humphrey smoothing.
#[derive(Debug, Clone, Copy)]
pub struct HumphreyParams {
    /// Pull-back blend toward the original mesh (0..=1). Default: 0.1.
    pub alpha: f64,

    /// Correction blend between own and neighborhood drift (0..=1).
    /// Default: 0.5.
    pub beta: f64,
}

impl Default for HumphreyParams {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            beta: 0.5,
        }
    }
}

impl HumphreyParams {
    /// Creates new parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pull-back blend factor.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the correction blend factor.
    #[must_use]
    pub const fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }
}

/// Result of Humphrey smoothing.
#[derive(Debug, Clone)]
pub struct HumphreyResult {
    /// The smoothed mesh.
    pub mesh: IndexedMesh,

    /// Number of iterations performed.
    pub iterations_performed: u32,

    /// Maximum single-vertex displacement across all iterations.
    pub max_displacement: f64,

    /// Sum of per-iteration maximum displacements.
    pub total_displacement: f64,
}

impl HumphreyResult {
    /// Whether any smoothing pass ran.
    #[must_use]
    pub const fn was_applied(&self) -> bool {
        self.iterations_performed > 0
    }
}

/// Apply `iterations` passes of Humphrey smoothing.
///
/// Zero iterations returns the mesh unchanged, with the result marking
/// that no smoothing was applied. Vertices with no neighbors (isolated or
/// from a faceless mesh) are never moved.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_smooth::{smooth_humphrey_iterations, HumphreyParams};
///
/// let result = smooth_humphrey_iterations(&unit_cube(), 0, HumphreyParams::default());
/// assert!(!result.was_applied());
/// ```
#[must_use]
pub fn smooth_humphrey_iterations(
    mesh: &IndexedMesh,
    iterations: u32,
    params: HumphreyParams,
) -> HumphreyResult {
    if iterations == 0 || mesh.vertices.is_empty() || mesh.faces.is_empty() {
        return HumphreyResult {
            mesh: mesh.clone(),
            iterations_performed: 0,
            max_displacement: 0.0,
            total_displacement: 0.0,
        };
    }

    let neighbors = build_vertex_neighbors(mesh);
    let original: Vec<Vector3<f64>> = mesh.vertices.iter().map(|p| p.coords).collect();

    let mut current = mesh.clone();
    let mut max_displacement = 0.0_f64;
    let mut total_displacement = 0.0;

    for _ in 0..iterations {
        let iter_max = humphrey_pass(&mut current, &neighbors, &original, params);
        max_displacement = max_displacement.max(iter_max);
        total_displacement += iter_max;
    }

    HumphreyResult {
        mesh: current,
        iterations_performed: iterations,
        max_displacement,
        total_displacement,
    }
}

/// One Laplacian + correction pass. Returns the maximum displacement.
fn humphrey_pass(
    mesh: &mut IndexedMesh,
    neighbors: &HashMap<u32, Vec<u32>>,
    original: &[Vector3<f64>],
    params: HumphreyParams,
) -> f64 {
    let previous: Vec<Vector3<f64>> = mesh.vertices.iter().map(|p| p.coords).collect();
    let n = previous.len();

    // Laplacian step: neighbor centroids.
    let mut smoothed: Vec<Vector3<f64>> = previous.clone();
    for (i, target) in smoothed.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let idx = i as u32;
        if let Some(adj) = neighbors.get(&idx) {
            if !adj.is_empty() {
                let sum: Vector3<f64> =
                    adj.iter().map(|&j| previous[j as usize]).sum();
                #[allow(clippy::cast_precision_loss)]
                let centroid = sum / adj.len() as f64;
                *target = centroid;
            }
        }
    }

    // Drift of each vertex relative to the blended pull-back target.
    let mut drift: Vec<Vector3<f64>> = Vec::with_capacity(n);
    for i in 0..n {
        drift.push(smoothed[i] - (params.alpha * original[i] + (1.0 - params.alpha) * previous[i]));
    }

    // Correction step.
    let mut max_displacement = 0.0_f64;
    for (i, vertex) in mesh.vertices.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let idx = i as u32;

        let neighbor_drift = neighbors.get(&idx).map_or_else(Vector3::zeros, |adj| {
            if adj.is_empty() {
                Vector3::zeros()
            } else {
                let sum: Vector3<f64> = adj.iter().map(|&j| drift[j as usize]).sum();
                #[allow(clippy::cast_precision_loss)]
                let mean = sum / adj.len() as f64;
                mean
            }
        });

        let has_neighbors = neighbors.get(&idx).is_some_and(|adj| !adj.is_empty());
        if !has_neighbors {
            continue;
        }

        let corrected =
            smoothed[i] - (params.beta * drift[i] + (1.0 - params.beta) * neighbor_drift);
        let displacement = (corrected - previous[i]).norm();
        max_displacement = max_displacement.max(displacement);
        vertex.coords = corrected;
    }

    max_displacement
}

/// Map from vertex index to its edge-connected neighbors.
fn build_vertex_neighbors(mesh: &IndexedMesh) -> HashMap<u32, Vec<u32>> {
    let mut neighbors: HashMap<u32, HashSet<u32>> = HashMap::new();

    for face in &mesh.faces {
        for i in 0..3 {
            let v = face[i];
            let next = face[(i + 1) % 3];
            let prev = face[(i + 2) % 3];

            neighbors.entry(v).or_default().insert(next);
            neighbors.entry(v).or_default().insert(prev);
        }
    }

    neighbors
        .into_iter()
        .map(|(k, v)| (k, v.into_iter().collect()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{unit_cube, Point3};

    fn make_plane_mesh(n: usize) -> IndexedMesh {
        let mut mesh = IndexedMesh::new();

        for i in 0..n {
            for j in 0..n {
                mesh.vertices.push(Point3::new(i as f64, j as f64, 0.0));
            }
        }

        for i in 0..(n - 1) {
            for j in 0..(n - 1) {
                let idx = (i * n + j) as u32;
                let n_u32 = n as u32;
                mesh.faces.push([idx, idx + 1, idx + n_u32]);
                mesh.faces.push([idx + 1, idx + n_u32 + 1, idx + n_u32]);
            }
        }

        mesh
    }

    fn make_noisy_plane_mesh(n: usize, noise: f64) -> IndexedMesh {
        use rand::Rng;

        let mut mesh = make_plane_mesh(n);
        let mut rng = rand::thread_rng();

        for vertex in &mut mesh.vertices {
            vertex.z += rng.gen_range(-noise..noise);
        }

        mesh
    }

    fn z_variance(mesh: &IndexedMesh) -> f64 {
        mesh.vertices.iter().map(|v| v.z.powi(2)).sum::<f64>() / mesh.vertices.len() as f64
    }

    #[test]
    fn zero_iterations_is_identity() {
        let mesh = make_noisy_plane_mesh(6, 0.2);
        let result = smooth_humphrey_iterations(&mesh, 0, HumphreyParams::default());

        assert!(!result.was_applied());
        assert_relative_eq!(result.max_displacement, 0.0);
        for (a, b) in result.mesh.vertices.iter().zip(mesh.vertices.iter()) {
            assert_relative_eq!((a - b).norm(), 0.0);
        }
    }

    #[test]
    fn empty_mesh_is_a_no_op() {
        let mesh = IndexedMesh::new();
        let result = smooth_humphrey_iterations(&mesh, 5, HumphreyParams::default());
        assert!(!result.was_applied());
        assert!(result.mesh.vertices.is_empty());
    }

    #[test]
    fn reduces_noise_on_a_plane() {
        let mesh = make_noisy_plane_mesh(10, 0.5);
        let before = z_variance(&mesh);

        let result = smooth_humphrey_iterations(&mesh, 10, HumphreyParams::default());

        assert!(result.was_applied());
        assert!(result.max_displacement > 0.0);
        assert!(z_variance(&result.mesh) < before);
    }

    #[test]
    fn flat_plane_stays_flat() {
        let mesh = make_plane_mesh(6);
        let result = smooth_humphrey_iterations(&mesh, 10, HumphreyParams::default());

        for v in &result.mesh.vertices {
            assert_relative_eq!(v.z, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn topology_is_untouched() {
        let cube = unit_cube();
        let result = smooth_humphrey_iterations(&cube, 25, HumphreyParams::default());
        assert_eq!(result.mesh.face_count(), cube.face_count());
        assert_eq!(result.mesh.vertex_count(), cube.vertex_count());
    }

    #[test]
    fn params_builder() {
        let params = HumphreyParams::new().with_alpha(0.2).with_beta(0.6);
        assert_relative_eq!(params.alpha, 0.2);
        assert_relative_eq!(params.beta, 0.6);

        let defaults = HumphreyParams::default();
        assert_relative_eq!(defaults.alpha, 0.1);
        assert_relative_eq!(defaults.beta, 0.5);
    }

    #[test]
    fn displacement_totals_accumulate() {
        let mesh = make_noisy_plane_mesh(8, 0.3);
        let result = smooth_humphrey_iterations(&mesh, 5, HumphreyParams::default());
        assert_eq!(result.iterations_performed, 5);
        assert!(result.total_displacement >= result.max_displacement);
    }
}
