//! 3D crater surface synthesis
//!
//! Samples the radial crater profile over a square grid spanning
//! `±2.5 × radius` so the rim and the whole ejecta blanket are in view.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use super::crater::{CraterShape, SeamMode};
use crate::consts::*;
use crate::error::{VisualError, VisualResult};

/// Square elevation grid in planar meters
///
/// `xs[i][j]` varies with `i`, `ys[i][j]` with `j`; `z[i][j]` is the elevation
/// at that point, negative below the original ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationGrid {
    pub size: usize,
    pub xs: Vec<Vec<f64>>,
    pub ys: Vec<Vec<f64>>,
    pub z: Vec<Vec<f64>>,
}

/// Coordinate of sample `i` of `size` along an axis spanning `±half_extent`
///
/// Written as `half_extent * (2i - (n - 1)) / (n - 1)` so that mirrored samples
/// are exact negatives of each other.
#[inline]
pub(crate) fn symmetric_coordinate(i: usize, size: usize, half_extent: f64) -> f64 {
    let last = (size - 1) as f64;
    half_extent * (2.0 * i as f64 - last) / last
}

/// Build the crater surface with the default seam handling
pub fn generate(crater_radius_m: f64, crater_depth_m: f64, grid_size: usize) -> VisualResult<ElevationGrid> {
    let shape = CraterShape::new(crater_radius_m, crater_depth_m, SeamMode::default())?;
    generate_for(&shape, grid_size)
}

/// Build the crater surface for an already validated shape
pub fn generate_for(shape: &CraterShape, grid_size: usize) -> VisualResult<ElevationGrid> {
    if grid_size <= 1 {
        return Err(VisualError::dimension("grid size", grid_size as f64));
    }

    let half_extent = shape.radius_m * SURFACE_EXTENT;
    let axis: Vec<f64> = (0..grid_size)
        .map(|i| symmetric_coordinate(i, grid_size, half_extent))
        .collect();

    let mut xs = Vec::with_capacity(grid_size);
    let mut ys = Vec::with_capacity(grid_size);
    let mut z = Vec::with_capacity(grid_size);

    for &xi in &axis {
        xs.push(vec![xi; grid_size]);
        ys.push(axis.clone());
        z.push(
            axis.iter()
                .map(|&yj| shape.elevation_at((xi * xi + yj * yj).sqrt()))
                .collect(),
        );
    }

    let grid = ElevationGrid { size: grid_size, xs, ys, z };
    log::debug!(
        "Surface {}x{} over ±{:.0} m, elevation {:.1}..{:.1} m",
        grid_size,
        grid_size,
        half_extent,
        grid.min_elevation(),
        grid.max_elevation()
    );
    Ok(grid)
}

/// Surface vertex ready for upload to a vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Elevation colour scale: deep bowl through sand to the rim and ejecta
pub const ELEVATION_COLOR_STOPS: [(f64, [f32; 4]); 6] = [
    (0.0, rgb(0x8B, 0x45, 0x13)),
    (0.3, rgb(0xCD, 0x85, 0x3F)),
    (0.5, rgb(0xDE, 0xB8, 0x87)),
    (0.7, rgb(0xF4, 0xA4, 0x60)),
    (0.85, rgb(0xD2, 0x69, 0x1E)),
    (1.0, rgb(0x8B, 0x45, 0x13)),
];

const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colour for a normalized elevation in [0, 1]
pub fn elevation_color(t: f64) -> [f32; 4] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    for pair in ELEVATION_COLOR_STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let u = ((t - t0) / (t1 - t0)) as f32;
            let mix = |k: usize| c0[k] * (1.0 - u) + c1[k] * u;
            return [mix(0), mix(1), mix(2), 1.0];
        }
    }
    ELEVATION_COLOR_STOPS[ELEVATION_COLOR_STOPS.len() - 1].1
}

impl ElevationGrid {
    /// Samples per side actually backed by data
    ///
    /// A deserialized grid may disagree with its own `size`; meshing uses the
    /// largest square every array covers.
    pub fn side(&self) -> usize {
        [&self.xs, &self.ys, &self.z]
            .iter()
            .map(|rows| rows.iter().map(Vec::len).fold(rows.len(), usize::min))
            .fold(self.size, usize::min)
    }

    pub fn min_elevation(&self) -> f64 {
        self.z.iter().flatten().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_elevation(&self) -> f64 {
        self.z.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Row-major vertices, coloured by normalized elevation
    pub fn to_vertices(&self) -> Vec<SurfaceVertex> {
        let lo = self.min_elevation();
        let span = (self.max_elevation() - lo).max(f64::EPSILON);

        let n = self.side();
        let mut vertices = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let z = self.z[i][j];
                vertices.push(SurfaceVertex {
                    position: [self.xs[i][j] as f32, self.ys[i][j] as f32, z as f32],
                    color: elevation_color((z - lo) / span),
                });
            }
        }
        vertices
    }

    /// Two counter-clockwise triangles per grid cell, indexing [`Self::to_vertices`]
    pub fn triangle_indices(&self) -> Vec<u32> {
        let side = self.side();
        if side < 2 {
            return Vec::new();
        }
        let n = side as u32;
        let mut indices = Vec::with_capacity((side - 1).pow(2) * 6);
        for i in 0..n - 1 {
            for j in 0..n - 1 {
                let a = i * n + j;
                let b = a + n;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_degenerate_inputs() {
        assert!(matches!(
            generate(5000.0, 1500.0, 1),
            Err(VisualError::InvalidDimension { what: "grid size", .. })
        ));
        assert!(generate(0.0, 1500.0, 10).is_err());
        assert!(generate(5000.0, -2.0, 10).is_err());
    }

    #[test]
    fn test_grid_layout() {
        let grid = generate(5000.0, 1500.0, DEFAULT_GRID_SIZE).unwrap();
        assert_eq!(grid.size, 100);
        assert_eq!(grid.z.len(), 100);
        assert!(grid.z.iter().all(|row| row.len() == 100));
        assert_eq!(grid.xs[0][0], -12_500.0);
        assert_eq!(grid.xs[99][0], 12_500.0);
        assert_eq!(grid.ys[3][0], -12_500.0);
        assert_eq!(grid.ys[3][99], 12_500.0);
        // Corners are far outside the ejecta blanket
        assert_eq!(grid.z[0][0], 0.0);
    }

    #[test]
    fn test_center_is_full_depth() {
        let grid = generate(5000.0, 1500.0, 101).unwrap();
        assert_eq!(grid.xs[50][50], 0.0);
        assert_eq!(grid.z[50][50], -1500.0);
        assert_eq!(grid.min_elevation(), -1500.0);
        assert!(grid.max_elevation() <= 225.0 + 1e-9);
    }

    #[test]
    fn test_ejecta_edge_is_flat() {
        // Sample 80 of 101 lands on 1.5 r along the x axis
        let grid = generate(5000.0, 1500.0, 101).unwrap();
        assert!((grid.xs[80][50] - 7500.0).abs() < 1e-6);
        assert!(grid.z[80][50].abs() < 1e-6);
    }

    #[test]
    fn test_legacy_surface_keeps_edge_dip() {
        let shape = CraterShape::new(5000.0, 1500.0, SeamMode::Legacy).unwrap();
        let grid = generate_for(&shape, 101).unwrap();
        // Just inside the edge the legacy ejecta term has swung below zero
        assert!(grid.min_elevation() == -1500.0);
        assert!(grid.z[79][50] < 0.0);
    }

    #[test]
    fn test_vertices_and_indices() {
        let grid = generate(1000.0, 300.0, 4).unwrap();
        let vertices = grid.to_vertices();
        assert_eq!(vertices.len(), 16);
        let indices = grid.triangle_indices();
        assert_eq!(indices.len(), 9 * 6);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 16 * std::mem::size_of::<SurfaceVertex>());
    }

    #[test]
    fn test_mesh_of_malformed_grid() {
        let empty: ElevationGrid =
            serde_json::from_str(r#"{ "size": 0, "xs": [], "ys": [], "z": [] }"#).unwrap();
        assert_eq!(empty.side(), 0);
        assert!(empty.to_vertices().is_empty());
        assert!(empty.triangle_indices().is_empty());

        let short: ElevationGrid =
            serde_json::from_str(r#"{ "size": 3, "xs": [[0.0]], "ys": [[0.0]], "z": [[-1.0]] }"#).unwrap();
        assert_eq!(short.side(), 1);
        assert_eq!(short.to_vertices().len(), 1);
        assert!(short.triangle_indices().is_empty());

        let mut ragged = generate(1000.0, 300.0, 4).unwrap();
        ragged.z[2].truncate(3);
        assert_eq!(ragged.side(), 3);
        let vertices = ragged.to_vertices();
        assert_eq!(vertices.len(), 9);
        assert!(ragged.triangle_indices().iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn test_color_scale_endpoints() {
        assert_eq!(elevation_color(0.0), ELEVATION_COLOR_STOPS[0].1);
        assert_eq!(elevation_color(1.0), ELEVATION_COLOR_STOPS[5].1);
        assert_eq!(elevation_color(-3.0), ELEVATION_COLOR_STOPS[0].1);
        let mid = elevation_color(0.4);
        assert!(mid[0] > ELEVATION_COLOR_STOPS[1].1[0]);
    }

    proptest! {
        #[test]
        fn prop_surface_is_radially_symmetric(size in 2usize..40) {
            let grid = generate(2000.0, 400.0, size).unwrap();
            let n = grid.size;
            for i in 0..n {
                for j in 0..n {
                    prop_assert_eq!(grid.z[i][j], grid.z[n - 1 - i][n - 1 - j]);
                    prop_assert_eq!(grid.z[i][j], grid.z[j][i]);
                }
            }
        }
    }
}
