//! # Mesh Builder
//!
//! Turns a point field into a strip [`Mesh`].
//!
//! ## Algorithm
//!
//! ```text
//! for r in 0..rows/step, c in 0..cols/step (row-major):
//!     vertex   <- field[r*step, c*step]          (missing cells stored too)
//!     normal   <- quadrant estimate              (lit only)
//!     texcoord <- (c*step/cols, 1 - r*step/rows) (textured only)
//!     sum      += vertex if valid                (gradient only)
//! strips <- one per row pair
//! ```
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use pointcloud_mesh::{build_mesh, BuildMode, PointField};
//!
//! let field = PointField::from_fn(4, 4, |r, c| Some(DVec3::new(c as f64, r as f64, 1.0)));
//! let output = build_mesh(&field, 2, BuildMode::gradient(false)).unwrap();
//! assert_eq!(output.mesh.vertex_count(), 4);
//! assert_eq!(output.mesh.strip_count(), 1);
//! ```

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::MeshError;
use crate::field::{GridSampler, PointField};
use crate::mesh::Mesh;
use crate::normals::estimate_normal;
use crate::progress::{NoProgress, Progress};
use crate::strip::build_strips;

// =============================================================================
// BUILD MODE
// =============================================================================

/// How the surface gets its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceMode {
    /// A photographic texture is draped; texture coordinates are emitted.
    Textured,
    /// A 1D gradient ramp driven by the dominant surface direction.
    GradientColored,
}

/// Surface coloring plus whether normals are computed for lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMode {
    /// Coloring mode.
    pub surface: SurfaceMode,
    /// Emit per-vertex normals.
    pub lighting: bool,
}

impl BuildMode {
    /// Draped-texture mode.
    pub fn textured(lighting: bool) -> Self {
        Self {
            surface: SurfaceMode::Textured,
            lighting,
        }
    }

    /// Gradient-colored mode.
    pub fn gradient(lighting: bool) -> Self {
        Self {
            surface: SurfaceMode::GradientColored,
            lighting,
        }
    }
}

// =============================================================================
// DIRECTION ACCUMULATOR
// =============================================================================

/// Running sum of valid vertex positions, normalized into the dominant
/// direction of the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectionAccumulator {
    sum: DVec3,
    count: usize,
}

impl DirectionAccumulator {
    /// Adds one valid vertex.
    #[inline]
    pub fn add(&mut self, point: DVec3) {
        self.sum += point;
        self.count += 1;
    }

    /// Number of vertices added.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Normalized sum; the zero vector if nothing (or only the origin) was added.
    pub fn finish(&self) -> DVec3 {
        self.sum.normalize_or_zero()
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Result of a build: the mesh plus, in gradient mode, the dominant
/// direction of the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshOutput {
    /// Generated mesh.
    pub mesh: Mesh,
    /// Normalized sum of valid vertex positions (gradient mode only).
    pub direction: Option<DVec3>,
}

/// Builds a mesh from `field` sampled every `step` cells.
pub fn build_mesh(field: &PointField, step: usize, mode: BuildMode) -> Result<MeshOutput, MeshError> {
    build_mesh_with_progress(field, step, mode, &mut NoProgress)
}

/// Like [`build_mesh`], reporting scan progress to `progress`.
pub fn build_mesh_with_progress(
    field: &PointField,
    step: usize,
    mode: BuildMode,
    progress: &mut dyn Progress,
) -> Result<MeshOutput, MeshError> {
    let sampler = GridSampler::new(field, step)?;
    let (rows, cols) = (sampler.rows(), sampler.cols());
    if u32::try_from(sampler.len()).is_err() {
        return Err(MeshError::configuration(format!(
            "{rows}x{cols} samples exceed u32 vertex indices, use a larger step"
        )));
    }

    info!(
        rows = field.rows(),
        cols = field.cols(),
        sampled_rows = rows,
        sampled_cols = cols,
        step,
        "generating mesh from point field"
    );

    let mut mesh = Mesh::with_grid(rows, cols);
    let mut normals = mode.lighting.then(|| Vec::with_capacity(sampler.len()));
    let textured = mode.surface == SurfaceMode::Textured;
    let mut tex_coords = textured.then(|| Vec::with_capacity(sampler.len()));
    let mut direction = DirectionAccumulator::default();

    let progress_mult = if sampler.is_empty() {
        0.0
    } else {
        1.0 / sampler.len() as f64
    };

    for r in 0..rows {
        for c in 0..cols {
            progress.report(sampler.index(r, c) as f64 * progress_mult);

            let point = sampler.sample(r, c);
            let valid = sampler.is_valid(r, c);
            mesh.add_vertex(point, valid)?;

            if let Some(normals) = normals.as_mut() {
                normals.push(estimate_normal(&sampler, r, c));
            }

            if let Some(tex_coords) = tex_coords.as_mut() {
                tex_coords.push(tex_coord(&sampler, r, c));
            } else if valid {
                direction.add(point);
            }
        }
    }
    progress.finished();

    debug!(vertices = mesh.vertex_count(), "pushed vertices");

    if let Some(normals) = normals {
        mesh.set_normals(normals);
    }
    if let Some(tex_coords) = tex_coords {
        mesh.set_tex_coords(tex_coords);
    }

    mesh.set_strips(build_strips(rows, cols, mesh.validity())?);
    debug!(strips = mesh.strip_count(), triangles = mesh.triangle_count(), "drew triangle strips");

    let direction = (!textured).then(|| direction.finish());
    if let Some(direction) = direction {
        debug!(?direction, "dominant surface direction");
    }

    Ok(MeshOutput { mesh, direction })
}

/// Texture coordinate of sample `(r, c)` relative to the full-resolution grid.
fn tex_coord(sampler: &GridSampler<'_>, r: usize, c: usize) -> DVec2 {
    let field = sampler.field();
    let (row, col) = sampler.source_position(r, c);
    DVec2::new(
        col as f64 / field.cols() as f64,
        1.0 - row as f64 / field.rows() as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn plane(rows: usize, cols: usize) -> PointField {
        PointField::from_fn(rows, cols, |r, c| Some(DVec3::new(c as f64, r as f64, 1.0)))
    }

    #[test]
    fn test_vertex_count_matches_stride() {
        for step in 1..=4 {
            let field = plane(4 * step, 3 * step);
            let output = build_mesh(&field, step, BuildMode::gradient(false)).unwrap();
            assert_eq!(output.mesh.vertex_count(), 12);
            assert_eq!(output.mesh.grid_shape(), (4, 3));
        }
    }

    #[test]
    fn test_truncated_border_is_dropped() {
        let field = plane(5, 7);
        let output = build_mesh(&field, 2, BuildMode::gradient(false)).unwrap();
        assert_eq!(output.mesh.grid_shape(), (2, 3));
        assert_eq!(output.mesh.vertex(5), DVec3::new(4.0, 2.0, 1.0));
    }

    #[test]
    fn test_zero_step_rejected() {
        let field = plane(2, 2);
        assert!(matches!(
            build_mesh(&field, 0, BuildMode::gradient(false)),
            Err(MeshError::Configuration { .. })
        ));
    }

    #[test]
    fn test_lighting_controls_normals() {
        let field = plane(3, 3);
        let unlit = build_mesh(&field, 1, BuildMode::gradient(false)).unwrap();
        assert!(unlit.mesh.normals().is_none());

        let lit = build_mesh(&field, 1, BuildMode::gradient(true)).unwrap();
        let normals = lit.mesh.normals().unwrap();
        assert_eq!(normals.len(), 9);
        assert_eq!(normals[4], DVec3::NEG_Z);
    }

    #[test]
    fn test_textured_mode_emits_tex_coords() {
        let field = plane(4, 8);
        let output = build_mesh(&field, 2, BuildMode::textured(false)).unwrap();
        assert!(output.direction.is_none());
        let coords = output.mesh.tex_coords().unwrap();
        assert_eq!(coords.len(), 8);
        // Sample (1, 3) reads raw (2, 6).
        assert_eq!(coords[7], DVec2::new(6.0 / 8.0, 1.0 - 2.0 / 4.0));
        assert_eq!(coords[0], DVec2::new(0.0, 1.0));
    }

    #[test]
    fn test_gradient_direction_from_two_points() {
        let field = PointField::from_fn(2, 2, |r, c| match (r, c) {
            (0, 0) => Some(DVec3::X),
            (1, 1) => Some(DVec3::Y),
            _ => None,
        });
        let output = build_mesh(&field, 1, BuildMode::gradient(false)).unwrap();
        let direction = output.direction.unwrap();
        assert_abs_diff_eq!(direction.x, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(direction.y, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(direction.z, 0.0, epsilon = 1e-12);
        assert!(output.mesh.tex_coords().is_none());
    }

    #[test]
    fn test_gradient_direction_of_empty_field_is_zero() {
        let field = PointField::from_points(2, 2, vec![DVec3::ZERO; 4]).unwrap();
        let output = build_mesh(&field, 1, BuildMode::gradient(false)).unwrap();
        assert_eq!(output.direction, Some(DVec3::ZERO));
    }

    #[test]
    fn test_missing_vertices_stored_but_not_stripped() {
        let field = PointField::from_fn(2, 2, |r, c| ((r, c) != (0, 1)).then(|| DVec3::ONE));
        let output = build_mesh(&field, 1, BuildMode::gradient(false)).unwrap();
        assert_eq!(output.mesh.vertex(1), DVec3::ZERO);
        assert!(!output.mesh.is_valid(1));
        assert_eq!(output.mesh.strips()[0].indices(), &[0, 2, 3]);
    }

    #[test]
    fn test_progress_reports_each_sample() {
        let field = plane(2, 3);
        let mut reports = Vec::new();
        let mut sink = |f: f64| reports.push(f);
        build_mesh_with_progress(&field, 1, BuildMode::gradient(false), &mut sink).unwrap();
        assert_eq!(reports.len(), 6);
        assert_eq!(reports[0], 0.0);
        assert_abs_diff_eq!(reports[5], 5.0 / 6.0, epsilon = 1e-12);
    }
}
