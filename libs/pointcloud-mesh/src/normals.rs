//! # Normal Estimation
//!
//! Per-vertex normals from the four grid quadrants around a sample.
//!
//! ```text
//!            (r-1, c)
//!               |
//!        Q4     |     Q1
//!               |
//! (r, c-1) ---- X ---- (r, c+1)
//!               |
//!        Q3     |     Q2
//!               |
//!            (r+1, c)
//! ```
//!
//! Each quadrant contributes `normalize(cross(a - center, b - center))` when
//! both of its neighbors are inside the sampled grid and valid. The vertex
//! normal is the normalized sum; a vertex with no contributing quadrant gets
//! the zero vector.

use glam::DVec3;

use crate::field::GridSampler;

/// One quadrant: the two neighbor offsets (row, col) in cross-product order.
type Quadrant = [(isize, isize); 2];

/// Quadrants in evaluation order. Every pair is ordered so that a flat grid
/// laid out as `x = col`, `y = row` yields `-Z` from each quadrant.
const QUADRANTS: [Quadrant; 4] = [
    [(0, 1), (-1, 0)],
    [(1, 0), (0, 1)],
    [(0, -1), (1, 0)],
    [(-1, 0), (0, -1)],
];

/// Estimates the normal of sample `(r, c)`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use pointcloud_mesh::{GridSampler, PointField};
/// use pointcloud_mesh::normals::estimate_normal;
///
/// let field = PointField::from_fn(3, 3, |r, c| Some(DVec3::new(c as f64, r as f64, 5.0)));
/// let sampler = GridSampler::new(&field, 1).unwrap();
/// assert_eq!(estimate_normal(&sampler, 1, 1), DVec3::NEG_Z);
/// ```
pub fn estimate_normal(sampler: &GridSampler<'_>, r: usize, c: usize) -> DVec3 {
    let center = sampler.sample(r, c);

    QUADRANTS
        .iter()
        .filter_map(|[a, b]| {
            let a = neighbor(sampler, r, c, *a)?;
            let b = neighbor(sampler, r, c, *b)?;
            Some((a - center).cross(b - center).normalize_or_zero())
        })
        .fold(DVec3::ZERO, |sum, n| sum + n)
        .normalize_or_zero()
}

/// Normals for every sample in row-major order.
pub fn estimate_normals(sampler: &GridSampler<'_>) -> Vec<DVec3> {
    let mut normals = Vec::with_capacity(sampler.len());
    for r in 0..sampler.rows() {
        for c in 0..sampler.cols() {
            normals.push(estimate_normal(sampler, r, c));
        }
    }
    normals
}

/// Valid neighbor of `(r, c)` at `offset`, if it lies inside the sampled grid.
fn neighbor(sampler: &GridSampler<'_>, r: usize, c: usize, (dr, dc): (isize, isize)) -> Option<DVec3> {
    let nr = r.checked_add_signed(dr).filter(|nr| *nr < sampler.rows())?;
    let nc = c.checked_add_signed(dc).filter(|nc| *nc < sampler.cols())?;
    sampler.is_valid(nr, nc).then(|| sampler.sample(nr, nc))
}
