//! # Strip Topology
//!
//! Triangle strips over pairs of sampled rows.
//!
//! Each row pair `(r, r + 1)` becomes one strip. Columns are walked left to
//! right, emitting the top vertex `r * cols + c` and the bottom vertex
//! `(r + 1) * cols + c` whenever they are valid. Emission starts top first;
//! a missing vertex in the second slot of a column flips the order for the
//! following columns, which keeps the strip from stitching long triangles
//! across a hole.

use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// Which vertex of a column is emitted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Top, then bottom.
    Descending,
    /// Bottom, then top.
    Ascending,
}

/// Ordered vertex indices of one triangle strip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TriangleStrip {
    indices: Vec<u32>,
}

impl TriangleStrip {
    /// Wraps an index list.
    pub fn new(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    /// Vertex indices in strip order.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of indices.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the strip has no indices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of triangles the strip encodes (degenerate ones included).
    pub fn triangle_count(&self) -> usize {
        self.indices.len().saturating_sub(2)
    }

    /// Expands the strip into individual triangles.
    ///
    /// Odd triangles swap their first two vertices so every triangle keeps
    /// the winding of the first. Triangles that repeat a vertex are dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pointcloud_mesh::strip::TriangleStrip;
    ///
    /// let strip = TriangleStrip::new(vec![0, 3, 1, 4]);
    /// assert_eq!(strip.triangles(), vec![[0, 3, 1], [1, 3, 4]]);
    /// ```
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.indices
            .windows(3)
            .enumerate()
            .map(|(i, w)| if i % 2 == 0 { [w[0], w[1], w[2]] } else { [w[1], w[0], w[2]] })
            .filter(|[a, b, c]| a != b && b != c && a != c)
            .collect()
    }
}

/// Builds one strip per pair of adjacent sampled rows.
///
/// `valid` is the per-vertex validity in row-major order and must hold
/// `rows * cols` entries. Grids with fewer than two rows produce no strips.
///
/// Fails with `Configuration` when the grid has more vertices than a u32
/// index can address, and with `DimensionMismatch` when `valid` has the
/// wrong length.
///
/// # Example
///
/// ```rust
/// use pointcloud_mesh::strip::build_strips;
///
/// // 2x3 grid with the bottom-middle vertex missing.
/// let valid = [true, true, true, true, false, true];
/// let strips = build_strips(2, 3, &valid).unwrap();
/// assert_eq!(strips[0].indices(), &[0, 3, 1, 5, 2]);
/// ```
pub fn build_strips(
    rows: usize,
    cols: usize,
    valid: &[bool],
) -> Result<Vec<TriangleStrip>, MeshError> {
    let expected = rows
        .checked_mul(cols)
        .ok_or_else(|| MeshError::configuration(format!("grid {rows}x{cols} is too large")))?;
    // Every index must fit a u32 vertex index.
    let too_large =
        || MeshError::configuration(format!("grid {rows}x{cols} exceeds u32 vertex indices"));
    u32::try_from(expected).map_err(|_| too_large())?;
    if valid.len() != expected {
        return Err(MeshError::DimensionMismatch {
            expected,
            actual: valid.len(),
        });
    }
    let rows = u32::try_from(rows).map_err(|_| too_large())?;
    let cols = u32::try_from(cols).map_err(|_| too_large())?;

    Ok((0..rows.saturating_sub(1))
        .map(|r| build_row_strip(r, cols, valid))
        .collect())
}

/// Walks columns of the row pair `(r, r + 1)`.
fn build_row_strip(r: u32, cols: u32, valid: &[bool]) -> TriangleStrip {
    let mut direction = Direction::Descending;
    let mut indices = Vec::with_capacity(cols as usize * 2);

    for c in 0..cols {
        let top = r * cols + c;
        let bottom = top + cols;

        let (first, second) = match direction {
            Direction::Descending => (top, bottom),
            Direction::Ascending => (bottom, top),
        };

        if valid[first as usize] {
            indices.push(first);
        }
        if valid[second as usize] {
            indices.push(second);
        } else {
            // Dropout: emit the other side first from here on.
            direction = match direction {
                Direction::Descending => Direction::Ascending,
                Direction::Ascending => Direction::Descending,
            };
        }
    }

    TriangleStrip::new(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(rows: usize, cols: usize, missing: &[usize]) -> Vec<bool> {
        (0..rows * cols).map(|i| !missing.contains(&i)).collect()
    }

    #[test]
    fn test_full_grid_zigzags() {
        let strips = build_strips(3, 3, &mask(3, 3, &[])).unwrap();
        assert_eq!(strips.len(), 2);
        assert_eq!(strips[0].indices(), &[0, 3, 1, 4, 2, 5]);
        assert_eq!(strips[1].indices(), &[3, 6, 4, 7, 5, 8]);
    }

    #[test]
    fn test_missing_top_keeps_direction() {
        let strips = build_strips(2, 3, &mask(2, 3, &[0])).unwrap();
        assert_eq!(strips[0].indices(), &[3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_bottom_dropout_flips_to_ascending() {
        // cols = 4, bottom of column 1 (index 5) missing.
        let strips = build_strips(2, 4, &mask(2, 4, &[5])).unwrap();
        assert_eq!(strips[0].indices(), &[0, 4, 1, 6, 2, 7, 3]);
    }

    #[test]
    fn test_top_dropout_flips_back_to_descending() {
        // cols = 5: bottom of column 1 (6) flips to ascending, top of
        // column 3 (3) flips back.
        let strips = build_strips(2, 5, &mask(2, 5, &[6, 3])).unwrap();
        assert_eq!(strips[0].indices(), &[0, 5, 1, 7, 2, 8, 4, 9]);
    }

    #[test]
    fn test_emitted_indices_are_valid() {
        let missing = [1, 7, 8, 12, 13, 19];
        let valid = mask(4, 5, &missing);
        for strip in build_strips(4, 5, &valid).unwrap() {
            assert!(strip.indices().iter().all(|i| valid[*i as usize]));
        }
    }

    #[test]
    fn test_degenerate_grids() {
        assert!(build_strips(0, 0, &[]).unwrap().is_empty());
        assert!(build_strips(1, 4, &mask(1, 4, &[])).unwrap().is_empty());
        let strips = build_strips(2, 1, &mask(2, 1, &[])).unwrap();
        assert_eq!(strips[0].indices(), &[0, 1]);
        assert_eq!(strips[0].triangle_count(), 0);
    }

    #[test]
    fn test_mask_length_must_match_grid() {
        assert!(matches!(
            build_strips(2, 3, &mask(2, 2, &[])),
            Err(MeshError::DimensionMismatch { expected: 6, actual: 4 })
        ));
    }

    #[test]
    fn test_grids_beyond_u32_indices_are_rejected() {
        // 2^17 x 2^16 cells is one bit past the u32 range; the check runs
        // before the mask is read, so no buffer is needed.
        assert!(matches!(
            build_strips(1 << 17, 1 << 16, &[]),
            Err(MeshError::Configuration { .. })
        ));
        assert!(matches!(
            build_strips(usize::MAX, 2, &[]),
            Err(MeshError::Configuration { .. })
        ));
    }

    #[test]
    fn test_all_missing_rows_give_empty_strips() {
        let strips = build_strips(3, 2, &mask(3, 2, &[0, 1, 2, 3, 4, 5])).unwrap();
        assert_eq!(strips.len(), 2);
        assert!(strips.iter().all(TriangleStrip::is_empty));
    }

    #[test]
    fn test_triangles_alternate_winding() {
        let strip = TriangleStrip::new(vec![0, 3, 1, 4, 2, 5]);
        assert_eq!(strip.triangle_count(), 4);
        assert_eq!(
            strip.triangles(),
            vec![[0, 3, 1], [1, 3, 4], [1, 4, 2], [2, 4, 5]]
        );
    }

    #[test]
    fn test_triangles_drop_repeated_vertices() {
        let strip = TriangleStrip::new(vec![0, 1, 1, 2]);
        assert!(strip.triangles().is_empty());
    }
}
