//! # Point Field
//!
//! Dense 2D grid of 3D points with an explicit validity mask, plus the
//! strided sampler the mesher walks.
//!
//! A cell loaded from raw data is missing when its coordinate is the zero
//! vector. That test is applied once, when the field is built; afterwards
//! validity lives in the mask, so a valid point moved onto the origin by a
//! transform stays valid.

use config::constants::ConfigError;
use glam::DVec3;

use crate::error::MeshError;

/// Returns true when a raw point is the "no data" sentinel.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use pointcloud_mesh::field::is_missing;
///
/// assert!(is_missing(DVec3::ZERO));
/// assert!(!is_missing(DVec3::new(0.0, 0.0, 1.0)));
/// ```
#[inline]
pub fn is_missing(point: DVec3) -> bool {
    point == DVec3::ZERO
}

/// Random-access provider of raw grid points.
///
/// Implemented by whatever backs the point cloud (a decoded raster, a tiled
/// reader, a test fixture). The core only needs the grid shape and per-cell
/// access.
pub trait PointSource {
    /// Number of rows in the grid.
    fn rows(&self) -> usize;
    /// Number of columns in the grid.
    fn cols(&self) -> usize;
    /// Raw point stored at `(row, col)`. The zero vector marks missing data.
    fn point_at(&self, row: usize, col: usize) -> DVec3;
}

// =============================================================================
// POINT FIELD
// =============================================================================

/// Row-major grid of points with a parallel validity mask.
///
/// Invalid cells always hold [`DVec3::ZERO`].
#[derive(Debug, Clone, PartialEq)]
pub struct PointField {
    rows: usize,
    cols: usize,
    points: Vec<DVec3>,
    valid: Vec<bool>,
}

/// Number of cells in a `rows` x `cols` grid.
fn grid_len(rows: usize, cols: usize) -> Result<usize, MeshError> {
    rows.checked_mul(cols)
        .ok_or_else(|| MeshError::configuration(format!("grid {rows}x{cols} is too large")))
}

impl PointField {
    /// Builds a field from raw row-major points, deriving validity from the
    /// zero-vector sentinel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use pointcloud_mesh::PointField;
    ///
    /// let field = PointField::from_points(1, 2, vec![DVec3::ZERO, DVec3::ONE]).unwrap();
    /// assert!(!field.is_valid(0, 0));
    /// assert!(field.is_valid(0, 1));
    /// ```
    pub fn from_points(rows: usize, cols: usize, points: Vec<DVec3>) -> Result<Self, MeshError> {
        let valid = points.iter().map(|p| !is_missing(*p)).collect();
        Self::with_mask(rows, cols, points, valid)
    }

    /// Builds a field from row-major points and an explicit validity mask.
    ///
    /// Points whose mask entry is false are stored as the zero vector.
    pub fn with_mask(
        rows: usize,
        cols: usize,
        mut points: Vec<DVec3>,
        valid: Vec<bool>,
    ) -> Result<Self, MeshError> {
        let expected = grid_len(rows, cols)?;
        if points.len() != expected {
            return Err(MeshError::DimensionMismatch {
                expected,
                actual: points.len(),
            });
        }
        if valid.len() != expected {
            return Err(MeshError::DimensionMismatch {
                expected,
                actual: valid.len(),
            });
        }

        for (point, ok) in points.iter_mut().zip(&valid) {
            if !ok {
                *point = DVec3::ZERO;
            }
        }

        Ok(Self {
            rows,
            cols,
            points,
            valid,
        })
    }

    /// Builds a field cell by cell. `None` marks a missing cell; `Some` is
    /// valid even when it holds the origin.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Option<DVec3>) -> Self {
        let capacity = rows.checked_mul(cols).unwrap_or(0);
        let mut points = Vec::with_capacity(capacity);
        let mut valid = Vec::with_capacity(capacity);
        for row in 0..rows {
            for col in 0..cols {
                match f(row, col) {
                    Some(p) => {
                        points.push(p);
                        valid.push(true);
                    }
                    None => {
                        points.push(DVec3::ZERO);
                        valid.push(false);
                    }
                }
            }
        }
        Self {
            rows,
            cols,
            points,
            valid,
        }
    }

    /// Copies every cell of a [`PointSource`], applying the sentinel test.
    pub fn from_source(source: &impl PointSource) -> Self {
        Self::from_fn(source.rows(), source.cols(), |row, col| {
            let p = source.point_at(row, col);
            (!is_missing(p)).then_some(p)
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Raw point at `(row, col)`. Missing cells read as the zero vector.
    ///
    /// Panics if the position is outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> DVec3 {
        self.points[self.offset(row, col)]
    }

    /// Whether `(row, col)` holds data.
    #[inline]
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.valid[self.offset(row, col)]
    }

    /// Point at `(row, col)` if it holds data.
    #[inline]
    pub fn point(&self, row: usize, col: usize) -> Option<DVec3> {
        let offset = self.offset(row, col);
        self.valid[offset].then(|| self.points[offset])
    }

    /// Row-major raw points, missing cells included.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Row-major validity mask.
    #[inline]
    pub fn mask(&self) -> &[bool] {
        &self.valid
    }

    /// Iterates over the valid points in row-major order.
    pub fn valid_points(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.points
            .iter()
            .zip(&self.valid)
            .filter_map(|(p, ok)| ok.then_some(*p))
    }

    /// Number of valid cells.
    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|ok| **ok).count()
    }

    /// Produces a new field with `f` applied to every valid point.
    ///
    /// Missing cells pass through untouched and the mask is copied verbatim.
    pub fn map_valid(&self, f: impl Fn(DVec3) -> DVec3) -> Self {
        let points = self
            .points
            .iter()
            .zip(&self.valid)
            .map(|(p, ok)| if *ok { f(*p) } else { *p })
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            points,
            valid: self.valid.clone(),
        }
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols, "({row}, {col}) outside grid");
        row * self.cols + col
    }
}

impl PointSource for PointField {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn point_at(&self, row: usize, col: usize) -> DVec3 {
        self.get(row, col)
    }
}

// =============================================================================
// GRID SAMPLER
// =============================================================================

/// Strided view over a [`PointField`].
///
/// Sample `(r, c)` reads the raw cell `(r * step, c * step)`. The sampled
/// grid is `rows / step` by `cols / step`; a trailing partial stride of rows
/// or columns is dropped.
#[derive(Debug, Clone, Copy)]
pub struct GridSampler<'a> {
    field: &'a PointField,
    step: usize,
    rows: usize,
    cols: usize,
}

impl<'a> GridSampler<'a> {
    /// Creates a sampler, rejecting a zero stride.
    pub fn new(field: &'a PointField, step: usize) -> Result<Self, MeshError> {
        if step == 0 {
            return Err(ConfigError::InvalidStep(step).into());
        }
        Ok(Self {
            field,
            step,
            rows: field.rows() / step,
            cols: field.cols() / step,
        })
    }

    /// Underlying field.
    #[inline]
    pub fn field(&self) -> &'a PointField {
        self.field
    }

    /// Sampling stride.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of sampled rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of sampled columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of sampled positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns true if the sampled grid is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw cell position `(row, col)` of sample `(r, c)`.
    #[inline]
    pub fn source_position(&self, r: usize, c: usize) -> (usize, usize) {
        (r * self.step, c * self.step)
    }

    /// Raw point of sample `(r, c)`.
    #[inline]
    pub fn sample(&self, r: usize, c: usize) -> DVec3 {
        let (row, col) = self.source_position(r, c);
        self.field.get(row, col)
    }

    /// Whether sample `(r, c)` holds data.
    #[inline]
    pub fn is_valid(&self, r: usize, c: usize) -> bool {
        let (row, col) = self.source_position(r, c);
        self.field.is_valid(row, col)
    }

    /// Vertex index of sample `(r, c)`: `r * cols + c`.
    #[inline]
    pub fn index(&self, r: usize, c: usize) -> usize {
        r * self.cols + c
    }
}
