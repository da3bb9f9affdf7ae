//! # Bounds
//!
//! Axis-aligned bounding boxes and bounding spheres grown over valid points
//! only.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::MeshError;
use crate::field::PointField;

/// Axis-aligned bounding box. Starts empty and grows point by point.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use pointcloud_mesh::BoundingBox;
///
/// let mut bbox = BoundingBox::empty();
/// assert!(bbox.is_empty());
/// bbox.grow(DVec3::new(-1.0, 0.0, 2.0));
/// bbox.grow(DVec3::new(3.0, 4.0, 2.0));
/// assert_eq!(bbox.midpoint(), Some(DVec3::new(1.0, 2.0, 2.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: DVec3,
    max: DVec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Creates an empty box (min at +inf, max at -inf).
    pub fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Builds the box enclosing every point yielded by `points`.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Self {
        points.into_iter().fold(Self::empty(), |mut bbox, p| {
            bbox.grow(p);
            bbox
        })
    }

    /// Returns true if no point has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Extends the box to contain `point`.
    #[inline]
    pub fn grow(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Minimum corner, or `None` for an empty box.
    pub fn min(&self) -> Option<DVec3> {
        (!self.is_empty()).then_some(self.min)
    }

    /// Maximum corner, or `None` for an empty box.
    pub fn max(&self) -> Option<DVec3> {
        (!self.is_empty()).then_some(self.max)
    }

    /// Center of the box, or `None` for an empty box.
    pub fn midpoint(&self) -> Option<DVec3> {
        (!self.is_empty()).then(|| (self.min + self.max) / 2.0)
    }

    /// Size along each axis, or `None` for an empty box.
    pub fn extent(&self) -> Option<DVec3> {
        (!self.is_empty()).then(|| self.max - self.min)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(empty)");
        }
        write!(
            f,
            "({}, {}, {}) -> ({}, {}, {})",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

/// Sphere enclosing a bounding box: centered on the box, radius is half the
/// diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// Sphere center.
    pub center: DVec3,
    /// Sphere radius.
    pub radius: f64,
}

impl BoundingSphere {
    /// Sphere around `bbox`, or `None` when the box is empty.
    pub fn from_box(bbox: &BoundingBox) -> Option<Self> {
        let center = bbox.midpoint()?;
        let extent = bbox.extent()?;
        Some(Self {
            center,
            radius: extent.length() / 2.0,
        })
    }
}

/// Bounding box of every valid cell of the full-resolution field.
///
/// Missing cells are skipped. The box is empty when no cell is valid.
pub fn bounding_box(field: &PointField) -> BoundingBox {
    BoundingBox::from_points(field.valid_points())
}

/// Like [`bounding_box`], but fails on a field without valid points.
pub fn require_bounding_box(field: &PointField) -> Result<BoundingBox, MeshError> {
    let bbox = bounding_box(field);
    if bbox.is_empty() {
        return Err(MeshError::degenerate(format!(
            "no valid points in {}x{} field",
            field.rows(),
            field.cols()
        )));
    }
    Ok(bbox)
}
