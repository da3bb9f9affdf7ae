//! # Point Transforms
//!
//! Rigid-body transforms over a [`PointField`]. Every transform returns a new
//! field; missing cells stay zero and the validity mask is copied as is.
//!
//! ## Euler convention
//!
//! A [`RotationSpec`] holds three angles in radians and an axis order such as
//! `"xyz"`. Each rotation is active and right-handed. `phi` turns about
//! `order[0]` and is applied first, then `omega` about `order[1]`, then
//! `kappa` about `order[2]`:
//!
//! ```text
//! R = R(order[2], kappa) * R(order[1], omega) * R(order[0], phi)
//! ```

use std::fmt;
use std::str::FromStr;

use config::constants::is_valid_rotation_order;
use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bounds::{bounding_box, require_bounding_box};
use crate::error::MeshError;
use crate::field::PointField;

// =============================================================================
// ROTATION ORDER
// =============================================================================

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }

    /// Active right-handed rotation of `angle` radians about this axis.
    pub fn rotation(self, angle: f64) -> DMat3 {
        match self {
            Axis::X => DMat3::from_rotation_x(angle),
            Axis::Y => DMat3::from_rotation_y(angle),
            Axis::Z => DMat3::from_rotation_z(angle),
        }
    }

    fn as_char(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

/// Order in which the three Euler angles are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RotationOrder([Axis; 3]);

impl RotationOrder {
    /// Builds an order from explicit axes.
    pub fn new(axes: [Axis; 3]) -> Self {
        Self(axes)
    }

    /// Axes in application order.
    pub fn axes(&self) -> [Axis; 3] {
        self.0
    }
}

impl Default for RotationOrder {
    fn default() -> Self {
        Self([Axis::X, Axis::Y, Axis::Z])
    }
}

impl FromStr for RotationOrder {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid_rotation_order(s) {
            return Err(MeshError::configuration(format!(
                "unrecognized rotation order {s:?}, expected three of x, y, z"
            )));
        }
        let mut axes = [Axis::X; 3];
        for (slot, c) in axes.iter_mut().zip(s.chars()) {
            *slot = Axis::from_char(c)
                .ok_or_else(|| MeshError::configuration(format!("unknown axis {c:?}")))?;
        }
        Ok(Self(axes))
    }
}

impl TryFrom<String> for RotationOrder {
    type Error = MeshError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RotationOrder> for String {
    fn from(order: RotationOrder) -> Self {
        order.to_string()
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|axis| write!(f, "{}", axis.as_char()))
    }
}

// =============================================================================
// ROTATION SPEC
// =============================================================================

/// Three Euler angles (radians) plus the order they are applied in.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use pointcloud_mesh::transform::RotationSpec;
///
/// let spec = RotationSpec::from_degrees(0.0, 0.0, 90.0, "xyz").unwrap();
/// let p = spec.matrix() * DVec3::X;
/// assert!((p - DVec3::Y).length() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationSpec {
    /// Angle about the first axis.
    pub phi: f64,
    /// Angle about the second axis.
    pub omega: f64,
    /// Angle about the third axis.
    pub kappa: f64,
    /// Axis order.
    pub order: RotationOrder,
}

impl Default for RotationSpec {
    fn default() -> Self {
        Self {
            phi: 0.0,
            omega: 0.0,
            kappa: 0.0,
            order: RotationOrder::default(),
        }
    }
}

impl RotationSpec {
    /// Builds a spec from radians and an axis order string.
    pub fn new(phi: f64, omega: f64, kappa: f64, order: &str) -> Result<Self, MeshError> {
        Ok(Self {
            phi,
            omega,
            kappa,
            order: order.parse()?,
        })
    }

    /// Builds a spec from degrees and an axis order string.
    pub fn from_degrees(phi: f64, omega: f64, kappa: f64, order: &str) -> Result<Self, MeshError> {
        Self::new(phi.to_radians(), omega.to_radians(), kappa.to_radians(), order)
    }

    /// The identity rotation in the default order.
    pub fn identity() -> Self {
        Self::default()
    }

    /// True when every angle is exactly zero.
    pub fn is_identity(&self) -> bool {
        self.phi == 0.0 && self.omega == 0.0 && self.kappa == 0.0
    }

    /// Composed 3x3 rotation matrix.
    pub fn matrix(&self) -> DMat3 {
        let [first, second, third] = self.order.axes();
        third.rotation(self.kappa) * second.rotation(self.omega) * first.rotation(self.phi)
    }

    /// Rotation that undoes this one.
    pub fn inverse_matrix(&self) -> DMat3 {
        self.matrix().transpose()
    }
}

// =============================================================================
// FIELD TRANSFORMS
// =============================================================================

/// Multiplies every valid point by `matrix`.
pub fn apply_matrix(field: &PointField, matrix: DMat3) -> PointField {
    field.map_valid(|p| matrix * p)
}

/// Rotates every valid point by the composed Euler rotation.
pub fn rotate(field: &PointField, spec: &RotationSpec) -> PointField {
    info!(
        order = %spec.order,
        phi = spec.phi,
        omega = spec.omega,
        kappa = spec.kappa,
        "applying rotation sequence"
    );
    apply_matrix(field, spec.matrix())
}

/// Adds `offset` to every valid point.
pub fn translate(field: &PointField, offset: DVec3) -> PointField {
    field.map_valid(|p| p + offset)
}

/// Offset that moves the bounding box midpoint of `field` to the origin.
pub fn centering_offset(field: &PointField) -> Result<DVec3, MeshError> {
    let bbox = require_bounding_box(field)?;
    let midpoint = bbox
        .midpoint()
        .ok_or_else(|| MeshError::degenerate("bounding box has no midpoint"))?;
    debug!(%bbox, ?midpoint, "initial point field bounding box");
    Ok(-midpoint)
}

/// Translates `field` so its bounding box is centered on the origin.
///
/// Returns the shifted field and the offset that was applied. Fails with
/// [`MeshError::DegenerateInput`] if the field has no valid points.
pub fn center(field: &PointField) -> Result<(PointField, DVec3), MeshError> {
    let offset = centering_offset(field)?;
    info!(?offset, "centering model around the origin");
    let centered = translate(field, offset);
    debug!(bbox = %bounding_box(&centered), "re-centered point field bounding box");
    Ok((centered, offset))
}

#[cfg(test)]
mod tests;
