//! # Gradient Texture
//!
//! Describes the 1D color ramp applied when no photographic texture is
//! draped over the mesh.
//!
//! The renderer generates the texture coordinate per vertex from a plane:
//!
//! ```text
//! s = k*d.x*x + k*d.y*y + k*d.z*z - (center.z - radius)
//! ```
//!
//! with `k = 0.04`, `d` the dominant surface direction, and the bounding
//! sphere of the mesh providing `center` and `radius`. The ramp is two-tone:
//! the first 20% of texels use the low color, the rest the high color.

use config::constants::{
    GRADIENT_HIGH_COLOR, GRADIENT_LOW_COLOR, GRADIENT_RAMP_SAMPLES, GRADIENT_RAMP_SPLIT,
    GRADIENT_TEXGEN_SCALE,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bounds::BoundingSphere;

// =============================================================================
// RAMP
// =============================================================================

/// RGBA texels of a 1D texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    texels: Vec<[f32; 4]>,
}

impl ColorRamp {
    /// Two-tone ramp: `[0, split)` gets `low`, `[split, len)` gets `high`.
    pub fn two_tone(len: usize, split: usize, low: [f32; 4], high: [f32; 4]) -> Self {
        let split = split.min(len);
        let mut texels = vec![low; split];
        texels.resize(len, high);
        Self { texels }
    }

    /// Number of texels.
    #[inline]
    pub fn len(&self) -> usize {
        self.texels.len()
    }

    /// Returns true if the ramp has no texels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.texels.is_empty()
    }

    /// RGBA texels.
    #[inline]
    pub fn texels(&self) -> &[[f32; 4]] {
        &self.texels
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::two_tone(
            GRADIENT_RAMP_SAMPLES,
            GRADIENT_RAMP_SPLIT,
            GRADIENT_LOW_COLOR,
            GRADIENT_HIGH_COLOR,
        )
    }
}

// =============================================================================
// SAMPLER STATE
// =============================================================================

/// Texture wrap mode along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    /// Clamp to the edge texel.
    Clamp,
    /// Repeat the texture.
    Repeat,
    /// Repeat, mirroring every other copy.
    Mirror,
}

/// Texture minification/magnification filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    /// Nearest texel.
    Nearest,
    /// Linear interpolation between texels.
    Linear,
}

/// Sampler settings for the ramp texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerState {
    /// Wrap along `s`.
    pub wrap_s: WrapMode,
    /// Minification filter.
    pub min_filter: FilterMode,
    /// Magnification filter.
    pub mag_filter: FilterMode,
}

impl Default for SamplerState {
    fn default() -> Self {
        Self {
            wrap_s: WrapMode::Mirror,
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
        }
    }
}

// =============================================================================
// TEXGEN PLANE
// =============================================================================

/// Object-linear texture coordinate plane: `s = coefficients . p + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TexGenPlane {
    /// Per-axis coefficients.
    pub coefficients: DVec3,
    /// Constant term.
    pub offset: f64,
}

impl TexGenPlane {
    /// Texture coordinate of `point`.
    #[inline]
    pub fn evaluate(&self, point: DVec3) -> f64 {
        self.coefficients.dot(point) + self.offset
    }
}

// =============================================================================
// TEXTURE SPEC
// =============================================================================

/// Everything a renderer needs to apply the gradient coloring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSpec {
    /// Dominant direction the gradient runs along.
    pub direction: DVec3,
    /// Texel data.
    pub ramp: ColorRamp,
    /// Coordinate generation plane.
    pub plane: TexGenPlane,
    /// Sampler settings.
    pub sampler: SamplerState,
}

/// Describes the gradient texture for a surface.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use pointcloud_mesh::gradient::describe;
///
/// let spec = describe(DVec3::Z, 10.0, 4.0);
/// assert_eq!(spec.ramp.len(), 1000);
/// // s = 0.04 * z - 6
/// assert!((spec.plane.evaluate(DVec3::new(0.0, 0.0, 150.0)) - 0.0).abs() < 1e-12);
/// ```
pub fn describe(direction: DVec3, center_z: f64, radius: f64) -> TextureSpec {
    info!(?direction, "direction vector being used for gradient coloring");
    let base = center_z - radius;
    TextureSpec {
        direction,
        ramp: ColorRamp::default(),
        plane: TexGenPlane {
            coefficients: direction * GRADIENT_TEXGEN_SCALE,
            offset: -base,
        },
        sampler: SamplerState::default(),
    }
}

/// [`describe`] using a bounding sphere; a missing sphere yields base zero.
pub fn describe_for_sphere(direction: DVec3, sphere: Option<&BoundingSphere>) -> TextureSpec {
    match sphere {
        Some(sphere) => describe(direction, sphere.center.z, sphere.radius),
        None => describe(direction, 0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ramp_split() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.len(), 1000);
        assert!(ramp.texels()[..200].iter().all(|t| *t == GRADIENT_LOW_COLOR));
        assert!(ramp.texels()[200..].iter().all(|t| *t == GRADIENT_HIGH_COLOR));
    }

    #[test]
    fn test_two_tone_clamps_split() {
        let ramp = ColorRamp::two_tone(3, 10, [1.0; 4], [0.0; 4]);
        assert_eq!(ramp.texels(), &[[1.0; 4]; 3]);
    }

    #[test]
    fn test_plane_coefficients() {
        let direction = DVec3::new(0.6, 0.0, 0.8);
        let spec = describe(direction, 5.0, 2.0);
        assert_abs_diff_eq!(spec.plane.coefficients.x, 0.024, epsilon = 1e-12);
        assert_abs_diff_eq!(spec.plane.coefficients.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spec.plane.coefficients.z, 0.032, epsilon = 1e-12);
        assert_abs_diff_eq!(spec.plane.offset, -3.0, epsilon = 1e-12);
        let s = spec.plane.evaluate(DVec3::new(10.0, 3.0, 20.0));
        assert_abs_diff_eq!(s, 0.24 + 0.64 - 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sampler_state() {
        let spec = describe(DVec3::Z, 0.0, 1.0);
        assert_eq!(spec.sampler.wrap_s, WrapMode::Mirror);
        assert_eq!(spec.sampler.min_filter, FilterMode::Linear);
        assert_eq!(spec.sampler.mag_filter, FilterMode::Linear);
    }

    #[test]
    fn test_describe_for_sphere() {
        let sphere = BoundingSphere {
            center: DVec3::new(0.0, 0.0, 7.0),
            radius: 2.0,
        };
        let spec = describe_for_sphere(DVec3::Z, Some(&sphere));
        assert_abs_diff_eq!(spec.plane.offset, -5.0, epsilon = 1e-12);
        assert_eq!(describe_for_sphere(DVec3::Z, None).plane.offset, 0.0);
    }
}
