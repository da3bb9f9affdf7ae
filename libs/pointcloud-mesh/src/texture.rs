//! # Draped Texture Planning
//!
//! Decisions about an optional photographic texture, plus the file naming
//! conventions shared with the I/O layer. No pixels are touched here; the
//! raster collaborator performs the resampling this module plans.

use std::path::{Path, PathBuf};

use config::constants::{MAX_TEXTURE_DIMENSION, POINT_CLOUD_SUFFIX, TEXTURE_FILE_TYPE, TEXTURE_SUFFIX};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Size of a texture raster in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterSize {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl RasterSize {
    /// Creates a size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// What the raster collaborator should do with the draped texture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RasterPlan {
    /// Rewrite as 8-bit at the original size.
    Normalize {
        /// Output size.
        size: RasterSize,
    },
    /// Resample by `scale` so the larger side fits the texture limit.
    Resample {
        /// Uniform scale factor.
        scale: f64,
        /// Output size.
        size: RasterSize,
    },
}

impl RasterPlan {
    /// Size of the raster after the plan is carried out.
    pub fn output_size(&self) -> RasterSize {
        match self {
            RasterPlan::Normalize { size } | RasterPlan::Resample { size, .. } => *size,
        }
    }
}

/// Plans the draped texture for a point field of `field_cols` x `field_rows`.
///
/// The point field size, not the raster size, decides whether resampling is
/// needed: anything over the texture limit in either dimension resamples.
/// The scale brings the raster's larger side down to the limit.
///
/// # Example
///
/// ```rust
/// use pointcloud_mesh::texture::{plan_texture, RasterPlan, RasterSize};
///
/// let plan = plan_texture(8192, 1024, RasterSize::new(8192, 1024));
/// assert_eq!(plan.output_size(), RasterSize::new(4096, 512));
/// assert!(matches!(plan, RasterPlan::Resample { .. }));
/// ```
pub fn plan_texture(field_cols: usize, field_rows: usize, raster: RasterSize) -> RasterPlan {
    let limit = MAX_TEXTURE_DIMENSION;
    let larger = raster.width.max(raster.height);

    if (field_cols > limit || field_rows > limit) && larger > 0 {
        let scale = limit as f64 / larger as f64;
        let size = RasterSize::new(
            (raster.width as f64 * scale).round() as usize,
            (raster.height as f64 * scale).round() as usize,
        );
        info!(scale, width = size.width, height = size.height, "resampling to reduce texture size");
        RasterPlan::Resample { scale, size }
    } else {
        RasterPlan::Normalize { size: raster }
    }
}

// =============================================================================
// NAMING
// =============================================================================

/// Strips the point cloud suffix from a file name.
///
/// `<prefix>-PC.<ext>` becomes `<prefix>`; otherwise the last `.<ext>` is
/// removed; a name without a dot is returned unchanged.
///
/// # Example
///
/// ```rust
/// use pointcloud_mesh::texture::prefix_from_pointcloud_filename;
///
/// assert_eq!(prefix_from_pointcloud_filename("run/site-PC.tif"), "run/site");
/// assert_eq!(prefix_from_pointcloud_filename("run/site.tif"), "run/site");
/// assert_eq!(prefix_from_pointcloud_filename("site"), "site");
/// ```
pub fn prefix_from_pointcloud_filename(filename: &str) -> &str {
    if let Some(index) = filename.rfind(POINT_CLOUD_SUFFIX) {
        return &filename[..index];
    }
    match filename.rfind('.') {
        Some(index) => &filename[..index],
        None => filename,
    }
}

/// Prefix used for the normalized or resampled copy of a draped texture.
pub fn texture_prefix(texture_filename: &str) -> String {
    format!("{}{}", prefix_from_pointcloud_filename(texture_filename), TEXTURE_SUFFIX)
}

/// Path of the processed texture the consumer loads: `<prefix>-tex.jpg`.
///
/// # Example
///
/// ```rust
/// use std::path::PathBuf;
/// use pointcloud_mesh::texture::processed_texture_path;
///
/// assert_eq!(processed_texture_path("run/ortho.tif"), PathBuf::from("run/ortho-tex.jpg"));
/// ```
pub fn processed_texture_path(texture_filename: &str) -> PathBuf {
    output_path(texture_prefix(texture_filename), TEXTURE_FILE_TYPE)
}

/// Output path `<prefix>.<file_type>`.
pub fn output_path(prefix: impl AsRef<Path>, file_type: &str) -> PathBuf {
    let mut path = prefix.as_ref().as_os_str().to_owned();
    path.push(".");
    path.push(file_type);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_field_normalizes() {
        let plan = plan_texture(4096, 4096, RasterSize::new(5000, 5000));
        assert_eq!(plan, RasterPlan::Normalize { size: RasterSize::new(5000, 5000) });
    }

    #[test]
    fn test_tall_field_resamples() {
        let plan = plan_texture(100, 4097, RasterSize::new(2000, 10000));
        match plan {
            RasterPlan::Resample { scale, size } => {
                assert!((scale - 0.4096).abs() < 1e-12);
                assert_eq!(size, RasterSize::new(819, 4096));
            }
            other => panic!("expected resample, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_raster_is_not_resampled() {
        let plan = plan_texture(10_000, 10_000, RasterSize::new(0, 0));
        assert_eq!(plan.output_size(), RasterSize::new(0, 0));
    }

    #[test]
    fn test_prefix_prefers_point_cloud_suffix() {
        assert_eq!(prefix_from_pointcloud_filename("a.b-PC.tif"), "a.b");
        assert_eq!(prefix_from_pointcloud_filename("dir.v2/file"), "dir");
    }

    #[test]
    fn test_texture_prefix() {
        assert_eq!(texture_prefix("left-image.tif"), "left-image-tex");
    }

    #[test]
    fn test_processed_texture_path_drops_point_cloud_suffix() {
        assert_eq!(processed_texture_path("site-PC.tif"), PathBuf::from("site-tex.jpg"));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(output_path("run/site", "ive"), PathBuf::from("run/site.ive"));
    }
}
