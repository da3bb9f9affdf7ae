//! # Pipeline
//!
//! End-to-end conversion of a loaded point field into the scene handed to
//! the export layer.
//!
//! ```text
//! PointField -> [center] -> [rotate] -> build_mesh -> Scene
//!                                            |
//!                        texture plan  <-----+-----> gradient TextureSpec
//! ```
//!
//! Smoothing, simplification, optimization and file export are requested
//! through [`PostProcessRequest`] and carried out by the consumer.

use std::path::PathBuf;

use config::constants::{GridConfig, DEFAULT_OUTPUT_FILE_TYPE, DEFAULT_STEP_SIZE};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::builder::{build_mesh_with_progress, BuildMode, SurfaceMode};
use crate::error::MeshError;
use crate::field::PointField;
use crate::gradient::{describe_for_sphere, TextureSpec};
use crate::mesh::Mesh;
use crate::progress::{NoProgress, Progress};
use crate::texture::{
    output_path, plan_texture, prefix_from_pointcloud_filename, processed_texture_path, RasterPlan,
    RasterSize,
};
use crate::transform::{center, rotate, RotationSpec};

// =============================================================================
// OPTIONS
// =============================================================================

/// Draped texture supplied alongside the point cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSource {
    /// File name of the raster, used to derive output names.
    pub filename: String,
    /// Raster size in pixels.
    pub size: RasterSize,
}

/// Meshing options.
///
/// # Example
///
/// ```rust
/// use pointcloud_mesh::MeshOptions;
///
/// let options = MeshOptions { step: 2, enable_lighting: true, ..Default::default() };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    /// Sampling stride.
    pub step: usize,
    /// Center the model on the origin before meshing.
    pub center: bool,
    /// Compute normals and leave lighting on.
    pub enable_lighting: bool,
    /// Rotation applied before meshing (skipped when all angles are zero).
    pub rotation: RotationSpec,
    /// Optional draped texture.
    pub texture: Option<TextureSource>,
    /// Ask the consumer to smooth the mesh.
    pub smooth_mesh: bool,
    /// Ask the consumer to simplify the mesh to this sample ratio.
    /// A ratio of `0.0` means "simplify with the default ratio of 1.0".
    pub simplify_ratio: Option<f32>,
    /// File type the exporter should write.
    pub output_file_type: String,
    /// Point cloud file the field was loaded from.
    pub pointcloud_filename: Option<String>,
    /// Output prefix. Defaults to the point cloud file name without its suffix.
    pub output_prefix: Option<String>,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP_SIZE,
            center: false,
            enable_lighting: false,
            rotation: RotationSpec::default(),
            texture: None,
            smooth_mesh: false,
            simplify_ratio: None,
            output_file_type: DEFAULT_OUTPUT_FILE_TYPE.to_string(),
            pointcloud_filename: None,
            output_prefix: None,
        }
    }
}

impl MeshOptions {
    /// Checks stride, rotation order and simplification ratio.
    pub fn validate(&self) -> Result<(), MeshError> {
        GridConfig::new(self.step, &self.rotation.order.to_string())?;
        if let Some(ratio) = self.simplify_ratio {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(MeshError::configuration(format!(
                    "simplify ratio must be within [0, 1]: {ratio}"
                )));
            }
        }
        Ok(())
    }

    /// Explicit output prefix, else the one derived from the point cloud name.
    pub fn resolved_output_prefix(&self) -> Option<String> {
        self.output_prefix.clone().or_else(|| {
            self.pointcloud_filename
                .as_deref()
                .map(|name| prefix_from_pointcloud_filename(name).to_string())
        })
    }

    /// Build mode implied by these options.
    pub fn build_mode(&self) -> BuildMode {
        BuildMode {
            surface: if self.texture.is_some() {
                SurfaceMode::Textured
            } else {
                SurfaceMode::GradientColored
            },
            lighting: self.enable_lighting,
        }
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// Scene-level render switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderState {
    /// Lighting stays on only when normals were requested.
    pub lighting: bool,
    /// Alpha blending.
    pub blend: bool,
}

/// Post-processing the consumer should run before export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostProcessRequest {
    /// Run a smoothing pass.
    pub smooth: bool,
    /// Run a simplifier with this sample ratio.
    pub simplify_ratio: Option<f32>,
    /// File type to export.
    pub output_file_type: String,
    /// `<prefix>.<file_type>`, when a prefix is known.
    pub output_path: Option<PathBuf>,
}

/// How the mesh is colored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Coloring {
    /// Draped photographic texture.
    Draped {
        /// Raster supplied by the caller.
        source: String,
        /// Processed texture the consumer should load.
        texture: PathBuf,
        /// What to do with the source raster to produce `texture`.
        plan: RasterPlan,
    },
    /// Gradient ramp along the dominant direction.
    Gradient(TextureSpec),
}

/// Everything produced for one point field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Generated mesh.
    pub mesh: Mesh,
    /// Coloring for the mesh.
    pub coloring: Coloring,
    /// Scene-level render switches.
    pub render_state: RenderState,
    /// Offset applied by centering, if centering was requested.
    pub centering_offset: Option<DVec3>,
    /// Requested post-processing.
    pub post_process: PostProcessRequest,
}

/// Runs the full pipeline on `field`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use pointcloud_mesh::{generate, Coloring, MeshOptions, PointField};
///
/// let field = PointField::from_fn(20, 20, |r, c| Some(DVec3::new(c as f64, r as f64, 3.0)));
/// let scene = generate(&field, &MeshOptions::default()).unwrap();
/// assert_eq!(scene.mesh.vertex_count(), 4);
/// assert!(matches!(scene.coloring, Coloring::Gradient(_)));
/// ```
pub fn generate(field: &PointField, options: &MeshOptions) -> Result<Scene, MeshError> {
    generate_with_progress(field, options, &mut NoProgress)
}

/// Like [`generate`], reporting vertex scan progress to `progress`.
pub fn generate_with_progress(
    field: &PointField,
    options: &MeshOptions,
    progress: &mut dyn Progress,
) -> Result<Scene, MeshError> {
    options.validate()?;

    let mut centering_offset = None;
    let centered;
    let mut current = field;
    if options.center {
        let (shifted, offset) = center(current)?;
        centered = shifted;
        current = &centered;
        centering_offset = Some(offset);
    }

    let rotated;
    if !options.rotation.is_identity() {
        rotated = rotate(current, &options.rotation);
        current = &rotated;
    }

    let output = build_mesh_with_progress(current, options.step, options.build_mode(), progress)?;
    let mesh = output.mesh;

    let coloring = match (&options.texture, output.direction) {
        (Some(texture), _) => {
            info!(filename = %texture.filename, "attaching texture data");
            Coloring::Draped {
                source: texture.filename.clone(),
                texture: processed_texture_path(&texture.filename),
                plan: plan_texture(current.cols(), current.rows(), texture.size),
            }
        }
        (None, direction) => {
            info!("adding contour coloring");
            let direction = direction.unwrap_or(DVec3::ZERO);
            let sphere = mesh.bounding_sphere();
            if sphere.is_none() {
                warn!("mesh has no valid vertices, gradient base defaults to zero");
            }
            Coloring::Gradient(describe_for_sphere(direction, sphere.as_ref()))
        }
    };

    let post_process = PostProcessRequest {
        smooth: options.smooth_mesh,
        simplify_ratio: options
            .simplify_ratio
            .map(|ratio| if ratio == 0.0 { 1.0 } else { ratio }),
        output_file_type: options.output_file_type.clone(),
        output_path: options
            .resolved_output_prefix()
            .map(|prefix| output_path(prefix, &options.output_file_type)),
    };

    Ok(Scene {
        mesh,
        coloring,
        render_state: RenderState {
            lighting: options.enable_lighting,
            blend: true,
        },
        centering_offset,
        post_process,
    })
}
