//! # Configuration Constants
//!
//! Centralized constants for the point cloud meshing pipeline.
//!
//! ## Categories
//!
//! - **Sampling**: Grid stride and rotation defaults
//! - **Texture**: Raster size limits and gradient ramp layout
//! - **Color**: Overall mesh color and ramp colors
//! - **Output**: Naming conventions for produced artifacts

use std::fmt;

// =============================================================================
// SAMPLING CONSTANTS
// =============================================================================

/// Default sampling stride applied to rows and columns of the point grid.
///
/// Larger strides produce coarser meshes. Only grid positions that are
/// multiples of the stride in both axes are visited.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_STEP_SIZE;
///
/// let sampled_cols = 1024 / DEFAULT_STEP_SIZE;
/// assert_eq!(sampled_cols, 102);
/// ```
pub const DEFAULT_STEP_SIZE: usize = 10;

/// Default Euler-angle axis order.
///
/// The first angle (phi) rotates about the first axis, and is applied first.
pub const DEFAULT_ROTATION_ORDER: &str = "xyz";

/// Characters accepted in a rotation order string.
pub const ROTATION_AXES: &str = "xyzXYZ";

// =============================================================================
// TEXTURE CONSTANTS
// =============================================================================

/// Largest texture width or height handed to the renderer.
///
/// Point fields wider or taller than this get their draped texture resampled
/// down to fit.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_TEXTURE_DIMENSION;
///
/// let scale = MAX_TEXTURE_DIMENSION as f64 / 8192.0;
/// assert_eq!(scale, 0.5);
/// ```
pub const MAX_TEXTURE_DIMENSION: usize = 4096;

/// Number of texels in the 1D gradient ramp.
pub const GRADIENT_RAMP_SAMPLES: usize = 1000;

/// Index of the first texel painted with the high color.
///
/// Texels `[0, GRADIENT_RAMP_SPLIT)` get the low color, the rest get the
/// high color.
pub const GRADIENT_RAMP_SPLIT: usize = 200;

/// Scale applied to the dominant direction when generating the gradient
/// texture coordinate.
pub const GRADIENT_TEXGEN_SCALE: f64 = 0.04;

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Ramp color for the lower part of the gradient (green).
///
/// RGBA values in range [0.0, 1.0].
pub const GRADIENT_LOW_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Ramp color for the upper part of the gradient (black).
pub const GRADIENT_HIGH_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Overall color bound to the whole mesh (opaque white).
pub const MESH_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// =============================================================================
// OUTPUT CONSTANTS
// =============================================================================

/// Name attached to every generated mesh.
pub const MESH_NAME: &str = "Simple Mesh";

/// Default file type (extension) requested from the mesh exporter.
pub const DEFAULT_OUTPUT_FILE_TYPE: &str = "ive";

/// Suffix marking a point cloud file, stripped when deriving output names.
pub const POINT_CLOUD_SUFFIX: &str = "-PC.";

/// Suffix appended to the prefix of a draped texture.
pub const TEXTURE_SUFFIX: &str = "-tex";

/// File type of the processed draped texture handed to the consumer.
pub const TEXTURE_FILE_TYPE: &str = "jpg";

// =============================================================================
// GRID CONFIGURATION
// =============================================================================

/// Validated sampling configuration.
///
/// # Examples
/// ```
/// use config::constants::GridConfig;
/// let cfg = GridConfig::new(4, "zyx").expect("valid config");
/// assert_eq!(cfg.step, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Sampling stride, at least 1.
    pub step: usize,
    /// Three-character Euler axis order.
    pub rotation_order: String,
}

impl GridConfig {
    /// Builds a configuration, rejecting a zero stride and any axis order
    /// that is not exactly three characters from [`ROTATION_AXES`].
    pub fn new(step: usize, rotation_order: &str) -> Result<Self, ConfigError> {
        if step == 0 {
            return Err(ConfigError::InvalidStep(step));
        }
        if !is_valid_rotation_order(rotation_order) {
            return Err(ConfigError::InvalidRotationOrder(rotation_order.to_string()));
        }
        Ok(Self {
            step,
            rotation_order: rotation_order.to_string(),
        })
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP_SIZE,
            rotation_order: DEFAULT_ROTATION_ORDER.to_string(),
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Raised when the sampling stride is zero.
    InvalidStep(usize),
    /// Raised when the rotation order is not three axis letters.
    InvalidRotationOrder(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidStep(value) => write!(f, "step must be >= 1: {value}"),
            ConfigError::InvalidRotationOrder(order) => {
                write!(f, "rotation order must be three of 'x', 'y', 'z': {order:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks that an Euler axis order has exactly three axis letters.
///
/// Repeated axes (for example `"zxz"`) are allowed.
///
/// # Example
///
/// ```rust
/// use config::constants::is_valid_rotation_order;
///
/// assert!(is_valid_rotation_order("xyz"));
/// assert!(is_valid_rotation_order("ZXZ"));
/// assert!(!is_valid_rotation_order("xy"));
/// assert!(!is_valid_rotation_order("xyw"));
/// ```
pub fn is_valid_rotation_order(order: &str) -> bool {
    order.chars().count() == 3 && order.chars().all(|c| ROTATION_AXES.contains(c))
}
