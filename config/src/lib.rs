//! # Config Crate
//!
//! Centralized configuration constants for the point cloud meshing pipeline.
//! All magic numbers and tunable parameters are defined here so the meshing
//! core never scatters literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_STEP_SIZE, MAX_TEXTURE_DIMENSION};
//!
//! let user_step: Option<usize> = None;
//! let step = user_step.unwrap_or(DEFAULT_STEP_SIZE);
//! assert_eq!(step, 10);
//!
//! let needs_resample = 5000 > MAX_TEXTURE_DIMENSION;
//! assert!(needs_resample);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Snapshots**: `GridConfig` rejects strides and axis orders
//!   the mesher cannot use

pub mod constants;
