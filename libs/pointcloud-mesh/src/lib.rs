//! # Point Cloud Mesh
//!
//! Converts a dense, gridded point cloud (a 2D array of 3D points, zero
//! vectors marking missing data) into a triangle-strip surface mesh.
//!
//! ## Architecture
//!
//! ```text
//! PointField ──► transform (center / rotate) ──► builder ──► Mesh
//!                                                   │
//!                    field::GridSampler ◄───────────┤
//!                    normals            ◄───────────┤
//!                    strip              ◄───────────┘
//!
//! Mesh + direction ──► gradient::TextureSpec
//! ```
//!
//! The crate never reads or writes files and never simplifies, smooths or
//! serializes meshes itself; those are jobs for the consumer of [`Scene`].
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use pointcloud_mesh::{generate, MeshOptions, PointField};
//!
//! let field = PointField::from_fn(8, 8, |r, c| Some(DVec3::new(c as f64, r as f64, 1.0)));
//! let options = MeshOptions { step: 2, enable_lighting: true, ..Default::default() };
//! let scene = generate(&field, &options).unwrap();
//! assert_eq!(scene.mesh.vertex_count(), 16);
//! assert_eq!(scene.mesh.strip_count(), 3);
//! ```

pub mod bounds;
pub mod builder;
pub mod error;
pub mod field;
pub mod gradient;
pub mod mesh;
pub mod normals;
pub mod pipeline;
pub mod progress;
pub mod strip;
pub mod texture;
pub mod transform;

pub use bounds::{bounding_box, BoundingBox, BoundingSphere};
pub use builder::{build_mesh, build_mesh_with_progress, BuildMode, MeshOutput, SurfaceMode};
pub use error::MeshError;
pub use field::{GridSampler, PointField, PointSource};
pub use gradient::TextureSpec;
pub use mesh::Mesh;
pub use pipeline::{generate, generate_with_progress, Coloring, MeshOptions, Scene};
pub use progress::{NoProgress, Progress};
pub use strip::TriangleStrip;
pub use transform::RotationSpec;
