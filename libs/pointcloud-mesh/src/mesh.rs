//! # Mesh Data Structure
//!
//! Plain in-memory mesh handed to simplifiers, smoothers and exporters:
//! vertices, optional normals and texture coordinates sharing the vertex
//! index space, and a list of triangle strips.

use config::constants::{MESH_COLOR, MESH_NAME};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::bounds::{BoundingBox, BoundingSphere};
use crate::error::MeshError;
use crate::strip::TriangleStrip;

/// A strip mesh over a sampled point grid.
///
/// Vertex `i` corresponds to sample `(i / grid_cols, i % grid_cols)`. Missing
/// samples are stored too (as the zero vector) and flagged invalid; strips
/// never reference them.
///
/// All geometry uses f64. Export to f32 only happens in the flattening
/// helpers at the handoff boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    name: String,
    grid_rows: usize,
    grid_cols: usize,
    vertices: Vec<DVec3>,
    valid: Vec<bool>,
    normals: Option<Vec<DVec3>>,
    tex_coords: Option<Vec<DVec2>>,
    strips: Vec<TriangleStrip>,
    /// Overall RGBA color bound to the whole mesh.
    color: [f32; 4],
}

impl Mesh {
    /// Creates an empty mesh for a `grid_rows` x `grid_cols` sample grid.
    pub fn with_grid(grid_rows: usize, grid_cols: usize) -> Self {
        let capacity = grid_rows.saturating_mul(grid_cols);
        Self {
            name: MESH_NAME.to_string(),
            grid_rows,
            grid_cols,
            vertices: Vec::with_capacity(capacity),
            valid: Vec::with_capacity(capacity),
            normals: None,
            tex_coords: None,
            strips: Vec::new(),
            color: MESH_COLOR,
        }
    }

    /// Appends a vertex and returns its index.
    ///
    /// Fails once the mesh holds more vertices than a u32 index can address.
    pub fn add_vertex(&mut self, position: DVec3, valid: bool) -> Result<u32, MeshError> {
        let index = u32::try_from(self.vertices.len()).map_err(|_| {
            MeshError::configuration(format!("mesh exceeds {} vertices", u32::MAX))
        })?;
        self.vertices.push(position);
        self.valid.push(valid);
        Ok(index)
    }

    /// Sets vertex normals. Must hold one entry per vertex.
    pub fn set_normals(&mut self, normals: Vec<DVec3>) {
        debug_assert_eq!(normals.len(), self.vertices.len());
        self.normals = Some(normals);
    }

    /// Sets texture coordinates. Must hold one entry per vertex.
    pub fn set_tex_coords(&mut self, tex_coords: Vec<DVec2>) {
        debug_assert_eq!(tex_coords.len(), self.vertices.len());
        self.tex_coords = Some(tex_coords);
    }

    /// Sets the strip primitives.
    pub fn set_strips(&mut self, strips: Vec<TriangleStrip>) {
        self.strips = strips;
    }

    /// Mesh name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sampled grid shape `(rows, cols)`.
    #[inline]
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.grid_rows, self.grid_cols)
    }

    /// Returns the number of vertices, missing samples included.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of strips.
    #[inline]
    pub fn strip_count(&self) -> usize {
        self.strips.len()
    }

    /// Returns the number of triangles encoded by all strips.
    pub fn triangle_count(&self) -> usize {
        self.strips.iter().map(TriangleStrip::triangle_count).sum()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Per-vertex validity.
    #[inline]
    pub fn validity(&self) -> &[bool] {
        &self.valid
    }

    /// Whether vertex `index` holds data.
    #[inline]
    pub fn is_valid(&self, index: u32) -> bool {
        self.valid[index as usize]
    }

    /// Vertex at `index`.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Vertex normals, present when lighting was requested.
    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    /// Texture coordinates, present when a texture is draped.
    pub fn tex_coords(&self) -> Option<&[DVec2]> {
        self.tex_coords.as_deref()
    }

    /// Strip primitives, one per sampled row pair.
    #[inline]
    pub fn strips(&self) -> &[TriangleStrip] {
        &self.strips
    }

    /// Overall RGBA color.
    #[inline]
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Axis-aligned bounding box of the valid vertices.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(
            self.vertices
                .iter()
                .zip(&self.valid)
                .filter_map(|(v, ok)| ok.then_some(*v)),
        )
    }

    /// Bounding sphere of the valid vertices, `None` if there are none.
    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        BoundingSphere::from_box(&self.bounding_box())
    }

    /// Expands all strips into a triangle list.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.strips.iter().flat_map(TriangleStrip::triangles).collect()
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        flatten3(&self.vertices)
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Option<Vec<f32>> {
        self.normals.as_deref().map(flatten3)
    }

    /// Exports texture coordinates as flattened [s, t, s, t, ...] f32 array.
    pub fn tex_coords_f32(&self) -> Option<Vec<f32>> {
        self.tex_coords.as_ref().map(|coords| {
            let mut result = Vec::with_capacity(coords.len() * 2);
            for t in coords {
                result.push(t.x as f32);
                result.push(t.y as f32);
            }
            result
        })
    }

    /// Exports the expanded triangle list as flattened u32 indices.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles().into_iter().flatten().collect()
    }
}

fn flatten3(values: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(values.len() * 3);
    for v in values {
        result.push(v.x as f32);
        result.push(v.y as f32);
        result.push(v.z as f32);
    }
    result
}
