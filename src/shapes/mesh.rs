use crate::math::Vector3;

/// Triangulated geometry handed over by the asset layer
///
/// Positions are kept in buffer order. The optional index buffer is a flat
/// list of vertex indices, read three at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<Vector3>,

    /// Flat triangle index buffer, if the asset carried one
    indices: Option<Vec<u32>>,
}

impl Mesh {
    /// Creates a mesh without an index buffer
    pub fn new(vertices: Vec<Vector3>) -> Self {
        Self {
            vertices,
            indices: None,
        }
    }

    /// Creates a mesh from vertices and a flat index buffer
    pub fn from_vertices_and_indices(vertices: Vec<Vector3>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices: Some(indices),
        }
    }

    /// Creates a mesh from a packed `[x0, y0, z0, x1, ...]` position buffer
    ///
    /// A trailing partial position is dropped.
    pub fn from_position_buffer(positions: &[f32], indices: Option<Vec<u32>>) -> Self {
        let vertices = positions
            .chunks_exact(3)
            .map(|p| Vector3::new(p[0], p[1], p[2]))
            .collect();

        Self { vertices, indices }
    }

    /// Returns the vertices of the mesh
    pub fn get_vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    /// Returns the index buffer, if any
    pub fn get_indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Returns the number of vertices in the mesh
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns whether the mesh has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
