use crate::error::DiceError;
use crate::math::{Aabb, Matrix3, Vector3};
use crate::shapes::Mesh;
use crate::Result;

/// A triangular face, as three indices into the vertex list
pub type Face = [u32; 3];

/// Points closer than this are merged when collecting contact candidates
const CONTACT_POINT_MERGE_DISTANCE: f32 = 1.0e-5;

/// A convex collision shape derived from a triangulated mesh
///
/// Vertices are taken verbatim from the mesh, so duplicates produced by
/// per-face vertex attributes are preserved. Every face index is guaranteed
/// to be a valid vertex index.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexShape {
    /// The vertices of the shape
    vertices: Vec<Vector3>,

    /// The triangular faces of the shape
    faces: Vec<Face>,

    /// The distinct vertex positions, used as contact candidates
    contact_points: Vec<Vector3>,

    /// The local AABB of the shape
    local_bounds: Aabb,
}

impl ConvexShape {
    /// Builds a convex shape from a mesh, see [`ConvexShapeBuilder::build`]
    pub fn from_mesh(mesh: &Mesh) -> Result<Self> {
        ConvexShapeBuilder::build(mesh)
    }

    /// Returns the vertices of the shape
    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    /// Returns the faces of the shape
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the distinct vertex positions of the shape
    pub fn contact_points(&self) -> &[Vector3] {
        &self.contact_points
    }

    /// Returns the number of vertices in the shape
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces in the shape
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the axis-aligned bounding box of the shape in local space
    pub fn local_bounds(&self) -> Aabb {
        self.local_bounds
    }

    /// Returns the vertex furthest along `direction`
    pub fn support_point(&self, direction: Vector3) -> Vector3 {
        self.contact_points
            .iter()
            .copied()
            .max_by(|a, b| a.dot(&direction).total_cmp(&b.dot(&direction)))
            .unwrap_or_else(Vector3::zeros)
    }

    /// Returns the inertia tensor of the shape for the given mass and scale
    ///
    /// The shape is approximated by its scaled bounding box.
    pub fn inertia_tensor(&self, mass: f32, scale: Vector3) -> Matrix3 {
        let extents = self.local_bounds.extents().component_mul(&scale);

        let x2 = extents.x * extents.x;
        let y2 = extents.y * extents.y;
        let z2 = extents.z * extents.z;

        let factor = mass / 12.0;

        Matrix3::from_diagonal(&Vector3::new(
            factor * (y2 + z2),
            factor * (x2 + z2),
            factor * (x2 + y2),
        ))
    }
}

/// Converts triangulated meshes into convex collision shapes
///
/// With an index buffer, faces are the consecutive index triples. Without
/// one, faces are synthesised by grouping the raw vertex stream three at a
/// time: `[0, 1, 2]`, `[3, 4, 5]`, and so on. That fallback is only correct
/// when the vertices already arrive ordered as triangles; it does not
/// triangulate an arbitrary point cloud.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvexShapeBuilder;

impl ConvexShapeBuilder {
    /// Builds a convex shape from `mesh`
    pub fn build(mesh: &Mesh) -> Result<ConvexShape> {
        let vertices = mesh.get_vertices();
        let local_bounds = Aabb::from_points(vertices).ok_or(DiceError::EmptyMesh)?;

        let faces = match mesh.get_indices() {
            Some(indices) => Self::indexed_faces(indices, vertices.len())?,
            None => Self::strided_faces(vertices.len()),
        };

        tracing::debug!(
            vertices = vertices.len(),
            faces = faces.len(),
            indexed = mesh.get_indices().is_some(),
            "built convex shape"
        );

        Ok(ConvexShape {
            vertices: vertices.to_vec(),
            faces,
            contact_points: distinct_points(vertices),
            local_bounds,
        })
    }

    fn indexed_faces(indices: &[u32], vertex_count: usize) -> Result<Vec<Face>> {
        let triples = indices.chunks_exact(3);
        if !triples.remainder().is_empty() {
            tracing::warn!(
                leftover = triples.remainder().len(),
                "index buffer length is not a multiple of three; ignoring trailing indices"
            );
        }

        triples
            .enumerate()
            .map(|(face, triple)| {
                match triple.iter().find(|&&index| index as usize >= vertex_count) {
                    Some(&index) => Err(DiceError::InvalidFaceIndex {
                        face,
                        index,
                        vertex_count,
                    }),
                    None => Ok([triple[0], triple[1], triple[2]]),
                }
            })
            .collect()
    }

    fn strided_faces(vertex_count: usize) -> Vec<Face> {
        (0..vertex_count)
            .step_by(3)
            .filter(|&i| i + 2 < vertex_count)
            .map(|i| [i as u32, i as u32 + 1, i as u32 + 2])
            .collect()
    }
}

fn distinct_points(vertices: &[Vector3]) -> Vec<Vector3> {
    let merge_sq = CONTACT_POINT_MERGE_DISTANCE * CONTACT_POINT_MERGE_DISTANCE;
    let mut points: Vec<Vector3> = Vec::with_capacity(vertices.len());

    for vertex in vertices {
        if !points.iter().any(|p| (p - vertex).norm_squared() <= merge_sq) {
            points.push(*vertex);
        }
    }

    points
}
