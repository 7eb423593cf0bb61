use crate::arena::Arena;
use crate::bodies::RigidBody;
use crate::collision::contact_manifold::ContactManifold;
use crate::core::{BodyHandle, ContactPoint};

/// Trait for finding contacts between a body and the arena
pub trait ContactGenerator: Send + Sync {
    /// Returns one manifold per surface the body is touching
    fn generate_contacts(
        &self,
        handle: BodyHandle,
        body: &RigidBody,
        arena: &Arena,
    ) -> Vec<ContactManifold>;
}

/// Tests every hull vertex against every arena surface
///
/// A vertex is in contact when it lies behind the surface plane and no
/// higher than the top of the surface. Walls are treated as half-spaces,
/// so a fast body that crossed the wall's inner face in one step is still
/// pushed back.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexContactGenerator;

impl VertexContactGenerator {
    /// Creates a new vertex contact generator
    pub fn new() -> Self {
        Self
    }
}

impl ContactGenerator for VertexContactGenerator {
    fn generate_contacts(
        &self,
        handle: BodyHandle,
        body: &RigidBody,
        arena: &Arena,
    ) -> Vec<ContactManifold> {
        let mut manifolds = Vec::new();

        for (surface, plane, material, top) in arena.surfaces() {
            let normal = plane.get_normal();
            let mut manifold = ContactManifold::new(handle, surface, normal);

            for point in body.world_contact_points() {
                let distance = plane.signed_distance_to(point);
                if distance < 0.0 && point.y <= top {
                    manifold.add_contact(ContactPoint {
                        position: point,
                        normal,
                        penetration: -distance,
                    });
                }
            }

            if !manifold.is_empty() {
                let combined = body.get_material().combine(&material);
                manifold.restitution = combined.restitution;
                manifold.friction = combined.friction;
                manifolds.push(manifold);
            }
        }

        manifolds
    }
}
