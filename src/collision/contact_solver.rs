use crate::bodies::RigidBody;
use crate::collision::contact_manifold::ContactManifold;
use crate::math::Vector3;

/// Trait for contact constraint solvers
pub trait ContactSolver {
    /// Prepares the solver for the given contacts
    fn prepare(&mut self, contacts: &[ContactManifold], body: &RigidBody);

    /// Runs one velocity iteration over the prepared contacts
    fn solve_velocity(&mut self, contacts: &[ContactManifold], body: &mut RigidBody);

    /// Pushes the body out of the surfaces it still penetrates
    fn solve_position(&mut self, contacts: &[ContactManifold], body: &mut RigidBody);
}

/// Per-point solver state
#[derive(Debug, Clone, Copy)]
struct ContactConstraint {
    manifold: usize,
    position: Vector3,
    normal: Vector3,
    tangent: Vector3,
    bitangent: Vector3,
    normal_mass: f32,
    tangent_mass: f32,
    bitangent_mass: f32,
    friction: f32,
    /// Normal velocity the contact should leave with
    target_velocity: f32,
    normal_impulse: f32,
    tangent_impulse: f32,
    bitangent_impulse: f32,
}

/// Sequential impulse contact solver for a single body against static surfaces
///
/// Normal impulses are accumulated and clamped to stay non-negative, friction
/// impulses are clamped to the friction cone of the accumulated normal
/// impulse. Contacts approaching slower than the restitution threshold do not
/// bounce.
#[derive(Debug, Clone)]
pub struct SequentialImpulseSolver {
    /// Velocity threshold for restitution
    restitution_threshold: f32,

    /// Penetration depth tolerated without positional correction
    slop: f32,

    /// Fraction of the remaining penetration removed by `solve_position`
    correction: f32,

    constraints: Vec<ContactConstraint>,
}

impl SequentialImpulseSolver {
    /// Creates a new sequential impulse solver
    pub fn new(restitution_threshold: f32, slop: f32, correction: f32) -> Self {
        Self {
            restitution_threshold,
            slop,
            correction,
            constraints: Vec::new(),
        }
    }

    /// Returns the total normal impulse applied to each manifold so far
    pub fn normal_impulses(&self, manifold_count: usize) -> Vec<f32> {
        let mut totals = vec![0.0; manifold_count];
        for constraint in &self.constraints {
            if let Some(total) = totals.get_mut(constraint.manifold) {
                *total += constraint.normal_impulse;
            }
        }
        totals
    }

    fn effective_mass(body: &RigidBody, r: Vector3, axis: Vector3) -> f32 {
        let r_cross = r.cross(&axis);
        let k = body.get_inverse_mass()
            + r_cross.dot(&(body.get_inverse_inertia_tensor_world() * r_cross));

        if k > 0.0 {
            1.0 / k
        } else {
            0.0
        }
    }
}

/// Returns two unit vectors orthogonal to `normal` and to each other
fn tangent_basis(normal: Vector3) -> (Vector3, Vector3) {
    let tangent = if normal.cross(&Vector3::y()).norm_squared() > 0.01 {
        normal.cross(&Vector3::y()).normalize()
    } else {
        normal.cross(&Vector3::x()).normalize()
    };

    (tangent, normal.cross(&tangent))
}

impl ContactSolver for SequentialImpulseSolver {
    fn prepare(&mut self, contacts: &[ContactManifold], body: &RigidBody) {
        self.constraints.clear();
        let center = body.get_position();

        for (index, manifold) in contacts.iter().enumerate() {
            let normal = manifold.normal;
            let (tangent, bitangent) = tangent_basis(normal);

            for contact in &manifold.contacts {
                let r = contact.position - center;

                // Bounce off the approach speed seen before any impulse is applied
                let approach = body.velocity_at_point(contact.position).dot(&normal);
                let target_velocity = if -approach > self.restitution_threshold {
                    -manifold.restitution * approach
                } else {
                    0.0
                };

                self.constraints.push(ContactConstraint {
                    manifold: index,
                    position: contact.position,
                    normal,
                    tangent,
                    bitangent,
                    normal_mass: Self::effective_mass(body, r, normal),
                    tangent_mass: Self::effective_mass(body, r, tangent),
                    bitangent_mass: Self::effective_mass(body, r, bitangent),
                    friction: manifold.friction,
                    target_velocity,
                    normal_impulse: 0.0,
                    tangent_impulse: 0.0,
                    bitangent_impulse: 0.0,
                });
            }
        }
    }

    fn solve_velocity(&mut self, _contacts: &[ContactManifold], body: &mut RigidBody) {
        for constraint in &mut self.constraints {
            // Normal
            let normal_velocity = body.velocity_at_point(constraint.position).dot(&constraint.normal);
            let lambda = (constraint.target_velocity - normal_velocity) * constraint.normal_mass;
            let accumulated = (constraint.normal_impulse + lambda).max(0.0);
            let applied = accumulated - constraint.normal_impulse;
            constraint.normal_impulse = accumulated;
            body.apply_impulse_at_point(constraint.normal * applied, constraint.position);

            // Friction
            let max_friction = constraint.friction * constraint.normal_impulse;

            let tangent_velocity = body.velocity_at_point(constraint.position).dot(&constraint.tangent);
            let lambda = -tangent_velocity * constraint.tangent_mass;
            let accumulated = (constraint.tangent_impulse + lambda).clamp(-max_friction, max_friction);
            let applied = accumulated - constraint.tangent_impulse;
            constraint.tangent_impulse = accumulated;
            body.apply_impulse_at_point(constraint.tangent * applied, constraint.position);

            let bitangent_velocity = body.velocity_at_point(constraint.position).dot(&constraint.bitangent);
            let lambda = -bitangent_velocity * constraint.bitangent_mass;
            let accumulated = (constraint.bitangent_impulse + lambda).clamp(-max_friction, max_friction);
            let applied = accumulated - constraint.bitangent_impulse;
            constraint.bitangent_impulse = accumulated;
            body.apply_impulse_at_point(constraint.bitangent * applied, constraint.position);
        }
    }

    fn solve_position(&mut self, contacts: &[ContactManifold], body: &mut RigidBody) {
        let mut correction = Vector3::zeros();

        for manifold in contacts {
            let depth = manifold.max_penetration() - self.slop;
            if depth > 0.0 {
                correction += manifold.normal * depth * self.correction;
            }
        }

        if correction.norm_squared() > 0.0 {
            body.set_position(body.get_position() + correction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Surface;
    use crate::core::{BodyHandle, ContactPoint};
    use crate::math::Transform;
    use crate::shapes::{ConvexShape, Mesh};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn cube() -> RigidBody {
        let mut vertices = Vec::new();
        for &x in &[-0.5, 0.5] {
            for &y in &[-0.5, 0.5] {
                for &z in &[-0.5, 0.5] {
                    vertices.push(Vector3::new(x, y, z));
                }
            }
        }
        let shape = Arc::new(ConvexShape::from_mesh(&Mesh::new(vertices)).unwrap());
        RigidBody::new(shape, Transform::from_position(Vector3::new(0.0, 0.49, 0.0)), 1.0)
    }

    fn ground_manifold(restitution: f32, friction: f32) -> ContactManifold {
        let mut manifold = ContactManifold::new(BodyHandle(1), Surface::Ground, Vector3::y());
        for &x in &[-0.5, 0.5] {
            for &z in &[-0.5, 0.5] {
                manifold.add_contact(ContactPoint {
                    position: Vector3::new(x, -0.01, z),
                    normal: Vector3::y(),
                    penetration: 0.01,
                });
            }
        }
        manifold.restitution = restitution;
        manifold.friction = friction;
        manifold
    }

    fn solve(body: &mut RigidBody, manifolds: &[ContactManifold]) -> SequentialImpulseSolver {
        let mut solver = SequentialImpulseSolver::new(0.5, 0.005, 0.8);
        solver.prepare(manifolds, body);
        for _ in 0..50 {
            solver.solve_velocity(manifolds, body);
        }
        solver
    }

    #[test]
    fn fast_impact_bounces_with_restitution() {
        let mut body = cube();
        body.set_linear_velocity(Vector3::new(0.0, -4.0, 0.0));
        let manifolds = [ground_manifold(0.5, 0.0)];

        let solver = solve(&mut body, &manifolds);

        assert_relative_eq!(body.get_linear_velocity().y, 2.0, epsilon = 1.0e-2);
        assert!(body.angular_speed() < 0.05);
        // m * (v' - v) = 1 * (2 - -4)
        assert_relative_eq!(solver.normal_impulses(1)[0], 6.0, epsilon = 5.0e-2);
    }

    #[test]
    fn slow_impact_does_not_bounce() {
        let mut body = cube();
        body.set_linear_velocity(Vector3::new(0.0, -0.3, 0.0));
        let manifolds = [ground_manifold(0.9, 0.0)];

        solve(&mut body, &manifolds);

        assert!(body.get_linear_velocity().y.abs() < 1.0e-2);
    }

    #[test]
    fn separating_contact_is_not_pulled_back() {
        let mut body = cube();
        body.set_linear_velocity(Vector3::new(0.0, 1.0, 0.0));
        let manifolds = [ground_manifold(0.5, 0.3)];

        let solver = solve(&mut body, &manifolds);

        assert_relative_eq!(body.get_linear_velocity().y, 1.0, epsilon = 1.0e-6);
        assert_eq!(solver.normal_impulses(1)[0], 0.0);
    }

    #[test]
    fn friction_is_bounded_by_the_normal_impulse() {
        let mut body = cube();
        body.set_linear_velocity(Vector3::new(10.0, -1.0, 0.0));
        let manifolds = [ground_manifold(0.0, 0.2)];

        solve(&mut body, &manifolds);

        let velocity = body.get_linear_velocity();
        assert!(velocity.y.abs() < 0.05, "y = {}", velocity.y);
        // the normal impulse of 1 can remove at most 0.2 of sliding speed
        assert!(velocity.x > 9.7 && velocity.x < 10.0, "x = {}", velocity.x);
    }

    #[test]
    fn position_correction_leaves_the_slop() {
        let mut body = cube();
        let manifolds = [ground_manifold(0.0, 0.0)];
        let mut solver = SequentialImpulseSolver::new(0.5, 0.005, 0.8);

        solver.solve_position(&manifolds, &mut body);

        assert_relative_eq!(body.get_position().y, 0.49 + 0.005 * 0.8, epsilon = 1.0e-6);
    }

    #[test]
    fn tangent_basis_is_orthonormal() {
        for normal in [Vector3::y(), Vector3::x(), -Vector3::z()] {
            let (t, b) = tangent_basis(normal);
            assert_relative_eq!(t.norm(), 1.0, epsilon = 1.0e-6);
            assert_relative_eq!(b.norm(), 1.0, epsilon = 1.0e-6);
            assert_relative_eq!(t.dot(&normal), 0.0, epsilon = 1.0e-6);
            assert_relative_eq!(b.dot(&t), 0.0, epsilon = 1.0e-6);
        }
    }
}
