use crate::bodies::{body_flags::BodyFlags, Material};
use crate::core::BodyHandle;
use crate::math::{Matrix3, Quaternion, Transform, Vector3};
use crate::shapes::ConvexShape;

use std::sync::Arc;

/// Type alias for a handle to a rigid body
pub type RigidBodyHandle = BodyHandle;

/// A simulated die
///
/// The collision shape is shared with the shape cache and never mutated.
/// Velocities are only changed by the world during a step, or by the
/// launch controller when it spawns or freezes the body.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// The body's transform in world space; the scale is the render scale
    transform: Transform,

    /// The body's linear velocity
    linear_velocity: Vector3,

    /// The body's angular velocity
    angular_velocity: Vector3,

    /// The body's surface properties
    material: Material,

    /// The body's collision shape
    shape: Arc<ConvexShape>,

    /// The body's mass
    mass: f32,

    /// Inverse of the body's mass
    inv_mass: f32,

    /// Inverse of the body's inertia tensor in local space
    inv_inertia_tensor: Matrix3,

    /// Inverse of the body's inertia tensor in world space
    inv_inertia_tensor_world: Matrix3,

    /// The body's linear damping, as the fraction of velocity lost per second
    linear_damping: f32,

    /// The body's angular damping, as the fraction of spin lost per second
    angular_damping: f32,

    /// The body's flags
    flags: BodyFlags,
}

impl RigidBody {
    /// Creates a new dynamic body with the given shape, transform and mass
    pub fn new(shape: Arc<ConvexShape>, transform: Transform, mass: f32) -> Self {
        let mut body = Self {
            transform,
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            material: Material::default(),
            shape,
            mass: 0.0,
            inv_mass: 0.0,
            inv_inertia_tensor: Matrix3::zeros(),
            inv_inertia_tensor_world: Matrix3::zeros(),
            linear_damping: 0.0,
            angular_damping: 0.0,
            flags: BodyFlags::AFFECTED_BY_GRAVITY | BodyFlags::GENERATE_CONTACT_EVENTS,
        };

        body.set_mass(mass);

        body
    }

    /// Returns the body's transform
    pub fn get_transform(&self) -> Transform {
        self.transform
    }

    /// Returns the body's position
    pub fn get_position(&self) -> Vector3 {
        self.transform.position
    }

    /// Sets the body's position
    pub fn set_position(&mut self, position: Vector3) {
        self.transform.position = position;
    }

    /// Returns the body's orientation
    pub fn get_rotation(&self) -> Quaternion {
        self.transform.rotation
    }

    /// Sets the body's orientation
    pub fn set_rotation(&mut self, rotation: Quaternion) {
        self.transform.rotation = rotation;
        self.update_inertia_tensor_world();
    }

    /// Returns the uniform render scale of the body
    pub fn get_scale(&self) -> f32 {
        self.transform.uniform_scale()
    }

    /// Sets the uniform render scale of the body
    ///
    /// The collision shape is scaled with it, so mass properties are refreshed.
    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = Vector3::repeat(scale.max(0.0));
        self.update_mass_properties();
    }

    /// Returns the body's linear velocity
    pub fn get_linear_velocity(&self) -> Vector3 {
        self.linear_velocity
    }

    /// Sets the body's linear velocity
    pub fn set_linear_velocity(&mut self, velocity: Vector3) {
        self.linear_velocity = velocity;
    }

    /// Returns the body's angular velocity
    pub fn get_angular_velocity(&self) -> Vector3 {
        self.angular_velocity
    }

    /// Sets the body's angular velocity
    pub fn set_angular_velocity(&mut self, velocity: Vector3) {
        self.angular_velocity = velocity;
    }

    /// Returns the magnitude of the linear velocity
    pub fn linear_speed(&self) -> f32 {
        self.linear_velocity.norm()
    }

    /// Returns the magnitude of the angular velocity
    pub fn angular_speed(&self) -> f32 {
        self.angular_velocity.norm()
    }

    /// Returns the body's material
    pub fn get_material(&self) -> &Material {
        &self.material
    }

    /// Sets the body's material
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Returns a reference to the body's shape
    pub fn get_shape(&self) -> &Arc<ConvexShape> {
        &self.shape
    }

    /// Returns the body's mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Sets the body's mass and refreshes the inertia tensor
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass.max(0.0);
        self.update_mass_properties();
    }

    /// Returns the body's inverse mass
    pub fn get_inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Returns the body's inverse inertia tensor in world space
    pub fn get_inverse_inertia_tensor_world(&self) -> &Matrix3 {
        &self.inv_inertia_tensor_world
    }

    /// Sets the body's linear damping
    pub fn set_linear_damping(&mut self, damping: f32) {
        self.linear_damping = damping.clamp(0.0, 1.0);
    }

    /// Returns the body's linear damping
    pub fn get_linear_damping(&self) -> f32 {
        self.linear_damping
    }

    /// Sets the body's angular damping
    pub fn set_angular_damping(&mut self, damping: f32) {
        self.angular_damping = damping.clamp(0.0, 1.0);
    }

    /// Returns the body's angular damping
    pub fn get_angular_damping(&self) -> f32 {
        self.angular_damping
    }

    /// Returns the body's flags
    pub fn get_flags(&self) -> BodyFlags {
        self.flags
    }

    /// Returns whether the body is affected by gravity
    pub fn is_affected_by_gravity(&self) -> bool {
        self.flags.contains(BodyFlags::AFFECTED_BY_GRAVITY)
    }

    /// Sets whether the body is affected by gravity
    pub fn set_affected_by_gravity(&mut self, affected: bool) {
        self.flags.set(BodyFlags::AFFECTED_BY_GRAVITY, affected);
    }

    /// Returns whether the body generates contact events
    pub fn generates_contact_events(&self) -> bool {
        self.flags.contains(BodyFlags::GENERATE_CONTACT_EVENTS)
    }

    /// Sets whether the body generates contact events
    pub fn set_generates_contact_events(&mut self, generates: bool) {
        self.flags.set(BodyFlags::GENERATE_CONTACT_EVENTS, generates);
    }

    /// Returns whether the body is frozen
    pub fn is_frozen(&self) -> bool {
        self.flags.contains(BodyFlags::FROZEN)
    }

    /// Holds the body in place: velocities are zeroed and the world stops
    /// integrating and colliding it
    pub fn freeze(&mut self) {
        self.flags.insert(BodyFlags::FROZEN);
        self.linear_velocity = Vector3::zeros();
        self.angular_velocity = Vector3::zeros();
    }

    /// Hands the body back to the simulation
    pub fn unfreeze(&mut self) {
        self.flags.remove(BodyFlags::FROZEN);
    }

    /// Returns whether the world should simulate this body
    pub fn is_simulated(&self) -> bool {
        !self.is_frozen() && self.inv_mass > 0.0
    }

    /// Returns the shape's distinct vertices in world space
    pub fn world_contact_points(&self) -> impl Iterator<Item = Vector3> + '_ {
        self.shape
            .contact_points()
            .iter()
            .map(move |p| self.transform.transform_point(*p))
    }

    /// Updates the body's mass properties from its mass, shape and scale
    pub fn update_mass_properties(&mut self) {
        if self.mass > 0.0 {
            self.inv_mass = 1.0 / self.mass;
            self.inv_inertia_tensor = self
                .shape
                .inertia_tensor(self.mass, self.transform.scale)
                .try_inverse()
                .unwrap_or_else(Matrix3::zeros);
        } else {
            self.inv_mass = 0.0;
            self.inv_inertia_tensor = Matrix3::zeros();
        }

        self.update_inertia_tensor_world();
    }

    /// Updates the inverse inertia tensor in world space
    fn update_inertia_tensor_world(&mut self) {
        // R * inv_I * R^T
        let rotation = self.transform.rotation.to_rotation_matrix();
        let r = rotation.matrix();
        self.inv_inertia_tensor_world = r * self.inv_inertia_tensor * r.transpose();
    }

    /// Applies an impulse at a world-space point
    pub fn apply_impulse_at_point(&mut self, impulse: Vector3, point: Vector3) {
        // Linear component: dv = impulse / m
        self.linear_velocity += impulse * self.inv_mass;

        // Angular component: dw = I^-1 * (r x impulse)
        let r = point - self.transform.position;
        self.angular_velocity += self.inv_inertia_tensor_world * r.cross(&impulse);
    }

    /// Returns the velocity of a world-space point attached to the body
    pub fn velocity_at_point(&self, point: Vector3) -> Vector3 {
        self.linear_velocity + self.angular_velocity.cross(&(point - self.transform.position))
    }

    /// Applies exponential damping to the body's velocities
    pub fn apply_damping(&mut self, dt: f32) {
        self.linear_velocity *= (1.0 - self.linear_damping).powf(dt);
        self.angular_velocity *= (1.0 - self.angular_damping).powf(dt);
    }

    /// Integrates velocities to update position and orientation
    pub fn integrate_velocity(&mut self, dt: f32) {
        self.transform.position += self.linear_velocity * dt;

        if self.angular_velocity.norm_squared() > 0.0 {
            let delta = Quaternion::from_scaled_axis(self.angular_velocity * dt);
            let mut rotation = delta * self.transform.rotation;
            rotation.renormalize();
            self.transform.rotation = rotation;

            self.update_inertia_tensor_world();
        }
    }
}
