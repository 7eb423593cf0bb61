mod transform;
mod aabb;

pub use transform::Transform;
pub use aabb::Aabb;

/// A 3D vector for positions, velocities and directions
pub type Vector3 = nalgebra::Vector3<f32>;

/// A unit quaternion describing an orientation
pub type Quaternion = nalgebra::UnitQuaternion<f32>;

/// A 3x3 matrix, used for inertia tensors
pub type Matrix3 = nalgebra::Matrix3<f32>;
