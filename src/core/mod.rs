pub mod world;
pub mod config;
pub mod storage;
pub mod events;

pub use self::world::PhysicsWorld;
pub use self::config::SimulationConfig;
pub use self::storage::BodyStorage;
pub use self::events::{EventQueue, ContactEvent, BodyEvent, BodyEventType};

use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A unique identifier for a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

/// A contact point between a body and a static arena surface
#[derive(Debug, Clone, Copy)]
pub struct ContactPoint {
    /// The position of the contact point in world space
    pub position: Vector3,

    /// The normal of the contact surface, pointing towards the body
    pub normal: Vector3,

    /// The penetration depth of the contact
    pub penetration: f32,
}

/// The gravity to apply to the physics world
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum GravityType {
    /// No gravity
    None,

    /// Constant acceleration in a direction (typically downward along y-axis)
    Constant(Vector3),
}

impl GravityType {
    /// Returns the acceleration applied to every body
    pub fn acceleration(&self) -> Vector3 {
        match self {
            Self::None => Vector3::zeros(),
            Self::Constant(gravity) => *gravity,
        }
    }
}

impl Default for GravityType {
    fn default() -> Self {
        // Default gravity is -9.81 in y direction
        Self::Constant(Vector3::new(0.0, -9.81, 0.0))
    }
}
