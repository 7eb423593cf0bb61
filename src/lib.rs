pub mod math;
pub mod core;
pub mod bodies;
pub mod shapes;
pub mod collision;
pub mod arena;
pub mod launch;

/// Re-export common types for easier usage
pub use crate::core::{PhysicsWorld, SimulationConfig};
pub use crate::bodies::{RigidBody, RigidBodyHandle, Material};
pub use crate::shapes::{ConvexShape, ConvexShapeBuilder, Mesh};
pub use crate::arena::{Arena, ArenaConfig, Viewport};
pub use crate::launch::{
    DieType, DieSpec, LaunchConfig, LaunchController, LaunchEvent, LaunchState,
    MeshProvider, SettleDetector, StaticMeshProvider,
};
pub use crate::math::Vector3;

/// Error types for the dice core
pub mod error {
    use crate::launch::DieType;
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum DiceError {
        #[error("mesh has no vertices")]
        EmptyMesh,

        #[error("face {face} references vertex {index}, but the mesh only has {vertex_count} vertices")]
        InvalidFaceIndex {
            face: usize,
            index: u32,
            vertex_count: usize,
        },

        #[error("collision shape for {0} has no faces")]
        DegenerateShape(DieType),

        #[error("Invalid launch: {0}")]
        InvalidLaunch(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),
    }
}

/// Result type for dice core operations
pub type Result<T> = std::result::Result<T, error::DiceError>;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
