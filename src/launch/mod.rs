//! Launching dice and following them until they are cleared away

mod dice;
mod settle;
mod shrink;
mod controller;

pub use self::dice::{DieSpec, DieType, MeshProvider, ShapeCache, StaticMeshProvider};
pub use self::settle::{SettleConfig, SettleDetector, Settled};
pub use self::shrink::{ShrinkAnimation, ShrinkConfig};
pub use self::controller::{
    LaunchConfig, LaunchController, LaunchEvent, LaunchImpulse, LaunchSession, LaunchState,
};
