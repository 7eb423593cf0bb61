use crate::core::GravityType;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for the physics simulation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// The fixed time step for the simulation
    pub time_step: f32,

    /// The maximum number of substeps per call to `step`
    pub max_substeps: u32,

    /// The type of gravity in the simulation
    pub gravity: GravityType,

    /// The number of iterations to run for solving contact velocities
    pub velocity_iterations: u32,

    /// Approach speed below which contacts do not bounce
    pub restitution_velocity_threshold: f32,

    /// Penetration depth tolerated without positional correction
    pub penetration_slop: f32,

    /// Fraction of the remaining penetration removed per substep
    pub position_correction: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: 1.0 / 60.0,
            max_substeps: 10,
            gravity: GravityType::default(),
            velocity_iterations: 10,
            restitution_velocity_threshold: 0.5,
            penetration_slop: 0.005,
            position_correction: 0.8,
        }
    }
}
