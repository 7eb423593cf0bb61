#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Timing of the shrink played once a die has settled
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ShrinkConfig {
    /// Seconds from full size to nothing
    pub duration: f32,
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self { duration: 0.2 }
    }
}

/// Linear shrink of a settled die's render scale down to zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkAnimation {
    generation: u64,
    base_scale: f32,
    duration: f32,
    elapsed: f32,
}

impl ShrinkAnimation {
    /// Starts a shrink from `base_scale` for the launch `generation`
    pub fn new(generation: u64, base_scale: f32, config: &ShrinkConfig) -> Self {
        Self {
            generation,
            base_scale,
            duration: config.duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// The launch this animation belongs to
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances by `dt` seconds and returns the new scale
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.scale()
    }

    /// Fraction of the animation played, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// Current render scale
    pub fn scale(&self) -> f32 {
        self.base_scale * (1.0 - self.progress())
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}
