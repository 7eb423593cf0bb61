#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// The size of the display surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Returns whether the viewport is narrower than `breakpoint`
    pub fn is_compact(&self, breakpoint: f32) -> bool {
        self.width < breakpoint
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}
