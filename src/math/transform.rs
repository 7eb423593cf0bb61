use crate::math::{Vector3, Quaternion};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Represents a transformation in 3D space (position, rotation, and scale)
///
/// The scale doubles as the render scale of a die: it is applied to the
/// collision vertices as well, so what is drawn is what collides.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Position in 3D space
    pub position: Vector3,

    /// Rotation as a unit quaternion
    pub rotation: Quaternion,

    /// Scale in each axis
    pub scale: Vector3,
}

impl Transform {
    /// Creates a new transform with the given position, rotation, and scale
    #[inline]
    pub fn new(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Creates a new identity transform (no translation, no rotation, unit scale)
    #[inline]
    pub fn identity() -> Self {
        Self::from_position(Vector3::zeros())
    }

    /// Creates a new transform from just a position
    #[inline]
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            rotation: Quaternion::identity(),
            scale: Vector3::repeat(1.0),
        }
    }

    /// Creates an unrotated transform at `position` with the same scale on every axis
    #[inline]
    pub fn from_position_scale(position: Vector3, scale: f32) -> Self {
        Self {
            position,
            rotation: Quaternion::identity(),
            scale: Vector3::repeat(scale),
        }
    }

    /// Returns the scale if it is uniform, or the largest axis otherwise
    #[inline]
    pub fn uniform_scale(&self) -> f32 {
        self.scale.x.max(self.scale.y).max(self.scale.z)
    }

    /// Transforms a point by this transform
    #[inline]
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        let scaled = point.component_mul(&self.scale);
        self.rotation * scaled + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn transform_point_scales_then_rotates_then_translates() {
        let transform = Transform::new(
            Vector3::new(1.0, 2.0, 3.0),
            Quaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2),
            Vector3::repeat(2.0),
        );

        let p = transform.transform_point(Vector3::new(1.0, 0.0, 0.0));

        // (1,0,0) * 2 -> (2,0,0), rotated +90deg about y -> (0,0,-2)
        assert_relative_eq!(p.x, 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(p.y, 2.0, epsilon = 1.0e-5);
        assert_relative_eq!(p.z, 1.0, epsilon = 1.0e-5);
    }
}
