use crate::math::{Aabb, Vector3};
use crate::shapes::Plane;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// An axis-aligned box (cuboid), used for static arena walls
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BoxShape {
    /// The half-extents of the box (half-width, half-height, half-depth)
    half_extents: Vector3,
}

impl BoxShape {
    /// Creates a new box with the given half-extents
    pub fn new(half_extents: Vector3) -> Self {
        Self {
            half_extents: half_extents.map(|e| e.max(0.0)),
        }
    }

    /// Creates a new box with the given full dimensions
    pub fn new_with_dimensions(width: f32, height: f32, depth: f32) -> Self {
        Self::new(Vector3::new(width, height, depth) * 0.5)
    }

    /// Returns the half-extents of the box
    pub fn get_half_extents(&self) -> Vector3 {
        self.half_extents
    }

    /// Returns the full dimensions of the box
    pub fn get_dimensions(&self) -> Vector3 {
        self.half_extents * 2.0
    }

    /// Returns the bounds of the box when centred at `center`
    pub fn bounds_at(&self, center: Vector3) -> Aabb {
        Aabb::from_center_half_extents(center, self.half_extents)
    }

    /// Returns the plane containing the face whose outward normal is `axis`
    ///
    /// `axis` should be one of the six signed coordinate axes.
    pub fn face_plane(&self, center: Vector3, axis: Vector3) -> Plane {
        let axis = axis.normalize();
        let offset = self.half_extents.dot(&axis.abs());
        Plane::from_point_normal(center + axis * offset, axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dimensions_are_halved() {
        let wall = BoxShape::new_with_dimensions(20.0, 10.0, 0.5);
        assert_relative_eq!(wall.get_half_extents(), Vector3::new(10.0, 5.0, 0.25));
        assert_relative_eq!(wall.get_dimensions(), Vector3::new(20.0, 10.0, 0.5));
    }

    #[test]
    fn face_plane_sits_on_the_face() {
        let wall = BoxShape::new_with_dimensions(0.5, 10.0, 20.0);
        let plane = wall.face_plane(Vector3::new(-6.0, 5.0, 0.0), Vector3::x());

        assert_relative_eq!(plane.get_normal(), Vector3::x());
        assert_relative_eq!(plane.signed_distance_to(Vector3::new(-5.75, 3.0, 2.0)), 0.0);
        assert!(plane.signed_distance_to(Vector3::new(-5.9, 3.0, 2.0)) < 0.0);
    }
}
