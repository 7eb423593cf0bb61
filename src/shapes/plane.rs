use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// An infinite plane defined by a normal and distance from origin
///
/// Points with a negative signed distance lie behind the plane, i.e. inside
/// whatever solid the plane bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Plane {
    /// The normal vector of the plane (always normalized)
    normal: Vector3,

    /// The distance from the origin to the plane along the normal
    distance: f32,
}

impl Plane {
    /// Creates a new plane with the given normal and distance
    pub fn new(normal: Vector3, distance: f32) -> Self {
        Self {
            normal: normal.normalize(),
            distance,
        }
    }

    /// Creates a new plane from a point on the plane and a normal
    pub fn from_point_normal(point: Vector3, normal: Vector3) -> Self {
        let normal = normal.normalize();
        let distance = normal.dot(&point);
        Self { normal, distance }
    }

    /// Returns the normal of the plane
    pub fn get_normal(&self) -> Vector3 {
        self.normal
    }

    /// Returns the distance of the plane from the origin
    pub fn get_distance(&self) -> f32 {
        self.distance
    }

    /// Returns the point of the plane closest to the origin
    pub fn get_point(&self) -> Vector3 {
        self.normal * self.distance
    }

    /// Returns the closest point on the plane to the given point
    pub fn closest_point_to(&self, point: Vector3) -> Vector3 {
        point - self.normal * self.signed_distance_to(point)
    }

    /// Returns the signed distance from a point to the plane
    pub fn signed_distance_to(&self, point: Vector3) -> f32 {
        self.normal.dot(&point) - self.distance
    }
}
