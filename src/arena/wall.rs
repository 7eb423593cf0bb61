use crate::bodies::Material;
use crate::math::Vector3;
use crate::shapes::{BoxShape, Plane};

/// Which side of the arena a wall closes off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    /// Towards -z
    Front,
    /// Towards +z
    Back,
    /// Towards -x
    Left,
    /// Towards +x
    Right,
}

impl WallSide {
    /// Returns the normal of the wall face that looks into the arena
    pub fn inner_normal(&self) -> Vector3 {
        match self {
            Self::Front => Vector3::z(),
            Self::Back => -Vector3::z(),
            Self::Left => Vector3::x(),
            Self::Right => -Vector3::x(),
        }
    }
}

/// A static wall box
#[derive(Debug, Clone)]
pub struct Wall {
    side: WallSide,
    center: Vector3,
    shape: BoxShape,
    material: Material,
}

impl Wall {
    pub fn new(side: WallSide, center: Vector3, shape: BoxShape, material: Material) -> Self {
        Self {
            side,
            center,
            shape,
            material,
        }
    }

    pub fn side(&self) -> WallSide {
        self.side
    }

    pub fn center(&self) -> Vector3 {
        self.center
    }

    pub fn shape(&self) -> &BoxShape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Returns the height of the top edge
    pub fn top(&self) -> f32 {
        self.shape.bounds_at(self.center).max.y
    }

    /// Returns the plane of the face looking into the arena
    ///
    /// Contacts treat everything behind this face as solid wall, so a die
    /// moving fast enough to skip past the wall's thickness in one step is
    /// still pushed back in.
    pub fn inner_face(&self) -> Plane {
        self.shape.face_plane(self.center, self.side.inner_normal())
    }
}
