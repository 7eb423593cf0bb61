mod mesh;
mod convex_shape;
mod plane;
pub mod box_shape;

pub use self::mesh::Mesh;
pub use self::convex_shape::{ConvexShape, ConvexShapeBuilder, Face};
pub use self::plane::Plane;
pub use self::box_shape::BoxShape;
