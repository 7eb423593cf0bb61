mod rigid_body;
mod material;

pub use self::rigid_body::{RigidBody, RigidBodyHandle};
pub use self::material::Material;

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Flags for controlling the behavior of rigid bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct BodyFlags: u32 {
            /// Body is affected by gravity
            const AFFECTED_BY_GRAVITY = 0x01;

            /// Body is held in place: the world neither integrates nor collides it
            const FROZEN = 0x02;

            /// Body reports contacts through the world's event queue
            const GENERATE_CONTACT_EVENTS = 0x04;
        }
    }
}
