mod contact_generator;
mod contact_manifold;
mod contact_solver;

pub use self::contact_generator::{ContactGenerator, VertexContactGenerator};
pub use self::contact_manifold::{ContactManifold, MAX_CONTACT_POINTS};
pub use self::contact_solver::{ContactSolver, SequentialImpulseSolver};
