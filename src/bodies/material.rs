#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Surface properties used when two surfaces touch
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of restitution (bounciness), 0-1
    pub restitution: f32,

    /// Coefficient of friction, 0-1
    pub friction: f32,
}

impl Material {
    /// Creates a new material with the specified properties
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction: friction.max(0.0),
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    /// A lively plastic die: very bouncy, slippery
    pub fn die() -> Self {
        Self::new(0.1, 0.9)
    }

    /// Arena walls: perfectly elastic
    pub fn wall() -> Self {
        Self::new(0.2, 1.0)
    }

    /// The table top
    pub fn ground() -> Self {
        Self::new(0.3, 0.0)
    }

    /// Combines two materials for a contact: restitutions multiply and the
    /// smoother friction wins
    ///
    /// A surface with no bounce therefore absorbs every impact, however
    /// bouncy the die.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            restitution: self.restitution * other.restitution,
            friction: self.friction.min(other.friction),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_multiplies_restitution_and_takes_min_friction() {
        let pair = Material::die().combine(&Material::wall());
        assert_eq!(pair.restitution, 0.9);
        assert_eq!(pair.friction, 0.1);
    }

    #[test]
    fn dead_ground_absorbs_a_bouncy_die() {
        let pair = Material::die().combine(&Material::ground());
        assert_eq!(pair.restitution, 0.0);
        assert_eq!(pair.friction, 0.1);
    }

    #[test]
    fn new_clamps_out_of_range_values() {
        let m = Material::new(-1.0, 1.5);
        assert_eq!(m.friction, 0.0);
        assert_eq!(m.restitution, 1.0);
    }
}
