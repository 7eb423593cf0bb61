use crate::arena::Surface;
use crate::core::{BodyHandle, ContactPoint};
use crate::math::Vector3;

/// Maximum number of contact points to store in a manifold
pub const MAX_CONTACT_POINTS: usize = 8;

/// The contact points between one body and one arena surface
#[derive(Debug, Clone)]
pub struct ContactManifold {
    /// The body in contact
    pub body: BodyHandle,

    /// The surface it is touching
    pub surface: Surface,

    /// The contact points
    pub contacts: Vec<ContactPoint>,

    /// The normal of the surface, pointing towards the body
    pub normal: Vector3,

    /// The combined restitution of the body and the surface
    pub restitution: f32,

    /// The combined friction of the body and the surface
    pub friction: f32,
}

impl ContactManifold {
    /// Creates an empty manifold between a body and a surface
    pub fn new(body: BodyHandle, surface: Surface, normal: Vector3) -> Self {
        Self {
            body,
            surface,
            contacts: Vec::with_capacity(MAX_CONTACT_POINTS),
            normal,
            restitution: 0.0,
            friction: 0.0,
        }
    }

    /// Adds a contact point to the manifold
    pub fn add_contact(&mut self, contact: ContactPoint) {
        // If we already have the maximum number of contacts, replace the shallowest one
        if self.contacts.len() >= MAX_CONTACT_POINTS {
            let shallowest = self
                .contacts
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.penetration.total_cmp(&b.penetration))
                .map(|(i, c)| (i, c.penetration));

            if let Some((index, penetration)) = shallowest {
                if contact.penetration > penetration {
                    self.contacts[index] = contact;
                }
            }
        } else {
            self.contacts.push(contact);
        }
    }

    /// Returns the number of contact points
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Returns the deepest penetration in the manifold
    pub fn max_penetration(&self) -> f32 {
        self.contacts
            .iter()
            .map(|c| c.penetration)
            .fold(0.0, f32::max)
    }

    /// Returns whether the manifold has no contacts
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BodyHandle;

    fn contact(penetration: f32) -> ContactPoint {
        ContactPoint {
            position: Vector3::zeros(),
            normal: Vector3::y(),
            penetration,
        }
    }

    #[test]
    fn full_manifold_keeps_deepest_points() {
        let mut manifold = ContactManifold::new(BodyHandle(1), Surface::Ground, Vector3::y());
        for i in 0..MAX_CONTACT_POINTS {
            manifold.add_contact(contact(0.1 + i as f32 * 0.01));
        }

        manifold.add_contact(contact(0.5));
        manifold.add_contact(contact(0.01));

        assert_eq!(manifold.contact_count(), MAX_CONTACT_POINTS);
        assert_eq!(manifold.max_penetration(), 0.5);
        assert!(manifold.contacts.iter().all(|c| c.penetration > 0.1));
    }
}
