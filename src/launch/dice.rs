use crate::bodies::Material;
use crate::error::DiceError;
use crate::shapes::{ConvexShape, ConvexShapeBuilder, Mesh};
use crate::Result;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// The dice that can be rolled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum DieType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
}

impl DieType {
    /// Every die, smallest first
    pub const ALL: [DieType; 6] = [
        DieType::D4,
        DieType::D6,
        DieType::D8,
        DieType::D10,
        DieType::D12,
        DieType::D20,
    ];

    /// Returns the selector id, e.g. `"d6"`
    pub fn id(&self) -> &'static str {
        match self {
            DieType::D4 => "d4",
            DieType::D6 => "d6",
            DieType::D8 => "d8",
            DieType::D10 => "d10",
            DieType::D12 => "d12",
            DieType::D20 => "d20",
        }
    }

    /// Returns the number of numbered faces
    pub fn sides(&self) -> u32 {
        match self {
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
        }
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DieType {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self> {
        DieType::ALL
            .iter()
            .copied()
            .find(|die| die.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DiceError::InvalidLaunch(format!("unknown die '{}'", s)))
    }
}

/// Physical and visual properties of a die
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct DieSpec {
    /// Which die this describes
    pub die: DieType,

    /// Render scale of the die, also applied to its collision shape
    pub base_scale: f32,

    /// Mass of the die
    pub mass: f32,

    /// Surface of the die
    pub material: Material,

    /// Fraction of linear velocity lost per second
    pub linear_damping: f32,

    /// Fraction of angular velocity lost per second
    pub angular_damping: f32,
}

impl DieSpec {
    /// Returns the stock properties of `die`
    pub fn for_die(die: DieType) -> Self {
        // the d6 model is authored at twice the size of the others
        let base_scale = match die {
            DieType::D6 => 0.5,
            _ => 1.0,
        };

        Self {
            die,
            base_scale,
            mass: 0.5,
            material: Material::die(),
            linear_damping: 0.05,
            angular_damping: 0.05,
        }
    }
}

/// Source of die geometry
pub trait MeshProvider {
    /// Returns the mesh for `die`, if one is loaded
    fn mesh(&self, die: DieType) -> Option<&Mesh>;
}

/// A mesh provider backed by an in-memory map
#[derive(Debug, Clone, Default)]
pub struct StaticMeshProvider {
    meshes: HashMap<DieType, Mesh>,
}

impl StaticMeshProvider {
    /// Creates an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mesh, builder style
    pub fn with_mesh(mut self, die: DieType, mesh: Mesh) -> Self {
        self.insert(die, mesh);
        self
    }

    /// Sets the mesh for `die`, returning the one it replaces
    pub fn insert(&mut self, die: DieType, mesh: Mesh) -> Option<Mesh> {
        self.meshes.insert(die, mesh)
    }

    /// Removes the mesh for `die`
    pub fn remove(&mut self, die: DieType) -> Option<Mesh> {
        self.meshes.remove(&die)
    }

    /// Returns the number of loaded meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Returns whether no mesh is loaded
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl MeshProvider for StaticMeshProvider {
    fn mesh(&self, die: DieType) -> Option<&Mesh> {
        self.meshes.get(&die)
    }
}

/// Collision shapes built so far, one per die type
///
/// A shape is only stored once it has been built successfully and has at
/// least one face, so a failed build can be retried after the mesh is fixed.
#[derive(Debug, Clone, Default)]
pub struct ShapeCache {
    shapes: HashMap<DieType, Arc<ConvexShape>>,
}

impl ShapeCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached shape for `die`
    pub fn get(&self, die: DieType) -> Option<&Arc<ConvexShape>> {
        self.shapes.get(&die)
    }

    /// Returns whether a shape for `die` is cached
    pub fn contains(&self, die: DieType) -> bool {
        self.shapes.contains_key(&die)
    }

    /// Returns the number of cached shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Drops every cached shape
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Returns the shape for `die`, building it from `provider` on first use
    pub fn get_or_build<P: MeshProvider + ?Sized>(
        &mut self,
        die: DieType,
        provider: &P,
    ) -> Result<Arc<ConvexShape>> {
        if let Some(shape) = self.shapes.get(&die) {
            return Ok(Arc::clone(shape));
        }

        let mesh = provider
            .mesh(die)
            .ok_or_else(|| DiceError::InvalidLaunch(format!("no mesh loaded for {}", die)))?;

        let shape = ConvexShapeBuilder::build(mesh)?;
        if shape.face_count() == 0 {
            return Err(DiceError::DegenerateShape(die));
        }

        tracing::debug!(%die, faces = shape.face_count(), "cached collision shape");

        let shape = Arc::new(shape);
        self.shapes.insert(die, Arc::clone(&shape));
        Ok(shape)
    }
}
