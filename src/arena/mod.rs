mod wall;
mod viewport;

pub use self::wall::{Wall, WallSide};
pub use self::viewport::Viewport;

use crate::bodies::Material;
use crate::math::{Aabb, Vector3};
use crate::shapes::{BoxShape, Plane};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A static surface of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The table top
    Ground,

    /// One of the four walls
    Wall(WallSide),
}

/// How the arena is laid out for a given viewport
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ArenaConfig {
    /// Screen pixels per world unit
    pub pixels_per_unit: f32,

    /// Fraction of the visible area enclosed by the walls
    pub inset: f32,

    /// Height of every wall
    pub wall_height: f32,

    /// Thickness of every wall
    pub wall_thickness: f32,

    /// How far the front wall is pulled in from the inset edge
    pub front_offset: f32,

    /// How far the back wall is pulled in from the inset edge
    pub back_offset: f32,

    /// Surface of the walls
    pub wall_material: Material,

    /// Surface of the ground
    pub ground_material: Material,

    /// Viewports narrower than this (in pixels) use the compact spawn point
    pub compact_breakpoint: f32,

    /// Spawn point on narrow viewports
    pub compact_spawn: Vector3,

    /// Spawn point on wide viewports
    pub wide_spawn: Vector3,

    /// Minimum distance kept between the spawn point and the walls
    pub spawn_margin: f32,

    /// Narrowest gap allowed between the inner faces of opposite walls
    pub min_interior: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: 50.0,
            inset: 0.8,
            wall_height: 10.0,
            wall_thickness: 0.5,
            front_offset: 9.0,
            back_offset: 10.0,
            wall_material: Material::wall(),
            ground_material: Material::ground(),
            compact_breakpoint: 600.0,
            compact_spawn: Vector3::new(-2.0, 5.0, 2.0),
            wide_spawn: Vector3::new(-5.0, 8.0, 5.0),
            spawn_margin: 1.0,
            min_interior: 3.0,
        }
    }
}

/// Static collision geometry: a ground plane and up to four walls
///
/// Built from the viewport and replaced wholesale on resize; the physics
/// world only ever reads it.
#[derive(Debug, Clone)]
pub struct Arena {
    ground: Plane,
    ground_material: Material,
    walls: Vec<Wall>,
    spawn_position: Vector3,
}

impl Arena {
    /// Lays out the arena for `viewport`
    pub fn from_viewport(config: &ArenaConfig, viewport: Viewport) -> Self {
        let world_width = viewport.width / config.pixels_per_unit;
        let world_depth = viewport.height / config.pixels_per_unit;
        let inset_width = world_width * config.inset;
        let inset_depth = world_depth * config.inset;

        let min_gap = config.min_interior.max(0.0) + config.wall_thickness;
        let (front_z, back_z) = spread_apart(
            -inset_depth + config.front_offset,
            inset_depth - config.back_offset,
            min_gap,
        );
        let (left_x, right_x) = spread_apart(-inset_width / 2.0, inset_width / 2.0, min_gap);
        let wall_y = config.wall_height / 2.0;

        let across = BoxShape::new_with_dimensions(world_width, config.wall_height, config.wall_thickness);
        let along = BoxShape::new_with_dimensions(config.wall_thickness, config.wall_height, world_depth);

        let walls = vec![
            Wall::new(WallSide::Front, Vector3::new(0.0, wall_y, front_z), across, config.wall_material),
            Wall::new(WallSide::Back, Vector3::new(0.0, wall_y, back_z), across, config.wall_material),
            Wall::new(WallSide::Left, Vector3::new(left_x, wall_y, 0.0), along, config.wall_material),
            Wall::new(WallSide::Right, Vector3::new(right_x, wall_y, 0.0), along, config.wall_material),
        ];

        let mut arena = Self {
            ground: Plane::from_point_normal(Vector3::zeros(), Vector3::y()),
            ground_material: config.ground_material,
            walls,
            spawn_position: Vector3::zeros(),
        };

        let requested = if viewport.is_compact(config.compact_breakpoint) {
            config.compact_spawn
        } else {
            config.wide_spawn
        };
        arena.spawn_position = arena.clamp_inside(requested, config.spawn_margin);

        tracing::debug!(
            front_z, back_z, left_x, right_x,
            spawn = ?arena.spawn_position,
            "arena laid out"
        );

        arena
    }

    /// An arena with only the ground plane, spawning at `spawn_position`
    pub fn ground_only(spawn_position: Vector3) -> Self {
        Self {
            ground: Plane::from_point_normal(Vector3::zeros(), Vector3::y()),
            ground_material: Material::ground(),
            walls: Vec::new(),
            spawn_position,
        }
    }

    /// Replaces the ground's surface properties
    pub fn with_ground_material(mut self, material: Material) -> Self {
        self.ground_material = material;
        self
    }

    /// Returns the ground plane
    pub fn ground(&self) -> &Plane {
        &self.ground
    }

    /// Returns the ground's surface properties
    pub fn ground_material(&self) -> &Material {
        &self.ground_material
    }

    /// Returns the walls
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Returns a wall by side
    pub fn wall(&self, side: WallSide) -> Option<&Wall> {
        self.walls.iter().find(|w| w.side() == side)
    }

    /// Returns where new dice are dropped from
    pub fn spawn_position(&self) -> Vector3 {
        self.spawn_position
    }

    /// Returns the region enclosed by the inner faces of the walls
    ///
    /// Sides without a wall are unbounded.
    pub fn interior(&self) -> Aabb {
        let mut min = Vector3::new(f32::MIN, self.ground.get_distance(), f32::MIN);
        let mut max = Vector3::new(f32::MAX, f32::MAX, f32::MAX);

        for wall in &self.walls {
            let offset = wall.inner_face().get_distance();
            match wall.side() {
                WallSide::Front => min.z = offset,
                WallSide::Back => max.z = -offset,
                WallSide::Left => min.x = offset,
                WallSide::Right => max.x = -offset,
            }
            max.y = max.y.min(wall.top());
        }

        Aabb::new(min, max)
    }

    /// Moves `point` inside the walls, keeping `margin` from each of them
    ///
    /// When the walls are closer than twice the margin the point is centred
    /// between them on that axis. The height is left alone.
    pub fn clamp_inside(&self, point: Vector3, margin: f32) -> Vector3 {
        let interior = self.interior();
        let clamp_axis = |value: f32, lo: f32, hi: f32| {
            let (lo, hi) = (lo + margin, hi - margin);
            if lo <= hi {
                value.clamp(lo, hi)
            } else {
                (lo + hi) / 2.0
            }
        };

        let clamped = Vector3::new(
            clamp_axis(point.x, interior.min.x, interior.max.x),
            point.y,
            clamp_axis(point.z, interior.min.z, interior.max.z),
        );

        if clamped != point {
            tracing::warn!(requested = ?point, clamped = ?clamped, "spawn point moved inside the walls");
        }

        clamped
    }

    /// Returns every surface together with its contact plane, material and
    /// the highest point it covers
    pub fn surfaces(&self) -> impl Iterator<Item = (Surface, Plane, Material, f32)> + '_ {
        let ground = std::iter::once((Surface::Ground, self.ground, self.ground_material, f32::MAX));
        let walls = self
            .walls
            .iter()
            .map(|w| (Surface::Wall(w.side()), w.inner_face(), *w.material(), w.top()));

        ground.chain(walls)
    }
}

/// Pushes the wall centres `lo` and `hi` apart around their midpoint until
/// they are at least `min_gap` apart
fn spread_apart(lo: f32, hi: f32, min_gap: f32) -> (f32, f32) {
    if hi - lo >= min_gap {
        return (lo, hi);
    }

    let mid = (lo + hi) / 2.0;
    tracing::warn!(lo, hi, min_gap, "viewport too small: walls spread apart");
    (mid - min_gap / 2.0, mid + min_gap / 2.0)
}

impl Default for Arena {
    fn default() -> Self {
        Self::from_viewport(&ArenaConfig::default(), Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn desktop_layout_matches_reference_numbers() {
        // 1920x1080 -> 38.4 x 21.6 units, inset to 30.72 x 17.28
        let arena = Arena::from_viewport(&ArenaConfig::default(), Viewport::new(1920.0, 1080.0));

        let front = arena.wall(WallSide::Front).unwrap();
        let back = arena.wall(WallSide::Back).unwrap();
        let left = arena.wall(WallSide::Left).unwrap();
        let right = arena.wall(WallSide::Right).unwrap();

        assert_relative_eq!(front.center().z, -8.28, epsilon = 1.0e-4);
        assert_relative_eq!(back.center().z, 7.28, epsilon = 1.0e-4);
        assert_relative_eq!(left.center().x, -15.36, epsilon = 1.0e-4);
        assert_relative_eq!(right.center().x, 15.36, epsilon = 1.0e-4);
        assert_relative_eq!(front.center().y, 5.0);

        assert_relative_eq!(front.shape().get_dimensions(), Vector3::new(38.4, 10.0, 0.5), epsilon = 1.0e-4);
        assert_relative_eq!(left.shape().get_dimensions(), Vector3::new(0.5, 10.0, 21.6), epsilon = 1.0e-4);

        // wide spawn fits without clamping
        assert_relative_eq!(arena.spawn_position(), Vector3::new(-5.0, 8.0, 5.0));
    }

    #[test]
    fn compact_viewport_uses_compact_spawn() {
        let arena = Arena::from_viewport(&ArenaConfig::default(), Viewport::new(500.0, 900.0));
        assert_relative_eq!(arena.spawn_position(), Vector3::new(-2.0, 5.0, 2.0));
    }

    #[test]
    fn spawn_is_pulled_inside_small_arenas() {
        // 1280x720: back wall sits at z = 1.52, in front of the wide spawn point
        let arena = Arena::from_viewport(&ArenaConfig::default(), Viewport::new(1280.0, 720.0));
        let interior = arena.interior();
        let spawn = arena.spawn_position();

        assert!(spawn.z < interior.max.z);
        assert!(spawn.z > interior.min.z);
        assert!(spawn.x > interior.min.x && spawn.x < interior.max.x);
        assert_relative_eq!(spawn.y, 8.0);
    }

    #[test]
    fn interior_is_bounded_by_inner_faces() {
        let arena = Arena::from_viewport(&ArenaConfig::default(), Viewport::new(1920.0, 1080.0));
        let interior = arena.interior();

        assert_relative_eq!(interior.min.z, -8.03, epsilon = 1.0e-4);
        assert_relative_eq!(interior.max.z, 7.03, epsilon = 1.0e-4);
        assert_relative_eq!(interior.min.x, -15.11, epsilon = 1.0e-4);
        assert_relative_eq!(interior.max.x, 15.11, epsilon = 1.0e-4);
        assert_relative_eq!(interior.max.y, 10.0);
    }

    #[test]
    fn short_viewport_keeps_a_minimum_interior() {
        // 844x390: the offsets alone would put the front wall at z = 2.76,
        // behind the back wall at z = -3.76
        let config = ArenaConfig::default();
        let arena = Arena::from_viewport(&config, Viewport::new(844.0, 390.0));
        let interior = arena.interior();

        let front = arena.wall(WallSide::Front).unwrap().center().z;
        let back = arena.wall(WallSide::Back).unwrap().center().z;
        assert!(front < back);
        assert_relative_eq!((front + back) / 2.0, -0.5, epsilon = 1.0e-4);
        assert_relative_eq!(interior.max.z - interior.min.z, config.min_interior, epsilon = 1.0e-4);

        let spawn = arena.spawn_position();
        assert!(spawn.z >= interior.min.z + config.spawn_margin - 1.0e-4);
        assert!(spawn.z <= interior.max.z - config.spawn_margin + 1.0e-4);
    }

    #[test]
    fn roomy_viewport_walls_are_not_moved() {
        // 1280x720 walls are 4.04 apart, wider than the minimum
        let arena = Arena::from_viewport(&ArenaConfig::default(), Viewport::new(1280.0, 720.0));
        assert_relative_eq!(arena.wall(WallSide::Front).unwrap().center().z, -2.52, epsilon = 1.0e-4);
        assert_relative_eq!(arena.wall(WallSide::Back).unwrap().center().z, 1.52, epsilon = 1.0e-4);
    }

    #[test]
    fn ground_only_arena_has_a_single_surface() {
        let arena = Arena::ground_only(Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(arena.surfaces().count(), 1);
        assert!(arena.walls().is_empty());
    }
}
