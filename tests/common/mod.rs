#![allow(dead_code)]

use dice_roller::launch::LaunchImpulse;
use dice_roller::math::Vector3;
use dice_roller::{
    DieType, LaunchConfig, LaunchController, LaunchEvent, Mesh, StaticMeshProvider, Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const FRAME: f32 = 1.0 / 60.0;

/// Longest any single roll may take before a test gives up on it
pub const MAX_ROLL_SECONDS: f32 = 30.0;

const PHI: f32 = 1.618_034;

/// Corner points of each die, scaled to a circumradius of one
pub fn die_vertices(die: DieType) -> Vec<Vector3> {
    let raw: Vec<Vector3> = match die {
        DieType::D4 => vec![
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(1.0, -1.0, -1.0),
            Vector3::new(-1.0, 1.0, -1.0),
            Vector3::new(-1.0, -1.0, 1.0),
        ],
        DieType::D6 => signs3().into_iter().collect(),
        DieType::D8 => vec![
            Vector3::x(),
            -Vector3::x(),
            Vector3::y(),
            -Vector3::y(),
            Vector3::z(),
            -Vector3::z(),
        ],
        DieType::D10 => {
            let mut points = vec![Vector3::y(), -Vector3::y()];
            for k in 0..10 {
                let angle = k as f32 * std::f32::consts::PI / 5.0;
                let y = if k % 2 == 0 { 0.1 } else { -0.1 };
                points.push(Vector3::new(angle.cos(), y, angle.sin()));
            }
            points
        }
        DieType::D12 => {
            let mut points = signs3();
            let inv = 1.0 / PHI;
            for &a in &[-1.0, 1.0] {
                for &b in &[-1.0, 1.0] {
                    points.push(Vector3::new(0.0, a * inv, b * PHI));
                    points.push(Vector3::new(a * inv, b * PHI, 0.0));
                    points.push(Vector3::new(a * PHI, 0.0, b * inv));
                }
            }
            points
        }
        DieType::D20 => {
            let mut points = Vec::new();
            for &a in &[-1.0, 1.0] {
                for &b in &[-1.0, 1.0] {
                    points.push(Vector3::new(0.0, a, b * PHI));
                    points.push(Vector3::new(a, b * PHI, 0.0));
                    points.push(Vector3::new(a * PHI, 0.0, b));
                }
            }
            points
        }
    };

    raw.into_iter().map(|p| p.normalize()).collect()
}

fn signs3() -> Vec<Vector3> {
    let mut points = Vec::new();
    for &x in &[-1.0, 1.0] {
        for &y in &[-1.0, 1.0] {
            for &z in &[-1.0, 1.0] {
                points.push(Vector3::new(x, y, z));
            }
        }
    }
    points
}

/// Every outward triangle of the convex hull of `points`, by brute force
pub fn hull_triangles(points: &[Vector3]) -> Vec<[u32; 3]> {
    let centroid = points.iter().sum::<Vector3>() / points.len() as f32;
    let mut triangles = Vec::new();

    for i in 0..points.len() {
        for j in i + 1..points.len() {
            for k in j + 1..points.len() {
                let normal = (points[j] - points[i]).cross(&(points[k] - points[i]));
                if normal.norm() < 1.0e-6 {
                    continue;
                }

                let outside = points
                    .iter()
                    .any(|p| (p - points[i]).dot(&normal) > 1.0e-4);
                let inside = points
                    .iter()
                    .any(|p| (p - points[i]).dot(&normal) < -1.0e-4);
                if outside && inside {
                    continue;
                }

                if (points[i] - centroid).dot(&normal) >= 0.0 {
                    triangles.push([i as u32, j as u32, k as u32]);
                } else {
                    triangles.push([i as u32, k as u32, j as u32]);
                }
            }
        }
    }

    triangles
}

/// The die as an indexed mesh
pub fn die_mesh(die: DieType) -> Mesh {
    let vertices = die_vertices(die);
    let indices = hull_triangles(&vertices).into_iter().flatten().collect();
    Mesh::from_vertices_and_indices(vertices, indices)
}

/// The die as a non-indexed stream with three vertices per triangle
pub fn die_triangle_soup(die: DieType) -> Mesh {
    let vertices = die_vertices(die);
    let soup = hull_triangles(&vertices)
        .into_iter()
        .flatten()
        .map(|i| vertices[i as usize])
        .collect();
    Mesh::new(soup)
}

pub fn all_dice() -> StaticMeshProvider {
    DieType::ALL
        .iter()
        .fold(StaticMeshProvider::new(), |provider, &die| provider.with_mesh(die, die_mesh(die)))
}

/// A seeded controller over the desktop viewport
pub fn controller(seed: u64) -> LaunchController<StaticMeshProvider> {
    LaunchController::new(all_dice(), Viewport::default()).with_rng(StdRng::seed_from_u64(seed))
}

/// A seeded controller whose dice are dropped without any throw
pub fn dropping_controller(seed: u64) -> LaunchController<StaticMeshProvider> {
    let config = LaunchConfig {
        impulse: LaunchImpulse {
            linear_offset: Vector3::zeros(),
            linear_span: Vector3::zeros(),
            angular_offset: Vector3::zeros(),
            angular_span: Vector3::zeros(),
        },
        ..LaunchConfig::default()
    };

    LaunchController::with_config(all_dice(), Viewport::default(), config)
        .with_rng(StdRng::seed_from_u64(seed))
}

/// Ticks until `done` returns true for an event, giving up after `max_seconds`
///
/// Returns every event seen and the number of frames run.
pub fn run_until(
    controller: &mut LaunchController<StaticMeshProvider>,
    max_seconds: f32,
    mut done: impl FnMut(&LaunchEvent) -> bool,
) -> (Vec<LaunchEvent>, usize) {
    let mut seen = Vec::new();
    let max_frames = (max_seconds / FRAME) as usize;

    for frame in 1..=max_frames {
        controller.tick(FRAME);
        let events = controller.take_events();
        let finished = events.iter().any(&mut done);
        seen.extend(events);
        if finished {
            return (seen, frame);
        }
    }

    (seen, max_frames)
}

/// Installs a test log subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
