use dice_roller::math::Vector3;
use dice_roller::{
    DieType, LaunchController, LaunchEvent, LaunchState, Mesh, StaticMeshProvider, Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

const FRAME: f32 = 1.0 / 60.0;
const MAX_SECONDS: f32 = 300.0;
const PHI: f32 = 1.618_034;

/// Corner points of each die
fn corners(die: DieType) -> Vec<Vector3> {
    let cube = || {
        let mut points = Vec::new();
        for &x in &[-1.0, 1.0] {
            for &y in &[-1.0, 1.0] {
                for &z in &[-1.0, 1.0] {
                    points.push(Vector3::new(x, y, z));
                }
            }
        }
        points
    };

    let points = match die {
        DieType::D4 => vec![
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(1.0, -1.0, -1.0),
            Vector3::new(-1.0, 1.0, -1.0),
            Vector3::new(-1.0, -1.0, 1.0),
        ],
        DieType::D6 => cube(),
        DieType::D8 => vec![
            Vector3::x(), -Vector3::x(),
            Vector3::y(), -Vector3::y(),
            Vector3::z(), -Vector3::z(),
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
            let mut points = cube();
            for &a in &[-1.0, 1.0] {
                for &b in &[-1.0, 1.0] {
                    points.push(Vector3::new(0.0, a / PHI, b * PHI));
                    points.push(Vector3::new(a / PHI, b * PHI, 0.0));
                    points.push(Vector3::new(a * PHI, 0.0, b / PHI));
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

    points.into_iter().map(|p| p.normalize()).collect()
}

/// Indexed hull mesh of a small convex point set
fn hull_mesh(points: Vec<Vector3>) -> Mesh {
    let mut indices = Vec::new();

    for i in 0..points.len() {
        for j in i + 1..points.len() {
            for k in j + 1..points.len() {
                let normal = (points[j] - points[i]).cross(&(points[k] - points[i]));
                if normal.norm() < 1.0e-6 {
                    continue;
                }
                let side = |p: &Vector3| (p - points[i]).dot(&normal);
                let above = points.iter().any(|p| side(p) > 1.0e-4);
                let below = points.iter().any(|p| side(p) < -1.0e-4);
                if !(above && below) {
                    indices.extend([i as u32, j as u32, k as u32]);
                }
            }
        }
    }

    Mesh::from_vertices_and_indices(points, indices)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let provider = DieType::ALL
        .iter()
        .fold(StaticMeshProvider::new(), |provider, &die| {
            provider.with_mesh(die, hull_mesh(corners(die)))
        });

    let mut controller = LaunchController::new(provider, Viewport::new(1920.0, 1080.0))
        .with_rng(StdRng::seed_from_u64(42));

    println!("Rolling every die in a 1920x1080 arena");
    println!("spawn at {:?}", controller.world().arena().spawn_position());

    for die in DieType::ALL {
        if let Err(err) = controller.launch(die) {
            println!("{}: launch failed: {}", die, err);
            continue;
        }

        println!("\n{} thrown", die);
        let mut elapsed = 0.0;
        let mut next_report = 0.0;

        while elapsed < MAX_SECONDS {
            controller.tick(FRAME);
            elapsed += FRAME;

            if elapsed >= next_report && controller.state() == LaunchState::Rolling {
                if let Some(body) = controller.live_body().and_then(|h| controller.world().get_body(h).ok()) {
                    let p = body.get_position();
                    println!(
                        "  t={:6.2}s  pos=({:6.2}, {:5.2}, {:6.2})  speed={:6.2}  spin={:6.2}",
                        elapsed, p.x, p.y, p.z, body.linear_speed(), body.angular_speed()
                    );
                }
                next_report += 1.0;
            }

            let mut finished = false;
            for event in controller.take_events() {
                match event {
                    LaunchEvent::Settled { generation } => {
                        println!("  t={:6.2}s  settled (launch {})", elapsed, generation)
                    }
                    LaunchEvent::Stopped { generation } => {
                        println!("  t={:6.2}s  stopped (launch {})", elapsed, generation);
                        finished = true;
                    }
                    _ => {}
                }
            }

            if finished {
                break;
            }
        }

        if controller.state() != LaunchState::Idle {
            println!("  still {:?} after {}s", controller.state(), MAX_SECONDS);
        }
    }
}
