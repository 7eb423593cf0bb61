use crate::arena::{Arena, ArenaConfig, Viewport};
use crate::bodies::RigidBody;
use crate::core::{BodyHandle, PhysicsWorld, SimulationConfig};
use crate::launch::dice::{DieSpec, DieType, MeshProvider, ShapeCache};
use crate::launch::settle::{SettleConfig, SettleDetector};
use crate::launch::shrink::{ShrinkAnimation, ShrinkConfig};
use crate::math::{Quaternion, Transform, Vector3};
use crate::Result;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Where the controller is in the life of a launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchState {
    /// Nothing in flight
    Idle,

    /// A die is being simulated
    Rolling,

    /// The die has settled and is shrinking away
    Settling,

    /// The die is being removed
    Despawning,
}

/// Something the caller may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchEvent {
    /// A new die was dropped into the arena
    Launched {
        generation: u64,
        die: DieType,
        body: BodyHandle,
    },

    /// The die of `generation` came to rest
    Settled { generation: u64 },

    /// The launch `generation` was replaced by a newer one before finishing
    Superseded { generation: u64 },

    /// The launch `generation` finished and its die was removed
    Stopped { generation: u64 },
}

/// Ranges of the random velocities a die is thrown with
///
/// Each component is `offset + r * span` with `r` uniform in `[0, 1)`, so a
/// negative span gives a range that is open at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct LaunchImpulse {
    pub linear_offset: Vector3,
    pub linear_span: Vector3,
    pub angular_offset: Vector3,
    pub angular_span: Vector3,
}

impl LaunchImpulse {
    /// Draws a linear and an angular velocity
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vector3, Vector3) {
        let mut draw = |offset: Vector3, span: Vector3| {
            Vector3::new(
                offset.x + rng.gen::<f32>() * span.x,
                offset.y + rng.gen::<f32>() * span.y,
                offset.z + rng.gen::<f32>() * span.z,
            )
        };

        let linear = draw(self.linear_offset, self.linear_span);
        let angular = draw(self.angular_offset, self.angular_span);
        (linear, angular)
    }
}

impl Default for LaunchImpulse {
    fn default() -> Self {
        // x in [0, 40), y = 0, z in (-40, 0]
        // spin x in [0, 15), y in [-10, 5), z in [0, 15)
        Self {
            linear_offset: Vector3::zeros(),
            linear_span: Vector3::new(40.0, 0.0, -40.0),
            angular_offset: Vector3::new(0.0, -10.0, 0.0),
            angular_span: Vector3::new(15.0, 15.0, 15.0),
        }
    }
}

/// Everything the launch controller can be tuned with
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct LaunchConfig {
    pub simulation: SimulationConfig,
    pub arena: ArenaConfig,
    pub settle: SettleConfig,
    pub shrink: ShrinkConfig,
    pub impulse: LaunchImpulse,
}

/// The launch currently owned by the controller
#[derive(Debug, Clone)]
pub struct LaunchSession {
    pub die: DieType,
    pub body: BodyHandle,
    pub generation: u64,
    pub base_scale: f32,
    pub shrink: Option<ShrinkAnimation>,
}

/// Drives one die at a time from launch to removal
///
/// Each launch gets a fresh generation number. Settle and shrink progress
/// are keyed by it, so nothing left over from a replaced launch can act on
/// the current one. A launch that fails validation changes nothing.
pub struct LaunchController<P: MeshProvider> {
    world: PhysicsWorld,
    provider: P,
    shapes: ShapeCache,
    config: LaunchConfig,
    viewport: Viewport,
    state: LaunchState,
    session: Option<LaunchSession>,
    generation: u64,
    detector: SettleDetector,
    events: VecDeque<LaunchEvent>,
    rng: StdRng,
}

impl<P: MeshProvider> LaunchController<P> {
    /// Creates a controller with the default configuration
    pub fn new(provider: P, viewport: Viewport) -> Self {
        Self::with_config(provider, viewport, LaunchConfig::default())
    }

    /// Creates a controller with the given configuration
    pub fn with_config(provider: P, viewport: Viewport, config: LaunchConfig) -> Self {
        let arena = Arena::from_viewport(&config.arena, viewport);
        let world = PhysicsWorld::with_arena(config.simulation.clone(), arena);
        let detector = SettleDetector::new(config.settle);

        Self {
            world,
            provider,
            shapes: ShapeCache::new(),
            config,
            viewport,
            state: LaunchState::Idle,
            session: None,
            generation: 0,
            detector,
            events: VecDeque::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Replaces the random source used for launch velocities
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Launches the die with the given selector id, e.g. `"d20"`
    pub fn launch_by_id(&mut self, id: &str) -> Result<u64> {
        let die = id.parse::<DieType>()?;
        self.launch(die)
    }

    /// Drops a new `die` into the arena, replacing any launch in flight
    ///
    /// Returns the new generation number.
    pub fn launch(&mut self, die: DieType) -> Result<u64> {
        let spec = DieSpec::for_die(die);
        let shape = self.shapes.get_or_build(die, &self.provider)?;

        self.supersede();

        self.generation += 1;
        let generation = self.generation;

        let spawn = self.world.arena().spawn_position();
        let mut body = RigidBody::new(
            shape,
            Transform::from_position_scale(spawn, spec.base_scale),
            spec.mass,
        );
        body.set_material(spec.material);
        body.set_linear_damping(spec.linear_damping);
        body.set_angular_damping(spec.angular_damping);

        let (linear, angular) = self.config.impulse.sample(&mut self.rng);
        body.set_linear_velocity(linear);
        body.set_angular_velocity(angular);

        let handle = self.world.add_body(body);

        self.detector.rearm(generation);
        self.session = Some(LaunchSession {
            die,
            body: handle,
            generation,
            base_scale: spec.base_scale,
            shrink: None,
        });
        self.state = LaunchState::Rolling;
        self.events.push_back(LaunchEvent::Launched {
            generation,
            die,
            body: handle,
        });

        tracing::info!(%die, generation, ?spawn, ?linear, ?angular, "die launched");

        Ok(generation)
    }

    /// Advances the simulation and the launch by one frame
    pub fn tick(&mut self, frame_dt: f32) {
        let dt = frame_dt.max(0.0);
        self.world.step(dt);

        match self.state {
            LaunchState::Idle => {}
            LaunchState::Rolling => self.update_rolling(dt),
            LaunchState::Settling => self.update_settling(dt),
            LaunchState::Despawning => self.despawn(),
        }
    }

    /// Lays the arena out again for a new viewport
    ///
    /// A die in flight keeps its position; only later launches use the new
    /// spawn point.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.world.set_arena(Arena::from_viewport(&self.config.arena, viewport));

        tracing::debug!(width = viewport.width, height = viewport.height, "arena resized");
    }

    /// Drains the events produced since the last call
    pub fn take_events(&mut self) -> Vec<LaunchEvent> {
        self.events.drain(..).collect()
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    /// Returns the generation of the most recent launch, zero before the first
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the current launch, if any
    pub fn session(&self) -> Option<&LaunchSession> {
        self.session.as_ref()
    }

    /// Returns the body of the current launch, if any
    pub fn live_body(&self) -> Option<BodyHandle> {
        self.session.as_ref().map(|s| s.body)
    }

    /// Returns the render scale of the live die
    pub fn render_scale(&self) -> Option<f32> {
        let handle = self.live_body()?;
        self.world.get_body(handle).ok().map(|b| b.get_scale())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn shape_cache(&self) -> &ShapeCache {
        &self.shapes
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Removes the die of the launch in flight, if there is one
    fn supersede(&mut self) {
        let Some(old) = self.session.take() else {
            return;
        };

        if let Err(err) = self.world.remove_body(old.body) {
            tracing::warn!(generation = old.generation, %err, "superseded die was already gone");
        }
        self.detector.disarm();
        self.events.push_back(LaunchEvent::Superseded {
            generation: old.generation,
        });

        tracing::info!(generation = old.generation, state = ?self.state, "launch superseded");
        self.state = LaunchState::Idle;
    }

    fn update_rolling(&mut self, dt: f32) {
        let Some(session) = self.session.as_ref() else {
            self.state = LaunchState::Idle;
            return;
        };
        let generation = session.generation;

        let (linear_speed, angular_speed) = match self.world.get_body(session.body) {
            Ok(body) => (body.linear_speed(), body.angular_speed()),
            Err(err) => {
                tracing::warn!(generation, %err, "rolling die disappeared");
                self.abandon();
                return;
            }
        };

        if let Some(settled) = self.detector.observe(generation, linear_speed, angular_speed, dt) {
            self.begin_settling(settled.generation);
        }
    }

    fn begin_settling(&mut self, generation: u64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.generation != generation {
            return;
        }

        if let Ok(body) = self.world.get_body_mut(session.body) {
            body.set_rotation(Quaternion::identity());
        }
        if let Err(err) = self.world.freeze_body(session.body) {
            tracing::warn!(generation, %err, "settled die disappeared");
        }

        session.shrink = Some(ShrinkAnimation::new(generation, session.base_scale, &self.config.shrink));
        self.state = LaunchState::Settling;
        self.events.push_back(LaunchEvent::Settled { generation });

        tracing::info!(die = %session.die, generation, "die settled");
    }

    fn update_settling(&mut self, dt: f32) {
        let Some(session) = self.session.as_mut() else {
            self.state = LaunchState::Idle;
            return;
        };

        let finished = match session.shrink.as_mut() {
            Some(shrink) if shrink.generation() == session.generation => {
                let scale = shrink.advance(dt);
                if let Ok(body) = self.world.get_body_mut(session.body) {
                    body.set_scale(scale);
                }
                shrink.is_finished()
            }
            _ => true,
        };

        if finished {
            tracing::debug!(generation = session.generation, "shrink finished");
            self.state = LaunchState::Despawning;
            self.despawn();
        }
    }

    fn despawn(&mut self) {
        let Some(session) = self.session.take() else {
            self.state = LaunchState::Idle;
            return;
        };

        if let Err(err) = self.world.remove_body(session.body) {
            tracing::warn!(generation = session.generation, %err, "despawned die was already gone");
        }
        self.detector.disarm();
        self.state = LaunchState::Idle;
        self.events.push_back(LaunchEvent::Stopped {
            generation: session.generation,
        });

        tracing::info!(die = %session.die, generation = session.generation, "launch stopped");
    }

    /// Drops the current launch without reporting it as stopped
    fn abandon(&mut self) {
        self.session = None;
        self.detector.disarm();
        self.state = LaunchState::Idle;
    }
}
