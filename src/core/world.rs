use crate::arena::Arena;
use crate::bodies::RigidBody;
use crate::collision::{ContactGenerator, ContactSolver, SequentialImpulseSolver, VertexContactGenerator};
use crate::core::{
    BodyEvent, BodyEventType, BodyHandle, BodyStorage, ContactEvent, EventQueue, GravityType,
    SimulationConfig,
};
use crate::error::DiceError;
use crate::math::Vector3;
use crate::Result;

/// The physics world: the dice currently in play and the arena they roll in
pub struct PhysicsWorld {
    /// All rigid bodies in the world
    bodies: BodyStorage<RigidBody>,

    /// The static geometry bodies collide with
    arena: Arena,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Queue of physics events
    events: EventQueue,

    /// The total elapsed simulation time
    time: f32,

    /// Finds contacts between bodies and the arena
    contact_generator: Box<dyn ContactGenerator>,

    /// Resolves those contacts
    solver: SequentialImpulseSolver,
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings and a bare ground plane
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Creates a new physics world with the given configuration
    pub fn with_config(config: SimulationConfig) -> Self {
        Self::with_arena(config, Arena::ground_only(Vector3::zeros()))
    }

    /// Creates a new physics world with the given configuration and arena
    pub fn with_arena(config: SimulationConfig, arena: Arena) -> Self {
        let solver = SequentialImpulseSolver::new(
            config.restitution_velocity_threshold,
            config.penetration_slop,
            config.position_correction,
        );

        Self {
            bodies: BodyStorage::new(),
            arena,
            config,
            events: EventQueue::new(),
            time: 0.0,
            contact_generator: Box::new(VertexContactGenerator::new()),
            solver,
        }
    }

    /// Returns the current simulation time
    pub fn get_time(&self) -> f32 {
        self.time
    }

    /// Sets the gravity for the simulation
    pub fn set_gravity(&mut self, gravity: GravityType) {
        self.config.gravity = gravity;
    }

    /// Gets the current gravity
    pub fn get_gravity(&self) -> GravityType {
        self.config.gravity
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the arena
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Replaces the arena; bodies already in the world are left where they are
    pub fn set_arena(&mut self, arena: Arena) {
        self.arena = arena;
    }

    /// Replaces the contact generator
    pub fn set_contact_generator(&mut self, generator: Box<dyn ContactGenerator>) {
        self.contact_generator = generator;
    }

    /// Adds a rigid body to the world and returns its handle
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.bodies.add(body);

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Added,
            body: handle,
        });

        handle
    }

    /// Removes a rigid body from the world
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody> {
        let body = self
            .bodies
            .remove(handle)
            .ok_or_else(|| DiceError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))?;

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Removed,
            body: handle,
        });

        Ok(body)
    }

    /// Gets a reference to a rigid body by its handle
    pub fn get_body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.bodies.get_body(handle)
    }

    /// Gets a mutable reference to a rigid body by its handle
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        self.bodies.get_body_mut(handle)
    }

    /// Returns whether the handle refers to a body in the world
    pub fn contains_body(&self, handle: BodyHandle) -> bool {
        self.bodies.get(handle).is_some()
    }

    /// Returns the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Returns an iterator over all bodies
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> + '_ {
        self.bodies.iter()
    }

    /// Removes every body from the world
    pub fn clear(&mut self) {
        for handle in self.bodies.handles() {
            self.events.add_body_event(BodyEvent {
                event_type: BodyEventType::Removed,
                body: handle,
            });
        }
        self.bodies.clear();
    }

    /// Takes a body out of the simulation, holding it where it is
    pub fn freeze_body(&mut self, handle: BodyHandle) -> Result<()> {
        let body = self.bodies.get_body_mut(handle)?;
        if body.is_frozen() {
            return Ok(());
        }
        body.freeze();

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Frozen,
            body: handle,
        });

        Ok(())
    }

    /// Returns the event queue
    pub fn get_events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns the event queue mutably, for draining
    pub fn get_events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Runs the physics simulation for the given time step
    ///
    /// The step is split into fixed substeps of at most `time_step` seconds,
    /// and at most `max_substeps` of them are run; anything left over is
    /// dropped so a long frame cannot stall the caller.
    pub fn step(&mut self, time_step: f32) {
        // Clear events from previous step
        self.events.clear();

        let fixed_step = self.config.time_step;
        let max_steps = self.config.max_substeps;

        let mut remaining_time = time_step;
        let mut steps = 0;

        while remaining_time > 0.0 && steps < max_steps {
            let dt = fixed_step.min(remaining_time);

            self.step_simulation(dt);

            remaining_time -= dt;
            steps += 1;
        }

        if remaining_time > 0.0 {
            tracing::trace!(dropped = remaining_time, "frame longer than the substep budget");
        }

        self.time += time_step - remaining_time.max(0.0);
    }

    /// Performs a single step of the physics simulation
    fn step_simulation(&mut self, dt: f32) {
        let gravity = self.config.gravity.acceleration();

        for (handle, body) in self.bodies.iter_mut() {
            if !body.is_simulated() {
                continue;
            }

            // Apply gravity
            if body.is_affected_by_gravity() {
                body.set_linear_velocity(body.get_linear_velocity() + gravity * dt);
            }

            // Apply damping
            body.apply_damping(dt);

            // Resolve contacts against the arena
            let manifolds = self.contact_generator.generate_contacts(handle, body, &self.arena);
            if !manifolds.is_empty() {
                self.solver.prepare(&manifolds, body);
                for _ in 0..self.config.velocity_iterations {
                    self.solver.solve_velocity(&manifolds, body);
                }

                if body.generates_contact_events() {
                    let impulses = self.solver.normal_impulses(manifolds.len());
                    for (manifold, normal_impulse) in manifolds.iter().zip(impulses) {
                        self.events.add_contact_event(ContactEvent {
                            body: handle,
                            surface: manifold.surface,
                            contact_count: manifold.contact_count(),
                            normal_impulse,
                        });
                    }
                }
            }

            // Integrate velocities to update positions
            body.integrate_velocity(dt);

            // Push out of whatever is still penetrated after moving
            let manifolds = self.contact_generator.generate_contacts(handle, body, &self.arena);
            if !manifolds.is_empty() {
                self.solver.solve_position(&manifolds, body);
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
