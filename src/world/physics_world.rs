use log::{debug, trace};

use crate::broadphase::{create_broadphase, CollisionBroadphase};
use crate::collision::{CollisionEvent, ContactTracker, Pair};
use crate::common::PhysicsConfig;
use crate::debug::{draw_body, draw_pair, DebugSurface};
use crate::error::CollisionError;
use crate::integration::integrator;
use crate::objects::{Body, BodyId};
use crate::shapes::Shape;
use crate::solver;

/// Counters for a single `PhysicsWorld::step`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Pairs produced by the broadphase overlap query.
    pub pairs: usize,
    /// Distinct pairs that touched in any collision pass.
    pub collisions: usize,
    pub fast_bodies: usize,
    pub fast_body_collisions: usize,
    /// Broadphase index reinsertions.
    pub tree_updates: usize,
}

pub struct PhysicsWorld {
    bodies: Vec<Body>,
    config: PhysicsConfig,
    broadphase: Box<dyn CollisionBroadphase>,
    // Pairs from the last step, with their final contacts.
    pairs: Vec<Pair>,
    events: Vec<CollisionEvent>,
    tracker: ContactTracker,
}

impl PhysicsWorld {
    /// Creates a new, empty physics world.
    pub fn new(config: PhysicsConfig) -> Result<Self, CollisionError> {
        config.validate()?;
        Ok(Self {
            broadphase: create_broadphase(&config),
            bodies: Vec::new(),
            config,
            pairs: Vec::new(),
            events: Vec::new(),
            tracker: ContactTracker::new(),
        })
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Replaces the configuration. Switching broadphase strategy rebuilds the
    /// index and re-tracks every body.
    pub fn set_config(&mut self, config: PhysicsConfig) -> Result<(), CollisionError> {
        config.validate()?;
        let rebuild = config.broadphase_strategy != self.config.broadphase_strategy
            || config.world_bounds != self.config.world_bounds;
        self.config = config;
        if rebuild {
            debug!("rebuilding broadphase as {:?}", self.config.broadphase_strategy);
            self.broadphase = create_broadphase(&self.config);
            for body in self.bodies.iter().filter(|b| !b.is_killed()) {
                self.broadphase.track(body, &self.config)?;
            }
        }
        Ok(())
    }

    /// A body with `shape` and the configured default mass, not yet added.
    pub fn create_body(&self, shape: Shape) -> Body {
        Body::new(shape).with_mass(self.config.default_mass)
    }

    /// Adds a body and starts tracking it.
    pub fn add_body(&mut self, mut body: Body) -> Result<BodyId, CollisionError> {
        body.recalc();
        self.broadphase.track(&body, &self.config)?;
        let id = body.id();
        self.bodies.push(body);
        Ok(id)
    }

    /// Removes a body. Returns it, or `None` if it was not in the world.
    pub fn remove_body(&mut self, id: BodyId) -> Result<Option<Body>, CollisionError> {
        self.broadphase.untrack(id)?;
        self.tracker.forget(id);
        let Some(index) = self.bodies.iter().position(|b| b.id() == id) else {
            return Ok(None);
        };
        self.pairs.clear();
        Ok(Some(self.bodies.remove(index)))
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id() == id)
    }

    /// Bodies in registration order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Pairs found by the last step.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Takes the events buffered since the last drain.
    pub fn drain_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f64) -> Result<FrameStats, CollisionError> {
        let mut stats = FrameStats::default();
        if dt <= 0.0 {
            return Ok(stats);
        }

        // 1. Integrate motion
        for body in self.bodies.iter_mut().filter(|b| !b.is_killed()) {
            body.capture_old_transform();
            integrator::integrate(body, self.config.gravity, dt);
            body.recalc();
        }

        if !self.config.enabled {
            self.pairs.clear();
            return Ok(stats);
        }

        // 2. Refresh the broadphase index
        stats.tree_updates = self.broadphase.update(&self.bodies, &self.config)?;

        // 3. Candidate pairs, sweeping fast bodies
        self.pairs = self
            .broadphase
            .broadphase(&mut self.bodies, dt, &self.config, &mut stats)?;

        // 4. Narrowphase + resolution passes
        self.tracker.begin_frame();
        stats.collisions = solver::solve(
            &mut self.bodies,
            &mut self.pairs,
            dt,
            &self.config,
            &mut self.events,
            &mut self.tracker,
        );

        // 5. Start/end notifications
        self.tracker.end_frame(&mut self.events);

        trace!("step: {stats:?}");
        Ok(stats)
    }

    /// Draws the layers enabled in `config.debug`.
    pub fn debug_draw(&self, surface: &mut dyn DebugSurface) {
        let flags = &self.config.debug;
        if flags.broadphase_debug {
            self.broadphase.debug_draw(surface);
        }
        for body in self.bodies.iter().filter(|b| !b.is_killed()) {
            draw_body(body, flags, surface);
        }
        for pair in &self.pairs {
            draw_pair(pair, flags, surface);
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self {
            broadphase: create_broadphase(&PhysicsConfig::default()),
            bodies: Vec::new(),
            config: PhysicsConfig::default(),
            pairs: Vec::new(),
            events: Vec::new(),
            tracker: ContactTracker::new(),
        }
    }
}
