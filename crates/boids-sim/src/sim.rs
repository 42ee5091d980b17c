//! The frame loop: [`FlockSim`] and its `step` / `run` methods.

use boids_agent::AgentStore;
use boids_core::{AgentId, FlockConfig};
use boids_grid::SpatialGrid;
use glam::Vec2;
use rayon::ThreadPool;
use rayon::prelude::*;

use crate::{FrameClock, FrameObserver, Triangle, pipeline};

/// A running flock simulation.
///
/// Build one with [`FlockSimBuilder`][crate::FlockSimBuilder].  The
/// configuration is frozen at build time; the worker pool is created once and
/// reused for every frame.
#[derive(Debug)]
pub struct FlockSim {
    pub(crate) config:   FlockConfig,
    pub(crate) agents:   AgentStore,
    pub(crate) grid:     SpatialGrid,
    pub(crate) geometry: Vec<Triangle>,
    pub(crate) pool:     ThreadPool,
    pub(crate) frame:    u64,
}

impl FlockSim {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// One triangle per agent, as of the last completed frame.
    pub fn geometry(&self) -> &[Triangle] {
        &self.geometry
    }

    /// Number of frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    // ── Frame loop ────────────────────────────────────────────────────────

    /// Run frames until `max_frames` is reached (never, if it is 0) or
    /// `clock` returns `None`.  Returns the number of frames run by this call.
    pub fn run<C, O>(&mut self, clock: &mut C, observer: &mut O) -> u64
    where
        C: FrameClock,
        O: FrameObserver,
    {
        let first = self.frame;
        while !self.finished() {
            let Some(elapsed) = clock.next_frame() else {
                tracing::debug!(frame = self.frame, "frame source stopped");
                break;
            };
            self.step(elapsed, observer);
        }
        observer.on_sim_end(self.frame);
        tracing::info!(frames = self.frame - first, "simulation finished");
        self.frame - first
    }

    /// Step exactly `frames` frames of `dt` seconds each, ignoring
    /// `max_frames`.
    pub fn run_frames<O: FrameObserver>(&mut self, frames: u64, dt: f32, observer: &mut O) {
        for _ in 0..frames {
            self.step(dt, observer);
        }
    }

    /// Advance the simulation by one frame of `elapsed_secs` seconds.
    ///
    /// Negative or non-finite elapsed times are treated as zero.
    pub fn step<O: FrameObserver>(&mut self, elapsed_secs: f32, observer: &mut O) {
        let dt = if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
            elapsed_secs
        } else {
            0.0
        };

        observer.on_frame_start(self.frame);
        self.accumulate_steering();
        self.integrate_velocities();
        self.integrate_positions(dt);
        observer.on_frame_end(self.frame);

        self.refresh_geometry();
        observer.on_geometry(self.frame, &self.geometry);

        self.frame += 1;
    }

    fn finished(&self) -> bool {
        self.config.max_frames > 0 && self.frame >= self.config.max_frames
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Phase A: recompute every agent's steering terms.
    pub fn accumulate_steering(&mut self) {
        let Self { config, agents, grid, pool, .. } = self;
        pool.install(|| pipeline::accumulate_steering(config, agents, grid));
    }

    /// Phase B: apply steering to velocities and clamp speeds.
    pub fn integrate_velocities(&mut self) {
        let Self { config, agents, pool, .. } = self;
        pool.install(|| pipeline::integrate_velocities(config, agents));
    }

    /// Phase C: move agents by `dt` seconds and re-index the ones that
    /// changed cell.
    pub fn integrate_positions(&mut self, dt: f32) {
        let Self { config, agents, grid, pool, .. } = self;
        pool.install(|| pipeline::integrate_positions(config, agents, grid, dt));
    }

    /// Recompute presentation triangles.  Agents with zero velocity keep
    /// their previous triangle.
    pub fn refresh_geometry(&mut self) {
        let Self { config, agents, geometry, pool, .. } = self;
        let (length, width) = (config.boid_length, config.boid_width);
        let AgentStore { x, y, vx, vy, .. } = agents;

        pool.install(|| {
            (&mut *geometry, &*x, &*y, &*vx, &*vy)
                .into_par_iter()
                .for_each(|(tri, &x, &y, &vx, &vy)| {
                    if let Some(t) = Triangle::oriented(Vec2::new(x, y), Vec2::new(vx, vy), length, width) {
                        *tri = t;
                    }
                });
        });
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    /// First agent whose grid membership disagrees with its position, if
    /// any.  Intended for tests and debug assertions.
    pub fn check_grid_invariant(&self) -> Option<AgentId> {
        self.grid.find_misplaced(&self.agents.x, &self.agents.y)
    }
}

/// Initial triangles: oriented where the heading is defined, collapsed onto
/// the position otherwise.
pub(crate) fn initial_geometry(config: &FlockConfig, agents: &AgentStore) -> Vec<Triangle> {
    agents
        .agent_ids()
        .map(|id| {
            let pos = agents.position(id);
            Triangle::oriented(pos, agents.velocity(id), config.boid_length, config.boid_width)
                .unwrap_or_else(|| Triangle::collapsed(pos))
        })
        .collect()
}
