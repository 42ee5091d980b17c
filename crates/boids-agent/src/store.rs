//! Core agent storage: kinematic SoA arrays plus per-frame steering scratch.
//!
//! # Why SoA?
//!
//! The neighbor scan reads `x`/`y` of many agents and nothing else, and the
//! integration phases stream through `vx`/`vy` linearly.  Keeping each field
//! in its own `Vec` makes both access patterns contiguous and lets Rayon hand
//! out disjoint `&mut` slices per field:
//!
//! ```ignore
//! // boids-sim velocity phase (simplified):
//! (&mut store.vx, &mut store.vy, &store.steering)
//!     .into_par_iter()
//!     .for_each(|(vx, vy, steer)| { /* ... */ });
//! ```

use boids_core::AgentId;
use glam::Vec2;

// ── Steering ──────────────────────────────────────────────────────────────────

/// Per-agent force terms produced by the neighbor scan.
///
/// Every field is overwritten for every agent each frame before it is read,
/// so nothing carries over between frames.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Steering {
    /// Mean visible-neighbor position minus own position.
    pub cohesion: Vec2,
    /// Mean visible-neighbor velocity minus own velocity.
    pub alignment: Vec2,
    /// Sum of `own - other` over neighbors inside the danger range.
    pub danger: Vec2,
    /// Border turn factor, each axis in `{-1, 0, 1}`.
    pub turn: Vec2,
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let x = store.x[agent.index()];  // O(1), cache-friendly
/// ```
///
/// Fields are `pub` so tests and applications can place agents directly
/// before handing the store to `FlockSimBuilder`.
#[derive(Clone, Debug)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Kinematics ────────────────────────────────────────────────────────
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,

    // ── Update-pass scratch ───────────────────────────────────────────────
    /// Written by the neighbor scan, consumed by velocity integration.
    pub steering: Vec<Steering>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Vec2 {
        let i = agent.index();
        Vec2::new(self.x[i], self.y[i])
    }

    #[inline]
    pub fn velocity(&self, agent: AgentId) -> Vec2 {
        let i = agent.index();
        Vec2::new(self.vx[i], self.vy[i])
    }

    /// Euclidean norm of the agent's velocity.
    #[inline]
    pub fn speed(&self, agent: AgentId) -> f32 {
        self.velocity(agent).length()
    }

    /// Overwrite one agent's kinematic state.
    ///
    /// Does not touch any spatial index; only call this before the store is
    /// handed to the simulation.
    pub fn place(&mut self, agent: AgentId, position: Vec2, velocity: Vec2) {
        let i = agent.index();
        self.x[i] = position.x;
        self.y[i] = position.y;
        self.vx[i] = velocity.x;
        self.vy[i] = velocity.y;
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn zeroed(count: usize) -> Self {
        Self {
            count,
            x: vec![0.0; count],
            y: vec![0.0; count],
            vx: vec![0.0; count],
            vy: vec![0.0; count],
            steering: vec![Steering::default(); count],
        }
    }
}
