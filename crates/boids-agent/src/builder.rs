//! Fluent builder for constructing an `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use boids_agent::AgentStoreBuilder;
//!
//! let store = AgentStoreBuilder::new(1_000, /*seed=*/ 42)
//!     .randomize(1_280, 720, 60.0)
//!     .build();
//!
//! assert_eq!(store.count, 1_000);
//! assert!(store.x.iter().all(|&x| (0.0..1_280.0).contains(&x)));
//! ```

use std::f32::consts::TAU;

use boids_core::{AgentId, AgentRng, EDGE_EPSILON};

use crate::AgentStore;

/// Uniform random placement inside a `width × height` plane.
#[derive(Copy, Clone, Debug)]
struct Scatter {
    width:  usize,
    height: usize,
    speed:  f32,
}

/// Fluent builder for [`AgentStore`].
///
/// All arrays are allocated up front; without [`randomize`](Self::randomize)
/// every agent starts at the origin with zero velocity.
pub struct AgentStoreBuilder {
    count:   usize,
    seed:    u64,
    scatter: Option<Scatter>,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents using `seed` as the global RNG seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, scatter: None }
    }

    /// Scatter agents uniformly over `[0, width − ε) × [0, height − ε)`, each
    /// heading in a uniform random direction at `speed`.
    pub fn randomize(mut self, width: usize, height: usize, speed: f32) -> Self {
        self.scatter = Some(Scatter { width, height, speed });
        self
    }

    pub fn build(self) -> AgentStore {
        let mut store = AgentStore::zeroed(self.count);
        let Some(scatter) = self.scatter else {
            return store;
        };

        let max_x = (scatter.width as f32 - EDGE_EPSILON).max(f32::EPSILON);
        let max_y = (scatter.height as f32 - EDGE_EPSILON).max(f32::EPSILON);

        for i in 0..self.count {
            let mut rng = AgentRng::new(self.seed, AgentId(i as u32));
            let angle: f32 = rng.gen_range(0.0..TAU);
            store.x[i] = rng.gen_range(0.0..max_x);
            store.y[i] = rng.gen_range(0.0..max_y);
            store.vx[i] = angle.cos() * scatter.speed;
            store.vy[i] = angle.sin() * scatter.speed;
        }
        store
    }
}
