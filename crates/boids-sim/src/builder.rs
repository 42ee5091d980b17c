//! Fluent builder for constructing a [`FlockSim`].

use boids_agent::{AgentStore, AgentStoreBuilder};
use boids_core::FlockConfig;
use boids_grid::SpatialGrid;
use rayon::ThreadPoolBuilder;

use crate::sim::initial_geometry;
use crate::{FlockSim, SimError, SimResult};

/// Fluent builder for [`FlockSim`].
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                                                    |
/// |----------------|------------------------------------------------------------|
/// | `.agents(s)`   | `population` agents scattered at random, moving at `min_velocity` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = FlockSimBuilder::new(config).build()?;
/// sim.run(&mut WallClock::new(), &mut NoopObserver);
/// ```
pub struct FlockSimBuilder {
    config: FlockConfig,
    agents: Option<AgentStore>,
}

impl FlockSimBuilder {
    pub fn new(config: FlockConfig) -> Self {
        Self { config, agents: None }
    }

    /// Supply the initial agent state (must hold exactly `population` agents,
    /// all on the plane).
    pub fn agents(mut self, agents: AgentStore) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Validate inputs, index every agent, start the worker pool, and return a
    /// ready-to-run [`FlockSim`].
    pub fn build(self) -> SimResult<FlockSim> {
        let config = self.config;
        config.validate()?;

        // ── Resolve and check agent state ─────────────────────────────────
        let agents = match self.agents {
            Some(store) => {
                if store.count != config.population {
                    return Err(SimError::AgentCountMismatch {
                        expected: config.population,
                        got:      store.count,
                    });
                }
                store
            }
            None => AgentStoreBuilder::new(config.population, config.seed)
                .randomize(config.width, config.height, config.min_velocity)
                .build(),
        };

        let (width, height) = (config.width as f32, config.height as f32);
        for id in agents.agent_ids() {
            let pos = agents.position(id);
            if !(0.0..width).contains(&pos.x) || !(0.0..height).contains(&pos.y) {
                return Err(SimError::OutOfBounds { agent: id, x: pos.x, y: pos.y });
            }
        }

        // ── Index agents ──────────────────────────────────────────────────
        let mut grid = SpatialGrid::for_config(&config)?;
        for id in agents.agent_ids() {
            let pos = agents.position(id);
            grid.add_at(id, pos.x, pos.y);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("boids-worker-{i}"))
            .build()?;

        tracing::info!(
            population = config.population,
            threads = config.threads,
            cells = grid.cell_count(),
            "flock simulation ready"
        );

        Ok(FlockSim {
            geometry: initial_geometry(&config, &agents),
            config,
            agents,
            grid,
            pool,
            frame: 0,
        })
    }
}
