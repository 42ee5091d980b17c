use boids_core::{AgentId, CoreError};
use boids_grid::GridError;
use thiserror::Error;

/// Start-up failures.  A built [`FlockSim`](crate::FlockSim) never errors.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("agent store holds {got} agents but population is {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
    },

    #[error("{agent} at ({x}, {y}) lies outside the plane")]
    OutOfBounds {
        agent: AgentId,
        x:     f32,
        y:     f32,
    },

    #[error("spatial grid error: {0}")]
    Grid(#[from] GridError),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;
