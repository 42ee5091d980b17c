//! `boids-core`: foundational types for the boids flocking simulation.
//!
//! Every other `boids-*` crate depends on this one.  It has no `boids-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                      |
//! |-------------|-----------------------------------------------|
//! | [`ids`]     | `AgentId`, `CellIndex`                        |
//! | [`config`]  | `FlockConfig` and its validation              |
//! | [`rng`]     | `AgentRng` (per-agent, deterministic)         |
//! | [`error`]   | `CoreError`, `CoreResult`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EDGE_EPSILON, FlockConfig, MAX_PLANE_EXTENT};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, CellIndex};
pub use rng::AgentRng;
