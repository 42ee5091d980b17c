//! `boids-grid`: spatial partitioning for flocking neighbor queries.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`grid`]  | `SpatialGrid` (row-major cells), `SharedCells` writer       |
//! | [`lock`]  | `CellLock` strategy, `NoLock`, `MutexLock`, `CellGuard`     |
//! | [`error`] | `GridError`, `GridResult<T>`                                |

pub mod error;
pub mod grid;
pub mod lock;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use grid::{SharedCells, SpatialGrid};
pub use lock::{CellGuard, CellLock, MutexLock, NoLock, lock_for_threads};
