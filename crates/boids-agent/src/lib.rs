//! `boids-agent`: Structure-of-Arrays agent storage for the flocking simulation.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`store`]   | `AgentStore` (SoA kinematics), `Steering` scratch     |
//! | [`builder`] | `AgentStoreBuilder` (zeroed or randomized placement)  |
//!
//! Agents are created once and live for the whole run: there is no push or
//! remove, so an `AgentId` is valid for every array at all times.

pub mod builder;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use store::{AgentStore, Steering};
