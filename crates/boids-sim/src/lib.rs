//! `boids-sim`: the per-frame update pipeline.
//!
//! # Frame
//!
//! ```text
//! on_frame_start
//!   Ⓐ Steering  : neighbor scan per agent: cohesion, alignment, danger,
//!                 border turn.  Grid is read-only.
//!   Ⓑ Velocity  : apply weighted steering, clamp speed to [min, max].
//!   Ⓒ Position  : advance by dt × velocity, clamp onto the plane, move
//!                 agents whose cell changed.
//! on_frame_end
//! refresh triangles → on_geometry
//! ```
//!
//! Every phase runs on a Rayon pool built once with `threads` workers, and
//! each completes before the next starts.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use boids_core::FlockConfig;
//! use boids_sim::{FixedStep, FlockSimBuilder, NoopObserver};
//!
//! let config = FlockConfig { max_frames: 600, ..FlockConfig::default() };
//! let mut sim = FlockSimBuilder::new(config).build()?;
//! sim.run(&mut FixedStep(1.0 / 60.0), &mut NoopObserver);
//! ```

pub mod builder;
pub mod clock;
pub mod error;
pub mod geometry;
pub mod observer;
pub mod pipeline;
pub mod sim;


pub use builder::FlockSimBuilder;
pub use clock::{FixedStep, FrameClock, WallClock};
pub use error::{SimError, SimResult};
pub use geometry::Triangle;
pub use observer::{FrameObserver, NoopObserver};
pub use pipeline::clamp_speed;
pub use sim::FlockSim;
