//! Simulation configuration.
//!
//! `FlockConfig` is built once (typically deserialized from a TOML file by the
//! application crate), validated, and then shared read-only with every worker.
//! Nothing mutates it while a run is in progress.

use crate::{CoreError, CoreResult};

/// Gap kept between a position and the high edge of the plane, so that
/// `floor(x / square_size)` never lands one cell past the last column or row.
pub const EDGE_EPSILON: f32 = 0.1;

/// Largest accepted `width`/`height`.  Above 2^20 the f32 spacing exceeds
/// `EDGE_EPSILON` and `extent - EDGE_EPSILON` rounds back up to `extent`.
pub const MAX_PLANE_EXTENT: usize = 1 << 20;

/// Top-level flocking configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlockConfig {
    /// Number of agents, created once at start-up.
    pub population: usize,

    /// Plane extent.  Positions always lie in `[0, width) × [0, height)`.
    pub width:  usize,
    pub height: usize,

    /// Stop after this many frames.  `0` runs until the frame source quits.
    pub max_frames: u64,

    /// Worker threads in the update pool.  `1` selects lock-free cell writes.
    pub threads: usize,

    /// Minimum agents per work unit in the neighbor-scan phase.
    pub neighbor_chunk_size: usize,

    /// Presentation: triangle length (tip distance) and half-base width.
    pub boid_length: f32,
    pub boid_width:  f32,

    /// Presentation: RGB in `[0, 1]`.
    pub boid_color: [f32; 3],

    pub min_velocity: f32,
    pub max_velocity: f32,

    /// Radius for cohesion/alignment.  Also fixes the grid cell size.
    pub visible_range: f32,

    /// Radius inside which agents repel each other.
    pub danger_range: f32,

    pub alignment_factor: f32,
    pub cohesion_factor:  f32,
    pub danger_factor:    f32,

    /// Distance from each edge at which agents start turning back.
    pub margin: f32,

    /// Velocity added per frame while inside the margin.
    pub turn_speed: f32,

    /// Master RNG seed for the initial placement.
    pub seed: u64,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            population:          2_000,
            width:               1_280,
            height:              720,
            max_frames:          0,
            threads:             1,
            neighbor_chunk_size: 64,
            boid_length:         8.0,
            boid_width:          4.0,
            boid_color:          [1.0, 1.0, 1.0],
            min_velocity:        60.0,
            max_velocity:        180.0,
            visible_range:       40.0,
            danger_range:        8.0,
            alignment_factor:    0.05,
            cohesion_factor:     0.0005,
            danger_factor:       0.05,
            margin:              100.0,
            turn_speed:          4.0,
            seed:                42,
        }
    }
}

impl FlockConfig {
    #[inline]
    pub fn visible_range_sq(&self) -> f32 {
        self.visible_range * self.visible_range
    }

    #[inline]
    pub fn danger_range_sq(&self) -> f32 {
        self.danger_range * self.danger_range
    }

    /// Side length of one grid cell: `ceil(2 × visible_range)`.
    ///
    /// The neighbor query only scans the half of the 3×3 block nearest the
    /// agent, which is exact only while a cell is at least twice the visible
    /// range.  Deriving it here keeps the two from ever being configured apart.
    #[inline]
    pub fn square_size(&self) -> usize {
        (2.0 * self.visible_range).ceil() as usize
    }

    /// Largest coordinate a position may take on each axis.  Strictly below
    /// `width`/`height` for every plane that passes [`validate`](Self::validate).
    #[inline]
    pub fn position_bounds(&self) -> (f32, f32) {
        (
            self.width as f32 - EDGE_EPSILON,
            self.height as f32 - EDGE_EPSILON,
        )
    }

    /// Check every setting.  Any error is fatal: callers report it and stop
    /// before creating simulation state.
    pub fn validate(&self) -> CoreResult<()> {
        let floats = [
            ("boid_length", self.boid_length),
            ("boid_width", self.boid_width),
            ("min_velocity", self.min_velocity),
            ("max_velocity", self.max_velocity),
            ("visible_range", self.visible_range),
            ("danger_range", self.danger_range),
            ("alignment_factor", self.alignment_factor),
            ("cohesion_factor", self.cohesion_factor),
            ("danger_factor", self.danger_factor),
            ("margin", self.margin),
            ("turn_speed", self.turn_speed),
        ];
        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(config_err(format!("{name} must be finite, but was {value}")));
        }

        if self.population < 1 {
            return Err(config_err(format!(
                "population should be at least 1, but was {}",
                self.population
            )));
        }
        if self.width < 1 || self.height < 1 {
            return Err(config_err(format!(
                "plane must be at least 1×1, but was {}×{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_PLANE_EXTENT || self.height > MAX_PLANE_EXTENT {
            return Err(config_err(format!(
                "plane must be at most {MAX_PLANE_EXTENT}×{MAX_PLANE_EXTENT}, but was {}×{}",
                self.width, self.height
            )));
        }
        if self.threads < 1 {
            return Err(config_err("threads should be at least 1".into()));
        }
        if self.neighbor_chunk_size < 1 {
            return Err(config_err("neighbor_chunk_size should be at least 1".into()));
        }
        if self.min_velocity < 0.0 {
            return Err(config_err(format!(
                "min velocity can not be negative, but was {}",
                self.min_velocity
            )));
        }
        if self.max_velocity < self.min_velocity {
            return Err(config_err(format!(
                "max velocity ({}) should not be less than min velocity ({})",
                self.max_velocity, self.min_velocity
            )));
        }
        if self.boid_length <= 0.0 || self.boid_width <= 0.0 {
            return Err(config_err(format!(
                "boid length and width must be greater than 0, but were {} and {}",
                self.boid_length, self.boid_width
            )));
        }
        if self.visible_range <= 0.0 {
            return Err(config_err(format!(
                "visible range must be greater than 0, but was {}",
                self.visible_range
            )));
        }
        if self.danger_range < 0.0 {
            return Err(config_err(format!(
                "danger range can not be negative, but was {}",
                self.danger_range
            )));
        }
        if self.visible_range < self.danger_range {
            return Err(config_err(format!(
                "visible range ({}) should not be less than danger range ({})",
                self.visible_range, self.danger_range
            )));
        }
        if self.boid_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            let [r, g, b] = self.boid_color;
            return Err(config_err(format!(
                "color channels should be between 0 and 1, but were ({r}, {g}, {b})"
            )));
        }
        Ok(())
    }
}

fn config_err(msg: String) -> CoreError {
    CoreError::Config(msg)
}
