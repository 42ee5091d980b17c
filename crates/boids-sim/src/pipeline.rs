//! The three per-frame update phases.
//!
//! Each phase is one Rayon parallel loop.  A phase returns only after every
//! agent has been processed, so the return is the barrier the next phase
//! relies on:
//!
//! | Phase | Reads                         | Writes                 | Partitioning          |
//! |-------|-------------------------------|------------------------|-----------------------|
//! | A     | grid, `x`, `y`, `vx`, `vy`    | `steering`             | adaptive, `min_len` = chunk |
//! | B     | `steering`                    | `vx`, `vy`             | static                |
//! | C     | `vx`, `vy`                    | `x`, `y`, grid cells   | static                |

use boids_agent::{AgentStore, Steering};
use boids_core::{AgentId, FlockConfig};
use boids_grid::SpatialGrid;
use glam::Vec2;
use rayon::prelude::*;

// ── Phase A: force accumulation ───────────────────────────────────────────────

/// Fill `agents.steering` from the neighbor scan.  The grid is only read.
pub(crate) fn accumulate_steering(config: &FlockConfig, agents: &mut AgentStore, grid: &SpatialGrid) {
    let AgentStore { x, y, vx, vy, steering, .. } = agents;
    let kin = Kinematics { x, y, vx, vy };

    steering
        .par_iter_mut()
        .enumerate()
        .with_min_len(config.neighbor_chunk_size.max(1))
        .for_each(|(i, steer)| *steer = steering_for(config, grid, &kin, i));
}

/// Read-only view of the kinematic arrays during Phase A.
struct Kinematics<'a> {
    x:  &'a [f32],
    y:  &'a [f32],
    vx: &'a [f32],
    vy: &'a [f32],
}

fn steering_for(config: &FlockConfig, grid: &SpatialGrid, kin: &Kinematics<'_>, i: usize) -> Steering {
    let pos = Vec2::new(kin.x[i], kin.y[i]);
    let vel = Vec2::new(kin.vx[i], kin.vy[i]);
    let visible_sq = config.visible_range_sq();
    let danger_sq = config.danger_range_sq();

    let mut pos_sum = Vec2::ZERO;
    let mut vel_sum = Vec2::ZERO;
    let mut visible = 0u32;
    let mut danger = Vec2::ZERO;

    grid.for_each_neighbor(pos.x, pos.y, |other| {
        let j = other.index();
        if j == i {
            return;
        }
        let other_pos = Vec2::new(kin.x[j], kin.y[j]);
        let dist_sq = pos.distance_squared(other_pos);
        if dist_sq > visible_sq {
            return;
        }
        if dist_sq > danger_sq {
            pos_sum += other_pos;
            vel_sum += Vec2::new(kin.vx[j], kin.vy[j]);
            visible += 1;
        } else {
            danger += pos - other_pos;
        }
    });

    let (cohesion, alignment) = if visible > 0 {
        let n = visible as f32;
        (pos_sum / n - pos, vel_sum / n - vel)
    } else {
        (Vec2::ZERO, Vec2::ZERO)
    };

    Steering {
        cohesion,
        alignment,
        danger,
        turn: Vec2::new(
            border_turn(pos.x, config.width as f32, config.margin),
            border_turn(pos.y, config.height as f32, config.margin),
        ),
    }
}

/// `+1` near the low edge, `-1` near the high edge, `0` in between.
#[inline]
fn border_turn(coord: f32, extent: f32, margin: f32) -> f32 {
    if coord < margin {
        1.0
    } else if coord > extent - margin {
        -1.0
    } else {
        0.0
    }
}

// ── Phase B: velocity integration ─────────────────────────────────────────────

pub(crate) fn integrate_velocities(config: &FlockConfig, agents: &mut AgentStore) {
    let AgentStore { vx, vy, steering, .. } = agents;

    (&mut *vx, &mut *vy, &*steering)
        .into_par_iter()
        .for_each(|(vx, vy, steer)| {
            let v = Vec2::new(*vx, *vy)
                + config.danger_factor * steer.danger
                + config.cohesion_factor * steer.cohesion
                + config.alignment_factor * steer.alignment
                + config.turn_speed * steer.turn;
            let v = clamp_speed(v, config.min_velocity, config.max_velocity);
            *vx = v.x;
            *vy = v.y;
        });
}

/// Rescale `v` so its length lies in `[min, max]`.  A zero vector has no
/// direction and is returned unchanged.
pub fn clamp_speed(v: Vec2, min: f32, max: f32) -> Vec2 {
    let speed = v.length();
    if speed == 0.0 {
        v
    } else if speed < min {
        v * (min / speed)
    } else if speed > max {
        v * (max / speed)
    } else {
        v
    }
}

// ── Phase C: position integration and re-indexing ─────────────────────────────

/// Advance positions by `dt × velocity`, clamp them onto the plane, and move
/// every agent whose cell changed.
///
/// With an exclusive cell lock the loop runs in parallel over
/// [`SharedCells`](boids_grid::SharedCells); otherwise it runs on the calling
/// thread through `&mut SpatialGrid`.
pub(crate) fn integrate_positions(
    config: &FlockConfig,
    agents: &mut AgentStore,
    grid:   &mut SpatialGrid,
    dt:     f32,
) {
    let bounds = Vec2::from(config.position_bounds());
    let AgentStore { x, y, vx, vy, .. } = agents;

    if let Some(cells) = grid.shared_cells() {
        (&mut *x, &mut *y, &*vx, &*vy)
            .into_par_iter()
            .enumerate()
            .for_each(|(i, (x, y, vx, vy))| {
                let from = cells.cell_index_of(*x, *y);
                let next = advance(Vec2::new(*x, *y), Vec2::new(*vx, *vy), dt, bounds);
                *x = next.x;
                *y = next.y;
                cells.relocate(AgentId(i as u32), from, cells.cell_index_of(next.x, next.y));
            });
        return;
    }

    for i in 0..x.len() {
        let from = grid.cell_index_of(x[i], y[i]);
        let next = advance(Vec2::new(x[i], y[i]), Vec2::new(vx[i], vy[i]), dt, bounds);
        x[i] = next.x;
        y[i] = next.y;
        grid.relocate(AgentId(i as u32), from, grid.cell_index_of(next.x, next.y));
    }
}

#[inline]
fn advance(pos: Vec2, vel: Vec2, dt: f32, bounds: Vec2) -> Vec2 {
    (pos + dt * vel).clamp(Vec2::ZERO, bounds)
}
