//! Unit tests for boids-grid.
//!
//! All tests use small hand-sized planes so cell indices can be worked out
//! by hand.

#[cfg(test)]
mod helpers {
    use crate::{MutexLock, NoLock, SpatialGrid};

    /// 100×60 plane, 20-unit squares → 5 columns × 3 rows.
    pub fn small_grid() -> SpatialGrid {
        SpatialGrid::new(100, 60, 20, Box::new(NoLock)).unwrap()
    }

    pub fn small_locked_grid() -> SpatialGrid {
        SpatialGrid::new(100, 60, 20, Box::new(MutexLock::new(15))).unwrap()
    }
}

// ── Construction & addressing ─────────────────────────────────────────────────

#[cfg(test)]
mod addressing {
    use boids_core::{CellIndex, FlockConfig};

    use crate::{GridError, NoLock, SpatialGrid};

    #[test]
    fn dimensions_round_up() {
        let grid = SpatialGrid::new(101, 41, 20, Box::new(NoLock)).unwrap();
        assert_eq!(grid.squares_per_row(), 6);
        assert_eq!(grid.squares_per_column(), 3);
        assert_eq!(grid.cell_count(), 18);
    }

    #[test]
    fn zero_square_size_rejected() {
        let err = SpatialGrid::new(10, 10, 0, Box::new(NoLock)).unwrap_err();
        assert!(matches!(err, GridError::ZeroSquareSize));
    }

    #[test]
    fn empty_plane_rejected() {
        let err = SpatialGrid::new(0, 10, 5, Box::new(NoLock)).unwrap_err();
        assert!(matches!(err, GridError::EmptyPlane { width: 0, height: 10 }));
    }

    #[test]
    fn cell_index_is_row_major() {
        let grid = super::helpers::small_grid();
        assert_eq!(grid.cell_index_of(0.0, 0.0), CellIndex(0));
        assert_eq!(grid.cell_index_of(19.9, 19.9), CellIndex(0));
        assert_eq!(grid.cell_index_of(20.0, 0.0), CellIndex(1));
        assert_eq!(grid.cell_index_of(0.0, 20.0), CellIndex(5));
        assert_eq!(grid.cell_index_of(99.9, 59.9), CellIndex(14));
    }

    #[test]
    fn index_validity() {
        let grid = super::helpers::small_grid();
        assert!(grid.is_index_valid(CellIndex(0)));
        assert!(grid.is_index_valid(CellIndex(14)));
        assert!(!grid.is_index_valid(CellIndex(15)));
    }

    #[test]
    fn scan_candidates_are_always_valid_cells() {
        let grid = super::helpers::small_grid();
        let mut bottom_row_hits = 0;
        for yi in 0..60 {
            for xi in 0..100 {
                let (x, y) = (xi as f32 + 0.5, yi as f32 + 0.5);
                let cells = grid.scan_cells(x, y);
                assert_eq!(cells[0], Some(grid.cell_index_of(x, y)));
                for cell in cells.into_iter().flatten() {
                    assert!(grid.is_index_valid(cell), "({x}, {y}) -> {cell}");
                }
                if y >= 50.0 {
                    assert_eq!(cells[2], None, "no row below the last at ({x}, {y})");
                    bottom_row_hits += 1;
                }
            }
        }
        assert_eq!(bottom_row_hits, 1_000);
    }

    #[test]
    fn config_couples_square_size_to_visible_range() {
        let cfg = FlockConfig {
            width: 200,
            height: 100,
            visible_range: 12.5,
            danger_range: 2.0,
            threads: 1,
            ..FlockConfig::default()
        };
        let grid = SpatialGrid::for_config(&cfg).unwrap();
        assert_eq!(grid.square_size(), 25);
        assert_eq!(grid.cell_count(), 8 * 4);
        assert!(!grid.is_concurrent());
    }

    #[test]
    fn config_with_threads_uses_mutexes() {
        let cfg = FlockConfig { threads: 4, ..FlockConfig::default() };
        let grid = SpatialGrid::for_config(&cfg).unwrap();
        assert!(grid.is_concurrent());
    }
}

// ── Membership ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod membership {
    use boids_core::{AgentId, CellIndex};

    #[test]
    fn add_and_remove_by_coordinates() {
        let mut grid = super::helpers::small_grid();
        grid.add_at(AgentId(3), 45.0, 25.0);
        let cell = grid.cell_index_of(45.0, 25.0);
        assert_eq!(grid.members(cell), &[AgentId(3)]);
        grid.remove_at(AgentId(3), 45.0, 25.0);
        assert!(grid.members(cell).is_empty());
        assert!(grid.is_empty());
    }

    #[test]
    fn add_is_not_idempotent() {
        let mut grid = super::helpers::small_grid();
        grid.add(AgentId(1), CellIndex(2));
        grid.add(AgentId(1), CellIndex(2));
        assert_eq!(grid.members(CellIndex(2)).len(), 2);
        grid.remove(AgentId(1), CellIndex(2));
        assert_eq!(grid.members(CellIndex(2)), &[AgentId(1)], "remove drops one occurrence");
    }

    #[test]
    fn removing_absent_id_is_noop() {
        let mut grid = super::helpers::small_grid();
        grid.add(AgentId(1), CellIndex(0));
        grid.remove(AgentId(9), CellIndex(0));
        grid.remove(AgentId(1), CellIndex(4));
        assert_eq!(grid.members(CellIndex(0)), &[AgentId(1)]);
    }

    #[test]
    fn relocate_moves_between_cells() {
        let mut grid = super::helpers::small_grid();
        grid.add(AgentId(0), CellIndex(0));
        grid.relocate(AgentId(0), CellIndex(0), CellIndex(7));
        assert!(grid.members(CellIndex(0)).is_empty());
        assert_eq!(grid.members(CellIndex(7)), &[AgentId(0)]);

        grid.relocate(AgentId(0), CellIndex(7), CellIndex(7));
        assert_eq!(grid.members(CellIndex(7)), &[AgentId(0)]);
    }

    #[test]
    fn find_misplaced_reports_stale_cell() {
        let mut grid = super::helpers::small_grid();
        let x = [5.0, 50.0];
        let y = [5.0, 50.0];
        grid.add_at(AgentId(0), x[0], y[0]);
        grid.add_at(AgentId(1), x[1], y[1]);
        assert_eq!(grid.find_misplaced(&x, &y), None);

        let moved_x = [5.0, 90.0];
        assert_eq!(grid.find_misplaced(&moved_x, &y), Some(AgentId(1)));
    }

    #[test]
    fn find_misplaced_reports_missing_and_duplicate() {
        let mut grid = super::helpers::small_grid();
        let x = [5.0, 50.0];
        let y = [5.0, 50.0];
        grid.add_at(AgentId(0), x[0], y[0]);
        assert_eq!(grid.find_misplaced(&x, &y), Some(AgentId(1)));

        grid.add_at(AgentId(1), x[1], y[1]);
        grid.add_at(AgentId(1), x[1], y[1]);
        assert_eq!(grid.find_misplaced(&x, &y), Some(AgentId(1)));
    }
}

// ── Neighbor queries ──────────────────────────────────────────────────────────

#[cfg(test)]
mod neighbors {
    use boids_core::{AgentId, CellIndex};

    #[test]
    fn origin_does_not_underflow() {
        let mut grid = super::helpers::small_grid();
        grid.add_at(AgentId(0), 0.0, 0.0);
        grid.add_at(AgentId(1), 25.0, 5.0); // right-hand cell
        assert_eq!(grid.scan_cells(0.0, 0.0), [Some(CellIndex(0)), None, None, None]);
        assert_eq!(grid.neighbors(0.0, 0.0), vec![AgentId(0)]);
    }

    #[test]
    fn lower_right_quadrant_scans_right_and_down() {
        let grid = super::helpers::small_grid();
        // Cell (col 1, row 1) = 6; point in its lower-right quadrant.
        let cells = grid.scan_cells(35.0, 35.0);
        assert_eq!(cells, [
            Some(CellIndex(6)),
            Some(CellIndex(7)),
            Some(CellIndex(11)),
            Some(CellIndex(12)),
        ]);
    }

    #[test]
    fn upper_left_quadrant_scans_left_and_up() {
        let grid = super::helpers::small_grid();
        let cells = grid.scan_cells(25.0, 25.0);
        assert_eq!(cells, [
            Some(CellIndex(6)),
            Some(CellIndex(5)),
            Some(CellIndex(1)),
            Some(CellIndex(0)),
        ]);
    }

    #[test]
    fn right_edge_does_not_wrap_to_next_row() {
        let grid = super::helpers::small_grid();
        // Last column of row 0, right half: column+1 would be row 1's first cell.
        let cells = grid.scan_cells(95.0, 5.0);
        assert_eq!(cells[0], Some(CellIndex(4)));
        assert_eq!(cells[1], None);
        assert_eq!(cells[2], None);
        assert_eq!(cells[3], None);
    }

    #[test]
    fn bottom_edge_skips_missing_row() {
        let grid = super::helpers::small_grid();
        let cells = grid.scan_cells(45.0, 55.0);
        assert_eq!(cells[0], Some(CellIndex(12)));
        assert_eq!(cells[1], Some(CellIndex(11)));
        assert_eq!(cells[2], None);
        assert_eq!(cells[3], None);
    }

    #[test]
    fn result_includes_self_and_far_agents() {
        let mut grid = super::helpers::small_grid();
        grid.add_at(AgentId(0), 21.0, 21.0);
        grid.add_at(AgentId(1), 39.0, 39.0); // same cell, ~25 away
        let found = grid.neighbors(21.0, 21.0);
        assert!(found.contains(&AgentId(0)));
        assert!(found.contains(&AgentId(1)));
    }
}

// ── Concurrent writes ─────────────────────────────────────────────────────────

#[cfg(test)]
mod concurrent {
    use boids_core::{AgentId, CellIndex};
    use rayon::prelude::*;

    #[test]
    fn unlocked_grid_has_no_shared_writer() {
        let mut grid = super::helpers::small_grid();
        assert!(grid.shared_cells().is_none());
    }

    #[test]
    fn parallel_relocation_keeps_every_id_once() {
        let mut grid = super::helpers::small_locked_grid();
        let n = 20_000u32;
        for i in 0..n {
            grid.add(AgentId(i), CellIndex(i % 15));
        }

        {
            let cells = grid.shared_cells().expect("mutex grid is concurrent");
            (0..n).into_par_iter().for_each(|i| {
                let from = CellIndex(i % 15);
                let to = CellIndex((i * 7 + 3) % 15);
                cells.relocate(AgentId(i), from, to);
            });
        }

        assert_eq!(grid.len(), n as usize);
        for i in 0..n {
            let to = CellIndex((i * 7 + 3) % 15);
            let hits = grid.members(to).iter().filter(|&&a| a == AgentId(i)).count();
            assert_eq!(hits, 1, "agent {i} should be in {to} exactly once");
        }
    }

    #[test]
    fn lock_guard_release_is_explicit() {
        use crate::{CellLock, MutexLock};
        let lock = MutexLock::new(2);
        let first = lock.acquire(CellIndex(0));
        // A different cell is independent.
        let other = lock.acquire(CellIndex(1));
        other.release();
        first.release();
        // Reacquiring after release does not block.
        lock.acquire(CellIndex(0)).release();
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use boids_core::AgentId;
    use proptest::prelude::*;

    use crate::{NoLock, SpatialGrid};

    proptest! {
        /// Every agent within the visible range of the query point is among
        /// the returned candidates.
        #[test]
        fn neighbors_cover_visible_range(
            visible in 2u32..30,
            width in 20usize..400,
            height in 20usize..400,
            points in prop::collection::vec((0.0f32..1.0, 0.0f32..1.0), 1..200),
            query in (0.0f32..1.0, 0.0f32..1.0),
        ) {
            let visible = visible as f32;
            let size = (2.0 * visible).ceil() as usize;
            let mut grid = SpatialGrid::new(width, height, size, Box::new(NoLock)).unwrap();
            let max_x = width as f32 - 0.1;
            let max_y = height as f32 - 0.1;

            let xs: Vec<f32> = points.iter().map(|p| p.0 * max_x).collect();
            let ys: Vec<f32> = points.iter().map(|p| p.1 * max_y).collect();
            for i in 0..xs.len() {
                grid.add_at(AgentId(i as u32), xs[i], ys[i]);
            }
            prop_assert_eq!(grid.find_misplaced(&xs, &ys), None);

            let (qx, qy) = (query.0 * max_x, query.1 * max_y);
            let found = grid.neighbors(qx, qy);
            for i in 0..xs.len() {
                let d2 = (xs[i] - qx).powi(2) + (ys[i] - qy).powi(2);
                if d2 <= visible * visible {
                    prop_assert!(
                        found.contains(&AgentId(i as u32)),
                        "agent {} at ({}, {}) within range of ({}, {}) was missed",
                        i, xs[i], ys[i], qx, qy
                    );
                }
            }
        }
    }
}
