//! Uniform square-cell grid over a bounded plane.
//!
//! # Layout
//!
//! The `width × height` plane is cut into `square_size` squares, stored
//! row-major:
//!
//! ```text
//! cell = floor(x / square_size) + floor(y / square_size) * squares_per_row
//! ```
//!
//! Each cell holds the ids of the agents currently inside it.  The grid does
//! not own positions; callers keep membership in sync through `add`/`remove`.
//!
//! # Neighbor heuristic
//!
//! With `square_size >= 2 × visible_range`, an agent in the left half of its
//! cell can only see agents in its own column or the column to the left, and
//! likewise for the other three directions.  A query therefore scans at most
//! four cells: its own, one horizontal, one vertical, and the diagonal between
//! them.
//!
//! # Concurrency
//!
//! Reads (`neighbors`, `members`) take `&self` and never lock.  Mutation goes
//! through either `&mut self` or a [`SharedCells`] handle, which also borrows
//! the grid mutably, so readers and writers can never overlap.

use std::cell::UnsafeCell;
use std::fmt;

use boids_core::{AgentId, CellIndex, FlockConfig};

use crate::lock::{CellLock, lock_for_threads};
use crate::{GridError, GridResult};

/// Membership list of one cell.
struct Cell(UnsafeCell<Vec<AgentId>>);

impl Cell {
    fn empty() -> Self {
        Cell(UnsafeCell::new(Vec::new()))
    }
}

// ── SpatialGrid ───────────────────────────────────────────────────────────────

pub struct SpatialGrid {
    square_size:        usize,
    squares_per_row:    usize,
    squares_per_column: usize,
    cells:              Box<[Cell]>,
    lock:               Box<dyn CellLock>,
}

// SAFETY: through `&SpatialGrid` the cells are only read, except inside
// `SharedCells`.  A `SharedCells` is created from `&mut SpatialGrid`, so while
// it lives no other reference to the grid exists, and it is only handed out
// when the lock strategy serializes writers per cell.
unsafe impl Sync for SpatialGrid {}

impl SpatialGrid {
    /// Partition a `width × height` plane into `square_size` squares.
    ///
    /// Partial squares at the right and bottom edges count as full cells.
    pub fn new(
        width:       usize,
        height:      usize,
        square_size: usize,
        lock:        Box<dyn CellLock>,
    ) -> GridResult<Self> {
        if square_size == 0 {
            return Err(GridError::ZeroSquareSize);
        }
        if width == 0 || height == 0 {
            return Err(GridError::EmptyPlane { width, height });
        }

        let squares_per_row = width.div_ceil(square_size);
        let squares_per_column = height.div_ceil(square_size);
        let cell_count = squares_per_row * squares_per_column;
        if u32::try_from(cell_count).is_err() {
            return Err(GridError::TooManyCells(cell_count));
        }

        Ok(Self {
            square_size,
            squares_per_row,
            squares_per_column,
            cells: (0..cell_count).map(|_| Cell::empty()).collect(),
            lock,
        })
    }

    /// Build the grid described by `config`: cell size `ceil(2 × visible_range)`
    /// and per-cell mutexes whenever more than one worker thread will write.
    pub fn for_config(config: &FlockConfig) -> GridResult<Self> {
        let square_size = config.square_size();
        if square_size == 0 {
            return Err(GridError::ZeroSquareSize);
        }
        let cells = config.width.div_ceil(square_size) * config.height.div_ceil(square_size);
        let lock = lock_for_threads(config.threads, cells);
        tracing::debug!(
            square_size,
            cells,
            threads = config.threads,
            ?lock,
            "building spatial grid"
        );
        Self::new(config.width, config.height, square_size, lock)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn square_size(&self) -> usize {
        self.square_size
    }

    #[inline]
    pub fn squares_per_row(&self) -> usize {
        self.squares_per_row
    }

    #[inline]
    pub fn squares_per_column(&self) -> usize {
        self.squares_per_column
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Total number of memberships across all cells.
    pub fn len(&self) -> usize {
        (0..self.cells.len()).map(|i| self.members(CellIndex(i as u32)).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if the lock strategy allows mutation from several threads.
    #[inline]
    pub fn is_concurrent(&self) -> bool {
        self.lock.is_exclusive()
    }

    // ── Addressing ────────────────────────────────────────────────────────

    /// Cell containing `(x, y)`.
    ///
    /// Not bounds-checked: a point outside the plane yields an index that is
    /// out of range or belongs to the wrong cell.
    #[inline]
    pub fn cell_index_of(&self, x: f32, y: f32) -> CellIndex {
        let (col, row) = self.column_row(x, y);
        CellIndex((col + row * self.squares_per_row) as u32)
    }

    #[inline]
    pub fn is_index_valid(&self, cell: CellIndex) -> bool {
        cell.index() < self.cells.len()
    }

    #[inline]
    fn column_row(&self, x: f32, y: f32) -> (usize, usize) {
        (x as usize / self.square_size, y as usize / self.square_size)
    }

    /// Cell at `(col + d_col, row + d_row)`, or `None` if that falls off any
    /// edge of the grid.  No wraparound between rows.
    fn offset_cell(&self, col: usize, row: usize, d_col: isize, d_row: isize) -> Option<CellIndex> {
        let c = col.checked_add_signed(d_col)?;
        let r = row.checked_add_signed(d_row)?;
        if c >= self.squares_per_row {
            return None;
        }
        // Past the last row the index runs off the end of `cells`.
        CellIndex::try_from(c + r * self.squares_per_row)
            .ok()
            .filter(|&cell| self.is_index_valid(cell))
    }

    /// The cells a neighbor query at `(x, y)` scans: own cell first, then the
    /// horizontal, vertical, and diagonal neighbor on the side of the nearer
    /// half.  Off-grid candidates are `None`.
    pub fn scan_cells(&self, x: f32, y: f32) -> [Option<CellIndex>; 4] {
        let (col, row) = self.column_row(x, y);
        let size = self.square_size as f32;
        let d_col = if (x / size).fract() >= 0.5 { 1 } else { -1 };
        let d_row = if (y / size).fract() >= 0.5 { 1 } else { -1 };
        [
            self.offset_cell(col, row, 0, 0),
            self.offset_cell(col, row, d_col, 0),
            self.offset_cell(col, row, 0, d_row),
            self.offset_cell(col, row, d_col, d_row),
        ]
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Agents currently recorded in `cell`.
    #[inline]
    pub fn members(&self, cell: CellIndex) -> &[AgentId] {
        // SAFETY: see `unsafe impl Sync`; no writer exists while `&self` does.
        unsafe { &*self.cells[cell.index()].0.get() }
    }

    /// Visit every candidate neighbor of `(x, y)`.
    ///
    /// Candidates may include the querying agent itself and agents beyond the
    /// visible range; callers filter both.
    #[inline]
    pub fn for_each_neighbor(&self, x: f32, y: f32, mut visit: impl FnMut(AgentId)) {
        for cell in self.scan_cells(x, y).into_iter().flatten() {
            self.members(cell).iter().copied().for_each(&mut visit);
        }
    }

    /// Candidate neighbors of `(x, y)`, collected.  See [`for_each_neighbor`](Self::for_each_neighbor).
    pub fn neighbors(&self, x: f32, y: f32) -> Vec<AgentId> {
        let mut out = Vec::new();
        self.for_each_neighbor(x, y, |id| out.push(id));
        out
    }

    /// Check that every agent appears exactly once, in the cell containing its
    /// position, and nowhere else.  Returns the first offending agent.
    pub fn find_misplaced(&self, x: &[f32], y: &[f32]) -> Option<AgentId> {
        let mut seen = vec![0u32; x.len()];
        for c in 0..self.cells.len() {
            let cell = CellIndex(c as u32);
            for &id in self.members(cell) {
                let i = id.index();
                if i >= x.len() || self.cell_index_of(x[i], y[i]) != cell {
                    return Some(id);
                }
                seen[i] += 1;
            }
        }
        seen.iter().position(|&n| n != 1).map(|i| AgentId(i as u32))
    }

    // ── Exclusive writes ──────────────────────────────────────────────────

    /// Record `agent` in `cell`.  Not idempotent: adding twice stores it twice.
    pub fn add(&mut self, agent: AgentId, cell: CellIndex) {
        let guard = self.lock.acquire(cell);
        self.cells[cell.index()].0.get_mut().push(agent);
        guard.release();
    }

    pub fn add_at(&mut self, agent: AgentId, x: f32, y: f32) {
        let cell = self.cell_index_of(x, y);
        self.add(agent, cell);
    }

    /// Drop one occurrence of `agent` from `cell`; absent ids are ignored.
    pub fn remove(&mut self, agent: AgentId, cell: CellIndex) {
        let guard = self.lock.acquire(cell);
        remove_one(self.cells[cell.index()].0.get_mut(), agent);
        guard.release();
    }

    pub fn remove_at(&mut self, agent: AgentId, x: f32, y: f32) {
        let cell = self.cell_index_of(x, y);
        self.remove(agent, cell);
    }

    /// Move `agent` from `from` to `to`; no-op when they are equal.
    pub fn relocate(&mut self, agent: AgentId, from: CellIndex, to: CellIndex) {
        if from != to {
            self.remove(agent, from);
            self.add(agent, to);
        }
    }

    // ── Shared writes ─────────────────────────────────────────────────────

    /// A `Sync` writer that lets several threads move agents between cells.
    ///
    /// Returns `None` unless the lock strategy provides mutual exclusion; the
    /// caller should then fall back to the `&mut self` methods on one thread.
    pub fn shared_cells(&mut self) -> Option<SharedCells<'_>> {
        if self.lock.is_exclusive() {
            Some(SharedCells { grid: self })
        } else {
            None
        }
    }
}

impl fmt::Debug for SpatialGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialGrid")
            .field("square_size", &self.square_size)
            .field("squares_per_row", &self.squares_per_row)
            .field("squares_per_column", &self.squares_per_column)
            .field("lock", &self.lock)
            .finish()
    }
}

fn remove_one(members: &mut Vec<AgentId>, agent: AgentId) {
    if let Some(pos) = members.iter().position(|&a| a == agent) {
        members.swap_remove(pos);
    }
}

// ── SharedCells ───────────────────────────────────────────────────────────────

/// Concurrent membership writer.  Obtain with [`SpatialGrid::shared_cells`].
///
/// Every mutation holds the target cell's lock for exactly one list
/// operation; two locks are never held at once, so writers cannot deadlock.
pub struct SharedCells<'a> {
    grid: &'a SpatialGrid,
}

impl SharedCells<'_> {
    #[inline]
    pub fn cell_index_of(&self, x: f32, y: f32) -> CellIndex {
        self.grid.cell_index_of(x, y)
    }

    pub fn add(&self, agent: AgentId, cell: CellIndex) {
        let guard = self.grid.lock.acquire(cell);
        // SAFETY: the grid is exclusively borrowed by this handle and the
        // exclusive lock guarantees no other thread touches this cell now.
        unsafe { (*self.grid.cells[cell.index()].0.get()).push(agent) };
        guard.release();
    }

    pub fn remove(&self, agent: AgentId, cell: CellIndex) {
        let guard = self.grid.lock.acquire(cell);
        // SAFETY: as in `add`.
        unsafe { remove_one(&mut *self.grid.cells[cell.index()].0.get(), agent) };
        guard.release();
    }

    pub fn relocate(&self, agent: AgentId, from: CellIndex, to: CellIndex) {
        if from != to {
            self.remove(agent, from);
            self.add(agent, to);
        }
    }
}
