//! Per-cell locking strategies.
//!
//! A [`CellLock`] brackets every mutation of a cell's membership list.  The
//! grid picks the strategy at runtime:
//!
//! | Strategy      | `is_exclusive` | Used when                          |
//! |---------------|----------------|------------------------------------|
//! | [`NoLock`]    | `false`        | one worker thread                  |
//! | [`MutexLock`] | `true`         | more than one worker thread        |
//!
//! Locks are only ever held around a single `push`/`retain` on one cell,
//! never across a neighbor scan.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use boids_core::CellIndex;

// ── CellGuard ─────────────────────────────────────────────────────────────────

/// Proof that a cell's lock is held.  Dropping it (or calling
/// [`release`](Self::release)) releases the lock.
#[must_use = "the cell is unlocked as soon as the guard is dropped"]
pub struct CellGuard<'a> {
    _held: Option<MutexGuard<'a, ()>>,
}

impl<'a> CellGuard<'a> {
    /// A guard that holds nothing, for strategies without real exclusion.
    #[inline]
    pub fn unlocked() -> Self {
        Self { _held: None }
    }

    #[inline]
    fn held(guard: MutexGuard<'a, ()>) -> Self {
        Self { _held: Some(guard) }
    }

    /// Release the lock explicitly.
    #[inline]
    pub fn release(self) {
        drop(self);
    }
}

// ── CellLock ──────────────────────────────────────────────────────────────────

/// Locking strategy for cell membership mutation.
///
/// # Safety
///
/// If [`is_exclusive`](Self::is_exclusive) returns `true`, two guards for the
/// same cell must never be alive at the same time, on any threads.  The grid
/// relies on this to mutate cells from several threads through `&self`.
pub unsafe trait CellLock: Send + Sync + fmt::Debug {
    /// Block until `cell` may be mutated by the caller.
    fn acquire(&self, cell: CellIndex) -> CellGuard<'_>;

    /// `true` if guards give real mutual exclusion across threads.
    fn is_exclusive(&self) -> bool;
}

// ── NoLock ────────────────────────────────────────────────────────────────────

/// Strategy without locking; valid only while a single thread mutates cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLock;

// SAFETY: `is_exclusive` is `false`, so no caller may rely on exclusion.
unsafe impl CellLock for NoLock {
    #[inline]
    fn acquire(&self, _cell: CellIndex) -> CellGuard<'_> {
        CellGuard::unlocked()
    }

    #[inline]
    fn is_exclusive(&self) -> bool {
        false
    }
}

// ── MutexLock ─────────────────────────────────────────────────────────────────

/// One `Mutex<()>` per cell.
pub struct MutexLock {
    locks: Box<[Mutex<()>]>,
}

impl MutexLock {
    pub fn new(cell_count: usize) -> Self {
        Self {
            locks: (0..cell_count).map(|_| Mutex::new(())).collect(),
        }
    }
}

impl fmt::Debug for MutexLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutexLock").field("cells", &self.locks.len()).finish()
    }
}

// SAFETY: each cell has its own mutex and a guard borrows it for its whole
// lifetime, so at most one guard per cell exists at any time.
unsafe impl CellLock for MutexLock {
    #[inline]
    fn acquire(&self, cell: CellIndex) -> CellGuard<'_> {
        // A poisoned lock only means another worker panicked mid-push; the
        // list itself is still a valid `Vec`.
        let guard = self.locks[cell.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        CellGuard::held(guard)
    }

    #[inline]
    fn is_exclusive(&self) -> bool {
        true
    }
}

/// Pick the strategy for a run with `threads` workers.
pub fn lock_for_threads(threads: usize, cell_count: usize) -> Box<dyn CellLock> {
    if threads > 1 {
        Box::new(MutexLock::new(cell_count))
    } else {
        Box::new(NoLock)
    }
}
