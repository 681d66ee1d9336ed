//! Memo tables caching the longest path length starting at each cell.
//!
//! Entries are indexed row-major by `row * cols + col`. A stored `0` means
//! "not yet computed"; real lengths are always at least 1.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

/// Sentinel for a cell whose length is not yet known.
pub(crate) const UNCOMPUTED: usize = 0;

/// Storage the search reads finished lengths from and writes them to.
pub(crate) trait LengthCache {
    /// Cached length for `idx`, if computed.
    fn get(&self, idx: usize) -> Option<usize>;

    /// Record the final length for `idx`.
    fn record(&mut self, idx: usize, len: usize);
}

/// Single-threaded memo table.
#[derive(Debug, Clone)]
pub(crate) struct MemoTable {
    lengths: Vec<usize>,
}

impl MemoTable {
    pub(crate) fn new(cells: usize) -> Self {
        Self {
            lengths: vec![UNCOMPUTED; cells],
        }
    }

    /// Number of entries holding a final length.
    pub(crate) fn computed(&self) -> usize {
        self.lengths.iter().filter(|&&l| l != UNCOMPUTED).count()
    }
}

impl LengthCache for MemoTable {
    #[inline]
    fn get(&self, idx: usize) -> Option<usize> {
        match self.lengths[idx] {
            UNCOMPUTED => None,
            len => Some(len),
        }
    }

    #[inline]
    fn record(&mut self, idx: usize, len: usize) {
        debug_assert!(len >= 1, "path lengths start at 1");
        debug_assert_eq!(self.lengths[idx], UNCOMPUTED, "cell {idx} written twice");
        self.lengths[idx] = len;
    }
}

/// Memo table shared between rayon workers.
///
/// Two workers may both compute the same cell; they always arrive at the
/// same length, so the later store is a no-op in effect.
#[cfg(feature = "parallel")]
#[derive(Debug)]
pub(crate) struct AtomicMemoTable {
    lengths: Vec<AtomicUsize>,
}

#[cfg(feature = "parallel")]
impl AtomicMemoTable {
    pub(crate) fn new(cells: usize) -> Self {
        Self {
            lengths: (0..cells).map(|_| AtomicUsize::new(UNCOMPUTED)).collect(),
        }
    }

    pub(crate) fn computed(&self) -> usize {
        self.lengths
            .iter()
            .filter(|l| l.load(Ordering::Relaxed) != UNCOMPUTED)
            .count()
    }
}

#[cfg(feature = "parallel")]
impl LengthCache for &AtomicMemoTable {
    #[inline]
    fn get(&self, idx: usize) -> Option<usize> {
        match self.lengths[idx].load(Ordering::Relaxed) {
            UNCOMPUTED => None,
            len => Some(len),
        }
    }

    #[inline]
    fn record(&mut self, idx: usize, len: usize) {
        debug_assert!(len >= 1, "path lengths start at 1");
        let prev = self.lengths[idx].swap(len, Ordering::Relaxed);
        debug_assert!(
            prev == UNCOMPUTED || prev == len,
            "cell {idx} recorded as {prev} and {len}"
        );
    }
}
