//! Wrap-around index scans used by the fallback pair searches

use rand::Rng;

/// Visits every index of `0..len` exactly once, starting at `start` and
/// wrapping around to zero.
#[derive(Debug, Clone)]
pub struct CircularScan {
    start: usize,
    len: usize,
    visited: usize,
}

impl CircularScan {
    /// # Panics
    /// Panics if `start >= len` for a non-empty range
    pub fn new(start: usize, len: usize) -> Self {
        assert!(len == 0 || start < len, "scan start {start} out of range 0..{len}");
        Self {
            start,
            len,
            visited: 0,
        }
    }

    /// Scan starting at a uniformly random offset
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let start = if len == 0 { 0 } else { rng.gen_range(0..len) };
        Self::new(start, len)
    }
}

impl Iterator for CircularScan {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.visited == self.len {
            return None;
        }
        let index = (self.start + self.visited) % self.len;
        self.visited += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.visited;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CircularScan {}
