//! Heap usage summary

use core::fmt;

/// Point-in-time heap counters
///
/// Printed once when the heap is disabled at the end of startup, so the
/// headroom left for the application is visible in the boot log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapUsage {
    pub total_bytes: usize,
    pub free_bytes: usize,
    /// Successful allocations since construction
    pub allocations: usize,
    /// Failed allocations since construction
    pub failed_allocations: usize,
}

impl HeapUsage {
    pub fn used_bytes(&self) -> usize {
        self.total_bytes - self.free_bytes
    }

    /// Used share of the arena in whole percent (0 for an empty arena)
    pub fn percent_used(&self) -> usize {
        match self.total_bytes {
            0 => 0,
            total => self.used_bytes().saturating_mul(100) / total,
        }
    }
}

impl fmt::Display for HeapUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "heap usage {}%: {}/{} bytes",
            self.percent_used(),
            self.used_bytes(),
            self.total_bytes
        )
    }
}
