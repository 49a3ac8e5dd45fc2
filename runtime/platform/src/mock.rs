//! ⚠️  MOCK scheduler for host-side testing
//!
//! This is NOT the cooperative runtime. It emulates the one property the heap
//! relies on, "while paused, no other logical thread runs", with a spin flag
//! so that host threads can stand in for runtime tasks.
//!
//! ## Limitations
//!
//! - Pausing twice from the same thread deadlocks (the real primitive is not
//!   required to be reentrant either)
//! - A resume without a matching pause panics

use core::hint;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::gate::SchedulerGate;

/// Spin-flag emulation of a cooperative scheduler's suspend/resume pair
#[derive(Debug, Default)]
pub struct MockScheduler {
    paused: AtomicBool,
    sections: AtomicUsize,
    contended: AtomicUsize,
}

impl MockScheduler {
    /// Create a running (unpaused) scheduler
    pub const fn new() -> Self {
        Self {
            paused: AtomicBool::new(false),
            sections: AtomicUsize::new(0),
            contended: AtomicUsize::new(0),
        }
    }

    /// Whether some thread currently holds the scheduler paused
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Number of completed pause/resume sections
    pub fn sections(&self) -> usize {
        self.sections.load(Ordering::Relaxed)
    }

    /// Number of pauses that had to wait for another thread's section
    pub fn contended(&self) -> usize {
        self.contended.load(Ordering::Relaxed)
    }
}

impl SchedulerGate for MockScheduler {
    fn pause(&self) {
        let mut waited = false;
        while self
            .paused
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            waited = true;
            hint::spin_loop();
        }
        if waited {
            self.contended.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn resume(&self) {
        let was_paused = self.paused.swap(false, Ordering::Release);
        assert!(was_paused, "mock scheduler resumed without a matching pause");
        self.sections.fetch_add(1, Ordering::Relaxed);
    }
}
