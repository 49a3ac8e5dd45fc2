//! Scheduler pause
//!
//! On a cooperative single-core runtime nothing else can touch shared state
//! while the scheduler is suspended, so a pause/resume pair is all the mutual
//! exclusion the heap needs. [`SchedulerGate`] is that pair as a capability;
//! the allocator receives one at construction.

/// Capability to suspend and resume every other logical thread
///
/// Between [`pause`](Self::pause) and [`resume`](Self::resume) no other task
/// may run. Implementations are not required to support nesting: callers
/// issue exactly one pair per critical section.
pub trait SchedulerGate {
    /// Suspend all other logical threads
    fn pause(&self);

    /// Resume the logical threads suspended by the matching `pause`
    fn resume(&self);
}

impl<G: SchedulerGate + ?Sized> SchedulerGate for &G {
    fn pause(&self) {
        (**self).pause()
    }

    fn resume(&self) {
        (**self).resume()
    }
}

/// Critical section that resumes the scheduler when dropped
#[must_use = "the scheduler resumes as soon as the guard is dropped"]
pub struct PauseGuard<'a, G: SchedulerGate + ?Sized> {
    gate: &'a G,
}

impl<'a, G: SchedulerGate + ?Sized> PauseGuard<'a, G> {
    /// Pause the scheduler until the returned guard is dropped
    pub fn enter(gate: &'a G) -> Self {
        gate.pause();
        Self { gate }
    }
}

impl<G: SchedulerGate + ?Sized> Drop for PauseGuard<'_, G> {
    fn drop(&mut self) {
        self.gate.resume();
    }
}

/// Gate that does nothing
///
/// Only correct when a single logical thread ever touches the allocator,
/// e.g. single-threaded tests or pre-scheduler boot code.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopGate;

impl SchedulerGate for NoopGate {
    #[inline]
    fn pause(&self) {}

    #[inline]
    fn resume(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[derive(Default)]
    struct RecordingGate {
        depth: Cell<i32>,
        pauses: Cell<u32>,
        resumes: Cell<u32>,
    }

    impl SchedulerGate for RecordingGate {
        fn pause(&self) {
            self.depth.set(self.depth.get() + 1);
            self.pauses.set(self.pauses.get() + 1);
        }

        fn resume(&self) {
            self.depth.set(self.depth.get() - 1);
            self.resumes.set(self.resumes.get() + 1);
        }
    }

    #[test]
    fn test_guard_resumes_on_drop() {
        let gate = RecordingGate::default();
        {
            let _section = PauseGuard::enter(&gate);
            assert_eq!(gate.depth.get(), 1);
        }
        assert_eq!(gate.depth.get(), 0);
        assert_eq!(gate.pauses.get(), 1);
        assert_eq!(gate.resumes.get(), 1);
    }

    #[test]
    fn test_guard_resumes_on_early_return() {
        fn section(gate: &RecordingGate, bail: bool) -> Option<()> {
            let _section = PauseGuard::enter(gate);
            if bail {
                return None;
            }
            Some(())
        }

        let gate = RecordingGate::default();
        assert!(section(&gate, true).is_none());
        assert!(section(&gate, false).is_some());
        assert_eq!(gate.depth.get(), 0);
        assert_eq!(gate.resumes.get(), 2);
    }

    #[test]
    fn test_gate_through_reference() {
        let gate = RecordingGate::default();
        let by_ref = &gate;
        {
            let _section = PauseGuard::enter(&by_ref);
        }
        assert_eq!(gate.pauses.get(), 1);
    }

    #[test]
    fn test_noop_gate() {
        let _section = PauseGuard::enter(&NoopGate);
    }
}
