//! Runtime bindings
//!
//! Symbols supplied by the cooperative runtime and by the linker script when
//! building for the device.

use core::ptr::{addr_of, NonNull};

use crate::arena::ArenaBounds;
use crate::gate::SchedulerGate;

extern "C" {
    /// Suspend every other task; interrupts stay enabled
    fn ember_scheduler_suspend_all();

    /// Resume tasks; returns non-zero if resuming caused a context switch
    fn ember_scheduler_resume_all() -> i32;

    /// Start of the heap region (at least 16-byte aligned)
    static __HeapBase: u8;

    /// One past the end of the heap region
    static __HeapLimit: u8;

    /// Size of the heap region, encoded as the symbol's address
    static __HeapSize: u8;
}

/// Scheduler pause backed by the runtime's suspend/resume calls
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskScheduler;

impl SchedulerGate for TaskScheduler {
    #[inline]
    fn pause(&self) {
        // SAFETY: suspend has no preconditions beyond task context.
        unsafe { ember_scheduler_suspend_all() }
    }

    #[inline]
    fn resume(&self) {
        // SAFETY: only called after the matching suspend.
        let yielded = unsafe { ember_scheduler_resume_all() };
        if yielded != 0 {
            log::trace!("scheduler resume yielded");
        }
    }
}

/// Arena bounds from the linker-defined heap region
///
/// # Safety
/// Must be called at most once, and the region must not be used by anything
/// other than the allocator that receives the bounds.
pub unsafe fn linker_arena() -> ArenaBounds {
    let start = addr_of!(__HeapBase) as *mut u8;
    let limit = addr_of!(__HeapLimit) as usize;
    let size = addr_of!(__HeapSize) as usize;

    debug_assert_eq!(start as usize + size, limit, "linker heap symbols disagree");
    log::debug!("linker heap: {:#x}..{:#x} ({} bytes)", start as usize, limit, size);

    ArenaBounds::from_raw_parts(NonNull::new_unchecked(start), size)
}
