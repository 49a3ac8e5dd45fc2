//! `GlobalAlloc` adapter
//!
//! Lets a watermark heap back `alloc` collections on the device:
//!
//! ```rust,ignore
//! static STORAGE: HeapArray<8192> = HeapArray::new();
//!
//! #[global_allocator]
//! static HEAP: WatermarkAllocator<TaskScheduler, PanicReporter> =
//!     WatermarkAllocator::new(STORAGE.bounds(), TaskScheduler, PanicReporter, AllocatorConfig::new());
//! ```
//!
//! Dropping a collection frees its buffer, which faults. Only long-lived
//! startup allocations belong on this heap.

use core::alloc::{GlobalAlloc, Layout};
use core::ptr;

use ember_platform::{FaultReporter, SchedulerGate};

use crate::error::ContractViolation;
use crate::watermark::WatermarkAllocator;

unsafe impl<G, F> GlobalAlloc for WatermarkAllocator<G, F>
where
    G: SchedulerGate + Sync,
    F: FaultReporter + Sync,
{
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // Offsets are multiples of the configured alignment; anything
        // stricter cannot be honoured.
        if layout.align() > self.config().alignment() {
            log::warn!(
                "heap cannot honour alignment {} (configured {})",
                layout.align(),
                self.config().alignment()
            );
            return ptr::null_mut();
        }

        match self.allocate(layout.size()) {
            Ok(block) => block.as_ptr(),
            Err(_) => ptr::null_mut(),
        }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
        self.violate(ContractViolation::FreeNotSupported { addr: ptr as usize })
    }
}
