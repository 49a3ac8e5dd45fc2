//! Integration tests for the boot-time heap lifecycle
//!
//! These tests walk the sequence a board goes through:
//! - Arena from static storage, watermark cleared before first use
//! - Drivers and services allocate their buffers during startup
//! - Heap disabled once startup completes, usage summary reported
//! - Any later allocation is a fault

use std::sync::atomic::{AtomicUsize, Ordering};

use ember_allocator::{
    AllocError, AllocatorConfig, HeapArray, HeapUsage, NoopGate, PanicReporter,
    WatermarkAllocator,
};

const FLASH_PAGE: usize = 256;
const EVENT_SLOTS: usize = 12;
const EVENT_SIZE: usize = 10;

static HEAP: HeapArray<2048> = HeapArray::new();

static STARTUP_OOM: AtomicUsize = AtomicUsize::new(0);

fn startup_oom() {
    STARTUP_OOM.fetch_add(1, Ordering::SeqCst);
}

/// Test the full startup sequence from a static arena
#[test]
fn test_boot_sequence() {
    let config = AllocatorConfig::new().with_oom_hook(startup_oom);
    let heap = WatermarkAllocator::try_new(HEAP.bounds(), NoopGate, PanicReporter, config)
        .expect("static heap storage is aligned");

    // Statics may not be zeroed on every board
    heap.reset();
    assert_eq!(heap.free_bytes(), heap.total_bytes());

    // 1. Flash driver page buffer
    let page = heap.allocate(FLASH_PAGE).expect("page buffer");

    // 2. Event database: 12 slots of 10 bytes
    let events = heap.allocate(EVENT_SLOTS * EVENT_SIZE).expect("event database");

    let page_offset = heap.arena().offset_of(page.as_ptr()).unwrap();
    let events_offset = heap.arena().offset_of(events.as_ptr()).unwrap();
    assert_eq!(page_offset, 0);
    assert_eq!(events_offset, FLASH_PAGE);
    assert_eq!(heap.watermark(), FLASH_PAGE + 120);

    // 3. An oversized request is reported to the caller and the hook
    assert!(matches!(
        heap.allocate(4096),
        Err(AllocError::OutOfMemory { requested: 4096, .. })
    ));
    assert_eq!(STARTUP_OOM.load(Ordering::SeqCst), 1);

    // 4. Startup complete
    heap.disable();
    assert!(!heap.is_enabled());

    let usage = heap.usage();
    assert_eq!(
        usage,
        HeapUsage {
            total_bytes: 2048,
            free_bytes: 2048 - 376,
            allocations: 2,
            failed_allocations: 1,
        }
    );
    assert_eq!(usage.to_string(), "heap usage 18%: 376/2048 bytes");
}

/// Test that allocating after startup is caught as a fault
#[test]
#[should_panic(expected = "after the heap was disabled")]
fn test_allocation_after_startup_faults() {
    let storage: &'static HeapArray<128> = Box::leak(Box::new(HeapArray::new()));
    let heap = WatermarkAllocator::new(
        storage.bounds(),
        NoopGate,
        PanicReporter,
        AllocatorConfig::new(),
    );

    heap.allocate(16).unwrap();
    heap.disable();

    // A late driver init
    let _ = heap.allocate(16);
}
