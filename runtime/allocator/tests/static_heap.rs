//! Heaps declared as `static` items
//!
//! This is how a board wires the heap: storage and allocator are both
//! statics built in const initializers, so the out-of-memory hook can reach
//! the heap by name.

#![cfg(feature = "mock")]

use std::sync::atomic::{AtomicUsize, Ordering};

use ember_allocator::{
    AllocError, AllocatorConfig, HeapArray, MockScheduler, PanicReporter, WatermarkAllocator,
};

static BOOT_STORAGE: HeapArray<1024> = HeapArray::new();
static BOOT_HEAP: WatermarkAllocator<MockScheduler, PanicReporter> = WatermarkAllocator::new(
    BOOT_STORAGE.bounds(),
    MockScheduler::new(),
    PanicReporter,
    AllocatorConfig::new(),
);

/// Test that a heap built in a const initializer allocates from its storage
#[test]
fn test_static_heap_allocates_from_static_storage() {
    let block = BOOT_HEAP.allocate(100).unwrap();

    assert_eq!(BOOT_HEAP.arena().start(), BOOT_STORAGE.bounds().start());
    assert_eq!(BOOT_HEAP.arena().offset_of(block.as_ptr()), Some(0));
    assert_eq!(BOOT_HEAP.free_bytes(), 1024 - 104);
    assert_eq!(BOOT_HEAP.gate().sections(), 1);
}

static RECOVERY_STORAGE: HeapArray<256> = HeapArray::new();
static RECOVERY_HEAP: WatermarkAllocator<MockScheduler, PanicReporter> = WatermarkAllocator::new(
    RECOVERY_STORAGE.bounds(),
    MockScheduler::new(),
    PanicReporter,
    AllocatorConfig::new().with_oom_hook(allocate_emergency_buffer),
);

static HOOK_CALLS: AtomicUsize = AtomicUsize::new(0);
static EMERGENCY_OFFSET: AtomicUsize = AtomicUsize::new(usize::MAX);

fn allocate_emergency_buffer() {
    HOOK_CALLS.fetch_add(1, Ordering::SeqCst);

    // The request that failed has already left its pause section
    assert!(!RECOVERY_HEAP.gate().is_paused());

    let block = RECOVERY_HEAP
        .allocate(16)
        .expect("emergency buffer fits after a failed oversized request");
    let offset = RECOVERY_HEAP.arena().offset_of(block.as_ptr()).unwrap();
    EMERGENCY_OFFSET.store(offset, Ordering::SeqCst);
}

/// Test that the out-of-memory hook runs unpaused and may allocate itself
#[test]
fn test_oom_hook_runs_outside_section_and_can_allocate() {
    RECOVERY_HEAP.allocate(64).unwrap();

    let result = RECOVERY_HEAP.allocate(512);
    assert!(matches!(
        result,
        Err(AllocError::OutOfMemory { requested: 512, .. })
    ));

    assert_eq!(HOOK_CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(EMERGENCY_OFFSET.load(Ordering::SeqCst), 64);
    assert_eq!(RECOVERY_HEAP.watermark(), 80);
    assert!(!RECOVERY_HEAP.gate().is_paused());

    // Initial allocation, failed request, emergency allocation
    assert_eq!(RECOVERY_HEAP.gate().sections(), 3);

    let usage = RECOVERY_HEAP.usage();
    assert_eq!(usage.allocations, 2);
    assert_eq!(usage.failed_allocations, 1);
}
