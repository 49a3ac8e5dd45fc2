//! Watermark Heap - Never-freed dynamic memory for the Ember runtime
//!
//! # Purpose
//! Satisfies dynamic allocation requests from one fixed-size arena by bumping
//! a watermark. Memory is never reclaimed: components allocate what they need
//! during startup, then the heap is disabled so any later allocation is
//! caught as a fault instead of silently eating into headroom.
//!
//! # Integration Points
//! - Depends on: `ember-platform` (scheduler pause, fault reporter, arena
//!   bounds)
//! - Provides to: All components allocating during startup; `alloc`
//!   collections through the `GlobalAlloc` adapter
//!
//! # Architecture
//! - [`reserve`]: pure rounding/overflow/boundary arithmetic
//! - [`WatermarkAllocator`]: runs each reservation inside one scheduler pause
//!   and routes contract violations to the fault reporter
//! - O(1), bounded latency, never blocks on a lock
//!
//! # Error Tiers
//! - [`AllocError`]: arena exhausted, size overflow, zero-byte request;
//!   returned to the caller
//! - [`ContractViolation`]: `free`, or `allocate`/`reset` after `disable`;
//!   reported as a fault, never returned
//!
//! # Testing Strategy
//! - Unit tests: reservation arithmetic, lifecycle, faults
//! - Integration tests: property tests over request sequences, multi-thread
//!   disjointness under the mock scheduler, `GlobalAlloc` behaviour
//! - Benchmarks: allocate latency

#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod error;
mod global;
pub mod reserve;
pub mod usage;
pub mod watermark;

pub use config::{AllocatorConfig, OomHook, DEFAULT_ALIGNMENT};
pub use error::{AllocError, ConfigError, ContractViolation, Result};
pub use reserve::{align_up, Reservation};
pub use usage::HeapUsage;
pub use watermark::WatermarkAllocator;

pub use ember_platform::{
    ArenaBounds, FaultReporter, HeapArray, NoopGate, PanicReporter, PauseGuard, SchedulerGate,
};

#[cfg(feature = "mock")]
pub use ember_platform::MockScheduler;

#[cfg(feature = "runtime")]
pub use ember_platform::{linker_arena, TaskScheduler};

static_assertions::assert_impl_all!(WatermarkAllocator<NoopGate, PanicReporter>: Send, Sync);

#[cfg(feature = "mock")]
static_assertions::assert_impl_all!(WatermarkAllocator<MockScheduler, PanicReporter>: Send, Sync);
