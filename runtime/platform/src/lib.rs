//! # Ember Platform Capabilities
//!
//! The heap allocator does not talk to the scheduler, the fault handler or the
//! linker script directly. This crate gives it one API for each of those
//! collaborators, regardless of where the build runs:
//! - **Mock Mode**: host-side scheduler emulation for unit and stress tests
//! - **Runtime Mode**: the cooperative runtime's suspend/resume primitives
//!   and the linker-defined heap region
//!
//! ## Usage
//!
//! ```rust
//! use ember_platform::{HeapArray, NoopGate, PauseGuard};
//!
//! static HEAP: HeapArray<256> = HeapArray::new();
//!
//! let arena = HEAP.bounds();
//! assert_eq!(arena.size(), 256);
//!
//! let gate = NoopGate;
//! let _section = PauseGuard::enter(&gate);
//! ```
//!
//! ## Build Modes
//!
//! ```bash
//! # Mock (default, host testing)
//! cargo build
//!
//! # Runtime (device build)
//! cargo build --no-default-features --features runtime
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

/// Arena bounds and their providers
pub mod arena;

/// Fault reporting capability
pub mod fault;

/// Scheduler pause capability
pub mod gate;

/// Host-side scheduler emulation
#[cfg(feature = "mock")]
pub mod mock;

/// Bindings to the cooperative runtime
#[cfg(feature = "runtime")]
pub mod runtime;

pub use arena::{ArenaBounds, HeapArray, HEAP_ARRAY_ALIGN};
pub use fault::{FaultReporter, PanicReporter};
pub use gate::{NoopGate, PauseGuard, SchedulerGate};

#[cfg(feature = "mock")]
pub use mock::MockScheduler;

#[cfg(feature = "runtime")]
pub use runtime::{linker_arena, TaskScheduler};

/// Platform configuration and detection
pub mod config {
    /// Detect which platform mode is active at compile time
    pub fn platform_mode() -> &'static str {
        if cfg!(feature = "runtime") {
            "runtime"
        } else if cfg!(feature = "mock") {
            "mock"
        } else {
            "bare"
        }
    }

    /// Check if the host-side mock scheduler is compiled in
    pub const fn is_mock() -> bool {
        cfg!(feature = "mock")
    }

    /// Check if we're linked against the real runtime
    pub const fn is_runtime() -> bool {
        cfg!(feature = "runtime")
    }
}
