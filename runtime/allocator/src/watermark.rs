//! Watermark allocator
//!
//! Hands out consecutive blocks from one arena and never takes them back.
//! Every decision runs inside a scheduler pause; the watermark and the
//! counters are atomics only so the type is `Sync`, the pause is what makes
//! the load-check-store sequence exclusive.

use core::ptr::NonNull;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use ember_platform::{ArenaBounds, FaultReporter, PauseGuard, SchedulerGate};

use crate::config::AllocatorConfig;
use crate::error::{ConfigError, ContractViolation, Result};
use crate::reserve::reserve;
use crate::usage::HeapUsage;

/// Never-freed bump allocator over a fixed arena
///
/// Lifecycle: `Enabled(0) → Enabled(w1) → … → Disabled`, where the
/// watermark only grows and `Disabled` is terminal.
///
/// # Example
/// ```rust
/// use ember_allocator::{AllocatorConfig, HeapArray, NoopGate, PanicReporter, WatermarkAllocator};
///
/// static HEAP: HeapArray<1024> = HeapArray::new();
///
/// let heap = WatermarkAllocator::new(HEAP.bounds(), NoopGate, PanicReporter, AllocatorConfig::new());
/// let block = heap.allocate(100).unwrap();
/// assert_eq!(heap.arena().offset_of(block.as_ptr()), Some(0));
/// assert_eq!(heap.free_bytes(), 1024 - 104);
/// ```
#[derive(Debug)]
pub struct WatermarkAllocator<G: SchedulerGate, F: FaultReporter> {
    arena: ArenaBounds,
    watermark: AtomicUsize,
    enabled: AtomicBool,
    allocations: AtomicUsize,
    failures: AtomicUsize,
    gate: G,
    reporter: F,
    config: AllocatorConfig,
}

impl<G: SchedulerGate, F: FaultReporter> WatermarkAllocator<G, F> {
    /// Create an enabled allocator with the watermark at zero
    ///
    /// The arena start is assumed to be aligned to `config.alignment()`; use
    /// [`try_new`](Self::try_new) to have that checked.
    pub const fn new(arena: ArenaBounds, gate: G, reporter: F, config: AllocatorConfig) -> Self {
        Self {
            arena,
            watermark: AtomicUsize::new(0),
            enabled: AtomicBool::new(true),
            allocations: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
            gate,
            reporter,
            config,
        }
    }

    /// Create an allocator after checking the arena start alignment
    ///
    /// # Errors
    /// Returns error if the arena start is not aligned to the configured
    /// alignment
    pub fn try_new(
        arena: ArenaBounds,
        gate: G,
        reporter: F,
        config: AllocatorConfig,
    ) -> core::result::Result<Self, ConfigError> {
        if !arena.is_aligned_to(config.alignment()) {
            return Err(ConfigError::MisalignedArena {
                start: arena.start_addr(),
                alignment: config.alignment(),
            });
        }

        log::debug!(
            "watermark heap: {:#x}..{:#x} ({} bytes, align {})",
            arena.start_addr(),
            arena.end_addr(),
            arena.size(),
            config.alignment()
        );

        Ok(Self::new(arena, gate, reporter, config))
    }

    /// Allocate `size` bytes, rounded up to the configured alignment
    ///
    /// Faults (does not return) if the allocator has been disabled. The
    /// enabled flag is read inside the pause section, so a request that
    /// starts after [`disable`](Self::disable) returns always faults.
    ///
    /// # Errors
    /// Returns error if the arena cannot hold the rounded size strictly below
    /// its end, if rounding overflows, or if the request is zero bytes. The
    /// out-of-memory hook, when configured, has already run.
    pub fn allocate(&self, size: usize) -> Result<NonNull<u8>> {
        let outcome = {
            let _section = PauseGuard::enter(&self.gate);
            if !self.enabled.load(Ordering::Relaxed) {
                None
            } else {
                let watermark = self.watermark.load(Ordering::Relaxed);
                let outcome = reserve(watermark, size, self.arena.size(), self.config.alignment());
                match &outcome {
                    Ok(reservation) => {
                        self.watermark.store(reservation.end(), Ordering::Relaxed);
                        self.allocations.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(_) => {
                        self.failures.fetch_add(1, Ordering::Relaxed);
                    }
                }
                Some(outcome)
            }
        };

        let Some(outcome) = outcome else {
            self.violate(ContractViolation::AllocateAfterDisable { requested: size });
        };

        match outcome {
            Ok(reservation) => {
                // SAFETY: reserve() only accepts blocks that end strictly
                // below the arena size, so the offset is in bounds.
                let ptr = unsafe { self.arena.ptr_at(reservation.offset) };
                log::trace!(
                    "malloc {} -> {} bytes at {:#x}",
                    size,
                    reservation.size,
                    ptr.as_ptr() as usize
                );
                Ok(ptr)
            }
            Err(err) => {
                log::trace!("malloc {} -> failed", size);
                log::warn!("heap allocation failed: {}", err);
                if let Some(hook) = self.config.oom_hook() {
                    hook();
                }
                Err(err)
            }
        }
    }

    /// Release a block
    ///
    /// This heap never reclaims memory, so every call is a contract violation
    /// and faults.
    pub fn free(&self, ptr: NonNull<u8>) -> ! {
        self.violate(ContractViolation::FreeNotSupported {
            addr: ptr.as_ptr() as usize,
        })
    }

    /// Move the watermark back to zero
    ///
    /// Meant for a one-time initialisation before any real allocation, when
    /// the platform does not guarantee zeroed statics. Blocks handed out
    /// earlier stop being exclusive; that is on the caller. Faults if the
    /// allocator has been disabled.
    pub fn reset(&self) {
        let previous = {
            let _section = PauseGuard::enter(&self.gate);
            self.enabled
                .load(Ordering::Relaxed)
                .then(|| self.watermark.swap(0, Ordering::Relaxed))
        };

        match previous {
            Some(previous) => log::debug!("watermark heap reset (was {} bytes)", previous),
            None => self.violate(ContractViolation::ResetAfterDisable),
        }
    }

    /// Bytes still available (`total - watermark`)
    ///
    /// Read without pausing the scheduler; a stale value is acceptable.
    pub fn free_bytes(&self) -> usize {
        self.arena.size() - self.watermark()
    }

    /// Arena capacity in bytes
    pub fn total_bytes(&self) -> usize {
        self.arena.size()
    }

    /// Forbid further allocation for the rest of the process
    ///
    /// Idempotent. The first call logs the heap usage summary.
    pub fn disable(&self) {
        let was_enabled = {
            let _section = PauseGuard::enter(&self.gate);
            self.enabled.swap(false, Ordering::Relaxed)
        };

        if was_enabled {
            log::info!("{}", self.usage());
        }
    }

    /// Whether allocation is still allowed
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Bytes handed out so far
    pub fn watermark(&self) -> usize {
        self.watermark.load(Ordering::Relaxed)
    }

    /// Snapshot of the heap counters
    pub fn usage(&self) -> HeapUsage {
        HeapUsage {
            total_bytes: self.total_bytes(),
            free_bytes: self.free_bytes(),
            allocations: self.allocations.load(Ordering::Relaxed),
            failed_allocations: self.failures.load(Ordering::Relaxed),
        }
    }

    /// The byte range this heap carves blocks from
    pub fn arena(&self) -> &ArenaBounds {
        &self.arena
    }

    /// Alignment and out-of-memory hook fixed at construction
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// The scheduler gate this heap pauses through
    pub fn gate(&self) -> &G {
        &self.gate
    }

    #[cold]
    pub(crate) fn violate(&self, violation: ContractViolation) -> ! {
        self.reporter.report(&violation)
    }
}
