//! Allocator configuration
//!
//! Backend selection happens at compile time through Cargo features
//! (`mock`, `runtime`). Everything that varies per board lives here and is
//! fixed once the allocator is constructed.

use static_assertions::const_assert;

use crate::error::ConfigError;

/// Default allocation alignment in bytes (the platform's byte alignment)
pub const DEFAULT_ALIGNMENT: usize = 8;

const_assert!(DEFAULT_ALIGNMENT.is_power_of_two());
const_assert!(DEFAULT_ALIGNMENT <= ember_platform::HEAP_ARRAY_ALIGN);

/// Hook invoked after a failed allocation, outside the critical section
pub type OomHook = fn();

/// Heap configuration
///
/// ```rust
/// use ember_allocator::AllocatorConfig;
///
/// fn on_oom() {}
///
/// let config = AllocatorConfig::new()
///     .with_alignment(16)
///     .unwrap()
///     .with_oom_hook(on_oom);
/// assert_eq!(config.alignment(), 16);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AllocatorConfig {
    alignment: usize,
    oom_hook: Option<OomHook>,
}

impl AllocatorConfig {
    /// Default alignment, no out-of-memory hook
    pub const fn new() -> Self {
        Self {
            alignment: DEFAULT_ALIGNMENT,
            oom_hook: None,
        }
    }

    /// Set the alignment every allocation size is rounded up to
    ///
    /// # Errors
    /// Returns error if `alignment` is not a power of 2
    pub const fn with_alignment(self, alignment: usize) -> Result<Self, ConfigError> {
        if !alignment.is_power_of_two() {
            return Err(ConfigError::InvalidAlignment { alignment });
        }
        Ok(Self { alignment, ..self })
    }

    /// Register a hook to run after every failed allocation
    ///
    /// The hook runs with the scheduler resumed, so it may log, block or even
    /// allocate again.
    pub const fn with_oom_hook(self, hook: OomHook) -> Self {
        Self {
            oom_hook: Some(hook),
            ..self
        }
    }

    /// Allocation alignment in bytes
    pub const fn alignment(&self) -> usize {
        self.alignment
    }

    /// Registered out-of-memory hook, if any
    pub const fn oom_hook(&self) -> Option<OomHook> {
        self.oom_hook
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
