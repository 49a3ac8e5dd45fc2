//! Heap error taxonomy
//!
//! Two tiers that must never be confused:
//! - [`AllocError`]: the request could not be satisfied. The caller decides
//!   what to do about it.
//! - [`ContractViolation`]: the caller broke the heap's contract. Handed to
//!   the fault reporter, which does not return.
//!
//! [`ConfigError`] covers construction-time validation.

use thiserror::Error;

/// Recoverable allocation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("Out of memory (requested: {requested} bytes, rounded: {rounded}, free: {free})")]
    OutOfMemory {
        requested: usize,
        rounded: usize,
        free: usize,
    },

    #[error("Allocation size overflows the offset type (requested: {requested} bytes)")]
    SizeOverflow { requested: usize },

    #[error("Zero-byte allocation")]
    ZeroSize,
}

/// Programming-contract violations, reported as faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("free() called on a watermark heap (address: {addr:#x})")]
    FreeNotSupported { addr: usize },

    #[error("allocation of {requested} bytes after the heap was disabled")]
    AllocateAfterDisable { requested: usize },

    #[error("reset() after the heap was disabled")]
    ResetAfterDisable,
}

/// Allocator construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid alignment (must be power of 2): {alignment}")]
    InvalidAlignment { alignment: usize },

    #[error("Arena start {start:#x} is not aligned to {alignment} bytes")]
    MisalignedArena { start: usize, alignment: usize },
}

pub type Result<T> = core::result::Result<T, AllocError>;
