//! Watermark arithmetic
//!
//! Pure functions deciding whether a request fits and where it lands. No
//! scheduler interaction and no side effects, so every boundary case can be
//! tested without an arena.
//!
//! # Boundary rule
//! A request is accepted only when the new watermark is strictly below the
//! arena size (`w + size < S`). A request that would fill the arena to its
//! very last byte is rejected, which leaves the final aligned slot of every
//! arena unused. This matches the heap this allocator replaces and callers
//! size their arenas against it; it may be an off-by-one in that heap, but
//! changing it would move the exhaustion point of existing workloads.

use crate::error::AllocError;

/// Round `size` up to a multiple of `alignment`
///
/// `alignment` must be a power of two. Returns `None` if rounding wraps.
#[inline]
pub const fn align_up(size: usize, alignment: usize) -> Option<usize> {
    let mask = alignment - 1;
    let remainder = size & mask;
    if remainder == 0 {
        return Some(size);
    }
    size.checked_add(alignment - remainder)
}

/// Accepted placement of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    /// Offset of the block from the arena start (the old watermark)
    pub offset: usize,
    /// Rounded block size
    pub size: usize,
}

impl Reservation {
    /// Watermark after committing this reservation
    pub const fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// Decide where a `requested`-byte block goes given the current watermark
///
/// # Errors
/// - [`AllocError::ZeroSize`] if the rounded size is zero
/// - [`AllocError::SizeOverflow`] if rounding or `watermark + size` wraps
/// - [`AllocError::OutOfMemory`] if the block does not fit strictly below
///   `capacity`
pub fn reserve(
    watermark: usize,
    requested: usize,
    capacity: usize,
    alignment: usize,
) -> Result<Reservation, AllocError> {
    let size = align_up(requested, alignment).ok_or(AllocError::SizeOverflow { requested })?;
    if size == 0 {
        return Err(AllocError::ZeroSize);
    }

    let end = watermark
        .checked_add(size)
        .ok_or(AllocError::SizeOverflow { requested })?;

    if end >= capacity {
        return Err(AllocError::OutOfMemory {
            requested,
            rounded: size,
            free: capacity.saturating_sub(watermark),
        });
    }

    Ok(Reservation {
        offset: watermark,
        size,
    })
}
