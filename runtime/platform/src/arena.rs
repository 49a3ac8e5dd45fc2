//! Arena bounds
//!
//! An arena is the fixed byte range every heap allocation is carved from. It
//! is established once at startup, either from a statically sized array
//! ([`HeapArray`]) or from the heap symbols the linker script defines
//! (`linker_arena`, runtime mode only), and lives until the process ends.

use core::cell::UnsafeCell;
use core::ptr::NonNull;

use static_assertions::{const_assert, const_assert_eq};

/// Alignment of [`HeapArray`] storage in bytes
pub const HEAP_ARRAY_ALIGN: usize = 32;

const_assert!(HEAP_ARRAY_ALIGN.is_power_of_two());

/// Immutable `[start, start + size)` byte range backing a heap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaBounds {
    start: NonNull<u8>,
    size: usize,
}

// SAFETY: ArenaBounds only describes a memory range. Access to the bytes is
// mediated by the allocator that owns the bounds, which hands out disjoint
// sub-ranges under the scheduler pause.
unsafe impl Send for ArenaBounds {}
unsafe impl Sync for ArenaBounds {}

impl ArenaBounds {
    /// Describe an arena from a raw start pointer and size
    ///
    /// # Safety
    /// - `start..start + size` must be valid for reads and writes for the
    ///   rest of the program
    /// - nothing else may access the range while an allocator owns it
    /// - `start + size` must not wrap the address space
    pub const unsafe fn from_raw_parts(start: NonNull<u8>, size: usize) -> Self {
        Self { start, size }
    }

    /// Take ownership of a `'static` byte slice as an arena
    pub fn from_static(bytes: &'static mut [u8]) -> Self {
        let size = bytes.len();
        // SAFETY: the exclusive 'static borrow is consumed here, so the range
        // stays valid and unaliased for the rest of the program.
        unsafe { Self::from_raw_parts(NonNull::from(bytes).cast::<u8>(), size) }
    }

    /// First byte of the arena
    pub const fn start(&self) -> NonNull<u8> {
        self.start
    }

    /// Arena capacity in bytes
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Address of the first byte
    pub fn start_addr(&self) -> usize {
        self.start.as_ptr() as usize
    }

    /// One past the last byte
    pub fn end_addr(&self) -> usize {
        self.start_addr() + self.size
    }

    /// Check whether `ptr` points inside the arena
    pub fn contains(&self, ptr: *const u8) -> bool {
        self.offset_of(ptr).is_some()
    }

    /// Offset of `ptr` from the arena start, if it lies inside the arena
    pub fn offset_of(&self, ptr: *const u8) -> Option<usize> {
        let addr = ptr as usize;
        if addr < self.start_addr() || addr >= self.end_addr() {
            return None;
        }
        Some(addr - self.start_addr())
    }

    /// Check whether the start address is a multiple of `alignment`
    pub fn is_aligned_to(&self, alignment: usize) -> bool {
        alignment.is_power_of_two() && self.start_addr() & (alignment - 1) == 0
    }

    /// Pointer `offset` bytes into the arena
    ///
    /// # Safety
    /// `offset` must be strictly less than [`size`](Self::size).
    pub unsafe fn ptr_at(&self, offset: usize) -> NonNull<u8> {
        debug_assert!(offset < self.size);
        NonNull::new_unchecked(self.start.as_ptr().add(offset))
    }
}

/// Statically sized, 32-byte aligned heap storage
///
/// Used when the platform does not carve the heap out in its linker script:
///
/// ```rust
/// use ember_platform::HeapArray;
///
/// static HEAP: HeapArray<4096> = HeapArray::new();
/// let arena = HEAP.bounds();
/// assert_eq!(arena.size(), 4096);
/// ```
///
/// Call [`bounds`](Self::bounds) once and hand the result to a single
/// allocator. It is `const`, so the allocator itself can be a `static`.
#[repr(C, align(32))]
pub struct HeapArray<const N: usize> {
    bytes: UnsafeCell<[u8; N]>,
}

// SAFETY: the array is only ever accessed through the allocator that owns its
// bounds, which serialises access with the scheduler pause.
unsafe impl<const N: usize> Sync for HeapArray<N> {}

const_assert_eq!(core::mem::align_of::<HeapArray<1>>(), HEAP_ARRAY_ALIGN);

impl<const N: usize> HeapArray<N> {
    /// Zero-initialised storage
    pub const fn new() -> Self {
        Self {
            bytes: UnsafeCell::new([0; N]),
        }
    }

    /// Arena bounds covering the whole array
    pub const fn bounds(&'static self) -> ArenaBounds {
        // SAFETY: `self` is 'static and UnsafeCell::get is never null. The
        // caller hands the bounds to exactly one allocator.
        unsafe { ArenaBounds::from_raw_parts(NonNull::new_unchecked(self.bytes.get().cast::<u8>()), N) }
    }
}

impl<const N: usize> Default for HeapArray<N> {
    fn default() -> Self {
        Self::new()
    }
}
