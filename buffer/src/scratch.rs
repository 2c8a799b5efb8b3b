//! Reusable output buffer with grow-only capacity.

use crate::error::AllocationError;

/// A reusable output buffer whose capacity never decreases.
///
/// `ScratchBuffer<T>` backs the output side of a codec session: each
/// processing call asks for the worst-case size it might write via
/// [`ensure_capacity`](Self::ensure_capacity), overwrites a prefix of the
/// buffer, and returns that prefix to the caller as a borrowed view. The
/// allocation is kept between calls, so a session that has seen its largest
/// chunk stops allocating entirely.
///
/// # Semantics
///
/// - **Grow**: `ensure_capacity(n)` reallocates only when `n` exceeds the
///   current capacity, and then to exactly `n`. Equal or smaller requests are
///   no-ops and keep the storage address stable.
/// - **Shrink**: never. A session that once processed a very large chunk
///   retains that allocation for all later, smaller chunks. Callers with
///   wildly varying chunk sizes should expect peak retention.
/// - **Failure**: a refused allocation returns [`AllocationError`] and leaves
///   the previous storage untouched; the buffer remains usable.
///
/// Contents are not preserved across calls: whoever takes
/// [`prefix_mut`](Self::prefix_mut) is expected to overwrite it.
#[derive(Debug, Default)]
pub struct ScratchBuffer<T> {
    buf: Vec<T>,
}

impl<T: Copy + Default> ScratchBuffer<T> {
    /// Creates an empty buffer with zero capacity.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Returns the current usable capacity in elements.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Grows the buffer to hold at least `required` elements.
    ///
    /// Does nothing when the buffer is already large enough. On failure the
    /// buffer keeps its previous storage and capacity.
    pub fn ensure_capacity(&mut self, required: usize) -> Result<(), AllocationError> {
        let have = self.buf.len();
        if have >= required {
            return Ok(());
        }
        self.buf
            .try_reserve_exact(required - have)
            .map_err(|e| AllocationError::new(required, e))?;
        self.buf.resize(required, T::default());
        Ok(())
    }

    /// Returns the first `len` elements.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the capacity established by
    /// [`ensure_capacity`](Self::ensure_capacity).
    pub fn prefix(&self, len: usize) -> &[T] {
        &self.buf[..len]
    }

    /// Returns the first `len` elements for writing.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the capacity established by
    /// [`ensure_capacity`](Self::ensure_capacity).
    pub fn prefix_mut(&mut self, len: usize) -> &mut [T] {
        &mut self.buf[..len]
    }

    /// Resets the first `len` elements to the default value.
    pub fn zero_prefix(&mut self, len: usize) {
        self.buf[..len].fill(T::default());
    }
}
