//! Fixed-capacity carry-over accumulator.

/// Accumulator for the sub-frame tail of a chunked input stream.
///
/// A fixed-frame codec consumes input in whole frames, but a live stream
/// arrives in arbitrary chunk sizes. `CarryBuffer<T>` holds the samples left
/// over after the last whole frame of one call, and tops them up to a full
/// frame from the head of the next call's input.
///
/// The capacity is the frame size and is fixed at construction. The session
/// that owns this buffer keeps the stored length strictly below capacity
/// between calls; the buffer is only full transiently, in the instant before
/// the completed frame is handed to the codec.
#[derive(Debug)]
pub struct CarryBuffer<T> {
    buf: Box<[T]>,
    len: usize,
}

impl<T: Copy + Default> CarryBuffer<T> {
    /// Creates an empty carry buffer holding up to `capacity` elements.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![T::default(); capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Returns the fixed capacity (the frame size).
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of carried elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing is carried.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if a whole frame has been accumulated.
    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Returns the number of elements still needed to complete a frame.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }

    /// Tops up the buffer from `input`, consuming at most
    /// [`remaining`](Self::remaining) elements. Returns how many were taken.
    pub fn fill(&mut self, input: &[T]) -> usize {
        let take = self.remaining().min(input.len());
        self.buf[self.len..self.len + take].copy_from_slice(&input[..take]);
        self.len += take;
        take
    }

    /// Replaces the contents with `tail`, the sub-frame remainder of a call.
    ///
    /// # Panics
    ///
    /// Panics if `tail` does not fit in the buffer.
    pub fn store(&mut self, tail: &[T]) {
        assert!(
            tail.len() <= self.buf.len(),
            "carry: remainder of {} exceeds frame size {}",
            tail.len(),
            self.buf.len()
        );
        self.buf[..tail.len()].copy_from_slice(tail);
        self.len = tail.len();
    }

    /// Discards any carried elements.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Returns the carried elements. When [`is_full`](Self::is_full) this is
    /// exactly one frame.
    pub fn as_slice(&self) -> &[T] {
        &self.buf[..self.len]
    }
}
