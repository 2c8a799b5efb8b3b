//! Session-local buffer primitives for streaming codecs.
//!
//! This crate provides the two buffer disciplines a codec session needs to
//! adapt an arbitrarily chunked stream to a fixed-frame transform:
//!
//! - [`ScratchBuffer<T>`]: a reusable output buffer whose capacity only ever
//!   grows. Each processing call overwrites a prefix of it and hands the
//!   caller a borrowed view; the allocation survives across calls.
//! - [`CarryBuffer<T>`]: a fixed-capacity accumulator for the sub-frame tail
//!   of an input stream, topped up to a whole frame by the next call.
//!
//! Both types are single-owner and perform no locking: a codec session is
//! driven by one thread at a time, so unlike a producer/consumer queue there
//! is nothing to synchronize.
//!
//! # Example
//!
//! ```
//! use voxlink_buffer::{CarryBuffer, ScratchBuffer};
//!
//! let mut out = ScratchBuffer::<u8>::new();
//! out.ensure_capacity(140).unwrap();
//! out.prefix_mut(140).fill(0xAB);
//! assert_eq!(out.prefix(140).len(), 140);
//!
//! let mut carry = CarryBuffer::<i16>::new(320);
//! let consumed = carry.fill(&[1, 2, 3]);
//! assert_eq!(consumed, 3);
//! assert_eq!(carry.len(), 3);
//! ```

mod carry;
mod error;
mod scratch;

pub use carry::CarryBuffer;
pub use error::AllocationError;
pub use scratch::ScratchBuffer;
