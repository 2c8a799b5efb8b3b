//! Streaming sessions for fixed-frame speech codecs.
//!
//! A speech codec consumes audio in fixed-size frames: a set number of
//! samples in, a set number of bytes out. A live stream does not arrive that
//! way. This crate provides the session layer in between:
//!
//! - [`EncoderSession`]: feeds arbitrarily chunked PCM to the codec, carrying
//!   the sub-frame tail of each call over to the next one.
//! - [`DecoderSession`]: walks a concatenated bit-chunk stream at a fixed
//!   stride and decodes each chunk into consecutive frame slots.
//! - [`engine::Engine`]: the boundary to the codec itself. Two backends
//!   ship with the crate: [`engine::l16::L16Engine`] (linear PCM, always
//!   available) and, behind the `speex` feature, libspeex.
//!
//! Both sessions return borrowed views into session-owned storage; a view is
//! valid until the next call that takes `&mut self`, which the borrow checker
//! enforces.
//!
//! # Example
//!
//! ```
//! use voxlink_codec::engine::l16::L16Engine;
//! use voxlink_codec::{EncoderSession, SampleRate};
//!
//! # fn main() -> Result<(), voxlink_codec::CodecError> {
//! let mut enc = EncoderSession::new(L16Engine::new(SampleRate::Wideband));
//!
//! // 500 samples = one whole 320-sample frame, 180 carried to the next call.
//! let pcm = vec![0i16; 500];
//! let bits = enc.process(&pcm)?;
//! assert_eq!(bits.len(), 640); // one L16 frame
//! assert_eq!(enc.pending(), 180);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod session;

pub use config::{DecoderConfig, EncoderConfig, SampleRate};
pub use error::{CodecError, DecodeError};
pub use session::{DecoderSession, EncoderSession};
