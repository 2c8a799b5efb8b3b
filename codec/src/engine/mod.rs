//! Codec engine boundary.
//!
//! Sessions drive the codec through the engine traits: one call per frame,
//! fixed sizes in both directions. Everything the codec does internally
//! (mode selection, bit allocation, state) stays behind this boundary, which
//! also lets tests substitute a stub engine for the real thing.
//!
//! An engine state is directional, so the per-frame operations live in
//! [`EncodeEngine`] and [`DecodeEngine`] on top of the shared [`Engine`]
//! geometry. A backend that keeps no directional state (like [`l16`])
//! implements both.
//!
//! Shipped backends:
//!
//! - [`l16`]: linear PCM, always available
//! - [`speex`]: libspeex via FFI, behind the `speex` cargo feature

pub mod l16;
#[cfg(feature = "speex")]
pub mod speex;

use thiserror::Error;

/// Codec engine error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Failed to create the engine.
    #[error("engine: create failed: {0}")]
    CreateFailed(String),
    /// Encoding a frame failed.
    #[error("engine: encode failed: {0}")]
    EncodeFailed(String),
    /// Decoding a frame failed.
    #[error("engine: decode failed: {0}")]
    DecodeFailed(String),
}

/// Frame geometry of a fixed-frame codec.
///
/// An engine is owned by exactly one session and reached only through these
/// traits. The geometry is fixed for the engine's lifetime.
pub trait Engine {
    /// Samples consumed (produced) per frame.
    fn frame_size(&self) -> usize;

    /// Bytes produced (consumed) per encoded frame.
    fn frame_bytes(&self) -> usize;
}

/// The encode direction of a codec.
pub trait EncodeEngine: Engine {
    /// Encodes one frame of [`frame_size`](Engine::frame_size) samples into
    /// [`frame_bytes`](Engine::frame_bytes) bytes.
    ///
    /// The session guarantees the slice lengths; an engine may rely on them.
    fn encode_frame(&mut self, pcm: &[i16], bits: &mut [u8]) -> Result<(), EngineError>;
}

/// The decode direction of a codec.
pub trait DecodeEngine: Engine {
    /// Decodes one [`frame_bytes`](Engine::frame_bytes)-sized bit-chunk into
    /// [`frame_size`](Engine::frame_size) samples.
    ///
    /// The session guarantees the slice lengths; an engine may rely on them.
    fn decode_frame(&mut self, bits: &[u8], pcm: &mut [i16]) -> Result<(), EngineError>;
}
