//! Decoder session.

use tracing::{debug, trace};
use voxlink_buffer::ScratchBuffer;

use crate::engine::{DecodeEngine, EngineError};
use crate::error::{CodecError, DecodeError};

#[cfg(feature = "speex")]
use crate::config::DecoderConfig;
#[cfg(feature = "speex")]
use crate::engine::speex::SpeexDecoder;

/// Streaming decoder over a fixed-frame engine.
///
/// [`process`](Self::process) accepts a concatenation of fixed-size
/// bit-chunks and decodes them in order into consecutive frame-sized slots
/// of a session-owned buffer. There is no carry-over state: frame boundaries
/// are positional, at the [`frame_bytes`](Self::frame_bytes) stride the
/// stream was produced with.
pub struct DecoderSession<E> {
    engine: E,
    out: ScratchBuffer<i16>,
}

#[cfg(feature = "speex")]
impl DecoderSession<SpeexDecoder> {
    /// Opens a session backed by a speex decoder.
    pub fn open(config: &DecoderConfig) -> Result<Self, CodecError> {
        config.validate()?;
        let engine = SpeexDecoder::new(config)?;
        debug!(sample_rate = config.sample_rate, "decoder session opened");
        Ok(Self::new(engine))
    }
}

impl<E: DecodeEngine> DecoderSession<E> {
    /// Wraps an already-created engine in a session.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            out: ScratchBuffer::new(),
        }
    }

    /// Samples per decoded frame.
    pub fn frame_size(&self) -> usize {
        self.engine.frame_size()
    }

    /// Bytes per encoded frame.
    pub fn frame_bytes(&self) -> usize {
        self.engine.frame_bytes()
    }

    /// Decodes a concatenated bit-chunk stream.
    ///
    /// On full success, returns all decoded samples paired with `None`. When
    /// a chunk is malformed (including a truncated trailing chunk), decoding
    /// stops at that frame and the samples decoded before it are returned
    /// paired with the [`DecodeError`]; partial output is legitimate and the
    /// returned length says how far it goes.
    ///
    /// The returned view borrows session-owned storage and is valid until
    /// the next `&mut self` call.
    pub fn process(&mut self, bits: &[u8]) -> Result<(&[i16], Option<DecodeError>), CodecError> {
        let frame_size = self.engine.frame_size();
        let frame_bytes = self.engine.frame_bytes();

        if bits.is_empty() {
            return Ok((self.out.prefix(0), None));
        }

        let frame_count = bits.len().div_ceil(frame_bytes);
        let total = frame_count * frame_size;
        self.out.ensure_capacity(total)?;
        // Stale samples from an earlier call must not read as decoded audio
        // when a later frame fails.
        self.out.zero_prefix(total);

        let mut decoded = 0;
        for frame in 0..frame_count {
            let start = frame * frame_bytes;
            let chunk = &bits[start..bits.len().min(start + frame_bytes)];

            let result = if chunk.len() < frame_bytes {
                Err(EngineError::DecodeFailed(format!(
                    "truncated frame: {} of {} bytes",
                    chunk.len(),
                    frame_bytes
                )))
            } else {
                self.engine.decode_frame(
                    chunk,
                    &mut self.out.prefix_mut(total)[decoded..decoded + frame_size],
                )
            };

            if let Err(source) = result {
                trace!(bytes = bits.len(), frames = frame, "decode stopped short");
                return Ok((self.out.prefix(decoded), Some(DecodeError { frame, source })));
            }
            decoded += frame_size;
        }

        trace!(
            bytes = bits.len(),
            frames = frame_count,
            samples = decoded,
            "decoded chunk"
        );
        Ok((self.out.prefix(decoded), None))
    }

    /// Closes the session, releasing the engine and buffers.
    pub fn close(self) {
        debug!("decoder session closed");
    }
}
