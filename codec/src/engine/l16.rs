//! Linear PCM engine.

use super::{DecodeEngine, EncodeEngine, Engine, EngineError};
use crate::config::SampleRate;

/// Identity "codec": L16 samples packed as little-endian bytes.
///
/// Each frame of N samples maps to 2·N bytes and back without loss. Useful
/// as a default backend when no compressing codec is linked in, and as the
/// exact-round-trip engine in tests.
#[derive(Debug, Clone, Copy)]
pub struct L16Engine {
    frame_size: usize,
}

impl L16Engine {
    /// Creates an engine with the 20 ms frame size of `rate`.
    pub fn new(rate: SampleRate) -> Self {
        Self {
            frame_size: rate.frame_size(),
        }
    }
}

impl Engine for L16Engine {
    fn frame_size(&self) -> usize {
        self.frame_size
    }

    fn frame_bytes(&self) -> usize {
        self.frame_size * 2
    }
}

impl EncodeEngine for L16Engine {
    fn encode_frame(&mut self, pcm: &[i16], bits: &mut [u8]) -> Result<(), EngineError> {
        debug_assert_eq!(pcm.len(), self.frame_size());
        debug_assert_eq!(bits.len(), self.frame_bytes());
        for (sample, out) in pcm.iter().zip(bits.chunks_exact_mut(2)) {
            out.copy_from_slice(&sample.to_le_bytes());
        }
        Ok(())
    }
}

impl DecodeEngine for L16Engine {
    fn decode_frame(&mut self, bits: &[u8], pcm: &mut [i16]) -> Result<(), EngineError> {
        if bits.len() != self.frame_bytes() {
            return Err(EngineError::DecodeFailed(format!(
                "l16: frame of {} bytes, expected {}",
                bits.len(),
                self.frame_bytes()
            )));
        }
        for (bytes, sample) in bits.chunks_exact(2).zip(pcm.iter_mut()) {
            *sample = i16::from_le_bytes([bytes[0], bytes[1]]);
        }
        Ok(())
    }
}
