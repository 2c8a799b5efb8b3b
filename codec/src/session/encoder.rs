//! Encoder session.

use tracing::{debug, trace};
use voxlink_buffer::{CarryBuffer, ScratchBuffer};

use crate::engine::EncodeEngine;
use crate::error::CodecError;

#[cfg(feature = "speex")]
use crate::config::EncoderConfig;
#[cfg(feature = "speex")]
use crate::engine::speex::SpeexEncoder;

/// Streaming encoder over a fixed-frame engine.
///
/// [`process`](Self::process) accepts sample buffers of any length. Whole
/// frames are encoded immediately; the sub-frame tail is carried over and
/// completed by the next call, so concatenating the outputs of successive
/// calls yields the same bytes as encoding the whole stream at once.
pub struct EncoderSession<E> {
    engine: E,
    carry: CarryBuffer<i16>,
    out: ScratchBuffer<u8>,
}

#[cfg(feature = "speex")]
impl EncoderSession<SpeexEncoder> {
    /// Opens a session backed by a speex encoder.
    pub fn open(config: &EncoderConfig) -> Result<Self, CodecError> {
        config.validate()?;
        let engine = SpeexEncoder::new(config)?;
        debug!(
            sample_rate = config.sample_rate,
            quality = config.quality,
            "encoder session opened"
        );
        Ok(Self::new(engine))
    }
}

impl<E: EncodeEngine> EncoderSession<E> {
    /// Wraps an already-created engine in a session.
    pub fn new(engine: E) -> Self {
        let frame_size = engine.frame_size();
        Self {
            engine,
            carry: CarryBuffer::new(frame_size),
            out: ScratchBuffer::new(),
        }
    }

    /// Samples per input frame.
    pub fn frame_size(&self) -> usize {
        self.engine.frame_size()
    }

    /// Bytes per encoded frame.
    pub fn frame_bytes(&self) -> usize {
        self.engine.frame_bytes()
    }

    /// Samples carried over from earlier calls, waiting for a whole frame.
    /// Always strictly less than [`frame_size`](Self::frame_size).
    pub fn pending(&self) -> usize {
        self.carry.len()
    }

    /// Encodes a chunk of samples, returning the bytes produced by this call.
    ///
    /// The returned view borrows session-owned storage and is valid until the
    /// next `&mut self` call; callers keeping the bytes longer must copy
    /// them out.
    ///
    /// On an engine failure the call aborts with the error, the partially
    /// buffered samples of the failed frame are dropped, and the session
    /// stays usable; output already written by the failed call is undefined.
    pub fn process(&mut self, samples: &[i16]) -> Result<&[u8], CodecError> {
        let frame_size = self.engine.frame_size();
        let frame_bytes = self.engine.frame_bytes();

        // Worst case for this call: every whole frame of the input, plus the
        // carried frame the input may complete.
        let worst = (samples.len() / frame_size + 1) * frame_bytes;
        self.out.ensure_capacity(worst)?;

        let mut cursor = 0;
        let mut written = 0;

        if !self.carry.is_empty() {
            cursor += self.carry.fill(samples);
            if self.carry.is_full() {
                let res = self.engine.encode_frame(
                    self.carry.as_slice(),
                    &mut self.out.prefix_mut(worst)[..frame_bytes],
                );
                // Cleared on failure as well: the carry length must stay
                // below a frame after every call.
                self.carry.clear();
                res?;
                written = frame_bytes;
            }
        }

        while samples.len() - cursor >= frame_size {
            self.engine.encode_frame(
                &samples[cursor..cursor + frame_size],
                &mut self.out.prefix_mut(worst)[written..written + frame_bytes],
            )?;
            cursor += frame_size;
            written += frame_bytes;
        }

        if cursor < samples.len() {
            self.carry.store(&samples[cursor..]);
        }

        trace!(
            samples = samples.len(),
            bytes = written,
            pending = self.carry.len(),
            "encoded chunk"
        );
        Ok(self.out.prefix(written))
    }

    /// Discards any carried samples without touching the output buffer or
    /// the engine. For stream discontinuities (seek, restart) where
    /// continuity across frame boundaries is intentionally broken.
    pub fn reset(&mut self) {
        self.carry.clear();
        debug!("encoder session reset");
    }

    /// Closes the session, releasing the engine and buffers.
    pub fn close(self) {
        debug!("encoder session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, EngineError};

    /// Fixed-geometry engine writing a recognizable byte per frame.
    struct StubEncode {
        frame_size: usize,
        frame_bytes: usize,
        frames: usize,
        fail_on_frame: Option<usize>,
    }

    impl StubEncode {
        fn wideband() -> Self {
            Self {
                frame_size: 320,
                frame_bytes: 70,
                frames: 0,
                fail_on_frame: None,
            }
        }
    }

    impl Engine for StubEncode {
        fn frame_size(&self) -> usize {
            self.frame_size
        }

        fn frame_bytes(&self) -> usize {
            self.frame_bytes
        }
    }

    impl EncodeEngine for StubEncode {
        fn encode_frame(&mut self, pcm: &[i16], bits: &mut [u8]) -> Result<(), EngineError> {
            assert_eq!(pcm.len(), self.frame_size);
            assert_eq!(bits.len(), self.frame_bytes);
            let frame = self.frames;
            self.frames += 1;
            if self.fail_on_frame == Some(frame) {
                return Err(EngineError::EncodeFailed("stub failure".into()));
            }
            bits.fill(frame as u8);
            Ok(())
        }
    }

    #[test]
    fn test_partial_frame_is_carried() {
        let mut enc = EncoderSession::new(StubEncode::wideband());

        // 500 samples: one whole frame encoded, 180 carried.
        let bits = enc.process(&vec![0i16; 500]).unwrap();
        assert_eq!(bits.len(), 70);
        assert_eq!(enc.pending(), 180);
    }

    #[test]
    fn test_carry_is_completed_by_next_call() {
        let mut enc = EncoderSession::new(StubEncode::wideband());

        let first = enc.process(&vec![0i16; 500]).unwrap().len();
        // 140 more samples complete the carried frame exactly.
        let second = enc.process(&vec![0i16; 140]).unwrap().len();

        assert_eq!(first + second, 140); // two frames from 640 samples
        assert_eq!(enc.pending(), 0);
    }

    #[test]
    fn test_empty_input() {
        let mut enc = EncoderSession::new(StubEncode::wideband());
        enc.process(&vec![0i16; 100]).unwrap();

        let bits = enc.process(&[]).unwrap();
        assert!(bits.is_empty());
        assert_eq!(enc.pending(), 100);
    }

    #[test]
    fn test_input_smaller_than_missing_carry() {
        let mut enc = EncoderSession::new(StubEncode::wideband());
        enc.process(&vec![0i16; 300]).unwrap();

        // 10 more samples still do not complete the frame.
        let bits = enc.process(&vec![0i16; 10]).unwrap();
        assert!(bits.is_empty());
        assert_eq!(enc.pending(), 310);
    }

    #[test]
    fn test_many_small_calls_accumulate() {
        let mut enc = EncoderSession::new(StubEncode::wideband());

        let mut total = 0;
        for _ in 0..16 {
            total += enc.process(&vec![0i16; 100]).unwrap().len();
        }

        // 1600 samples = 5 whole frames.
        assert_eq!(total, 5 * 70);
        assert_eq!(enc.pending(), 0);
    }

    #[test]
    fn test_frames_are_emitted_in_order() {
        let mut enc = EncoderSession::new(StubEncode::wideband());

        let mut stream = Vec::new();
        stream.extend_from_slice(enc.process(&vec![0i16; 500]).unwrap());
        stream.extend_from_slice(enc.process(&vec![0i16; 460]).unwrap());

        // Frame 0 from the first call; frames 1 and 2 from the second
        // (carry completion first, then the whole frame).
        assert_eq!(stream.len(), 3 * 70);
        assert!(stream[..70].iter().all(|&b| b == 0));
        assert!(stream[70..140].iter().all(|&b| b == 1));
        assert!(stream[140..].iter().all(|&b| b == 2));
    }

    #[test]
    fn test_reset_discards_carry() {
        let mut enc = EncoderSession::new(StubEncode::wideband());
        enc.process(&vec![0i16; 500]).unwrap();
        assert_eq!(enc.pending(), 180);

        enc.reset();
        assert_eq!(enc.pending(), 0);

        // The next aligned chunk encodes cleanly.
        let bits = enc.process(&vec![0i16; 320]).unwrap();
        assert_eq!(bits.len(), 70);
        assert_eq!(enc.pending(), 0);
    }

    #[test]
    fn test_engine_failure_keeps_session_usable() {
        let mut engine = StubEncode::wideband();
        engine.fail_on_frame = Some(1);
        let mut enc = EncoderSession::new(engine);

        enc.process(&vec![0i16; 500]).unwrap();
        let err = enc.process(&vec![0i16; 140]).unwrap_err();
        assert!(matches!(err, CodecError::Engine(_)));

        // The failed frame's samples are gone, the invariant holds, and
        // later calls succeed.
        assert_eq!(enc.pending(), 0);
        let bits = enc.process(&vec![0i16; 320]).unwrap();
        assert_eq!(bits.len(), 70);
    }

    #[test]
    fn test_carry_invariant_over_random_chunking() {
        let mut enc = EncoderSession::new(StubEncode::wideband());

        // Deterministic LCG chunk sizes in [0, 600).
        let mut state = 0x2545f491u64;
        for _ in 0..200 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let n = (state >> 33) as usize % 600;
            enc.process(&vec![0i16; n]).unwrap();
            assert!(enc.pending() < enc.frame_size());
        }
    }
}
