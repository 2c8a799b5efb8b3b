//! Stream-level properties of the encoder/decoder sessions.

use voxlink_codec::engine::l16::L16Engine;
use voxlink_codec::{DecoderSession, EncoderSession, SampleRate};

/// Deterministic chunk-size generator.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as usize % bound
    }
}

fn sine_stream(len: usize) -> Vec<i16> {
    (0..len)
        .map(|i| ((i as f32 * 0.05).sin() * 12000.0) as i16)
        .collect()
}

fn encode_in_chunks(stream: &[i16], chunks: &[usize]) -> Vec<u8> {
    let mut enc = EncoderSession::new(L16Engine::new(SampleRate::Wideband));
    let mut out = Vec::new();
    let mut offset = 0;
    for &n in chunks {
        let n = n.min(stream.len() - offset);
        out.extend_from_slice(enc.process(&stream[offset..offset + n]).unwrap());
        offset += n;
    }
    out.extend_from_slice(enc.process(&stream[offset..]).unwrap());
    out
}

#[test]
fn test_chunking_invariance() {
    let stream = sine_stream(5000);
    let whole = encode_in_chunks(&stream, &[]);

    let mut lcg = Lcg(0x9e3779b97f4a7c15);
    for _ in 0..20 {
        let mut chunks = Vec::new();
        let mut remaining = stream.len();
        while remaining > 0 {
            let n = lcg.next(700).min(remaining);
            chunks.push(n);
            remaining -= n;
        }
        assert_eq!(encode_in_chunks(&stream, &chunks), whole);
    }
}

#[test]
fn test_round_trip_on_frame_aligned_input() {
    let frame_size = SampleRate::Wideband.frame_size();
    let stream = sine_stream(frame_size * 7);

    let mut enc = EncoderSession::new(L16Engine::new(SampleRate::Wideband));
    let mut dec = DecoderSession::new(L16Engine::new(SampleRate::Wideband));

    let bits = enc.process(&stream).unwrap().to_vec();
    assert_eq!(enc.pending(), 0);

    let (samples, err) = dec.process(&bits).unwrap();
    assert!(err.is_none());
    assert_eq!(samples, &stream[..]);
}

#[test]
fn test_unflushed_remainder_is_never_emitted() {
    let frame_size = SampleRate::Wideband.frame_size();
    let stream = sine_stream(frame_size * 3 + 123);

    let mut enc = EncoderSession::new(L16Engine::new(SampleRate::Wideband));
    let mut dec = DecoderSession::new(L16Engine::new(SampleRate::Wideband));

    let bits = enc.process(&stream).unwrap().to_vec();
    assert_eq!(enc.pending(), 123);

    // Only the three whole frames round-trip; the tail stays in the session.
    let (samples, err) = dec.process(&bits).unwrap();
    assert!(err.is_none());
    assert_eq!(samples, &stream[..frame_size * 3]);
}

#[test]
fn test_round_trip_across_chunked_calls() {
    let frame_size = SampleRate::Narrowband.frame_size();
    let stream = sine_stream(frame_size * 25);

    let mut enc = EncoderSession::new(L16Engine::new(SampleRate::Narrowband));
    let mut dec = DecoderSession::new(L16Engine::new(SampleRate::Narrowband));

    let mut lcg = Lcg(0x853c49e6748fea9b);
    let mut bits = Vec::new();
    let mut offset = 0;
    while offset < stream.len() {
        let n = lcg.next(500).min(stream.len() - offset);
        bits.extend_from_slice(enc.process(&stream[offset..offset + n]).unwrap());
        offset += n;
    }

    let (samples, err) = dec.process(&bits).unwrap();
    assert!(err.is_none());
    // Every sample of a completed frame survives; the unflushed tail does not.
    assert_eq!(samples, &stream[..samples.len()]);
    assert_eq!(samples.len() + enc.pending(), stream.len());
}

#[test]
fn test_worst_case_output_bound_holds_for_random_chunking() {
    // Each call may produce at most (n / frame_size + 1) * frame_bytes
    // bytes: the whole frames of the input plus the carried frame the input
    // completes. Checked here over many adversarial call patterns, small
    // calls included.
    let mut enc = EncoderSession::new(L16Engine::new(SampleRate::Narrowband));
    let frame_size = enc.frame_size();
    let frame_bytes = enc.frame_bytes();

    let mut lcg = Lcg(0xda3e39cb94b95bdb);
    for round in 0..2000 {
        // Mostly tiny chunks, occasionally a large one.
        let bound = if round % 7 == 0 { frame_size * 4 } else { 24 };
        let n = lcg.next(bound.max(1));
        let produced = enc.process(&vec![0i16; n]).unwrap().len();
        assert!(produced <= (n / frame_size + 1) * frame_bytes);
        assert!(enc.pending() < frame_size);
    }
}

#[test]
fn test_sessions_are_independent() {
    let stream_a = sine_stream(1000);
    let stream_b: Vec<i16> = stream_a.iter().map(|&s| s.wrapping_neg()).collect();

    let mut enc_a = EncoderSession::new(L16Engine::new(SampleRate::Wideband));
    let mut enc_b = EncoderSession::new(L16Engine::new(SampleRate::Wideband));

    // Interleaved use of two sessions leaves each stream intact.
    let mut out_a = enc_a.process(&stream_a[..600]).unwrap().to_vec();
    let mut out_b = enc_b.process(&stream_b[..600]).unwrap().to_vec();
    out_a.extend_from_slice(enc_a.process(&stream_a[600..]).unwrap());
    out_b.extend_from_slice(enc_b.process(&stream_b[600..]).unwrap());

    assert_eq!(out_a, encode_in_chunks(&stream_a, &[]));
    assert_eq!(out_b, encode_in_chunks(&stream_b, &[]));
}
