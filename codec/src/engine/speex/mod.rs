//! Speex codec engine.
//!
//! FFI wrappers around libspeex. The codec mode follows the sampling rate
//! (8 kHz narrowband, 16 kHz wideband, 32 kHz ultra-wideband); the remaining
//! configuration maps onto encoder/decoder ctls.
//!
//! The encoder derives its frame stride from the engine-reported CBR
//! bit-rate: the bits of one 20 ms frame, rounded up to whole bytes
//! (70 bytes for wideband quality 8). The decoder is told the stride via
//! [`DecoderConfig`](crate::DecoderConfig), since the positional wire format
//! carries no framing headers to recover it from.

mod decoder;
mod encoder;
mod ffi;

pub use decoder::SpeexDecoder;
pub use encoder::SpeexEncoder;

use std::os::raw::c_int;

use crate::config::SampleRate;

fn mode_id(rate: SampleRate) -> c_int {
    match rate {
        SampleRate::Narrowband => ffi::SPEEX_MODEID_NB,
        SampleRate::Wideband => ffi::SPEEX_MODEID_WB,
        SampleRate::UltraWideband => ffi::SPEEX_MODEID_UWB,
    }
}

/// Bytes per encoded 20 ms frame at a fixed `bitrate`.
fn frame_bytes_for(bitrate: c_int) -> usize {
    (bitrate.max(0) as usize / 50).div_ceil(8)
}
