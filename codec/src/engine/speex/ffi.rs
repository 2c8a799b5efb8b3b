//! FFI bindings to libspeex.

use std::os::raw::{c_char, c_int, c_void};

// Mode ids (speex.h)
pub const SPEEX_MODEID_NB: c_int = 0;
pub const SPEEX_MODEID_WB: c_int = 1;
pub const SPEEX_MODEID_UWB: c_int = 2;

// Encoder/decoder ctl requests (speex.h)
pub const SPEEX_SET_ENH: c_int = 0;
pub const SPEEX_GET_FRAME_SIZE: c_int = 3;
pub const SPEEX_SET_QUALITY: c_int = 4;
pub const SPEEX_SET_VBR: c_int = 12;
pub const SPEEX_SET_VBR_QUALITY: c_int = 14;
pub const SPEEX_SET_COMPLEXITY: c_int = 16;
pub const SPEEX_SET_BITRATE: c_int = 18;
pub const SPEEX_GET_BITRATE: c_int = 19;
pub const SPEEX_SET_SAMPLING_RATE: c_int = 24;
pub const SPEEX_SET_VAD: c_int = 28;
pub const SPEEX_SET_DTX: c_int = 32;
pub const SPEEX_SET_HIGHPASS: c_int = 44;

/// Opaque mode descriptor.
pub enum SpeexMode {}

/// Bit-packing state (speex_bits.h). Layout must match the C struct.
#[repr(C)]
pub struct SpeexBits {
    pub chars: *mut c_char,
    pub nb_bits: c_int,
    pub char_ptr: c_int,
    pub bit_ptr: c_int,
    pub owner: c_int,
    pub overflow: c_int,
    pub buf_size: c_int,
    pub reserved1: c_int,
    pub reserved2: *mut c_void,
}

unsafe extern "C" {
    pub fn speex_lib_get_mode(mode: c_int) -> *const SpeexMode;

    // Encoder
    pub fn speex_encoder_init(mode: *const SpeexMode) -> *mut c_void;
    pub fn speex_encoder_destroy(state: *mut c_void);
    pub fn speex_encoder_ctl(state: *mut c_void, request: c_int, ptr: *mut c_void) -> c_int;
    pub fn speex_encode_int(state: *mut c_void, input: *mut i16, bits: *mut SpeexBits) -> c_int;

    // Decoder
    pub fn speex_decoder_init(mode: *const SpeexMode) -> *mut c_void;
    pub fn speex_decoder_destroy(state: *mut c_void);
    pub fn speex_decoder_ctl(state: *mut c_void, request: c_int, ptr: *mut c_void) -> c_int;
    pub fn speex_decode_int(state: *mut c_void, bits: *mut SpeexBits, out: *mut i16) -> c_int;

    // Bit packing
    pub fn speex_bits_init(bits: *mut SpeexBits);
    pub fn speex_bits_destroy(bits: *mut SpeexBits);
    pub fn speex_bits_reset(bits: *mut SpeexBits);
    pub fn speex_bits_write(bits: *mut SpeexBits, bytes: *mut c_char, max_len: c_int) -> c_int;
    pub fn speex_bits_read_from(bits: *mut SpeexBits, bytes: *const c_char, len: c_int) -> c_int;
}
