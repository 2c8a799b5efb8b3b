//! Speex decoder engine.

use std::mem::MaybeUninit;
use std::os::raw::{c_char, c_int, c_void};
use std::ptr;

use super::ffi::{self, SpeexBits};
use super::mode_id;
use crate::config::DecoderConfig;
use crate::engine::{DecodeEngine, Engine, EngineError};

/// Speex decoder state.
pub struct SpeexDecoder {
    state: *mut c_void,
    bits: SpeexBits,
    frame_size: usize,
    frame_bytes: usize,
}

// Safety: the state is only reached through &mut self and never shared.
unsafe impl Send for SpeexDecoder {}

impl Drop for SpeexDecoder {
    fn drop(&mut self) {
        unsafe {
            ffi::speex_bits_destroy(&mut self.bits);
            if !self.state.is_null() {
                ffi::speex_decoder_destroy(self.state);
                self.state = ptr::null_mut();
            }
        }
    }
}

impl SpeexDecoder {
    /// Creates a decoder for `config`.
    pub fn new(config: &DecoderConfig) -> Result<Self, EngineError> {
        let rate = config
            .validate()
            .map_err(|e| EngineError::CreateFailed(e.to_string()))?;

        let state = unsafe {
            let mode = ffi::speex_lib_get_mode(mode_id(rate));
            ffi::speex_decoder_init(mode)
        };
        if state.is_null() {
            return Err(EngineError::CreateFailed("speex: decoder init failed".into()));
        }

        let bits = unsafe {
            let mut bits = MaybeUninit::<SpeexBits>::uninit();
            ffi::speex_bits_init(bits.as_mut_ptr());
            bits.assume_init()
        };

        let mut dec = Self {
            state,
            bits,
            frame_size: 0,
            frame_bytes: config.frame_bytes,
        };

        dec.ctl_int(ffi::SPEEX_SET_ENH, config.enhancement as c_int)?;
        dec.ctl_int(ffi::SPEEX_SET_SAMPLING_RATE, rate.hz() as c_int)?;

        let mut frame_size: c_int = 0;
        dec.ctl_ptr(ffi::SPEEX_GET_FRAME_SIZE, &mut frame_size)?;
        dec.frame_size = frame_size as usize;
        Ok(dec)
    }

    fn ctl_int(&mut self, request: c_int, mut value: c_int) -> Result<(), EngineError> {
        self.ctl_ptr(request, &mut value)
    }

    fn ctl_ptr(&mut self, request: c_int, value: &mut c_int) -> Result<(), EngineError> {
        let ret = unsafe {
            ffi::speex_decoder_ctl(self.state, request, value as *mut c_int as *mut c_void)
        };
        if ret != 0 {
            return Err(EngineError::CreateFailed(format!(
                "speex: decoder ctl {} returned {}",
                request, ret
            )));
        }
        Ok(())
    }
}

impl Engine for SpeexDecoder {
    fn frame_size(&self) -> usize {
        self.frame_size
    }

    fn frame_bytes(&self) -> usize {
        self.frame_bytes
    }
}

impl DecodeEngine for SpeexDecoder {
    fn decode_frame(&mut self, bits: &[u8], pcm: &mut [i16]) -> Result<(), EngineError> {
        debug_assert_eq!(bits.len(), self.frame_bytes);
        debug_assert_eq!(pcm.len(), self.frame_size);

        let ret = unsafe {
            ffi::speex_bits_read_from(
                &mut self.bits,
                bits.as_ptr() as *const c_char,
                bits.len() as c_int,
            );
            ffi::speex_decode_int(self.state, &mut self.bits, pcm.as_mut_ptr())
        };
        // -1 is end of stream, -2 a corrupted frame.
        if ret < 0 {
            return Err(EngineError::DecodeFailed(format!(
                "speex: decode returned {}, corrupted stream?",
                ret
            )));
        }
        Ok(())
    }
}
