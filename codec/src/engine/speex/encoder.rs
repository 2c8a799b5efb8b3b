//! Speex encoder engine.

use std::mem::MaybeUninit;
use std::os::raw::{c_char, c_int, c_void};
use std::ptr;

use super::ffi::{self, SpeexBits};
use super::{frame_bytes_for, mode_id};
use crate::config::EncoderConfig;
use crate::engine::{EncodeEngine, Engine, EngineError};

/// Speex encoder state.
pub struct SpeexEncoder {
    state: *mut c_void,
    bits: SpeexBits,
    frame_size: usize,
    frame_bytes: usize,
}

// Safety: the state is only reached through &mut self and never shared.
unsafe impl Send for SpeexEncoder {}

impl Drop for SpeexEncoder {
    fn drop(&mut self) {
        unsafe {
            ffi::speex_bits_destroy(&mut self.bits);
            if !self.state.is_null() {
                ffi::speex_encoder_destroy(self.state);
                self.state = ptr::null_mut();
            }
        }
    }
}

impl SpeexEncoder {
    /// Creates an encoder for `config`.
    pub fn new(config: &EncoderConfig) -> Result<Self, EngineError> {
        let rate = config
            .validate()
            .map_err(|e| EngineError::CreateFailed(e.to_string()))?;

        let state = unsafe {
            let mode = ffi::speex_lib_get_mode(mode_id(rate));
            ffi::speex_encoder_init(mode)
        };
        if state.is_null() {
            return Err(EngineError::CreateFailed("speex: encoder init failed".into()));
        }

        let bits = unsafe {
            let mut bits = MaybeUninit::<SpeexBits>::uninit();
            ffi::speex_bits_init(bits.as_mut_ptr());
            bits.assume_init()
        };

        // From here on Drop releases the state and bits on any error.
        let mut enc = Self {
            state,
            bits,
            frame_size: 0,
            frame_bytes: 0,
        };

        enc.ctl_int(ffi::SPEEX_SET_COMPLEXITY, config.complexity as c_int)?;
        enc.ctl_int(ffi::SPEEX_SET_SAMPLING_RATE, rate.hz() as c_int)?;
        if config.vbr {
            enc.ctl_int(ffi::SPEEX_SET_VBR, 1)?;
            enc.ctl_float(ffi::SPEEX_SET_VBR_QUALITY, config.quality as f32)?;
        } else {
            enc.ctl_int(ffi::SPEEX_SET_QUALITY, config.quality as c_int)?;
        }
        if let Some(bitrate) = config.bitrate {
            enc.ctl_int(ffi::SPEEX_SET_BITRATE, bitrate as c_int)?;
        }
        if config.vad && !config.vbr {
            enc.ctl_int(ffi::SPEEX_SET_VAD, 1)?;
        }
        if config.dtx {
            enc.ctl_int(ffi::SPEEX_SET_DTX, 1)?;
        }
        enc.ctl_int(ffi::SPEEX_SET_HIGHPASS, config.highpass as c_int)?;

        let mut frame_size: c_int = 0;
        enc.ctl_ptr(ffi::SPEEX_GET_FRAME_SIZE, &mut frame_size)?;
        let mut bitrate: c_int = 0;
        enc.ctl_ptr(ffi::SPEEX_GET_BITRATE, &mut bitrate)?;

        enc.frame_size = frame_size as usize;
        enc.frame_bytes = frame_bytes_for(bitrate);
        Ok(enc)
    }

    fn ctl_int(&mut self, request: c_int, mut value: c_int) -> Result<(), EngineError> {
        self.ctl_ptr(request, &mut value)
    }

    fn ctl_float(&mut self, request: c_int, mut value: f32) -> Result<(), EngineError> {
        let ret = unsafe {
            ffi::speex_encoder_ctl(self.state, request, &mut value as *mut f32 as *mut c_void)
        };
        Self::check_ctl(request, ret)
    }

    fn ctl_ptr(&mut self, request: c_int, value: &mut c_int) -> Result<(), EngineError> {
        let ret = unsafe {
            ffi::speex_encoder_ctl(self.state, request, value as *mut c_int as *mut c_void)
        };
        Self::check_ctl(request, ret)
    }

    fn check_ctl(request: c_int, ret: c_int) -> Result<(), EngineError> {
        if ret != 0 {
            return Err(EngineError::CreateFailed(format!(
                "speex: encoder ctl {} returned {}",
                request, ret
            )));
        }
        Ok(())
    }
}

impl Engine for SpeexEncoder {
    fn frame_size(&self) -> usize {
        self.frame_size
    }

    fn frame_bytes(&self) -> usize {
        self.frame_bytes
    }
}

impl EncodeEngine for SpeexEncoder {
    fn encode_frame(&mut self, pcm: &[i16], bits: &mut [u8]) -> Result<(), EngineError> {
        debug_assert_eq!(pcm.len(), self.frame_size);
        debug_assert_eq!(bits.len(), self.frame_bytes);

        let n = unsafe {
            ffi::speex_bits_reset(&mut self.bits);
            ffi::speex_encode_int(self.state, pcm.as_ptr() as *mut i16, &mut self.bits);
            ffi::speex_bits_write(
                &mut self.bits,
                bits.as_mut_ptr() as *mut c_char,
                bits.len() as c_int,
            )
        };
        if n < 0 {
            return Err(EngineError::EncodeFailed(format!(
                "speex: bits write returned {}",
                n
            )));
        }
        // CBR submodes fill the frame exactly; pad any tail so the wire
        // stride stays fixed.
        bits[n as usize..].fill(0);
        Ok(())
    }
}
