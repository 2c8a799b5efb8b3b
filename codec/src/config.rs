//! Session configuration.

use crate::error::CodecError;

/// Sampling rates supported by the codec modes.
///
/// The sampling rate selects the codec mode and with it the frame size: all
/// modes use 20 ms frames, so a frame holds `rate / 50` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleRate {
    /// 8 kHz narrowband.
    Narrowband,
    /// 16 kHz wideband.
    Wideband,
    /// 32 kHz ultra-wideband.
    UltraWideband,
}

impl SampleRate {
    /// Maps a rate in hertz to a codec mode.
    ///
    /// Exactly the rates the engine supports are accepted; anything else is
    /// an [`CodecError::InvalidConfig`].
    pub fn from_hz(hz: u32) -> Result<Self, CodecError> {
        match hz {
            8000 => Ok(Self::Narrowband),
            16000 => Ok(Self::Wideband),
            32000 => Ok(Self::UltraWideband),
            other => Err(CodecError::InvalidConfig(format!(
                "sampling rate {} is not supported, try 8000, 16000 or 32000",
                other
            ))),
        }
    }

    /// Returns the rate in hertz.
    pub fn hz(&self) -> u32 {
        match self {
            Self::Narrowband => 8000,
            Self::Wideband => 16000,
            Self::UltraWideband => 32000,
        }
    }

    /// Samples per 20 ms frame at this rate.
    pub fn frame_size(&self) -> usize {
        (self.hz() / 50) as usize
    }
}

/// Encoder parameters.
///
/// The defaults match a fixed voice profile: wideband, quality 8,
/// complexity 3, high-pass filter on.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Sampling rate in hertz. Must be 8000, 16000 or 32000.
    pub sample_rate: u32,
    /// Encoding quality (0-10), 0 lowest quality and bitrate, 10 highest.
    pub quality: u8,
    /// Fixed bit-rate in bits per second, overriding `quality` when set.
    pub bitrate: Option<u32>,
    /// Enable variable bit-rate (VBR).
    pub vbr: bool,
    /// Enable voice activity detection (VAD).
    pub vad: bool,
    /// Enable discontinuous transmission (DTX).
    pub dtx: bool,
    /// Encoding complexity (0-10).
    pub complexity: u8,
    /// High-pass filter the input before encoding.
    pub highpass: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            quality: 8,
            bitrate: None,
            vbr: false,
            vad: false,
            dtx: false,
            complexity: 3,
            highpass: true,
        }
    }
}

impl EncoderConfig {
    /// Validates the configuration and returns the selected mode.
    pub fn validate(&self) -> Result<SampleRate, CodecError> {
        let rate = SampleRate::from_hz(self.sample_rate)?;
        if self.quality > 10 {
            return Err(CodecError::InvalidConfig(format!(
                "quality {} out of range 0-10",
                self.quality
            )));
        }
        if self.complexity > 10 {
            return Err(CodecError::InvalidConfig(format!(
                "complexity {} out of range 0-10",
                self.complexity
            )));
        }
        if self.dtx && !(self.vbr || self.vad) {
            tracing::warn!("dtx has no effect without vad or vbr");
        }
        Ok(rate)
    }
}

/// Decoder parameters.
///
/// The bit-chunk stream carries no framing headers, so the decoder must be
/// told the chunk stride (`frame_bytes`) out-of-band; it has to match the
/// configuration the stream was produced with. The default stride of 70
/// bytes matches the default encoder profile (wideband, quality 8).
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Sampling rate in hertz. Must match the rate the stream was encoded at.
    pub sample_rate: u32,
    /// Enable the perceptual enhancement post-filter.
    pub enhancement: bool,
    /// Bytes per encoded frame in the incoming stream.
    pub frame_bytes: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            enhancement: true,
            frame_bytes: 70,
        }
    }
}

impl DecoderConfig {
    /// Validates the configuration and returns the selected mode.
    pub fn validate(&self) -> Result<SampleRate, CodecError> {
        let rate = SampleRate::from_hz(self.sample_rate)?;
        if self.frame_bytes == 0 {
            return Err(CodecError::InvalidConfig(
                "frame_bytes must be non-zero".into(),
            ));
        }
        Ok(rate)
    }
}
