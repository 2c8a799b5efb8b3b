//! Error types for codec sessions.

use thiserror::Error;
use voxlink_buffer::AllocationError;

use crate::engine::EngineError;

/// Error returned by session operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The configuration was rejected at open.
    #[error("codec: invalid configuration: {0}")]
    InvalidConfig(String),

    /// Output buffer growth failed. The session is still valid; the call
    /// may be retried once memory is available.
    #[error("codec: {0}")]
    Allocation(#[from] AllocationError),

    /// A per-frame engine call failed. The failed call's output is
    /// undefined, but the session remains usable.
    #[error("codec: {0}")]
    Engine(#[from] EngineError),
}

/// A bit-chunk failed to decode.
///
/// Reported alongside the samples decoded before the failing chunk, never
/// instead of them: [`DecoderSession::process`](crate::DecoderSession::process)
/// pairs the partial output with this error so the caller can distinguish
/// corrupted input from resource exhaustion without losing data.
#[derive(Debug, Error)]
#[error("codec: frame {frame} failed to decode: {source}")]
pub struct DecodeError {
    /// Index of the chunk that failed, in input order.
    pub frame: usize,
    #[source]
    pub source: EngineError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError {
            frame: 2,
            source: EngineError::DecodeFailed("corrupted stream".into()),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("frame 2"));
    }

    #[test]
    fn test_engine_error_converts() {
        let err: CodecError = EngineError::EncodeFailed("test".into()).into();
        assert!(matches!(err, CodecError::Engine(_)));
    }
}
