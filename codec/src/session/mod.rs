//! Encoder and decoder sessions.
//!
//! A session owns one codec engine plus the buffers that adapt a chunked
//! stream to the engine's fixed frames. Sessions are single-threaded by
//! construction: every operation takes `&mut self`, and the views returned
//! by `process` borrow the session until the next call, so overlapping use
//! does not compile. Within one session, `process` calls must follow the
//! stream's sample order (the encoder's carry-over makes each call depend on
//! the previous one). Independent sessions share nothing and may live on
//! different threads.

mod decoder;
mod encoder;

pub use decoder::DecoderSession;
pub use encoder::EncoderSession;
