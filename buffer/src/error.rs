//! Error types for buffer operations.

use std::collections::TryReserveError;

/// Buffer growth failed because the allocator refused the request.
///
/// The buffer that reported this error is unchanged: its previous storage and
/// capacity are still intact, so the owning session stays usable and the
/// caller may retry the same request later.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("buffer: failed to grow to {required} elements")]
pub struct AllocationError {
    /// The total capacity that was requested.
    pub required: usize,
    #[source]
    source: TryReserveError,
}

impl AllocationError {
    pub(crate) fn new(required: usize, source: TryReserveError) -> Self {
        Self { required, source }
    }
}
