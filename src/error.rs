use std::collections::TryReserveError;

use thiserror::Error;

/// Errors surfaced by the SASA core.
///
/// Every failure is returned to the caller; nothing is recovered locally and
/// partial results are never produced.
#[derive(Debug, Error)]
pub enum SasaError {
    /// Empty atom set or a non-positive / non-finite radius.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A computation parameter outside its accepted range.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Allocation failure inside the cell grid or neighbor list.
    #[error("out of memory while building spatial structures")]
    OutOfMemory,

    /// Cooperative cancellation observed at a chunk boundary.
    #[error("computation cancelled")]
    Cancelled,
}

impl From<TryReserveError> for SasaError {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

impl SasaError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn invalid_param(msg: impl Into<String>) -> Self {
        Self::InvalidParam(msg.into())
    }
}
