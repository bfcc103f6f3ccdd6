use thiserror::Error;

/// Errors reported before any segmentation work starts.
///
/// Every variant is an invalid-input condition; nothing that happens once the
/// pipeline is running is surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Requested region count must be positive")]
    ZeroRegions,

    #[error("Image must have non-zero size, got {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    #[error("Image must have at least one channel")]
    NoChannels,

    #[error(
        "Channel {channel} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}"
    )]
    PlaneSizeMismatch {
        channel: usize,
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Interleaved buffer holds {actual} values, expected {expected}")]
    InterleavedLengthMismatch { expected: usize, actual: usize },

    #[error("Iteration count must be at least 1")]
    ZeroIterations,
}

pub type Result<T> = std::result::Result<T, Error>;
