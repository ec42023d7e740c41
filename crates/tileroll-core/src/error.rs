//! Error types for tileroll-core.
//!
//! Buffer construction and pixel access are the only fallible operations
//! at this level. Everything here is raised before any sampling happens.
//!
//! ```rust
//! use tileroll_core::{Error, Format};
//!
//! let err = Format::new(0, 1080).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by core buffer types.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero or otherwise unusable.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// Supplied data length does not match the declared region.
    #[error("buffer holds {got} samples, expected {expected}")]
    DimensionMismatch {
        /// Expected sample count
        expected: usize,
        /// Actual sample count
        got: usize,
    },

    /// A channel required by the operation is not present.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Channels the caller asked for
        expected: String,
        /// Channels actually available
        got: String,
    },

    /// Pixel coordinates are outside the buffer's region.
    #[error("pixel ({x}, {y}) out of bounds for {bounds}")]
    OutOfBounds {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
        /// Region that was indexed
        bounds: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
