//! Error types for hctcolor

use thiserror::Error;

/// Result type for hctcolor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the input boundary. The color math itself never fails.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Hex color with the wrong length or a non-hex digit
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),

    /// Pixel list that is neither a JSON array of integers nor hex tokens
    #[error("Invalid pixel data: {0}")]
    InvalidPixelData(String),

    /// A maximum color count of zero
    #[error("Maximum color count must be at least 1")]
    InvalidMaxColors,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
