//! Error types for storage and codec construction

use thiserror::Error;

/// Result type for imgbits operations
pub type BitsResult<T> = Result<T, BitsError>;

/// Errors raised when a codec, view or composite is built from
/// inconsistent parameters
///
/// Out-of-range indices are not reported here: they panic, like slice
/// indexing does.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitsError {
    #[error("Invalid bit width: {0} (expected 1..=64)")]
    InvalidBitWidth(u32),

    #[error("Invalid exponent width: {0} (expected 2..=10)")]
    InvalidExponentBits(u32),

    #[error("Invalid mantissa width: {0} (expected 1..=51)")]
    InvalidMantissaBits(u32),

    #[error("Bit width mismatch: codec is {codec} bits, storage is {storage} bits")]
    WidthMismatch { codec: u32, storage: u32 },

    #[error("Cannot compose {factor} words of {width} bits")]
    InvalidComposition { factor: u32, width: u32 },

    #[error("Composite needs at least one chunk")]
    EmptyComposite,

    #[error("Chunk {index} has length {actual}, expected {expected}")]
    ChunkLength {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Chunk {index} byte order differs from chunk 0")]
    ChunkByteOrder { index: usize },

    #[error("Chunk {index} is {actual} bits wide, expected {expected}")]
    ChunkWidth {
        index: usize,
        expected: u32,
        actual: u32,
    },

    #[error("Invalid shared exponent layout: {0}")]
    InvalidMask(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Buffer length {actual} is not a multiple of {word_bytes} bytes")]
    BufferLength { actual: usize, word_bytes: usize },
}
