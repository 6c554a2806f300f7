//! Constants used throughout the codec family

/// Widest bit word a storage backend or codec may use
pub const MAX_BIT_WIDTH: u32 = 64;

/// IEEE binary64 layout
pub const DOUBLE_EXPONENT_BITS: u32 = 11;
pub const DOUBLE_MANTISSA_BITS: u32 = 52;
pub const DOUBLE_EXPONENT_BIAS: i64 = 1023;
pub const DOUBLE_EXPONENT_MASK: u64 = 0x7FF;
pub const DOUBLE_MANTISSA_MASK: u64 = (1u64 << DOUBLE_MANTISSA_BITS) - 1;
pub const DOUBLE_SIGN_BIT: u64 = 1u64 << 63;

/// Custom float exponent and mantissa limits (strictly narrower than binary64)
pub const MIN_EXPONENT_BITS: u32 = 2;
pub const MAX_EXPONENT_BITS: u32 = DOUBLE_EXPONENT_BITS - 1;
pub const MIN_MANTISSA_BITS: u32 = 1;
pub const MAX_MANTISSA_BITS: u32 = DOUBLE_MANTISSA_BITS - 1;

/// Widest format whose every bit pattern is decoded into a table
pub const DECODE_TABLE_MAX_BITS: u32 = 16;

/// One entry per binary64 sign+exponent combination (2^12)
pub const SIGN_EXPONENT_TABLE_SIZE: usize = 1 << (DOUBLE_EXPONENT_BITS + 1);

/// 2^63 as a double, the split point for full-width unsigned values
pub const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Largest chunk a single bounded backend is expected to address
pub const MAX_CHUNK_LEN: usize = i32::MAX as usize;
