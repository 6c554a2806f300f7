//! Two's complement and unsigned integer codecs

use crate::codec::BitCodec;
use imgbits_core::consts::{DOUBLE_SIGN_BIT, MAX_BIT_WIDTH, TWO_POW_63};
use imgbits_core::{low_mask, BitsError, BitsResult};

/// Decode a full 64-bit unsigned pattern without going through a signed
/// value that would wrap for patterns with the top bit set
#[inline]
pub(crate) fn unsigned_to_f64(bits: u64) -> f64 {
    if bits & DOUBLE_SIGN_BIT != 0 {
        (bits & !DOUBLE_SIGN_BIT) as i64 as f64 + TWO_POW_63
    } else {
        bits as i64 as f64
    }
}

/// Round a value already clamped to `[0, 2^64)` to an unsigned pattern
///
/// Values at or above 2^63 cannot be rounded as an `i64`, so the top bit is
/// split off and the remainder rounded on its own. The remainder saturates
/// at `i64::MAX`, which maps the clamped maximum to `u64::MAX`.
#[inline]
pub(crate) fn f64_to_unsigned(value: f64) -> u64 {
    if value >= TWO_POW_63 {
        DOUBLE_SIGN_BIT | (value - TWO_POW_63).round() as i64 as u64
    } else {
        value.round() as i64 as u64
    }
}

/// Integer of `width` bits (1..=64)
///
/// Signed patterns are two's complement. Encoding clamps to the
/// representable range and rounds half away from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegerCodec {
    width: u32,
    signed: bool,
    min: f64,
    max: f64,
    min_int: i64,
    max_int: u64,
}

impl IntegerCodec {
    pub fn new(width: u32, signed: bool) -> BitsResult<Self> {
        if width == 0 || width > MAX_BIT_WIDTH {
            return Err(BitsError::InvalidBitWidth(width));
        }

        let (min_int, max_int) = if signed {
            let half = 1i128 << (width - 1);
            (-half as i64, (half - 1) as u64)
        } else {
            (0, low_mask(width))
        };
        let max = if signed {
            max_int as i64 as f64
        } else {
            unsigned_to_f64(max_int)
        };

        Ok(Self {
            width,
            signed,
            min: min_int as f64,
            max,
            min_int,
            max_int,
        })
    }

    pub fn signed(width: u32) -> BitsResult<Self> {
        Self::new(width, true)
    }

    pub fn unsigned(width: u32) -> BitsResult<Self> {
        Self::new(width, false)
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }
}

impl BitCodec for IntegerCodec {
    fn bit_width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn to_numeric_value(&self, bits: u64) -> f64 {
        if self.signed {
            let shift = 64 - self.width;
            (((bits << shift) as i64) >> shift) as f64
        } else {
            unsigned_to_f64(bits & low_mask(self.width))
        }
    }

    #[inline]
    fn to_bits(&self, value: f64) -> u64 {
        // Past 2^53 the clamped bound itself may round above the largest
        // integer, so the rounded result is clamped once more
        let value = value.clamp(self.min, self.max);
        let bits = if self.signed {
            (value.round() as i64).clamp(self.min_int, self.max_int as i64) as u64
        } else {
            f64_to_unsigned(value).min(self.max_int)
        };
        bits & low_mask(self.width)
    }

    fn min_value(&self) -> f64 {
        self.min
    }

    fn max_value(&self) -> f64 {
        self.max
    }

    fn is_floating_point(&self) -> bool {
        false
    }

    fn is_unsigned(&self) -> bool {
        !self.signed
    }
}
