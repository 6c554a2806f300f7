//! Normalized integer codecs (UNORM / SNORM)

use crate::codec::BitCodec;
use crate::integer::IntegerCodec;
use imgbits_core::{BitsError, BitsResult};

/// Integer scaled into `[0, 1]` (unsigned) or `[-1, 1]` (signed)
///
/// Decoding multiplies the integer by `1 / max`; the most negative signed
/// pattern therefore decodes slightly below -1. Encoding clamps to the
/// normalized range, scales by `max` and rounds through [`IntegerCodec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedCodec {
    integer: IntegerCodec,
    scale: f64,
    inverse_scale: f64,
    min: f64,
}

impl NormalizedCodec {
    pub fn new(width: u32, signed: bool) -> BitsResult<Self> {
        if signed && width < 2 {
            return Err(BitsError::InvalidBitWidth(width));
        }
        let integer = IntegerCodec::new(width, signed)?;
        let scale = integer.max_value();

        Ok(Self {
            integer,
            scale,
            inverse_scale: 1.0 / scale,
            min: if signed { -1.0 } else { 0.0 },
        })
    }

    pub fn signed(width: u32) -> BitsResult<Self> {
        Self::new(width, true)
    }

    pub fn unsigned(width: u32) -> BitsResult<Self> {
        Self::new(width, false)
    }

    /// The integer codec the normalized values are stored through
    pub fn integer(&self) -> &IntegerCodec {
        &self.integer
    }
}

impl BitCodec for NormalizedCodec {
    fn bit_width(&self) -> u32 {
        self.integer.bit_width()
    }

    #[inline]
    fn to_numeric_value(&self, bits: u64) -> f64 {
        self.integer.to_numeric_value(bits) * self.inverse_scale
    }

    #[inline]
    fn to_bits(&self, value: f64) -> u64 {
        self.integer.to_bits(value.clamp(self.min, 1.0) * self.scale)
    }

    fn min_value(&self) -> f64 {
        self.min
    }

    fn max_value(&self) -> f64 {
        1.0
    }

    fn is_floating_point(&self) -> bool {
        false
    }

    fn is_unsigned(&self) -> bool {
        self.integer.is_unsigned()
    }
}
