//! The binary representation contract and its closed set of variants

use crate::float::{Acceleration, FloatCodec};
use crate::ieee::{Float32Codec, Float64Codec};
use crate::integer::IntegerCodec;
use crate::normalized::NormalizedCodec;
use imgbits_core::BitsResult;
use std::rc::Rc;
use std::sync::Arc;

/// Conversion between a fixed-width bit pattern and a numeric value
///
/// `to_bits` is total: out-of-range inputs are clamped (integers) or
/// saturate to infinity (floating point), never rejected. Only the low
/// [`bit_width`](BitCodec::bit_width) bits of a pattern are significant.
pub trait BitCodec {
    /// Width in bits of the patterns this codec produces
    fn bit_width(&self) -> u32;

    /// Decode a bit pattern
    fn to_numeric_value(&self, bits: u64) -> f64;

    /// Encode the representable value closest to `value`
    fn to_bits(&self, value: f64) -> u64;

    /// Smallest finite representable value
    fn min_value(&self) -> f64;

    /// Largest finite representable value
    fn max_value(&self) -> f64;

    fn is_floating_point(&self) -> bool;

    fn is_unsigned(&self) -> bool;
}

macro_rules! forward_bit_codec {
    ($($ptr:ty),*) => {
        $(
            impl<C: BitCodec + ?Sized> BitCodec for $ptr {
                fn bit_width(&self) -> u32 {
                    (**self).bit_width()
                }

                #[inline]
                fn to_numeric_value(&self, bits: u64) -> f64 {
                    (**self).to_numeric_value(bits)
                }

                #[inline]
                fn to_bits(&self, value: f64) -> u64 {
                    (**self).to_bits(value)
                }

                fn min_value(&self) -> f64 {
                    (**self).min_value()
                }

                fn max_value(&self) -> f64 {
                    (**self).max_value()
                }

                fn is_floating_point(&self) -> bool {
                    (**self).is_floating_point()
                }

                fn is_unsigned(&self) -> bool {
                    (**self).is_unsigned()
                }
            }
        )*
    };
}

forward_bit_codec!(&C, Box<C>, Rc<C>, Arc<C>);

/// Any scalar binary representation
#[derive(Debug, Clone, PartialEq)]
pub enum BinaryRepresentation {
    Integer(IntegerCodec),
    Normalized(NormalizedCodec),
    Float(FloatCodec),
    Float32(Float32Codec),
    Float64(Float64Codec),
}

impl BinaryRepresentation {
    pub fn signed_integer(bits: u32) -> BitsResult<Self> {
        IntegerCodec::signed(bits).map(Self::Integer)
    }

    pub fn unsigned_integer(bits: u32) -> BitsResult<Self> {
        IntegerCodec::unsigned(bits).map(Self::Integer)
    }

    pub fn signed_normalized(bits: u32) -> BitsResult<Self> {
        NormalizedCodec::signed(bits).map(Self::Normalized)
    }

    pub fn unsigned_normalized(bits: u32) -> BitsResult<Self> {
        NormalizedCodec::unsigned(bits).map(Self::Normalized)
    }

    /// Signed custom float with `exponent_bits` and `mantissa_bits`
    pub fn float(
        exponent_bits: u32,
        mantissa_bits: u32,
        acceleration: Acceleration,
    ) -> BitsResult<Self> {
        FloatCodec::new(exponent_bits, mantissa_bits, true, acceleration).map(Self::Float)
    }

    /// Custom float without a sign bit
    pub fn unsigned_float(
        exponent_bits: u32,
        mantissa_bits: u32,
        acceleration: Acceleration,
    ) -> BitsResult<Self> {
        FloatCodec::new(exponent_bits, mantissa_bits, false, acceleration).map(Self::Float)
    }

    pub fn float32() -> Self {
        Self::Float32(Float32Codec)
    }

    pub fn float64() -> Self {
        Self::Float64(Float64Codec)
    }
}

impl From<IntegerCodec> for BinaryRepresentation {
    fn from(codec: IntegerCodec) -> Self {
        Self::Integer(codec)
    }
}

impl From<NormalizedCodec> for BinaryRepresentation {
    fn from(codec: NormalizedCodec) -> Self {
        Self::Normalized(codec)
    }
}

impl From<FloatCodec> for BinaryRepresentation {
    fn from(codec: FloatCodec) -> Self {
        Self::Float(codec)
    }
}

macro_rules! dispatch {
    ($self:expr, $codec:ident => $body:expr) => {
        match $self {
            BinaryRepresentation::Integer($codec) => $body,
            BinaryRepresentation::Normalized($codec) => $body,
            BinaryRepresentation::Float($codec) => $body,
            BinaryRepresentation::Float32($codec) => $body,
            BinaryRepresentation::Float64($codec) => $body,
        }
    };
}

impl BitCodec for BinaryRepresentation {
    fn bit_width(&self) -> u32 {
        dispatch!(self, c => c.bit_width())
    }

    #[inline]
    fn to_numeric_value(&self, bits: u64) -> f64 {
        dispatch!(self, c => c.to_numeric_value(bits))
    }

    #[inline]
    fn to_bits(&self, value: f64) -> u64 {
        dispatch!(self, c => c.to_bits(value))
    }

    fn min_value(&self) -> f64 {
        dispatch!(self, c => c.min_value())
    }

    fn max_value(&self) -> f64 {
        dispatch!(self, c => c.max_value())
    }

    fn is_floating_point(&self) -> bool {
        dispatch!(self, c => c.is_floating_point())
    }

    fn is_unsigned(&self) -> bool {
        dispatch!(self, c => c.is_unsigned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        let codecs = [
            (BinaryRepresentation::signed_integer(16).unwrap(), 16, false, false),
            (BinaryRepresentation::unsigned_integer(10).unwrap(), 10, false, true),
            (BinaryRepresentation::unsigned_normalized(8).unwrap(), 8, false, true),
            (BinaryRepresentation::signed_normalized(8).unwrap(), 8, false, false),
            (
                BinaryRepresentation::float(5, 10, Acceleration::General).unwrap(),
                16,
                true,
                false,
            ),
            (
                BinaryRepresentation::unsigned_float(5, 6, Acceleration::General).unwrap(),
                11,
                true,
                true,
            ),
            (BinaryRepresentation::float32(), 32, true, false),
            (BinaryRepresentation::float64(), 64, true, false),
        ];

        for (codec, width, floating, unsigned) in codecs {
            assert_eq!(codec.bit_width(), width, "{:?}", codec);
            assert_eq!(codec.is_floating_point(), floating, "{:?}", codec);
            assert_eq!(codec.is_unsigned(), unsigned, "{:?}", codec);
            assert!(codec.min_value() < codec.max_value());
        }
    }

    #[test]
    fn test_shared_codec() {
        let codec = Arc::new(BinaryRepresentation::unsigned_normalized(8).unwrap());
        let other = Arc::clone(&codec);
        assert_eq!(codec.to_bits(1.0), 255);
        assert_eq!(other.to_numeric_value(255), 1.0);
        assert_eq!((&*codec).bit_width(), 8);
    }
}
