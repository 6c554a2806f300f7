//! Native IEEE 754 widths

use crate::codec::BitCodec;

/// IEEE binary32, converted with the native `f32` cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Float32Codec;

/// IEEE binary64; the bit pattern is the value itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Float64Codec;

impl BitCodec for Float32Codec {
    fn bit_width(&self) -> u32 {
        32
    }

    #[inline]
    fn to_numeric_value(&self, bits: u64) -> f64 {
        f32::from_bits(bits as u32) as f64
    }

    #[inline]
    fn to_bits(&self, value: f64) -> u64 {
        (value as f32).to_bits() as u64
    }

    fn min_value(&self) -> f64 {
        f32::MIN as f64
    }

    fn max_value(&self) -> f64 {
        f32::MAX as f64
    }

    fn is_floating_point(&self) -> bool {
        true
    }

    fn is_unsigned(&self) -> bool {
        false
    }
}

impl BitCodec for Float64Codec {
    fn bit_width(&self) -> u32 {
        64
    }

    #[inline]
    fn to_numeric_value(&self, bits: u64) -> f64 {
        f64::from_bits(bits)
    }

    #[inline]
    fn to_bits(&self, value: f64) -> u64 {
        value.to_bits()
    }

    fn min_value(&self) -> f64 {
        f64::MIN
    }

    fn max_value(&self) -> f64 {
        f64::MAX
    }

    fn is_floating_point(&self) -> bool {
        true
    }

    fn is_unsigned(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float32() {
        let codec = Float32Codec;
        assert_eq!(codec.to_bits(1.0), 0x3F80_0000);
        assert_eq!(codec.to_numeric_value(0xC020_0000), -2.5);
        assert_eq!(codec.to_bits(1e300), 0x7F80_0000);
        assert_eq!(codec.to_numeric_value(codec.to_bits(0.1)), 0.1f32 as f64);
    }

    #[test]
    fn test_float64_identity() {
        let codec = Float64Codec;
        for value in [0.0, -0.0, 1.0 / 3.0, f64::MIN_POSITIVE / 8.0, f64::INFINITY] {
            assert_eq!(codec.to_numeric_value(codec.to_bits(value)).to_bits(), value.to_bits());
        }
        assert_eq!(codec.to_bits(f64::NAN), f64::NAN.to_bits());
    }
}
