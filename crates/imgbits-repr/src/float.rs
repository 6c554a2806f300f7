//! Custom floating point layouts narrower than binary64
//!
//! A layout has an optional sign bit, `E` exponent bits biased by
//! `2^(E-1) - 1` and `M` mantissa bits, laid out like IEEE 754:
//!
//! ```text
//! [sign] [exponent: E] [mantissa: M]
//! ```
//!
//! All-zero exponents hold zeros and denormals, all-one exponents hold
//! infinities and NaNs. Conversions go through the binary64 bit pattern so
//! that rounding is exact: values are rounded to nearest, ties to even,
//! overflow becomes a signed infinity and underflow a signed zero.

use crate::codec::BitCodec;
use imgbits_core::consts::{
    DECODE_TABLE_MAX_BITS, DOUBLE_EXPONENT_BIAS, DOUBLE_EXPONENT_BITS, DOUBLE_EXPONENT_MASK,
    DOUBLE_MANTISSA_BITS, DOUBLE_MANTISSA_MASK, MAX_EXPONENT_BITS, MAX_MANTISSA_BITS,
    MIN_EXPONENT_BITS, MIN_MANTISSA_BITS, SIGN_EXPONENT_TABLE_SIZE,
};
use imgbits_core::{low_mask, BitsError, BitsResult};
use std::fmt;

/// Drop the low `discard` bits of `bits`, rounding to nearest with ties to
/// even
///
/// ```
/// use imgbits_repr::round_nearest_even;
///
/// assert_eq!(round_nearest_even(0b1011, 2), 0b11);
/// assert_eq!(round_nearest_even(0b1010, 2), 0b10); // tie, kept bit even
/// assert_eq!(round_nearest_even(0b1110, 2), 0b100); // tie, rounds up to even
/// ```
#[inline]
pub fn round_nearest_even(bits: u64, discard: u32) -> u64 {
    if discard == 0 {
        return bits;
    }
    let guard = low_mask(discard - 1);
    let kept_lsb = (bits >> discard) & 1;
    (bits + guard + kept_lsb) >> discard
}

/// Conversion strategy chosen when a codec is built
///
/// Tables only make conversions faster; results are bit-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Acceleration {
    /// Compute every conversion
    #[default]
    General,
    /// Precompute a decode table (formats up to 16 bits) and a
    /// sign+exponent encode table
    Tables,
}

#[derive(Clone)]
enum Decoder {
    General,
    Table(Box<[f64]>),
}

#[derive(Clone)]
enum Encoder {
    General,
    /// Indexed by the binary64 sign and exponent; holds the pre-shifted
    /// sign and exponent of the target layout, or 0 for inputs that need
    /// the general path
    SignExponent(Box<[u64]>),
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoder::General => write!(f, "General"),
            Decoder::Table(table) => write!(f, "Table({} entries)", table.len()),
        }
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoder::General => write!(f, "General"),
            Encoder::SignExponent(table) => write!(f, "SignExponent({} entries)", table.len()),
        }
    }
}

/// Floating point layout with `exponent_bits` in `2..=10` and
/// `mantissa_bits` in `1..=51`, with or without a sign bit
///
/// Finite inputs are not clamped: magnitudes past the largest finite value
/// encode as infinity. Unsigned layouts encode negative inputs as `+0`.
#[derive(Debug, Clone)]
pub struct FloatCodec {
    exponent_bits: u32,
    mantissa_bits: u32,
    signed: bool,
    decoder: Decoder,
    encoder: Encoder,
}

impl FloatCodec {
    pub fn new(
        exponent_bits: u32,
        mantissa_bits: u32,
        signed: bool,
        acceleration: Acceleration,
    ) -> BitsResult<Self> {
        if !(MIN_EXPONENT_BITS..=MAX_EXPONENT_BITS).contains(&exponent_bits) {
            return Err(BitsError::InvalidExponentBits(exponent_bits));
        }
        if !(MIN_MANTISSA_BITS..=MAX_MANTISSA_BITS).contains(&mantissa_bits) {
            return Err(BitsError::InvalidMantissaBits(mantissa_bits));
        }
        Ok(Self::build(exponent_bits, mantissa_bits, signed, acceleration))
    }

    /// Signed layout computed without tables
    pub fn signed(exponent_bits: u32, mantissa_bits: u32) -> BitsResult<Self> {
        Self::new(exponent_bits, mantissa_bits, true, Acceleration::General)
    }

    /// Unsigned layout computed without tables
    pub fn unsigned(exponent_bits: u32, mantissa_bits: u32) -> BitsResult<Self> {
        Self::new(exponent_bits, mantissa_bits, false, Acceleration::General)
    }

    /// Build a layout already known to be valid
    pub(crate) fn build(
        exponent_bits: u32,
        mantissa_bits: u32,
        signed: bool,
        acceleration: Acceleration,
    ) -> Self {
        let mut codec = Self {
            exponent_bits,
            mantissa_bits,
            signed,
            decoder: Decoder::General,
            encoder: Encoder::General,
        };

        if acceleration == Acceleration::Tables {
            if codec.bit_width() <= DECODE_TABLE_MAX_BITS {
                codec.decoder = Decoder::Table(codec.build_decode_table());
            }
            codec.encoder = Encoder::SignExponent(codec.build_encode_table());
            log::debug!(
                "built lookup tables for {}E{}M{} float ({:?}, {:?})",
                if signed { "" } else { "unsigned " },
                exponent_bits,
                mantissa_bits,
                codec.decoder,
                codec.encoder
            );
        }

        codec
    }

    pub fn exponent_bits(&self) -> u32 {
        self.exponent_bits
    }

    pub fn mantissa_bits(&self) -> u32 {
        self.mantissa_bits
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Whether conversions go through precomputed tables
    pub fn acceleration(&self) -> Acceleration {
        match (&self.decoder, &self.encoder) {
            (Decoder::General, Encoder::General) => Acceleration::General,
            _ => Acceleration::Tables,
        }
    }

    #[inline]
    fn bias(&self) -> i64 {
        (1i64 << (self.exponent_bits - 1)) - 1
    }

    /// Difference between the binary64 bias and this layout's bias
    #[inline]
    fn rebias(&self) -> i64 {
        DOUBLE_EXPONENT_BIAS - self.bias()
    }

    #[inline]
    fn exponent_all_ones(&self) -> u64 {
        low_mask(self.exponent_bits)
    }

    #[inline]
    fn sign_shift(&self) -> u32 {
        self.exponent_bits + self.mantissa_bits
    }

    /// Decode without consulting any table
    pub fn decode_general(&self, bits: u64) -> f64 {
        let m_bits = self.mantissa_bits;
        let sign = if self.signed {
            ((bits >> self.sign_shift()) & 1) << 63
        } else {
            0
        };
        let mut exponent = ((bits >> m_bits) & self.exponent_all_ones()) as i64;
        let mut mantissa = bits & low_mask(m_bits);

        if exponent == 0 {
            if mantissa == 0 {
                return f64::from_bits(sign);
            }
            // Denormal: shift the leading one into the implicit position
            while mantissa & (1u64 << m_bits) == 0 {
                mantissa <<= 1;
                exponent -= 1;
            }
            mantissa &= !(1u64 << m_bits);
            exponent += 1;
        } else if exponent as u64 == self.exponent_all_ones() {
            // Zero mantissa gives infinity, anything else a NaN with the
            // payload carried over
            return f64::from_bits(
                sign | (DOUBLE_EXPONENT_MASK << DOUBLE_MANTISSA_BITS)
                    | (mantissa << (DOUBLE_MANTISSA_BITS - m_bits)),
            );
        }

        let exponent = (exponent + self.rebias()) as u64;
        f64::from_bits(
            sign | (exponent << DOUBLE_MANTISSA_BITS)
                | (mantissa << (DOUBLE_MANTISSA_BITS - m_bits)),
        )
    }

    /// Encode without consulting any table
    pub fn encode_general(&self, value: f64) -> u64 {
        let value = if !self.signed && value <= 0.0 { 0.0 } else { value };
        let m_bits = self.mantissa_bits;
        let bits = value.to_bits();
        let sign = if self.signed {
            (bits >> 63) << self.sign_shift()
        } else {
            0
        };
        let infinity = self.exponent_all_ones() << m_bits;

        if value == 0.0 {
            return sign;
        }

        let exponent = ((bits >> DOUBLE_MANTISSA_BITS) & DOUBLE_EXPONENT_MASK) as i64;
        let mut mantissa = bits & DOUBLE_MANTISSA_MASK;

        if exponent == DOUBLE_EXPONENT_MASK as i64 {
            if mantissa == 0 {
                return sign | infinity;
            }
            // Keep the NaN a NaN even when its payload sits in the
            // discarded bits
            mantissa >>= DOUBLE_MANTISSA_BITS - m_bits;
            if mantissa == 0 {
                mantissa = 1;
            }
            return sign | infinity | mantissa;
        }

        let mut exponent = exponent - self.rebias();
        if exponent <= 0 {
            if exponent < -(m_bits as i64) {
                return sign;
            }
            mantissa |= 1u64 << DOUBLE_MANTISSA_BITS;
            let shift = (DOUBLE_MANTISSA_BITS as i64 + 1 - m_bits as i64 - exponent) as u32;
            // A carry out of the mantissa lands on exponent 1, the
            // smallest normal, which is the right result
            return sign | round_nearest_even(mantissa, shift);
        }

        mantissa = round_nearest_even(mantissa, DOUBLE_MANTISSA_BITS - m_bits);
        if mantissa >= 1u64 << m_bits {
            mantissa = 0;
            exponent += 1;
        }
        if exponent >= self.exponent_all_ones() as i64 {
            return sign | infinity;
        }
        sign | ((exponent as u64) << m_bits) | mantissa
    }

    fn build_decode_table(&self) -> Box<[f64]> {
        (0..1u64 << self.bit_width())
            .map(|bits| self.decode_general(bits))
            .collect()
    }

    fn build_encode_table(&self) -> Box<[u64]> {
        let max_exponent = self.exponent_all_ones() as i64 - 1;
        (0..SIGN_EXPONENT_TABLE_SIZE as u64)
            .map(|key| {
                let negative = key >> DOUBLE_EXPONENT_BITS != 0;
                let exponent = (key & DOUBLE_EXPONENT_MASK) as i64 - self.rebias();
                if (negative && !self.signed) || !(1..=max_exponent).contains(&exponent) {
                    0
                } else {
                    ((negative as u64) << self.sign_shift())
                        | ((exponent as u64) << self.mantissa_bits)
                }
            })
            .collect()
    }
}

impl PartialEq for FloatCodec {
    fn eq(&self, other: &Self) -> bool {
        self.exponent_bits == other.exponent_bits
            && self.mantissa_bits == other.mantissa_bits
            && self.signed == other.signed
    }
}

impl BitCodec for FloatCodec {
    fn bit_width(&self) -> u32 {
        self.exponent_bits + self.mantissa_bits + self.signed as u32
    }

    #[inline]
    fn to_numeric_value(&self, bits: u64) -> f64 {
        match &self.decoder {
            Decoder::General => self.decode_general(bits),
            Decoder::Table(table) => table[(bits & low_mask(self.bit_width())) as usize],
        }
    }

    #[inline]
    fn to_bits(&self, value: f64) -> u64 {
        match &self.encoder {
            Encoder::General => self.encode_general(value),
            Encoder::SignExponent(table) => {
                let bits = value.to_bits();
                let prefix = table[(bits >> DOUBLE_MANTISSA_BITS) as usize];
                if prefix == 0 {
                    return self.encode_general(value);
                }
                // A mantissa that rounds up to 2^M carries into the
                // exponent, reaching infinity from the largest exponent
                prefix
                    + round_nearest_even(
                        bits & DOUBLE_MANTISSA_MASK,
                        DOUBLE_MANTISSA_BITS - self.mantissa_bits,
                    )
            }
        }
    }

    fn min_value(&self) -> f64 {
        if self.signed {
            -self.max_value()
        } else {
            0.0
        }
    }

    fn max_value(&self) -> f64 {
        let largest = ((self.exponent_all_ones() - 1) << self.mantissa_bits)
            | low_mask(self.mantissa_bits);
        self.decode_general(largest)
    }

    fn is_floating_point(&self) -> bool {
        true
    }

    fn is_unsigned(&self) -> bool {
        !self.signed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half() -> FloatCodec {
        FloatCodec::signed(5, 10).unwrap()
    }

    fn both_strategies(e: u32, m: u32, signed: bool) -> [FloatCodec; 2] {
        [
            FloatCodec::new(e, m, signed, Acceleration::General).unwrap(),
            FloatCodec::new(e, m, signed, Acceleration::Tables).unwrap(),
        ]
    }

    #[test]
    fn test_half_known_patterns() {
        for codec in both_strategies(5, 10, true) {
            assert_eq!(codec.to_bits(1.0), 0x3C00);
            assert_eq!(codec.to_bits(1.5), 0x3E00);
            assert_eq!(codec.to_bits(-2.0), 0xC000);
            assert_eq!(codec.to_bits(65504.0), 0x7BFF);
            assert_eq!(codec.to_bits(f64::INFINITY), 0x7C00);
            assert_eq!(codec.to_bits(f64::NEG_INFINITY), 0xFC00);
            assert_eq!(codec.to_bits(-0.0), 0x8000);
            assert_eq!(codec.to_numeric_value(0x3555), 0.333251953125);
        }
    }

    #[test]
    fn test_half_special_values() {
        for codec in both_strategies(5, 10, true) {
            assert_eq!(codec.to_numeric_value(codec.to_bits(1.5)), 1.5);

            let negative_zero = codec.to_numeric_value(codec.to_bits(-0.0));
            assert_eq!(negative_zero, 0.0);
            assert!(negative_zero.is_sign_negative());

            assert_eq!(
                codec.to_numeric_value(codec.to_bits(f64::INFINITY)),
                f64::INFINITY
            );
            assert!(codec.to_numeric_value(codec.to_bits(f64::NAN)).is_nan());

            let smallest = 2f64.powi(-24);
            assert_eq!(codec.to_bits(smallest), 1);
            assert_eq!(codec.to_numeric_value(1), smallest);
        }
    }

    #[test]
    fn test_half_denormals() {
        let codec = half();
        assert_eq!(codec.to_bits(2f64.powi(-15)), 0x0200);
        assert_eq!(codec.to_numeric_value(0x03FF), 1023.0 * 2f64.powi(-24));
        // Largest denormal plus half an ulp rounds up to the smallest normal
        assert_eq!(codec.to_bits(1023.5 * 2f64.powi(-24)), 0x0400);
        // Half of the smallest denormal is a tie and rounds to even (zero)
        assert_eq!(codec.to_bits(2f64.powi(-25)), 0x0000);
        assert_eq!(codec.to_bits(-2f64.powi(-25) * 1.5), 0x8001);
        assert_eq!(codec.to_bits(2f64.powi(-30)), 0x0000);
        assert_eq!(codec.to_bits(-2f64.powi(-30)), 0x8000);
        assert_eq!(codec.to_bits(f64::MIN_POSITIVE / 4.0), 0x0000);
    }

    #[test]
    fn test_half_overflow() {
        for codec in both_strategies(5, 10, true) {
            // 65520 is the midpoint between 65504 and 2^16, ties to even
            // rounds up into infinity
            assert_eq!(codec.to_bits(65519.0), 0x7BFF);
            assert_eq!(codec.to_bits(65520.0), 0x7C00);
            assert_eq!(codec.to_bits(1e10), 0x7C00);
            assert_eq!(codec.to_bits(-1e300), 0xFC00);
        }
    }

    #[test]
    fn test_ties_to_even() {
        let codec = half();
        // 1 + 2^-11 sits between 1 and 1 + 2^-10: rounds down to even
        assert_eq!(codec.to_bits(1.0 + 2f64.powi(-11)), 0x3C00);
        // 1 + 3 * 2^-11 sits between 1 + 2^-10 and 1 + 2^-9: rounds up
        assert_eq!(codec.to_bits(1.0 + 3.0 * 2f64.powi(-11)), 0x3C02);
        // Just above the tie rounds up
        assert_eq!(codec.to_bits(1.0 + 2f64.powi(-11) + 2f64.powi(-20)), 0x3C01);
    }

    #[test]
    fn test_mantissa_carry_into_exponent() {
        let codec = half();
        // 2 - 2^-12 rounds up to 2.0
        assert_eq!(codec.to_bits(2.0 - 2f64.powi(-12)), 0x4000);
    }

    #[test]
    fn test_nan_payload() {
        let codec = half();
        let quiet = f64::from_bits(0x7FF8_0000_0000_0000);
        assert_eq!(codec.to_bits(quiet), 0x7E00);

        // Payload entirely in discarded bits still yields a NaN pattern
        let low_payload = f64::from_bits(0x7FF0_0000_0000_0001);
        assert_eq!(codec.to_bits(low_payload), 0x7C01);

        let decoded = codec.to_numeric_value(0xFE00);
        assert!(decoded.is_nan());
        assert!(decoded.is_sign_negative());
        assert_eq!(decoded.to_bits(), 0xFFF8_0000_0000_0000);
    }

    #[test]
    fn test_tables_match_general_exhaustively() {
        for (e, m, signed) in [(5, 10, true), (5, 6, false), (4, 3, true), (3, 2, false)] {
            let [general, tables] = both_strategies(e, m, signed);
            assert_eq!(tables.acceleration(), Acceleration::Tables);
            for bits in 0..1u64 << general.bit_width() {
                let a = general.to_numeric_value(bits);
                let b = tables.to_numeric_value(bits);
                assert_eq!(a.to_bits(), b.to_bits());
                assert_eq!(general.to_bits(a), tables.to_bits(a), "{}", a);
            }
        }
    }

    #[test]
    fn test_tables_match_general_on_doubles() {
        let [general, tables] = both_strategies(8, 23, true);
        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        for _ in 0..20_000 {
            // xorshift over raw bit patterns hits every exponent range
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let value = f64::from_bits(state);
            assert_eq!(general.to_bits(value), tables.to_bits(value), "{:e}", value);
        }
    }

    #[test]
    fn test_single_precision_layout_matches_f32() {
        let codec = FloatCodec::signed(8, 23).unwrap();
        for value in [
            0.1,
            -3.75,
            1e-40,
            1.5e-45,
            3.4028235e38,
            1e39,
            std::f64::consts::PI,
        ] {
            assert_eq!(codec.to_bits(value), (value as f32).to_bits() as u64, "{}", value);
        }
    }

    #[test]
    fn test_unsigned_layout() {
        for codec in both_strategies(5, 6, false) {
            assert_eq!(codec.bit_width(), 11);
            assert_eq!(codec.to_bits(-1.0), 0);
            assert_eq!(codec.to_bits(-0.0), 0);
            assert_eq!(codec.to_bits(f64::NEG_INFINITY), 0);
            assert_eq!(codec.to_bits(1.0), 15 << 6);
            assert_eq!(codec.to_bits(f64::INFINITY), 0x1F << 6);
            assert!(codec.to_numeric_value(codec.to_bits(f64::NAN)).is_nan());
            assert_eq!(codec.max_value(), 65024.0);
            assert_eq!(codec.min_value(), 0.0);
        }
    }

    #[test]
    fn test_max_value() {
        assert_eq!(half().max_value(), 65504.0);
        assert_eq!(half().min_value(), -65504.0);
        assert_eq!(FloatCodec::signed(8, 23).unwrap().max_value(), f32::MAX as f64);
    }

    #[test]
    fn test_invalid_layouts() {
        assert_eq!(FloatCodec::signed(1, 10), Err(BitsError::InvalidExponentBits(1)));
        assert_eq!(FloatCodec::signed(11, 10), Err(BitsError::InvalidExponentBits(11)));
        assert_eq!(FloatCodec::signed(5, 0), Err(BitsError::InvalidMantissaBits(0)));
        assert_eq!(FloatCodec::signed(5, 52), Err(BitsError::InvalidMantissaBits(52)));
    }
}
