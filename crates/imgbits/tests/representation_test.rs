//! Conversion properties of the codec family

use imgbits::*;

fn half(acceleration: Acceleration) -> FloatCodec {
    FloatCodec::new(5, 10, true, acceleration).unwrap()
}

fn both_strategies() -> [FloatCodec; 2] {
    [half(Acceleration::General), half(Acceleration::Tables)]
}

#[test]
fn test_integer_round_trip_all_widths() {
    for width in 1..=64 {
        for signed in [false, true] {
            let codec = IntegerCodec::new(width, signed).unwrap();
            let (min, max) = (codec.min_value(), codec.max_value());
            let candidates = [min, max, 0.0, 1.0, -1.0, (max / 3.0).round(), (min / 7.0).round()];

            for x in candidates.into_iter().filter(|&x| x >= min && x <= max) {
                assert_eq!(
                    codec.to_numeric_value(codec.to_bits(x)),
                    x,
                    "width {} signed {}",
                    width,
                    signed
                );
            }
        }
    }
}

#[test]
fn test_integer_clamps_out_of_range() {
    let codec = IntegerCodec::signed(12).unwrap();
    assert_eq!(codec.to_numeric_value(codec.to_bits(1e6)), 2047.0);
    assert_eq!(codec.to_numeric_value(codec.to_bits(-1e6)), -2048.0);
    assert_eq!(codec.to_numeric_value(codec.to_bits(2.5)), 3.0);
    assert_eq!(codec.to_numeric_value(codec.to_bits(-2.5)), -3.0);
}

#[test]
fn test_normalized_round_trip_within_one() {
    for width in [2, 3, 8, 10, 12] {
        for signed in [false, true] {
            let codec = NormalizedCodec::new(width, signed).unwrap();
            let integer = codec.integer();

            for bits in 0..(1u64 << width) {
                let again = codec.to_bits(codec.to_numeric_value(bits));
                let delta =
                    integer.to_numeric_value(again) - integer.to_numeric_value(bits);
                assert!(delta.abs() <= 1.0, "width {} bits {:#x}", width, bits);
            }
        }
    }
}

#[test]
fn test_normalized_exact_fractions() {
    let unorm = NormalizedCodec::unsigned(8).unwrap();
    for bits in [0, 51, 85, 255] {
        assert_eq!(unorm.to_bits(unorm.to_numeric_value(bits)), bits);
    }

    let snorm = NormalizedCodec::signed(8).unwrap();
    assert_eq!(snorm.to_numeric_value(0x81), -1.0);
    assert_eq!(snorm.to_bits(-1.0), 0x81);
    assert_eq!(snorm.to_bits(1.0), 0x7F);
}

#[test]
fn test_half_float_special_values() {
    for codec in both_strategies() {
        assert_eq!(codec.to_numeric_value(codec.to_bits(1.5)), 1.5);

        let negative_zero = codec.to_numeric_value(codec.to_bits(-0.0));
        assert_eq!(negative_zero, 0.0);
        assert!(negative_zero.is_sign_negative());

        assert_eq!(codec.to_numeric_value(codec.to_bits(f64::INFINITY)), f64::INFINITY);
        assert!(codec.to_numeric_value(codec.to_bits(f64::NAN)).is_nan());

        let denormal = 2f64.powi(-24);
        assert_eq!(codec.to_bits(denormal), 1);
        assert_eq!(codec.to_numeric_value(1), denormal);
    }
}

#[test]
fn test_half_float_overflow_to_infinity() {
    for codec in both_strategies() {
        assert_eq!(codec.to_bits(65504.0), 0x7BFF);
        assert_eq!(codec.to_bits(65520.0), 0x7C00);
        assert_eq!(codec.to_bits(70000.0), 0x7C00);
        assert_eq!(codec.to_bits(-70000.0), 0xFC00);
        assert_eq!(codec.max_value(), 65504.0);
    }
}

#[test]
fn test_half_float_ties_to_even() {
    let ulp = 2f64.powi(-10);
    for codec in both_strategies() {
        // halfway between 0x3C00 and 0x3C01
        assert_eq!(codec.to_bits(1.0 + ulp / 2.0), 0x3C00);
        // halfway between 0x3C01 and 0x3C02
        assert_eq!(codec.to_bits(1.0 + 3.0 * ulp / 2.0), 0x3C02);
        // just above the first tie
        assert_eq!(codec.to_bits(1.0 + ulp / 2.0 + ulp / 16.0), 0x3C01);
    }
}

#[test]
fn test_strategies_agree_on_every_half() {
    let [general, tables] = both_strategies();
    for bits in 0..=0xFFFFu64 {
        let a = general.to_numeric_value(bits);
        let b = tables.to_numeric_value(bits);
        assert_eq!(a.to_bits(), b.to_bits(), "bits {:#06x}", bits);
        assert_eq!(general.to_bits(a), tables.to_bits(b), "bits {:#06x}", bits);
    }
}

#[test]
fn test_unsigned_float_presets() {
    assert_eq!(presets::UFLOAT11.bit_width(), 11);
    assert_eq!(presets::UFLOAT11.to_bits(1.0), 15 << 6);
    assert_eq!(presets::UFLOAT11.to_bits(-1.0), 0);
    assert_eq!(presets::UFLOAT10.to_bits(1.0), 15 << 5);
    assert!(presets::UFLOAT10.is_unsigned());
}

#[test]
fn test_codecs_from_config() {
    let half = ReprConfig::new(ReprKind::Float)
        .exponent_bits(5)
        .mantissa_bits(10)
        .acceleration(Acceleration::Tables)
        .build()
        .unwrap();
    assert_eq!(half.bit_width(), 16);
    assert_eq!(half.to_bits(1.0), 0x3C00);

    let snorm = ReprConfig::new(ReprKind::SignedNormalized).bits(16).build().unwrap();
    assert_eq!(snorm.to_bits(-1.0), 0x8001);

    assert!(ReprConfig::new(ReprKind::Float)
        .exponent_bits(11)
        .mantissa_bits(4)
        .build()
        .is_err());
    assert!(matches!(
        ReprConfig::new(ReprKind::Float32).build_for_width(16),
        Err(BitsError::WidthMismatch { .. })
    ));
}
