//! Shared-exponent vector packing
//!
//! Several non-negative components are stored as independent mantissas
//! scaled by one common exponent field, as in Radiance RGBE/XYZE pixels or
//! the GPU RGB9E5 format. Component `i` decodes to
//! `mantissa_i * 2^(exponent - bias - mantissa_bits)`.

use imgbits_core::consts::MAX_BIT_WIDTH;
use imgbits_core::{low_mask, BitsError, BitsResult};

/// A contiguous bit field inside a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Field {
    mask: u64,
    shift: u32,
}

impl Field {
    fn new(mask: u64) -> BitsResult<Self> {
        if mask == 0 {
            return Err(BitsError::InvalidMask("empty field".to_string()));
        }
        let shift = mask.trailing_zeros();
        if mask >> shift != low_mask(mask.count_ones()) {
            return Err(BitsError::InvalidMask(format!(
                "field {:#x} is not contiguous",
                mask
            )));
        }
        Ok(Self { mask, shift })
    }

    #[inline]
    fn width(&self) -> u32 {
        self.mask.count_ones()
    }

    #[inline]
    fn read(&self, bits: u64) -> u64 {
        (bits & self.mask) >> self.shift
    }

    #[inline]
    fn write(&self, value: u64) -> u64 {
        (value << self.shift) & self.mask
    }
}

#[inline]
fn pow2(exponent: i64) -> f64 {
    2f64.powi(exponent as i32)
}

/// Codec for `N` mantissa fields behind one exponent field
///
/// One word holds several values, so this codec is not a [`BitCodec`] and
/// has no [`BinaryRepresentation`] variant; it encodes and decodes whole
/// vectors. `SharedExponentView` in `imgbits-view` exposes its components
/// as a scalar sequence.
///
/// [`BitCodec`]: crate::BitCodec
/// [`BinaryRepresentation`]: crate::BinaryRepresentation
#[derive(Debug, Clone, PartialEq)]
pub struct SharedExponentCodec {
    exponent: Field,
    components: Vec<Field>,
    mantissa_bits: u32,
    bias: i64,
    max_exponent: u64,
    max_component_value: f64,
}

impl SharedExponentCodec {
    /// Build a codec from field masks
    ///
    /// All component masks must be contiguous, equally wide and disjoint
    /// from each other and from the exponent mask; `max_exponent` must fit
    /// in the exponent field.
    pub fn new(
        exponent_mask: u64,
        component_masks: &[u64],
        bias: i64,
        max_exponent: u64,
    ) -> BitsResult<Self> {
        if component_masks.is_empty() {
            return Err(BitsError::InvalidMask("no component fields".to_string()));
        }

        let exponent = Field::new(exponent_mask)?;
        if max_exponent > low_mask(exponent.width()) {
            return Err(BitsError::InvalidMask(format!(
                "maximum exponent {} does not fit in {} bits",
                max_exponent,
                exponent.width()
            )));
        }

        let components = component_masks
            .iter()
            .map(|&mask| Field::new(mask))
            .collect::<BitsResult<Vec<_>>>()?;

        let mantissa_bits = components[0].width();
        if mantissa_bits > imgbits_core::consts::DOUBLE_MANTISSA_BITS {
            return Err(BitsError::InvalidMask(format!(
                "{} mantissa bits exceed double precision",
                mantissa_bits
            )));
        }

        let mut used = exponent_mask;
        for field in &components {
            if field.width() != mantissa_bits {
                return Err(BitsError::InvalidMask(format!(
                    "component field {:#x} is not {} bits wide",
                    field.mask, mantissa_bits
                )));
            }
            if used & field.mask != 0 {
                return Err(BitsError::InvalidMask(format!(
                    "component field {:#x} overlaps another field",
                    field.mask
                )));
            }
            used |= field.mask;
        }

        Ok(Self::build(exponent, components, bias, max_exponent))
    }

    fn build(exponent: Field, components: Vec<Field>, bias: i64, max_exponent: u64) -> Self {
        let mantissa_bits = components[0].width();
        let max_component_value = low_mask(mantissa_bits) as f64
            * pow2(max_exponent as i64 - bias - mantissa_bits as i64);

        Self {
            exponent,
            components,
            mantissa_bits,
            bias,
            max_exponent,
            max_component_value,
        }
    }

    /// Radiance RGBE/XYZE: mantissas in the three high bytes (first
    /// component most significant), exponent in the low byte, bias 128
    pub fn rgbe() -> Self {
        Self::build(
            Field {
                mask: 0xFF,
                shift: 0,
            },
            vec![
                Field {
                    mask: 0xFF00_0000,
                    shift: 24,
                },
                Field {
                    mask: 0x00FF_0000,
                    shift: 16,
                },
                Field {
                    mask: 0x0000_FF00,
                    shift: 8,
                },
            ],
            128,
            255,
        )
    }

    /// RGB9E5: 9-bit mantissas from the low bits up, 5-bit exponent in the
    /// top bits, bias 15
    pub fn rgb9e5() -> Self {
        let components = (0..3)
            .map(|i| Field {
                mask: 0x1FF << (9 * i),
                shift: 9 * i,
            })
            .collect();
        Self::build(
            Field {
                mask: 0x1F << 27,
                shift: 27,
            },
            components,
            15,
            31,
        )
    }

    /// Number of components per word
    pub fn components(&self) -> usize {
        self.components.len()
    }

    pub fn mantissa_bits(&self) -> u32 {
        self.mantissa_bits
    }

    pub fn bias(&self) -> i64 {
        self.bias
    }

    /// Largest value a single component can hold
    pub fn max_component_value(&self) -> f64 {
        self.max_component_value
    }

    /// Width of the word holding every field
    pub fn bit_width(&self) -> u32 {
        let used = self
            .components
            .iter()
            .fold(self.exponent.mask, |acc, field| acc | field.mask);
        MAX_BIT_WIDTH - used.leading_zeros()
    }

    #[inline]
    fn scale(&self, exponent: i64) -> f64 {
        pow2(exponent - self.bias - self.mantissa_bits as i64)
    }

    /// Decode component `index` of `bits`
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.components()`.
    pub fn decode_component(&self, bits: u64, index: usize) -> f64 {
        let scale = self.scale(self.exponent.read(bits) as i64);
        self.components[index].read(bits) as f64 * scale
    }

    /// Decode every component of `bits` into `out`
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != self.components()`.
    pub fn decode_into(&self, bits: u64, out: &mut [f64]) {
        assert_eq!(
            out.len(),
            self.components.len(),
            "expected {} components",
            self.components.len()
        );
        let scale = self.scale(self.exponent.read(bits) as i64);
        for (value, field) in out.iter_mut().zip(&self.components) {
            *value = field.read(bits) as f64 * scale;
        }
    }

    pub fn decode(&self, bits: u64) -> Vec<f64> {
        let mut out = vec![0.0; self.components.len()];
        self.decode_into(bits, &mut out);
        out
    }

    /// Encode one value per component
    ///
    /// Components are clamped to `[0, max_component_value]`. The exponent is
    /// chosen from the largest component, bumped by one if that component's
    /// mantissa would round up to `2^mantissa_bits`.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != self.components()`.
    pub fn encode(&self, values: &[f64]) -> u64 {
        assert_eq!(
            values.len(),
            self.components.len(),
            "expected {} components",
            self.components.len()
        );

        let clamp = |value: f64| {
            if value > 0.0 {
                value.min(self.max_component_value)
            } else {
                0.0
            }
        };
        let max_value = values.iter().map(|&v| clamp(v)).fold(0.0, f64::max);

        // log2(0) is -inf, which the lower bound absorbs
        let floor_log2 = (max_value.log2().floor() as i64).max(-self.bias - 1);
        let mut exponent = floor_log2 + 1 + self.bias;
        let mut scale = self.scale(exponent);

        let max_mantissa = (max_value / scale).round() as u64;
        if max_mantissa >= 1u64 << self.mantissa_bits {
            exponent += 1;
            scale *= 2.0;
        }
        let exponent = (exponent.max(0) as u64).min(self.max_exponent);

        let limit = low_mask(self.mantissa_bits);
        self.components
            .iter()
            .zip(values)
            .fold(self.exponent.write(exponent), |bits, (field, &value)| {
                let mantissa = ((clamp(value) / scale).round() as u64).min(limit);
                bits | field.write(mantissa)
            })
    }
}
