//! Data descriptions of codecs
//!
//! Format tables and container readers describe their sample layouts as
//! plain data; [`ReprConfig::build`] validates a description and produces
//! the matching [`BinaryRepresentation`].

use crate::codec::BinaryRepresentation;
use crate::float::{Acceleration, FloatCodec};
use crate::integer::IntegerCodec;
use crate::normalized::NormalizedCodec;
use imgbits_core::{BitsError, BitsResult};

/// Which member of the codec family a description selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReprKind {
    SignedInteger,
    UnsignedInteger,
    SignedNormalized,
    UnsignedNormalized,
    Float,
    UnsignedFloat,
    Float32,
    #[default]
    Float64,
}

/// Codec description
///
/// `bits` applies to the integer kinds, `exponent_bits` and
/// `mantissa_bits` to the custom float kinds, `acceleration` to the custom
/// float kinds only. Fields that do not apply are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReprConfig {
    pub kind: ReprKind,
    pub bits: u32,
    pub exponent_bits: u32,
    pub mantissa_bits: u32,
    pub acceleration: Acceleration,
}

impl Default for ReprConfig {
    fn default() -> Self {
        Self {
            kind: ReprKind::Float64,
            bits: 64,
            exponent_bits: 0,
            mantissa_bits: 0,
            acceleration: Acceleration::General,
        }
    }
}

impl ReprConfig {
    pub fn new(kind: ReprKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn bits(mut self, bits: u32) -> Self {
        self.bits = bits;
        self
    }

    pub fn exponent_bits(mut self, exponent_bits: u32) -> Self {
        self.exponent_bits = exponent_bits;
        self
    }

    pub fn mantissa_bits(mut self, mantissa_bits: u32) -> Self {
        self.mantissa_bits = mantissa_bits;
        self
    }

    pub fn acceleration(mut self, acceleration: Acceleration) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Width in bits of the codec this description builds
    pub fn bit_width(&self) -> u32 {
        match self.kind {
            ReprKind::SignedInteger
            | ReprKind::UnsignedInteger
            | ReprKind::SignedNormalized
            | ReprKind::UnsignedNormalized => self.bits,
            ReprKind::Float => 1 + self.exponent_bits + self.mantissa_bits,
            ReprKind::UnsignedFloat => self.exponent_bits + self.mantissa_bits,
            ReprKind::Float32 => 32,
            ReprKind::Float64 => 64,
        }
    }

    pub fn build(&self) -> BitsResult<BinaryRepresentation> {
        let codec: BinaryRepresentation = match self.kind {
            ReprKind::SignedInteger => IntegerCodec::signed(self.bits)?.into(),
            ReprKind::UnsignedInteger => IntegerCodec::unsigned(self.bits)?.into(),
            ReprKind::SignedNormalized => NormalizedCodec::signed(self.bits)?.into(),
            ReprKind::UnsignedNormalized => NormalizedCodec::unsigned(self.bits)?.into(),
            ReprKind::Float | ReprKind::UnsignedFloat => FloatCodec::new(
                self.exponent_bits,
                self.mantissa_bits,
                self.kind == ReprKind::Float,
                self.acceleration,
            )?
            .into(),
            ReprKind::Float32 => BinaryRepresentation::float32(),
            ReprKind::Float64 => BinaryRepresentation::float64(),
        };
        Ok(codec)
    }

    /// Build, then check the codec is `width` bits wide
    pub fn build_for_width(&self, width: u32) -> BitsResult<BinaryRepresentation> {
        if self.bit_width() != width {
            return Err(BitsError::WidthMismatch {
                codec: self.bit_width(),
                storage: width,
            });
        }
        self.build()
    }
}
