//! Binary representation codecs
//!
//! A binary representation maps a fixed-width bit pattern to a 64-bit float
//! and back. The family covers two's complement and unsigned integers,
//! normalized integers, IEEE binary32/binary64, custom floating point
//! layouts narrower than binary64 (with optional lookup tables), and
//! shared-exponent vector packing as used by Radiance HDR pixels.
//!
//! Every codec is immutable once built and can be shared freely between
//! views and threads.

pub mod codec;
pub mod config;
pub mod float;
pub mod ieee;
pub mod integer;
pub mod normalized;
pub mod presets;
pub mod shared_exponent;

pub use codec::{BinaryRepresentation, BitCodec};
pub use config::{ReprConfig, ReprKind};
pub use float::{round_nearest_even, Acceleration, FloatCodec};
pub use ieee::{Float32Codec, Float64Codec};
pub use integer::IntegerCodec;
pub use normalized::NormalizedCodec;
pub use shared_exponent::SharedExponentCodec;
