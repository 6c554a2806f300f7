//! Codecs shared by pixel formats and file codecs
//!
//! Built on first use and never mutated afterwards.

use crate::float::{Acceleration, FloatCodec};
use crate::shared_exponent::SharedExponentCodec;
use lazy_static::lazy_static;

lazy_static! {
    /// IEEE binary16 (half precision), table accelerated
    pub static ref FLOAT16: FloatCodec = FloatCodec::build(5, 10, true, Acceleration::Tables);

    /// Unsigned 11-bit float of packed R11G11B10 pixels
    pub static ref UFLOAT11: FloatCodec = FloatCodec::build(5, 6, false, Acceleration::Tables);

    /// Unsigned 10-bit float of packed R11G11B10 pixels
    pub static ref UFLOAT10: FloatCodec = FloatCodec::build(5, 5, false, Acceleration::Tables);

    /// Radiance RGBE/XYZE pixels
    pub static ref RGBE: SharedExponentCodec = SharedExponentCodec::rgbe();

    /// RGB9E5 shared exponent pixels
    pub static ref RGB9E5: SharedExponentCodec = SharedExponentCodec::rgb9e5();
}
