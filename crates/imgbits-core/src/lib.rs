//! Core types and utilities for the imgbits storage layer
//!
//! This crate provides the error type, the constants describing the IEEE
//! binary64 layout every codec converts through, and the byte order selector
//! shared by storage backends, views and composites.

pub mod consts;
pub mod error;
pub mod types;

pub use error::{BitsError, BitsResult};
pub use types::*;

/// Mask selecting the low `bits` bits of a 64-bit container
///
/// `bits` may be anything in `0..=64`.
#[inline]
pub const fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}
