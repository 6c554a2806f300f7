//! Bit-packed backend for word widths that are not a primitive size

use crate::storage::{check_index, Storage};
use bitvec::prelude::*;
use imgbits_core::{consts, low_mask, BitsError, BitsResult, ByteOrder};
use log::debug;

/// Words of any width in `1..=64`, stored back to back with no padding
///
/// Word `i` occupies bits `i * width .. (i + 1) * width` of the underlying
/// bit vector, least significant bit first. Because words straddle machine
/// word boundaries the storage is never accelerable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedStorage {
    bits: BitVec<u64, Lsb0>,
    width: u32,
    len: usize,
    order: ByteOrder,
}

impl PackedStorage {
    pub fn new(width: u32, len: usize, order: ByteOrder) -> BitsResult<Self> {
        if width == 0 || width > consts::MAX_BIT_WIDTH {
            return Err(BitsError::InvalidBitWidth(width));
        }
        let total = len.checked_mul(width as usize).ok_or_else(|| {
            BitsError::InvalidParameter(format!("{} words of {} bits overflow", len, width))
        })?;

        debug!("packed storage: {} words of {} bits", len, width);
        Ok(Self {
            bits: BitVec::repeat(false, total),
            width,
            len,
            order,
        })
    }

    /// The raw packed bits
    pub fn as_bitslice(&self) -> &BitSlice<u64, Lsb0> {
        &self.bits
    }

    #[inline]
    fn span(&self, index: usize) -> std::ops::Range<usize> {
        let start = index * self.width as usize;
        start..start + self.width as usize
    }
}

impl Storage for PackedStorage {
    fn bit_width(&self) -> u32 {
        self.width
    }

    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn get(&self, index: usize) -> u64 {
        check_index(index, self.len);
        let span = self.span(index);
        self.bits[span].load_le::<u64>()
    }

    #[inline]
    fn set(&mut self, index: usize, bits: u64) {
        check_index(index, self.len);
        let span = self.span(index);
        self.bits[span].store_le::<u64>(bits & low_mask(self.width));
    }

    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn is_accelerable(&self) -> bool {
        false
    }
}
