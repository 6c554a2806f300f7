//! The numeric view contract and the codec binding

use crate::range::RangeAdapter;
use imgbits_core::{BitsError, BitsResult, ByteOrder};
use imgbits_repr::{BinaryRepresentation, BitCodec};
use imgbits_storage::{check_range, Storage};

/// Words converted per round trip through the backend's bulk methods
const BULK_BATCH: usize = 256;

/// A sequence of numeric values backed by word storage
pub trait NumericView {
    /// Number of values
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width in bits of the underlying words
    fn bit_width(&self) -> u32;

    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn get_value(&self, index: usize) -> f64;

    /// Store the value closest to `value` that the view can represent
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn set_value(&mut self, index: usize, value: f64);

    fn byte_order(&self) -> ByteOrder;

    fn is_big_endian(&self) -> bool {
        self.byte_order().is_big_endian()
    }

    fn is_accelerable(&self) -> bool;

    /// Read `out.len()` values starting at `start`
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the view.
    fn get_values(&self, start: usize, out: &mut [f64]) {
        check_range(start, out.len(), self.len());
        for (i, value) in out.iter_mut().enumerate() {
            *value = self.get_value(start + i);
        }
    }

    /// Write `values` starting at `start`
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the view.
    fn set_values(&mut self, start: usize, values: &[f64]) {
        check_range(start, values.len(), self.len());
        for (i, &value) in values.iter().enumerate() {
            self.set_value(start + i, value);
        }
    }
}

impl<V: NumericView + ?Sized> NumericView for &mut V {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn bit_width(&self) -> u32 {
        (**self).bit_width()
    }

    fn get_value(&self, index: usize) -> f64 {
        (**self).get_value(index)
    }

    fn set_value(&mut self, index: usize, value: f64) {
        (**self).set_value(index, value)
    }

    fn byte_order(&self) -> ByteOrder {
        (**self).byte_order()
    }

    fn is_accelerable(&self) -> bool {
        (**self).is_accelerable()
    }

    fn get_values(&self, start: usize, out: &mut [f64]) {
        (**self).get_values(start, out)
    }

    fn set_values(&mut self, start: usize, values: &[f64]) {
        (**self).set_values(start, values)
    }
}

impl<V: NumericView + ?Sized> NumericView for Box<V> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn bit_width(&self) -> u32 {
        (**self).bit_width()
    }

    fn get_value(&self, index: usize) -> f64 {
        (**self).get_value(index)
    }

    fn set_value(&mut self, index: usize, value: f64) {
        (**self).set_value(index, value)
    }

    fn byte_order(&self) -> ByteOrder {
        (**self).byte_order()
    }

    fn is_accelerable(&self) -> bool {
        (**self).is_accelerable()
    }

    fn get_values(&self, start: usize, out: &mut [f64]) {
        (**self).get_values(start, out)
    }

    fn set_values(&mut self, start: usize, values: &[f64]) {
        (**self).set_values(start, values)
    }
}

/// A backend read and written through one binary representation
///
/// Nothing is cached: every access decodes or encodes through the codec.
/// Several views may alias one backend through a
/// [`Shared`](imgbits_storage::Shared) handle.
#[derive(Debug, Clone)]
pub struct ReprView<S, C = BinaryRepresentation> {
    storage: S,
    codec: C,
}

impl<S: Storage, C: BitCodec> ReprView<S, C> {
    /// Bind `codec` to `storage`; their bit widths must match
    pub fn new(storage: S, codec: C) -> BitsResult<Self> {
        if codec.bit_width() != storage.bit_width() {
            return Err(BitsError::WidthMismatch {
                codec: codec.bit_width(),
                storage: storage.bit_width(),
            });
        }
        Ok(Self { storage, codec })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn into_inner(self) -> (S, C) {
        (self.storage, self.codec)
    }

    /// Present the integer values of this view in `[0, 1]` (unsigned
    /// codecs) or `[-1, 1]` (signed codecs)
    pub fn normalized(self) -> BitsResult<RangeAdapter<Self>> {
        if self.codec.is_floating_point() {
            return Err(BitsError::InvalidParameter(
                "only integer views can be normalized".to_string(),
            ));
        }
        let max = self.codec.max_value();
        if self.codec.is_unsigned() {
            RangeAdapter::unorm(self, max)
        } else {
            RangeAdapter::snorm(self, max)
        }
    }
}

impl<S: Storage, C: BitCodec> NumericView for ReprView<S, C> {
    fn len(&self) -> usize {
        self.storage.len()
    }

    fn bit_width(&self) -> u32 {
        self.storage.bit_width()
    }

    #[inline]
    fn get_value(&self, index: usize) -> f64 {
        self.codec.to_numeric_value(self.storage.get(index))
    }

    #[inline]
    fn set_value(&mut self, index: usize, value: f64) {
        self.storage.set(index, self.codec.to_bits(value));
    }

    fn byte_order(&self) -> ByteOrder {
        self.storage.byte_order()
    }

    fn is_accelerable(&self) -> bool {
        self.storage.is_accelerable()
    }

    fn get_values(&self, start: usize, out: &mut [f64]) {
        check_range(start, out.len(), self.len());
        let mut words = [0u64; BULK_BATCH];
        for (batch, values) in out.chunks_mut(BULK_BATCH).enumerate() {
            let words = &mut words[..values.len()];
            self.storage.copy_to(start + batch * BULK_BATCH, words);
            for (value, &bits) in values.iter_mut().zip(words.iter()) {
                *value = self.codec.to_numeric_value(bits);
            }
        }
    }

    fn set_values(&mut self, start: usize, values: &[f64]) {
        check_range(start, values.len(), self.len());
        let mut words = [0u64; BULK_BATCH];
        for (batch, values) in values.chunks(BULK_BATCH).enumerate() {
            let words = &mut words[..values.len()];
            for (bits, &value) in words.iter_mut().zip(values) {
                *bits = self.codec.to_bits(value);
            }
            self.storage.copy_from(start + batch * BULK_BATCH, words);
        }
    }
}
