//! Component access to shared-exponent words

use crate::view::NumericView;
use imgbits_core::{BitsError, BitsResult, ByteOrder};
use imgbits_repr::SharedExponentCodec;
use imgbits_storage::{check_index, Storage};

/// Up to this many components are decoded on the stack
const MAX_INLINE_COMPONENTS: usize = 8;

/// Presents every component of every shared-exponent word as one value
///
/// Logical index `i` addresses component `i % N` of word `i / N`, where `N`
/// is the number of components per word. Writing a component re-encodes
/// its whole word, so the exponent (and with it the precision of the other
/// components) may change.
#[derive(Debug, Clone)]
pub struct SharedExponentView<S> {
    storage: S,
    codec: SharedExponentCodec,
}

impl<S: Storage> SharedExponentView<S> {
    pub fn new(storage: S, codec: SharedExponentCodec) -> BitsResult<Self> {
        if codec.bit_width() > storage.bit_width() {
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

    pub fn codec(&self) -> &SharedExponentCodec {
        &self.codec
    }

    pub fn into_inner(self) -> (S, SharedExponentCodec) {
        (self.storage, self.codec)
    }

    /// Number of words (pixels) in the backend
    pub fn pixel_count(&self) -> usize {
        self.storage.len()
    }

    /// Decode every component of word `pixel` into `out`
    ///
    /// # Panics
    ///
    /// Panics if `pixel` is out of bounds or `out.len()` differs from the
    /// number of components.
    pub fn get_pixel(&self, pixel: usize, out: &mut [f64]) {
        self.codec.decode_into(self.storage.get(pixel), out);
    }

    /// Encode `values` into word `pixel`
    ///
    /// # Panics
    ///
    /// Panics if `pixel` is out of bounds or `values.len()` differs from the
    /// number of components.
    pub fn set_pixel(&mut self, pixel: usize, values: &[f64]) {
        let bits = self.codec.encode(values);
        self.storage.set(pixel, bits);
    }
}

impl<S: Storage> NumericView for SharedExponentView<S> {
    fn len(&self) -> usize {
        self.storage.len() * self.codec.components()
    }

    fn bit_width(&self) -> u32 {
        self.storage.bit_width()
    }

    fn get_value(&self, index: usize) -> f64 {
        check_index(index, self.len());
        let n = self.codec.components();
        self.codec.decode_component(self.storage.get(index / n), index % n)
    }

    fn set_value(&mut self, index: usize, value: f64) {
        check_index(index, self.len());
        let n = self.codec.components();
        let pixel = index / n;

        let mut inline = [0.0; MAX_INLINE_COMPONENTS];
        let mut heap;
        let components: &mut [f64] = if n <= MAX_INLINE_COMPONENTS {
            &mut inline[..n]
        } else {
            heap = vec![0.0; n];
            &mut heap
        };

        self.get_pixel(pixel, components);
        components[index % n] = value;
        self.set_pixel(pixel, components);
    }

    fn byte_order(&self) -> ByteOrder {
        self.storage.byte_order()
    }

    fn is_accelerable(&self) -> bool {
        self.storage.is_accelerable()
    }
}
