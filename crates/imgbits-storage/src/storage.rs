//! The storage backend contract

use imgbits_core::ByteOrder;
use std::cell::RefCell;
use std::rc::Rc;

/// A backend shared between several views
pub type Shared<S> = Rc<RefCell<S>>;

/// Wrap a backend so that several views can alias it
pub fn shared<S: Storage>(storage: S) -> Shared<S> {
    Rc::new(RefCell::new(storage))
}

/// Panic unless `index < len`
#[inline]
#[track_caller]
pub fn check_index(index: usize, len: usize) {
    assert!(
        index < len,
        "index {} out of bounds for storage of length {}",
        index,
        len
    );
}

/// Panic unless `start..start + count` lies within `0..len`
#[inline]
#[track_caller]
pub fn check_range(start: usize, count: usize, len: usize) {
    assert!(
        start.checked_add(count).is_some_and(|end| end <= len),
        "range {}..{} out of bounds for storage of length {}",
        start,
        start.saturating_add(count),
        len
    );
}

/// An indexed sequence of fixed-width bit words
///
/// Words live in the low [`bit_width`](Storage::bit_width) bits of a `u64`;
/// implementations ignore higher bits on [`set`](Storage::set) and always
/// return them cleared from [`get`](Storage::get). The length is fixed for
/// the lifetime of the backend.
pub trait Storage {
    /// Width in bits of each word (1..=64)
    fn bit_width(&self) -> u32;

    /// Number of words
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the word at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn get(&self, index: usize) -> u64;

    /// Write the low `bit_width` bits of `bits` at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn set(&mut self, index: usize, bits: u64);

    /// Declared byte order of the stored words
    fn byte_order(&self) -> ByteOrder;

    fn is_big_endian(&self) -> bool {
        self.byte_order().is_big_endian()
    }

    /// Whether the words are contiguous in memory and can be handed to an
    /// accelerator as they are
    fn is_accelerable(&self) -> bool;

    /// Copy `dst.len()` words starting at `start` into `dst`
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the storage.
    fn copy_to(&self, start: usize, dst: &mut [u64]) {
        check_range(start, dst.len(), self.len());
        for (i, word) in dst.iter_mut().enumerate() {
            *word = self.get(start + i);
        }
    }

    /// Copy `src` into the storage starting at `start`
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the storage.
    fn copy_from(&mut self, start: usize, src: &[u64]) {
        check_range(start, src.len(), self.len());
        for (i, &word) in src.iter().enumerate() {
            self.set(start + i, word);
        }
    }

    /// Write `bits` to `count` words starting at `start`
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the storage.
    fn fill(&mut self, start: usize, count: usize, bits: u64) {
        check_range(start, count, self.len());
        for index in start..start + count {
            self.set(index, bits);
        }
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn bit_width(&self) -> u32 {
        (**self).bit_width()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: usize) -> u64 {
        (**self).get(index)
    }

    fn set(&mut self, index: usize, bits: u64) {
        (**self).set(index, bits)
    }

    fn byte_order(&self) -> ByteOrder {
        (**self).byte_order()
    }

    fn is_accelerable(&self) -> bool {
        (**self).is_accelerable()
    }

    fn copy_to(&self, start: usize, dst: &mut [u64]) {
        (**self).copy_to(start, dst)
    }

    fn copy_from(&mut self, start: usize, src: &[u64]) {
        (**self).copy_from(start, src)
    }

    fn fill(&mut self, start: usize, count: usize, bits: u64) {
        (**self).fill(start, count, bits)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn bit_width(&self) -> u32 {
        (**self).bit_width()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: usize) -> u64 {
        (**self).get(index)
    }

    fn set(&mut self, index: usize, bits: u64) {
        (**self).set(index, bits)
    }

    fn byte_order(&self) -> ByteOrder {
        (**self).byte_order()
    }

    fn is_accelerable(&self) -> bool {
        (**self).is_accelerable()
    }

    fn copy_to(&self, start: usize, dst: &mut [u64]) {
        (**self).copy_to(start, dst)
    }

    fn copy_from(&mut self, start: usize, src: &[u64]) {
        (**self).copy_from(start, src)
    }

    fn fill(&mut self, start: usize, count: usize, bits: u64) {
        (**self).fill(start, count, bits)
    }
}

// Each call takes its own borrow, so a clone of the `Rc` held by another
// view sees every write immediately.
impl<S: Storage> Storage for Rc<RefCell<S>> {
    fn bit_width(&self) -> u32 {
        self.borrow().bit_width()
    }

    fn len(&self) -> usize {
        self.borrow().len()
    }

    fn get(&self, index: usize) -> u64 {
        self.borrow().get(index)
    }

    fn set(&mut self, index: usize, bits: u64) {
        self.borrow_mut().set(index, bits)
    }

    fn byte_order(&self) -> ByteOrder {
        self.borrow().byte_order()
    }

    fn is_accelerable(&self) -> bool {
        self.borrow().is_accelerable()
    }

    fn copy_to(&self, start: usize, dst: &mut [u64]) {
        self.borrow().copy_to(start, dst)
    }

    fn copy_from(&mut self, start: usize, src: &[u64]) {
        self.borrow_mut().copy_from(start, src)
    }

    fn fill(&mut self, start: usize, count: usize, bits: u64) {
        self.borrow_mut().fill(start, count, bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn test_shared_aliasing() {
        let backend = shared(MemoryStorage::<u16>::new(4, ByteOrder::LittleEndian));
        let mut first = backend.clone();
        let second = backend.clone();

        first.set(2, 0xBEEF);
        assert_eq!(second.get(2), 0xBEEF);
        assert_eq!(Rc::strong_count(&backend), 3);
    }

    #[test]
    fn test_default_bulk_methods() {
        let mut storage = MemoryStorage::<u8>::new(8, ByteOrder::BigEndian);
        let mut by_ref = &mut storage;

        by_ref.copy_from(2, &[1, 2, 3]);
        by_ref.fill(5, 3, 0x1FF);

        let mut out = [0u64; 8];
        by_ref.copy_to(0, &mut out);
        assert_eq!(out, [0, 0, 1, 2, 3, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_copy_out_of_range() {
        let storage = MemoryStorage::<u32>::new(4, ByteOrder::BigEndian);
        let mut out = [0u64; 3];
        storage.copy_to(2, &mut out);
    }
}
