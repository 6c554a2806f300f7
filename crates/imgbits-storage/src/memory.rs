//! In-memory backends over primitive word arrays

use crate::storage::{check_index, check_range, Storage};
use byteorder::{BigEndian, LittleEndian};
use imgbits_core::{BitsError, BitsResult, ByteOrder};
use num_traits::{AsPrimitive, PrimInt, Unsigned};
use log::debug;
use std::fmt::Debug;

/// Primitive unsigned word that a memory backend can hold
pub trait StorageWord: PrimInt + Unsigned + AsPrimitive<u64> + Default + Debug {
    /// Width of the word in bits
    const BITS: u32;

    /// Truncate a bit pattern to this word
    fn from_bits(bits: u64) -> Self;

    /// Decode `dst.len()` words from `src` using byte order `B`
    fn read_into<B: byteorder::ByteOrder>(src: &[u8], dst: &mut [Self]);

    /// Encode `src` into `dst` using byte order `B`
    fn write_from<B: byteorder::ByteOrder>(src: &[Self], dst: &mut [u8]);

    fn bytes() -> usize {
        Self::BITS as usize / 8
    }
}

impl StorageWord for u8 {
    const BITS: u32 = 8;

    #[inline]
    fn from_bits(bits: u64) -> Self {
        bits as u8
    }

    fn read_into<B: byteorder::ByteOrder>(src: &[u8], dst: &mut [Self]) {
        dst.copy_from_slice(src);
    }

    fn write_from<B: byteorder::ByteOrder>(src: &[Self], dst: &mut [u8]) {
        dst.copy_from_slice(src);
    }
}

macro_rules! impl_storage_word {
    ($ty:ty, $read:ident, $write:ident) => {
        impl StorageWord for $ty {
            const BITS: u32 = <$ty>::BITS;

            #[inline]
            fn from_bits(bits: u64) -> Self {
                bits as $ty
            }

            fn read_into<B: byteorder::ByteOrder>(src: &[u8], dst: &mut [Self]) {
                B::$read(src, dst);
            }

            fn write_from<B: byteorder::ByteOrder>(src: &[Self], dst: &mut [u8]) {
                B::$write(src, dst);
            }
        }
    };
}

impl_storage_word!(u16, read_u16_into, write_u16_into);
impl_storage_word!(u32, read_u32_into, write_u32_into);
impl_storage_word!(u64, read_u64_into, write_u64_into);

/// Owned, contiguous array of primitive words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStorage<T: StorageWord> {
    data: Vec<T>,
    order: ByteOrder,
}

impl<T: StorageWord> MemoryStorage<T> {
    /// Zero-filled storage of `len` words
    pub fn new(len: usize, order: ByteOrder) -> Self {
        Self {
            data: vec![T::zero(); len],
            order,
        }
    }

    pub fn from_vec(data: Vec<T>, order: ByteOrder) -> Self {
        Self { data, order }
    }

    /// Decode a byte buffer holding words in byte order `order`
    pub fn from_bytes(bytes: &[u8], order: ByteOrder) -> BitsResult<Self> {
        let word_bytes = T::bytes();
        if bytes.len() % word_bytes != 0 {
            return Err(BitsError::BufferLength {
                actual: bytes.len(),
                word_bytes,
            });
        }

        let mut data = vec![T::zero(); bytes.len() / word_bytes];
        debug!(
            "decoding {} bytes into {} {}-bit words ({:?})",
            bytes.len(),
            data.len(),
            T::BITS,
            order
        );
        match order {
            ByteOrder::BigEndian => T::read_into::<BigEndian>(bytes, &mut data),
            ByteOrder::LittleEndian => T::read_into::<LittleEndian>(bytes, &mut data),
        }
        Ok(Self { data, order })
    }

    /// Encode the words back into bytes in the declared byte order
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.data.len() * T::bytes()];
        match self.order {
            ByteOrder::BigEndian => T::write_from::<BigEndian>(&self.data, &mut bytes),
            ByteOrder::LittleEndian => T::write_from::<LittleEndian>(&self.data, &mut bytes),
        }
        bytes
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

impl<T: StorageWord> Storage for MemoryStorage<T> {
    fn bit_width(&self) -> u32 {
        T::BITS
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn get(&self, index: usize) -> u64 {
        check_index(index, self.data.len());
        self.data[index].as_()
    }

    #[inline]
    fn set(&mut self, index: usize, bits: u64) {
        check_index(index, self.data.len());
        self.data[index] = T::from_bits(bits);
    }

    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn is_accelerable(&self) -> bool {
        true
    }

    fn copy_to(&self, start: usize, dst: &mut [u64]) {
        check_range(start, dst.len(), self.data.len());
        for (out, word) in dst.iter_mut().zip(&self.data[start..]) {
            *out = word.as_();
        }
    }

    fn copy_from(&mut self, start: usize, src: &[u64]) {
        check_range(start, src.len(), self.data.len());
        for (word, &bits) in self.data[start..].iter_mut().zip(src) {
            *word = T::from_bits(bits);
        }
    }

    fn fill(&mut self, start: usize, count: usize, bits: u64) {
        check_range(start, count, self.data.len());
        self.data[start..start + count].fill(T::from_bits(bits));
    }
}

/// Backend over words owned by someone else
///
/// Dropping the wrapper leaves the slice untouched.
#[derive(Debug)]
pub struct SliceStorage<'a, T: StorageWord> {
    data: &'a mut [T],
    order: ByteOrder,
}

impl<'a, T: StorageWord> SliceStorage<'a, T> {
    pub fn new(data: &'a mut [T], order: ByteOrder) -> Self {
        Self { data, order }
    }
}

impl<T: StorageWord> Storage for SliceStorage<'_, T> {
    fn bit_width(&self) -> u32 {
        T::BITS
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn get(&self, index: usize) -> u64 {
        check_index(index, self.data.len());
        self.data[index].as_()
    }

    #[inline]
    fn set(&mut self, index: usize, bits: u64) {
        check_index(index, self.data.len());
        self.data[index] = T::from_bits(bits);
    }

    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn is_accelerable(&self) -> bool {
        true
    }
}
