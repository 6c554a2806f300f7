//! Endianness-aware word composition
//!
//! [`WordComposer`] presents `k` adjacent narrow words of a backend as one
//! wide word, [`WordSplitter`] presents each wide word of a backend as `k`
//! narrow ones. Both honor a byte order chosen at construction, independent
//! of the order the backend declares.

use crate::storage::{check_index, Storage};
use imgbits_core::{consts, low_mask, BitsError, BitsResult, ByteOrder};

const FACTORS: [u32; 3] = [2, 4, 8];

fn check_factor(factor: u32, width: u32) -> BitsResult<()> {
    if FACTORS.contains(&factor) {
        Ok(())
    } else {
        Err(BitsError::InvalidComposition { factor, width })
    }
}

/// Reads `factor` consecutive backend words as one word
///
/// Word `i` is made of backend words `i * factor .. (i + 1) * factor`.
/// Under big-endian order the first backend word is the most significant
/// part; under little-endian order it is the least significant part. A
/// trailing partial group of backend words is not addressable.
#[derive(Debug, Clone)]
pub struct WordComposer<S> {
    backend: S,
    factor: u32,
    part_width: u32,
    order: ByteOrder,
}

impl<S: Storage> WordComposer<S> {
    pub fn new(backend: S, factor: u32, order: ByteOrder) -> BitsResult<Self> {
        let part_width = backend.bit_width();
        check_factor(factor, part_width)?;
        if part_width * factor > consts::MAX_BIT_WIDTH {
            return Err(BitsError::InvalidComposition {
                factor,
                width: part_width,
            });
        }

        Ok(Self {
            backend,
            factor,
            part_width,
            order,
        })
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }
}

impl<S: Storage> Storage for WordComposer<S> {
    fn bit_width(&self) -> u32 {
        self.part_width * self.factor
    }

    fn len(&self) -> usize {
        self.backend.len() / self.factor as usize
    }

    fn get(&self, index: usize) -> u64 {
        check_index(index, self.len());
        let base = index * self.factor as usize;
        let mask = low_mask(self.part_width);

        let mut word = 0u64;
        for j in 0..self.factor {
            let part = self.backend.get(base + j as usize) & mask;
            match self.order {
                // part_width is at most 32 here, so the shift never overflows
                ByteOrder::BigEndian => word = (word << self.part_width) | part,
                ByteOrder::LittleEndian => word |= part << (self.part_width * j),
            }
        }
        word
    }

    fn set(&mut self, index: usize, bits: u64) {
        check_index(index, self.len());
        let base = index * self.factor as usize;
        let mask = low_mask(self.part_width);

        for j in 0..self.factor {
            let shift = match self.order {
                ByteOrder::BigEndian => self.part_width * (self.factor - 1 - j),
                ByteOrder::LittleEndian => self.part_width * j,
            };
            self.backend.set(base + j as usize, (bits >> shift) & mask);
        }
    }

    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn is_accelerable(&self) -> bool {
        self.backend.is_accelerable() && self.order.is_native()
    }
}

/// Reads each backend word as `factor` narrower words
///
/// Word `i` is part `i % factor` of backend word `i / factor`; part 0 is
/// the most significant part under big-endian order and the least
/// significant under little-endian order. Writes read, modify and write
/// back the containing backend word.
#[derive(Debug, Clone)]
pub struct WordSplitter<S> {
    backend: S,
    factor: u32,
    part_width: u32,
    order: ByteOrder,
}

impl<S: Storage> WordSplitter<S> {
    pub fn new(backend: S, factor: u32, order: ByteOrder) -> BitsResult<Self> {
        let width = backend.bit_width();
        check_factor(factor, width)?;
        if width % factor != 0 {
            return Err(BitsError::InvalidComposition { factor, width });
        }

        Ok(Self {
            backend,
            factor,
            part_width: width / factor,
            order,
        })
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    #[inline]
    fn shift(&self, part: u32) -> u32 {
        match self.order {
            ByteOrder::BigEndian => self.part_width * (self.factor - 1 - part),
            ByteOrder::LittleEndian => self.part_width * part,
        }
    }
}

impl<S: Storage> Storage for WordSplitter<S> {
    fn bit_width(&self) -> u32 {
        self.part_width
    }

    fn len(&self) -> usize {
        self.backend.len() * self.factor as usize
    }

    fn get(&self, index: usize) -> u64 {
        check_index(index, self.len());
        let factor = self.factor as usize;
        let word = self.backend.get(index / factor);
        (word >> self.shift((index % factor) as u32)) & low_mask(self.part_width)
    }

    fn set(&mut self, index: usize, bits: u64) {
        check_index(index, self.len());
        let factor = self.factor as usize;
        let shift = self.shift((index % factor) as u32);
        let mask = low_mask(self.part_width) << shift;

        let word = self.backend.get(index / factor);
        let word = (word & !mask) | ((bits << shift) & mask);
        self.backend.set(index / factor, word);
    }

    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn is_accelerable(&self) -> bool {
        self.backend.is_accelerable() && self.order.is_native()
    }
}
