//! Concatenation of bounded chunks into one sequence
//!
//! A single backend may not be able to address more than `i32::MAX`
//! elements. [`LargeStorage`] and [`LargeView`] stitch equally sized chunks
//! into one logically contiguous sequence with the same contract as a
//! single chunk. Bulk operations are split into per-chunk pieces by
//! [`ChunkLayout::spans`] and dispatched in ascending order.

use crate::layout::ChunkLayout;
use crate::view::NumericView;
use imgbits_core::{BitsError, BitsResult, ByteOrder};
use imgbits_storage::Storage;
use log::debug;

/// Check that every chunk shares the first chunk's word width and byte order
fn check_chunks<T>(
    chunks: &[T],
    width: impl Fn(&T) -> u32,
    order: impl Fn(&T) -> ByteOrder,
) -> BitsResult<(u32, ByteOrder)> {
    let first = chunks.first().ok_or(BitsError::EmptyComposite)?;
    let (expected_width, expected_order) = (width(first), order(first));

    for (index, chunk) in chunks.iter().enumerate().skip(1) {
        let actual = width(chunk);
        if actual != expected_width {
            return Err(BitsError::ChunkWidth {
                index,
                expected: expected_width,
                actual,
            });
        }
        if order(chunk) != expected_order {
            return Err(BitsError::ChunkByteOrder { index });
        }
    }
    Ok((expected_width, expected_order))
}

/// Storage chunks presented as one storage
#[derive(Debug, Clone)]
pub struct LargeStorage<S> {
    chunks: Vec<S>,
    layout: ChunkLayout,
    width: u32,
    order: ByteOrder,
}

impl<S: Storage> LargeStorage<S> {
    /// Concatenate `chunks`
    ///
    /// Every chunk but the last must have the same length, the last may be
    /// shorter, and all of them must share word width and byte order.
    pub fn new(chunks: Vec<S>) -> BitsResult<Self> {
        let (width, order) = check_chunks(&chunks, |c| c.bit_width(), |c| c.byte_order())?;
        let lengths: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        let layout = ChunkLayout::new(&lengths)?;

        debug!(
            "large storage: {} chunks of {} words, {} words total",
            layout.chunks(),
            layout.chunk_len(),
            layout.len()
        );
        Ok(Self {
            chunks,
            layout,
            width,
            order,
        })
    }

    /// Build `total` words of storage from chunks of `capacity` words
    ///
    /// `factory` is called once per chunk with the length that chunk must
    /// have. A zero `total` still creates one empty chunk.
    pub fn allocate<F>(total: usize, capacity: usize, mut factory: F) -> BitsResult<Self>
    where
        F: FnMut(usize) -> S,
    {
        let layout = ChunkLayout::for_capacity(total, capacity)?;
        debug!(
            "allocating {} words in {} chunks of {}",
            total,
            layout.chunks(),
            capacity
        );

        let mut chunks = Vec::with_capacity(layout.chunks());
        for index in 0..layout.chunks() {
            let expected = layout.chunk_size(index);
            let chunk = factory(expected);
            if chunk.len() != expected {
                return Err(BitsError::ChunkLength {
                    index,
                    expected,
                    actual: chunk.len(),
                });
            }
            chunks.push(chunk);
        }
        Self::new(chunks)
    }

    pub fn layout(&self) -> &ChunkLayout {
        &self.layout
    }

    pub fn chunks(&self) -> &[S] {
        &self.chunks
    }

    pub fn chunk_mut(&mut self, index: usize) -> &mut S {
        &mut self.chunks[index]
    }

    pub fn into_chunks(self) -> Vec<S> {
        self.chunks
    }
}

impl<S: Storage> Storage for LargeStorage<S> {
    fn bit_width(&self) -> u32 {
        self.width
    }

    fn len(&self) -> usize {
        self.layout.len()
    }

    #[inline]
    fn get(&self, index: usize) -> u64 {
        let (chunk, offset) = self.layout.locate(index);
        self.chunks[chunk].get(offset)
    }

    #[inline]
    fn set(&mut self, index: usize, bits: u64) {
        let (chunk, offset) = self.layout.locate(index);
        self.chunks[chunk].set(offset, bits);
    }

    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn is_accelerable(&self) -> bool {
        self.chunks.iter().all(|c| c.is_accelerable())
    }

    fn copy_to(&self, start: usize, dst: &mut [u64]) {
        for span in self.layout.spans(start, dst.len()) {
            let dst = &mut dst[span.position..span.position + span.len];
            self.chunks[span.chunk].copy_to(span.offset, dst);
        }
    }

    fn copy_from(&mut self, start: usize, src: &[u64]) {
        for span in self.layout.spans(start, src.len()) {
            let src = &src[span.position..span.position + span.len];
            self.chunks[span.chunk].copy_from(span.offset, src);
        }
    }

    fn fill(&mut self, start: usize, count: usize, bits: u64) {
        for span in self.layout.spans(start, count) {
            self.chunks[span.chunk].fill(span.offset, span.len, bits);
        }
    }
}

/// Numeric views presented as one view
#[derive(Debug, Clone)]
pub struct LargeView<V> {
    chunks: Vec<V>,
    layout: ChunkLayout,
    width: u32,
    order: ByteOrder,
}

impl<V: NumericView> LargeView<V> {
    /// Concatenate `chunks` under the same rules as [`LargeStorage::new`]
    pub fn new(chunks: Vec<V>) -> BitsResult<Self> {
        let (width, order) = check_chunks(&chunks, |c| c.bit_width(), |c| c.byte_order())?;
        let lengths: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        let layout = ChunkLayout::new(&lengths)?;

        debug!(
            "large view: {} chunks of {} values, {} values total",
            layout.chunks(),
            layout.chunk_len(),
            layout.len()
        );
        Ok(Self {
            chunks,
            layout,
            width,
            order,
        })
    }

    pub fn layout(&self) -> &ChunkLayout {
        &self.layout
    }

    pub fn chunks(&self) -> &[V] {
        &self.chunks
    }

    pub fn chunk_mut(&mut self, index: usize) -> &mut V {
        &mut self.chunks[index]
    }

    pub fn into_chunks(self) -> Vec<V> {
        self.chunks
    }
}

impl<V: NumericView> NumericView for LargeView<V> {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn bit_width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn get_value(&self, index: usize) -> f64 {
        let (chunk, offset) = self.layout.locate(index);
        self.chunks[chunk].get_value(offset)
    }

    #[inline]
    fn set_value(&mut self, index: usize, value: f64) {
        let (chunk, offset) = self.layout.locate(index);
        self.chunks[chunk].set_value(offset, value);
    }

    fn byte_order(&self) -> ByteOrder {
        self.order
    }

    fn is_accelerable(&self) -> bool {
        self.chunks.iter().all(|c| c.is_accelerable())
    }

    fn get_values(&self, start: usize, out: &mut [f64]) {
        for span in self.layout.spans(start, out.len()) {
            let out = &mut out[span.position..span.position + span.len];
            self.chunks[span.chunk].get_values(span.offset, out);
        }
    }

    fn set_values(&mut self, start: usize, values: &[f64]) {
        for span in self.layout.spans(start, values.len()) {
            let values = &values[span.position..span.position + span.len];
            self.chunks[span.chunk].set_values(span.offset, values);
        }
    }
}
