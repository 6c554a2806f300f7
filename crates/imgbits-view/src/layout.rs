//! Chunk arithmetic for large composites

use imgbits_core::{consts::MAX_CHUNK_LEN, BitsError, BitsResult};
use imgbits_storage::{check_index, check_range};
use log::trace;

/// Lengths of the chunks making up a large composite
///
/// Every chunk but the last holds exactly `chunk_len` elements; the last
/// holds between 0 and `chunk_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLayout {
    chunk_len: usize,
    chunks: usize,
    len: usize,
}

impl ChunkLayout {
    /// Validate a sequence of chunk lengths
    pub fn new(lengths: &[usize]) -> BitsResult<Self> {
        let (&last, init) = lengths.split_last().ok_or(BitsError::EmptyComposite)?;
        // a lone empty chunk still gets a nonzero stride
        let chunk_len = init.first().copied().unwrap_or(last).max(1);

        for (index, &actual) in init.iter().enumerate() {
            if actual != chunk_len {
                return Err(BitsError::ChunkLength {
                    index,
                    expected: chunk_len,
                    actual,
                });
            }
        }
        if last > chunk_len {
            return Err(BitsError::ChunkLength {
                index: init.len(),
                expected: chunk_len,
                actual: last,
            });
        }

        Ok(Self {
            chunk_len,
            chunks: lengths.len(),
            len: chunk_len * init.len() + last,
        })
    }

    /// Layout of `total` elements split into chunks of `capacity`
    pub fn for_capacity(total: usize, capacity: usize) -> BitsResult<Self> {
        if capacity == 0 || capacity > MAX_CHUNK_LEN {
            return Err(BitsError::InvalidParameter(format!(
                "chunk capacity must be in 1..={}, got {}",
                MAX_CHUNK_LEN, capacity
            )));
        }
        let chunks = total.div_ceil(capacity).max(1);
        Ok(Self {
            chunk_len: capacity,
            chunks,
            len: total,
        })
    }

    /// Capacity of every chunk but the last
    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    pub fn chunks(&self) -> usize {
        self.chunks
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of chunk `chunk`
    pub fn chunk_size(&self, chunk: usize) -> usize {
        if chunk + 1 < self.chunks {
            self.chunk_len
        } else {
            self.len - self.chunk_len * (self.chunks - 1)
        }
    }

    #[inline]
    pub fn index_to_chunk(&self, index: usize) -> usize {
        index / self.chunk_len
    }

    #[inline]
    pub fn index_to_offset(&self, index: usize) -> usize {
        index % self.chunk_len
    }

    /// Chunk and offset of element `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    #[track_caller]
    pub fn locate(&self, index: usize) -> (usize, usize) {
        check_index(index, self.len);
        (self.index_to_chunk(index), self.index_to_offset(index))
    }

    /// Split `start..start + len` into pieces that stay within one chunk
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the layout.
    #[track_caller]
    pub fn spans(&self, start: usize, len: usize) -> ChunkSpans {
        check_range(start, len, self.len);
        ChunkSpans {
            chunk_len: self.chunk_len,
            start,
            remaining: len,
            position: 0,
        }
    }
}

/// One piece of a range, clipped to a single chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpan {
    pub chunk: usize,
    /// First element within the chunk
    pub offset: usize,
    pub len: usize,
    /// Position of the piece within the requested range
    pub position: usize,
}

/// Iterator over the [`ChunkSpan`]s of a range, in ascending order
#[derive(Debug, Clone)]
pub struct ChunkSpans {
    chunk_len: usize,
    start: usize,
    remaining: usize,
    position: usize,
}

impl Iterator for ChunkSpans {
    type Item = ChunkSpan;

    fn next(&mut self) -> Option<ChunkSpan> {
        if self.remaining == 0 {
            return None;
        }

        let chunk = self.start / self.chunk_len;
        let offset = self.start % self.chunk_len;
        let len = self.remaining.min(self.chunk_len - offset);
        let span = ChunkSpan {
            chunk,
            offset,
            len,
            position: self.position,
        };
        trace!(
            "chunk span: chunk {} offset {} len {} at {}",
            chunk,
            offset,
            len,
            self.position
        );

        self.start += len;
        self.remaining -= len;
        self.position += len;
        Some(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_routing() {
        let layout = ChunkLayout::new(&[100, 100, 40]).unwrap();
        assert_eq!(layout.len(), 240);
        assert_eq!(layout.locate(150), (1, 50));
        assert_eq!(layout.locate(239), (2, 39));
        assert_eq!(layout.locate(0), (0, 0));
        assert_eq!(layout.chunk_size(2), 40);
    }

    #[test]
    fn test_spans_split_at_boundaries() {
        let layout = ChunkLayout::new(&[100, 100, 40]).unwrap();
        let spans: Vec<_> = layout.spans(90, 120).map(|s| (s.chunk, s.offset, s.len)).collect();
        assert_eq!(spans, [(0, 90, 10), (1, 0, 100), (2, 0, 10)]);

        let positions: Vec<_> = layout.spans(90, 120).map(|s| s.position).collect();
        assert_eq!(positions, [0, 10, 110]);
    }

    #[test]
    fn test_span_within_one_chunk() {
        let layout = ChunkLayout::new(&[100, 100, 40]).unwrap();
        let spans: Vec<_> = layout.spans(200, 40).collect();
        assert_eq!(
            spans,
            [ChunkSpan {
                chunk: 2,
                offset: 0,
                len: 40,
                position: 0
            }]
        );
        assert_eq!(layout.spans(17, 0).count(), 0);
    }

    #[test]
    fn test_single_chunk() {
        let layout = ChunkLayout::new(&[7]).unwrap();
        assert_eq!(layout.chunk_len(), 7);
        assert_eq!(layout.chunks(), 1);
        assert_eq!(layout.locate(6), (0, 6));
    }

    #[test]
    fn test_invalid_lengths() {
        assert_eq!(ChunkLayout::new(&[]), Err(BitsError::EmptyComposite));
        assert_eq!(
            ChunkLayout::new(&[100, 90, 40]),
            Err(BitsError::ChunkLength {
                index: 1,
                expected: 100,
                actual: 90
            })
        );
        assert_eq!(
            ChunkLayout::new(&[100, 100, 140]),
            Err(BitsError::ChunkLength {
                index: 2,
                expected: 100,
                actual: 140
            })
        );
        assert!(ChunkLayout::new(&[0, 0]).is_err());
    }

    #[test]
    fn test_for_capacity() {
        let layout = ChunkLayout::for_capacity(250, 100).unwrap();
        assert_eq!(layout.chunks(), 3);
        assert_eq!(layout.chunk_size(2), 50);

        let empty = ChunkLayout::for_capacity(0, 100).unwrap();
        assert_eq!(empty.chunks(), 1);
        assert_eq!(empty.chunk_size(0), 0);

        assert!(ChunkLayout::for_capacity(10, 0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_locate_past_end() {
        ChunkLayout::new(&[100, 100, 40]).unwrap().locate(240);
    }
}
