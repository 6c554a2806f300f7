//! # imgbits
//!
//! Storage and interpretation of fixed-width binary words as numeric values.
//!
//! ## Quick Start
//!
//! ### Half floats stored as big-endian bytes
//!
//! ```
//! use imgbits::{presets, ByteOrder, MemoryStorage, NumericView, ReprView, WordComposer};
//!
//! let bytes = MemoryStorage::from_vec(vec![0x3Cu8, 0x00, 0x00, 0x00], ByteOrder::BigEndian);
//! let words = WordComposer::new(bytes, 2, ByteOrder::BigEndian).unwrap();
//! let mut view = ReprView::new(words, &*presets::FLOAT16).unwrap();
//!
//! assert_eq!(view.get_value(0), 1.0);
//! view.set_value(1, -2.0);
//! assert_eq!(view.storage().backend().as_slice(), &[0x3C, 0x00, 0xC0, 0x00]);
//! ```
//!
//! ### A codec from configuration
//!
//! ```
//! use imgbits::{BitCodec, ReprConfig, ReprKind};
//!
//! let codec = ReprConfig::new(ReprKind::UnsignedNormalized).bits(8).build().unwrap();
//! assert_eq!(codec.to_bits(1.0), 255);
//! ```
//!
//! ## Layers
//!
//! - [`Storage`] backends hold words of 1 to 64 bits: [`MemoryStorage`],
//!   [`SliceStorage`] and [`PackedStorage`], plus [`WordComposer`] and
//!   [`WordSplitter`] to change the word width under either byte order.
//! - [`BitCodec`] implementations map words to `f64` and back: integers,
//!   normalized integers, custom floats, IEEE floats and shared exponents.
//! - [`NumericView`] implementations bind the two: [`ReprView`],
//!   [`RangeAdapter`], [`SharedExponentView`] and [`LargeView`].
//! - [`LargeStorage`] and [`LargeView`] concatenate chunks whose own index
//!   range is bounded.

pub use imgbits_core::{consts, low_mask, BitsError, BitsResult, ByteOrder};

pub use imgbits_storage::{
    shared, MemoryStorage, PackedStorage, Shared, SliceStorage, Storage, StorageWord,
    WordComposer, WordSplitter,
};

pub use imgbits_repr::{
    presets, round_nearest_even, Acceleration, BinaryRepresentation, BitCodec, Float32Codec,
    Float64Codec, FloatCodec, IntegerCodec, NormalizedCodec, ReprConfig, ReprKind,
    SharedExponentCodec,
};

pub use imgbits_view::{
    ChunkLayout, ChunkSpan, ChunkSpans, LargeStorage, LargeView, NumericView, RangeAdapter,
    ReprView, SharedExponentView,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
