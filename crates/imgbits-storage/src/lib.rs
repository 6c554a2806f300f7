//! Fixed-width word storage for imgbits
//!
//! This crate defines the [`Storage`] contract every codec reads and writes
//! through, a few minimal backends implementing it, and the adapters that
//! recompose the words of one backend into wider or narrower words in a
//! chosen byte order.

pub mod compose;
pub mod memory;
pub mod packed;
pub mod storage;

pub use compose::{WordComposer, WordSplitter};
pub use memory::{MemoryStorage, SliceStorage, StorageWord};
pub use packed::PackedStorage;
pub use storage::{check_index, check_range, shared, Shared, Storage};
