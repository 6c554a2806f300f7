//! Numeric views over word storage
//!
//! A [`NumericView`] exposes a storage backend as a sequence of `f64`
//! values. [`ReprView`] binds one binary representation to one backend,
//! [`RangeAdapter`] rescales another view into a normalized domain,
//! [`SharedExponentView`] addresses the components of shared-exponent
//! words, and [`LargeStorage`] / [`LargeView`] concatenate bounded chunks
//! into one sequence.

pub mod large;
pub mod layout;
pub mod range;
pub mod shared_exponent;
pub mod view;

pub use large::{LargeStorage, LargeView};
pub use layout::{ChunkLayout, ChunkSpan, ChunkSpans};
pub use range::RangeAdapter;
pub use shared_exponent::SharedExponentView;
pub use view::{NumericView, ReprView};
