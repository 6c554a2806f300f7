//! Rescaling an integer-valued view into another numeric domain

use crate::view::NumericView;
use imgbits_core::{BitsError, BitsResult, ByteOrder};

/// Maps raw integer values `r` of an inner view to `r * domain_max / raw_max`
///
/// Reads never clamp. Writes clamp to `[domain_min, domain_max]`, scale back
/// to the raw range and round to the nearest integer before writing through
/// the inner view.
#[derive(Debug, Clone)]
pub struct RangeAdapter<V> {
    inner: V,
    domain_min: f64,
    domain_max: f64,
    to_domain: f64,
    to_raw: f64,
}

impl<V: NumericView> RangeAdapter<V> {
    pub fn new(inner: V, raw_max: f64, domain_min: f64, domain_max: f64) -> BitsResult<Self> {
        if !(raw_max.is_finite() && raw_max > 0.0) {
            return Err(BitsError::InvalidParameter(format!(
                "raw maximum must be positive and finite, got {}",
                raw_max
            )));
        }
        if !(domain_min <= domain_max && domain_max.is_finite() && domain_max > 0.0) {
            return Err(BitsError::InvalidParameter(format!(
                "invalid domain [{}, {}]",
                domain_min, domain_max
            )));
        }

        Ok(Self {
            inner,
            domain_min,
            domain_max,
            to_domain: domain_max / raw_max,
            to_raw: raw_max / domain_max,
        })
    }

    /// Unsigned integers `[0, raw_max]` as `[0, 1]`
    pub fn unorm(inner: V, raw_max: f64) -> BitsResult<Self> {
        Self::new(inner, raw_max, 0.0, 1.0)
    }

    /// Signed integers `[-raw_max, raw_max]` as `[-1, 1]`
    pub fn snorm(inner: V, raw_max: f64) -> BitsResult<Self> {
        Self::new(inner, raw_max, -1.0, 1.0)
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut V {
        &mut self.inner
    }

    pub fn into_inner(self) -> V {
        self.inner
    }

    #[inline]
    fn to_domain(&self, raw: f64) -> f64 {
        raw * self.to_domain
    }

    #[inline]
    fn to_raw(&self, value: f64) -> f64 {
        (value.clamp(self.domain_min, self.domain_max) * self.to_raw).round()
    }
}

impl<V: NumericView> NumericView for RangeAdapter<V> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn bit_width(&self) -> u32 {
        self.inner.bit_width()
    }

    #[inline]
    fn get_value(&self, index: usize) -> f64 {
        self.to_domain(self.inner.get_value(index))
    }

    #[inline]
    fn set_value(&mut self, index: usize, value: f64) {
        let raw = self.to_raw(value);
        self.inner.set_value(index, raw);
    }

    fn byte_order(&self) -> ByteOrder {
        self.inner.byte_order()
    }

    fn is_accelerable(&self) -> bool {
        self.inner.is_accelerable()
    }

    fn get_values(&self, start: usize, out: &mut [f64]) {
        self.inner.get_values(start, out);
        for value in out.iter_mut() {
            *value = self.to_domain(*value);
        }
    }

    fn set_values(&mut self, start: usize, values: &[f64]) {
        let raw: Vec<f64> = values.iter().map(|&value| self.to_raw(value)).collect();
        self.inner.set_values(start, &raw);
    }
}
