use crate::distances::cast_to_raw;
use crate::{DistanceFunction, Primitive};
use num::traits::AsPrimitive;

/// Earth mover's distance between two 1-D histograms, computed as the L1 distance of
/// their cumulative sums. Suited for samples that are bin counts.
#[derive(Clone, Copy, Debug, Default)]
pub struct HistogramDistance;

impl<R, T> DistanceFunction<R, T> for HistogramDistance
where
    R: AsPrimitive<T>,
    T: Primitive + AsPrimitive<R>,
{
    #[inline(always)]
    fn to_value(&self, raw: R) -> T {
        raw.as_()
    }

    fn from_value(&self, value: T) -> Option<R> {
        Some(cast_to_raw(value))
    }

    #[inline(always)]
    fn distance(&self, point: &[R], centroid: &[T]) -> T {
        let mut total = T::zero();
        let mut cdf_a = T::zero();
        let mut cdf_b = T::zero();
        for (&x, &y) in point.iter().zip(centroid.iter()) {
            cdf_a += x.as_();
            cdf_b += y;
            total += (cdf_a - cdf_b).abs();
        }
        total
    }
}
