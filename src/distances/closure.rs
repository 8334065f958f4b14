use crate::{DistanceFunction, Primitive};

/// Metric assembled from a pair of closures, e.g. a weighted distance or a categorical encoding.
///
/// ## Example
/// ```rust
/// use kmeans_consensus::*;
///
/// // Weight the second dimension ten times as much as the first
/// let metric = FnDistance::new(
///     |p: &[u8], c: &[f64]| (p[0] as f64 - c[0]).powi(2) + 10.0 * (p[1] as f64 - c[1]).powi(2),
///     |raw: u8| raw as f64,
/// );
/// let (point, centroid) = ([1u8, 1], [0.0f64, 0.0]);
/// assert_eq!(metric.distance(&point, &centroid), 11.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnDistance<F, V> {
    distance: F,
    to_value: V,
}
impl<F, V> FnDistance<F, V> {
    pub fn new(distance: F, to_value: V) -> Self {
        Self { distance, to_value }
    }
}

impl<R, T, F, V> DistanceFunction<R, T> for FnDistance<F, V>
where
    R: Copy,
    T: Primitive,
    F: Fn(&[R], &[T]) -> T + Sync,
    V: Fn(R) -> T + Sync,
{
    #[inline(always)]
    fn to_value(&self, raw: R) -> T {
        (self.to_value)(raw)
    }

    #[inline(always)]
    fn distance(&self, point: &[R], centroid: &[T]) -> T {
        (self.distance)(point, centroid)
    }
}
