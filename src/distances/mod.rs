mod closure;
mod euclideandistance;
mod histogramdistance;

pub use closure::FnDistance;
pub use euclideandistance::EuclideanDistance;
pub use histogramdistance::HistogramDistance;

use crate::errors::{ArgumentError, Result};
use crate::Primitive;
use num::traits::AsPrimitive;

/// The metric used to compare raw samples with real-valued centroids.
///
/// ## Generics
/// - **R**: Raw component type of the samples (e.g. [`u8`] for pixel shades)
/// - **T**: Value type of the centroid coordinates ([`f32`] or [`f64`])
///
/// Implementors only have to provide [`DistanceFunction::to_value`]; the default
/// [`DistanceFunction::distance`] is the squared euclidean distance on converted values.
/// Any distance must be non-negative and zero iff the converted sample equals the centroid.
pub trait DistanceFunction<R: Copy, T: Primitive>: Sync {
    /// Convert a raw sample component into centroid space.
    fn to_value(&self, raw: R) -> T;

    /// Convert a centroid component back into the raw type (e.g. a palette of pixel shades).
    /// Returns [`None`] if the metric has no inverse, which is the default.
    fn from_value(&self, _value: T) -> Option<R> {
        None
    }

    /// Distance between a raw sample and a centroid of the same dimensionality.
    #[inline(always)]
    fn distance(&self, point: &[R], centroid: &[T]) -> T {
        point.iter().cloned()
            .zip(centroid.iter().cloned())
            .map(|(p, c)| self.to_value(p) - c)
            .map(|v| v * v)
            .fold(T::zero(), |acc, v| acc + v)
    }
}

/// `as`-style cast of a centroid component into the raw type. Rounds to the nearest value for
/// raw types without a fractional part, and saturates at their bounds.
pub(crate) fn cast_to_raw<R, T>(value: T) -> R
where
    R: AsPrimitive<T>,
    T: Primitive + AsPrimitive<R>,
{
    let half = T::from_count(1) / T::from_count(2);
    let half_raw: R = half.as_();
    let back: T = half_raw.as_();
    if back == half { value.as_() } else { value.round().as_() }
}

/// Index and distance of the centroid closest to **point**. Ties go to the lowest index.
/// **centroids** is row-major with rows of `point.len()` values and must hold at least one row.
pub(crate) fn closest_centroid<R, T, D>(metric: &D, point: &[R], centroids: &[T]) -> (usize, T)
where
    R: Copy,
    T: Primitive,
    D: DistanceFunction<R, T> + ?Sized,
{
    let mut rows = centroids.chunks_exact(point.len());
    let first = rows.next().map_or(T::infinity(), |c| metric.distance(point, c));
    rows.enumerate().fold((0, first), |(best_idx, best_dist), (i, c)| {
        let dist = metric.distance(point, c);
        if dist < best_dist { (i + 1, dist) } else { (best_idx, best_dist) }
    })
}

/// Classify **point** against an already fitted, row-major list of **centroids**.
///
/// ## Returns
/// The index of the centroid minimizing the metric's distance (lowest index on ties).
pub fn nearest_centroid<R, T, D>(metric: &D, point: &[R], centroids: &[T]) -> Result<usize>
where
    R: Copy,
    T: Primitive,
    D: DistanceFunction<R, T> + ?Sized,
{
    if point.is_empty() {
        return Err(ArgumentError::ZeroDimensions.into());
    }
    if centroids.is_empty() {
        return Err(ArgumentError::NoCentroids.into());
    }
    if centroids.len() % point.len() != 0 {
        return Err(ArgumentError::CentroidShape { len: centroids.len(), sample_dims: point.len() }.into());
    }
    Ok(closest_centroid(metric, point, centroids).0)
}

/// Distance between **point** and a single **centroid**, for external diagnostics.
pub fn centroid_distance<R, T, D>(metric: &D, point: &[R], centroid: &[T]) -> Result<T>
where
    R: Copy,
    T: Primitive,
    D: DistanceFunction<R, T> + ?Sized,
{
    if point.len() != centroid.len() {
        return Err(ArgumentError::DimensionMismatch { expected: point.len(), found: centroid.len() }.into());
    }
    Ok(metric.distance(point, centroid))
}
