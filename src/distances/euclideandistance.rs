use crate::distances::cast_to_raw;
use crate::{DistanceFunction, Primitive};
use num::traits::AsPrimitive;

/// Squared euclidean distance, with raw components cast directly into centroid space.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanDistance;

impl<R, T> DistanceFunction<R, T> for EuclideanDistance
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
}
