use num::{Float, NumCast};
use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::{AddAssign, SubAssign},
};

/// Real-valued type used for centroid coordinates and distances.
pub trait Primitive: Float + NumCast + AddAssign + SubAssign + Sum
                + Default + Display + Debug + Send + Sync + 'static {
    /// Convert a cluster size into the value type, for averaging.
    fn from_count(count: usize) -> Self;
}
impl Primitive for f32 {
    #[inline(always)] fn from_count(count: usize) -> Self { count as f32 }
}
impl Primitive for f64 {
    #[inline(always)] fn from_count(count: usize) -> Self { count as f64 }
}
