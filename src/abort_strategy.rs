use crate::Primitive;

/// Enum with possible abort strategies for the automatic k-selection (elbow search).
/// After each evaluated k, the strategy decides whether raising k any further is still worth it.
/// When it aborts, the result for the previous k is returned.
#[derive(Clone, Copy, Debug)]
pub enum AbortStrategy<T: Primitive> {
    /// Abort as soon as the reduction in average distance gained by the new k is smaller than
    /// `tolerance` times the new average distance.
    /// ## Fields:
    /// - **tolerance**: Relative tolerance (e.g. `0.1` for 10%)
    RelativeImprovement { tolerance: T },
    /// Abort as soon as the reduction in average distance gained by the new k is not larger than
    /// `threshold`.
    /// ## Fields:
    /// - **threshold**: Absolute threshold, used to detect an improvement (`improvement > threshold`)
    NoImprovement { threshold: T },
}
impl<T: Primitive> Default for AbortStrategy<T> {
    fn default() -> Self {
        AbortStrategy::RelativeImprovement { tolerance: T::from(0.1).unwrap_or_else(T::zero) }
    }
}
impl<T: Primitive> AbortStrategy<T> {
    pub(crate) fn create_logic(&self) -> Box<dyn AbortStrategyLogic<T>> {
        match *self {
            AbortStrategy::RelativeImprovement { tolerance } => Box::new(RelativeImprovementLogic {
                tolerance,
                prev_error: T::infinity(),
            }),
            AbortStrategy::NoImprovement { threshold } => Box::new(NoImprovementLogic {
                threshold,
                prev_error: T::infinity(),
            }),
        }
    }
}

pub(crate) trait AbortStrategyLogic<T: Primitive> {
    /// Function that has to be called once a new k was evaluated.
    /// ## Arguments
    /// - **error**: The average distance of the result for the new k
    /// ## Returns
    /// - **true** if the search should continue
    /// - **false** if the search should abort
    fn next(&mut self, error: T) -> bool;
}


pub(crate) struct RelativeImprovementLogic<T: Primitive> {
    tolerance: T,
    prev_error: T,
}
impl<T: Primitive> AbortStrategyLogic<T> for RelativeImprovementLogic<T> {
    fn next(&mut self, error: T) -> bool {
        let improvement = self.prev_error - error;
        self.prev_error = error;
        !(improvement < self.tolerance * error)
    }
}


pub(crate) struct NoImprovementLogic<T: Primitive> {
    threshold: T,
    prev_error: T,
}
impl<T: Primitive> AbortStrategyLogic<T> for NoImprovementLogic<T> {
    fn next(&mut self, error: T) -> bool {
        let improvement = self.prev_error - error;
        self.prev_error = error;
        improvement > self.threshold
    }
}
