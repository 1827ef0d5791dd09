use crate::error::Result;
use crate::individual::Individual;

/// A fitness function together with the problem context it needs.
///
/// Scoring must be a pure function of the individual's genome and the context held
/// by the challenge, because populations may be scored from several threads at once.
/// Higher scores are better and must be finite.
pub trait Challenge: Send + Sync {
    fn score(&self, individual: &Individual) -> Result<f64>;
}
