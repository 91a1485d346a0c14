//! Weight vector operations for the genetic algorithm.
//!
//! - **Initialization**: [`random`] draws a reward for cleared lines and penalties for the
//!   three board features
//! - **Crossover**: [`crossover`] takes the component-wise mean of two parents
//! - **Mutation**: [`mutate`] adds Gaussian noise to randomly chosen components
//!
//! Weights are left unbounded and unnormalized; mutation may flip a sign.

use std::ops::Range;

use rand::Rng;
use rand_distr::Normal;
use tetrevo_evaluator::HeuristicWeights;

/// Initial range of the cleared-lines weight.
pub const REWARD_RANGE: Range<f64> = 0.1..1.0;

/// Initial range of the height, holes and bumpiness weights.
pub const PENALTY_RANGE: Range<f64> = -1.0..-0.1;

/// Generates random initial weights.
///
/// The cleared-lines weight is drawn from [`REWARD_RANGE`], the other three from
/// [`PENALTY_RANGE`], in the order lines, height, holes, bumpiness.
///
/// ```
/// use rand::SeedableRng;
/// use rand_pcg::Pcg32;
/// use tetrevo_training::weights;
///
/// let w = weights::random(&mut Pcg32::seed_from_u64(0));
/// assert!(w.lines > 0.0);
/// assert!(w.height < 0.0 && w.holes < 0.0 && w.bumpiness < 0.0);
/// ```
pub fn random<R>(rng: &mut R) -> HeuristicWeights
where
    R: Rng + ?Sized,
{
    HeuristicWeights::from_fn(|i| {
        if i == 0 {
            rng.random_range(REWARD_RANGE)
        } else {
            rng.random_range(PENALTY_RANGE)
        }
    })
}

/// Returns the component-wise arithmetic mean of two parents.
#[must_use]
pub fn crossover(p1: &HeuristicWeights, p2: &HeuristicWeights) -> HeuristicWeights {
    let (a, b) = (p1.to_array(), p2.to_array());
    HeuristicWeights::from_fn(|i| f64::midpoint(a[i], b[i]))
}

/// Applies Gaussian mutation in place.
///
/// Each component independently, with probability `rate`, gets a sample of
/// `N(0, strength)` added to it.
///
/// # Panics
///
/// Panics if `rate` is outside `[0, 1]` or `strength` is negative or not finite.
pub fn mutate<R>(weights: &mut HeuristicWeights, rate: f64, strength: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, strength).unwrap();
    let mut values = weights.to_array();
    for w in &mut values {
        if rng.random_bool(rate) {
            *w += rng.sample(normal);
        }
    }
    *weights = HeuristicWeights::from_array(values);
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_random_signs() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..1000 {
            let w = random(&mut rng);
            assert!(REWARD_RANGE.contains(&w.lines), "{w}");
            for penalty in [w.height, w.holes, w.bumpiness] {
                assert!(PENALTY_RANGE.contains(&penalty), "{w}");
            }
        }
    }

    #[test]
    fn test_crossover_is_mean() {
        let a = HeuristicWeights::new(1.0, -1.0, 0.5, -0.25);
        let b = HeuristicWeights::new(0.0, -0.5, -0.5, -0.75);
        assert_eq!(
            crossover(&a, &b),
            HeuristicWeights::new(0.5, -0.75, 0.0, -0.5)
        );
        assert_eq!(crossover(&a, &a), a);
    }

    #[test]
    fn test_mutate_rate_bounds() {
        let mut rng = Pcg32::seed_from_u64(2);
        let initial = HeuristicWeights::new(0.5, -0.5, -0.5, -0.5);

        let mut w = initial;
        mutate(&mut w, 0.0, 0.5, &mut rng);
        assert_eq!(w, initial);

        let mut w = initial;
        mutate(&mut w, 1.0, 0.5, &mut rng);
        for (before, after) in std::iter::zip(initial.to_array(), w.to_array()) {
            assert!((before - after).abs() > 0.0);
        }
    }

    #[test]
    fn test_mutate_zero_strength_is_identity() {
        let mut rng = Pcg32::seed_from_u64(3);
        let initial = HeuristicWeights::new(0.3, -0.2, -0.1, -0.4);
        let mut w = initial;
        mutate(&mut w, 1.0, 0.0, &mut rng);
        assert_eq!(w, initial);
    }
}
