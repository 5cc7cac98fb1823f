//! Random target generation.

use rand::Rng;

use super::Target;

/// Generates `count` targets uniformly in `[0, width) × [0, height)`.
///
/// Ids are assigned sequentially from 0. Intended for the placement layer;
/// interactive placement can construct [`Target`] values directly instead.
///
/// # Panics
///
/// Panics if `width` or `height` is not positive.
///
/// # Examples
///
/// ```
/// use bitour::models::generate_targets;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let targets = generate_targets(10, 840.0, 680.0, &mut rng);
/// assert_eq!(targets.len(), 10);
/// assert!(targets.iter().all(|t| t.position().x() < 840.0));
/// ```
pub fn generate_targets<R: Rng>(count: usize, width: f64, height: f64, rng: &mut R) -> Vec<Target> {
    (0..count)
        .map(|id| {
            Target::new(
                id,
                rng.random_range(0.0..width),
                rng.random_range(0.0..height),
            )
        })
        .collect()
}
