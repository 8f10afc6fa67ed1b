// ============================================================
// Layer 4 — Random Sampler
// ============================================================
// Draws question ids at random for an extracted subset.
//
// Sampling is WITH replacement: the same id may be drawn
// more than once, and asking for more ids than exist is
// fine. The extraction step works on the set of drawn ids,
// so repeats simply shrink the subset a little.
//
// A fixed seed makes an extraction reproducible; without
// one the generator is seeded from OS entropy.
//
// Reference: rand crate documentation (SliceRandom, StdRng)

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Build the generator used for one extraction run.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    }
}

/// Draw `k` items uniformly at random, with replacement.
///
/// # Returns
/// A Vec of exactly `k` items, or an empty Vec if `items` is empty.
///
/// # Example
/// ```ignore
/// let mut rng = seeded_rng(Some(7));
/// let picked  = sample_with_replacement(&[1, 2, 3], 5, &mut rng);
/// assert_eq!(picked.len(), 5);
/// ```
pub fn sample_with_replacement<T, R>(items: &[T], k: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if items.is_empty() {
        tracing::debug!("Nothing to sample from, returning empty sample");
        return Vec::new();
    }

    // choose() only returns None for an empty slice, handled above
    (0..k).filter_map(|_| items.choose(rng).cloned()).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_size_is_k() {
        let mut rng = seeded_rng(Some(1));
        let items: Vec<u64> = (0..100).collect();
        assert_eq!(sample_with_replacement(&items, 50, &mut rng).len(), 50);
    }

    #[test]
    fn test_k_larger_than_population() {
        // With replacement, asking for more than exists still works
        let mut rng = seeded_rng(Some(2));
        let picked  = sample_with_replacement(&[1u64, 2, 3], 10, &mut rng);
        assert_eq!(picked.len(), 10);
        assert!(picked.iter().all(|id| [1, 2, 3].contains(id)));
    }

    #[test]
    fn test_empty_population() {
        let mut rng = seeded_rng(Some(3));
        let picked  = sample_with_replacement::<u64, _>(&[], 10, &mut rng);
        assert!(picked.is_empty());
    }

    #[test]
    fn test_same_seed_same_sample() {
        let items: Vec<u64> = (0..1000).collect();
        let a = sample_with_replacement(&items, 20, &mut seeded_rng(Some(42)));
        let b = sample_with_replacement(&items, 20, &mut seeded_rng(Some(42)));
        assert_eq!(a, b);
    }
}
