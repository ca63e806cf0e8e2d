use rand::Rng;

/// Pluggable choice among equally-eligible candidate questions.
///
/// The scheduler narrows the bank down to the eligible candidates and asks
/// the policy for an index. Production sessions use [`UniformRandom`];
/// tests inject [`FirstCandidate`] for determinism.
pub trait SelectionPolicy {
    /// Pick an index in `0..candidates`. Never called with zero candidates.
    fn pick(&mut self, candidates: usize) -> usize;
}

/// Uniform random pick, the default production policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandom;

impl SelectionPolicy for UniformRandom {
    fn pick(&mut self, candidates: usize) -> usize {
        rand::rng().random_range(0..candidates)
    }
}

/// Always picks the first candidate; deterministic, for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl SelectionPolicy for FirstCandidate {
    fn pick(&mut self, _candidates: usize) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_random_stays_in_bounds() {
        let mut policy = UniformRandom;
        for n in 1..=10 {
            for _ in 0..50 {
                assert!(policy.pick(n) < n);
            }
        }
    }

    #[test]
    fn first_candidate_is_deterministic() {
        let mut policy = FirstCandidate;
        assert_eq!(policy.pick(1), 0);
        assert_eq!(policy.pick(7), 0);
    }
}
