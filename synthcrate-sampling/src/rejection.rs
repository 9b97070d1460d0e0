//! Bounded rejection sampling

use rand::Rng;

/// Outcome of one bounded rejection sampling run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<T> {
    /// The accepted candidate, or the last one drawn when the budget ran out
    pub value: T,
    /// Number of candidates drawn
    pub attempts: usize,
    /// Whether `value` satisfied the acceptance predicate
    pub accepted: bool,
}

/// Draws candidates until one passes an acceptance predicate or the attempt
/// budget is spent.
///
/// When every candidate is rejected the last one is returned with
/// `accepted == false`; callers decide whether that is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectionSampler {
    max_attempts: usize,
}

impl RejectionSampler {
    /// Create a sampler; a budget of zero is raised to one attempt
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Run the sampler with a candidate generator and an acceptance predicate
    pub fn sample<T, G, P>(&self, mut generate: G, mut accept: P) -> Sample<T>
    where
        G: FnMut() -> T,
        P: FnMut(&T) -> bool,
    {
        let mut attempts = 0;
        loop {
            let candidate = generate();
            attempts += 1;

            if accept(&candidate) {
                return Sample {
                    value: candidate,
                    attempts,
                    accepted: true,
                };
            }
            if attempts >= self.max_attempts {
                return Sample {
                    value: candidate,
                    attempts,
                    accepted: false,
                };
            }
        }
    }
}

impl Default for RejectionSampler {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Draw uniformly from the closed interval between `a` and `b`.
///
/// The endpoints may come in either order. An interval wider than
/// `f64::MAX` is sampled by interpolation, and a non-finite endpoint
/// collapses the interval onto the finite one, or onto zero.
pub fn uniform_between<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    match (lo.is_finite(), hi.is_finite()) {
        (true, true) => {}
        (true, false) => return lo,
        (false, true) => return hi,
        (false, false) => return 0.0,
    }

    if (hi - lo).is_finite() {
        rng.gen_range(lo..=hi)
    } else {
        let t: f64 = rng.gen();
        (lo * (1.0 - t) + hi * t).clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_accepts_first_passing_candidate() {
        let mut next = 0;
        let sample = RejectionSampler::new(10).sample(
            || {
                next += 1;
                next
            },
            |&value| value % 4 == 0,
        );
        assert_eq!(sample.value, 4);
        assert_eq!(sample.attempts, 4);
        assert!(sample.accepted);
    }

    #[test]
    fn test_budget_exhaustion_returns_last_candidate() {
        let mut next = 0;
        let sample = RejectionSampler::new(5).sample(
            || {
                next += 1;
                next
            },
            |_| false,
        );
        assert_eq!(sample.value, 5);
        assert_eq!(sample.attempts, 5);
        assert!(!sample.accepted);
    }

    #[test]
    fn test_zero_budget_draws_once() {
        let sampler = RejectionSampler::new(0);
        assert_eq!(sampler.max_attempts(), 1);
        let sample = sampler.sample(|| 7, |_| false);
        assert_eq!(sample.attempts, 1);
        assert_eq!(sample.value, 7);
    }

    #[test]
    fn test_uniform_between_matches_gen_range() {
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(uniform_between(&mut a, -2.0, 5.0), b.gen_range(-2.0..=5.0));
        }
    }

    #[test]
    fn test_uniform_between_swaps_inverted_endpoints() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let value = uniform_between(&mut rng, 2.0, -2.0);
            assert!((-2.0..=2.0).contains(&value));
        }
    }

    #[test]
    fn test_uniform_between_overflowing_span() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let value = uniform_between(&mut rng, -1e308, 1e308);
            assert!(value.is_finite());
            assert!((-1e308..=1e308).contains(&value));
        }
        let value = uniform_between(&mut rng, -f64::MAX, f64::MAX);
        assert!(value.is_finite());
    }

    #[test]
    fn test_uniform_between_non_finite_endpoints() {
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(uniform_between(&mut rng, f64::NEG_INFINITY, 1.5), 1.5);
        assert_eq!(uniform_between(&mut rng, -0.5, f64::NAN), -0.5);
        assert_eq!(uniform_between(&mut rng, f64::NAN, f64::INFINITY), 0.0);
        assert_eq!(uniform_between(&mut rng, 3.0, 3.0), 3.0);
    }
}
