use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sd_core::core::RandomSource;

// ---------------------------------------------------------------------------
// RngSource — rand-backed RandomSource
// ---------------------------------------------------------------------------

pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Seeded when `seed` is given, otherwise seeded from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self {
                rng: StdRng::from_os_rng(),
            },
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        let picks_a: Vec<usize> = (0..20).map(|_| a.pick_index(7)).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.pick_index(7)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_picks_stay_in_range() {
        let mut source = RngSource::new(None);
        for len in [1, 2, 5, 100] {
            for _ in 0..50 {
                assert!(source.pick_index(len) < len);
            }
        }
    }

    #[test]
    fn test_single_item_always_zero() {
        let mut source = RngSource::seeded(1);
        assert!((0..10).all(|_| source.pick_index(1) == 0));
    }
}
