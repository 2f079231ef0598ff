//! Card number generation.

use cardledger_shared::types::CardNumber;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of candidate card numbers.
///
/// Candidates need not be unique; the registry rejects collisions and draws
/// again.
pub trait CardNumberSource: Send {
    /// Draws the next candidate.
    fn next_number(&mut self) -> CardNumber;
}

/// Uniformly random 16-digit card numbers.
#[derive(Debug)]
pub struct RandomCardNumbers {
    rng: StdRng,
}

impl RandomCardNumbers {
    /// Seeds from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for tests and benchmarks.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomCardNumbers {
    fn default() -> Self {
        Self::new()
    }
}

impl CardNumberSource for RandomCardNumbers {
    fn next_number(&mut self) -> CardNumber {
        CardNumber::from_u64(self.rng.gen_range(0..CardNumber::SPACE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_have_sixteen_digits() {
        let mut source = RandomCardNumbers::new();
        for _ in 0..1_000 {
            let number = source.next_number();
            assert_eq!(number.as_str().len(), CardNumber::LEN);
            assert!(number.as_str().bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomCardNumbers::seeded(7);
        let mut b = RandomCardNumbers::seeded(7);
        for _ in 0..10 {
            assert_eq!(a.next_number(), b.next_number());
        }
    }
}
