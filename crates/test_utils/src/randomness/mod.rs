//! Deterministic randomness for reproducible tests

use cosio_types::app::Name;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Deterministic random value generator for tests
pub struct TestRng {
    /// Internal RNG with fixed seed
    rng: StdRng,
}

impl TestRng {
    /// Create a new test RNG with the specified seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a test RNG with the default seed 12345
    pub fn with_default_seed() -> Self {
        Self::new(12345)
    }

    /// Generate a random value
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// A vector of `len` random bytes
    pub fn bytes(&mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.rng.fill_bytes(&mut out);
        out
    }

    /// A random alphanumeric string of `len` characters
    pub fn string(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    /// A random lowercase account name of 3 to 16 characters
    pub fn account(&mut self) -> Name {
        let len = self.rng.gen_range(3..=16);
        Name::new(self.string(len).to_ascii_lowercase())
    }
}

impl Default for TestRng {
    fn default() -> Self {
        Self::with_default_seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_values() {
        let mut a = TestRng::new(7);
        let mut b = TestRng::new(7);
        assert_eq!(a.bytes(16), b.bytes(16));
        assert_eq!(a.account(), b.account());
        let name = TestRng::default().account();
        assert!((3..=16).contains(&name.as_str().len()));
        assert!(!name.is_contract());
    }
}
