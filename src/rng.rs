//! Seeded random stream for board generation and shuffling.
//!
//! A seed string is canonicalized (ASCII alphanumerics only, uppercased),
//! hashed with cyrb128, and used to seed a `rand` `StdRng` that yields floats
//! in `[0, 1)`. The stream is plain owned state: hand it down as `&mut` to
//! whichever step consumes it, never share it.

use crate::error::{MazeError, Result};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of uniformly distributed floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `[0, len)`. Returns 0 when `len` is 0.
    fn next_below(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}

/// Shuffle `items` in place, consuming one draw per element.
///
/// Walks forwards and swaps slot `i` with a slot drawn from `0..=i`.
pub fn shuffle_with_rng<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in 0..items.len() {
        let j = rng.next_below(i + 1);
        items.swap(i, j);
    }
}

/// Strip everything but ASCII letters and digits and uppercase the rest.
///
/// `"2024-01-01"` becomes `"20240101"` while `"2024-1-1"` becomes `"202411"`,
/// so the two seeds produce different boards.
pub fn canonicalize_seed(seed: &str) -> Result<String> {
    let canonical: String = seed
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if canonical.is_empty() {
        return Err(MazeError::InvalidSeed);
    }
    Ok(canonical)
}

/// cyrb128: four decorrelated 32-bit words from a string.
fn cyrb128(s: &str) -> [u32; 4] {
    let (mut h1, mut h2, mut h3, mut h4): (u32, u32, u32, u32) = (1779033703, 3144134277, 1013904242, 2773480762);
    for k in s.bytes().map(u32::from) {
        h1 = h2 ^ (h1 ^ k).wrapping_mul(597399067);
        h2 = h3 ^ (h2 ^ k).wrapping_mul(2869860233);
        h3 = h4 ^ (h3 ^ k).wrapping_mul(951274213);
        h4 = h1 ^ (h4 ^ k).wrapping_mul(2716044179);
    }
    h1 = (h3 ^ (h1 >> 18)).wrapping_mul(597399067);
    h2 = (h4 ^ (h2 >> 22)).wrapping_mul(2869860233);
    h3 = (h1 ^ (h3 >> 17)).wrapping_mul(951274213);
    h4 = (h2 ^ (h4 >> 19)).wrapping_mul(2716044179);
    h1 ^= h2 ^ h3 ^ h4;
    h2 ^= h1;
    h3 ^= h1;
    h4 ^= h1;
    [h1, h2, h3, h4]
}

/// Deterministic float stream derived from a seed string.
///
/// The 256-bit `StdRng` seed is two cyrb128 digests: one of the canonical
/// seed and one of the same characters reversed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    seed: String,
    rng: StdRng,
}

impl SeededRng {
    pub fn from_seed(seed: &str) -> Result<Self> {
        let seed = canonicalize_seed(seed)?;
        let reversed: String = seed.chars().rev().collect();
        let mut bytes = [0u8; 32];
        let words = cyrb128(&seed).into_iter().chain(cyrb128(&reversed));
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Ok(Self { seed, rng: StdRng::from_seed(bytes) })
    }

    /// The canonical form of the seed this stream was built from.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed list of draws, cycling when exhausted.
    pub(crate) struct Scripted {
        pub values: Vec<f64>,
        pub pos: usize,
    }

    impl Scripted {
        pub fn new(values: &[f64]) -> Self {
            Self { values: values.to_vec(), pos: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let v = self.values[self.pos % self.values.len()];
            self.pos += 1;
            v
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = SeededRng::from_seed("ABCDE12345").unwrap();
        let mut b = SeededRng::from_seed("ABCDE12345").unwrap();
        for _ in 0..1000 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn values_are_in_unit_interval() {
        let mut rng = SeededRng::from_seed("range").unwrap();
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRng::from_seed("seed1").unwrap();
        let mut b = SeededRng::from_seed("seed2").unwrap();
        let xs: Vec<u32> = (0..16).map(|_| a.next_u32()).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.next_u32()).collect();
        assert_ne!(xs, ys);
        let equal = xs.iter().zip(&ys).filter(|(x, y)| x == y).count();
        assert!(equal <= 1);
    }

    #[test]
    fn stream_mean_is_roughly_uniform() {
        let mut rng = SeededRng::from_seed("uniform").unwrap();
        let n = 20_000;
        let mean = (0..n).map(|_| rng.next_f64()).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.02, "mean {mean}");
    }

    #[test]
    fn canonicalization_strips_and_uppercases() {
        assert_eq!(canonicalize_seed("abc-123").unwrap(), "ABC123");
        assert_eq!(canonicalize_seed(" a.b.c ").unwrap(), "ABC");
        assert!(matches!(canonicalize_seed(""), Err(MazeError::InvalidSeed)));
        assert!(matches!(canonicalize_seed("--//"), Err(MazeError::InvalidSeed)));
    }

    #[test]
    fn cosmetic_variants_collide_but_padded_dates_differ() {
        let a = SeededRng::from_seed("abc").unwrap();
        let b = SeededRng::from_seed("A-B-C").unwrap();
        assert_eq!(a, b);

        let short = SeededRng::from_seed("2024-1-1").unwrap();
        let padded = SeededRng::from_seed("2024-01-01").unwrap();
        assert_eq!(short.seed(), "202411");
        assert_eq!(padded.seed(), "20240101");
        assert_ne!(short, padded);
    }

    #[test]
    fn next_below_stays_in_bounds() {
        let mut rng = Scripted::new(&[0.0, 0.5, 0.999_999]);
        assert_eq!(rng.next_below(4), 0);
        assert_eq!(rng.next_below(4), 2);
        assert_eq!(rng.next_below(4), 3);
        assert_eq!(rng.next_below(0), 0);
    }

    #[test]
    fn shuffle_is_a_permutation_and_uses_one_draw_per_slot() {
        let mut items: Vec<u32> = (0..10).collect();
        let mut rng = SeededRng::from_seed("perm").unwrap();
        shuffle_with_rng(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());

        let mut counter = Scripted::new(&[0.3]);
        shuffle_with_rng(&mut [1, 2, 3, 4, 5], &mut counter);
        assert_eq!(counter.pos, 5);
    }
}
