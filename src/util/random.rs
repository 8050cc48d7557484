//! Random draws used for organic variation throughout the simulation.
//!
//! Every helper is generic over [`rand::Rng`], so callers choose the source:
//! a seeded [`rand::rngs::StdRng`] for reproducible runs and tests, or any
//! other generator at runtime.

use rand::Rng;

/// Uniform real value in `[0, n)`.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, n: f32) -> f32 {
    rng.random::<f32>() * n
}

/// Mean of three uniform draws in `[0, n)`.
///
/// Approximates a bell-shaped distribution centred on `n / 2` without long
/// tails.
#[inline]
pub fn bell<R: Rng + ?Sized>(rng: &mut R, n: f32) -> f32 {
    (uniform(rng, n) + uniform(rng, n) + uniform(rng, n)) / 3.0
}

/// Integer draw in `[0, n)`. Returns 0 when `n == 0`.
#[inline]
pub fn integer_uniform<R: Rng + ?Sized>(rng: &mut R, n: u32) -> u32 {
    if n == 0 {
        return 0;
    }
    // f32 rounding can land exactly on `n` for large ranges
    (uniform(rng, n as f32).floor() as u32).min(n - 1)
}

/// `true` with probability `1 / n`.
#[inline]
pub fn one_in<R: Rng + ?Sized>(rng: &mut R, n: u32) -> bool {
    integer_uniform(rng, n) == 0
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let v = uniform(&mut rng, 3.5);
            assert!((0.0..3.5).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn bell_concentrates_around_the_middle() {
        let mut rng = StdRng::seed_from_u64(11);
        let samples: Vec<f32> =
            (0..20_000).map(|_| bell(&mut rng, 1.0)).collect();
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!((mean - 0.5).abs() < 0.01, "mean drifted: {mean}");

        let tails =
            samples.iter().filter(|&&v| !(0.1..0.9).contains(&v)).count();
        // A flat distribution would put 20% of samples out here
        assert!(tails < samples.len() / 50, "too many tail samples: {tails}");
    }

    #[test]
    fn integer_uniform_covers_every_value() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 6];
        for _ in 0..1_000 {
            let v = integer_uniform(&mut rng, 6) as usize;
            seen[v] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn integer_uniform_of_zero_is_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(integer_uniform(&mut rng, 0), 0);
        assert!(one_in(&mut rng, 1));
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(bell(&mut a, 2.0), bell(&mut b, 2.0));
        }
    }
}
