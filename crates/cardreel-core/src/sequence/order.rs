//! Randomised ordering passes
//!
//! Two deliberately different algorithms:
//!
//! - [`fisher_yates`] produces a uniform permutation.
//! - [`biased_random_order`] sorts with a coin-flip comparator, which is what
//!   the desktop app's "random" mode has always done. The result is NOT
//!   uniform (elements tend to stay near their starting position), but some
//!   users depend on that feel, so it is kept as its own mode.

use rand::Rng;

/// Uniform in-place shuffle.
///
/// For `i` from the last index down to 1, swap element `i` with an element
/// chosen uniformly from `[0, i]`.
pub fn fisher_yates<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// In-place insertion sort driven by a random comparator.
///
/// Each pass asks "is this element less than its left neighbour?" and gets a
/// fair coin flip as the answer, which mirrors `sort(() => Math.random() - 0.5)`
/// on the short arrays the desktop app sorts. The standard library sorts are
/// not used here because they may panic when the comparator is not a total
/// order.
pub fn biased_random_order<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && rng.gen_bool(0.5) {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const N: usize = 5;
    const TRIALS: usize = 20_000;

    /// counts[position][value]
    fn position_counts(shuffle: fn(&mut [usize], &mut StdRng)) -> [[usize; N]; N] {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts = [[0usize; N]; N];
        for _ in 0..TRIALS {
            let mut items: Vec<usize> = (0..N).collect();
            shuffle(&mut items, &mut rng);
            for (pos, &value) in items.iter().enumerate() {
                counts[pos][value] += 1;
            }
        }
        counts
    }

    #[test]
    fn test_fisher_yates_keeps_elements() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..50).collect();
        fisher_yates(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_fisher_yates_is_roughly_uniform() {
        let counts = position_counts(|items, rng| fisher_yates(items, rng));
        let expected = TRIALS as f64 / N as f64;
        for row in counts.iter() {
            for &count in row.iter() {
                let deviation = (count as f64 - expected).abs() / expected;
                assert!(deviation < 0.1, "count {} vs {}", count, expected);
            }
        }
    }

    #[test]
    fn test_biased_order_keeps_elements() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut items: Vec<u32> = (0..50).collect();
        biased_random_order(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_biased_order_is_not_uniform() {
        let counts = position_counts(|items, rng| biased_random_order(items, rng));
        // The last element is inserted last and stays put on the first
        // coin flip, so it ends in the final slot about half the time.
        let expected = TRIALS as f64 / N as f64;
        assert!(counts[N - 1][N - 1] as f64 > expected * 2.0);
    }

    #[test]
    fn test_short_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u8> = Vec::new();
        fisher_yates(&mut empty, &mut rng);
        biased_random_order(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![42];
        fisher_yates(&mut one, &mut rng);
        biased_random_order(&mut one, &mut rng);
        assert_eq!(one, vec![42]);
    }
}
