//! Injectable randomness for response selection, product shuffling and delay jitter.
//!
//! `ThreadRandom` is the production source: non-cryptographic and not
//! reproducible. Anything that needs repeatable output injects `FixedSequence`.

use std::sync::Mutex;

use rand::Rng;

pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..upper`. Returns 0 when `upper` is 0.
    fn below(&self, upper: usize) -> usize;
}

/// Thread-local `rand` generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Replays a fixed list of values (each taken modulo `upper`), cycling
/// back to the start when exhausted.
#[derive(Debug)]
pub struct FixedSequence {
    values: Vec<usize>,
    cursor: Mutex<usize>,
}

impl FixedSequence {
    pub fn new(values: Vec<usize>) -> Self {
        Self {
            values,
            cursor: Mutex::new(0),
        }
    }
}

impl RandomSource for FixedSequence {
    fn below(&self, upper: usize) -> usize {
        if upper == 0 || self.values.is_empty() {
            return 0;
        }
        let mut cursor = self.cursor.lock().unwrap_or_else(|e| e.into_inner());
        let value = self.values[*cursor % self.values.len()];
        *cursor += 1;
        value % upper
    }
}

/// Fisher-Yates shuffle driven by `rng`.
pub fn shuffle<T>(rng: &dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

/// Picks one element uniformly, `None` for an empty slice.
pub fn choose<'a, T>(rng: &dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.below(items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_stays_in_range() {
        let rng = ThreadRandom;
        for _ in 0..200 {
            assert!(rng.below(3) < 3);
        }
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn test_fixed_sequence_cycles_and_wraps() {
        let rng = FixedSequence::new(vec![1, 5]);
        assert_eq!(rng.below(4), 1);
        assert_eq!(rng.below(4), 1); // 5 % 4
        assert_eq!(rng.below(10), 1);
        assert_eq!(rng.below(10), 5);
    }

    #[test]
    fn test_shuffle_with_zeros_rotates_predictably() {
        // j = 0 at every step: [a,b,c] -> swap(2,0) -> [c,b,a] -> swap(1,0) -> [b,c,a]
        let rng = FixedSequence::new(vec![0]);
        let mut items = vec!['a', 'b', 'c'];
        shuffle(&rng, &mut items);
        assert_eq!(items, vec!['b', 'c', 'a']);
    }

    #[test]
    fn test_shuffle_keeps_all_elements() {
        let mut items: Vec<u32> = (0..10).collect();
        shuffle(&ThreadRandom, &mut items);
        items.sort_unstable();
        assert_eq!(items, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_choose() {
        let rng = FixedSequence::new(vec![2]);
        assert_eq!(choose(&rng, &["x", "y", "z"]), Some(&"z"));
        assert_eq!(choose::<u8>(&rng, &[]), None);
    }
}
