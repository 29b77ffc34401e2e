// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A minimal, zero-dependency, completely insecure PRNG (mulberry32) used to
/// shuffle questions and options.
///
/// All arithmetic is on `u32` with wrapping semantics, so a given seed
/// produces the same stream on every platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

const INCREMENT: u32 = 0x6D2B_79F5;

/// 2^32, the divisor that maps a `u32` onto [0, 1).
const SCALE: f64 = 4_294_967_296.0;

impl Mulberry32 {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance `state` once. Returns the drawn value and the new state.
    pub fn step(state: u32) -> (f64, u32) {
        let t = state.wrapping_add(INCREMENT);
        let mut r = (t ^ (t >> 15)).wrapping_mul(1 | t);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(r | 61));
        let value = (r ^ (r >> 14)) as f64 / SCALE;
        (value, t)
    }

    /// Generate a number in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        let (value, state) = Self::step(self.state);
        self.state = state;
        value
    }

    // Generate an index in [0, max).
    fn below(&mut self, max: usize) -> usize {
        (self.next_f64() * max as f64).floor() as usize
    }
}

/// Fisher-Yates shuffle. The input is left untouched; the same `items` and
/// `seed` always produce the same permutation.
pub fn shuffle<T: Clone>(items: &[T], seed: u32) -> Vec<T> {
    let mut v = items.to_vec();
    let mut rng = Mulberry32::from_seed(seed);
    for i in (1..v.len()).rev() {
        let j = rng.below(i + 1);
        v.swap(i, j);
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_stream_for_seed_12345() {
        let mut rng = Mulberry32::from_seed(12345);
        assert_eq!(rng.next_f64(), 0.9797282677609473);
        assert_eq!(rng.next_f64(), 0.3067522644996643);
        assert_eq!(rng.next_f64(), 0.484205421525985);
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = Mulberry32::from_seed(0);
        assert_eq!(rng.next_f64(), 0.26642920868471265);
    }

    #[test]
    fn test_step_matches_stateful_rng() {
        let mut rng = Mulberry32::from_seed(99);
        let (first, state) = Mulberry32::step(99);
        let (second, _) = Mulberry32::step(state);
        assert_eq!(rng.next_f64(), first);
        assert_eq!(rng.next_f64(), second);
    }

    #[test]
    fn test_values_in_unit_interval() {
        let mut rng = Mulberry32::from_seed(u32::MAX);
        for _ in 0..10_000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_known_permutation() {
        let input: Vec<u32> = (0..10).collect();
        assert_eq!(shuffle(&input, 42), vec![0, 7, 3, 5, 2, 1, 8, 9, 4, 6]);
    }

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let input = vec!["a", "b", "c", "d"];
        let _ = shuffle(&input, 7);
        assert_eq!(input, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let input: Vec<u32> = (0..50).collect();
        for seed in [0, 1, 12345, 0xDEAD_BEEF, u32::MAX] {
            let mut out = shuffle(&input, seed);
            out.sort();
            assert_eq!(out, input);
        }
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let input: Vec<u32> = (0..20).collect();
        assert_eq!(shuffle(&input, 31337), shuffle(&input, 31337));
    }

    #[test]
    fn test_shuffle_degenerate_inputs() {
        let empty: Vec<u32> = Vec::new();
        assert!(shuffle(&empty, 7).is_empty());
        assert_eq!(shuffle(&[1], 7), vec![1]);
    }
}
