// src/services/sampling.rs
//
// Uniform random sampling over an accumulated list.

use rand::Rng;

/// In-place Fisher–Yates shuffle.
///
/// Every permutation of `items` is equally likely given a uniform `rng`.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffles `items` and keeps the first `size`.
///
/// Result length is `min(size, items.len())`.
pub fn sample_uniform<T, R: Rng + ?Sized>(mut items: Vec<T>, size: usize, rng: &mut R) -> Vec<T> {
    shuffle_in_place(&mut items, rng);
    items.truncate(size);
    items
}
