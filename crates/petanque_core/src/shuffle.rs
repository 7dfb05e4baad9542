//! Fisher-Yates shuffle over an injectable random source.

use rand::Rng;

/// Shuffle `items` in place so that every ordering is equally likely.
///
/// Walks from the last index down to 1, swapping each element with one drawn
/// uniformly from the not-yet-visited prefix (itself included).
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
