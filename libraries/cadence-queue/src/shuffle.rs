//! Shuffle permutation for the play order
//!
//! Fisher-Yates over every base index except the anchor (the track currently
//! playing), with the anchor placed first so shuffling never moves away from
//! what is playing.

use rand::seq::SliceRandom;
use rand::Rng;

/// Build a shuffled play order over `0..len`
///
/// If `anchor` is given it becomes position 0 and the remaining indices are
/// shuffled behind it.
pub fn anchored_permutation<R: Rng + ?Sized>(
    len: usize,
    anchor: Option<usize>,
    rng: &mut R,
) -> Vec<usize> {
    let anchor = anchor.filter(|&a| a < len);

    let mut rest: Vec<usize> = (0..len).filter(|&i| Some(i) != anchor).collect();
    rest.shuffle(rng);

    let mut order = Vec::with_capacity(len);
    order.extend(anchor);
    order.extend(rest);
    order
}

/// Whether `order` is a permutation of `0..len`
pub fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in order {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
