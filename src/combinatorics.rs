//! Counting and sign utilities used by simplices and meshes.
//!
//! Everything here is a pure function of its inputs.
//! [`factorial`] and [`binomial_coefficient`] are `const fn`s
//! so that cell counts can be computed at compile time.

use itertools::{izip, Itertools};

/// Compute `k!`.
///
/// No overflow check is performed;
/// `k` must be small enough for the result to fit in a `usize`
/// (at most 20 on 64-bit targets).
///
/// ```
/// # use dec_cells::combinatorics::factorial;
/// const SIX: usize = factorial(3);
/// assert_eq!(SIX, 6);
/// ```
pub const fn factorial(k: usize) -> usize {
    if k <= 1 {
        1
    } else {
        k * factorial(k - 1)
    }
}

/// Compute the binomial coefficient `C(n, k)`,
/// i.e. the number of `k`-element subsets of an `n`-element set.
///
/// Uses the multiplicative recurrence `C(n, k) = C(n-1, k-1) * n / k`
/// instead of factorials so that intermediate values stay small.
/// Returns 0 when `k > n`.
pub const fn binomial_coefficient(n: usize, k: usize) -> usize {
    if k > n {
        0
    } else if k == 0 || k == n {
        1
    } else if k == 1 || k == n - 1 {
        n
    } else {
        binomial_coefficient(n - 1, k - 1) * n / k
    }
}

/// Compute the parity of a permutation of the integers `0..N`.
///
/// Returns 1 for an even permutation, -1 for an odd one,
/// and 0 if a duplicate value was detected.
/// If the sequence contains no duplicates
/// but is not a permutation of `0..N`, the result is unspecified.
///
/// The sequence is sorted with a selection sort,
/// flipping the sign whenever an element is out of place.
/// Duplicates are then detected from the sorted sequence
/// by looking for equal neighbors and by comparing the first and last elements.
/// This detection is not exhaustive:
/// - a single-element sequence always returns 0 (its first and last elements coincide),
/// - some sequences with several duplicates slip through,
///   e.g. `[0, 1, 1, 0]` returns -1.
///
/// An empty sequence is the identity and returns 1.
pub fn permutation_parity(perm: &[usize]) -> i8 {
    if perm.is_empty() {
        return 1;
    }

    let mut sorted = perm.to_vec();
    let mut parity = 1;
    for i in 0..sorted.len() - 1 {
        if sorted[i] != i {
            parity = -parity;
            let min_idx = i + sorted[i..].iter().position_min().unwrap_or(0);
            sorted.swap(i, min_idx);
        }
    }

    if sorted.iter().tuple_windows().any(|(a, b)| a == b) {
        return 0;
    }
    if sorted.first() == sorted.last() {
        return 0;
    }

    parity
}

/// All permutations of a range of indices, in lexicographic order.
///
/// Generates the `n!` orderings of `0..n` along with their signs,
/// starting from the identity.
pub struct Permutations {
    num_indices: usize,
    perm_indices: Vec<usize>,
    signs: Vec<i8>,
}

/// A single permutation of a range of indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Permutation<'a> {
    /// The indices ordered according to the permutation.
    pub indices: &'a [usize],
    /// +1 if the permutation takes an even number of swaps
    /// to reach from the identity, -1 if odd.
    pub sign: i8,
}

impl Permutations {
    /// Generate every permutation of `0..num_indices`.
    ///
    /// Panics if `num_indices` is zero.
    pub fn new(num_indices: usize) -> Self {
        assert!(num_indices > 0, "no use taking a permutation of no elements");

        let perm_count = factorial(num_indices);
        let mut perm_indices = Vec::with_capacity(perm_count * num_indices);
        let mut signs = Vec::with_capacity(perm_count);

        let mut current = (0..num_indices).collect_vec();
        let mut sign = 1;
        loop {
            perm_indices.extend_from_slice(&current);
            signs.push(sign);
            match step_lexicographic(&mut current) {
                Some(swaps) if swaps % 2 == 1 => sign = -sign,
                Some(_) => {}
                None => break,
            }
        }

        Self {
            num_indices,
            perm_indices,
            signs,
        }
    }

    /// Number of generated permutations, `n!`.
    #[inline]
    pub fn len(&self) -> usize {
        self.signs.len()
    }

    /// Always false; there is at least one permutation of a nonempty range.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }

    /// Iterate over the generated permutations.
    pub fn iter(&self) -> impl '_ + Iterator<Item = Permutation<'_>> {
        izip!(
            self.perm_indices.chunks_exact(self.num_indices),
            &self.signs
        )
        .map(|(indices, &sign)| Permutation { indices, sign })
    }
}

/// Rearrange `perm` into the next permutation in lexicographic order
/// and return the number of swaps that took.
/// Returns None and leaves `perm` alone if it is already the last one.
fn step_lexicographic(perm: &mut [usize]) -> Option<usize> {
    // everything after the pivot is in decreasing order
    let pivot = perm.windows(2).rposition(|w| w[0] < w[1])?;
    let pivot_val = perm[pivot];
    let successor = perm.iter().rposition(|&x| x > pivot_val)?;
    perm.swap(pivot, successor);

    let tail = &mut perm[pivot + 1..];
    tail.reverse();
    Some(1 + tail.len() / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorials() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(5), 120);
        assert_eq!(factorial(10), 3_628_800);
        assert_eq!(factorial(20), 2_432_902_008_176_640_000);
    }

    #[test]
    fn binomial_matches_factorial_formula() {
        for n in 0..=20 {
            for k in 0..=n {
                let expected = factorial(n) / (factorial(k) * factorial(n - k));
                assert_eq!(binomial_coefficient(n, k), expected, "C({n}, {k})");
                assert_eq!(
                    binomial_coefficient(n, k),
                    binomial_coefficient(n, n - k),
                    "C({n}, {k}) not symmetric"
                );
            }
            for k in n + 1..n + 4 {
                assert_eq!(binomial_coefficient(n, k), 0);
            }
        }
    }

    #[test]
    fn binomial_is_const_evaluable() {
        const EDGES_PER_CUBE_VERTEX: usize = binomial_coefficient(3, 1);
        const FACES_PER_CUBE_VERTEX: usize = binomial_coefficient(3, 2);
        assert_eq!(EDGES_PER_CUBE_VERTEX, 3);
        assert_eq!(FACES_PER_CUBE_VERTEX, 3);
    }

    #[test]
    fn parity_of_small_sequences() {
        assert_eq!(permutation_parity(&[0, 1, 2, 3]), 1);
        assert_eq!(permutation_parity(&[1, 0, 2, 3]), -1);
        assert_eq!(permutation_parity(&[1, 2, 0]), 1);
        assert_eq!(permutation_parity(&[3, 2, 1, 0]), 1);
        assert_eq!(permutation_parity(&[0, 0, 1, 2]), 0);
        assert_eq!(permutation_parity(&[2, 1, 2]), 0);
        assert_eq!(permutation_parity(&[]), 1);
    }

    /// The duplicate detection works on the sorted sequence
    /// and is not exhaustive. These cases pin down its exact behavior.
    #[test]
    fn parity_duplicate_detection_quirks() {
        // a lone element is its own first and last element
        assert_eq!(permutation_parity(&[0]), 0);
        // wrap-around duplicate caught by the first/last comparison
        // ([1, 0, 0] sorts to [0, 1, 0])
        assert_eq!(permutation_parity(&[1, 0, 0]), 0);
        // two duplicated values that end up non-adjacent with distinct ends
        assert_eq!(permutation_parity(&[0, 1, 1, 0]), -1);
    }

    /// Sign from counting inversions, independent of the selection sort.
    fn inversion_sign(perm: &[usize]) -> i8 {
        let inversions = perm.iter().tuple_combinations().filter(|(a, b)| a > b).count();
        if inversions % 2 == 0 {
            1
        } else {
            -1
        }
    }

    #[test]
    fn permutations_in_lexicographic_order() {
        let p3 = Permutations::new(3);
        let first = p3.iter().next().unwrap();
        assert_eq!(first.indices, &[0, 1, 2]);
        assert_eq!(first.sign, 1);
        let last = p3.iter().last().unwrap();
        assert_eq!(last.indices, &[2, 1, 0]);
        assert_eq!(last.sign, -1);

        for n in 1..=6 {
            let perms = Permutations::new(n);
            assert_eq!(perms.len(), factorial(n));
            itertools::assert_equal(
                perms.iter().map(|p| p.indices.to_vec()),
                (0..n).permutations(n),
            );
            for perm in perms.iter() {
                assert_eq!(
                    perm.sign,
                    inversion_sign(perm.indices),
                    "Permutation {:?} got wrong sign",
                    perm.indices
                );
            }
        }
    }

    #[test]
    fn lexicographic_step_counts_swaps() {
        let mut perm = [0, 2, 1];
        // swap 0 with 1, then reverse the two-element tail with one more swap
        assert_eq!(step_lexicographic(&mut perm), Some(2));
        assert_eq!(perm, [1, 0, 2]);

        let mut perm = [1, 4, 3, 2, 0];
        // swap 1 with 2, then reverse the four-element tail with two swaps
        assert_eq!(step_lexicographic(&mut perm), Some(3));
        assert_eq!(perm, [2, 0, 1, 3, 4]);

        let mut last = [3, 2, 1, 0];
        assert_eq!(step_lexicographic(&mut last), None);
        assert_eq!(last, [3, 2, 1, 0]);
    }

    /// The parity function agrees with the generated signs
    /// and responds to transpositions as expected.
    #[test]
    fn parity_under_swaps() {
        for n in 2..=8 {
            for perm in Permutations::new(n).iter() {
                assert_eq!(
                    permutation_parity(perm.indices),
                    perm.sign,
                    "Permutation {:?} got wrong parity",
                    perm.indices
                );

                let mut swapped = perm.indices.to_vec();
                swapped.swap(0, n - 1);
                assert_eq!(permutation_parity(&swapped), -perm.sign);
                swapped.swap(0, 1);
                assert_eq!(permutation_parity(&swapped), perm.sign);
            }
        }
    }
}
