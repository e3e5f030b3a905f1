//! Distinct permutations of a multiset.

/// Iterator over the distinct arrangements of a multiset of counts.
///
/// Starts from the sorted arrangement and steps to the next lexicographic
/// permutation each time, so repeated values never produce repeated output
/// and no arrangement is generated only to be discarded.
#[derive(Clone, Debug)]
pub struct DistinctPermutations {
    current: Vec<usize>,
    exhausted: bool,
}

impl DistinctPermutations {
    pub fn new(mut items: Vec<usize>) -> Self {
        items.sort_unstable();
        Self {
            current: items,
            exhausted: false,
        }
    }
}

impl Iterator for DistinctPermutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.exhausted {
            return None;
        }
        let item = self.current.clone();
        self.exhausted = !next_permutation(&mut self.current);
        Some(item)
    }
}

/// Rearrange `v` into its lexicographic successor.
///
/// Returns `false` and leaves `v` untouched when it is already the last
/// arrangement.
pub fn next_permutation(v: &mut [usize]) -> bool {
    let Some(pivot) = v.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    // A larger element exists right of the pivot by choice of pivot.
    let successor = v
        .iter()
        .rposition(|&item| item > v[pivot])
        .unwrap_or(pivot + 1);
    v.swap(pivot, successor);
    v[pivot + 1..].reverse();
    true
}
