/// Total assignment of elements to sets with O(1) move and membership lookup.
///
/// The last set is the pool that holds every element at construction.
#[derive(Debug, Clone)]
pub(super) struct PartitionSet {
    sets: Vec<Vec<usize>>,  // sets[s] = elements currently in set s
    index: Vec<usize>,      // index[e] = s when e is in sets[s]
    position: Vec<usize>,   // position[e] = i when sets[s][i] is e
}

impl PartitionSet {
    /// Create `num_sets` sets over `num_elems` elements, all starting in the last set.
    pub(super) fn new(num_sets: usize, num_elems: usize) -> Self {
        assert!(num_sets > 0, "must have at least one set");
        let pool = num_sets - 1;
        let mut sets = vec![Vec::new(); num_sets];
        sets[pool] = (0..num_elems).collect();

        Self { sets, index: vec![pool; num_elems], position: (0..num_elems).collect() }
    }

    /// Number of sets, including the pool.
    #[inline] pub(super) fn num_sets(&self) -> usize { self.sets.len() }

    /// Universe size.
    #[inline] pub(super) fn num_elems(&self) -> usize { self.index.len() }

    /// Return the set that `elem` is currently in.
    #[inline]
    pub(super) fn find(&self, elem: usize) -> usize {
        debug_assert!(elem < self.index.len(), "element out of range");
        self.index[elem]
    }

    /// Elements currently in `set`, in no particular order.
    #[inline]
    pub(super) fn get(&self, set: usize) -> &[usize] {
        debug_assert!(set < self.sets.len(), "set out of range");
        &self.sets[set]
    }

    /// Move `elem` to `set`.
    pub(super) fn move_to(&mut self, elem: usize, set: usize) {
        debug_assert!(elem < self.index.len(), "element out of range");
        debug_assert!(set < self.sets.len(), "set out of range");

        let (prev, pos) = (self.index[elem], self.position[elem]);
        if prev == set { return }

        // Remove from previous set by swapping with its last element.
        self.sets[prev].swap_remove(pos);
        if let Some(&moved) = self.sets[prev].get(pos) {
            self.position[moved] = pos;
        }

        self.index[elem] = set;
        self.position[elem] = self.sets[set].len();
        self.sets[set].push(elem);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_consistent(ps: &PartitionSet) {
        for set in 0..ps.num_sets() {
            for (i, &elem) in ps.get(set).iter().enumerate() {
                assert_eq!(ps.find(elem), set);
                assert_eq!(ps.position[elem], i);
            }
        }
        let total = (0..ps.num_sets()).map(|s| ps.get(s).len()).sum::<usize>();
        assert_eq!(total, ps.num_elems());
    }

    #[test]
    fn new_fills_pool() {
        let ps = PartitionSet::new(3, 5);
        assert_eq!(ps.num_sets(), 3);
        assert_eq!(ps.get(2), &[0, 1, 2, 3, 4]);
        assert!(ps.get(0).is_empty());
        assert!(ps.get(1).is_empty());
        for elem in 0..5 { assert_eq!(ps.find(elem), 2) }
    }

    #[test]
    #[should_panic(expected = "must have at least one set")]
    fn new_panics_on_zero_sets() {
        PartitionSet::new(0, 4);
    }

    #[test]
    fn moves_keep_positions_consistent() {
        let mut ps = PartitionSet::new(3, 6);
        ps.move_to(1, 0);
        ps.move_to(5, 0);
        ps.move_to(3, 1);
        ps.move_to(1, 1);
        ps.move_to(4, 0);
        check_consistent(&ps);

        let mut zero = ps.get(0).to_vec();
        zero.sort_unstable();
        assert_eq!(zero, vec![4, 5]);
    }

    #[test]
    fn moving_last_element_of_set() {
        let mut ps = PartitionSet::new(2, 2);
        ps.move_to(1, 0);
        ps.move_to(1, 1);
        check_consistent(&ps);
        assert!(ps.get(0).is_empty());
    }

    #[test]
    fn move_to_same_set_is_noop() {
        let mut ps = PartitionSet::new(2, 3);
        ps.move_to(1, 1);
        assert_eq!(ps.get(1), &[0, 1, 2]);
    }
}
