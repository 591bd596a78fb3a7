/// Advances over a number of sorted lists in lockstep, yielding for every
/// key that occurs in all of them the group of entries sharing that key.
///
/// Keys are yielded in strictly increasing order; keys that are missing from
/// at least one of the lists are skipped.
pub struct SynchronizedIterator<'a, T, K, F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    key: F,
    lists: Vec<&'a [T]>,
    positions: Vec<usize>,
}

impl<'a, T, K, F> SynchronizedIterator<'a, T, K, F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    /// Creates an iterator without lists; the key function projects an entry
    /// onto the value the lists are sorted by.
    pub fn new(key: F) -> SynchronizedIterator<'a, T, K, F> {
        SynchronizedIterator {
            key,
            lists: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Registers another sorted list to synchronize on.
    pub fn push(&mut self, list: &'a [T]) {
        debug_assert!(
            list.windows(2).all(|pair| (self.key)(&pair[0]) < (self.key)(&pair[1])),
            "The list must be sorted with strictly increasing keys."
        );

        self.lists.push(list);
        self.positions.push(0);
    }

    /// Advances to the smallest key beyond the previous group that is present
    /// in every list and returns the group of entries with that key, one
    /// entry per list. Returns None when any of the lists is exhausted.
    pub fn next_group(&mut self) -> Option<Vec<&'a T>> {
        loop {
            // The largest key under the current positions; every list has to
            // reach it before a group can be formed.
            let mut target: Option<K> = None;
            for (list, position) in self.lists.iter().zip(&self.positions) {
                let key = (self.key)(list.get(*position)?);
                if target.as_ref().map_or(true, |largest| key > *largest) {
                    target = Some(key);
                }
            }
            let target = target?;

            let mut synchronized = true;
            for (list, position) in self.lists.iter().zip(self.positions.iter_mut()) {
                while *position < list.len() && (self.key)(&list[*position]) < target {
                    *position += 1;
                }

                let key = (self.key)(list.get(*position)?);
                if key != target {
                    // This list skipped past the target, so a larger target
                    // has to be found in the next round.
                    synchronized = false;
                }
            }

            if synchronized {
                let group = self
                    .lists
                    .iter()
                    .zip(&self.positions)
                    .map(|(list, position)| &list[*position])
                    .collect();

                for position in &mut self.positions {
                    *position += 1;
                }

                return Some(group);
            }
        }
    }
}
