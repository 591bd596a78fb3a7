use std::fmt;

/// A set of values backed by a sorted, duplicate-free vector.
///
/// All binary set operations are linear merges over the sorted storage, and
/// iteration visits the elements in ascending order.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrdSet<T> {
    elements: Vec<T>,
}

impl<T: Ord> OrdSet<T> {
    /// Creates an empty set.
    pub fn new() -> OrdSet<T> {
        OrdSet { elements: Vec::new() }
    }

    /// Creates a set containing a single element.
    pub fn singleton(element: T) -> OrdSet<T> {
        OrdSet { elements: vec![element] }
    }

    /// Creates a set from an arbitrary vector, sorting and deduplicating it.
    pub fn from_vec(mut elements: Vec<T>) -> OrdSet<T> {
        elements.sort_unstable();
        elements.dedup();
        OrdSet { elements }
    }

    /// Inserts the given element, keeping the storage sorted. Returns true
    /// iff the element was not yet present.
    pub fn insert(&mut self, element: T) -> bool {
        match self.elements.binary_search(&element) {
            Ok(_) => false,
            Err(position) => {
                self.elements.insert(position, element);
                true
            }
        }
    }

    /// Returns true iff the given element is in the set.
    pub fn contains(&self, element: &T) -> bool {
        self.elements.binary_search(element).is_ok()
    }

    /// Removes all elements for which the predicate does not hold.
    pub fn retain(&mut self, predicate: impl FnMut(&T) -> bool) {
        self.elements.retain(predicate);
    }

    /// Returns true iff every element of this set is also in `other`.
    pub fn is_subset_of(&self, other: &OrdSet<T>) -> bool {
        let mut other_iter = other.elements.iter();

        'outer: for element in &self.elements {
            for candidate in other_iter.by_ref() {
                if candidate == element {
                    continue 'outer;
                } else if candidate > element {
                    return false;
                }
            }

            return false;
        }

        true
    }

    /// Returns true iff the two sets have no element in common.
    pub fn is_disjoint(&self, other: &OrdSet<T>) -> bool {
        let mut lhs_iter = self.elements.iter().peekable();
        let mut rhs_iter = other.elements.iter().peekable();

        while let (Some(lhs), Some(rhs)) = (lhs_iter.peek(), rhs_iter.peek()) {
            if lhs == rhs {
                return false;
            } else if lhs < rhs {
                lhs_iter.next();
            } else {
                rhs_iter.next();
            }
        }

        true
    }

    /// Returns the smallest element of the set, if any.
    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Returns an iterator over the elements in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Returns the underlying sorted slice.
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true iff the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T: Ord + Clone> OrdSet<T> {
    /// Returns the union of the two sets as a merge of the sorted storages.
    pub fn union(&self, other: &OrdSet<T>) -> OrdSet<T> {
        let mut result = Vec::with_capacity(self.len() + other.len());
        let mut lhs_iter = self.elements.iter().peekable();
        let mut rhs_iter = other.elements.iter().peekable();

        loop {
            match (lhs_iter.peek(), rhs_iter.peek()) {
                (Some(lhs), Some(rhs)) => {
                    if lhs < rhs {
                        result.push((*lhs).clone());
                        lhs_iter.next();
                    } else if rhs < lhs {
                        result.push((*rhs).clone());
                        rhs_iter.next();
                    } else {
                        result.push((*lhs).clone());
                        lhs_iter.next();
                        rhs_iter.next();
                    }
                }
                (Some(lhs), None) => {
                    result.push((*lhs).clone());
                    lhs_iter.next();
                }
                (None, Some(rhs)) => {
                    result.push((*rhs).clone());
                    rhs_iter.next();
                }
                (None, None) => break,
            }
        }

        OrdSet { elements: result }
    }

    /// Unions the elements of `other` into this set.
    pub fn insert_all(&mut self, other: &OrdSet<T>) {
        if other.is_empty() {
            return;
        }

        *self = self.union(other);
    }

    /// Returns the intersection of the two sets as a merge of the sorted
    /// storages.
    pub fn intersection(&self, other: &OrdSet<T>) -> OrdSet<T> {
        let mut result = Vec::new();
        let mut lhs_iter = self.elements.iter().peekable();
        let mut rhs_iter = other.elements.iter().peekable();

        while let (Some(lhs), Some(rhs)) = (lhs_iter.peek(), rhs_iter.peek()) {
            if lhs == rhs {
                result.push((*lhs).clone());
                lhs_iter.next();
                rhs_iter.next();
            } else if lhs < rhs {
                lhs_iter.next();
            } else {
                rhs_iter.next();
            }
        }

        OrdSet { elements: result }
    }
}

impl<T> Default for OrdSet<T> {
    fn default() -> OrdSet<T> {
        OrdSet { elements: Vec::new() }
    }
}

impl<T: Ord> FromIterator<T> for OrdSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> OrdSet<T> {
        OrdSet::from_vec(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for OrdSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrdSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrdSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.elements.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_is_stable() {
        let mut set = OrdSet::new();
        assert!(set.insert(5));
        assert!(set.insert(1));
        assert!(!set.insert(5));
        assert!(set.insert(3));

        assert_eq!(set.as_slice(), &[1, 3, 5]);
        assert!(set.contains(&3));
        assert!(!set.contains(&2));
    }

    #[test]
    fn test_from_vec_deduplicates() {
        let set = OrdSet::from_vec(vec![3, 1, 2, 3, 1]);
        assert_eq!(set.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_union_and_intersection() {
        let lhs = OrdSet::from_vec(vec![1, 3, 5]);
        let rhs = OrdSet::from_vec(vec![2, 3, 6]);

        assert_eq!(lhs.union(&rhs).as_slice(), &[1, 2, 3, 5, 6]);
        assert_eq!(lhs.intersection(&rhs).as_slice(), &[3]);
    }

    #[test]
    fn test_subset_and_disjoint() {
        let small = OrdSet::from_vec(vec![1, 3]);
        let large = OrdSet::from_vec(vec![0, 1, 2, 3]);
        let other = OrdSet::from_vec(vec![4, 5]);

        assert!(small.is_subset_of(&large));
        assert!(!large.is_subset_of(&small));
        assert!(OrdSet::new().is_subset_of(&small));
        assert!(small.is_disjoint(&other));
        assert!(!small.is_disjoint(&large));
    }
}
