use crate::list::{connect, List, Node};
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

// The element count is hashed last, since nothing caches it.
impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let count = self.iter().inspect(|elt| elt.hash(state)).count();
        count.hash(state);
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Reverse the list in place by swapping the `next` and `prev` links of
    /// every node, the ghost node included. No element is moved or copied.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// list.reverse();
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        if self.is_empty() {
            return;
        }
        let mut ghost = self.ghost_node();
        let mut node = self.front_node();
        // SAFETY: every node reachable from the ghost node is valid, and each of
        // them is visited exactly once: after the swap, `prev` is the old `next`.
        unsafe {
            while node != ghost {
                let current = node.as_mut();
                std::mem::swap(&mut current.next, &mut current.prev);
                node = current.prev;
            }
            let ghost = ghost.as_mut();
            std::mem::swap(&mut ghost.next, &mut ghost.prev);
        }
    }

    /// Swap every two adjacent elements, by relinking the nodes: positions
    /// `(0, 1)`, `(2, 3)`, and so on. A trailing unpaired element stays put.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter(['a', 'b', 'c', 'd', 'e']);
    /// list.swap_pairs();
    /// assert_eq!(list.iter().collect::<String>(), "badce");
    /// ```
    pub fn swap_pairs(&mut self) {
        if self.is_empty() || self.is_singular() {
            return;
        }
        let ghost = self.ghost_node();
        let mut first = self.front_node();
        // SAFETY: `first` and `second` are checked to be non-ghost nodes of the
        // list before they are relinked.
        unsafe {
            while first != ghost {
                let second = first.as_ref().next;
                if second == ghost {
                    break;
                }
                move_node(second, first);
                first = first.as_ref().next;
            }
        }
    }

    /// Remove and return the middle element: the one at index ⌊*n* / 2⌋ counted
    /// from the front, starting at 0. Returns `None` if the list is empty.
    ///
    /// Two pointers walk in from both ends until they meet, so no separate
    /// length count is needed.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter(['a', 'b', 'c', 'd', 'e', 'f']);
    /// assert_eq!(list.remove_mid(), Some('d'));
    /// assert_eq!(list.remove_mid(), Some('c'));
    /// assert_eq!(list.iter().collect::<String>(), "abef");
    /// ```
    pub fn remove_mid(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let (mut front, mut back) = (self.front_node(), self.back_node());
        // SAFETY: `front` and `back` stay element nodes: they move towards each
        // other and stop once they meet or become adjacent.
        unsafe {
            while front != back && front.as_ref().next != back {
                front = front.as_ref().next;
                back = back.as_ref().prev;
            }
            Some(self.detach_node(back).into_element())
        }
    }

    /// Remove consecutive repeated elements, leaving the *last* element of each
    /// run. Returns the number of removed elements.
    ///
    /// On a sorted list this leaves every value exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 1, 2, 3, 3, 3, 1]);
    /// assert_eq!(list.dedup(), 3);
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 1]);
    /// ```
    pub fn dedup(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.dedup_by(|a, b| a == b)
    }

    /// Like [`List::dedup`], with `same_bucket(current, next)` deciding whether
    /// `current` is removed in favour of its successor `next`.
    pub fn dedup_by<F>(&mut self, mut same_bucket: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        let mut removed = 0;
        while node != ghost {
            // SAFETY: `node` is a non-ghost node of the list, and so is `next`
            // once checked against the ghost node.
            let next = unsafe { node.as_ref().next };
            if next == ghost {
                break;
            }
            if unsafe { same_bucket(&node.as_ref().element, &next.as_ref().element) } {
                drop(unsafe { self.detach_node(node) });
                removed += 1;
            }
            node = next;
        }
        removed
    }

    /// Returns `true` if each element is less than or equal to its successor.
    pub fn is_sorted_by<F>(&self, mut less_or_equal: F) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut iter = self.iter();
        let Some(mut prev) = iter.next() else {
            return true;
        };
        for item in iter {
            if !less_or_equal(prev, item) {
                return false;
            }
            prev = item;
        }
        true
    }
}

/// Move the node `from` to the position before the node `to`.
unsafe fn move_node<T>(from: NonNull<Node<T>>, to: NonNull<Node<T>>) {
    connect(from.as_ref().prev, from.as_ref().next);
    connect(to.as_ref().prev, from);
    connect(from, to);
}

#[cfg(test)]
mod tests {
    use crate::list::tests::{assert_well_linked, DropChecker};
    use crate::List;
    use std::cell::RefCell;

    #[test]
    fn list_reverse() {
        fn test_reverse(input: Vec<i32>) {
            let mut list = List::from_iter(input.clone());
            list.reverse();
            assert_eq!(assert_well_linked(&list), input.len());
            let reversed: Vec<i32> = input.iter().rev().copied().collect();
            assert_eq!(list.iter().copied().collect::<Vec<_>>(), reversed);
            assert_eq!(list.front(), input.last());
            assert_eq!(list.back(), input.first());
            list.reverse();
            assert_eq!(list.iter().copied().collect::<Vec<_>>(), input);
        }
        test_reverse(vec![]);
        test_reverse(vec![1]);
        test_reverse(vec![1, 2]);
        test_reverse((0..9).collect());
    }

    #[test]
    fn list_swap_pairs() {
        fn test_swap(input: Vec<char>, swapped: &str) {
            let mut list = List::from_iter(input.clone());
            list.swap_pairs();
            assert_eq!(assert_well_linked(&list), input.len());
            assert_eq!(list.iter().collect::<String>(), swapped);
        }
        test_swap(vec![], "");
        test_swap(vec!['a'], "a");
        test_swap(vec!['a', 'b'], "ba");
        test_swap(vec!['a', 'b', 'c'], "bac");
        test_swap(vec!['a', 'b', 'c', 'd'], "badc");
        test_swap(vec!['a', 'b', 'c', 'd', 'e', 'f', 'g'], "badcfeg");
    }

    #[test]
    fn list_remove_mid_at_half_length() {
        for n in 1..20 {
            let mut list = List::from_iter(0..n);
            assert_eq!(list.remove_mid(), Some(n / 2));
            assert_eq!(assert_well_linked(&list), n as usize - 1);
        }
    }

    #[test]
    fn list_remove_mid() {
        let mut list = List::from_iter(0..5);
        assert_eq!(list.remove_mid(), Some(2));
        assert_eq!(list.remove_mid(), Some(3));
        assert_eq!(list.remove_mid(), Some(1));
        assert_eq!(list.remove_mid(), Some(4));
        assert_eq!(list.remove_mid(), Some(0));
        assert_eq!(list.remove_mid(), None);
        assert_eq!(assert_well_linked(&list), 0);
    }

    #[test]
    fn list_dedup_keeps_last_of_run() {
        let dropped = RefCell::new(Vec::new());
        let mut list = List::new();
        for (value, id) in [(1, 10), (1, 11), (2, 20), (3, 30), (3, 31), (3, 32)] {
            list.push_back((value, DropChecker::new(id, &dropped)));
        }
        assert_eq!(list.dedup_by(|a, b| a.0 == b.0), 3);
        assert_eq!(dropped.borrow().as_slice(), &[10, 30, 31]);
        assert_eq!(
            Vec::from_iter(list.iter().map(|(_, checker)| checker.value)),
            vec![11, 20, 32]
        );
        assert_eq!(assert_well_linked(&list), 3);
    }

    #[test]
    fn list_dedup_edge_cases() {
        let mut list = List::<i32>::new();
        assert_eq!(list.dedup(), 0);
        list.push_back(4);
        assert_eq!(list.dedup(), 0);
        list.extend([4, 4]);
        assert_eq!(list.dedup(), 2);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [4]);
    }

    #[test]
    fn list_is_sorted_by() {
        assert!(List::<i32>::new().is_sorted_by(|a, b| a <= b));
        assert!(List::from_iter([1, 1, 2]).is_sorted_by(|a, b| a <= b));
        assert!(!List::from_iter([2, 1]).is_sorted_by(|a, b| a <= b));
    }

    #[test]
    fn list_clone_and_eq() {
        let list = List::from_iter(["p", "q"]);
        let cloned = list.clone();
        assert_eq!(list, cloned);
        assert!(cloned.contains(&"q"));
        assert_ne!(list, List::from_iter(["p"]));
    }

    #[test]
    fn list_hash_follows_eq() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash_of<T: Hash>(value: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }
        let list = List::from_iter([3, 1, 2]);
        assert_eq!(hash_of(&list), hash_of(&list.clone()));
        assert_ne!(hash_of(&List::<i32>::new()), hash_of(&List::from_iter([0])));
    }
}
