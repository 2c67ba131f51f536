use crate::list::{List, Node};
use std::cmp::Ordering;
use std::ptr::NonNull;

impl<T> List<T> {
    /// Sort the list in ascending order.
    ///
    /// When two elements compare equal, the one from the right half of a
    /// merge is taken first, so this sort is *not* stable, but is fully
    /// deterministic.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1) memory
    /// besides the *O*(log(*n*)) recursion.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is a top-down merge sort over the linked nodes.
    /// There is no extra temporary storage during merging: nodes are relinked.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// let mut list = List::from_iter([5, 2, 4, 3, 1]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        merge_sort(self, |a, b| a.lt(b));
    }

    /// Sort the list with a comparator function.
    ///
    /// Ties are resolved as in [`List::sort`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// let mut v = List::from_iter([5, 4, 1, 3, 2]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(v.iter().copied().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }

    /// Sorts the list with a key extraction function.
    ///
    /// Ties are resolved as in [`List::sort`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// let mut v = List::from_iter([-5i32, 4, 1, -3, 2]);
    ///
    /// v.sort_by_key(|k| k.abs());
    /// assert_eq!(v.iter().copied().collect::<Vec<_>>(), [1, 2, -3, 4, -5]);
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        merge_sort(self, |a, b| f(a).lt(&f(b)));
    }
}

fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if list.is_empty() || list.is_singular() {
        return;
    }
    // While sorting, the ghost node only terminates the linear chains that are
    // split and merged. Only `next` links are maintained, `prev` links are
    // stale until `relink_from_ghost`.
    let ghost = list.ghost_node();
    // SAFETY: the list has at least two nodes, and `front..ghost` is the whole
    // chain of them.
    unsafe {
        let sorted = merge_sort_chain(list.front_node(), ghost, &mut less);
        relink_from_ghost(ghost, sorted);
    }
}

/// Find the middle of the non-empty chain `head..end` with a fast and a slow
/// pointer, cut the chain after it, and return the head of the second half.
/// The first half keeps the extra node of an odd-length chain.
unsafe fn split_chain<T>(head: NonNull<Node<T>>, end: NonNull<Node<T>>) -> NonNull<Node<T>> {
    let (mut fast, mut slow) = (head, head);
    loop {
        let next = fast.as_ref().next;
        if next == end || next.as_ref().next == end {
            break;
        }
        fast = next.as_ref().next;
        slow = slow.as_ref().next;
    }
    let mid = slow.as_ref().next;
    slow.as_mut().next = end;
    mid
}

unsafe fn merge_sort_chain<T, F>(
    head: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    if head.as_ref().next == end {
        return head;
    }
    let mid = split_chain(head, end);
    let left = merge_sort_chain(head, end, less);
    let right = merge_sort_chain(mid, end, less);
    merge_chains(left, right, end, less)
}

/// Merge two sorted non-empty chains ending at `end` into one, and return
/// its head.
unsafe fn merge_chains<T, F>(
    mut left: NonNull<Node<T>>,
    mut right: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let head = take_lesser(&mut left, &mut right, less);
    let mut tail = head;
    while left != end && right != end {
        let next = take_lesser(&mut left, &mut right, less);
        tail.as_mut().next = next;
        tail = next;
    }
    tail.as_mut().next = if left != end { left } else { right };
    head
}

/// Pop the lesser head of the two chains. Equal heads are taken from `right`.
unsafe fn take_lesser<T, F>(
    left: &mut NonNull<Node<T>>,
    right: &mut NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let side = if less(&left.as_ref().element, &right.as_ref().element) {
        left
    } else {
        right
    };
    let node = *side;
    *side = node.as_ref().next;
    node
}

/// Attach the chain `head..ghost` to the ghost node again, rebuilding every
/// `prev` link in a single forward pass.
unsafe fn relink_from_ghost<T>(mut ghost: NonNull<Node<T>>, head: NonNull<Node<T>>) {
    ghost.as_mut().next = head;
    let (mut prev, mut node) = (ghost, head);
    while node != ghost {
        node.as_mut().prev = prev;
        prev = node;
        node = node.as_ref().next;
    }
    ghost.as_mut().prev = prev;
}
