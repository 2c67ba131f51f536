use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::{FromIterator, FusedIterator};

use tracing::{debug, trace};

use crate::error::{QueueError, Result};
use crate::list::iterator::Iter;
use crate::list::{List, Node};

/// A queue of owned strings, backed by a cyclic [`List`] whose ghost node is
/// the queue head.
///
/// Insertion and removal at either end take *O*(1) time. The structural
/// operations ([`delete_mid`], [`delete_dup`], [`swap`], [`reverse`], [`sort`])
/// work by relinking the existing nodes; no string is copied or moved while
/// reordering.
///
/// The queue does not keep a length counter: [`Queue::size`] walks the list.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("gerbil").unwrap();
/// queue.insert_tail("bear").unwrap();
/// queue.insert_head("dolphin").unwrap();
///
/// queue.sort();
/// assert_eq!(queue.iter().collect::<Vec<_>>(), ["bear", "dolphin", "gerbil"]);
///
/// let element = queue.remove_head().unwrap();
/// assert_eq!(element.value(), "bear");
/// element.release();
/// assert_eq!(queue.size(), 2);
/// ```
///
/// [`delete_mid`]: Queue::delete_mid
/// [`delete_dup`]: Queue::delete_dup
/// [`swap`]: Queue::swap
/// [`reverse`]: Queue::reverse
/// [`sort`]: Queue::sort
pub struct Queue {
    pub(crate) list: List<String>,
}

/// A value detached from a [`Queue`] by [`Queue::remove_head`] or
/// [`Queue::remove_tail`].
///
/// It is the very node that was linked into the queue, now owned by the
/// caller. Dropping it (or calling [`Element::release`]) frees both the node
/// and the string.
pub struct Element {
    node: Box<Node<String>>,
}

impl Element {
    pub fn value(&self) -> &str {
        &self.node.element
    }

    /// Move the string out of the element, releasing the node.
    pub fn into_value(self) -> String {
        self.node.into_element()
    }

    /// Release the element and its string.
    pub fn release(self) {
        trace!(len = self.node.element.len(), "released element");
    }

    /// Copy the value into `buf` as a NUL-terminated byte string, truncated to
    /// `buf.len() - 1` bytes. Returns the number of value bytes copied.
    ///
    /// `buf` must not be empty.
    fn copy_to(&self, buf: &mut [u8]) -> usize {
        debug_assert!(!buf.is_empty());
        let bytes = self.node.element.as_bytes();
        let copied = bytes.len().min(buf.len() - 1);
        buf[..copied].copy_from_slice(&bytes[..copied]);
        buf[copied] = 0;
        copied
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.value()).finish()
    }
}

impl AsRef<str> for Element {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

fn fail<T>(op: &'static str, err: QueueError) -> Result<T> {
    debug!(op, %err, "queue operation failed");
    Err(err)
}

fn detached(op: &'static str, node: Box<Node<String>>) -> Element {
    trace!(op, len = node.element.len(), "detached element");
    Element { node }
}

/// Allocate a private copy of `s`, reporting allocation failure.
fn copy_str(s: &str) -> Result<String> {
    let mut value = String::new();
    value.try_reserve_exact(s.len())?;
    value.push_str(s);
    Ok(value)
}

impl Queue {
    /// Create an empty queue.
    ///
    /// Aborts like any std collection if the ghost node cannot be allocated;
    /// see [`Queue::try_new`] for the fallible variant.
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    /// Create an empty queue, or return [`QueueError::AllocFailure`].
    pub fn try_new() -> Result<Self> {
        match List::try_new() {
            Ok(list) => Ok(Self { list }),
            Err(err) => fail("new", err.into()),
        }
    }

    /// Release every element and then the queue itself. Returns the number of
    /// released elements.
    pub fn destroy(mut self) -> usize {
        let released = self.list.clear();
        trace!(released, "destroyed queue");
        released
    }

    /// Returns the number of elements, counted by walking the queue.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn size(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Insert a copy of `s` at the head of the queue.
    ///
    /// On [`QueueError::AllocFailure`] the queue is unchanged.
    pub fn insert_head(&mut self, s: &str) -> Result<()> {
        self.insert_with(s, "insert_head", List::try_push_front)
    }

    /// Insert a copy of `s` at the tail of the queue.
    ///
    /// On [`QueueError::AllocFailure`] the queue is unchanged.
    pub fn insert_tail(&mut self, s: &str) -> Result<()> {
        self.insert_with(s, "insert_tail", List::try_push_back)
    }

    fn insert_with<F>(&mut self, s: &str, op: &'static str, push: F) -> Result<()>
    where
        F: FnOnce(&mut List<String>, String) -> std::result::Result<(), crate::list::AllocError>,
    {
        let value = match copy_str(s) {
            Ok(value) => value,
            Err(err) => return fail(op, err),
        };
        if let Err(err) = push(&mut self.list, value) {
            return fail(op, err.into());
        }
        trace!(op, len = s.len(), "inserted element");
        Ok(())
    }

    /// Unlink the head element and hand it to the caller.
    ///
    /// The element is not freed: the caller owns it from now on.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::{Queue, QueueError};
    ///
    /// let mut queue = Queue::new();
    /// assert_eq!(queue.remove_head().unwrap_err(), QueueError::Empty);
    ///
    /// queue.insert_tail("a").unwrap();
    /// queue.insert_tail("b").unwrap();
    /// assert_eq!(queue.remove_head().unwrap().value(), "a");
    /// ```
    pub fn remove_head(&mut self) -> Result<Element> {
        match self.list.pop_front_node() {
            Some(node) => Ok(detached("remove_head", node)),
            None => fail("remove_head", QueueError::Empty),
        }
    }

    /// Unlink the tail element and hand it to the caller.
    pub fn remove_tail(&mut self) -> Result<Element> {
        match self.list.pop_back_node() {
            Some(node) => Ok(detached("remove_tail", node)),
            None => fail("remove_tail", QueueError::Empty),
        }
    }

    /// Like [`Queue::remove_head`], and also copy the removed value into
    /// `buf`: at most `buf.len() - 1` bytes followed by a `0` byte.
    ///
    /// Fails with [`QueueError::Empty`] on an empty queue, and with
    /// [`QueueError::InvalidOutputTarget`] if `buf` is empty. In both cases
    /// nothing is unlinked.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("giraffe").unwrap();
    ///
    /// let mut buf = [0xff; 4];
    /// let element = queue.remove_head_into(&mut buf).unwrap();
    /// assert_eq!(&buf, b"gir\0");
    /// assert_eq!(element.value(), "giraffe");
    /// ```
    pub fn remove_head_into(&mut self, buf: &mut [u8]) -> Result<Element> {
        self.check_removal("remove_head", buf)?;
        let element = self.remove_head()?;
        element.copy_to(buf);
        Ok(element)
    }

    /// Like [`Queue::remove_tail`], and also copy the removed value into
    /// `buf`. See [`Queue::remove_head_into`].
    pub fn remove_tail_into(&mut self, buf: &mut [u8]) -> Result<Element> {
        self.check_removal("remove_tail", buf)?;
        let element = self.remove_tail()?;
        element.copy_to(buf);
        Ok(element)
    }

    fn check_removal(&self, op: &'static str, buf: &[u8]) -> Result<()> {
        if self.is_empty() {
            return fail(op, QueueError::Empty);
        }
        if buf.is_empty() {
            return fail(op, QueueError::InvalidOutputTarget);
        }
        Ok(())
    }

    /// Delete the middle element: the one at index ⌊*n* / 2⌋ counted from the
    /// head, starting at 0. For six elements this is the fourth one; a single
    /// element is deleted, leaving the queue empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d", "e", "f"]);
    /// queue.delete_mid().unwrap();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["a", "b", "c", "e", "f"]);
    /// ```
    pub fn delete_mid(&mut self) -> Result<()> {
        if self.is_empty() {
            return fail("delete_mid", QueueError::Empty);
        }
        if let Some(value) = self.list.remove_mid() {
            trace!(len = value.len(), "deleted middle element");
        }
        Ok(())
    }

    /// Delete adjacent duplicates of a queue sorted in ascending order.
    ///
    /// Of each run of equal values, all but the *last* node are deleted, so
    /// every value stays in the queue exactly once. The queue is not checked
    /// for being sorted; on an unsorted queue only adjacent equal values are
    /// collapsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["a", "a", "b", "c", "c", "c"]);
    /// queue.delete_dup().unwrap();
    /// assert_eq!(queue.iter().collect::<Vec<_>>(), ["a", "b", "c"]);
    /// ```
    pub fn delete_dup(&mut self) -> Result<()> {
        if self.is_empty() {
            return fail("delete_dup", QueueError::Empty);
        }
        let removed = self.list.dedup();
        trace!(removed, "deleted duplicates");
        Ok(())
    }

    /// Swap every two adjacent elements. A trailing unpaired element stays
    /// at the tail. No-op on queues with fewer than two elements.
    pub fn swap(&mut self) {
        self.list.swap_pairs();
        trace!("swapped pairs");
    }

    /// Reverse the queue in place. No-op on an empty queue.
    pub fn reverse(&mut self) {
        self.list.reverse();
        trace!("reversed queue");
    }

    /// Sort the queue in ascending byte-wise order of the values, with a
    /// merge sort that relinks the nodes.
    ///
    /// Of equal values, the one from the right half of a merge goes first.
    /// No-op on queues with fewer than two elements.
    pub fn sort(&mut self) {
        self.list.sort();
        trace!("sorted queue");
    }

    /// Returns `true` if the values are in ascending byte-wise order.
    pub fn is_sorted(&self) -> bool {
        self.list.is_sorted_by(|a, b| a <= b)
    }

    pub fn head(&self) -> Option<&str> {
        self.list.front().map(String::as_str)
    }

    pub fn tail(&self) -> Option<&str> {
        self.list.back().map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.iter().any(|v| v == value)
    }

    /// Iterate over the values from head to tail.
    pub fn iter(&self) -> Values<'_> {
        Values {
            inner: self.list.iter(),
        }
    }
}

/// An iterator over the values of a [`Queue`], created by [`Queue::iter`].
#[derive(Clone)]
pub struct Values<'a> {
    inner: Iter<'a, String>,
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }
}

impl<'a> DoubleEndedIterator for Values<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl<'a> FusedIterator for Values<'a> {}

impl Debug for Values<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Values").field(&self.inner).finish()
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Queue {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl PartialEq for Queue {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl Eq for Queue {}

impl Hash for Queue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.list.hash(state);
    }
}

impl<'a> FromIterator<&'a str> for Queue {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl<'a> Extend<&'a str> for Queue {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        self.list.extend(iter.into_iter().map(str::to_owned));
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        let released = self.list.clear();
        if released > 0 {
            trace!(released, "dropped queue");
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use std::fmt;

    use serde::de::{Error as _, SeqAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Queue;

    impl Serialize for Queue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de> Deserialize<'de> for Queue {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct QueueVisitor;

            impl<'de> Visitor<'de> for QueueVisitor {
                type Value = Queue;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a sequence of strings")
                }

                fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Queue, A::Error> {
                    let mut queue = Queue::try_new().map_err(A::Error::custom)?;
                    while let Some(value) = seq.next_element::<String>()? {
                        queue.list.try_push_back(value).map_err(A::Error::custom)?;
                    }
                    Ok(queue)
                }
            }

            deserializer.deserialize_seq(QueueVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(queue: &Queue) -> Vec<&str> {
        queue.iter().collect()
    }

    #[test]
    fn queue_insert_and_remove() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.size(), 0);

        queue.insert_head("b").unwrap();
        queue.insert_head("a").unwrap();
        queue.insert_tail("c").unwrap();
        assert_eq!(queue.size(), 3);
        assert_eq!(queue.head(), Some("a"));
        assert_eq!(queue.tail(), Some("c"));

        let tail = queue.remove_tail().unwrap();
        assert_eq!(tail.value(), "c");
        assert_eq!(tail.into_value(), "c");
        let head = queue.remove_head().unwrap();
        assert_eq!(head.value(), "a");
        head.release();
        assert_eq!(values(&queue), ["b"]);

        queue.remove_head().unwrap();
        assert_eq!(queue.remove_head().unwrap_err(), QueueError::Empty);
        assert_eq!(queue.remove_tail().unwrap_err(), QueueError::Empty);
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn queue_insert_copies_the_string() {
        let mut queue = Queue::new();
        let mut source = String::from("cat");
        queue.insert_tail(&source).unwrap();
        source.push_str("fish");
        queue.insert_tail("").unwrap();
        assert_eq!(values(&queue), ["cat", ""]);
    }

    #[test]
    fn queue_remove_into_buffer() {
        let mut queue = Queue::from_iter(["meerkat", "dog"]);

        let mut buf = [0xffu8; 16];
        let element = queue.remove_head_into(&mut buf).unwrap();
        assert_eq!(&buf[..8], b"meerkat\0");
        assert_eq!(element.value(), "meerkat");

        let mut buf = [0xffu8; 1];
        let element = queue.remove_tail_into(&mut buf).unwrap();
        assert_eq!(buf, [0]);
        assert_eq!(element.value(), "dog");

        let mut buf = [0u8; 4];
        assert_eq!(
            queue.remove_head_into(&mut buf).unwrap_err(),
            QueueError::Empty
        );
    }

    #[test]
    fn queue_remove_into_empty_buffer_leaves_queue() {
        let mut queue = Queue::from_iter(["x"]);
        assert_eq!(
            queue.remove_head_into(&mut []).unwrap_err(),
            QueueError::InvalidOutputTarget
        );
        assert_eq!(
            queue.remove_tail_into(&mut []).unwrap_err(),
            QueueError::InvalidOutputTarget
        );
        assert_eq!(values(&queue), ["x"]);
    }

    #[test]
    fn queue_remove_into_truncates_bytes() {
        let mut queue = Queue::from_iter(["héllo"]);
        let mut buf = [0xffu8; 3];
        queue.remove_head_into(&mut buf).unwrap();
        assert_eq!(buf, [b'h', 0xc3, 0]);
    }

    #[test]
    fn queue_delete_mid() {
        let mut queue = Queue::from_iter(["a", "b", "c", "d", "e", "f"]);
        queue.delete_mid().unwrap();
        assert_eq!(values(&queue), ["a", "b", "c", "e", "f"]);
        queue.delete_mid().unwrap();
        assert_eq!(values(&queue), ["a", "b", "e", "f"]);

        let mut queue = Queue::from_iter(["a", "b"]);
        queue.delete_mid().unwrap();
        assert_eq!(values(&queue), ["a"]);
        queue.delete_mid().unwrap();
        assert!(queue.is_empty());
        assert_eq!(queue.delete_mid().unwrap_err(), QueueError::Empty);
    }

    #[test]
    fn queue_delete_mid_follows_half_index() {
        let names: Vec<String> = (0..12).map(|i| format!("v{:02}", i)).collect();
        for n in 1..=names.len() {
            let mut queue = Queue::from_iter(names[..n].iter().map(String::as_str));
            let mut expected = names[..n].to_vec();
            expected.remove(n / 2);
            queue.delete_mid().unwrap();
            assert_eq!(values(&queue), expected);
        }
    }

    #[test]
    fn queue_delete_dup() {
        let mut queue = Queue::from_iter(["a", "a", "a", "b", "c", "c", "d"]);
        queue.delete_dup().unwrap();
        assert_eq!(values(&queue), ["a", "b", "c", "d"]);

        let mut queue = Queue::from_iter(["z"]);
        queue.delete_dup().unwrap();
        assert_eq!(values(&queue), ["z"]);

        let mut queue = Queue::new();
        assert_eq!(queue.delete_dup().unwrap_err(), QueueError::Empty);
    }

    #[test]
    fn queue_swap() {
        let mut queue = Queue::from_iter(["a", "b", "c", "d"]);
        queue.swap();
        assert_eq!(values(&queue), ["b", "a", "d", "c"]);

        let mut queue = Queue::from_iter(["a", "b", "c"]);
        queue.swap();
        assert_eq!(values(&queue), ["b", "a", "c"]);

        let mut queue = Queue::from_iter(["a"]);
        queue.swap();
        assert_eq!(values(&queue), ["a"]);

        let mut queue = Queue::new();
        queue.swap();
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_reverse() {
        let mut queue = Queue::from_iter(["a", "b", "c"]);
        queue.reverse();
        assert_eq!(values(&queue), ["c", "b", "a"]);
        assert_eq!(queue.iter().rev().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(queue.head(), Some("c"));
        assert_eq!(queue.tail(), Some("a"));

        let mut queue = Queue::new();
        queue.reverse();
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_sort_is_bytewise() {
        let mut queue = Queue::from_iter(["b", "B", "a", "ab", "", "a"]);
        queue.sort();
        assert!(queue.is_sorted());
        assert_eq!(values(&queue), ["", "B", "a", "a", "ab", "b"]);
        queue.delete_dup().unwrap();
        assert_eq!(values(&queue), ["", "B", "a", "ab", "b"]);
    }

    #[test]
    fn queue_destroy_counts_elements() {
        let queue = Queue::from_iter(["a", "b", "c"]);
        assert_eq!(queue.destroy(), 3);
        assert_eq!(Queue::try_new().unwrap().destroy(), 0);
    }

    #[test]
    fn queue_clone_eq_contains() {
        let queue = Queue::from_iter(["x", "y"]);
        let cloned = queue.clone();
        assert_eq!(queue, cloned);
        assert!(cloned.contains("y"));
        assert!(!cloned.contains("z"));
        assert_eq!(format!("{:?}", queue), r#"["x", "y"]"#);
        assert_eq!(format!("{:?}", Queue::new()), "[]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn queue_serde_round_trip() {
        let queue = Queue::from_iter(["one", "two"]);
        let json = serde_json::to_string(&queue).unwrap();
        assert_eq!(json, r#"["one","two"]"#);
        let restored: Queue = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, queue);
        assert!(serde_json::from_str::<Queue>("[1]").is_err());
    }
}
