use std::alloc::{self, Layout};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use thiserror::Error;

use crate::list::iterator::Iter;

pub mod iterator;

mod algorithms;

/// The `List` is a doubly-linked list with owned nodes, implemented as a cyclic list.
/// It allows inserting, removing elements at both ends in constant time.
/// In compromise, accessing or mutating elements at any position take *O*(*n*) time.
///
/// The `List` holds a single pointer `ghost` to the ghost node, whose `next` is the
/// first node and whose `prev` is the last one. There is no cached length:
/// [`List::len`] walks the list.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive (probably the ghost node).
pub struct List<T> {
    ghost: NonNull<Node<T>>,
    _marker: PhantomData<Box<Node<T>>>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

/// The ghost node: the layout of `Node<T>`, with the payload never initialized.
type Ghost<T> = Node<MaybeUninit<T>>;

/// The allocator could not provide memory for a list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to allocate a list node")]
pub struct AllocError;

/// Link `prev.next` to `next` and `next.prev` to `prev`.
///
/// It is unsafe because both `prev` and `next` must be valid nodes; nodes that
/// were adjacent to either of them are left dangling unless linked again.
pub(crate) unsafe fn connect<T>(mut prev: NonNull<Node<T>>, mut next: NonNull<Node<T>>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first element
        // in the list).
        unsafe { self.ghost.as_ref().next }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last element
        // in the list).
        unsafe { self.ghost.as_ref().prev }
    }

    /// Detach a single node `node` from the list, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the list,
    /// or whether it is the ghost node.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        debug_assert!(node != self.ghost, "Cannot detach the ghost node");
        let node = Box::from_raw(node.as_ptr());
        connect(node.prev, node.next);
        node
    }

    /// Attach a detached node `node` to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belong
    /// to the list, or whether they are adjacent (only in `#[cfg(debug_assertions)]`).
    unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
    }

    /// Detach the first node and hand it out as a box, or return `None` if the
    /// list is empty. The node is not freed.
    pub(crate) fn pop_front_node(&mut self) -> Option<Box<Node<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node is a non-ghost node of the list.
        Some(unsafe { self.detach_node(self.front_node()) })
    }

    /// Detach the last node and hand it out as a box, or return `None` if the
    /// list is empty. The node is not freed.
    pub(crate) fn pop_back_node(&mut self) -> Option<Box<Node<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node is a non-ghost node of the list.
        Some(unsafe { self.detach_node(self.back_node()) })
    }

    fn push_front_node(&mut self, node: NonNull<Node<T>>) {
        let (ghost, front) = (self.ghost, self.front_node());
        // SAFETY: `ghost` and `front` are adjacent nodes of the list, `node` is detached.
        unsafe { self.attach_node(ghost, front, node) };
    }

    fn push_back_node(&mut self, node: NonNull<Node<T>>) {
        let (back, ghost) = (self.back_node(), self.ghost);
        // SAFETY: `back` and `ghost` are adjacent nodes of the list, `node` is detached.
        unsafe { self.attach_node(back, ghost, node) };
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use cyclic_queue::List;
    /// let list: List<u32> = List::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            ghost: close_ghost(Node::new_detached(MaybeUninit::uninit())),
            _marker: PhantomData,
        }
    }

    /// Create an empty `List`, or return an error if the ghost node cannot be
    /// allocated.
    pub fn try_new() -> Result<Self, AllocError> {
        Ok(Self {
            ghost: close_ghost(Node::try_new_detached(MaybeUninit::uninit())?),
            _marker: PhantomData,
        })
    }

    /// Returns `true` if the ghost node links to itself.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost
    }

    /// Returns `true` if the `List` holds exactly one element.
    #[inline]
    pub fn is_singular(&self) -> bool {
        !self.is_empty() && self.front_node() == self.back_node()
    }

    /// Counts the elements by walking every node.
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
    /// let mut list = List::new();
    /// list.push_back(2);
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Drops every element, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let mut cleared = 0;
        while self.pop_front_node().is_some() {
            cleared += 1;
        }
        cleared
    }

    pub fn front(&self) -> Option<&T> {
        self.iter().next()
    }

    pub fn back(&self) -> Option<&T> {
        self.iter().next_back()
    }

    /// Link `elt` in as the new first element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_front(&mut self, elt: T) {
        self.push_front_node(Node::new_detached(elt));
    }

    /// Like [`List::push_front`], but reports a node allocation failure instead
    /// of aborting. On failure the list is left untouched and `elt` is dropped.
    pub fn try_push_front(&mut self, elt: T) -> Result<(), AllocError> {
        self.push_front_node(Node::try_new_detached(elt)?);
        Ok(())
    }

    /// Link `elt` in as the new last element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_back(&mut self, elt: T) {
        self.push_back_node(Node::new_detached(elt));
    }

    /// Like [`List::push_back`], but reports a node allocation failure instead
    /// of aborting. On failure the list is left untouched and `elt` is dropped.
    pub fn try_push_back(&mut self, elt: T) -> Result<(), AllocError> {
        self.push_back_node(Node::try_new_detached(elt)?);
        Ok(())
    }

    /// Unlink and return the first element, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 3]);
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_back(), Some(3));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        self.pop_front_node().map(Node::into_element)
    }

    /// Unlink and return the last element, or `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        self.pop_back_node().map(Node::into_element)
    }

    /// Provides a double-ended iterator from the first element to the last.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with given element.
    ///
    /// The `prev` and `next` links are dangling until the node is attached.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        })))
    }

    /// Like [`Node::new_detached`], but returns an error instead of aborting
    /// when the allocator is out of memory.
    ///
    /// The node can be released with `Box::from_raw`, since it is allocated
    /// with the global allocator and the layout of `Node<T>`.
    pub(crate) fn try_new_detached(element: T) -> Result<NonNull<Node<T>>, AllocError> {
        let layout = Layout::new::<Node<T>>();
        // SAFETY: `Node<T>` holds two pointers, so `layout` is never zero-sized.
        let ptr = unsafe { alloc::alloc(layout) }.cast::<Node<T>>();
        let node = NonNull::new(ptr).ok_or(AllocError)?;
        // SAFETY: `node` is freshly allocated with the layout of `Node<T>`.
        unsafe {
            node.as_ptr().write(Node {
                next: NonNull::dangling(),
                prev: NonNull::dangling(),
                element,
            });
        }
        Ok(node)
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

/// Turn a fresh detached ghost into an empty ring, viewed as a node of `T`.
///
/// `Ghost<T>` has the size and alignment of `Node<T>`, and its `element` is
/// never read, so every reference to the ghost as a `Node<T>` stays in bounds.
fn close_ghost<T>(ghost: NonNull<Ghost<T>>) -> NonNull<Node<T>> {
    let ghost = ghost.cast::<Node<T>>();
    // SAFETY: `ghost` is a valid detached node owned by the caller.
    unsafe { connect(ghost, ghost) };
    ghost
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost was allocated as a `Ghost<T>` box, and the list is
        // empty, so nothing links to it any more.
        drop(unsafe { Box::from_raw(self.ghost.cast::<Ghost<T>>().as_ptr()) });
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// Ensure that `List` and its iterator are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
}
