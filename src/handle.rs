//! Operations on a possibly absent queue.
//!
//! Each function mirrors a [`Queue`] method but takes the queue as an
//! `Option`. An absent queue is reported as [`QueueError::Absent`] by the
//! fallible operations and ignored by the infallible ones. Removal also takes
//! the output buffer as an `Option`; an absent buffer is treated like one with
//! no room for the terminator.
//!
//! ```
//! use cyclic_queue::{handle, QueueError};
//!
//! let mut queue = handle::new();
//! handle::insert_tail(queue.as_mut(), "ant").unwrap();
//! assert_eq!(handle::size(queue.as_ref()), 1);
//!
//! assert_eq!(handle::insert_tail(None, "bee").unwrap_err(), QueueError::Absent);
//! assert_eq!(handle::size(None), 0);
//!
//! assert_eq!(handle::free(queue), 1);
//! ```

use tracing::debug;

use crate::error::{QueueError, Result};
use crate::queue::{Element, Queue};

fn present<'a>(op: &'static str, queue: Option<&'a mut Queue>) -> Result<&'a mut Queue> {
    queue.ok_or_else(|| {
        debug!(op, "queue handle is absent");
        QueueError::Absent
    })
}

/// Create an empty queue, or `None` if it cannot be allocated.
pub fn new() -> Option<Queue> {
    Queue::try_new().ok()
}

/// Release a queue and every element in it. Returns the number of released
/// elements; freeing an absent queue does nothing.
pub fn free(queue: Option<Queue>) -> usize {
    queue.map_or(0, Queue::destroy)
}

/// Insert a copy of `s` at the head. Fails with [`QueueError::Absent`] on an
/// absent queue.
pub fn insert_head(queue: Option<&mut Queue>, s: &str) -> Result<()> {
    present("insert_head", queue)?.insert_head(s)
}

/// Insert a copy of `s` at the tail. Fails with [`QueueError::Absent`] on an
/// absent queue.
pub fn insert_tail(queue: Option<&mut Queue>, s: &str) -> Result<()> {
    present("insert_tail", queue)?.insert_tail(s)
}

/// Unlink the head element and hand it to the caller, copying its value
/// into `buf`.
///
/// Fails with [`QueueError::Absent`] on an absent queue, then with
/// [`QueueError::Empty`], and only then with [`QueueError::InvalidOutputTarget`]
/// for an absent or empty `buf`.
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Result<Element> {
    present("remove_head", queue)?.remove_head_into(buf.unwrap_or_default())
}

/// Unlink the tail element and hand it to the caller, copying its value
/// into `buf`. Errors are checked as in [`remove_head`].
pub fn remove_tail(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Result<Element> {
    present("remove_tail", queue)?.remove_tail_into(buf.unwrap_or_default())
}

/// Returns the number of elements, or 0 for an absent queue.
pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::size)
}

/// Delete the middle element, see [`Queue::delete_mid`]. Fails with
/// [`QueueError::Absent`] on an absent queue.
pub fn delete_mid(queue: Option<&mut Queue>) -> Result<()> {
    present("delete_mid", queue)?.delete_mid()
}

/// Delete adjacent duplicates, see [`Queue::delete_dup`]. Fails with
/// [`QueueError::Absent`] on an absent queue.
pub fn delete_dup(queue: Option<&mut Queue>) -> Result<()> {
    present("delete_dup", queue)?.delete_dup()
}

/// Swap every two adjacent elements. Does nothing on an absent queue.
pub fn swap(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.swap();
    }
}

/// Reverse the queue in place. Does nothing on an absent queue.
pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

/// Sort the queue in ascending order. Does nothing on an absent queue.
pub fn sort(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.sort();
    }
}
