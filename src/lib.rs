//! This crate provides a queue of owned strings, stored in a doubly-linked
//! cyclic list with a ghost node that holds no value.
//!
//! The [`Queue`] inserts and removes elements at both ends in constant time,
//! and reorders itself by relinking nodes: [`Queue::reverse`], [`Queue::swap`],
//! [`Queue::sort`], [`Queue::delete_mid`] and [`Queue::delete_dup`] never copy
//! or move a string.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::{Queue, QueueError};
//!
//! let mut queue = Queue::new();
//! queue.insert_tail("cat").unwrap();
//! queue.insert_tail("ant").unwrap();
//! queue.insert_head("ant").unwrap();
//!
//! queue.sort();
//! queue.delete_dup().unwrap();
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["ant", "cat"]);
//!
//! let mut buf = [0u8; 3];
//! let element = queue.remove_tail_into(&mut buf).unwrap();
//! assert_eq!(element.value(), "cat");
//! assert_eq!(&buf, b"ca\0");
//!
//! queue.remove_head().unwrap().release();
//! assert_eq!(queue.remove_head().unwrap_err(), QueueError::Empty);
//! ```
//!
//! The [`handle`] module offers the same operations on an `Option<&mut Queue>`,
//! for callers that may hold no queue at all.
//!
//! # Memory Layout
//!
//! The queue is a [`List<String>`](List). Its memory layout is like the
//! following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊ unused T  ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains only a pointer `ghost` that points to the ghost node.
//! There is no length field, so the size of a queue is counted by walking it.
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that points to the next element (or the ghost node if it
//!   is the last element in the list);
//! - the `prev` pointer that points to the previous element (or the ghost node if
//!   it is the first element in the list);
//! - the actual payload `T` that depends on the element type of the list. The
//!   ghost node has room for one but never initializes it.
//!
//! Initially, there is a ghost node in an empty list, of which the `next` and `prev`
//! pointer point to itself. As elements are inserted into the list, `ghost.next`
//! points to the first element, and `ghost.prev` points to the last element.
//!
//! A removed queue element is that very node, detached: an [`Element`] owns it
//! until it is released.
//!
//! # Iteration
//!
//! [`Queue::iter`] and [`List::iter`] walk from head to tail, or back from the
//! tail with `rev`. They stop at the ghost node: the iterators are fused and
//! never wrap around.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let queue = Queue::from_iter(["x", "y", "z"]);
//! let mut values = queue.iter();
//! assert_eq!(values.next(), Some("x"));
//! assert_eq!(values.next_back(), Some("z"));
//! assert_eq!(values.next(), Some("y"));
//! assert_eq!(values.next(), None);
//! assert_eq!(values.next_back(), None);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` and `Deserialize` for [`Queue`], as a sequence of
//!   strings.

#[doc(inline)]
pub use error::{QueueError, Result};
#[doc(inline)]
pub use list::iterator::Iter;
#[doc(inline)]
pub use list::{AllocError, List};
#[doc(inline)]
pub use queue::{Element, Queue, Values};

pub mod error;
pub mod handle;
pub mod list;

mod queue;
