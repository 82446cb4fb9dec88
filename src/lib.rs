#![deny(unused_imports)]
#![deny(missing_docs)]
#![cfg_attr(all(feature = "bench", test), feature(test))]

//! A pairing heap priority queue for Rust.
//!
//! The heap keeps the most extreme element on top, where "most extreme" is
//! decided by an ordering policy given at construction. `MaxFirst` (the default)
//! keeps the greatest element on top, `MinFirst` the smallest one, and any
//! `Fn(&T, &T) -> bool` closure answering "is `a` less extreme than `b`?"
//! can be used as well.
//!
//! Inserting with `add_node` returns a `Handle` to the stored element. Handles stay
//! valid until their element is popped and allow to raise the priority of an
//! element in place with `update_elt`. After mutating elements in place by other
//! means, `update_priorities` rebuilds the heap order without moving any element.
//!
//! # Example
//!
//! ```rust
//! use pairing_pq::PairingHeap;
//!
//! let mut heap = PairingHeap::new();
//! let handle = heap.add_node(10);
//! heap.push(20);
//! heap.update_elt(handle, 25).unwrap();
//! assert_eq!(heap.top(), Some(&25));
//! ```

#[cfg(all(feature = "bench", test))]
extern crate test;

pub mod compare;
mod error;
mod heap;
mod traits;

pub use crate::compare::{ByKey, Compare, MaxFirst, MinFirst};
pub use crate::error::{Error, Result};
pub use crate::heap::{Drain, Handle, PairingHeap, Values, ValuesMut};
pub use crate::traits::PriorityQueue;
