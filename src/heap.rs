//! The pairing heap.
//!
//! Nodes live within a `SlotMap` arena and are linked through keys: every node
//! owns the head of its child list (`child`) and the next entry of the child list
//! it belongs to (`sibling`), and refers back to the node owning that list (`parent`).
//!
//! Nodes are never moved to another slot once inserted. This is what keeps the
//! handles returned by `add_node` valid until their element gets popped.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::ops::{Index, IndexMut};

use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

use crate::compare::{Compare, MaxFirst};
use crate::error::{Error, Result};
use crate::traits::PriorityQueue;

new_key_type! {
    struct NodeKey;
}

/// A handle to access stored elements within a `PairingHeap`.
///
/// Handles are always local to the heap that created them and should not be
/// exchanged between heaps. A handle turns stale once its element is popped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Handle(NodeKey);

#[derive(Debug, Clone)]
struct Node<T> {
    elem: T,
    child: Option<NodeKey>,
    sibling: Option<NodeKey>,
    parent: Option<NodeKey>,
}

impl<T> Node<T> {
    #[inline]
    fn new(elem: T) -> Self {
        Node {
            elem,
            child: None,
            sibling: None,
            parent: None,
        }
    }
}

/// A pairing heap with handles to its elements.
///
/// The element on top is always the most extreme one under the ordering
/// policy `C`, a max-heap with the default `MaxFirst` policy.
///
/// Inserting elements via `add_node` provides the caller with handles
/// that make accessing the elements possible. A handle can be used to raise
/// the priority of its element with `update_elt`.
///
/// Elements can also be mutated in place through `get_mut`, `values_mut` or
/// indexing. Doing so may break the heap order, which is restored by calling
/// `update_priorities` before using the heap again.
pub struct PairingHeap<T, C = MaxFirst> {
    /// The most extreme node, `None` if the heap is empty.
    root: Option<NodeKey>,

    /// Every live node. The number of nodes is the element count.
    nodes: SlotMap<NodeKey, Node<T>>,

    compare: C,
}

impl<T: Ord> PairingHeap<T, MaxFirst> {
    /// Creates a new empty max-heap.
    #[inline]
    pub fn new() -> Self {
        PairingHeap::with_compare(MaxFirst)
    }
}

impl<T: Ord> Default for PairingHeap<T, MaxFirst> {
    fn default() -> Self {
        PairingHeap::new()
    }
}

impl<T, C> PairingHeap<T, C>
where
    C: Compare<T>,
{
    /// Creates a new empty `PairingHeap` ordered by the given policy.
    #[inline]
    pub fn with_compare(compare: C) -> Self {
        PairingHeap {
            root: None,
            nodes: SlotMap::with_key(),
            compare,
        }
    }

    /// Creates a `PairingHeap` ordered by the given policy out of the given elements.
    pub fn from_iter_with_compare<I>(iter: I, compare: C) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut heap = PairingHeap::with_compare(compare);
        heap.extend(iter);
        heap
    }

    /// Returns the number of elements stored in this `PairingHeap`.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if this `PairingHeap` is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the ordering policy of this `PairingHeap`.
    #[inline]
    pub fn compare(&self) -> &C {
        &self.compare
    }

    /// Note that this won't fail on usage for a correct implementation of `PairingHeap`.
    #[inline]
    fn node(&self, key: NodeKey) -> &Node<T> {
        &self.nodes[key]
    }

    /// Note that this won't fail on usage for a correct implementation of `PairingHeap`.
    #[inline]
    fn node_mut(&mut self, key: NodeKey) -> &mut Node<T> {
        &mut self.nodes[key]
    }

    /// Links the given `lower` tree under the given `upper` tree as its new first child.
    ///
    /// `upper` keeps its own sibling and parent links.
    #[inline]
    fn link(&mut self, upper: NodeKey, lower: NodeKey) {
        debug_assert!(upper != lower, "cannot link to self!");

        let first = self.node(upper).child;
        let node = self.node_mut(lower);
        node.sibling = first;
        node.parent = Some(upper);
        self.node_mut(upper).child = Some(lower);
    }

    /// Combines two heap ordered trees and returns the root of the result.
    ///
    /// On ties `fst` stays on top.
    fn meld(&mut self, fst: Option<NodeKey>, snd: Option<NodeKey>) -> Option<NodeKey> {
        match (fst, snd) {
            (None, tree) | (tree, None) => tree,
            (Some(fst), Some(snd)) => {
                if self
                    .compare
                    .less_extreme(&self.node(fst).elem, &self.node(snd).elem)
                {
                    self.link(snd, fst);
                    Some(snd)
                } else {
                    self.link(fst, snd);
                    Some(fst)
                }
            }
        }
    }

    /// Combines the sibling list starting at `first` into a single tree.
    ///
    /// The two oldest trees of the queue are melded and the result is queued
    /// at the back until only one tree is left.
    fn combine_siblings(&mut self, first: Option<NodeKey>) -> Option<NodeKey> {
        let mut queue = VecDeque::new();
        let mut cursor = first;
        while let Some(key) = cursor {
            let node = self.node_mut(key);
            cursor = node.sibling.take();
            node.parent = None;
            queue.push_back(key);
        }
        loop {
            match (queue.pop_front(), queue.pop_front()) {
                (Some(fst), Some(snd)) => {
                    let melded = self.meld(Some(fst), Some(snd));
                    queue.extend(melded);
                }
                (last, _) => return last,
            }
        }
    }

    /// Inserts the given element into this `PairingHeap`.
    #[inline]
    pub fn push(&mut self, elem: T) {
        self.add_node(elem);
    }

    /// Inserts the given element into this `PairingHeap` and returns a `Handle`
    /// to it that allows to directly address it.
    ///
    /// The handle is for example required in order to use `update_elt`.
    pub fn add_node(&mut self, elem: T) -> Handle {
        let key = self.nodes.insert(Node::new(elem));
        self.root = self.meld(self.root, Some(key));
        Handle(key)
    }

    /// Returns a reference to the most extreme element if not empty.
    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.root.map(|root| &self.node(root).elem)
    }

    /// Removes the most extreme element from this `PairingHeap` and returns it.
    ///
    /// Invalidates the handle of the removed element.
    pub fn pop(&mut self) -> Option<T> {
        let root = self.root.take()?;
        let node = self.nodes.remove(root)?;
        self.root = self.combine_siblings(node.child);
        Some(node.elem)
    }

    /// Cuts the given `child` out of the child list of its parent.
    ///
    /// Afterwards `child` is the root of a detached tree.
    fn cut(&mut self, child: NodeKey) {
        debug_assert!(self.node(child).parent.is_some(), "cannot cut a root!");

        let parent = match self.node(child).parent {
            Some(parent) => parent,
            None => unsafe { ::unreachable::unreachable() },
        };
        let next = self.node(child).sibling;
        if self.node(parent).child == Some(child) {
            self.node_mut(parent).child = next;
        } else {
            let mut prev = self.node(parent).child;
            while let Some(key) = prev {
                if self.node(key).sibling == Some(child) {
                    break;
                }
                prev = self.node(key).sibling;
            }
            match prev {
                Some(prev) => self.node_mut(prev).sibling = next,
                None => unsafe { ::unreachable::unreachable() },
            }
        }
        let node = self.node_mut(child);
        node.sibling = None;
        node.parent = None;
    }

    /// Replaces the element associated with the given `handle` by `new_elem`
    /// which must be strictly more extreme than the current one.
    ///
    /// Fails without touching the heap if the handle is stale or if
    /// `new_elem` is not more extreme.
    pub fn update_elt(&mut self, handle: Handle, new_elem: T) -> Result<()> {
        let key = handle.0;
        let node = self.nodes.get(key).ok_or(Error::InvalidHandle)?;
        if !self.compare.less_extreme(&node.elem, &new_elem) {
            debug!("rejected update_elt: new value is not more extreme");
            return Err(Error::NotMoreExtreme);
        }
        self.node_mut(key).elem = new_elem;

        let parent = match self.node(key).parent {
            // The root only gained priority.
            None => return Ok(()),
            Some(parent) => parent,
        };
        if self
            .compare
            .less_extreme(&self.node(parent).elem, &self.node(key).elem)
        {
            self.cut(key);
            self.root = self.meld(self.root, Some(key));
        }
        Ok(())
    }

    /// Restores the heap order after elements were mutated in place.
    ///
    /// Every node is detached from the tree and melded into a new one.
    /// Nodes stay within their slots, thus all handles remain valid.
    pub fn update_priorities(&mut self) {
        trace!("rebuilding pairing heap of {} nodes", self.len());
        let mut pending: Vec<NodeKey> = self.root.take().into_iter().collect();
        while let Some(key) = pending.pop() {
            let node = self.node_mut(key);
            pending.extend(node.child.take());
            pending.extend(node.sibling.take());
            node.parent = None;
            self.root = self.meld(self.root, Some(key));
        }
    }

    /// Removes all elements from this `PairingHeap`, invalidating all handles.
    #[inline]
    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
    }

    /// Returns true if the given handle refers to a live element.
    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.nodes.contains_key(handle.0)
    }

    /// Returns a reference to the element associated with the given handle.
    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.nodes.get(handle.0).map(|node| &node.elem)
    }

    /// Returns a mutable reference to the element associated with the given handle.
    ///
    /// Call `update_priorities` afterwards if the mutation changed its priority.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.nodes.get_mut(handle.0).map(|node| &mut node.elem)
    }

    /// Iterate over the values in this `PairingHeap` by reference in unspecified order.
    #[inline]
    pub fn values(&self) -> Values<T> {
        Values {
            iter: self.nodes.values(),
        }
    }

    /// Iterate over the values in this `PairingHeap` by mutable reference in unspecified order.
    ///
    /// Call `update_priorities` afterwards if priorities were changed.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<T> {
        ValuesMut {
            iter: self.nodes.values_mut(),
        }
    }

    /// Iterate over values stored within a `PairingHeap` in most-extreme-first order.
    /// Drains the heap.
    #[inline]
    pub fn drain(self) -> Drain<T, C> {
        Drain { heap: self }
    }

    /// Returns all values stored within this `PairingHeap` in most-extreme-first order.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let len = self.len();
        let mut sorted = Vec::with_capacity(len);
        sorted.extend(self.drain());
        sorted
    }

    /// Walks the tree from the root, visiting every node exactly once.
    fn for_each_node<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<T>),
    {
        let mut pending: Vec<NodeKey> = self.root.into_iter().collect();
        while let Some(key) = pending.pop() {
            let node = self.node(key);
            pending.extend(node.child);
            pending.extend(node.sibling);
            visit(node);
        }
    }
}

impl<T, C> Clone for PairingHeap<T, C>
where
    T: Clone,
    C: Compare<T> + Clone,
{
    /// Creates an independent copy holding equal elements.
    ///
    /// The copy has its own handles, handles of `self` are meaningless for it.
    fn clone(&self) -> Self {
        trace!("copying pairing heap of {} nodes", self.len());
        let mut copy = PairingHeap::with_compare(self.compare.clone());
        self.for_each_node(|node| copy.push(node.elem.clone()));
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        mem::swap(self, &mut copy);
    }
}

impl<T, C> fmt::Debug for PairingHeap<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PairingHeap")
            .field("len", &self.nodes.len())
            .field("top", &self.root.map(|root| &self.nodes[root].elem))
            .finish()
    }
}

impl<T, C> PriorityQueue<T> for PairingHeap<T, C>
where
    C: Compare<T>,
{
    #[inline]
    fn push(&mut self, elem: T) {
        PairingHeap::push(self, elem)
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        PairingHeap::pop(self)
    }

    #[inline]
    fn top(&self) -> Option<&T> {
        PairingHeap::top(self)
    }

    #[inline]
    fn len(&self) -> usize {
        PairingHeap::len(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        PairingHeap::is_empty(self)
    }

    #[inline]
    fn update_priorities(&mut self) {
        PairingHeap::update_priorities(self)
    }
}

impl<T, C> Extend<T> for PairingHeap<T, C>
where
    C: Compare<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for elem in iter {
            self.push(elem);
        }
    }
}

impl<T, C> FromIterator<T> for PairingHeap<T, C>
where
    C: Compare<T> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        PairingHeap::from_iter_with_compare(iter, C::default())
    }
}

impl<T, C> Index<Handle> for PairingHeap<T, C>
where
    C: Compare<T>,
{
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("no node found for given handle")
    }
}

impl<T, C> IndexMut<Handle> for PairingHeap<T, C>
where
    C: Compare<T>,
{
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("no node found for given handle")
    }
}

/// Iterator over references to values stored within a `PairingHeap`.
pub struct Values<'a, T: 'a> {
    iter: slotmap::basic::Values<'a, NodeKey, Node<T>>,
}

/// Iterator over mutable references to values stored within a `PairingHeap`.
pub struct ValuesMut<'a, T: 'a> {
    iter: slotmap::basic::ValuesMut<'a, NodeKey, Node<T>>,
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|node| &node.elem)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T> Iterator for ValuesMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|node| &mut node.elem)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Iterator over values stored within a `PairingHeap` in most-extreme-first order.
/// Drains the heap.
pub struct Drain<T, C> {
    heap: PairingHeap<T, C>,
}

impl<T, C> Iterator for Drain<T, C>
where
    C: Compare<T>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.heap.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}


#[cfg(all(feature = "bench", test))]
mod bench {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::thread_rng;
    use test::{black_box, Bencher};

    fn setup_sample() -> Vec<i64> {
        let mut sample: Vec<i64> = (1..100_000).collect();
        sample.shuffle(&mut thread_rng());
        sample
    }

    #[bench]
    fn pairing_heap_push(bencher: &mut Bencher) {
        let sample = setup_sample();
        bencher.iter(|| {
            let mut ph = PairingHeap::new();
            for &key in sample.iter() {
                black_box(ph.add_node(key));
            }
        });
    }

    #[bench]
    fn pairing_heap_pop(bencher: &mut Bencher) {
        let ph: PairingHeap<i64> = setup_sample().into_iter().collect();
        bencher.iter(|| {
            let mut ph = ph.clone();
            while let Some(_) = black_box(ph.pop()) {}
        });
    }

    #[bench]
    fn pairing_heap_update_priorities(bencher: &mut Bencher) {
        let mut ph: PairingHeap<i64> = setup_sample().into_iter().collect();
        bencher.iter(|| {
            for value in ph.values_mut() {
                *value = -*value;
            }
            ph.update_priorities();
        });
    }

    #[bench]
    fn pairing_heap_clone(bencher: &mut Bencher) {
        let ph: PairingHeap<i64> = setup_sample().into_iter().collect();
        bencher.iter(|| {
            black_box(&ph.clone());
        });
    }
}
