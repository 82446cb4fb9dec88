//! The priority queue capability implemented by `PairingHeap`.

/// A priority queue that always exposes its most extreme element.
///
/// What "most extreme" means is decided by the ordering policy the
/// implementing type was constructed with.
pub trait PriorityQueue<T> {
    /// Inserts `elem`.
    fn push(&mut self, elem: T);

    /// Removes the most extreme element and returns it, or `None` if empty.
    fn pop(&mut self) -> Option<T>;

    /// Returns a reference to the most extreme element, or `None` if empty.
    fn top(&self) -> Option<&T>;

    /// Returns the number of stored elements.
    fn len(&self) -> usize;

    /// Returns true if no elements are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Restores the ordering invariant after elements were mutated in place.
    fn update_priorities(&mut self);
}
