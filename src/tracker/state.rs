//! Start and current pointer sequences

use crate::pointer::{Pointer, PointerId};
use std::collections::HashSet;

/// Pointers currently tracked by a [`crate::PointerTracker`].
///
/// `start_pointers()[i]` and `current_pointers()[i]` always describe the same
/// physical pointer: as it was when pressed, and as it was last seen.
/// Consumers get read-only access; only the tracker mutates it.
#[derive(Debug, Clone, Default)]
pub struct TrackingState {
    start: Vec<Pointer>,
    current: Vec<Pointer>,
    /// Pointers that started with no buttons reported and must not be ended
    /// by the buttonless-move check.
    excluded: HashSet<PointerId>,
}

impl TrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracked pointers as they were when pressed.
    pub fn start_pointers(&self) -> &[Pointer] {
        &self.start
    }

    /// Latest state of the tracked pointers, in the same order as
    /// [`TrackingState::start_pointers`].
    pub fn current_pointers(&self) -> &[Pointer] {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn index_of(&self, id: PointerId) -> Option<usize> {
        self.current.iter().position(|p| p.id() == id)
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.index_of(id).is_some()
    }

    /// Start and current snapshot of a tracked pointer.
    pub fn get(&self, id: PointerId) -> Option<(&Pointer, &Pointer)> {
        self.index_of(id).map(|i| (&self.start[i], &self.current[i]))
    }

    pub(crate) fn push(&mut self, pointer: Pointer) {
        self.start.push(pointer.clone());
        self.current.push(pointer);
    }

    pub(crate) fn replace(&mut self, index: usize, pointer: Pointer) {
        self.current[index] = pointer;
    }

    /// Drop the pointer at `index` from both sequences and from the exclusion
    /// set. Returns its last snapshot.
    pub(crate) fn remove(&mut self, index: usize) -> Pointer {
        self.start.remove(index);
        let pointer = self.current.remove(index);
        self.excluded.remove(&pointer.id());
        pointer
    }

    pub(crate) fn exclude(&mut self, id: PointerId) {
        self.excluded.insert(id);
    }

    pub(crate) fn is_excluded(&self, id: PointerId) -> bool {
        self.excluded.contains(&id)
    }

    #[cfg(test)]
    pub(crate) fn excluded_len(&self) -> usize {
        self.excluded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::{Position, Touch};

    fn touch(id: i32, x: f64) -> Pointer {
        Pointer::from_touch(&Touch::new(id, Position::at(x, x)))
    }

    #[test]
    fn test_push_keeps_sequences_aligned() {
        let mut state = TrackingState::new();
        state.push(touch(1, 0.0));
        state.push(touch(2, 0.0));

        assert_eq!(state.len(), 2);
        assert_eq!(state.start_pointers().len(), state.current_pointers().len());
        assert_eq!(state.index_of(PointerId::Platform(2)), Some(1));
    }

    #[test]
    fn test_replace_leaves_start_untouched() {
        let mut state = TrackingState::new();
        state.push(touch(1, 0.0));
        state.replace(0, touch(1, 50.0));

        let (start, current) = state.get(PointerId::Platform(1)).unwrap();
        assert_eq!(start.page_x(), 0.0);
        assert_eq!(current.page_x(), 50.0);
    }

    #[test]
    fn test_remove_clears_exclusion() {
        let mut state = TrackingState::new();
        state.push(touch(1, 0.0));
        state.push(touch(2, 0.0));
        state.exclude(PointerId::Platform(1));

        let removed = state.remove(0);
        assert_eq!(removed.id(), PointerId::Platform(1));
        assert!(!state.is_excluded(PointerId::Platform(1)));
        assert_eq!(state.excluded_len(), 0);
        assert_eq!(state.start_pointers()[0].id(), PointerId::Platform(2));
        assert_eq!(state.current_pointers()[0].id(), PointerId::Platform(2));
    }
}
