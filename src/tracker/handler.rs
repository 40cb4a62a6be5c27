//! Consumer callbacks invoked by the tracker

use crate::pointer::{InputEvent, Pointer};
use crate::tracker::state::TrackingState;

/// Receives pointer start, move and end notifications.
///
/// Every method gets the tracking state as it stands at that moment. All
/// methods have defaults: accept every start, ignore moves and ends.
///
/// The tracker is mutably borrowed while a callback runs, so a handler
/// cannot call [`crate::PointerTracker::stop`] itself. To stop from a
/// callback, record the request (a flag shared with the driver) and call
/// `stop()` once `dispatch` returns. No further callbacks fire after that.
pub trait PointerHandler {
    /// A pointer was pressed within the surface.
    ///
    /// `pointer` is not yet part of `state`. Return `false` to leave it
    /// untracked.
    fn start(&mut self, state: &TrackingState, pointer: &Pointer, event: &InputEvent) -> bool {
        let _ = (state, pointer, event);
        true
    }

    /// Tracked pointers moved.
    ///
    /// `previous` is the current sequence before this event, in the same order
    /// as `state`. `changed` holds only the tracked pointers this event updated.
    fn moved(
        &mut self,
        state: &TrackingState,
        previous: &[Pointer],
        changed: &[Pointer],
        event: &InputEvent,
    ) {
        let _ = (state, previous, changed, event);
    }

    /// A tracked pointer was released or cancelled.
    ///
    /// `pointer` is its final state and is already gone from `state`.
    /// `cancelled` is false only for an ordinary mouse-up, touch-end or
    /// pointer-up.
    fn end(
        &mut self,
        state: &TrackingState,
        pointer: &Pointer,
        event: &InputEvent,
        cancelled: bool,
    ) {
        let _ = (state, pointer, event, cancelled);
    }
}

/// Tracks every pointer and ignores all notifications.
impl PointerHandler for () {}

impl<H: PointerHandler + ?Sized> PointerHandler for Box<H> {
    fn start(&mut self, state: &TrackingState, pointer: &Pointer, event: &InputEvent) -> bool {
        (**self).start(state, pointer, event)
    }

    fn moved(
        &mut self,
        state: &TrackingState,
        previous: &[Pointer],
        changed: &[Pointer],
        event: &InputEvent,
    ) {
        (**self).moved(state, previous, changed, event)
    }

    fn end(
        &mut self,
        state: &TrackingState,
        pointer: &Pointer,
        event: &InputEvent,
        cancelled: bool,
    ) {
        (**self).end(state, pointer, event, cancelled)
    }
}

type StartFn = Box<dyn FnMut(&TrackingState, &Pointer, &InputEvent) -> bool>;
type MoveFn = Box<dyn FnMut(&TrackingState, &[Pointer], &[Pointer], &InputEvent)>;
type EndFn = Box<dyn FnMut(&TrackingState, &Pointer, &InputEvent, bool)>;

/// Closure-based [`PointerHandler`]. Unset callbacks use the defaults.
#[derive(Default)]
pub struct Callbacks {
    start: Option<StartFn>,
    moved: Option<MoveFn>,
    end: Option<EndFn>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(
        mut self,
        f: impl FnMut(&TrackingState, &Pointer, &InputEvent) -> bool + 'static,
    ) -> Self {
        self.start = Some(Box::new(f));
        self
    }

    pub fn on_move(
        mut self,
        f: impl FnMut(&TrackingState, &[Pointer], &[Pointer], &InputEvent) + 'static,
    ) -> Self {
        self.moved = Some(Box::new(f));
        self
    }

    pub fn on_end(
        mut self,
        f: impl FnMut(&TrackingState, &Pointer, &InputEvent, bool) + 'static,
    ) -> Self {
        self.end = Some(Box::new(f));
        self
    }
}

impl PointerHandler for Callbacks {
    fn start(&mut self, state: &TrackingState, pointer: &Pointer, event: &InputEvent) -> bool {
        match self.start.as_mut() {
            Some(f) => f(state, pointer, event),
            None => true,
        }
    }

    fn moved(
        &mut self,
        state: &TrackingState,
        previous: &[Pointer],
        changed: &[Pointer],
        event: &InputEvent,
    ) {
        if let Some(f) = self.moved.as_mut() {
            f(state, previous, changed, event);
        }
    }

    fn end(
        &mut self,
        state: &TrackingState,
        pointer: &Pointer,
        event: &InputEvent,
        cancelled: bool,
    ) {
        if let Some(f) = self.end.as_mut() {
            f(state, pointer, event, cancelled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::{EventType, Position, Touch, TouchEvent};
    use std::cell::Cell;
    use std::rc::Rc;

    fn touch_start() -> (Pointer, InputEvent) {
        let touch = Touch::new(1, Position::at(0.0, 0.0));
        let pointer = Pointer::from_touch(&touch);
        (pointer, TouchEvent::new(EventType::TouchStart, vec![touch]).into())
    }

    #[test]
    fn test_unit_handler_accepts_everything() {
        let (pointer, event) = touch_start();
        assert!(().start(&TrackingState::new(), &pointer, &event));
    }

    #[test]
    fn test_callbacks_default_to_accept() {
        let (pointer, event) = touch_start();
        let mut callbacks = Callbacks::new();
        assert!(callbacks.start(&TrackingState::new(), &pointer, &event));
        callbacks.end(&TrackingState::new(), &pointer, &event, true);
    }

    #[test]
    fn test_callbacks_forward_to_closures() {
        let ends = Rc::new(Cell::new(0));
        let seen = ends.clone();
        let mut callbacks = Callbacks::new()
            .on_start(|_, _, _| false)
            .on_end(move |_, _, _, cancelled| {
                assert!(!cancelled);
                seen.set(seen.get() + 1);
            });

        let (pointer, event) = touch_start();
        assert!(!callbacks.start(&TrackingState::new(), &pointer, &event));
        callbacks.end(&TrackingState::new(), &pointer, &event, false);
        assert_eq!(ends.get(), 1);
    }
}
