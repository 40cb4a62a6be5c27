//! Conversion of native events into canonical [`Pointer`] snapshots.

use crate::pointer::types::{InputEvent, MouseEvent, PointerEvent, Position, Touch};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identity of a physical contact or button.
///
/// Legacy mouse events carry no identifier of their own, so they all map to
/// [`PointerId::Mouse`]. Only one mouse pointer is ever tracked at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerId {
    Mouse,
    Platform(i32),
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerId::Mouse => write!(f, "mouse"),
            PointerId::Platform(id) => write!(f, "{}", id),
        }
    }
}

/// The platform object a [`Pointer`] was created from.
#[derive(Debug, Clone, PartialEq)]
pub enum NativePointer {
    Mouse(Arc<MouseEvent>),
    Touch(Touch),
    Pointer(Arc<PointerEvent>),
}

/// Snapshot of one pointer at one moment.
///
/// A new `Pointer` is built for every native event, including events for a
/// contact that is already tracked. Correlate pointers by [`Pointer::id`] only.
#[derive(Debug, Clone, PartialEq)]
pub struct Pointer {
    id: PointerId,
    position: Position,
    native: NativePointer,
}

impl Pointer {
    pub fn from_mouse(event: Arc<MouseEvent>) -> Self {
        Self {
            id: PointerId::Mouse,
            position: event.position,
            native: NativePointer::Mouse(event),
        }
    }

    pub fn from_pointer_event(event: Arc<PointerEvent>) -> Self {
        Self {
            id: PointerId::Platform(event.pointer_id),
            position: event.position,
            native: NativePointer::Pointer(event),
        }
    }

    pub fn from_touch(touch: &Touch) -> Self {
        Self {
            id: PointerId::Platform(touch.identifier),
            position: touch.position,
            native: NativePointer::Touch(touch.clone()),
        }
    }

    /// Pointers described by a native event.
    ///
    /// Mouse and pointer events describe exactly one pointer; touch events
    /// describe one per changed contact.
    pub fn from_event(event: &InputEvent) -> Vec<Pointer> {
        match event {
            InputEvent::Mouse(e) => vec![Pointer::from_mouse(e.clone())],
            InputEvent::Pointer(e) => vec![Pointer::from_pointer_event(e.clone())],
            InputEvent::Touch(e) => e.changed_touches.iter().map(Pointer::from_touch).collect(),
        }
    }

    pub fn id(&self) -> PointerId {
        self.id
    }

    pub fn page_x(&self) -> f64 {
        self.position.page_x
    }

    pub fn page_y(&self) -> f64 {
        self.position.page_y
    }

    pub fn client_x(&self) -> f64 {
        self.position.client_x
    }

    pub fn client_y(&self) -> f64 {
        self.position.client_y
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn native(&self) -> &NativePointer {
        &self.native
    }

    /// Expanded set of pointers for high-resolution input.
    ///
    /// Returns the coalesced history when the native event has one. Falls back
    /// to `[self]` when there is no history, including when the host reports
    /// support but hands back an empty list. Never returns an empty vector.
    pub fn coalesced(&self) -> Vec<Pointer> {
        if let NativePointer::Pointer(event) = &self.native {
            if let Some(history) = &event.coalesced {
                if !history.is_empty() {
                    return history
                        .iter()
                        .cloned()
                        .map(Pointer::from_pointer_event)
                        .collect();
                }
                tracing::trace!(
                    "Empty coalesced history for pointer {}, using the event itself",
                    self.id
                );
            }
        }
        vec![self.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::types::{Buttons, EventType, PointerType, TouchEvent};

    fn pointer_move(id: i32, x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(
            EventType::PointerMove,
            id,
            PointerType::Pen,
            Position::at(x, y),
            Buttons::PRIMARY,
        )
    }

    #[test]
    fn test_mouse_uses_sentinel_id() {
        let event = Arc::new(MouseEvent::new(
            EventType::MouseDown,
            Position::at(3.0, 4.0),
            Buttons::PRIMARY,
        ));
        let pointer = Pointer::from_mouse(event);
        assert_eq!(pointer.id(), PointerId::Mouse);
        assert_ne!(pointer.id(), PointerId::Platform(-1));
        assert_eq!(pointer.page_x(), 3.0);
        assert_eq!(pointer.client_y(), 4.0);
    }

    #[test]
    fn test_page_and_client_coordinates_kept_apart() {
        let position = Position {
            page_x: 110.0,
            page_y: 220.0,
            client_x: 10.0,
            client_y: 20.0,
        };
        let event = PointerEvent::new(
            EventType::PointerDown,
            7,
            PointerType::Touch,
            position,
            Buttons::PRIMARY,
        );
        let pointer = Pointer::from_pointer_event(Arc::new(event));
        assert_eq!(pointer.id(), PointerId::Platform(7));
        assert_eq!((pointer.page_x(), pointer.page_y()), (110.0, 220.0));
        assert_eq!((pointer.client_x(), pointer.client_y()), (10.0, 20.0));
    }

    #[test]
    fn test_touch_event_yields_pointer_per_contact() {
        let event: InputEvent = TouchEvent::new(
            EventType::TouchMove,
            vec![
                Touch::new(4, Position::at(1.0, 1.0)),
                Touch::new(9, Position::at(2.0, 2.0)),
            ],
        )
        .into();

        let pointers = Pointer::from_event(&event);
        let ids: Vec<_> = pointers.iter().map(Pointer::id).collect();
        assert_eq!(ids, vec![PointerId::Platform(4), PointerId::Platform(9)]);
        assert!(matches!(pointers[1].native(), NativePointer::Touch(t) if t.identifier == 9));
    }

    #[test]
    fn test_coalesced_expands_history() {
        let event = pointer_move(2, 30.0, 30.0).with_coalesced(vec![
            pointer_move(2, 10.0, 10.0),
            pointer_move(2, 20.0, 20.0),
            pointer_move(2, 30.0, 30.0),
        ]);
        let pointer = Pointer::from_pointer_event(Arc::new(event));

        let samples = pointer.coalesced();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].page_x(), 10.0);
        assert!(samples.iter().all(|p| p.id() == PointerId::Platform(2)));
    }

    #[test]
    fn test_coalesced_empty_history_falls_back_to_self() {
        let event = pointer_move(2, 30.0, 30.0).with_coalesced(vec![]);
        let pointer = Pointer::from_pointer_event(Arc::new(event));

        let samples = pointer.coalesced();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0], pointer);
    }

    #[test]
    fn test_coalesced_without_support_returns_self() {
        let touch = Touch::new(1, Position::at(5.0, 5.0));
        let pointer = Pointer::from_touch(&touch);
        assert_eq!(pointer.coalesced(), vec![pointer.clone()]);

        let unsupported = Pointer::from_pointer_event(Arc::new(pointer_move(3, 1.0, 1.0)));
        assert_eq!(unsupported.coalesced().len(), 1);
    }
}
