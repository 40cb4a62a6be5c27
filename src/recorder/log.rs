//! Serializable records of tracker notifications

use crate::pointer::{EventType, InputEvent, Pointer, PointerId};
use crate::tracker::{PointerHandler, TrackingState};
use parking_lot::Mutex as ParkingMutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    pub id: PointerId,
    pub page_x: f64,
    pub page_y: f64,
    pub client_x: f64,
    pub client_y: f64,
}

impl From<&Pointer> for PointerSample {
    fn from(pointer: &Pointer) -> Self {
        Self {
            id: pointer.id(),
            page_x: pointer.page_x(),
            page_y: pointer.page_y(),
            client_x: pointer.client_x(),
            client_y: pointer.client_y(),
        }
    }
}

fn samples(pointers: &[Pointer]) -> Vec<PointerSample> {
    pointers.iter().map(PointerSample::from).collect()
}

/// One tracker notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TrackedEvent {
    #[serde(rename_all = "camelCase")]
    Start {
        pointer: PointerSample,
        event_type: EventType,
        accepted: bool,
    },
    #[serde(rename_all = "camelCase")]
    Move {
        previous: Vec<PointerSample>,
        changed: Vec<PointerSample>,
        event_type: EventType,
    },
    #[serde(rename_all = "camelCase")]
    End {
        pointer: PointerSample,
        event_type: EventType,
        cancelled: bool,
        /// Pointers still tracked after this one ended.
        remaining: usize,
    },
}

type StartFilter = Arc<dyn Fn(&Pointer) -> bool + Send + Sync>;

/// Buffers tracker notifications. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct PointerRecorder {
    events: Arc<ParkingMutex<Vec<TrackedEvent>>>,
    filter: Option<StartFilter>,
}

impl PointerRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only track pointers for which `filter` returns true.
    pub fn with_filter(filter: impl Fn(&Pointer) -> bool + Send + Sync + 'static) -> Self {
        Self {
            events: Arc::new(ParkingMutex::new(Vec::new())),
            filter: Some(Arc::new(filter)),
        }
    }

    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events.lock().clone()
    }

    /// Take all buffered events, leaving the buffer empty.
    pub fn drain(&self) -> Vec<TrackedEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.events.lock())
    }
}

impl PointerHandler for PointerRecorder {
    fn start(&mut self, _state: &TrackingState, pointer: &Pointer, event: &InputEvent) -> bool {
        let accepted = self.filter.as_ref().map_or(true, |f| f(pointer));
        self.events.lock().push(TrackedEvent::Start {
            pointer: pointer.into(),
            event_type: event.event_type(),
            accepted,
        });
        accepted
    }

    fn moved(
        &mut self,
        _state: &TrackingState,
        previous: &[Pointer],
        changed: &[Pointer],
        event: &InputEvent,
    ) {
        self.events.lock().push(TrackedEvent::Move {
            previous: samples(previous),
            changed: samples(changed),
            event_type: event.event_type(),
        });
    }

    fn end(
        &mut self,
        state: &TrackingState,
        pointer: &Pointer,
        event: &InputEvent,
        cancelled: bool,
    ) {
        self.events.lock().push(TrackedEvent::End {
            pointer: pointer.into(),
            event_type: event.event_type(),
            cancelled,
            remaining: state.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::{Buttons, Position, Touch};
    use crate::testing::{mouse, touches};

    #[test]
    fn test_records_start_and_end() {
        let mut recorder = PointerRecorder::new();
        let state = TrackingState::new();
        let down = mouse(EventType::MouseDown, 1.0, 2.0, Buttons::PRIMARY);
        let pointer = Pointer::from_event(&down).remove(0);

        assert!(recorder.start(&state, &pointer, &down));
        let up = mouse(EventType::MouseUp, 1.0, 2.0, Buttons::empty());
        recorder.end(&state, &pointer, &up, false);

        let events = recorder.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            TrackedEvent::Start { pointer, accepted: true, event_type: EventType::MouseDown }
                if pointer.id == PointerId::Mouse && pointer.page_y == 2.0
        ));
        assert!(matches!(
            events[1],
            TrackedEvent::End { cancelled: false, remaining: 0, .. }
        ));
    }

    #[test]
    fn test_filter_rejects() {
        let mut recorder = PointerRecorder::with_filter(|p| p.page_x() > 10.0);
        let state = TrackingState::new();
        let event = touches(EventType::TouchStart, &[(1, 5.0, 5.0)]);
        let pointer = Pointer::from_touch(&Touch::new(1, Position::at(5.0, 5.0)));

        assert!(!recorder.start(&state, &pointer, &event));
        assert!(matches!(recorder.events()[0], TrackedEvent::Start { accepted: false, .. }));
    }

    #[test]
    fn test_clones_share_buffer_and_drain() {
        let recorder = PointerRecorder::new();
        let mut handle = recorder.clone();
        let state = TrackingState::new();
        let event = touches(EventType::TouchStart, &[(1, 0.0, 0.0)]);
        let pointer = Pointer::from_event(&event).remove(0);
        handle.start(&state, &pointer, &event);

        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.drain().len(), 1);
        assert!(handle.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let mut recorder = PointerRecorder::new();
        let state = TrackingState::new();
        let event = touches(EventType::TouchStart, &[(3, 0.0, 0.0)]);
        let pointer = Pointer::from_event(&event).remove(0);
        recorder.start(&state, &pointer, &event);

        let json = recorder.to_json().unwrap();
        assert!(json.contains("\"kind\": \"start\""));
        assert!(json.contains("\"eventType\": \"touchstart\""));
        assert!(json.contains("\"platform\": 3"));
    }
}
