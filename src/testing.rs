//! In-memory surface for unit tests

use crate::pointer::{
    Buttons, EventType, InputEvent, MouseEvent, PointerEvent, PointerType, Position, Touch,
    TouchEvent,
};
use crate::surface::{CaptureTarget, Capabilities, Listener, Surface, SurfaceError, SurfaceResult};
use std::collections::HashSet;

/// Records every registration call made against it.
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub capabilities: Capabilities,
    pub active: HashSet<Listener>,
    pub add_calls: Vec<Listener>,
    pub remove_calls: Vec<Listener>,
    pub captures: Vec<(CaptureTarget, i32)>,
    /// Refuse to register listeners for this signal.
    pub reject_signal: Option<EventType>,
    pub fail_capture: bool,
}

impl FakeSurface {
    pub fn unified() -> Self {
        Self {
            capabilities: Capabilities::pointer_events(),
            ..Self::default()
        }
    }

    pub fn legacy() -> Self {
        Self {
            capabilities: Capabilities::legacy(),
            ..Self::default()
        }
    }

    pub fn is_active(&self, listener: &Listener) -> bool {
        self.active.contains(listener)
    }
}

impl Surface for FakeSurface {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn add_listener(&mut self, listener: Listener) -> SurfaceResult<()> {
        if self.reject_signal == Some(listener.signal) {
            return Err(SurfaceError::ListenerRejected(listener.signal.to_string()));
        }
        self.add_calls.push(listener);
        self.active.insert(listener);
        Ok(())
    }

    fn remove_listener(&mut self, listener: Listener) -> SurfaceResult<()> {
        self.remove_calls.push(listener);
        self.active.remove(&listener);
        Ok(())
    }

    fn set_pointer_capture(&mut self, target: CaptureTarget, pointer_id: i32) -> SurfaceResult<()> {
        if self.fail_capture {
            return Err(SurfaceError::CaptureFailed(pointer_id));
        }
        self.captures.push((target, pointer_id));
        Ok(())
    }
}

pub fn pointer(event_type: EventType, id: i32, x: f64, y: f64, buttons: Buttons) -> InputEvent {
    PointerEvent::new(event_type, id, PointerType::Mouse, Position::at(x, y), buttons).into()
}

pub fn mouse(event_type: EventType, x: f64, y: f64, buttons: Buttons) -> InputEvent {
    MouseEvent::new(event_type, Position::at(x, y), buttons).into()
}

pub fn touches(event_type: EventType, contacts: &[(i32, f64, f64)]) -> InputEvent {
    TouchEvent::new(
        event_type,
        contacts
            .iter()
            .map(|&(id, x, y)| Touch::new(id, Position::at(x, y)))
            .collect(),
    )
    .into()
}
