use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

bitflags! {
    /// Buttons held down while an event was generated.
    ///
    /// Mirrors the host's `buttons` bitmask. For touch and pen contacts the
    /// host reports the contact itself as [`Buttons::PRIMARY`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Buttons: u16 {
        /// Left mouse button, touch contact or pen tip.
        const PRIMARY = 1;
        /// Right mouse button or pen barrel button.
        const SECONDARY = 2;
        /// Middle mouse button.
        const AUXILIARY = 4;
        const BACK = 8;
        const FORWARD = 16;
        /// Pen eraser.
        const ERASER = 32;
    }
}

impl Buttons {
    pub fn primary_down(self) -> bool {
        self.contains(Buttons::PRIMARY)
    }
}

/// Named signals a host surface can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    PointerDown,
    PointerMove,
    PointerRawUpdate,
    PointerUp,
    PointerCancel,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::MouseDown => "mousedown",
            EventType::MouseMove => "mousemove",
            EventType::MouseUp => "mouseup",
            EventType::TouchStart => "touchstart",
            EventType::TouchMove => "touchmove",
            EventType::TouchEnd => "touchend",
            EventType::TouchCancel => "touchcancel",
            EventType::PointerDown => "pointerdown",
            EventType::PointerMove => "pointermove",
            EventType::PointerRawUpdate => "pointerrawupdate",
            EventType::PointerUp => "pointerup",
            EventType::PointerCancel => "pointercancel",
        }
    }

    /// Whether this signal is an ordinary release rather than a cancellation.
    pub fn is_release(self) -> bool {
        matches!(
            self,
            EventType::MouseUp | EventType::TouchEnd | EventType::PointerUp
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device behind a unified pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// Coordinates shared by every event family.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Offset from the top-left of the document
    pub page_x: f64,
    pub page_y: f64,
    /// Offset from the top-left of the viewport
    pub client_x: f64,
    pub client_y: f64,
}

impl Position {
    /// Position where page and viewport coincide (unscrolled document).
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            page_x: x,
            page_y: y,
            client_x: x,
            client_y: y,
        }
    }
}

/// Legacy mouse event.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    pub event_type: EventType,
    pub position: Position,
    pub buttons: Buttons,
}

impl MouseEvent {
    pub fn new(event_type: EventType, position: Position, buttons: Buttons) -> Self {
        Self {
            event_type,
            position,
            buttons,
        }
    }
}

/// Unified pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub event_type: EventType,
    pub pointer_id: i32,
    pub pointer_type: PointerType,
    pub position: Position,
    pub buttons: Buttons,
    /// The event target exposes its own capture operation.
    pub target_capturable: bool,
    /// Higher-resolution history bundled into this event. `None` when the
    /// host has no coalesced-events accessor.
    pub coalesced: Option<Vec<Arc<PointerEvent>>>,
}

impl PointerEvent {
    pub fn new(
        event_type: EventType,
        pointer_id: i32,
        pointer_type: PointerType,
        position: Position,
        buttons: Buttons,
    ) -> Self {
        Self {
            event_type,
            pointer_id,
            pointer_type,
            position,
            buttons,
            target_capturable: false,
            coalesced: None,
        }
    }

    pub fn with_capturable_target(mut self) -> Self {
        self.target_capturable = true;
        self
    }

    pub fn with_coalesced(mut self, events: Vec<PointerEvent>) -> Self {
        self.coalesced = Some(events.into_iter().map(Arc::new).collect());
        self
    }
}

/// One contact point inside a touch event.
#[derive(Debug, Clone, PartialEq)]
pub struct Touch {
    pub identifier: i32,
    pub position: Position,
}

impl Touch {
    pub fn new(identifier: i32, position: Position) -> Self {
        Self {
            identifier,
            position,
        }
    }
}

/// Touch event carrying the contacts that changed.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub event_type: EventType,
    pub changed_touches: Vec<Touch>,
}

impl TouchEvent {
    pub fn new(event_type: EventType, changed_touches: Vec<Touch>) -> Self {
        Self {
            event_type,
            changed_touches,
        }
    }
}

/// A native event of any supported family.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Mouse(Arc<MouseEvent>),
    Touch(Arc<TouchEvent>),
    Pointer(Arc<PointerEvent>),
}

impl InputEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            InputEvent::Mouse(e) => e.event_type,
            InputEvent::Touch(e) => e.event_type,
            InputEvent::Pointer(e) => e.event_type,
        }
    }

    /// Button state, for families that report one.
    pub fn buttons(&self) -> Option<Buttons> {
        match self {
            InputEvent::Mouse(e) => Some(e.buttons),
            InputEvent::Pointer(e) => Some(e.buttons),
            InputEvent::Touch(_) => None,
        }
    }

    pub fn is_touch(&self) -> bool {
        matches!(self, InputEvent::Touch(_))
    }
}

impl From<MouseEvent> for InputEvent {
    fn from(event: MouseEvent) -> Self {
        InputEvent::Mouse(Arc::new(event))
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(event: TouchEvent) -> Self {
        InputEvent::Touch(Arc::new(event))
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(Arc::new(event))
    }
}
