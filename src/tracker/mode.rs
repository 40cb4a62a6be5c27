//! Selection between unified pointer events and the mouse+touch fallback,
//! and the listener sets each mode installs.

use crate::pointer::{EventType, InputEvent};
use crate::surface::{Capabilities, Handler, Listener};
use crate::tracker::config::TrackerConfig;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pointer events only. Move/end listeners are installed while pointers
    /// are down.
    Unified,
    /// Mouse and touch events. Touch listeners stay installed for the
    /// tracker's lifetime, mouse move/up listeners only during a press.
    Fallback,
}

impl Mode {
    /// Unified mode whenever the host supports it, unless the config opts out.
    pub fn select(capabilities: Capabilities, config: &TrackerConfig) -> Self {
        if capabilities.pointer_events && !config.avoid_pointer_events {
            Mode::Unified
        } else {
            Mode::Fallback
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Unified => write!(f, "unified"),
            Mode::Fallback => write!(f, "fallback"),
        }
    }
}

/// Listener layout for one tracker, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wiring {
    mode: Mode,
    move_signal: EventType,
}

impl Wiring {
    pub fn new(capabilities: Capabilities, config: &TrackerConfig) -> Self {
        let raw_updates = config.raw_updates && capabilities.raw_updates;
        Self {
            mode: Mode::select(capabilities, config),
            move_signal: if raw_updates {
                EventType::PointerRawUpdate
            } else {
                EventType::PointerMove
            },
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Signal used for pointer-event moves.
    pub fn move_signal(&self) -> EventType {
        self.move_signal
    }

    /// Listeners installed for the tracker's whole lifetime.
    pub fn start_listeners(&self) -> Vec<Listener> {
        match self.mode {
            Mode::Unified => vec![Listener::element(EventType::PointerDown, Handler::PointerStart)],
            Mode::Fallback => fallback_listeners().to_vec(),
        }
    }

    /// Listeners installed while a pointer started by `event` is down.
    pub fn tracking_listeners(&self, event: &InputEvent) -> Vec<Listener> {
        match event {
            InputEvent::Pointer(_) => pointer_listeners(self.move_signal).to_vec(),
            InputEvent::Mouse(_) => mouse_listeners().to_vec(),
            InputEvent::Touch(_) => Vec::new(),
        }
    }

    /// Every listener either mode could ever install.
    pub fn all_listeners(&self) -> Vec<Listener> {
        let mut all = vec![Listener::element(EventType::PointerDown, Handler::PointerStart)];
        all.extend(fallback_listeners());
        all.extend(pointer_listeners(EventType::PointerMove));
        all.push(Listener::element(EventType::PointerRawUpdate, Handler::Move));
        all.extend(mouse_listeners());
        all
    }
}

fn fallback_listeners() -> [Listener; 5] {
    [
        Listener::element(EventType::MouseDown, Handler::PointerStart),
        Listener::element(EventType::TouchStart, Handler::TouchStart),
        Listener::element(EventType::TouchMove, Handler::Move),
        Listener::element(EventType::TouchEnd, Handler::TouchEnd),
        Listener::element(EventType::TouchCancel, Handler::TouchEnd),
    ]
}

fn pointer_listeners(move_signal: EventType) -> [Listener; 3] {
    [
        Listener::element(move_signal, Handler::Move),
        Listener::element(EventType::PointerUp, Handler::PointerEnd),
        Listener::element(EventType::PointerCancel, Handler::PointerEnd),
    ]
}

fn mouse_listeners() -> [Listener; 2] {
    [
        Listener::window(EventType::MouseMove, Handler::Move),
        Listener::window(EventType::MouseUp, Handler::PointerEnd),
    ]
}
