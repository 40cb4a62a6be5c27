//! Host surface interface
//!
//! Defines what the tracker needs from the element it observes: listener
//! registration for named signals, optional pointer capture, and a report of
//! which event families the environment supports.

use crate::pointer::EventType;
use std::fmt;
use thiserror::Error;

/// Errors reported by a host surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Listener rejected: {0}")]
    ListenerRejected(String),

    #[error("Pointer capture failed for pointer {0}")]
    CaptureFailed(i32),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Input features advertised by the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Unified pointer events are available.
    pub pointer_events: bool,
    /// The high-frequency `pointerrawupdate` signal is available.
    pub raw_updates: bool,
}

impl Capabilities {
    /// An environment with mouse and touch events only.
    pub fn legacy() -> Self {
        Self::default()
    }

    pub fn pointer_events() -> Self {
        Self {
            pointer_events: true,
            raw_updates: false,
        }
    }
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The observed element.
    Element,
    /// The global window, so mouse drags outside the element keep reporting.
    Window,
}

/// Which target should receive pointer capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureTarget {
    /// The target of the event that started the pointer.
    EventTarget,
    /// The observed element.
    Element,
}

/// The tracker's transition handlers.
///
/// Each handler has a fixed identity for the tracker's lifetime, so a
/// [`Listener`] built from it can always be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Mouse or pointer press.
    PointerStart,
    TouchStart,
    /// Any move signal.
    Move,
    /// Mouse or pointer release/cancel.
    PointerEnd,
    /// Touch end or cancel.
    TouchEnd,
}

/// A single signal subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Listener {
    pub target: ListenerTarget,
    pub signal: EventType,
    pub handler: Handler,
}

impl Listener {
    pub fn element(signal: EventType, handler: Handler) -> Self {
        Self {
            target: ListenerTarget::Element,
            signal,
            handler,
        }
    }

    pub fn window(signal: EventType, handler: Handler) -> Self {
        Self {
            target: ListenerTarget::Window,
            signal,
            handler,
        }
    }
}

impl fmt::Display for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target {
            ListenerTarget::Element => "element",
            ListenerTarget::Window => "window",
        };
        write!(f, "{}:{}->{:?}", target, self.signal, self.handler)
    }
}

/// The surface a tracker observes.
///
/// Implementations wire listeners to the host's event delivery. When a
/// subscribed signal fires, the host passes the matching [`Listener`] and the
/// event to [`crate::PointerTracker::dispatch`].
pub trait Surface {
    /// Report the input features of this environment.
    fn capabilities(&self) -> Capabilities;

    /// Subscribe `listener` to its signal.
    fn add_listener(&mut self, listener: Listener) -> SurfaceResult<()>;

    /// Remove a subscription. Removing an absent listener is not an error.
    fn remove_listener(&mut self, listener: Listener) -> SurfaceResult<()>;

    /// Route all further events for `pointer_id` to `target`.
    fn set_pointer_capture(&mut self, target: CaptureTarget, pointer_id: i32) -> SurfaceResult<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn add_listener(&mut self, listener: Listener) -> SurfaceResult<()> {
        (**self).add_listener(listener)
    }

    fn remove_listener(&mut self, listener: Listener) -> SurfaceResult<()> {
        (**self).remove_listener(listener)
    }

    fn set_pointer_capture(&mut self, target: CaptureTarget, pointer_id: i32) -> SurfaceResult<()> {
        (**self).set_pointer_capture(target, pointer_id)
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn add_listener(&mut self, listener: Listener) -> SurfaceResult<()> {
        (**self).add_listener(listener)
    }

    fn remove_listener(&mut self, listener: Listener) -> SurfaceResult<()> {
        (**self).remove_listener(listener)
    }

    fn set_pointer_capture(&mut self, target: CaptureTarget, pointer_id: i32) -> SurfaceResult<()> {
        (**self).set_pointer_capture(target, pointer_id)
    }
}
