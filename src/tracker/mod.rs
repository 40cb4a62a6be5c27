//! Multi-pointer tracking
//!
//! [`PointerTracker`] subscribes to a [`Surface`], turns whatever native
//! events it receives into [`Pointer`]s, and keeps the ordered set of pressed
//! pointers, notifying a [`PointerHandler`] as pointers start, move and end.

pub mod config;
pub mod handler;
pub mod mode;
pub mod state;

pub use config::{ConfigError, QuirkConfig, TrackerConfig};
pub use handler::{Callbacks, PointerHandler};
pub use mode::{Mode, Wiring};
pub use state::TrackingState;

use crate::pointer::{InputEvent, Pointer, PointerId};
use crate::surface::{CaptureTarget, Handler, Listener, Surface, SurfaceError};
use std::collections::HashSet;
use thiserror::Error;

/// Errors creating a tracker
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for tracker construction
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Track pointers across a surface.
pub struct PointerTracker<S: Surface, H: PointerHandler> {
    surface: S,
    handler: H,
    config: TrackerConfig,
    wiring: Wiring,
    state: TrackingState,
    listeners: HashSet<Listener>,
    stopped: bool,
}

impl<S: Surface, H: PointerHandler> PointerTracker<S, H> {
    /// Pick a mode for `surface` and install its start listeners.
    ///
    /// If any start listener is refused, the ones already installed are
    /// removed again and the error is returned.
    pub fn new(surface: S, handler: H, config: TrackerConfig) -> TrackerResult<Self> {
        let wiring = Wiring::new(surface.capabilities(), &config);
        let mut tracker = Self {
            surface,
            handler,
            config,
            wiring,
            state: TrackingState::new(),
            listeners: HashSet::new(),
            stopped: false,
        };

        for listener in tracker.wiring.start_listeners() {
            if let Err(e) = tracker.subscribe(listener) {
                tracing::warn!("Failed to install {}: {}", listener, e);
                tracker.stop();
                return Err(e.into());
            }
        }

        tracing::info!(
            "Pointer tracker started (mode={}, move_signal={})",
            tracker.wiring.mode(),
            tracker.wiring.move_signal()
        );
        Ok(tracker)
    }

    /// Like [`PointerTracker::new`], reading the config from JSON.
    pub fn from_json(surface: S, handler: H, config_json: &str) -> TrackerResult<Self> {
        let config = TrackerConfig::from_json(config_json)?;
        Self::new(surface, handler, config)
    }

    /// Tracked pointers as they were when pressed.
    pub fn start_pointers(&self) -> &[Pointer] {
        self.state.start_pointers()
    }

    /// Latest state of the tracked pointers, in the same order as
    /// [`PointerTracker::start_pointers`].
    pub fn current_pointers(&self) -> &[Pointer] {
        self.state.current_pointers()
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.wiring.mode()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether `listener` is currently installed by this tracker.
    pub fn is_listening(&self, listener: &Listener) -> bool {
        self.listeners.contains(listener)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Deliver a native event that arrived through `listener`.
    ///
    /// Events for listeners this tracker has not installed (or has since
    /// removed) are ignored, as is everything after [`PointerTracker::stop`].
    pub fn dispatch(&mut self, listener: &Listener, event: InputEvent) {
        if self.stopped {
            tracing::trace!("Ignoring {} on stopped tracker", event.event_type());
            return;
        }
        if !self.listeners.contains(listener) {
            tracing::trace!("Ignoring {} from inactive listener {}", event.event_type(), listener);
            return;
        }

        match listener.handler {
            Handler::PointerStart => self.pointer_start(event),
            Handler::TouchStart => self.touch_start(event),
            Handler::Move => self.pointer_move(event),
            Handler::PointerEnd => self.pointer_end(event),
            Handler::TouchEnd => self.touch_end(event),
        }
    }

    /// Remove every listener this tracker may have installed, in either mode.
    ///
    /// No callbacks fire afterwards. The tracked sequences keep their last
    /// contents. Calling `stop` again does nothing.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        for listener in self.wiring.all_listeners() {
            if let Err(e) = self.surface.remove_listener(listener) {
                tracing::debug!("Failed to remove {}: {}", listener, e);
            }
        }
        self.listeners.clear();

        tracing::info!("Pointer tracker stopped (tracked={})", self.state.len());
    }

    fn subscribe(&mut self, listener: Listener) -> Result<(), SurfaceError> {
        if self.listeners.contains(&listener) {
            return Ok(());
        }
        self.surface.add_listener(listener)?;
        self.listeners.insert(listener);
        Ok(())
    }

    fn unsubscribe(&mut self, listener: Listener) {
        if !self.listeners.remove(&listener) {
            return;
        }
        if let Err(e) = self.surface.remove_listener(listener) {
            tracing::warn!("Failed to remove {}: {}", listener, e);
        }
    }

    /// Ask the handler about `pointer` and track it if accepted.
    fn trigger_start(&mut self, pointer: Pointer, event: &InputEvent) -> bool {
        if !self.handler.start(&self.state, &pointer, event) {
            tracing::trace!("Start of pointer {} rejected by handler", pointer.id());
            return false;
        }
        tracing::debug!(
            "Tracking pointer {} at ({}, {})",
            pointer.id(),
            pointer.page_x(),
            pointer.page_y()
        );
        self.state.push(pointer);
        true
    }

    /// Mouse-down or pointer-down.
    fn pointer_start(&mut self, event: InputEvent) {
        let (pointer, buttons, pointer_event) = match &event {
            InputEvent::Mouse(e) => (Pointer::from_mouse(e.clone()), e.buttons, None),
            InputEvent::Pointer(e) => (
                Pointer::from_pointer_event(e.clone()),
                e.buttons,
                Some(e.clone()),
            ),
            InputEvent::Touch(_) => {
                tracing::trace!("Ignoring touch event on pointer start listener");
                return;
            }
        };

        // Some platforms report touch contacts with no buttons at all.
        let buttonless_contact =
            pointer_event.is_some() && buttons.is_empty() && self.config.quirks.zero_buttons_start;
        if !buttonless_contact && !buttons.primary_down() {
            tracing::trace!("Ignoring {} without primary button", event.event_type());
            return;
        }

        // Repeated downs arrive when several mouse buttons are pressed.
        if self.state.contains(pointer.id()) {
            tracing::trace!("Pointer {} already tracked", pointer.id());
            return;
        }

        let id = pointer.id();
        if !self.trigger_start(pointer, &event) {
            return;
        }
        if buttonless_contact {
            self.state.exclude(id);
        }

        if let Some(e) = pointer_event {
            let target = if e.target_capturable {
                CaptureTarget::EventTarget
            } else {
                CaptureTarget::Element
            };
            if let Err(err) = self.surface.set_pointer_capture(target, e.pointer_id) {
                tracing::warn!("Pointer capture failed for {}: {}", id, err);
            }
        }

        for listener in self.wiring.tracking_listeners(&event) {
            if let Err(e) = self.subscribe(listener) {
                tracing::warn!("Failed to install {}: {}", listener, e);
            }
        }
    }

    fn touch_start(&mut self, event: InputEvent) {
        let InputEvent::Touch(touch_event) = &event else {
            tracing::trace!("Ignoring non-touch event on touch start listener");
            return;
        };
        for touch in &touch_event.changed_touches {
            let pointer = Pointer::from_touch(touch);
            if self.state.contains(pointer.id()) {
                tracing::trace!("Pointer {} already tracked", pointer.id());
                continue;
            }
            self.trigger_start(pointer, &event);
        }
    }

    fn pointer_move(&mut self, event: InputEvent) {
        if self.ends_on_buttonless_move(&event) {
            // The platform lost the up/cancel for this pointer.
            tracing::debug!("Buttonless {}, treating as end", event.event_type());
            self.pointer_end(event);
            return;
        }

        let previous = self.state.current_pointers().to_vec();
        let mut changed = Vec::new();

        for pointer in Pointer::from_event(&event) {
            let Some(index) = self.state.index_of(pointer.id()) else {
                continue;
            };
            self.state.replace(index, pointer.clone());
            changed.push(pointer);
        }

        if changed.is_empty() {
            tracing::trace!("No tracked pointers in {}", event.event_type());
            return;
        }

        self.handler.moved(&self.state, &previous, &changed, &event);
    }

    fn ends_on_buttonless_move(&self, event: &InputEvent) -> bool {
        if !self.config.quirks.end_on_buttonless_move {
            return false;
        }
        match event {
            InputEvent::Mouse(e) => e.buttons.is_empty(),
            InputEvent::Pointer(e) => {
                e.buttons.is_empty() && !self.state.is_excluded(PointerId::Platform(e.pointer_id))
            }
            InputEvent::Touch(_) => false,
        }
    }

    /// End `pointer` if tracked. Returns whether it was removed.
    fn trigger_end(&mut self, pointer: Pointer, event: &InputEvent) -> bool {
        // Mouse events send one up per button, so the primary may still be down.
        if event.buttons().is_some_and(|b| b.primary_down()) {
            tracing::trace!("Primary button still down for pointer {}", pointer.id());
            return false;
        }
        let Some(index) = self.state.index_of(pointer.id()) else {
            return false;
        };
        self.state.remove(index);

        // A move reinterpreted as an end also counts as cancelled.
        let cancelled = !event.event_type().is_release();
        tracing::debug!(
            "Pointer {} ended by {} (cancelled={})",
            pointer.id(),
            event.event_type(),
            cancelled
        );
        self.handler.end(&self.state, &pointer, event, cancelled);
        true
    }

    /// Mouse-up, pointer-up or pointer-cancel.
    fn pointer_end(&mut self, event: InputEvent) {
        let pointer = match &event {
            InputEvent::Mouse(e) => Pointer::from_mouse(e.clone()),
            InputEvent::Pointer(e) => Pointer::from_pointer_event(e.clone()),
            InputEvent::Touch(_) => {
                tracing::trace!("Ignoring touch event on pointer end listener");
                return;
            }
        };
        if !self.trigger_end(pointer, &event) {
            return;
        }

        // Pointer listeners are shared by all pointers; the mouse ones only
        // ever serve the single mouse pointer.
        if matches!(event, InputEvent::Pointer(_)) && !self.state.is_empty() {
            return;
        }
        for listener in self.wiring.tracking_listeners(&event) {
            self.unsubscribe(listener);
        }
    }

    fn touch_end(&mut self, event: InputEvent) {
        let InputEvent::Touch(touch_event) = &event else {
            tracing::trace!("Ignoring non-touch event on touch end listener");
            return;
        };
        for touch in &touch_event.changed_touches {
            self.trigger_end(Pointer::from_touch(touch), &event);
        }
    }
}
