//! Pointer Tracker - one pointer model for mouse, touch and pointer events.
//!
//! Hosts deliver native input events from a single observed surface; the
//! tracker normalizes them into [`Pointer`] snapshots and reports pointer
//! starts, moves and ends to a [`PointerHandler`].

pub mod pointer;
pub mod recorder;
pub mod surface;
pub mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use pointer::{Buttons, EventType, InputEvent, Pointer, PointerId};
pub use recorder::{PointerRecorder, TrackedEvent};
pub use surface::{Capabilities, Handler, Listener, Surface, SurfaceError};
pub use tracker::{
    Callbacks, Mode, PointerHandler, PointerTracker, QuirkConfig, TrackerConfig, TrackerError,
    TrackingState,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a tracing subscriber for the tracker's logs.
///
/// Honours `RUST_LOG`, defaulting to `pointer_tracker=debug`. Does nothing if
/// a global subscriber is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pointer_tracker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
        tracing::debug!("tracing initialized");
    }
}
