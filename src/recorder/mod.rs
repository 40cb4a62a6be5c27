//! Transition recording
//!
//! [`PointerRecorder`] is a [`crate::PointerHandler`] that keeps every start,
//! move and end it sees as a serializable [`TrackedEvent`], for replaying a
//! gesture later or inspecting it in tests.

pub mod log;

pub use log::{PointerRecorder, PointerSample, TrackedEvent};
