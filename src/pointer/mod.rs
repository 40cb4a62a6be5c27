//! Native input events and canonical pointers
//!
//! Describes the three native event families (mouse, touch, unified pointer)
//! and normalizes any of them into [`Pointer`] snapshots with uniform
//! identity and coordinate semantics.

pub mod normalize;
pub mod types;

pub use normalize::{NativePointer, Pointer, PointerId};
pub use types::{
    Buttons, EventType, InputEvent, MouseEvent, PointerEvent, PointerType, Position, Touch,
    TouchEvent,
};
