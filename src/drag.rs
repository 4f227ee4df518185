//! Native drag override: keeps the host's left-button drag handling away from
//! touch gestures while a template is being placed.
//!
//! Without it a one-finger drag would both move the preview (through the
//! session's touch bindings) and start the host's own drag of whatever sits
//! under the finger.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use serde::{Deserialize, Serialize};

/// Device class that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerOrigin {
    Mouse,
    Pen,
    Touch,
}

/// Which native left-drag callback fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    Start,
    Move,
    Cancel,
}

/// Who handles a native drag callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRoute {
    /// Run the host's default drag behavior unchanged.
    Host,
    /// Suppress the host behavior; the placement session owns the gesture.
    Session,
}

/// Route a native drag callback.
///
/// Touch-sourced drags go to the session while one is active. Everything
/// else, and every drag when no session is active, stays with the host.
#[must_use]
pub fn route_drag(origin: PointerOrigin, placing: bool) -> DragRoute {
    if placing && origin == PointerOrigin::Touch { DragRoute::Session } else { DragRoute::Host }
}
