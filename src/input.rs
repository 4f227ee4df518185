//! Input model: raw device events, their sources, and the Input Normalizer.
//!
//! The host forwards DOM-style events as [`RawEvent`]s. [`Normalizer`] applies
//! the device- and shape-specific admission rules and reduces each event to at
//! most one logical [`Action`] plus the propagation policy the host must apply
//! to the native event.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};
use crate::consts::{WHEEL_COARSE_STEP_DEG, WHEEL_FINE_STEP_DEG, WHEEL_HEX_STEP_DEG};
use crate::host::GridKind;
use crate::template::ShapeKind;

/// A device event stream the session subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    PointerMove,
    PointerDown,
    ContextMenu,
    Wheel,
    TouchStart,
    TouchMove,
    TouchEnd,
    /// Clicks on the on-screen confirm/cancel control.
    ConfirmControl,
}

impl EventSource {
    /// Sources bound for every session regardless of input mode.
    pub const DEVICE: [EventSource; 7] = [
        Self::PointerMove,
        Self::PointerDown,
        Self::ContextMenu,
        Self::Wheel,
        Self::TouchStart,
        Self::TouchMove,
        Self::TouchEnd,
    ];
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button. Cancellation arrives separately as a context-menu event.
    Secondary,
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// The two clickable regions of the confirmation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlButton {
    Confirm,
    Cancel,
}

/// A device-native event as delivered by the host.
///
/// Positions are screen-space (CSS pixels). Touch variants carry every touch
/// point still active after the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawEvent {
    PointerMove { position: Point },
    PointerDown { button: Button },
    ContextMenu,
    Wheel {
        delta_y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd { touches: Vec<Point> },
    Control { button: ControlButton },
}

impl RawEvent {
    /// The event source this event is delivered on.
    #[must_use]
    pub fn source(&self) -> EventSource {
        match self {
            Self::PointerMove { .. } => EventSource::PointerMove,
            Self::PointerDown { .. } => EventSource::PointerDown,
            Self::ContextMenu => EventSource::ContextMenu,
            Self::Wheel { .. } => EventSource::Wheel,
            Self::TouchStart { .. } => EventSource::TouchStart,
            Self::TouchMove { .. } => EventSource::TouchMove,
            Self::TouchEnd { .. } => EventSource::TouchEnd,
            Self::Control { .. } => EventSource::ConfirmControl,
        }
    }

    /// Whether the event originated from a touch screen.
    #[must_use]
    pub fn is_touch(&self) -> bool {
        matches!(self, Self::TouchStart { .. } | Self::TouchMove { .. } | Self::TouchEnd { .. })
    }
}

/// A logical placement action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Reposition the preview at a layer-local point.
    Move(Point),
    /// Set the preview's absolute direction in degrees.
    Rotate(f64),
    Confirm,
    Cancel,
}

/// What the host must do with the native event after normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Propagation {
    /// Stop the event bubbling to the host's own handlers.
    pub stop: bool,
    /// Suppress the browser default (context menu, page zoom).
    pub prevent_default: bool,
}

impl Propagation {
    const PASS: Self = Self { stop: false, prevent_default: false };
    const STOP: Self = Self { stop: true, prevent_default: false };
    const SWALLOW: Self = Self { stop: true, prevent_default: true };
}

/// Result of normalizing one raw event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    pub action: Option<Action>,
    pub propagation: Propagation,
}

impl Normalized {
    /// Event not admitted: no action, native handling untouched.
    pub const IGNORED: Self = Self { action: None, propagation: Propagation::PASS };

    fn act(action: Action, propagation: Propagation) -> Self {
        Self { action: Some(action), propagation }
    }
}

/// Per-event state the admission rules depend on.
#[derive(Debug, Clone, Copy)]
pub struct InputContext {
    /// Host camera, for screen → local conversion.
    pub camera: Camera,
    /// Shape of the active preview.
    pub kind: ShapeKind,
    /// Current preview direction; wheel rotation is relative to it.
    pub direction: f64,
    pub grid: GridKind,
}

/// Maps raw device events to logical actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    confirm_on_touch_end: bool,
}

impl Normalizer {
    #[must_use]
    pub fn new(confirm_on_touch_end: bool) -> Self {
        Self { confirm_on_touch_end }
    }

    /// Translate one raw event under the given context.
    #[must_use]
    pub fn normalize(&self, event: &RawEvent, ctx: &InputContext) -> Normalized {
        match event {
            RawEvent::PointerMove { position } => {
                Normalized::act(Action::Move(ctx.camera.screen_to_local(*position)), Propagation::STOP)
            }
            RawEvent::PointerDown { button: Button::Primary } => Normalized::act(Action::Confirm, Propagation::STOP),
            RawEvent::PointerDown { .. } => Normalized::IGNORED,
            RawEvent::ContextMenu => Normalized::act(Action::Cancel, Propagation::SWALLOW),
            RawEvent::Wheel { delta_y, modifiers } => wheel_rotation(*delta_y, *modifiers, ctx),
            // Keeps the host's drag-start from also seeing the touch.
            RawEvent::TouchStart { .. } => Normalized { action: None, propagation: Propagation::STOP },
            RawEvent::TouchMove { touches } => touch_move(touches, ctx),
            RawEvent::TouchEnd { touches } => {
                if self.confirm_on_touch_end && touches.is_empty() {
                    Normalized::act(Action::Confirm, Propagation::STOP)
                } else {
                    Normalized::IGNORED
                }
            }
            RawEvent::Control { button: ControlButton::Confirm } => Normalized::act(Action::Confirm, Propagation::STOP),
            RawEvent::Control { button: ControlButton::Cancel } => Normalized::act(Action::Cancel, Propagation::STOP),
        }
    }
}

fn touch_move(touches: &[Point], ctx: &InputContext) -> Normalized {
    match touches {
        [only] => Normalized::act(Action::Move(ctx.camera.screen_to_local(*only)), Propagation::STOP),
        [a, b] if ctx.kind.is_rotatable() => {
            Normalized::act(Action::Rotate(a.angle_to_deg(*b)), Propagation::SWALLOW)
        }
        _ => Normalized::IGNORED,
    }
}

fn wheel_rotation(delta_y: f64, modifiers: Modifiers, ctx: &InputContext) -> Normalized {
    if delta_y.abs() < f64::EPSILON || !delta_y.is_finite() {
        return Normalized::IGNORED;
    }
    let step = if !modifiers.shift {
        WHEEL_FINE_STEP_DEG
    } else if ctx.grid == GridKind::Hex {
        WHEEL_HEX_STEP_DEG
    } else {
        WHEEL_COARSE_STEP_DEG
    };
    let propagation = Propagation { stop: true, prevent_default: modifiers.ctrl };
    Normalized::act(Action::Rotate(ctx.direction + step * delta_y.signum()), propagation)
}
