//! Screen/local coordinate helpers for the placement layer.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or layer-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Angle of the segment from `self` to `other`, in degrees.
    ///
    /// `atan2(dy, dx)` converted from radians, so `(0,0) → (10,0)` is 0° and
    /// `(0,0) → (0,10)` is 90° (y grows downward on screen).
    #[must_use]
    pub fn angle_to_deg(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }
}

/// Camera state of the host canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to layer-local coordinates.
    #[must_use]
    pub fn screen_to_local(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a layer-local point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn local_to_screen(&self, local: Point) -> Point {
        Point {
            x: local.x * self.zoom + self.pan_x,
            y: local.y * self.zoom + self.pan_y,
        }
    }
}
