//! Template model: shape kinds, persisted template data, and the live preview.
//!
//! `TemplateData` is what the host's document store persists. A `Preview` wraps
//! one `TemplateData` for the duration of a placement session and is the only
//! thing the session mutates; on confirm its data is handed to the store and
//! comes back as a `Template` with an assigned id.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;

/// Unique identifier assigned to a persisted template.
pub type TemplateId = Uuid;

/// The area-of-effect shape of a measured template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Radius around the origin.
    Circle,
    /// Wedge opening from the origin along `direction`.
    Cone,
    /// Line of fixed width from the origin along `direction`.
    Ray,
    /// Axis-aligned square whose diagonal is `distance`.
    Rect,
}

impl ShapeKind {
    /// Whether the two-finger rotation gesture applies to this shape.
    #[must_use]
    pub fn is_rotatable(self) -> bool {
        matches!(self, Self::Cone | Self::Ray)
    }
}

/// Template fields as stored by the host document layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateData {
    /// Shape of the template.
    pub kind: ShapeKind,
    /// Origin x in layer-local coordinates.
    pub x: f64,
    /// Origin y in layer-local coordinates.
    pub y: f64,
    /// Facing in degrees, clockwise from the positive x axis.
    #[serde(default)]
    pub direction: f64,
    /// Size in grid distance units.
    pub distance: f64,
    /// Opening angle of a cone, in degrees.
    #[serde(default)]
    pub angle: f64,
    /// Width of a ray, in grid distance units.
    #[serde(default)]
    pub width: f64,
    /// Optional fill color as a CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
}

impl TemplateData {
    /// Template of the given kind and size at the origin.
    #[must_use]
    pub fn new(kind: ShapeKind, distance: f64) -> Self {
        Self {
            kind,
            x: 0.0,
            y: 0.0,
            direction: 0.0,
            distance,
            angle: 0.0,
            width: 0.0,
            fill_color: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A persisted template returned by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    #[serde(flatten)]
    pub data: TemplateData,
}

/// The transient template being positioned during a placement session.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    data: TemplateData,
    layer: String,
}

impl Preview {
    /// Wrap template data as a preview owned by the named layer.
    #[must_use]
    pub fn new(data: TemplateData, layer: impl Into<String>) -> Self {
        Self { data, layer: layer.into() }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.data.kind
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.data.position()
    }

    pub fn set_position(&mut self, p: Point) {
        self.data.x = p.x;
        self.data.y = p.y;
    }

    /// Current facing in degrees.
    #[must_use]
    pub fn direction(&self) -> f64 {
        self.data.direction
    }

    pub fn set_direction(&mut self, degrees: f64) {
        self.data.direction = degrees;
    }

    /// Name of the layer the preview is drawn on.
    #[must_use]
    pub fn layer(&self) -> &str {
        &self.layer
    }

    #[must_use]
    pub fn data(&self) -> &TemplateData {
        &self.data
    }

    /// Move the preview toward the viewport pivot.
    ///
    /// The current coordinates are treated as an offset: the new position is
    /// `pivot - current / 2` on each axis.
    pub fn center_on(&mut self, pivot: Point) {
        self.data.x = pivot.x - self.data.x / 2.0;
        self.data.y = pivot.y - self.data.y / 2.0;
    }
}
