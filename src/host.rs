//! Collaborator seams: everything the placement session calls into but does not own.
//!
//! The host application implements these traits over its scene graph, grid,
//! document database, and DOM. [`crate::memory`] has in-memory versions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point};
use crate::error::StoreError;
use crate::input::EventSource;
use crate::template::{Preview, Template, TemplateData};

/// Layout of the host grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridKind {
    Gridless,
    #[default]
    Square,
    Hex,
}

/// Handle returned by [`InputSources::bind`]; releases exactly one binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub id: u64,
    pub source: EventSource,
}

/// Grid, viewport, and scene services of the host canvas.
pub trait Canvas {
    fn grid_kind(&self) -> GridKind;

    fn is_gridless(&self) -> bool {
        self.grid_kind() == GridKind::Gridless
    }

    /// Snap a layer-local point to the grid. An interval of 0 leaves it unchanged.
    fn snap(&self, point: Point, interval: f64) -> Point;

    /// Center of the visible canvas area, in layer-local coordinates.
    fn pivot(&self) -> Point;

    fn camera(&self) -> Camera;

    /// Redraw the preview after a mutation.
    fn refresh(&mut self, preview: &Preview);

    /// Abort any drag the layer thinks is in progress.
    fn cancel_drag(&mut self);
}

/// Device event streams with bind/unbind-by-handle.
pub trait InputSources {
    fn bind(&mut self, source: EventSource) -> Subscription;

    fn unbind(&mut self, subscription: Subscription);

    /// Override (or restore) the native context-menu and wheel behavior.
    fn set_native_overrides(&mut self, active: bool);
}

/// The on-screen confirm/cancel control.
pub trait ConfirmControl {
    /// Toggle the control's "active" (visible) state.
    fn set_confirm_visible(&mut self, visible: bool);
}

/// Everything a session needs from the host for synchronous work.
pub trait Host: Canvas + InputSources + ConfirmControl {}

impl<T: Canvas + InputSources + ConfirmControl> Host for T {}

/// A detail panel minimized while a template is placed.
pub trait CompanionPanel {
    fn restore(&mut self);
}

/// The UI layer that was active before placement began.
pub trait Layer {
    fn activate(&mut self);

    /// Panel minimized for the workflow, if there is one.
    fn companion_panel(&mut self) -> Option<&mut dyn CompanionPanel> {
        None
    }
}

/// Document-creation service of the host.
#[async_trait(?Send)]
pub trait TemplateStore {
    async fn create_templates(&self, data: Vec<TemplateData>) -> Result<Vec<Template>, StoreError>;
}
