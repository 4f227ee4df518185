//! In-memory host: a square-grid canvas, a template store, and a layer.
//!
//! Used by the `template-replay` binary and the tests. Every collaborator
//! records what was done to it so callers can inspect the aftermath of a
//! session.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::camera::{Camera, Point};
use crate::error::StoreError;
use crate::host::{Canvas, CompanionPanel, ConfirmControl, GridKind, InputSources, Layer, Subscription, TemplateStore};
use crate::input::EventSource;
use crate::template::{Preview, Template, TemplateData};

/// Canvas with uniform square cells. Hex layouts snap with the same cell math.
#[derive(Debug, Clone)]
pub struct MemoryCanvas {
    pub grid: GridKind,
    /// Cell edge length in layer-local units.
    pub cell_size: f64,
    pub pivot: Point,
    pub camera: Camera,
    next_subscription: u64,
    bound: HashMap<u64, EventSource>,
    refreshes: usize,
    drag_cancels: usize,
    confirm_visible: bool,
    native_overrides: bool,
    last_refreshed: Option<Preview>,
}

impl MemoryCanvas {
    #[must_use]
    pub fn new(grid: GridKind, cell_size: f64) -> Self {
        Self {
            grid,
            cell_size,
            pivot: Point::default(),
            camera: Camera::default(),
            next_subscription: 1,
            bound: HashMap::new(),
            refreshes: 0,
            drag_cancels: 0,
            confirm_visible: false,
            native_overrides: false,
            last_refreshed: None,
        }
    }

    /// Whether any subscription on `source` is live.
    #[must_use]
    pub fn is_bound(&self, source: EventSource) -> bool {
        self.bound.values().any(|s| *s == source)
    }

    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    #[must_use]
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    #[must_use]
    pub fn drag_cancels(&self) -> usize {
        self.drag_cancels
    }

    #[must_use]
    pub fn confirm_visible(&self) -> bool {
        self.confirm_visible
    }

    #[must_use]
    pub fn native_overrides(&self) -> bool {
        self.native_overrides
    }

    /// The preview as of the most recent refresh.
    #[must_use]
    pub fn last_refreshed(&self) -> Option<&Preview> {
        self.last_refreshed.as_ref()
    }
}

impl Default for MemoryCanvas {
    fn default() -> Self {
        Self::new(GridKind::Square, 100.0)
    }
}

impl Canvas for MemoryCanvas {
    fn grid_kind(&self) -> GridKind {
        self.grid
    }

    fn snap(&self, point: Point, interval: f64) -> Point {
        if interval <= 0.0 || self.grid == GridKind::Gridless || self.cell_size <= 0.0 {
            return point;
        }
        let step = self.cell_size / interval;
        Point::new((point.x / step).round() * step, (point.y / step).round() * step)
    }

    fn pivot(&self) -> Point {
        self.pivot
    }

    fn camera(&self) -> Camera {
        self.camera
    }

    fn refresh(&mut self, preview: &Preview) {
        self.refreshes += 1;
        self.last_refreshed = Some(preview.clone());
    }

    fn cancel_drag(&mut self) {
        self.drag_cancels += 1;
    }
}

impl InputSources for MemoryCanvas {
    fn bind(&mut self, source: EventSource) -> Subscription {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.bound.insert(id, source);
        Subscription { id, source }
    }

    fn unbind(&mut self, subscription: Subscription) {
        if self.bound.remove(&subscription.id).is_none() {
            warn!(id = subscription.id, source = ?subscription.source, "unbind of unknown subscription");
        }
    }

    fn set_native_overrides(&mut self, active: bool) {
        self.native_overrides = active;
    }
}

impl ConfirmControl for MemoryCanvas {
    fn set_confirm_visible(&mut self, visible: bool) {
        self.confirm_visible = visible;
    }
}

/// Template store that keeps created templates in a vector.
#[derive(Debug, Default)]
pub struct MemoryStore {
    templates: RefCell<Vec<Template>>,
    fail_with: Option<StoreError>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every create call fails with `err`.
    #[must_use]
    pub fn failing(err: StoreError) -> Self {
        Self { templates: RefCell::default(), fail_with: Some(err) }
    }

    /// Snapshot of everything created so far.
    #[must_use]
    pub fn templates(&self) -> Vec<Template> {
        self.templates.borrow().clone()
    }
}

#[async_trait(?Send)]
impl TemplateStore for MemoryStore {
    async fn create_templates(&self, data: Vec<TemplateData>) -> Result<Vec<Template>, StoreError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let created: Vec<Template> = data.into_iter().map(|data| Template { id: Uuid::new_v4(), data }).collect();
        self.templates.borrow_mut().extend(created.iter().cloned());
        Ok(created)
    }
}

/// Shared view of a [`MemoryLayer`]'s activity, readable after the layer is moved away.
#[derive(Debug, Clone, Default)]
pub struct LayerProbe {
    activations: Rc<Cell<u32>>,
    panel_restores: Rc<Cell<u32>>,
}

impl LayerProbe {
    #[must_use]
    pub fn activations(&self) -> u32 {
        self.activations.get()
    }

    #[must_use]
    pub fn panel_restores(&self) -> u32 {
        self.panel_restores.get()
    }
}

#[derive(Debug)]
pub struct MemoryPanel {
    restores: Rc<Cell<u32>>,
}

impl CompanionPanel for MemoryPanel {
    fn restore(&mut self) {
        self.restores.set(self.restores.get() + 1);
    }
}

/// A UI layer, optionally with a minimized companion panel.
#[derive(Debug)]
pub struct MemoryLayer {
    probe: LayerProbe,
    panel: Option<MemoryPanel>,
}

impl MemoryLayer {
    /// A layer with no companion panel.
    #[must_use]
    pub fn new() -> Self {
        Self { probe: LayerProbe::default(), panel: None }
    }

    /// A layer whose companion panel is restored when placement ends.
    #[must_use]
    pub fn with_panel() -> Self {
        let probe = LayerProbe::default();
        let panel = MemoryPanel { restores: Rc::clone(&probe.panel_restores) };
        Self { probe, panel: Some(panel) }
    }

    #[must_use]
    pub fn probe(&self) -> LayerProbe {
        self.probe.clone()
    }
}

impl Default for MemoryLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for MemoryLayer {
    fn activate(&mut self) {
        self.probe.activations.set(self.probe.activations.get() + 1);
    }

    fn companion_panel(&mut self) -> Option<&mut dyn CompanionPanel> {
        self.panel.as_mut().map(|panel| panel as &mut dyn CompanionPanel)
    }
}
