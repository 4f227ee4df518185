use tracing::debug;

use crate::camera::Point;
use crate::config::PlacementConfig;
use crate::drag::{DragPhase, DragRoute, PointerOrigin, route_drag};
use crate::error::PlacementError;
use crate::host::{Host, Layer, TemplateStore};
use crate::input::{Propagation, RawEvent};
use crate::session::{PendingPlacement, PlacementSession};
use crate::template::Preview;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Owns the host services and at most one active placement session.
///
/// The host forwards every bound device event to [`PlacementEngine::on_event`]
/// and every native left-drag callback to [`PlacementEngine::on_drag`]. A
/// session is dropped from the engine as soon as it reaches a terminal state.
pub struct PlacementEngine<H, S> {
    host: H,
    store: S,
    config: PlacementConfig,
    session: Option<PlacementSession>,
}

impl<H: Host, S: TemplateStore> PlacementEngine<H, S> {
    #[must_use]
    pub fn new(host: H, store: S, config: PlacementConfig) -> Self {
        Self { host, store, config, session: None }
    }

    // --- Lifecycle ---

    /// Start placing `preview`. Refused while another session is active.
    pub fn begin(&mut self, preview: Preview, prior_layer: Box<dyn Layer>) -> Result<PendingPlacement, PlacementError> {
        if self.is_placing() {
            return Err(PlacementError::SessionActive);
        }
        let mut session = PlacementSession::new(preview, prior_layer, self.config);
        let pending = session.start(&mut self.host)?;
        self.session = Some(session);
        Ok(pending)
    }

    /// Confirm the active session programmatically.
    pub async fn confirm(&mut self) -> Result<(), PlacementError> {
        let Some(session) = self.session.as_mut() else {
            return Err(PlacementError::NotActive);
        };
        let result = session.confirm(&mut self.host, &self.store).await;
        self.session = None;
        result
    }

    /// Cancel the active session programmatically.
    pub fn cancel(&mut self) -> Result<(), PlacementError> {
        let Some(session) = self.session.as_mut() else {
            return Err(PlacementError::NotActive);
        };
        let result = session.cancel(&mut self.host);
        self.session = None;
        result
    }

    // --- Input events ---

    /// Deliver one device event. Returns what the host must do with the native event.
    pub async fn on_event(&mut self, event: &RawEvent) -> Propagation {
        let Some(session) = self.session.as_mut() else {
            return Propagation::default();
        };
        let propagation = session.handle(&mut self.host, &self.store, event).await;
        if session.state().is_terminal() {
            debug!(state = ?session.state(), "placement session finished");
            self.session = None;
        }
        propagation
    }

    /// Deliver a native left-drag callback.
    ///
    /// When routed to the session, a touch drag-move repositions the preview;
    /// drag start and cancel are swallowed.
    pub fn on_drag(&mut self, phase: DragPhase, origin: PointerOrigin, screen: Point) -> DragRoute {
        let route = route_drag(origin, self.is_placing());
        if route == DragRoute::Session && phase == DragPhase::Move {
            if let Some(session) = self.session.as_mut() {
                let local = self.host.camera().screen_to_local(screen);
                session.move_to(&mut self.host, local);
            }
        }
        route
    }

    // --- Queries ---

    #[must_use]
    pub fn is_placing(&self) -> bool {
        self.session.as_ref().is_some_and(PlacementSession::is_active)
    }

    #[must_use]
    pub fn session(&self) -> Option<&PlacementSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
