//! Placement session: the lifecycle of one in-progress template placement.
//!
//! A session moves `Idle → Active → Confirmed | Cancelled` and never goes
//! back. `start` binds every device source and hands out a
//! [`PendingPlacement`]; the first terminal action tears all bindings down
//! before anything else happens, so later input cannot reach the preview.
//!
//! The session owns its subscriptions, throttle timestamp, and outcome
//! sender. The host is borrowed per call so one engine can own both.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::camera::Point;
use crate::config::PlacementConfig;
use crate::consts::{GRID_SNAP_INTERVAL, GRIDLESS_SNAP_INTERVAL};
use crate::error::PlacementError;
use crate::host::{Canvas, Host, Layer, Subscription, TemplateStore};
use crate::input::{Action, EventSource, InputContext, Normalizer, Propagation, RawEvent};
use crate::template::{Preview, Template};

/// What a settled placement yields: the created templates, or why there are none.
pub type PlacementOutcome = Result<Vec<Template>, PlacementError>;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Confirmed,
    Cancelled,
}

impl SessionState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }
}

/// Single-shot handle to a session's outcome.
///
/// Resolves once, when the session confirms or cancels. A session dropped
/// before settling resolves to [`PlacementError::Abandoned`].
#[derive(Debug)]
pub struct PendingPlacement {
    rx: oneshot::Receiver<PlacementOutcome>,
}

impl Future for PendingPlacement {
    type Output = PlacementOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(PlacementError::Abandoned)))
    }
}

/// Snapping interval for the host's current grid.
fn snap_interval<H: Canvas + ?Sized>(host: &H) -> f64 {
    if host.is_gridless() { GRIDLESS_SNAP_INTERVAL } else { GRID_SNAP_INTERVAL }
}

pub struct PlacementSession {
    state: SessionState,
    preview: Preview,
    prior_layer: Box<dyn Layer>,
    subscriptions: Vec<Subscription>,
    last_move: Option<Instant>,
    outcome: Option<oneshot::Sender<PlacementOutcome>>,
    normalizer: Normalizer,
    config: PlacementConfig,
}

impl PlacementSession {
    /// An idle session for `preview`. `prior_layer` is reactivated when it ends.
    #[must_use]
    pub fn new(preview: Preview, prior_layer: Box<dyn Layer>, config: PlacementConfig) -> Self {
        Self {
            state: SessionState::Idle,
            preview,
            prior_layer,
            subscriptions: Vec::new(),
            last_move: None,
            outcome: None,
            normalizer: Normalizer::new(config.confirm_on_touch_end),
            config,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    #[must_use]
    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Bindings currently held; empty outside the active state.
    #[must_use]
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    fn is_bound(&self, source: EventSource) -> bool {
        self.subscriptions.iter().any(|s| s.source == source)
    }

    // --- Lifecycle ---

    /// Bind input, show the confirm control, and center the preview on the viewport.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<PendingPlacement, PlacementError> {
        if self.state != SessionState::Idle {
            return Err(PlacementError::AlreadyStarted);
        }

        let (tx, rx) = oneshot::channel();
        self.outcome = Some(tx);

        self.subscriptions = EventSource::DEVICE.iter().map(|&source| host.bind(source)).collect();
        if self.config.shows_confirm_control() {
            self.subscriptions.push(host.bind(EventSource::ConfirmControl));
            host.set_confirm_visible(true);
        }
        host.set_native_overrides(true);

        self.preview.center_on(host.pivot());
        self.state = SessionState::Active;
        host.refresh(&self.preview);

        info!(kind = ?self.preview.kind(), bindings = self.subscriptions.len(), "template placement started");
        Ok(PendingPlacement { rx })
    }

    /// Normalize one raw event and apply the resulting action.
    ///
    /// Events on sources this session has not bound are passed through untouched.
    pub async fn handle<H, S>(&mut self, host: &mut H, store: &S, event: &RawEvent) -> Propagation
    where
        H: Host + ?Sized,
        S: TemplateStore + ?Sized,
    {
        if !self.is_active() || !self.is_bound(event.source()) {
            return Propagation::default();
        }

        let ctx = InputContext {
            camera: host.camera(),
            kind: self.preview.kind(),
            direction: self.preview.direction(),
            grid: host.grid_kind(),
        };
        let normalized = self.normalizer.normalize(event, &ctx);

        match normalized.action {
            Some(Action::Move(point)) => {
                self.move_to(host, point);
            }
            Some(Action::Rotate(degrees)) => {
                self.rotate(host, degrees);
            }
            Some(Action::Confirm) => {
                if let Err(err) = self.confirm(host, store).await {
                    debug!(%err, "confirm ignored");
                }
            }
            Some(Action::Cancel) => {
                if let Err(err) = self.cancel(host) {
                    debug!(%err, "cancel ignored");
                }
            }
            None => {}
        }
        normalized.propagation
    }

    /// Snap `point` to the grid and move the preview there.
    ///
    /// Returns `false` when the session is not active or the move arrived
    /// within the throttle interval of the last accepted one. Dropped moves
    /// are not queued.
    pub fn move_to<H: Canvas + ?Sized>(&mut self, host: &mut H, point: Point) -> bool {
        if !self.is_active() {
            return false;
        }
        let now = Instant::now();
        if let Some(last) = self.last_move {
            if now.duration_since(last) < self.config.move_throttle {
                trace!(x = point.x, y = point.y, "move throttled");
                return false;
            }
        }

        let snapped = host.snap(point, snap_interval(&*host));
        self.preview.set_position(snapped);
        self.last_move = Some(now);
        host.refresh(&self.preview);
        debug!(x = snapped.x, y = snapped.y, "preview moved");
        true
    }

    /// Set the preview's absolute direction.
    pub fn rotate<H: Canvas + ?Sized>(&mut self, host: &mut H, degrees: f64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.preview.set_direction(degrees);
        host.refresh(&self.preview);
        debug!(degrees, "preview rotated");
        true
    }

    /// Tear down, snap the final position, and persist the preview.
    ///
    /// The pending outcome receives the store's result, including its error.
    /// The returned `Result` only reports misuse (session not active).
    pub async fn confirm<H, S>(&mut self, host: &mut H, store: &S) -> Result<(), PlacementError>
    where
        H: Host + ?Sized,
        S: TemplateStore + ?Sized,
    {
        if !self.is_active() {
            return Err(PlacementError::NotActive);
        }
        self.terminate(host, SessionState::Confirmed);

        let snapped = host.snap(self.preview.position(), snap_interval(&*host));
        self.preview.set_position(snapped);

        let outcome = match store.create_templates(vec![self.preview.data().clone()]).await {
            Ok(created) => {
                info!(count = created.len(), x = snapped.x, y = snapped.y, "template placement confirmed");
                Ok(created)
            }
            Err(err) => {
                warn!(%err, "template persistence failed");
                Err(PlacementError::from(err))
            }
        };
        self.settle(outcome);
        Ok(())
    }

    /// Tear down and reject the pending outcome with [`PlacementError::Cancelled`].
    pub fn cancel<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), PlacementError> {
        if !self.is_active() {
            return Err(PlacementError::NotActive);
        }
        self.terminate(host, SessionState::Cancelled);
        info!("template placement cancelled");
        self.settle(Err(PlacementError::Cancelled));
        Ok(())
    }

    // Runs once: both callers check `is_active` and this leaves the active state first.
    fn terminate<H: Host + ?Sized>(&mut self, host: &mut H, terminal: SessionState) {
        self.state = terminal;
        host.cancel_drag();
        for subscription in self.subscriptions.drain(..) {
            host.unbind(subscription);
        }
        host.set_confirm_visible(false);
        host.set_native_overrides(false);
        self.prior_layer.activate();
        match self.prior_layer.companion_panel() {
            Some(panel) => panel.restore(),
            None => trace!("no companion panel to restore"),
        }
    }

    fn settle(&mut self, outcome: PlacementOutcome) {
        if let Some(tx) = self.outcome.take() {
            if tx.send(outcome).is_err() {
                debug!("placement outcome dropped by caller");
            }
        }
    }
}
