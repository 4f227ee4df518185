//! End-to-end placement through the engine over the in-memory host.
#![allow(clippy::float_cmp)]

use std::time::Duration;

use template_placement::camera::Point;
use template_placement::config::PlacementConfig;
use template_placement::drag::{DragPhase, DragRoute, PointerOrigin};
use template_placement::engine::PlacementEngine;
use template_placement::host::GridKind;
use template_placement::input::{ControlButton, EventSource, RawEvent};
use template_placement::memory::{MemoryCanvas, MemoryLayer, MemoryStore};
use template_placement::template::{Preview, ShapeKind, TemplateData};

fn cone() -> Preview {
    let data = TemplateData { angle: 53.13, ..TemplateData::new(ShapeKind::Cone, 15.0) };
    Preview::new(data, "templates")
}

#[tokio::test(start_paused = true)]
async fn touch_session_moves_rotates_and_confirms() {
    let mut canvas = MemoryCanvas::new(GridKind::Square, 100.0);
    canvas.pivot = Point::new(400.0, 300.0);
    let mut engine = PlacementEngine::new(canvas, MemoryStore::new(), PlacementConfig::default());
    let layer = MemoryLayer::with_panel();
    let probe = layer.probe();

    let pending = engine.begin(cone(), Box::new(layer)).unwrap();
    assert!(engine.host().confirm_visible());

    let start = RawEvent::TouchStart { touches: vec![Point::new(120.0, 80.0)] };
    assert!(engine.on_event(&start).await.stop);
    engine.on_event(&RawEvent::TouchMove { touches: vec![Point::new(120.0, 80.0)] }).await;

    tokio::time::advance(Duration::from_millis(25)).await;
    assert_eq!(engine.on_drag(DragPhase::Move, PointerOrigin::Touch, Point::new(180.0, 220.0)), DragRoute::Session);

    let twist = RawEvent::TouchMove { touches: vec![Point::new(0.0, 0.0), Point::new(0.0, 10.0)] };
    assert!(engine.on_event(&twist).await.prevent_default);

    engine.on_event(&RawEvent::Control { button: ControlButton::Confirm }).await;

    let created = pending.await.unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].data.position(), Point::new(200.0, 200.0));
    assert!((created[0].data.direction - 90.0).abs() < 1e-9);
    assert_eq!(engine.store().templates(), created);

    let host = engine.host();
    assert_eq!(host.bound_count(), 0);
    assert!(!host.confirm_visible());
    assert!(!host.native_overrides());
    assert_eq!(probe.activations(), 1);
    assert_eq!(probe.panel_restores(), 1);
    assert!(!engine.is_placing());
}

#[tokio::test]
async fn mouse_session_cancels_from_context_menu() {
    let config = PlacementConfig { input_mode: template_placement::config::InputMode::Mouse, ..PlacementConfig::default() };
    let mut engine = PlacementEngine::new(MemoryCanvas::default(), MemoryStore::new(), config);
    let layer = MemoryLayer::new();
    let probe = layer.probe();

    let pending = engine.begin(cone(), Box::new(layer)).unwrap();
    assert!(!engine.host().is_bound(EventSource::ConfirmControl));

    engine.on_event(&RawEvent::PointerMove { position: Point::new(260.0, 140.0) }).await;
    let menu = engine.on_event(&RawEvent::ContextMenu).await;
    assert!(menu.prevent_default);

    assert!(pending.await.unwrap_err().is_cancellation());
    assert!(engine.store().templates().is_empty());
    assert_eq!(engine.host().bound_count(), 0);
    assert_eq!(probe.activations(), 1);
    assert_eq!(probe.panel_restores(), 0);
}
