#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Camera;
use crate::error::StoreError;
use crate::host::GridKind;
use crate::input::{Button, EventSource};
use crate::memory::{MemoryCanvas, MemoryLayer, MemoryStore};
use crate::template::{ShapeKind, TemplateData};

// =============================================================
// Helpers
// =============================================================

fn engine() -> PlacementEngine<MemoryCanvas, MemoryStore> {
    PlacementEngine::new(MemoryCanvas::new(GridKind::Gridless, 100.0), MemoryStore::new(), PlacementConfig::default())
}

fn preview(kind: ShapeKind) -> Preview {
    Preview::new(TemplateData::new(kind, 15.0), "templates")
}

fn layer() -> Box<dyn Layer> {
    Box::new(MemoryLayer::new())
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn new_engine_is_not_placing() {
    let e = engine();
    assert!(!e.is_placing());
    assert!(e.session().is_none());
}

#[tokio::test]
async fn begin_starts_a_session() {
    let mut e = engine();
    let _pending = e.begin(preview(ShapeKind::Cone), layer()).unwrap();
    assert!(e.is_placing());
    assert!(e.host().is_bound(EventSource::PointerMove));
}

#[tokio::test]
async fn second_begin_is_refused_while_placing() {
    let mut e = engine();
    let _pending = e.begin(preview(ShapeKind::Cone), layer()).unwrap();
    let err = e.begin(preview(ShapeKind::Ray), layer()).unwrap_err();
    assert_eq!(err, PlacementError::SessionActive);
    assert_eq!(e.session().map(|s| s.preview().kind()), Some(ShapeKind::Cone));
}

#[tokio::test]
async fn new_session_allowed_after_previous_ends() {
    let mut e = engine();
    let first = e.begin(preview(ShapeKind::Cone), layer()).unwrap();
    e.on_event(&RawEvent::ContextMenu).await;
    assert!(first.await.unwrap_err().is_cancellation());
    assert!(!e.is_placing());

    let second = e.begin(preview(ShapeKind::Circle), layer()).unwrap();
    e.on_event(&RawEvent::PointerDown { button: Button::Primary }).await;
    assert_eq!(second.await.unwrap()[0].data.kind, ShapeKind::Circle);
}

#[tokio::test]
async fn programmatic_confirm_and_cancel() {
    let mut e = engine();
    let pending = e.begin(preview(ShapeKind::Ray), layer()).unwrap();
    e.confirm().await.unwrap();
    assert_eq!(pending.await.unwrap().len(), 1);
    assert_eq!(e.confirm().await.unwrap_err(), PlacementError::NotActive);

    let pending = e.begin(preview(ShapeKind::Ray), layer()).unwrap();
    e.cancel().unwrap();
    assert!(pending.await.unwrap_err().is_cancellation());
    assert_eq!(e.cancel().unwrap_err(), PlacementError::NotActive);
    assert_eq!(e.store().templates().len(), 1);
}

#[tokio::test]
async fn store_failure_clears_session_and_rejects() {
    let store = MemoryStore::failing(StoreError::Unavailable("offline".into()));
    let mut e = PlacementEngine::new(MemoryCanvas::default(), store, PlacementConfig::default());
    let pending = e.begin(preview(ShapeKind::Cone), layer()).unwrap();

    e.on_event(&RawEvent::PointerDown { button: Button::Primary }).await;

    assert!(matches!(pending.await, Err(PlacementError::Store(_))));
    assert!(!e.is_placing());
    assert_eq!(e.host().bound_count(), 0);
}

// =============================================================
// Events
// =============================================================

#[tokio::test]
async fn events_without_session_pass_through() {
    let mut e = engine();
    assert_eq!(e.on_event(&RawEvent::ContextMenu).await, Propagation::default());
}

#[tokio::test]
async fn pointer_move_repositions_preview() {
    let mut e = engine();
    e.host_mut().camera = Camera { pan_x: 10.0, pan_y: 0.0, zoom: 1.0 };
    let _pending = e.begin(preview(ShapeKind::Cone), layer()).unwrap();

    let propagation = e.on_event(&RawEvent::PointerMove { position: pt(60.0, 40.0) }).await;

    assert!(propagation.stop);
    assert_eq!(e.session().map(|s| s.preview().position()), Some(pt(50.0, 40.0)));
}

// =============================================================
// Drag override
// =============================================================

#[tokio::test]
async fn touch_drag_move_is_delegated_to_session() {
    let mut e = engine();
    let _pending = e.begin(preview(ShapeKind::Cone), layer()).unwrap();

    assert_eq!(e.on_drag(DragPhase::Start, PointerOrigin::Touch, pt(0.0, 0.0)), DragRoute::Session);
    assert_eq!(e.on_drag(DragPhase::Move, PointerOrigin::Touch, pt(30.0, 20.0)), DragRoute::Session);
    assert_eq!(e.session().map(|s| s.preview().position()), Some(pt(30.0, 20.0)));
}

#[tokio::test]
async fn mouse_drag_stays_with_host_during_placement() {
    let mut e = engine();
    let _pending = e.begin(preview(ShapeKind::Cone), layer()).unwrap();
    let before = e.session().map(|s| s.preview().position());

    assert_eq!(e.on_drag(DragPhase::Move, PointerOrigin::Mouse, pt(30.0, 20.0)), DragRoute::Host);
    assert_eq!(e.session().map(|s| s.preview().position()), before);
}

#[test]
fn touch_drag_without_session_stays_with_host() {
    let mut e = engine();
    assert_eq!(e.on_drag(DragPhase::Cancel, PointerOrigin::Touch, pt(0.0, 0.0)), DragRoute::Host);
}
