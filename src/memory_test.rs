#![allow(clippy::float_cmp)]

use super::*;
use crate::template::ShapeKind;

// =============================================================
// MemoryCanvas
// =============================================================

#[test]
fn snap_to_half_cells() {
    let canvas = MemoryCanvas::new(GridKind::Square, 100.0);
    assert_eq!(canvas.snap(Point::new(74.0, 126.0), 2.0), Point::new(50.0, 150.0));
}

#[test]
fn snap_is_idempotent() {
    let canvas = MemoryCanvas::new(GridKind::Square, 100.0);
    let once = canvas.snap(Point::new(33.3, 281.0), 2.0);
    assert_eq!(canvas.snap(once, 2.0), once);
}

#[test]
fn zero_interval_or_gridless_leaves_point() {
    let square = MemoryCanvas::new(GridKind::Square, 100.0);
    assert_eq!(square.snap(Point::new(12.0, 13.0), 0.0), Point::new(12.0, 13.0));

    let gridless = MemoryCanvas::new(GridKind::Gridless, 100.0);
    assert!(gridless.is_gridless());
    assert_eq!(gridless.snap(Point::new(12.0, 13.0), 2.0), Point::new(12.0, 13.0));
}

#[test]
fn bind_and_unbind_track_live_subscriptions() {
    let mut canvas = MemoryCanvas::default();
    let a = canvas.bind(EventSource::Wheel);
    let b = canvas.bind(EventSource::Wheel);
    assert_ne!(a.id, b.id);
    assert_eq!(canvas.bound_count(), 2);

    canvas.unbind(a);
    assert!(canvas.is_bound(EventSource::Wheel));
    canvas.unbind(b);
    assert!(!canvas.is_bound(EventSource::Wheel));

    // Unknown handle is tolerated.
    canvas.unbind(b);
    assert_eq!(canvas.bound_count(), 0);
}

#[test]
fn refresh_records_preview() {
    let mut canvas = MemoryCanvas::default();
    let preview = Preview::new(TemplateData::new(ShapeKind::Rect, 10.0), "templates");
    canvas.refresh(&preview);
    assert_eq!(canvas.refreshes(), 1);
    assert_eq!(canvas.last_refreshed(), Some(&preview));
}

// =============================================================
// MemoryStore
// =============================================================

#[tokio::test]
async fn store_assigns_ids_and_keeps_templates() {
    let store = MemoryStore::new();
    let created = store
        .create_templates(vec![TemplateData::new(ShapeKind::Circle, 20.0)])
        .await
        .unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].data.kind, ShapeKind::Circle);
    assert_eq!(store.templates(), created);
}

#[tokio::test]
async fn failing_store_returns_error_and_keeps_nothing() {
    let store = MemoryStore::failing(StoreError::Unavailable("offline".into()));
    let err = store
        .create_templates(vec![TemplateData::new(ShapeKind::Circle, 20.0)])
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::Unavailable("offline".into()));
    assert!(store.templates().is_empty());
}

// =============================================================
// MemoryLayer
// =============================================================

#[test]
fn layer_without_panel() {
    let mut layer = MemoryLayer::new();
    let probe = layer.probe();
    layer.activate();
    assert_eq!(probe.activations(), 1);
    assert!(layer.companion_panel().is_none());
}

#[test]
fn layer_panel_restore_is_visible_through_probe() {
    let mut layer = MemoryLayer::with_panel();
    let probe = layer.probe();
    if let Some(panel) = layer.companion_panel() {
        panel.restore();
    }
    assert_eq!(probe.panel_restores(), 1);
}
