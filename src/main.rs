//! `template-replay`: drive a placement session from a JSON input script.
//!
//! Usage: `template-replay <script.json>`
//!
//! The script names the template and the canvas, then lists steps:
//!
//! ```json
//! {
//!   "template": { "kind": "cone", "x": 0, "y": 0, "distance": 15, "angle": 53 },
//!   "canvas": { "grid": "square", "cell_size": 100, "pivot": { "x": 400, "y": 300 } },
//!   "steps": [
//!     { "event": { "type": "touch_move", "touches": [{ "x": 120, "y": 80 }] } },
//!     { "wait": { "ms": 25 } },
//!     { "drag": { "phase": "move", "origin": "touch", "position": { "x": 150, "y": 90 } } },
//!     { "event": { "type": "control", "button": "confirm" } }
//!   ]
//! }
//! ```
//!
//! The outcome is printed to stdout as JSON. Configuration comes from the
//! `PLACEMENT_*` environment variables.

use std::process::ExitCode;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use template_placement::camera::Point;
use template_placement::config::PlacementConfig;
use template_placement::drag::{DragPhase, PointerOrigin};
use template_placement::engine::PlacementEngine;
use template_placement::error::{ConfigError, PlacementError};
use template_placement::host::GridKind;
use template_placement::input::RawEvent;
use template_placement::memory::{MemoryCanvas, MemoryLayer, MemoryStore};
use template_placement::template::{Preview, TemplateData};
use tracing::{error, info, warn};

const TEMPLATE_LAYER: &str = "templates";

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("usage: template-replay <script.json>")]
    Usage,
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

#[derive(Debug, Deserialize)]
struct Script {
    template: TemplateData,
    #[serde(default)]
    canvas: CanvasSpec,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CanvasSpec {
    grid: GridKind,
    cell_size: f64,
    pivot: Point,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self { grid: GridKind::Square, cell_size: 100.0, pivot: Point::default() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Step {
    Event(RawEvent),
    Drag { phase: DragPhase, origin: PointerOrigin, position: Point },
    Wait { ms: u64 },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "replay failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ReplayError> {
    let path = std::env::args().nth(1).ok_or(ReplayError::Usage)?;
    let script: Script = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let config = PlacementConfig::from_env()?;

    let mut canvas = MemoryCanvas::new(script.canvas.grid, script.canvas.cell_size);
    canvas.pivot = script.canvas.pivot;
    let mut engine = PlacementEngine::new(canvas, MemoryStore::new(), config);

    let pending = engine.begin(Preview::new(script.template, TEMPLATE_LAYER), Box::new(MemoryLayer::new()))?;
    info!(%path, steps = script.steps.len(), "replaying script");

    for step in &script.steps {
        if !engine.is_placing() {
            warn!("placement settled before the script ended");
            break;
        }
        match step {
            Step::Event(event) => {
                engine.on_event(event).await;
            }
            Step::Drag { phase, origin, position } => {
                engine.on_drag(*phase, *origin, *position);
            }
            Step::Wait { ms } => tokio::time::sleep(Duration::from_millis(*ms)).await,
        }
    }
    if engine.is_placing() {
        warn!("script ended without confirm or cancel; cancelling");
        engine.cancel()?;
    }

    let report = match pending.await {
        Ok(templates) => json!({ "status": "confirmed", "templates": templates }),
        Err(PlacementError::Cancelled) => json!({ "status": "cancelled" }),
        Err(err) => json!({ "status": "failed", "error": err.to_string() }),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
