//! Shared numeric constants for template placement.

// ── Input ───────────────────────────────────────────────────────

/// Minimum interval between accepted move events, in milliseconds.
pub const MOVE_THROTTLE_MS: u64 = 20;

// ── Grid snapping ───────────────────────────────────────────────

/// Snapping interval on a gridless layout (no snapping).
pub const GRIDLESS_SNAP_INTERVAL: f64 = 0.0;

/// Snapping interval on any gridded layout: half-cell positions.
pub const GRID_SNAP_INTERVAL: f64 = 2.0;

// ── Wheel rotation ──────────────────────────────────────────────

/// Degrees per wheel notch without modifiers.
pub const WHEEL_FINE_STEP_DEG: f64 = 5.0;

/// Degrees per wheel notch with Shift on square or gridless layouts.
pub const WHEEL_COARSE_STEP_DEG: f64 = 15.0;

/// Degrees per wheel notch with Shift on hex layouts.
pub const WHEEL_HEX_STEP_DEG: f64 = 30.0;
