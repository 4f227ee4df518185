//! Touch-capable placement of measured templates on a gridded canvas.
//!
//! A placement session spawns a preview template, lets mouse or touch input
//! move and rotate it, and ends by either persisting it through the host's
//! document store or discarding it. The host application owns the scene, the
//! grid math, and the database; this crate owns the interaction state machine
//! and the translation of raw device events into placement actions.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::PlacementEngine`]: at most one active session, event and drag routing |
//! | [`session`] | The placement state machine and its single-shot outcome |
//! | [`input`] | Raw device events and the input normalizer |
//! | [`drag`] | Override policy for the host's native left-button drag |
//! | [`host`] | Traits for the collaborators the session calls into |
//! | [`template`] | Shape kinds, template data, and the live preview |
//! | [`camera`] | Points and screen/local conversion |
//! | [`memory`] | In-memory host implementations |
//! | [`config`] | Environment-driven configuration |
//! | [`error`] | Error types |
//! | [`consts`] | Throttle, snapping, and rotation constants |

pub mod camera;
pub mod config;
pub mod consts;
pub mod drag;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod memory;
pub mod session;
pub mod template;
