//! Camera setup and orbit navigation around the portal scene.
//!
//! The orbit is damped: pointer input feeds pending deltas that are applied
//! a fraction at a time each frame.

/// Orbit camera resource, spawn system and input controller.
pub mod orbit_camera;
