//! Handles shared by every system that touches the portal scene.

/// Scene-wide asset and material handles created once at startup.
pub mod scene_context;
