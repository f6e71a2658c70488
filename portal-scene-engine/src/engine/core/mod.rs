//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, the frame loop state
//! machine and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with material pipelines, asset loading, the frame
/// loop, the viewport reactor and the debug surfaces.
pub mod app_setup;

/// Frame loop state machine.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
