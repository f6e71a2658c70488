//! Asset loading and material binding for the portal model.
//!
//! Loads are started once at startup and observed by polling their load
//! state; the model's materials are swapped when its scene instance is ready.

/// Startup loads, model spawning and load-state polling.
pub mod asset_loader;

/// Loading progress and failure bookkeeping.
pub mod progress;

/// Named-node material binding for the spawned model.
pub mod scene_binding;

use bevy::prelude::*;

use asset_loader::check_asset_loading;
use progress::{LoadingProgress, SceneNotification};
use scene_binding::apply_material_bindings;

/// Load tracking and model binding. Startup loads are chained in app setup.
pub struct SceneLoadingPlugin;

impl Plugin for SceneLoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingProgress>()
            .add_event::<SceneNotification>()
            .add_systems(Update, (check_asset_loading, apply_material_bindings));
    }
}
