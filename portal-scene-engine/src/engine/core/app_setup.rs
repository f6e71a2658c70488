use bevy::asset::AssetMetaCheck;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::constants::render_settings::CLEAR_COLOR;
use crate::engine::camera::orbit_camera::{OrbitCameraPlugin, spawn_portal_camera};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::SceneLoadingPlugin;
use crate::engine::loading::asset_loader::{load_scene_assets, spawn_model};
use crate::engine::materials::PortalMaterialsPlugin;
use crate::engine::scene::fireflies::spawn_fireflies;
use crate::engine::systems::frame_loop::FrameLoopPlugin;
use crate::engine::systems::viewport::{ViewportPlugin, init_viewport_state};
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::debug_panel::ui::DebugPanelPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(PortalMaterialsPlugin)
        .add_plugins(ViewportPlugin)
        .add_plugins(SceneLoadingPlugin)
        .add_plugins(FrameLoopPlugin)
        .add_plugins(OrbitCameraPlugin)
        .add_plugins(DebugPanelPlugin)
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(CLEAR_COLOR.into()))
        .add_systems(
            Startup,
            (
                init_viewport_state,
                load_scene_assets,
                spawn_model,
                spawn_fireflies,
                spawn_portal_camera,
            )
                .chain(),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: "wgpu=error,naga=warn,portal_scene_engine=debug".into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
