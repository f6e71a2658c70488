use bevy::asset::{LoadState, UntypedAssetId};
use bevy::gltf::GltfAssetLabel;
use bevy::image::ImageLoaderSettings;
use bevy::prelude::*;

use crate::constants::path::{
    BAKED_TEXTURE_PATH, FIREFLIES_SHADER_PATH, MODEL_PATH, PORTAL_SHADER_PATH,
};
use crate::constants::scene::POLE_LIGHT_COLOR;
use crate::engine::assets::scene_context::SceneContext;
use crate::engine::error::PortalError;
use crate::engine::loading::progress::{LoadingProgress, SceneNotification, TrackedAsset};
use crate::engine::loading::scene_binding::{PortalModel, mark_model_ready};
use crate::engine::materials::fireflies::FirefliesMaterial;
use crate::engine::materials::portal::PortalMaterial;
use crate::engine::systems::viewport::ViewportState;

/// Start every asset load and build the materials that reference them.
///
/// Materials are created eagerly; the portal material exists (and receives
/// time updates) well before the model it is bound to has arrived.
pub fn load_scene_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    viewport: Res<ViewportState>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    mut portal_materials: ResMut<Assets<PortalMaterial>>,
    mut fireflies_materials: ResMut<Assets<FirefliesMaterial>>,
) {
    // glTF UVs already match the image orientation, so no flip is applied.
    let baked_texture: Handle<Image> =
        asset_server.load_with_settings(BAKED_TEXTURE_PATH, |settings: &mut ImageLoaderSettings| {
            settings.is_srgb = true;
        });

    let baked_material = standard_materials.add(StandardMaterial {
        base_color_texture: Some(baked_texture.clone()),
        unlit: true,
        ..default()
    });
    let pole_light_material = standard_materials.add(StandardMaterial {
        base_color: POLE_LIGHT_COLOR.into(),
        unlit: true,
        ..default()
    });

    info!("Loading {MODEL_PATH}, {BAKED_TEXTURE_PATH} and shader sources");

    commands.insert_resource(SceneContext {
        model: asset_server.load(MODEL_PATH),
        model_scene: asset_server.load(GltfAssetLabel::Scene(0).from_asset(MODEL_PATH)),
        baked_texture,
        portal_shader: asset_server.load(PORTAL_SHADER_PATH),
        fireflies_shader: asset_server.load(FIREFLIES_SHADER_PATH),
        baked_material,
        pole_light_material,
        portal_material: portal_materials.add(PortalMaterial::new(viewport.pixel_ratio)),
        fireflies_material: fireflies_materials.add(FirefliesMaterial::new(viewport.pixel_ratio)),
    });
}

/// Spawn the model root hidden; it becomes visible once its materials bind.
pub fn spawn_model(mut commands: Commands, context: Res<SceneContext>) {
    commands
        .spawn((
            Name::new("PortalModel"),
            PortalModel,
            SceneRoot(context.model_scene.clone()),
            Visibility::Hidden,
        ))
        .observe(mark_model_ready);
}

/// Poll the load state of every tracked asset and report failures once.
pub fn check_asset_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    context: Res<SceneContext>,
    asset_server: Res<AssetServer>,
    mut notifications: EventWriter<SceneNotification>,
) {
    for asset in TrackedAsset::ALL {
        if !loading_progress.is_pending(asset) {
            continue;
        }

        let state = asset_server.get_load_state(tracked_id(&context, asset));
        if let Some(failure) = record_load_state(&mut loading_progress, asset, state) {
            error!("{failure}");
            notifications.write(SceneNotification::Failed(failure));
        }
    }
}

fn tracked_id(context: &SceneContext, asset: TrackedAsset) -> UntypedAssetId {
    match asset {
        TrackedAsset::Model => context.model.id().untyped(),
        TrackedAsset::BakedTexture => context.baked_texture.id().untyped(),
        TrackedAsset::PortalShader => context.portal_shader.id().untyped(),
        TrackedAsset::FirefliesShader => context.fireflies_shader.id().untyped(),
    }
}

/// Fold one observed load state into the progress, returning a new failure.
pub fn record_load_state(
    loading_progress: &mut LoadingProgress,
    asset: TrackedAsset,
    state: Option<LoadState>,
) -> Option<PortalError> {
    match state {
        Some(LoadState::Loaded) => {
            info!("✓ {} loaded", asset.path());
            loading_progress.mark_loaded(asset);
            None
        }
        Some(LoadState::Failed(reason)) => {
            let failure = PortalError::load_failure(asset.path(), reason);
            loading_progress.record_failure(failure.clone());
            Some(failure)
        }
        _ => None,
    }
}
