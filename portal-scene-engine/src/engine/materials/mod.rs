//! Materials applied to the portal scene.
//!
//! Two custom shader materials carry the animated uniforms; the baked and
//! pole-light materials are plain unlit `StandardMaterial`s built alongside
//! them.

/// Quad-sprite material for the fireflies point cloud.
pub mod fireflies;

/// Animated gradient material for the portal surface.
pub mod portal;

use bevy::prelude::*;

use fireflies::FirefliesMaterial;
use portal::PortalMaterial;

/// Registers the render pipelines of both shader materials.
pub struct PortalMaterialsPlugin;

impl Plugin for PortalMaterialsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<PortalMaterial>::default())
            .add_plugins(MaterialPlugin::<FirefliesMaterial>::default());
    }
}
