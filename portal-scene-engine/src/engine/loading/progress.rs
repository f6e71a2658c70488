use bevy::prelude::*;

use crate::engine::error::PortalError;

/// Assets whose load state is polled after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedAsset {
    Model,
    BakedTexture,
    PortalShader,
    FirefliesShader,
}

impl TrackedAsset {
    pub const ALL: [TrackedAsset; 4] = [
        TrackedAsset::Model,
        TrackedAsset::BakedTexture,
        TrackedAsset::PortalShader,
        TrackedAsset::FirefliesShader,
    ];

    pub fn path(self) -> &'static str {
        use crate::constants::path::*;
        match self {
            TrackedAsset::Model => MODEL_PATH,
            TrackedAsset::BakedTexture => BAKED_TEXTURE_PATH,
            TrackedAsset::PortalShader => PORTAL_SHADER_PATH,
            TrackedAsset::FirefliesShader => FIREFLIES_SHADER_PATH,
        }
    }
}

/// Scene bring-up events forwarded to the host page.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SceneNotification {
    ModelReady,
    Failed(PortalError),
}

#[derive(Resource, Debug, Default)]
pub struct LoadingProgress {
    pub model_loaded: bool,
    pub texture_loaded: bool,
    pub portal_shader_loaded: bool,
    pub fireflies_shader_loaded: bool,
    pub materials_bound: bool,
    pub failures: Vec<PortalError>,
}

impl LoadingProgress {
    pub fn is_loaded(&self, asset: TrackedAsset) -> bool {
        match asset {
            TrackedAsset::Model => self.model_loaded,
            TrackedAsset::BakedTexture => self.texture_loaded,
            TrackedAsset::PortalShader => self.portal_shader_loaded,
            TrackedAsset::FirefliesShader => self.fireflies_shader_loaded,
        }
    }

    pub fn mark_loaded(&mut self, asset: TrackedAsset) {
        match asset {
            TrackedAsset::Model => self.model_loaded = true,
            TrackedAsset::BakedTexture => self.texture_loaded = true,
            TrackedAsset::PortalShader => self.portal_shader_loaded = true,
            TrackedAsset::FirefliesShader => self.fireflies_shader_loaded = true,
        }
    }

    pub fn has_failed(&self, asset: TrackedAsset) -> bool {
        self.failures.iter().any(|failure| {
            matches!(failure, PortalError::LoadFailure { asset: path, .. } if path == asset.path())
        })
    }

    /// Neither loaded nor failed yet.
    pub fn is_pending(&self, asset: TrackedAsset) -> bool {
        !self.is_loaded(asset) && !self.has_failed(asset)
    }

    pub fn record_failure(&mut self, failure: PortalError) {
        if !self.failures.contains(&failure) {
            self.failures.push(failure);
        }
    }
}
