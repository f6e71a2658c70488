use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::constants::render_settings::CLEAR_COLOR;
use crate::constants::scene::{
    FIREFLIES_DEFAULT_POINT_SIZE, FIREFLIES_MAX_POINT_SIZE, FIREFLIES_MIN_POINT_SIZE,
    PORTAL_COLOR_END, PORTAL_COLOR_START,
};
use crate::engine::assets::scene_context::SceneContext;
use crate::engine::materials::fireflies::FirefliesMaterial;
use crate::engine::materials::portal::PortalMaterial;

/// One edit to a tunable parameter, from the panel or the host page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugParameterChange {
    PortalColorStart(Srgba),
    PortalColorEnd(Srgba),
    FirefliesPointSize(f32),
    ClearColor(Srgba),
}

/// Current value of every tunable parameter.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DebugParameters {
    pub portal_color_start: Srgba,
    pub portal_color_end: Srgba,
    pub fireflies_point_size: f32,
    pub clear_color: Srgba,
}

impl Default for DebugParameters {
    fn default() -> Self {
        Self {
            portal_color_start: PORTAL_COLOR_START,
            portal_color_end: PORTAL_COLOR_END,
            fireflies_point_size: FIREFLIES_DEFAULT_POINT_SIZE,
            clear_color: CLEAR_COLOR,
        }
    }
}

impl DebugParameters {
    /// Store the change and return it with the value actually kept.
    pub fn record(&mut self, change: DebugParameterChange) -> DebugParameterChange {
        match change {
            DebugParameterChange::PortalColorStart(color) => self.portal_color_start = color,
            DebugParameterChange::PortalColorEnd(color) => self.portal_color_end = color,
            DebugParameterChange::FirefliesPointSize(size) => {
                let size = if size.is_finite() {
                    size.clamp(FIREFLIES_MIN_POINT_SIZE, FIREFLIES_MAX_POINT_SIZE)
                } else {
                    self.fireflies_point_size
                };
                self.fireflies_point_size = size;
                return DebugParameterChange::FirefliesPointSize(size);
            }
            DebugParameterChange::ClearColor(color) => self.clear_color = color,
        }
        change
    }
}

/// Anything that can read and write the tunable parameters.
///
/// The egui panel and the JSON-RPC bridge both go through this, so an edit
/// from either side lands on the same uniforms.
pub trait DebugParameterSink {
    fn parameters(&self) -> DebugParameters;
    fn apply(&mut self, change: DebugParameterChange);
}

#[cfg(test)]
impl DebugParameterSink for DebugParameters {
    fn parameters(&self) -> DebugParameters {
        *self
    }

    fn apply(&mut self, change: DebugParameterChange) {
        self.record(change);
    }
}

/// The live render targets behind each parameter.
#[derive(SystemParam)]
pub struct DebugTargets<'w> {
    parameters: ResMut<'w, DebugParameters>,
    context: Res<'w, SceneContext>,
    portal_materials: ResMut<'w, Assets<PortalMaterial>>,
    fireflies_materials: ResMut<'w, Assets<FirefliesMaterial>>,
    clear_color: ResMut<'w, ClearColor>,
}

impl DebugParameterSink for DebugTargets<'_> {
    fn parameters(&self) -> DebugParameters {
        *self.parameters
    }

    fn apply(&mut self, change: DebugParameterChange) {
        match self.parameters.record(change) {
            DebugParameterChange::PortalColorStart(color) => {
                if let Some(portal) = self.portal_materials.get_mut(&self.context.portal_material) {
                    portal.uniforms.color_start = color.into();
                }
            }
            DebugParameterChange::PortalColorEnd(color) => {
                if let Some(portal) = self.portal_materials.get_mut(&self.context.portal_material) {
                    portal.uniforms.color_end = color.into();
                }
            }
            DebugParameterChange::FirefliesPointSize(size) => {
                if let Some(fireflies) = self
                    .fireflies_materials
                    .get_mut(&self.context.fireflies_material)
                {
                    fireflies.uniforms.point_size = size;
                }
            }
            DebugParameterChange::ClearColor(color) => {
                self.clear_color.0 = color.into();
            }
        }
        debug!("Debug parameter applied: {change:?}");
    }
}
