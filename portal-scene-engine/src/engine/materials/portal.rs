use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef, ShaderType},
};

use crate::constants::path::PORTAL_SHADER_PATH;
use crate::constants::scene::{PORTAL_COLOR_END, PORTAL_COLOR_START};

/// Uniform block read by `portal.wgsl`.
#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct PortalUniforms {
    pub color_start: LinearRgba,
    pub color_end: LinearRgba,
    /// Seconds since the frame loop started.
    pub time: f32,
    pub pixel_ratio: f32,
}

impl PortalUniforms {
    pub fn new(pixel_ratio: f32) -> Self {
        Self {
            color_start: PORTAL_COLOR_START.into(),
            color_end: PORTAL_COLOR_END.into(),
            time: 0.0,
            pixel_ratio,
        }
    }
}

/// Animated gradient material bound to the `portalLight` mesh.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PortalMaterial {
    #[uniform(0)]
    pub uniforms: PortalUniforms,
}

impl PortalMaterial {
    pub fn new(pixel_ratio: f32) -> Self {
        Self {
            uniforms: PortalUniforms::new(pixel_ratio),
        }
    }
}

impl Material for PortalMaterial {
    fn fragment_shader() -> ShaderRef {
        PORTAL_SHADER_PATH.into()
    }
}
