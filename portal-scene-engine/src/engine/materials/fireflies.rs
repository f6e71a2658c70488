use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypePath,
    render::{
        mesh::{MeshVertexAttribute, MeshVertexBufferLayoutRef},
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType,
            SpecializedMeshPipelineError, VertexFormat,
        },
    },
};

use crate::constants::path::FIREFLIES_SHADER_PATH;
use crate::constants::scene::FIREFLIES_DEFAULT_POINT_SIZE;

/// Per-vertex firefly scale, repeated on each of the quad's six vertices.
pub const ATTRIBUTE_FIREFLY_SCALE: MeshVertexAttribute =
    MeshVertexAttribute::new("Firefly_Scale", 902_417_336, VertexFormat::Float32);

/// Uniform block read by `fireflies.wgsl`.
#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct FirefliesUniforms {
    pub time: f32,
    pub pixel_ratio: f32,
    /// Sprite size in device pixels at unit view depth.
    pub point_size: f32,
}

/// Additive, non depth-writing sprite material for the firefly quads.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct FirefliesMaterial {
    #[uniform(0)]
    pub uniforms: FirefliesUniforms,
}

impl FirefliesMaterial {
    pub fn new(pixel_ratio: f32) -> Self {
        Self {
            uniforms: FirefliesUniforms {
                time: 0.0,
                pixel_ratio,
                point_size: FIREFLIES_DEFAULT_POINT_SIZE,
            },
        }
    }
}

impl Material for FirefliesMaterial {
    fn vertex_shader() -> ShaderRef {
        FIREFLIES_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        FIREFLIES_SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
            ATTRIBUTE_FIREFLY_SCALE.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];

        // Sprites never occlude each other or the translucent portal.
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
