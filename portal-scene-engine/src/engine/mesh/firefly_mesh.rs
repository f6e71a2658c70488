use bevy::prelude::*;
use bevy::{render::mesh::PrimitiveTopology, render::render_asset::RenderAssetUsages};

use crate::engine::materials::fireflies::ATTRIBUTE_FIREFLY_SCALE;
use crate::engine::scene::fireflies::FireflyCloud;

/// Corner UVs of the two triangles forming one sprite quad.
const QUAD_CORNERS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
];

/// Build the sprite mesh for a firefly cloud.
///
/// Every point becomes six vertices sharing its centre and scale; the vertex
/// shader uses the corner UV to push each vertex out to a screen-aligned quad.
pub fn create_firefly_mesh(cloud: &FireflyCloud) -> Mesh {
    let vertex_count = cloud.len() * QUAD_CORNERS.len();
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
    let mut corners: Vec<[f32; 2]> = Vec::with_capacity(vertex_count);
    let mut scales: Vec<f32> = Vec::with_capacity(vertex_count);

    for (centre, scale) in cloud.positions.iter().zip(&cloud.scales) {
        for corner in QUAD_CORNERS {
            positions.push(centre.to_array());
            corners.push(corner);
            scales.push(*scale);
        }
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
    .with_inserted_attribute(ATTRIBUTE_FIREFLY_SCALE, scales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    #[test]
    fn each_point_expands_to_six_vertices_sharing_centre_and_scale() {
        let cloud = FireflyCloud {
            positions: vec![Vec3::new(1.0, 0.5, -1.0), Vec3::new(-0.25, 1.5, 0.75)],
            scales: vec![0.2, 0.9],
        };
        let mesh = create_firefly_mesh(&cloud);

        assert_eq!(mesh.count_vertices(), 12);

        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("missing positions");
        };
        let Some(VertexAttributeValues::Float32(scales)) = mesh.attribute(ATTRIBUTE_FIREFLY_SCALE)
        else {
            panic!("missing scales");
        };

        assert!(positions[..6].iter().all(|p| *p == [1.0, 0.5, -1.0]));
        assert!(positions[6..].iter().all(|p| *p == [-0.25, 1.5, 0.75]));
        assert!(scales[..6].iter().all(|s| *s == 0.2));
        assert!(scales[6..].iter().all(|s| *s == 0.9));
    }
}
