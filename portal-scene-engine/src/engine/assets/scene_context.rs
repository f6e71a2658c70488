use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::render::render_resource::Shader;

use crate::engine::materials::fireflies::FirefliesMaterial;
use crate::engine::materials::portal::PortalMaterial;

/// Every handle the scene wiring needs, built once by the loader.
///
/// The frame loop, viewport reactor, debug panel and host bridge all reach
/// the materials through this resource instead of holding handles of their
/// own.
#[derive(Resource, Debug, Clone)]
pub struct SceneContext {
    /// Root glTF asset, tracked for load failures.
    pub model: Handle<Gltf>,
    /// First scene of the model, spawned under the model root.
    pub model_scene: Handle<Scene>,
    pub baked_texture: Handle<Image>,
    pub portal_shader: Handle<Shader>,
    pub fireflies_shader: Handle<Shader>,
    pub baked_material: Handle<StandardMaterial>,
    pub pole_light_material: Handle<StandardMaterial>,
    pub portal_material: Handle<PortalMaterial>,
    pub fireflies_material: Handle<FirefliesMaterial>,
}

impl SceneContext {
    /// Write the capped pixel ratio into both shader materials.
    pub fn apply_pixel_ratio(
        &self,
        pixel_ratio: f32,
        portal_materials: &mut Assets<PortalMaterial>,
        fireflies_materials: &mut Assets<FirefliesMaterial>,
    ) {
        if let Some(portal) = portal_materials.get_mut(&self.portal_material) {
            portal.uniforms.pixel_ratio = pixel_ratio;
        }
        if let Some(fireflies) = fireflies_materials.get_mut(&self.fireflies_material) {
            fireflies.uniforms.pixel_ratio = pixel_ratio;
        }
    }

    /// Write the frame time into both shader materials.
    pub fn apply_time(
        &self,
        elapsed: f32,
        portal_materials: &mut Assets<PortalMaterial>,
        fireflies_materials: &mut Assets<FirefliesMaterial>,
    ) {
        if let Some(portal) = portal_materials.get_mut(&self.portal_material) {
            portal.uniforms.time = elapsed;
        }
        if let Some(fireflies) = fireflies_materials.get_mut(&self.fireflies_material) {
            fireflies.uniforms.time = elapsed;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::context_with_materials;
    use super::*;

    #[test]
    fn pixel_ratio_reaches_both_uniform_values() {
        let mut portal_materials = Assets::<PortalMaterial>::default();
        let mut fireflies_materials = Assets::<FirefliesMaterial>::default();
        let mut standard_materials = Assets::<StandardMaterial>::default();
        let context = context_with_materials(
            &mut portal_materials,
            &mut fireflies_materials,
            &mut standard_materials,
        );

        context.apply_pixel_ratio(2.0, &mut portal_materials, &mut fireflies_materials);

        let portal = portal_materials.get(&context.portal_material).unwrap();
        let fireflies = fireflies_materials.get(&context.fireflies_material).unwrap();
        assert_eq!(portal.uniforms.pixel_ratio, 2.0);
        assert_eq!(fireflies.uniforms.pixel_ratio, 2.0);
    }

    #[test]
    fn time_reaches_both_materials_without_touching_colours() {
        let mut portal_materials = Assets::<PortalMaterial>::default();
        let mut fireflies_materials = Assets::<FirefliesMaterial>::default();
        let mut standard_materials = Assets::<StandardMaterial>::default();
        let context = context_with_materials(
            &mut portal_materials,
            &mut fireflies_materials,
            &mut standard_materials,
        );
        let before = portal_materials.get(&context.portal_material).unwrap().uniforms;

        context.apply_time(3.5, &mut portal_materials, &mut fireflies_materials);

        let portal = portal_materials.get(&context.portal_material).unwrap().uniforms;
        assert_eq!(portal.time, 3.5);
        assert_eq!(portal.color_start, before.color_start);
        assert_eq!(portal.color_end, before.color_end);
        let fireflies = fireflies_materials.get(&context.fireflies_material).unwrap();
        assert_eq!(fireflies.uniforms.time, 3.5);
    }
}
