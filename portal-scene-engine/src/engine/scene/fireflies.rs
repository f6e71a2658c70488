use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use rand::Rng;

use crate::constants::scene::{FIREFLIES_COUNT, FIREFLIES_HALF_EXTENT, FIREFLIES_MAX_HEIGHT};
use crate::engine::assets::scene_context::SceneContext;
use crate::engine::mesh::firefly_mesh::create_firefly_mesh;

#[derive(Component)]
pub struct Fireflies;

/// Randomly placed firefly centres with a parallel per-point scale.
///
/// Generated once at startup; only the shader animates them afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FireflyCloud {
    pub positions: Vec<Vec3>,
    pub scales: Vec<f32>,
}

impl FireflyCloud {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Sample `count` fireflies: x and z in [-2, 2), y in [0, 2), scale in [0, 1).
pub fn generate_fireflies<R: Rng>(rng: &mut R, count: usize) -> FireflyCloud {
    let mut positions = Vec::with_capacity(count);
    let mut scales = Vec::with_capacity(count);

    for _ in 0..count {
        positions.push(Vec3::new(
            rng.gen_range(-FIREFLIES_HALF_EXTENT..FIREFLIES_HALF_EXTENT),
            rng.gen_range(0.0..FIREFLIES_MAX_HEIGHT),
            rng.gen_range(-FIREFLIES_HALF_EXTENT..FIREFLIES_HALF_EXTENT),
        ));
        scales.push(rng.gen_range(0.0..1.0));
    }

    FireflyCloud { positions, scales }
}

/// Generate the cloud once and spawn it with the shared fireflies material.
pub fn spawn_fireflies(
    mut commands: Commands,
    context: Res<SceneContext>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let cloud = generate_fireflies(&mut rand::thread_rng(), FIREFLIES_COUNT);
    debug!("Spawning {} fireflies", cloud.len());

    commands.spawn((
        Name::new("Fireflies"),
        Fireflies,
        Mesh3d(meshes.add(create_firefly_mesh(&cloud))),
        MeshMaterial3d(context.fireflies_material.clone()),
        Transform::default(),
        // Quads are expanded in the vertex shader, past the CPU-side bounds.
        NoFrustumCulling,
        NotShadowCaster,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::scene::FIREFLIES_COUNT;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_in_range(cloud: &FireflyCloud) {
        assert_eq!(cloud.positions.len(), FIREFLIES_COUNT);
        assert_eq!(cloud.scales.len(), FIREFLIES_COUNT);

        for position in &cloud.positions {
            assert!((-2.0..2.0).contains(&position.x), "x out of range: {position}");
            assert!((0.0..2.0).contains(&position.y), "y out of range: {position}");
            assert!((-2.0..2.0).contains(&position.z), "z out of range: {position}");
        }
        for scale in &cloud.scales {
            assert!((0.0..1.0).contains(scale), "scale out of range: {scale}");
        }
    }

    #[test]
    fn thread_rng_clouds_stay_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            assert_in_range(&generate_fireflies(&mut rng, FIREFLIES_COUNT));
        }
    }

    #[test]
    fn seeded_clouds_stay_in_range() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_in_range(&generate_fireflies(&mut rng, FIREFLIES_COUNT));
        }
    }

    #[test]
    fn consecutive_clouds_differ() {
        let mut rng = rand::thread_rng();
        let first = generate_fireflies(&mut rng, FIREFLIES_COUNT);
        let second = generate_fireflies(&mut rng, FIREFLIES_COUNT);
        assert_ne!(first, second);
    }

    #[test]
    fn zero_count_yields_empty_cloud() {
        let cloud = generate_fireflies(&mut rand::thread_rng(), 0);
        assert!(cloud.is_empty());
        assert_eq!(cloud.len(), 0);
    }

    #[test]
    fn spawned_cloud_uses_the_shared_material() {
        use crate::engine::assets::scene_context::test_support::insert_scene_context;
        use bevy::ecs::system::RunSystemOnce;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins).init_resource::<Assets<Mesh>>();
        let context = insert_scene_context(&mut app);

        app.world_mut().run_system_once(spawn_fireflies).unwrap();

        let world = app.world_mut();
        let mut query = world.query_filtered::<(
            &Mesh3d,
            &MeshMaterial3d<crate::engine::materials::fireflies::FirefliesMaterial>,
        ), With<Fireflies>>();
        let (mesh, material) = query.single(world).unwrap();
        assert_eq!(material.0, context.fireflies_material);

        let mesh = world.resource::<Assets<Mesh>>().get(&mesh.0).unwrap();
        assert_eq!(mesh.count_vertices(), FIREFLIES_COUNT * 6);
    }
}
