use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::constants::scene::{BAKED_NODE, POLE_LIGHT_A_NODE, POLE_LIGHT_B_NODE, PORTAL_LIGHT_NODE};
use crate::engine::assets::scene_context::SceneContext;
use crate::engine::error::PortalError;
use crate::engine::loading::progress::{LoadingProgress, SceneNotification};

/// Root entity of the spawned portal model.
#[derive(Component)]
pub struct PortalModel;

/// Set on the model root once its scene instance has spawned.
#[derive(Component)]
pub struct PendingMaterialBinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSlot {
    Baked,
    PoleLight,
    Portal,
}

/// Named nodes of the portal model and the material each one receives.
pub const BOUND_NODES: [(&str, MaterialSlot); 4] = [
    (BAKED_NODE, MaterialSlot::Baked),
    (POLE_LIGHT_A_NODE, MaterialSlot::PoleLight),
    (POLE_LIGHT_B_NODE, MaterialSlot::PoleLight),
    (PORTAL_LIGHT_NODE, MaterialSlot::Portal),
];

#[derive(Debug, Default, PartialEq)]
pub struct BindingPlan {
    pub bindings: Vec<(Entity, MaterialSlot)>,
    pub missing: Vec<&'static str>,
}

/// Match the first node carrying each expected name; other nodes are ignored.
pub fn resolve_bindings<'a>(nodes: impl IntoIterator<Item = (Entity, &'a str)>) -> BindingPlan {
    let nodes: Vec<(Entity, &str)> = nodes.into_iter().collect();
    let mut plan = BindingPlan::default();

    for (name, slot) in BOUND_NODES {
        match nodes.iter().find(|(_, node_name)| *node_name == name) {
            Some((entity, _)) => plan.bindings.push((*entity, slot)),
            None => plan.missing.push(name),
        }
    }

    plan
}

pub fn mark_model_ready(trigger: Trigger<SceneInstanceReady>, mut commands: Commands) {
    commands
        .entity(trigger.target())
        .insert(PendingMaterialBinding);
}

/// Swap the glTF materials of the named nodes and reveal the model.
///
/// Only top-level nodes of the glTF scene are matched, i.e. direct children
/// of the scene root spawned under the model root. A missing node is logged
/// and skipped; the remaining bindings still apply.
pub fn apply_material_bindings(
    mut commands: Commands,
    pending: Query<Entity, With<PendingMaterialBinding>>,
    children: Query<&Children>,
    names: Query<&Name>,
    meshes: Query<(), With<Mesh3d>>,
    context: Res<SceneContext>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut notifications: EventWriter<SceneNotification>,
) {
    for root in &pending {
        let plan = resolve_bindings(
            direct_children(&children, root)
                .into_iter()
                .flat_map(|scene_root| direct_children(&children, scene_root))
                .filter_map(|entity| names.get(entity).ok().map(|name| (entity, name.as_str()))),
        );

        for (node, slot) in &plan.bindings {
            let targets = std::iter::once(*node)
                .chain(children.iter_descendants(*node))
                .filter(|entity| meshes.contains(*entity));

            for target in targets {
                let mut entity = commands.entity(target);
                entity.remove::<MeshMaterial3d<StandardMaterial>>();
                match slot {
                    MaterialSlot::Baked => {
                        entity.insert(MeshMaterial3d(context.baked_material.clone()));
                    }
                    MaterialSlot::PoleLight => {
                        entity.insert(MeshMaterial3d(context.pole_light_material.clone()));
                    }
                    MaterialSlot::Portal => {
                        entity.insert(MeshMaterial3d(context.portal_material.clone()));
                    }
                }
            }
        }

        for name in &plan.missing {
            let failure = PortalError::binding_failure(name);
            warn!("{failure}");
            loading_progress.record_failure(failure.clone());
            notifications.write(SceneNotification::Failed(failure));
        }

        commands
            .entity(root)
            .remove::<PendingMaterialBinding>()
            .insert(Visibility::Inherited);
        loading_progress.materials_bound = true;
        notifications.write(SceneNotification::ModelReady);
        info!(
            "✓ Portal model attached ({} of {} nodes bound)",
            plan.bindings.len(),
            BOUND_NODES.len()
        );
    }
}

fn direct_children(children: &Query<&Children>, entity: Entity) -> Vec<Entity> {
    children
        .get(entity)
        .map(|children| children.to_vec())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::scene_context::test_support::insert_scene_context;
    use crate::engine::materials::portal::PortalMaterial;

    fn entity(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    #[test]
    fn resolves_all_four_nodes_and_ignores_the_rest() {
        let plan = resolve_bindings([
            (entity(1), "baked"),
            (entity(2), "poleLightA"),
            (entity(3), "ground"),
            (entity(4), "poleLightB"),
            (entity(5), "portalLight"),
        ]);

        assert_eq!(
            plan.bindings,
            vec![
                (entity(1), MaterialSlot::Baked),
                (entity(2), MaterialSlot::PoleLight),
                (entity(4), MaterialSlot::PoleLight),
                (entity(5), MaterialSlot::Portal),
            ]
        );
        assert!(plan.missing.is_empty());
    }

    #[test]
    fn first_match_wins_for_duplicate_names() {
        let plan = resolve_bindings([(entity(7), "baked"), (entity(8), "baked")]);
        assert_eq!(plan.bindings, vec![(entity(7), MaterialSlot::Baked)]);
    }

    #[test]
    fn missing_portal_light_is_reported_not_fatal() {
        let plan = resolve_bindings([
            (entity(1), "baked"),
            (entity(2), "poleLightA"),
            (entity(3), "poleLightB"),
        ]);

        assert_eq!(plan.bindings.len(), 3);
        assert_eq!(plan.missing, vec!["portalLight"]);
    }

    fn binding_app() -> (App, SceneContext) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<LoadingProgress>()
            .add_event::<SceneNotification>()
            .add_systems(Update, apply_material_bindings);
        let context = insert_scene_context(&mut app);
        (app, context)
    }

    fn spawn_node(world: &mut World, parent: Entity, name: &str) -> Entity {
        let node = world
            .spawn((
                Name::new(name.to_string()),
                Mesh3d(Handle::default()),
                MeshMaterial3d::<StandardMaterial>(Handle::default()),
            ))
            .id();
        world.entity_mut(parent).add_child(node);
        node
    }

    fn spawn_model(world: &mut World, names: &[&str]) -> (Entity, Vec<Entity>) {
        let root = world
            .spawn((PortalModel, Visibility::Hidden, PendingMaterialBinding))
            .id();
        let scene_root = world.spawn(Name::new("Scene")).id();
        world.entity_mut(root).add_child(scene_root);
        let nodes = names
            .iter()
            .map(|name| spawn_node(world, scene_root, name))
            .collect();
        (root, nodes)
    }

    fn standard_material(world: &World, entity: Entity) -> Option<Handle<StandardMaterial>> {
        world
            .get::<MeshMaterial3d<StandardMaterial>>(entity)
            .map(|material| material.0.clone())
    }

    #[test]
    fn binds_each_named_node_and_reveals_the_model() {
        let (mut app, context) = binding_app();
        let (root, nodes) = spawn_model(
            app.world_mut(),
            &["baked", "poleLightA", "poleLightB", "portalLight", "ground"],
        );

        app.update();

        let world = app.world();
        assert_eq!(standard_material(world, nodes[0]), Some(context.baked_material.clone()));
        assert_eq!(
            standard_material(world, nodes[1]),
            Some(context.pole_light_material.clone())
        );
        assert_eq!(
            standard_material(world, nodes[2]),
            Some(context.pole_light_material.clone())
        );
        assert!(standard_material(world, nodes[3]).is_none());
        assert_eq!(
            world
                .get::<MeshMaterial3d<PortalMaterial>>(nodes[3])
                .map(|material| material.0.clone()),
            Some(context.portal_material.clone())
        );
        // Unnamed in the binding table: left with its glTF material.
        assert_eq!(standard_material(world, nodes[4]), Some(Handle::default()));

        assert_eq!(world.get::<Visibility>(root), Some(&Visibility::Inherited));
        assert!(world.get::<PendingMaterialBinding>(root).is_none());

        let progress = world.resource::<LoadingProgress>();
        assert!(progress.materials_bound);
        assert!(progress.failures.is_empty());
    }

    #[test]
    fn binds_mesh_primitives_below_a_named_node() {
        let (mut app, context) = binding_app();
        let (_, nodes) = spawn_model(app.world_mut(), &["baked"]);
        let world = app.world_mut();
        let primitive = world
            .spawn((
                Mesh3d(Handle::default()),
                MeshMaterial3d::<StandardMaterial>(Handle::default()),
            ))
            .id();
        world.entity_mut(nodes[0]).add_child(primitive);

        app.update();

        assert_eq!(
            standard_material(app.world(), primitive),
            Some(context.baked_material.clone())
        );
    }

    #[test]
    fn missing_node_is_skipped_and_recorded() {
        let (mut app, context) = binding_app();
        let (root, nodes) = spawn_model(app.world_mut(), &["baked", "poleLightA", "poleLightB"]);

        app.update();

        let world = app.world();
        assert_eq!(standard_material(world, nodes[0]), Some(context.baked_material.clone()));
        assert_eq!(
            standard_material(world, nodes[2]),
            Some(context.pole_light_material.clone())
        );
        assert_eq!(world.get::<Visibility>(root), Some(&Visibility::Inherited));

        let progress = world.resource::<LoadingProgress>();
        assert_eq!(
            progress.failures,
            vec![PortalError::binding_failure("portalLight")]
        );
    }

    #[test]
    fn nested_nodes_do_not_satisfy_a_binding() {
        let (mut app, context) = binding_app();
        let (_, nodes) = spawn_model(app.world_mut(), &["baked", "poleLightA", "poleLightB"]);
        let nested = spawn_node(app.world_mut(), nodes[0], "portalLight");

        app.update();

        let world = app.world();
        assert!(world.get::<MeshMaterial3d<PortalMaterial>>(nested).is_none());
        // Still a mesh below "baked", so it gets the baked material.
        assert_eq!(standard_material(world, nested), Some(context.baked_material.clone()));
        assert_eq!(
            world.resource::<LoadingProgress>().failures,
            vec![PortalError::binding_failure("portalLight")]
        );
    }
}
