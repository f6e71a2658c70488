use std::f32::consts::PI;

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_POSITION, ORBIT_DAMPING,
    ORBIT_MAX_RADIUS, ORBIT_MIN_RADIUS, ORBIT_PAN_SPEED, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};
use crate::engine::core::app_state::LoopState;
use crate::engine::systems::frame_loop::FrameUpdateSet;
use crate::engine::systems::viewport::ViewportState;
use crate::tools::debug_panel::ui::DebugPanelFocus;

/// Keeps the polar angle off the poles so `looking_at` stays well defined.
const POLAR_EPSILON: f32 = 1e-3;

#[derive(Component)]
pub struct PortalCamera;

/// Damped orbit around a target point.
///
/// Input accumulates into pending deltas; each frame applies `damping` of
/// what is pending and keeps the rest, so motion eases out after the
/// pointer stops.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,
    pub damping: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vec3,
    pending_zoom: f32,
}

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(ORBIT_MIN_RADIUS);
        Self {
            target,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            damping: ORBIT_DAMPING,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vec3::ZERO,
            pending_zoom: 1.0,
        }
    }

    pub fn rotate(&mut self, pointer_delta: Vec2) {
        self.pending_theta -= pointer_delta.x * ORBIT_ROTATE_SPEED;
        self.pending_phi -= pointer_delta.y * ORBIT_ROTATE_SPEED;
    }

    /// Pan in the camera plane, scaled by distance so the target tracks the pointer.
    pub fn pan(&mut self, pointer_delta: Vec2, camera_rotation: Quat) {
        let right = camera_rotation * Vec3::X;
        let up = camera_rotation * Vec3::Y;
        let scale = self.radius * ORBIT_PAN_SPEED;
        self.pending_pan += (-right * pointer_delta.x + up * pointer_delta.y) * scale;
    }

    /// Positive scroll moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.pending_zoom *= (1.0 - ORBIT_ZOOM_SPEED).powf(scroll);
    }

    pub fn is_settled(&self) -> bool {
        self.pending_theta.abs() < 1e-6
            && self.pending_phi.abs() < 1e-6
            && self.pending_pan.length_squared() < 1e-12
            && (self.pending_zoom - 1.0).abs() < 1e-6
    }

    /// Apply one frame of damped motion and return the resulting transform.
    pub fn step(&mut self) -> Transform {
        self.theta += self.pending_theta * self.damping;
        self.phi = (self.phi + self.pending_phi * self.damping)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.target += self.pending_pan * self.damping;
        self.radius = (self.radius * self.pending_zoom).clamp(ORBIT_MIN_RADIUS, ORBIT_MAX_RADIUS);

        let decay = 1.0 - self.damping;
        self.pending_theta *= decay;
        self.pending_phi *= decay;
        self.pending_pan *= decay;
        self.pending_zoom = 1.0;

        self.transform()
    }

    pub fn transform(&self) -> Transform {
        let offset = Vec3::new(
            self.radius * self.phi.sin() * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * self.phi.sin() * self.theta.cos(),
        );
        Transform::from_translation(self.target + offset).looking_at(self.target, Vec3::Y)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(CAMERA_START_POSITION, Vec3::ZERO)
    }
}

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitCamera>()
            .init_resource::<DebugPanelFocus>()
            .add_systems(
                Update,
                orbit_camera_controller
                    .after(FrameUpdateSet)
                    .run_if(in_state(LoopState::Running)),
            );
    }
}

pub fn spawn_portal_camera(
    mut commands: Commands,
    orbit: Res<OrbitCamera>,
    viewport: Res<ViewportState>,
) {
    commands.spawn((
        Name::new("PortalCamera"),
        PortalCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            aspect_ratio: viewport.aspect_ratio(),
        }),
        // Colours come straight from the baked texture.
        Tonemapping::None,
        orbit.transform(),
    ));
}

pub fn orbit_camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<PortalCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    focus: Res<DebugPanelFocus>,
) {
    let Ok(mut camera_transform) = cameras.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    let scroll: f32 = scroll_events
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.05,
        })
        .sum();

    if !focus.wants_pointer {
        if mouse_delta != Vec2::ZERO {
            if mouse_button.pressed(MouseButton::Left) {
                orbit.rotate(mouse_delta);
            } else if mouse_button.pressed(MouseButton::Right) {
                orbit.pan(mouse_delta, camera_transform.rotation);
            }
        }
        if scroll.abs() > f32::EPSILON {
            orbit.zoom(scroll);
        }
    }

    // Damping needs a step every frame, input or not.
    *camera_transform = orbit.step();
}
