use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::constants::render_settings::PIXEL_RATIO_CAP;
use crate::engine::assets::scene_context::SceneContext;
use crate::engine::camera::orbit_camera::PortalCamera;
use crate::engine::materials::fireflies::FirefliesMaterial;
use crate::engine::materials::portal::PortalMaterial;

/// Device pixel ratio as consumed by the renderer and the shaders.
pub fn cap_pixel_ratio(device_pixel_ratio: f32) -> f32 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(PIXEL_RATIO_CAP)
    } else {
        1.0
    }
}

/// Logical output size and capped pixel ratio of the primary window.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

impl ViewportState {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: cap_pixel_ratio(device_pixel_ratio),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        *self = Self::new(width, height, device_pixel_ratio);
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportState>()
            .add_systems(Update, react_to_window_resize);
    }
}

/// Seed the viewport from the primary window before materials are built.
///
/// The renderer gets the capped ratio here too, so the first frame already
/// matches the `pixel_ratio` uniforms.
pub fn init_viewport_state(
    mut viewport: ResMut<ViewportState>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if let Ok(mut window) = windows.single_mut() {
        viewport.resize(
            window.width(),
            window.height(),
            window.resolution.base_scale_factor(),
        );
        apply_renderer_pixel_ratio(&mut window, viewport.pixel_ratio);
    }
    let (width, height) = viewport.size();
    info!(
        "Viewport {}x{} @ pixel ratio {}",
        width, height, viewport.pixel_ratio
    );
}

pub fn react_to_window_resize(
    mut resize_events: EventReader<WindowResized>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportState>,
    mut projections: Query<&mut Projection, With<PortalCamera>>,
    context: Res<SceneContext>,
    mut portal_materials: ResMut<Assets<PortalMaterial>>,
    mut fireflies_materials: ResMut<Assets<FirefliesMaterial>>,
) {
    for event in resize_events.read() {
        let Ok(mut window) = windows.get_mut(event.window) else {
            continue;
        };

        viewport.resize(
            event.width,
            event.height,
            window.resolution.base_scale_factor(),
        );

        for mut projection in &mut projections {
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.aspect_ratio = viewport.aspect_ratio();
            }
        }

        // Both uniform values, not the uniform containers.
        context.apply_pixel_ratio(
            viewport.pixel_ratio,
            &mut portal_materials,
            &mut fireflies_materials,
        );

        apply_renderer_pixel_ratio(&mut window, viewport.pixel_ratio);
    }
}

/// The canvas backbuffer follows the capped ratio on the web; native windows
/// keep their physical size.
#[cfg(target_arch = "wasm32")]
fn apply_renderer_pixel_ratio(window: &mut Window, pixel_ratio: f32) {
    if window.resolution.scale_factor_override() != Some(pixel_ratio) {
        window.resolution.set_scale_factor_override(Some(pixel_ratio));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_renderer_pixel_ratio(_window: &mut Window, _pixel_ratio: f32) {}
