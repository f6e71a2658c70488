use bevy::color::ColorToPacked;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

use crate::constants::scene::{FIREFLIES_MAX_POINT_SIZE, FIREFLIES_MIN_POINT_SIZE};
use crate::tools::debug_panel::parameters::{
    DebugParameterChange, DebugParameterSink, DebugParameters, DebugTargets,
};

/// Whether egui claimed the pointer this frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DebugPanelFocus {
    pub wants_pointer: bool,
}

pub struct DebugPanelPlugin;

impl Plugin for DebugPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .init_resource::<DebugParameters>()
            .init_resource::<DebugPanelFocus>()
            .add_systems(EguiPrimaryContextPass, debug_panel_ui);
    }
}

pub fn debug_panel_ui(
    mut contexts: EguiContexts,
    mut targets: DebugTargets,
    mut focus: ResMut<DebugPanelFocus>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let current = targets.parameters();
    let mut changes = Vec::new();

    egui::Window::new("Debug")
        .default_width(400.0)
        .resizable(false)
        .show(ctx, |ui| {
            if let Some(color) = color_row(ui, "portal color start", current.portal_color_start) {
                changes.push(DebugParameterChange::PortalColorStart(color));
            }
            if let Some(color) = color_row(ui, "portal color end", current.portal_color_end) {
                changes.push(DebugParameterChange::PortalColorEnd(color));
            }

            let mut size = current.fireflies_point_size;
            let slider = egui::Slider::new(
                &mut size,
                FIREFLIES_MIN_POINT_SIZE..=FIREFLIES_MAX_POINT_SIZE,
            )
            .step_by(1.0)
            .text("fireflies size");
            if ui.add(slider).changed() {
                changes.push(DebugParameterChange::FirefliesPointSize(size));
            }

            if let Some(color) = color_row(ui, "background color", current.clear_color) {
                changes.push(DebugParameterChange::ClearColor(color));
            }
        });

    focus.wants_pointer = ctx.wants_pointer_input() || ctx.is_pointer_over_area();

    for change in changes {
        targets.apply(change);
    }
}

fn color_row(ui: &mut egui::Ui, label: &str, color: Srgba) -> Option<Srgba> {
    let mut rgb = color.to_u8_array_no_alpha();
    ui.horizontal(|ui| {
        let changed = ui.color_edit_button_srgb(&mut rgb).changed();
        ui.label(label);
        changed
    })
    .inner
    .then(|| Srgba::rgb_u8(rgb[0], rgb[1], rgb[2]))
}
