use bevy::prelude::*;

use crate::engine::assets::scene_context::SceneContext;
use crate::engine::core::app_state::{LoopState, transition_to_running};
use crate::engine::materials::fireflies::FirefliesMaterial;
use crate::engine::materials::portal::PortalMaterial;

/// Monotonic seconds since the loop entered `Running`.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameClock {
    origin: f32,
    elapsed: f32,
}

impl FrameClock {
    pub fn start(&mut self, now: f32) {
        self.origin = now;
        self.elapsed = 0.0;
    }

    /// Advance to `now`, never moving backwards.
    pub fn tick(&mut self, now: f32) -> f32 {
        self.elapsed = self.elapsed.max(now - self.origin);
        self.elapsed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
impl FrameClock {
    pub fn origin(&self) -> f32 {
        self.origin
    }
}

/// Clock advance and time uniform push; per-frame consumers run after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameUpdateSet;

/// Drives the per-frame uniform writes.
///
/// Bevy's runner provides the rest of the tick: rendering after `Update` and
/// rescheduling through winit (`requestAnimationFrame` on the web).
pub struct FrameLoopPlugin;

impl Plugin for FrameLoopPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<LoopState>()
            .init_resource::<FrameClock>()
            .add_systems(Startup, transition_to_running)
            .add_systems(OnEnter(LoopState::Running), start_frame_clock)
            .add_systems(
                Update,
                (advance_frame_clock, push_time_uniforms)
                    .chain()
                    .in_set(FrameUpdateSet)
                    .run_if(in_state(LoopState::Running)),
            );
    }
}

pub fn start_frame_clock(time: Res<Time>, mut clock: ResMut<FrameClock>) {
    clock.start(time.elapsed_secs());
}

pub fn advance_frame_clock(time: Res<Time>, mut clock: ResMut<FrameClock>) {
    clock.tick(time.elapsed_secs());
}

pub fn push_time_uniforms(
    clock: Res<FrameClock>,
    context: Res<SceneContext>,
    mut portal_materials: ResMut<Assets<PortalMaterial>>,
    mut fireflies_materials: ResMut<Assets<FirefliesMaterial>>,
) {
    context.apply_time(
        clock.elapsed(),
        &mut portal_materials,
        &mut fireflies_materials,
    );
}
