use bevy::prelude::*;

/// Lifecycle of the frame loop.
///
/// `Idle` only exists until the first frame; the move to `Running` happens
/// once and unconditionally, after which the loop runs for the lifetime of
/// the app.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
}

pub fn transition_to_running(mut next_state: ResMut<NextState<LoopState>>) {
    info!("→ Frame loop running");
    next_state.set(LoopState::Running);
}
