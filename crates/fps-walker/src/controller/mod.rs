//! First-person character controller.
//!
//! A dynamic rigid body steered by velocity changes. Each physics tick the
//! controller probes for ground, applies any pending jump, pulls the planar
//! velocity toward the input direction, then yaws the body and pitches the
//! camera from buffered look input.

mod components;
pub mod movement;
mod systems;

use bevy::prelude::*;

pub use components::{
    FpsCamera, FpsController, FpsControllerInput, FpsControllerState, GroundCheck, MainCamera,
    spawn_fps_player,
};

/// Ordering of the controller's per-tick work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FpsControllerSystems {
    /// Buffer this frame's input, before the fixed loop.
    Input,
    /// Ground check, jump, movement, and look, before the physics step.
    Tick,
}

/// Plugin for the first-person controller.
pub struct FpsControllerPlugin;

impl Plugin for FpsControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, systems::resolve_fps_camera)
            .add_systems(
                RunFixedMainLoop,
                systems::fps_controller_input
                    .in_set(FpsControllerSystems::Input)
                    .in_set(RunFixedMainLoopSystems::BeforeFixedMainLoop),
            )
            .add_systems(
                FixedPreUpdate,
                (
                    systems::fps_controller_ground_check,
                    systems::fps_controller_jump,
                    systems::fps_controller_move,
                    systems::fps_controller_look,
                )
                    .chain()
                    .in_set(FpsControllerSystems::Tick),
            );
    }
}
