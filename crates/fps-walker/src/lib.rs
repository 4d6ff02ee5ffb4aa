//! Rigid-body first-person character controller for Bevy.
//!
//! Mouse-look camera rotation, planar movement, a jump impulse, and a
//! ground-contact check, driven by Avian physics and `leafwing-input-manager`
//! actions. The demo binary in `main.rs` wires everything into a small scene.

use bevy::prelude::*;

/// Default tuning and shared physical constants.
pub mod constants;
pub mod controller;
pub mod error;
pub mod input;
pub mod launch_params;
pub mod physics;
pub mod ui;

pub use controller::{
    FpsCamera, FpsController, FpsControllerInput, FpsControllerState, GroundCheck, MainCamera,
    spawn_fps_player,
};
pub use error::{Error, Result};

/// Plugin bundling the controller, its input handling, physics, and the debug overlay.
pub struct FpsWalkerPlugin;

impl Plugin for FpsWalkerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            physics::PhysicsIntegrationPlugin,
            input::InputPlugin,
            controller::FpsControllerPlugin,
            ui::DebugUiPlugin,
        ));
    }
}
