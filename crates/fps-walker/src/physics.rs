//! Physics integration using Avian 3D.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::constants::FIXED_TIMESTEP_HZ;

/// Collision layers.
///
/// Ground is the default layer so untagged colliders count as ground.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    /// Terrain, props, and anything else that can be stood on.
    #[default]
    Ground,
    /// Player bodies.
    Player,
}

/// Plugin adding the physics engine at the controller's tick rate.
///
/// Avian steps in the fixed schedules, so the fixed clock is the physics clock.
pub struct PhysicsIntegrationPlugin;

impl Plugin for PhysicsIntegrationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PhysicsPlugins::default())
            .insert_resource(Time::<Fixed>::from_hz(FIXED_TIMESTEP_HZ));
    }
}
