//! Controller systems.
//!
//! Input is buffered every frame; ground check, jump, movement, and look run
//! once per physics tick in that order.

use avian3d::prelude::*;
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::input::FpsAction;

use super::{
    components::{
        FpsCamera, FpsController, FpsControllerInput, FpsControllerState, GroundCheck, MainCamera,
    },
    movement::{
        control_factor, ground_probe_origin, jump_velocity, next_pitch, pitch_rotation,
        planar_velocity_change, wish_direction, yaw_rotation,
    },
};

// ============================================================================
// Frame systems
// ============================================================================

/// Copy this frame's actions into the controller's input buffer.
///
/// Movement is overwritten, look accumulates until a tick consumes it, and a
/// jump press latches until a tick consumes it.
pub(super) fn fps_controller_input(
    mut query: Query<(&ActionState<FpsAction>, &mut FpsControllerInput)>,
) {
    for (action_state, mut input) in &mut query {
        input.movement = action_state.clamped_axis_pair(&FpsAction::Move);
        input.look += action_state.axis_pair(&FpsAction::Look);
        input.jump |= action_state.just_pressed(&FpsAction::Jump);
    }
}

/// Link controllers without a camera to the main camera, or else a camera on
/// the player or anywhere below it in the hierarchy.
pub(super) fn resolve_fps_camera(
    mut players: Query<(Entity, &mut FpsCamera), Added<FpsCamera>>,
    main_camera: Query<Entity, (With<MainCamera>, With<Camera>)>,
    cameras: Query<(), With<Camera>>,
    children: Query<&Children>,
) {
    for (entity, mut fps_camera) in &mut players {
        if fps_camera.0.is_some() {
            continue;
        }

        let rig_camera = || {
            std::iter::once(entity)
                .chain(children.iter_descendants(entity))
                .find(|&candidate| cameras.contains(candidate))
        };

        if let Some(camera) = main_camera.iter().next().or_else(rig_camera) {
            tracing::info!("Controller {entity} using camera {camera}");
            fps_camera.0 = Some(camera);
        } else {
            tracing::warn!("Controller {entity} has no camera; pitch will not be applied");
        }
    }
}

// ============================================================================
// Physics tick systems
// ============================================================================

/// Probe for ground below each controller. Sensors never count as ground.
pub(super) fn fps_controller_ground_check(
    spatial_query: SpatialQuery,
    sensors: Query<(), With<Sensor>>,
    mut query: Query<(Entity, &GroundCheck, &Position, &mut FpsControllerState)>,
) {
    for (entity, ground_check, position, mut state) in &mut query {
        let probe = Collider::sphere(ground_check.radius);
        let origin = ground_probe_origin(position.0, ground_check.distance);
        let filter = SpatialQueryFilter::from_mask(ground_check.mask)
            .with_excluded_entities([entity]);

        let grounded = spatial_query
            .shape_intersections(&probe, origin, Quat::IDENTITY, &filter)
            .into_iter()
            .any(|hit| !sensors.contains(hit));

        if grounded != state.grounded {
            tracing::debug!("Controller {entity} grounded: {grounded}");
            state.grounded = grounded;
        }
    }
}

/// Apply a jump impulse when one was requested and the body is grounded.
///
/// A request made while airborne is dropped.
pub(super) fn fps_controller_jump(
    mut query: Query<(
        &FpsController,
        &FpsControllerState,
        &ComputedMass,
        &mut FpsControllerInput,
        &mut LinearVelocity,
    )>,
) {
    for (controller, state, mass, mut input, mut velocity) in &mut query {
        if !std::mem::take(&mut input.jump) || !state.grounded {
            continue;
        }
        velocity.0 = jump_velocity(velocity.0, controller.jump_force, mass.inverse());
    }
}

/// Steer planar velocity toward the input direction, limited by acceleration.
pub(super) fn fps_controller_move(
    time: Res<Time>,
    mut query: Query<(
        &FpsController,
        &FpsControllerInput,
        &FpsControllerState,
        &Rotation,
        &mut LinearVelocity,
    )>,
) {
    let dt = time.delta_secs();

    for (controller, input, state, rotation, mut velocity) in &mut query {
        let direction = wish_direction(input.movement, rotation.0);
        let control = control_factor(state.grounded, controller.air_control);
        let desired = direction * (controller.speed * control);

        let current = velocity.0;
        velocity.0 += planar_velocity_change(current, desired, controller.acceleration * dt);
    }
}

/// Yaw the body and pitch the camera from the look buffer, then clear it.
pub(super) fn fps_controller_look(
    time: Res<Time>,
    mut query: Query<(
        &FpsController,
        &FpsCamera,
        &mut FpsControllerInput,
        &mut FpsControllerState,
        &mut Rotation,
    )>,
    mut cameras: Query<&mut Transform, Without<FpsController>>,
) {
    let dt = time.delta_secs();

    for (controller, fps_camera, mut input, mut state, mut rotation) in &mut query {
        let look = std::mem::take(&mut input.look);

        if let Some(yaw) = yaw_rotation(look.x, controller.sensitivity_x, dt) {
            rotation.0 = (rotation.0 * yaw).normalize();
        }

        // Pitch only moves the camera, never the body.
        let Some(mut camera_transform) = fps_camera
            .0
            .and_then(|camera| cameras.get_mut(camera).ok())
        else {
            continue;
        };
        state.pitch = next_pitch(state.pitch, look.y, controller.sensitivity_y, dt);
        camera_transform.rotation = pitch_rotation(state.pitch);
    }
}
