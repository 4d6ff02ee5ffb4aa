//! Controller components and player spawning.

use avian3d::prelude::*;
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::{
    constants::{
        CAMERA_HEIGHT_OFFSET, DEFAULT_ACCELERATION, DEFAULT_AIR_CONTROL,
        DEFAULT_GROUND_CHECK_DISTANCE, DEFAULT_GROUND_CHECK_RADIUS, DEFAULT_JUMP_FORCE,
        DEFAULT_SENSITIVITY_X, DEFAULT_SENSITIVITY_Y, DEFAULT_SPEED, PLAYER_MASS, PLAYER_RADIUS,
        PLAYER_SEGMENT_LENGTH,
    },
    error::{self, Result},
    input::{FpsAction, default_input_map},
    physics::GameLayer,
};

/// Controller tuning.
#[derive(Component, Reflect, Clone, Debug, PartialEq)]
#[reflect(Component)]
#[require(FpsControllerInput, FpsControllerState, GroundCheck, FpsCamera)]
pub struct FpsController {
    /// Base planar speed on the ground (m/s).
    pub speed: f32,
    /// Fraction of the target velocity reachable while airborne, in [0, 1].
    pub air_control: f32,
    /// How quickly the body reaches its target velocity (m/s²).
    pub acceleration: f32,
    /// Vertical impulse applied on jump.
    pub jump_force: f32,
    /// Horizontal look sensitivity (degrees per input unit per second).
    pub sensitivity_x: f32,
    /// Vertical look sensitivity (degrees per input unit per second).
    pub sensitivity_y: f32,
}

impl Default for FpsController {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            air_control: DEFAULT_AIR_CONTROL,
            acceleration: DEFAULT_ACCELERATION,
            jump_force: DEFAULT_JUMP_FORCE,
            sensitivity_x: DEFAULT_SENSITIVITY_X,
            sensitivity_y: DEFAULT_SENSITIVITY_Y,
        }
    }
}

impl FpsController {
    /// Check every field is within its valid range.
    pub fn validate(self) -> Result<Self> {
        error::non_negative("speed", self.speed)?;
        error::unit_interval("air_control", self.air_control)?;
        error::non_negative("acceleration", self.acceleration)?;
        error::non_negative("jump_force", self.jump_force)?;
        error::non_negative("sensitivity_x", self.sensitivity_x)?;
        error::non_negative("sensitivity_y", self.sensitivity_y)?;
        Ok(self)
    }
}

/// Ground contact probe: a sphere below the body origin.
#[derive(Component, Clone, Debug)]
pub struct GroundCheck {
    /// Radius of the probe sphere.
    pub radius: f32,
    /// Downward offset of the sphere centre from the body origin.
    pub distance: f32,
    /// Layers that count as ground.
    pub mask: LayerMask,
}

impl Default for GroundCheck {
    fn default() -> Self {
        Self {
            radius: DEFAULT_GROUND_CHECK_RADIUS,
            distance: DEFAULT_GROUND_CHECK_DISTANCE,
            mask: LayerMask::ALL,
        }
    }
}

impl GroundCheck {
    /// Check the probe has a finite, non-negative radius and distance.
    pub fn validate(self) -> Result<Self> {
        error::non_negative("ground_check_radius", self.radius)?;
        error::non_negative("ground_check_distance", self.distance)?;
        Ok(self)
    }
}

/// Input buffered between physics ticks.
#[derive(Component, Default, Debug)]
pub struct FpsControllerInput {
    /// Latest movement input; x = strafe right, y = forward.
    pub movement: Vec2,
    /// Look input accumulated since the last physics tick.
    pub look: Vec2,
    /// Jump was pressed since the last physics tick.
    pub jump: bool,
}

/// Runtime state recomputed by the controller.
#[derive(Component, Default, Debug)]
pub struct FpsControllerState {
    /// Whether the ground probe touched ground on the last tick.
    pub grounded: bool,
    /// Camera pitch in degrees; positive looks up.
    pub pitch: f32,
}

/// Camera driven by the controller's pitch.
///
/// Left as `None` to have one resolved at startup.
#[derive(Component, Default, Debug)]
pub struct FpsCamera(pub Option<Entity>);

/// Marks the scene's main camera, preferred when resolving an unset [`FpsCamera`].
#[derive(Component, Default)]
pub struct MainCamera;

/// Spawn a player body with a child camera at eye height.
///
/// Returns the body entity.
pub fn spawn_fps_player(
    commands: &mut Commands,
    position: Vec3,
    controller: FpsController,
    ground_check: GroundCheck,
) -> Entity {
    let player = commands
        .spawn((
            Name::new("Player"),
            Transform::from_translation(position),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::capsule(PLAYER_RADIUS, PLAYER_SEGMENT_LENGTH),
            Mass(PLAYER_MASS),
            CollisionLayers::new([GameLayer::Player], LayerMask::ALL),
            // Yaw is written directly; the solver must never spin the body.
            LockedAxes::ROTATION_LOCKED,
            Friction::ZERO.with_combine_rule(CoefficientCombine::Min),
            Restitution::ZERO,
            SweptCcd::default(),
            TransformInterpolation,
            (
                controller,
                ground_check,
                default_input_map(),
                ActionState::<FpsAction>::default(),
            ),
        ))
        .id();

    // Left unlinked; the camera is picked up from the player's children at startup.
    commands.spawn((
        Name::new("Player camera"),
        Camera3d::default(),
        Transform::from_xyz(0.0, CAMERA_HEIGHT_OFFSET, 0.0),
        ChildOf(player),
    ));

    player
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(FpsController::default().validate().is_ok());
        assert!(GroundCheck::default().validate().is_ok());
    }

    #[test]
    fn test_air_control_out_of_range_rejected() {
        let controller = FpsController {
            air_control: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            controller.validate(),
            Err(Error::InvalidTuning {
                field: "air_control",
                ..
            })
        ));
    }

    #[test]
    fn test_ground_check_rejects_infinite_radius() {
        let check = GroundCheck {
            radius: f32::INFINITY,
            ..Default::default()
        };
        assert!(check.validate().is_err());
    }
}
