//! Launch parameter parsing for the demo.
//!
//! Tuning values come from command-line flags and are validated before the
//! player is spawned.

use bevy::prelude::*;
use clap::Parser;

use crate::{
    constants::{
        DEFAULT_ACCELERATION, DEFAULT_AIR_CONTROL, DEFAULT_GROUND_CHECK_DISTANCE,
        DEFAULT_GROUND_CHECK_RADIUS, DEFAULT_JUMP_FORCE, DEFAULT_SENSITIVITY_X,
        DEFAULT_SENSITIVITY_Y, DEFAULT_SPEED,
    },
    controller::{FpsController, GroundCheck},
    error::{self, Result},
};

/// Default spawn height above the ground plane in meters.
const DEFAULT_SPAWN_HEIGHT: f32 = 2.0;

/// Validated launch parameters.
#[derive(Resource, Debug, Clone)]
pub struct LaunchParams {
    /// Controller tuning for the spawned player.
    pub controller: FpsController,
    /// Ground probe for the spawned player.
    pub ground_check: GroundCheck,
    /// Height the player is dropped from.
    pub spawn_height: f32,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            controller: FpsController::default(),
            ground_check: GroundCheck::default(),
            spawn_height: DEFAULT_SPAWN_HEIGHT,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Rigid-body first-person controller demo")]
struct CliArgs {
    /// Base planar speed on the ground (m/s).
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    speed: f32,

    /// Fraction of the target velocity available in the air (0-1).
    #[arg(long, default_value_t = DEFAULT_AIR_CONTROL)]
    air_control: f32,

    /// Planar acceleration (m/s²).
    #[arg(long, default_value_t = DEFAULT_ACCELERATION)]
    acceleration: f32,

    /// Vertical jump impulse.
    #[arg(long, default_value_t = DEFAULT_JUMP_FORCE)]
    jump_force: f32,

    /// Horizontal look sensitivity.
    #[arg(long, default_value_t = DEFAULT_SENSITIVITY_X)]
    sensitivity_x: f32,

    /// Vertical look sensitivity.
    #[arg(long, default_value_t = DEFAULT_SENSITIVITY_Y)]
    sensitivity_y: f32,

    /// Radius of the ground probe sphere (m).
    #[arg(long, default_value_t = DEFAULT_GROUND_CHECK_RADIUS)]
    ground_check_radius: f32,

    /// Downward offset of the ground probe (m).
    #[arg(long, default_value_t = DEFAULT_GROUND_CHECK_DISTANCE)]
    ground_check_distance: f32,

    /// Height the player is dropped from (m).
    #[arg(long, default_value_t = DEFAULT_SPAWN_HEIGHT)]
    spawn_height: f32,
}

impl CliArgs {
    fn validate(self) -> Result<LaunchParams> {
        let controller = FpsController {
            speed: self.speed,
            air_control: self.air_control,
            acceleration: self.acceleration,
            jump_force: self.jump_force,
            sensitivity_x: self.sensitivity_x,
            sensitivity_y: self.sensitivity_y,
        }
        .validate()?;

        let ground_check = GroundCheck {
            radius: self.ground_check_radius,
            distance: self.ground_check_distance,
            ..Default::default()
        }
        .validate()?;

        Ok(LaunchParams {
            controller,
            ground_check,
            spawn_height: error::non_negative("spawn_height", self.spawn_height)?,
        })
    }
}

/// Parse and validate launch parameters from the command line.
///
/// Exits the process with usage information if the flags are malformed.
pub fn parse() -> Result<LaunchParams> {
    CliArgs::parse().validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn parse_from(args: &[&str]) -> Result<LaunchParams> {
        let args = std::iter::once("fps-walker").chain(args.iter().copied());
        CliArgs::try_parse_from(args)
            .expect("flags should parse")
            .validate()
    }

    #[test]
    fn test_defaults_match_controller_defaults() {
        let params = parse_from(&[]).unwrap();
        assert_eq!(params.controller, FpsController::default());
        assert_eq!(params.ground_check.radius, DEFAULT_GROUND_CHECK_RADIUS);
        assert_eq!(params.spawn_height, DEFAULT_SPAWN_HEIGHT);
    }

    #[test]
    fn test_overrides_apply() {
        let params = parse_from(&["--speed", "6.5", "--air-control", "1", "--spawn-height", "5"])
            .unwrap();
        assert_eq!(params.controller.speed, 6.5);
        assert_eq!(params.controller.air_control, 1.0);
        assert_eq!(params.spawn_height, 5.0);
    }

    #[test]
    fn test_invalid_air_control_rejected() {
        let err = parse_from(&["--air-control", "2"]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTuning {
                field: "air_control",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_ground_probe_rejected() {
        let err = parse_from(&["--ground-check-distance=-1"]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTuning {
                field: "ground_check_distance",
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_flag_fails_to_parse() {
        let args = ["fps-walker", "--speed", "fast"];
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
