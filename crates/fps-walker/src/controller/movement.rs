//! Per-tick movement and look arithmetic.
//!
//! Everything here is a pure function of its inputs so the rules can be tested
//! without a physics world. Up is +Y and forward is -Z.

use bevy::prelude::*;

use crate::constants::MAX_PITCH_DEGREES;

/// World-space direction the player wants to move in.
///
/// `movement` is x = strafe right, y = forward. The result is only normalized
/// when it is longer than one, so partial stick deflection keeps its magnitude.
pub fn wish_direction(movement: Vec2, body_rotation: Quat) -> Vec3 {
    let local = Vec3::new(movement.x, 0.0, -movement.y);
    let direction = body_rotation * local;
    if direction.length_squared() > 1.0 {
        direction.normalize()
    } else {
        direction
    }
}

/// Scale applied to the target velocity: full on the ground, `air_control` in the air.
pub fn control_factor(grounded: bool, air_control: f32) -> f32 {
    if grounded { 1.0 } else { air_control }
}

/// Velocity change pulling the planar velocity toward `desired`.
///
/// The vertical component is always zero and the length never exceeds `max_change`.
pub fn planar_velocity_change(current: Vec3, desired: Vec3, max_change: f32) -> Vec3 {
    let change = Vec3::new(desired.x - current.x, 0.0, desired.z - current.z);
    change.clamp_length_max(max_change.max(0.0))
}

/// Velocity after a jump impulse: prior vertical motion is discarded first.
pub fn jump_velocity(current: Vec3, impulse: f32, inverse_mass: f32) -> Vec3 {
    Vec3::new(current.x, impulse * inverse_mass, current.z)
}

/// Yaw rotation for this tick, or `None` when there is no horizontal look input.
///
/// Positive look x turns right.
pub fn yaw_rotation(look_x: f32, sensitivity: f32, dt: f32) -> Option<Quat> {
    let degrees = look_x * sensitivity * dt;
    if degrees.abs() > 0.0 {
        Some(Quat::from_rotation_y(-degrees.to_radians()))
    } else {
        None
    }
}

/// Next pitch in degrees, clamped to straight up / straight down.
pub fn next_pitch(pitch: f32, look_y: f32, sensitivity: f32, dt: f32) -> f32 {
    (pitch - look_y * sensitivity * dt).clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES)
}

/// Local camera rotation for a pitch in degrees.
pub fn pitch_rotation(pitch: f32) -> Quat {
    Quat::from_rotation_x(pitch.to_radians())
}

/// Centre of the ground probe sphere.
pub fn ground_probe_origin(position: Vec3, distance: f32) -> Vec3 {
    position + Vec3::NEG_Y * distance
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    const DT: f32 = 0.02;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_forward_input_moves_along_negative_z() {
        let dir = wish_direction(Vec2::Y, Quat::IDENTITY);
        assert!(approx_eq(dir, Vec3::NEG_Z));
    }

    #[test]
    fn test_wish_direction_follows_body_yaw() {
        // Turned 90 degrees right, forward becomes +X.
        let rotation = Quat::from_rotation_y(-FRAC_PI_2);
        let dir = wish_direction(Vec2::Y, rotation);
        assert!(approx_eq(dir, Vec3::X), "{dir}");
    }

    #[test]
    fn test_diagonal_input_is_normalized() {
        let dir = wish_direction(Vec2::new(1.0, 1.0), Quat::IDENTITY);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_partial_input_keeps_magnitude() {
        let dir = wish_direction(Vec2::new(0.0, 0.5), Quat::IDENTITY);
        assert!((dir.length() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_control_factor() {
        assert_eq!(control_factor(true, 0.3), 1.0);
        assert_eq!(control_factor(false, 0.3), 0.3);
    }

    #[test]
    fn test_velocity_change_clamped_to_max() {
        let change = planar_velocity_change(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0), 12.0 * DT);
        assert!((change.length() - 0.24).abs() < 1e-5);
        assert!(change.z < 0.0);
    }

    #[test]
    fn test_velocity_change_ignores_vertical() {
        let change = planar_velocity_change(
            Vec3::new(1.0, -7.0, 0.0),
            Vec3::new(1.0, 3.0, 0.0),
            10.0,
        );
        assert_eq!(change, Vec3::ZERO);
    }

    #[test]
    fn test_small_velocity_change_reaches_target() {
        let current = Vec3::new(3.9, 0.0, 0.0);
        let desired = Vec3::new(4.0, 0.0, 0.0);
        let change = planar_velocity_change(current, desired, 0.24);
        assert!(approx_eq(current + change, desired));
    }

    #[test]
    fn test_jump_discards_falling_speed() {
        let v = jump_velocity(Vec3::new(2.0, -3.0, 1.0), 5.0, 1.0 / 2.0);
        assert_eq!(v, Vec3::new(2.0, 2.5, 1.0));
    }

    #[test]
    fn test_no_yaw_without_input() {
        assert!(yaw_rotation(0.0, 80.0, DT).is_none());
    }

    #[test]
    fn test_positive_look_turns_right() {
        let rotation = yaw_rotation(10.0, 80.0, DT).unwrap();
        let forward = rotation * Vec3::NEG_Z;
        assert!(forward.x > 0.0, "{forward}");
        assert!(forward.y.abs() < 1e-6);
    }

    #[test]
    fn test_pitch_clamps_both_ways() {
        assert_eq!(next_pitch(0.0, -1.0e6, 55.0, DT), MAX_PITCH_DEGREES);
        assert_eq!(next_pitch(0.0, 1.0e6, 55.0, DT), -MAX_PITCH_DEGREES);
    }

    #[test]
    fn test_pitch_accumulates() {
        let pitch = next_pitch(0.0, -10.0, 55.0, DT);
        assert!((pitch - 11.0).abs() < 1e-4);
        let pitch = next_pitch(pitch, 10.0, 55.0, DT);
        assert!(pitch.abs() < 1e-4);
    }

    #[test]
    fn test_positive_pitch_looks_up() {
        let forward = pitch_rotation(45.0) * Vec3::NEG_Z;
        assert!(forward.y > 0.0);
    }

    #[test]
    fn test_ground_probe_below_body() {
        let origin = ground_probe_origin(Vec3::new(1.0, 2.0, 3.0), 0.4);
        assert!(approx_eq(origin, Vec3::new(1.0, 1.6, 3.0)));
    }
}
