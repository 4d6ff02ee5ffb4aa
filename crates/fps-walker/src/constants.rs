/// Base planar speed on the ground (m/s).
pub const DEFAULT_SPEED: f32 = 4.0;

/// Fraction of the planar target velocity available while airborne.
pub const DEFAULT_AIR_CONTROL: f32 = 0.3;

/// Maximum planar velocity change per second (m/s²).
pub const DEFAULT_ACCELERATION: f32 = 12.0;

/// Upward impulse applied on jump (N·s).
pub const DEFAULT_JUMP_FORCE: f32 = 5.0;

/// Horizontal look sensitivity (degrees per unit of look input per second).
pub const DEFAULT_SENSITIVITY_X: f32 = 80.0;

/// Vertical look sensitivity (degrees per unit of look input per second).
pub const DEFAULT_SENSITIVITY_Y: f32 = 55.0;

/// Radius of the ground probe sphere (m).
pub const DEFAULT_GROUND_CHECK_RADIUS: f32 = 0.25;

/// Downward offset of the ground probe from the body origin (m).
pub const DEFAULT_GROUND_CHECK_DISTANCE: f32 = 0.4;

/// Camera pitch limit in either direction (degrees).
pub const MAX_PITCH_DEGREES: f32 = 90.0;

/// Player capsule radius (m).
pub const PLAYER_RADIUS: f32 = 0.4;

/// Length of the player capsule's inner segment (m).
pub const PLAYER_SEGMENT_LENGTH: f32 = 0.2;

/// Player body mass (kg), so a jump impulse maps one-to-one to take-off speed.
pub const PLAYER_MASS: f32 = 1.0;

/// Camera height above the body origin (m).
pub const CAMERA_HEIGHT_OFFSET: f32 = 0.6;

/// Physics tick rate (Hz).
pub const FIXED_TIMESTEP_HZ: f64 = 50.0;
