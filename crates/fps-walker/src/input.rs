//! Input action definitions and focus management.
//!
//! Gameplay actions are declared with `leafwing-input-manager` so bindings
//! stay rebindable. Movement and look are muted while the cursor is free,
//! and keyboard movement while the debug overlay has keyboard focus.

use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};
use bevy_egui::EguiContexts;
use leafwing_input_manager::{plugin::InputManagerSystem, prelude::*};

// ============================================================================
// Action enum
// ============================================================================

/// Actions driving the first-person controller.
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum FpsAction {
    /// Planar movement (x = strafe, y = forward).
    #[actionlike(DualAxis)]
    Move,
    /// Look delta (x = yaw, y = pitch).
    #[actionlike(DualAxis)]
    Look,
    /// Jump (Space / gamepad South).
    Jump,
    /// Toggle the debug overlay (Q).
    ToggleUi,
    /// Grab cursor (left click when ungrabbed).
    GrabCursor,
    /// Release cursor (ESC).
    ReleaseCursor,
}

/// Create the default input map for the controller.
pub fn default_input_map() -> InputMap<FpsAction> {
    InputMap::default()
        .with_dual_axis(FpsAction::Move, VirtualDPad::wasd())
        .with_dual_axis(FpsAction::Move, VirtualDPad::arrow_keys())
        .with_dual_axis(FpsAction::Move, GamepadStick::LEFT)
        .with_dual_axis(FpsAction::Look, MouseMove::default())
        .with(FpsAction::Jump, KeyCode::Space)
        .with(FpsAction::Jump, GamepadButton::South)
        .with(FpsAction::ToggleUi, KeyCode::KeyQ)
        .with(FpsAction::GrabCursor, MouseButton::Left)
        .with(FpsAction::ReleaseCursor, KeyCode::Escape)
}

// ============================================================================
// Plugin
// ============================================================================

/// Plugin that registers the action type, cursor handling, and focus management.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<FpsAction>::default())
            .add_systems(Startup, grab_cursor_on_startup)
            .add_systems(
                PreUpdate,
                manage_input_focus.after(InputManagerSystem::Update),
            )
            .add_systems(Update, cursor_grab_system);
    }
}

// ============================================================================
// Cursor grab
// ============================================================================

/// Returns true if the cursor is locked or confined to the window.
pub fn is_cursor_grabbed(cursor: &CursorOptions) -> bool {
    matches!(
        cursor.grab_mode,
        CursorGrabMode::Locked | CursorGrabMode::Confined
    )
}

/// Set cursor grab state, centering the cursor when grabbing.
pub fn set_cursor_grab(cursor: &mut CursorOptions, window: &mut Window, grabbed: bool) {
    if grabbed {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
        let center = Vec2::new(window.width() / 2.0, window.height() / 2.0);
        window.set_cursor_position(Some(center));
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

/// Lock the cursor as soon as the window exists.
fn grab_cursor_on_startup(
    mut cursor: Single<&mut CursorOptions>,
    mut window: Single<&mut Window, With<PrimaryWindow>>,
) {
    set_cursor_grab(&mut cursor, &mut window, true);
    tracing::debug!("Cursor locked");
}

/// Handle cursor grab/ungrab with ESC and left-click.
fn cursor_grab_system(
    action_query: Query<&ActionState<FpsAction>>,
    mut cursor: Single<&mut CursorOptions>,
    mut window: Single<&mut Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };

    if action_state.just_pressed(&FpsAction::ReleaseCursor) {
        set_cursor_grab(&mut cursor, &mut window, false);
        return;
    }

    if action_state.just_pressed(&FpsAction::GrabCursor) {
        // Clicks on the overlay should not steal the cursor.
        let egui_wants_pointer = contexts
            .ctx_mut()
            .ok()
            .is_some_and(|ctx| ctx.is_pointer_over_area());

        if !egui_wants_pointer {
            set_cursor_grab(&mut cursor, &mut window, true);
        }
    }
}

// ============================================================================
// Input focus management
// ============================================================================

/// Actions that move or turn the player. Live only while the cursor is grabbed.
const GAMEPLAY_ACTIONS: &[FpsAction] = &[FpsAction::Move, FpsAction::Jump, FpsAction::Look];

/// Gameplay actions muted while egui has keyboard focus. Look stays live.
const KEYBOARD_ACTIONS: &[FpsAction] = &[FpsAction::Move, FpsAction::Jump];

/// Whether a gameplay action should respond to input.
fn gameplay_action_enabled(action: FpsAction, cursor_grabbed: bool, egui_wants_kb: bool) -> bool {
    cursor_grabbed && !(egui_wants_kb && KEYBOARD_ACTIONS.contains(&action))
}

/// Enable or disable gameplay actions from cursor grab and egui focus.
///
/// Cursor and overlay actions are never touched.
fn manage_input_focus(
    mut action_query: Query<&mut ActionState<FpsAction>>,
    mut contexts: EguiContexts,
    cursor: Single<&CursorOptions>,
) {
    let egui_wants_kb = contexts
        .ctx_mut()
        .ok()
        .is_some_and(|ctx| ctx.wants_keyboard_input());
    let grabbed = is_cursor_grabbed(&cursor);

    for mut action_state in &mut action_query {
        for &action in GAMEPLAY_ACTIONS {
            if gameplay_action_enabled(action, grabbed, egui_wants_kb) {
                action_state.enable_action(&action);
            } else {
                action_state.disable_action(&action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_cursor_disables_gameplay() {
        for &action in GAMEPLAY_ACTIONS {
            assert!(!gameplay_action_enabled(action, false, false));
            assert!(gameplay_action_enabled(action, true, false));
        }
        assert!(!GAMEPLAY_ACTIONS.contains(&FpsAction::ToggleUi));
        assert!(!GAMEPLAY_ACTIONS.contains(&FpsAction::ReleaseCursor));
    }

    #[test]
    fn test_egui_focus_keeps_look_only() {
        assert!(gameplay_action_enabled(FpsAction::Look, true, true));
        assert!(!gameplay_action_enabled(FpsAction::Move, true, true));
        assert!(!gameplay_action_enabled(FpsAction::Jump, true, true));
    }

    #[test]
    fn test_cursor_grab_modes() {
        let mut cursor = CursorOptions::default();
        assert!(!is_cursor_grabbed(&cursor));
        cursor.grab_mode = CursorGrabMode::Confined;
        assert!(is_cursor_grabbed(&cursor));
    }
}
