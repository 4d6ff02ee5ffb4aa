//! Debug overlay for inspecting and tuning the controller.
//!
//! Shows FPS, ground contact, speeds, look angles, and a speed history plot,
//! with sliders for live tuning.

use std::collections::VecDeque;

use avian3d::prelude::*;
use bevy::{
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    ecs::system::SystemParam,
    prelude::*,
};
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Line, Plot, PlotPoints};
use leafwing_input_manager::prelude::*;

use crate::{
    controller::{FpsController, FpsControllerState, GroundCheck},
    input::FpsAction,
};

/// Number of samples to keep in the speed history.
const SPEED_HISTORY_SIZE: usize = 120;

/// Resource controlling whether the debug UI is visible.
#[derive(Resource)]
pub struct UiVisible(pub bool);

impl Default for UiVisible {
    fn default() -> Self {
        Self(true)
    }
}

/// Recent planar speed samples (m/s).
#[derive(Resource, Default)]
pub struct SpeedHistory {
    samples: VecDeque<f32>,
}

impl SpeedHistory {
    /// Push a new sample, maintaining the history size limit.
    pub fn push_sample(&mut self, speed: f32) {
        self.samples
            .push_back(if speed.is_finite() { speed } else { 0.0 });
        if self.samples.len() > SPEED_HISTORY_SIZE {
            self.samples.pop_front();
        }
    }

    fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Plugin for the debug overlay.
pub struct DebugUiPlugin;

impl Plugin for DebugUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .init_resource::<UiVisible>()
            .init_resource::<SpeedHistory>()
            .add_systems(Update, toggle_ui_visible)
            .add_systems(
                EguiPrimaryContextPass,
                debug_ui_system.run_if(|visible: Res<UiVisible>| visible.0),
            );
    }
}

/// Toggle UI visibility with Q.
fn toggle_ui_visible(
    action_query: Query<&ActionState<FpsAction>>,
    mut visible: ResMut<UiVisible>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };

    if action_state.just_pressed(&FpsAction::ToggleUi) {
        visible.0 = !visible.0;
    }
}

/// Resources for the controller window.
#[derive(SystemParam)]
struct ControllerParams<'w, 's> {
    diagnostics: Res<'w, DiagnosticsStore>,
    history: ResMut<'w, SpeedHistory>,
    player_query: Query<
        'w,
        's,
        (
            &'static mut FpsController,
            &'static mut GroundCheck,
            &'static FpsControllerState,
            &'static LinearVelocity,
            &'static Rotation,
            &'static ComputedMass,
        ),
    >,
}

/// Render the debug UI overlay.
fn debug_ui_system(mut contexts: EguiContexts, mut params: ControllerParams) -> Result {
    let ctx = contexts.ctx_mut()?;

    let fps = params
        .diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(bevy::diagnostic::Diagnostic::smoothed)
        .unwrap_or(0.0);

    egui::Window::new("Controller")
        .default_pos([10.0, 10.0])
        .show(ctx, |ui| {
            ui.label(format!("FPS: {fps:.0}"));
            ui.separator();

            let Some((mut controller, mut ground_check, state, velocity, rotation, mass)) =
                params.player_query.iter_mut().next()
            else {
                params.history.clear();
                ui.label("No player");
                return;
            };

            let planar_speed = Vec2::new(velocity.x, velocity.z).length();
            params.history.push_sample(planar_speed);
            let (yaw, _, _) = rotation.0.to_euler(EulerRot::YXZ);

            TableBuilder::new(ui)
                .column(Column::exact(80.0))
                .column(Column::exact(120.0))
                .body(|mut body| {
                    for (label, value) in [
                        (
                            "Grounded:",
                            if state.grounded { "Yes" } else { "No" }.to_string(),
                        ),
                        ("Speed:", format!("{planar_speed:.2} m/s")),
                        ("Vertical:", format!("{:+.2} m/s", velocity.y)),
                        ("Yaw:", format!("{:.1}°", yaw.to_degrees())),
                        ("Pitch:", format!("{:.1}°", state.pitch)),
                        ("Mass:", format!("{:.1} kg", mass.value())),
                    ] {
                        body.row(18.0, |mut row| {
                            row.col(|ui| {
                                ui.label(label);
                            });
                            row.col(|ui| {
                                ui.label(value);
                            });
                        });
                    }
                });

            ui.separator();

            ui.label("Speed history:");
            let speed_points: PlotPoints = params
                .history
                .samples
                .iter()
                .enumerate()
                .map(|(i, &v)| [i as f64, f64::from(v)])
                .collect();
            Plot::new("speed_plot")
                .height(60.0)
                .show_axes(false)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("speed", speed_points).color(egui::Color32::LIGHT_BLUE));
                });

            ui.separator();

            ui.collapsing("Movement tuning", |ui| {
                ui.add(egui::Slider::new(&mut controller.speed, 0.0..=20.0).text("Speed"));
                ui.add(
                    egui::Slider::new(&mut controller.air_control, 0.0..=1.0).text("Air control"),
                );
                ui.add(
                    egui::Slider::new(&mut controller.acceleration, 0.0..=100.0)
                        .text("Acceleration"),
                );
                ui.add(
                    egui::Slider::new(&mut controller.jump_force, 0.0..=50.0).text("Jump force"),
                );
            });

            ui.collapsing("Look tuning", |ui| {
                ui.add(
                    egui::Slider::new(&mut controller.sensitivity_x, 0.0..=400.0)
                        .text("Sensitivity X"),
                );
                ui.add(
                    egui::Slider::new(&mut controller.sensitivity_y, 0.0..=400.0)
                        .text("Sensitivity Y"),
                );
            });

            ui.collapsing("Ground check", |ui| {
                ui.add(egui::Slider::new(&mut ground_check.radius, 0.05..=1.0).text("Radius"));
                ui.add(
                    egui::Slider::new(&mut ground_check.distance, 0.0..=2.0).text("Distance"),
                );
            });
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_history_is_bounded() {
        let mut history = SpeedHistory::default();
        for i in 0..(SPEED_HISTORY_SIZE + 10) {
            history.push_sample(i as f32);
        }
        assert_eq!(history.samples.len(), SPEED_HISTORY_SIZE);
        assert_eq!(history.samples.front().copied(), Some(10.0));
    }

    #[test]
    fn test_speed_history_replaces_non_finite() {
        let mut history = SpeedHistory::default();
        history.push_sample(f32::NAN);
        assert_eq!(history.samples.back().copied(), Some(0.0));
    }
}
