//! Debug panel component
//!
//! Displays internal panel state for debugging.

use crate::state::PanelState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Debug panel component
pub struct DebugPanel<'a> {
    state: &'a PanelState,
    theme: &'a Theme,
    fps: f32,
}

impl<'a> DebugPanel<'a> {
    pub fn new(state: &'a PanelState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            fps: 0.0,
        }
    }

    pub fn fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    // Header
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new("Debug Panel")
                                .strong()
                                .color(self.theme.text_primary),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(format!("{:.1} FPS", self.fps))
                                    .size(12.0)
                                    .family(egui::FontFamily::Monospace)
                                    .color(self.theme.text_muted),
                            );
                        });
                    });

                    ui.separator();

                    // Stats grid
                    egui::Grid::new("debug_stats")
                        .num_columns(2)
                        .spacing([20.0, 4.0])
                        .show(ui, |ui| {
                            self.stat_row(ui, "Connection", &self.state.connection().to_string());
                            self.stat_row(ui, "Agent", &self.state.agent_state().to_string());
                            self.stat_row(ui, "Agent track", &yes_no(self.state.has_agent_track()));
                            self.stat_row(ui, "Mic track", &yes_no(self.state.has_mic_track()));
                            self.stat_row(ui, "Mic enabled", &yes_no(self.state.is_mic_enabled()));
                            self.stat_row(ui, "Loading", &yes_no(self.state.is_loading()));
                            self.stat_row(ui, "Layout", self.layout_label());
                            self.stat_row(ui, "Voices", &self.state.voices().len().to_string());
                            self.stat_row(ui, "Selected voice", &self.selected_voice_name());
                            self.stat_row(ui, "Sweep", &self.sweep_status());
                            self.stat_row(ui, "Agent peak", &format!("{:.2}", self.agent_peak()));
                            self.stat_row(
                                ui,
                                "Pending requests",
                                &yes_no(self.state.has_pending_requests()),
                            );
                        });
                });
            });
    }

    fn stat_row(&self, ui: &mut egui::Ui, label: &str, value: &str) {
        ui.label(
            RichText::new(label)
                .size(12.0)
                .color(self.theme.text_muted),
        );

        let display_value = if value.is_empty() { "—" } else { value };

        ui.label(
            RichText::new(display_value)
                .size(12.0)
                .family(egui::FontFamily::Monospace)
                .color(self.theme.text_primary),
        );

        ui.end_row();
    }

    fn layout_label(&self) -> &'static str {
        if self.state.is_compact() {
            "Compact"
        } else {
            "Expanded"
        }
    }

    fn selected_voice_name(&self) -> String {
        let Some(id) = self.state.selected_voice_id() else {
            return String::new();
        };
        self.state
            .voices()
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn sweep_status(&self) -> String {
        if self.state.agent_state().is_thinking() {
            format!(
                "band {} {}",
                self.state.sweep_index(),
                self.state.sweep_direction()
            )
        } else {
            "idle".to_string()
        }
    }

    fn agent_peak(&self) -> f32 {
        self.state
            .agent_magnitudes()
            .iter()
            .copied()
            .fold(0.0, f32::max)
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}
