//! Microphone control component
//!
//! A mute toggle next to a small live readout of the microphone bands.

use crate::ui::theme::Theme;
use egui::{self, Pos2, Rect, RichText, Rounding, Sense, Vec2};

/// Microphone toggle with band readout
pub struct MicControl<'a> {
    enabled: bool,
    levels: &'a [f32],
    theme: &'a Theme,
    /// Height of the readout bars
    height: f32,
}

impl<'a> MicControl<'a> {
    pub fn new(enabled: bool, levels: &'a [f32], theme: &'a Theme) -> Self {
        Self {
            enabled,
            levels,
            theme,
            height: 28.0,
        }
    }

    /// Show the control, returning the toggle button's response
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        ui.horizontal(|ui| {
            let label = if self.enabled { "🎙 On" } else { "🎙 Muted" };
            let response = ui
                .add(egui::Button::new(RichText::new(label)).rounding(self.theme.button_rounding))
                .on_hover_text("Toggle microphone");

            self.draw_levels(ui);

            response
        })
        .inner
    }

    fn draw_levels(&self, ui: &mut egui::Ui) {
        let bar_width = 4.0;
        let gap = 3.0;
        let count = self.levels.len();
        let width = (count as f32 * (bar_width + gap) - gap).max(bar_width);

        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, self.height), Sense::hover());
        let painter = ui.painter();
        let center_y = rect.center().y;

        let color = if self.enabled {
            self.theme.accent
        } else {
            self.theme.bar_neutral
        };

        for (i, &level) in self.levels.iter().enumerate() {
            let height = 4.0 + level.clamp(0.0, 1.0) * (self.height - 4.0);
            let x = rect.left() + i as f32 * (bar_width + gap) + bar_width / 2.0;

            painter.rect_filled(
                Rect::from_center_size(Pos2::new(x, center_y), Vec2::new(bar_width, height)),
                Rounding::same(2.0),
                color,
            );
        }
    }
}
