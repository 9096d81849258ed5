//! Agent audio visualizer component
//!
//! Draws the row of frequency bars described by the visualizer layout.
//! All sizing and color decisions are made upstream; this component only
//! paints descriptors and animates the loading pulse.

use crate::ui::theme::Theme;
use crate::viz::{BarDescriptor, BarGeometry};
use egui::{self, Pos2, Rect, Rounding, Sense, Vec2};

/// Frequency bar row component
pub struct SpectrumBars<'a> {
    bars: &'a [BarDescriptor],
    theme: &'a Theme,
    /// Horizontal gap between bars
    gap: f32,
    /// Corner radius of each bar
    rounding: f32,
    /// Fixed height of the allocated row
    row_height: f32,
}

impl<'a> SpectrumBars<'a> {
    pub fn new(bars: &'a [BarDescriptor], theme: &'a Theme) -> Self {
        Self {
            bars,
            theme,
            gap: 16.0,
            rounding: 4.0,
            row_height: 280.0,
        }
    }

    /// Take gap, rounding, and row height from a bar geometry preset
    pub fn geometry(mut self, geometry: &BarGeometry) -> Self {
        self.gap = geometry.gap;
        self.rounding = geometry.corner_radius;
        self.row_height = geometry.max_height;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let desired_size = Vec2::new(ui.available_width(), self.row_height);
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::hover());

        let bar_count = self.bars.len();
        if bar_count == 0 {
            return response;
        }

        let row_width: f32 = self.bars.iter().map(|b| b.width).sum::<f32>()
            + self.gap * bar_count.saturating_sub(1) as f32;

        // Loading pulse, shared phase across all pulsing bars
        let t = ui.ctx().input(|i| i.time);
        let pulse = 0.75 + 0.25 * (t * std::f64::consts::PI).cos() as f32;

        let painter = ui.painter();
        let center_y = rect.center().y;
        let mut x = rect.center().x - row_width / 2.0;
        let mut animated = false;

        for bar in self.bars {
            let bar_rect = Rect::from_center_size(
                Pos2::new(x + bar.width / 2.0, center_y),
                Vec2::new(bar.width, bar.height),
            );

            if bar.shadow {
                painter.rect_filled(
                    bar_rect.translate(Vec2::new(0.0, 3.0)),
                    Rounding::same(self.rounding),
                    self.theme.bar_shadow,
                );
            }

            let mut color = self.theme.bar_color(bar.color);
            if bar.pulsing {
                color = color.gamma_multiply(pulse);
                animated = true;
            }

            painter.rect_filled(bar_rect, Rounding::same(self.rounding), color);

            x += bar.width + self.gap;
        }

        // Request repaint for the pulse animation
        if animated {
            ui.ctx().request_repaint();
        }

        response
    }
}
