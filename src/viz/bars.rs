//! Visualizer bar layout
//!
//! Pure mapping from per-band magnitudes and agent state to renderable bar
//! descriptors. Drawing happens elsewhere; this stage only decides size,
//! palette, and animation flags per bar.

use crate::session::AgentState;

/// Geometry preset for the visualizer bars
///
/// Presets are swapped as whole values when the layout changes, never
/// field by field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    /// Width of each bar
    pub bar_width: f32,
    /// Bar height at zero magnitude
    pub min_height: f32,
    /// Bar height at full magnitude
    pub max_height: f32,
    /// Corner rounding radius
    pub corner_radius: f32,
    /// Horizontal gap between bars
    pub gap: f32,
}

impl BarGeometry {
    /// Preset for wide viewports
    pub const fn expanded() -> Self {
        Self {
            bar_width: 72.0,
            min_height: 60.0,
            max_height: 280.0,
            corner_radius: 4.0,
            gap: 16.0,
        }
    }

    /// Preset for narrow viewports
    pub const fn compact() -> Self {
        Self {
            bar_width: 48.0,
            min_height: 48.0,
            max_height: 140.0,
            corner_radius: 4.0,
            gap: 16.0,
        }
    }

    /// Bar height for a magnitude
    ///
    /// Linear between `min_height` at 0.0 and `max_height` at 1.0. The
    /// result is deliberately not clamped: magnitudes above 1.0 yield
    /// heights above `max_height`, matching the aggregation stage which
    /// makes no range promise either.
    pub fn height_for(&self, magnitude: f32) -> f32 {
        self.min_height + magnitude * (self.max_height - self.min_height)
    }
}

/// Palette token for a bar
///
/// Tokens are resolved to concrete colors by the theme at draw time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarColor {
    /// Muted palette shown before agent audio is available
    Neutral,
    /// Accent palette shown while agent audio is live
    Accent,
}

/// One renderable bar
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarDescriptor {
    /// Bar height in points
    pub height: f32,
    /// Bar width in points
    pub width: f32,
    /// Palette token
    pub color: BarColor,
    /// Whether the bar runs the listening pulse animation
    pub pulsing: bool,
    /// Whether the bar casts the ready-state drop shadow
    pub shadow: bool,
}

/// Layout stage for the agent visualizer
#[derive(Clone, Debug)]
pub struct Visualizer {
    geometry: BarGeometry,
    band_count: usize,
}

impl Visualizer {
    /// Create a visualizer with the given geometry and band count
    ///
    /// `band_count` only matters while no agent track is attached; live
    /// batches carry their own band count.
    pub fn new(geometry: BarGeometry, band_count: usize) -> Self {
        Self {
            geometry,
            band_count,
        }
    }

    /// Current geometry preset
    pub fn geometry(&self) -> &BarGeometry {
        &self.geometry
    }

    /// Swap in a different geometry preset
    pub fn set_geometry(&mut self, geometry: BarGeometry) {
        self.geometry = geometry;
    }

    /// Total width of the bar row including gaps
    pub fn row_width(&self, bar_count: usize) -> f32 {
        if bar_count == 0 {
            return 0.0;
        }
        bar_count as f32 * self.geometry.bar_width + (bar_count - 1) as f32 * self.geometry.gap
    }

    /// Compute bar descriptors for one frame
    ///
    /// Without an agent track every band renders at its resting default in
    /// the neutral palette, regardless of what `magnitudes` contains. With a
    /// track attached the incoming magnitudes are used as-is in the accent
    /// palette. The center bar pulses while the agent is listening, and all
    /// bars cast a shadow once the agent is ready.
    pub fn layout(
        &self,
        magnitudes: &[f32],
        agent_state: AgentState,
        has_agent_track: bool,
    ) -> Vec<BarDescriptor> {
        let ready = agent_state.is_ready();
        let listening = agent_state.is_listening();

        let (levels, color) = if has_agent_track {
            (magnitudes.to_vec(), BarColor::Accent)
        } else {
            (vec![0.0; self.band_count], BarColor::Neutral)
        };

        let center = levels.len() / 2;
        levels
            .iter()
            .enumerate()
            .map(|(i, &magnitude)| BarDescriptor {
                height: self.geometry.height_for(magnitude),
                width: self.geometry.bar_width,
                color,
                pulsing: listening && i == center,
                shadow: ready,
            })
            .collect()
    }
}
