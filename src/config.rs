//! Configuration for the session panel
//!
//! Provides centralized configuration for the visualizer and panel layout.

use crate::error::{BanterError, Result};
use crate::viz::BarGeometry;
use std::time::Duration;

/// Configuration for the session panel
#[derive(Clone, Debug)]
pub struct PanelConfig {
    /// Number of frequency bands in the agent visualizer
    pub agent_bands: usize,

    /// Number of frequency bands in the microphone level readout
    pub mic_bands: usize,

    /// Viewport widths below this switch to the compact layout
    pub compact_breakpoint: f32,

    /// Interval between thinking-sweep steps
    pub sweep_interval: Duration,

    /// Bar geometry for the expanded (wide) layout
    pub expanded_bars: BarGeometry,

    /// Bar geometry for the compact (narrow) layout
    pub compact_bars: BarGeometry,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            agent_bands: 5,
            mic_bands: 9,
            compact_breakpoint: 768.0,
            sweep_interval: Duration::from_millis(200),
            expanded_bars: BarGeometry::expanded(),
            compact_bars: BarGeometry::compact(),
        }
    }
}

impl PanelConfig {
    /// Set the number of agent visualizer bands
    pub fn with_agent_bands(mut self, bands: usize) -> Self {
        self.agent_bands = bands;
        self
    }

    /// Set the number of microphone readout bands
    pub fn with_mic_bands(mut self, bands: usize) -> Self {
        self.mic_bands = bands;
        self
    }

    /// Set the compact layout breakpoint
    pub fn with_compact_breakpoint(mut self, width: f32) -> Self {
        self.compact_breakpoint = width;
        self
    }

    /// Set the thinking-sweep step interval
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Select the bar geometry for the given layout
    pub fn geometry_for(&self, compact: bool) -> &BarGeometry {
        if compact {
            &self.compact_bars
        } else {
            &self.expanded_bars
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.agent_bands == 0 {
            return Err(BanterError::ConfigError(
                "agent band count must be at least 1".to_string(),
            ));
        }

        if self.mic_bands == 0 {
            return Err(BanterError::ConfigError(
                "microphone band count must be at least 1".to_string(),
            ));
        }

        if self.compact_breakpoint <= 0.0 {
            return Err(BanterError::ConfigError(format!(
                "compact breakpoint must be positive, got {}",
                self.compact_breakpoint
            )));
        }

        if self.sweep_interval.is_zero() {
            return Err(BanterError::ConfigError(
                "sweep interval must be non-zero".to_string(),
            ));
        }

        for geometry in [&self.expanded_bars, &self.compact_bars] {
            if geometry.bar_width <= 0.0 {
                return Err(BanterError::ConfigError(format!(
                    "bar width must be positive, got {}",
                    geometry.bar_width
                )));
            }
            if geometry.min_height > geometry.max_height {
                return Err(BanterError::ConfigError(format!(
                    "minimum bar height {} exceeds maximum {}",
                    geometry.min_height, geometry.max_height
                )));
            }
        }

        Ok(())
    }
}
