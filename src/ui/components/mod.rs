//! Reusable UI components for the session panel

pub mod debug_panel;
pub mod mic_button;
pub mod visualizer;
pub mod voice_panel;

pub use debug_panel::DebugPanel;
pub use mic_button::MicControl;
pub use visualizer::SpectrumBars;
pub use voice_panel::VoicePanel;
