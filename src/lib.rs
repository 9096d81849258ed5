//! Banter - session panel for a voice assistant
//!
//! This crate provides the desktop panel for driving a voice-agent session:
//! connection and microphone control, the multiband agent visualizer with
//! its thinking sweep, and voice selection from the roster the agent
//! announces over participant attributes.

pub mod audio;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod ui;
pub mod viz;

// Re-export error types
pub use error::{BanterError, Result};

// Re-export configuration and panel state
pub use config::PanelConfig;
pub use state::PanelState;

// Re-export session types
pub use session::{
    AgentState, ConnectionState, SessionEvent, SessionRequest, SimConfig, SimSession,
    SimSessionHandle, TrackId, Voice,
};

// Re-export visualization types
pub use viz::{BarColor, BarDescriptor, BarGeometry, SweepDirection};
