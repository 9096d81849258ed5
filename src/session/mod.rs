//! Session layer
//!
//! Everything the panel knows about the outside world: connection and agent
//! lifecycle types, the event/request boundary, the voice roster, and the
//! simulated backend that drives it all.

pub mod events;
pub mod roster;
pub mod sim;
pub mod types;

pub use events::{BandSamples, SessionEvent, SessionRequest, END_CALL_TOPIC};
pub use roster::{Voice, VoiceRoster, VOICES_ATTRIBUTE, VOICE_ATTRIBUTE};
pub use sim::{SimConfig, SimSession, SimSessionHandle};
pub use types::{AgentState, ConnectionState, TrackId};
