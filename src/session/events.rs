//! Events and requests crossing the session boundary
//!
//! The panel consumes `SessionEvent`s and produces `SessionRequest`s. All
//! communication with the session layer goes through these two enums, which
//! keeps the panel core free of transport details.

use crate::session::types::{AgentState, ConnectionState, TrackId};
use std::collections::HashMap;

/// Data topic the agent uses to ask the panel to end the call
pub const END_CALL_TOPIC: &str = "endCall";

/// One batch of frequency samples, one inner array per band
pub type BandSamples = Vec<Vec<f32>>;

/// Events delivered by the session layer
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Connection state changed
    ConnectionChanged(ConnectionState),

    /// The agent participant joined the session
    AgentJoined,

    /// The agent participant left the session
    AgentLeft,

    /// Agent lifecycle state changed
    AgentStateChanged(AgentState),

    /// The agent's audio track attached or detached
    AgentTrackChanged(Option<TrackId>),

    /// The local microphone track attached or detached
    MicTrackChanged(Option<TrackId>),

    /// Frequency samples from the agent's audio track
    AgentSpectrum(BandSamples),

    /// Frequency samples from the local microphone
    MicSpectrum(BandSamples),

    /// Agent participant attributes changed
    AttributesChanged(HashMap<String, String>),

    /// Side-channel data message published by the agent
    DataReceived { topic: String, payload: Vec<u8> },
}

/// Requests sent to the session layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRequest {
    /// Establish a session
    Connect,

    /// Tear down the session
    Disconnect,

    /// Enable or disable the local microphone
    SetMicrophoneEnabled(bool),

    /// Write a local participant attribute
    SetAttribute { key: String, value: String },
}

impl SessionRequest {
    /// Check if this request starts or stops the session
    ///
    /// Connection intents replace each other when queued back to back, so
    /// they are handled differently from other requests.
    pub fn is_connection_intent(&self) -> bool {
        matches!(self, SessionRequest::Connect | SessionRequest::Disconnect)
    }
}
