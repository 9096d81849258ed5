//! Session state types shared between the panel and the session layer
//!
//! These mirror the state the external session layer owns. The panel never
//! mutates them directly; it only applies the values delivered by events.

use uuid::Uuid;

/// Connection state of the session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No session established
    #[default]
    Disconnected,
    /// Session establishment in progress
    Connecting,
    /// Session established
    Connected,
    /// Session dropped, re-establishment in progress
    Reconnecting,
}

impl ConnectionState {
    /// Check if the session is established
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Check if a first connection attempt is in progress
    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting)
    }

    /// Check if there is no session
    pub fn is_disconnected(&self) -> bool {
        matches!(self, ConnectionState::Disconnected)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Connecting => write!(f, "Connecting"),
            ConnectionState::Connected => write!(f, "Connected"),
            ConnectionState::Reconnecting => write!(f, "Reconnecting"),
        }
    }
}

/// Lifecycle state of the remote agent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AgentState {
    /// Agent not present in the session
    #[default]
    Disconnected,
    /// Agent joining the session
    Connecting,
    /// Agent present, preparing its pipeline
    Initializing,
    /// Agent waiting for user speech
    Listening,
    /// Agent processing a response
    Thinking,
    /// Agent playing back a response
    Speaking,
}

impl AgentState {
    /// Check if the agent has finished starting up
    ///
    /// Ready means the agent is actively in the conversation, whether
    /// listening, thinking, or speaking.
    pub fn is_ready(&self) -> bool {
        !matches!(
            self,
            AgentState::Disconnected | AgentState::Connecting | AgentState::Initializing
        )
    }

    /// Check if the agent is processing a response
    pub fn is_thinking(&self) -> bool {
        matches!(self, AgentState::Thinking)
    }

    /// Check if the agent is waiting for user speech
    pub fn is_listening(&self) -> bool {
        matches!(self, AgentState::Listening)
    }

    /// Check if the agent is playing back a response
    pub fn is_speaking(&self) -> bool {
        matches!(self, AgentState::Speaking)
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentState::Disconnected => write!(f, "Disconnected"),
            AgentState::Connecting => write!(f, "Connecting"),
            AgentState::Initializing => write!(f, "Initializing"),
            AgentState::Listening => write!(f, "Listening"),
            AgentState::Thinking => write!(f, "Thinking"),
            AgentState::Speaking => write!(f, "Speaking"),
        }
    }
}

/// Opaque handle for an audio track attached to the session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrackId(Uuid);

impl TrackId {
    /// Mint a fresh track id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
