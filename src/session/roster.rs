//! Voice roster announced by the agent
//!
//! The agent publishes its available voices as a JSON list under a
//! participant attribute. Announcements are best-effort: a payload that does
//! not parse leaves the previous roster in place.

use crate::error::{BanterError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Participant attribute key the agent announces voices under
pub const VOICES_ATTRIBUTE: &str = "voices";

/// Participant attribute key the panel writes the selected voice to
pub const VOICE_ATTRIBUTE: &str = "voice";

/// One selectable agent voice
///
/// Only `id` and `name` are guaranteed to be present; the agent may announce
/// a reduced projection of its catalog entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    /// Stable voice identifier
    pub id: String,
    /// Human-readable voice name
    pub name: String,
    /// Owning user, if the voice is not a stock voice
    #[serde(default)]
    pub user_id: Option<String>,
    /// Whether the voice is publicly listed
    #[serde(default)]
    pub is_public: bool,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Voice embedding vector
    #[serde(default)]
    pub embedding: Vec<f32>,
}

impl Voice {
    /// Create a voice with just the announced fields
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// In-memory voice roster with the user's selection
#[derive(Clone, Debug, Default)]
pub struct VoiceRoster {
    voices: Vec<Voice>,
    selected_id: Option<String>,
}

impl VoiceRoster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the roster from an announcement payload
    ///
    /// The payload must be a JSON list of voices. On success the previous
    /// entries are replaced in arrival order and the entry count is returned.
    /// On failure the roster is left untouched and the error describes the
    /// parse problem; the selection is never modified here.
    pub fn apply_payload(&mut self, payload: &str) -> Result<usize> {
        let voices: Vec<Voice> = serde_json::from_str(payload)
            .map_err(|e| BanterError::RosterError(format!("invalid voices payload: {}", e)))?;
        let count = voices.len();
        self.voices = voices;
        Ok(count)
    }

    /// Get the announced voices in arrival order
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Check if no voices have been announced
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Number of announced voices
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// Record the user's selection
    ///
    /// The selection is optimistic: the id is stored even if no announced
    /// voice carries it, since the agent is the authority on validity.
    pub fn select(&mut self, id: impl Into<String>) {
        self.selected_id = Some(id.into());
    }

    /// Get the selected voice id, if any
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Look up the selected voice in the roster
    ///
    /// Returns `None` when nothing is selected or the selection does not
    /// match any announced voice.
    pub fn selected_voice(&self) -> Option<&Voice> {
        let id = self.selected_id.as_deref()?;
        self.voices.iter().find(|v| v.id == id)
    }
}
