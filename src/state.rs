//! Unified panel state for the Banter session panel
//!
//! This is the single source of truth the UI renders from. It is driven
//! from exactly one place per frame:
//! - **Session events** mutate it through `apply`
//! - **The frame clock** advances the thinking sweep through `tick`
//! - **Resizes** arrive through `set_viewport_width`
//! - **User interactions** call the intent methods
//!
//! Outbound work never happens inline. Intents are queued as
//! `SessionRequest`s in an outbox the host drains once per frame, which
//! keeps the panel synchronous, transport-agnostic, and testable.

use crate::config::PanelConfig;
use crate::session::{
    AgentState, ConnectionState, SessionEvent, SessionRequest, TrackId, Voice, VoiceRoster,
    END_CALL_TOPIC, VOICES_ATTRIBUTE, VOICE_ATTRIBUTE,
};
use crate::viz::{band_magnitudes, BarDescriptor, SweepDirection, ThinkingSweep, Visualizer};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, warn};

/// Unified panel state
///
/// Session-owned values (connection, agent lifecycle, tracks, spectra) are
/// read-only mirrors updated only by `apply`. The panel owns the sweep, the
/// roster selection, the layout flags, and the outbox.
pub struct PanelState {
    config: PanelConfig,

    // Mirrors of session-owned state
    connection: ConnectionState,
    agent_present: bool,
    agent_state: AgentState,
    agent_track: Option<TrackId>,
    mic_track: Option<TrackId>,

    // Panel-owned state
    agent_magnitudes: Vec<f32>,
    mic_magnitudes: Vec<f32>,
    sweep: ThinkingSweep,
    visualizer: Visualizer,
    roster: VoiceRoster,
    show_voice_panel: bool,
    compact: bool,
    viewport_width: Option<f32>,
    mic_enabled: bool,
    outbox: VecDeque<SessionRequest>,
}

impl PanelState {
    /// Create a panel in the disconnected resting state
    pub fn new(config: PanelConfig) -> Self {
        let sweep = ThinkingSweep::new(config.agent_bands, config.sweep_interval);
        let visualizer = Visualizer::new(*config.geometry_for(false), config.agent_bands);
        let agent_magnitudes = vec![0.0; config.agent_bands];
        let mic_magnitudes = vec![0.0; config.mic_bands];

        Self {
            config,
            connection: ConnectionState::default(),
            agent_present: false,
            agent_state: AgentState::default(),
            agent_track: None,
            mic_track: None,
            agent_magnitudes,
            mic_magnitudes,
            sweep,
            visualizer,
            roster: VoiceRoster::new(),
            show_voice_panel: true,
            compact: false,
            viewport_width: None,
            mic_enabled: false,
            outbox: VecDeque::new(),
        }
    }

    // === Session events ===

    /// Apply one inbound session event
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::ConnectionChanged(connection) => {
                self.set_connection(connection);
            }
            SessionEvent::AgentJoined => {
                debug!("[SESSION] Agent joined");
                self.agent_present = true;
            }
            SessionEvent::AgentLeft => {
                debug!("[SESSION] Agent left");
                self.agent_present = false;
            }
            SessionEvent::AgentStateChanged(state) => {
                self.agent_state = state;
                self.sweep.set_thinking(state.is_thinking());
            }
            SessionEvent::AgentTrackChanged(track) => {
                self.agent_track = track;
                if track.is_none() {
                    self.agent_magnitudes = vec![0.0; self.config.agent_bands];
                }
            }
            SessionEvent::MicTrackChanged(track) => {
                self.mic_track = track;
                if track.is_none() {
                    self.mic_magnitudes = vec![0.0; self.config.mic_bands];
                }
            }
            SessionEvent::AgentSpectrum(bands) => {
                self.agent_magnitudes = band_magnitudes(&bands);
            }
            SessionEvent::MicSpectrum(bands) => {
                self.mic_magnitudes = band_magnitudes(&bands);
            }
            SessionEvent::AttributesChanged(attributes) => {
                if let Some(payload) = attributes.get(VOICES_ATTRIBUTE) {
                    // A bad announcement keeps the previous roster
                    match self.roster.apply_payload(payload) {
                        Ok(count) => debug!("[SESSION] Voice roster updated: {} voices", count),
                        Err(e) => warn!("[SESSION] Ignoring voice announcement: {}", e),
                    }
                }
            }
            SessionEvent::DataReceived { topic, .. } => {
                if topic == END_CALL_TOPIC {
                    debug!("[SESSION] Agent requested end of call");
                    self.push_connection_intent(SessionRequest::Disconnect);
                }
            }
        }
    }

    /// Mirror a connection change, requesting the microphone on entry
    ///
    /// The enable request fires exactly once per transition into
    /// `Connected`; repeated connected notifications do not re-issue it.
    fn set_connection(&mut self, connection: ConnectionState) {
        let was_connected = self.connection.is_connected();
        self.connection = connection;

        if connection.is_connected() && !was_connected {
            debug!("[SESSION] Connected, enabling microphone");
            self.mic_enabled = true;
            self.outbox.push_back(SessionRequest::SetMicrophoneEnabled(true));
        }

        if connection.is_disconnected() {
            self.mic_enabled = false;
        }
    }

    // === Frame clock ===

    /// Advance time-driven animation, returning whether anything moved
    pub fn tick(&mut self, now: Instant) -> bool {
        self.sweep.tick(now)
    }

    // === Viewport ===

    /// Push the current viewport width
    ///
    /// Every width change re-applies the layout defaults: the geometry
    /// preset is swapped as a whole and the voice panel visibility is reset
    /// to the default for that width, overriding any manual toggle. Pushing
    /// an unchanged width is a no-op so manual toggles survive repaints.
    pub fn set_viewport_width(&mut self, width: f32) {
        if self.viewport_width == Some(width) {
            return;
        }
        self.viewport_width = Some(width);

        let compact = width < self.config.compact_breakpoint;
        self.compact = compact;
        self.visualizer.set_geometry(*self.config.geometry_for(compact));
        self.show_voice_panel = !compact;
    }

    // === User intents ===

    /// Flip the voice panel open or closed
    pub fn toggle_voice_panel(&mut self) {
        self.show_voice_panel = !self.show_voice_panel;
    }

    /// Queue a connect or disconnect depending on the current connection
    ///
    /// Connect is only requested from `Disconnected`; any other state asks
    /// for a disconnect, including mid-establishment.
    pub fn request_connection_toggle(&mut self) {
        let request = if self.connection.is_disconnected() {
            SessionRequest::Connect
        } else {
            SessionRequest::Disconnect
        };
        self.push_connection_intent(request);
    }

    /// Queue a connection intent, replacing any still-pending one
    ///
    /// Within one update the outbox holds at most one connection intent;
    /// the last one wins so contradictory pairs never reach the session.
    fn push_connection_intent(&mut self, request: SessionRequest) {
        self.outbox.retain(|r| !r.is_connection_intent());
        debug!("[SESSION] Queueing {:?}", request);
        self.outbox.push_back(request);
    }

    /// Select a voice and queue the attribute write
    ///
    /// The selection is optimistic: it is recorded and announced without
    /// checking the roster, since the agent decides what is valid.
    pub fn select_voice(&mut self, id: impl Into<String>) {
        let id = id.into();
        debug!("[SESSION] Voice selected: {}", id);
        self.roster.select(id.clone());
        self.outbox.push_back(SessionRequest::SetAttribute {
            key: VOICE_ATTRIBUTE.to_string(),
            value: id,
        });
    }

    /// Enable or disable the local microphone
    pub fn set_microphone_enabled(&mut self, enabled: bool) {
        self.mic_enabled = enabled;
        self.outbox
            .push_back(SessionRequest::SetMicrophoneEnabled(enabled));
    }

    /// Flip the local microphone
    pub fn toggle_microphone(&mut self) {
        self.set_microphone_enabled(!self.mic_enabled);
    }

    // === Outbox ===

    /// Take all queued outbound requests in order
    pub fn drain_requests(&mut self) -> Vec<SessionRequest> {
        self.outbox.drain(..).collect()
    }

    /// Check if outbound requests are waiting
    pub fn has_pending_requests(&self) -> bool {
        !self.outbox.is_empty()
    }

    // === Derived state ===

    /// Panel configuration
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Mirrored connection state
    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    /// Mirrored agent lifecycle state
    pub fn agent_state(&self) -> AgentState {
        self.agent_state
    }

    /// Check if the agent participant is in the session
    pub fn is_agent_connected(&self) -> bool {
        self.agent_present
    }

    /// Check if agent audio is attached
    pub fn has_agent_track(&self) -> bool {
        self.agent_track.is_some()
    }

    /// Check if the local microphone track is attached
    pub fn has_mic_track(&self) -> bool {
        self.mic_track.is_some()
    }

    /// Check if the microphone is requested on
    pub fn is_mic_enabled(&self) -> bool {
        self.mic_enabled
    }

    /// Check if the session is starting up
    ///
    /// Loading covers connection establishment and the wait for agent
    /// audio after the session is up. Reconnecting keeps the last UI
    /// rather than dropping back into loading.
    pub fn is_loading(&self) -> bool {
        self.connection.is_connecting()
            || (self.connection.is_connected() && self.agent_track.is_none())
    }

    /// Check if the narrow layout is active
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Check if the voice panel is open
    pub fn show_voice_panel(&self) -> bool {
        self.show_voice_panel
    }

    /// Voices available for selection
    ///
    /// Empty until the agent is in the session, regardless of previously
    /// announced entries.
    pub fn voices(&self) -> &[Voice] {
        if self.agent_present {
            self.roster.voices()
        } else {
            &[]
        }
    }

    /// The selected voice id, if any
    pub fn selected_voice_id(&self) -> Option<&str> {
        self.roster.selected_id()
    }

    /// Latest aggregated agent band magnitudes
    pub fn agent_magnitudes(&self) -> &[f32] {
        &self.agent_magnitudes
    }

    /// Latest aggregated microphone band magnitudes
    pub fn mic_magnitudes(&self) -> &[f32] {
        &self.mic_magnitudes
    }

    /// Currently highlighted sweep band
    pub fn sweep_index(&self) -> usize {
        self.sweep.index()
    }

    /// Current sweep travel direction
    pub fn sweep_direction(&self) -> SweepDirection {
        self.sweep.direction()
    }

    /// Bar descriptors for the agent visualizer under the active preset
    pub fn bars(&self) -> Vec<BarDescriptor> {
        self.visualizer.layout(
            &self.agent_magnitudes,
            self.agent_state,
            self.agent_track.is_some(),
        )
    }

    /// Check if anything on screen is currently animated
    pub fn is_animating(&self) -> bool {
        self.sweep.is_active()
            || self.agent_track.is_some()
            || self.mic_track.is_some()
            || self.is_loading()
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::BarColor;
    use std::collections::HashMap;
    use std::time::Duration;

    fn connected_panel() -> PanelState {
        let mut panel = PanelState::new(PanelConfig::default());
        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connected));
        panel.drain_requests();
        panel
    }

    fn voices_event(payload: &str) -> SessionEvent {
        let mut attributes = HashMap::new();
        attributes.insert(VOICES_ATTRIBUTE.to_string(), payload.to_string());
        SessionEvent::AttributesChanged(attributes)
    }

    #[test]
    fn test_resting_state() {
        let panel = PanelState::new(PanelConfig::default());

        assert_eq!(panel.connection(), ConnectionState::Disconnected);
        assert!(!panel.is_agent_connected());
        assert!(!panel.is_loading());
        assert!(panel.voices().is_empty());
        assert!(!panel.has_pending_requests());

        let bars = panel.bars();
        assert_eq!(bars.len(), 5);
        for bar in &bars {
            assert_eq!(bar.color, BarColor::Neutral);
            assert_eq!(bar.height, 60.0);
        }
    }

    #[test]
    fn test_loading_truth_table() {
        let mut panel = PanelState::new(PanelConfig::default());
        assert!(!panel.is_loading());

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connecting));
        assert!(panel.is_loading());

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connected));
        assert!(panel.is_loading(), "connected without agent audio still loads");

        panel.apply(SessionEvent::AgentTrackChanged(Some(TrackId::new())));
        assert!(!panel.is_loading());

        panel.apply(SessionEvent::AgentTrackChanged(None));
        assert!(panel.is_loading(), "losing agent audio returns to loading");

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Reconnecting));
        assert!(!panel.is_loading(), "reconnecting keeps the last UI");

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Disconnected));
        assert!(!panel.is_loading());
    }

    #[test]
    fn test_microphone_enabled_once_per_connection() {
        let mut panel = PanelState::new(PanelConfig::default());

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connecting));
        assert!(panel.drain_requests().is_empty());

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connected));
        assert_eq!(
            panel.drain_requests(),
            vec![SessionRequest::SetMicrophoneEnabled(true)]
        );
        assert!(panel.is_mic_enabled());

        // Repeated connected notifications do not re-issue the request
        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connected));
        assert!(panel.drain_requests().is_empty());
    }

    #[test]
    fn test_microphone_enabled_again_after_reconnect() {
        let mut panel = connected_panel();

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Reconnecting));
        assert!(panel.drain_requests().is_empty());

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connected));
        assert_eq!(
            panel.drain_requests(),
            vec![SessionRequest::SetMicrophoneEnabled(true)]
        );
    }

    #[test]
    fn test_disconnect_clears_mic_intent() {
        let mut panel = connected_panel();
        assert!(panel.is_mic_enabled());

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Disconnected));
        assert!(!panel.is_mic_enabled());
    }

    #[test]
    fn test_connection_toggle_from_each_state() {
        let mut panel = PanelState::new(PanelConfig::default());

        panel.request_connection_toggle();
        assert_eq!(panel.drain_requests(), vec![SessionRequest::Connect]);

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connecting));
        panel.request_connection_toggle();
        assert_eq!(panel.drain_requests(), vec![SessionRequest::Disconnect]);

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connected));
        panel.drain_requests();
        panel.request_connection_toggle();
        assert_eq!(panel.drain_requests(), vec![SessionRequest::Disconnect]);
    }

    #[test]
    fn test_rapid_toggle_keeps_latest_intent() {
        let mut panel = PanelState::new(PanelConfig::default());

        panel.request_connection_toggle();
        panel.request_connection_toggle();

        // Still disconnected from the panel's view, so both computed to
        // Connect; only one survives
        assert_eq!(panel.drain_requests(), vec![SessionRequest::Connect]);
    }

    #[test]
    fn test_end_call_overrides_pending_intent() {
        let mut panel = PanelState::new(PanelConfig::default());
        panel.request_connection_toggle();

        panel.apply(SessionEvent::DataReceived {
            topic: END_CALL_TOPIC.to_string(),
            payload: Vec::new(),
        });

        assert_eq!(panel.drain_requests(), vec![SessionRequest::Disconnect]);
    }

    #[test]
    fn test_end_call_disconnects_while_loading() {
        let mut panel = PanelState::new(PanelConfig::default());
        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connecting));
        assert!(panel.is_loading());

        panel.apply(SessionEvent::DataReceived {
            topic: END_CALL_TOPIC.to_string(),
            payload: b"{}".to_vec(),
        });

        assert_eq!(panel.drain_requests(), vec![SessionRequest::Disconnect]);
    }

    #[test]
    fn test_unknown_data_topic_is_ignored() {
        let mut panel = PanelState::new(PanelConfig::default());
        panel.apply(SessionEvent::DataReceived {
            topic: "transcript".to_string(),
            payload: Vec::new(),
        });
        assert!(!panel.has_pending_requests());
    }

    #[test]
    fn test_viewport_forces_voice_panel_default() {
        let mut panel = PanelState::new(PanelConfig::default());

        panel.set_viewport_width(1024.0);
        assert!(!panel.is_compact());
        assert!(panel.show_voice_panel());

        // Manual close survives repaints at a stable width
        panel.toggle_voice_panel();
        assert!(!panel.show_voice_panel());
        panel.set_viewport_width(1024.0);
        assert!(!panel.show_voice_panel());

        // Crossing the breakpoint re-applies the default both ways
        panel.set_viewport_width(700.0);
        assert!(panel.is_compact());
        assert!(!panel.show_voice_panel());

        panel.toggle_voice_panel();
        assert!(panel.show_voice_panel());
        panel.set_viewport_width(1024.0);
        assert!(panel.show_voice_panel());
    }

    #[test]
    fn test_any_width_change_reapplies_default() {
        let mut panel = PanelState::new(PanelConfig::default());
        panel.set_viewport_width(1024.0);
        panel.toggle_voice_panel();
        assert!(!panel.show_voice_panel());

        // Same side of the breakpoint, different width
        panel.set_viewport_width(1100.0);
        assert!(panel.show_voice_panel());
    }

    #[test]
    fn test_viewport_swaps_geometry_preset() {
        let mut panel = PanelState::new(PanelConfig::default());

        panel.set_viewport_width(1024.0);
        assert_eq!(panel.bars()[0].width, 72.0);

        panel.set_viewport_width(700.0);
        let bars = panel.bars();
        assert_eq!(bars[0].width, 48.0);
        assert_eq!(bars[0].height, 48.0);
    }

    #[test]
    fn test_roster_visibility_requires_agent() {
        let mut panel = connected_panel();
        panel.apply(voices_event(r#"[{"id": "v1", "name": "Ayla"}]"#));

        // Announced but the agent has not joined yet
        assert!(panel.voices().is_empty());

        panel.apply(SessionEvent::AgentJoined);
        assert_eq!(panel.voices().len(), 1);

        panel.apply(SessionEvent::AgentLeft);
        assert!(panel.voices().is_empty());
    }

    #[test]
    fn test_bad_roster_payload_is_fail_soft() {
        let mut panel = connected_panel();
        panel.apply(SessionEvent::AgentJoined);
        panel.apply(voices_event(r#"[{"id": "v1", "name": "Ayla"}]"#));
        assert_eq!(panel.voices().len(), 1);

        panel.apply(voices_event(r#"[{"id": "v2", "na"#));
        assert_eq!(panel.voices().len(), 1);
        assert_eq!(panel.voices()[0].id, "v1");
    }

    #[test]
    fn test_voice_selection_is_optimistic() {
        let mut panel = connected_panel();
        panel.apply(SessionEvent::AgentJoined);
        panel.apply(voices_event(r#"[{"id": "v1", "name": "Ayla"}]"#));

        panel.select_voice("missing");
        assert_eq!(panel.selected_voice_id(), Some("missing"));
        assert_eq!(
            panel.drain_requests(),
            vec![SessionRequest::SetAttribute {
                key: VOICE_ATTRIBUTE.to_string(),
                value: "missing".to_string(),
            }]
        );
    }

    #[test]
    fn test_spectrum_batches_become_magnitudes() {
        let mut panel = connected_panel();
        panel.apply(SessionEvent::AgentTrackChanged(Some(TrackId::new())));

        panel.apply(SessionEvent::AgentSpectrum(vec![
            vec![0.25; 8],
            vec![0.0; 8],
            vec![1.0; 8],
        ]));

        let magnitudes = panel.agent_magnitudes();
        assert!((magnitudes[0] - 0.5).abs() < 1e-6);
        assert_eq!(magnitudes[1], 0.0);
        assert!((magnitudes[2] - 1.0).abs() < 1e-6);

        let bars = panel.bars();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].color, BarColor::Accent);
    }

    #[test]
    fn test_track_detach_resets_levels() {
        let mut panel = connected_panel();
        panel.apply(SessionEvent::AgentTrackChanged(Some(TrackId::new())));
        panel.apply(SessionEvent::AgentSpectrum(vec![vec![1.0; 8]; 5]));
        assert!(panel.agent_magnitudes().iter().all(|&m| m > 0.0));

        panel.apply(SessionEvent::AgentTrackChanged(None));
        assert!(panel.agent_magnitudes().iter().all(|&m| m == 0.0));
        assert_eq!(panel.bars()[0].color, BarColor::Neutral);
    }

    #[test]
    fn test_mic_spectrum_is_tracked_separately() {
        let mut panel = connected_panel();
        panel.apply(SessionEvent::MicTrackChanged(Some(TrackId::new())));
        panel.apply(SessionEvent::MicSpectrum(vec![vec![0.25; 4]; 9]));

        assert_eq!(panel.mic_magnitudes().len(), 9);
        assert!(panel.agent_magnitudes().iter().all(|&m| m == 0.0));

        panel.apply(SessionEvent::MicTrackChanged(None));
        assert!(panel.mic_magnitudes().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_thinking_drives_the_sweep() {
        let mut panel = connected_panel();
        let start = Instant::now();

        panel.apply(SessionEvent::AgentStateChanged(AgentState::Thinking));
        assert!(!panel.tick(start));
        assert!(panel.tick(start + Duration::from_millis(200)));
        assert_eq!(panel.sweep_index(), 3);

        // Leaving thinking snaps the highlight back to center
        panel.apply(SessionEvent::AgentStateChanged(AgentState::Listening));
        assert_eq!(panel.sweep_index(), 2);
        assert_eq!(panel.sweep_direction(), SweepDirection::Right);
        assert!(!panel.tick(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_microphone_toggle_requests() {
        let mut panel = connected_panel();
        assert!(panel.is_mic_enabled());

        panel.toggle_microphone();
        assert!(!panel.is_mic_enabled());
        assert_eq!(
            panel.drain_requests(),
            vec![SessionRequest::SetMicrophoneEnabled(false)]
        );
    }

    #[test]
    fn test_connecting_agent_without_audio() {
        let mut panel = PanelState::new(PanelConfig::default());
        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connected));
        panel.apply(SessionEvent::AgentJoined);
        panel.apply(SessionEvent::AgentStateChanged(AgentState::Connecting));
        panel.drain_requests();

        assert!(panel.is_loading());
        assert!(panel.voices().is_empty());

        let bars = panel.bars();
        assert_eq!(bars.len(), 5);
        for bar in &bars {
            assert_eq!(bar.color, BarColor::Neutral);
            assert_eq!(bar.height, 60.0);
            assert!(!bar.shadow);
        }
    }

    #[test]
    fn test_drain_empties_the_outbox() {
        let mut panel = PanelState::new(PanelConfig::default());
        panel.request_connection_toggle();
        assert!(panel.has_pending_requests());

        let drained = panel.drain_requests();
        assert_eq!(drained.len(), 1);
        assert!(!panel.has_pending_requests());
        assert!(panel.drain_requests().is_empty());
    }

    #[test]
    fn test_animation_flag() {
        let mut panel = PanelState::new(PanelConfig::default());
        assert!(!panel.is_animating());

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connecting));
        assert!(panel.is_animating(), "loading spinner animates");

        panel.apply(SessionEvent::ConnectionChanged(ConnectionState::Connected));
        panel.apply(SessionEvent::AgentTrackChanged(Some(TrackId::new())));
        panel.drain_requests();
        assert!(panel.is_animating(), "live audio animates");
    }
}
