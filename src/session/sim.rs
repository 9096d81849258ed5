//! Simulated session backend
//!
//! Stands in for the real transport so the panel can run end to end without
//! a server: connection handshake, agent join, voice roster announcement,
//! a listen/think/speak conversation loop, and spectrum frames synthesized
//! from a fake agent voice.

use crate::audio::{MultibandAnalyzer, SpeechSynth};
use crate::config::PanelConfig;
use crate::error::BanterError;
use crate::session::events::{SessionEvent, SessionRequest, END_CALL_TOPIC};
use crate::session::roster::{Voice, VOICES_ATTRIBUTE, VOICE_ATTRIBUTE};
use crate::session::types::{AgentState, ConnectionState, TrackId};
use crate::Result;
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use std::collections::HashMap;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Fundamental frequency of the synthesized agent voice in Hz
const AGENT_VOICE_HZ: f32 = 150.0;

/// Fundamental frequency of the synthesized user voice in Hz
const USER_VOICE_HZ: f32 = 220.0;

/// Configuration for the simulated session
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Sample rate of the synthesized audio in Hz
    pub sample_rate: u32,

    /// Number of frequency bands in agent spectrum frames
    pub agent_bands: usize,

    /// Number of frequency bands in microphone spectrum frames
    pub mic_bands: usize,

    /// Time spent in the connecting state
    pub connect_delay: Duration,

    /// Delay between connection and the agent joining
    pub join_delay: Duration,

    /// Time the agent spends initializing before it is ready
    pub init_delay: Duration,

    /// Length of the greeting the agent speaks once ready
    pub greeting_time: Duration,

    /// Time the agent listens before a conversation turn
    pub listen_time: Duration,

    /// Time the agent thinks before answering
    pub think_time: Duration,

    /// Length of a spoken answer
    pub reply_time: Duration,

    /// Length of the confirmation spoken after a voice change
    pub confirm_time: Duration,

    /// Number of answers spoken before the agent hands off and ends the call
    pub reply_budget: u32,

    /// Interval between spectrum frames
    pub frame_interval: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            agent_bands: 5,
            mic_bands: 9,
            connect_delay: Duration::from_millis(600),
            join_delay: Duration::from_millis(400),
            init_delay: Duration::from_millis(800),
            greeting_time: Duration::from_millis(1800),
            listen_time: Duration::from_millis(2500),
            think_time: Duration::from_millis(1500),
            reply_time: Duration::from_millis(3200),
            confirm_time: Duration::from_millis(900),
            reply_budget: 6,
            frame_interval: Duration::from_millis(33),
        }
    }
}

impl SimConfig {
    /// Create a config whose band counts match the panel's visualizers
    pub fn for_panel(panel: &PanelConfig) -> Self {
        Self {
            agent_bands: panel.agent_bands,
            mic_bands: panel.mic_bands,
            ..Self::default()
        }
    }

    /// Set the number of answers before the agent ends the call
    pub fn with_reply_budget(mut self, budget: u32) -> Self {
        self.reply_budget = budget;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.agent_bands == 0 || self.mic_bands == 0 {
            return Err(BanterError::ConfigError(
                "band counts must be greater than zero".to_string(),
            ));
        }
        if self.sample_rate == 0 {
            return Err(BanterError::ConfigError(
                "sample rate must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Handle for talking to the simulated session from the UI
pub struct SimSessionHandle {
    /// Request sender
    request_tx: Sender<SessionRequest>,

    /// Event receiver
    event_rx: Receiver<SessionEvent>,
}

impl SimSessionHandle {
    /// Send a request to the session worker
    pub fn send_request(&self, request: SessionRequest) -> Result<()> {
        self.request_tx
            .send(request)
            .map_err(|e| BanterError::ChannelError(format!("failed to send request: {}", e)))
    }

    /// Try to receive an event from the session worker
    pub fn try_recv_event(&self) -> Option<SessionEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Simulated session worker
pub struct SimSession {
    /// Configuration
    config: SimConfig,

    /// Request receiver
    request_rx: Receiver<SessionRequest>,

    /// Event sender
    event_tx: Sender<SessionEvent>,
}

impl SimSession {
    /// Create a new simulated session with the given configuration
    pub fn new(config: SimConfig) -> Result<(Self, SimSessionHandle)> {
        config.validate()?;

        let (request_tx, request_rx) = bounded(100);
        let (event_tx, event_rx) = bounded(1000);

        let handle = SimSessionHandle {
            request_tx,
            event_rx,
        };

        let session = Self {
            config,
            request_rx,
            event_tx,
        };

        Ok((session, handle))
    }

    /// Start the session worker thread
    ///
    /// The worker runs until the handle is dropped.
    pub fn start(self) -> JoinHandle<()> {
        let config = self.config;
        let request_rx = self.request_rx;
        let event_tx = self.event_tx;

        thread::spawn(move || {
            info!("[SIM] Session worker started");

            let mut script = Script::new(config, event_tx);

            loop {
                let now = Instant::now();

                // Check for requests (non-blocking)
                match request_rx.try_recv() {
                    Ok(request) => script.handle_request(request, now),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        debug!("[SIM] Request channel disconnected");
                        break;
                    }
                }

                script.advance(now);
                script.stream_spectra(now);

                // Small sleep to avoid busy-waiting
                thread::sleep(Duration::from_millis(10));
            }

            info!("[SIM] Session worker stopped");
        })
    }
}

/// What the agent is doing within a speaking phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SpeakKind {
    /// The greeting spoken when the agent becomes ready
    Greeting,

    /// An answer in the conversation loop
    Reply,

    /// The short confirmation spoken after a voice change
    Confirmation,
}

/// Scripted session phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Offline,
    Connecting,
    Joining,
    Initializing,
    Listening,
    Thinking,
    Speaking(SpeakKind),
}

/// The scripted conversation driven by the worker loop
struct Script {
    config: SimConfig,
    events: Sender<SessionEvent>,
    phase: Phase,
    deadline: Option<Instant>,
    next_frame: Option<Instant>,
    online: bool,
    agent_present: bool,
    agent_track: Option<TrackId>,
    mic_track: Option<TrackId>,
    mic_live: bool,
    replies: u32,
    end_call_sent: bool,
    catalog: Vec<Voice>,
    agent_voice: SpeechSynth,
    user_voice: SpeechSynth,
    agent_analyzer: MultibandAnalyzer,
    mic_analyzer: MultibandAnalyzer,
}

impl Script {
    fn new(config: SimConfig, events: Sender<SessionEvent>) -> Self {
        let agent_voice = SpeechSynth::new(config.sample_rate, AGENT_VOICE_HZ);
        let user_voice = SpeechSynth::new(config.sample_rate, USER_VOICE_HZ);
        let agent_analyzer = MultibandAnalyzer::new(config.sample_rate, config.agent_bands);
        let mic_analyzer = MultibandAnalyzer::new(config.sample_rate, config.mic_bands);

        Self {
            config,
            events,
            phase: Phase::Offline,
            deadline: None,
            next_frame: None,
            online: false,
            agent_present: false,
            agent_track: None,
            mic_track: None,
            mic_live: false,
            replies: 0,
            end_call_sent: false,
            catalog: voice_catalog(),
            agent_voice,
            user_voice,
            agent_analyzer,
            mic_analyzer,
        }
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    fn enter(&mut self, phase: Phase, hold: Duration, now: Instant) {
        self.phase = phase;
        self.deadline = Some(now + hold);
    }

    fn handle_request(&mut self, request: SessionRequest, now: Instant) {
        match request {
            SessionRequest::Connect => {
                if self.phase != Phase::Offline {
                    debug!("[SIM] Already connected, ignoring connect");
                    return;
                }
                info!("[SIM] Connecting");
                self.emit(SessionEvent::ConnectionChanged(ConnectionState::Connecting));
                self.enter(Phase::Connecting, self.config.connect_delay, now);
            }
            SessionRequest::Disconnect => {
                if self.phase == Phase::Offline {
                    debug!("[SIM] Not connected, ignoring disconnect");
                    return;
                }
                self.teardown();
            }
            SessionRequest::SetMicrophoneEnabled(enabled) => {
                if !self.online {
                    debug!("[SIM] Microphone request while offline, ignoring");
                    return;
                }
                self.mic_live = enabled;
                if enabled && self.mic_track.is_none() {
                    let track = TrackId::new();
                    self.mic_track = Some(track);
                    info!("[SIM] Microphone track published");
                    self.emit(SessionEvent::MicTrackChanged(Some(track)));
                }
                // Muting keeps the track; the synthesized voice goes quiet
            }
            SessionRequest::SetAttribute { key, value } => {
                if key == VOICE_ATTRIBUTE {
                    self.change_voice(&value, now);
                } else {
                    debug!("[SIM] Ignoring attribute {}", key);
                }
            }
        }
    }

    /// Switch the agent voice and speak a short confirmation
    ///
    /// The confirmation only plays while nobody is speaking, matching how a
    /// live agent would avoid talking over itself.
    fn change_voice(&mut self, id: &str, now: Instant) {
        if !self.catalog.iter().any(|v| v.id == id) {
            warn!("[SIM] Voice {} not found", id);
            return;
        }
        info!("[SIM] Voice changed to {}", id);
        if matches!(self.phase, Phase::Listening | Phase::Thinking) {
            self.emit(SessionEvent::AgentStateChanged(AgentState::Speaking));
            self.enter(
                Phase::Speaking(SpeakKind::Confirmation),
                self.config.confirm_time,
                now,
            );
        }
    }

    /// Run the scripted conversation forward when the current phase expires
    fn advance(&mut self, now: Instant) {
        let Some(deadline) = self.deadline else {
            return;
        };
        if now < deadline {
            return;
        }

        match self.phase {
            Phase::Offline => {}
            Phase::Connecting => {
                info!("[SIM] Connected");
                self.online = true;
                self.emit(SessionEvent::ConnectionChanged(ConnectionState::Connected));
                self.enter(Phase::Joining, self.config.join_delay, now);
            }
            Phase::Joining => {
                info!("[SIM] Agent joined");
                self.agent_present = true;
                self.emit(SessionEvent::AgentJoined);
                self.emit(SessionEvent::AgentStateChanged(AgentState::Initializing));
                self.enter(Phase::Initializing, self.config.init_delay, now);
            }
            Phase::Initializing => {
                let track = TrackId::new();
                self.agent_track = Some(track);
                info!("[SIM] Agent track published, greeting");
                self.emit(SessionEvent::AgentTrackChanged(Some(track)));
                self.announce_voices();
                self.emit(SessionEvent::AgentStateChanged(AgentState::Speaking));
                self.enter(
                    Phase::Speaking(SpeakKind::Greeting),
                    self.config.greeting_time,
                    now,
                );
            }
            Phase::Listening => {
                self.emit(SessionEvent::AgentStateChanged(AgentState::Thinking));
                self.enter(Phase::Thinking, self.config.think_time, now);
            }
            Phase::Thinking => {
                self.emit(SessionEvent::AgentStateChanged(AgentState::Speaking));
                self.enter(Phase::Speaking(SpeakKind::Reply), self.config.reply_time, now);
            }
            Phase::Speaking(kind) => {
                if kind == SpeakKind::Reply {
                    self.replies += 1;
                    if self.replies >= self.config.reply_budget && !self.end_call_sent {
                        info!("[SIM] Handing off to a human agent");
                        self.end_call_sent = true;
                        self.emit(SessionEvent::DataReceived {
                            topic: END_CALL_TOPIC.to_string(),
                            payload: END_CALL_TOPIC.as_bytes().to_vec(),
                        });
                    }
                }
                self.emit(SessionEvent::AgentStateChanged(AgentState::Listening));
                self.enter(Phase::Listening, self.config.listen_time, now);
            }
        }
    }

    /// Publish the voice catalog as a participant attribute
    fn announce_voices(&mut self) {
        let payload = roster_payload(&self.catalog);
        let attributes = HashMap::from([(VOICES_ATTRIBUTE.to_string(), payload)]);
        debug!("[SIM] Announcing {} voices", self.catalog.len());
        self.emit(SessionEvent::AttributesChanged(attributes));
    }

    /// Synthesize one block per active track and emit its spectrum frame
    fn stream_spectra(&mut self, now: Instant) {
        if let Some(next) = self.next_frame {
            if now < next {
                return;
            }
        }
        self.next_frame = Some(now + self.config.frame_interval);

        let samples =
            (self.config.sample_rate as f32 * self.config.frame_interval.as_secs_f32()) as usize;

        if self.agent_track.is_some() {
            let intensity = if matches!(self.phase, Phase::Speaking(_)) {
                0.85
            } else {
                0.0
            };
            let block = self.agent_voice.next_block(samples, intensity);
            self.agent_analyzer.push(&block);
            let frame = self.agent_analyzer.frame();
            self.emit(SessionEvent::AgentSpectrum(frame));
        }

        if self.mic_track.is_some() {
            // The user talks while the agent listens
            let intensity = if self.mic_live && self.phase == Phase::Listening {
                0.6
            } else {
                0.0
            };
            let block = self.user_voice.next_block(samples, intensity);
            self.mic_analyzer.push(&block);
            let frame = self.mic_analyzer.frame();
            self.emit(SessionEvent::MicSpectrum(frame));
        }
    }

    /// Tear the session down and return to the offline state
    fn teardown(&mut self) {
        info!("[SIM] Disconnecting");
        if self.agent_track.take().is_some() {
            self.emit(SessionEvent::AgentTrackChanged(None));
        }
        if self.mic_track.take().is_some() {
            self.emit(SessionEvent::MicTrackChanged(None));
        }
        if self.agent_present {
            self.agent_present = false;
            self.emit(SessionEvent::AgentStateChanged(AgentState::Disconnected));
            self.emit(SessionEvent::AgentLeft);
        }
        self.emit(SessionEvent::ConnectionChanged(ConnectionState::Disconnected));
        self.phase = Phase::Offline;
        self.deadline = None;
        self.next_frame = None;
        self.online = false;
        self.mic_live = false;
        self.replies = 0;
        self.end_call_sent = false;
    }
}

/// Built-in voice catalog announced by the simulated agent
fn voice_catalog() -> Vec<Voice> {
    [
        "Help Desk Woman",
        "Barbershop Man",
        "Friendly Sidekick",
        "Calm Lady",
        "Confident British Man",
        "Movie Man",
    ]
    .iter()
    .map(|name| Voice::new(Uuid::new_v4().to_string(), name.to_string()))
    .collect()
}

/// Serialize a catalog the way the agent announces it
///
/// Only the id and name of each voice are published, sorted by name.
fn roster_payload(catalog: &[Voice]) -> String {
    let mut voices: Vec<&Voice> = catalog.iter().collect();
    voices.sort_by(|a, b| a.name.cmp(&b.name));

    let entries: Vec<serde_json::Value> = voices
        .iter()
        .map(|v| serde_json::json!({ "id": v.id, "name": v.name }))
        .collect();
    serde_json::Value::Array(entries).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> SimConfig {
        SimConfig {
            connect_delay: Duration::from_millis(10),
            join_delay: Duration::from_millis(10),
            init_delay: Duration::from_millis(10),
            greeting_time: Duration::from_millis(20),
            listen_time: Duration::from_millis(40),
            think_time: Duration::from_millis(20),
            reply_time: Duration::from_millis(20),
            confirm_time: Duration::from_millis(20),
            frame_interval: Duration::from_millis(15),
            ..SimConfig::default()
        }
    }

    /// Drain events until the predicate matches or the budget runs out
    fn collect_until(
        handle: &SimSessionHandle,
        budget: Duration,
        mut stop: impl FnMut(&SessionEvent) -> bool,
    ) -> Vec<SessionEvent> {
        let deadline = Instant::now() + budget;
        let mut events = Vec::new();
        while Instant::now() < deadline {
            if let Ok(event) = handle.event_rx.recv_timeout(Duration::from_millis(25)) {
                let done = stop(&event);
                events.push(event);
                if done {
                    return events;
                }
            }
        }
        events
    }

    fn position_of(events: &[SessionEvent], pred: impl Fn(&SessionEvent) -> bool) -> Option<usize> {
        events.iter().position(pred)
    }

    #[test]
    fn test_session_creation() {
        let result = SimSession::new(SimConfig::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            agent_bands: 0,
            ..SimConfig::default()
        };
        assert!(SimSession::new(config).is_err());
    }

    #[test]
    fn test_config_follows_panel_bands() {
        let panel = PanelConfig::default().with_agent_bands(7).with_mic_bands(11);
        let config = SimConfig::for_panel(&panel);
        assert_eq!(config.agent_bands, 7);
        assert_eq!(config.mic_bands, 11);
    }

    #[test]
    fn test_roster_payload_sorted_by_name() {
        let catalog = vec![
            Voice::new("v3", "Zelda"),
            Voice::new("v1", "Anna"),
            Voice::new("v2", "Mike"),
        ];
        let payload = roster_payload(&catalog);
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&payload).unwrap();

        let names: Vec<&str> = parsed
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Anna", "Mike", "Zelda"]);

        // Only id and name are announced
        for entry in &parsed {
            assert_eq!(entry.as_object().unwrap().len(), 2);
        }
    }

    #[test]
    fn test_roster_payload_parses_as_voices() {
        let payload = roster_payload(&voice_catalog());
        let voices: Vec<Voice> = serde_json::from_str(&payload).unwrap();
        assert_eq!(voices.len(), 6);
        assert!(voices.iter().all(|v| !v.id.is_empty()));
    }

    #[test]
    fn test_connect_script_reaches_conversation() {
        let (session, handle) = SimSession::new(fast_config()).unwrap();
        let worker = session.start();

        handle.send_request(SessionRequest::Connect).unwrap();
        let events = collect_until(&handle, Duration::from_secs(3), |e| {
            matches!(e, SessionEvent::AgentStateChanged(AgentState::Listening))
        });

        let connecting = position_of(&events, |e| {
            matches!(e, SessionEvent::ConnectionChanged(ConnectionState::Connecting))
        });
        let connected = position_of(&events, |e| {
            matches!(e, SessionEvent::ConnectionChanged(ConnectionState::Connected))
        });
        let joined = position_of(&events, |e| matches!(e, SessionEvent::AgentJoined));
        let track = position_of(&events, |e| {
            matches!(e, SessionEvent::AgentTrackChanged(Some(_)))
        });
        let roster = position_of(&events, |e| {
            matches!(e, SessionEvent::AttributesChanged(attrs) if attrs.contains_key(VOICES_ATTRIBUTE))
        });
        let listening = position_of(&events, |e| {
            matches!(e, SessionEvent::AgentStateChanged(AgentState::Listening))
        });

        assert!(connecting.is_some());
        assert!(connected.is_some());
        assert!(joined.is_some());
        assert!(track.is_some());
        assert!(roster.is_some());
        assert!(listening.is_some());
        assert!(connecting < connected);
        assert!(connected < joined);
        assert!(joined < track);
        assert!(track < listening);

        drop(handle);
        worker.join().unwrap();
    }

    #[test]
    fn test_disconnect_tears_down() {
        let (session, handle) = SimSession::new(fast_config()).unwrap();
        let worker = session.start();

        handle.send_request(SessionRequest::Connect).unwrap();
        collect_until(&handle, Duration::from_secs(3), |e| {
            matches!(e, SessionEvent::AgentStateChanged(AgentState::Listening))
        });

        handle.send_request(SessionRequest::Disconnect).unwrap();
        let events = collect_until(&handle, Duration::from_secs(2), |e| {
            matches!(e, SessionEvent::ConnectionChanged(ConnectionState::Disconnected))
        });

        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::AgentLeft)));
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::AgentTrackChanged(None))));
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::ConnectionChanged(ConnectionState::Disconnected)
        )));

        drop(handle);
        worker.join().unwrap();
    }

    #[test]
    fn test_microphone_track_published_once() {
        let (session, handle) = SimSession::new(fast_config()).unwrap();
        let worker = session.start();

        handle.send_request(SessionRequest::Connect).unwrap();
        collect_until(&handle, Duration::from_secs(3), |e| {
            matches!(e, SessionEvent::ConnectionChanged(ConnectionState::Connected))
        });

        handle
            .send_request(SessionRequest::SetMicrophoneEnabled(true))
            .unwrap();
        handle
            .send_request(SessionRequest::SetMicrophoneEnabled(true))
            .unwrap();
        let events = collect_until(&handle, Duration::from_millis(400), |_| false);

        let published = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::MicTrackChanged(Some(_))))
            .count();
        assert_eq!(published, 1);

        drop(handle);
        worker.join().unwrap();
    }

    #[test]
    fn test_agent_spectrum_streams_once_ready() {
        let (session, handle) = SimSession::new(fast_config()).unwrap();
        let worker = session.start();

        handle.send_request(SessionRequest::Connect).unwrap();
        let events = collect_until(&handle, Duration::from_secs(3), |e| {
            matches!(e, SessionEvent::AgentSpectrum(_))
        });

        let bands = events.iter().find_map(|e| match e {
            SessionEvent::AgentSpectrum(bands) => Some(bands.len()),
            _ => None,
        });
        assert_eq!(bands, Some(SimConfig::default().agent_bands));

        drop(handle);
        worker.join().unwrap();
    }

    #[test]
    fn test_voice_change_speaks_confirmation() {
        let config = SimConfig {
            // Park the script in the listening phase so the only speaking
            // transition after the greeting is the confirmation
            listen_time: Duration::from_secs(30),
            ..fast_config()
        };
        let (session, handle) = SimSession::new(config).unwrap();
        let worker = session.start();

        handle.send_request(SessionRequest::Connect).unwrap();
        let events = collect_until(&handle, Duration::from_secs(3), |e| {
            matches!(e, SessionEvent::AgentStateChanged(AgentState::Listening))
        });

        let payload = events.iter().find_map(|e| match e {
            SessionEvent::AttributesChanged(attrs) => attrs.get(VOICES_ATTRIBUTE).cloned(),
            _ => None,
        });
        let voices: Vec<Voice> = serde_json::from_str(&payload.unwrap()).unwrap();

        handle
            .send_request(SessionRequest::SetAttribute {
                key: VOICE_ATTRIBUTE.to_string(),
                value: voices[0].id.clone(),
            })
            .unwrap();
        let events = collect_until(&handle, Duration::from_secs(1), |e| {
            matches!(e, SessionEvent::AgentStateChanged(AgentState::Speaking))
        });
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::AgentStateChanged(AgentState::Speaking)
        )));

        drop(handle);
        worker.join().unwrap();
    }

    #[test]
    fn test_unknown_voice_is_ignored() {
        let config = SimConfig {
            listen_time: Duration::from_secs(30),
            ..fast_config()
        };
        let (session, handle) = SimSession::new(config).unwrap();
        let worker = session.start();

        handle.send_request(SessionRequest::Connect).unwrap();
        collect_until(&handle, Duration::from_secs(3), |e| {
            matches!(e, SessionEvent::AgentStateChanged(AgentState::Listening))
        });

        handle
            .send_request(SessionRequest::SetAttribute {
                key: VOICE_ATTRIBUTE.to_string(),
                value: "no-such-voice".to_string(),
            })
            .unwrap();
        let events = collect_until(&handle, Duration::from_millis(300), |_| false);
        assert!(!events.iter().any(|e| matches!(
            e,
            SessionEvent::AgentStateChanged(AgentState::Speaking)
        )));

        drop(handle);
        worker.join().unwrap();
    }
}
