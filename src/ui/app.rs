//! Main application struct and eframe integration
//!
//! This module contains the main BanterApp that implements eframe::App.

use crate::config::PanelConfig;
use crate::session::{SimConfig, SimSession, SimSessionHandle};
use crate::state::PanelState;
use crate::ui::components::{DebugPanel, MicControl, SpectrumBars, VoicePanel};
use crate::ui::theme::Theme;
use crate::Result;
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Main Banter application
pub struct BanterApp {
    /// Panel state
    state: PanelState,
    /// Visual theme
    theme: Theme,
    /// Channel handle into the session worker
    session: SimSessionHandle,
    /// Session worker thread, joined implicitly on process exit
    _worker: JoinHandle<()>,
    /// Last frame time for FPS calculation
    last_frame_time: Instant,
    /// Smoothed frames per second
    fps: f32,
    /// Whether the debug panel is open
    show_debug_panel: bool,
    /// Whether the app has been initialized
    initialized: bool,
}

impl BanterApp {
    /// Create a new Banter application
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let theme = Theme::light();
        theme.apply(&cc.egui_ctx);

        let config = PanelConfig::default();
        let (session, handle) = SimSession::new(SimConfig::for_panel(&config))?;
        let worker = session.start();

        Ok(Self {
            state: PanelState::new(config),
            theme,
            session: handle,
            _worker: worker,
            last_frame_time: Instant::now(),
            fps: 0.0,
            show_debug_panel: false,
            initialized: false,
        })
    }

    /// Initialize on first frame
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        debug!("[UI] Panel initialized");
        self.initialized = true;
    }

    /// Drain session events into the panel state
    fn poll_session(&mut self) {
        while let Some(event) = self.session.try_recv_event() {
            self.state.apply(event);
        }
    }

    /// Forward queued panel requests to the session worker
    fn flush_requests(&mut self) {
        for request in self.state.drain_requests() {
            if let Err(e) = self.session.send_request(request) {
                warn!("[UI] Dropping request: {}", e);
            }
        }
    }

    /// Show the top header bar
    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    // App title
                    ui.label(
                        RichText::new("Banter")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.label(
                        RichText::new("Session Panel")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        // Connect / disconnect
                        let connecting = self.state.connection().is_connecting();
                        let connected = self.state.connection().is_connected();
                        let label = if connecting {
                            "Connecting…"
                        } else if connected {
                            "Disconnect"
                        } else {
                            "Connect"
                        };
                        let fill = if connected {
                            self.theme.danger
                        } else {
                            self.theme.accent
                        };
                        let button =
                            egui::Button::new(RichText::new(label).color(egui::Color32::WHITE))
                                .fill(fill)
                                .rounding(self.theme.button_rounding);

                        if ui.add_enabled(!connecting, button).clicked() {
                            self.state.request_connection_toggle();
                        }

                        // Debug toggle
                        if ui.button("🔍").on_hover_text("Toggle Debug Panel").clicked() {
                            self.show_debug_panel = !self.show_debug_panel;
                        }

                        // Voice list toggle
                        if ui.button("Voices").on_hover_text("Toggle Voice List").clicked() {
                            self.state.toggle_voice_panel();
                        }
                    });
                });
            });
    }

    /// Show the voice roster on the side
    fn show_voice_list(&mut self, ctx: &egui::Context) {
        if !self.state.show_voice_panel() {
            return;
        }

        let picked = SidePanel::right("voice_panel")
            .resizable(false)
            .default_width(220.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                VoicePanel::new(
                    self.state.voices(),
                    self.state.selected_voice_id(),
                    &self.theme,
                )
                .show(ui)
            })
            .inner;

        if let Some(id) = picked {
            self.state.select_voice(id);
        }
    }

    /// Show the debug panel on the side
    fn show_debug_panel(&mut self, ctx: &egui::Context) {
        if !self.show_debug_panel {
            return;
        }

        SidePanel::right("debug_panel")
            .resizable(true)
            .default_width(300.0)
            .min_width(250.0)
            .max_width(500.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                DebugPanel::new(&self.state, &self.theme)
                    .fps(self.fps)
                    .show(ui);
            });
    }

    /// Show the bottom microphone controls while a session is up
    fn show_controls(&mut self, ctx: &egui::Context) {
        if !self.state.connection().is_connected() {
            return;
        }

        TopBottomPanel::bottom("controls")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let mic = MicControl::new(
                        self.state.is_mic_enabled(),
                        self.state.mic_magnitudes(),
                        &self.theme,
                    )
                    .show(ui);
                    if mic.clicked() {
                        self.state.toggle_microphone();
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(self.state.agent_state().to_string())
                                .size(12.0)
                                .family(egui::FontFamily::Monospace)
                                .color(self.theme.text_muted),
                        );
                    });
                });
            });
    }

    /// Show the main content area (agent visualizer and start affordance)
    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                let bars = self.state.bars();
                let geometry = *self.state.config().geometry_for(self.state.is_compact());

                let top_pad = ((ui.available_height() - geometry.max_height) / 2.0).max(0.0);
                ui.add_space(top_pad);
                SpectrumBars::new(&bars, &self.theme)
                    .geometry(&geometry)
                    .show(ui);

                ui.add_space(self.theme.spacing_lg);
                ui.vertical_centered(|ui| {
                    if self.state.is_loading() {
                        ui.add(egui::Spinner::new().size(22.0).color(self.theme.accent));
                        ui.label(
                            RichText::new("Connecting to your assistant")
                                .size(12.0)
                                .color(self.theme.text_muted),
                        );
                    } else if self.state.connection().is_disconnected() {
                        let button = egui::Button::new(
                            RichText::new("Start a conversation")
                                .size(16.0)
                                .color(egui::Color32::WHITE),
                        )
                        .fill(self.theme.accent)
                        .rounding(self.theme.button_rounding)
                        .min_size(egui::vec2(220.0, 40.0));

                        if ui.add(button).clicked() {
                            self.state.request_connection_toggle();
                        }
                    }
                });
            });
    }
}

impl eframe::App for BanterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Smooth FPS over recent frames
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        if delta > 0.0 {
            self.fps = self.fps * 0.9 + (1.0 / delta) * 0.1;
        }

        // Initialize on first frame
        self.initialize();

        // Pump session events into the panel
        self.poll_session();

        self.state.set_viewport_width(ctx.screen_rect().width());
        self.state.tick(Instant::now());

        // Render UI
        self.show_header(ctx);
        self.show_debug_panel(ctx);
        self.show_voice_list(ctx);
        self.show_controls(ctx);
        self.show_content(ctx);

        self.flush_requests();

        // Animations repaint every frame; otherwise poll the session lazily
        if self.state.is_animating() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        debug!("[UI] Panel shutting down");
    }
}
