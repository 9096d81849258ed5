//! Voice roster panel component
//!
//! Lists the voices announced by the agent and highlights the current
//! selection. Selection is reported back to the caller rather than applied
//! here, so the panel state stays the single writer.

use crate::session::Voice;
use crate::ui::theme::Theme;
use egui::{self, RichText, ScrollArea};

/// Voice list component
pub struct VoicePanel<'a> {
    voices: &'a [Voice],
    selected: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> VoicePanel<'a> {
    pub fn new(voices: &'a [Voice], selected: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            voices,
            selected,
            theme,
        }
    }

    /// Show the voice list, returning the id of a newly picked voice
    pub fn show(self, ui: &mut egui::Ui) -> Option<String> {
        ui.label(
            RichText::new("Voices")
                .strong()
                .color(self.theme.text_primary),
        );
        ui.separator();

        if self.voices.is_empty() {
            ui.label(
                RichText::new("No voices announced yet")
                    .size(12.0)
                    .color(self.theme.text_muted)
                    .italics(),
            );
            return None;
        }

        let mut picked = None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for voice in self.voices {
                    let is_selected = self.selected == Some(voice.id.as_str());
                    let response = ui
                        .selectable_label(is_selected, &voice.name)
                        .on_hover_text(&voice.id);

                    if response.clicked() && !is_selected {
                        picked = Some(voice.id.clone());
                    }
                }
            });

        picked
    }
}
