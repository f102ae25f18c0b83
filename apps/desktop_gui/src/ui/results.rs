//! Cycle summary and hypothesis panels.

use arboard::Clipboard;
use eframe::egui;
use sense_map::project::{CycleSummary, HypothesisSection};

pub fn show_summary(ui: &mut egui::Ui, summary: &CycleSummary) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading(summary.title.as_str());
        if let Some(note) = summary.baseline_note {
            ui.colored_label(ui.visuals().weak_text_color(), note);
        }
        if let Some(previous) = &summary.previous_description {
            ui.label(egui::RichText::new("Interventions from the previous stage").strong());
            ui.label(previous.as_str());
        }
    });
}

/// Renders both hypotheses verbatim. Returns a status line when a copy button was used.
pub fn show_hypotheses(ui: &mut egui::Ui, section: &HypothesisSection) -> Option<String> {
    let mut status = None;
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Generated hypotheses");
        for (title, text) in [
            ("Change hypothesis (H1)", &section.change_hypothesis),
            ("Null hypothesis (H0)", &section.null_hypothesis),
        ] {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(title).strong());
                if ui.small_button("Copy").clicked() {
                    status = Some(match write_clipboard_text(text) {
                        Ok(()) => format!("{title} copied to clipboard"),
                        Err(err) => format!("Could not copy {title}: {err}"),
                    });
                }
            });
            ui.label(text.as_str());
        }
    });
    status
}

fn write_clipboard_text(text: &str) -> Result<(), String> {
    let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
    clipboard
        .set_text(text.to_string())
        .map_err(|err| err.to_string())
}
