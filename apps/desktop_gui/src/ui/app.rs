use client_core::{CaseSession, GenerationTicket};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{CaseRecord, GenerationResult},
    error::GenerationError,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::{form, map_view, results};

pub struct WorkbenchApp {
    session: CaseSession,
    hints: CaseRecord,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    endpoint_url: String,
    banner: Option<UiError>,
    status: String,
}

impl WorkbenchApp {
    pub fn new(
        record: CaseRecord,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        endpoint_url: String,
    ) -> Self {
        Self {
            session: CaseSession::new(record),
            hints: CaseRecord::school_example(),
            cmd_tx,
            ui_rx,
            endpoint_url,
            banner: None,
            status: "Ready".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::GenerationFinished { ticket, outcome } => {
                    self.record_outcome(ticket, outcome);
                }
                UiEvent::Error(err) => {
                    self.status = err.message().to_string();
                    self.banner = Some(err);
                }
            }
        }
    }

    fn record_outcome(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<GenerationResult, GenerationError>,
    ) {
        match &outcome {
            Ok(_) => {
                self.banner = None;
                self.status = "Hypotheses generated".to_string();
            }
            Err(err) => {
                let ui_err = UiError::from_generation(err);
                self.status = format!("{} error", ui_err.category().label());
                self.banner = Some(ui_err);
            }
        }
        self.session.finish_generation(ticket, outcome);
    }

    fn request_generation(&mut self) {
        let (ticket, snapshot) = self.session.begin_generation();
        self.banner = None;
        self.status = "Generating hypotheses...".to_string();
        if let Err((_cmd, status)) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::Generate { ticket, snapshot })
        {
            self.session.abandon_generation(ticket);
            self.banner = Some(UiError::command_queue(status.clone()));
            self.status = status;
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("app_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("TCCR Workbench");
                ui.separator();
                ui.label("Change hypotheses and Sense Circulation Map");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.colored_label(ui.visuals().weak_text_color(), self.endpoint_url.as_str());
                });
            });
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.session.is_generating() {
                    ui.spinner();
                }
                ui.label(self.status.as_str());
            });
        });
    }

    fn show_form_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("case_form_panel")
            .resizable(true)
            .default_width(460.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("case_form_scroll")
                    .show(ui, |ui| {
                        let edits = form::show_case_form(ui, self.session.store(), &self.hints);
                        for edit in edits {
                            self.session.apply(edit);
                        }

                        ui.add_space(12.0);
                        ui.horizontal(|ui| {
                            let label = if self.session.is_generating() {
                                "Generating..."
                            } else {
                                "Generate hypotheses"
                            };
                            if ui.button(label).clicked() {
                                self.request_generation();
                            }
                            if self.session.is_generating() {
                                ui.spinner();
                            }
                        });
                        ui.add_space(12.0);
                    });
            });
    }

    fn show_results_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("results_scroll")
                .show(ui, |ui| {
                    ui.heading("2. Results");
                    let record = self.session.record();
                    let result = self.session.result();
                    let tree = sense_map::project(record, result);
                    let map_visible = sense_map::map_is_visible(record, result);
                    let has_outcome = result.is_some()
                        || self.session.is_generating()
                        || self.session.last_error().is_some();
                    if has_outcome {
                        results::show_summary(ui, &tree.summary);
                    }

                    if let Some(banner) = &self.banner {
                        ui.add_space(6.0);
                        ui.colored_label(
                            ui.visuals().error_fg_color,
                            format!("{} error: {}", banner.category().label(), banner.message()),
                        );
                        if banner.is_retryable() {
                            ui.label("Adjust the case data if needed and generate again.");
                        }
                    }

                    if let Some(section) = &tree.hypotheses {
                        ui.add_space(6.0);
                        if let Some(status) = results::show_hypotheses(ui, section) {
                            self.status = status;
                        }
                    } else if !has_outcome {
                        ui.colored_label(
                            ui.visuals().weak_text_color(),
                            "Fill in the case and generate hypotheses to see the results here.",
                        );
                    }

                    if map_visible {
                        ui.add_space(12.0);
                        map_view::show_sense_map(ui, &tree.map);
                    }
                });
        });
    }
}

impl eframe::App for WorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_form_panel(ctx);
        self.show_results_panel(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
