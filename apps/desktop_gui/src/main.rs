mod backend_bridge;
mod controller;
mod settings;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::CaseRecord;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::settings::{load_settings, Args};
use crate::ui::WorkbenchApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = load_settings(&args)?;
    tracing::info!(endpoint = %settings.endpoint_url, "starting workbench");

    let record = if args.example {
        CaseRecord::school_example()
    } else {
        CaseRecord::default()
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(cmd_rx, ui_tx, settings.endpoint_url.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TCCR Workbench")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TCCR Workbench",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(WorkbenchApp::new(
                record,
                cmd_tx,
                ui_rx,
                settings.endpoint_url,
            )))
        }),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
