//! Backend worker: one thread hosting the tokio runtime, one task per generation request.

use std::{sync::Arc, thread};

use client_core::{HttpGenerationClient, HypothesisGenerator};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, endpoint_url: String) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::backend_startup(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                ))));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let generator: Arc<dyn HypothesisGenerator> =
            Arc::new(HttpGenerationClient::new(endpoint_url));
        runtime.block_on(async move {
            tracing::info!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Generate { ticket, snapshot } => {
                        // No queueing: concurrent requests race and the UI keeps the last completion.
                        let generator = Arc::clone(&generator);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let outcome = generator.generate(&snapshot).await;
                            if ui_tx
                                .send(UiEvent::GenerationFinished { ticket, outcome })
                                .is_err()
                            {
                                tracing::warn!(ticket = ticket.0, "ui event queue closed");
                            }
                        });
                    }
                }
            }
            tracing::info!("backend command queue closed; worker exiting");
        });
    });
}
