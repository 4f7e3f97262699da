//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::ContactApi;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Runs network calls on a dedicated tokio runtime. Each command gets its own
/// task, so a slow load never blocks a later refresh; ordering is restored on
/// the UI side through load tickets.
pub fn launch(api: Arc<dyn ContactApi>, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        tracing::debug!("backend worker ready");
        while let Ok(cmd) = cmd_rx.recv() {
            let api = Arc::clone(&api);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                let event = match cmd {
                    BackendCommand::LoadContacts { ticket } => {
                        tracing::debug!(seq = ticket.seq(), "loading contacts");
                        UiEvent::ContactsLoaded {
                            ticket,
                            result: api.fetch_contacts().await,
                        }
                    }
                    BackendCommand::AddContact { contact } => {
                        UiEvent::ContactAdded(api.add_contact(&contact).await)
                    }
                };
                if ui_tx.send(event).is_err() {
                    tracing::debug!("ui event receiver dropped");
                }
            });
        }
        tracing::info!("backend command channel closed; worker exiting");
    });
}
