use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, HttpContactApi};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::DirectoryApp;

#[derive(Parser, Debug)]
#[command(name = "contacts_gui", about = "Contact directory window")]
struct Args {
    /// TOML settings file; defaults to ./contacts.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured endpoint.
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    settings.validate().context("invalid contacts settings")?;
    let grid = settings.grid();
    let api = HttpContactApi::from_settings(&settings)?;
    tracing::info!(endpoint = %api.endpoint(), rows = grid.rows(), cols = grid.cols(), "starting contact directory");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(Arc::new(api), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Contacts")
            .with_inner_size([1040.0, 640.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Contacts",
        options,
        Box::new(move |_cc| Ok(Box::new(DirectoryApp::new(grid, cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("failed to run contacts window: {err}"))
}
