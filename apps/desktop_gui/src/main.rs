mod backend_bridge;
mod controller;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use client_core::{load_api_config, EventsClient};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::EventsApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop client for managing organization events")]
struct Args {
    /// Backend base URL, e.g. http://localhost:5000/api
    #[arg(long)]
    api_base: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();
    let config = load_api_config(args.api_base)?;
    tracing::info!(base_url = config.base_url(), "starting events organizer");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(EventsClient::new(config.clone()), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Events Organizer")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([820.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Events Organizer",
        options,
        Box::new(|_cc| Ok(Box::new(EventsApp::new(cmd_tx, ui_rx, config)))),
    )
    .map_err(|err| anyhow!("desktop ui exited with error: {err}"))
}
