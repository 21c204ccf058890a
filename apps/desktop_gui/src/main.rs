use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::app::{PatientDeskApp, StartupConfig, SETTINGS_STORAGE_KEY};

#[derive(Debug, Parser)]
#[command(name = "patient-desk", about = "Desktop client for the remote patient store")]
struct Args {
    /// Base URL of the remote patient store. Falls back to
    /// PATIENT_DESK_SERVER_URL, then to the built-in default.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let server_url = args
        .server_url
        .or_else(|| std::env::var("PATIENT_DESK_SERVER_URL").ok());

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let startup = StartupConfig { server_url };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Patient Desk")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([860.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Patient Desk",
        options,
        Box::new(move |cc| {
            let persisted_settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str(&text).ok())
            });
            Ok(Box::new(PatientDeskApp::bootstrap(
                cmd_tx,
                ui_rx,
                startup,
                persisted_settings,
            )))
        }),
    )
}
