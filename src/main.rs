mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::EnergyDashApp;
use clap::Parser;
use eframe::egui;

use config::Cli;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::new(cli.load_options());
    // A dataset named on the command line must load, or startup aborts.
    if let Some(path) = &cli.data {
        state.load_path(path).context("startup dataset")?;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Energy Efficiency Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(EnergyDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
