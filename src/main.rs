use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use syk_dashboard::app::DashboardApp;
use syk_dashboard::config::DashboardConfig;
use syk_dashboard::data;
use syk_dashboard::state::AppState;

fn main() -> ExitCode {
    // Third-party crates only report errors unless RUST_LOG says otherwise.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("error,syk_dashboard=info"),
    )
    .init();

    match run(DashboardConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: DashboardConfig) -> Result<()> {
    let source = config.data_path.clone();
    let dataset = data::loader::load_file(&source)
        .with_context(|| format!("loading employee data from {}", source.display()))?;
    log::info!(
        "Loaded {} employees from {} (performance bounds {:?})",
        dataset.len(),
        source.display(),
        dataset.performance_bounds
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };
    let state = AppState::new(dataset, source, config);

    eframe::run_native(
        "Employee Performance – Socialize Your Knowledge",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the png logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
