mod app;
mod color;
mod state;
mod ui;

use anyhow::anyhow;
use app::DashboardApp;
use eframe::egui;
use shopsy_dashboard::auth::CredentialTable;
use shopsy_dashboard::config::Config;

fn main() -> anyhow::Result<()> {
    let path = Config::path();
    let config = if path.exists() {
        Some(Config::load(&path)?)
    } else {
        None
    };
    let found = config.is_some();
    let config = config.unwrap_or_default();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.general.log_level.as_str()),
    )
    .init();

    if !found {
        log::warn!(
            "No config at {}; starting without users, nobody can log in",
            path.display()
        );
    }
    let credentials = CredentialTable::from_entries(&config.auth.users);
    log::info!("Loaded {} dashboard user(s)", credentials.len());

    let title = config.general.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.general.title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(title, Box::new(credentials))))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
