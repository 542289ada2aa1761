use anyhow::Result;
use clap::Parser;
use cowherd_common::observability::{LogConfig, init_logging};
use cowherd_config::{Settings, SettingsLoader, default_settings_path};
use cowherd_drivers::cowherd_browser::driver::CowherdDriver;
use cowherd_drivers::cowherd_browser::pacing::Pacing;

mod cli;
mod commands;
mod country_map;
mod outputs;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings first (env wins), then logging.
    let mut loader = SettingsLoader::new();
    if let Some(path) = default_settings_path() {
        loader = loader.with_optional_file(path);
    }
    let settings: Settings = loader.load()?;

    let log_path = init_logging(LogConfig {
        emit_stderr: cli.verbose,
        ..LogConfig::default()
    })?;
    tracing::info!(log = %log_path.display(), "cowherd starting");

    let pacing = Pacing::new(
        settings.webdriver.settle_min_ms,
        settings.webdriver.settle_max_ms,
    );
    let mut driver = CowherdDriver::new(
        &settings.webdriver.endpoint,
        settings.webdriver.headless,
        pacing,
    )
    .await?;

    let result = match cli.command {
        Command::Links(args) => commands::links::run(&mut driver, args, &settings).await,
        Command::Text(args) => commands::text::run(&mut driver, args, &settings).await,
        Command::Doc(args) => commands::doc::run(&mut driver, args, &settings).await,
    };

    // Always attempt to close the session, even when the command failed.
    let _ = driver.close().await;
    result
}
