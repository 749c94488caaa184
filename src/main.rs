use sizeup::{init_logging, SessionController, SettingsManager, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::info;

/// Environment variable overriding the config file location
const CONFIG_ENV: &str = "SIZEUP_CONFIG";

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("SizeUp {} (built {})", VERSION, BUILD_DATE);

    let settings = match std::env::var_os(CONFIG_ENV) {
        Some(path) => SettingsManager::with_path(PathBuf::from(path)),
        None => SettingsManager::load()?,
    };
    info!("Using config {}", settings.path().display());

    let session = SessionController::from_config(settings.config());
    info!("Exports go to {}", session.export_path().display());
    let frame = session.compose()?;
    println!("{}", frame.to_json()?);

    Ok(())
}
