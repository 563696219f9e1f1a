use std::path::PathBuf;

use anyhow::Context;
use bridgecam::{init_logging, replay, Config, SessionScript, BUILD_DATE, VERSION};
use clap::Parser;

/// Replays a recorded bridge placement session and prints the resulting cuts
/// as JSON.
#[derive(Parser, Debug)]
#[command(name = "bridgecam", version, about)]
struct Cli {
    /// Session script (JSON) with toolpath items and input events
    session: PathBuf,

    /// Config file (.toml or .json); defaults to the user config directory
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    tracing::debug!("bridgecam {} ({})", VERSION, BUILD_DATE);

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_default_config()?,
    };

    let script = SessionScript::load(&cli.session)?;
    tracing::info!(
        "Replaying {} events over {} items",
        script.events.len(),
        script.items.len()
    );

    let outcome = replay(&script, &config)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Config from the user's config directory, or defaults when there is none.
fn load_default_config() -> anyhow::Result<Config> {
    match bridgecam_settings::default_config_path() {
        Ok(path) if path.exists() => Config::load_from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        _ => Ok(Config::default()),
    }
}
