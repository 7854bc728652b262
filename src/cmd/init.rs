use crate::data::AppSettings;
use anyhow::Result;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = crate::data::persistence::get_config_dir()?;
    let path = run_in_dir(&dir)?;
    println!("Config written to {}", path.display());
    Ok(())
}

/// Writes config.yaml into `dir`, keeping any settings already there.
pub(crate) fn run_in_dir(dir: &Path) -> Result<std::path::PathBuf> {
    let settings = AppSettings::load_from(dir)?;
    settings.save_to(dir)?;
    tracing::info!(dir = %dir.display(), "config initialized");
    Ok(dir.join("config.yaml"))
}
