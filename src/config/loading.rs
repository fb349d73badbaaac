//! Settings file discovery and loading.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::Settings;
use super::validation::validate_settings;
use crate::constants::DEFAULT_SUN_PATH_INTERVAL;
use crate::geo::GeoCoordinate;

const CONFIG_DIR_NAME: &str = "sunwise";
const CONFIG_FILE_NAME: &str = "sunwise.toml";

/// `$XDG_CONFIG_HOME/sunwise/sunwise.toml`, or the platform equivalent.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load settings from the default location.
///
/// A missing file gives [`Settings::default`]; an unreadable or invalid one is
/// an error.
pub fn load() -> Result<Settings> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        log_debug!(
            "No settings file at {}, using defaults",
            config_path.display()
        );
        return Ok(Settings::default());
    }

    load_from_path(&config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))
}

/// Load and validate settings from a specific file.
///
/// Unlike [`load`], the file must exist.
pub fn load_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

    validate_settings(&settings)?;

    Ok(settings)
}

/// Write a commented settings file, creating parent directories as needed.
///
/// With a coordinate the location keys are filled in; without one they are
/// left commented out.
pub fn write_default_settings(path: &Path, coordinate: Option<&GeoCoordinate>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let location = match coordinate {
        Some(coordinate) => format!(
            "latitude = {:.4}\nlongitude = {:.4}\n",
            coordinate.latitude(),
            coordinate.longitude()
        ),
        None => "#latitude = 51.5074\n#longitude = -0.1278\n".to_string(),
    };

    let content = format!(
        "# sunwise settings\n\
         \n\
         # Default location in decimal degrees\n\
         {location}\
         \n\
         # Minutes between sun path samples (1-1440)\n\
         sun_path_interval = {DEFAULT_SUN_PATH_INTERVAL}\n\
         \n\
         # Zone for coordinates outside every built-in region (defaults to the system zone)\n\
         #fallback_timezone = \"UTC\"\n\
         \n\
         logging = true\n\
         \n\
         # Show debug lines such as timezone fallbacks\n\
         debug = false\n"
    );

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    log_info!("Wrote default settings to {}", path.display());
    Ok(())
}
