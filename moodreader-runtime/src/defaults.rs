use moodreader_core::config::AppConfig;
use std::path::PathBuf;

pub const APP_DIR_NAME: &str = "moodreader";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub fn default_app_config() -> AppConfig {
    AppConfig::default()
}

/// `<config dir>/moodreader/config.json`, or `None` on platforms without a
/// per-user config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
