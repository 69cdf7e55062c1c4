//! Built-in default values.

use std::path::PathBuf;
use std::time::Duration;

/// Default polling interval in seconds (5 minutes).
pub const INTERVAL_SECS: u64 = 300;

/// Request timeout for both page fetches and Telegram calls.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Application directory under the platform config directory.
pub const SETTINGS_DIR: &str = "pagewatch";

/// Settings file name.
pub const SETTINGS_FILE: &str = "config.json";

/// Returns the default settings file location, if the platform has a
/// config directory (`~/.config/pagewatch/config.json` on Linux).
#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}
