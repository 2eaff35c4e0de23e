use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::view::route::DEFAULT_ROUTE_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub view: ViewConfig,
}

/// Tunables for the preview/code/data view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Viewports narrower than this use the mobile layout.
    pub mobile_breakpoint_px: u32,
    /// Debounce before an iframe "ready" message moves the router to the preview.
    pub auto_navigate_delay_ms: u64,
    pub route_prefix: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: 768,
            auto_navigate_delay_ms: 500,
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
        }
    }
}

impl ViewConfig {
    pub fn auto_navigate_delay(&self) -> Duration {
        Duration::from_millis(self.auto_navigate_delay_ms)
    }
}

pub fn load_config_from(path: &Path) -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|err| {
        log::warn!("Ignoring malformed config at {}: {err}", path.display());
        AppConfig::default()
    })
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config).unwrap_or_default();
    std::fs::write(path, contents)
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("VIBECODE_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

fn app_data_dir() -> PathBuf {
    let data_home = std::env::var_os("VIBECODE_DATA_HOME").map(PathBuf::from);
    resolve_data_dir(data_home, platform_data_root())
}

/// Explicit data home first, then `vibecode` under the platform root, then the working directory.
fn resolve_data_dir(data_home: Option<PathBuf>, platform_root: Option<PathBuf>) -> PathBuf {
    data_home
        .or_else(|| platform_root.map(|root| root.join("vibecode")))
        .unwrap_or_else(|| PathBuf::from(".vibecode"))
}

fn platform_data_root() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        home::home_dir().map(|home| home.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| home::home_dir().map(|home| home.join(".local").join("share")))
    }
}
