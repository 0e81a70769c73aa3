//! Configuration file loading

use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{AppConfig, ValidationError};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "JUKEBOX_CONFIG";

/// Config file used when [`CONFIG_ENV`] is unset
pub const DEFAULT_CONFIG_PATH: &str = "jukebox.toml";

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File exists but could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// File is not valid TOML or has unexpected keys
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// File parsed but holds values that cannot be used
    #[error("invalid configuration in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// Path from the environment, or the default
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load configuration from `path`
///
/// A missing file is not an error; the defaults are used instead.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    info!("Loading configuration from {}", path.display());

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No config file found, using defaults");
            let config = AppConfig::default();
            log_config_summary(&config);
            return Ok(config);
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = parse_config(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    log_config_summary(&config);
    Ok(config)
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &AppConfig) {
    info!("Configuration loaded");
    let rgb = config.display.backlight;
    debug!("  backlight {},{},{}", rgb.r, rgb.g, rgb.b);
    debug!(
        "  scroll every {} ms, buttons every {} ms",
        config.timing.scroll_interval_ms, config.timing.button_interval_ms
    );
    debug!(
        "  clock every {} ms on page {} ({:?} row), sleep after {} s",
        config.clock.interval_ms, config.clock.page, config.clock.row, config.clock.sleep_after_s
    );
}
