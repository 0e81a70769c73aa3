//! Front panel configuration
//!
//! Read once at startup from a TOML file. Every key is optional; a missing
//! file or section falls back to the defaults below.
//!
//! ```toml
//! [display]
//! backlight = { r = 0, g = 0, b = 128 }
//!
//! [timing]
//! scroll_interval_ms = 300
//! button_interval_ms = 300
//!
//! [clock]
//! interval_ms = 300
//! sleep_after_s = 120
//! page = 0
//! row = "bottom"
//! ```

pub mod loader;

use embassy_time::Duration;
use jukebox_display::clock::{CLOCK_INTERVAL_MS, CLOCK_SLEEP_AFTER_S};
use jukebox_display::{
    ClockConfig, EngineConfig, LcdRow, BUTTON_POLL_INTERVAL_MS, DEFAULT_BACKLIGHT,
    SCROLL_INTERVAL_MS,
};
use jukebox_hal::Rgb;
use serde::Deserialize;

use crate::presenter::PAGE_COUNT;

pub use loader::{config_path, load_config};

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub timing: TimingConfig,
    pub clock: ClockSection,
}

/// `[display]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Backlight colour while the display is on
    pub backlight: Rgb,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            backlight: DEFAULT_BACKLIGHT,
        }
    }
}

/// `[timing]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub scroll_interval_ms: u64,
    pub button_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scroll_interval_ms: SCROLL_INTERVAL_MS,
            button_interval_ms: BUTTON_POLL_INTERVAL_MS,
        }
    }
}

/// Row names accepted in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowName {
    Top,
    Bottom,
}

impl From<RowName> for LcdRow {
    fn from(row: RowName) -> Self {
        match row {
            RowName::Top => LcdRow::Top,
            RowName::Bottom => LcdRow::Bottom,
        }
    }
}

/// `[clock]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockSection {
    pub interval_ms: u64,
    pub sleep_after_s: u64,
    pub page: usize,
    pub row: RowName,
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            interval_ms: CLOCK_INTERVAL_MS,
            sleep_after_s: CLOCK_SLEEP_AFTER_S,
            page: 0,
            row: RowName::Bottom,
        }
    }
}

/// Values that parse but cannot be run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
    #[error("clock page {page} is out of range ({count} pages)")]
    ClockPage { page: usize, count: usize },
}

impl AppConfig {
    /// Check values the schema alone cannot rule out
    pub fn validate(&self) -> Result<(), ValidationError> {
        let intervals = [
            ("timing.scroll_interval_ms", self.timing.scroll_interval_ms),
            ("timing.button_interval_ms", self.timing.button_interval_ms),
            ("clock.interval_ms", self.clock.interval_ms),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, ms)| *ms == 0) {
            return Err(ValidationError::ZeroInterval(name));
        }
        if self.clock.page >= PAGE_COUNT {
            return Err(ValidationError::ClockPage {
                page: self.clock.page,
                count: PAGE_COUNT,
            });
        }
        Ok(())
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            backlight: self.display.backlight,
        }
    }

    pub fn clock(&self) -> ClockConfig {
        ClockConfig {
            page: self.clock.page,
            row: self.clock.row.into(),
            interval: Duration::from_millis(self.clock.interval_ms),
            sleep_after: Duration::from_secs(self.clock.sleep_after_s),
        }
    }

    pub fn scroll_interval(&self) -> Duration {
        Duration::from_millis(self.timing.scroll_interval_ms)
    }

    pub fn button_interval(&self) -> Duration {
        Duration::from_millis(self.timing.button_interval_ms)
    }
}
