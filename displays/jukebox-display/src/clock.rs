//! Standby clock
//!
//! While the player is stopped the clock writes the time of day onto one
//! row of one page. Because the row is rewritten through the diffing path,
//! a tick usually costs a single character. After the idle threshold the
//! clock switches the display off and goes dormant until started again.

use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};
use heapless::String;
use jukebox_hal::{Backlight, CharacterLcd};
use log::{debug, info, warn};
use portable_atomic::{AtomicBool, Ordering};

use crate::engine::DisplayEngine;
use crate::page::LcdRow;

/// Default clock refresh interval in milliseconds
pub const CLOCK_INTERVAL_MS: u64 = 300;

/// Default idle time before the display is switched off, in seconds
pub const CLOCK_SLEEP_AFTER_S: u64 = 120;

/// Local time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    /// `HH:MM:SS`
    pub fn format(&self) -> String<8> {
        let mut s = String::new();
        let _ = write!(s, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second);
        s
    }
}

/// Source of local time
pub trait WallClock {
    fn now(&self) -> TimeOfDay;
}

/// Where and how often the clock is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    pub page: usize,
    pub row: LcdRow,
    pub interval: Duration,
    /// Idle time after which the display is switched off
    pub sleep_after: Duration,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            page: 0,
            row: LcdRow::Bottom,
            interval: Duration::from_millis(CLOCK_INTERVAL_MS),
            sleep_after: Duration::from_secs(CLOCK_SLEEP_AFTER_S),
        }
    }
}

/// Clock overlay controller
///
/// [`run`](Self::run) is a long-lived loop that sleeps until
/// [`start`](Self::start) wakes it.
pub struct ClockOverlay<M: RawMutex> {
    config: ClockConfig,
    running: AtomicBool,
    wake: Signal<M, ()>,
}

impl<M: RawMutex> ClockOverlay<M> {
    pub const fn new(config: ClockConfig) -> Self {
        Self {
            config,
            running: AtomicBool::new(false),
            wake: Signal::new(),
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Start drawing; no-op if already running
    pub fn start(&self) {
        if !self.running.swap(true, Ordering::AcqRel) {
            debug!("clock: start");
            self.wake.signal(());
        }
    }

    /// Stop drawing; display power is left as it is
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            debug!("clock: stop");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Serve start requests; never returns
    pub async fn run<ML, L, C, const N: usize>(&self, engine: &DisplayEngine<ML, L, N>, clock: &C)
    where
        ML: RawMutex,
        L: CharacterLcd + Backlight,
        C: WallClock,
    {
        loop {
            self.wake.wait().await;
            self.session(engine, clock).await;
        }
    }

    /// Draw until stopped or idle
    async fn session<ML, L, C, const N: usize>(&self, engine: &DisplayEngine<ML, L, N>, clock: &C)
    where
        ML: RawMutex,
        L: CharacterLcd + Backlight,
        C: WallClock,
    {
        let mut started = Instant::now();
        let mut ticker = Ticker::every(self.config.interval);

        while self.is_running() {
            // Stopped and started again between two ticks
            if self.wake.try_take().is_some() {
                started = Instant::now();
            }
            if started.elapsed() >= self.config.sleep_after {
                info!(
                    "clock: idle for {} s, switching display off",
                    self.config.sleep_after.as_secs()
                );
                // Stop first so a start during power-off wakes a new session
                self.stop();
                if let Err(e) = engine.turn_off().await {
                    warn!("clock: turn off failed: {:?}", e);
                }
                break;
            }

            let text = clock.now().format();
            if let Err(e) = engine
                .overwrite_row_centred(self.config.page, self.config.row, &text)
                .await
            {
                warn!("clock: update failed: {:?}", e);
            }
            ticker.next().await;
        }
    }
}
