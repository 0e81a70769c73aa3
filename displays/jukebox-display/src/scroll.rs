//! Marquee scrolling of the current page

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Ticker};
use jukebox_hal::{Backlight, CharacterLcd};
use log::{info, warn};
use portable_atomic::{AtomicBool, Ordering};

use crate::engine::DisplayEngine;

/// Default scroll tick interval in milliseconds
pub const SCROLL_INTERVAL_MS: u64 = 300;

/// Periodic driver for [`DisplayEngine::scroll_step`]
pub struct ScrollTicker {
    interval: Duration,
    running: AtomicBool,
}

impl Default for ScrollTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(SCROLL_INTERVAL_MS))
    }
}

impl ScrollTicker {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: AtomicBool::new(false),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ask the loop to exit at the top of its next iteration
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Tick until [`stop`](Self::stop) is called
    ///
    /// Bus errors are logged and the loop carries on.
    pub async fn run<M, L, const N: usize>(&self, engine: &DisplayEngine<M, L, N>)
    where
        M: RawMutex,
        L: CharacterLcd + Backlight,
    {
        info!("scroll: ticking every {} ms", self.interval.as_millis());
        self.running.store(true, Ordering::Release);
        let mut ticker = Ticker::every(self.interval);

        while self.is_running() {
            if let Err(e) = engine.scroll_step().await {
                warn!("scroll: tick failed: {:?}", e);
            }
            ticker.next().await;
        }
        info!("scroll: stopped");
    }
}
