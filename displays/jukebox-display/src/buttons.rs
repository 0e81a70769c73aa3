//! Keypad polling
//!
//! Buttons are sampled on a fixed tick; there is no edge detection or
//! debouncing. A button held across several ticks is reported on each of
//! them, so a held SELECT keeps paging.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Ticker};
use jukebox_hal::{Backlight, Button, ButtonPanel, CharacterLcd};
use log::{debug, info, warn};
use portable_atomic::{AtomicBool, Ordering};

use crate::engine::DisplayEngine;
use crate::error::EngineError;

/// Default sampling interval in milliseconds
pub const BUTTON_POLL_INTERVAL_MS: u64 = 300;

/// Receiver of button reports
///
/// Called with the engine lock released, so handlers may call straight back
/// into the engine.
#[allow(async_fn_in_trait)]
pub trait ButtonHandler<E> {
    async fn on_button(&mut self, engine: &E, button: Button);
}

/// Periodic keypad sampler
pub struct ButtonPoller {
    interval: Duration,
    running: AtomicBool,
}

impl Default for ButtonPoller {
    fn default() -> Self {
        Self::new(Duration::from_millis(BUTTON_POLL_INTERVAL_MS))
    }
}

impl ButtonPoller {
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

    /// Sample once and report every held button
    ///
    /// Returns the number of buttons reported.
    pub async fn poll_once<M, L, H, const N: usize>(
        &self,
        engine: &DisplayEngine<M, L, N>,
        handler: &mut H,
    ) -> Result<usize, EngineError<L::Error>>
    where
        M: RawMutex,
        L: CharacterLcd + Backlight + ButtonPanel,
        H: ButtonHandler<DisplayEngine<M, L, N>>,
    {
        let held = engine.read_buttons().await?;
        for button in held.iter() {
            debug!("buttons: {} held", button.name());
            handler.on_button(engine, button).await;
        }
        Ok(held.len())
    }

    /// Poll until [`stop`](Self::stop) is called
    pub async fn run<M, L, H, const N: usize>(
        &self,
        engine: &DisplayEngine<M, L, N>,
        handler: &mut H,
    ) where
        M: RawMutex,
        L: CharacterLcd + Backlight + ButtonPanel,
        H: ButtonHandler<DisplayEngine<M, L, N>>,
    {
        info!("buttons: polling every {} ms", self.interval.as_millis());
        self.running.store(true, Ordering::Release);
        let mut ticker = Ticker::every(self.interval);

        while self.is_running() {
            if let Err(e) = self.poll_once(engine, handler).await {
                warn!("buttons: read failed: {:?}", e);
            }
            ticker.next().await;
        }
        info!("buttons: stopped");
    }
}
