//! Simulated panel mirror
//!
//! With no glass to look at, the simulated panel is printed to the log
//! whenever what it shows changes.

use embassy_time::{Duration, Ticker};
use jukebox_hal::Rgb;
use log::info;

use super::Engine;

/// How often the simulated panel is checked for changes
const MIRROR_INTERVAL_MS: u64 = 100;

/// Mirror task - logs the simulated panel on change
#[embassy_executor::task]
pub async fn mirror_task(engine: &'static Engine) {
    info!("Mirror task started");

    let mut ticker = Ticker::every(Duration::from_millis(MIRROR_INTERVAL_MS));
    let mut last: Option<(String, Rgb)> = None;

    loop {
        let snapshot = engine
            .with_hardware(|panel| (panel.render(), panel.backlight()))
            .await;

        if last.as_ref() != Some(&snapshot) {
            let (frame, backlight) = &snapshot;
            info!(
                "backlight {},{},{}\n{}",
                backlight.r, backlight.g, backlight.b, frame
            );
            last = Some(snapshot);
        }

        ticker.next().await;
    }
}
