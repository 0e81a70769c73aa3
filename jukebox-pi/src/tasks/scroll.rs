//! Marquee task

use jukebox_display::ScrollTicker;
use log::info;

use super::Engine;

/// Scroll task - advances long rows on the current page
#[embassy_executor::task]
pub async fn scroll_task(engine: &'static Engine, ticker: &'static ScrollTicker) {
    info!("Scroll task started");
    ticker.run(engine).await;
}
