//! Player status task
//!
//! Drains the feed channel: status reports go through the presenter, button
//! taps go to the simulated keypad so the poller picks them up.

use log::{info, warn};

use super::{Clock, Engine};
use crate::feed::{FeedChannel, FeedMessage};
use crate::presenter::Presenter;

/// Status task - applies feed messages to the display
#[embassy_executor::task]
pub async fn status_task(
    engine: &'static Engine,
    clock: &'static Clock,
    feed: &'static FeedChannel,
) {
    info!("Status task started");
    let mut presenter = Presenter::new();

    loop {
        match feed.receive().await {
            FeedMessage::Status(status) => {
                if let Err(e) = presenter.show(engine, clock, status).await {
                    warn!("Failed to show status: {:?}", e);
                }
            }
            FeedMessage::Press { press } => {
                engine.with_hardware(|panel| panel.tap(press)).await;
            }
        }
    }
}
