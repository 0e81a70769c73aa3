//! Keypad task

use jukebox_display::ButtonPoller;
use log::info;

use super::Engine;
use crate::bridge::FrontPanel;

/// Button task - samples the keypad and forwards presses
#[embassy_executor::task]
pub async fn button_task(engine: &'static Engine, poller: &'static ButtonPoller) {
    info!("Button task started");
    let mut panel = FrontPanel::new(std::io::stdout());
    poller.run(engine, &mut panel).await;
}
