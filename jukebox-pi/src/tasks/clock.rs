//! Standby clock task

use log::info;

use super::{Clock, Engine};
use crate::wall_clock::SystemClock;

/// Clock task - draws the time while the player is stopped
#[embassy_executor::task]
pub async fn clock_task(engine: &'static Engine, clock: &'static Clock) {
    info!("Clock task started");
    clock.run(engine, &SystemClock).await;
}
