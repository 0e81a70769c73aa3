//! Jukebox Pi - front panel for a music player
//!
//! Shows player status on a 16x2 character LCD and turns the keypad into
//! transport commands. Status arrives as JSON lines on stdin; commands leave
//! as JSON lines on stdout. The panel itself is simulated and mirrored to
//! the log.

use embassy_executor::Spawner;
use jukebox_display::{ButtonPoller, ClockOverlay, ScrollTicker};
use jukebox_hal_sim::SimulatedPanel;
use log::{error, info};
use static_cell::StaticCell;

mod bridge;
mod channels;
mod config;
mod feed;
mod presenter;
mod tasks;
mod wall_clock;

use crate::channels::FEED_CHANNEL;
use crate::tasks::{Clock, Engine};

// Static cells for shared state (must live forever for task references)
static ENGINE: StaticCell<Engine> = StaticCell::new();
static SCROLL: StaticCell<ScrollTicker> = StaticCell::new();
static POLLER: StaticCell<ButtonPoller> = StaticCell::new();
static CLOCK: StaticCell<Clock> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Jukebox Pi starting...");

    let path = config::config_path();
    let config = match config::load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let engine: &'static Engine = ENGINE.init(Engine::new(SimulatedPanel::new(), config.engine()));
    if let Err(e) = engine.init().await {
        error!("Display init failed: {:?}", e);
    }

    let scroll: &'static ScrollTicker = SCROLL.init(ScrollTicker::new(config.scroll_interval()));
    let poller: &'static ButtonPoller = POLLER.init(ButtonPoller::new(config.button_interval()));
    let clock: &'static Clock = CLOCK.init(ClockOverlay::new(config.clock()));

    if let Err(e) = feed::spawn_stdin_reader(&FEED_CHANNEL) {
        error!("Failed to start feed reader: {}", e);
        std::process::exit(1);
    }

    let spawned = [
        spawner.spawn(tasks::scroll_task(engine, scroll)),
        spawner.spawn(tasks::button_task(engine, poller)),
        spawner.spawn(tasks::clock_task(engine, clock)),
        spawner.spawn(tasks::status_task(engine, clock, &FEED_CHANNEL)),
        spawner.spawn(tasks::mirror_task(engine)),
    ];
    for result in spawned {
        if let Err(e) = result {
            error!("Failed to spawn task: {:?}", e);
        }
    }

    info!("All tasks spawned, waiting for player status");
}
