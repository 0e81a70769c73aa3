//! Player status feed
//!
//! The player bridge writes one JSON object per line to our stdin. Most lines
//! are status reports; a line of the form `{"press": "select"}` taps a
//! button on the simulated keypad instead.
//!
//! Reading stdin blocks, so it happens on a plain thread that hands parsed
//! messages to the executor over a bounded channel.

use std::io::BufRead;
use std::thread;

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use jukebox_hal::Button;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::presenter::TrackStatus;

/// Messages buffered between the reader thread and the status task
pub const FEED_CHANNEL_SIZE: usize = 8;

/// Channel from the reader thread to the status task
pub type FeedChannel = Channel<CriticalSectionRawMutex, FeedMessage, FEED_CHANNEL_SIZE>;

/// One line of the feed
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FeedMessage {
    /// Tap a keypad button
    Press { press: Button },
    /// Player status report
    Status(TrackStatus),
}

/// Feed parsing errors
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("malformed feed line: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse one feed line; blank lines yield `None`
pub fn parse_line(line: &str) -> Result<Option<FeedMessage>, FeedError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Read `input` line by line until EOF, forwarding parsed messages
pub fn pump<R: BufRead>(
    input: R,
    sender: Sender<'_, CriticalSectionRawMutex, FeedMessage, FEED_CHANNEL_SIZE>,
) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Feed read failed: {}", e);
                break;
            }
        };

        match parse_line(&line) {
            Ok(Some(message)) => {
                debug!("Feed: {:?}", message);
                block_on(sender.send(message));
            }
            Ok(None) => {}
            Err(e) => warn!("{}", e),
        }
    }
    info!("Feed closed");
}

/// Start the stdin reader thread
pub fn spawn_stdin_reader(
    channel: &'static FeedChannel,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("feed".into())
        .spawn(move || pump(std::io::stdin().lock(), channel.sender()))
}
