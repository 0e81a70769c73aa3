//! Inter-task communication channels

use embassy_sync::channel::Channel;

use crate::feed::FeedChannel;

/// Feed messages from the stdin reader thread to the status task
pub static FEED_CHANNEL: FeedChannel = Channel::new();
