//! Display engine for the Jukebox Pi front panel
//!
//! Drives a 16x2 character LCD through the traits in `jukebox-hal`:
//! - [`DisplayEngine`] - paged content, partial updates, power, one lock
//! - [`ScrollTicker`] - marquee for rows wider than the glass
//! - [`ButtonPoller`] - keypad sampling with a [`ButtonHandler`] callback
//! - [`ClockOverlay`] - standby clock with idle power-off
//!
//! # Display model
//!
//! The controller keeps 40 columns of display RAM per line and shows a
//! 16-column window onto them. Scrolling never rewrites the visible cells:
//! each tick writes one character into the column just right of the window
//! and slides the window onto it with a single shift instruction. Text is
//! encoded to ROM codes once, when a row is set, so every later write is a
//! plain byte.
//!
//! The loops only hold a reference to the engine; they take its lock for
//! one step at a time and sleep with it released.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod charset;
pub mod clock;
pub mod diff;
pub mod engine;
pub mod error;
pub mod page;
pub mod power;
pub mod row;
pub mod scroll;

// Re-export key types
pub use buttons::{ButtonHandler, ButtonPoller, BUTTON_POLL_INTERVAL_MS};
pub use clock::{ClockConfig, ClockOverlay, TimeOfDay, WallClock};
pub use engine::{DisplayEngine, EngineConfig};
pub use error::EngineError;
pub use page::{LcdRow, Page, PageStore};
pub use power::DEFAULT_BACKLIGHT;
pub use row::{Row, VISIBLE_WIDTH};
pub use scroll::{ScrollTicker, SCROLL_INTERVAL_MS};
