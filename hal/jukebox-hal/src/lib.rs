//! Jukebox Pi Hardware Abstraction Layer
//!
//! This crate defines the boundary between the display engine and the
//! physical front panel: an HD44780-compatible character LCD with an RGB
//! backlight and a five-button keypad, typically sitting behind an I2C port
//! expander on a single-board computer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (jukebox-pi)               │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  jukebox-display (engine)               │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  jukebox-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  jukebox-hal- │       │ board driver  │
//! │      sim      │       │ (I2C plate)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`lcd::CharacterLcd`] - cursor, character writes, display shift
//! - [`backlight::Backlight`] - RGB backlight colour
//! - [`button::ButtonPanel`] - keypad sampling
//!
//! All three share an error type through [`ErrorType`], since on real
//! hardware they are the same bus device.

#![no_std]
#![deny(unsafe_code)]

pub mod backlight;
pub mod button;
pub mod lcd;

// Re-export key traits at crate root for convenience
pub use backlight::{Backlight, Rgb};
pub use button::{Button, ButtonPanel, ButtonSet};
pub use lcd::{CharacterLcd, DDRAM_COLS, ROWS, VISIBLE_COLS};

/// Error type shared by every trait of one hardware device
pub trait ErrorType {
    /// Bus or device error
    type Error: core::fmt::Debug;
}

impl<T: ErrorType + ?Sized> ErrorType for &mut T {
    type Error = T::Error;
}
