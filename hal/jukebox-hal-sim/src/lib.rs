//! Simulated front panel
//!
//! A host-side stand-in for the I2C character LCD plate. [`SimulatedPanel`]
//! keeps the controller's 2x40 display RAM, cursor and display shift exactly
//! as an HD44780 would, so the visible 16-column window can be read back and
//! compared against what the engine meant to show. Every bus transaction is
//! appended to an operation log for tests.

#![deny(unsafe_code)]

mod glyph;
mod panel;

pub use glyph::glyph;
pub use panel::{LcdOp, SimulatedPanel};

/// Errors raised by the simulated bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// Injected transfer failure
    #[error("simulated bus fault")]
    BusFault,
    /// Cursor address outside display RAM
    #[error("cursor ({col}, {row}) is outside display RAM")]
    OutOfRange { col: u8, row: u8 },
}
