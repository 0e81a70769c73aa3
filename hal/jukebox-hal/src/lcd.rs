//! Character LCD abstractions
//!
//! Models the instruction set of an HD44780-compatible controller in
//! two-line mode. Each line owns 40 columns of display RAM; the glass shows a
//! 16-column window onto them, and that window can be slid with the display
//! shift instructions without rewriting any characters.

use crate::ErrorType;

/// Columns visible on the glass
pub const VISIBLE_COLS: u8 = 16;

/// Number of character rows
pub const ROWS: u8 = 2;

/// Columns of display RAM per row in two-line mode
pub const DDRAM_COLS: u8 = 40;

/// Character LCD controller
///
/// Every method is a single, synchronous bus transaction. Implementations
/// must not retry internally; the caller decides what a failed write means.
pub trait CharacterLcd: ErrorType {
    /// Blank all display RAM and return cursor and shift to the origin
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Return cursor and display shift to the origin without touching RAM
    fn home(&mut self) -> Result<(), Self::Error>;

    /// Move the write cursor
    ///
    /// - `col`: display RAM column (0-39)
    /// - `row`: line (0-1)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error>;

    /// Write one character code at the cursor and advance the cursor
    fn write_char(&mut self, code: u8) -> Result<(), Self::Error>;

    /// Slide the visible window one column to the right
    ///
    /// Content appears to move left on the glass. Applies to both rows.
    fn shift_left(&mut self) -> Result<(), Self::Error>;

    /// Slide the visible window one column to the left
    fn shift_right(&mut self) -> Result<(), Self::Error>;

    /// Enable or blank the display output (RAM is preserved)
    fn set_display(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Write a run of character codes starting at the cursor
    fn write_bytes(&mut self, codes: &[u8]) -> Result<(), Self::Error> {
        for &code in codes {
            self.write_char(code)?;
        }
        Ok(())
    }
}

impl<T: CharacterLcd + ?Sized> CharacterLcd for &mut T {
    fn clear(&mut self) -> Result<(), Self::Error> {
        T::clear(self)
    }

    fn home(&mut self) -> Result<(), Self::Error> {
        T::home(self)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        T::set_cursor(self, col, row)
    }

    fn write_char(&mut self, code: u8) -> Result<(), Self::Error> {
        T::write_char(self, code)
    }

    fn shift_left(&mut self) -> Result<(), Self::Error> {
        T::shift_left(self)
    }

    fn shift_right(&mut self) -> Result<(), Self::Error> {
        T::shift_right(self)
    }

    fn set_display(&mut self, on: bool) -> Result<(), Self::Error> {
        T::set_display(self, on)
    }
}
