//! HD44780 display RAM model with backlight and keypad

use jukebox_hal::{
    Backlight, Button, ButtonPanel, ButtonSet, CharacterLcd, ErrorType, Rgb, DDRAM_COLS, ROWS,
    VISIBLE_COLS,
};
use log::trace;

use crate::{glyph, SimError};

/// One recorded bus transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcdOp {
    Clear,
    Home,
    SetCursor { col: u8, row: u8 },
    Write(u8),
    ShiftLeft,
    ShiftRight,
    Display(bool),
    Backlight(Rgb),
}

/// Simulated LCD plate: display RAM, backlight and five buttons
#[derive(Debug, Clone)]
pub struct SimulatedPanel {
    ddram: [[u8; DDRAM_COLS as usize]; ROWS as usize],
    cursor_col: u8,
    cursor_row: u8,
    /// First display RAM column shown at the left edge of the glass
    shift: u8,
    display_on: bool,
    backlight: Rgb,
    held: ButtonSet,
    tapped: ButtonSet,
    faulty: bool,
    ops: Vec<LcdOp>,
}

impl Default for SimulatedPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPanel {
    /// Power-on state: blank RAM, display on, backlight off
    pub fn new() -> Self {
        Self {
            ddram: [[b' '; DDRAM_COLS as usize]; ROWS as usize],
            cursor_col: 0,
            cursor_row: 0,
            shift: 0,
            display_on: true,
            backlight: Rgb::OFF,
            held: ButtonSet::EMPTY,
            tapped: ButtonSet::EMPTY,
            faulty: false,
            ops: Vec::new(),
        }
    }

    /// Make every following transaction fail until cleared
    pub fn set_faulty(&mut self, faulty: bool) {
        self.faulty = faulty;
    }

    /// Hold a button down until [`release`](Self::release)
    pub fn press(&mut self, button: Button) {
        self.held.insert(button);
    }

    /// Release a held button
    pub fn release(&mut self, button: Button) {
        let held = self.held;
        self.held = held.iter().filter(|b| *b != button).collect();
    }

    /// Press a button for exactly one sample
    pub fn tap(&mut self, button: Button) {
        self.tapped.insert(button);
    }

    /// Characters currently shown on one row of the glass
    pub fn visible_codes(&self, row: u8) -> [u8; VISIBLE_COLS as usize] {
        let mut out = [b' '; VISIBLE_COLS as usize];
        let line = &self.ddram[row as usize % ROWS as usize];
        for (i, slot) in out.iter_mut().enumerate() {
            let col = (self.shift as usize + i) % DDRAM_COLS as usize;
            *slot = line[col];
        }
        out
    }

    /// Row of the glass rendered through the character ROM
    pub fn visible_text(&self, row: u8) -> String {
        self.visible_codes(row).iter().map(|&c| glyph(c)).collect()
    }

    /// Full 40-column display RAM line
    pub fn ddram_row(&self, row: u8) -> &[u8; DDRAM_COLS as usize] {
        &self.ddram[row as usize % ROWS as usize]
    }

    /// Current display shift (column at the left edge)
    pub fn shift(&self) -> u8 {
        self.shift
    }

    /// Cursor address as `(col, row)`
    pub fn cursor(&self) -> (u8, u8) {
        (self.cursor_col, self.cursor_row)
    }

    pub fn is_display_on(&self) -> bool {
        self.display_on
    }

    pub fn backlight(&self) -> Rgb {
        self.backlight
    }

    /// Recorded transactions since the last [`take_ops`](Self::take_ops)
    pub fn ops(&self) -> &[LcdOp] {
        &self.ops
    }

    /// Drain the operation log
    pub fn take_ops(&mut self) -> Vec<LcdOp> {
        core::mem::take(&mut self.ops)
    }

    /// Number of character writes in the operation log
    pub fn write_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, LcdOp::Write(_)))
            .count()
    }

    /// Both rows of the glass inside a frame, for logging
    pub fn render(&self) -> String {
        let edge: String = "─".repeat(VISIBLE_COLS as usize);
        let mut out = format!("┌{edge}┐\n");
        for row in 0..ROWS {
            let text = if self.display_on {
                self.visible_text(row)
            } else {
                " ".repeat(VISIBLE_COLS as usize)
            };
            out.push_str(&format!("│{text}│\n"));
        }
        out.push_str(&format!("└{edge}┘"));
        out
    }

    fn transact(&mut self, op: LcdOp) -> Result<(), SimError> {
        if self.faulty {
            trace!("sim: rejecting {:?}", op);
            return Err(SimError::BusFault);
        }
        self.ops.push(op);
        Ok(())
    }
}

impl ErrorType for SimulatedPanel {
    type Error = SimError;
}

impl CharacterLcd for SimulatedPanel {
    fn clear(&mut self) -> Result<(), SimError> {
        self.transact(LcdOp::Clear)?;
        for line in self.ddram.iter_mut() {
            line.fill(b' ');
        }
        self.cursor_col = 0;
        self.cursor_row = 0;
        self.shift = 0;
        Ok(())
    }

    fn home(&mut self) -> Result<(), SimError> {
        self.transact(LcdOp::Home)?;
        self.cursor_col = 0;
        self.cursor_row = 0;
        self.shift = 0;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), SimError> {
        if col >= DDRAM_COLS || row >= ROWS {
            return Err(SimError::OutOfRange { col, row });
        }
        self.transact(LcdOp::SetCursor { col, row })?;
        self.cursor_col = col;
        self.cursor_row = row;
        Ok(())
    }

    fn write_char(&mut self, code: u8) -> Result<(), SimError> {
        self.transact(LcdOp::Write(code))?;
        self.ddram[self.cursor_row as usize][self.cursor_col as usize] = code;

        // Address counter runs off the end of one line into the next
        self.cursor_col += 1;
        if self.cursor_col == DDRAM_COLS {
            self.cursor_col = 0;
            self.cursor_row = (self.cursor_row + 1) % ROWS;
        }
        Ok(())
    }

    fn shift_left(&mut self) -> Result<(), SimError> {
        self.transact(LcdOp::ShiftLeft)?;
        self.shift = (self.shift + 1) % DDRAM_COLS;
        Ok(())
    }

    fn shift_right(&mut self) -> Result<(), SimError> {
        self.transact(LcdOp::ShiftRight)?;
        self.shift = (self.shift + DDRAM_COLS - 1) % DDRAM_COLS;
        Ok(())
    }

    fn set_display(&mut self, on: bool) -> Result<(), SimError> {
        self.transact(LcdOp::Display(on))?;
        self.display_on = on;
        Ok(())
    }
}

impl Backlight for SimulatedPanel {
    fn set_backlight(&mut self, color: Rgb) -> Result<(), SimError> {
        self.transact(LcdOp::Backlight(color))?;
        self.backlight = color;
        Ok(())
    }
}

impl ButtonPanel for SimulatedPanel {
    fn is_pressed(&mut self, button: Button) -> Result<bool, SimError> {
        if self.faulty {
            return Err(SimError::BusFault);
        }
        if self.tapped.contains(button) {
            let tapped = self.tapped;
            self.tapped = tapped.iter().filter(|b| *b != button).collect();
            return Ok(true);
        }
        Ok(self.held.contains(button))
    }
}
