//! Minimal-write row updates
//!
//! Rewriting only the cells that change keeps the panel from flickering
//! when, for example, the clock ticks over one digit.

use jukebox_hal::CharacterLcd;

use crate::page::LcdRow;

/// Cells that must be written to turn `old` into `new`
///
/// Yields `(column, code)` for every position where the codes differ, every
/// position past the end of `old`, and every position past the end of `new`
/// (blanked with a space).
pub fn changed_cells<'a>(old: &'a [u8], new: &'a [u8]) -> impl Iterator<Item = (usize, u8)> + 'a {
    let len = old.len().max(new.len());
    (0..len).filter_map(move |i| match (old.get(i), new.get(i)) {
        (Some(&o), Some(&n)) if o == n => None,
        (_, Some(&n)) => Some((i, n)),
        (_, None) => Some((i, b' ')),
    })
}

/// Write the cells of `row` that differ between `old` and `new`
///
/// Each write is its own cursor move plus one character. Returns the number
/// of characters written.
pub fn write_diff<L: CharacterLcd>(
    lcd: &mut L,
    row: LcdRow,
    old: &[u8],
    new: &[u8],
) -> Result<usize, L::Error> {
    let mut writes = 0;
    for (col, code) in changed_cells(old, new) {
        lcd.set_cursor(col as u8, row.index())?;
        lcd.write_char(code)?;
        writes += 1;
    }
    Ok(writes)
}
