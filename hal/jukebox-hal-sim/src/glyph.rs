//! Character ROM (code A00) lookup for rendering display RAM as text

/// Render one character code the way the A00 ROM draws it
///
/// Codes without a printable counterpart render as a block.
pub fn glyph(code: u8) -> char {
    match code {
        0x5C => '¥',
        0x7E => '→',
        0x7F => '←',
        0x20..=0x7D => code as char,
        0xA5 => '·',
        0xDF => '°',
        0xE0 => 'α',
        0xE1 => 'ä',
        0xE2 => 'β',
        0xE3 => 'ε',
        0xE4 => 'µ',
        0xE5 => 'σ',
        0xE6 => 'ρ',
        0xE8 => '√',
        0xEE => 'ñ',
        0xEF => 'ö',
        0xF2 => 'θ',
        0xF3 => '∞',
        0xF4 => 'Ω',
        0xF5 => 'ü',
        0xF6 => 'Σ',
        0xF7 => 'π',
        0xFD => '÷',
        0xFF => '█',
        _ => '▯',
    }
}
