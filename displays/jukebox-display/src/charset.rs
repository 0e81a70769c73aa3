//! Display character set
//!
//! Maps Unicode text onto the HD44780 character ROM (code A00): printable
//! ASCII minus the two codes the ROM draws differently, the handful of
//! Latin and Greek glyphs in the upper half, and a best-effort fallback for
//! everything else. Encoding never fails; a character the panel cannot show
//! is replaced, not rejected.

use heapless::Vec;
use unicode_normalization::char::decompose_canonical;

/// Longest text kept before it is cut and marked with [`ELLIPSIS`]
pub const MAX_TEXT_LEN: usize = 35;

/// Marker appended to cut text
pub const ELLIPSIS: &[u8] = b"...";

/// Longest encoded text, ellipsis included
pub const ENCODED_CAPACITY: usize = MAX_TEXT_LEN + ELLIPSIS.len();

/// Code drawn for characters with no better representation
pub const REPLACEMENT: u8 = b'?';

/// Encode one character, emitting one or more ROM codes
pub fn encode_char(c: char, mut emit: impl FnMut(u8)) {
    match c {
        // The ROM has a yen sign and arrows in these two slots
        '\\' => emit(b'/'),
        '~' => emit(b'-'),
        ' '..='}' => emit(c as u8),

        '¥' => emit(0x5C),
        '→' => emit(0x7E),
        '←' => emit(0x7F),
        '·' => emit(0xA5),
        '°' => emit(0xDF),
        'α' => emit(0xE0),
        'ä' => emit(0xE1),
        'ß' | 'β' => emit(0xE2),
        'ε' => emit(0xE3),
        'µ' | 'μ' => emit(0xE4),
        'σ' => emit(0xE5),
        'ρ' => emit(0xE6),
        '√' => emit(0xE8),
        'ñ' => emit(0xEE),
        'ö' => emit(0xEF),
        'θ' => emit(0xF2),
        '∞' => emit(0xF3),
        'Ω' => emit(0xF4),
        'ü' => emit(0xF5),
        'Σ' => emit(0xF6),
        'π' => emit(0xF7),
        '÷' => emit(0xFD),
        '█' => emit(0xFF),

        '‘' | '’' | '‚' | '′' | '´' => emit(b'\''),
        '“' | '”' | '„' | '″' | '«' | '»' => emit(b'"'),
        '‐' | '‑' | '‒' | '–' | '—' | '―' | '−' => emit(b'-'),
        '…' => ELLIPSIS.iter().for_each(|&b| emit(b)),
        '×' => emit(b'x'),
        'Æ' => {
            emit(b'A');
            emit(b'E');
        }
        'æ' => {
            emit(b'a');
            emit(b'e');
        }
        'Ø' => emit(b'O'),
        'ø' => emit(b'o'),
        'Ł' => emit(b'L'),
        'ł' => emit(b'l'),
        'Đ' => emit(b'D'),
        'đ' => emit(b'd'),

        c if c.is_whitespace() || c.is_control() => emit(b' '),
        c => emit(base_letter(c).unwrap_or(REPLACEMENT)),
    }
}

/// ASCII base of a precomposed letter (`é` -> `e`)
fn base_letter(c: char) -> Option<u8> {
    let mut base = None;
    decompose_canonical(c, |part| {
        if base.is_none() {
            base = Some(part);
        }
    });
    match base {
        Some(b) if b != c && b.is_ascii_alphanumeric() => Some(b as u8),
        _ => None,
    }
}

/// Most codes a single character expands to
const MAX_CHAR_CODES: usize = ELLIPSIS.len();

/// Encode text, cutting it to [`MAX_TEXT_LEN`] codes plus [`ELLIPSIS`]
///
/// The cut falls between characters, never inside an expansion.
pub fn encode(text: &str) -> Vec<u8, ENCODED_CAPACITY> {
    let mut out: Vec<u8, ENCODED_CAPACITY> = Vec::new();

    for c in text.chars() {
        let mut codes: Vec<u8, MAX_CHAR_CODES> = Vec::new();
        encode_char(c, |code| {
            let _ = codes.push(code);
        });
        if out.len() + codes.len() > MAX_TEXT_LEN {
            let _ = out.extend_from_slice(ELLIPSIS);
            break;
        }
        let _ = out.extend_from_slice(&codes);
    }
    out
}
