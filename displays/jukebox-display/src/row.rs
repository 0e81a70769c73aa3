//! One encoded line of a page
//!
//! A [`Row`] holds display codes, never `char`s. Text that fits in the
//! window is padded to exactly [`VISIBLE_WIDTH`]; longer text is followed by
//! a [`SCROLL_GAP`] of spaces so a scrolling title does not run straight into
//! its own restart. The scroll cursor walks that buffer circularly.

use heapless::Vec;

use crate::charset::{self, ENCODED_CAPACITY};

/// Columns visible on the glass
pub const VISIBLE_WIDTH: usize = jukebox_hal::VISIBLE_COLS as usize;

/// Spaces appended behind scrolling text
pub const SCROLL_GAP: usize = VISIBLE_WIDTH;

/// Largest buffer a row can need
pub const ROW_CAPACITY: usize = ENCODED_CAPACITY + SCROLL_GAP;

/// Encoded row content with its scroll cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    content: Vec<u8, ROW_CAPACITY>,
    /// Encoded text length before padding
    text_len: usize,
    /// Next content index to bring on screen
    scroll_offset: usize,
}

impl Default for Row {
    fn default() -> Self {
        Self::blank()
    }
}

impl Row {
    /// A row of spaces
    pub fn blank() -> Self {
        Self::from_codes(&[])
    }

    /// Encode `text` left-aligned
    pub fn new(text: &str) -> Self {
        Self::from_codes(&charset::encode(text))
    }

    /// Encode `text` centred in the window
    ///
    /// Text that does not fit is left-aligned and scrolls as usual.
    pub fn centred(text: &str) -> Self {
        let codes = charset::encode(text);
        let indent = VISIBLE_WIDTH.saturating_sub(codes.len()) / 2;

        let mut centred: Vec<u8, ENCODED_CAPACITY> = Vec::new();
        for _ in 0..indent {
            let _ = centred.push(b' ');
        }
        let _ = centred.extend_from_slice(&codes);
        Self::from_codes(&centred)
    }

    /// Build a row from already encoded text
    ///
    /// Codes past the encoder's length cap are dropped.
    pub fn from_codes(codes: &[u8]) -> Self {
        let codes = &codes[..codes.len().min(ENCODED_CAPACITY)];

        let mut content: Vec<u8, ROW_CAPACITY> = Vec::new();
        let _ = content.extend_from_slice(codes);

        let padded_len = if codes.len() > VISIBLE_WIDTH {
            codes.len() + SCROLL_GAP
        } else {
            VISIBLE_WIDTH
        };
        let _ = content.resize(padded_len, b' ');

        Self {
            text_len: codes.len(),
            scroll_offset: VISIBLE_WIDTH % padded_len,
            content,
        }
    }

    /// Replace the text, resetting the scroll cursor
    pub fn set(&mut self, text: &str) {
        *self = Self::new(text);
    }

    /// Full padded buffer
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The part shown when the window sits at column 0
    pub fn visible(&self) -> &[u8] {
        &self.content[..self.content.len().min(VISIBLE_WIDTH)]
    }

    /// Encoded text length, without padding
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Padded buffer length; the scroll cycle length
    pub fn buffer_length(&self) -> usize {
        self.content.len()
    }

    /// Check if the text is wider than the window
    pub fn needs_scroll(&self) -> bool {
        self.text_len > VISIBLE_WIDTH
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Code at the scroll cursor, if the buffer has any
    pub fn peek_next_char(&self) -> Option<u8> {
        self.content.get(self.scroll_offset).copied()
    }

    /// Move the scroll cursor one code forward, wrapping at the buffer end
    pub fn advance(&mut self) {
        if self.content.is_empty() {
            return;
        }
        self.scroll_offset = (self.scroll_offset + 1) % self.content.len();
    }

    /// Put the scroll cursor back on the first off-screen code
    pub fn reset_scroll(&mut self) {
        self.scroll_offset = match self.content.len() {
            0 => 0,
            len => VISIBLE_WIDTH % len,
        };
    }
}
