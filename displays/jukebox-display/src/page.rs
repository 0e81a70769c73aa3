//! Pages and the page store
//!
//! A page is two rows plus the hardware shift position the scroll ticker has
//! reached on it. Pages are replaced as whole values; only the scroll state
//! advances in place.

use jukebox_hal::DDRAM_COLS;

use crate::row::Row;

/// Physical line of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdRow {
    Top,
    Bottom,
}

impl LcdRow {
    pub const ALL: [LcdRow; 2] = [LcdRow::Top, LcdRow::Bottom];

    /// Hardware line number
    pub const fn index(self) -> u8 {
        match self {
            LcdRow::Top => 0,
            LcdRow::Bottom => 1,
        }
    }
}

/// Two rows of content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    top: Row,
    bottom: Row,
    /// Display shift applied since the last repaint, 0-39
    lcd_offset: u8,
}

impl Page {
    pub fn new(top: Row, bottom: Row) -> Self {
        Self {
            top,
            bottom,
            lcd_offset: 0,
        }
    }

    pub fn top(&self) -> &Row {
        &self.top
    }

    pub fn bottom(&self) -> &Row {
        &self.bottom
    }

    pub fn row(&self, row: LcdRow) -> &Row {
        match row {
            LcdRow::Top => &self.top,
            LcdRow::Bottom => &self.bottom,
        }
    }

    /// This page with one row replaced and scroll state reset
    pub fn with_row(mut self, which: LcdRow, row: Row) -> Self {
        match which {
            LcdRow::Top => self.top = row,
            LcdRow::Bottom => self.bottom = row,
        }
        self.reset_scroll();
        self
    }

    /// Check if either row is wider than the window
    pub fn should_scroll(&self) -> bool {
        self.top.needs_scroll() || self.bottom.needs_scroll()
    }

    pub fn lcd_offset(&self) -> u8 {
        self.lcd_offset
    }

    /// Return both rows and the shift position to their start
    pub fn reset_scroll(&mut self) {
        self.top.reset_scroll();
        self.bottom.reset_scroll();
        self.lcd_offset = 0;
    }

    /// Account for one scroll tick
    pub fn advance(&mut self) {
        self.top.advance();
        self.bottom.advance();
        self.lcd_offset = (self.lcd_offset + 1) % DDRAM_COLS;
    }
}

/// Fixed set of `N` pages with a circular current-page pointer
#[derive(Debug, Clone)]
pub struct PageStore<const N: usize> {
    pages: [Page; N],
    current: usize,
}

impl<const N: usize> Default for PageStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PageStore<N> {
    const NON_EMPTY: () = assert!(N > 0, "a page store needs at least one page");

    /// Blank pages, page 0 current
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self {
            pages: core::array::from_fn(|_| Page::default()),
            current: 0,
        }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_current(&self, index: usize) -> bool {
        self.current == index
    }

    pub fn current(&self) -> &Page {
        &self.pages[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Page {
        &mut self.pages[self.current]
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Store a page, returning the one it replaced
    ///
    /// Returns `None` and stores nothing if `index` is out of range.
    pub fn replace(&mut self, index: usize, page: Page) -> Option<Page> {
        self.pages
            .get_mut(index)
            .map(|slot| core::mem::replace(slot, page))
    }

    /// Make `index` (wrapped modulo `N`) current with its scroll state reset
    pub fn set_current(&mut self, index: usize) -> usize {
        self.current = index % N;
        self.pages[self.current].reset_scroll();
        self.current
    }

    /// Index following the current one, wrapping
    pub fn next_index(&self) -> usize {
        (self.current + 1) % N
    }

    /// Blank every page, keeping the current index
    pub fn reset(&mut self) {
        for page in self.pages.iter_mut() {
            *page = Page::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrolling_page() -> Page {
        Page::new(Row::new("A title much wider than the glass"), Row::new("Artist"))
    }

    #[test]
    fn test_should_scroll() {
        assert!(!Page::new(Row::new("Jukebox Pi"), Row::blank()).should_scroll());
        assert!(scrolling_page().should_scroll());
        assert!(Page::new(Row::blank(), Row::new("A bottom row that scrolls")).should_scroll());
    }

    #[test]
    fn test_advance_wraps_lcd_offset() {
        let mut page = scrolling_page();
        for _ in 0..DDRAM_COLS {
            page.advance();
        }
        assert_eq!(page.lcd_offset(), 0);
        page.advance();
        assert_eq!(page.lcd_offset(), 1);
    }

    #[test]
    fn test_with_row_resets_scroll() {
        let mut page = scrolling_page();
        page.advance();
        let page = page.with_row(LcdRow::Bottom, Row::new("Someone else"));
        assert_eq!(page.lcd_offset(), 0);
        assert_eq!(page.top().scroll_offset(), 16);
        assert_eq!(page.bottom().content(), b"Someone else    ");
    }

    #[test]
    fn test_replace_out_of_range() {
        let mut store: PageStore<3> = PageStore::new();
        assert!(store.replace(3, scrolling_page()).is_none());
        assert!(store.replace(2, scrolling_page()).is_some());
        assert_eq!(store.get(2), Some(&scrolling_page()));
    }

    #[test]
    fn test_set_current_wraps() {
        let mut store: PageStore<3> = PageStore::new();
        assert_eq!(store.set_current(4), 1);
        assert!(store.is_current(1));
    }

    #[test]
    fn test_next_index_cycles() {
        let mut store: PageStore<3> = PageStore::new();
        let mut seen = [false; 3];
        for _ in 0..3 {
            let next = store.next_index();
            store.set_current(next);
            seen[next] = true;
        }
        assert_eq!(store.current_index(), 0);
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_set_current_resets_scroll() {
        let mut store: PageStore<2> = PageStore::new();
        store.replace(0, scrolling_page());
        store.current_mut().advance();
        store.current_mut().advance();
        store.set_current(0);
        assert_eq!(store.current(), &scrolling_page());
    }

    #[test]
    fn test_reset_keeps_current_index() {
        let mut store: PageStore<3> = PageStore::new();
        store.replace(1, scrolling_page());
        store.set_current(1);
        store.reset();
        assert_eq!(store.current_index(), 1);
        assert_eq!(store.current(), &Page::default());
    }

    #[test]
    fn test_single_page_store() {
        let mut store: PageStore<1> = PageStore::new();
        assert_eq!(store.next_index(), 0);
        assert_eq!(store.set_current(7), 0);
    }
}
