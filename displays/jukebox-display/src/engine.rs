//! Display engine facade
//!
//! [`DisplayEngine`] owns the page store, the power state and the panel
//! behind one async mutex. Every public operation takes the lock for its
//! whole critical section, so writes from the status flow, the scroll ticker
//! and the clock overlay never interleave at the character level. No
//! operation holds the lock across a sleep.
//!
//! Store updates are applied before the hardware is touched: a bus fault
//! leaves the model holding the intended content, and the next repaint
//! brings the panel back in line.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use jukebox_hal::{Backlight, ButtonPanel, ButtonSet, CharacterLcd, Rgb, DDRAM_COLS, VISIBLE_COLS};
use log::{debug, trace};

use crate::diff::write_diff;
use crate::error::EngineError;
use crate::page::{LcdRow, Page, PageStore};
use crate::power::{PowerState, DEFAULT_BACKLIGHT};
use crate::row::Row;

/// Engine-wide settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    /// Backlight colour used whenever the display is switched on
    pub backlight: Rgb,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backlight: DEFAULT_BACKLIGHT,
        }
    }
}

/// State guarded by the engine lock
struct EngineState<L, const N: usize> {
    lcd: L,
    store: PageStore<N>,
    power: PowerState,
}

impl<L, const N: usize> EngineState<L, N>
where
    L: CharacterLcd + Backlight,
{
    /// Write the current page at shift 0 without clearing
    fn paint(&mut self) -> Result<(), L::Error> {
        let page = self.store.current();
        for row in LcdRow::ALL {
            self.lcd.set_cursor(0, row.index())?;
            self.lcd.write_bytes(page.row(row).visible())?;
        }
        Ok(())
    }

    /// Reset the display shift and write the current page
    fn repaint(&mut self) -> Result<(), L::Error> {
        self.lcd.home()?;
        self.paint()
    }

    /// Clear the panel and show page `index`
    fn show(&mut self, index: usize) -> Result<usize, L::Error> {
        let index = self.store.set_current(index);
        debug!("display: showing page {}", index);
        self.lcd.clear()?;
        self.paint()?;
        Ok(index)
    }
}

/// Paged, scrolling character display
///
/// - `M`: raw mutex flavour for the engine lock
/// - `L`: panel driver
/// - `N`: number of pages (at least one)
pub struct DisplayEngine<M: RawMutex, L, const N: usize> {
    state: Mutex<M, EngineState<L, N>>,
}

impl<M, L, const N: usize> DisplayEngine<M, L, N>
where
    M: RawMutex,
    L: CharacterLcd + Backlight,
{
    /// Wrap a panel. Nothing is written until [`init`](Self::init) or the
    /// first content update.
    pub fn new(lcd: L, config: EngineConfig) -> Self {
        Self {
            state: Mutex::new(EngineState {
                lcd,
                store: PageStore::new(),
                power: PowerState::new(config.backlight),
            }),
        }
    }

    /// Number of pages
    pub const fn page_count(&self) -> usize {
        N
    }

    fn check_index(index: usize) -> Result<(), EngineError<L::Error>> {
        if index >= N {
            return Err(EngineError::PageOutOfRange { index, count: N });
        }
        Ok(())
    }

    /// Clear the panel and every page, then switch on
    pub async fn init(&self) -> Result<(), EngineError<L::Error>> {
        let mut state = self.state.lock().await;
        let state = &mut *state;
        state.store.reset();
        state.lcd.clear()?;
        state.power.switch_on(&mut state.lcd)?;
        Ok(())
    }

    /// Switch the panel off before exit
    pub async fn shutdown(&self) -> Result<(), EngineError<L::Error>> {
        let mut state = self.state.lock().await;
        let state = &mut *state;
        state.power.switch_off(&mut state.lcd)?;
        Ok(())
    }

    /// Replace both rows of a page
    pub async fn replace_page(
        &self,
        index: usize,
        top: &str,
        bottom: &str,
    ) -> Result<(), EngineError<L::Error>> {
        self.store_page(index, Page::new(Row::new(top), Row::new(bottom)))
            .await
    }

    /// Replace both rows of a page, centring each in the window
    pub async fn replace_page_centred(
        &self,
        index: usize,
        top: &str,
        bottom: &str,
    ) -> Result<(), EngineError<L::Error>> {
        self.store_page(index, Page::new(Row::centred(top), Row::centred(bottom)))
            .await
    }

    async fn store_page(&self, index: usize, page: Page) -> Result<(), EngineError<L::Error>> {
        Self::check_index(index)?;

        let mut state = self.state.lock().await;
        let state = &mut *state;
        state.store.replace(index, page);
        state.power.ensure_on(&mut state.lcd)?;

        if state.store.is_current(index) {
            trace!("display: repainting page {}", index);
            state.repaint()?;
        }
        Ok(())
    }

    /// Replace one row of a page, writing only the changed cells
    pub async fn overwrite_row(
        &self,
        index: usize,
        row: LcdRow,
        text: &str,
    ) -> Result<(), EngineError<L::Error>> {
        self.store_row(index, row, Row::new(text)).await
    }

    /// Replace one row of a page with centred text
    pub async fn overwrite_row_centred(
        &self,
        index: usize,
        row: LcdRow,
        text: &str,
    ) -> Result<(), EngineError<L::Error>> {
        self.store_row(index, row, Row::centred(text)).await
    }

    async fn store_row(
        &self,
        index: usize,
        which: LcdRow,
        row: Row,
    ) -> Result<(), EngineError<L::Error>> {
        Self::check_index(index)?;

        let mut state = self.state.lock().await;
        let state = &mut *state;
        state.power.ensure_on(&mut state.lcd)?;

        let Some(old) = state.store.get(index).cloned() else {
            return Err(EngineError::PageOutOfRange { index, count: N });
        };
        if old.row(which).content() == row.content() {
            return Ok(());
        }

        let updated = old.clone().with_row(which, row);
        let full_repaint = old.should_scroll() || updated.should_scroll();
        state.store.replace(index, updated);

        if !state.store.is_current(index) {
            return Ok(());
        }

        if full_repaint {
            // The window may be shifted away from column 0
            state.repaint()?;
        } else {
            let new = state.store.current().row(which).visible();
            let writes = write_diff(&mut state.lcd, which, old.row(which).visible(), new)?;
            trace!("display: {} cells rewritten on page {}", writes, index);
        }
        Ok(())
    }

    /// Clear the panel and blank every page; the current index is kept
    pub async fn clear(&self) -> Result<(), EngineError<L::Error>> {
        let mut state = self.state.lock().await;
        state.store.reset();
        state.lcd.clear()?;
        Ok(())
    }

    /// Show page `index`, wrapping modulo the page count
    pub async fn set_current_page(&self, index: usize) -> Result<usize, EngineError<L::Error>> {
        let mut state = self.state.lock().await;
        Ok(state.show(index)?)
    }

    /// Show the page after the current one, wrapping to 0
    pub async fn next_page(&self) -> Result<usize, EngineError<L::Error>> {
        let mut state = self.state.lock().await;
        let next = state.store.next_index();
        Ok(state.show(next)?)
    }

    /// Enable the display and light the backlight
    pub async fn turn_on(&self) -> Result<(), EngineError<L::Error>> {
        let mut state = self.state.lock().await;
        let state = &mut *state;
        state.power.switch_on(&mut state.lcd)?;
        Ok(())
    }

    /// Blank the display and darken the backlight
    pub async fn turn_off(&self) -> Result<(), EngineError<L::Error>> {
        let mut state = self.state.lock().await;
        let state = &mut *state;
        state.power.switch_off(&mut state.lcd)?;
        Ok(())
    }

    pub async fn is_on(&self) -> bool {
        self.state.lock().await.power.is_on()
    }

    /// Backlight colour currently applied
    pub async fn backlight(&self) -> Rgb {
        self.state.lock().await.power.color()
    }

    /// Index of the page on the glass
    pub async fn current_page(&self) -> usize {
        self.state.lock().await.store.current_index()
    }

    /// Snapshot of one page
    pub async fn page(&self, index: usize) -> Option<Page> {
        self.state.lock().await.store.get(index).cloned()
    }

    /// Advance the marquee of the current page by one column
    ///
    /// Writes the next code of each row just past the right edge of the
    /// window, then shifts the window onto it. Returns `false` without
    /// touching the panel when the page does not scroll.
    pub async fn scroll_step(&self) -> Result<bool, EngineError<L::Error>> {
        let mut state = self.state.lock().await;
        let EngineState { lcd, store, .. } = &mut *state;
        let page = store.current_mut();

        if !page.should_scroll() {
            return Ok(false);
        }
        let (Some(top), Some(bottom)) = (page.top().peek_next_char(), page.bottom().peek_next_char())
        else {
            return Ok(false);
        };

        let col = (page.lcd_offset() + VISIBLE_COLS) % DDRAM_COLS;
        lcd.set_cursor(col, LcdRow::Top.index())?;
        lcd.write_char(top)?;
        lcd.set_cursor(col, LcdRow::Bottom.index())?;
        lcd.write_char(bottom)?;
        lcd.shift_left()?;
        page.advance();
        Ok(true)
    }

    /// Run `f` with exclusive access to the panel
    pub async fn with_hardware<R>(&self, f: impl FnOnce(&mut L) -> R) -> R {
        let mut state = self.state.lock().await;
        f(&mut state.lcd)
    }
}

impl<M, L, const N: usize> DisplayEngine<M, L, N>
where
    M: RawMutex,
    L: CharacterLcd + Backlight + ButtonPanel,
{
    /// Sample every button under the engine lock
    pub async fn read_buttons(&self) -> Result<ButtonSet, EngineError<L::Error>> {
        let mut state = self.state.lock().await;
        Ok(state.lcd.read_all()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use jukebox_hal_sim::{LcdOp, SimError, SimulatedPanel};

    type Engine = DisplayEngine<NoopRawMutex, SimulatedPanel, 3>;

    const LONG_TITLE: &str = "This title is far too long to fit";

    fn engine() -> Engine {
        let engine = Engine::new(SimulatedPanel::new(), EngineConfig::default());
        block_on(engine.init()).unwrap();
        engine
    }

    fn shown(engine: &Engine, row: u8) -> String {
        block_on(engine.with_hardware(|panel| panel.visible_text(row)))
    }

    fn take_ops(engine: &Engine) -> Vec<LcdOp> {
        block_on(engine.with_hardware(|panel| panel.take_ops()))
    }

    fn char_writes(ops: &[LcdOp]) -> usize {
        ops.iter().filter(|op| matches!(op, LcdOp::Write(_))).count()
    }

    #[test]
    fn test_init_switches_on() {
        let engine = engine();
        assert!(block_on(engine.is_on()));
        assert_eq!(block_on(engine.backlight()), DEFAULT_BACKLIGHT);
        assert_eq!(block_on(engine.current_page()), 0);
    }

    #[test]
    fn test_short_text_shows_padded_without_scroll() {
        let engine = engine();
        block_on(engine.replace_page(0, "Jukebox Pi", "")).unwrap();

        assert_eq!(shown(&engine, 0), "Jukebox Pi      ");
        assert_eq!(shown(&engine, 1), " ".repeat(16));
        let page = block_on(engine.page(0)).unwrap();
        assert!(!page.should_scroll());
        assert!(!block_on(engine.scroll_step()).unwrap());
    }

    #[test]
    fn test_replace_hidden_page_writes_nothing() {
        let engine = engine();
        take_ops(&engine);
        block_on(engine.replace_page(2, "Album", "Artist")).unwrap();
        assert!(take_ops(&engine).is_empty());
        assert_eq!(block_on(engine.page(2)).unwrap().top().content(), b"Album           ");
    }

    #[test]
    fn test_out_of_range_touches_nothing() {
        let engine = engine();
        take_ops(&engine);
        block_on(engine.turn_off()).unwrap();
        take_ops(&engine);

        assert_eq!(
            block_on(engine.replace_page(3, "x", "y")),
            Err(EngineError::PageOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(
            block_on(engine.overwrite_row(7, LcdRow::Top, "x")),
            Err(EngineError::PageOutOfRange { index: 7, count: 3 })
        );
        assert!(take_ops(&engine).is_empty());
        assert!(!block_on(engine.is_on()));
    }

    #[test]
    fn test_overwrite_writes_only_changes() {
        let engine = engine();
        block_on(engine.overwrite_row_centred(0, LcdRow::Bottom, "12:00:00")).unwrap();
        take_ops(&engine);

        block_on(engine.overwrite_row_centred(0, LcdRow::Bottom, "12:00:01")).unwrap();
        let ops = take_ops(&engine);
        assert_eq!(
            ops,
            vec![LcdOp::SetCursor { col: 11, row: 1 }, LcdOp::Write(b'1')]
        );
        assert_eq!(shown(&engine, 1), "    12:00:01    ");
    }

    #[test]
    fn test_identical_overwrite_is_noop() {
        let engine = engine();
        block_on(engine.overwrite_row(0, LcdRow::Top, "Same")).unwrap();
        take_ops(&engine);

        block_on(engine.overwrite_row(0, LcdRow::Top, "Same")).unwrap();
        assert_eq!(char_writes(&take_ops(&engine)), 0);
    }

    #[test]
    fn test_overwrite_turns_display_on() {
        let engine = engine();
        block_on(engine.turn_off()).unwrap();
        assert!(!block_on(engine.is_on()));

        block_on(engine.overwrite_row(0, LcdRow::Top, "Wake up")).unwrap();
        assert!(block_on(engine.is_on()));
        assert!(block_on(engine.with_hardware(|p| p.is_display_on())));
    }

    #[test]
    fn test_replace_turns_display_on() {
        let engine = engine();
        block_on(engine.turn_off()).unwrap();
        block_on(engine.replace_page(1, "Hidden", "page")).unwrap();
        assert!(block_on(engine.is_on()));
    }

    #[test]
    fn test_overwrite_on_scrolling_page_repaints() {
        let engine = engine();
        block_on(engine.replace_page(0, LONG_TITLE, "Artist")).unwrap();
        for _ in 0..5 {
            block_on(engine.scroll_step()).unwrap();
        }

        block_on(engine.overwrite_row(0, LcdRow::Bottom, "Other artist")).unwrap();
        let page = block_on(engine.page(0)).unwrap();
        assert_eq!(page.lcd_offset(), 0);
        assert_eq!(shown(&engine, 0), "This title is fa");
        assert_eq!(shown(&engine, 1), "Other artist    ");
    }

    #[test]
    fn test_long_title_scrolls_and_cycles() {
        let engine = engine();
        block_on(engine.replace_page(0, LONG_TITLE, "Artist")).unwrap();

        let page = block_on(engine.page(0)).unwrap();
        assert!(page.should_scroll());
        assert_eq!(page.top().buffer_length(), LONG_TITLE.len() + 16);
        let start = page.top().scroll_offset();

        let mut returned = false;
        for _ in 0..300 {
            assert!(block_on(engine.scroll_step()).unwrap());
            let page = block_on(engine.page(0)).unwrap();
            returned |= page.top().scroll_offset() == start;
        }
        assert!(returned);
    }

    #[test]
    fn test_scroll_window_tracks_content() {
        let engine = engine();
        block_on(engine.replace_page(0, LONG_TITLE, "Artist")).unwrap();
        let page = block_on(engine.page(0)).unwrap();
        let top = page.top().content().to_vec();
        let bottom = page.bottom().content().to_vec();

        for step in 1..=120 {
            block_on(engine.scroll_step()).unwrap();
            let (shown_top, shown_bottom) =
                block_on(engine.with_hardware(|p| (p.visible_codes(0), p.visible_codes(1))));
            for i in 0..16 {
                assert_eq!(shown_top[i], top[(step + i) % top.len()], "top, step {step}");
                assert_eq!(
                    shown_bottom[i],
                    bottom[(step + i) % bottom.len()],
                    "bottom, step {step}"
                );
            }
        }
    }

    #[test]
    fn test_scroll_writes_past_visible_edge() {
        let engine = engine();
        block_on(engine.replace_page(0, LONG_TITLE, "")).unwrap();
        take_ops(&engine);

        block_on(engine.scroll_step()).unwrap();
        let ops = take_ops(&engine);
        assert_eq!(ops[0], LcdOp::SetCursor { col: 16, row: 0 });
        assert_eq!(ops[2], LcdOp::SetCursor { col: 16, row: 1 });
        assert_eq!(ops.last(), Some(&LcdOp::ShiftLeft));
    }

    #[test]
    fn test_only_current_page_scrolls() {
        let engine = engine();
        block_on(engine.replace_page(1, LONG_TITLE, "")).unwrap();
        assert!(!block_on(engine.scroll_step()).unwrap());
        assert_eq!(block_on(engine.page(1)).unwrap().lcd_offset(), 0);
    }

    #[test]
    fn test_next_page_cycles_and_resets_scroll() {
        let engine = engine();
        block_on(engine.replace_page(0, LONG_TITLE, "Artist")).unwrap();
        block_on(engine.replace_page(1, "Album", "Artist")).unwrap();
        for _ in 0..7 {
            block_on(engine.scroll_step()).unwrap();
        }

        assert_eq!(block_on(engine.next_page()).unwrap(), 1);
        assert_eq!(shown(&engine, 0), "Album           ");
        assert_eq!(block_on(engine.next_page()).unwrap(), 2);
        assert_eq!(block_on(engine.next_page()).unwrap(), 0);

        let page = block_on(engine.page(0)).unwrap();
        assert_eq!(page.lcd_offset(), 0);
        assert_eq!(page.top().scroll_offset(), 16);
        assert_eq!(shown(&engine, 0), "This title is fa");
    }

    #[test]
    fn test_set_current_page_wraps() {
        let engine = engine();
        assert_eq!(block_on(engine.set_current_page(5)).unwrap(), 2);
        assert_eq!(block_on(engine.current_page()), 2);
    }

    #[test]
    fn test_clear_blanks_pages_and_keeps_index() {
        let engine = engine();
        block_on(engine.replace_page(1, "Album", "Artist")).unwrap();
        block_on(engine.set_current_page(1)).unwrap();

        block_on(engine.clear()).unwrap();
        assert_eq!(block_on(engine.current_page()), 1);
        assert_eq!(block_on(engine.page(1)), Some(Page::default()));
        assert_eq!(shown(&engine, 0), " ".repeat(16));
    }

    #[test]
    fn test_turn_off_darkens_backlight() {
        let engine = engine();
        block_on(engine.turn_off()).unwrap();
        assert!(block_on(engine.backlight()).is_off());
        assert!(block_on(engine.with_hardware(|p| p.backlight())).is_off());

        block_on(engine.turn_on()).unwrap();
        assert_eq!(block_on(engine.backlight()), DEFAULT_BACKLIGHT);
    }

    #[test]
    fn test_custom_backlight() {
        let config = EngineConfig {
            backlight: Rgb::new(255, 64, 0),
        };
        let engine = Engine::new(SimulatedPanel::new(), config);
        block_on(engine.turn_on()).unwrap();
        assert_eq!(block_on(engine.backlight()), Rgb::new(255, 64, 0));
    }

    #[test]
    fn test_bus_fault_is_returned_and_content_kept() {
        let engine = engine();
        block_on(engine.with_hardware(|p| p.set_faulty(true)));

        assert_eq!(
            block_on(engine.replace_page(0, "Title", "Artist")),
            Err(EngineError::Bus(SimError::BusFault))
        );
        assert_eq!(block_on(engine.page(0)).unwrap().top().content(), b"Title           ");

        block_on(engine.with_hardware(|p| p.set_faulty(false)));
        block_on(engine.set_current_page(0)).unwrap();
        assert_eq!(shown(&engine, 0), "Title           ");
    }

    #[test]
    fn test_read_buttons() {
        let engine = engine();
        block_on(engine.with_hardware(|p| p.press(jukebox_hal::Button::Up)));
        let held = block_on(engine.read_buttons()).unwrap();
        assert!(held.contains(jukebox_hal::Button::Up));
        assert_eq!(held.len(), 1);
    }

    #[test]
    fn test_shutdown_powers_off() {
        let engine = engine();
        block_on(engine.shutdown()).unwrap();
        assert!(!block_on(engine.is_on()));
    }
}
