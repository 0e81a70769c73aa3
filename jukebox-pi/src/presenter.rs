//! Player status to display pages
//!
//! Page layout while playing or paused:
//!
//! | page | top    | bottom             |
//! |------|--------|--------------------|
//! | 0    | title  | artist             |
//! | 1    | album  | artist             |
//! | 2    | format | `44.1kHz 16-bit`   |
//!
//! When stopped, page 0 shows the name of the box and the standby clock.

use embassy_sync::blocking_mutex::raw::RawMutex;
use jukebox_display::{ClockOverlay, DisplayEngine, EngineError};
use jukebox_hal::{Backlight, CharacterLcd};
use log::{debug, info};
use serde::Deserialize;

/// Banner shown while stopped
pub const IDLE_BANNER: &str = "Jukebox Pi";

/// Pages used by the presenter
pub const PAGE_COUNT: usize = 3;

/// Player transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Play,
    Pause,
    Stop,
}

/// One status report from the player
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackStatus {
    pub state: Option<PlaybackState>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Container format, e.g. `FLAC`
    pub format: Option<String>,
    pub sample_rate_khz: f64,
    pub bits: u32,
}

impl TrackStatus {
    /// `44.1kHz 16-bit`
    pub fn quality(&self) -> String {
        format!("{:.1}kHz {}-bit", self.sample_rate_khz, self.bits)
    }
}

/// Turns status reports into page updates
#[derive(Debug, Default)]
pub struct Presenter {
    previous: Option<TrackStatus>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a playing status needs the pages rewritten
    fn track_changed(&self, status: &TrackStatus) -> bool {
        match &self.previous {
            None => true,
            Some(prev) => {
                prev.state == Some(PlaybackState::Stop)
                    || prev.title != status.title
                    || prev.artist != status.artist
            }
        }
    }

    /// Apply one status report
    ///
    /// The report is remembered only once the display accepted it, so a
    /// failed update is retried by the next report.
    pub async fn show<M, L, C, const N: usize>(
        &mut self,
        engine: &DisplayEngine<M, L, N>,
        clock: &ClockOverlay<C>,
        status: TrackStatus,
    ) -> Result<(), EngineError<L::Error>>
    where
        M: RawMutex,
        C: RawMutex,
        L: CharacterLcd + Backlight,
    {
        match status.state {
            Some(PlaybackState::Play | PlaybackState::Pause) => {
                clock.stop();
                if self.track_changed(&status) {
                    info!(
                        "Now playing: {} - {}",
                        status.artist.as_deref().unwrap_or("?"),
                        status.title.as_deref().unwrap_or("?")
                    );
                    let title = status.title.as_deref().unwrap_or_default();
                    let artist = status.artist.as_deref().unwrap_or_default();
                    let album = status.album.as_deref().unwrap_or_default();
                    let format = status.format.as_deref().unwrap_or("?");

                    engine.clear().await?;
                    engine.replace_page(0, title, artist).await?;
                    engine.replace_page(1, album, artist).await?;
                    engine.replace_page(2, format, &status.quality()).await?;
                } else {
                    debug!("Same track, pages kept");
                }
            }
            Some(PlaybackState::Stop) => {
                info!("Stopped");
                engine.clear().await?;
                engine.replace_page_centred(0, IDLE_BANNER, "").await?;
                clock.start();
            }
            None => debug!("Status without state ignored"),
        }

        self.previous = Some(status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use jukebox_display::{ClockConfig, EngineConfig};
    use jukebox_hal_sim::SimulatedPanel;

    type Engine = DisplayEngine<NoopRawMutex, SimulatedPanel, PAGE_COUNT>;
    type Clock = ClockOverlay<NoopRawMutex>;

    fn playing(title: &str) -> TrackStatus {
        TrackStatus {
            state: Some(PlaybackState::Play),
            title: Some(title.into()),
            artist: Some("Kraftwerk".into()),
            album: Some("Computer World".into()),
            format: Some("FLAC".into()),
            sample_rate_khz: 44.1,
            bits: 16,
        }
    }

    fn stopped() -> TrackStatus {
        TrackStatus {
            state: Some(PlaybackState::Stop),
            ..TrackStatus::default()
        }
    }

    fn setup() -> (Engine, Clock, Presenter) {
        let engine = Engine::new(SimulatedPanel::new(), EngineConfig::default());
        block_on(engine.init()).unwrap();
        (engine, Clock::new(ClockConfig::default()), Presenter::new())
    }

    fn top_row(engine: &Engine, page: usize) -> Vec<u8> {
        block_on(engine.page(page)).unwrap().top().visible().to_vec()
    }

    #[test]
    fn test_quality_line() {
        assert_eq!(playing("x").quality(), "44.1kHz 16-bit");
        let hires = TrackStatus {
            sample_rate_khz: 96.0,
            bits: 24,
            ..TrackStatus::default()
        };
        assert_eq!(hires.quality(), "96.0kHz 24-bit");
    }

    #[test]
    fn test_playing_fills_three_pages() {
        let (engine, clock, mut presenter) = setup();
        block_on(presenter.show(&engine, &clock, playing("Numbers"))).unwrap();

        let page0 = block_on(engine.page(0)).unwrap();
        assert_eq!(page0.top().visible(), b"Numbers         ");
        assert_eq!(page0.bottom().visible(), b"Kraftwerk       ");
        assert_eq!(top_row(&engine, 1), b"Computer World  ");
        let page2 = block_on(engine.page(2)).unwrap();
        assert_eq!(page2.top().visible(), b"FLAC            ");
        assert_eq!(page2.bottom().visible(), b"44.1kHz 16-bit  ");
    }

    #[test]
    fn test_missing_format_shows_question_mark() {
        let (engine, clock, mut presenter) = setup();
        let status = TrackStatus {
            format: None,
            ..playing("Numbers")
        };
        block_on(presenter.show(&engine, &clock, status)).unwrap();
        assert_eq!(top_row(&engine, 2), b"?               ");
    }

    #[test]
    fn test_same_track_keeps_pages() {
        let (engine, clock, mut presenter) = setup();
        block_on(presenter.show(&engine, &clock, playing("Numbers"))).unwrap();
        block_on(engine.next_page()).unwrap();

        let paused = TrackStatus {
            state: Some(PlaybackState::Pause),
            ..playing("Numbers")
        };
        block_on(presenter.show(&engine, &clock, paused)).unwrap();
        // A clear would not move the page, but it would blank the glass
        assert_eq!(block_on(engine.current_page()), 1);
        let shown = block_on(engine.with_hardware(|p| p.visible_text(0)));
        assert_eq!(shown, "Computer World  ");
    }

    #[test]
    fn test_new_track_rewrites_pages() {
        let (engine, clock, mut presenter) = setup();
        block_on(presenter.show(&engine, &clock, playing("Numbers"))).unwrap();
        block_on(presenter.show(&engine, &clock, playing("Computer Love"))).unwrap();
        assert_eq!(top_row(&engine, 0), b"Computer Love   ");
    }

    #[test]
    fn test_stop_shows_banner_and_starts_clock() {
        let (engine, clock, mut presenter) = setup();
        block_on(presenter.show(&engine, &clock, playing("Numbers"))).unwrap();
        block_on(presenter.show(&engine, &clock, stopped())).unwrap();

        assert!(clock.is_running());
        assert_eq!(top_row(&engine, 0), b"   Jukebox Pi   ");
        assert_eq!(top_row(&engine, 1), b"                ");
    }

    #[test]
    fn test_play_after_stop_rewrites_and_stops_clock() {
        let (engine, clock, mut presenter) = setup();
        block_on(presenter.show(&engine, &clock, playing("Numbers"))).unwrap();
        block_on(presenter.show(&engine, &clock, stopped())).unwrap();
        block_on(presenter.show(&engine, &clock, playing("Numbers"))).unwrap();

        assert!(!clock.is_running());
        assert_eq!(top_row(&engine, 0), b"Numbers         ");
    }

    #[test]
    fn test_parse_status_json() {
        let status: TrackStatus = serde_json::from_str(
            r#"{"state":"play","title":"Numbers","artist":"Kraftwerk","sample_rate_khz":44.1,"bits":16}"#,
        )
        .unwrap();
        assert_eq!(status.state, Some(PlaybackState::Play));
        assert_eq!(status.album, None);
        assert_eq!(status.bits, 16);
    }
}
