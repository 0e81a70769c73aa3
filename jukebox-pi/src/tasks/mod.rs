//! Embassy async tasks
//!
//! Each task holds `'static` references to the shared engine and loop
//! controllers created in `main`.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use jukebox_display::{ClockOverlay, DisplayEngine};
use jukebox_hal_sim::SimulatedPanel;

use crate::presenter::PAGE_COUNT;

pub mod buttons;
pub mod clock;
pub mod mirror;
pub mod scroll;
pub mod status;

pub use buttons::button_task;
pub use clock::clock_task;
pub use mirror::mirror_task;
pub use scroll::scroll_task;
pub use status::status_task;

/// Display engine shared by every task
pub type Engine = DisplayEngine<CriticalSectionRawMutex, SimulatedPanel, PAGE_COUNT>;

/// Standby clock shared by the clock and status tasks
pub type Clock = ClockOverlay<CriticalSectionRawMutex>;
