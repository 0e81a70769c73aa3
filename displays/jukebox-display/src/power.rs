//! Display power and backlight state

use jukebox_hal::{Backlight, CharacterLcd, Rgb};
use log::debug;

/// Default "on" colour: dim blue
pub const DEFAULT_BACKLIGHT: Rgb = Rgb::new(0, 0, 128);

/// Power flag and backlight colour of the panel
///
/// The state only changes once the hardware has accepted both the display
/// and the backlight command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerState {
    on: bool,
    color: Rgb,
    on_color: Rgb,
}

impl PowerState {
    /// Start powered off, switching on to `on_color`
    pub const fn new(on_color: Rgb) -> Self {
        Self {
            on: false,
            color: Rgb::OFF,
            on_color,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Backlight colour currently applied
    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn on_color(&self) -> Rgb {
        self.on_color
    }

    /// Enable the display and light the backlight
    pub fn switch_on<L>(&mut self, lcd: &mut L) -> Result<(), L::Error>
    where
        L: CharacterLcd + Backlight,
    {
        lcd.set_display(true)?;
        lcd.set_backlight(self.on_color)?;
        self.on = true;
        self.color = self.on_color;
        debug!("display: on");
        Ok(())
    }

    /// Blank the display and darken the backlight
    pub fn switch_off<L>(&mut self, lcd: &mut L) -> Result<(), L::Error>
    where
        L: CharacterLcd + Backlight,
    {
        lcd.set_display(false)?;
        lcd.set_backlight(Rgb::OFF)?;
        self.on = false;
        self.color = Rgb::OFF;
        debug!("display: off");
        Ok(())
    }

    /// Switch on unless already on
    pub fn ensure_on<L>(&mut self, lcd: &mut L) -> Result<(), L::Error>
    where
        L: CharacterLcd + Backlight,
    {
        if self.on {
            return Ok(());
        }
        self.switch_on(lcd)
    }
}

impl Default for PowerState {
    fn default() -> Self {
        Self::new(DEFAULT_BACKLIGHT)
    }
}
