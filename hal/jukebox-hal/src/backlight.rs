//! RGB backlight

use crate::ErrorType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Backlight colour, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// All channels at zero intensity
    pub const OFF: Self = Self::new(0, 0, 0);

    /// Create a colour from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Check if every channel is dark
    pub const fn is_off(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// RGB backlight driver
///
/// Monochrome modules treat any non-[`Rgb::OFF`] colour as "on".
pub trait Backlight: ErrorType {
    /// Set the backlight colour
    fn set_backlight(&mut self, color: Rgb) -> Result<(), Self::Error>;
}

impl<T: Backlight + ?Sized> Backlight for &mut T {
    fn set_backlight(&mut self, color: Rgb) -> Result<(), Self::Error> {
        T::set_backlight(self, color)
    }
}
