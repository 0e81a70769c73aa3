//! Keypad abstractions
//!
//! The front panel carries five momentary buttons. They are sampled, not
//! interrupt driven: a reading of `true` means "held down right now".

use crate::ErrorType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Front panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Button {
    Select,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// Every button, in sampling order
    pub const ALL: [Button; 5] = [
        Button::Select,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    /// Position of this button in [`Button::ALL`]
    pub const fn index(self) -> u8 {
        match self {
            Button::Select => 0,
            Button::Up => 1,
            Button::Down => 2,
            Button::Left => 3,
            Button::Right => 4,
        }
    }

    /// Lowercase name, as printed on the panel
    pub const fn name(self) -> &'static str {
        match self {
            Button::Select => "select",
            Button::Up => "up",
            Button::Down => "down",
            Button::Left => "left",
            Button::Right => "right",
        }
    }
}

/// Set of buttons read in one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSet(u8);

impl ButtonSet {
    /// No buttons held
    pub const EMPTY: Self = Self(0);

    /// Add a button to the set
    pub fn insert(&mut self, button: Button) {
        self.0 |= 1 << button.index();
    }

    /// Check if a button is in the set
    pub fn contains(&self, button: Button) -> bool {
        self.0 & (1 << button.index()) != 0
    }

    /// Check if no button is held
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of held buttons
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Held buttons in sampling order
    pub fn iter(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL.into_iter().filter(|b| self.contains(*b))
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for button in iter {
            set.insert(button);
        }
        set
    }
}

/// Keypad input
pub trait ButtonPanel: ErrorType {
    /// Sample one button
    fn is_pressed(&mut self, button: Button) -> Result<bool, Self::Error>;

    /// Sample every button in [`Button::ALL`] order
    ///
    /// Returns the first bus error; no partial set is returned.
    fn read_all(&mut self) -> Result<ButtonSet, Self::Error> {
        let mut set = ButtonSet::EMPTY;
        for button in Button::ALL {
            if self.is_pressed(button)? {
                set.insert(button);
            }
        }
        Ok(set)
    }
}

impl<T: ButtonPanel + ?Sized> ButtonPanel for &mut T {
    fn is_pressed(&mut self, button: Button) -> Result<bool, Self::Error> {
        T::is_pressed(self, button)
    }
}
