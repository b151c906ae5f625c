//! GPIO pin abstractions
//!
//! Provides the logic levels, pin directions and pin traits shared by chip
//! HALs.

use core::ops::Not;

/// Logic level of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Level matching a register bit
    pub const fn from_bit(set: bool) -> Self {
        if set {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Is this [`Level::High`]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(set: bool) -> Self {
        Level::from_bit(set)
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Pin direction as stored in a direction register bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Bit cleared
    Input,
    /// Bit set
    Output,
}

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Flip the driven level
    fn toggle(&mut self);

    /// Drive the pin to a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the line reads low (logic 0)
    fn is_low(&self) -> bool;

    /// Check if the line reads high (logic 1)
    fn is_high(&self) -> bool {
        !self.is_low()
    }

    /// Sensed level
    fn level(&self) -> Level {
        Level::from_bit(self.is_high())
    }
}
