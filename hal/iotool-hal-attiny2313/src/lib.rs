//! ATtiny2313 support for IOTool
//!
//! Named, zero-cost pin operations and calibrated busy-waits for firmware
//! that has to fit into the 2 KiB of flash of an ATtiny2313.
//!
//! - Register map for ports A, B and D
//! - Pin constants (`PA0`..`PD6`) with their package and Arduino numbering
//! - Direction, drive and sense operations on [`gpio::Gpio`] and the
//!   [`gpio!`] shorthand
//! - Typed pins implementing the `iotool-hal` and `embedded-hal` pin traits
//! - Busy-wait delays calibrated for the build's `F_CPU`
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! ```ignore
//! use iotool_hal_attiny2313::{delay, gpio::Gpio, pins::PB5};
//!
//! let gpio = unsafe { Gpio::steal() };
//! gpio.pin_mode_output(PB5);
//! loop {
//!     gpio.digital_write_toggle(PB5);
//!     delay::delay_500ms();
//! }
//! ```

#![no_std]
#![cfg_attr(target_arch = "avr", feature(asm_experimental_arch))]

#[cfg(test)]
extern crate std;

pub mod delay;
pub mod gpio;
pub mod pins;
pub mod registers;
pub mod sim;

// Re-export shared types from iotool-hal
pub use iotool_hal::{BusyWait, Direction, Level, NamedDelay};
pub use pins::PinId;
