//! IOTool Hardware Abstraction Layer
//!
//! This crate defines the chip-agnostic pieces of the IOTool low-level API:
//! single-bit register access, pin traits and the arithmetic behind
//! calibrated busy-waits. Chip crates (currently the ATtiny2313) supply the
//! register map and the actual register file.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware (blink, sensors, ...)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  iotool-hal-attiny2313 (named pins,     │
//! │  register map, delays)                  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  iotool-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`register::Register8`], [`register::RegisterFile`] - 8-bit I/O registers
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`delay::BusyWait`] - Calibrated spin loops

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod register;

// Re-export key traits at crate root for convenience
pub use delay::{BusyWait, NamedDelay};
pub use gpio::{Direction, InputPin, Level, OutputPin};
pub use register::{Register8, RegisterFile};
