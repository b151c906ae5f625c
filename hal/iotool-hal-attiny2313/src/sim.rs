//! Host-side register file
//!
//! Backs the ATtiny2313 I/O window (data-space 0x20..0x60) with plain
//! cells so firmware logic built on [`Gpio`](crate::gpio::Gpio) can run in
//! host tests. Cell-based and therefore `!Sync`, like the single core it
//! stands in for.

use core::cell::Cell;

use iotool_hal::RegisterFile;

use crate::registers::{Port, IO_OFFSET};

/// Size of the I/O register window
pub const IO_WINDOW: usize = 0x40;

/// Simulated I/O registers
///
/// All registers start at 0x00, like the port registers after reset.
/// Unlike the real chip, PINx does not follow PORTx/DDRx on its own; tests
/// drive it with [`SimulatedRegisters::set_input`].
pub struct SimulatedRegisters {
    regs: [Cell<u8>; IO_WINDOW],
}

impl Default for SimulatedRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedRegisters {
    /// Create a register file with every register cleared
    pub fn new() -> Self {
        Self {
            regs: [const { Cell::new(0) }; IO_WINDOW],
        }
    }

    fn slot(&self, addr: u8) -> &Cell<u8> {
        let index = addr
            .checked_sub(IO_OFFSET)
            .map(usize::from)
            .filter(|&i| i < IO_WINDOW);
        match index {
            Some(i) => &self.regs[i],
            None => panic!("address {:#04x} outside the I/O window", addr),
        }
    }

    /// Current PINx value of `port`
    pub fn input(&self, port: Port) -> u8 {
        self.read(port.input())
    }

    /// Set what the pins of `port` sense
    pub fn set_input(&self, port: Port, value: u8) {
        self.write(port.input(), value);
    }

    /// Current DDRx value of `port`
    pub fn direction(&self, port: Port) -> u8 {
        self.read(port.direction())
    }

    /// Overwrite DDRx of `port`
    pub fn set_direction(&self, port: Port, value: u8) {
        self.write(port.direction(), value);
    }

    /// Current PORTx value of `port`
    pub fn output(&self, port: Port) -> u8 {
        self.read(port.output())
    }

    /// Overwrite PORTx of `port`
    pub fn set_output(&self, port: Port, value: u8) {
        self.write(port.output(), value);
    }
}

impl RegisterFile for SimulatedRegisters {
    fn read(&self, addr: u8) -> u8 {
        self.slot(addr).get()
    }

    fn write(&self, addr: u8, value: u8) {
        self.slot(addr).set(value);
    }
}
