//! ATtiny2313 port register map
//!
//! Data-space addresses of the PINx, DDRx and PORTx registers of the three
//! I/O ports. The I/O-space address used by `sbi`/`cbi`/`in`/`out` is the
//! data-space address minus [`IO_OFFSET`].

use iotool_hal::RegisterFile;

/// Offset between I/O-space and data-space addresses
pub const IO_OFFSET: u8 = 0x20;

/// Port D input pins
pub const PIND: u8 = 0x30;
/// Port D data direction
pub const DDRD: u8 = 0x31;
/// Port D output
pub const PORTD: u8 = 0x32;
/// Port B input pins
pub const PINB: u8 = 0x36;
/// Port B data direction
pub const DDRB: u8 = 0x37;
/// Port B output
pub const PORTB: u8 = 0x38;
/// Port A input pins
pub const PINA: u8 = 0x39;
/// Port A data direction
pub const DDRA: u8 = 0x3A;
/// Port A output
pub const PORTA: u8 = 0x3B;

/// I/O port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// PA0..PA2 (PA2 doubles as RESET)
    A,
    /// PB0..PB7
    B,
    /// PD0..PD6
    D,
}

/// Which of a port's three registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterKind {
    /// PINx, sensed levels
    Input,
    /// DDRx, 1 = output
    Direction,
    /// PORTx, driven levels (pull-ups on inputs)
    Output,
}

impl Port {
    /// All ports, in pin-name order (A, B, D)
    pub const ALL: [Port; 3] = [Port::A, Port::B, Port::D];

    /// Number of pins bonded out on this port
    pub const fn width(self) -> u8 {
        match self {
            Port::A => 3,
            Port::B => 8,
            Port::D => 7,
        }
    }

    /// Port letter as written in pin names
    pub const fn letter(self) -> char {
        match self {
            Port::A => 'A',
            Port::B => 'B',
            Port::D => 'D',
        }
    }

    /// PINx address
    pub const fn input(self) -> u8 {
        match self {
            Port::A => PINA,
            Port::B => PINB,
            Port::D => PIND,
        }
    }

    /// DDRx address
    pub const fn direction(self) -> u8 {
        match self {
            Port::A => DDRA,
            Port::B => DDRB,
            Port::D => DDRD,
        }
    }

    /// PORTx address
    pub const fn output(self) -> u8 {
        match self {
            Port::A => PORTA,
            Port::B => PORTB,
            Port::D => PORTD,
        }
    }

    /// Address of one of this port's registers
    pub const fn register(self, kind: RegisterKind) -> u8 {
        match kind {
            RegisterKind::Input => self.input(),
            RegisterKind::Direction => self.direction(),
            RegisterKind::Output => self.output(),
        }
    }

    /// Mask of the bits that correspond to real pins
    pub const fn pin_mask(self) -> u8 {
        ((1u16 << self.width()) - 1) as u8
    }
}

/// The real data space
///
/// Zero-sized; every access is a volatile load or store at a fixed address,
/// which the compiler lowers to a single `in`/`out`/`sbi`/`cbi` when the
/// address and bit are constants.
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Get the hardware register file
    ///
    /// # Safety
    ///
    /// Only meaningful on the ATtiny2313 itself. The caller takes over
    /// coordination with any other code (interrupt handlers included) that
    /// touches the same port registers.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl RegisterFile for Mmio {
    #[inline(always)]
    fn read(&self, addr: u8) -> u8 {
        // SAFETY: `Mmio` only exists on the target, where every address the
        // register map hands out is a valid, always-mapped I/O register.
        unsafe { core::ptr::read_volatile(addr as usize as *const u8) }
    }

    #[inline(always)]
    fn write(&self, addr: u8, value: u8) {
        // SAFETY: as for `read`.
        unsafe { core::ptr::write_volatile(addr as usize as *mut u8, value) }
    }
}
