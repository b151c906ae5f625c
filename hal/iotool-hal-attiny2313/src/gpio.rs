//! Named pin operations
//!
//! Every operation is a single-bit access to one port register:
//!
//! | Operation | Register | Effect |
//! |-----------|----------|--------|
//! | `pin_mode_input` | DDRx | `&= !(1 << n)` |
//! | `pin_mode_output` | DDRx | `\|= 1 << n` |
//! | `digital_write_low` | PORTx | `&= !(1 << n)` |
//! | `digital_write_high` | PORTx | `\|= 1 << n` |
//! | `digital_write_toggle` | PORTx | `^= 1 << n` |
//! | `digital_read_low` | PINx | `& (1 << n) == 0` |
//! | `digital_read_high` | PINx | `!digital_read_low` |
//!
//! None of them check the pin direction and none of them mask interrupts.
//! With a constant [`PinId`] and the [`Mmio`] register file each call
//! inlines to one fixed register address and bit.
//!
//! [`Pin`] wraps the same operations in a typestate so that writing an
//! input or reading an output does not compile.

use core::convert::Infallible;
use core::marker::PhantomData;

use iotool_hal::gpio::{Direction, Level};
use iotool_hal::{Register8, RegisterFile};

use crate::pins::PinId;
use crate::registers::Mmio;

/// Access to the GPIO ports through a register file
pub struct Gpio<R> {
    regs: R,
}

impl Gpio<Mmio> {
    /// GPIO on the real chip
    ///
    /// # Safety
    ///
    /// See [`Mmio::steal`].
    pub const unsafe fn steal() -> Self {
        Self {
            regs: Mmio::steal(),
        }
    }
}

impl<R: RegisterFile> Gpio<R> {
    /// GPIO over an arbitrary register file
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    /// The underlying register file
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Configure `pin` as input (DDRx bit = 0)
    #[inline(always)]
    pub fn pin_mode_input(&self, pin: PinId) {
        self.regs.register(pin.port().direction()).clear_bit(pin.bit());
    }

    /// Configure `pin` as output (DDRx bit = 1)
    #[inline(always)]
    pub fn pin_mode_output(&self, pin: PinId) {
        self.regs.register(pin.port().direction()).set_bit(pin.bit());
    }

    /// Configure `pin` direction
    #[inline(always)]
    pub fn pin_mode(&self, pin: PinId, direction: Direction) {
        match direction {
            Direction::Input => self.pin_mode_input(pin),
            Direction::Output => self.pin_mode_output(pin),
        }
    }

    /// Current direction of `pin`
    #[inline(always)]
    pub fn direction(&self, pin: PinId) -> Direction {
        if self.regs.register(pin.port().direction()).is_bit_set(pin.bit()) {
            Direction::Output
        } else {
            Direction::Input
        }
    }

    /// Drive `pin` low (PORTx bit = 0)
    #[inline(always)]
    pub fn digital_write_low(&self, pin: PinId) {
        self.regs.register(pin.port().output()).clear_bit(pin.bit());
    }

    /// Drive `pin` high (PORTx bit = 1)
    #[inline(always)]
    pub fn digital_write_high(&self, pin: PinId) {
        self.regs.register(pin.port().output()).set_bit(pin.bit());
    }

    /// Flip the driven level of `pin`
    #[inline(always)]
    pub fn digital_write_toggle(&self, pin: PinId) {
        self.regs.register(pin.port().output()).toggle_bit(pin.bit());
    }

    /// Drive `pin` to `level`
    #[inline(always)]
    pub fn digital_write(&self, pin: PinId, level: Level) {
        match level {
            Level::Low => self.digital_write_low(pin),
            Level::High => self.digital_write_high(pin),
        }
    }

    /// Level currently latched in PORTx for `pin`
    #[inline(always)]
    pub fn output_level(&self, pin: PinId) -> Level {
        Level::from_bit(self.regs.register(pin.port().output()).is_bit_set(pin.bit()))
    }

    /// True when `pin` senses a low line
    #[inline(always)]
    pub fn digital_read_low(&self, pin: PinId) -> bool {
        !self.regs.register(pin.port().input()).is_bit_set(pin.bit())
    }

    /// True when `pin` senses a high line
    #[inline(always)]
    pub fn digital_read_high(&self, pin: PinId) -> bool {
        !self.digital_read_low(pin)
    }

    /// Sensed level of `pin`
    #[inline(always)]
    pub fn digital_read(&self, pin: PinId) -> Level {
        Level::from_bit(self.digital_read_high(pin))
    }

    /// Typed handle for `pin`, assumed to be an input
    ///
    /// Performs no register access: after reset every pin is an input, and
    /// a pin reconfigured through the untyped operations has to be brought
    /// back with [`Pin::into_input`] or [`Pin::into_output`].
    pub fn pin(&self, pin: PinId) -> Pin<R, Input>
    where
        R: Copy,
    {
        Pin {
            regs: self.regs,
            id: pin,
            _mode: PhantomData,
        }
    }
}

/// Spell a pin operation by pin name
///
/// ```ignore
/// gpio!(gpio, PB5, output);
/// gpio!(gpio, PB5, high);
/// if gpio!(gpio, PD2, read_low) {
///     gpio!(gpio, PB5, toggle);
/// }
/// ```
#[macro_export]
macro_rules! gpio {
    ($gpio:expr, $pin:ident, input) => {
        $gpio.pin_mode_input($crate::pins::$pin)
    };
    ($gpio:expr, $pin:ident, output) => {
        $gpio.pin_mode_output($crate::pins::$pin)
    };
    ($gpio:expr, $pin:ident, low) => {
        $gpio.digital_write_low($crate::pins::$pin)
    };
    ($gpio:expr, $pin:ident, high) => {
        $gpio.digital_write_high($crate::pins::$pin)
    };
    ($gpio:expr, $pin:ident, toggle) => {
        $gpio.digital_write_toggle($crate::pins::$pin)
    };
    ($gpio:expr, $pin:ident, read_low) => {
        $gpio.digital_read_low($crate::pins::$pin)
    };
    ($gpio:expr, $pin:ident, read_high) => {
        $gpio.digital_read_high($crate::pins::$pin)
    };
}

/// Typestate: pin configured as input
pub struct Input;

/// Typestate: pin configured as output
pub struct Output;

/// A pin whose direction is tracked in its type
pub struct Pin<R, MODE> {
    regs: R,
    id: PinId,
    _mode: PhantomData<MODE>,
}

impl<R: RegisterFile, MODE> Pin<R, MODE> {
    /// Which pin this is
    pub fn id(&self) -> PinId {
        self.id
    }

    fn gpio(&self) -> Gpio<&R> {
        Gpio::new(&self.regs)
    }

    fn into_mode<NEW>(self) -> Pin<R, NEW> {
        Pin {
            regs: self.regs,
            id: self.id,
            _mode: PhantomData,
        }
    }

    /// Switch to output
    ///
    /// The level driven is whatever PORTx held, which for an input with
    /// pull-up is high.
    pub fn into_output(self) -> Pin<R, Output> {
        self.gpio().pin_mode_output(self.id);
        #[cfg(feature = "defmt")]
        defmt::trace!("{} -> output", self.id);
        self.into_mode()
    }

    /// Switch to input
    ///
    /// PORTx is left alone, so a pin that was driving high keeps its
    /// pull-up enabled.
    pub fn into_input(self) -> Pin<R, Input> {
        self.gpio().pin_mode_input(self.id);
        #[cfg(feature = "defmt")]
        defmt::trace!("{} -> input", self.id);
        self.into_mode()
    }

    /// Switch to input with the internal pull-up enabled
    pub fn into_pull_up_input(self) -> Pin<R, Input> {
        let gpio = self.gpio();
        gpio.pin_mode_input(self.id);
        gpio.digital_write_high(self.id);
        #[cfg(feature = "defmt")]
        defmt::trace!("{} -> input, pull-up", self.id);
        self.into_mode()
    }
}

impl<R: RegisterFile> iotool_hal::OutputPin for Pin<R, Output> {
    fn set_high(&mut self) {
        self.gpio().digital_write_high(self.id);
    }

    fn set_low(&mut self) {
        self.gpio().digital_write_low(self.id);
    }

    fn toggle(&mut self) {
        self.gpio().digital_write_toggle(self.id);
    }

    fn is_set_high(&self) -> bool {
        self.gpio().output_level(self.id).is_high()
    }
}

impl<R: RegisterFile> iotool_hal::InputPin for Pin<R, Input> {
    fn is_low(&self) -> bool {
        self.gpio().digital_read_low(self.id)
    }
}

impl<R, MODE> embedded_hal::digital::ErrorType for Pin<R, MODE> {
    type Error = Infallible;
}

impl<R: RegisterFile> embedded_hal::digital::OutputPin for Pin<R, Output> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        iotool_hal::OutputPin::set_low(self);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        iotool_hal::OutputPin::set_high(self);
        Ok(())
    }
}

impl<R: RegisterFile> embedded_hal::digital::StatefulOutputPin for Pin<R, Output> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(iotool_hal::OutputPin::is_set_high(self))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(iotool_hal::OutputPin::is_set_low(self))
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        iotool_hal::OutputPin::toggle(self);
        Ok(())
    }
}

impl<R: RegisterFile> embedded_hal::digital::InputPin for Pin<R, Input> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(iotool_hal::InputPin::is_high(self))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(iotool_hal::InputPin::is_low(self))
    }
}
