//! ATtiny2313 pin identities and package layout
//!
//! ```text
//! RST/PA2 (1)         (20) VCC
//! RXD/PD0-(2)[0]  [16](19)-PB7/SCL
//! TXD/PD1-(3)[1]  [15](18)-PB6/MISO
//! XT2/PA1-(4)[2]  [14](17)-PB5/MOSI/SDA
//! XT1/PA0-(5)[3]  [13](16)-PB4/PWM
//! CLK/PD2-(6)[4]  [12](15)-PB3/PWM
//!     PD3-(7)[5]  [11](14)-PB2/PWM
//!     PD4-(8)[6]  [10](13)-PB1/ADC
//! PWM/PD5-(9)[7]   [9](12)-PB0/ADC
//!     GND (10)     [8](11)-PD6
//! ```
//!
//! `(n)` is the package pin, `[n]` the Arduino core pin number.

use core::fmt;

use crate::registers::Port;

/// One GPIO pin: a port and a bit index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    port: Port,
    bit: u8,
}

impl PinId {
    /// Pin `bit` of `port`, if it exists
    pub const fn new(port: Port, bit: u8) -> Option<Self> {
        if bit < port.width() {
            Some(Self { port, bit })
        } else {
            None
        }
    }

    const fn known(port: Port, bit: u8) -> Self {
        Self { port, bit }
    }

    /// Port the pin belongs to
    #[inline(always)]
    pub const fn port(self) -> Port {
        self.port
    }

    /// Bit index inside the port registers
    #[inline(always)]
    pub const fn bit(self) -> u8 {
        self.bit
    }

    /// Single-bit mask for the port registers
    #[inline(always)]
    pub const fn mask(self) -> u8 {
        1 << self.bit
    }

    /// Dense index 0..18 (port A, then B, then D)
    pub const fn index(self) -> u8 {
        match self.port {
            Port::A => self.bit,
            Port::B => Port::A.width() + self.bit,
            Port::D => Port::A.width() + Port::B.width() + self.bit,
        }
    }

    /// Name as printed on the pinout, e.g. `"PB3"`
    pub const fn name(self) -> &'static str {
        const A: [&str; 3] = ["PA0", "PA1", "PA2"];
        const B: [&str; 8] = ["PB0", "PB1", "PB2", "PB3", "PB4", "PB5", "PB6", "PB7"];
        const D: [&str; 7] = ["PD0", "PD1", "PD2", "PD3", "PD4", "PD5", "PD6"];
        match self.port {
            Port::A => A[self.bit as usize],
            Port::B => B[self.bit as usize],
            Port::D => D[self.bit as usize],
        }
    }

    /// Package pin number (1..=20)
    pub const fn package_pin(self) -> u8 {
        PIN_TABLE[self.index() as usize].package_pin
    }

    /// Arduino core pin number, `None` for PA2/RESET
    pub const fn arduino_pin(self) -> Option<u8> {
        PIN_TABLE[self.index() as usize].arduino
    }

    /// Alternate function labels, e.g. `"MOSI/SDA"`, empty if none
    pub const fn alternate_functions(self) -> &'static str {
        PIN_TABLE[self.index() as usize].functions
    }

    /// Pin at a package position, `None` for VCC/GND or out of range
    pub fn from_package_pin(package_pin: u8) -> Option<Self> {
        match package_pin_role(package_pin)? {
            PackagePin::Io(pin) => Some(pin),
            PackagePin::Vcc | PackagePin::Gnd => None,
        }
    }

    /// Pin with an Arduino core pin number (0..=16)
    pub fn from_arduino_pin(arduino: u8) -> Option<Self> {
        PIN_TABLE
            .iter()
            .find(|info| info.arduino == Some(arduino))
            .map(|info| info.pin)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Port A, bit 0
pub const PA0: PinId = PinId::known(Port::A, 0);
/// Port A, bit 1
pub const PA1: PinId = PinId::known(Port::A, 1);
/// Port A, bit 2
pub const PA2: PinId = PinId::known(Port::A, 2);

/// Port B, bit 0
pub const PB0: PinId = PinId::known(Port::B, 0);
/// Port B, bit 1
pub const PB1: PinId = PinId::known(Port::B, 1);
/// Port B, bit 2
pub const PB2: PinId = PinId::known(Port::B, 2);
/// Port B, bit 3
pub const PB3: PinId = PinId::known(Port::B, 3);
/// Port B, bit 4
pub const PB4: PinId = PinId::known(Port::B, 4);
/// Port B, bit 5
pub const PB5: PinId = PinId::known(Port::B, 5);
/// Port B, bit 6
pub const PB6: PinId = PinId::known(Port::B, 6);
/// Port B, bit 7
pub const PB7: PinId = PinId::known(Port::B, 7);

/// Port D, bit 0
pub const PD0: PinId = PinId::known(Port::D, 0);
/// Port D, bit 1
pub const PD1: PinId = PinId::known(Port::D, 1);
/// Port D, bit 2
pub const PD2: PinId = PinId::known(Port::D, 2);
/// Port D, bit 3
pub const PD3: PinId = PinId::known(Port::D, 3);
/// Port D, bit 4
pub const PD4: PinId = PinId::known(Port::D, 4);
/// Port D, bit 5
pub const PD5: PinId = PinId::known(Port::D, 5);
/// Port D, bit 6
pub const PD6: PinId = PinId::known(Port::D, 6);

/// Number of GPIO pins
pub const GPIO_COUNT: usize = 18;

/// Package pin of VCC
pub const VCC_PACKAGE_PIN: u8 = 20;

/// Package pin of GND
pub const GND_PACKAGE_PIN: u8 = 10;

/// Where a GPIO pin sits on the package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinInfo {
    /// The pin itself
    pub pin: PinId,
    /// Package pin number (1..=20)
    pub package_pin: u8,
    /// Arduino core pin number
    pub arduino: Option<u8>,
    /// Alternate function labels from the pinout
    pub functions: &'static str,
}

const fn info(pin: PinId, package_pin: u8, arduino: Option<u8>, functions: &'static str) -> PinInfo {
    PinInfo {
        pin,
        package_pin,
        arduino,
        functions,
    }
}

/// Every GPIO pin, in [`PinId::index`] order
pub const PIN_TABLE: [PinInfo; GPIO_COUNT] = [
    info(PA0, 5, Some(3), "XT1"),
    info(PA1, 4, Some(2), "XT2"),
    info(PA2, 1, None, "RST"),
    info(PB0, 12, Some(9), "ADC"),
    info(PB1, 13, Some(10), "ADC"),
    info(PB2, 14, Some(11), "PWM"),
    info(PB3, 15, Some(12), "PWM"),
    info(PB4, 16, Some(13), "PWM"),
    info(PB5, 17, Some(14), "MOSI/SDA"),
    info(PB6, 18, Some(15), "MISO"),
    info(PB7, 19, Some(16), "SCL"),
    info(PD0, 2, Some(0), "RXD"),
    info(PD1, 3, Some(1), "TXD"),
    info(PD2, 6, Some(4), "CLK"),
    info(PD3, 7, Some(5), ""),
    info(PD4, 8, Some(6), ""),
    info(PD5, 9, Some(7), "PWM"),
    info(PD6, 11, Some(8), ""),
];

/// What is bonded to a package pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PackagePin {
    /// A GPIO pin
    Io(PinId),
    /// Supply
    Vcc,
    /// Ground
    Gnd,
}

/// Role of package pin `n` (1..=20)
pub fn package_pin_role(n: u8) -> Option<PackagePin> {
    match n {
        VCC_PACKAGE_PIN => Some(PackagePin::Vcc),
        GND_PACKAGE_PIN => Some(PackagePin::Gnd),
        _ => PIN_TABLE
            .iter()
            .find(|info| info.package_pin == n)
            .map(|info| PackagePin::Io(info.pin)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_constants_match_table() {
        for (i, info) in PIN_TABLE.iter().enumerate() {
            assert_eq!(info.pin.index() as usize, i);
            assert_eq!(PinId::new(info.pin.port(), info.pin.bit()), Some(info.pin));
        }
    }

    #[test]
    fn test_pin_new_rejects_missing_pins() {
        assert_eq!(PinId::new(Port::A, 2), Some(PA2));
        assert_eq!(PinId::new(Port::A, 3), None);
        assert_eq!(PinId::new(Port::B, 7), Some(PB7));
        assert_eq!(PinId::new(Port::B, 8), None);
        assert_eq!(PinId::new(Port::D, 6), Some(PD6));
        assert_eq!(PinId::new(Port::D, 7), None);
    }

    #[test]
    fn test_pinout() {
        assert_eq!(PA2.package_pin(), 1);
        assert_eq!(PA2.arduino_pin(), None);
        assert_eq!(PA2.alternate_functions(), "RST");

        assert_eq!(PD0.package_pin(), 2);
        assert_eq!(PD0.arduino_pin(), Some(0));

        assert_eq!(PA1.package_pin(), 4);
        assert_eq!(PA0.package_pin(), 5);
        assert_eq!(PA0.arduino_pin(), Some(3));

        assert_eq!(PD6.package_pin(), 11);
        assert_eq!(PD6.arduino_pin(), Some(8));

        assert_eq!(PB0.package_pin(), 12);
        assert_eq!(PB5.package_pin(), 17);
        assert_eq!(PB5.arduino_pin(), Some(14));
        assert_eq!(PB5.alternate_functions(), "MOSI/SDA");
        assert_eq!(PB7.package_pin(), 19);
        assert_eq!(PB7.arduino_pin(), Some(16));

        assert_eq!(PD3.alternate_functions(), "");
    }

    #[test]
    fn test_package_pin_roles() {
        assert_eq!(package_pin_role(20), Some(PackagePin::Vcc));
        assert_eq!(package_pin_role(10), Some(PackagePin::Gnd));
        assert_eq!(package_pin_role(1), Some(PackagePin::Io(PA2)));
        assert_eq!(package_pin_role(0), None);
        assert_eq!(package_pin_role(21), None);

        // Every package position 1..=20 is accounted for exactly once
        for n in 1..=20u8 {
            let role = package_pin_role(n).unwrap();
            if let PackagePin::Io(pin) = role {
                assert_eq!(pin.package_pin(), n);
                assert_eq!(PinId::from_package_pin(n), Some(pin));
            } else {
                assert_eq!(PinId::from_package_pin(n), None);
            }
        }
    }

    #[test]
    fn test_arduino_numbering() {
        let expected = [
            PD0, PD1, PA1, PA0, PD2, PD3, PD4, PD5, PD6, PB0, PB1, PB2, PB3, PB4, PB5, PB6, PB7,
        ];
        for (n, pin) in expected.iter().enumerate() {
            assert_eq!(PinId::from_arduino_pin(n as u8), Some(*pin));
            assert_eq!(pin.arduino_pin(), Some(n as u8));
        }
        assert_eq!(PinId::from_arduino_pin(17), None);
    }

    #[test]
    fn test_pin_names() {
        assert_eq!(PA0.name(), "PA0");
        assert_eq!(PB3.name(), "PB3");
        assert_eq!(PD6.name(), "PD6");
        assert_eq!(std::format!("{}", PD2), "PD2");

        for info in PIN_TABLE.iter() {
            assert_eq!(info.pin.name().as_bytes()[0], b'P');
            assert_eq!(info.pin.name().as_bytes()[1], info.pin.port().letter() as u8);
            assert_eq!(info.pin.name().as_bytes()[2], b'0' + info.pin.bit());
        }
    }
}
